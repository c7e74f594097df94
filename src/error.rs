use thiserror::Error;

pub type Result<T> = std::result::Result<T, GoPackageError>;

#[derive(Error, Debug)]
pub enum GoPackageError {
    // Standard library errors with automatic conversion
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),

    // Startup errors, fatal before any file is touched
    #[error("Invalid package pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("Template parse error: {0}")]
    TemplateParse(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    // Per-file errors
    #[error("Template render error: {0}")]
    TemplateRender(String),

    #[error("no package definition found")]
    MissingPackageDirective,
}

impl GoPackageError {
    /// Errors that invalidate the whole run rather than a single file.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            GoPackageError::InvalidPattern(_)
                | GoPackageError::TemplateParse(_)
                | GoPackageError::Configuration(_)
        )
    }
}
