//! Edit planning and application for a single file.
//!
//! [`rewrite`] is a pure function of the file content and a [`RewriteConfig`].
//! It either leaves the content alone (with a reason) or produces new content
//! in which exactly one `go_package` option was replaced or inserted. Every
//! byte outside the edited span is preserved; content is never decoded except
//! for the package name handed to the filter.

use crate::config::RewriteSettings;
use crate::locator::{find_option, Locator, OptionStatement, PackageDirective};
use crate::transform::NameTransformer;
use crate::{GoPackageError, Result};
use std::ops::Range;
use tracing::debug;

pub const GO_PACKAGE: &str = "go_package";

/// Immutable, compiled configuration for a run.
#[derive(Debug, Clone)]
pub struct RewriteConfig {
    pub transformer: NameTransformer,
    pub require_package: bool,
    locator: Locator,
}

impl RewriteConfig {
    pub fn new(transformer: NameTransformer, require_package: bool) -> Self {
        Self {
            transformer,
            require_package,
            locator: Locator::new(),
        }
    }

    /// Compile pattern and template. Failures here are configuration errors.
    pub fn compile(settings: &RewriteSettings) -> Result<Self> {
        let transformer = NameTransformer::from_sources(&settings.package, &settings.go_package)?;
        Ok(Self::new(transformer, settings.require_package))
    }

    pub fn locator(&self) -> &Locator {
        &self.locator
    }
}

/// Where a new option statement was placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Before the first option sorting at or after `go_package`.
    BeforeOption,
    /// After the last option of the file, separated by a blank line.
    AfterLastOption,
    /// After the package directive, separated by a blank line.
    AfterPackage,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    NoPackageDirective,
    PackageMismatch { package: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RewriteOutcome {
    Replaced { content: Vec<u8>, value: String },
    Inserted { content: Vec<u8>, value: String, placement: Placement },
    Skipped(SkipReason),
}

impl RewriteOutcome {
    /// New content, if the file should be written.
    pub fn content(&self) -> Option<&[u8]> {
        match self {
            RewriteOutcome::Replaced { content, .. } | RewriteOutcome::Inserted { content, .. } => {
                Some(content)
            }
            RewriteOutcome::Skipped(_) => None,
        }
    }

    pub fn value(&self) -> Option<&str> {
        match self {
            RewriteOutcome::Replaced { value, .. } | RewriteOutcome::Inserted { value, .. } => {
                Some(value)
            }
            RewriteOutcome::Skipped(_) => None,
        }
    }
}

/// A single splice: `range` of the original is replaced by `text`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    pub range: Range<usize>,
    pub text: Vec<u8>,
    pub placement: Option<Placement>,
}

impl Edit {
    pub fn apply(&self, content: &[u8]) -> Vec<u8> {
        let mut out = Vec::with_capacity(content.len() + self.text.len());
        out.extend_from_slice(&content[..self.range.start]);
        out.extend_from_slice(&self.text);
        out.extend_from_slice(&content[self.range.end..]);
        out
    }
}

fn option_statement(before: &[u8], indent: &[u8], value: &str, after: &[u8]) -> Vec<u8> {
    let statement = format!("option {} = \"{}\";", GO_PACKAGE, value);
    let mut text =
        Vec::with_capacity(before.len() + indent.len() + statement.len() + after.len());
    text.extend_from_slice(before);
    text.extend_from_slice(indent);
    text.extend_from_slice(statement.as_bytes());
    text.extend_from_slice(after);
    text
}

/// Decide where the rendered value goes.
pub fn plan_edit(
    content: &[u8],
    directive: &PackageDirective,
    options: &[OptionStatement],
    value: &str,
) -> Edit {
    if let Some(existing) = find_option(content, options, GO_PACKAGE) {
        return Edit {
            range: existing.value.clone(),
            text: value.as_bytes().to_vec(),
            placement: None,
        };
    }

    // Byte-wise comparison, same order as comparing the names as strings
    if let Some(next) = options
        .iter()
        .find(|option| GO_PACKAGE.as_bytes() <= option.name(content))
    {
        return Edit {
            range: next.span.start..next.span.start,
            text: option_statement(b"", next.indent(content), value, b"\n"),
            placement: Some(Placement::BeforeOption),
        };
    }

    if let Some(last) = options.last() {
        return Edit {
            range: last.span.end..last.span.end,
            text: option_statement(b"\n\n", last.indent(content), value, b""),
            placement: Some(Placement::AfterLastOption),
        };
    }

    Edit {
        range: directive.span.end..directive.span.end,
        text: option_statement(b"\n\n", b"", value, b""),
        placement: Some(Placement::AfterPackage),
    }
}

/// Rewrite the `go_package` option of one file's content.
pub fn rewrite(content: &[u8], config: &RewriteConfig) -> Result<RewriteOutcome> {
    let Some(directive) = config.locator().locate_package(content) else {
        if config.require_package {
            return Err(GoPackageError::MissingPackageDirective);
        }
        debug!("No package directive found");
        return Ok(RewriteOutcome::Skipped(SkipReason::NoPackageDirective));
    };

    let package = String::from_utf8_lossy(directive.name(content));
    let Some(value) = config.transformer.render(&package)? else {
        debug!("Package {:?} did not match filter", package);
        return Ok(RewriteOutcome::Skipped(SkipReason::PackageMismatch {
            package: package.into_owned(),
        }));
    };

    let options = config.locator().locate_options(content);
    let edit = plan_edit(content, &directive, &options, &value);
    let new_content = edit.apply(content);
    debug!(
        "Planned {:?} edit at {}..{}",
        edit.placement, edit.range.start, edit.range.end
    );

    Ok(match edit.placement {
        Some(placement) => RewriteOutcome::Inserted {
            content: new_content,
            value,
            placement,
        },
        None => RewriteOutcome::Replaced {
            content: new_content,
            value,
        },
    })
}
