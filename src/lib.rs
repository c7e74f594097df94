pub mod config;
pub mod error;
pub mod locator;
pub mod logging;
pub mod rewriter;
pub mod template;
pub mod transform;
pub mod walker;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;

pub use config::{Config, RewriteSettings};
pub use error::{GoPackageError, Result};
pub use rewriter::{rewrite, Placement, RewriteConfig, RewriteOutcome, SkipReason};
pub use transform::{NameMatch, NameTransformer};
pub use walker::{FileReport, FileStatus, RunSummary, Walker};
