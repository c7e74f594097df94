use crate::rewriter::{rewrite, Placement, RewriteConfig, RewriteOutcome, SkipReason};
use crate::{GoPackageError, Result};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// What happened to a single visited file
#[derive(Debug)]
pub enum FileStatus {
    /// New content was written (or would be, in dry-run mode)
    Rewritten {
        value: String,
        placement: Option<Placement>,
    },
    /// The option already carried the rendered value
    UpToDate { value: String },
    Skipped(SkipReason),
    Failed(GoPackageError),
}

#[derive(Debug)]
pub struct FileReport {
    pub path: PathBuf,
    pub status: FileStatus,
}

impl FileReport {
    pub fn is_failure(&self) -> bool {
        matches!(self.status, FileStatus::Failed(_))
    }
}

/// Aggregated counts for one or more walked roots
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub visited: usize,
    pub rewritten: usize,
    pub up_to_date: usize,
    pub skipped: usize,
    pub failed: usize,
    pub dry_run: bool,
}

impl RunSummary {
    pub fn record(&mut self, report: &FileReport) {
        self.visited += 1;
        match report.status {
            FileStatus::Rewritten { .. } => self.rewritten += 1,
            FileStatus::UpToDate { .. } => self.up_to_date += 1,
            FileStatus::Skipped(_) => self.skipped += 1,
            FileStatus::Failed(_) => self.failed += 1,
        }
    }

    pub fn merge(&mut self, other: &RunSummary) {
        self.visited += other.visited;
        self.rewritten += other.rewritten;
        self.up_to_date += other.up_to_date;
        self.skipped += other.skipped;
        self.failed += other.failed;
        self.dry_run |= other.dry_run;
    }

    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }
}

/// Depth-first walker applying the rewrite to every schema file, one at a time
#[derive(Debug)]
pub struct Walker {
    config: RewriteConfig,
    extension: String,
    dry_run: bool,
}

impl Walker {
    pub fn new(config: RewriteConfig, extension: impl Into<String>) -> Result<Self> {
        let extension = extension.into();
        if extension.is_empty() {
            return Err(GoPackageError::Configuration(
                "file extension must not be empty".to_string(),
            ));
        }
        Ok(Self {
            config,
            extension,
            dry_run: false,
        })
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn config(&self) -> &RewriteConfig {
        &self.config
    }

    /// Check if a path names a schema file by suffix
    pub fn is_schema_file(&self, path: &Path) -> bool {
        path.file_name()
            .and_then(|name| name.to_str())
            .map(|name| name.ends_with(&self.extension))
            .unwrap_or(false)
    }

    /// Walk `root`, reporting each visited file to `on_file` as soon as it is done.
    /// Failures are reported and counted; they never stop the walk.
    pub fn walk<F>(&self, root: &Path, mut on_file: F) -> RunSummary
    where
        F: FnMut(&FileReport),
    {
        info!("Walking {}", root.display());
        let mut summary = RunSummary {
            dry_run: self.dry_run,
            ..RunSummary::default()
        };

        for entry in WalkDir::new(root).sort_by_file_name() {
            let report = match entry {
                Ok(entry) => {
                    if entry.file_type().is_dir() || !self.is_schema_file(entry.path()) {
                        continue;
                    }
                    self.process_file(entry.path())
                }
                Err(e) => {
                    let path = e.path().unwrap_or(root).to_path_buf();
                    warn!("Failed to read {}: {}", path.display(), e);
                    FileReport {
                        path,
                        status: FileStatus::Failed(e.into()),
                    }
                }
            };
            summary.record(&report);
            on_file(&report);
        }

        info!(
            "Finished {}: {} visited, {} rewritten, {} failed",
            root.display(),
            summary.visited,
            summary.rewritten,
            summary.failed
        );
        summary
    }

    /// Read, rewrite and persist a single file
    pub fn process_file(&self, path: &Path) -> FileReport {
        let status = match self.rewrite_file(path) {
            Ok(status) => status,
            Err(e) => {
                warn!("Failed to rewrite {}: {}", path.display(), e);
                FileStatus::Failed(e)
            }
        };
        FileReport {
            path: path.to_path_buf(),
            status,
        }
    }

    fn rewrite_file(&self, path: &Path) -> Result<FileStatus> {
        let content = fs::read(path)?;

        let outcome = rewrite(&content, &self.config)?;
        let (new_content, value, placement) = match outcome {
            RewriteOutcome::Skipped(reason) => {
                debug!("Skipped {}: {:?}", path.display(), reason);
                return Ok(FileStatus::Skipped(reason));
            }
            RewriteOutcome::Replaced { content, value } => (content, value, None),
            RewriteOutcome::Inserted {
                content,
                value,
                placement,
            } => (content, value, Some(placement)),
        };

        if new_content == content {
            debug!("{} already up to date", path.display());
            return Ok(FileStatus::UpToDate { value });
        }

        if self.dry_run {
            debug!("Dry run, not writing {}", path.display());
        } else {
            // Not atomic: an interrupted write can leave a truncated file.
            fs::write(path, new_content)?;
            debug!("Wrote {}", path.display());
        }

        Ok(FileStatus::Rewritten { value, placement })
    }
}
