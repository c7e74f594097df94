//! Test helpers for creating hermetic schema trees
//!
//! # Usage
//!
//! ```rust,ignore
//! use gopkg_rewrite::test_helpers::ProtoTree;
//!
//! let tree = ProtoTree::new()?;
//! tree.add_file("acme/v1/payments.proto", "package acme.v1;\n")?;
//! // Now walk tree.root()
//! ```

use crate::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Temporary directory tree holding schema files
pub struct ProtoTree {
    temp_dir: TempDir,
}

impl ProtoTree {
    pub fn new() -> Result<Self> {
        Ok(Self {
            temp_dir: TempDir::new()?,
        })
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write a file relative to the root, creating parent directories
    pub fn add_file(&self, relative: &str, content: impl AsRef<[u8]>) -> Result<PathBuf> {
        let path = self.root().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, content)?;
        Ok(path)
    }

    pub fn read_file(&self, relative: &str) -> Result<String> {
        Ok(fs::read_to_string(self.root().join(relative))?)
    }

    pub fn read_bytes(&self, relative: &str) -> Result<Vec<u8>> {
        Ok(fs::read(self.root().join(relative))?)
    }
}

/// Minimal proto3 file with the given package and option lines
pub fn proto_source(package: &str, options: &[(&str, &str)]) -> String {
    let mut out = format!("syntax = \"proto3\";\n\npackage {};\n", package);
    if !options.is_empty() {
        out.push('\n');
        for (name, value) in options {
            out.push_str(&format!("option {} = \"{}\";\n", name, value));
        }
    }
    out.push_str("\nmessage Empty {}\n");
    out
}
