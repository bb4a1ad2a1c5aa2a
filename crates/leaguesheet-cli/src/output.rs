//! Report files, one directory per report date.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Writes HTML fragments into `<output>/<yyyy-mm-dd>/`
#[derive(Clone, Debug)]
pub struct ReportWriter {
    dir: PathBuf,
}

impl ReportWriter {
    pub fn new(output: &Path, date: NaiveDate) -> Self {
        Self {
            dir: output.join(date.format("%Y-%m-%d").to_string()),
        }
    }

    /// Replace `file_name` in the date directory with `contents`
    pub fn write(&self, file_name: &str, contents: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create {}", self.dir.display()))?;

        let path = self.dir.join(file_name);
        if path.exists() {
            fs::remove_file(&path)
                .with_context(|| format!("Failed to remove old {}", path.display()))?;
        }
        fs::write(&path, contents)
            .with_context(|| format!("Failed to write {}", path.display()))?;

        debug!(path = %path.display(), bytes = contents.len(), "wrote report");
        Ok(path)
    }
}
