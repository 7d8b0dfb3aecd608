//! Persists rendered artifacts

use log::debug;
use std::path::{Path, PathBuf};

use crate::error::BudgetWiseResult;
use crate::storage::write_atomic;

/// Writes artifacts into a fixed output directory
#[derive(Debug, Clone)]
pub struct ArtifactWriter {
    output_dir: PathBuf,
}

impl ArtifactWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Write `content` to `<output_dir>/<file_name>`, replacing any earlier
    /// artifact of the same name
    pub fn write(&self, file_name: &str, content: &str) -> BudgetWiseResult<PathBuf> {
        let path = self.output_dir.join(file_name);
        write_atomic(&path, content.as_bytes())?;
        debug!("Wrote {} bytes to {}", content.len(), path.display());
        Ok(path)
    }
}
