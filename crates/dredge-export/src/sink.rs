use std::fs;
use std::path::{Path, PathBuf};

use dredge_core::Result;
use tracing::info;

/// Destination for a finished export document
pub trait ExportSink {
    fn deliver(&mut self, filename: &str, document: &str) -> Result<()>;
}

/// Writes exports into a directory, creating it when missing
#[derive(Debug, Clone)]
pub struct FileExportSink {
    dir: PathBuf,
}

impl FileExportSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Where `filename` ends up once delivered
    pub fn path_for(&self, filename: &str) -> PathBuf {
        self.dir.join(filename)
    }
}

impl ExportSink for FileExportSink {
    fn deliver(&mut self, filename: &str, document: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(filename);
        fs::write(&path, document)?;
        info!(path = %path.display(), bytes = document.len(), "Export written");
        Ok(())
    }
}
