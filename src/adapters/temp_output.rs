use std::io::{self, Write};
use std::path::{self, PathBuf};

use tempfile::Builder;

use crate::domain::OutputConfig;
use crate::ports::OutputMaterializer;

/// Materializes rendered text into persisted, uniquely named temp files.
///
/// Text is written as UTF-8 without a byte-order mark. Files are kept on disk;
/// deleting them is the caller's job.
#[derive(Debug, Clone)]
pub struct TempFileMaterializer {
    dir: Option<PathBuf>,
    prefix: String,
    suffix: String,
}

impl TempFileMaterializer {
    pub fn new(config: &OutputConfig) -> Self {
        Self {
            dir: config.temp_dir.clone(),
            prefix: config.prefix.clone(),
            suffix: config.suffix.clone(),
        }
    }
}

impl Default for TempFileMaterializer {
    fn default() -> Self {
        Self::new(&OutputConfig::default())
    }
}

impl OutputMaterializer for TempFileMaterializer {
    fn materialize(&self, text: &str) -> io::Result<PathBuf> {
        let mut builder = Builder::new();
        builder.prefix(&self.prefix).suffix(&self.suffix);
        let mut file = match &self.dir {
            Some(dir) => builder.tempfile_in(dir)?,
            None => builder.tempfile()?,
        };

        file.write_all(text.as_bytes())?;
        file.flush()?;
        let (_, kept) = file.keep().map_err(|err| err.error)?;
        let path = path::absolute(&kept)?;

        tracing::debug!(path = %path.display(), bytes = text.len(), "materialized render output");
        Ok(path)
    }
}
