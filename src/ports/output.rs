use std::io;
use std::path::PathBuf;

/// Writes rendered text somewhere durable and reports where.
pub trait OutputMaterializer: Send + Sync {
    /// Write `text` to a freshly created file and return its absolute path.
    ///
    /// Must never reuse or truncate an existing file.
    fn materialize(&self, text: &str) -> io::Result<PathBuf>;
}
