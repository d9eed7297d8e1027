//! Template input resolution.

use std::fmt;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

/// Where the template body comes from.
pub enum TemplateSource {
    /// Literal template text, or a path when `from_str` is false.
    Text(String),
    /// A filesystem path, read regardless of `from_str`.
    Path(PathBuf),
    /// A readable byte stream, read regardless of `from_str`.
    Stream(Box<dyn Read + Send>),
}

impl TemplateSource {
    pub fn from_reader<R: Read + Send + 'static>(reader: R) -> Self {
        TemplateSource::Stream(Box::new(reader))
    }

    /// Path the source names when it is read from disk, if any.
    pub fn as_path(&self, from_str: bool) -> Option<PathBuf> {
        match self {
            TemplateSource::Text(text) if !from_str => Some(PathBuf::from(text)),
            TemplateSource::Path(path) => Some(path.clone()),
            _ => None,
        }
    }

    /// Produce the full template body in memory, decoded as UTF-8.
    pub fn resolve(self, from_str: bool) -> io::Result<String> {
        match self {
            TemplateSource::Text(text) if from_str => Ok(text),
            TemplateSource::Text(path) => read_path(PathBuf::from(path)),
            TemplateSource::Path(path) => read_path(path),
            TemplateSource::Stream(mut reader) => {
                let mut body = String::new();
                reader.read_to_string(&mut body)?;
                Ok(body)
            }
        }
    }
}

fn read_path(path: PathBuf) -> io::Result<String> {
    tracing::debug!(path = %path.display(), "reading template from disk");
    fs::read_to_string(&path)
        .map_err(|err| io::Error::new(err.kind(), format!("{}: {}", path.display(), err)))
}

impl fmt::Debug for TemplateSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateSource::Text(text) => f.debug_tuple("Text").field(text).finish(),
            TemplateSource::Path(path) => f.debug_tuple("Path").field(path).finish(),
            TemplateSource::Stream(_) => f.write_str("Stream(..)"),
        }
    }
}

impl From<&str> for TemplateSource {
    fn from(value: &str) -> Self {
        TemplateSource::Text(value.to_string())
    }
}

impl From<String> for TemplateSource {
    fn from(value: String) -> Self {
        TemplateSource::Text(value)
    }
}

impl From<PathBuf> for TemplateSource {
    fn from(value: PathBuf) -> Self {
        TemplateSource::Path(value)
    }
}
