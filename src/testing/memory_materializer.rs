use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use crate::ports::OutputMaterializer;

/// Records materialized text and hands out synthetic, never-reused paths.
#[derive(Clone, Default)]
pub struct MemoryMaterializer {
    files: Arc<Mutex<Vec<(PathBuf, String)>>>,
}

impl MemoryMaterializer {
    pub fn written(&self) -> Vec<String> {
        self.files.lock().unwrap().iter().map(|(_, text)| text.clone()).collect()
    }

    pub fn paths(&self) -> Vec<PathBuf> {
        self.files.lock().unwrap().iter().map(|(path, _)| path.clone()).collect()
    }
}

impl OutputMaterializer for MemoryMaterializer {
    fn materialize(&self, text: &str) -> io::Result<PathBuf> {
        let mut files = self.files.lock().unwrap();
        let path = PathBuf::from(format!("/memory/render-{}", files.len()));
        files.push((path.clone(), text.to_string()));
        Ok(path)
    }
}

pub struct FailingMaterializer;

impl OutputMaterializer for FailingMaterializer {
    fn materialize(&self, _text: &str) -> io::Result<PathBuf> {
        Err(io::Error::new(io::ErrorKind::StorageFull, "no space left on device"))
    }
}
