use std::path::Path;

use serde_json::{Map, Value};

use crate::domain::RenderError;

/// Executes a script template's `run` entry point.
pub trait ScriptRunner: Send + Sync {
    /// Run `script` with `options` injected and return what `run` produced.
    fn run(&self, script: &Path, options: &Map<String, Value>) -> Result<String, RenderError>;
}
