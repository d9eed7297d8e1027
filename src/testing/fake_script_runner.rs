use std::path::Path;
use std::sync::{Arc, Mutex};

use serde_json::{Map, Value};

use crate::domain::RenderError;
use crate::ports::ScriptRunner;

#[derive(Clone)]
pub struct FakeScriptRunner {
    outcome: Result<String, String>,
    calls: Arc<Mutex<Vec<Map<String, Value>>>>,
}

impl FakeScriptRunner {
    pub fn returning(output: &str) -> Self {
        Self { outcome: Ok(output.to_string()), calls: Arc::default() }
    }

    /// Fails every run with a recognized-looking error.
    pub fn failing(message: &str) -> Self {
        Self { outcome: Err(message.to_string()), calls: Arc::default() }
    }

    /// Options received by each run, in order.
    pub fn calls(&self) -> Vec<Map<String, Value>> {
        self.calls.lock().unwrap().clone()
    }
}

impl ScriptRunner for FakeScriptRunner {
    fn run(&self, _script: &Path, options: &Map<String, Value>) -> Result<String, RenderError> {
        self.calls.lock().unwrap().push(options.clone());
        self.outcome.clone().map_err(RenderError::syntax)
    }
}
