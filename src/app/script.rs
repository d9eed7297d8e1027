//! The `py` engine: templates that are programs rather than markup.

use std::path::Path;
use std::sync::Arc;

use serde_json::{Map, Value};

use super::invoker::finish;
use super::panic_guard;
use crate::domain::Envelope;
use crate::ports::{OutputMaterializer, ScriptRunner};

/// Renders by running a script's `run` entry point.
///
/// Bypasses input resolution and context validation. A script path that does
/// not name an existing file yields [`Envelope::empty`], unlike every other
/// failure; existing callers depend on that shape.
#[derive(Clone)]
pub struct ScriptRenderer {
    runner: Arc<dyn ScriptRunner>,
    output: Arc<dyn OutputMaterializer>,
}

impl ScriptRenderer {
    pub fn new(
        runner: impl ScriptRunner + 'static,
        output: impl OutputMaterializer + 'static,
    ) -> Self {
        Self::from_parts(Arc::new(runner), Arc::new(output))
    }

    pub fn from_parts(runner: Arc<dyn ScriptRunner>, output: Arc<dyn OutputMaterializer>) -> Self {
        Self { runner, output }
    }

    pub fn invoke(&self, script_path: &Path, to_str: bool, extra: Map<String, Value>) -> Envelope {
        if !script_path.is_file() {
            tracing::debug!(path = %script_path.display(), "script template not found");
            return Envelope::empty();
        }

        match panic_guard::contain(|| self.runner.run(script_path, &extra)) {
            Ok(text) => finish(self.output.as_ref(), text, to_str),
            Err(err) => {
                let path = script_path.display();
                tracing::warn!(%path, error = %err, "script template failed");
                Envelope::failure(err.full_trace())
            }
        }
    }
}

impl std::fmt::Debug for ScriptRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScriptRenderer").finish_non_exhaustive()
    }
}
