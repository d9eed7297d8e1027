use std::sync::{Arc, Mutex};

use crate::domain::{RenderContext, RenderError, RenderErrorKind};
use crate::ports::Renderer;

/// Echoes the template back and records every call.
#[derive(Clone, Default)]
pub struct CountingRenderer {
    contexts: Arc<Mutex<Vec<RenderContext>>>,
}

impl CountingRenderer {
    pub fn echo() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> usize {
        self.contexts.lock().unwrap().len()
    }

    pub fn last_context(&self) -> Option<RenderContext> {
        self.contexts.lock().unwrap().last().cloned()
    }
}

impl Renderer for CountingRenderer {
    fn name(&self) -> &'static str {
        "counting"
    }

    fn render(&self, template: &str, context: &RenderContext) -> Result<String, RenderError> {
        self.contexts.lock().unwrap().push(context.clone());
        Ok(template.to_string())
    }
}

/// Always fails with the configured kind and message.
pub struct FailingRenderer {
    kind: RenderErrorKind,
    message: String,
}

impl FailingRenderer {
    pub fn new(kind: RenderErrorKind, message: &str) -> Self {
        Self { kind, message: message.to_string() }
    }
}

impl Renderer for FailingRenderer {
    fn name(&self) -> &'static str {
        "failing"
    }

    fn render(&self, _template: &str, _context: &RenderContext) -> Result<String, RenderError> {
        Err(match self.kind {
            RenderErrorKind::Syntax => RenderError::syntax(self.message.clone()),
            RenderErrorKind::Internal => RenderError::internal_message(self.message.clone()),
        })
    }
}

pub struct PanickingRenderer;

impl Renderer for PanickingRenderer {
    fn name(&self) -> &'static str {
        "panicking"
    }

    fn render(&self, _template: &str, _context: &RenderContext) -> Result<String, RenderError> {
        panic!("engine state corrupted")
    }
}
