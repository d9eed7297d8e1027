//! Uniform calling convention around a single renderer.

use std::sync::Arc;

use serde_json::{Map, Value};

use super::panic_guard;
use crate::domain::{ContractViolation, Envelope, RenderContext, TemplateSource};
use crate::ports::{OutputMaterializer, Renderer};

/// Wraps a [`Renderer`] so every call returns an [`Envelope`].
///
/// The only failure that escapes as an `Err` is a [`ContractViolation`]: a
/// context missing `opts` or `env`. Resolution, render and materialization
/// failures all come back as `result: false` envelopes.
#[derive(Clone)]
pub struct RenderInvoker {
    renderer: Arc<dyn Renderer>,
    output: Arc<dyn OutputMaterializer>,
}

impl RenderInvoker {
    pub fn new(
        renderer: impl Renderer + 'static,
        output: impl OutputMaterializer + 'static,
    ) -> Self {
        Self::from_parts(Arc::new(renderer), Arc::new(output))
    }

    pub fn from_parts(renderer: Arc<dyn Renderer>, output: Arc<dyn OutputMaterializer>) -> Self {
        Self { renderer, output }
    }

    /// The wrapped renderer, for callers that want the bare `render` function.
    pub fn renderer(&self) -> &dyn Renderer {
        self.renderer.as_ref()
    }

    pub fn invoke(
        &self,
        source: TemplateSource,
        from_str: bool,
        to_str: bool,
        mut context: RenderContext,
        extra: Map<String, Value>,
    ) -> Result<Envelope, ContractViolation> {
        context.merge(extra);
        context.ensure_required()?;

        let engine = self.renderer.name();
        tracing::debug!(engine, ?source, from_str, to_str, "invoking renderer");

        let template = match source.resolve(from_str) {
            Ok(template) => template,
            Err(err) => {
                tracing::warn!(engine, error = %err, "template source could not be resolved");
                return Ok(Envelope::failure(err.to_string()));
            }
        };

        match panic_guard::contain(|| self.renderer.render(&template, &context)) {
            Ok(text) => Ok(finish(self.output.as_ref(), text, to_str)),
            Err(err) => {
                tracing::warn!(engine, kind = ?err.kind(), error = %err, "render failed");
                Ok(Envelope::failure(err.envelope_data()))
            }
        }
    }
}

impl std::fmt::Debug for RenderInvoker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderInvoker").field("renderer", &self.renderer.name()).finish()
    }
}

/// Branch on output mode for a successful render.
pub(crate) fn finish(output: &dyn OutputMaterializer, text: String, to_str: bool) -> Envelope {
    if to_str {
        return Envelope::success(text);
    }
    match output.materialize(&text) {
        Ok(path) => Envelope::success(path.to_string_lossy()),
        Err(err) => {
            tracing::warn!(error = %err, "render output could not be materialized");
            Envelope::failure(format!("failed to materialize render output: {err}"))
        }
    }
}
