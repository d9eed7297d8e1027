use crate::domain::{RenderContext, RenderError};

/// A pluggable template engine.
///
/// Implementations turn template text plus a context into output text. They
/// report failure through a typed [`RenderError`] so callers can tell an
/// engine rejection from an unanticipated fault without reading the message.
pub trait Renderer: Send + Sync {
    /// Registry name of the engine (for diagnostics).
    fn name(&self) -> &'static str;

    /// Render a template string with the given context.
    fn render(&self, template: &str, context: &RenderContext) -> Result<String, RenderError>;
}
