use serde_json::{Map, Value};

use crate::domain::{RenderContext, TemplateSource};

/// One call through the uniform calling convention.
#[derive(Debug)]
pub struct RenderRequest {
    pub source: TemplateSource,
    /// Treat textual sources as the template body rather than a path.
    pub from_str: bool,
    /// Return the rendered text instead of materializing a file.
    pub to_str: bool,
    pub context: RenderContext,
    /// Keyword overrides merged over `context`.
    pub extra: Map<String, Value>,
}

impl RenderRequest {
    pub fn new(source: impl Into<TemplateSource>) -> Self {
        Self {
            source: source.into(),
            from_str: false,
            to_str: false,
            context: RenderContext::new(),
            extra: Map::new(),
        }
    }

    /// Literal template text, rendered to a string.
    pub fn inline(template: impl Into<String>) -> Self {
        Self::new(TemplateSource::Text(template.into())).literal().as_string()
    }

    pub fn literal(mut self) -> Self {
        self.from_str = true;
        self
    }

    pub fn as_string(mut self) -> Self {
        self.to_str = true;
        self
    }

    pub fn as_file(mut self) -> Self {
        self.to_str = false;
        self
    }

    pub fn with_context(mut self, context: RenderContext) -> Self {
        self.context = context;
        self
    }

    pub fn with_extra(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(name.into(), value.into());
        self
    }
}
