//! Mako-flavoured renderer.
//!
//! Runs on Minijinja with Mako delimiters: `${expr}` for expressions,
//! `<% ... %>` for blocks and `<%doc> ... </%doc>` for comments. Undefined
//! names are always errors. Every failure is reported as an engine rejection
//! carrying the detailed debug rendering of the error.

use minijinja::syntax::SyntaxConfig;
use minijinja::{Environment, UndefinedBehavior};
use serde_json::Value;

use super::file_roots;
use crate::domain::{RenderContext, RenderError};
use crate::ports::Renderer;

#[derive(Debug, Default, Clone, Copy)]
pub struct MakoRenderer;

impl Renderer for MakoRenderer {
    fn name(&self) -> &'static str {
        "mako"
    }

    fn render(&self, template: &str, context: &RenderContext) -> Result<String, RenderError> {
        let syntax = mako_syntax().map_err(|err| RenderError::internal(&err))?;

        let mut env = Environment::new();
        env.set_syntax(syntax);
        env.set_debug(true);
        env.set_keep_trailing_newline(true);
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        file_roots::install_loader(&mut env, file_roots::search_roots(context));

        let rendered = match template_uri(context) {
            Some(uri) => env.render_named_str(&uri, template, context.as_map()),
            None => env.render_str(template, context.as_map()),
        };
        rendered.map_err(|err| RenderError::syntax(format!("{err:#}")))
    }
}

fn mako_syntax() -> Result<SyntaxConfig, minijinja::Error> {
    SyntaxConfig::builder()
        .block_delimiters("<%", "%>")
        .variable_delimiters("${", "}")
        .comment_delimiters("<%doc>", "</%doc>")
        .build()
}

/// `sls` names the template (`a.b` becomes `a/b`) so errors point at it.
fn template_uri(context: &RenderContext) -> Option<String> {
    context.get("sls").and_then(Value::as_str).map(|sls| sls.replace('.', "/"))
}
