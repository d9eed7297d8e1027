use minijinja::{Environment, ErrorKind, UndefinedBehavior};
use serde_json::Value;

use super::file_roots;
use crate::domain::{RenderContext, RenderError};
use crate::ports::Renderer;

/// Jinja2-syntax renderer using Minijinja.
///
/// Undefined values are errors unless `opts.allow_undefined` is true.
#[derive(Debug, Default, Clone, Copy)]
pub struct JinjaRenderer;

impl Renderer for JinjaRenderer {
    fn name(&self) -> &'static str {
        "jinja"
    }

    fn render(&self, template: &str, context: &RenderContext) -> Result<String, RenderError> {
        let allow_undefined =
            context.opt("allow_undefined").and_then(Value::as_bool).unwrap_or(false);

        let mut env = Environment::new();
        env.set_keep_trailing_newline(true);
        env.set_undefined_behavior(if allow_undefined {
            UndefinedBehavior::Lenient
        } else {
            UndefinedBehavior::Strict
        });
        file_roots::install_loader(&mut env, file_roots::search_roots(context));

        env.render_str(template, context.as_map()).map_err(classify)
    }
}

/// Engine rejections keep their message; everything else carries a trace.
pub(crate) fn classify(err: minijinja::Error) -> RenderError {
    match err.kind() {
        ErrorKind::SyntaxError
        | ErrorKind::UndefinedError
        | ErrorKind::UnknownFilter
        | ErrorKind::UnknownTest
        | ErrorKind::UnknownFunction
        | ErrorKind::TemplateNotFound
        | ErrorKind::MissingArgument
        | ErrorKind::TooManyArguments => RenderError::syntax(err.to_string()),
        _ => RenderError::internal(&err),
    }
}
