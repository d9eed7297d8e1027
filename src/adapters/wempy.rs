//! Wempy-flavoured renderer.
//!
//! Only the output form `{{=path.to.value}}` is supported. Strings are
//! emitted raw, `null` as nothing and other values as JSON.

use serde_json::{Map, Value};
use thiserror::Error;

use crate::domain::{RenderContext, RenderError};
use crate::ports::Renderer;

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

#[derive(Debug, Default, Clone, Copy)]
pub struct WempyRenderer;

/// Raised while evaluating an expression, not while parsing.
#[derive(Debug, Error)]
enum EvalError {
    #[error("name '{0}' is not defined")]
    Undefined(String),
}

impl Renderer for WempyRenderer {
    fn name(&self) -> &'static str {
        "wempy"
    }

    fn render(&self, template: &str, context: &RenderContext) -> Result<String, RenderError> {
        let mut out = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(start) = rest.find(OPEN) {
            out.push_str(&rest[..start]);
            let after_open = &rest[start + OPEN.len()..];
            let Some(end) = after_open.find(CLOSE) else {
                let line = line_of(template, template.len() - rest.len() + start);
                return Err(RenderError::syntax(format!("unterminated '{{{{' on line {line}")));
            };

            let block = after_open[..end].trim();
            let Some(expr) = block.strip_prefix('=') else {
                return Err(RenderError::syntax(format!(
                    "unsupported code block '{{{{{block}}}}}': only '{{{{=expr}}}}' is rendered"
                )));
            };
            let expr = expr.trim();
            if !is_dotted_path(expr) {
                return Err(RenderError::syntax(format!("invalid expression '{expr}'")));
            }

            let value = lookup(context.as_map(), expr)
                .ok_or_else(|| RenderError::internal(&EvalError::Undefined(expr.to_string())))?;
            push_value(&mut out, value);

            rest = &after_open[end + CLOSE.len()..];
        }

        out.push_str(rest);
        Ok(out)
    }
}

fn line_of(template: &str, offset: usize) -> usize {
    template[..offset].matches('\n').count() + 1
}

fn is_dotted_path(expr: &str) -> bool {
    !expr.is_empty()
        && expr.split('.').all(|segment| {
            let mut chars = segment.chars();
            match chars.next() {
                Some(first) if first.is_ascii_alphanumeric() || first == '_' => {
                    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
                }
                _ => false,
            }
        })
}

/// Walk `a.b.0` through objects by key and arrays by index.
fn lookup<'a>(root: &'a Map<String, Value>, expr: &str) -> Option<&'a Value> {
    let mut segments = expr.split('.');
    let mut current = root.get(segments.next()?)?;
    for segment in segments {
        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}

fn push_value(out: &mut String, value: &Value) {
    match value {
        Value::Null => {}
        Value::String(s) => out.push_str(s),
        other => out.push_str(&other.to_string()),
    }
}
