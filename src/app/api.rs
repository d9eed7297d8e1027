//! Library entry points used by the CLI.

use std::path::PathBuf;

use serde_json::{Map, Value};

use super::config::{CONFIG_ENV_VAR, load_context, parse_overrides, resolve_config};
use super::registry::{self, EngineRegistry};
use super::request::RenderRequest;
use crate::domain::{AppError, Envelope, RenderContext, TemplateSource};

/// Environment used when neither the context file nor the caller names one.
pub const DEFAULT_ENV: &str = "base";

/// Everything a caller can specify for one render.
#[derive(Debug)]
pub struct RenderOptions {
    pub engine: String,
    pub source: TemplateSource,
    pub from_str: bool,
    pub to_str: bool,
    /// YAML/JSON file supplying the base context.
    pub context_file: Option<PathBuf>,
    /// `key=value` overrides, applied over the context.
    pub overrides: Vec<String>,
    /// Target environment; overrides any `env` in the context file.
    pub env: Option<String>,
    pub config: Option<PathBuf>,
}

/// Render through the registry, filling in `opts` and `env` when the caller's
/// context does not provide them.
pub fn render(options: RenderOptions) -> Result<Envelope, AppError> {
    let mut context = match &options.context_file {
        Some(path) => load_context(path)?,
        None => RenderContext::new(),
    };
    if context.get("opts").is_none() {
        context.insert("opts", Value::Object(Map::new()));
    }
    match options.env {
        Some(env) => context.insert("env", env),
        None if context.get("env").is_none() => context.insert("env", DEFAULT_ENV),
        None => {}
    }
    let extra = parse_overrides(&options.overrides)?;

    let request = RenderRequest {
        source: options.source,
        from_str: options.from_str,
        to_str: options.to_str,
        context,
        extra,
    };

    let custom_config = options.config.is_some() || std::env::var_os(CONFIG_ENV_VAR).is_some();
    let envelope = if custom_config {
        let config = resolve_config(options.config.as_deref())?;
        let engines = EngineRegistry::new(&config);
        engines.lookup(&options.engine)?.invoke(request)?
    } else {
        registry::lookup(&options.engine)?.invoke(request)?
    };
    Ok(envelope)
}

/// Registered engine names.
pub fn engines() -> Vec<&'static str> {
    registry::engine_names()
}
