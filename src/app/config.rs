//! Configuration and context file loading.

use std::fs;
use std::io;
use std::path::Path;

use serde_json::{Map, Value};

use crate::domain::{AppError, GateConfig, RenderContext};

/// Environment variable naming a config file when `--config` is not given.
pub const CONFIG_ENV_VAR: &str = "TMPLGATE_CONFIG";

/// Load and validate `tmplgate.toml` from `path`.
pub fn load_config(path: &Path) -> Result<GateConfig, AppError> {
    let content = fs::read_to_string(path).map_err(|err| {
        if err.kind() == io::ErrorKind::NotFound {
            AppError::ConfigMissing(path.display().to_string())
        } else {
            AppError::Io(err)
        }
    })?;
    parse_config_content(&content)
}

/// Parse configuration from string content.
pub fn parse_config_content(content: &str) -> Result<GateConfig, AppError> {
    let config: GateConfig = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}

/// Resolve the effective config: explicit path, then `TMPLGATE_CONFIG`, then defaults.
pub fn resolve_config(explicit: Option<&Path>) -> Result<GateConfig, AppError> {
    if let Some(path) = explicit {
        return load_config(path);
    }
    match std::env::var_os(CONFIG_ENV_VAR) {
        Some(path) if !path.is_empty() => load_config(Path::new(&path)),
        _ => Ok(GateConfig::default()),
    }
}

/// Load a render context from a YAML or JSON file.
///
/// JSON is a subset of YAML, so both go through the YAML parser unless the
/// extension says `.json`.
pub fn load_context(path: &Path) -> Result<RenderContext, AppError> {
    let content = fs::read_to_string(path)?;
    let display = path.display().to_string();
    let parse_error = |details: String| AppError::ContextParse { path: display.clone(), details };

    let value: Value = if path.extension().is_some_and(|ext| ext == "json") {
        serde_json::from_str(&content).map_err(|err| parse_error(err.to_string()))?
    } else {
        serde_yaml::from_str(&content).map_err(|err| parse_error(err.to_string()))?
    };

    match value {
        Value::Object(map) => Ok(RenderContext::from(map)),
        Value::Null => Ok(RenderContext::new()),
        _ => Err(AppError::ContextNotMapping(display)),
    }
}

/// Parse `key=value` overrides. Values are YAML scalars or collections.
pub fn parse_overrides(raw: &[String]) -> Result<Map<String, Value>, AppError> {
    let mut overrides = Map::new();
    for item in raw {
        let (key, value) = item
            .split_once('=')
            .filter(|(key, _)| !key.trim().is_empty())
            .ok_or_else(|| AppError::InvalidOverride(item.clone()))?;
        let parsed = if value.is_empty() {
            Value::String(String::new())
        } else {
            serde_yaml::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()))
        };
        overrides.insert(key.trim().to_string(), parsed);
    }
    Ok(overrides)
}
