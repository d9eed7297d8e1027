//! Runtime configuration models.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::AppError;

/// Configuration loaded from `tmplgate.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GateConfig {
    /// Materialized output settings.
    #[serde(default)]
    pub output: OutputConfig,
    /// Script engine settings.
    #[serde(default)]
    pub script: ScriptConfig,
}

impl GateConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        self.output.validate()?;
        self.script.validate()?;
        Ok(())
    }
}

/// Where and how rendered files are materialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// Directory for temporary output files. System temp dir when unset.
    #[serde(default)]
    pub temp_dir: Option<PathBuf>,
    /// File name prefix for temporary output files.
    #[serde(default = "default_prefix")]
    pub prefix: String,
    /// File name suffix for temporary output files.
    #[serde(default)]
    pub suffix: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { temp_dir: None, prefix: default_prefix(), suffix: String::new() }
    }
}

impl OutputConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        for (field, value) in [("prefix", &self.prefix), ("suffix", &self.suffix)] {
            if value.contains(['/', '\\']) {
                return Err(AppError::config_error(format!(
                    "output.{field} must not contain path separators: '{value}'"
                )));
            }
        }
        if let Some(dir) = &self.temp_dir
            && dir.as_os_str().is_empty()
        {
            return Err(AppError::config_error("output.temp_dir must not be empty"));
        }
        Ok(())
    }
}

fn default_prefix() -> String {
    "tmplgate-".to_string()
}

/// How script templates are launched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScriptConfig {
    /// File extension (without dot) to interpreter command.
    ///
    /// Scripts with an unmapped extension are executed directly.
    #[serde(default = "default_interpreters")]
    pub interpreters: BTreeMap<String, String>,
}

impl Default for ScriptConfig {
    fn default() -> Self {
        Self { interpreters: default_interpreters() }
    }
}

impl ScriptConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        for (extension, interpreter) in &self.interpreters {
            if extension.is_empty() || extension.starts_with('.') {
                return Err(AppError::config_error(format!(
                    "script.interpreters key must be a bare extension, got '{extension}'"
                )));
            }
            if interpreter.trim().is_empty() {
                return Err(AppError::config_error(format!(
                    "script.interpreters.{extension} must not be empty"
                )));
            }
        }
        Ok(())
    }

    /// Interpreter configured for the given extension.
    pub fn interpreter_for(&self, extension: &str) -> Option<&str> {
        self.interpreters.get(extension).map(String::as_str)
    }
}

fn default_interpreters() -> BTreeMap<String, String> {
    BTreeMap::from([
        ("py".to_string(), "python3".to_string()),
        ("sh".to_string(), "sh".to_string()),
    ])
}
