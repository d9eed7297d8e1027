//! Render context: the key-value environment handed to every renderer.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::error::ContractViolation;

/// Keys every context must carry before a render is attempted.
pub const REQUIRED_KEYS: [&str; 2] = ["opts", "env"];

/// Mapping from string keys to arbitrary values.
///
/// Must contain `opts` (engine/runtime options) and `env` (target
/// environment identifier) by the time it reaches a renderer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RenderContext {
    values: Map<String, Value>,
}

impl RenderContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Context pre-populated with the two required keys.
    pub fn with_required(opts: Map<String, Value>, env: impl Into<String>) -> Self {
        let env: String = env.into();
        Self::new().with_var("opts", Value::Object(opts)).with_var("env", env)
    }

    /// Add a variable to the context.
    pub fn with_var(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Merge overrides into the context. Override keys win on collision.
    pub fn merge<I>(&mut self, overrides: I)
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        self.values.extend(overrides);
    }

    /// Check the calling-convention invariant.
    pub fn ensure_required(&self) -> Result<(), ContractViolation> {
        for key in REQUIRED_KEYS {
            if !self.values.contains_key(key) {
                return Err(ContractViolation::MissingContextKey(key));
            }
        }
        Ok(())
    }

    /// Engine options. Anything other than a mapping reads as no options.
    pub fn opts(&self) -> Option<&Map<String, Value>> {
        self.values.get("opts").and_then(Value::as_object)
    }

    /// A single option by name.
    pub fn opt(&self, name: &str) -> Option<&Value> {
        self.opts().and_then(|opts| opts.get(name))
    }

    /// Target environment identifier, when it is a string.
    pub fn env(&self) -> Option<&str> {
        self.values.get("env").and_then(Value::as_str)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.values
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.values
    }
}

impl From<Map<String, Value>> for RenderContext {
    fn from(values: Map<String, Value>) -> Self {
        Self { values }
    }
}
