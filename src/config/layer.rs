//! Configuration layering.
//!
//! Configuration values come from several places: built-in defaults, a YAML
//! file, environment variables and command-line flags. Each source becomes a
//! [`ConfigLayer`]; a [`ConfigLayerStack`] resolves keys by priority and
//! remembers which source won.

use std::collections::BTreeMap;
use std::path::Path;

use serde_yaml::Value;

use crate::error::{Result, RunnerError};

/// Prefix of environment variables that map to configuration keys.
pub const ENV_PREFIX: &str = "RECIPE_RUNNER_";

/// A named set of configuration values.
///
/// # Example
///
/// ```
/// use recipe_runner::config::ConfigLayer;
///
/// let mut layer = ConfigLayer::new("cli");
/// layer.set("backend.endpoint", "http://localhost:8080");
///
/// assert_eq!(layer.get("backend.endpoint"), Some("http://localhost:8080"));
/// assert_eq!(layer.source, "cli");
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLayer {
    /// Values in this layer, keyed by dotted name.
    pub values: BTreeMap<String, String>,
    /// Source of this layer (for debugging).
    pub source: String,
}

impl ConfigLayer {
    /// Create a new layer with the given source name.
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            values: BTreeMap::new(),
            source: source.into(),
        }
    }

    /// Add a value to this layer.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Add a value only when one is given.
    pub fn set_opt(&mut self, key: impl Into<String>, value: Option<impl Into<String>>) {
        if let Some(value) = value {
            self.set(key, value);
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Build a layer from environment-style variables.
    ///
    /// Only the variables matching one of `keys` are picked up: key
    /// `debug.logfolder` is read from `RECIPE_RUNNER_DEBUG_LOGFOLDER`.
    pub fn from_vars<I, K, V>(vars: I, keys: &[&str]) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let wanted: BTreeMap<String, &str> = keys.iter().map(|k| (env_var_name(k), *k)).collect();

        let mut layer = Self::new("environment");
        for (name, value) in vars {
            if let Some(key) = wanted.get(name.as_ref()) {
                layer.set(*key, value);
            }
        }
        layer
    }

    /// Build a layer from the process environment.
    pub fn from_env(keys: &[&str]) -> Self {
        Self::from_vars(std::env::vars(), keys)
    }

    /// Parse YAML text into a layer, flattening nested mappings to dotted keys.
    pub fn from_yaml(source: impl Into<String>, yaml: &str) -> std::result::Result<Self, String> {
        let value: Value = serde_yaml::from_str(yaml).map_err(|e| e.to_string())?;
        let mut layer = Self::new(source);
        match value {
            Value::Null => {}
            Value::Mapping(_) => flatten_into(&mut layer, None, &value)?,
            _ => return Err("top level must be a mapping".to_string()),
        }
        Ok(layer)
    }

    /// Load a YAML file into a layer named after its path.
    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(RunnerError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(path.display().to_string(), &content).map_err(|message| {
            RunnerError::ConfigParse {
                path: path.to_path_buf(),
                message,
            }
        })
    }
}

/// Environment variable name for a dotted configuration key.
pub fn env_var_name(key: &str) -> String {
    format!("{}{}", ENV_PREFIX, key.replace('.', "_").to_uppercase())
}

fn flatten_into(
    layer: &mut ConfigLayer,
    prefix: Option<&str>,
    value: &Value,
) -> std::result::Result<(), String> {
    let Value::Mapping(mapping) = value else {
        return Ok(());
    };

    for (key, child) in mapping {
        let Some(key) = key.as_str() else {
            return Err(format!("non-string key {:?}", key));
        };
        let full_key = match prefix {
            Some(prefix) => format!("{}.{}", prefix, key),
            None => key.to_string(),
        };

        match child {
            Value::Null => {}
            Value::Bool(b) => layer.set(full_key, b.to_string()),
            Value::Number(n) => layer.set(full_key, n.to_string()),
            Value::String(s) => layer.set(full_key, s.clone()),
            Value::Mapping(_) => flatten_into(layer, Some(&full_key), child)?,
            Value::Sequence(_) | Value::Tagged(_) => {
                return Err(format!("'{}' must be a scalar or a mapping", full_key));
            }
        }
    }
    Ok(())
}

/// Manages layered configuration values.
///
/// The first layer pushed has lowest priority, the last has highest.
///
/// # Example
///
/// ```
/// use recipe_runner::config::{ConfigLayer, ConfigLayerStack};
///
/// let mut stack = ConfigLayerStack::new();
///
/// let mut defaults = ConfigLayer::new("defaults");
/// defaults.set("backend.timeout", "30");
/// stack.push(defaults);
///
/// let mut cli = ConfigLayer::new("cli");
/// cli.set("backend.timeout", "5");
/// stack.push(cli);
///
/// assert_eq!(stack.get("backend.timeout"), Some("5"));
/// assert_eq!(stack.source_of("backend.timeout"), Some("cli"));
/// ```
#[derive(Debug, Default)]
pub struct ConfigLayerStack {
    layers: Vec<ConfigLayer>,
}

impl ConfigLayerStack {
    pub fn new() -> Self {
        Self { layers: vec![] }
    }

    /// Add a layer. Later layers have higher priority.
    pub fn push(&mut self, layer: ConfigLayer) {
        self.layers.push(layer);
    }

    /// Get the value from the highest priority layer that has the key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.layers.iter().rev().find_map(|layer| layer.get(key))
    }

    /// Get all resolved values.
    pub fn resolve(&self) -> BTreeMap<String, String> {
        let mut result = BTreeMap::new();
        for layer in &self.layers {
            result.extend(layer.values.clone());
        }
        result
    }

    /// Get the source of the layer a key resolves from.
    pub fn source_of(&self, key: &str) -> Option<&str> {
        self.layers
            .iter()
            .rev()
            .find(|layer| layer.contains(key))
            .map(|layer| layer.source.as_str())
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }
}
