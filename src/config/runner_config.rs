//! Resolved runner configuration.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::layer::{ConfigLayer, ConfigLayerStack};
use crate::backend::Auth;
use crate::error::{Result, RunnerError};

/// Remote server URL.
pub const KEY_ENDPOINT: &str = "backend.endpoint";
/// User to authenticate as.
pub const KEY_USER: &str = "backend.user";
/// Password of [`KEY_USER`].
pub const KEY_PASSWORD: &str = "backend.password";
/// Request timeout in seconds.
pub const KEY_TIMEOUT: &str = "backend.timeout";
/// Root folder for recipe dumps.
pub const KEY_LOG_FOLDER: &str = "debug.logfolder";
/// Suppress submission while still dumping recipes. Not enforced.
pub const KEY_SILENT: &str = "debug.silent";
/// Submit recipes without waiting for them to finish.
pub const KEY_ASYNC: &str = "runner.async";

/// Every recognized configuration key.
pub const KEYS: &[&str] = &[
    KEY_ENDPOINT,
    KEY_USER,
    KEY_PASSWORD,
    KEY_TIMEOUT,
    KEY_LOG_FOLDER,
    KEY_SILENT,
    KEY_ASYNC,
];

pub const DEFAULT_ENDPOINT: &str = "http://localhost:8080/v1/readyapi";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for a [`RecipeRunner`](crate::runner::RecipeRunner) and its
/// HTTP backend.
#[derive(Clone, PartialEq)]
pub struct RunnerConfig {
    pub endpoint: String,
    pub user: Option<String>,
    pub password: Option<String>,
    pub timeout: Duration,
    pub log_folder: Option<PathBuf>,
    pub silent: bool,
    pub async_mode: bool,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            user: None,
            password: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            log_folder: None,
            silent: false,
            async_mode: false,
        }
    }
}

impl fmt::Debug for RunnerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunnerConfig")
            .field("endpoint", &self.endpoint)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("timeout", &self.timeout)
            .field("log_folder", &self.log_folder)
            .field("silent", &self.silent)
            .field("async_mode", &self.async_mode)
            .finish()
    }
}

impl RunnerConfig {
    /// Load configuration from defaults, an optional YAML file, the process
    /// environment and `overrides`, in increasing priority.
    pub fn load(file: Option<&Path>, overrides: ConfigLayer) -> Result<Self> {
        let mut stack = ConfigLayerStack::new();
        stack.push(Self::defaults());
        if let Some(path) = file {
            stack.push(ConfigLayer::from_yaml_file(path)?);
        }
        stack.push(ConfigLayer::from_env(KEYS));
        stack.push(overrides);

        for key in KEYS {
            if let Some(source) = stack.source_of(key) {
                tracing::debug!("{} resolved from {}", key, source);
            }
        }

        Self::from_stack(&stack)
    }

    /// The built-in default layer.
    pub fn defaults() -> ConfigLayer {
        let mut layer = ConfigLayer::new("defaults");
        layer.set(KEY_ENDPOINT, DEFAULT_ENDPOINT);
        layer.set(KEY_TIMEOUT, DEFAULT_TIMEOUT_SECS.to_string());
        layer
    }

    /// Interpret resolved values.
    pub fn from_stack(stack: &ConfigLayerStack) -> Result<Self> {
        let timeout = match stack.get(KEY_TIMEOUT) {
            Some(raw) => Duration::from_secs(parse_secs(KEY_TIMEOUT, raw)?),
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        Ok(Self {
            endpoint: stack
                .get(KEY_ENDPOINT)
                .unwrap_or(DEFAULT_ENDPOINT)
                .to_string(),
            user: non_blank(stack.get(KEY_USER)),
            password: stack.get(KEY_PASSWORD).map(String::from),
            timeout,
            log_folder: non_blank(stack.get(KEY_LOG_FOLDER)).map(PathBuf::from),
            silent: parse_flag(stack, KEY_SILENT)?,
            async_mode: parse_flag(stack, KEY_ASYNC)?,
        })
    }

    /// Credentials, when a user is configured.
    pub fn auth(&self) -> Option<Auth> {
        self.user
            .as_ref()
            .map(|user| Auth::new(user.clone(), self.password.clone()))
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
}

fn parse_flag(stack: &ConfigLayerStack, key: &str) -> Result<bool> {
    match stack.get(key) {
        Some(raw) => parse_bool(key, raw),
        None => Ok(false),
    }
}

/// Parse a boolean flag value.
pub fn parse_bool(key: &str, raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" | "" => Ok(false),
        other => Err(RunnerError::ConfigValidation {
            key: key.to_string(),
            message: format!("expected a boolean, got '{}'", other),
        }),
    }
}

fn parse_secs(key: &str, raw: &str) -> Result<u64> {
    raw.trim()
        .parse::<u64>()
        .map_err(|e| RunnerError::ConfigValidation {
            key: key.to_string(),
            message: format!("expected whole seconds, got '{}': {}", raw, e),
        })
}
