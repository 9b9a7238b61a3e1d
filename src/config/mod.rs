//! Configuration loading for the runner.
//!
//! - [`layer`] - Layered key/value sources with source tracking
//! - [`runner_config`] - Interpretation into a typed [`RunnerConfig`]
//!
//! # Configuration Sources
//!
//! Values are resolved in this order, later sources winning:
//! 1. Built-in defaults
//! 2. YAML file given with `--config`
//! 3. `RECIPE_RUNNER_*` environment variables
//! 4. Command-line flags
//!
//! # Example
//!
//! ```
//! use recipe_runner::config::{ConfigLayer, RunnerConfig, KEY_LOG_FOLDER};
//!
//! let mut cli = ConfigLayer::new("cli");
//! cli.set(KEY_LOG_FOLDER, "target/recipes");
//!
//! let config = RunnerConfig::load(None, cli).unwrap();
//! assert_eq!(config.log_folder.unwrap().to_str(), Some("target/recipes"));
//! ```

pub mod layer;
pub mod runner_config;

pub use layer::{env_var_name, ConfigLayer, ConfigLayerStack, ENV_PREFIX};
pub use runner_config::{
    parse_bool, RunnerConfig, DEFAULT_ENDPOINT, DEFAULT_TIMEOUT_SECS, KEYS, KEY_ASYNC,
    KEY_ENDPOINT, KEY_LOG_FOLDER, KEY_PASSWORD, KEY_SILENT, KEY_TIMEOUT, KEY_USER,
};
