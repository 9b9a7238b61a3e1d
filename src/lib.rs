//! recipe-runner - Run behavior-driven test scenarios on a remote test server.
//!
//! Scenario steps are described as a [`TestCase`](model::TestCase). The
//! [`RecipeRunner`](runner::RecipeRunner) turns it into a recipe, optionally
//! dumps it to a debug file named after the scenario, and submits it to an
//! execution backend. The returned [`Execution`](execution::Execution) gives
//! per-step results whose detailed transaction logs are fetched on demand.
//!
//! # Modules
//!
//! - [`backend`] - Execution backend trait, HTTP client and test double
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Layered configuration loading
//! - [`error`] - Error types and result aliases
//! - [`execution`] - Execution handles and lazily logged step results
//! - [`logging`] - Injected logging capability
//! - [`model`] - Test cases, recipes, reports and transaction logs
//! - [`runner`] - Recipe running and debug dumps
//!
//! # Example
//!
//! ```
//! use recipe_runner::backend::MockBackend;
//! use recipe_runner::logging::MemoryLogger;
//! use recipe_runner::model::{TestCase, TestStep};
//! use recipe_runner::runner::RecipeRunner;
//! use std::sync::Arc;
//!
//! let runner = RecipeRunner::new(Arc::new(MockBackend::new()), Arc::new(MemoryLogger::new()));
//! let execution = runner
//!     .run(&TestCase::new().with_step(TestStep::new("Delay")), Some("smoke;delay"))
//!     .unwrap();
//!
//! for mut step in execution.step_results() {
//!     let _log = step.detailed_log();
//! }
//! ```

pub mod backend;
pub mod cli;
pub mod config;
pub mod error;
pub mod execution;
pub mod logging;
pub mod model;
pub mod runner;

pub use error::{Result, RunnerError};
