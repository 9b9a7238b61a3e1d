//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results. Commands are
//! routed by [`CommandDispatcher`].

pub mod dispatcher;
pub mod display;
pub mod run;
pub mod status;
pub mod transaction_log;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
