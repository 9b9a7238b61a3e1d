//! Command-line interface for recipe-runner.
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations

pub mod args;
pub mod commands;

pub use args::{Cli, Commands, RunArgs, StatusArgs, TransactionLogArgs};
pub use commands::{Command, CommandDispatcher, CommandResult};
