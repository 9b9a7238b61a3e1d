//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{
    ConfigLayer, KEY_ASYNC, KEY_ENDPOINT, KEY_LOG_FOLDER, KEY_PASSWORD, KEY_TIMEOUT, KEY_USER,
};

/// recipe-runner - Run test scenarios as recipes on a remote test server.
#[derive(Debug, Parser)]
#[command(name = "recipe-runner")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to a YAML config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Test server endpoint (overrides backend.endpoint)
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// User to authenticate as
    #[arg(short, long, global = true)]
    pub user: Option<String>,

    /// Password for --user
    #[arg(long, global = true)]
    pub password: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Configuration values given on the command line.
    pub fn overrides(&self) -> ConfigLayer {
        let mut layer = ConfigLayer::new("command line");
        layer.set_opt(KEY_ENDPOINT, self.endpoint.clone());
        layer.set_opt(KEY_USER, self.user.clone());
        layer.set_opt(KEY_PASSWORD, self.password.clone());
        layer.set_opt(KEY_TIMEOUT, self.timeout.map(|t| t.to_string()));

        if let Commands::Run(args) = &self.command {
            layer.set_opt(
                KEY_LOG_FOLDER,
                args.log_folder.as_ref().map(|p| p.display().to_string()),
            );
            if args.async_mode {
                layer.set(KEY_ASYNC, "true");
            }
        }
        layer
    }
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run a test case on the test server
    Run(RunArgs),

    /// Show the status of an execution
    Status(StatusArgs),

    /// Show the transaction log of one step of an execution
    TransactionLog(TransactionLogArgs),
}

/// Arguments for the `run` command.
#[derive(Debug, Clone, Args)]
pub struct RunArgs {
    /// JSON file containing the test case
    pub test_case: PathBuf,

    /// Scenario id the test case was generated from (e.g. "feature;scenario")
    #[arg(short, long)]
    pub scenario: Option<String>,

    /// Return as soon as the server accepted the recipe
    #[arg(long = "async")]
    pub async_mode: bool,

    /// Folder to write recipes to, named after the scenario
    #[arg(long)]
    pub log_folder: Option<PathBuf>,

    /// Fetch and show the transaction log of every step
    #[arg(long)]
    pub logs: bool,
}

/// Arguments for the `status` command.
#[derive(Debug, Clone, Args)]
pub struct StatusArgs {
    /// Execution id returned by `run`
    pub execution_id: String,
}

/// Arguments for the `transaction-log` command.
#[derive(Debug, Clone, Args)]
pub struct TransactionLogArgs {
    /// Execution id returned by `run`
    pub execution_id: String,

    /// Transaction id of the step
    pub transaction_id: String,
}
