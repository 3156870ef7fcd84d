//! CLI argument parsing for routedesk.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Routedesk: route support issues to agents by expertise and load.
///
/// Idle agents with matching expertise take new issues first; otherwise the
/// issue queues behind the least-loaded busy agent.
#[derive(Parser, Debug)]
#[command(name = "routedesk")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Engine configuration file (YAML).
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Verify engine invariants after every step and stop on the first
    /// violation.
    #[arg(long, global = true)]
    pub check: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for routedesk.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the built-in walkthrough.
    ///
    /// Four agents, eight issues, then resolutions that promote queued work
    /// and return an agent to the idle pool.
    Demo,

    /// Run a scenario file.
    ///
    /// The file lists agents to register and ordered steps (create, assign,
    /// resolve, update, list, history, roster).
    Run(RunArgs),
}

/// Arguments for the `run` command.
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Scenario YAML file.
    pub scenario: PathBuf,
}

impl Cli {
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
