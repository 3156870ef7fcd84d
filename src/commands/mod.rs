//! Command implementations for routedesk.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations. Both commands build one engine from the configuration
//! and run a scenario against it.

mod run;
mod scenario;
#[cfg(test)]
mod tests;

use crate::cli::{Cli, Command, RunArgs};
use routedesk::config::EngineConfig;
use routedesk::engine::ResolutionEngine;
use routedesk::error::Result;
use std::io;
use std::path::Path;

use run::run_scenario;
use scenario::Scenario;

/// Built-in walkthrough used by `routedesk demo`.
const DEMO_SCENARIO: &str = include_str!("../../demos/demo.yaml");

/// Dispatch a command to its implementation.
pub fn dispatch(cli: Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;
    match cli.command {
        Command::Demo => cmd_demo(&config, cli.check),
        Command::Run(args) => cmd_run(&config, cli.check, args),
    }
}

/// Load the engine configuration, or the defaults when no path is given.
fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    let config = match path {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    config.validate()?;
    Ok(config)
}

fn cmd_demo(config: &EngineConfig, check: bool) -> Result<()> {
    let scenario = Scenario::from_yaml(DEMO_SCENARIO)?;
    execute(config, &scenario, check)
}

fn cmd_run(config: &EngineConfig, check: bool, args: RunArgs) -> Result<()> {
    let scenario = Scenario::load(&args.scenario)?;
    execute(config, &scenario, check)
}

fn execute(config: &EngineConfig, scenario: &Scenario, check: bool) -> Result<()> {
    let engine = ResolutionEngine::new(config)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_scenario(&engine, scenario, check, &mut out)?;
    Ok(())
}
