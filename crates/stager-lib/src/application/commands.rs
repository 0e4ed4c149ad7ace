//! Command handlers
//!
//! Every command loads the manifest, resolves the version and builds the
//! standard target registry before doing its own work. Results go to the
//! given writer; diagnostics go through tracing.

use anyhow::{Context, Result};
use std::io::{self, Write};
use tracing::{debug, info};

use super::cli::{CliConfig, Commands};
use super::config::AppConfig;
use crate::display::{self, StatusDisplay};
use crate::graph::{Runner, TargetRegistry};
use crate::pipeline::{
    BuildEnv, DEFAULT_TARGET, Manifest, RunContext, resolve_version, standard_targets,
};
use crate::primitives::BuildError;
use crate::process::{LiveProcessProvider, ProcessProvider};

/// Execute the parsed command against real processes, printing to stdout
pub fn execute_command(config: CliConfig) -> Result<()> {
    display::set_colors(config.app_config.color_enabled());

    let command = config.command.unwrap_or_else(Commands::default_run);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    execute_command_with_process(
        command,
        &config.app_config,
        Box::new(LiveProcessProvider::new()),
        &mut out,
    )
}

/// Execute a command with a provided process provider and output (for testing)
pub fn execute_command_with_process(
    command: Commands,
    config: &AppConfig,
    process: Box<dyn ProcessProvider>,
    out: &mut dyn Write,
) -> Result<()> {
    let env = prepare_environment(config, process)?;
    let registry = standard_targets(env.context())?;
    let mut status = StatusDisplay::new(out);

    match command {
        Commands::List => handle_list(&registry, &mut status),
        Commands::Plan { targets } => handle_plan(&registry, &targets, &mut status),
        Commands::Run { targets, skip } => handle_run(&registry, &env, &targets, skip, &mut status),
    }
}

/// Manifest, version and configuration resolved into a ready [`BuildEnv`]
pub fn prepare_environment(config: &AppConfig, process: Box<dyn ProcessProvider>) -> Result<BuildEnv> {
    let manifest_path = config.manifest_path();
    let manifest = Manifest::load(&manifest_path)?;
    let root = config.root_dir();

    let (version, source) = resolve_version(
        config.build_version.as_deref(),
        manifest.version.as_deref(),
        root,
        process.as_ref(),
    )?;
    let configuration = config.resolved_configuration();

    info!(
        root = %root.display(),
        configuration = %configuration,
        version = %version,
        version_source = %source,
        "Resolved build settings"
    );

    let context = RunContext::new(root, &manifest, configuration, version);
    Ok(BuildEnv::new(context, process))
}

fn handle_list<W: Write>(registry: &TargetRegistry<BuildEnv>, status: &mut StatusDisplay<W>) -> Result<()> {
    status
        .targets(registry)
        .context("Failed to write target list")
}

fn handle_plan<W: Write>(
    registry: &TargetRegistry<BuildEnv>,
    targets: &[String],
    status: &mut StatusDisplay<W>,
) -> Result<()> {
    let plan = registry.resolve_all(&requested_targets(targets))?;
    status.plan(&plan).context("Failed to write execution plan")
}

fn handle_run<W: Write>(
    registry: &TargetRegistry<BuildEnv>,
    env: &BuildEnv,
    targets: &[String],
    skip: Vec<String>,
    status: &mut StatusDisplay<W>,
) -> Result<()> {
    if let Some(unknown) = skip.iter().find(|name| !registry.contains(name)) {
        return Err(BuildError::UnknownTarget {
            name: unknown.clone(),
            required_by: None,
        }
        .into());
    }

    let plan = registry.resolve_all(&requested_targets(targets))?;
    info!(plan = %plan, "Running targets");

    let mut runner = Runner::new(registry).with_skip(skip);
    let result = runner.execute(&plan, env);

    let report = runner.report();
    debug!(executed = ?report.executed(), "Run finished");
    status
        .report(&report)
        .context("Failed to write run summary")?;

    result?;
    Ok(())
}

/// Requested targets, or the default target when none were named
fn requested_targets(targets: &[String]) -> Vec<String> {
    if targets.is_empty() {
        vec![DEFAULT_TARGET.to_string()]
    } else {
        targets.to_vec()
    }
}

#[cfg(test)]
mod tests {
    include!("commands.test.rs");
}
