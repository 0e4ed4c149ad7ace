//! # stager Library
//!
//! Dependency-ordered build targets for .NET solutions.
//!
//! ## Core Modules
//!
//! - [`primitives`] - Foundation types and errors
//! - [`graph`] - Target declarations, plan resolution and execution
//! - [`pipeline`] - The standard Clean/Restore/Compile/Publish/Package targets
//! - [`process`] - External command execution behind a mockable provider
//! - [`filesystem`] - Directory hygiene, wildcard matching and archiving
//! - [`logger`] - Structured logging with progress tracking
//! - [`display`] - User-facing plans, listings and run summaries
//! - [`application`] - CLI interface and configuration management
//!
//! ## Quick Start
//!
//! ```no_run
//! stager_lib::main().unwrap();
//! ```

pub mod application;
pub mod display;
pub mod filesystem;
pub mod graph;
pub mod logger;
pub mod pipeline;
pub mod primitives;
pub mod process;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

// Re-export commonly used types for convenience
pub use application::{AppConfig, Cli, CliConfig, Commands, execute_command};
pub use graph::{ExecutionPlan, RunReport, Runner, Target, TargetRegistry, TargetState};
pub use logger::Logger;
pub use pipeline::{BuildEnv, RunContext, standard_targets};
pub use primitives::{BuildError, BuildResult, ConfigError, Configuration, LoggerError};

use anyhow::Result;

/// Load configuration, start logging and run the requested command
pub fn main() -> Result<()> {
    let config = CliConfig::load()?;
    Logger::init(config.app_config.to_logger_config())?;

    execute_command(config)
}
