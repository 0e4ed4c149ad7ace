use clap::{Parser, Subcommand};

use super::config::AppConfig;

/// stager CLI - dependency-ordered build targets for .NET solutions
#[derive(Debug, Clone, Parser)]
#[command(name = "stager")]
#[command(about = "Run Clean, Restore, Compile, Publish and Package in dependency order")]
#[command(version)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Global configuration options
    #[command(flatten)]
    pub config: AppConfig,

    /// stager commands (default: run Compile)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Configuration loaded from CLI
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub app_config: AppConfig,
    pub command: Option<Commands>,
}

/// Available stager commands
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Commands {
    /// Run targets after their prerequisites
    Run {
        /// Targets to run (default: Compile)
        #[arg(value_name = "TARGET")]
        targets: Vec<String>,

        /// Targets to mark as done without running them
        #[arg(long, value_name = "TARGET")]
        skip: Vec<String>,
    },

    /// Print the execution plan without running anything
    Plan {
        /// Targets to plan (default: Compile)
        #[arg(value_name = "TARGET")]
        targets: Vec<String>,
    },

    /// List declared targets and their dependencies
    List,
}

impl Commands {
    /// What a bare `stager` invocation does
    pub fn default_run() -> Self {
        Commands::Run {
            targets: Vec::new(),
            skip: Vec::new(),
        }
    }
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            command: None,
        }
    }
}

#[cfg(test)]
mod tests {
    include!("cli.test.rs");
}
