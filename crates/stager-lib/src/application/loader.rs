//! Configuration loading
//!
//! Coordinates loading configuration from its sources in precedence order:
//! defaults -> .env files -> environment variables -> CLI arguments.

use crate::primitives::ConfigError;
use clap::Parser;
use std::ffi::OsString;
use tracing::trace;

use super::{
    cli::{Cli, CliConfig},
    config::AppConfig,
    env::EnvironmentConfig,
};

/// Loaded before the command line is parsed so clap's `env` lookups see them
const ENV_FILES: &[&str] = &[".env.local", ".env"];

impl CliConfig {
    /// Load from the process: .env files, environment and `std::env::args`
    pub fn load() -> Result<Self, ConfigError> {
        load_env_files()?;
        let env_config = EnvironmentConfig::load()?;
        Self::from_cli(Cli::parse(), &env_config)
    }

    /// Parse explicit arguments instead of the process command line
    pub fn load_from<I, T>(args: I, env_config: &EnvironmentConfig) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let cli = Cli::try_parse_from(args).map_err(|e| ConfigError::ParseError {
            value: "command line".to_string(),
            reason: e.to_string(),
        })?;
        Self::from_cli(cli, env_config)
    }

    /// Layer parsed CLI values over defaults and standard environment variables
    pub fn from_cli(cli: Cli, env_config: &EnvironmentConfig) -> Result<Self, ConfigError> {
        let mut config = AppConfig::default();

        config.color = env_config.apply_color_config(config.color);
        config.server_build = env_config.is_server_build();

        config = config.merge_with(cli.config);
        config.validate()?;

        trace!(?config, "Configuration loaded");
        Ok(Self {
            app_config: config,
            command: cli.command,
        })
    }
}

/// Load `.env.local` then `.env`; earlier files and the real environment win
fn load_env_files() -> Result<(), ConfigError> {
    for env_file in ENV_FILES {
        match dotenvy::from_filename(env_file) {
            Ok(_) => {}
            Err(e) if e.not_found() => {}
            Err(e) => {
                return Err(ConfigError::EnvFileError {
                    file: env_file.to_string(),
                    source: e,
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    include!("loader.test.rs");
}
