//! Application configuration management
//!
//! Handles config loading, validation, and environment variable processing
//! following the precedence: defaults -> .env -> env vars -> CLI args.

use crate::pipeline::MANIFEST_FILE_NAME;
use crate::primitives::*;
use clap::Parser;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default configuration values
pub mod defaults {
    pub const LOG_LEVEL: &str = "2";
    pub const LOG_FORMAT: &str = "text";
    pub const LOG_OUTPUT: &str = "stderr";
    pub const COLOR: &str = "auto";
}

/// Default value functions for configuration fields
mod default_fns {
    use crate::primitives::{ColorIntent, LogFormat, LogOutput};

    pub fn log_level() -> u8 {
        2
    }

    pub fn log_format() -> LogFormat {
        LogFormat::Text
    }

    pub fn log_output() -> LogOutput {
        LogOutput::Stderr
    }

    pub fn color() -> ColorIntent {
        ColorIntent::Auto
    }
}

/// Application configuration structure
#[derive(Debug, Clone, Parser, Deserialize)]
pub struct AppConfig {
    /// Repository root holding the build manifest
    #[arg(short, long, env = "STAGER_ROOT")]
    #[serde(default)]
    pub root: Option<PathBuf>,

    /// Build manifest (default: <root>/build.toml)
    #[arg(long, env = "STAGER_MANIFEST")]
    #[serde(default)]
    pub manifest: Option<PathBuf>,

    /// Build configuration (default: debug locally, release on a build server)
    #[arg(short, long, env = "STAGER_CONFIGURATION", ignore_case = true)]
    #[serde(default)]
    pub configuration: Option<Configuration>,

    /// Version stamped into assemblies and archive names
    #[arg(long, env = "STAGER_BUILD_VERSION")]
    #[serde(default)]
    pub build_version: Option<String>,

    /// Verbosity level (0=error, 1=warn, 2=info, 3=debug, 4=trace)
    #[arg(long, env = "STAGER_LOG_LEVEL", default_value = defaults::LOG_LEVEL)]
    #[serde(default = "default_fns::log_level")]
    pub log_level: u8,

    /// Output format (text, json, yaml)
    #[arg(long, env = "STAGER_LOG_FORMAT", default_value = defaults::LOG_FORMAT)]
    #[serde(default = "default_fns::log_format")]
    pub log_format: LogFormat,

    /// Log output stream (stderr, stdout)
    #[arg(long, env = "STAGER_LOG_OUTPUT", default_value = defaults::LOG_OUTPUT)]
    #[serde(default = "default_fns::log_output")]
    pub log_output: LogOutput,

    /// Color output control (auto, always, never)
    #[arg(long, env = "STAGER_COLOR", default_value = defaults::COLOR)]
    #[serde(default = "default_fns::color")]
    pub color: ColorIntent,

    /// Set from build-server detection, never from the command line
    #[arg(skip)]
    #[serde(skip)]
    pub server_build: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            root: None,
            manifest: None,
            configuration: None,
            build_version: None,
            log_level: default_fns::log_level(),
            log_format: default_fns::log_format(),
            log_output: default_fns::log_output(),
            color: default_fns::color(),
            server_build: false,
        }
    }
}

impl AppConfig {
    /// Create LoggerConfig from AppConfig
    pub fn to_logger_config(&self) -> LoggerConfig {
        LoggerConfig {
            level: LogLevel::from_verbosity(self.log_level),
            format: self.log_format,
            output: self.log_output,
            color: self.color_enabled(),
        }
    }

    /// Resolve the color intent against the output stream
    pub fn color_enabled(&self) -> bool {
        match self.color {
            ColorIntent::Always => true,
            ColorIntent::Never => false,
            ColorIntent::Auto => match self.log_output {
                LogOutput::Stderr => console::colors_enabled_stderr(),
                LogOutput::Stdout => console::colors_enabled(),
            },
        }
    }

    /// Explicit configuration, else Debug locally and Release on a build server
    pub fn resolved_configuration(&self) -> Configuration {
        self.configuration
            .unwrap_or_else(|| Configuration::default_for(self.server_build))
    }

    /// Repository root; only meaningful after [`validate`](Self::validate)
    pub fn root_dir(&self) -> &Path {
        self.root.as_deref().unwrap_or(Path::new("."))
    }

    /// Manifest path; only meaningful after [`validate`](Self::validate)
    pub fn manifest_path(&self) -> PathBuf {
        self.manifest
            .clone()
            .unwrap_or_else(|| self.root_dir().join(MANIFEST_FILE_NAME))
    }

    /// Merge this config with another, taking non-default values from other
    pub fn merge_with(mut self, other: Self) -> Self {
        if other.root.is_some() {
            self.root = other.root;
        }
        if other.manifest.is_some() {
            self.manifest = other.manifest;
        }
        if other.configuration.is_some() {
            self.configuration = other.configuration;
        }
        if other.build_version.is_some() {
            self.build_version = other.build_version;
        }

        if other.log_level != default_fns::log_level() {
            self.log_level = other.log_level;
        }

        if !matches!(other.log_format, LogFormat::Text) {
            self.log_format = other.log_format;
        }
        if !matches!(other.log_output, LogOutput::Stderr) {
            self.log_output = other.log_output;
        }
        if !matches!(other.color, ColorIntent::Auto) {
            self.color = other.color;
        }

        self.server_build |= other.server_build;
        self
    }

    /// Validate the final configuration
    ///
    /// Resolves the root to an absolute, existing directory and anchors a
    /// relative manifest path at it.
    pub fn validate(&mut self) -> Result<(), ConfigError> {
        let root = match self.root.take() {
            Some(root) => root,
            None => std::env::current_dir().map_err(|e| ConfigError::CurrentDirError { source: e })?,
        };

        let root = root.canonicalize().map_err(|_| ConfigError::InvalidRoot {
            path: root.display().to_string(),
        })?;
        if !root.is_dir() {
            return Err(ConfigError::InvalidRoot {
                path: root.display().to_string(),
            });
        }

        if let Some(manifest) = &self.manifest {
            if manifest.is_relative() {
                self.manifest = Some(root.join(manifest));
            }
        }

        self.root = Some(root);
        Ok(())
    }
}
