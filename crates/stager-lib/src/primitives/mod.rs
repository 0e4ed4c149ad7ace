//! stager primitives - core types, errors, and coordination
//!
//! Shared vocabulary for the rest of the crate: logging knobs, the build
//! configuration selector, and the error enums every layer returns.

use clap::ValueEnum;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

// Shared macros and patterns
mod shared;
use shared::impl_fromstr_for_value_enum;

/// Available log output streams
#[derive(Debug, Clone, Copy, PartialEq, serde::Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogOutput {
    /// STDERR
    Stderr,
    /// STDOUT
    Stdout,
}

/// Log levels for structured logging
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Error = 0,
    Warning = 1,
    Info = 2,
    Debug = 3,
    Trace = 4,
}

/// Output formats for structured logging
#[derive(Debug, Clone, Copy, PartialEq, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// TEXT
    /// alias: text, txt, plain
    Text,

    /// JSON
    /// alias: json
    Json,

    /// YAML
    /// alias: yaml, yml
    Yaml,
}

/// Color output intent, resolved against the terminal at logger init
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorIntent {
    Auto,
    Always,
    Never,
}

/// Build configuration handed to the compiler toolchain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Deserialize)]
pub enum Configuration {
    Debug,
    Release,
}

impl Configuration {
    /// Name as the toolchain expects it on its command line
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Debug => "Debug",
            Self::Release => "Release",
        }
    }

    /// Debug for local runs, Release on a build server
    pub fn default_for(server_build: bool) -> Self {
        if server_build {
            Self::Release
        } else {
            Self::Debug
        }
    }
}

impl std::fmt::Display for Configuration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// LOGGER CONFIGURATION TYPES
// ============================================================================

/// Logger configuration resolved from application config
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    pub level: LogLevel,
    pub format: LogFormat,
    pub output: LogOutput,
    pub color: bool,
}

// ============================================================================
// STRUCTURED ERROR TYPES
// ============================================================================

/// Application configuration loading and validation errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load environment file '{file}': {source}")]
    EnvFileError {
        file: String,
        source: dotenvy::Error,
    },

    #[error("Invalid root directory: {path}")]
    InvalidRoot { path: String },

    #[error("Failed to parse environment variables: {source}")]
    EnvironmentParsingFailed {
        #[from]
        source: envy::Error,
    },

    #[error("Build manifest not found: {path}")]
    ManifestNotFound { path: PathBuf },

    #[error("Failed to read build manifest {path}: {source}")]
    ManifestReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse build manifest {path}: {source}")]
    ManifestParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Configuration validation failed: {reason}")]
    ValidationFailed { reason: String },

    #[error("Invalid version '{value}': {source}")]
    InvalidVersion {
        value: String,
        source: semver::Error,
    },

    #[error("Failed to get current directory: {source}")]
    CurrentDirError {
        #[from]
        source: std::io::Error,
    },

    #[error("Failed to parse configuration value '{value}': {reason}")]
    ParseError { value: String, reason: String },
}

/// Logger initialization and operation errors
#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("Failed to initialize tracing subscriber: {reason}")]
    InitializationFailed { reason: String },

    #[error("Logger already initialized")]
    AlreadyInitialized,
}

pub type BuildResult<T> = Result<T, BuildError>;

/// Target graph and target action errors
///
/// Every variant is fatal to the current run. The runner wraps whatever an
/// action returns in [`BuildError::TargetFailed`] so the caller always learns
/// which target stopped the run.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Target '{name}' is already registered")]
    DuplicateTarget { name: String },

    #[error("Target '{name}' is not declared{}", required_by_suffix(.required_by))]
    UnknownTarget {
        name: String,
        required_by: Option<String>,
    },

    #[error("Circular dependency detected: {cycle}")]
    CyclicDependency { cycle: String },

    #[error("Command `{command}` failed{}", command_failure_detail(.code, .stderr))]
    ExternalCommand {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("No file matches declared output '{pattern}'")]
    MissingArtifact { pattern: String },

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Target '{target}' failed: {source}")]
    TargetFailed {
        target: String,
        source: Box<BuildError>,
    },

    #[error("Target '{target}' already failed earlier in this run")]
    PreviouslyFailed { target: String },
}

fn required_by_suffix(required_by: &Option<String>) -> String {
    match required_by {
        Some(parent) => format!(" (required by '{}')", parent),
        None => String::new(),
    }
}

fn command_failure_detail(code: &Option<i32>, stderr: &str) -> String {
    let mut detail = match code {
        Some(code) => format!(" with exit code {}", code),
        None => String::new(),
    };
    let stderr = stderr.trim_end();
    if !stderr.is_empty() {
        detail.push_str(": ");
        detail.push_str(stderr);
    }
    detail
}

impl BuildError {
    /// Create an I/O error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Name of the target that failed, if this error came out of a run
    pub fn failed_target(&self) -> Option<&str> {
        match self {
            Self::TargetFailed { target, .. } | Self::PreviouslyFailed { target } => Some(target),
            _ => None,
        }
    }
}

impl LogLevel {
    /// Convert verbosity level from AppConfig to LogLevel
    pub fn from_verbosity(verbosity: u8) -> Self {
        match verbosity {
            0 => LogLevel::Error,
            1 => LogLevel::Warning,
            2 => LogLevel::Info,
            3 => LogLevel::Debug,
            4.. => LogLevel::Trace,
        }
    }

    /// Directive string understood by `EnvFilter`
    pub fn as_filter(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warning => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl ValueEnum for LogLevel {
    fn value_variants<'a>() -> &'a [Self] {
        &[
            Self::Error,
            Self::Warning,
            Self::Info,
            Self::Debug,
            Self::Trace,
        ]
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        match self {
            Self::Error => Some(
                clap::builder::PossibleValue::new("error")
                    .alias("err")
                    .alias("fatal")
                    .alias("critical"),
            ),
            Self::Warning => Some(clap::builder::PossibleValue::new("warn").alias("warning")),
            Self::Info => Some(clap::builder::PossibleValue::new("info").alias("information")),
            Self::Debug => Some(clap::builder::PossibleValue::new("debug").alias("debugging")),
            Self::Trace => Some(
                clap::builder::PossibleValue::new("trace")
                    .alias("tracing")
                    .alias("verbose"),
            ),
        }
    }
}

impl ValueEnum for LogFormat {
    fn value_variants<'a>() -> &'a [Self] {
        &[Self::Text, Self::Json, Self::Yaml]
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        match self {
            Self::Text => Some(
                clap::builder::PossibleValue::new("text")
                    .alias("txt")
                    .alias("plain"),
            ),
            Self::Json => Some(clap::builder::PossibleValue::new("json")),
            Self::Yaml => Some(clap::builder::PossibleValue::new("yaml").alias("yml")),
        }
    }
}

impl ValueEnum for ColorIntent {
    fn value_variants<'a>() -> &'a [Self] {
        &[Self::Auto, Self::Always, Self::Never]
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        match self {
            Self::Auto => Some(clap::builder::PossibleValue::new("auto")),
            Self::Always => Some(
                clap::builder::PossibleValue::new("always")
                    .alias("on")
                    .alias("yes"),
            ),
            Self::Never => Some(
                clap::builder::PossibleValue::new("never")
                    .alias("off")
                    .alias("no"),
            ),
        }
    }
}

impl ValueEnum for Configuration {
    fn value_variants<'a>() -> &'a [Self] {
        &[Self::Debug, Self::Release]
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        match self {
            Self::Debug => Some(clap::builder::PossibleValue::new("debug")),
            Self::Release => Some(clap::builder::PossibleValue::new("release")),
        }
    }
}

// Generate FromStr implementations for all ValueEnum types
impl_fromstr_for_value_enum!(LogLevel, "invalid log level");
impl_fromstr_for_value_enum!(LogFormat, "invalid log format");
impl_fromstr_for_value_enum!(LogOutput, "invalid log output stream");
impl_fromstr_for_value_enum!(ColorIntent, "invalid color intent");
impl_fromstr_for_value_enum!(Configuration, "invalid build configuration");

#[cfg(test)]
mod tests {
    include!("mod.test.rs");
}
