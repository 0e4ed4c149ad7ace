//! Environment variable handling for application configuration
//!
//! Manages standard environment variables for color and build-server
//! detection following established conventions.

use crate::primitives::{ColorIntent, ConfigError};
use serde::Deserialize;

/// Environment variables that affect application behavior
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EnvironmentConfig {
    /// NO_COLOR environment variable (any value = disable color)
    pub no_color: Option<String>,
    /// FORCE_COLOR environment variable (0/false = disable, 1/2/3/true = enable)
    pub force_color: Option<String>,
    /// CLICOLOR environment variable (0 = disable color)
    pub clicolor: Option<String>,
    /// CI environment variable (any value = CI mode)
    pub ci: Option<String>,
    /// Azure Pipelines
    pub tf_build: Option<String>,
    pub github_actions: Option<String>,
    pub gitlab_ci: Option<String>,
    pub jenkins_url: Option<String>,
    pub teamcity_version: Option<String>,
}

impl EnvironmentConfig {
    /// Load environment configuration from current environment
    pub fn load() -> Result<Self, ConfigError> {
        envy::from_env().map_err(|e| ConfigError::EnvironmentParsingFailed { source: e })
    }

    /// Apply environment variables to color configuration
    ///
    /// Precedence: CI > CLICOLOR < NO_COLOR < FORCE_COLOR
    pub fn apply_color_config(&self, mut color: ColorIntent) -> ColorIntent {
        if self.ci.is_some() {
            return ColorIntent::Never;
        }

        if self.clicolor.as_deref() == Some("0") {
            color = ColorIntent::Never;
        }

        if self.no_color.as_deref().is_some_and(|v| !v.is_empty()) {
            color = ColorIntent::Never;
        }

        if let Some(force_color) = &self.force_color {
            match force_color.as_str() {
                "0" | "false" => color = ColorIntent::Never,
                "1" | "2" | "3" | "true" => color = ColorIntent::Always,
                _ => {}
            }
        }

        color
    }

    /// Whether this run happens on a build server
    ///
    /// Any recognized CI marker counts, except explicit `false`/`0` values.
    pub fn is_server_build(&self) -> bool {
        [
            &self.ci,
            &self.tf_build,
            &self.github_actions,
            &self.gitlab_ci,
            &self.jenkins_url,
            &self.teamcity_version,
        ]
        .into_iter()
        .flatten()
        .any(|value| {
            let value = value.trim();
            !value.is_empty() && !value.eq_ignore_ascii_case("false") && value != "0"
        })
    }
}

#[cfg(test)]
mod tests {
    include!("env.test.rs");
}
