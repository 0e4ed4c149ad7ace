//! Hermetic test environment for E2E testing
//!
//! A [`TestEnvironment`] owns a temporary directory with a `bin/` of mock
//! executables and a `work/` repository. Runs resolve `dotnet` and `git`
//! from `bin/` first, so no SDK or network is needed.

use anyhow::{Context, Result};
use stager_lib::application::AppConfig;
use stager_lib::primitives::ColorIntent;
use stager_lib::process::LiveProcessProvider;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Hermetic test environment with mock executables
pub struct TestEnvironment {
    /// Temporary directory for the test environment
    pub temp_dir: TempDir,
    /// Path to the test environment root
    pub root_path: PathBuf,
    /// Path to the bin directory containing mock executables
    pub bin_path: PathBuf,
    /// Path to the repository under test
    pub work_path: PathBuf,
    mock_executables: HashMap<String, MockExecutable>,
}

/// Configuration for a mock executable
#[derive(Debug, Clone)]
pub struct MockExecutable {
    pub name: String,
    pub behavior: MockBehavior,
    /// Every invocation is appended here as `<name> <args>`
    pub log_path: PathBuf,
}

/// Mock executable behavior configuration
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// Always succeed with empty output
    AlwaysSucceed,
    /// Always fail with error message
    AlwaysFail { error: String },
    /// Succeed with specific output
    SucceedWithOutput { stdout: String, stderr: String },
    /// Write `file` into the directory following `--output`
    WriteToOutput { file: String },
    /// Behavior chosen by the first argument; unmatched calls succeed
    Conditional { rules: Vec<ConditionalRule> },
}

/// Behavior for one subcommand of a mock executable
#[derive(Debug, Clone)]
pub struct ConditionalRule {
    pub subcommand: String,
    pub behavior: MockBehavior,
}

impl ConditionalRule {
    pub fn new(subcommand: &str, behavior: MockBehavior) -> Self {
        Self {
            subcommand: subcommand.to_string(),
            behavior,
        }
    }
}

impl TestEnvironment {
    /// Create a new hermetic test environment
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let root_path = temp_dir.path().to_path_buf();
        let bin_path = root_path.join("bin");
        let work_path = root_path.join("work");

        fs::create_dir_all(&bin_path)?;
        fs::create_dir_all(&work_path)?;

        Ok(Self {
            temp_dir,
            root_path,
            bin_path,
            work_path,
            mock_executables: HashMap::new(),
        })
    }

    /// Add a mock executable to the environment
    pub fn add_mock_executable(&mut self, name: &str, behavior: MockBehavior) -> Result<()> {
        let log_path = self.root_path.join(format!("{}.log", name));
        let executable_path = self.bin_path.join(name);

        let script = generate_mock_script(name, &behavior, &log_path);
        fs::write(&executable_path, script)
            .with_context(|| format!("Failed to write mock {}", executable_path.display()))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = fs::metadata(&executable_path)?.permissions();
            perms.set_mode(0o755);
            fs::set_permissions(&executable_path, perms)?;
        }

        self.mock_executables.insert(
            name.to_string(),
            MockExecutable {
                name: name.to_string(),
                behavior,
                log_path,
            },
        );
        Ok(())
    }

    /// `dotnet` that publishes an `app.dll` and otherwise succeeds
    pub fn with_working_dotnet(mut self) -> Result<Self> {
        self.add_mock_executable(
            "dotnet",
            MockBehavior::Conditional {
                rules: vec![ConditionalRule::new(
                    "publish",
                    MockBehavior::WriteToOutput {
                        file: "app.dll".to_string(),
                    },
                )],
            },
        )?;
        Ok(self)
    }

    /// `git` reporting `tag` as the latest tag, or no tags at all
    pub fn with_git_tag(mut self, tag: Option<&str>) -> Result<Self> {
        let behavior = match tag {
            Some(tag) => MockBehavior::SucceedWithOutput {
                stdout: tag.to_string(),
                stderr: String::new(),
            },
            None => MockBehavior::AlwaysFail {
                error: "fatal: No names found, cannot describe anything.".to_string(),
            },
        };
        self.add_mock_executable("git", behavior)?;
        Ok(self)
    }

    /// Lay out a repository with one project per name under `work/src`
    pub fn init_repository(&self, projects: &[&str]) -> Result<()> {
        let mut manifest = String::from("solution = \"src/App.sln\"\n");
        for name in projects {
            manifest.push_str(&format!("\n[[projects]]\nname = \"{}\"\n", name));

            let project_dir = self.work_path.join("src").join(name);
            fs::create_dir_all(&project_dir)?;
            fs::write(
                project_dir.join(format!("{}.csproj", name)),
                "<Project Sdk=\"Microsoft.NET.Sdk.Web\" />\n",
            )?;
            fs::write(
                project_dir.join("Dockerfile"),
                "FROM mcr.microsoft.com/dotnet/aspnet:8.0\n",
            )?;
        }

        fs::write(self.work_path.join("build.toml"), manifest)?;
        fs::write(
            self.work_path.join("src").join("App.sln"),
            "Microsoft Visual Studio Solution File\n",
        )?;
        Ok(())
    }

    /// Validated configuration rooted at the work directory
    pub fn app_config(&self) -> Result<AppConfig> {
        let mut config = AppConfig {
            root: Some(self.work_path.clone()),
            color: ColorIntent::Never,
            ..AppConfig::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Process provider resolving mocks from `bin/` first
    pub fn process_provider(&self) -> LiveProcessProvider {
        LiveProcessProvider::with_prepended_path(&self.bin_path)
    }

    pub fn work_file(&self, relative: &str) -> PathBuf {
        self.work_path.join(relative)
    }

    /// Get the log contents for a mock executable
    pub fn get_mock_log(&self, executable_name: &str) -> Result<String> {
        let log_path = match self.mock_executables.get(executable_name) {
            Some(mock) => mock.log_path.clone(),
            None => return Ok(String::new()),
        };
        if log_path.exists() {
            Ok(fs::read_to_string(log_path)?)
        } else {
            Ok(String::new())
        }
    }

    /// Arguments of every call made to a mock executable
    pub fn get_mock_calls(&self, executable_name: &str) -> Result<Vec<String>> {
        let prefix = format!("{} ", executable_name);
        Ok(self
            .get_mock_log(executable_name)?
            .lines()
            .map(|line| line.strip_prefix(&prefix).unwrap_or("").to_string())
            .collect())
    }

    /// First argument of every call made to a mock executable
    pub fn get_mock_subcommands(&self, executable_name: &str) -> Result<Vec<String>> {
        Ok(self
            .get_mock_calls(executable_name)?
            .iter()
            .filter_map(|call| call.split_whitespace().next().map(str::to_string))
            .collect())
    }
}

fn generate_mock_script(name: &str, behavior: &MockBehavior, log_path: &Path) -> String {
    format!(
        r#"#!/bin/sh
# Mock executable: {name}

echo "{name} $*" >> "{log}"

{body}
"#,
        name = name,
        log = log_path.display(),
        body = behavior_code(behavior)
    )
}

fn behavior_code(behavior: &MockBehavior) -> String {
    match behavior {
        MockBehavior::AlwaysSucceed => "exit 0".to_string(),
        MockBehavior::AlwaysFail { error } => format!("echo '{}' >&2\nexit 1", error),
        MockBehavior::SucceedWithOutput { stdout, stderr } => {
            let mut code = String::new();
            if !stdout.is_empty() {
                code.push_str(&format!("echo '{}'\n", stdout));
            }
            if !stderr.is_empty() {
                code.push_str(&format!("echo '{}' >&2\n", stderr));
            }
            code.push_str("exit 0");
            code
        }
        MockBehavior::WriteToOutput { file } => format!(
            r#"out=""
prev=""
for arg in "$@"; do
  if [ "$prev" = "--output" ]; then out="$arg"; fi
  prev="$arg"
done
if [ -z "$out" ]; then
  echo 'no --output given' >&2
  exit 2
fi
mkdir -p "$out" && echo published > "$out/{}"
exit $?"#,
            file
        ),
        MockBehavior::Conditional { rules } => {
            let mut code = String::from("case \"$1\" in\n");
            for rule in rules {
                code.push_str(&format!("  {})\n", rule.subcommand));
                for line in behavior_code(&rule.behavior).lines() {
                    code.push_str(&format!("    {}\n", line));
                }
                code.push_str("    ;;\n");
            }
            code.push_str("esac\nexit 0");
            code
        }
    }
}
