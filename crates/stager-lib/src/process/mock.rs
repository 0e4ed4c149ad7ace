use super::{ProcessOutput, ProcessProvider};
use anyhow::Result;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Process call record for spy pattern
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessCall {
    pub command: String,
    pub args: Vec<String>,
    pub working_dir: PathBuf,
}

impl ProcessCall {
    /// First argument, which is the subcommand for toolchains like `dotnet`
    pub fn subcommand(&self) -> Option<&str> {
        self.args.first().map(String::as_str)
    }

    /// Value following `flag`, e.g. `--output <dir>`
    pub fn flag_value(&self, flag: &str) -> Option<&str> {
        self.args
            .iter()
            .position(|arg| arg == flag)
            .and_then(|idx| self.args.get(idx + 1))
            .map(String::as_str)
    }
}

type Hook = Box<dyn Fn(&ProcessCall)>;

/// Mock process provider for testing with spy pattern
///
/// Unscripted calls succeed with empty output.
pub struct MockProcessProvider {
    pub calls: RefCell<Vec<ProcessCall>>,
    pub results: HashMap<(String, Vec<String>), std::result::Result<ProcessOutput, String>>,
    failing_subcommands: HashMap<String, String>,
    hooks: Vec<(String, Hook)>,
}

impl MockProcessProvider {
    pub fn new() -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            results: HashMap::new(),
            failing_subcommands: HashMap::new(),
            hooks: Vec::new(),
        }
    }

    /// Script the exact result for `command args...`
    pub fn with_result(
        mut self,
        command: &str,
        args: &[&str],
        result: std::result::Result<ProcessOutput, String>,
    ) -> Self {
        let args = args.iter().map(|s| s.to_string()).collect();
        self.results.insert((command.to_string(), args), result);
        self
    }

    /// Any call whose first argument is `subcommand` exits with code 1
    pub fn fails_on(mut self, subcommand: &str, stderr: &str) -> Self {
        self.failing_subcommands
            .insert(subcommand.to_string(), stderr.to_string());
        self
    }

    /// Run `hook` for every successful call whose first argument is `subcommand`
    pub fn on_subcommand<F>(mut self, subcommand: &str, hook: F) -> Self
    where
        F: Fn(&ProcessCall) + 'static,
    {
        self.hooks.push((subcommand.to_string(), Box::new(hook)));
        self
    }

    /// Make `publish` calls leave a file in their `--output` directory
    pub fn creating_publish_output(self) -> Self {
        self.on_subcommand("publish", |call| {
            if let Some(output) = call.flag_value("--output") {
                let output = Path::new(output);
                if fs::create_dir_all(output).is_ok() {
                    let _ = fs::write(output.join("app.dll"), b"published");
                }
            }
        })
    }

    /// Get all recorded process calls for verification
    pub fn get_calls(&self) -> Vec<ProcessCall> {
        self.calls.borrow().clone()
    }

    /// Subcommands of every recorded call, in call order
    pub fn subcommands(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| call.subcommand().map(str::to_string))
            .collect()
    }

    /// Get calls with a specific subcommand
    pub fn get_calls_for_subcommand(&self, subcommand: &str) -> Vec<ProcessCall> {
        self.calls
            .borrow()
            .iter()
            .filter(|call| call.subcommand() == Some(subcommand))
            .cloned()
            .collect()
    }

    /// Verify that a specific command was called with expected arguments
    pub fn verify_call(&self, command: &str, args: &[&str], working_dir: &Path) -> bool {
        let expected_call = ProcessCall {
            command: command.to_string(),
            args: args.iter().map(|s| s.to_string()).collect(),
            working_dir: working_dir.to_path_buf(),
        };

        self.calls.borrow().contains(&expected_call)
    }
}

impl Default for MockProcessProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessProvider for MockProcessProvider {
    fn execute(&self, command: &str, args: &[&str], working_dir: &Path) -> Result<ProcessOutput> {
        let call = ProcessCall {
            command: command.to_string(),
            args: args.iter().map(|s| s.to_string()).collect(),
            working_dir: working_dir.to_path_buf(),
        };
        self.calls.borrow_mut().push(call.clone());

        let key = (call.command.clone(), call.args.clone());
        if let Some(result) = self.results.get(&key) {
            return match result {
                Ok(output) => Ok(output.clone()),
                Err(e) => Err(anyhow::anyhow!("{}", e)),
            };
        }

        if let Some(stderr) = call
            .subcommand()
            .and_then(|sub| self.failing_subcommands.get(sub))
        {
            return Ok(ProcessOutput::failed(1, stderr.clone()));
        }

        for (subcommand, hook) in &self.hooks {
            if call.subcommand() == Some(subcommand.as_str()) {
                hook(&call);
            }
        }

        Ok(ProcessOutput::succeeded(""))
    }
}
