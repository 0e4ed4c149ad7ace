//! Plan execution with at-most-once semantics per runner

use super::plan::ExecutionPlan;
use super::registry::TargetRegistry;
use super::target::{Target, TargetState};
use crate::filesystem;
use crate::primitives::{BuildError, BuildResult};
use std::collections::{HashMap, HashSet};
use std::time::{Duration, Instant};
use tracing::{debug, error, info, info_span};

/// Result of one target in a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetOutcome {
    pub name: String,
    pub state: TargetState,
    pub duration: Duration,
}

/// Outcomes of every target the runner touched, in execution order
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    outcomes: Vec<TargetOutcome>,
}

impl RunReport {
    pub fn outcomes(&self) -> &[TargetOutcome] {
        &self.outcomes
    }

    pub fn failed(&self) -> Option<&TargetOutcome> {
        self.outcomes
            .iter()
            .find(|o| o.state == TargetState::Failed)
    }

    /// Names of targets whose action actually ran
    pub fn executed(&self) -> Vec<&str> {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.state, TargetState::Succeeded | TargetState::Failed))
            .map(|o| o.name.as_str())
            .collect()
    }

    pub fn total_duration(&self) -> Duration {
        self.outcomes.iter().map(|o| o.duration).sum()
    }
}

/// Executes plans against one registry
///
/// State lives as long as the runner, which represents a single process
/// invocation: a target reached again by a later plan is not re-run.
pub struct Runner<'r, C> {
    registry: &'r TargetRegistry<C>,
    states: HashMap<String, TargetState>,
    skip: HashSet<String>,
    outcomes: Vec<TargetOutcome>,
}

impl<'r, C> Runner<'r, C> {
    pub fn new(registry: &'r TargetRegistry<C>) -> Self {
        Self {
            registry,
            states: HashMap::new(),
            skip: HashSet::new(),
            outcomes: Vec::new(),
        }
    }

    /// Targets whose action is bypassed; they still count as done
    pub fn with_skip<I, S>(mut self, targets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skip.extend(targets.into_iter().map(Into::into));
        self
    }

    pub fn state(&self, name: &str) -> TargetState {
        self.states
            .get(name)
            .copied()
            .unwrap_or(TargetState::Pending)
    }

    /// Run every target in `plan` in order, stopping at the first failure
    pub fn execute(&mut self, plan: &ExecutionPlan, context: &C) -> BuildResult<()> {
        let total = plan.len();

        for (position, name) in plan.iter().enumerate() {
            if self.state(name) == TargetState::Failed {
                return Err(BuildError::PreviouslyFailed {
                    target: name.to_string(),
                });
            }
            if self.state(name).is_terminal() {
                debug!(target_name = name, state = %self.state(name), "Target already finished in this run");
                continue;
            }

            let registry = self.registry;
            let target = registry.get(name).ok_or_else(|| BuildError::UnknownTarget {
                name: name.to_string(),
                required_by: None,
            })?;

            if self.skip.contains(name) {
                info!(target_name = name, "Skipping target");
                self.finish(name, TargetState::Skipped, Duration::ZERO);
                continue;
            }

            let span = info_span!("target", name = name, step = position + 1, total);
            let _entered = span.enter();

            self.states.insert(name.to_string(), TargetState::Running);
            info!("Running target {}", name);
            let started = Instant::now();

            let result = target.run(context).and_then(|()| verify_outputs(target));
            let elapsed = started.elapsed();

            match result {
                Ok(()) => {
                    info!(elapsed_ms = elapsed.as_millis() as u64, "Target {} succeeded", name);
                    self.finish(name, TargetState::Succeeded, elapsed);
                }
                Err(err) => {
                    error!(elapsed_ms = elapsed.as_millis() as u64, error = %err, "Target {} failed", name);
                    self.finish(name, TargetState::Failed, elapsed);
                    return Err(BuildError::TargetFailed {
                        target: name.to_string(),
                        source: Box::new(err),
                    });
                }
            }
        }

        Ok(())
    }

    pub fn report(&self) -> RunReport {
        RunReport {
            outcomes: self.outcomes.clone(),
        }
    }

    fn finish(&mut self, name: &str, state: TargetState, duration: Duration) {
        self.states.insert(name.to_string(), state);
        self.outcomes.push(TargetOutcome {
            name: name.to_string(),
            state,
            duration,
        });
    }
}

/// Every declared output pattern must match at least one existing file
fn verify_outputs<C>(target: &Target<C>) -> BuildResult<()> {
    for pattern in target.outputs() {
        if !filesystem::any_file_matches(pattern)? {
            return Err(BuildError::MissingArtifact {
                pattern: pattern.clone(),
            });
        }
        debug!(pattern = %pattern, "Declared output present");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    include!("runner.test.rs");
}
