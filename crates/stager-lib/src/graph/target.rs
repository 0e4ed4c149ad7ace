//! Target declarations and per-run target state

use crate::primitives::BuildResult;
use std::fmt;

/// Side-effecting body of a target, given the read-only run environment
pub type Action<C> = Box<dyn Fn(&C) -> BuildResult<()>>;

/// A named unit of build work
///
/// Declared once with the builder methods below, then handed to a
/// [`TargetRegistry`](super::TargetRegistry), which never mutates it.
pub struct Target<C> {
    name: String,
    description: Option<String>,
    depends_on: Vec<String>,
    before: Vec<String>,
    after: Vec<String>,
    produces: Vec<String>,
    action: Option<Action<C>>,
}

impl<C> Target<C> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            depends_on: Vec::new(),
            before: Vec::new(),
            after: Vec::new(),
            produces: Vec::new(),
            action: None,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Prerequisites: pulled into the plan and run first
    pub fn depends_on<I, S>(mut self, targets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.depends_on.extend(targets.into_iter().map(Into::into));
        self
    }

    /// Soft ordering: if both targets are in a plan, this one runs first
    pub fn before<I, S>(mut self, targets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.before.extend(targets.into_iter().map(Into::into));
        self
    }

    /// Soft ordering: if both targets are in a plan, this one runs last
    pub fn after<I, S>(mut self, targets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.after.extend(targets.into_iter().map(Into::into));
        self
    }

    /// Output patterns that must match at least one file once the action succeeds
    pub fn produces<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.produces.extend(patterns.into_iter().map(Into::into));
        self
    }

    pub fn executes<F>(mut self, action: F) -> Self
    where
        F: Fn(&C) -> BuildResult<()> + 'static,
    {
        self.action = Some(Box::new(action));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn about(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn dependencies(&self) -> &[String] {
        &self.depends_on
    }

    pub fn runs_before(&self) -> &[String] {
        &self.before
    }

    pub fn runs_after(&self) -> &[String] {
        &self.after
    }

    pub fn outputs(&self) -> &[String] {
        &self.produces
    }

    /// Run the action; a target without one succeeds trivially
    pub(crate) fn run(&self, context: &C) -> BuildResult<()> {
        match &self.action {
            Some(action) => action(context),
            None => Ok(()),
        }
    }
}

impl<C> fmt::Debug for Target<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Target")
            .field("name", &self.name)
            .field("depends_on", &self.depends_on)
            .field("before", &self.before)
            .field("after", &self.after)
            .field("produces", &self.produces)
            .field("has_action", &self.action.is_some())
            .finish()
    }
}

/// Lifecycle of a target within one run
///
/// `Pending -> Running -> {Succeeded, Failed}`; `Skipped` replaces `Running`
/// for targets excluded on the command line. Terminal states are never left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetState {
    Pending,
    Running,
    Succeeded,
    Failed,
    Skipped,
}

impl TargetState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed | Self::Skipped)
    }
}

impl fmt::Display for TargetState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Pending => "pending",
            Self::Running => "running",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
            Self::Skipped => "skipped",
        };
        f.write_str(label)
    }
}
