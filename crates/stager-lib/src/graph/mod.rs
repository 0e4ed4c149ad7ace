//! Target graph: declaration, resolution, and execution
//!
//! - [`Target`] - a named action with prerequisites, soft ordering and declared outputs
//! - [`TargetRegistry`] - static registry, resolves requests into an [`ExecutionPlan`]
//! - [`Runner`] - executes plans, each target at most once, stopping at the first failure

mod plan;
mod registry;
mod runner;
mod target;

pub use plan::ExecutionPlan;
pub use registry::TargetRegistry;
pub use runner::{RunReport, Runner, TargetOutcome};
pub use target::{Action, Target, TargetState};
