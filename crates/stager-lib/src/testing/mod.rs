//! Test support shared by unit tests and the hermetic end-to-end crate
//!
//! Enabled for this crate's own tests and, for other crates, through the
//! `test-utils` feature.

pub mod filesystem;

pub use crate::process::{MockProcessProvider, ProcessCall};
pub use filesystem::{FixtureResult, ProjectFixture};
