//! The standard build pipeline: Clean, Restore, Compile, Publish, Package
//!
//! - [`manifest`] - `build.toml` declaring solution and projects
//! - [`version`] - version resolution and assembly stamping
//! - [`context`] - read-only [`RunContext`] and artifact path layout
//! - [`toolchain`] - `dotnet` CLI wrapper
//! - [`targets`] - target declarations and their actions

pub mod context;
pub mod manifest;
pub mod targets;
pub mod toolchain;
pub mod version;

pub use context::{Project, RunContext};
pub use manifest::{MANIFEST_FILE_NAME, Manifest, ProjectEntry};
pub use targets::{COMPILE, DEFAULT_TARGET, standard_targets};
pub use toolchain::DotNet;
pub use version::{VersionInfo, VersionSource, resolve_version};

use crate::process::ProcessProvider;

/// Environment handed to every target action
pub struct BuildEnv {
    context: RunContext,
    process: Box<dyn ProcessProvider>,
}

impl BuildEnv {
    pub fn new(context: RunContext, process: Box<dyn ProcessProvider>) -> Self {
        Self { context, process }
    }

    pub fn context(&self) -> &RunContext {
        &self.context
    }

    pub fn process(&self) -> &dyn ProcessProvider {
        self.process.as_ref()
    }

    /// Toolchain rooted at the repository
    pub fn toolchain(&self) -> DotNet<'_> {
        DotNet::new(
            self.context.toolchain(),
            self.context.root(),
            self.process.as_ref(),
        )
    }
}
