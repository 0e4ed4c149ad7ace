//! Standard target declarations
//!
//! Registration order (Clean, Restore, Compile, Publish, Package) is what
//! breaks ties, so a Publish plan is always Clean, Restore, Publish.

use super::BuildEnv;
use super::context::RunContext;
use crate::filesystem::{self, archive};
use crate::graph::{Target, TargetRegistry};
use crate::primitives::{BuildError, BuildResult};
use tracing::{debug, info};

pub const CLEAN: &str = "Clean";
pub const RESTORE: &str = "Restore";
pub const COMPILE: &str = "Compile";
pub const PUBLISH: &str = "Publish";
pub const PACKAGE: &str = "Package";

/// Target run when none is requested
pub const DEFAULT_TARGET: &str = COMPILE;

/// Directories under the source tree removed by Clean
const CLEAN_PATTERNS: &[&str] = &["**/bin", "**/obj", "output"];

/// Copied from each project directory into its publish folder
const DOCKERFILE_PATTERN: &str = "Dockerfile*";

/// Declare the five standard targets for `context`
pub fn standard_targets(context: &RunContext) -> BuildResult<TargetRegistry<BuildEnv>> {
    let mut registry = TargetRegistry::new();

    registry.register(
        Target::new(CLEAN)
            .description("Delete build intermediates and reset the output directory")
            .before([RESTORE])
            .executes(clean),
    )?;

    registry.register(
        Target::new(RESTORE)
            .description("Restore solution dependencies")
            .executes(restore),
    )?;

    registry.register(
        Target::new(COMPILE)
            .description("Build the solution")
            .depends_on([RESTORE])
            .executes(compile),
    )?;

    registry.register(
        Target::new(PUBLISH)
            .description("Publish each project and copy its Dockerfiles")
            .depends_on([CLEAN, RESTORE])
            .executes(publish),
    )?;

    let patterns: Vec<String> = context
        .projects()
        .iter()
        .map(|project| context.artifact_pattern_for(&project.name))
        .collect();
    registry.register(
        Target::new(PACKAGE)
            .description("Archive each published project as .tar.gz")
            .depends_on([PUBLISH])
            .produces(patterns)
            .executes(package),
    )?;

    Ok(registry)
}

fn clean(env: &BuildEnv) -> BuildResult<()> {
    let context = env.context();

    let deleted = filesystem::delete_matching_directories(context.source_dir(), CLEAN_PATTERNS)?;
    for path in &deleted {
        debug!(path = %path.display(), "Removed");
    }
    filesystem::ensure_clean_directory(context.output_dir())?;

    info!(
        removed = deleted.len(),
        output = %context.output_dir().display(),
        "Cleaned"
    );
    Ok(())
}

fn restore(env: &BuildEnv) -> BuildResult<()> {
    env.toolchain().restore(env.context().solution())
}

fn compile(env: &BuildEnv) -> BuildResult<()> {
    let context = env.context();
    env.toolchain()
        .build(context.solution(), context.configuration(), context.version())
}

fn publish(env: &BuildEnv) -> BuildResult<()> {
    let context = env.context();
    let toolchain = env.toolchain();

    for project in context.projects() {
        let output = context.publish_dir_for(&project.name);
        toolchain.publish(
            &project.file,
            &output,
            context.configuration(),
            context.version(),
        )?;

        let copied = filesystem::copy_matching(project.directory(), DOCKERFILE_PATTERN, &output)?;
        info!(
            project = %project.name,
            dockerfiles = copied.len(),
            output = %output.display(),
            "Published"
        );
    }
    Ok(())
}

fn package(env: &BuildEnv) -> BuildResult<()> {
    let context = env.context();

    for project in context.projects() {
        let input = context.publish_dir_for(&project.name);
        if !filesystem::contains_files(&input)? {
            return Err(BuildError::MissingArtifact {
                pattern: input.join("*").to_string_lossy().into_owned(),
            });
        }

        archive::create_tar_gz(
            &input,
            &context.archive_path_for(&project.name),
            &context.archive_root_name(&project.name),
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    include!("targets.test.rs");
}
