//! Static target registry
//!
//! Registration order is significant: it breaks ties between independent
//! targets when a plan is ordered, which keeps plans reproducible.

use super::target::Target;
use crate::primitives::{BuildError, BuildResult};
use std::collections::HashMap;
use tracing::trace;

pub struct TargetRegistry<C> {
    targets: Vec<Target<C>>,
    index: HashMap<String, usize>,
}

impl<C> TargetRegistry<C> {
    pub fn new() -> Self {
        Self {
            targets: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Add a target; names are unique
    pub fn register(&mut self, target: Target<C>) -> BuildResult<()> {
        if self.index.contains_key(target.name()) {
            return Err(BuildError::DuplicateTarget {
                name: target.name().to_string(),
            });
        }

        trace!(target_name = target.name(), "Registering target");
        self.index
            .insert(target.name().to_string(), self.targets.len());
        self.targets.push(target);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Target<C>> {
        self.index.get(name).map(|&idx| &self.targets[idx])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Position of a target in registration order
    pub fn registration_index(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Targets in registration order
    pub fn iter(&self) -> impl Iterator<Item = &Target<C>> {
        self.targets.iter()
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub(crate) fn lookup(&self, name: &str, required_by: Option<&str>) -> BuildResult<usize> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| BuildError::UnknownTarget {
                name: name.to_string(),
                required_by: required_by.map(str::to_string),
            })
    }

    pub(crate) fn at(&self, idx: usize) -> &Target<C> {
        &self.targets[idx]
    }
}

impl<C> Default for TargetRegistry<C> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    include!("registry.test.rs");
}
