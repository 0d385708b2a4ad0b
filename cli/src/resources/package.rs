//! Package installation resource.
use anyhow::Result;

use super::{Applicable, Resource, ResourceChange, ResourceState};
use crate::exec::Executor;

/// Supported package managers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageManager {
    /// Debian-family packages (apt-get / dpkg).
    Apt,
}

impl std::fmt::Display for PackageManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Apt => write!(f, "apt"),
        }
    }
}

/// A system package resource that can be checked and installed.
#[derive(Debug)]
pub struct PackageResource<'a> {
    /// Package name.
    pub name: String,
    /// Package manager to use.
    pub manager: PackageManager,
    executor: &'a dyn Executor,
}

impl<'a> PackageResource<'a> {
    /// Create a new package resource.
    #[must_use]
    pub const fn new(name: String, manager: PackageManager, executor: &'a dyn Executor) -> Self {
        Self {
            name,
            manager,
            executor,
        }
    }
}

impl Applicable for PackageResource<'_> {
    fn description(&self) -> String {
        format!("{} ({})", self.name, self.manager)
    }

    fn apply(&self) -> Result<ResourceChange> {
        match self.manager {
            PackageManager::Apt => {
                self.executor
                    .run("sudo", &["apt-get", "install", "-y", &self.name])?;
                Ok(ResourceChange::Applied)
            }
        }
    }
}

impl Resource for PackageResource<'_> {
    fn current_state(&self) -> Result<ResourceState> {
        let installed = match self.manager {
            PackageManager::Apt => {
                let result = self.executor.run_unchecked(
                    "dpkg-query",
                    &["-W", "-f=${Status}", &self.name],
                )?;
                result.success && result.stdout.contains("install ok installed")
            }
        };

        Ok(if installed {
            ResourceState::Correct
        } else {
            ResourceState::Missing
        })
    }
}
