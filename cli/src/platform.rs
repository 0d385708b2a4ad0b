//! Package-family detection for the target host.
use std::fmt;

use crate::error::ProvisionError;
use crate::exec::Executor;
use crate::resources::package::PackageManager;

/// Package family of the host, resolved once per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageFamily {
    /// `dpkg-query` on PATH (Debian, Ubuntu, ...).
    Debian,
    /// `rpm` on PATH (RHEL, Fedora, ...).
    RedHat,
    /// Neither was found.
    Unknown,
}

impl fmt::Display for PackageFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Debian => write!(f, "debian"),
            Self::RedHat => write!(f, "redhat"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

impl PackageFamily {
    /// Detect the package family from the package database tools on PATH.
    ///
    /// Debian metadata wins when both are present.
    pub fn detect(executor: &dyn Executor) -> Self {
        Self::from_metadata(executor.which("dpkg-query"), executor.which("rpm"))
    }

    /// Resolve the family from the two package-metadata checks.
    #[must_use]
    pub const fn from_metadata(has_deb: bool, has_rpm: bool) -> Self {
        match (has_deb, has_rpm) {
            (true, _) => Self::Debian,
            (false, true) => Self::RedHat,
            (false, false) => Self::Unknown,
        }
    }

    /// Package manager used to install `package` on this family.
    ///
    /// # Errors
    ///
    /// Returns [`ProvisionError::Unimplemented`] for [`PackageFamily::RedHat`]
    /// and [`ProvisionError::NoInstallMethod`] for [`PackageFamily::Unknown`].
    pub fn package_manager(self, package: &str) -> Result<PackageManager, ProvisionError> {
        match self {
            Self::Debian => Ok(PackageManager::Apt),
            Self::RedHat => Err(ProvisionError::Unimplemented {
                family: self,
                package: package.to_string(),
            }),
            Self::Unknown => Err(ProvisionError::NoInstallMethod {
                package: package.to_string(),
            }),
        }
    }
}
