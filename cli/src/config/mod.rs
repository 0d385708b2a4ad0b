//! Declarative configuration: which certificates should exist on the host.
pub mod certificates;
pub mod toml_loader;

use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::reconcile::DesiredCertificate;

pub use certificates::{CertificateState, ConfiguredCertificate};

/// Default configuration file name, resolved against the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "certificates.toml";

/// All loaded configuration.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// File the configuration was read from.
    pub path: PathBuf,
    /// Configured certificates, ordered by name.
    pub certificates: Vec<ConfiguredCertificate>,
}

impl Config {
    /// Load the certificate configuration at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, does not parse, or
    /// contains an invalid certificate.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        Ok(Self {
            path: path.to_path_buf(),
            certificates: certificates::load(path)?,
        })
    }

    /// Certificates that should exist.
    pub fn present(&self) -> impl Iterator<Item = &DesiredCertificate> {
        self.certificates.iter().filter_map(|c| match c {
            ConfiguredCertificate::Present(desired) => Some(desired),
            ConfiguredCertificate::Absent(_) => None,
        })
    }

    /// Names of certificates that should be deleted.
    pub fn absent(&self) -> impl Iterator<Item = &str> {
        self.certificates.iter().filter_map(|c| match c {
            ConfiguredCertificate::Absent(name) => Some(name.as_str()),
            ConfiguredCertificate::Present(_) => None,
        })
    }
}
