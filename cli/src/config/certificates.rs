//! Desired certificates from `certificates.toml`.
//!
//! Each top-level table is one certificate, keyed by its lineage name:
//!
//! ```toml
//! [example]
//! domains = ["example.com", "www.example.com"]
//! dns_provider = "google"
//!
//! [retired]
//! state = "absent"
//! ```
use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use super::toml_loader::load_config;
use crate::error::ConfigError;
use crate::reconcile::DesiredCertificate;

/// Whether a configured certificate should exist.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CertificateState {
    /// Issue the certificate if certbot does not have it.
    #[default]
    Present,
    /// Delete the certificate.
    Absent,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CertificateTable {
    #[serde(default)]
    domains: Vec<String>,
    dns_provider: Option<String>,
    #[serde(default)]
    state: CertificateState,
}

/// One entry of the certificate configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfiguredCertificate {
    /// Should exist.
    Present(DesiredCertificate),
    /// Should be deleted, by name.
    Absent(String),
}

impl ConfiguredCertificate {
    /// Lineage name of the entry.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Present(desired) => desired.name().unwrap_or_default(),
            Self::Absent(name) => name,
        }
    }
}

/// Load configured certificates from `path`, ordered by name.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or if a present
/// certificate lists no domains.
pub fn load(path: &Path) -> Result<Vec<ConfiguredCertificate>, ConfigError> {
    let tables: BTreeMap<String, CertificateTable> = load_config(path)?;

    tables
        .into_iter()
        .map(|(name, table)| match table.state {
            CertificateState::Absent => Ok(ConfiguredCertificate::Absent(name)),
            CertificateState::Present => {
                DesiredCertificate::new(Some(name.clone()), table.domains, table.dns_provider)
                    .map(ConfiguredCertificate::Present)
                    .map_err(|source| ConfigError::InvalidCertificate { name, source })
            }
        })
        .collect()
}
