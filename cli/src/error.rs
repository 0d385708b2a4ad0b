//! Domain-specific error types for certificate deployment.
//!
//! Internal modules return typed errors while command handlers at the CLI
//! boundary convert them to [`anyhow::Error`] via the standard `?` operator.
//!
//! # Error hierarchy
//!
//! ```text
//! DeployError
//! ├── Config(ConfigError)            certificates.toml loading
//! ├── Certificate(CertificateError)  invalid desired state
//! └── Provision(ProvisionError)      installing certbot on the host
//! ```
//!
//! Failures of external commands are not modelled here; they propagate
//! unchanged from [`crate::exec`].

use thiserror::Error;

use crate::platform::PackageFamily;

/// Top-level error type for certificate deployment.
#[derive(Error, Debug)]
pub enum DeployError {
    /// Configuration-related error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Desired certificate state is invalid.
    #[error("Certificate error: {0}")]
    Certificate(#[from] CertificateError),

    /// certbot could not be installed.
    #[error("Provisioning error: {0}")]
    Provision(#[from] ProvisionError),
}

/// Errors that arise from loading the certificate configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The TOML file contains a syntax or schema error.
    #[error("Invalid TOML in {file}: {message}")]
    InvalidSyntax {
        /// Path of the offending file.
        file: String,
        /// Parser message.
        message: String,
    },

    /// An I/O error occurred while reading a config file.
    #[error("IO error reading config file {path}: {source}")]
    Io {
        /// Path to the file that could not be read.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A certificate entry is invalid.
    #[error("Invalid certificate [{name}]: {source}")]
    InvalidCertificate {
        /// Table name of the entry.
        name: String,
        /// What is wrong with it.
        source: CertificateError,
    },
}

/// Errors in a desired certificate description.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CertificateError {
    /// A certificate must cover at least one domain.
    #[error("at least one domain is required")]
    NoDomains,
}

/// Errors that arise while installing certbot.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProvisionError {
    /// The install path for this package family has not been written.
    #[error("{family} install of {package} is not implemented")]
    Unimplemented {
        /// Detected package family.
        family: PackageFamily,
        /// Package that was to be installed.
        package: String,
    },

    /// Neither Debian nor RPM package metadata was found.
    #[error("no install method found: can not install {package}")]
    NoInstallMethod {
        /// Package that was to be installed.
        package: String,
    },
}
