//! Command-line interface definition.
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::DEFAULT_CONFIG_FILE;

/// Top-level CLI entry point for certificate lifecycle management.
#[derive(Parser, Debug)]
#[command(
    name = "certbot-deploy",
    about = "Issue, list and delete certbot certificates idempotently",
    version
)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Options shared across all subcommands.
    #[command(flatten)]
    pub global: GlobalOpts,
}

/// Options shared across all subcommands.
#[derive(Parser, Debug, Clone)]
pub struct GlobalOpts {
    /// Preview changes without applying
    #[arg(short = 'n', long, global = true)]
    pub dry_run: bool,

    /// Certificate configuration file
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Install certbot with the host's package manager
    Provision,
    /// Obtain a certificate unless one with the same name exists
    Certonly(CertonlyOpts),
    /// Delete a certificate
    Delete(DeleteOpts),
    /// List certificates certbot knows about
    Certificates(CertificatesOpts),
    /// Converge the host to the configuration file
    Apply(ApplyOpts),
    /// Generate shell completions
    Completions {
        /// Target shell
        shell: clap_complete::Shell,
    },
    /// Print version information
    Version,
}

impl Command {
    /// Name used for the per-command log file.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Provision => "provision",
            Self::Certonly(_) => "certonly",
            Self::Delete(_) => "delete",
            Self::Certificates(_) => "certificates",
            Self::Apply(_) => "apply",
            Self::Completions { .. } => "completions",
            Self::Version => "version",
        }
    }
}

/// Options for the `certonly` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct CertonlyOpts {
    /// Certificate name (certbot derives one from the first domain if unset)
    #[arg(long)]
    pub cert_name: Option<String>,

    /// Domains to include, in order
    #[arg(short, long, value_delimiter = ',', required = true)]
    pub domains: Vec<String>,

    /// DNS-01 plugin, e.g. `google` for `--dns-google`
    #[arg(long)]
    pub dns: Option<String>,
}

/// Options for the `delete` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct DeleteOpts {
    /// Certificate name
    #[arg(long)]
    pub cert_name: String,
}

/// Options for the `certificates` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct CertificatesOpts {
    /// Print the inventory as JSON
    #[arg(long)]
    pub json: bool,
}

/// Options for the `apply` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct ApplyOpts {
    /// Skip specific tasks
    #[arg(long, value_delimiter = ',')]
    pub skip: Vec<String>,

    /// Run only specific tasks
    #[arg(long, value_delimiter = ',')]
    pub only: Vec<String>,
}
