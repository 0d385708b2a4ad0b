//! Rendering of certbot invocations.
use std::fmt;

use anyhow::Result;

use crate::exec::{ExecResult, Executor};

/// Name of the certbot binary.
pub const CERTBOT: &str = "certbot";

/// A single certbot invocation: an action keyword plus optional flags.
///
/// Flags are always rendered in the same order, regardless of the order
/// the builder methods were called in:
///
/// ```text
/// certbot <action> [--cert-name <name>] [--dns-<provider>] [-d <d1,d2,...>]
/// ```
///
/// Values are passed through verbatim; no domain or provider validation is
/// done here.
///
/// # Examples
///
/// ```
/// use certbot_deploy::certbot::CertbotCommand;
///
/// let cmd = CertbotCommand::new("certonly")
///     .cert_name("example")
///     .dns_provider("google")
///     .domains(["a.com", "b.com"]);
/// assert_eq!(
///     cmd.to_string(),
///     "certbot certonly --cert-name example --dns-google -d a.com,b.com"
/// );
/// assert_eq!(CertbotCommand::new("certificates").to_string(), "certbot certificates");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CertbotCommand {
    action: String,
    cert_name: Option<String>,
    dns_provider: Option<String>,
    domains: Vec<String>,
}

impl CertbotCommand {
    /// Start a command for the given action keyword (`certonly`, `delete`, ...).
    #[must_use]
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            ..Self::default()
        }
    }

    /// Set the `--cert-name` flag.
    #[must_use]
    pub fn cert_name(mut self, name: impl Into<String>) -> Self {
        self.cert_name = Some(name.into());
        self
    }

    /// Set the DNS-01 plugin, rendered as `--dns-<provider>`.
    #[must_use]
    pub fn dns_provider(mut self, provider: impl Into<String>) -> Self {
        self.dns_provider = Some(provider.into());
        self
    }

    /// Set the domain list, rendered as a single comma-joined `-d` flag.
    #[must_use]
    pub fn domains<I, S>(mut self, domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.domains = domains.into_iter().map(Into::into).collect();
        self
    }

    /// The action keyword.
    #[must_use]
    pub fn action(&self) -> &str {
        &self.action
    }

    /// Argument vector passed to [`CERTBOT`], in rendering order.
    #[must_use]
    pub fn args(&self) -> Vec<String> {
        let mut args = vec![self.action.clone()];

        if let Some(name) = &self.cert_name {
            args.push("--cert-name".to_string());
            args.push(name.clone());
        }

        if let Some(provider) = &self.dns_provider {
            args.push(format!("--dns-{provider}"));
        }

        if !self.domains.is_empty() {
            args.push("-d".to_string());
            args.push(self.domains.join(","));
        }

        args
    }

    /// Run this command through `executor`, failing on non-zero exit.
    ///
    /// # Errors
    ///
    /// Propagates the executor's error unchanged.
    pub fn run(&self, executor: &dyn Executor) -> Result<ExecResult> {
        let args = self.args();
        let argv: Vec<&str> = args.iter().map(String::as_str).collect();
        executor.run(CERTBOT, &argv)
    }
}

impl fmt::Display for CertbotCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{CERTBOT}")?;
        for arg in self.args() {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}
