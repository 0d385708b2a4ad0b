//! Deciding which certbot action, if any, a desired certificate needs.
//!
//! The decision is presence-only: a certificate whose name already appears
//! in the inventory satisfies the request, even when its domains or DNS
//! plugin differ from what is asked for. Deletion is never reconciled.
use std::fmt;

use crate::certbot::{CertbotCommand, CertificateInventory};
use crate::error::CertificateError;

/// A certificate that should exist on the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesiredCertificate {
    name: Option<String>,
    domains: Vec<String>,
    dns_provider: Option<String>,
}

impl DesiredCertificate {
    /// Describe a certificate.
    ///
    /// # Errors
    ///
    /// Returns [`CertificateError::NoDomains`] if `domains` is empty.
    pub fn new(
        name: Option<String>,
        domains: Vec<String>,
        dns_provider: Option<String>,
    ) -> Result<Self, CertificateError> {
        if domains.is_empty() {
            return Err(CertificateError::NoDomains);
        }
        Ok(Self {
            name,
            domains,
            dns_provider,
        })
    }

    /// Certificate lineage name, if one was given.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Domains in the order they will be passed to certbot.
    #[must_use]
    pub fn domains(&self) -> &[String] {
        &self.domains
    }

    /// DNS-01 plugin, if any.
    #[must_use]
    pub fn dns_provider(&self) -> Option<&str> {
        self.dns_provider.as_deref()
    }

    /// The `certonly` invocation that issues this certificate.
    #[must_use]
    pub fn certonly_command(&self) -> CertbotCommand {
        let mut cmd = CertbotCommand::new("certonly");
        if let Some(name) = &self.name {
            cmd = cmd.cert_name(name);
        }
        if let Some(provider) = &self.dns_provider {
            cmd = cmd.dns_provider(provider);
        }
        cmd.domains(self.domains.iter().cloned())
    }
}

impl fmt::Display for DesiredCertificate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{name} ({})", self.domains.join(", ")),
            None => write!(f, "{}", self.domains.join(", ")),
        }
    }
}

/// What has to happen for a certificate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Request the certificate from the CA.
    Issue(DesiredCertificate),
    /// Remove the named certificate.
    Delete(String),
    /// Nothing to do.
    Noop,
}

impl Action {
    /// The certbot invocation for this action; `None` for [`Action::Noop`].
    #[must_use]
    pub fn command(&self) -> Option<CertbotCommand> {
        match self {
            Self::Issue(desired) => Some(desired.certonly_command()),
            Self::Delete(name) => Some(CertbotCommand::new("delete").cert_name(name)),
            Self::Noop => None,
        }
    }
}

/// Decide whether `desired` has to be issued given the observed `inventory`.
#[must_use]
pub fn reconcile(desired: &DesiredCertificate, inventory: &CertificateInventory) -> Action {
    match desired.name() {
        Some(name) if inventory.contains(name) => Action::Noop,
        _ => Action::Issue(desired.clone()),
    }
}

/// Deletion is unconditional: no inventory is consulted.
#[must_use]
pub fn delete(name: &str) -> Action {
    Action::Delete(name.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::certbot::ObservedCertificate;
    use std::path::PathBuf;

    fn desired(name: &str, domains: &[&str]) -> DesiredCertificate {
        DesiredCertificate::new(
            Some(name.to_string()),
            domains.iter().map(|d| (*d).to_string()).collect(),
            None,
        )
        .unwrap()
    }

    fn inventory_with(name: &str) -> CertificateInventory {
        std::iter::once(ObservedCertificate {
            name: name.to_string(),
            fullchain: PathBuf::from(format!("/etc/letsencrypt/live/{name}/fullchain.pem")),
            private_key: PathBuf::from(format!("/etc/letsencrypt/live/{name}/privkey.pem")),
        })
        .collect()
    }

    #[test]
    fn empty_domains_rejected() {
        assert_eq!(
            DesiredCertificate::new(Some("x".to_string()), vec![], None).unwrap_err(),
            CertificateError::NoDomains
        );
    }

    #[test]
    fn absent_certificate_is_issued() {
        let want = desired("example", &["a.com"]);
        let action = reconcile(&want, &CertificateInventory::default());
        assert_eq!(action, Action::Issue(want));
    }

    #[test]
    fn present_certificate_is_noop_even_with_different_domains() {
        let inventory = inventory_with("example");
        let action = reconcile(&desired("example", &["x.com"]), &inventory);
        assert_eq!(action, Action::Noop);
        assert!(action.command().is_none());
    }

    #[test]
    fn other_names_do_not_satisfy() {
        let inventory = inventory_with("other");
        let action = reconcile(&desired("example", &["a.com"]), &inventory);
        assert!(matches!(action, Action::Issue(_)));
    }

    #[test]
    fn unnamed_certificate_is_always_issued() {
        let want = DesiredCertificate::new(None, vec!["a.com".to_string()], None).unwrap();
        let action = reconcile(&want, &inventory_with("a.com"));
        assert_eq!(
            action.command().unwrap().to_string(),
            "certbot certonly -d a.com"
        );
    }

    #[test]
    fn issue_command_shape() {
        let want = DesiredCertificate::new(
            Some("example".to_string()),
            vec!["a.com".to_string(), "b.com".to_string()],
            Some("google".to_string()),
        )
        .unwrap();
        let cmd = reconcile(&want, &CertificateInventory::default())
            .command()
            .unwrap();
        assert_eq!(
            cmd.to_string(),
            "certbot certonly --cert-name example --dns-google -d a.com,b.com"
        );
    }

    #[test]
    fn delete_is_unconditional() {
        let action = delete("missing-cert");
        assert_eq!(action, Action::Delete("missing-cert".to_string()));
        assert_eq!(
            action.command().unwrap().to_string(),
            "certbot delete --cert-name missing-cert"
        );
    }

    #[test]
    fn second_reconcile_after_issue_is_noop() {
        let want = desired("example", &["a.com"]);
        let mut inventory = CertificateInventory::default();

        let first = reconcile(&want, &inventory);
        assert!(matches!(first, Action::Issue(_)));

        inventory.insert(ObservedCertificate {
            name: "example".to_string(),
            fullchain: PathBuf::from("/f"),
            private_key: PathBuf::from("/k"),
        });
        assert_eq!(reconcile(&want, &inventory), Action::Noop);
    }

    #[test]
    fn display_lists_domains() {
        assert_eq!(
            desired("example", &["a.com", "b.com"]).to_string(),
            "example (a.com, b.com)"
        );
    }
}
