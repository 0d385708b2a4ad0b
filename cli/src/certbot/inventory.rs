//! Parsing of `certbot certificates` output into a [`CertificateInventory`].
//!
//! certbot prints one block per certificate with the fields in a stable
//! order, interleaved with other descriptive lines:
//!
//! ```text
//! Found the following certs:
//!   Certificate Name: example.com
//!     Serial Number: 4a1b...
//!     Domains: example.com www.example.com
//!     Expiry Date: 2026-12-01 10:00:00+00:00 (VALID: 43 days)
//!     Certificate Path: /etc/letsencrypt/live/example.com/fullchain.pem
//!     Private Key Path: /etc/letsencrypt/live/example.com/privkey.pem
//! ```
//!
//! Only the three labelled fields matter. Everything else is skipped, and
//! the parser never fails: output it cannot make sense of yields an empty
//! inventory.
use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{Context as _, Result};
use serde::Serialize;

use super::command::CertbotCommand;
use crate::exec::Executor;

const NAME_LABEL: &str = "Certificate Name";
const FULLCHAIN_LABEL: &str = "Certificate Path";
const PRIVATE_KEY_LABEL: &str = "Private Key Path";

/// A complete certificate record reported by certbot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ObservedCertificate {
    /// Certificate lineage name.
    pub name: String,
    /// Path to the full certificate chain.
    pub fullchain: PathBuf,
    /// Path to the private key.
    pub private_key: PathBuf,
}

/// Certificates currently known to certbot on a host, keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CertificateInventory {
    certificates: BTreeMap<String, ObservedCertificate>,
}

impl CertificateInventory {
    /// Parse the stdout of `certbot certificates`.
    #[must_use]
    pub fn parse(output: &str) -> Self {
        let mut parser = Parser::default();
        for line in output.lines() {
            parser.feed(line);
        }
        parser.finish()
    }

    /// Run `certbot certificates` through `executor` and parse its output.
    ///
    /// # Errors
    ///
    /// Returns an error if certbot cannot be run or exits non-zero.
    pub fn fetch(executor: &dyn Executor) -> Result<Self> {
        let result = CertbotCommand::new("certificates")
            .run(executor)
            .context("listing certificates")?;
        Ok(Self::parse(&result.stdout))
    }

    /// Whether a certificate with `name` exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.certificates.contains_key(name)
    }

    /// Look up a certificate by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ObservedCertificate> {
        self.certificates.get(name)
    }

    /// Number of certificates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.certificates.len()
    }

    /// Whether no certificates were found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.certificates.is_empty()
    }

    /// Iterate certificates in name order.
    pub fn iter(&self) -> impl Iterator<Item = &ObservedCertificate> {
        self.certificates.values()
    }

    /// Insert a record, replacing any earlier record with the same name.
    pub fn insert(&mut self, certificate: ObservedCertificate) {
        self.certificates
            .insert(certificate.name.clone(), certificate);
    }
}

impl FromIterator<ObservedCertificate> for CertificateInventory {
    fn from_iter<I: IntoIterator<Item = ObservedCertificate>>(iter: I) -> Self {
        let mut inventory = Self::default();
        for certificate in iter {
            inventory.insert(certificate);
        }
        inventory
    }
}

/// Position within a certificate block.
///
/// Name and fullchain are set independently by their labels; a record is
/// committed at the key line once both have been seen.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ParseState {
    /// No name yet, possibly with a fullchain seen ahead of it.
    AwaitingName { fullchain: Option<PathBuf> },
    /// Name seen, fullchain still missing.
    AwaitingPath { name: String },
    /// Name and fullchain seen.
    AwaitingKey { name: String, fullchain: PathBuf },
}

impl Default for ParseState {
    fn default() -> Self {
        Self::AwaitingName { fullchain: None }
    }
}

/// Line-at-a-time scanner that commits a record on every `Private Key Path`.
#[derive(Debug, Default)]
struct Parser {
    state: ParseState,
    inventory: CertificateInventory,
}

impl Parser {
    fn feed(&mut self, line: &str) {
        let Some((label, value)) = line.split_once(':') else {
            return;
        };
        let value = value.trim();

        match label.trim() {
            NAME_LABEL => {
                let name = value.to_string();
                self.state = match std::mem::take(&mut self.state) {
                    ParseState::AwaitingName {
                        fullchain: Some(fullchain),
                    }
                    | ParseState::AwaitingKey { fullchain, .. } => {
                        ParseState::AwaitingKey { name, fullchain }
                    }
                    ParseState::AwaitingName { fullchain: None }
                    | ParseState::AwaitingPath { .. } => ParseState::AwaitingPath { name },
                };
            }
            FULLCHAIN_LABEL => {
                let fullchain = PathBuf::from(value);
                self.state = match std::mem::take(&mut self.state) {
                    ParseState::AwaitingName { .. } => ParseState::AwaitingName {
                        fullchain: Some(fullchain),
                    },
                    ParseState::AwaitingPath { name } | ParseState::AwaitingKey { name, .. } => {
                        ParseState::AwaitingKey { name, fullchain }
                    }
                };
            }
            PRIVATE_KEY_LABEL => {
                // Every key line ends the block, complete or not.
                if let ParseState::AwaitingKey { name, fullchain } =
                    std::mem::take(&mut self.state)
                {
                    self.inventory.insert(ObservedCertificate {
                        name,
                        fullchain,
                        private_key: PathBuf::from(value),
                    });
                }
            }
            _ => {}
        }
    }

    /// Drop any partial block and return what was committed.
    fn finish(self) -> CertificateInventory {
        self.inventory
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::resources::test_helpers::MockExecutor;
    use std::path::Path;

    const TWO_CERTS: &str = "\
Saving debug log to /var/log/letsencrypt/letsencrypt.log

- - - - - - - - - - - - - - - - - - - - - - - - - - - - - - - - - - - - - - - -
Found the following certs:
  Certificate Name: example.com
    Serial Number: 3f2a
    Key Type: ECDSA
    Domains: example.com www.example.com
    Expiry Date: 2026-12-01 10:00:00+00:00 (VALID: 43 days)
    Certificate Path: /etc/letsencrypt/live/example.com/fullchain.pem
    Private Key Path: /etc/letsencrypt/live/example.com/privkey.pem
  Certificate Name: api
    Serial Number: 9c01
    Domains: api.example.com
    Expiry Date: 2026-11-20 08:00:00+00:00 (VALID: 32 days)
    Certificate Path: /etc/letsencrypt/live/api/fullchain.pem
    Private Key Path: /etc/letsencrypt/live/api/privkey.pem
- - - - - - - - - - - - - - - - - - - - - - - - - - - - - - - - - - - - - - - -
";

    fn block(name: &str, fullchain: &str, key: &str) -> String {
        format!(
            "Certificate Name: {name}\nCertificate Path: {fullchain}\nPrivate Key Path: {key}\n"
        )
    }

    #[test]
    fn parses_real_listing() {
        let inventory = CertificateInventory::parse(TWO_CERTS);
        assert_eq!(inventory.len(), 2);

        let example = inventory.get("example.com").unwrap();
        assert_eq!(
            example.fullchain,
            Path::new("/etc/letsencrypt/live/example.com/fullchain.pem")
        );
        assert_eq!(
            example.private_key,
            Path::new("/etc/letsencrypt/live/example.com/privkey.pem")
        );

        let api = inventory.get("api").unwrap();
        assert_eq!(api.name, "api");
        assert_eq!(api.fullchain, Path::new("/etc/letsencrypt/live/api/fullchain.pem"));
    }

    #[test]
    fn n_blocks_yield_n_entries() {
        let mut output = String::from("header without separator\n\n");
        for i in 0..5 {
            output.push_str(&block(
                &format!("cert{i}"),
                &format!("/live/cert{i}/fullchain.pem"),
                &format!("/live/cert{i}/privkey.pem"),
            ));
            output.push_str("Domains: unrelated.example\n");
        }

        let inventory = CertificateInventory::parse(&output);
        assert_eq!(inventory.len(), 5);
        for i in 0..5 {
            let cert = inventory.get(&format!("cert{i}")).unwrap();
            assert_eq!(cert.fullchain, PathBuf::from(format!("/live/cert{i}/fullchain.pem")));
            assert_eq!(cert.private_key, PathBuf::from(format!("/live/cert{i}/privkey.pem")));
        }
    }

    #[test]
    fn trailing_incomplete_block_is_dropped() {
        let mut output = block("one", "/a/fullchain.pem", "/a/privkey.pem");
        output.push_str("Certificate Name: two\nCertificate Path: /b/fullchain.pem\n");

        let inventory = CertificateInventory::parse(&output);
        assert_eq!(inventory.len(), 1);
        assert!(inventory.contains("one"));
        assert!(!inventory.contains("two"));
    }

    #[test]
    fn duplicate_name_last_wins() {
        let mut output = block("dup", "/first/fullchain.pem", "/first/privkey.pem");
        output.push_str(&block("dup", "/second/fullchain.pem", "/second/privkey.pem"));

        let inventory = CertificateInventory::parse(&output);
        assert_eq!(inventory.len(), 1);
        let cert = inventory.get("dup").unwrap();
        assert_eq!(cert.fullchain, Path::new("/second/fullchain.pem"));
        assert_eq!(cert.private_key, Path::new("/second/privkey.pem"));
    }

    #[test]
    fn empty_and_garbage_output_yield_empty_inventory() {
        assert!(CertificateInventory::parse("").is_empty());
        assert!(CertificateInventory::parse("No certificates found.\n").is_empty());
        assert!(CertificateInventory::parse("\u{0}\u{1}garbage\n---\n").is_empty());
    }

    #[test]
    fn value_keeps_text_after_first_colon() {
        let output = block("c", "C:/certs/fullchain.pem", "C:/certs/privkey.pem");
        let inventory = CertificateInventory::parse(&output);
        assert_eq!(
            inventory.get("c").unwrap().fullchain,
            Path::new("C:/certs/fullchain.pem")
        );
    }

    #[test]
    fn labels_are_case_sensitive() {
        let output = "certificate name: x\ncertificate path: /p\nprivate key path: /k\n";
        assert!(CertificateInventory::parse(output).is_empty());
    }

    #[test]
    fn key_without_name_resets_block() {
        // The key line closes the block even though no name was seen, so
        // the following path does not attach to the next name.
        let output = "\
Certificate Path: /orphan/fullchain.pem
Private Key Path: /orphan/privkey.pem
Certificate Name: real
Certificate Path: /real/fullchain.pem
Private Key Path: /real/privkey.pem
";
        let inventory = CertificateInventory::parse(output);
        assert_eq!(inventory.len(), 1);
        assert_eq!(
            inventory.get("real").unwrap().fullchain,
            Path::new("/real/fullchain.pem")
        );
    }

    #[test]
    fn path_before_name_still_completes_record() {
        let output = "\
Certificate Path: /f
Certificate Name: x
Private Key Path: /k
";
        let inventory = CertificateInventory::parse(output);
        assert_eq!(inventory.len(), 1);
        let cert = inventory.get("x").unwrap();
        assert_eq!(cert.fullchain, Path::new("/f"));
        assert_eq!(cert.private_key, Path::new("/k"));
    }

    #[test]
    fn later_name_replaces_accumulated_name() {
        let output = "\
Certificate Name: abandoned
Certificate Path: /shared/fullchain.pem
Certificate Name: kept
Private Key Path: /kept/privkey.pem
";
        let inventory = CertificateInventory::parse(output);
        assert_eq!(inventory.len(), 1);
        assert!(!inventory.contains("abandoned"));
        assert_eq!(
            inventory.get("kept").unwrap().fullchain,
            Path::new("/shared/fullchain.pem")
        );
    }

    #[test]
    fn later_path_replaces_accumulated_path() {
        let output = "\
Certificate Name: kept
Certificate Path: /old/fullchain.pem
Certificate Path: /new/fullchain.pem
Private Key Path: /kept/privkey.pem
";
        let inventory = CertificateInventory::parse(output);
        assert_eq!(
            inventory.get("kept").unwrap().fullchain,
            Path::new("/new/fullchain.pem")
        );
    }

    #[test]
    fn parser_state_transitions() {
        let mut parser = Parser::default();
        assert_eq!(parser.state, ParseState::default());

        parser.feed("  Certificate Name: a");
        assert_eq!(
            parser.state,
            ParseState::AwaitingPath {
                name: "a".to_string()
            }
        );

        parser.feed("  Domains: a.com");
        parser.feed("  Certificate Path: /a/fullchain.pem");
        assert!(matches!(parser.state, ParseState::AwaitingKey { .. }));

        parser.feed("  Private Key Path: /a/privkey.pem");
        assert_eq!(parser.state, ParseState::AwaitingName { fullchain: None });
        assert_eq!(parser.finish().len(), 1);
    }

    #[test]
    fn path_without_name_waits_for_name() {
        let mut parser = Parser::default();
        parser.feed("Certificate Path: /f");
        assert_eq!(
            parser.state,
            ParseState::AwaitingName {
                fullchain: Some(PathBuf::from("/f"))
            }
        );

        parser.feed("Certificate Name: x");
        assert_eq!(
            parser.state,
            ParseState::AwaitingKey {
                name: "x".to_string(),
                fullchain: PathBuf::from("/f")
            }
        );
    }

    #[test]
    fn fetch_runs_listing_command() {
        let executor = MockExecutor::ok(TWO_CERTS);
        let inventory = CertificateInventory::fetch(&executor).unwrap();
        assert_eq!(inventory.len(), 2);
        assert_eq!(executor.commands(), ["certbot certificates"]);
    }

    #[test]
    fn fetch_propagates_command_failure() {
        let executor = MockExecutor::fail();
        let err = CertificateInventory::fetch(&executor).unwrap_err();
        assert!(err.to_string().contains("listing certificates"));
    }

    #[test]
    fn serializes_as_name_keyed_object() {
        let inventory = CertificateInventory::parse(&block("a", "/f", "/k"));
        let json = serde_json::to_value(&inventory).unwrap();
        assert_eq!(json["a"]["fullchain"], "/f");
        assert_eq!(json["a"]["private_key"], "/k");
    }

    #[test]
    fn collects_from_iterator_last_wins() {
        let inventory: CertificateInventory = [
            ObservedCertificate {
                name: "x".to_string(),
                fullchain: PathBuf::from("/1"),
                private_key: PathBuf::from("/1k"),
            },
            ObservedCertificate {
                name: "x".to_string(),
                fullchain: PathBuf::from("/2"),
                private_key: PathBuf::from("/2k"),
            },
        ]
        .into_iter()
        .collect();
        assert_eq!(inventory.len(), 1);
        assert_eq!(inventory.get("x").unwrap().fullchain, Path::new("/2"));
    }
}
