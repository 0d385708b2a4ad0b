//! The certbot command-line contract: building invocations and reading the
//! `certificates` listing back.
pub mod command;
pub mod inventory;

pub use command::{CERTBOT, CertbotCommand};
pub use inventory::{CertificateInventory, ObservedCertificate};
