use std::sync::Arc;

use anyhow::Result;

use crate::certbot::CertificateInventory;
use crate::cli::{CertificatesOpts, GlobalOpts};
use crate::logging::Logger;
use crate::operations;

/// Run the certificates command.
///
/// # Errors
///
/// Returns an error if `certbot certificates` fails or the inventory cannot
/// be serialized.
#[allow(clippy::print_stdout)]
pub fn run(global: &GlobalOpts, opts: &CertificatesOpts, log: &Arc<Logger>) -> Result<()> {
    let ctx = super::context(global, log, false)?;
    let inventory = operations::certificates(&ctx)?;

    let output = if opts.json {
        serde_json::to_string_pretty(&inventory)?
    } else {
        render(&inventory)
    };
    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}

/// One `name fullchain private-key` line per certificate, ordered by name.
#[must_use]
pub fn render(inventory: &CertificateInventory) -> String {
    inventory
        .iter()
        .map(|cert| {
            format!(
                "{} {} {}",
                cert.name,
                cert.fullchain.display(),
                cert.private_key.display()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
