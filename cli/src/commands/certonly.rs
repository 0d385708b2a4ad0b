use std::sync::Arc;

use anyhow::Result;

use crate::cli::{CertonlyOpts, GlobalOpts};
use crate::error::DeployError;
use crate::logging::Logger;
use crate::operations;
use crate::reconcile::{Action, DesiredCertificate};

/// Run the certonly command.
///
/// # Errors
///
/// Returns an error if no domains were given, or if listing or issuing fails.
pub fn run(global: &GlobalOpts, opts: &CertonlyOpts, log: &Arc<Logger>) -> Result<()> {
    let desired = DesiredCertificate::new(
        opts.cert_name.clone(),
        opts.domains.clone(),
        opts.dns.clone(),
    )
    .map_err(DeployError::from)?;
    let ctx = super::context(global, log, false)?;

    log.stage(&format!("Ensuring certificate {desired}"));
    if operations::certonly(&ctx, &desired)? == Action::Noop {
        log.info("certificate already present");
    }
    Ok(())
}
