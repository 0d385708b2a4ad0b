use std::sync::Arc;

use anyhow::Result;

use crate::cli::GlobalOpts;
use crate::logging::Logger;
use crate::operations;
use crate::resources::ResourceChange;

/// Run the provision command.
///
/// # Errors
///
/// Returns an error if the host has no supported install path or the
/// package manager fails.
pub fn run(global: &GlobalOpts, log: &Arc<Logger>) -> Result<()> {
    let ctx = super::context(global, log, false)?;

    log.stage("Provisioning certbot");
    match operations::provision(&ctx)? {
        ResourceChange::Applied => log.info("certbot installed"),
        ResourceChange::AlreadyCorrect => log.info("certbot already installed"),
        ResourceChange::DryRun => {}
    }
    Ok(())
}
