use std::sync::Arc;

use anyhow::Result;

use crate::cli::{DeleteOpts, GlobalOpts};
use crate::logging::Logger;
use crate::operations;

/// Run the delete command.
///
/// # Errors
///
/// Returns an error if `certbot delete` fails, including when certbot does
/// not know the certificate.
pub fn run(global: &GlobalOpts, opts: &DeleteOpts, log: &Arc<Logger>) -> Result<()> {
    let ctx = super::context(global, log, false)?;

    log.stage(&format!("Deleting certificate {}", opts.cert_name));
    operations::delete(&ctx, &opts.cert_name)?;
    Ok(())
}
