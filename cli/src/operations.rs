//! The automation surface: provisioning certbot and managing certificates.
//!
//! Each operation runs at most one state-changing command and propagates
//! command failures unchanged. Nothing is retried and no inventory is cached
//! between calls.
use anyhow::Result;

use crate::certbot::CertificateInventory;
use crate::platform::PackageFamily;
use crate::reconcile::{self, Action, DesiredCertificate};
use crate::resources::package::PackageResource;
use crate::resources::{Applicable, Resource, ResourceChange};
use crate::tasks::Context;

/// Distribution package that provides the certbot binary.
pub const CERTBOT_PACKAGE: &str = "certbot";

/// Install certbot if it is missing.
///
/// # Errors
///
/// Fails with [`ProvisionError`](crate::error::ProvisionError) on RPM hosts
/// (not implemented) and on hosts with no recognised package family, and
/// propagates package manager failures.
pub fn provision(ctx: &Context) -> Result<ResourceChange> {
    let family = PackageFamily::detect(ctx.executor());
    ctx.log.debug(&format!("package family: {family}"));

    let manager = family.package_manager(CERTBOT_PACKAGE)?;
    let resource = PackageResource::new(CERTBOT_PACKAGE.to_string(), manager, ctx.executor());

    if !resource.needs_change()? {
        ctx.log
            .debug(&format!("{} already installed", resource.description()));
        return Ok(ResourceChange::AlreadyCorrect);
    }

    if ctx.dry_run {
        ctx.log
            .dry_run(&format!("would install {}", resource.description()));
        return Ok(ResourceChange::DryRun);
    }

    ctx.log.info(&format!("installing {}", resource.description()));
    resource.apply()
}

/// Certificates certbot currently knows about on the host.
///
/// # Errors
///
/// Returns an error if `certbot certificates` cannot be run.
pub fn certificates(ctx: &Context) -> Result<CertificateInventory> {
    let inventory = CertificateInventory::fetch(ctx.executor())?;
    ctx.log
        .debug(&format!("certbot reports {} certificate(s)", inventory.len()));
    Ok(inventory)
}

/// Issue `desired` unless a certificate with its name already exists.
///
/// Fetches a fresh inventory for the decision.
///
/// # Errors
///
/// Returns an error if listing or issuing fails.
pub fn certonly(ctx: &Context, desired: &DesiredCertificate) -> Result<Action> {
    let inventory = certificates(ctx)?;
    ensure(ctx, desired, &inventory)
}

/// Issue `desired` unless it is already in `inventory`.
///
/// # Errors
///
/// Returns an error if issuing fails.
pub fn ensure(
    ctx: &Context,
    desired: &DesiredCertificate,
    inventory: &CertificateInventory,
) -> Result<Action> {
    let action = reconcile::reconcile(desired, inventory);
    if action == Action::Noop {
        ctx.log.debug(&format!("{desired} already present"));
    }
    execute(ctx, &action)?;
    Ok(action)
}

/// Delete the certificate called `name`, whether or not certbot has it.
///
/// # Errors
///
/// Returns an error if `certbot delete` fails.
pub fn delete(ctx: &Context, name: &str) -> Result<Action> {
    let action = reconcile::delete(name);
    execute(ctx, &action)?;
    Ok(action)
}

/// Run the certbot command for `action`, or log it in dry-run mode.
///
/// # Errors
///
/// Propagates the executor's error unchanged.
pub fn execute(ctx: &Context, action: &Action) -> Result<ResourceChange> {
    let Some(cmd) = action.command() else {
        return Ok(ResourceChange::AlreadyCorrect);
    };

    if ctx.dry_run {
        ctx.log.dry_run(&format!("would run {cmd}"));
        return Ok(ResourceChange::DryRun);
    }

    ctx.log.info(&format!("running {cmd}"));
    cmd.run(ctx.executor())?;
    Ok(ResourceChange::Applied)
}
