use anyhow::{Result, bail};

use super::{Context, Task, TaskResult};
use crate::operations;
use crate::reconcile::Action;

/// Issue every configured certificate certbot does not have yet.
///
/// The inventory is listed once and shared by all entries.
#[derive(Debug)]
pub struct EnsureCertificates;

impl Task for EnsureCertificates {
    fn name(&self) -> &'static str {
        "Ensure certificates"
    }

    fn should_run(&self, ctx: &Context) -> bool {
        ctx.config.present().next().is_some()
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        let inventory = operations::certificates(ctx)?;

        let mut issued = 0usize;
        let mut failed = 0usize;
        let mut total = 0usize;
        for desired in ctx.config.present() {
            total += 1;
            match operations::ensure(ctx, desired, &inventory) {
                Ok(Action::Noop) => {}
                Ok(_) => issued += 1,
                Err(e) => {
                    ctx.log.error(&format!("{desired}: {e:#}"));
                    failed += 1;
                }
            }
        }

        if failed > 0 {
            bail!("{failed} of {total} certificate(s) failed to issue");
        }
        Ok(outcome(ctx, issued, "all certificates already present"))
    }
}

/// Delete every certificate configured with `state = "absent"`.
///
/// Deletion is unconditional: a name certbot no longer knows fails.
#[derive(Debug)]
pub struct RemoveCertificates;

impl Task for RemoveCertificates {
    fn name(&self) -> &'static str {
        "Remove certificates"
    }

    fn should_run(&self, ctx: &Context) -> bool {
        ctx.config.absent().next().is_some()
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        let mut deleted = 0usize;
        let mut failed = 0usize;
        for name in ctx.config.absent() {
            match operations::delete(ctx, name) {
                Ok(_) => deleted += 1,
                Err(e) => {
                    ctx.log.error(&format!("{name}: {e:#}"));
                    failed += 1;
                }
            }
        }

        if failed > 0 {
            bail!("{failed} of {} certificate(s) failed to delete", deleted + failed);
        }
        Ok(outcome(ctx, deleted, "nothing to delete"))
    }
}

fn outcome(ctx: &Context, changed: usize, idle: &str) -> TaskResult {
    if changed == 0 {
        TaskResult::Skipped(idle.to_string())
    } else if ctx.dry_run {
        TaskResult::DryRun
    } else {
        ctx.log.info(&format!("{changed} certificate(s) changed"));
        TaskResult::Ok
    }
}
