//! Named tasks run in order by the `apply` command.
pub mod certificates;
pub mod context;
pub mod provision;

pub use context::Context;

use anyhow::Result;

use crate::logging::TaskStatus;

/// Outcome of a task that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskResult {
    /// Task completed (whether or not anything changed).
    Ok,
    /// Task had nothing to do, with a reason.
    Skipped(String),
    /// Task only logged what it would have done.
    DryRun,
}

/// A named, executable task.
pub trait Task: Send + Sync {
    /// Human-readable task name.
    fn name(&self) -> &'static str;

    /// Whether this task has anything to do for the loaded configuration.
    fn should_run(&self, ctx: &Context) -> bool;

    /// Whether a failure of this task stops every task after it.
    fn is_prerequisite(&self) -> bool {
        false
    }

    /// Execute the task.
    ///
    /// # Errors
    ///
    /// Returns an error if a certbot or package manager command fails.
    fn run(&self, ctx: &Context) -> Result<TaskResult>;
}

/// The tasks run by `apply`, in execution order.
#[must_use]
pub fn all_apply_tasks() -> Vec<Box<dyn Task>> {
    vec![
        Box::new(provision::ProvisionCertbot),
        Box::new(certificates::EnsureCertificates),
        Box::new(certificates::RemoveCertificates),
    ]
}

/// Execute tasks in order, stopping after a failed prerequisite.
///
/// Returns `false` if the run was cut short.
pub fn execute_all<'a>(tasks: impl IntoIterator<Item = &'a dyn Task>, ctx: &Context) -> bool {
    for task in tasks {
        if execute(task, ctx) == TaskStatus::Failed && task.is_prerequisite() {
            ctx.log
                .error(&format!("{} failed, not running remaining tasks", task.name()));
            return false;
        }
    }
    true
}

/// Execute a task, recording the result in the logger.
pub fn execute(task: &dyn Task, ctx: &Context) -> TaskStatus {
    if !task.should_run(ctx) {
        ctx.log
            .debug(&format!("skipping task: {} (nothing configured)", task.name()));
        ctx.log.record_task(
            task.name(),
            TaskStatus::Skipped,
            Some("nothing configured"),
        );
        return TaskStatus::Skipped;
    }

    ctx.log.stage(task.name());

    match task.run(ctx) {
        Ok(TaskResult::Ok) => {
            ctx.log.record_task(task.name(), TaskStatus::Ok, None);
            TaskStatus::Ok
        }
        Ok(TaskResult::Skipped(reason)) => {
            ctx.log.info(&format!("skipped: {reason}"));
            ctx.log
                .record_task(task.name(), TaskStatus::Skipped, Some(&reason));
            TaskStatus::Skipped
        }
        Ok(TaskResult::DryRun) => {
            ctx.log.record_task(task.name(), TaskStatus::DryRun, None);
            TaskStatus::DryRun
        }
        Err(e) => {
            ctx.log.error(&format!("{}: {e:#}", task.name()));
            ctx.log
                .record_task(task.name(), TaskStatus::Failed, Some(&format!("{e:#}")));
            TaskStatus::Failed
        }
    }
}
