use std::sync::Arc;

use anyhow::Result;

use crate::cli::{ApplyOpts, GlobalOpts};
use crate::logging::Logger;
use crate::tasks::{self, Task};

/// Run the apply command.
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded or any task fails.
pub fn run(global: &GlobalOpts, opts: &ApplyOpts, log: &Arc<Logger>) -> Result<()> {
    log.info(&format!("certbot-deploy {}", super::version::version()));
    let ctx = super::context(global, log, true)?;

    let all_tasks = tasks::all_apply_tasks();
    let tasks_to_run = filter_tasks(&all_tasks, opts);

    super::run_tasks_to_completion(tasks_to_run, &ctx, log)
}

/// Select tasks by `--only`, then `--skip` (case-insensitive substring match).
#[must_use]
pub fn filter_tasks<'a>(all_tasks: &'a [Box<dyn Task>], opts: &ApplyOpts) -> Vec<&'a dyn Task> {
    all_tasks
        .iter()
        .filter(|t| {
            let name = t.name().to_lowercase();
            if !opts.only.is_empty() {
                return opts.only.iter().any(|o| name.contains(&o.to_lowercase()));
            }
            if !opts.skip.is_empty() {
                return !opts.skip.iter().any(|s| name.contains(&s.to_lowercase()));
            }
            true
        })
        .map(AsRef::as_ref)
        .collect()
}
