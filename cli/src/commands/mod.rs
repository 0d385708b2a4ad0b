//! Top-level subcommand orchestration.
pub mod apply;
pub mod certificates;
pub mod certonly;
pub mod delete;
pub mod provision;
pub mod version;

use std::sync::Arc;

use anyhow::{Context as _, Result};

use crate::cli::GlobalOpts;
use crate::config::Config;
use crate::error::DeployError;
use crate::exec::SystemExecutor;
use crate::logging::Logger;
use crate::tasks::{self, Context, Task};

/// Build the operation context for a command run on the local host.
///
/// The configuration file is only read when `load_config` is set; ad-hoc
/// commands work without one.
///
/// # Errors
///
/// Returns an error if the configuration file exists but cannot be loaded.
pub fn context(global: &GlobalOpts, log: &Arc<Logger>, load_config: bool) -> Result<Context> {
    let config = if load_config {
        log.stage("Loading configuration");
        let config = Config::load(&global.config)
            .map_err(DeployError::from)
            .with_context(|| format!("loading {}", global.config.display()))?;
        log.info(&format!(
            "loaded {} certificate(s) from {}",
            config.certificates.len(),
            global.config.display()
        ));
        config
    } else {
        Config::default()
    };

    Ok(Context::new(
        config,
        log.clone(),
        Arc::new(SystemExecutor),
        global.dry_run,
    ))
}

/// Execute tasks in order, print the summary, and bail if any task failed.
///
/// # Errors
///
/// Returns an error if one or more tasks recorded a failure.
pub fn run_tasks_to_completion<'a>(
    tasks: impl IntoIterator<Item = &'a dyn Task>,
    ctx: &Context,
    log: &Logger,
) -> Result<()> {
    let completed = tasks::execute_all(tasks, ctx);

    log.print_summary();

    let count = log.failure_count();
    if !completed {
        anyhow::bail!("aborted after {count} failed task(s)");
    }
    if count > 0 {
        anyhow::bail!("{count} task(s) failed");
    }
    Ok(())
}
