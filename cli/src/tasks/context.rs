use std::sync::Arc;

use crate::config::Config;
use crate::exec::Executor;
use crate::logging::Log;

/// Shared context for operations and tasks.
pub struct Context {
    /// Desired certificates loaded from the configuration file.
    pub config: Config,
    /// Logger for output and task recording.
    pub log: Arc<dyn Log>,
    /// Command executor for the target host.
    pub executor: Arc<dyn Executor>,
    /// Whether to perform a dry run (preview changes without applying).
    pub dry_run: bool,
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("config", &self.config)
            .field("log", &"<dyn Log>")
            .field("executor", &self.executor)
            .field("dry_run", &self.dry_run)
            .finish()
    }
}

impl Context {
    /// Creates a new context.
    #[must_use]
    pub fn new(
        config: Config,
        log: Arc<dyn Log>,
        executor: Arc<dyn Executor>,
        dry_run: bool,
    ) -> Self {
        Self {
            config,
            log,
            executor,
            dry_run,
        }
    }

    /// The executor as a trait object reference.
    #[must_use]
    pub fn executor(&self) -> &dyn Executor {
        self.executor.as_ref()
    }
}
