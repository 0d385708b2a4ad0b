//! Task summary records and the [`Log`] sink that tasks write to.

/// One line of the end-of-run summary.
#[derive(Debug, Clone)]
pub struct TaskEntry {
    /// Task name as shown in the stage header.
    pub name: String,
    /// How the task ended.
    pub status: TaskStatus,
    /// Skip reason or error text.
    pub message: Option<String>,
}

/// How a task ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    /// Ran and applied its changes.
    Ok,
    /// Nothing configured, or the host already matched.
    Skipped,
    /// Changes were only logged.
    DryRun,
    /// Returned an error.
    Failed,
}

impl TaskStatus {
    /// Summary mark and the ANSI colour it is printed in.
    pub(super) const fn mark(self) -> (&'static str, &'static str) {
        match self {
            Self::Ok => ("✓", "\x1b[32m"),
            Self::Skipped => ("○", "\x1b[33m"),
            Self::DryRun => ("~", "\x1b[37m"),
            Self::Failed => ("✗", "\x1b[31m"),
        }
    }
}

/// Where tasks and commands send their output.
///
/// [`Logger`](super::Logger) turns each call into a tracing event; task tests
/// record the calls instead.
pub trait Log: Send + Sync {
    /// Start of a task or command phase.
    fn stage(&self, msg: &str);
    /// Progress line.
    fn info(&self, msg: &str);
    /// Detail kept in the log file, shown on the console with `--verbose`.
    fn debug(&self, msg: &str);
    /// Warning.
    fn warn(&self, msg: &str);
    /// Error.
    fn error(&self, msg: &str);
    /// A command that would have run without `--dry-run`.
    fn dry_run(&self, msg: &str);
    /// Add a task outcome to the summary.
    fn record_task(&self, name: &str, status: TaskStatus, message: Option<&str>);
}
