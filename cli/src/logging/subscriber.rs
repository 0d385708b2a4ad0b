//! Tracing output: console rendering and the per-command log file.
use std::fs;
use std::io::Write as _;
use std::path::Path;
use std::sync::Mutex;

use tracing::Level;

use super::utils::{HEADER_STAMP, LINE_STAMP, log_file_path, strip_ansi, timestamp};

/// Target for stage header events.
pub(super) const STAGE_TARGET: &str = "certbot_deploy::stage";
/// Target for dry-run events.
pub(super) const DRY_RUN_TARGET: &str = "certbot_deploy::dry_run";

/// Collects the `message` field of an event.
#[derive(Default)]
struct MessageField(String);

impl tracing::field::Visit for MessageField {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.0 = format!("{value:?}");
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.0 = value.to_string();
        }
    }
}

fn message_of(event: &tracing::Event<'_>) -> String {
    let mut field = MessageField::default();
    event.record(&mut field);
    field.0
}

/// Render one event as a log file line, without the timestamp.
fn file_line(level: Level, target: &str, msg: &str) -> String {
    let msg = strip_ansi(msg);
    match (level, target) {
        (Level::INFO, STAGE_TARGET) => format!("==> {msg}"),
        (Level::INFO, DRY_RUN_TARGET) => format!("    [dry run] {msg}"),
        (Level::ERROR, _) => format!("    [error] {msg}"),
        (Level::WARN, _) => format!("    [warn] {msg}"),
        (Level::DEBUG, _) => format!("    [debug] {msg}"),
        _ => format!("    {msg}"),
    }
}

fn run_header() -> String {
    let version = option_env!("CERTBOT_DEPLOY_VERSION")
        .unwrap_or(concat!("dev-", env!("CARGO_PKG_VERSION")));
    let rule = "=".repeat(42);
    format!(
        "{rule}\ncertbot-deploy {version} {}\n{rule}\n",
        timestamp(HEADER_STAMP)
    )
}

/// Writes every event at `DEBUG` and above to the command's log file.
///
/// The file is truncated on each run, so it only ever holds the latest
/// invocation of that command.
#[derive(Debug)]
pub(super) struct FileLayer {
    file: Mutex<fs::File>,
}

impl FileLayer {
    /// Layer for `<cache>/certbot-deploy/<command>.log`.
    pub(super) fn new(command: &str) -> Option<Self> {
        Self::at(&log_file_path(command)?)
    }

    /// Layer writing to `path`, starting with a run header.
    ///
    /// `None` if the file cannot be written.
    pub(super) fn at(path: &Path) -> Option<Self> {
        fs::write(path, run_header()).ok()?;
        let file = fs::OpenOptions::new().append(true).open(path).ok()?;
        Some(Self {
            file: Mutex::new(file),
        })
    }
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for FileLayer {
    fn on_event(
        &self,
        event: &tracing::Event<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let metadata = event.metadata();
        let line = file_line(*metadata.level(), metadata.target(), &message_of(event));
        if let Ok(mut f) = self.file.lock() {
            writeln!(f, "[{}] {line}", timestamp(LINE_STAMP)).ok();
        }
    }
}

/// Coloured console output: `==>` for stages, indented progress lines.
struct ConsoleFormatter;

impl<S, N> tracing_subscriber::fmt::FormatEvent<S, N> for ConsoleFormatter
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
    N: for<'a> tracing_subscriber::fmt::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &tracing_subscriber::fmt::FmtContext<'_, S, N>,
        mut writer: tracing_subscriber::fmt::format::Writer<'_>,
        event: &tracing::Event<'_>,
    ) -> std::fmt::Result {
        let target = event.metadata().target();
        let msg = message_of(event);

        match *event.metadata().level() {
            Level::ERROR => writeln!(writer, "\x1b[31mERROR\x1b[0m {msg}"),
            Level::WARN => writeln!(writer, "\x1b[33mWARN\x1b[0m  {msg}"),
            Level::INFO if target == STAGE_TARGET => {
                writeln!(writer, "\x1b[1;34m==>\x1b[0m \x1b[1m{msg}\x1b[0m")
            }
            Level::INFO if target == DRY_RUN_TARGET => {
                writeln!(writer, "  \x1b[33m[DRY RUN]\x1b[0m {msg}")
            }
            Level::INFO => writeln!(writer, "  {msg}"),
            _ => writeln!(writer, "  \x1b[2m{msg}\x1b[0m"),
        }
    }
}

/// Install the global subscriber for `command`.
///
/// Warnings and errors go to stderr, everything else to stdout. Debug lines
/// reach the console only when `verbose` is set but always reach the log
/// file. Call once, before the first log line.
pub fn init_subscriber(verbose: bool, command: &str) {
    use tracing_subscriber::fmt::writer::MakeWriterExt as _;
    use tracing_subscriber::{
        Layer as _, filter::LevelFilter, fmt, layer::SubscriberExt as _,
        util::SubscriberInitExt as _,
    };

    let console_filter = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    let writer = std::io::stderr
        .with_max_level(Level::WARN)
        .and(std::io::stdout.with_min_level(Level::INFO));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .event_format(ConsoleFormatter)
                .with_writer(writer)
                .with_filter(console_filter),
        )
        .with(FileLayer::new(command).map(|l| l.with_filter(LevelFilter::DEBUG)))
        .init();
}
