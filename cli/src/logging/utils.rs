//! Log file location, escape stripping and timestamps.
use std::ffi::OsString;
use std::fs;
use std::path::PathBuf;

/// Timestamp written in the log file header.
pub(super) const HEADER_STAMP: &str = "%Y-%m-%d %H:%M:%S";
/// Timestamp prefixed to every log file line.
pub(super) const LINE_STAMP: &str = "%H:%M:%S";

/// Remove terminal escape sequences so the log file stays plain text.
///
/// A CSI sequence (`ESC [` ... final byte in `@`..=`~`) is dropped whole; any
/// other escape drops the byte that follows it.
pub(super) fn strip_ansi(s: &str) -> String {
    #[derive(Clone, Copy)]
    enum Scan {
        Text,
        Escape,
        Csi,
    }

    let mut out = String::with_capacity(s.len());
    let mut scan = Scan::Text;
    for c in s.chars() {
        scan = match (scan, c) {
            (Scan::Text, '\x1b') => Scan::Escape,
            (Scan::Text, _) => {
                out.push(c);
                Scan::Text
            }
            (Scan::Escape, '[') => Scan::Csi,
            (Scan::Escape, _) | (Scan::Csi, '@'..='~') => Scan::Text,
            (Scan::Csi, _) => Scan::Csi,
        };
    }
    out
}

/// Directory holding per-command logs, given the cache and home variables.
fn log_dir_from(xdg_cache: Option<OsString>, home: Option<OsString>) -> PathBuf {
    let cache = xdg_cache
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(|| home.map(|h| PathBuf::from(h).join(".cache")))
        .unwrap_or_else(std::env::temp_dir);
    cache.join("certbot-deploy")
}

/// Path of the log for `command`, creating its directory.
///
/// `None` when the directory cannot be created; logging then stays on the
/// console only.
pub(super) fn log_file_path(command: &str) -> Option<PathBuf> {
    let dir = log_dir_from(std::env::var_os("XDG_CACHE_HOME"), std::env::var_os("HOME"));
    fs::create_dir_all(&dir).ok()?;
    Some(dir.join(format!("{command}.log")))
}

/// Current UTC time rendered with `format`.
pub(super) fn timestamp(format: &str) -> String {
    chrono::Utc::now().format(format).to_string()
}
