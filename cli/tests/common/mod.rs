// Shared helpers for integration tests.
//
// Provides a scripted executor standing in for the host and a temp-dir
// backed configuration file, so each test binary that declares `mod common;`
// can drive operations without running certbot.
#![allow(dead_code, clippy::expect_used)]

use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use certbot_deploy::config::Config;
use certbot_deploy::exec::{ExecResult, Executor};
use certbot_deploy::logging::Logger;
use certbot_deploy::tasks::Context;

/// Listing with a single certificate called `example`.
pub const EXAMPLE_LISTING: &str = "\
Saving debug log to /var/log/letsencrypt/letsencrypt.log

- - - - - - - - - - - - - - - - - - - - - - - - - - - - - - - - - - - - - - - -
Found the following certs:
  Certificate Name: example
    Serial Number: 3a1b2c
    Key Type: RSA
    Domains: a.com b.com
    Expiry Date: 2026-12-01 10:00:00+00:00 (VALID: 42 days)
    Certificate Path: /etc/letsencrypt/live/example/fullchain.pem
    Private Key Path: /etc/letsencrypt/live/example/privkey.pem
- - - - - - - - - - - - - - - - - - - - - - - - - - - - - - - - - - - - - - - -
";

/// Executor that replays canned responses and records each command line.
///
/// Responses are consumed in order; once exhausted every call fails.
#[derive(Debug, Default)]
pub struct ScriptedExecutor {
    responses: Mutex<VecDeque<(bool, String)>>,
    on_path: Vec<String>,
    commands: Mutex<Vec<String>>,
}

impl ScriptedExecutor {
    pub fn new(responses: &[(bool, &str)]) -> Self {
        Self {
            responses: Mutex::new(
                responses
                    .iter()
                    .map(|(ok, out)| (*ok, (*out).to_string()))
                    .collect(),
            ),
            ..Self::default()
        }
    }

    /// Report `programs` as installed.
    pub fn on_path(mut self, programs: &[&str]) -> Self {
        self.on_path = programs.iter().map(|p| (*p).to_string()).collect();
        self
    }

    pub fn commands(&self) -> Vec<String> {
        self.commands.lock().expect("commands lock").clone()
    }

    fn next(&self, program: &str, args: &[&str]) -> (bool, String) {
        let mut line = vec![program];
        line.extend_from_slice(args);
        self.commands
            .lock()
            .expect("commands lock")
            .push(line.join(" "));
        self.responses
            .lock()
            .expect("responses lock")
            .pop_front()
            .unwrap_or((false, String::new()))
    }
}

impl Executor for ScriptedExecutor {
    fn run(&self, program: &str, args: &[&str]) -> anyhow::Result<ExecResult> {
        let (success, stdout) = self.next(program, args);
        anyhow::ensure!(success, "{program} failed");
        Ok(ExecResult {
            stdout,
            stderr: String::new(),
            success,
            code: Some(0),
        })
    }

    fn run_unchecked(&self, program: &str, args: &[&str]) -> anyhow::Result<ExecResult> {
        let (success, stdout) = self.next(program, args);
        Ok(ExecResult {
            stdout,
            stderr: String::new(),
            success,
            code: Some(i32::from(!success)),
        })
    }

    fn which(&self, program: &str) -> bool {
        self.on_path.iter().any(|p| p == program)
    }
}

/// Build a context whose logger writes nowhere.
pub fn context(
    config: Config,
    executor: ScriptedExecutor,
    dry_run: bool,
) -> (Context, Arc<ScriptedExecutor>, Arc<Logger>) {
    let executor = Arc::new(executor);
    let log = Arc::new(Logger::with_log_file(None));
    let ctx = Context::new(config, log.clone(), executor.clone(), dry_run);
    (ctx, executor, log)
}

/// Write `content` as a configuration file in a fresh temp dir.
pub fn write_config(content: &str) -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("certificates.toml");
    std::fs::write(&path, content).expect("write config");
    (dir, path)
}
