//! Idempotent certbot certificate lifecycle management.
//!
//! Decides whether a certificate must be issued or deleted by comparing the
//! desired certificate with certbot's own `certificates` listing, then runs
//! the matching certbot command.
//!
//! - **[`certbot`]**: command builder and inventory parser for the certbot CLI
//! - **[`reconcile`]**: desired certificate vs. observed inventory
//! - **[`platform`]** and **[`resources`]**: package family detection and the
//!   certbot package install
//! - **[`operations`]**: provision, certonly, delete and certificates
//! - **[`config`]** and **[`tasks`]**: declarative `apply` from a TOML file
//! - **[`commands`]**: subcommand orchestration
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod certbot;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod exec;
pub mod logging;
pub mod operations;
pub mod platform;
pub mod reconcile;
pub mod resources;
pub mod tasks;
