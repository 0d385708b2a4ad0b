use std::sync::Arc;

use anyhow::Result;
use clap::{CommandFactory, Parser};

use certbot_deploy::cli::{Cli, Command};
use certbot_deploy::commands;
use certbot_deploy::logging::{self, Logger};

fn main() -> Result<()> {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = Cli::parse();

    match args.command {
        Command::Completions { shell } => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "certbot-deploy",
                &mut std::io::stdout(),
            );
            return Ok(());
        }
        Command::Version => {
            commands::version::run();
            return Ok(());
        }
        _ => {}
    }

    let name = args.command.name();
    logging::init_subscriber(args.verbose, name);
    let log = Arc::new(Logger::new(name));

    match &args.command {
        Command::Provision => commands::provision::run(&args.global, &log),
        Command::Certonly(opts) => commands::certonly::run(&args.global, opts, &log),
        Command::Delete(opts) => commands::delete::run(&args.global, opts, &log),
        Command::Certificates(opts) => commands::certificates::run(&args.global, opts, &log),
        Command::Apply(opts) => commands::apply::run(&args.global, opts, &log),
        Command::Completions { .. } | Command::Version => Ok(()),
    }
}
