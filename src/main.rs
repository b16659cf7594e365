mod artifact;
mod cli;
mod commands;
mod config;
mod engine;
mod fetch;
mod paths;
mod privilege;
mod resource;
mod runlog;
mod ui;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::generate;
use cli::{Cli, Command};
use std::io;

/// Global context for the application
pub struct Context {
    pub verbose: u8,
    pub quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let log_level = match cli.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter_level(if cli.quiet {
            log::LevelFilter::Error
        } else {
            log_level
        })
        .format_timestamp(None)
        .init();

    let ctx = Context {
        verbose: cli.verbose,
        quiet: cli.quiet,
    };

    match cli.command {
        Command::Apply(args) => commands::apply::run(&ctx, args),
        Command::Status(args) => {
            let compliant = commands::status::run(&ctx, &args)?;
            if !compliant {
                std::process::exit(1);
            }
            Ok(())
        }
        Command::Zones(args) => commands::zones::run(&ctx, &args),
        Command::Bootstrap(args) => {
            let code = commands::bootstrap::run(&ctx, args)?;
            if code != 0 {
                std::process::exit(code);
            }
            Ok(())
        }
        Command::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "zonectl", &mut io::stdout());
            Ok(())
        }
    }
}
