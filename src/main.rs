mod commands;
mod config;
mod error;
mod listing;
mod notify;
mod page;
mod source;
mod telemetry;
mod tracker;
mod watcher;

use std::process::ExitCode;

use clap::{Parser, Subcommand};

use commands::check::CheckArgs;
use commands::watch::WatchArgs;

#[derive(Debug, Parser)]
#[command(
    name = "mercwatch",
    version,
    about = "Watch party finder listings and announce new merc runs"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Poll the listings page and post new merc runs to Discord
    Watch(WatchArgs),
    /// Fetch once and print the listings that would be announced
    Check(CheckArgs),
}

impl Commands {
    const fn name(&self) -> &'static str {
        match self {
            Self::Watch(_) => "watch",
            Self::Check(_) => "check",
        }
    }
}

fn main() -> ExitCode {
    telemetry::init();

    let cli = Cli::parse();

    let _span = tracing::info_span!("command", name = cli.command.name()).entered();

    let result = match cli.command {
        Commands::Watch(args) => args.execute(),
        Commands::Check(args) => args.execute(),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if let Some(exit_err) = e.downcast_ref::<error::ExitError>() {
                eprintln!("error: {exit_err}");
                exit_err.exit_code()
            } else {
                eprintln!("error: {e:#}");
                ExitCode::FAILURE
            }
        }
    }
}
