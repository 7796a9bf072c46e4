//! Skirmish CLI - run, watch and validate skirmish games.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

mod cli;

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Skirmish - a fog-of-war grid skirmish engine
#[derive(Parser, Debug)]
#[command(name = "skirmish")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Raise log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Play a game on a map to completion
    Run {
        /// Map file
        #[arg(required = true)]
        map: PathBuf,

        #[command(flatten)]
        game: cli::GameArgs,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,

        /// Print the map after every turn
        #[arg(long)]
        show: bool,
    },

    /// Interactive TUI to watch a game in real-time
    Watch {
        /// Map file
        #[arg(required = true)]
        map: PathBuf,

        #[command(flatten)]
        game: cli::GameArgs,

        /// Turn delay in milliseconds (default: 300)
        #[arg(long, default_value = "300")]
        speed: u64,
    },

    /// Check a map file
    Validate {
        /// Map file to validate
        #[arg(required = true)]
        map: PathBuf,
    },

    /// Serve the sample bot over stdin/stdout, one JSON message per line
    Bot,
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let args = Args::parse();

    // The TUI owns the terminal; log lines would corrupt it.
    if !matches!(args.command, Commands::Watch { .. }) {
        init_tracing(args.verbose);
    }

    let result = match args.command {
        Commands::Run {
            map,
            game,
            format,
            show,
        } => cli::run::execute(&map, &game, format, show).map(cli::status_code),

        Commands::Watch { map, game, speed } => cli::watch::execute(&map, &game, speed).map(cli::status_code),

        Commands::Validate { map } => cli::validate::execute(&map).map(|()| ExitCode::SUCCESS),

        Commands::Bot => cli::serve::execute().map(|()| ExitCode::SUCCESS),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(cli::ERROR_EXIT)
        }
    }
}
