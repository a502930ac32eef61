//! bytebpe CLI - Command-line interface for the byte-level BPE tokenizer.
//!
//! This is the main entry point for the `bytebpe` command-line tool.

mod commands;

use clap::{ArgAction, Parser, Subcommand};
use commands::{EncodeCommand, TrainCommand};
use env_logger::Env;
use log::LevelFilter;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "bytebpe")]
#[command(about = "Byte-level BPE: learn merge rules and encode text", long_about = None)]
#[command(version)]
struct Cli {
    /// Increase verbosity (-v, -vv)
    #[arg(short = 'v', long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Decrease verbosity (-q, -qq)
    #[arg(short = 'q', long, global = true, action = ArgAction::Count)]
    quiet: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Learn merge rules from a text file
    Train(TrainCommand),
    /// Encode a text file to token IDs
    Encode(EncodeCommand),
}

fn init_logging(verbose: u8, quiet: u8) {
    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or("info"));
    builder.format_timestamp_millis();

    // Explicit flags win over RUST_LOG.
    if verbose > 0 || quiet > 0 {
        let level = match quiet {
            0 => match verbose {
                1 => LevelFilter::Debug,
                _ => LevelFilter::Trace,
            },
            1 => LevelFilter::Warn,
            _ => LevelFilter::Error,
        };
        builder.filter_level(level);
    }

    let _ = builder.try_init();
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            // Usage errors exit 1; --help and --version exit 0.
            return if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    init_logging(cli.verbose, cli.quiet);

    let result = match cli.command {
        Commands::Train(cmd) => commands::train::run(cmd),
        Commands::Encode(cmd) => commands::encode::run(cmd),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
