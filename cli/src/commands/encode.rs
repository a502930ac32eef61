//! Encode command implementation.

use clap::Parser;
use std::path::PathBuf;

/// Encode command arguments.
#[derive(Parser, Debug)]
#[command(override_usage = "bytebpe encode [OPTIONS] [INPUT_FILE] <MERGES_FILE>")]
pub struct EncodeCommand {
    /// [INPUT_FILE] MERGES_FILE (input defaults to shakespeare.txt)
    #[arg(value_name = "ARGS", num_args = 1..=2, required = true)]
    pub args: Vec<String>,

    /// Merges file format (inferred from the file extension if omitted)
    #[arg(long)]
    pub format: Option<ModelFormat>,

    /// Output file (stdout if not specified)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Positional arguments after defaulting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeArgs {
    pub input: PathBuf,
    pub merges: PathBuf,
}

impl EncodeCommand {
    /// Resolve `[input] merges`.
    pub fn resolve(&self) -> AnyhowResult<EncodeArgs> {
        let (input, merges) = match self.args.as_slice() {
            [merges] => {
                log::info!("Input file not specified, defaulting to '{}'", DEFAULT_INPUT);
                (DEFAULT_INPUT, merges.as_str())
            }
            [input, merges] => (input.as_str(), merges.as_str()),
            _ => bail!("Usage: bytebpe encode [<input_file>] <merges_file>"),
        };

        Ok(EncodeArgs {
            input: PathBuf::from(input),
            merges: PathBuf::from(merges),
        })
    }
}

use super::{read_input, DEFAULT_INPUT};
use anyhow::{bail, Context, Result as AnyhowResult};
use bytebpe_tokenizer::{ModelFormat, Tokenizer};

pub fn run(cmd: EncodeCommand) -> AnyhowResult<()> {
    let args = cmd.resolve()?;
    let format = cmd
        .format
        .unwrap_or_else(|| ModelFormat::from_path(&args.merges));

    let tokenizer = Tokenizer::load(&args.merges, format)
        .with_context(|| format!("Cannot load merges from {}", args.merges.display()))?;

    let data = read_input(&args.input)?;

    log::info!("Starting encoding...");
    let encoding = tokenizer.encode(&data);
    log::info!(
        "Encoding finished: {} bytes -> {} tokens",
        data.len(),
        encoding.len()
    );

    match &cmd.output {
        Some(path) => {
            std::fs::write(path, format!("{encoding}\n"))
                .with_context(|| format!("Cannot write output to {}", path.display()))?;
            log::info!("Encoded {} tokens to {}", encoding.len(), path.display());
        }
        None => {
            println!("{encoding}");
        }
    }

    Ok(())
}
