//! Train command implementation.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Train command arguments.
#[derive(Parser, Debug)]
#[command(override_usage = "bytebpe train [OPTIONS] [INPUT_FILE] <VOCAB_SIZE> <OUTPUT_MERGES_FILE>")]
pub struct TrainCommand {
    /// [INPUT_FILE] VOCAB_SIZE OUTPUT_MERGES_FILE (input defaults to shakespeare.txt)
    #[arg(value_name = "ARGS", num_args = 2..=3, required = true, allow_negative_numbers = true)]
    pub args: Vec<String>,

    /// Pair selection strategy
    #[arg(long, value_enum, default_value_t = StrategyArg::Incremental)]
    pub strategy: StrategyArg,

    /// Count pairs in parallel
    #[arg(long, default_value_t = false)]
    pub parallel: bool,

    /// Output format (inferred from the file extension if omitted)
    #[arg(long)]
    pub format: Option<ModelFormat>,
}

/// Training strategy flag values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
    /// Count once, then update only what each merge touched
    Incremental,
    /// Recount every pair before every merge
    FullRescan,
}

impl From<StrategyArg> for TrainingStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Incremental => TrainingStrategy::Incremental,
            StrategyArg::FullRescan => TrainingStrategy::FullRescan,
        }
    }
}

/// Positional arguments after defaulting and validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainArgs {
    pub input: PathBuf,
    pub vocab_size: usize,
    pub output: PathBuf,
}

impl TrainCommand {
    /// Resolve `[input] vocab_size output`.
    pub fn resolve(&self) -> AnyhowResult<TrainArgs> {
        let (input, vocab_size, output) = match self.args.as_slice() {
            [vocab_size, output] => {
                log::info!("Input file not specified, defaulting to '{}'", DEFAULT_INPUT);
                (DEFAULT_INPUT, vocab_size, output)
            }
            [input, vocab_size, output] => (input.as_str(), vocab_size, output),
            _ => bail!("Usage: bytebpe train [<input_file>] <vocab_size> <output_merges_file>"),
        };

        let vocab_size: i64 = vocab_size
            .trim()
            .parse()
            .with_context(|| format!("Invalid vocab_size '{}'. Must be an integer.", vocab_size))?;

        Ok(TrainArgs {
            input: PathBuf::from(input),
            // Negative sizes learn nothing, same as any size <= 256.
            vocab_size: usize::try_from(vocab_size).unwrap_or(0),
            output: PathBuf::from(output),
        })
    }
}

use super::{read_input, DEFAULT_INPUT};
use anyhow::{bail, Context, Result as AnyhowResult};
use bytebpe_tokenizer::{ModelFormat, Tokenizer, TrainingStrategy};
use std::time::Instant;

pub fn run(cmd: TrainCommand) -> AnyhowResult<()> {
    let args = cmd.resolve()?;
    let format = cmd
        .format
        .unwrap_or_else(|| ModelFormat::from_path(&args.output));

    log::info!("Training tokenizer...");
    log::info!("  Input: {}", args.input.display());
    log::info!("  Output: {} ({})", args.output.display(), format);
    log::info!("  Vocab size: {}", args.vocab_size);
    log::info!("  Strategy: {:?}", cmd.strategy);
    log::info!("  Parallel: {}", cmd.parallel);

    let data = read_input(&args.input)?;

    let mut tokenizer = Tokenizer::builder()
        .vocab_size(args.vocab_size)
        .parallel(cmd.parallel)
        .strategy(cmd.strategy.into())
        .build();

    let start = Instant::now();
    tokenizer.train(&data);
    log::info!(
        "Training completed in {:.2}s, final vocab size: {}",
        start.elapsed().as_secs_f64(),
        tokenizer.vocab_size()
    );

    tokenizer
        .save(&args.output, format)
        .with_context(|| format!("Cannot save merges to {}", args.output.display()))?;
    log::info!("Training complete. Merges saved to {}", args.output.display());

    Ok(())
}
