//! Replay Chunker - Entry Point
//!
//! Splits a decoded replay JSON file into metadata, goals, player stats,
//! and fixed-size frame chunk documents.

use clap::{Args, Parser, Subcommand};
use replay_chunker::core::error::Result;
use replay_chunker::core::PartitionConfig;
use replay_chunker::pipeline::{inspect_file, split_file};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Split replay documents into batch-sized JSON artifacts
#[derive(Parser, Debug)]
#[command(name = "replay-chunker", version)]
#[command(about = "Split a decoded replay into metadata, goals, player stats, and frame chunks")]
struct Cli {
    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Partition a replay file and write every artifact
    Split {
        #[command(flatten)]
        common: CommonArgs,

        /// Directory to write artifacts into
        #[arg(long, short = 'o')]
        out: Option<PathBuf>,

        /// Prefix for every artifact file name
        #[arg(long)]
        prefix: Option<String>,

        /// Prefix artifact names with the replay's match id
        #[arg(long)]
        prefix_match_id: bool,

        /// Indent frame chunks instead of writing them compact
        #[arg(long)]
        pretty_chunks: bool,
    },
    /// Print how a replay file would be partitioned without writing anything
    Inspect {
        #[command(flatten)]
        common: CommonArgs,
    },
}

#[derive(Args, Debug)]
struct CommonArgs {
    /// Decoded replay JSON file
    input: PathBuf,

    /// Maximum frames per chunk
    #[arg(long, short = 'n')]
    chunk_size: Option<usize>,

    /// TOML config file; flags override its values
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "replay_chunker=debug"
    } else {
        "replay_chunker=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Split {
            common,
            out,
            prefix,
            prefix_match_id,
            pretty_chunks,
        } => {
            let mut config = base_config(common.config.as_deref(), common.chunk_size)?;
            if let Some(out) = out {
                config.output_dir = out;
            }
            if prefix.is_some() {
                config.prefix = prefix;
            }
            config.prefix_with_match_id |= prefix_match_id;
            config.pretty_chunks |= pretty_chunks;

            let names = split_file(&common.input, &config)?;
            for name in &names {
                println!("{}", config.output_dir.join(name).display());
            }
        }
        Command::Inspect { common } => {
            let config = base_config(common.config.as_deref(), common.chunk_size)?;
            let summary = inspect_file(&common.input, config.chunk_size)?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }
    Ok(())
}

/// Config file (or defaults) with the chunk size flag applied on top
fn base_config(path: Option<&Path>, chunk_size: Option<usize>) -> Result<PartitionConfig> {
    let mut config = match path {
        Some(path) => PartitionConfig::load(path)?,
        None => PartitionConfig::default(),
    };
    if let Some(chunk_size) = chunk_size {
        config.chunk_size = chunk_size;
    }
    config.validate()?;
    Ok(config)
}
