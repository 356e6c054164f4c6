use anyhow::Result;
use clap::{Parser, Subcommand};
use dictcol_column::ScanStrategy;

mod commands;
mod utils;

#[derive(Parser)]
#[command(name = "dictcol-cmd")]
#[command(about = "Command-line utility for dictionary-encoded string columns")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a column file (one row per line) and write its text dump
    Encode {
        /// Source column file
        #[arg(short, long)]
        file: String,

        /// Output dump file
        #[arg(short, long)]
        output: String,

        /// Number of encoding workers (defaults to the available parallelism)
        #[arg(short, long)]
        workers: Option<usize>,
    },

    /// Find the rows holding a value
    Exact {
        /// Column dump produced by `encode`
        dump_path: String,

        /// Value to look up
        term: String,

        /// Compare strategy: auto, scalar or vectorized
        #[arg(short, long, default_value = "auto")]
        strategy: ScanStrategy,
    },

    /// Find the values starting with a prefix, with their rows
    Prefix {
        /// Column dump produced by `encode`
        dump_path: String,

        /// Byte prefix (must not be empty)
        prefix: String,

        /// Compare strategy: auto, scalar or vectorized
        #[arg(short, long, default_value = "auto")]
        strategy: ScanStrategy,
    },

    /// Time the scalar, vectorized and raw row-scan lookups against each other
    Bench {
        /// Source column file
        #[arg(short, long)]
        file: String,

        /// Number of encoding workers (defaults to the available parallelism)
        #[arg(short, long)]
        workers: Option<usize>,

        /// Value for the exact lookup (defaults to the first row)
        #[arg(long)]
        term: Option<String>,

        /// Prefix for the prefix lookup (defaults to the first byte of the first row)
        #[arg(long)]
        prefix: Option<String>,

        /// Number of timed repetitions of every lookup
        #[arg(long, default_value_t = 10)]
        iterations: u32,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Encode {
            file,
            output,
            workers,
        } => commands::encode::run(file, output, workers),
        Commands::Exact {
            dump_path,
            term,
            strategy,
        } => commands::query::run_exact(dump_path, term, strategy),
        Commands::Prefix {
            dump_path,
            prefix,
            strategy,
        } => commands::query::run_prefix(dump_path, prefix, strategy),
        Commands::Bench {
            file,
            workers,
            term,
            prefix,
            iterations,
        } => commands::bench::run(file, workers, term, prefix, iterations),
    }
}
