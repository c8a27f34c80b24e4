use std::path::PathBuf;

use clap::{Parser, Subcommand};

use shino::engine::Strategy;

#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command
}

#[derive(Subcommand)]
pub enum Command {
    /// Parse sentences and print their trees
    Parse {
        /// File containing the grammar
        file: PathBuf,

        /// Sentence to parse (default: each line of stdin)
        sentence: Option<String>,

        /// Parsing strategy
        #[arg(short = 'S', long, value_enum, default_value_t = Strategy::TopDown)]
        strategy: Strategy,

        /// Start symbol (default: S)
        #[arg(short, long, value_name = "SYMBOL")]
        start: Option<String>
    },

    /// Generate random sentences
    Generate {
        /// File containing the grammar
        file: PathBuf,

        /// Start symbol (default: S)
        #[arg(short, long, value_name = "SYMBOL")]
        start: Option<String>,

        /// Amount to generate (default: 1)
        #[arg(short = 'n', long, value_name = "AMOUNT")]
        amount: Option<u32>,

        /// Seed for reproducible output
        #[arg(long)]
        seed: Option<u64>
    },

    /// Load a grammar, print it back and report undefined nonterminals
    Check {
        /// File containing the grammar
        file: PathBuf
    }
}
