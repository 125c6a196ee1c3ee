use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "premsel",
    about = "Premsel: premise selection over TPTP corpora, scored against prover ground truth",
    version
)]
pub struct Cli {
    /// Path to premsel.toml (missing file means defaults)
    #[arg(long, global = true, default_value = crate::config::DEFAULT_CONFIG_PATH)]
    pub config: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse a problem file and its includes into a corpus
    Parse {
        /// Root problem file
        problem: String,

        /// Corpus root for include resolution (overrides config)
        #[arg(long)]
        root: Option<String>,

        /// List every formula, not just counts
        #[arg(long)]
        list: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Rank a problem's premises against its conjecture
    Select {
        /// Root problem file
        problem: String,

        /// Corpus root for include resolution (overrides config)
        #[arg(long)]
        root: Option<String>,

        /// Number of premises to keep (overrides config)
        #[arg(long)]
        k: Option<usize>,

        /// Write the reduced problem (top-k premises + goal) to this path
        #[arg(long)]
        emit_problem: Option<String>,

        /// Run the configured prover on the reduced problem
        #[arg(long)]
        prove: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Extract the verdict from saved prover output (`-` for stdin)
    Extract {
        /// File holding prover stdout
        input: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run the prover on one problem file
    Prove {
        /// Problem file
        problem: String,

        /// Corpus root exported as TPTP (overrides config)
        #[arg(long)]
        root: Option<String>,

        /// Prover binary (overrides config)
        #[arg(long)]
        binary: Option<String>,

        /// Prover cpu limit in seconds (overrides config)
        #[arg(long)]
        cpu_limit: Option<u64>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Prove every problem under a directory and write a JSONL dataset
    Generate {
        /// Directory searched recursively for problem files
        #[arg(long)]
        problems: Option<String>,

        /// Problem file extension
        #[arg(long, default_value = "p")]
        extension: String,

        /// Output dataset path (overrides config)
        #[arg(long)]
        output: Option<String>,

        /// Append to the dataset instead of replacing it
        #[arg(long)]
        append: bool,

        /// Concurrent prover processes (overrides config)
        #[arg(long)]
        workers: Option<usize>,

        /// Prover binary (overrides config)
        #[arg(long)]
        binary: Option<String>,

        /// Prover cpu limit in seconds (overrides config)
        #[arg(long)]
        cpu_limit: Option<u64>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Summarise a JSONL dataset
    Inspect {
        /// Dataset path (defaults to the configured batch output)
        dataset: Option<String>,

        /// Solved problems shown as samples
        #[arg(long, default_value_t = 3)]
        samples: usize,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Score the selector against the premises proofs actually used
    Evaluate {
        /// Dataset path (defaults to the configured batch output)
        dataset: Option<String>,

        /// Corpus root for include resolution (overrides config)
        #[arg(long)]
        root: Option<String>,

        /// Cutoffs for recall@k and success@k (repeatable; defaults to the configured k)
        #[arg(long = "k")]
        ks: Vec<usize>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write a default premsel.toml
    Init {
        /// Directory to initialize
        #[arg(default_value = ".")]
        path: String,

        /// Overwrite an existing premsel.toml
        #[arg(long)]
        force: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
