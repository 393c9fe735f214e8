use clap::{Parser, Subcommand};

#[derive(Parser, Debug, Clone)]
#[command(name = "dtree", version, about = "Decision tree validation tool")]
pub struct Cli {
    /// Emit JSON output on stdout.
    #[arg(long, global = true)]
    pub json: bool,

    /// Reject inputs larger than this many bytes.
    #[arg(long, global = true, default_value_t = dtree_core::config::DEFAULT_MAX_JSON_BYTES)]
    pub max_bytes: usize,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Validate a decision tree document and report the result.
    Validate {
        /// Input path, or `-` for stdin.
        input: String,

        /// Write the sanitized tree to this path.
        #[arg(long)]
        out: Option<String>,
    },

    /// Print the content fingerprint of a valid decision tree.
    Fingerprint {
        /// Input path, or `-` for stdin.
        input: String,
    },

    /// List accepted node and edge kinds.
    Kinds,
}
