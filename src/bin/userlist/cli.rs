use clap::{Parser, Subcommand};

/// CLI for the userlist record store
#[derive(Parser, Debug)]
#[command(name = "userlist", version, about = "userlist record store CLI")]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Cmd,
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }
}

#[derive(Subcommand, Debug)]
pub enum Cmd {
    /// Run the reference call sequence (insert, find, update, delete, delete all)
    ///
    /// Store settings come from UL_* env vars, e.g.:
    ///   UL_MATCH_MODE=exact userlist demo
    Demo {
        /// JSON output (single object with every step)
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Concurrent randomized workload, then verify the length invariant
    Stress {
        #[arg(long, default_value_t = 4)]
        threads: usize,
        /// Operations per thread
        #[arg(long, default_value_t = 10_000)]
        ops: usize,
        /// Distinct names in play (smaller => more duplicates and prefix hits)
        #[arg(long, default_value_t = 64)]
        keys: usize,
        #[arg(long, default_value_t = 0x5EED)]
        seed: u64,
        /// Cap the store; inserts beyond it fail with an allocation error
        #[arg(long)]
        max_records: Option<usize>,
        /// Hold the lock across update's scan and insert fallback
        #[arg(long, default_value_t = false)]
        atomic_upsert: bool,
        /// Exact name matching instead of prefix matching
        #[arg(long, default_value_t = false)]
        exact: bool,
        /// JSON summary
        #[arg(long, default_value_t = false)]
        json: bool,
        /// Print progress of the first worker
        #[arg(long, default_value_t = false)]
        progress: bool,
    },
}
