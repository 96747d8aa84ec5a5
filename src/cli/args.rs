use crate::core::engine::RulePolicy;
use crate::strategy::BatchConfig;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Compute commission fee breakdowns for a batch of transactions
#[derive(Parser, Debug)]
#[command(name = "dinary-fees")]
#[command(about = "Compute commission fee breakdowns against an admin rule export", long_about = None)]
pub struct CliArgs {
    /// Input CSV file path containing preview requests
    #[arg(value_name = "INPUT", help = "Path to the input CSV file of requests")]
    pub input_file: PathBuf,

    /// Commission rule export to compute against
    #[arg(
        long = "rules",
        value_name = "RULES",
        help = "Path to the commission rules CSV export"
    )]
    pub rules_file: PathBuf,

    /// Optional referral rule export
    #[arg(
        long = "referral-rules",
        value_name = "REFERRALS",
        help = "Path to the referral rules CSV export (optional)"
    )]
    pub referral_rules_file: Option<PathBuf>,

    /// Parsing strategy to use for processing requests
    #[arg(
        long = "strategy",
        value_name = "STRATEGY",
        default_value = "async",
        help = "Parsing strategy: 'sync' for synchronous or 'async' for asynchronous"
    )]
    pub strategy: StrategyType,

    /// Number of requests per batch (async mode only)
    #[arg(
        long = "batch-size",
        value_name = "SIZE",
        help = "Number of requests per batch (default: 1000)"
    )]
    pub batch_size: Option<usize>,

    /// Maximum number of concurrent chunks (async mode only)
    #[arg(
        long = "max-concurrent",
        value_name = "COUNT",
        help = "Maximum number of chunks processing concurrently (default: CPU cores)"
    )]
    pub max_concurrent_batches: Option<usize>,

    /// Treat corrupt rules as unpriced instead of blocking the row
    #[arg(
        long = "fail-open",
        help = "Degrade invalid rules to zero commission instead of blocking the transaction"
    )]
    pub fail_open: bool,

    /// Print a revenue summary to stderr after processing
    #[arg(long = "report", help = "Print aggregated revenue to stderr")]
    pub report: bool,
}

/// Available parsing strategies for CSV processing
#[derive(Clone, Debug, ValueEnum)]
pub enum StrategyType {
    Sync,
    Async,
}

impl CliArgs {
    /// Create a BatchConfig from CLI arguments
    ///
    /// Uses CLI values where provided, falling back to defaults otherwise.
    /// Invalid values are handled by `BatchConfig::new`, which warns on
    /// stderr and substitutes defaults.
    ///
    /// # Returns
    ///
    /// A `BatchConfig` with values from CLI arguments or defaults.
    pub fn to_batch_config(&self) -> BatchConfig {
        if self.batch_size.is_some() || self.max_concurrent_batches.is_some() {
            let default = BatchConfig::default();
            BatchConfig::new(
                self.batch_size.unwrap_or(default.batch_size),
                self.max_concurrent_batches
                    .unwrap_or(default.max_concurrent_batches),
            )
        } else {
            BatchConfig::default()
        }
    }

    /// The rule policy selected by the --fail-open flag
    pub fn rule_policy(&self) -> RulePolicy {
        if self.fail_open {
            RulePolicy::FailOpen
        } else {
            RulePolicy::FailClosed
        }
    }
}
