//! Processing strategy module for batch fee preview
//!
//! This module defines the Strategy pattern for complete preview pipelines,
//! encompassing request parsing, fee computation, and breakdown output.
//! This allows different processing implementations (synchronous,
//! asynchronous batch) to be selected at runtime.
//!
//! Whatever the strategy, the same snapshot and the same calculator run
//! underneath; the end-to-end tests hold both strategies to byte-identical
//! output.

use crate::cli::StrategyType;
use crate::core::engine::RulePolicy;
use crate::core::revenue::RevenueReport;
use crate::core::rule_store::RuleSnapshot;
use std::io::Write;
use std::path::Path;

pub mod r#async;
pub mod sync;

pub use self::r#async::{AsyncProcessingStrategy, BatchConfig};
pub use sync::SyncProcessingStrategy;

/// Processing strategy trait for complete preview pipelines
///
/// Each strategy reads preview requests from a CSV file, computes fee
/// breakdowns against the given snapshot, and writes the breakdown CSV to
/// the provided output.
pub trait ProcessingStrategy: Send + Sync {
    /// Process requests from input file and write breakdowns to output
    ///
    /// # Arguments
    ///
    /// * `snapshot` - The rule snapshot to compute against
    /// * `input_path` - Path to the input CSV file of preview requests
    /// * `output` - Writer for the breakdown CSV
    ///
    /// # Returns
    ///
    /// * `Ok(RevenueReport)` with aggregated revenue if processing
    ///   completed (possibly with recoverable per-row errors)
    /// * `Err(String)` if a fatal error occurred (file not found, I/O
    ///   error, etc.)
    ///
    /// # Errors
    ///
    /// Individual row errors (malformed record, invalid amount, corrupt
    /// rule under fail-closed) are logged to stderr, the row is skipped,
    /// and processing continues; they never fail the pipeline.
    fn process(
        &self,
        snapshot: RuleSnapshot,
        input_path: &Path,
        output: &mut dyn Write,
    ) -> Result<RevenueReport, String>;
}

/// Create a processing strategy based on the specified strategy type
///
/// # Arguments
///
/// * `strategy_type` - The type of processing strategy to create
/// * `policy` - Fail-open/fail-closed handling of corrupt rules
/// * `config` - Optional configuration for async batch processing
///   (ignored for sync)
///
/// # Returns
///
/// A boxed trait object implementing the ProcessingStrategy trait
pub fn create_strategy(
    strategy_type: StrategyType,
    policy: RulePolicy,
    config: Option<BatchConfig>,
) -> Box<dyn ProcessingStrategy> {
    match strategy_type {
        StrategyType::Sync => Box::new(SyncProcessingStrategy::new(policy)),
        StrategyType::Async => {
            let config = config.unwrap_or_default();
            Box::new(AsyncProcessingStrategy::new(policy, config))
        }
    }
}
