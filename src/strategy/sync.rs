//! Synchronous processing strategy
//!
//! Single-threaded implementation of the ProcessingStrategy trait. It
//! orchestrates the pipeline by coordinating between the SyncReader (CSV
//! input), PreviewEngine (fee computation), and csv_format (output),
//! keeping each concern in its own module.
//!
//! # Memory Efficiency
//!
//! Requests stream through one at a time; only the output rows are
//! buffered, since the breakdown CSV is written in one pass at the end.

use crate::core::engine::{PreviewEngine, RulePolicy};
use crate::core::revenue::RevenueReport;
use crate::core::rule_store::RuleSnapshot;
use crate::io::csv_format::write_breakdowns_csv;
use crate::io::sync_reader::SyncReader;
use crate::strategy::ProcessingStrategy;
use std::io::Write;
use std::path::Path;

/// Synchronous processing strategy
///
/// # Examples
///
/// ```no_run
/// use dinary_fees::core::engine::RulePolicy;
/// use dinary_fees::core::rule_store::RuleSnapshot;
/// use dinary_fees::strategy::{ProcessingStrategy, SyncProcessingStrategy};
/// use std::path::Path;
/// use std::io;
///
/// let strategy = SyncProcessingStrategy::new(RulePolicy::FailClosed);
/// let mut output = io::stdout();
///
/// strategy.process(RuleSnapshot::default(), Path::new("requests.csv"), &mut output)
///     .expect("Processing failed");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SyncProcessingStrategy {
    policy: RulePolicy,
}

impl SyncProcessingStrategy {
    /// Create a strategy with the given rule policy
    pub fn new(policy: RulePolicy) -> Self {
        Self { policy }
    }
}

impl ProcessingStrategy for SyncProcessingStrategy {
    /// Process requests from input file and write breakdowns to output
    ///
    /// 1. Creates a SyncReader to stream request records from the CSV file
    /// 2. Creates a PreviewEngine over the snapshot
    /// 3. Iterates through records, previewing each through the engine
    /// 4. Writes the breakdown rows in input order
    ///
    /// # Error Handling
    ///
    /// Fatal errors (file not found, I/O errors) are returned immediately.
    /// Individual row errors are logged to stderr and the row is skipped.
    fn process(
        &self,
        snapshot: RuleSnapshot,
        input_path: &Path,
        output: &mut dyn Write,
    ) -> Result<RevenueReport, String> {
        let mut engine = PreviewEngine::new(snapshot, self.policy);

        let reader = SyncReader::new(input_path)?;

        let mut rows = Vec::new();
        for result in reader {
            match result {
                Ok(request) => match engine.preview(&request) {
                    Ok(breakdown) => rows.push((request, breakdown)),
                    Err(e) => {
                        // The row is blocked, not silently zeroed
                        eprintln!("Fee computation error: {}", e);
                    }
                },
                Err(e) => {
                    eprintln!("CSV parsing error: {}", e);
                }
            }
        }

        write_breakdowns_csv(&rows, output)?;

        Ok(engine.revenue_report())
    }
}
