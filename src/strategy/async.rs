//! Asynchronous batch processing strategy
//!
//! Multi-threaded implementation of the ProcessingStrategy trait. Requests
//! are read in batches and fanned out across worker tasks.
//!
//! # Architecture
//!
//! ```text
//! AsyncProcessingStrategy
//!     ├── BatchConfig (batch_size, max_concurrent_batches)
//!     ├── AsyncReader (batch CSV reading)
//!     ├── BatchProcessor (contiguous-chunk fan-out)
//!     └── AsyncPreviewEngine (shared snapshot + concurrent revenue)
//! ```
//!
//! # Parallelism
//!
//! The engine is a pure function over an immutable snapshot, so requests
//! can be computed in any order; chunks exist only to spread work across
//! threads. Batches are processed sequentially and chunks joined in order,
//! which keeps output rows in input order without any coordination.

use crate::core::engine::RulePolicy;
use crate::core::r#async::{AsyncPreviewEngine, BatchProcessor};
use crate::core::revenue::RevenueReport;
use crate::core::rule_store::RuleSnapshot;
use crate::io::async_reader::AsyncReader;
use crate::io::csv_format::write_breakdowns_csv;
use crate::strategy::ProcessingStrategy;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

/// Configuration for batch processing
///
/// Controls how requests are batched and the number of worker threads for
/// parallel processing within each batch.
#[derive(Clone, Debug)]
pub struct BatchConfig {
    /// Number of requests per batch
    pub batch_size: usize,
    /// Maximum number of chunks processing concurrently within a batch
    pub max_concurrent_batches: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            batch_size: 1000,
            max_concurrent_batches: num_cpus::get(),
        }
    }
}

impl BatchConfig {
    /// Create a new BatchConfig with custom values
    ///
    /// Zero values are invalid; they fall back to the defaults with a
    /// warning on stderr rather than failing the run.
    pub fn new(batch_size: usize, max_concurrent_batches: usize) -> Self {
        let default = Self::default();

        let batch_size = if batch_size == 0 {
            eprintln!(
                "Warning: Invalid batch_size ({}), using default ({})",
                batch_size, default.batch_size
            );
            default.batch_size
        } else {
            batch_size
        };

        let max_concurrent_batches = if max_concurrent_batches == 0 {
            eprintln!(
                "Warning: Invalid max_concurrent_batches ({}), using default ({})",
                max_concurrent_batches, default.max_concurrent_batches
            );
            default.max_concurrent_batches
        } else {
            max_concurrent_batches
        };

        Self {
            batch_size,
            max_concurrent_batches,
        }
    }
}

/// Asynchronous batch processing strategy
///
/// Uses thread-safe components internally (Arc-wrapped AsyncPreviewEngine
/// with DashMap revenue state) and a tokio multi-threaded runtime sized to
/// the configured concurrency.
#[derive(Debug, Clone)]
pub struct AsyncProcessingStrategy {
    policy: RulePolicy,
    config: BatchConfig,
}

impl AsyncProcessingStrategy {
    /// Create a new AsyncProcessingStrategy
    ///
    /// # Arguments
    ///
    /// * `policy` - Fail-open/fail-closed handling of corrupt rules
    /// * `config` - BatchConfig with batch_size and max_concurrent_batches
    pub fn new(policy: RulePolicy, config: BatchConfig) -> Self {
        Self { policy, config }
    }
}

impl ProcessingStrategy for AsyncProcessingStrategy {
    /// Process requests from input file and write breakdowns to output
    ///
    /// 1. Creates the shared AsyncPreviewEngine over the snapshot
    /// 2. Creates a tokio multi-threaded runtime
    /// 3. Reads requests in batches from CSV using AsyncReader
    /// 4. Fans each batch out across worker tasks, collecting results in
    ///    input order
    /// 5. Writes all breakdown rows at the end
    ///
    /// # Error Handling
    ///
    /// Fatal errors (file not found, runtime errors) are returned
    /// immediately. Per-row errors are logged to stderr and the row is
    /// skipped, identically to the sync strategy.
    fn process(
        &self,
        snapshot: RuleSnapshot,
        input_path: &Path,
        output: &mut dyn Write,
    ) -> Result<RevenueReport, String> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(self.config.max_concurrent_batches)
            .build()
            .map_err(|e| format!("Failed to create tokio runtime: {}", e))?;

        runtime.block_on(async {
            let engine = Arc::new(AsyncPreviewEngine::new(snapshot, self.policy));
            let processor = BatchProcessor::new(Arc::clone(&engine));

            let file = tokio::fs::File::open(input_path)
                .await
                .map_err(|e| format!("Failed to open file '{}': {}", input_path.display(), e))?;

            // Wrap tokio file in a compatibility layer for csv-async
            let compat_file = tokio_util::compat::TokioAsyncReadCompatExt::compat(file);

            let mut reader = AsyncReader::new(compat_file);
            let mut rows = Vec::new();

            loop {
                let batch = reader.read_batch(self.config.batch_size).await;
                if batch.is_empty() {
                    break;
                }

                let results = processor
                    .process_batch(batch, self.config.max_concurrent_batches)
                    .await;

                for processed in results {
                    match processed.result {
                        Ok(breakdown) => rows.push((processed.record, breakdown)),
                        Err(e) => eprintln!("Fee computation error: {}", e),
                    }
                }
            }

            write_breakdowns_csv(&rows, output)?;

            Ok(engine.revenue_report())
        })
    }
}
