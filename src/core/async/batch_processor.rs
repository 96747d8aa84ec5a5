//! Batch fan-out for async fee preview
//!
//! The engine is a pure function over an immutable snapshot, so unlike a
//! stateful ledger there is no ordering constraint to protect: requests are
//! split into contiguous chunks purely for parallelism. Joining the chunk
//! tasks in order reassembles results in input order, which the output CSV
//! must preserve.

use std::sync::Arc;

use super::AsyncPreviewEngine;
use crate::types::{FeeBreakdown, FeeError, PreviewRequest};

/// Result of processing a single preview request
#[derive(Debug, Clone)]
pub struct ProcessingResult {
    /// The request that was processed
    pub record: PreviewRequest,

    /// The computed breakdown, or the error that blocked the row
    pub result: Result<FeeBreakdown, FeeError>,
}

/// Chunked batch processor over a shared preview engine
#[derive(Debug, Clone)]
pub struct BatchProcessor {
    /// Thread-safe preview engine
    ///
    /// Wrapped in Arc to enable sharing across async tasks.
    engine: Arc<AsyncPreviewEngine>,
}

impl BatchProcessor {
    /// Create a new BatchProcessor
    pub fn new(engine: Arc<AsyncPreviewEngine>) -> Self {
        Self { engine }
    }

    /// Split a batch into at most `chunk_count` contiguous chunks
    ///
    /// Chunks are contiguous runs of the input, so concatenating them in
    /// order reproduces the original sequence exactly.
    fn chunk_batch(
        batch: Vec<PreviewRequest>,
        chunk_count: usize,
    ) -> Vec<Vec<PreviewRequest>> {
        let chunk_count = chunk_count.max(1);
        let chunk_size = batch.len().div_ceil(chunk_count).max(1);

        let mut chunks = Vec::new();
        let mut batch = batch.into_iter().peekable();
        while batch.peek().is_some() {
            chunks.push(batch.by_ref().take(chunk_size).collect());
        }
        chunks
    }

    /// Process a batch of requests across parallel worker tasks
    ///
    /// Each chunk runs on its own tokio task against the shared engine;
    /// results come back in input order.
    ///
    /// # Arguments
    ///
    /// * `batch` - Preview requests in input order
    /// * `max_concurrent` - Upper bound on parallel chunks
    ///
    /// # Guarantees
    ///
    /// - Every request appears in exactly one result, in input order
    /// - Per-row errors are captured in the result, never lost, and do not
    ///   stop the rest of the batch
    pub async fn process_batch(
        &self,
        batch: Vec<PreviewRequest>,
        max_concurrent: usize,
    ) -> Vec<ProcessingResult> {
        let chunks = Self::chunk_batch(batch, max_concurrent);

        let handles: Vec<_> = chunks
            .into_iter()
            .map(|chunk| {
                let engine = Arc::clone(&self.engine);
                tokio::spawn(async move {
                    chunk
                        .into_iter()
                        .map(|record| {
                            let result = engine.preview(&record);
                            ProcessingResult { record, result }
                        })
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut results = Vec::new();
        for handle in handles {
            match handle.await {
                Ok(chunk_results) => results.extend(chunk_results),
                Err(e) => eprintln!("Worker task failed: {}", e),
            }
        }
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::engine::RulePolicy;
    use crate::core::rule_store::RuleSnapshot;
    use crate::types::{ActionType, Audience, CalculationMode, CommissionRule, FeeDirection};
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn snapshot() -> RuleSnapshot {
        RuleSnapshot::new(
            vec![CommissionRule {
                id: "r1".to_string(),
                action: ActionType::SendMoney,
                target: Audience::User,
                mode: CalculationMode::Fixed,
                value: dec("10"),
                min_amount: None,
                max_amount: None,
                is_active: true,
                updated_at: 1,
            }],
            Vec::new(),
        )
    }

    fn request(amount: i64) -> PreviewRequest {
        PreviewRequest {
            action: ActionType::SendMoney,
            target: Audience::User,
            amount: Decimal::from(amount),
            direction: FeeDirection::AddOnTop,
        }
    }

    #[tokio::test]
    async fn test_batch_preserves_input_order() {
        let engine = Arc::new(AsyncPreviewEngine::new(snapshot(), RulePolicy::FailClosed));
        let processor = BatchProcessor::new(engine);

        let batch: Vec<_> = (1..=20).map(request).collect();
        let results = processor.process_batch(batch, 4).await;

        assert_eq!(results.len(), 20);
        for (i, result) in results.iter().enumerate() {
            assert_eq!(result.record.amount, Decimal::from(i as i64 + 1));
        }
    }

    #[tokio::test]
    async fn test_row_errors_do_not_stop_the_batch() {
        let engine = Arc::new(AsyncPreviewEngine::new(snapshot(), RulePolicy::FailClosed));
        let processor = BatchProcessor::new(engine);

        let batch = vec![request(100), request(-1), request(200)];
        let results = processor.process_batch(batch, 2).await;

        assert_eq!(results.len(), 3);
        assert!(results[0].result.is_ok());
        assert!(matches!(
            results[1].result,
            Err(FeeError::InvalidAmount { .. })
        ));
        assert!(results[2].result.is_ok());
    }

    #[tokio::test]
    async fn test_more_workers_than_rows() {
        let engine = Arc::new(AsyncPreviewEngine::new(snapshot(), RulePolicy::FailClosed));
        let processor = BatchProcessor::new(engine);

        let results = processor.process_batch(vec![request(5)], 16).await;
        assert_eq!(results.len(), 1);
    }

    #[tokio::test]
    async fn test_empty_batch() {
        let engine = Arc::new(AsyncPreviewEngine::new(snapshot(), RulePolicy::FailClosed));
        let processor = BatchProcessor::new(engine);

        let results = processor.process_batch(Vec::new(), 4).await;
        assert!(results.is_empty());
    }
}
