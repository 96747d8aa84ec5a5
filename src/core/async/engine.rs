//! Thread-safe preview engine for async batch processing
//!
//! The synchronous [`PreviewEngine`](crate::core::engine::PreviewEngine)
//! takes `&mut self` because its revenue ledger is a plain HashMap. For
//! batch fan-out the engine must be shared across tasks, so this variant
//! keeps the ledger in a `DashMap` and previews through `&self`.
//!
//! # Thread Safety
//!
//! The snapshot is immutable and resolution/calculation are pure, so
//! concurrent previews need no synchronization at all; only the revenue
//! ledger is written, and DashMap serializes writes per action entry.

use crate::core::calculator::compute;
use crate::core::engine::RulePolicy;
use crate::core::resolver::resolve_commission;
use crate::core::revenue::{ActionRevenue, RevenueReport};
use crate::core::rule_store::RuleSnapshot;
use crate::types::{ActionType, FeeBreakdown, FeeError, PreviewRequest};
use dashmap::DashMap;
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Shareable fee preview engine with concurrent revenue accounting
///
/// Wrap in `Arc` and clone the handle into worker tasks; all methods take
/// `&self`.
#[derive(Debug)]
pub struct AsyncPreviewEngine {
    snapshot: RuleSnapshot,
    policy: RulePolicy,
    revenue: DashMap<ActionType, ActionRevenue>,
}

impl AsyncPreviewEngine {
    /// Create an engine over a snapshot with the given rule policy
    pub fn new(snapshot: RuleSnapshot, policy: RulePolicy) -> Self {
        AsyncPreviewEngine {
            snapshot,
            policy,
            revenue: DashMap::new(),
        }
    }

    /// Resolve and compute the fee breakdown for one request
    ///
    /// Identical semantics to the synchronous engine's `preview`; the two
    /// must never be allowed to drift, and the end-to-end tests compare
    /// their output byte for byte.
    ///
    /// # Errors
    ///
    /// * `FeeError::InvalidAmount` - always propagated
    /// * `FeeError::InvalidRule` - propagated under `FailClosed`, degraded
    ///   to a free breakdown under `FailOpen`
    pub fn preview(&self, request: &PreviewRequest) -> Result<FeeBreakdown, FeeError> {
        let rule = resolve_commission(
            &self.snapshot,
            request.action,
            request.target,
            request.amount,
        );

        let breakdown = match compute(rule, request.amount, request.direction) {
            Ok(breakdown) => breakdown,
            Err(FeeError::InvalidRule { .. }) if self.policy == RulePolicy::FailOpen => {
                FeeBreakdown::free(request.amount)
            }
            Err(e) => return Err(e),
        };

        if breakdown.commission > Decimal::ZERO {
            self.revenue
                .entry(request.action)
                .and_modify(|entry| {
                    entry.count += 1;
                    entry.total += breakdown.commission;
                })
                .or_insert(ActionRevenue {
                    count: 1,
                    total: breakdown.commission,
                });
        }

        Ok(breakdown)
    }

    /// Aggregated revenue over everything previewed so far
    pub fn revenue_report(&self) -> RevenueReport {
        let by_action: HashMap<ActionType, ActionRevenue> = self
            .revenue
            .iter()
            .map(|entry| (*entry.key(), *entry.value()))
            .collect();

        let total_revenue = by_action.values().map(|r| r.total).sum();
        let transaction_count = by_action.values().map(|r| r.count).sum();

        RevenueReport {
            total_revenue,
            transaction_count,
            by_action,
        }
    }
}
