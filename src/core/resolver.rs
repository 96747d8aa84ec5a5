//! Commission rule resolution over an immutable snapshot
//!
//! The resolver answers one question: which single rule, if any, prices
//! this action for this audience at this amount? The store keeps at most
//! one active rule per `(action, target)` pair, but a snapshot is a
//! point-in-time read of externally-owned data and may carry duplicates
//! from upstream races; resolution therefore tie-breaks deterministically
//! instead of crashing the transaction flow.

use crate::core::rule_store::RuleSnapshot;
use crate::types::{ActionType, Audience, CommissionRule};
use rust_decimal::Decimal;
use std::cmp::Ordering;

/// Select the applicable commission rule for an action, audience, and amount
///
/// Filters the snapshot to active rules matching `action` and `target` whose
/// amount bounds contain `amount` (inclusive, against the gross amount).
///
/// When more than one rule survives the filter, the winner is chosen by:
/// 1. narrowest bounds window (unbounded sides saturate to the Decimal
///    extremes, so a fully bounded rule always beats an open-ended one),
/// 2. most recently updated,
/// 3. greatest rule id.
///
/// # Returns
///
/// The selected rule, or `None` when no rule applies: a valid, silent
/// outcome meaning the action is free, not an error.
pub fn resolve_commission<'a>(
    snapshot: &'a RuleSnapshot,
    action: ActionType,
    target: Audience,
    amount: Decimal,
) -> Option<&'a CommissionRule> {
    snapshot
        .commission_rules()
        .iter()
        .filter(|rule| {
            rule.is_active
                && rule.action == action
                && rule.target == target
                && rule.applies_to_amount(amount)
        })
        .min_by(|a, b| compare_candidates(a, b))
}

/// Ordering used to pick a winner among concurrently-active matches
///
/// "Less" wins the `min_by` above: narrower window, then higher
/// `updated_at`, then greater id.
fn compare_candidates(a: &CommissionRule, b: &CommissionRule) -> Ordering {
    a.bounds_window()
        .cmp(&b.bounds_window())
        .then_with(|| b.updated_at.cmp(&a.updated_at))
        .then_with(|| b.id.cmp(&a.id))
}
