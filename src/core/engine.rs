//! Preview engine: the one sequence both call sites run
//!
//! `PreviewEngine` binds an immutable rule snapshot to a policy and runs
//! resolve-then-compute for each request. The client preview surface runs
//! this before a user confirms; the settlement path runs the same sequence
//! when wallets are debited. Because both operate on value-type snapshots
//! and a pure calculator, the two sites can only disagree if they were
//! handed different snapshots.

use crate::core::calculator::compute;
use crate::core::referral::resolve_referral;
use crate::core::resolver::resolve_commission;
use crate::core::revenue::{RevenueLedger, RevenueReport};
use crate::core::rule_store::RuleSnapshot;
use crate::types::{Audience, FeeBreakdown, FeeError, PreviewRequest, ReferralRule};

/// What to do when a resolved rule fails the calculator's integrity checks
///
/// Financial correctness and availability trade off here, so the choice is
/// configuration, not code: fail-closed blocks the transaction, fail-open
/// treats the action as unpriced and lets it through fee-free.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RulePolicy {
    /// Propagate `InvalidRule`; the transaction is blocked
    #[default]
    FailClosed,

    /// Degrade `InvalidRule` to a zero-commission breakdown
    FailOpen,
}

/// Fee preview orchestrator over one rule snapshot
///
/// Holds the snapshot, the rule policy, and a revenue ledger fed by every
/// fee-carrying breakdown it produces.
#[derive(Debug)]
pub struct PreviewEngine {
    snapshot: RuleSnapshot,
    policy: RulePolicy,
    revenue: RevenueLedger,
}

impl PreviewEngine {
    /// Create an engine over a snapshot with the given rule policy
    pub fn new(snapshot: RuleSnapshot, policy: RulePolicy) -> Self {
        PreviewEngine {
            snapshot,
            policy,
            revenue: RevenueLedger::new(),
        }
    }

    /// Resolve and compute the fee breakdown for one request
    ///
    /// # Errors
    ///
    /// * `FeeError::InvalidAmount` - always propagated; a zero or negative
    ///   amount must block the transaction under either policy
    /// * `FeeError::InvalidRule` - propagated under `FailClosed`; degraded
    ///   to a free breakdown under `FailOpen`
    pub fn preview(&mut self, request: &PreviewRequest) -> Result<FeeBreakdown, FeeError> {
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

        self.revenue.record(request.action, &breakdown);
        Ok(breakdown)
    }

    /// Look up the configured referral reward pair for two roles
    ///
    /// Referral rewards are flat and need no calculation step; callers read
    /// the two reward fields off the returned rule.
    pub fn referral_rewards(
        &self,
        referrer_type: Audience,
        referee_type: Audience,
    ) -> Option<&ReferralRule> {
        resolve_referral(&self.snapshot, referrer_type, referee_type)
    }

    /// Aggregated revenue over everything previewed so far
    pub fn revenue_report(&self) -> RevenueReport {
        self.revenue.report()
    }

    /// The snapshot this engine computes over
    pub fn snapshot(&self) -> &RuleSnapshot {
        &self.snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ActionType, CalculationMode, CommissionRule, FeeDirection};
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn snapshot_with(value: &str, mode: CalculationMode) -> RuleSnapshot {
        RuleSnapshot::new(
            vec![CommissionRule {
                id: "r1".to_string(),
                action: ActionType::SendMoney,
                target: Audience::User,
                mode,
                value: dec(value),
                min_amount: None,
                max_amount: None,
                is_active: true,
                updated_at: 1,
            }],
            Vec::new(),
        )
    }

    fn request(amount: &str) -> PreviewRequest {
        PreviewRequest {
            action: ActionType::SendMoney,
            target: Audience::User,
            amount: dec(amount),
            direction: FeeDirection::AddOnTop,
        }
    }

    #[test]
    fn test_preview_resolves_and_computes() {
        let snapshot = snapshot_with("1.5", CalculationMode::Percentage);
        let mut engine = PreviewEngine::new(snapshot, RulePolicy::FailClosed);

        let breakdown = engine.preview(&request("2000")).unwrap();
        assert_eq!(breakdown.commission, dec("30.00"));
        assert_eq!(breakdown.net_amount, dec("2030.00"));
    }

    #[test]
    fn test_unpriced_action_is_free() {
        let snapshot = snapshot_with("1.5", CalculationMode::Percentage);
        let mut engine = PreviewEngine::new(snapshot, RulePolicy::FailClosed);

        let free = engine
            .preview(&PreviewRequest {
                action: ActionType::MerchantWithdrawal,
                target: Audience::Merchant,
                amount: dec("500"),
                direction: FeeDirection::DeductFromAmount,
            })
            .unwrap();
        assert_eq!(free.commission, Decimal::ZERO);
        assert_eq!(free.net_amount, dec("500"));
    }

    #[test]
    fn test_fail_closed_propagates_invalid_rule() {
        let snapshot = snapshot_with("150", CalculationMode::Percentage);
        let mut engine = PreviewEngine::new(snapshot, RulePolicy::FailClosed);

        let result = engine.preview(&request("100"));
        assert!(matches!(result, Err(FeeError::InvalidRule { .. })));
    }

    #[test]
    fn test_fail_open_degrades_invalid_rule_to_free() {
        let snapshot = snapshot_with("150", CalculationMode::Percentage);
        let mut engine = PreviewEngine::new(snapshot, RulePolicy::FailOpen);

        let breakdown = engine.preview(&request("100")).unwrap();
        assert_eq!(breakdown.commission, Decimal::ZERO);
        assert_eq!(breakdown.net_amount, dec("100"));
        assert!(breakdown.rule_id.is_none());
    }

    #[test]
    fn test_invalid_amount_propagates_under_both_policies() {
        for policy in [RulePolicy::FailClosed, RulePolicy::FailOpen] {
            let snapshot = snapshot_with("1.5", CalculationMode::Percentage);
            let mut engine = PreviewEngine::new(snapshot, policy);
            let result = engine.preview(&request("-5"));
            assert!(matches!(result, Err(FeeError::InvalidAmount { .. })));
        }
    }

    #[test]
    fn test_revenue_accumulates_over_previews() {
        let snapshot = snapshot_with("1.5", CalculationMode::Percentage);
        let mut engine = PreviewEngine::new(snapshot, RulePolicy::FailClosed);

        engine.preview(&request("2000")).unwrap();
        engine.preview(&request("1000")).unwrap();
        // Unpriced action contributes nothing
        engine
            .preview(&PreviewRequest {
                action: ActionType::RechargeMerchant,
                target: Audience::User,
                amount: dec("999"),
                direction: FeeDirection::AddOnTop,
            })
            .unwrap();

        let report = engine.revenue_report();
        assert_eq!(report.transaction_count, 2);
        assert_eq!(report.total_revenue, dec("45.00"));
    }

    #[test]
    fn test_referral_rewards_pass_through() {
        let snapshot = RuleSnapshot::new(Vec::new(), Vec::new());
        let engine = PreviewEngine::new(snapshot, RulePolicy::FailClosed);
        assert!(engine
            .referral_rewards(Audience::User, Audience::Merchant)
            .is_none());
    }
}
