//! Rule storage with write-time invariant enforcement
//!
//! The `RuleStore` is the administrative side of the engine: rules are
//! upserted and deactivated here, and every write is validated so that the
//! invariants the resolver and calculator depend on hold at rest:
//!
//! - rule values are in range (non-negative; percentages at most 100),
//! - amount bounds are not inverted,
//! - at most one rule is active per `(action, target)` pair, and at most
//!   one per (referrer, referee) pair.
//!
//! Calculation never touches the store directly. Callers take a
//! [`RuleSnapshot`], an immutable point-in-time copy, and hand it to the
//! resolvers, so a store being edited mid-flight can never produce a
//! half-updated fee.

use crate::types::{CalculationMode, CommissionRule, FeeError, ReferralRule, RuleId};
use std::collections::HashMap;

/// Immutable point-in-time copy of all rules
///
/// Snapshots are plain values: cloning the store's rules once, they are
/// unaffected by later store mutations. A stale snapshot produces a
/// stale-but-internally-consistent fee, never a corrupt one.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RuleSnapshot {
    commission_rules: Vec<CommissionRule>,
    referral_rules: Vec<ReferralRule>,
}

impl RuleSnapshot {
    /// Build a snapshot directly from rule lists
    ///
    /// Used by the store and by callers that receive rules from an external
    /// source (rule exports, the refresh endpoint). No validation happens
    /// here: a snapshot is externally-owned data, and the resolvers and
    /// calculator are defensive against duplicates and bad values.
    pub fn new(commission_rules: Vec<CommissionRule>, referral_rules: Vec<ReferralRule>) -> Self {
        RuleSnapshot {
            commission_rules,
            referral_rules,
        }
    }

    /// All commission rules in the snapshot, active and inactive
    pub fn commission_rules(&self) -> &[CommissionRule] {
        &self.commission_rules
    }

    /// All referral rules in the snapshot, active and inactive
    pub fn referral_rules(&self) -> &[ReferralRule] {
        &self.referral_rules
    }

    /// Whether the snapshot holds no rules at all
    pub fn is_empty(&self) -> bool {
        self.commission_rules.is_empty() && self.referral_rules.is_empty()
    }
}

/// In-memory store of commission and referral rules keyed by rule id
///
/// Upserts are validated; reads go through [`RuleStore::snapshot`].
#[derive(Debug, Default)]
pub struct RuleStore {
    commission_rules: HashMap<RuleId, CommissionRule>,
    referral_rules: HashMap<RuleId, ReferralRule>,
}

impl RuleStore {
    /// Create an empty store
    pub fn new() -> Self {
        RuleStore {
            commission_rules: HashMap::new(),
            referral_rules: HashMap::new(),
        }
    }

    /// Insert or replace a commission rule
    ///
    /// Replacing a rule under its own id is always allowed; activating a
    /// rule while a *different* rule is active for the same
    /// `(action, target)` pair is rejected, keeping the single-active
    /// invariant the resolver's fast path relies on.
    ///
    /// # Errors
    ///
    /// * `FeeError::InvalidRule` - negative value, percentage above 100, or
    ///   `min_amount > max_amount`
    /// * `FeeError::RuleConflict` - another active rule occupies the pair
    pub fn upsert_commission_rule(&mut self, rule: CommissionRule) -> Result<(), FeeError> {
        validate_commission_rule(&rule)?;

        if rule.is_active {
            if let Some(existing) = self.commission_rules.values().find(|r| {
                r.id != rule.id && r.is_active && r.action == rule.action && r.target == rule.target
            }) {
                return Err(FeeError::rule_conflict(
                    &rule.id,
                    &existing.id,
                    &format!("{}/{}", rule.action, rule.target),
                ));
            }
        }

        self.commission_rules.insert(rule.id.clone(), rule);
        Ok(())
    }

    /// Insert or replace a referral rule
    ///
    /// Same shape as [`RuleStore::upsert_commission_rule`], keyed by the
    /// (referrer, referee) role pair.
    ///
    /// # Errors
    ///
    /// * `FeeError::InvalidRule` - a negative reward amount
    /// * `FeeError::RuleConflict` - another active rule occupies the pair
    pub fn upsert_referral_rule(&mut self, rule: ReferralRule) -> Result<(), FeeError> {
        validate_referral_rule(&rule)?;

        if rule.is_active {
            if let Some(existing) = self.referral_rules.values().find(|r| {
                r.id != rule.id
                    && r.is_active
                    && r.referrer_type == rule.referrer_type
                    && r.referee_type == rule.referee_type
            }) {
                return Err(FeeError::rule_conflict(
                    &rule.id,
                    &existing.id,
                    &format!("{}->{}", rule.referrer_type, rule.referee_type),
                ));
            }
        }

        self.referral_rules.insert(rule.id.clone(), rule);
        Ok(())
    }

    /// Deactivate a commission rule, stamping the mutation time
    ///
    /// `updated_at` comes from the caller; the store never reads a clock.
    ///
    /// # Errors
    ///
    /// * `FeeError::RuleNotFound` - no rule with this id exists
    pub fn deactivate_commission_rule(
        &mut self,
        id: &str,
        updated_at: u64,
    ) -> Result<(), FeeError> {
        let rule = self
            .commission_rules
            .get_mut(id)
            .ok_or_else(|| FeeError::rule_not_found(id))?;
        rule.is_active = false;
        rule.updated_at = updated_at;
        Ok(())
    }

    /// Deactivate a referral rule, stamping the mutation time
    ///
    /// # Errors
    ///
    /// * `FeeError::RuleNotFound` - no rule with this id exists
    pub fn deactivate_referral_rule(&mut self, id: &str, updated_at: u64) -> Result<(), FeeError> {
        let rule = self
            .referral_rules
            .get_mut(id)
            .ok_or_else(|| FeeError::rule_not_found(id))?;
        rule.is_active = false;
        rule.updated_at = updated_at;
        Ok(())
    }

    /// Take an immutable point-in-time copy of all rules
    ///
    /// Rules are sorted by id so two snapshots of the same store contents
    /// are identical values.
    pub fn snapshot(&self) -> RuleSnapshot {
        let mut commission_rules: Vec<CommissionRule> =
            self.commission_rules.values().cloned().collect();
        commission_rules.sort_by(|a, b| a.id.cmp(&b.id));

        let mut referral_rules: Vec<ReferralRule> =
            self.referral_rules.values().cloned().collect();
        referral_rules.sort_by(|a, b| a.id.cmp(&b.id));

        RuleSnapshot {
            commission_rules,
            referral_rules,
        }
    }
}

/// Write-time validation for a commission rule
fn validate_commission_rule(rule: &CommissionRule) -> Result<(), FeeError> {
    if rule.value < rust_decimal::Decimal::ZERO {
        return Err(FeeError::negative_value(&rule.id, rule.value));
    }
    if rule.mode == CalculationMode::Percentage && rule.value > rust_decimal::Decimal::ONE_HUNDRED
    {
        return Err(FeeError::percentage_out_of_range(&rule.id, rule.value));
    }
    if let (Some(min), Some(max)) = (rule.min_amount, rule.max_amount) {
        if min > max {
            return Err(FeeError::inverted_bounds(&rule.id, min, max));
        }
    }
    Ok(())
}

/// Write-time validation for a referral rule
fn validate_referral_rule(rule: &ReferralRule) -> Result<(), FeeError> {
    if rule.referrer_reward < rust_decimal::Decimal::ZERO {
        return Err(FeeError::negative_value(&rule.id, rule.referrer_reward));
    }
    if rule.referee_reward < rust_decimal::Decimal::ZERO {
        return Err(FeeError::negative_value(&rule.id, rule.referee_reward));
    }
    Ok(())
}
