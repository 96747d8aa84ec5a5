//! Rule records as consumed from the administrative surface
//!
//! Rules are created and edited elsewhere; this crate treats them as plain
//! data. A rule carries its own `updated_at` stamp (epoch milliseconds,
//! assigned by whoever persisted it) so resolution tie-breaks never need a
//! clock.

use super::action::{ActionType, Audience, CalculationMode, ReferralAction};
use rust_decimal::Decimal;

/// Opaque rule identifier assigned by the rule store's owner
pub type RuleId = String;

/// A single commission pricing rule
///
/// At most one rule may be active per `(action, target)` pair at any point
/// in time; the rule store enforces this on upsert. `min_amount` and
/// `max_amount` bound the *transaction amount* the rule applies to (not the
/// fee), inclusive on both ends; `None` means unbounded on that side.
#[derive(Debug, Clone, PartialEq)]
pub struct CommissionRule {
    /// Opaque identifier
    pub id: RuleId,

    /// The billable action this rule prices
    pub action: ActionType,

    /// Whose side of the transaction is billed
    pub target: Audience,

    /// How `value` is interpreted
    pub mode: CalculationMode,

    /// Flat amount (fixed mode) or percentage 0-100 (percentage mode)
    pub value: Decimal,

    /// Inclusive lower bound on applicable transaction amounts
    pub min_amount: Option<Decimal>,

    /// Inclusive upper bound on applicable transaction amounts
    pub max_amount: Option<Decimal>,

    /// Inactive rules are never selected
    pub is_active: bool,

    /// Last-modified stamp in epoch milliseconds, assigned upstream
    pub updated_at: u64,
}

impl CommissionRule {
    /// Whether `amount` falls inside this rule's applicability bounds
    pub fn applies_to_amount(&self, amount: Decimal) -> bool {
        if let Some(min) = self.min_amount {
            if amount < min {
                return false;
            }
        }
        if let Some(max) = self.max_amount {
            if amount > max {
                return false;
            }
        }
        true
    }

    /// Width of the applicability window, for tie-breaking
    ///
    /// Unbounded sides saturate to the Decimal extremes, so a rule that is
    /// open on either side always loses a narrowness comparison against a
    /// fully bounded one.
    pub fn bounds_window(&self) -> Decimal {
        let max = self.max_amount.unwrap_or(Decimal::MAX);
        let min = self.min_amount.unwrap_or(Decimal::MIN);
        max.saturating_sub(min)
    }
}

/// A referral reward rule for one (referrer, referee) role pair
///
/// Rewards are flat amounts released once the referee completes the gating
/// `required_action`; that gating check lives in the backend event pipeline,
/// not here. The same single-active-per-pair invariant applies as for
/// commission rules.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferralRule {
    /// Opaque identifier
    pub id: RuleId,

    /// Role of the referring party
    pub referrer_type: Audience,

    /// Role of the referred party
    pub referee_type: Audience,

    /// Gating action evaluated by the event pipeline
    pub required_action: ReferralAction,

    /// Flat reward paid to the referrer
    pub referrer_reward: Decimal,

    /// Flat reward paid to the referee
    pub referee_reward: Decimal,

    /// Inactive rules are never selected
    pub is_active: bool,

    /// Last-modified stamp in epoch milliseconds, assigned upstream
    pub updated_at: u64,

    /// Optional human-readable note from the admin surface
    pub description: Option<String>,
}
