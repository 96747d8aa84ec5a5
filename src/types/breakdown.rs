//! Computed fee breakdowns and the request shape both call sites submit

use super::action::{ActionType, Audience, FeeDirection};
use super::rule::RuleId;
use rust_decimal::Decimal;

/// One fee computation request
///
/// The preview surface and the settlement path both build exactly this value
/// from the inputs a user is about to confirm; the engine guarantees they
/// get the same answer.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewRequest {
    /// The billable action being performed
    pub action: ActionType,

    /// Whose side of the transaction the fee is billed to
    pub target: Audience,

    /// Gross transaction amount, must be strictly positive
    pub amount: Decimal,

    /// Whether the fee deducts from the amount or is charged on top
    pub direction: FeeDirection,
}

/// The result of one fee computation
///
/// Computed, never persisted. `commission` is always non-negative; for a
/// deducting fee it never exceeds `gross_amount`, so `net_amount` never goes
/// negative.
#[derive(Debug, Clone, PartialEq)]
pub struct FeeBreakdown {
    /// The input transaction amount
    pub gross_amount: Decimal,

    /// The fee retained by the platform
    pub commission: Decimal,

    /// `gross - commission` (deduct) or `gross + commission` (add-on-top)
    pub net_amount: Decimal,

    /// The rule that priced this breakdown, `None` when the action was free
    pub rule_id: Option<RuleId>,
}

impl FeeBreakdown {
    /// A zero-commission breakdown: the action is free, net equals gross
    ///
    /// Used both for the no-rule outcome and for the fail-open degradation
    /// of an invalid rule.
    pub fn free(amount: Decimal) -> Self {
        FeeBreakdown {
            gross_amount: amount,
            commission: Decimal::ZERO,
            net_amount: amount,
            rule_id: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_free_breakdown_is_neutral() {
        let amount = Decimal::new(12345, 2); // 123.45
        let breakdown = FeeBreakdown::free(amount);
        assert_eq!(breakdown.gross_amount, amount);
        assert_eq!(breakdown.commission, Decimal::ZERO);
        assert_eq!(breakdown.net_amount, amount);
        assert!(breakdown.rule_id.is_none());
    }
}
