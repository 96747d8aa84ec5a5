//! Fee calculation over a resolved rule
//!
//! This module is the single place where fee arithmetic happens. The preview
//! surface and the settlement path both call [`compute`] with the same
//! inputs; because the calculation is a pure function with exactly one
//! rounding point, the number a user sees before confirming is the number
//! the platform later charges.
//!
//! # Rounding
//!
//! All monetary rounding in this crate goes through [`round_minor_units`]:
//! two decimal places (the currency's minor unit), round-half-up. The
//! commission is rounded once, before the net amount is derived from it, so
//! rounding drift can never make a deducted net amount negative.

use crate::types::{CalculationMode, CommissionRule, FeeBreakdown, FeeDirection, FeeError};
use rust_decimal::{Decimal, RoundingStrategy};

/// Number of decimal places in the currency's minor unit (DZD: 2)
pub const MINOR_UNIT_SCALE: u32 = 2;

/// Round a monetary amount to minor-unit precision, half-up
///
/// Every call site that rounds money must use this function; a second,
/// slightly different rounding would let a previewed fee and a settled fee
/// disagree by one rounding unit.
pub fn round_minor_units(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(MINOR_UNIT_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Compute the fee breakdown for a transaction amount under a resolved rule
///
/// A `None` rule means the action is free: zero commission, net equals
/// gross, for either direction.
///
/// For a deducting fee the commission is clamped to the transaction amount.
/// The clamp is specified for fixed fees (a flat 50 taken from a 30
/// transaction retains 30, not 50) and also covers the percentage edge
/// where rounding a sub-minor-unit amount up would overshoot the gross.
///
/// # Arguments
///
/// * `rule` - The rule selected by the resolver, or `None` when the action
///   is unpriced
/// * `amount` - Gross transaction amount, must be strictly positive
/// * `direction` - Whether the fee deducts from `amount` or is added on top
///
/// # Errors
///
/// * `FeeError::InvalidAmount` - `amount` is zero or negative; callers must
///   block the transaction, never display a zero preview
/// * `FeeError::InvalidRule` - the rule carries a negative value, or a
///   percentage above 100. The store validates on write, but a snapshot is
///   externally-owned data and is not trusted blindly.
/// * `FeeError::ArithmeticOverflow` - the commission or net amount does not
///   fit in a `Decimal`; the row is rejected rather than saturated
pub fn compute(
    rule: Option<&CommissionRule>,
    amount: Decimal,
    direction: FeeDirection,
) -> Result<FeeBreakdown, FeeError> {
    if amount <= Decimal::ZERO {
        return Err(FeeError::invalid_amount(amount));
    }

    let Some(rule) = rule else {
        return Ok(FeeBreakdown::free(amount));
    };

    if rule.value < Decimal::ZERO {
        return Err(FeeError::negative_value(&rule.id, rule.value));
    }

    let raw_commission = match rule.mode {
        CalculationMode::Fixed => rule.value,
        CalculationMode::Percentage => {
            if rule.value > Decimal::ONE_HUNDRED {
                return Err(FeeError::percentage_out_of_range(&rule.id, rule.value));
            }
            amount
                .checked_mul(rule.value)
                .and_then(|scaled| scaled.checked_div(Decimal::ONE_HUNDRED))
                .ok_or_else(|| FeeError::arithmetic_overflow("percentage commission"))?
        }
    };

    // One rounding point for both modes; identity for well-formed fixed values
    let mut commission = round_minor_units(raw_commission);

    if direction == FeeDirection::DeductFromAmount {
        commission = commission.min(amount);
    }

    let net_amount = match direction {
        // Safe from underflow: commission was just clamped to [0, amount]
        FeeDirection::DeductFromAmount => amount - commission,
        FeeDirection::AddOnTop => amount
            .checked_add(commission)
            .ok_or_else(|| FeeError::arithmetic_overflow("add-on-top net amount"))?,
    };

    Ok(FeeBreakdown {
        gross_amount: amount,
        commission,
        net_amount,
        rule_id: Some(rule.id.clone()),
    })
}
