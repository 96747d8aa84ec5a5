//! Closed enumerations for billable actions, audiences, and fee semantics
//!
//! These enums mirror the wire names used by the administrative surface that
//! owns the rule catalog. Display metadata (labels, icons) is deliberately
//! not modeled here; presentation layers keep their own metadata maps keyed
//! by these variants.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Billable platform actions that commission rules can price
///
/// Each variant corresponds to one action in the admin rule catalog.
/// The set is closed but extensible: adding a variant requires a matching
/// rule-catalog entry on the administrative surface, nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    /// Peer-to-peer transfer, fee billed to the sending client
    SendMoney,

    /// In-store payment, fee billed to the paying client
    MerchantPaymentClient,

    /// In-store payment, fee retained from the merchant's credited amount
    MerchantPayment,

    /// Merchant withdrawal to an external bank account
    MerchantWithdrawal,

    /// Client wallet recharge via bank transfer
    RechargeVirement,

    /// Client wallet recharge at a partner merchant
    RechargeMerchant,

    /// Merchant wallet recharge via bank transfer
    MerchantRechargeVirement,
}

impl ActionType {
    /// Wire name of this action as used in rule exports and request files
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionType::SendMoney => "send_money",
            ActionType::MerchantPaymentClient => "merchant_payment_client",
            ActionType::MerchantPayment => "merchant_payment",
            ActionType::MerchantWithdrawal => "merchant_withdrawal",
            ActionType::RechargeVirement => "recharge_virement",
            ActionType::RechargeMerchant => "recharge_merchant",
            ActionType::MerchantRechargeVirement => "merchant_recharge_virement",
        }
    }
}

impl FromStr for ActionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "send_money" => Ok(ActionType::SendMoney),
            "merchant_payment_client" => Ok(ActionType::MerchantPaymentClient),
            "merchant_payment" => Ok(ActionType::MerchantPayment),
            "merchant_withdrawal" => Ok(ActionType::MerchantWithdrawal),
            "recharge_virement" => Ok(ActionType::RechargeVirement),
            "recharge_merchant" => Ok(ActionType::RechargeMerchant),
            "merchant_recharge_virement" => Ok(ActionType::MerchantRechargeVirement),
            _ => Err(format!("Unknown action type '{}'", s)),
        }
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which side of a transaction a rule bills
///
/// Commission rules are keyed by `(action, target)`: the same in-store
/// payment can carry one rule billing the client and another billing the
/// merchant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Audience {
    User,
    Merchant,
}

impl Audience {
    /// Wire name of this audience role
    pub fn as_str(&self) -> &'static str {
        match self {
            Audience::User => "USER",
            Audience::Merchant => "MERCHANT",
        }
    }
}

impl FromStr for Audience {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "USER" => Ok(Audience::User),
            "MERCHANT" => Ok(Audience::Merchant),
            _ => Err(format!("Unknown audience '{}'", s)),
        }
    }
}

impl fmt::Display for Audience {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a rule's `value` field is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalculationMode {
    /// `value` is a flat amount in currency minor units
    Fixed,

    /// `value` is a percentage of the transaction amount (0-100)
    Percentage,
}

impl CalculationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            CalculationMode::Fixed => "fixed",
            CalculationMode::Percentage => "percentage",
        }
    }
}

impl FromStr for CalculationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fixed" => Ok(CalculationMode::Fixed),
            "percentage" => Ok(CalculationMode::Percentage),
            _ => Err(format!("Unknown calculation mode '{}'", s)),
        }
    }
}

/// Gating action that releases a referral reward pair
///
/// Evaluated by the backend event pipeline, not by this crate; the variants
/// exist so rules round-trip losslessly through snapshots and exports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReferralAction {
    AccountCreated,
    FirstTransaction,
    FirstRecharge,
    FirstSale,
}

impl ReferralAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReferralAction::AccountCreated => "ACCOUNT_CREATED",
            ReferralAction::FirstTransaction => "FIRST_TRANSACTION",
            ReferralAction::FirstRecharge => "FIRST_RECHARGE",
            ReferralAction::FirstSale => "FIRST_SALE",
        }
    }
}

impl FromStr for ReferralAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ACCOUNT_CREATED" => Ok(ReferralAction::AccountCreated),
            "FIRST_TRANSACTION" => Ok(ReferralAction::FirstTransaction),
            "FIRST_RECHARGE" => Ok(ReferralAction::FirstRecharge),
            "FIRST_SALE" => Ok(ReferralAction::FirstSale),
            _ => Err(format!("Unknown referral action '{}'", s)),
        }
    }
}

/// Whether a fee is taken out of the nominal amount or charged on top of it
///
/// Callers pass this explicitly based on business context: a merchant payout
/// fee deducts from what the merchant receives, a recharge fee is charged on
/// top of the sticker amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeeDirection {
    /// The receiving party gets `amount - commission`
    DeductFromAmount,

    /// The paying party pays `amount + commission`
    AddOnTop,
}

impl FeeDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeeDirection::DeductFromAmount => "deduct",
            FeeDirection::AddOnTop => "add_on_top",
        }
    }
}

impl FromStr for FeeDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "deduct" => Ok(FeeDirection::DeductFromAmount),
            "add_on_top" => Ok(FeeDirection::AddOnTop),
            _ => Err(format!("Unknown fee direction '{}'", s)),
        }
    }
}

impl fmt::Display for FeeDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("send_money", ActionType::SendMoney)]
    #[case("merchant_payment_client", ActionType::MerchantPaymentClient)]
    #[case("merchant_payment", ActionType::MerchantPayment)]
    #[case("merchant_withdrawal", ActionType::MerchantWithdrawal)]
    #[case("recharge_virement", ActionType::RechargeVirement)]
    #[case("recharge_merchant", ActionType::RechargeMerchant)]
    #[case("merchant_recharge_virement", ActionType::MerchantRechargeVirement)]
    fn test_action_wire_names(#[case] wire: &str, #[case] action: ActionType) {
        assert_eq!(wire.parse::<ActionType>().unwrap(), action);
        assert_eq!(action.as_str(), wire);
    }

    #[test]
    fn test_unknown_action_is_rejected() {
        let result = "qr_scan".parse::<ActionType>();
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("qr_scan"));
    }

    #[rstest]
    #[case("USER", Audience::User)]
    #[case("MERCHANT", Audience::Merchant)]
    fn test_audience_wire_names(#[case] wire: &str, #[case] audience: Audience) {
        assert_eq!(wire.parse::<Audience>().unwrap(), audience);
        assert_eq!(audience.as_str(), wire);
    }

    #[test]
    fn test_audience_is_case_sensitive() {
        // The admin surface always exports roles uppercased
        assert!("user".parse::<Audience>().is_err());
    }

    #[rstest]
    #[case("deduct", FeeDirection::DeductFromAmount)]
    #[case("add_on_top", FeeDirection::AddOnTop)]
    fn test_direction_wire_names(#[case] wire: &str, #[case] direction: FeeDirection) {
        assert_eq!(wire.parse::<FeeDirection>().unwrap(), direction);
        assert_eq!(direction.as_str(), wire);
    }

    #[test]
    fn test_referral_action_parsing() {
        assert_eq!(
            "FIRST_SALE".parse::<ReferralAction>().unwrap(),
            ReferralAction::FirstSale
        );
        assert!("SECOND_SALE".parse::<ReferralAction>().is_err());
    }
}
