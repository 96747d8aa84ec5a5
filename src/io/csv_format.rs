//! CSV format handling for rule exports, preview requests, and breakdown output
//!
//! This module centralizes all CSV format concerns, providing:
//! - Record structures for deserialization
//! - Conversion from CSV records to domain types
//! - Breakdown output serialization
//!
//! All functions are pure (no I/O) for easy testing.
//!
//! Rules arrive as CSV because that is what the administrative surface
//! exports; the transport that refreshed them (REST, file drop) is outside
//! this crate.

use crate::types::{
    ActionType, Audience, CalculationMode, CommissionRule, FeeBreakdown, FeeDirection,
    PreviewRequest, ReferralAction, ReferralRule,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Write;
use std::str::FromStr;

/// CSV record for one commission rule, as exported by the admin surface
///
/// Columns: id, action, target, mode, value, min_amount, max_amount,
/// is_active, updated_at. Empty min/max fields mean unbounded.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct RuleCsvRecord {
    pub id: String,
    pub action: String,
    pub target: String,
    pub mode: String,
    pub value: String,
    pub min_amount: Option<String>,
    pub max_amount: Option<String>,
    pub is_active: bool,
    pub updated_at: u64,
}

/// CSV record for one referral rule
///
/// Columns: id, referrer_type, referee_type, required_action,
/// referrer_reward, referee_reward, is_active, updated_at, description.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ReferralCsvRecord {
    pub id: String,
    pub referrer_type: String,
    pub referee_type: String,
    pub required_action: String,
    pub referrer_reward: String,
    pub referee_reward: String,
    pub is_active: bool,
    pub updated_at: u64,
    pub description: Option<String>,
}

/// CSV record for one preview request
///
/// Columns: action, target, amount, direction.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct RequestCsvRecord {
    pub action: String,
    pub target: String,
    pub amount: String,
    pub direction: String,
}

/// Parse a required decimal field, labeling errors with the rule id
fn parse_decimal(field: &str, value: &str, id: &str) -> Result<Decimal, String> {
    Decimal::from_str(value.trim())
        .map_err(|_| format!("Invalid {} '{}' for rule {}", field, value, id))
}

/// Parse an optional decimal field; empty or missing means None
fn parse_optional_decimal(
    field: &str,
    value: &Option<String>,
    id: &str,
) -> Result<Option<Decimal>, String> {
    match value {
        Some(s) if !s.trim().is_empty() => parse_decimal(field, s, id).map(Some),
        _ => Ok(None),
    }
}

/// Convert a RuleCsvRecord to a CommissionRule
///
/// # Returns
///
/// Result containing either:
/// - Ok(CommissionRule) - Successfully converted record
/// - Err(String) - Error message describing the conversion failure
pub fn convert_rule_record(record: RuleCsvRecord) -> Result<CommissionRule, String> {
    let action = ActionType::from_str(&record.action)
        .map_err(|e| format!("{} for rule {}", e, record.id))?;
    let target = Audience::from_str(&record.target)
        .map_err(|e| format!("{} for rule {}", e, record.id))?;
    let mode = CalculationMode::from_str(&record.mode)
        .map_err(|e| format!("{} for rule {}", e, record.id))?;
    let value = parse_decimal("value", &record.value, &record.id)?;
    let min_amount = parse_optional_decimal("min_amount", &record.min_amount, &record.id)?;
    let max_amount = parse_optional_decimal("max_amount", &record.max_amount, &record.id)?;

    Ok(CommissionRule {
        id: record.id,
        action,
        target,
        mode,
        value,
        min_amount,
        max_amount,
        is_active: record.is_active,
        updated_at: record.updated_at,
    })
}

/// Convert a ReferralCsvRecord to a ReferralRule
pub fn convert_referral_record(record: ReferralCsvRecord) -> Result<ReferralRule, String> {
    let referrer_type = Audience::from_str(&record.referrer_type)
        .map_err(|e| format!("{} for rule {}", e, record.id))?;
    let referee_type = Audience::from_str(&record.referee_type)
        .map_err(|e| format!("{} for rule {}", e, record.id))?;
    let required_action = ReferralAction::from_str(&record.required_action)
        .map_err(|e| format!("{} for rule {}", e, record.id))?;
    let referrer_reward = parse_decimal("referrer_reward", &record.referrer_reward, &record.id)?;
    let referee_reward = parse_decimal("referee_reward", &record.referee_reward, &record.id)?;

    let description = match record.description {
        Some(s) if !s.trim().is_empty() => Some(s),
        _ => None,
    };

    Ok(ReferralRule {
        id: record.id,
        referrer_type,
        referee_type,
        required_action,
        referrer_reward,
        referee_reward,
        is_active: record.is_active,
        updated_at: record.updated_at,
        description,
    })
}

/// Convert a RequestCsvRecord to a PreviewRequest
///
/// Amount positivity is deliberately not checked here: parsing and
/// validation are separate stages, and the engine's `InvalidAmount` is the
/// single authority on what amounts are acceptable.
pub fn convert_request_record(record: RequestCsvRecord) -> Result<PreviewRequest, String> {
    let action = ActionType::from_str(&record.action)?;
    let target = Audience::from_str(&record.target)?;
    let direction = FeeDirection::from_str(&record.direction)?;
    let amount = Decimal::from_str(record.amount.trim())
        .map_err(|_| format!("Invalid amount '{}'", record.amount))?;

    Ok(PreviewRequest {
        action,
        target,
        amount,
        direction,
    })
}

/// Write computed breakdowns to CSV format
///
/// Columns: action, target, amount, direction, commission, net_amount,
/// rule_id. One row per request, in input order; monetary fields are
/// formatted at minor-unit precision. An unmatched rule id renders empty.
///
/// # Returns
///
/// * `Ok(())` if writing succeeded
/// * `Err(String)` if a write error occurred
pub fn write_breakdowns_csv(
    rows: &[(PreviewRequest, FeeBreakdown)],
    output: &mut dyn Write,
) -> Result<(), String> {
    use csv::Writer;

    let mut writer = Writer::from_writer(output);

    writer
        .write_record([
            "action",
            "target",
            "amount",
            "direction",
            "commission",
            "net_amount",
            "rule_id",
        ])
        .map_err(|e| format!("Failed to write CSV header: {}", e))?;

    for (request, breakdown) in rows {
        writer
            .write_record(&[
                request.action.as_str().to_string(),
                request.target.as_str().to_string(),
                format!("{:.2}", breakdown.gross_amount),
                request.direction.as_str().to_string(),
                format!("{:.2}", breakdown.commission),
                format!("{:.2}", breakdown.net_amount),
                breakdown.rule_id.clone().unwrap_or_default(),
            ])
            .map_err(|e| format!("Failed to write breakdown record: {}", e))?;
    }

    writer
        .flush()
        .map_err(|e| format!("Failed to flush output: {}", e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn rule_record() -> RuleCsvRecord {
        RuleCsvRecord {
            id: "c1".to_string(),
            action: "send_money".to_string(),
            target: "USER".to_string(),
            mode: "percentage".to_string(),
            value: "1.5".to_string(),
            min_amount: Some("0".to_string()),
            max_amount: Some("100000".to_string()),
            is_active: true,
            updated_at: 1700000000000,
        }
    }

    #[test]
    fn test_convert_rule_record() {
        let rule = convert_rule_record(rule_record()).unwrap();
        assert_eq!(rule.id, "c1");
        assert_eq!(rule.action, ActionType::SendMoney);
        assert_eq!(rule.target, Audience::User);
        assert_eq!(rule.mode, CalculationMode::Percentage);
        assert_eq!(rule.value, Decimal::from_str("1.5").unwrap());
        assert_eq!(rule.min_amount, Some(Decimal::ZERO));
        assert_eq!(rule.max_amount, Some(Decimal::from(100000)));
    }

    #[rstest]
    #[case::empty_string(Some("".to_string()))]
    #[case::whitespace(Some("  ".to_string()))]
    #[case::missing(None)]
    fn test_empty_bounds_mean_unbounded(#[case] raw: Option<String>) {
        let mut record = rule_record();
        record.min_amount = raw.clone();
        record.max_amount = raw;
        let rule = convert_rule_record(record).unwrap();
        assert_eq!(rule.min_amount, None);
        assert_eq!(rule.max_amount, None);
    }

    #[rstest]
    #[case::bad_action("action", "qr_scan")]
    #[case::bad_target("target", "ADMIN")]
    #[case::bad_mode("mode", "tiered")]
    #[case::bad_value("value", "abc")]
    fn test_rule_conversion_errors_name_the_rule(#[case] field: &str, #[case] bad: &str) {
        let mut record = rule_record();
        match field {
            "action" => record.action = bad.to_string(),
            "target" => record.target = bad.to_string(),
            "mode" => record.mode = bad.to_string(),
            "value" => record.value = bad.to_string(),
            _ => unreachable!(),
        }
        let err = convert_rule_record(record).unwrap_err();
        assert!(err.contains("c1"), "error should name the rule: {}", err);
    }

    #[test]
    fn test_convert_referral_record() {
        let record = ReferralCsvRecord {
            id: "ref1".to_string(),
            referrer_type: "USER".to_string(),
            referee_type: "MERCHANT".to_string(),
            required_action: "FIRST_SALE".to_string(),
            referrer_reward: "1000".to_string(),
            referee_reward: "0".to_string(),
            is_active: true,
            updated_at: 42,
            description: Some("Client refers merchant".to_string()),
        };

        let rule = convert_referral_record(record).unwrap();
        assert_eq!(rule.referrer_type, Audience::User);
        assert_eq!(rule.referee_type, Audience::Merchant);
        assert_eq!(rule.required_action, ReferralAction::FirstSale);
        assert_eq!(rule.referrer_reward, Decimal::from(1000));
        assert_eq!(rule.referee_reward, Decimal::ZERO);
        assert_eq!(rule.description.as_deref(), Some("Client refers merchant"));
    }

    #[test]
    fn test_convert_request_record() {
        let record = RequestCsvRecord {
            action: "merchant_withdrawal".to_string(),
            target: "MERCHANT".to_string(),
            amount: "30".to_string(),
            direction: "deduct".to_string(),
        };

        let request = convert_request_record(record).unwrap();
        assert_eq!(request.action, ActionType::MerchantWithdrawal);
        assert_eq!(request.target, Audience::Merchant);
        assert_eq!(request.amount, Decimal::from(30));
        assert_eq!(request.direction, FeeDirection::DeductFromAmount);
    }

    #[test]
    fn test_negative_amount_parses_but_is_not_validated_here() {
        // The engine, not the parser, owns the InvalidAmount decision
        let record = RequestCsvRecord {
            action: "send_money".to_string(),
            target: "USER".to_string(),
            amount: "-5".to_string(),
            direction: "deduct".to_string(),
        };
        let request = convert_request_record(record).unwrap();
        assert_eq!(request.amount, Decimal::from(-5));
    }

    #[test]
    fn test_write_breakdowns_csv_format() {
        let request = PreviewRequest {
            action: ActionType::SendMoney,
            target: Audience::User,
            amount: Decimal::from(2000),
            direction: FeeDirection::AddOnTop,
        };
        let breakdown = FeeBreakdown {
            gross_amount: Decimal::from(2000),
            commission: Decimal::from_str("30.00").unwrap(),
            net_amount: Decimal::from_str("2030.00").unwrap(),
            rule_id: Some("c1".to_string()),
        };

        let mut output = Vec::new();
        write_breakdowns_csv(&[(request, breakdown)], &mut output).unwrap();

        let rendered = String::from_utf8(output).unwrap();
        assert_eq!(
            rendered,
            "action,target,amount,direction,commission,net_amount,rule_id\n\
             send_money,USER,2000.00,add_on_top,30.00,2030.00,c1\n"
        );
    }

    #[test]
    fn test_write_breakdowns_empty_rule_id() {
        let request = PreviewRequest {
            action: ActionType::RechargeMerchant,
            target: Audience::User,
            amount: Decimal::from(100),
            direction: FeeDirection::DeductFromAmount,
        };
        let breakdown = FeeBreakdown::free(Decimal::from(100));

        let mut output = Vec::new();
        write_breakdowns_csv(&[(request, breakdown)], &mut output).unwrap();

        let rendered = String::from_utf8(output).unwrap();
        assert!(rendered.ends_with("recharge_merchant,USER,100.00,deduct,0.00,100.00,\n"));
    }
}
