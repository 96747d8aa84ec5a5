//! Platform revenue accounting over computed breakdowns
//!
//! Mirrors the reporting the admin surface runs over settled transactions:
//! total commission revenue, how many transactions actually carried a fee,
//! and the split per billable action. Free transactions (commission zero)
//! are not revenue and are not counted.

use crate::types::{ActionType, FeeBreakdown};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::fmt;

/// Revenue attributed to one billable action
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ActionRevenue {
    /// Number of fee-carrying transactions
    pub count: u64,

    /// Total commission collected
    pub total: Decimal,
}

/// Aggregated revenue over a processed stream of breakdowns
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RevenueReport {
    /// Total commission across all actions
    pub total_revenue: Decimal,

    /// Number of fee-carrying transactions across all actions
    pub transaction_count: u64,

    /// Per-action revenue split
    pub by_action: HashMap<ActionType, ActionRevenue>,
}

impl fmt::Display for RevenueReport {
    /// Human-readable summary, actions sorted by wire name for stable output
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Revenue: {:.2} across {} fee-carrying transactions",
            self.total_revenue, self.transaction_count
        )?;

        let mut actions: Vec<_> = self.by_action.iter().collect();
        actions.sort_by_key(|(action, _)| action.as_str());

        for (action, revenue) in actions {
            writeln!(
                f,
                "  {}: {:.2} ({} transactions)",
                action, revenue.total, revenue.count
            )?;
        }
        Ok(())
    }
}

/// Single-threaded revenue ledger
///
/// The async pipeline keeps its own DashMap-backed ledger; both produce the
/// same [`RevenueReport`] for the same stream of breakdowns.
#[derive(Debug, Default)]
pub struct RevenueLedger {
    by_action: HashMap<ActionType, ActionRevenue>,
}

impl RevenueLedger {
    /// Create an empty ledger
    pub fn new() -> Self {
        RevenueLedger {
            by_action: HashMap::new(),
        }
    }

    /// Record one computed breakdown
    ///
    /// Breakdowns with zero commission are ignored: no revenue, not counted.
    pub fn record(&mut self, action: ActionType, breakdown: &FeeBreakdown) {
        if breakdown.commission <= Decimal::ZERO {
            return;
        }
        let entry = self.by_action.entry(action).or_default();
        entry.count += 1;
        entry.total += breakdown.commission;
    }

    /// Produce the aggregated report
    pub fn report(&self) -> RevenueReport {
        let total_revenue = self.by_action.values().map(|r| r.total).sum();
        let transaction_count = self.by_action.values().map(|r| r.count).sum();
        RevenueReport {
            total_revenue,
            transaction_count,
            by_action: self.by_action.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn breakdown(commission: &str) -> FeeBreakdown {
        let commission = Decimal::from_str(commission).unwrap();
        FeeBreakdown {
            gross_amount: Decimal::from(1000),
            commission,
            net_amount: Decimal::from(1000) - commission,
            rule_id: Some("r".to_string()),
        }
    }

    #[test]
    fn test_ledger_aggregates_by_action() {
        let mut ledger = RevenueLedger::new();
        ledger.record(ActionType::SendMoney, &breakdown("30.00"));
        ledger.record(ActionType::SendMoney, &breakdown("15.00"));
        ledger.record(ActionType::MerchantWithdrawal, &breakdown("50.00"));

        let report = ledger.report();
        assert_eq!(report.total_revenue, Decimal::from_str("95.00").unwrap());
        assert_eq!(report.transaction_count, 3);
        assert_eq!(report.by_action[&ActionType::SendMoney].count, 2);
        assert_eq!(
            report.by_action[&ActionType::SendMoney].total,
            Decimal::from_str("45.00").unwrap()
        );
    }

    #[test]
    fn test_free_transactions_are_not_revenue() {
        let mut ledger = RevenueLedger::new();
        ledger.record(ActionType::SendMoney, &breakdown("0"));

        let report = ledger.report();
        assert_eq!(report.transaction_count, 0);
        assert!(report.by_action.is_empty());
    }

    #[test]
    fn test_report_display_is_sorted_by_action() {
        let mut ledger = RevenueLedger::new();
        ledger.record(ActionType::SendMoney, &breakdown("10.00"));
        ledger.record(ActionType::MerchantPayment, &breakdown("20.00"));

        let rendered = ledger.report().to_string();
        let merchant_pos = rendered.find("merchant_payment").unwrap();
        let send_pos = rendered.find("send_money").unwrap();
        assert!(merchant_pos < send_pos);
        assert!(rendered.starts_with("Revenue: 30.00 across 2"));
    }
}
