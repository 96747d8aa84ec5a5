//! Error types for the fee engine
//!
//! The core never logs, retries, or swallows errors; every variant is
//! propagated to the caller, whose job is to block the transaction (or, for
//! `InvalidRule` under a fail-open policy, degrade to a free action).
//!
//! # Error Categories
//!
//! - **Calculation errors**: invalid amounts and corrupt rules, raised by
//!   the calculator before any money moves.
//! - **Store errors**: invariant violations at rule upsert time.
//! - **File I/O / CSV errors**: raised by the batch pipeline, never by the
//!   core itself.

use rust_decimal::Decimal;
use thiserror::Error;

/// Main error type for the fee engine
///
/// The absence of an applicable rule is deliberately *not* represented
/// here: resolvers return `Option`, and a `None` rule means the action is
/// free.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FeeError {
    /// Transaction amount is zero or negative
    ///
    /// Never recovered silently. Callers must block the transaction rather
    /// than treat it as fee-free.
    #[error("Invalid transaction amount {amount}: amount must be strictly positive")]
    InvalidAmount {
        /// The offending amount
        amount: Decimal,
    },

    /// A resolved rule carries an out-of-range value
    ///
    /// The rule store validates on write, but the calculator re-checks so a
    /// corrupt snapshot is caught before a discrepancy reaches a wallet.
    #[error("Invalid rule {rule_id}: {reason}")]
    InvalidRule {
        /// The offending rule's identifier
        rule_id: String,
        /// What the rule violates
        reason: String,
    },

    /// Upserting this rule would leave two active rules for the same key
    #[error("Rule {rule_id} conflicts with active rule {existing_id} for {scope}")]
    RuleConflict {
        /// The rule being upserted
        rule_id: String,
        /// The already-active rule occupying the key
        existing_id: String,
        /// Human-readable description of the contested key
        scope: String,
    },

    /// A store mutation referenced a rule id that does not exist
    #[error("Rule {rule_id} not found")]
    RuleNotFound {
        /// The missing rule's identifier
        rule_id: String,
    },

    /// Arithmetic overflow would occur
    ///
    /// The row is rejected rather than letting a wrapped or saturated
    /// amount reach a wallet.
    #[error("Arithmetic overflow in {operation}")]
    ArithmeticOverflow {
        /// Operation that would overflow
        operation: String,
    },

    /// File not found at the specified path
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found
        path: String,
    },

    /// I/O error occurred while reading or writing files
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },

    /// CSV parsing error occurred
    #[error("CSV parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    ParseError {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },
}

// Conversion from io::Error to FeeError
impl From<std::io::Error> for FeeError {
    fn from(error: std::io::Error) -> Self {
        FeeError::IoError {
            message: error.to_string(),
        }
    }
}

// Conversion from csv::Error to FeeError
impl From<csv::Error> for FeeError {
    fn from(error: csv::Error) -> Self {
        let line = error.position().map(|pos| pos.line());

        FeeError::ParseError {
            line,
            message: error.to_string(),
        }
    }
}

// Helper functions for creating common errors

impl FeeError {
    /// Create an InvalidAmount error
    pub fn invalid_amount(amount: Decimal) -> Self {
        FeeError::InvalidAmount { amount }
    }

    /// Create an InvalidRule error for a negative value
    pub fn negative_value(rule_id: &str, value: Decimal) -> Self {
        FeeError::InvalidRule {
            rule_id: rule_id.to_string(),
            reason: format!("value {} is negative", value),
        }
    }

    /// Create an InvalidRule error for a percentage above 100
    pub fn percentage_out_of_range(rule_id: &str, value: Decimal) -> Self {
        FeeError::InvalidRule {
            rule_id: rule_id.to_string(),
            reason: format!("percentage {} exceeds 100", value),
        }
    }

    /// Create an InvalidRule error for inverted bounds
    pub fn inverted_bounds(rule_id: &str, min: Decimal, max: Decimal) -> Self {
        FeeError::InvalidRule {
            rule_id: rule_id.to_string(),
            reason: format!("min_amount {} exceeds max_amount {}", min, max),
        }
    }

    /// Create a RuleConflict error
    pub fn rule_conflict(rule_id: &str, existing_id: &str, scope: &str) -> Self {
        FeeError::RuleConflict {
            rule_id: rule_id.to_string(),
            existing_id: existing_id.to_string(),
            scope: scope.to_string(),
        }
    }

    /// Create a RuleNotFound error
    pub fn rule_not_found(rule_id: &str) -> Self {
        FeeError::RuleNotFound {
            rule_id: rule_id.to_string(),
        }
    }

    /// Create an ArithmeticOverflow error
    pub fn arithmetic_overflow(operation: &str) -> Self {
        FeeError::ArithmeticOverflow {
            operation: operation.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal::Decimal;

    #[rstest]
    #[case::invalid_amount(
        FeeError::InvalidAmount { amount: Decimal::new(-500, 2) },
        "Invalid transaction amount -5.00: amount must be strictly positive"
    )]
    #[case::invalid_rule(
        FeeError::InvalidRule { rule_id: "rule-7".to_string(), reason: "value -2 is negative".to_string() },
        "Invalid rule rule-7: value -2 is negative"
    )]
    #[case::rule_conflict(
        FeeError::RuleConflict {
            rule_id: "new".to_string(),
            existing_id: "old".to_string(),
            scope: "send_money/USER".to_string(),
        },
        "Rule new conflicts with active rule old for send_money/USER"
    )]
    #[case::rule_not_found(
        FeeError::RuleNotFound { rule_id: "ghost".to_string() },
        "Rule ghost not found"
    )]
    #[case::arithmetic_overflow(
        FeeError::ArithmeticOverflow { operation: "add-on-top net amount".to_string() },
        "Arithmetic overflow in add-on-top net amount"
    )]
    #[case::file_not_found(
        FeeError::FileNotFound { path: "rules.csv".to_string() },
        "File not found: rules.csv"
    )]
    #[case::parse_error_with_line(
        FeeError::ParseError { line: Some(3), message: "Invalid field".to_string() },
        "CSV parse error at line 3: Invalid field"
    )]
    #[case::parse_error_without_line(
        FeeError::ParseError { line: None, message: "Invalid field".to_string() },
        "CSV parse error: Invalid field"
    )]
    fn test_error_display(#[case] error: FeeError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }

    #[rstest]
    #[case::invalid_amount(
        FeeError::invalid_amount(Decimal::ZERO),
        FeeError::InvalidAmount { amount: Decimal::ZERO }
    )]
    #[case::negative_value(
        FeeError::negative_value("r1", Decimal::new(-15, 1)),
        FeeError::InvalidRule { rule_id: "r1".to_string(), reason: "value -1.5 is negative".to_string() }
    )]
    #[case::percentage_out_of_range(
        FeeError::percentage_out_of_range("r2", Decimal::from(150)),
        FeeError::InvalidRule { rule_id: "r2".to_string(), reason: "percentage 150 exceeds 100".to_string() }
    )]
    #[case::rule_not_found(
        FeeError::rule_not_found("ghost"),
        FeeError::RuleNotFound { rule_id: "ghost".to_string() }
    )]
    fn test_helper_functions(#[case] result: FeeError, #[case] expected: FeeError) {
        assert_eq!(result, expected);
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error =
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "Permission denied");
        let error: FeeError = io_error.into();
        assert!(matches!(error, FeeError::IoError { .. }));
        assert_eq!(error.to_string(), "I/O error: Permission denied");
    }
}
