//! Dinary Fee Engine Library
//! # Overview
//!
//! This library computes commission fee breakdowns for a mobile-money
//! platform: given an action, an amount, and a snapshot of admin-configured
//! rules, it deterministically resolves the applicable rule and computes
//! the commission and net amount. The same sequence runs on the client
//! preview surface and the backend settlement path, so both always agree.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (rules, breakdowns, enums, errors)
//! - [`cli`] - CLI arguments parsing
//! - [`core`] - Business logic components:
//!   - [`core::rule_store`] - Validated rule storage and immutable snapshots
//!   - [`core::resolver`] - Commission rule selection
//!   - [`core::calculator`] - Fee arithmetic with a single rounding point
//!   - [`core::referral`] - Referral reward pair lookup
//!   - [`core::engine`] - Preview orchestration and rule policy
//!   - [`core::revenue`] - Platform revenue aggregation
//! - [`io`] - I/O handling with pluggable parsing strategies
//! - [`strategy`] - Sync and async batch processing pipelines
//!
//! # Calculation Model
//!
//! Every calculation is a pure, stateless function over an immutable rule
//! snapshot plus an amount:
//!
//! - **Resolve**: pick the single applicable active rule for
//!   `(action, target, amount)`, or none (the action is then free)
//! - **Compute**: apply the rule's mode (fixed or percentage), clamp
//!   deducted fees to the amount, round once to minor-unit precision
//!
//! Rules carry amount bounds, an active flag, and an update stamp;
//! overlapping active rules are tie-broken deterministically (narrowest
//! bounds window, then most recent, then greatest id).
//!
//! # Error Model
//!
//! Zero/negative amounts and corrupt rule values fail loudly
//! ([`types::FeeError`]); an absent rule is a `None`, not an error. Whether
//! a corrupt rule blocks the transaction or degrades to a free action is a
//! configuration choice ([`core::engine::RulePolicy`]), never hardcoded.

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod strategy;
pub mod types;

pub use core::{
    compute, resolve_commission, resolve_referral, round_minor_units, PreviewEngine, RevenueReport,
    RulePolicy, RuleSnapshot, RuleStore,
};
pub use io::write_breakdowns_csv;
pub use types::{
    ActionType, Audience, CalculationMode, CommissionRule, FeeBreakdown, FeeDirection, FeeError,
    PreviewRequest, ReferralAction, ReferralRule, RuleId,
};
