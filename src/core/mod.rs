//! Core business logic module
//!
//! This module contains the fee engine proper:
//! - `rule_store` - validated rule storage and immutable snapshots
//! - `resolver` - commission rule selection over a snapshot
//! - `calculator` - fee arithmetic with the single rounding point
//! - `referral` - referral reward pair lookup
//! - `engine` - preview orchestration (resolve + compute + revenue)
//! - `revenue` - platform revenue aggregation
//! - `async` - thread-safe implementations for batch fan-out

pub mod r#async;
pub mod calculator;
pub mod engine;
pub mod referral;
pub mod resolver;
pub mod revenue;
pub mod rule_store;

pub use calculator::{compute, round_minor_units};
pub use engine::{PreviewEngine, RulePolicy};
pub use r#async::{AsyncPreviewEngine, BatchProcessor};
pub use referral::resolve_referral;
pub use resolver::resolve_commission;
pub use revenue::{ActionRevenue, RevenueLedger, RevenueReport};
pub use rule_store::{RuleSnapshot, RuleStore};
