//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `action`: closed enumerations (actions, audiences, modes, directions)
//! - `rule`: commission and referral rule records
//! - `breakdown`: computed fee breakdowns and preview requests
//! - `error`: error types for the fee engine

pub mod action;
pub mod breakdown;
pub mod error;
pub mod rule;

pub use action::{ActionType, Audience, CalculationMode, FeeDirection, ReferralAction};
pub use breakdown::{FeeBreakdown, PreviewRequest};
pub use error::FeeError;
pub use rule::{CommissionRule, ReferralRule, RuleId};
