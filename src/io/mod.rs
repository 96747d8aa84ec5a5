//! I/O module
//!
//! Handles CSV parsing and output.
//!
//! # Components
//!
//! - `csv_format` - CSV format handling (record conversion, output serialization)
//! - `rules_reader` - rule snapshot loading from admin CSV exports
//! - `sync_reader` - synchronous request reader with iterator interface
//! - `async_reader` - asynchronous request reader with batch interface

pub mod async_reader;
pub mod csv_format;
pub mod rules_reader;
pub mod sync_reader;

pub use async_reader::AsyncReader;
pub use csv_format::{
    convert_referral_record, convert_request_record, convert_rule_record, write_breakdowns_csv,
    ReferralCsvRecord, RequestCsvRecord, RuleCsvRecord,
};
pub use rules_reader::{load_commission_rules, load_referral_rules, load_snapshot};
pub use sync_reader::SyncReader;
