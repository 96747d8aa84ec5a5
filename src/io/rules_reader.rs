//! Rule snapshot loading from admin CSV exports
//!
//! Unlike request rows, rule records are configuration: a malformed rule
//! silently skipped could misprice every transaction that follows, so any
//! bad record fails the whole load.
//!
//! The loader builds the snapshot directly rather than routing through a
//! `RuleStore`: a snapshot is a point-in-time read of externally-owned
//! data, and the resolvers are specified to tolerate (and tie-break)
//! duplicate active rules that upstream races may have produced. The
//! store's single-active enforcement applies to writes, not reads.

use crate::core::rule_store::RuleSnapshot;
use crate::io::csv_format::{
    convert_referral_record, convert_rule_record, ReferralCsvRecord, RuleCsvRecord,
};
use crate::types::{CommissionRule, ReferralRule};
use csv::{ReaderBuilder, Trim};
use std::fs::File;
use std::path::Path;

/// Load commission rules from a CSV export
///
/// # Errors
///
/// Returns `Err(String)` if the file cannot be opened or any record fails
/// to parse or convert; the error names the line where possible.
pub fn load_commission_rules(path: &Path) -> Result<Vec<CommissionRule>, String> {
    let mut reader = open_reader(path)?;
    let mut rules = Vec::new();

    for (index, result) in reader.deserialize::<RuleCsvRecord>().enumerate() {
        // Line 1 is the header; data starts at line 2
        let line = index + 2;
        let record =
            result.map_err(|e| format!("Rules file {} line {}: {}", path.display(), line, e))?;
        let rule = convert_rule_record(record)
            .map_err(|e| format!("Rules file {} line {}: {}", path.display(), line, e))?;
        rules.push(rule);
    }

    Ok(rules)
}

/// Load referral rules from a CSV export
///
/// # Errors
///
/// Same failure behavior as [`load_commission_rules`].
pub fn load_referral_rules(path: &Path) -> Result<Vec<ReferralRule>, String> {
    let mut reader = open_reader(path)?;
    let mut rules = Vec::new();

    for (index, result) in reader.deserialize::<ReferralCsvRecord>().enumerate() {
        let line = index + 2;
        let record =
            result.map_err(|e| format!("Rules file {} line {}: {}", path.display(), line, e))?;
        let rule = convert_referral_record(record)
            .map_err(|e| format!("Rules file {} line {}: {}", path.display(), line, e))?;
        rules.push(rule);
    }

    Ok(rules)
}

/// Load a complete rule snapshot from one or two CSV exports
///
/// The referral export is optional; pipelines that only preview commissions
/// run without one.
pub fn load_snapshot(
    rules_path: &Path,
    referral_rules_path: Option<&Path>,
) -> Result<RuleSnapshot, String> {
    let commission_rules = load_commission_rules(rules_path)?;
    let referral_rules = match referral_rules_path {
        Some(path) => load_referral_rules(path)?,
        None => Vec::new(),
    };
    Ok(RuleSnapshot::new(commission_rules, referral_rules))
}

fn open_reader(path: &Path) -> Result<csv::Reader<File>, String> {
    let file = File::open(path)
        .map_err(|e| format!("Failed to open file '{}': {}", path.display(), e))?;

    Ok(ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(file))
}
