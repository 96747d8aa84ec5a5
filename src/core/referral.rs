//! Referral reward rule resolution
//!
//! Sibling of the commission resolver for the referral program: rewards are
//! flat amounts keyed by the (referrer role, referee role) pair, with no
//! amount bounds. Whether the gating action (first transaction, first sale,
//! ...) has fired is decided by the backend event pipeline; this resolver
//! only answers which reward pair is configured.

use crate::core::rule_store::RuleSnapshot;
use crate::types::{Audience, ReferralRule};

/// Select the active referral rule for a (referrer, referee) role pair
///
/// The store keeps the pair unique, but snapshots of racy upstream data may
/// still carry duplicates; ties go to the most recently updated rule, then
/// the greatest id, mirroring the commission resolver's policy.
///
/// # Returns
///
/// The configured rule, or `None` when the pair has no active rule; both
/// parties then simply earn nothing.
pub fn resolve_referral<'a>(
    snapshot: &'a RuleSnapshot,
    referrer_type: Audience,
    referee_type: Audience,
) -> Option<&'a ReferralRule> {
    snapshot
        .referral_rules()
        .iter()
        .filter(|rule| {
            rule.is_active
                && rule.referrer_type == referrer_type
                && rule.referee_type == referee_type
        })
        .min_by(|a, b| {
            b.updated_at
                .cmp(&a.updated_at)
                .then_with(|| b.id.cmp(&a.id))
        })
}
