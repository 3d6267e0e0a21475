//! Contribution and severance decomposition.
//!
//! Two views of the same money: a raw capture of every contribution or
//! severance related field for traceability, and typed totals bucketed
//! by payer role, regulatory period, and severance category.

use std::collections::{BTreeMap, HashSet};

use tracing::debug;

use crate::document::{Document, NodeId};
use crate::models::record::{ContributionPeriod, ContributionTotal, PayerRole, SeveranceTotal};

use super::resolve::{child_amount, nested_named};
use super::tags::{
    BALANCE_EXPLICIT_TAGS, BALANCE_KEYWORD_FRAGMENTS, BLOCK_ITROT_TAG, FALLBACK_AMOUNT_TAG,
    PERUT_YITRA_LETKUFA_TAG, PERUT_YITROT_TAG, REKIV_TAG, SEVERANCE_SOURCE_TAGS,
    SHICHVA_AMOUNT_TAG, SUG_HAFRASHA_TAG, TECHULAT_TAG,
};
use super::value::sum_segments;

/// Capture raw contribution and severance related fields.
///
/// A tag qualifies by exact name or by carrying a contribution or
/// severance fragment. Repeated values are deduplicated per tag and
/// joined with `" | "`.
pub fn collect_balance_fields(doc: &Document, account: NodeId) -> BTreeMap<String, String> {
    let mut collected: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for node in doc.subtree(account) {
        if let Some(text) = doc.text(node) {
            let tag = doc.tag(node);
            let upper = tag.to_uppercase();
            let explicit = BALANCE_EXPLICIT_TAGS.contains(&tag);
            let keyword = BALANCE_KEYWORD_FRAGMENTS.iter().any(|f| upper.contains(f));
            if explicit || keyword {
                collected
                    .entry(tag.to_string())
                    .or_default()
                    .push(text.to_string());
            }
        }
    }

    let mut fields = BTreeMap::new();
    for (tag, values) in collected {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut unique: Vec<&str> = Vec::new();
        for value in &values {
            if seen.insert(value.as_str()) {
                unique.push(value.as_str());
            }
        }
        fields.insert(tag, unique.join(" | "));
    }
    fields
}

/// Decompose severance amounts into fixed categories from the captured fields.
pub fn severance_components(balance_fields: &BTreeMap<String, String>) -> Vec<SeveranceTotal> {
    let mut components = Vec::new();
    if balance_fields.is_empty() {
        return components;
    }
    for &(category, tags) in SEVERANCE_SOURCE_TAGS {
        let total: f64 = tags
            .iter()
            .filter_map(|tag| balance_fields.get(*tag))
            .map(|value| sum_segments(value))
            .sum();
        if total != 0.0 {
            components.push(SeveranceTotal { category, amount: total });
        }
    }
    components
}

/// Bucket contribution amounts by payer role and regulatory period.
///
/// Layer records under the balance blocks are authoritative. A role
/// with no layer data at all is recovered from deposit-type codes on
/// the per-track summaries, coarsened into the after-2000 bucket since
/// those rows carry no period of their own.
pub fn contribution_buckets(doc: &Document, account: NodeId) -> Vec<ContributionTotal> {
    let mut totals: BTreeMap<(PayerRole, ContributionPeriod), f64> = BTreeMap::new();
    let mut employee_has_layers = false;
    let mut employer_has_layers = false;

    for layer in nested_named(doc, account, BLOCK_ITROT_TAG, PERUT_YITRA_LETKUFA_TAG) {
        let amount = match child_amount(doc, layer, SHICHVA_AMOUNT_TAG) {
            Some(amount) => amount,
            None => continue,
        };
        let role = match doc
            .child_text(layer, REKIV_TAG)
            .and_then(PayerRole::from_rekiv_code)
        {
            Some(role) => role,
            None => continue,
        };
        let period = match doc
            .child_text(layer, TECHULAT_TAG)
            .and_then(ContributionPeriod::from_techulat_code)
        {
            Some(period) => period,
            None => continue,
        };

        match role {
            PayerRole::Employee => employee_has_layers = true,
            PayerRole::Employer => employer_has_layers = true,
        }
        *totals.entry((role, period)).or_insert(0.0) += amount;
    }

    if !employee_has_layers || !employer_has_layers {
        for summary in nested_named(doc, account, BLOCK_ITROT_TAG, PERUT_YITROT_TAG) {
            let sug = match doc.child_text(summary, SUG_HAFRASHA_TAG) {
                Some(sug) => sug,
                None => continue,
            };
            let amount = match child_amount(doc, summary, FALLBACK_AMOUNT_TAG) {
                Some(amount) => amount,
                None => continue,
            };
            let role = match PayerRole::from_hafrasha_code(sug) {
                Some(PayerRole::Employee) if !employee_has_layers => PayerRole::Employee,
                Some(PayerRole::Employer) if !employer_has_layers => PayerRole::Employer,
                _ => continue,
            };
            debug!("Recovered {:?} contribution from deposit-type code {}", role, sug);
            *totals.entry((role, ContributionPeriod::After2000)).or_insert(0.0) += amount;
        }
    }

    let mut buckets = Vec::new();
    for &role in &PayerRole::ALL {
        for &period in &ContributionPeriod::ALL {
            if let Some(&amount) = totals.get(&(role, period)) {
                if amount != 0.0 {
                    buckets.push(ContributionTotal { role, period, amount });
                }
            }
        }
    }
    buckets
}
