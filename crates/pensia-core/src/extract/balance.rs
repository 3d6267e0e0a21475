//! Balance resolution across competing reporting layouts.

use tracing::debug;

use crate::document::{Document, NodeId};
use crate::models::config::ExtractionConfig;

use super::resolve::{child_amount, nested_named};
use super::tags::{
    BALANCE_DATE_FALLBACK_TAG, BALANCE_DATE_TAGS, BALANCE_TOLERANCE, BLOCK_ITROT_TAG,
    END_YEAR_FIELDS, END_YEAR_TAG, GENERIC_BALANCE_TAGS, MASLUL_FIELDS, MASLUL_TAG,
    PERUT_YITROT_FIELDS, PERUT_YITROT_TAG, SCAN_WEIGHT_FRAGMENTS, START_DATE_TAG,
};
use super::value::{normalize_date, parse_amount};

/// Best-estimate balance for an account.
///
/// Strategies run from most to least authoritative and the first one
/// where any node resolves a value commits, even when its total is
/// zero. Totals within [`BALANCE_TOLERANCE`] of zero collapse to 0.0.
pub fn resolve_balance(doc: &Document, account: NodeId, config: &ExtractionConfig) -> f64 {
    // Per-track summaries, the richest layout.
    let track_nodes = nested_named(doc, account, BLOCK_ITROT_TAG, PERUT_YITROT_TAG);
    if let Some(total) = sum_first_field(doc, &track_nodes, PERUT_YITROT_FIELDS) {
        return snap_to_zero(total);
    }

    // Investment-track details.
    let maslul_nodes: Vec<NodeId> = doc
        .descendants(account)
        .filter(|&n| doc.tag(n) == MASLUL_TAG)
        .collect();
    if let Some(total) = sum_first_field(doc, &maslul_nodes, MASLUL_FIELDS) {
        return snap_to_zero(total);
    }

    // Previous end-of-year summaries.
    let end_year_nodes: Vec<NodeId> = doc
        .descendants(account)
        .filter(|&n| doc.tag(n) == END_YEAR_TAG)
        .collect();
    if let Some(total) = sum_first_field(doc, &end_year_nodes, END_YEAR_FIELDS) {
        return snap_to_zero(total);
    }

    // Point balance fields directly under the account.
    for &field in GENERIC_BALANCE_TAGS {
        if let Some(value) = child_amount(doc, account, field) {
            if value > 0.0 {
                return value;
            }
        }
    }

    // Last resort: any positive number in the subtree, weighted toward
    // amount-like tag names.
    if config.numeric_scan_fallback {
        if let Some(value) = scan_numeric_candidates(doc, account) {
            debug!("Balance resolved by numeric scan: {}", value);
            return value;
        }
    }

    0.0
}

/// Sum the first resolvable candidate field of each node.
///
/// `None` when no node resolved any field, so callers can fall through
/// to the next strategy.
fn sum_first_field(doc: &Document, nodes: &[NodeId], fields: &[&str]) -> Option<f64> {
    let mut total = 0.0;
    let mut matched = 0usize;
    for &node in nodes {
        if let Some(value) = fields.iter().find_map(|field| child_amount(doc, node, field)) {
            total += value;
            matched += 1;
        }
    }
    (matched > 0).then_some(total)
}

fn snap_to_zero(total: f64) -> f64 {
    if total.abs() <= BALANCE_TOLERANCE { 0.0 } else { total }
}

fn scan_numeric_candidates(doc: &Document, account: NodeId) -> Option<f64> {
    let mut candidates: Vec<(f64, f64)> = Vec::new();
    for node in doc.subtree(account) {
        if let Some(text) = doc.text(node) {
            if !text.chars().any(|c| c.is_ascii_digit()) {
                continue;
            }
            if let Some(value) = parse_amount(text) {
                if value > 0.0 {
                    let tag = doc.tag(node).to_uppercase();
                    let weight = if SCAN_WEIGHT_FRAGMENTS.iter().any(|f| tag.contains(f)) {
                        2.0
                    } else {
                        1.0
                    };
                    candidates.push((weight, value));
                }
            }
        }
    }
    candidates
        .into_iter()
        .max_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(_, value)| value)
}

/// Valuation date for an account's balance, empty when not reported.
pub fn resolve_balance_date(doc: &Document, account: NodeId) -> String {
    for &field in BALANCE_DATE_TAGS {
        if let Some(value) = doc.child_text(account, field) {
            return normalize_date(value);
        }
    }
    let fallback = nested_named(doc, account, BLOCK_ITROT_TAG, BALANCE_DATE_FALLBACK_TAG);
    if let Some(&node) = fallback.first() {
        if let Some(text) = doc.text(node) {
            return normalize_date(text);
        }
    }
    String::new()
}

/// First enrollment date, empty when not reported.
pub fn resolve_start_date(doc: &Document, account: NodeId) -> String {
    doc.child_text(account, START_DATE_TAG)
        .map(normalize_date)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn config() -> ExtractionConfig {
        ExtractionConfig::default()
    }

    fn parse(xml: &str) -> Document {
        Document::parse(xml).unwrap()
    }

    #[test]
    fn per_track_summaries_beat_point_fields() {
        let doc = parse(
            "<Heshbon>\
               <SCHUM-HON-EFSHAR>5000</SCHUM-HON-EFSHAR>\
               <BlockItrot>\
                 <PerutYitrot><TOTAL-CHISACHON-MTZBR>600</TOTAL-CHISACHON-MTZBR></PerutYitrot>\
                 <PerutYitrot><TOTAL-ERKEI-PIDION>400</TOTAL-ERKEI-PIDION></PerutYitrot>\
               </BlockItrot>\
             </Heshbon>",
        );
        assert_eq!(resolve_balance(&doc, doc.root(), &config()), 1000.0);
    }

    #[test]
    fn first_candidate_field_wins_per_node() {
        let doc = parse(
            "<Heshbon>\
               <BlockItrot><PerutYitrot>\
                 <TOTAL-CHISACHON-MTZBR>100</TOTAL-CHISACHON-MTZBR>\
                 <TOTAL-ERKEI-PIDION>999</TOTAL-ERKEI-PIDION>\
               </PerutYitrot></BlockItrot>\
             </Heshbon>",
        );
        assert_eq!(resolve_balance(&doc, doc.root(), &config()), 100.0);
    }

    #[test]
    fn matched_strategy_commits_even_at_zero() {
        // A summary that sums to zero must not fall through to the
        // point fields below it.
        let doc = parse(
            "<Heshbon>\
               <SCHUM-CHISACHON>5000</SCHUM-CHISACHON>\
               <BlockItrot>\
                 <PerutYitrot><TOTAL-CHISACHON-MTZBR>0</TOTAL-CHISACHON-MTZBR></PerutYitrot>\
               </BlockItrot>\
             </Heshbon>",
        );
        assert_eq!(resolve_balance(&doc, doc.root(), &config()), 0.0);
    }

    #[test]
    fn near_zero_totals_snap_to_zero() {
        let doc = parse(
            "<Heshbon><BlockItrot>\
               <PerutYitrot><TOTAL-CHISACHON-MTZBR>0.3</TOTAL-CHISACHON-MTZBR></PerutYitrot>\
             </BlockItrot></Heshbon>",
        );
        assert_eq!(resolve_balance(&doc, doc.root(), &config()), 0.0);
    }

    #[test]
    fn negative_totals_beyond_tolerance_are_kept() {
        let doc = parse(
            "<Heshbon><BlockItrot>\
               <PerutYitrot><TOTAL-CHISACHON-MTZBR>-100</TOTAL-CHISACHON-MTZBR></PerutYitrot>\
             </BlockItrot></Heshbon>",
        );
        assert_eq!(resolve_balance(&doc, doc.root(), &config()), -100.0);
    }

    #[test]
    fn track_details_and_end_year_summaries_fill_in() {
        let maslul = parse(
            "<Heshbon>\
               <PerutMasluleiHashkaa><SCHUM-TZVIRA-BAMASLUL>250</SCHUM-TZVIRA-BAMASLUL></PerutMasluleiHashkaa>\
               <PerutMasluleiHashkaa><SCHUM-TZVIRA-BAMASLUL>750</SCHUM-TZVIRA-BAMASLUL></PerutMasluleiHashkaa>\
             </Heshbon>",
        );
        assert_eq!(resolve_balance(&maslul, maslul.root(), &config()), 1000.0);

        let end_year = parse(
            "<Heshbon>\
               <PerutYitrotLesofShanaKodemet><YITRAT-SOF-SHANA>80</YITRAT-SOF-SHANA></PerutYitrotLesofShanaKodemet>\
             </Heshbon>",
        );
        assert_eq!(resolve_balance(&end_year, end_year.root(), &config()), 80.0);
    }

    #[test]
    fn point_fields_skip_non_positive_values() {
        let doc = parse(
            "<Heshbon>\
               <SCHUM-TZVIRA-BAMASLUL>0</SCHUM-TZVIRA-BAMASLUL>\
               <YITRAT-KASPEY-TAGMULIM>-5</YITRAT-KASPEY-TAGMULIM>\
               <TOTAL-CHISACHON-MTZBR>4200.50</TOTAL-CHISACHON-MTZBR>\
             </Heshbon>",
        );
        assert_eq!(resolve_balance(&doc, doc.root(), &config()), 4200.5);
    }

    #[test]
    fn numeric_scan_prefers_amount_like_tags() {
        let doc = parse(
            "<Heshbon>\
               <MISPAR-XYZ>999999</MISPAR-XYZ>\
               <Wrap><YITRAT-KLUM>10</YITRAT-KLUM></Wrap>\
             </Heshbon>",
        );
        assert_eq!(resolve_balance(&doc, doc.root(), &config()), 10.0);
    }

    #[test]
    fn numeric_scan_can_be_disabled() {
        let doc = parse("<Heshbon><MISPAR-XYZ>999999</MISPAR-XYZ></Heshbon>");
        let config = ExtractionConfig {
            numeric_scan_fallback: false,
            ..ExtractionConfig::default()
        };
        assert_eq!(resolve_balance(&doc, doc.root(), &config), 0.0);
    }

    #[test]
    fn balance_date_prefers_direct_children() {
        let doc = parse(
            "<Heshbon>\
               <TAARICH-NECHONUT>20240630</TAARICH-NECHONUT>\
               <BlockItrot><TAARICH-ERECH-TZVIROT>20231231</TAARICH-ERECH-TZVIROT></BlockItrot>\
             </Heshbon>",
        );
        assert_eq!(resolve_balance_date(&doc, doc.root()), "2024-06-30");
    }

    #[test]
    fn balance_date_falls_back_to_track_blocks() {
        let doc = parse(
            "<Heshbon>\
               <BlockItrot><TAARICH-ERECH-TZVIROT>20231231</TAARICH-ERECH-TZVIROT></BlockItrot>\
             </Heshbon>",
        );
        assert_eq!(resolve_balance_date(&doc, doc.root()), "2023-12-31");

        let none = parse("<Heshbon><X>1</X></Heshbon>");
        assert_eq!(resolve_balance_date(&none, none.root()), "");
    }

    #[test]
    fn start_date_reads_the_enrollment_field() {
        let doc = parse("<Heshbon><TAARICH-HITZTARFUT-RISHON>199905</TAARICH-HITZTARFUT-RISHON></Heshbon>");
        assert_eq!(resolve_start_date(&doc, doc.root()), "1999-05");

        let none = parse("<Heshbon><X>1</X></Heshbon>");
        assert_eq!(resolve_start_date(&none, none.root()), "");
    }
}
