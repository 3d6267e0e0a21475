//! Generic field resolution over the document tree.
//!
//! Every extraction pass reduces to the same moves: scan a subtree for
//! a tag, optionally widen the scan to enclosing scopes, and keep the
//! first or all of the values found. The helpers here implement those
//! moves once, on top of the arena accessors.

use std::collections::{BTreeMap, HashSet};

use crate::document::{Document, NodeId};

use super::value::parse_amount;

/// Collect the non-empty text of every descendant named `tag`.
///
/// With `include_ancestors` the scan repeats from each enclosing node
/// up to the root, so sibling scopes of the start node contribute too.
/// Values are deduplicated preserving first-seen order.
pub fn collect_values(
    doc: &Document,
    start: NodeId,
    tag: &str,
    include_ancestors: bool,
) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut values: Vec<String> = Vec::new();
    scan_tag_values(doc, start, tag, &mut seen, &mut values);
    if include_ancestors {
        for ancestor in doc.ancestors(start) {
            scan_tag_values(doc, ancestor, tag, &mut seen, &mut values);
        }
    }
    values
}

fn scan_tag_values<'a>(
    doc: &'a Document,
    base: NodeId,
    tag: &str,
    seen: &mut HashSet<&'a str>,
    values: &mut Vec<String>,
) {
    for node in doc.descendants(base) {
        if doc.tag(node) != tag {
            continue;
        }
        if let Some(text) = doc.text(node) {
            let text = text.trim();
            if !text.is_empty() && seen.insert(text) {
                values.push(text.to_string());
            }
        }
    }
}

/// Collect several tags at once, joining repeated values with `" | "`.
///
/// Tags with no values are left out of the map.
pub fn collect_tagged(
    doc: &Document,
    start: NodeId,
    tags: &[&str],
    include_ancestors: bool,
) -> BTreeMap<String, String> {
    let mut collected = BTreeMap::new();
    for &tag in tags {
        let values = collect_values(doc, start, tag, include_ancestors);
        if !values.is_empty() {
            collected.insert(tag.to_string(), values.join(" | "));
        }
    }
    collected
}

/// First non-empty direct-child text over an ordered list of candidate tags.
pub fn first_child_text(doc: &Document, node: NodeId, tags: &[&str]) -> Option<String> {
    tags.iter()
        .find_map(|tag| doc.child_text(node, tag).map(str::to_string))
}

/// First collected value over an ordered list of candidate tags,
/// ancestor scopes included.
pub fn first_collected(doc: &Document, node: NodeId, tags: &[&str]) -> Option<String> {
    for &tag in tags {
        if let Some(first) = collect_values(doc, node, tag, true).into_iter().next() {
            return Some(first);
        }
    }
    None
}

/// Parse a direct-child field of a node as an amount.
pub fn child_amount(doc: &Document, node: NodeId, tag: &str) -> Option<f64> {
    doc.child_text(node, tag).and_then(parse_amount)
}

/// Nodes named `inner` anywhere under a descendant named `outer`, in
/// document order. Nested `outer` wrappers cannot double-count a node.
pub fn nested_named(doc: &Document, start: NodeId, outer: &str, inner: &str) -> Vec<NodeId> {
    let mut seen: HashSet<NodeId> = HashSet::new();
    let mut matches = Vec::new();
    for block in doc.descendants(start) {
        if doc.tag(block) != outer {
            continue;
        }
        for node in doc.descendants(block) {
            if doc.tag(node) == inner && seen.insert(node) {
                matches.push(node);
            }
        }
    }
    matches
}
