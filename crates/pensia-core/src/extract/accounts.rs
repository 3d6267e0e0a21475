//! Account boundary detection.

use tracing::debug;

use crate::document::{Document, NodeId};
use crate::models::config::ExtractionConfig;

use super::tags::{ACCOUNT_CHILD_HINTS, ACCOUNT_CONTAINER_TAGS, ROOT_ACCOUNT_HINTS};

/// Locate the account elements of a document.
///
/// Strategies are mutually exclusive and tried in order: known
/// container tags, then nodes whose direct children look account-like,
/// then the whole document as a single account when a bare
/// account-number tag exists anywhere.
pub fn locate_accounts(doc: &Document, config: &ExtractionConfig) -> Vec<NodeId> {
    let root = doc.root();

    let mut accounts: Vec<NodeId> = Vec::new();
    for &container in ACCOUNT_CONTAINER_TAGS {
        accounts.extend(doc.descendants(root).filter(|&n| doc.tag(n) == container));
    }
    if !accounts.is_empty() {
        debug!("Found {} known account containers", accounts.len());
        return accounts;
    }

    if config.structural_account_fallback {
        let structural: Vec<NodeId> = doc
            .subtree(root)
            .filter(|&node| {
                doc.children(node)
                    .iter()
                    .any(|&child| ACCOUNT_CHILD_HINTS.contains(&doc.tag(child)))
            })
            .collect();
        if !structural.is_empty() {
            debug!("Found {} account-like elements by shape", structural.len());
            return structural;
        }
    }

    if ROOT_ACCOUNT_HINTS
        .iter()
        .any(|tag| doc.descendant(root, tag).is_some())
    {
        debug!("Treating the document root as a single account");
        return vec![root];
    }

    Vec::new()
}
