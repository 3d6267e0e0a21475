//! Employer history collection.

use std::collections::HashSet;

use crate::document::{Document, NodeId};

use super::resolve::collect_values;
use super::tags::EMPLOYER_NAME_TAGS;
use super::value::clean_name;

/// Collect employer and payer names for an account.
///
/// Names are cleaned, deduplicated across all source tags, and kept in
/// first-seen order so the current employer tends to come first.
pub fn collect_employers(doc: &Document, account: NodeId) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut names = Vec::new();
    for &tag in EMPLOYER_NAME_TAGS {
        for value in collect_values(doc, account, tag, true) {
            let cleaned = clean_name(&value);
            if cleaned.is_empty() || !seen.insert(cleaned.clone()) {
                continue;
            }
            names.push(cleaned);
        }
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn deduplicates_across_tags_in_first_seen_order() {
        let doc = Document::parse(
            "<Heshbon>\
               <A><SHEM-MAASIK>אלביט מערכות</SHEM-MAASIK></A>\
               <B><SHEM-MAASIK>רפאל</SHEM-MAASIK></B>\
               <C><SHEM-MESHALEM>אלביט מערכות</SHEM-MESHALEM></C>\
               <D><SHEM-BAAL-POLISA>תעש</SHEM-BAAL-POLISA></D>\
             </Heshbon>",
        )
        .unwrap();
        let employers = collect_employers(&doc, doc.root());
        assert_eq!(employers, vec!["אלביט מערכות", "רפאל", "תעש"]);
    }

    #[test]
    fn names_are_cleaned_before_deduplication() {
        let doc = Document::parse(
            "<Heshbon>\
               <A><SHEM-MAASIK>\"אלביט\"</SHEM-MAASIK></A>\
               <B><SHEM-MESHALEM>אלביט</SHEM-MESHALEM></B>\
               <C><SHEM-MAFKID>''</SHEM-MAFKID></C>\
             </Heshbon>",
        )
        .unwrap();
        let employers = collect_employers(&doc, doc.root());
        assert_eq!(employers, vec!["אלביט"]);
    }

    #[test]
    fn names_from_enclosing_scopes_are_included() {
        let doc = Document::parse(
            "<Mimshak>\
               <YeshutMaasik><SHEM-MAASIK>משרד החינוך</SHEM-MAASIK></YeshutMaasik>\
               <Heshbon><MISPAR-HESHBON>1</MISPAR-HESHBON></Heshbon>\
             </Mimshak>",
        )
        .unwrap();
        let account = doc.child(doc.root(), "Heshbon").unwrap();
        assert_eq!(collect_employers(&doc, account), vec!["משרד החינוך"]);
    }
}
