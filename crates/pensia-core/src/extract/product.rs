//! Product-type classification from plan names and product codes.

use crate::document::{Document, NodeId};

use super::resolve::collect_values;
use super::tags::{
    INSURANCE_FAMILY_LABELS, NAME_PRIORITY_LABELS, PLAN_NAME_TAGS, PRODUCT_CODE_TAG,
    PRODUCT_TYPE_CODES,
};

/// Classify the product type of an account.
///
/// Plan names and product codes are classified independently and then
/// merged; when neither classifies, the raw plan name or code is
/// returned so downstream reports still show something meaningful.
pub fn classify_product_type(doc: &Document, account: NodeId) -> String {
    let mut plan_names: Vec<String> = Vec::new();
    for &tag in PLAN_NAME_TAGS {
        plan_names.extend(collect_values(doc, account, tag, true));
    }
    let name_label = plan_names.iter().find_map(|name| label_from_name(name));

    let codes = collect_values(doc, account, PRODUCT_CODE_TAG, true);
    let code_label = codes.iter().find_map(|code| label_from_code(code));

    merge_labels(name_label, code_label, &plan_names, &codes)
}

/// Keyword classification of a plan name. Rule order matters: the
/// specific investment-fund wording must win over the plain fund words
/// it contains.
fn label_from_name(name: &str) -> Option<&'static str> {
    if name.contains("גמל להשקעה") {
        return Some("גמל להשקעה");
    }
    if name.contains("השתלמות") {
        return Some("קרן השתלמות");
    }
    if name.contains("פנסיה") || name.contains("מקפת") || name.contains("עתודות") {
        return Some("קרן פנסיה");
    }
    if name.contains("גמל") {
        return Some("קופת גמל");
    }
    if name.contains("ביטוח")
        && (name.contains("חיים") || name.contains("מנהלים") || name.contains("מנהל"))
    {
        if name.contains("מקפת") || name.contains("פנסיה") {
            return Some("קרן פנסיה");
        }
        return Some("פוליסת ביטוח חיים");
    }
    if name.contains("חיסכון") || name.to_lowercase().contains("savings") {
        return Some("פוליסת חיסכון טהור");
    }
    None
}

/// Table classification of a product code.
fn label_from_code(code: &str) -> Option<&'static str> {
    let code = code.trim();
    PRODUCT_TYPE_CODES
        .iter()
        .find(|(key, _)| *key == code)
        .map(|&(_, label)| label)
}

/// Merge the name and code classifications.
///
/// The code is the more reliable signal, with one exception: an
/// insurance-family code label yields to a pension or study-fund name
/// label, since issuers reuse insurance product codes for those plans.
fn merge_labels(
    name_label: Option<&'static str>,
    code_label: Option<&'static str>,
    plan_names: &[String],
    codes: &[String],
) -> String {
    match (code_label, name_label) {
        (Some(code), Some(name)) => {
            if code == name {
                code.to_string()
            } else if INSURANCE_FAMILY_LABELS.contains(&code)
                && NAME_PRIORITY_LABELS.contains(&name)
            {
                name.to_string()
            } else {
                code.to_string()
            }
        }
        (Some(code), None) => code.to_string(),
        (None, Some(name)) => name.to_string(),
        (None, None) => plan_names
            .first()
            .or_else(|| codes.first())
            .cloned()
            .unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn classify(xml: &str) -> String {
        let doc = Document::parse(xml).unwrap();
        classify_product_type(&doc, doc.root())
    }

    #[test]
    fn name_keywords_classify_in_order() {
        assert_eq!(label_from_name("קופת גמל להשקעה מסלולית"), Some("גמל להשקעה"));
        assert_eq!(label_from_name("קרן השתלמות כללית"), Some("קרן השתלמות"));
        assert_eq!(label_from_name("מקפת אישית"), Some("קרן פנסיה"));
        assert_eq!(label_from_name("קופת גמל מסלולית"), Some("קופת גמל"));
        assert_eq!(label_from_name("ביטוח מנהלים"), Some("פוליסת ביטוח חיים"));
        assert_eq!(label_from_name("חיסכון לכל ילד"), Some("פוליסת חיסכון טהור"));
        assert_eq!(label_from_name("Smart Savings"), Some("פוליסת חיסכון טהור"));
        assert_eq!(label_from_name("תכנית אחרת"), None);
    }

    #[test]
    fn agreeing_signals_return_the_shared_label() {
        let label = classify(
            "<Heshbon>\
               <SHEM-TOCHNIT>קרן פנסיה מקיפה</SHEM-TOCHNIT>\
               <SUG-MUTZAR>4</SUG-MUTZAR>\
             </Heshbon>",
        );
        assert_eq!(label, "קרן פנסיה");
    }

    #[test]
    fn code_wins_plain_disagreements() {
        // Name says life insurance, code says pension fund: trust the code.
        let label = classify(
            "<Heshbon>\
               <SHEM-TOCHNIT>ביטוח מנהלים</SHEM-TOCHNIT>\
               <SUG-MUTZAR>4</SUG-MUTZAR>\
             </Heshbon>",
        );
        assert_eq!(label, "קרן פנסיה");
    }

    #[test]
    fn pension_name_overrides_insurance_family_code() {
        let label = classify(
            "<Heshbon>\
               <SHEM-TOCHNIT>פנסיה מקיפה</SHEM-TOCHNIT>\
               <SUG-MUTZAR>1</SUG-MUTZAR>\
             </Heshbon>",
        );
        assert_eq!(label, "קרן פנסיה");

        let study = classify(
            "<Heshbon>\
               <SHEM-TOCHNIT>השתלמות בהסדר</SHEM-TOCHNIT>\
               <SUG-MUTZAR>2</SUG-MUTZAR>\
             </Heshbon>",
        );
        assert_eq!(study, "קרן השתלמות");
    }

    #[test]
    fn single_signal_is_used_directly() {
        assert_eq!(classify("<Heshbon><SUG-MUTZAR>3</SUG-MUTZAR></Heshbon>"), "קופת גמל");
        assert_eq!(
            classify("<Heshbon><SHEM-TOCHNIT>עתודות ותיקה</SHEM-TOCHNIT></Heshbon>"),
            "קרן פנסיה"
        );
    }

    #[test]
    fn unclassified_falls_back_to_raw_values() {
        assert_eq!(
            classify("<Heshbon><SHEM-TOCHNIT>תכנית מיוחדת</SHEM-TOCHNIT></Heshbon>"),
            "תכנית מיוחדת"
        );
        assert_eq!(classify("<Heshbon><SUG-MUTZAR>77</SUG-MUTZAR></Heshbon>"), "77");
        assert_eq!(classify("<Heshbon><X>1</X></Heshbon>"), "");
    }

    #[test]
    fn plan_names_from_enclosing_scopes_still_classify() {
        let doc = Document::parse(
            "<Mimshak>\
               <SHEM-TOCHNIT>קרן השתלמות לעובדי הוראה</SHEM-TOCHNIT>\
               <Heshbon><MISPAR-HESHBON>1</MISPAR-HESHBON></Heshbon>\
             </Mimshak>",
        )
        .unwrap();
        let account = doc.child(doc.root(), "Heshbon").unwrap();
        assert_eq!(classify_product_type(&doc, account), "קרן השתלמות");
    }
}
