//! Person detail extraction from the customer subtree.

use crate::document::{Document, NodeId};
use crate::models::record::PersonDetails;

use super::resolve::first_child_text;
use super::tags::{
    BIRTH_DATE_TAGS, CUSTOMER_CONTAINER_TAGS, FIRST_NAME_TAGS, LAST_NAME_TAGS, PERSON_ID_TAGS,
};
use super::value::normalize_date;

/// Extract the main client's details.
///
/// `None` when the document has no customer subtree or the subtree
/// carries none of the known fields.
pub fn extract_person_details(doc: &Document) -> Option<PersonDetails> {
    let customer = CUSTOMER_CONTAINER_TAGS
        .iter()
        .find_map(|tag| doc.descendant(doc.root(), tag))?;

    let mut details = PersonDetails::default();

    if let Some(raw_id) = first_child_text(doc, customer, PERSON_ID_TAGS) {
        let stripped = raw_id.trim_start_matches('0').to_string();
        details.id_number = Some(if stripped.is_empty() { raw_id } else { stripped });
    }

    let first_name = first_child_text(doc, customer, FIRST_NAME_TAGS);
    let last_name = first_child_text(doc, customer, LAST_NAME_TAGS);
    if first_name.is_some() || last_name.is_some() {
        let parts: Vec<String> = [first_name, last_name].into_iter().flatten().collect();
        details.full_name = Some(parts.join(" "));
    }

    if let Some(birth) = first_child_text(doc, customer, BIRTH_DATE_TAGS) {
        details.birth_date = Some(normalize_date(&birth));
    }

    details.full_address = compose_address(doc, customer);
    details.phone = doc.child_text(customer, "MISPAR-TELEPHONE-KAVI").map(str::to_string);
    details.mobile = doc.child_text(customer, "MISPAR-CELLULARI").map(str::to_string);
    details.email = doc.descendant_text(customer, "E-MAIL").map(str::to_string);

    if let Some(code) = doc.child_text(customer, "MIN") {
        details.gender = match code {
            "1" => Some("זכר".to_string()),
            "2" => Some("נקבה".to_string()),
            _ => None,
        };
        details.gender_code = Some(code.to_string());
    }

    if details.is_empty() { None } else { Some(details) }
}

/// Compose a display address from street, house, entrance, apartment,
/// city, zip code, and country, in the customary Hebrew order.
fn compose_address(doc: &Document, customer: NodeId) -> Option<String> {
    let street = doc.child_text(customer, "SHEM-RECHOV");
    let house = doc.child_text(customer, "MISPAR-BAIT");
    let entrance = doc.child_text(customer, "MISPAR-KNISA");
    let apartment = doc.child_text(customer, "MISPAR-DIRA");
    let city = doc.child_text(customer, "SHEM-YISHUV");
    let zip_code = doc.child_text(customer, "MIKUD");
    let country = doc.child_text(customer, "ERETZ");

    let mut parts: Vec<String> = Vec::new();
    if let Some(street) = street {
        let mut clause = street.to_string();
        if let Some(house) = house {
            clause = format!("{} {}", clause, house);
        }
        if let Some(entrance) = entrance {
            clause = format!("{}, כניסה {}", clause, entrance);
        }
        if let Some(apartment) = apartment {
            clause = format!("{}, דירה {}", clause, apartment);
        }
        parts.push(clause);
    }
    if let Some(city) = city {
        parts.push(city.to_string());
    }
    if let Some(zip_code) = zip_code {
        parts.push(format!("מיקוד {}", zip_code));
    }
    if let Some(country) = country {
        parts.push(country.to_string());
    }

    if parts.is_empty() { None } else { Some(parts.join(", ")) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn extracts_a_full_person() {
        let doc = Document::parse(
            "<Mimshak><YeshutLakoach>\
               <MISPAR-ZIHUY-LAKOACH>012345678</MISPAR-ZIHUY-LAKOACH>\
               <SHEM-PRATI>ישראל</SHEM-PRATI>\
               <SHEM-MISHPACHA>כהן</SHEM-MISHPACHA>\
               <TAARICH-LEIDA>19800615</TAARICH-LEIDA>\
               <SHEM-RECHOV>הרצל</SHEM-RECHOV>\
               <MISPAR-BAIT>12</MISPAR-BAIT>\
               <MISPAR-DIRA>4</MISPAR-DIRA>\
               <SHEM-YISHUV>תל אביב</SHEM-YISHUV>\
               <MIKUD>61000</MIKUD>\
               <MISPAR-CELLULARI>0501234567</MISPAR-CELLULARI>\
               <MIN>1</MIN>\
               <Contact><E-MAIL>israel@example.com</E-MAIL></Contact>\
             </YeshutLakoach></Mimshak>",
        )
        .unwrap();

        let person = extract_person_details(&doc).unwrap();
        assert_eq!(person.id_number.as_deref(), Some("12345678"));
        assert_eq!(person.full_name.as_deref(), Some("ישראל כהן"));
        assert_eq!(person.birth_date.as_deref(), Some("1980-06-15"));
        assert_eq!(
            person.full_address.as_deref(),
            Some("הרצל 12, דירה 4, תל אביב, מיקוד 61000")
        );
        assert_eq!(person.mobile.as_deref(), Some("0501234567"));
        assert_eq!(person.email.as_deref(), Some("israel@example.com"));
        assert_eq!(person.gender.as_deref(), Some("זכר"));
        assert_eq!(person.gender_code.as_deref(), Some("1"));
    }

    #[test]
    fn missing_customer_subtree_gives_none() {
        let doc = Document::parse("<Mimshak><Heshbon><X>1</X></Heshbon></Mimshak>").unwrap();
        assert!(extract_person_details(&doc).is_none());
    }

    #[test]
    fn empty_customer_subtree_gives_none() {
        let doc = Document::parse("<Mimshak><Lakoach><IRRELEVANT>x</IRRELEVANT></Lakoach></Mimshak>")
            .unwrap();
        assert!(extract_person_details(&doc).is_none());
    }

    #[test]
    fn all_zero_ids_are_kept_verbatim() {
        let doc = Document::parse(
            "<Mimshak><YeshutLakoach><MISPAR-ZEHUT>000</MISPAR-ZEHUT></YeshutLakoach></Mimshak>",
        )
        .unwrap();
        let person = extract_person_details(&doc).unwrap();
        assert_eq!(person.id_number.as_deref(), Some("000"));
    }

    #[test]
    fn partial_names_still_compose() {
        let doc = Document::parse(
            "<Mimshak><YeshutLakoach><SHEM-MISHPACHA>לוי</SHEM-MISHPACHA></YeshutLakoach></Mimshak>",
        )
        .unwrap();
        let person = extract_person_details(&doc).unwrap();
        assert_eq!(person.full_name.as_deref(), Some("לוי"));
    }

    #[test]
    fn unknown_gender_codes_keep_the_code_only() {
        let doc = Document::parse(
            "<Mimshak><YeshutLakoach><MIN>3</MIN></YeshutLakoach></Mimshak>",
        )
        .unwrap();
        let person = extract_person_details(&doc).unwrap();
        assert_eq!(person.gender_code.as_deref(), Some("3"));
        assert!(person.gender.is_none());
    }

    #[test]
    fn preferred_container_wins() {
        let doc = Document::parse(
            "<Mimshak>\
               <Lakoach><SHEM-PRATI>ב</SHEM-PRATI></Lakoach>\
               <YeshutLakoach><SHEM-PRATI>א</SHEM-PRATI></YeshutLakoach>\
             </Mimshak>",
        )
        .unwrap();
        let person = extract_person_details(&doc).unwrap();
        assert_eq!(person.full_name.as_deref(), Some("א"));
    }
}
