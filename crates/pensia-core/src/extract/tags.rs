//! Tag tables and code maps shared by the extraction passes.
//!
//! Vendor feeds name the same concept differently; each table lists the
//! known spellings in priority order. Orders are load-bearing: the first
//! match wins everywhere a table is consumed.

use crate::models::record::SeveranceCategory;

/// Container tags that mark an account element.
pub const ACCOUNT_CONTAINER_TAGS: &[&str] = &[
    "HeshbonOPolisa",
    "Heshbon",
    "Account",
    "Policy",
    "Polisa",
    "PensionAccount",
    "PensionPolicy",
    "KupatGemel",
    "BituachMenahalim",
    "KerenPensia",
];

/// Direct-child tags that make an element look like an account.
pub const ACCOUNT_CHILD_HINTS: &[&str] = &[
    "MISPAR-POLISA-O-HESHBON",
    "MISPAR-HESHBON",
    "MISPAR-POLISA",
    "SHEM-YATZRAN",
    "YATZRAN",
    "SHEM-TOCHNIT",
    "TOCHNIT",
];

/// Account-number tags that justify treating the whole document as one account.
pub const ROOT_ACCOUNT_HINTS: &[&str] =
    &["MISPAR-POLISA-O-HESHBON", "MISPAR-HESHBON", "MISPAR-POLISA"];

/// Account number candidates.
pub const ACCOUNT_NUMBER_TAGS: &[&str] = &[
    "MISPAR-POLISA-O-HESHBON",
    "MISPAR-HESHBON",
    "MISPAR-POLISA",
    "AccountNumber",
    "AccountId",
    "PolicyNumber",
];

/// Issuer name candidates looked up directly under the account.
pub const ISSUER_NAME_TAGS: &[&str] =
    &["SHEM-YATZRAN", "YATZRAN", "SHEM_HA_MOSAD", "Company", "Provider"];

/// Plan name candidates.
pub const PLAN_NAME_TAGS: &[&str] = &["SHEM-TOCHNIT", "TOCHNIT", "SHEM_TOCHNIT"];

/// Managing company name tags.
pub const MANAGING_COMPANY_NAME_TAGS: &[&str] = &[
    "SHEM-METAFEL",
    "SHEM-YATZRAN",
    "SHEM_HA_MOSAD",
    "Provider",
    "Company",
];

/// Managing company identifier-code tags.
pub const MANAGING_COMPANY_CODE_TAGS: &[&str] = &[
    "KOD-MEZAHE-METAFEL",
    "KOD-MEZAHE-YATZRAN",
    "KOD-YATZRAN",
    "MEZAHE-YATZRAN",
];

/// All managing-company tags captured for traceability, names before codes.
pub const MANAGING_COMPANY_TAGS: &[&str] = &[
    "SHEM-METAFEL",
    "SHEM-YATZRAN",
    "SHEM_HA_MOSAD",
    "Provider",
    "Company",
    "KOD-MEZAHE-METAFEL",
    "KOD-MEZAHE-YATZRAN",
    "KOD-YATZRAN",
    "MEZAHE-YATZRAN",
];

/// Captured issuer collection preferred for the display name.
pub const ISSUER_DISPLAY_TAG: &str = "SHEM-YATZRAN";

/// Plan-type tags captured for traceability.
pub const PLAN_TYPE_TAGS: &[&str] = &[
    "SUG-TOCHNIT-O-CHESHBON",
    "SUG-POLISA",
    "SUG-MUTZAR",
    "SUG-KEREN-PENSIA",
    "SUG-KUPA",
    "SUG-HAFRASHA",
];

// Balance resolution.

/// Wrapper around per-track and per-layer balance blocks.
pub const BLOCK_ITROT_TAG: &str = "BlockItrot";

/// Per-track summary node under [`BLOCK_ITROT_TAG`].
pub const PERUT_YITROT_TAG: &str = "PerutYitrot";

/// Amount fields tried on each per-track summary node.
pub const PERUT_YITROT_FIELDS: &[&str] = &["TOTAL-CHISACHON-MTZBR", "TOTAL-ERKEI-PIDION"];

/// Investment-track detail node.
pub const MASLUL_TAG: &str = "PerutMasluleiHashkaa";

/// Amount fields tried on each investment-track node.
pub const MASLUL_FIELDS: &[&str] = &["SCHUM-TZVIRA-BAMASLUL", "TOTAL-CHISACHON-MTZBR"];

/// Previous-end-of-year summary node.
pub const END_YEAR_TAG: &str = "PerutYitrotLesofShanaKodemet";

/// Amount fields tried on each end-of-year node.
pub const END_YEAR_FIELDS: &[&str] = &["YITRAT-SOF-SHANA", "TOTAL-CHISACHON-MTZBR"];

/// Point balance fields looked up directly under the account.
pub const GENERIC_BALANCE_TAGS: &[&str] = &[
    "SCHUM-TZVIRA-BAMASLUL",
    "YITRAT-KASPEY-TAGMULIM",
    "TOTAL-CHISACHON-MTZBR",
    "TOTAL-ERKEI-PIDION",
    "SCHUM-HON-EFSHAR",
    "SCHUM-CHISACHON",
    "SCHUM-TAGMULIM",
    "SCHUM-PITURIM",
    "ERECH-PIDION-PITZUIM-LEKITZBA-MAAVIDIM-KODMIM",
    "ERECH-PIDION-PITZUIM-MAASIK-NOCHECHI",
];

/// Uppercase tag fragments that double a candidate's weight in the numeric scan.
pub const SCAN_WEIGHT_FRAGMENTS: &[&str] = &["SCHUM", "YITRAT", "ERECH"];

/// Balance valuation date fields, direct children of the account.
pub const BALANCE_DATE_TAGS: &[&str] = &[
    "TAARICH-NECHONUT",
    "TAARICH-ERECH-TZVIROT",
    "TAARICH-ERECH",
    "TAARICH-MADAD",
    "TAARICH-ERECH-HAFKADA",
];

/// Valuation date fallback searched under [`BLOCK_ITROT_TAG`].
pub const BALANCE_DATE_FALLBACK_TAG: &str = "TAARICH-ERECH-TZVIROT";

/// First enrollment date field.
pub const START_DATE_TAG: &str = "TAARICH-HITZTARFUT-RISHON";

/// Absolute difference treated as a rounding artifact rather than a real amount.
pub const BALANCE_TOLERANCE: f64 = 0.5;

// Component decomposition.

/// Exact tags always captured into the raw balance-field map.
pub const BALANCE_EXPLICIT_TAGS: &[&str] = &[
    "TOTAL-CHISACHON-MTZBR",
    "TOTAL-ERKEI-PIDION",
    "YITRAT-KASPEY-TAGMULIM",
    "YITRAT-PITZUIM",
    "YITRAT-PITZUIM-MAASIK-NOCHECHI",
    "YITRAT-PITZUIM-LEKITZBA-MAAVIDIM-KODMIM",
    "ERECH-PIDION-PITZUIM-MAASIK-NOCHECHI",
    "ERECH-PIDION-PITZUIM-LEKITZBA-MAAVIDIM-KODMIM",
    "TOTAL-HAFKADOT-OVED-TAGMULIM-SHANA-NOCHECHIT",
    "TOTAL-HAFKADOT-MAAVID-TAGMULIM-SHANA-NOCHECHIT",
    "TOTAL-HAFKADOT-PITZUIM-SHANA-NOCHECHIT",
    "SCHUM-HAFKADA-SHESHULAM",
    "SCHUM-TAGMULIM",
    "SCHUM-PITURIM",
];

/// Uppercase tag fragments that mark a tag as contribution or severance related.
pub const BALANCE_KEYWORD_FRAGMENTS: &[&str] = &["TAGMUL", "PITZ", "PITZU", "PITZUI"];

/// Contribution layer node under [`BLOCK_ITROT_TAG`].
pub const PERUT_YITRA_LETKUFA_TAG: &str = "PerutYitraLeTkufa";

/// Balance-component code on a contribution layer.
pub const REKIV_TAG: &str = "REKIV-ITRA-LETKUFA";

/// Layer-inception code on a contribution layer.
pub const TECHULAT_TAG: &str = "KOD-TECHULAT-SHICHVA";

/// Layer amount field.
pub const SHICHVA_AMOUNT_TAG: &str = "SACH-ITRA-LESHICHVA-BESHACH";

/// Deposit-type code used by the contribution fallback pass.
pub const SUG_HAFRASHA_TAG: &str = "KOD-SUG-HAFRASHA";

/// Amount field used by the contribution fallback pass.
pub const FALLBACK_AMOUNT_TAG: &str = "TOTAL-CHISACHON-MTZBR";

/// Severance categories and the captured tags that feed each of them.
pub const SEVERANCE_SOURCE_TAGS: &[(SeveranceCategory, &[&str])] = &[
    (
        SeveranceCategory::CurrentEmployer,
        &[
            "ERECH-PIDION-PITZUIM-MAASIK-NOCHECHI",
            "YITRAT-PITZUIM-MAASIK-NOCHECHI",
        ],
    ),
    (
        SeveranceCategory::Settled,
        &["ERECH-PIDION-PITZUIM-LEKITZBA-MAAVIDIM-KODMIM"],
    ),
    (
        SeveranceCategory::Unsettled,
        &[
            "TZVIRAT-PITZUIM-PTURIM-MAAVIDIM-KODMIM",
            "YITRAT-PITZUIM-LELO-HITCHASHBENOT",
        ],
    ),
    (
        SeveranceCategory::PriorEmployersRightsSequence,
        &["TZVIRAT-PITZUIM-MAAVIDIM-KODMIM-BERETZEF-ZECHUYOT"],
    ),
    (
        SeveranceCategory::PriorEmployersAnnuitySequence,
        &["TZVIRAT-PITZUIM-MAAVIDIM-KODMIM-BERETZEF-KITZBA"],
    ),
];

/// Segment values that carry no numeric information.
pub const NUMERIC_SENTINELS: &[&str] = &["", "0", "0.0", "0.00", "NIL", "None", "none"];

// Product classification.

/// Product code tag.
pub const PRODUCT_CODE_TAG: &str = "SUG-MUTZAR";

/// Product codes (SUG-MUTZAR) and their canonical labels.
pub const PRODUCT_TYPE_CODES: &[(&str, &str)] = &[
    ("1", "פוליסת ביטוח חיים משולב חיסכון"),
    ("2", "פוליסת ביטוח חיים"),
    ("3", "קופת גמל"),
    ("4", "קרן פנסיה"),
    ("5", "פוליסת חיסכון טהור"),
];

/// Code labels that yield to a pension or study-fund name label.
pub const INSURANCE_FAMILY_LABELS: &[&str] = &[
    "פוליסת ביטוח חיים משולב חיסכון",
    "פוליסת ביטוח חיים",
    "פוליסת חיסכון טהור",
];

/// Name labels that override an insurance-family code label.
pub const NAME_PRIORITY_LABELS: &[&str] = &["קרן פנסיה", "קרן השתלמות"];

// Employer history.

/// Employer and payer name tags.
pub const EMPLOYER_NAME_TAGS: &[&str] = &[
    "SHEM-MAASIK",
    "SHEM-MESHALEM",
    "SHEM-BAAL-POLISA-SHEEINO-MEVUTAH",
    "SHEM-BAAL-POLISA",
    "SHEM-MAFKID",
    "SHEM-BEALIM",
    "SHEM-HAMESHALLEM",
];

// Person details.

/// Customer subtree containers, preferred first.
pub const CUSTOMER_CONTAINER_TAGS: &[&str] = &["YeshutLakoach", "Lakoach"];

/// Identity number candidates.
pub const PERSON_ID_TAGS: &[&str] = &["MISPAR-ZIHUY-LAKOACH", "MISPAR-ZEHUT", "MISPAR-ZIHUY"];

/// First name candidates.
pub const FIRST_NAME_TAGS: &[&str] = &["SHEM-PRATI", "SHEM-PRATI-LAKOACH"];

/// Last name candidates.
pub const LAST_NAME_TAGS: &[&str] = &["SHEM-MISHPACHA", "SHEM-MISHPACHA-LAKOACH"];

/// Birth date candidates.
pub const BIRTH_DATE_TAGS: &[&str] = &["TAARICH-LEIDA", "TAARICH-LEYDA"];
