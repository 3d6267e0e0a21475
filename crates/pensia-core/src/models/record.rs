//! Account and person data models for pension disclosure extraction.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Label used when a source document does not carry a field.
pub const UNKNOWN: &str = "לא ידוע";

/// A single extracted retirement-savings account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountRecord {
    /// Account or policy number.
    pub account_number: String,

    /// Plan name as reported by the issuer.
    pub plan_name: String,

    /// Managing company display name.
    pub company_name: String,

    /// Managing company identifier code.
    pub company_code: String,

    /// Best-estimate accumulated balance.
    pub balance: f64,

    /// Valuation date of the balance.
    pub balance_date: String,

    /// First enrollment date, empty when not reported.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub start_date: String,

    /// Normalized product classification.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub product_type: String,

    /// Severance components with a nonzero total.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub severance: Vec<SeveranceTotal>,

    /// Contribution buckets with a nonzero total.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub contributions: Vec<ContributionTotal>,

    /// Sum of all contribution buckets.
    pub contribution_total: f64,

    /// Sum of all severance components.
    pub severance_total: f64,

    /// Contributions plus severance.
    pub component_total: f64,

    /// Balance minus components, zero when within tolerance.
    pub balance_discrepancy: f64,

    /// Employer and payer names in first-seen order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub employers: Vec<String>,

    /// Raw managing-company fields kept for traceability.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub company_fields: BTreeMap<String, String>,

    /// Raw plan-type fields kept for traceability.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub plan_type_fields: BTreeMap<String, String>,

    /// Raw contribution and severance fields kept for traceability.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub balance_fields: BTreeMap<String, String>,
}

impl AccountRecord {
    /// Amount recorded for a severance category, if present.
    pub fn severance_amount(&self, category: SeveranceCategory) -> Option<f64> {
        self.severance
            .iter()
            .find(|s| s.category == category)
            .map(|s| s.amount)
    }

    /// Amount recorded for a contribution bucket, if present.
    pub fn contribution_amount(
        &self,
        role: PayerRole,
        period: ContributionPeriod,
    ) -> Option<f64> {
        self.contributions
            .iter()
            .find(|c| c.role == role && c.period == period)
            .map(|c| c.amount)
    }
}

impl Default for AccountRecord {
    fn default() -> Self {
        Self {
            account_number: UNKNOWN.to_string(),
            plan_name: UNKNOWN.to_string(),
            company_name: UNKNOWN.to_string(),
            company_code: UNKNOWN.to_string(),
            balance: 0.0,
            balance_date: UNKNOWN.to_string(),
            start_date: String::new(),
            product_type: String::new(),
            severance: Vec::new(),
            contributions: Vec::new(),
            contribution_total: 0.0,
            severance_total: 0.0,
            component_total: 0.0,
            balance_discrepancy: 0.0,
            employers: Vec::new(),
            company_fields: BTreeMap::new(),
            plan_type_fields: BTreeMap::new(),
            balance_fields: BTreeMap::new(),
        }
    }
}

/// Severance component categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeveranceCategory {
    /// Severance held with the current employer.
    CurrentEmployer,
    /// Severance from prior employers already settled for annuity.
    Settled,
    /// Severance that never went through settlement.
    Unsettled,
    /// Prior-employer severance kept under a rights-sequence arrangement.
    PriorEmployersRightsSequence,
    /// Prior-employer severance kept under an annuity-sequence arrangement.
    PriorEmployersAnnuitySequence,
}

impl SeveranceCategory {
    /// All categories in reporting order.
    pub const ALL: [SeveranceCategory; 5] = [
        SeveranceCategory::CurrentEmployer,
        SeveranceCategory::Settled,
        SeveranceCategory::Unsettled,
        SeveranceCategory::PriorEmployersRightsSequence,
        SeveranceCategory::PriorEmployersAnnuitySequence,
    ];

    /// Hebrew column label used in flattened reports.
    pub fn label(&self) -> &'static str {
        match self {
            SeveranceCategory::CurrentEmployer => "פיצויים מעסקי נוכחי",
            SeveranceCategory::Settled => "פיצויים לאחר התחשבנות",
            SeveranceCategory::Unsettled => "פיצויים שלא עברו התחשבנות",
            SeveranceCategory::PriorEmployersRightsSequence => {
                "פיצויים ממעסיקים קודמים ברצף זכויות"
            }
            SeveranceCategory::PriorEmployersAnnuitySequence => {
                "פיצויים ממעסיקים קודמים ברצף קצבה"
            }
        }
    }
}

/// A severance component total.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeveranceTotal {
    /// Component category.
    pub category: SeveranceCategory,
    /// Accumulated amount.
    pub amount: f64,
}

/// Who paid a contribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayerRole {
    Employee,
    Employer,
}

impl PayerRole {
    /// Both roles in reporting order.
    pub const ALL: [PayerRole; 2] = [PayerRole::Employee, PayerRole::Employer];

    /// Hebrew label used in column names.
    pub fn label(&self) -> &'static str {
        match self {
            PayerRole::Employee => "עובד",
            PayerRole::Employer => "מעביד",
        }
    }

    /// Map a balance-component code (REKIV-ITRA-LETKUFA) to the paying role.
    pub fn from_rekiv_code(code: &str) -> Option<Self> {
        match code {
            "2" | "8" => Some(PayerRole::Employee),
            "3" | "9" => Some(PayerRole::Employer),
            _ => None,
        }
    }

    /// Map a deposit-type code (KOD-SUG-HAFRASHA) to the paying role.
    pub fn from_hafrasha_code(code: &str) -> Option<Self> {
        match code {
            "2" | "4" | "8" | "10" => Some(PayerRole::Employee),
            "3" | "7" | "9" | "11" => Some(PayerRole::Employer),
            _ => None,
        }
    }
}

/// Regulatory period a contribution layer is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ContributionPeriod {
    #[serde(rename = "before_2000")]
    Before2000,
    #[serde(rename = "after_2000")]
    After2000,
    #[serde(rename = "after_2008_non_paying")]
    After2008NonPaying,
}

impl ContributionPeriod {
    /// All periods in reporting order.
    pub const ALL: [ContributionPeriod; 3] = [
        ContributionPeriod::Before2000,
        ContributionPeriod::After2000,
        ContributionPeriod::After2008NonPaying,
    ];

    /// Hebrew label used in column names.
    pub fn label(&self) -> &'static str {
        match self {
            ContributionPeriod::Before2000 => "עד 2000",
            ContributionPeriod::After2000 => "אחרי 2000",
            ContributionPeriod::After2008NonPaying => "אחרי 2008 (קצבה לא משלמת)",
        }
    }

    /// Map a layer-inception code (KOD-TECHULAT-SHICHVA) to its period.
    pub fn from_techulat_code(code: &str) -> Option<Self> {
        match code {
            "1" => Some(ContributionPeriod::Before2000),
            "2" => Some(ContributionPeriod::After2000),
            "7" | "9" | "13" => Some(ContributionPeriod::After2008NonPaying),
            _ => None,
        }
    }
}

/// A contribution bucket total for one payer role and period.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContributionTotal {
    /// Who paid the contribution.
    pub role: PayerRole,
    /// Regulatory period the amount is attributed to.
    pub period: ContributionPeriod,
    /// Accumulated amount.
    pub amount: f64,
}

impl ContributionTotal {
    /// Hebrew column label for this bucket.
    pub fn label(&self) -> String {
        Self::column_label(self.role, self.period)
    }

    /// Hebrew column label for a role and period pair.
    pub fn column_label(role: PayerRole, period: ContributionPeriod) -> String {
        format!("תגמולי {} {}", role.label(), period.label())
    }
}

/// Personal details of the document's main client.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PersonDetails {
    /// National identity number with leading zeros stripped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_number: Option<String>,

    /// Full name composed of first and last name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,

    /// Normalized birth date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,

    /// Composed postal address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_address: Option<String>,

    /// Landline phone number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    /// Mobile phone number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,

    /// Email address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Raw gender code as reported.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender_code: Option<String>,

    /// Gender label derived from the code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
}

impl PersonDetails {
    /// True when no field was extracted.
    pub fn is_empty(&self) -> bool {
        self.id_number.is_none()
            && self.full_name.is_none()
            && self.birth_date.is_none()
            && self.full_address.is_none()
            && self.phone.is_none()
            && self.mobile.is_none()
            && self.email.is_none()
            && self.gender_code.is_none()
            && self.gender.is_none()
    }
}

/// Extraction result for a single document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileResult {
    /// Source file name.
    pub file: String,

    /// Accounts found in the document.
    pub accounts: Vec<AccountRecord>,

    /// Person details, when a customer subtree exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub person_details: Option<PersonDetails>,

    /// When the document was processed.
    pub processed_at: DateTime<Utc>,
}
