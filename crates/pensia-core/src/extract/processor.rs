//! Per-document extraction orchestration.

use std::fs;
use std::path::Path;

use chrono::Utc;
use tracing::{debug, info};

use crate::document::{Document, NodeId};
use crate::error::Result;
use crate::models::config::PensiaConfig;
use crate::models::record::{AccountRecord, FileResult, UNKNOWN};

use super::accounts::locate_accounts;
use super::balance::{resolve_balance, resolve_balance_date, resolve_start_date};
use super::components::{collect_balance_fields, contribution_buckets, severance_components};
use super::employer::collect_employers;
use super::person::extract_person_details;
use super::product::classify_product_type;
use super::resolve::{collect_tagged, first_child_text, first_collected};
use super::tags::{
    ACCOUNT_NUMBER_TAGS, BALANCE_TOLERANCE, ISSUER_DISPLAY_TAG, ISSUER_NAME_TAGS,
    MANAGING_COMPANY_CODE_TAGS, MANAGING_COMPANY_NAME_TAGS, MANAGING_COMPANY_TAGS,
    PLAN_NAME_TAGS, PLAN_TYPE_TAGS,
};

/// Pension document extractor.
///
/// Holds the extraction configuration; a single instance can process
/// any number of documents since extraction keeps no state across
/// files.
pub struct PensionExtractor {
    config: PensiaConfig,
}

impl PensionExtractor {
    /// Create an extractor with default settings.
    pub fn new() -> Self {
        Self {
            config: PensiaConfig::default(),
        }
    }

    /// Create an extractor with the given configuration.
    pub fn with_config(config: PensiaConfig) -> Self {
        Self { config }
    }

    /// Enable or disable the structural account fallback.
    pub fn with_structural_fallback(mut self, enabled: bool) -> Self {
        self.config.extraction.structural_account_fallback = enabled;
        self
    }

    /// Enable or disable the last-resort numeric balance scan.
    pub fn with_numeric_scan(mut self, enabled: bool) -> Self {
        self.config.extraction.numeric_scan_fallback = enabled;
        self
    }

    /// Process a disclosure document from disk.
    pub fn process_file(&self, path: &Path) -> Result<FileResult> {
        let content = fs::read_to_string(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        self.process_str(&name, &content)
    }

    /// Process a disclosure document already in memory.
    pub fn process_str(&self, file_name: &str, content: &str) -> Result<FileResult> {
        let doc = Document::parse(content)?;

        let accounts = locate_accounts(&doc, &self.config.extraction);
        info!("Found {} accounts in {}", accounts.len(), file_name);

        let records = accounts
            .iter()
            .map(|&account| self.extract_account(&doc, account, file_name))
            .collect();

        Ok(FileResult {
            file: file_name.to_string(),
            accounts: records,
            person_details: extract_person_details(&doc),
            processed_at: Utc::now(),
        })
    }

    /// Assemble the record for one located account. Field extraction is
    /// infallible: anything missing degrades to a sentinel or an empty
    /// collection, never to an error.
    fn extract_account(&self, doc: &Document, account: NodeId, file_name: &str) -> AccountRecord {
        let account_number = first_child_text(doc, account, ACCOUNT_NUMBER_TAGS)
            .unwrap_or_else(|| UNKNOWN.to_string());
        let issuer_name = first_child_text(doc, account, ISSUER_NAME_TAGS)
            .unwrap_or_else(|| UNKNOWN.to_string());
        let plan_name = first_child_text(doc, account, PLAN_NAME_TAGS)
            .unwrap_or_else(|| UNKNOWN.to_string());

        let balance = resolve_balance(doc, account, &self.config.extraction);
        let balance_date = resolve_balance_date(doc, account);
        let start_date = resolve_start_date(doc, account);

        let company_name =
            first_collected(doc, account, MANAGING_COMPANY_NAME_TAGS).unwrap_or(issuer_name);
        let company_code = first_collected(doc, account, MANAGING_COMPANY_CODE_TAGS)
            .unwrap_or_else(|| UNKNOWN.to_string());

        let company_fields = collect_tagged(doc, account, MANAGING_COMPANY_TAGS, true);
        let plan_type_fields = collect_tagged(doc, account, PLAN_TYPE_TAGS, false);
        let balance_fields = collect_balance_fields(doc, account);

        let contributions = contribution_buckets(doc, account);
        let severance = severance_components(&balance_fields);

        let contribution_total: f64 = contributions.iter().map(|b| b.amount).sum();
        let severance_total: f64 = severance.iter().map(|c| c.amount).sum();
        let component_total = contribution_total + severance_total;
        let mut balance_discrepancy = balance - component_total;
        if balance_discrepancy.abs() <= BALANCE_TOLERANCE {
            balance_discrepancy = 0.0;
        }
        if balance_discrepancy != 0.0 {
            debug!(
                "Balance mismatch for account {} in {} (diff={:.2})",
                account_number, file_name, balance_discrepancy
            );
        }

        let display_company = company_fields
            .get(ISSUER_DISPLAY_TAG)
            .cloned()
            .unwrap_or(company_name);

        AccountRecord {
            account_number,
            plan_name,
            company_name: display_company,
            company_code,
            balance,
            balance_date: if balance_date.is_empty() {
                UNKNOWN.to_string()
            } else {
                balance_date
            },
            start_date,
            product_type: classify_product_type(doc, account),
            severance,
            contributions,
            contribution_total,
            severance_total,
            component_total,
            balance_discrepancy,
            employers: collect_employers(doc, account),
            company_fields,
            plan_type_fields,
            balance_fields,
        }
    }
}

impl Default for PensionExtractor {
    fn default() -> Self {
        Self::new()
    }
}
