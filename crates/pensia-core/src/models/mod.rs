//! Data models for extraction results and configuration.

pub mod config;
pub mod record;

pub use config::{ExtractionConfig, PensiaConfig};
pub use record::{
    AccountRecord, ContributionPeriod, ContributionTotal, FileResult, PayerRole, PersonDetails,
    SeveranceCategory, SeveranceTotal,
};
