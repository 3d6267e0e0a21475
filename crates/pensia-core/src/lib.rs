//! Core library for pension disclosure extraction.
//!
//! This crate provides:
//! - A generic labeled-tree document model parsed from clearing-house XML
//! - Ordered-fallback field resolution over heterogeneous vendor layouts
//! - Account location, balance resolution, and component decomposition
//! - Normalized account and person records ready for export

pub mod document;
pub mod error;
pub mod extract;
pub mod models;

pub use document::{Document, NodeId};
pub use error::{DocumentError, PensiaError, Result};
pub use extract::PensionExtractor;
pub use models::config::{ExtractionConfig, PensiaConfig};
pub use models::record::{
    AccountRecord, ContributionPeriod, ContributionTotal, FileResult, PayerRole, PersonDetails,
    SeveranceCategory, SeveranceTotal,
};
