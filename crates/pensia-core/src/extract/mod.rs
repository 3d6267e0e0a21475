//! Extraction passes that turn parsed documents into account records.

pub mod accounts;
pub mod balance;
pub mod components;
pub mod employer;
pub mod person;
pub mod processor;
pub mod product;
pub mod resolve;
pub mod tags;
pub mod value;

pub use processor::PensionExtractor;
