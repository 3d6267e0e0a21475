//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};

/// Main configuration for the pensia pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PensiaConfig {
    /// Extraction configuration.
    pub extraction: ExtractionConfig,
}

/// Account extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Treat nodes with account-like direct children as accounts when no
    /// known container tag matches.
    pub structural_account_fallback: bool,

    /// Scan the whole account subtree for numeric text when no balance
    /// field matches.
    pub numeric_scan_fallback: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            structural_account_fallback: true,
            numeric_scan_fallback: true,
        }
    }
}

impl PensiaConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        std::fs::write(path, content)
    }
}
