use crate::config::validation::{validate, validate_extractor_config};
use crate::extractor::{ReportLabels, SiteProfile};
use crate::ConfigError;
use serde::Deserialize;

/// Main configuration structure for Curriculum-Extract
///
/// Every table is optional; a missing table takes its defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub extractor: ExtractorConfig,
    pub site: SiteConfig,
    pub labels: ReportLabels,
    pub selectors: SiteProfile,
}

impl Config {
    /// Validates the whole configuration
    ///
    /// Run this again after applying overrides to a loaded configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate(self)
    }
}

/// Extraction behavior flags
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Fail instead of falling back to heading heuristics when the dedicated
    /// curriculum region is missing
    #[serde(rename = "strict-region-match")]
    pub strict_region_match: bool,

    /// Activate the "show more" trigger before extracting
    #[serde(rename = "expand-before-extract")]
    pub expand_before_extract: bool,

    /// Time to wait after activating the trigger (milliseconds)
    #[serde(rename = "expand-delay-ms")]
    pub expand_delay_ms: u64,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            strict_region_match: false,
            expand_before_extract: true,
            expand_delay_ms: 2000,
        }
    }
}

impl ExtractorConfig {
    /// Checks the expansion delay against its upper bound
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_extractor_config(self)
    }
}

/// The course site the extractor is written for
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Domain pattern (e.g., "udemy.com" or "*.udemy.com")
    pub domain: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            domain: "*.udemy.com".to_string(),
        }
    }
}
