use crate::config::types::{Config, ExtractorConfig, SiteConfig};
use crate::extractor::ReportLabels;
use crate::ConfigError;

/// Longest accepted wait after activating the "show more" trigger
const MAX_EXPAND_DELAY_MS: u64 = 60_000;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_extractor_config(&config.extractor)?;
    validate_site_config(&config.site)?;
    validate_labels(&config.labels)?;
    config.selectors.validate()?;
    Ok(())
}

/// Validates extraction behavior flags
pub(super) fn validate_extractor_config(config: &ExtractorConfig) -> Result<(), ConfigError> {
    if config.expand_delay_ms > MAX_EXPAND_DELAY_MS {
        return Err(ConfigError::Validation(format!(
            "expand-delay-ms must be <= {}ms, got {}ms",
            MAX_EXPAND_DELAY_MS, config.expand_delay_ms
        )));
    }

    Ok(())
}

/// Validates the course site domain
fn validate_site_config(config: &SiteConfig) -> Result<(), ConfigError> {
    validate_domain_pattern(&config.domain)
}

/// Validates report labels
fn validate_labels(labels: &ReportLabels) -> Result<(), ConfigError> {
    let fields = [
        ("title", &labels.title),
        ("description", &labels.description),
        ("authors", &labels.authors),
        ("stats", &labels.stats),
    ];

    for (field, label) in fields {
        if label.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "label '{}' cannot be empty",
                field
            )));
        }
    }

    Ok(())
}

/// Validates a domain pattern (supports a leading "*." wildcard)
fn validate_domain_pattern(pattern: &str) -> Result<(), ConfigError> {
    let domain = pattern.strip_prefix("*.").unwrap_or(pattern);

    if domain.is_empty() {
        return Err(ConfigError::InvalidDomain(format!(
            "Domain pattern '{}' is empty",
            pattern
        )));
    }

    if !domain
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
    {
        return Err(ConfigError::InvalidDomain(format!(
            "Domain '{}' contains invalid characters",
            domain
        )));
    }

    if domain.starts_with(['.', '-']) || domain.ends_with(['.', '-']) || domain.contains("..") {
        return Err(ConfigError::InvalidDomain(format!(
            "Domain '{}' is malformed",
            domain
        )));
    }

    if !domain.contains('.') {
        return Err(ConfigError::InvalidDomain(format!(
            "Domain '{}' must contain at least one dot (e.g., 'udemy.com')",
            domain
        )));
    }

    Ok(())
}
