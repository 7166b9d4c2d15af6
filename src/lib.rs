//! Curriculum-Extract: a resilient course curriculum scraper
//!
//! This crate reads the rendered DOM of an e-learning course page and turns its
//! curriculum (title, description, instructors, stats and numbered sections)
//! into a fixed-format text report, tolerating markup drift through ordered
//! selector fallback chains.

pub mod config;
pub mod dom;
pub mod extractor;
pub mod url;

use thiserror::Error;

/// Main error type for Curriculum-Extract operations
#[derive(Debug, Error)]
pub enum CurriculumError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Extraction failed: {0}")]
    Extract(#[from] ExtractError),

    #[error("URL error: {0}")]
    Url(#[from] UrlError),

    #[error("Not a course page: {url}")]
    NotCoursePage { url: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid selector: {0}")]
    InvalidSelector(String),

    #[error("Invalid text pattern: {0}")]
    InvalidPattern(String),

    #[error("Invalid domain pattern: {0}")]
    InvalidDomain(String),
}

/// Terminal extraction failures
///
/// Absent fields and empty section lists are never errors; they flow through
/// as empty data and are omitted by the report formatter.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("curriculum region not found")]
    RegionNotFound,

    #[error("invalid site profile: {0}")]
    Profile(#[from] ConfigError),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Missing host in URL: {0}")]
    MissingHost(String),
}

/// Result type alias for Curriculum-Extract operations
pub type Result<T> = std::result::Result<T, CurriculumError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::{Config, ExtractorConfig};
pub use dom::{DomError, HtmlPage, PageDocument};
pub use extractor::{
    extract, CourseMetadata, CurriculumSection, ExtractedCurriculum, ExtractionResult, Extractor,
    ScopeKind,
};
pub use crate::url::{classify_page_url, PageKind};
