//! Configuration module for Curriculum-Extract
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every table is optional, so an empty file is a valid configuration.
//!
//! # Example
//!
//! ```no_run
//! use curriculum_extract::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("curriculum.toml")).unwrap();
//! println!("Strict region match: {}", config.extractor.strict_region_match);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, ExtractorConfig, SiteConfig};

// Re-export parser functions
pub use parser::{load_config, parse_config};
