//! Curriculum extraction core
//!
//! This module turns a rendered course page into an [`ExtractedCurriculum`]:
//! - Optionally expanding lazily rendered sections first
//! - Locating course metadata through selector fallback chains
//! - Scoping the curriculum region (dedicated element, heading, or document)
//! - Enumerating and numbering section panels
//! - Formatting everything into one report string
//!
//! # Example
//!
//! ```
//! use curriculum_extract::{extract, ExtractorConfig, HtmlPage};
//!
//! let mut page = HtmlPage::parse(r#"
//!     <h1 data-purpose="lead-title">Intro to X</h1>
//!     <div data-purpose="course-curriculum">
//!       <div class="accordion-panel-module--panel--a">
//!         <span class="section--section-title--b">Basics</span>
//!       </div>
//!     </div>"#);
//!
//! let runtime = tokio::runtime::Builder::new_current_thread()
//!     .enable_time()
//!     .build()
//!     .unwrap();
//! let curriculum = runtime
//!     .block_on(extract(&mut page, &ExtractorConfig::default()))
//!     .unwrap();
//! assert_eq!(curriculum.report, "Título: Intro to X\n\n1) Basics");
//! ```

mod curriculum;
mod expander;
mod metadata;
mod normalize;
mod report;
mod selectors;

pub use curriculum::{
    enumerate_sections, locate_stats, resolve_scope, CurriculumSection, Scope, ScopeKind,
    EXTRAS_SEPARATOR,
};
pub use expander::{expand, ExpandOutcome};
pub use metadata::{locate_metadata, CourseMetadata};
pub use normalize::{normalize, normalize_opt};
pub use report::{format_report, ReportLabels};
pub use selectors::{SelectorChain, SiteProfile};

use crate::config::{Config, ExtractorConfig};
use crate::dom::PageDocument;
use crate::{ConfigError, ExtractError};
use regex::Regex;
use std::fmt;
use std::time::Duration;

/// Outcome of one extraction: the structured curriculum or a terminal failure
pub type ExtractionResult = Result<ExtractedCurriculum, ExtractError>;

/// Everything read from a course page, plus the formatted report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedCurriculum {
    pub metadata: CourseMetadata,

    /// Course stats line, empty when absent
    pub stats: String,

    /// Retained sections, indexed `1..=N`
    pub sections: Vec<CurriculumSection>,

    /// How the curriculum region was resolved
    pub scope: ScopeKind,

    /// The formatted report handed back to the caller
    pub report: String,
}

impl ExtractedCurriculum {
    /// Whether nothing at all was found (a soft failure for most callers)
    pub fn is_empty(&self) -> bool {
        self.metadata.is_empty() && self.stats.is_empty() && self.sections.is_empty()
    }
}

impl fmt::Display for ExtractedCurriculum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.report)
    }
}

/// Configured curriculum extractor
///
/// Holds the behavior flags, the site profile with its patterns compiled, and
/// the report labels. Build once, extract from any number of pages.
#[derive(Debug, Clone)]
pub struct Extractor {
    config: ExtractorConfig,
    profile: SiteProfile,
    labels: ReportLabels,
    heading_pattern: Regex,
    stats_pattern: Regex,
}

impl Extractor {
    /// Creates an extractor, validating the flags and the profile
    ///
    /// # Returns
    ///
    /// * `Ok(Extractor)` - Ready to extract
    /// * `Err(ConfigError)` - The delay exceeds its bound, a selector chain is
    ///   empty or unparseable, or a pattern does not compile
    pub fn new(
        config: ExtractorConfig,
        profile: SiteProfile,
        labels: ReportLabels,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        profile.validate()?;
        let (heading_pattern, stats_pattern) = profile.compile_patterns()?;

        Ok(Self {
            config,
            profile,
            labels,
            heading_pattern,
            stats_pattern,
        })
    }

    /// Creates an extractor from a loaded configuration file
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        Self::new(
            config.extractor.clone(),
            config.selectors.clone(),
            config.labels.clone(),
        )
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Extracts the curriculum from `doc`
    ///
    /// When expansion is enabled, a visible "show more" trigger is activated
    /// and the flow sleeps for the configured delay before anything is read,
    /// so the locators see the post-expansion document.
    ///
    /// # Returns
    ///
    /// * `Ok(ExtractedCurriculum)` - Extraction ran; fields may be empty
    /// * `Err(ExtractError::RegionNotFound)` - Strict mode and no dedicated region
    pub async fn extract<D: PageDocument>(&self, doc: &mut D) -> ExtractionResult {
        if self.config.expand_before_extract {
            let delay = Duration::from_millis(self.config.expand_delay_ms);
            let outcome = expand(doc, &self.profile.show_more, delay).await;
            tracing::debug!("Expander outcome: {:?}", outcome);
        }

        let doc = &*doc;
        let scope = resolve_scope(
            doc,
            &self.profile,
            &self.heading_pattern,
            self.config.strict_region_match,
        )?;
        tracing::debug!("Curriculum scope resolved by {}", scope.kind.as_str());

        let metadata = locate_metadata(doc, &self.profile);
        let stats = locate_stats(doc, &scope, &self.profile, &self.stats_pattern);
        let sections = enumerate_sections(doc, scope.node, &self.profile);
        let report = format_report(&metadata, &stats, &sections, &self.labels);

        tracing::info!(
            "Extracted {} section(s) ({} scope, {} bytes of report)",
            sections.len(),
            scope.kind.as_str(),
            report.len()
        );
        tracing::trace!("Extracted curriculum:\n{}", report);

        Ok(ExtractedCurriculum {
            metadata,
            stats,
            sections,
            scope: scope.kind,
            report,
        })
    }
}

/// Extracts with the default site profile and labels
///
/// This is the host-facing entry point: one document, one configuration,
/// one result.
pub async fn extract<D: PageDocument>(doc: &mut D, config: &ExtractorConfig) -> ExtractionResult {
    let extractor = Extractor::new(
        config.clone(),
        SiteProfile::default(),
        ReportLabels::default(),
    )?;
    extractor.extract(doc).await
}
