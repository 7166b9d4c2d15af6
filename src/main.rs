//! Curriculum-Extract main entry point
//!
//! This is the command-line host for the curriculum extractor.

use anyhow::{bail, Context};
use clap::Parser;
use curriculum_extract::config::{load_config, Config};
use curriculum_extract::url::{classify_page_url, PageKind};
use curriculum_extract::{CurriculumError, Extractor, HtmlPage};
use std::io::Read;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Curriculum-Extract: course curriculum to text
///
/// Reads a rendered course page (saved HTML), extracts its title,
/// description, instructors, stats and numbered section list, and prints
/// the formatted report.
#[derive(Parser, Debug)]
#[command(name = "curriculum-extract")]
#[command(version = "1.0.0")]
#[command(about = "Extracts a course curriculum as plain text", long_about = None)]
struct Cli {
    /// Saved course page, or "-" to read HTML from stdin
    #[arg(value_name = "PAGE")]
    page: PathBuf,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Fail when the dedicated curriculum region is missing
    #[arg(long)]
    strict: bool,

    /// Activate the "show more" trigger and wait before extracting
    ///
    /// A saved page cannot render further sections, so this is off by default.
    #[arg(long)]
    expand: bool,

    /// Milliseconds to wait after activating the "show more" trigger
    #[arg(long, value_name = "MS")]
    expand_delay_ms: Option<u64>,

    /// URL the page was saved from (defaults to its canonical link)
    #[arg(long)]
    url: Option<String>,

    /// Extract even if the page is not on the course site
    #[arg(long)]
    force: bool,

    /// Write the report to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = resolve_config(&cli)?;
    let extractor = Extractor::from_config(&config).context("Invalid site profile")?;

    let html = read_page(&cli)?;
    let mut page = HtmlPage::parse(&html);

    check_page_url(&cli, &config, &page)?;

    let curriculum = match extractor.extract(&mut page).await {
        Ok(curriculum) => curriculum,
        Err(e) => {
            tracing::error!("Extraction failed: {}", e);
            return Err(CurriculumError::from(e).into());
        }
    };

    if curriculum.is_empty() {
        bail!("No curriculum content found in {}", cli.page.display());
    }

    match &cli.output {
        Some(path) => {
            std::fs::write(path, format!("{}\n", curriculum.report))
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            tracing::info!(
                "Wrote {} section(s) to {}",
                curriculum.sections.len(),
                path.display()
            );
        }
        None => println!("{}", curriculum.report),
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr so stdout carries only the report.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("curriculum_extract=info,warn"),
            1 => EnvFilter::new("curriculum_extract=debug,info"),
            2 => EnvFilter::new("curriculum_extract=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads the configuration file, if any, and applies command-line overrides
///
/// Expansion only runs with `--expand`: activating a trigger on a static
/// snapshot reveals nothing the locators would not already read.
fn resolve_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path).map_err(CurriculumError::from)?
        }
        None => Config::default(),
    };

    if cli.strict {
        config.extractor.strict_region_match = true;
    }
    if config.extractor.expand_before_extract && !cli.expand {
        tracing::debug!("Static page snapshot, skipping expansion (pass --expand to force it)");
    }
    config.extractor.expand_before_extract = cli.expand;
    if let Some(delay) = cli.expand_delay_ms {
        config.extractor.expand_delay_ms = delay;
    }

    config.validate().map_err(CurriculumError::from)?;
    Ok(config)
}

/// Reads the page HTML from the given path or stdin
fn read_page(cli: &Cli) -> anyhow::Result<String> {
    if cli.page.as_os_str() == "-" {
        let mut html = String::new();
        std::io::stdin()
            .read_to_string(&mut html)
            .context("Failed to read page from stdin")?;
        return Ok(html);
    }

    std::fs::read_to_string(&cli.page)
        .with_context(|| format!("Failed to read page {}", cli.page.display()))
}

/// Refuses pages that are known not to be on the course site
///
/// The URL comes from `--url` or the page's canonical link. A page with no
/// known URL is extracted as-is.
fn check_page_url(cli: &Cli, config: &Config, page: &HtmlPage) -> anyhow::Result<()> {
    let Some(url) = cli.url.clone().or_else(|| page.canonical_url()) else {
        tracing::debug!("Page URL unknown, skipping course site check");
        return Ok(());
    };

    let kind = classify_page_url(&url, &config.site.domain).map_err(CurriculumError::from)?;
    tracing::debug!("Page {} classified as {:?}", url, kind);

    if kind.is_course_site() {
        return Ok(());
    }
    if kind == PageKind::BrowserInternal {
        tracing::debug!("{} is a browser-internal page", url);
    }
    if cli.force {
        tracing::warn!("{} is not on {}, extracting anyway", url, config.site.domain);
        return Ok(());
    }

    Err(CurriculumError::NotCoursePage { url }.into())
}
