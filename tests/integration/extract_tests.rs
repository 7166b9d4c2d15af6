//! Integration tests for the curriculum extractor
//!
//! These tests run whole extractions against parsed course pages, alternative
//! markup versions, and a fake document whose content changes when the
//! "show more" trigger is activated.

use curriculum_extract::config::parse_config;
use curriculum_extract::dom::{DomError, HtmlPage, PageDocument};
use curriculum_extract::extractor::{ReportLabels, SelectorChain, SiteProfile};
use curriculum_extract::{extract, ExtractError, Extractor, ExtractorConfig, ScopeKind};
use std::time::Duration;
use tokio::time::Instant;

/// Builds an accordion panel in the course page's markup
fn panel(title: &str, extras: &[&str]) -> String {
    let extras: String = extras
        .iter()
        .map(|extra| {
            format!(
                r#"<span class="section--section-content--YS2fA">{}</span>"#,
                extra
            )
        })
        .collect();
    format!(
        r#"<div class="accordion-panel-module--panel--Eb0it section--panel--qYPjj">
             <div class="accordion-panel-module--panel-toggler--WUiNu">
               <h3 class="ud-accordion-panel-heading">
                 <span class="ud-accordion-panel-title"><span class="section--section-title--svpHP">{}</span></span>
               </h3>
               <span class="section--hidden-on-mobile--ZmArs">{}</span>
             </div>
           </div>"#,
        title, extras
    )
}

fn course_page(curriculum: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
        <html lang="pt-BR">
        <head>
          <title>Curso de Rust | Udemy</title>
          <link rel="canonical" href="https://www.udemy.com/course/rust/">
        </head>
        <body>
          <div class="clp-lead">
            <h1 data-purpose="lead-title" class="ud-heading-xl clp-lead__title">
              Rust do Zero
            </h1>
            <div data-purpose="lead-headline" class="ud-text-md clp-lead__headline">
              Aprenda   Rust
              do básico ao avançado
            </div>
            <div data-purpose="instructor-name-top" class="ud-text-sm">
              <span>Criado por</span>
              <a class="ud-btn ud-btn-link ud-instructor-links" href="/user/ana/"><span class="ud-btn-label">Ana Lima</span></a>,
              <a class="ud-btn ud-btn-link ud-instructor-links" href="/user/rui/"><span class="ud-btn-label">Rui Costa</span></a>
            </div>
          </div>
          <div class="careers--container">
            {}
          </div>
          {}
        </body>
        </html>"#,
        panel("Explore carreiras em tecnologia", &[]),
        curriculum
    )
}

async fn run(html: &str, config: &ExtractorConfig) -> Result<String, ExtractError> {
    let mut page = HtmlPage::parse(html);
    extract(&mut page, config).await.map(|c| c.report)
}

#[tokio::test]
async fn test_full_course_page_with_region() {
    let html = course_page(&format!(
        r#"<div data-purpose="course-curriculum">
             <h2 class="ud-heading-xl">Conteúdo do curso</h2>
             <div data-purpose="curriculum-stats"><span>3 seções</span> • <span>12 aulas</span> • <span>Duração total: 1h 30min</span></div>
             {}{}{}
           </div>"#,
        panel("Introdução", &["4 aulas", "20min"]),
        panel("Ownership e Borrowing", &["5 aulas", "45min"]),
        panel("Projeto final", &["3 aulas", "25min"]),
    ));

    let report = run(&html, &ExtractorConfig::default()).await.unwrap();

    assert_eq!(
        report,
        "Título: Rust do Zero\n\n\
         Descrição: Aprenda Rust do básico ao avançado\n\n\
         Autor: Ana Lima, Rui Costa\n\n\
         Estatísticas: 3 seções • 12 aulas • Duração total: 1h 30min\n\n\
         1) Introdução • 4 aulas • 20min\n\
         2) Ownership e Borrowing • 5 aulas • 45min\n\
         3) Projeto final • 3 aulas • 25min"
    );
}

#[tokio::test]
async fn test_scenario_heading_fallback() {
    let html = course_page(&format!(
        r#"<div class="ud-container">
             <section class="curriculum-section">
               <h2>Conteúdo do curso</h2>
               <div class="ud-text-sm">2 seções • 6 aulas • Duração total: 40min</div>
               <div class="curriculum-list">{}{}</div>
             </section>
           </div>"#,
        panel("Básico", &["3 aulas"]),
        panel("Avançado", &[]),
    ));
    let mut page = HtmlPage::parse(&html);

    let curriculum = extract(&mut page, &ExtractorConfig::default())
        .await
        .unwrap();

    assert_eq!(curriculum.scope, ScopeKind::Heading);
    assert_eq!(curriculum.stats, "2 seções • 6 aulas • Duração total: 40min");
    let titles: Vec<&str> = curriculum.sections.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(titles, vec!["Básico", "Avançado"]);
    assert!(!curriculum.report.contains("carreiras"));
}

#[tokio::test]
async fn test_degraded_document_mode_picks_up_every_panel() {
    let html = course_page(&format!(
        r#"<div>{}</div>"#,
        panel("Seção solta", &["1 aula"])
    ));
    let mut page = HtmlPage::parse(&html);

    let curriculum = extract(&mut page, &ExtractorConfig::default())
        .await
        .unwrap();

    assert_eq!(curriculum.scope, ScopeKind::Document);
    assert_eq!(curriculum.sections.len(), 2);
    assert_eq!(curriculum.sections[0].title, "Explore carreiras em tecnologia");
    assert_eq!(curriculum.sections[1].index, 2);
}

#[tokio::test]
async fn test_strict_mode_refuses_heading_fallback() {
    let html = course_page(&format!(
        r#"<section><h2>Conteúdo do curso</h2>{}</section>"#,
        panel("Básico", &[])
    ));
    let config = ExtractorConfig {
        strict_region_match: true,
        ..ExtractorConfig::default()
    };

    let result = run(&html, &config).await;

    assert!(matches!(result, Err(ExtractError::RegionNotFound)));
}

#[tokio::test]
async fn test_indices_contiguous_over_retained_panels() {
    let html = course_page(&format!(
        r#"<div data-purpose="course-curriculum">{}{}<div class="accordion-panel-module--panel--x"><p>promo</p></div>{}{}</div>"#,
        panel("Um", &[]),
        panel(" \n ", &["2 aulas"]),
        panel("Dois", &[]),
        panel("Três", &["1 aula", "  "]),
    ));
    let mut page = HtmlPage::parse(&html);

    let curriculum = extract(&mut page, &ExtractorConfig::default())
        .await
        .unwrap();

    let indices: Vec<usize> = curriculum.sections.iter().map(|s| s.index).collect();
    assert_eq!(indices, vec![1, 2, 3]);
    assert_eq!(curriculum.sections[2].extras, "1 aula");
}

#[tokio::test]
async fn test_page_without_curriculum_falls_back_to_document() {
    let html = course_page("");
    let report = run(&html, &ExtractorConfig::default()).await.unwrap();
    assert!(report.starts_with("Título: Rust do Zero\n\n"));
    assert!(report.ends_with("1) Explore carreiras em tecnologia"));
}

#[tokio::test(start_paused = true)]
async fn test_hidden_trigger_incurs_no_delay() {
    let html = course_page(&format!(
        r#"<div data-purpose="course-curriculum">
             {}
             <button type="button" data-purpose="show-more" style="display: none">Mais 10 seções</button>
           </div>"#,
        panel("Básico", &[])
    ));
    let mut page = HtmlPage::parse(&html);
    let start = Instant::now();

    let curriculum = extract(&mut page, &ExtractorConfig::default())
        .await
        .unwrap();

    assert_eq!(start.elapsed(), Duration::ZERO);
    assert!(page.activations().is_empty());
    assert_eq!(curriculum.sections.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_visible_trigger_waits_configured_delay() {
    let html = course_page(&format!(
        r#"<div data-purpose="course-curriculum">
             {}
             <button type="button" data-purpose="show-more">Mais 10 seções</button>
           </div>"#,
        panel("Básico", &[])
    ));
    let mut page = HtmlPage::parse(&html);
    let config = ExtractorConfig {
        expand_delay_ms: 750,
        ..ExtractorConfig::default()
    };
    let start = Instant::now();

    extract(&mut page, &config).await.unwrap();

    assert!(start.elapsed() >= Duration::from_millis(750));
    assert_eq!(page.activations().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_expansion_disabled_never_activates() {
    let html = course_page(r#"<button data-purpose="show-more">Mais</button>"#);
    let mut page = HtmlPage::parse(&html);
    let config = ExtractorConfig {
        expand_before_extract: false,
        ..ExtractorConfig::default()
    };
    let start = Instant::now();

    extract(&mut page, &config).await.unwrap();

    assert_eq!(start.elapsed(), Duration::ZERO);
    assert!(page.activations().is_empty());
}

/// A page that renders its remaining sections only after "show more" is clicked
struct LazyCoursePage {
    collapsed: HtmlPage,
    expanded: HtmlPage,
    is_expanded: bool,
}

type HtmlNode = <HtmlPage as PageDocument>::Node;

impl LazyCoursePage {
    fn new(collapsed: &str, expanded: &str) -> Self {
        Self {
            collapsed: HtmlPage::parse(collapsed),
            expanded: HtmlPage::parse(expanded),
            is_expanded: false,
        }
    }

    fn current(&self) -> &HtmlPage {
        if self.is_expanded {
            &self.expanded
        } else {
            &self.collapsed
        }
    }
}

impl PageDocument for LazyCoursePage {
    type Node = HtmlNode;

    fn root(&self) -> HtmlNode {
        self.current().root()
    }

    fn query_selector_all(&self, scope: HtmlNode, selector: &str) -> Vec<HtmlNode> {
        self.current().query_selector_all(scope, selector)
    }

    fn matches(&self, node: HtmlNode, selector: &str) -> bool {
        self.current().matches(node, selector)
    }

    fn parent(&self, node: HtmlNode) -> Option<HtmlNode> {
        self.current().parent(node)
    }

    fn children(&self, node: HtmlNode) -> Vec<HtmlNode> {
        self.current().children(node)
    }

    fn text_content(&self, node: HtmlNode) -> String {
        self.current().text_content(node)
    }

    fn class_name(&self, node: HtmlNode) -> String {
        self.current().class_name(node)
    }

    fn is_visible(&self, node: HtmlNode) -> bool {
        self.current().is_visible(node)
    }

    fn activate(&mut self, node: HtmlNode) -> Result<(), DomError> {
        if self.is_expanded {
            return Err(DomError::NotInteractive("already expanded".to_string()));
        }
        self.collapsed.activate(node)?;
        self.is_expanded = true;
        Ok(())
    }
}

fn lazy_page() -> LazyCoursePage {
    let collapsed = course_page(&format!(
        r#"<div data-purpose="course-curriculum">{}<button data-purpose="show-more">Mais 2 seções</button></div>"#,
        panel("Um", &[])
    ));
    let expanded = course_page(&format!(
        r#"<div data-purpose="course-curriculum">{}{}{}</div>"#,
        panel("Um", &[]),
        panel("Dois", &[]),
        panel("Três", &[])
    ));
    LazyCoursePage::new(&collapsed, &expanded)
}

#[tokio::test(start_paused = true)]
async fn test_locator_sees_post_expansion_document() {
    let mut page = lazy_page();
    let start = Instant::now();

    let curriculum = extract(&mut page, &ExtractorConfig::default())
        .await
        .unwrap();

    assert!(start.elapsed() >= Duration::from_millis(2000));
    assert_eq!(curriculum.sections.len(), 3);
    assert_eq!(curriculum.sections[2].to_string(), "3) Três");
}

#[tokio::test(start_paused = true)]
async fn test_lazy_page_without_expansion_sees_first_render() {
    let mut page = lazy_page();
    let config = ExtractorConfig {
        expand_before_extract: false,
        ..ExtractorConfig::default()
    };

    let curriculum = extract(&mut page, &config).await.unwrap();

    assert_eq!(curriculum.sections.len(), 1);
}

#[tokio::test]
async fn test_alternative_markup_version() {
    let html = r#"
        <html><body>
          <header><h1 class="course-name">Async Rust</h1></header>
          <p class="tagline">Futures, executors and pinning</p>
          <div class="teachers"><a class="teacher">Ferris</a><a class="teacher">Corro</a></div>
          <main id="syllabus">
            <p class="summary">2 chapters</p>
            <section class="chapter"><h3>Futures</h3><em>3 videos</em><em>30min</em></section>
            <section class="chapter"><h3>Pinning</h3></section>
          </main>
        </body></html>
    "#;
    let profile = SiteProfile {
        title: SelectorChain::new(["h1.course-name"]),
        description: SelectorChain::new(["p.tagline"]),
        instructors: SelectorChain::new(["div.teachers"]),
        authors: SelectorChain::new(["a.teacher"]),
        region: SelectorChain::new(["#syllabus"]),
        stats: SelectorChain::new(["p.summary"]),
        panel: SelectorChain::new(["section.chapter"]),
        section_title: SelectorChain::new(["h3"]),
        section_extras: SelectorChain::new(["em"]),
        ..SiteProfile::default()
    };
    let labels = ReportLabels {
        title: "Title".to_string(),
        description: "Description".to_string(),
        authors: "Author".to_string(),
        stats: "Stats".to_string(),
    };
    let extractor = Extractor::new(ExtractorConfig::default(), profile, labels).unwrap();
    let mut page = HtmlPage::parse(html);

    let curriculum = extractor.extract(&mut page).await.unwrap();

    assert_eq!(
        curriculum.report,
        "Title: Async Rust\n\n\
         Description: Futures, executors and pinning\n\n\
         Author: Ferris, Corro\n\n\
         Stats: 2 chapters\n\n\
         1) Futures • 3 videos • 30min\n\
         2) Pinning"
    );
}

#[tokio::test]
async fn test_extractor_from_config_file_text() {
    let config = parse_config(
        r#"
[extractor]
strict-region-match = true
expand-before-extract = false

[labels]
title = "Course"

[selectors]
region = ['main#syllabus']
panel = ['section.chapter']
section-title = ['h3']
"#,
    )
    .unwrap();
    let extractor = Extractor::from_config(&config).unwrap();
    let mut page = HtmlPage::parse(
        r#"<html><body><h1 data-purpose="lead-title">Rust</h1>
           <main id="syllabus"><section class="chapter"><h3>One</h3></section></main></body></html>"#,
    );

    let curriculum = extractor.extract(&mut page).await.unwrap();

    assert!(extractor.config().strict_region_match);
    assert_eq!(curriculum.report, "Course: Rust\n\n1) One");
}

#[tokio::test]
async fn test_region_without_valid_panels_keeps_metadata() {
    let html = course_page(&format!(
        r#"<div data-purpose="course-curriculum">
             <div data-purpose="curriculum-stats">0 seções</div>
             <div class="accordion-panel-module--panel--Eb0it"><span>Sem título</span></div>
             {}
           </div>"#,
        panel("  \n ", &["2 aulas"]),
    ));
    let mut page = HtmlPage::parse(&html);

    let curriculum = extract(&mut page, &ExtractorConfig::default())
        .await
        .unwrap();

    assert_eq!(curriculum.scope, ScopeKind::Region);
    assert!(curriculum.sections.is_empty());
    assert!(!curriculum.is_empty());
    assert_eq!(curriculum.stats, "0 seções");
    assert_eq!(
        curriculum.report,
        "Título: Rust do Zero\n\n\
         Descrição: Aprenda Rust do básico ao avançado\n\n\
         Autor: Ana Lima, Rui Costa\n\n\
         Estatísticas: 0 seções"
    );
}
