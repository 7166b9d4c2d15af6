use super::curriculum::CurriculumSection;
use super::metadata::CourseMetadata;
use serde::Deserialize;

/// Field labels printed in front of each metadata line
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ReportLabels {
    pub title: String,
    pub description: String,
    pub authors: String,
    pub stats: String,
}

impl Default for ReportLabels {
    fn default() -> Self {
        Self {
            title: "Título".to_string(),
            description: "Descrição".to_string(),
            authors: "Autor".to_string(),
            stats: "Estatísticas".to_string(),
        }
    }
}

/// Serializes metadata, stats and sections into the report text
///
/// Each non-empty field becomes a `"<Label>: <value>"` line; empty fields
/// leave no trace. The section lines follow as one newline-joined block, and
/// blocks are separated by a blank line. The result never starts or ends
/// with a newline.
///
/// # Example
///
/// ```
/// use curriculum_extract::extractor::{format_report, CourseMetadata, CurriculumSection, ReportLabels};
///
/// let metadata = CourseMetadata { title: "Intro to X".into(), ..Default::default() };
/// let sections = vec![CurriculumSection { index: 1, title: "Basics".into(), extras: String::new() }];
/// let report = format_report(&metadata, "", &sections, &ReportLabels::default());
/// assert_eq!(report, "Título: Intro to X\n\n1) Basics");
/// ```
pub fn format_report(
    metadata: &CourseMetadata,
    stats: &str,
    sections: &[CurriculumSection],
    labels: &ReportLabels,
) -> String {
    let fields = [
        (&labels.title, metadata.title.as_str()),
        (&labels.description, metadata.description.as_str()),
        (&labels.authors, metadata.authors.as_str()),
        (&labels.stats, stats),
    ];

    let mut blocks: Vec<String> = fields
        .iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(label, value)| format!("{}: {}", label, value))
        .collect();

    if !sections.is_empty() {
        let lines: Vec<String> = sections.iter().map(ToString::to_string).collect();
        blocks.push(lines.join("\n"));
    }

    blocks.join("\n\n")
}
