/// Collapses every run of whitespace into one ASCII space and trims the ends
///
/// Newlines, tabs, non-breaking spaces and the zero-width no-break space
/// (U+FEFF) all count as whitespace, so the output is always a single
/// trimmed line.
///
/// # Examples
///
/// ```
/// use curriculum_extract::extractor::normalize;
///
/// assert_eq!(normalize("  Intro\n\t to  X "), "Intro to X");
/// assert_eq!(normalize(""), "");
/// ```
pub fn normalize(raw: &str) -> String {
    raw.split(is_space)
        .filter(|piece| !piece.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_space(c: char) -> bool {
    c.is_whitespace() || c == '\u{feff}'
}

/// [`normalize`] for text that may be absent; `None` yields an empty string
pub fn normalize_opt(raw: Option<&str>) -> String {
    raw.map(normalize).unwrap_or_default()
}
