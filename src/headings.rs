//! Heading extraction and the display-text -> slug table.

use indexmap::IndexMap;
use log::debug;

use crate::slug::slugify;

const TITLE_MARKER: &str = "# ";
const SECTION_MARKER: &str = "## ";
const SUBSECTION_MARKER: &str = "### ";

/// A section or subsection heading line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    /// 2 for `## `, 3 for `### `
    pub level: usize,
    /// Line remainder after the marker, trimmed
    pub text: String,
    /// Zero-based line index
    pub line: usize,
}

/// Collects `## ` and `### ` headings in document order.
///
/// Only the exact marker prefix counts: indented markers, `#` without a
/// following space, and deeper levels are ignored.
pub fn scan_headings(content: &str) -> Vec<Heading> {
    content
        .lines()
        .enumerate()
        .filter_map(|(line, raw)| {
            let (level, rest) = if let Some(rest) = raw.strip_prefix(SECTION_MARKER) {
                (2, rest)
            } else if let Some(rest) = raw.strip_prefix(SUBSECTION_MARKER) {
                (3, rest)
            } else {
                return None;
            };
            Some(Heading {
                level,
                text: rest.trim().to_string(),
                line,
            })
        })
        .collect()
}

/// Text of the first `# ` heading, the document title.
pub fn title_heading(content: &str) -> Option<String> {
    content
        .lines()
        .find_map(|line| line.strip_prefix(TITLE_MARKER))
        .map(|rest| rest.trim().to_string())
}

/// Ordered mapping from heading display text to its slug.
///
/// Keys are exact display text, so headings that only differ in
/// punctuation or emoji stay separate entries. A repeated heading keeps
/// its first position; its slug is the same either way.
#[derive(Debug, Default, Clone)]
pub struct HeadingTable {
    entries: IndexMap<String, String>,
}

impl HeadingTable {
    pub fn build(content: &str) -> Self {
        Self::from_headings(&scan_headings(content))
    }

    pub fn from_headings(headings: &[Heading]) -> Self {
        let mut table = Self::default();
        for heading in headings {
            debug!(
                "h{} at line {}: {:?}",
                heading.level,
                heading.line + 1,
                heading.text
            );
            table.insert(&heading.text);
        }
        table
    }

    pub fn insert(&mut self, text: &str) {
        self.entries.insert(text.to_string(), slugify(text));
    }

    /// `(display text, slug)` pairs in table order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slug_for<'t>(table: &'t HeadingTable, text: &str) -> Option<&'t str> {
        table.iter().find(|(k, _)| *k == text).map(|(_, v)| v)
    }

    const DOC: &str = "# Project\n\
                       \n\
                       ## 📑 Table des matières\n\
                       ### Installation  \n\
                       #### Too deep\n\
                       ##No space\n\
                       \x20## Indented\n\
                       ## Usage\n";

    #[test]
    fn test_scan_headings_levels_and_lines() {
        let headings = scan_headings(DOC);
        assert_eq!(headings.len(), 3);

        assert_eq!(headings[0].level, 2);
        assert_eq!(headings[0].text, "📑 Table des matières");
        assert_eq!(headings[0].line, 2);

        assert_eq!(headings[1].level, 3);
        assert_eq!(headings[1].text, "Installation");
        assert_eq!(headings[1].line, 3);

        assert_eq!(headings[2].text, "Usage");
        assert_eq!(headings[2].line, 7);
    }

    #[test]
    fn test_scan_headings_handles_crlf() {
        let headings = scan_headings("## Setup\r\n### Notes\r\n");
        assert_eq!(headings.len(), 2);
        assert_eq!(headings[0].text, "Setup");
        assert_eq!(headings[1].text, "Notes");
    }

    #[test]
    fn test_bare_marker_is_an_empty_heading() {
        let headings = scan_headings("## \n");
        assert_eq!(headings.len(), 1);
        assert_eq!(headings[0].text, "");
    }

    #[test]
    fn test_title_heading() {
        assert_eq!(title_heading(DOC).as_deref(), Some("Project"));
        assert_eq!(title_heading("## Only sections\n"), None);
        assert_eq!(
            title_heading("intro\n#  Dotfiles - PavelDelhomme \n# Second\n").as_deref(),
            Some("Dotfiles - PavelDelhomme")
        );
    }

    #[test]
    fn test_table_maps_text_to_slug() {
        let table = HeadingTable::build(DOC);
        assert_eq!(table.len(), 3);
        assert_eq!(slug_for(&table, "📑 Table des matières"), Some("table-des-matires"));
        assert_eq!(slug_for(&table, "Installation"), Some("installation"));
        assert_eq!(slug_for(&table, "Too deep"), None);
    }

    #[test]
    fn test_table_duplicate_keeps_first_position() {
        let table = HeadingTable::build("## Usage\n## Setup\n### Usage\n");
        assert_eq!(table.len(), 2);
        let keys: Vec<&str> = table.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["Usage", "Setup"]);
    }

    #[test]
    fn test_table_keys_are_exact_text() {
        // Same normalized text, distinct entries
        let table = HeadingTable::build("## Set-up\n## Setup\n");
        assert_eq!(table.len(), 2);
        assert_eq!(slug_for(&table, "Set-up"), Some("set-up"));
        assert_eq!(slug_for(&table, "Setup"), Some("setup"));
    }

    #[test]
    fn test_empty_document() {
        let table = HeadingTable::build("");
        assert!(table.is_empty());
    }
}
