//! Fuzzy matching of link labels against heading text.

use std::collections::HashSet;

use serde::Deserialize;

use crate::headings::HeadingTable;

/// Score for identical normalized text.
pub const EXACT_MATCH_SCORE: f64 = 100.0;
/// Weight applied to the length ratio when one text contains the other.
pub const CONTAINMENT_WEIGHT: f64 = 80.0;
/// Weight applied to the shared-token ratio.
pub const TOKEN_OVERLAP_WEIGHT: f64 = 60.0;
/// A match is only accepted strictly above this score.
pub const MATCH_THRESHOLD: f64 = 50.0;

/// Unicode whitespace plus the ASCII separators U+001C..=U+001F.
fn is_separator(c: char) -> bool {
    c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c)
}

/// Lowercase, keep ASCII letters, digits and whitespace, collapse runs of
/// whitespace to one space and trim.
pub fn normalize_text(text: &str) -> String {
    let kept: String = text
        .to_lowercase()
        .chars()
        .filter(|&c| c.is_ascii_lowercase() || c.is_ascii_digit() || is_separator(c))
        .collect();
    kept.split(is_separator)
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Scoring calibration. Defaults are the module constants.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Scoring {
    pub exact: f64,
    pub containment: f64,
    pub token_overlap: f64,
    pub threshold: f64,
}

impl Default for Scoring {
    fn default() -> Self {
        Self {
            exact: EXACT_MATCH_SCORE,
            containment: CONTAINMENT_WEIGHT,
            token_overlap: TOKEN_OVERLAP_WEIGHT,
            threshold: MATCH_THRESHOLD,
        }
    }
}

/// The heading a label was resolved to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Match<'t> {
    pub heading: &'t str,
    pub slug: &'t str,
    pub score: f64,
}

impl Scoring {
    /// Similarity of two already-normalized texts.
    pub fn score(&self, link: &str, heading: &str) -> f64 {
        if link == heading {
            return self.exact;
        }
        if heading.contains(link) {
            return link.len() as f64 / heading.len() as f64 * self.containment;
        }
        if link.contains(heading) {
            return heading.len() as f64 / link.len() as f64 * self.containment;
        }

        let link_tokens: HashSet<&str> = link.split_whitespace().collect();
        let heading_tokens: HashSet<&str> = heading.split_whitespace().collect();
        let common = link_tokens.intersection(&heading_tokens).count();
        if common == 0 {
            return 0.0;
        }
        let largest = link_tokens.len().max(heading_tokens.len());
        common as f64 / largest as f64 * self.token_overlap
    }

    /// Best-scoring heading for `label`, if it clears the threshold.
    ///
    /// Scans in table order and only replaces the leader on a strictly
    /// higher score, so the earliest heading wins ties. A zero score never
    /// leads.
    pub fn best_match<'t>(&self, label: &str, table: &'t HeadingTable) -> Option<Match<'t>> {
        let link = normalize_text(label);
        let mut best: Option<Match<'t>> = None;

        for (heading, slug) in table.iter() {
            let score = self.score(&link, &normalize_text(heading));
            let leading = best.map_or(0.0, |m| m.score);
            if score > leading {
                best = Some(Match { heading, slug, score });
            }
        }

        best.filter(|m| m.score > self.threshold)
    }
}
