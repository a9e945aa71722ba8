//! Link rewrite passes.

use std::sync::LazyLock;

use log::{debug, info};
use regex::{Captures, NoExpand, Regex};

use crate::headings::HeadingTable;
use crate::matcher::Scoring;
use crate::slug::slugify;

/// `[label](#anchor)` with a non-empty label and anchor.
static LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\(#([^)]+)\)").unwrap());

/// One internal link as it was rewritten.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkRewrite {
    /// Zero-based line index
    pub line: usize,
    pub label: String,
    pub old_anchor: String,
    pub new_anchor: String,
    /// `None` when no heading cleared the threshold and the label itself
    /// was slugified.
    pub score: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct Reconciliation {
    pub text: String,
    /// Distinct heading texts found
    pub heading_count: usize,
    /// Every link occurrence, in document order
    pub rewrites: Vec<LinkRewrite>,
}

impl Reconciliation {
    /// Links whose anchor actually changed.
    pub fn changed(&self) -> usize {
        self.rewrites
            .iter()
            .filter(|r| r.old_anchor != r.new_anchor)
            .count()
    }
}

/// Points every internal link at the heading its label most resembles.
///
/// Each `[label](#anchor)` is rebuilt from its label alone: the old anchor
/// is discarded, the label is matched against the heading table, and the
/// winning heading's slug (or the label's own slug when nothing clears the
/// threshold) becomes the new anchor. Running the pass on its own output
/// changes nothing. Line endings and lines without links are kept as-is.
pub fn reconcile_links(content: &str, scoring: &Scoring) -> Reconciliation {
    let table = HeadingTable::build(content);
    if table.is_empty() {
        info!("no `## ` or `### ` headings found; links fall back to their labels");
    }

    let mut rewrites = Vec::new();
    let mut text = String::with_capacity(content.len());

    for (line, raw) in content.split_inclusive('\n').enumerate() {
        if !LINK_RE.is_match(raw) {
            text.push_str(raw);
            continue;
        }

        let rewritten = LINK_RE.replace_all(raw, |caps: &Captures| {
            let label = &caps[1];
            let (new_anchor, score) = match scoring.best_match(label, &table) {
                Some(m) => {
                    debug!(
                        "line {}: {:?} -> {:?} (score {:.1})",
                        line + 1,
                        label,
                        m.heading,
                        m.score
                    );
                    (m.slug.to_string(), Some(m.score))
                }
                None => {
                    debug!("line {}: {:?} has no matching heading", line + 1, label);
                    (slugify(label), None)
                }
            };

            let replacement = format!("[{label}](#{new_anchor})");
            rewrites.push(LinkRewrite {
                line,
                label: label.to_string(),
                old_anchor: caps[2].to_string(),
                new_anchor,
                score,
            });
            replacement
        });
        text.push_str(&rewritten);
    }

    Reconciliation {
        text,
        heading_count: table.len(),
        rewrites,
    }
}

#[derive(Debug, Clone)]
pub struct Relink {
    pub text: String,
    pub replaced: usize,
}

/// Points every `[label](#...)` with exactly this label at `slug`,
/// whatever its current anchor.
pub fn relink_fixed(content: &str, label: &str, slug: &str) -> Result<Relink, regex::Error> {
    let pattern = Regex::new(&format!(r"\[{}\]\(#[^)]+\)", regex::escape(label)))?;
    let replacement = format!("[{label}](#{slug})");

    let replaced = pattern.find_iter(content).count();
    let text = pattern
        .replace_all(content, NoExpand(&replacement))
        .into_owned();
    debug!("{replaced} '{label}' links now target #{slug}");

    Ok(Relink { text, replaced })
}
