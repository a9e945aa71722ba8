use std::path::PathBuf;

use thiserror::Error;

/// Failures that abort a run before or after the rewrite.
///
/// Unmatched links and malformed link markup are not errors.
#[derive(Error, Debug)]
pub enum FixError {
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{} is not valid UTF-8", path.display())]
    Encoding { path: PathBuf },

    #[error("invalid config {}: {message}", path.display())]
    Config { path: PathBuf, message: String },

    #[error("{} has no top-level `# ` heading; set return_links.top_heading", path.display())]
    NoTopHeading { path: PathBuf },

    #[error("invalid link pattern: {0}")]
    Pattern(#[from] regex::Error),
}
