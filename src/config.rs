//! Optional `.anchorfix.toml` settings.

use std::fs;
use std::path::Path;

use log::debug;
use serde::Deserialize;

use crate::error::FixError;
use crate::headings::title_heading;
use crate::matcher::Scoring;
use crate::slug::slugify;

pub const DEFAULT_RETURN_LABEL: &str = "🔝 Retour en haut";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub scoring: Scoring,
    pub return_links: ReturnLinks,
}

/// The recurring "back to top" link and where it should point.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReturnLinks {
    pub label: String,
    /// Heading whose slug every return link targets. Falls back to the
    /// document's first `# ` heading.
    pub top_heading: Option<String>,
}

impl Default for ReturnLinks {
    fn default() -> Self {
        Self {
            label: DEFAULT_RETURN_LABEL.to_string(),
            top_heading: None,
        }
    }
}

impl ReturnLinks {
    /// Slug of the designated top heading for `content`.
    pub fn target_slug(&self, content: &str, path: &Path) -> Result<String, FixError> {
        let heading = match &self.top_heading {
            Some(heading) => heading.clone(),
            None => title_heading(content).ok_or_else(|| FixError::NoTopHeading {
                path: path.to_path_buf(),
            })?,
        };
        Ok(slugify(&heading))
    }
}

impl Config {
    /// Loads `path`, or the defaults when it does not exist.
    pub fn load(path: &Path) -> Result<Self, FixError> {
        if !path.exists() {
            debug!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        debug!("loading config from {}", path.display());
        let content = fs::read_to_string(path).map_err(|e| FixError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        toml::from_str(&content).map_err(|e| FixError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}
