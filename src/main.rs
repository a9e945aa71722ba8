use clap::{Parser, Subcommand};
use colored::Colorize;
use log::info;
use std::path::{Path, PathBuf};

mod config;
mod document;
mod error;
mod headings;
mod matcher;
mod reconcile;
mod slug;

use config::Config;
use document::{read_document, write_document};
use error::FixError;
use reconcile::{reconcile_links, relink_fixed};

/// anchorfix - Repair internal markdown links against GitHub heading anchors
#[derive(Parser)]
#[command(name = "anchorfix")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, global = true, default_value = ".anchorfix.toml")]
    config: PathBuf,

    /// Quiet mode - suppress the confirmation line
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Point every [label](#anchor) link at its best-matching heading
    FixAnchors {
        /// Markdown file to rewrite in place
        #[arg(default_value = "README.md")]
        path: PathBuf,
    },

    /// Point every "back to top" link at the document's top heading
    FixReturnLinks {
        /// Markdown file to rewrite in place
        #[arg(default_value = "README.md")]
        path: PathBuf,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let result = Config::load(&cli.config).and_then(|config| match cli.command {
        Commands::FixAnchors { path } => cmd_fix_anchors(&path, &config, cli.quiet),
        Commands::FixReturnLinks { path } => cmd_fix_return_links(&path, &config, cli.quiet),
    });

    if let Err(e) = result {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_fix_anchors(path: &Path, config: &Config, quiet: bool) -> Result<(), FixError> {
    let content = read_document(path)?;
    let result = reconcile_links(&content, &config.scoring);
    info!(
        "{} headings, {} links, {} rewritten",
        result.heading_count,
        result.rewrites.len(),
        result.changed()
    );
    for rewrite in result.rewrites.iter().filter(|r| r.old_anchor != r.new_anchor) {
        let how = match rewrite.score {
            Some(score) => format!("score {score:.1}"),
            None => "fallback".to_string(),
        };
        info!(
            "line {}: [{}] #{} -> #{} ({how})",
            rewrite.line + 1,
            rewrite.label,
            rewrite.old_anchor,
            rewrite.new_anchor
        );
    }
    write_document(path, &result.text)?;

    if !quiet {
        println!(
            "{} {} headings found, anchors fixed in {} {}",
            "✓".green().bold(),
            result.heading_count.to_string().cyan(),
            path.display().to_string().cyan(),
            format!("({} links rewritten)", result.changed()).dimmed()
        );
    }

    Ok(())
}

fn cmd_fix_return_links(path: &Path, config: &Config, quiet: bool) -> Result<(), FixError> {
    let content = read_document(path)?;
    let links = &config.return_links;
    let slug = links.target_slug(&content, path)?;
    let result = relink_fixed(&content, &links.label, &slug)?;
    write_document(path, &result.text)?;

    if !quiet {
        println!(
            "{} {} '{}' links in {} now point to {}",
            "✓".green().bold(),
            result.replaced.to_string().cyan(),
            links.label,
            path.display().to_string().cyan(),
            format!("#{slug}").cyan()
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const README: &str = "\
# Dotfiles - PavelDelhomme

## 📑 Table des matières

- [Installation](#instalation)
- [Utilisation](#utilisation-rapide)

## Installation

[🔝 Retour en haut](#retour-en-haut)

## Utilisation rapide

[🔝 Retour en haut](#dotfiles---paveldelhomme)
";

    fn write_readme(dir: &TempDir) -> PathBuf {
        let path = dir.path().join("README.md");
        fs::write(&path, README).unwrap();
        path
    }

    #[test]
    fn test_cmd_fix_anchors_rewrites_file() {
        let dir = TempDir::new().unwrap();
        let path = write_readme(&dir);

        cmd_fix_anchors(&path, &Config::default(), true).unwrap();
        let fixed = fs::read_to_string(&path).unwrap();
        assert!(fixed.contains("- [Installation](#installation)\n"));
        // "utilisation" inside "utilisation rapide" scores 11 / 18 * 80, under the threshold
        assert!(fixed.contains("- [Utilisation](#utilisation)\n"));
        // Unmatched labels fall back to their own slug
        assert_eq!(fixed.matches("[🔝 Retour en haut](#retour-en-haut)").count(), 2);
    }

    #[test]
    fn test_cmd_fix_anchors_twice_is_stable() {
        let dir = TempDir::new().unwrap();
        let path = write_readme(&dir);

        cmd_fix_anchors(&path, &Config::default(), true).unwrap();
        let first = fs::read_to_string(&path).unwrap();
        cmd_fix_anchors(&path, &Config::default(), true).unwrap();
        let second = fs::read_to_string(&path).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_cmd_fix_return_links() {
        let dir = TempDir::new().unwrap();
        let path = write_readme(&dir);

        cmd_fix_return_links(&path, &Config::default(), true).unwrap();
        let fixed = fs::read_to_string(&path).unwrap();
        assert_eq!(fixed.matches("[🔝 Retour en haut](#dotfiles-paveldelhomme)").count(), 2);
        // Other links untouched
        assert!(fixed.contains("- [Installation](#instalation)\n"));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.md");
        let err = cmd_fix_anchors(&path, &Config::default(), true).unwrap_err();
        assert!(matches!(err, FixError::Read { .. }));
        assert!(!path.exists());
    }

    #[test]
    fn test_no_top_heading_leaves_file_untouched() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("README.md");
        let content = "## Section\n[🔝 Retour en haut](#x)\n";
        fs::write(&path, content).unwrap();

        let err = cmd_fix_return_links(&path, &Config::default(), true).unwrap_err();
        assert!(matches!(err, FixError::NoTopHeading { .. }));
        assert_eq!(fs::read_to_string(&path).unwrap(), content);
    }
}
