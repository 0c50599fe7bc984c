//! Interactive configuration wizard for creating `md-press.toml`.
//!
//! The wizard collects the source-tree settings (root, title, exclusions,
//! creation-date window) and the PDF output options through a series of
//! prompts, pre-filled with defaults detected from the tree itself.

use crate::detection::{detect_defaults, DetectedDefaults};
use crate::sinks::{EngineOptions, PDF};
use crate::source::{parse_bound, Source};
use anyhow::{anyhow, Context, Result};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Complete configuration for an md-press project.
#[derive(Deserialize, Serialize)]
pub struct Configuration {
    pub source: Source,
    pub pdf: Option<PDF>,
}

/// A starting stylesheet with the classes the assembled book relies on.
const STARTER_STYLESHEET: &str = "\
body { font-family: serif; font-size: 12pt; line-height: 1.5; }
img { max-width: 100%; }
pre { white-space: pre-wrap; }
table { border-collapse: collapse; }
td, th { border: 1px solid #999; padding: 0.25em 0.5em; }

.page-break { page-break-after: always; }
section.break { page-break-inside: avoid; }
";

/// Run the interactive configuration wizard.
///
/// Prompts for source-tree settings and PDF output options, then writes
/// `md-press.toml` to the current directory.
pub fn run() -> Result<()> {
    let theme = ColorfulTheme {
        ..ColorfulTheme::default()
    };

    // get the root first so we can detect defaults
    let root = Input::with_theme(&theme)
        .with_prompt("Markdown directory")
        .default(".".to_string())
        .interact()
        .with_context(|| "Failed to obtain the source directory")?;
    let root = PathBuf::from(root);
    if !root.exists() || !root.is_dir() {
        return Err(anyhow!("Path '{}' isn't a directory!", root.display()));
    }

    let DetectedDefaults {
        title: detected_title,
        exclusions: detected_exclusions,
    } = detect_defaults(&root);

    let title: String = Input::with_theme(&theme)
        .with_prompt("Book title (leave empty for none)")
        .with_initial_text(detected_title.unwrap_or_default())
        .allow_empty(true)
        .interact()
        .with_context(|| "Failed to obtain the title")?;
    let title = if title.trim().is_empty() {
        None
    } else {
        Some(title.trim().to_string())
    };

    let mut exclude: Vec<String> = detected_exclusions;
    'exclusions: loop {
        if !exclude.is_empty() {
            println!("Excluded: [{}]", exclude.join("], ["));
        }
        let pattern: String = Input::with_theme(&theme)
            .with_prompt("File name or glob to exclude (leave blank to move on)")
            .allow_empty(true)
            .interact()?;
        if pattern.trim().is_empty() {
            break 'exclusions;
        }

        // compile now so a bad pattern is rejected at the prompt
        globset::Glob::new(pattern.trim()).with_context(|| "Failed to parse glob!")?;
        exclude.push(pattern.trim().to_string());
    }

    let created_after = prompt_bound(&theme, "Only include files created after (YYYY-MM-DD, leave blank for no bound)")?;
    let created_before = prompt_bound(&theme, "Only include files created before (YYYY-MM-DD, leave blank for no bound)")?;

    let source = Source {
        root,
        title,
        exclude,
        created_after,
        created_before,
    };

    let mut pdf = None;
    if Confirm::with_theme(&theme)
        .with_prompt("Do you want to render to PDF?")
        .default(true)
        .interact()?
    {
        let outfile: String = Input::with_theme(&theme)
            .with_prompt("Output pdf file")
            .default("book.pdf".to_string())
            .allow_empty(false)
            .interact()?;
        let mut outfile = PathBuf::from(outfile);
        let ext = outfile
            .extension()
            .map(std::ffi::OsStr::to_ascii_lowercase)
            .unwrap_or_default();
        if ext != *"pdf" {
            outfile.set_extension("pdf");
        }

        let stylesheet: String = Input::with_theme(&theme)
            .with_prompt("Stylesheet to inline")
            .default("style.css".to_string())
            .interact()?;
        let stylesheet = PathBuf::from(stylesheet);
        if !stylesheet.exists()
            && Confirm::with_theme(&theme)
                .with_prompt(format!(
                    "{} doesn't exist, write a starter stylesheet there?",
                    stylesheet.display()
                ))
                .default(true)
                .interact()?
        {
            std::fs::write(&stylesheet, STARTER_STYLESHEET)
                .with_context(|| format!("Failed to write {}", stylesheet.display()))?;
            println!("{} written!", stylesheet.display());
        }

        let debug_html = if Confirm::with_theme(&theme)
            .with_prompt("Also write the assembled HTML for debugging?")
            .default(false)
            .interact()?
        {
            let path: String = Input::with_theme(&theme)
                .with_prompt("Debug HTML file")
                .default("debug.html".to_string())
                .interact()?;
            Some(PathBuf::from(path))
        } else {
            None
        };

        let page_breaks = Confirm::with_theme(&theme)
            .with_prompt("Start each document on a new page?")
            .default(true)
            .interact()?;

        let isolate_sections = Confirm::with_theme(&theme)
            .with_prompt("Keep illustrated and chapter sections on their own pages?")
            .default(true)
            .interact()?;

        pdf = Some(PDF {
            outfile,
            stylesheet,
            debug_html,
            page_breaks,
            isolate_sections,
            options: EngineOptions::default(),
        });
    }

    let config = Configuration { source, pdf };

    let config = toml::to_string_pretty(&config)
        .with_context(|| "Failed to convert configuration to TOML")?;

    let config_path = PathBuf::from("md-press.toml");
    if config_path.exists()
        && !Confirm::with_theme(&theme)
            .with_prompt("md-press.toml already exists, do you want to override it?")
            .interact()?
    {
        println!("Configuration:");
        println!("{}", config);
    } else {
        std::fs::write("md-press.toml", config)
            .with_context(|| "Failed to write configuration file")?;
        println!("md-press.toml written!");
    }

    Ok(())
}

/// Prompt for an optional date bound, validated with the shared parser.
fn prompt_bound(theme: &ColorfulTheme, prompt: &str) -> Result<Option<String>> {
    let input: String = Input::with_theme(theme)
        .with_prompt(prompt)
        .allow_empty(true)
        .validate_with(|input: &String| -> Result<(), String> {
            if input.trim().is_empty() {
                return Ok(());
            }
            parse_bound(input).map(|_| ()).map_err(|e| e.to_string())
        })
        .interact()?;

    if input.trim().is_empty() {
        Ok(None)
    } else {
        Ok(Some(input.trim().to_string()))
    }
}
