//! PDF output via the external `wkhtmltopdf` engine.
//!
//! The sink owns the whole render: it runs every collected document through
//! the HTML pipeline, assembles the combined document with the stylesheet
//! inlined, optionally writes the assembled HTML next to the PDF for
//! debugging, and finally pipes the HTML into `wkhtmltopdf` on stdin.

use crate::render;
use crate::source::{Document, Source};
use anyhow::{anyhow, Context, Result};
use indicatif::ProgressBar;
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};

/// The `[pdf]` section of `md-press.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PDF {
    /// Output PDF file path
    pub outfile: PathBuf,
    /// Stylesheet inlined into the head of the assembled document
    #[serde(default = "default_stylesheet")]
    pub stylesheet: PathBuf,
    /// Where to write the assembled HTML for debugging (if None, not written)
    #[serde(default)]
    pub debug_html: Option<PathBuf>,
    /// Insert an explicit page-break marker after each document
    #[serde(default = "default_enabled")]
    pub page_breaks: bool,
    /// Restructure each fragment so illustrated and chapter-level sections
    /// land on their own pages
    #[serde(default = "default_enabled")]
    pub isolate_sections: bool,
    #[serde(default)]
    pub options: EngineOptions,
}

/// Flags handed to the rendering engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineOptions {
    /// Path to the wkhtmltopdf binary
    #[serde(default = "default_binary")]
    pub binary: PathBuf,
    /// Allow the engine to load `file:///` resources (required for images)
    #[serde(default = "default_enabled")]
    pub enable_local_file_access: bool,
    #[serde(default = "default_encoding")]
    pub encoding: String,
    /// Footer text on the right edge of every page; `[page]` expands to the
    /// page number (if None, no footer)
    #[serde(default = "default_footer_right")]
    pub footer_right: Option<String>,
    #[serde(default = "default_footer_font_size")]
    pub footer_font_size: u32,
    #[serde(default = "default_image_quality")]
    pub image_quality: u32,
}

fn default_stylesheet() -> PathBuf {
    PathBuf::from("style.css")
}
fn default_enabled() -> bool {
    true
}
fn default_binary() -> PathBuf {
    PathBuf::from("wkhtmltopdf")
}
fn default_encoding() -> String {
    "UTF-8".to_string()
}
fn default_footer_right() -> Option<String> {
    Some("[page]".to_string())
}
fn default_footer_font_size() -> u32 {
    10
}
fn default_image_quality() -> u32 {
    100
}

impl Default for EngineOptions {
    fn default() -> Self {
        EngineOptions {
            binary: default_binary(),
            enable_local_file_access: default_enabled(),
            encoding: default_encoding(),
            footer_right: default_footer_right(),
            footer_font_size: default_footer_font_size(),
            image_quality: default_image_quality(),
        }
    }
}

impl EngineOptions {
    /// The argument list for the engine invocation, ending with `-` (read
    /// HTML from stdin) and the output path.
    fn arguments(&self, outfile: &PathBuf) -> Vec<OsString> {
        let mut args: Vec<OsString> = Vec::default();
        if self.enable_local_file_access {
            args.push("--enable-local-file-access".into());
        }
        args.push("--encoding".into());
        args.push(self.encoding.clone().into());
        if let Some(footer) = &self.footer_right {
            args.push("--footer-right".into());
            args.push(footer.clone().into());
            args.push("--footer-font-size".into());
            args.push(self.footer_font_size.to_string().into());
        }
        args.push("--image-quality".into());
        args.push(self.image_quality.to_string().into());
        args.push("--quiet".into());
        args.push("-".into());
        args.push(outfile.clone().into());
        args
    }
}

impl PDF {
    /// Render the collected documents into the output PDF.
    pub fn render(
        &self,
        source: &Source,
        documents: &[Document],
        progress: &ProgressBar,
    ) -> Result<()> {
        let styles = std::fs::read_to_string(&self.stylesheet).with_context(|| {
            format!(
                "Failed to read stylesheet {}",
                self.stylesheet.display()
            )
        })?;

        let mut fragments: Vec<String> = Vec::with_capacity(documents.len());
        for document in documents {
            log::debug!("rendering {}", document.path.display());
            fragments.push(render::document_fragment(document, self.isolate_sections));
            progress.inc(1);
        }

        let book = render::assemble(
            &fragments,
            &styles,
            source.title.as_deref(),
            self.page_breaks,
        );

        if let Some(debug_path) = &self.debug_html {
            std::fs::write(debug_path, &book).with_context(|| {
                format!("Failed to write debug HTML to {}", debug_path.display())
            })?;
        }

        self.write_pdf(&book)
    }

    /// Hand the assembled HTML to the engine on stdin; the engine writes the
    /// PDF to the configured path itself.
    fn write_pdf(&self, book: &str) -> Result<()> {
        let arguments = self.options.arguments(&self.outfile);
        log::debug!(
            "invoking {} with {} argument(s)",
            self.options.binary.display(),
            arguments.len()
        );

        let mut child = Command::new(&self.options.binary)
            .args(arguments)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .with_context(|| {
                format!(
                    "Failed to launch the PDF engine {}",
                    self.options.binary.display()
                )
            })?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| anyhow!("Failed to open the PDF engine's stdin"))?;
        stdin
            .write_all(book.as_bytes())
            .with_context(|| "Failed to stream HTML to the PDF engine")?;
        drop(stdin);

        let output = child
            .wait_with_output()
            .with_context(|| "Failed to wait for the PDF engine")?;
        if !output.status.success() {
            return Err(anyhow!(
                "The PDF engine exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            ));
        }

        Ok(())
    }
}
