use anyhow::{Context, Result};
use cli::Cli;
use config_wizard::Configuration;
use indicatif::{ProgressBar, ProgressStyle};
use std::process::ExitCode;

mod cli;
mod config_wizard;
mod detection;
mod render;
mod sinks;
mod source;

fn main() -> ExitCode {
    if let Err(e) = try_main() {
        eprintln!("{}: {e:#}", console::style("Error").red());
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn try_main() -> Result<()> {
    use clap::Parser;
    let cli = Cli::parse();

    match &cli.command {
        cli::Commands::Config => config_wizard::run(),
        cli::Commands::Render => {
            println!("Loading configuration...");
            let contents = std::fs::read_to_string("md-press.toml")
                .with_context(|| "Failed to load md-press.toml contents")?;
            let config: Configuration =
                toml::from_str(&contents).with_context(|| "Failed to parse TOML")?;

            let Configuration { source, pdf } = config;

            println!("Collecting documents...");
            let documents = source::gather(&source)
                .with_context(|| "Failed to collect Markdown documents")?;
            println!("  Found {} document(s)", documents.len());

            if let Some(pdf) = pdf {
                if documents.is_empty() {
                    println!("Nothing matched the configured filters; no PDF written.");
                    return Ok(());
                }

                let progress = ProgressBar::new(documents.len() as u64);
                progress.set_style(
                    ProgressStyle::default_bar()
                        .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                        .expect("can parse progress style")
                        .progress_chars("#>-"),
                );
                progress.set_message("Rendering PDF...");

                pdf.render(&source, &documents, &progress)
                    .with_context(|| "Failed to render PDF")?;
                progress.finish_and_clear();

                println!();
                println!("  PDF: {}", pdf.outfile.display());
            } else {
                println!("No PDF output configured.");
            }

            Ok(())
        }
    }
}
