use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::Value;
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use brandbook::api::content_negotiation::requested_format;
use brandbook::api::handlers::brands::{export_directory_to_bundle, import_value, render_bundle};
use brandbook::config::FALLBACK_BASE_URL;
use brandbook::models::BrandDirectory;

/// Convert between Organization bundles and brand directories
#[derive(Parser, Debug)]
#[command(name = "brandbook-convert")]
#[command(about = "Convert between FHIR Organization bundles and brand directories", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Read a collection Bundle into a brand directory
    Import {
        /// Bundle JSON file, `-` for stdin
        #[arg(short, long, default_value = "-")]
        input: PathBuf,

        /// Keep only this brand and its direct children
        #[arg(short, long)]
        root: Option<String>,

        /// Output file, stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Write a brand directory out as a collection Bundle
    Export {
        /// Directory JSON file (`{"<id>": Brand, ...}`), `-` for stdin
        #[arg(short, long, default_value = "-")]
        input: PathBuf,

        /// Base URL for entry locators
        #[arg(short, long, default_value = FALLBACK_BASE_URL)]
        base_url: String,

        /// Output format: json or xml
        #[arg(short, long, default_value = "json")]
        format: String,

        /// Output file, stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "brandbook=info".into()),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    match args.command {
        Command::Import { input, root, output } => {
            let bundle: Value = serde_json::from_str(&read_input(&input)?)
                .with_context(|| format!("Failed to parse bundle JSON from {}", input.display()))?;

            let document = import_value(bundle, root.as_deref())?;
            tracing::info!(
                brands = document.brands.len(),
                base_url_status = %document.base_url_status,
                "Imported bundle"
            );

            write_output(output.as_deref(), &serde_json::to_string_pretty(&document)?)
        }
        Command::Export {
            input,
            base_url,
            format,
            output,
        } => {
            let format = requested_format(&format)?;
            let directory: BrandDirectory = serde_json::from_str(&read_input(&input)?)
                .with_context(|| format!("Failed to parse brand directory from {}", input.display()))?;

            let bundle = export_directory_to_bundle(&directory, &base_url)?;
            tracing::info!(entries = bundle.entry.len(), base_url = %base_url, "Exported directory");

            write_output(output.as_deref(), &render_bundle(&bundle, format)?)
        }
    }
}

fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut content = String::new();
        io::stdin()
            .read_to_string(&mut content)
            .context("Failed to read stdin")?;
        return Ok(content);
    }

    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn write_output(path: Option<&Path>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(content.as_bytes())?;
            stdout.write_all(b"\n")?;
            Ok(())
        }
    }
}
