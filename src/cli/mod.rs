//! Command-line interface for shred.
//!
//! Provides commands for rendering HTML elements, concatenating page text
//! from an LXP bundle, checking where video transcripts live, and showing
//! the resolved configuration.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::config;
use crate::core::{check_elements, concat, encoding_for_label, process, MissingElementPolicy};
use crate::domain::Report;

/// shred - extract text from LXP e-learning export bundles
#[derive(Parser, Debug)]
#[command(name = "shred")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render every HLXP_HTML element of a JSON file to its own text file
    Process {
        /// JSON array of elements
        inputfile: PathBuf,

        /// Existing output directory
        outpath: PathBuf,

        /// File name prefix (<prefix>-<uid>.txt)
        prefix: String,
    },

    /// Concatenate page text from an LXP bundle using the course outline
    Concat {
        /// Course outline CSV
        #[arg(long)]
        csvfile: PathBuf,

        /// LXP bundle directory (elements.json and transcripts)
        #[arg(long)]
        lxpdir: PathBuf,

        /// Where all text files are written
        #[arg(long)]
        outdir: PathBuf,

        /// Skip outline entries whose element is missing instead of aborting
        #[arg(long)]
        skip_missing: bool,
    },

    /// Report where video elements keep their transcript metadata
    #[command(alias = "check_elements")]
    CheckElements {
        /// elements.json file path
        #[arg(long)]
        elements: PathBuf,
    },

    /// Show resolved configuration (debug)
    Config,
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Process {
                inputfile,
                outpath,
                prefix,
            } => run_process(inputfile, outpath, &prefix).await,
            Commands::Concat {
                csvfile,
                lxpdir,
                outdir,
                skip_missing,
            } => run_concat(csvfile, lxpdir, outdir, skip_missing).await,
            Commands::CheckElements { elements } => run_check_elements(elements).await,
            Commands::Config => show_config(),
        }
    }
}

/// Render HTML elements one file each
async fn run_process(input: PathBuf, out_dir: PathBuf, prefix: &str) -> Result<()> {
    let cfg = config::config()?;

    let written = process(&input, &out_dir, prefix, &cfg.process_render_options())
        .await
        .with_context(|| format!("Failed to process {}", input.display()))?;

    for path in &written {
        println!("---- writing to {}", path.display());
    }
    println!("---- done ({} files)", written.len());

    Ok(())
}

/// Run the full outline + bundle pipeline
async fn run_concat(
    csv_path: PathBuf,
    bundle_dir: PathBuf,
    out_dir: PathBuf,
    skip_missing: bool,
) -> Result<()> {
    let cfg = config::config()?;
    let mut options = cfg.concat_options()?;
    if skip_missing {
        options.resolve.missing_elements = MissingElementPolicy::Skip;
    }

    let mut report = Report::echoing();
    concat(&csv_path, &bundle_dir, &out_dir, &options, &mut report)
        .await
        .with_context(|| format!("Failed to concat bundle {}", bundle_dir.display()))?;

    println!(
        "---- done: {} html rows, {} video rows -> {} written, {} copied, {} skipped",
        report.total_txt,
        report.total_video,
        report.written(),
        report.copied(),
        report.skipped()
    );

    Ok(())
}

/// Print transcript locations of every video element
async fn run_check_elements(path: PathBuf) -> Result<()> {
    let cfg = config::config()?;
    let encoding = encoding_for_label(&cfg.elements_encoding)?;

    let findings = check_elements(&path, encoding)
        .await
        .with_context(|| format!("Failed to check elements in {}", path.display()))?;

    for finding in &findings {
        println!("{}", finding);
    }

    Ok(())
}

/// Show the resolved configuration
fn show_config() -> Result<()> {
    let cfg = config::config()?;

    let config_file = cfg
        .config_file
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(none)".to_string());

    println!("Config file:       {}", config_file);
    println!("Image to alt:      {}", cfg.image_to_alt);
    println!("Wrap width:        {}", cfg.width);
    println!("Decorate:          {}", cfg.decorate);
    println!("Key max length:    {}", cfg.key_max_len);
    println!("Elements encoding: {}", cfg.elements_encoding);
    println!("Missing elements:  {}", cfg.missing_elements);

    Ok(())
}
