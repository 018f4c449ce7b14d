//! CLI Entry Point for accel-decode
//!
//! # Usage
//!
//! Print header metadata as JSON:
//! ```bash
//! accel-decode info subject01.datx subject02.dat
//! ```
//!
//! Print the first rows of the decoded series:
//! ```bash
//! accel-decode decode subject01.datx --units ms-2 --head 20
//! ```

use accel_decode::config::{DecoderConfig, DEFAULT_CONFIG_PATH};
use accel_decode::{logging, Decoder, Units};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "accel-decode")]
#[command(about = "Decode wearable accelerometer .datx/.dat logs", long_about = None)]
struct Cli {
    /// Configuration file
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode each file and print its metadata as JSON
    Info {
        /// Recordings to inspect
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Decode a file and print the first rows of the series
    Decode {
        /// Recording to decode
        file: PathBuf,

        /// Output units: g, ms-2 or raw (defaults to the configured units)
        #[arg(long)]
        units: Option<String>,

        /// Number of rows to print
        #[arg(long, default_value = "10")]
        head: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = DecoderConfig::load_from(&cli.config)
        .with_context(|| format!("loading configuration from {}", cli.config.display()))?;
    config.validate().map_err(anyhow::Error::msg)?;
    logging::init_from_config(&config).map_err(anyhow::Error::msg)?;

    match cli.command {
        Commands::Info { files } => print_info(&config, &files),
        Commands::Decode { file, units, head } => print_head(&config, file, units, head),
    }
}

fn print_info(config: &DecoderConfig, files: &[PathBuf]) -> Result<()> {
    let decoder = Decoder::new(config.decoder);
    for file in files {
        let recording = decoder.decode(file)?;
        let report = serde_json::json!({
            "file": file.display().to_string(),
            "samples": recording.series.len(),
            "firmware": recording.firmware.0,
            "metadata": recording.metadata,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    }
    Ok(())
}

fn print_head(
    config: &DecoderConfig,
    file: PathBuf,
    units: Option<String>,
    head: usize,
) -> Result<()> {
    let mut settings = config.decoder;
    if let Some(units) = units {
        settings = settings.with_units(units.parse::<Units>()?);
    }

    let recording = Decoder::new(settings).decode(&file)?;
    let series = &recording.series;

    let header: Vec<String> = series
        .columns()
        .iter()
        .map(|c| format!("{} [{}]", c.name, c.unit))
        .collect();
    println!("{}", header.join("\t"));
    for row in series.rows().take(head) {
        println!(
            "{}\t{:.4}\t{:.4}\t{:.4}",
            row.timestamp.format("%Y-%m-%d %H:%M:%S%.3f"),
            row.x,
            row.y,
            row.z
        );
    }
    println!(
        "... {} samples total ({:?})",
        series.len(),
        recording.reconciliation
    );
    Ok(())
}
