// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of FluxION.
//
// Licensed under the Creative Commons Attribution-NonCommercial-NoDerivatives 4.0 International
// (CC BY-NC-ND 4.0). You may use and share this file for non-commercial purposes only and you may not
// create derivatives. See <https://creativecommons.org/licenses/by-nc-nd/4.0/>.
//
// This software is provided "AS IS", without warranty of any kind.
//
// For commercial licensing, please contact: info@solare.cz

//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "fluxion-anomaly")]
#[command(author, version, about = "FluxION solar generation anomaly detection")]
#[command(
    long_about = "Scores a batch of solar generation readings with an isolation forest\n\
    and reports the readings that look anomalous.\n\
    \nExamples:\n  \
    fluxion-anomaly detect --csv cleaned_solar_data.csv\n  \
    fluxion-anomaly detect --synthetic --output both --output-dir ./out\n  \
    fluxion-anomaly generate --path demo.csv"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Score a batch of readings and report anomalies
    #[command(
        long_about = "Load a batch, fit the isolation forest and flag anomalies.\n\
        \nData Sources (choose one):\n  \
        - CSV: --csv <path> with columns timestamp (or date) and generation_kw (or output_kw)\n  \
        - Synthetic: --synthetic, 100 daily readings with two injected outliers\n\
        \nExamples:\n  \
        fluxion-anomaly detect --csv data.csv --contamination 0.02\n  \
        fluxion-anomaly detect --csv data.csv --sqlite dashboard.db"
    )]
    Detect(DetectArgs),

    /// Write the synthetic demo batch to a CSV file
    Generate(GenerateArgs),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Console table and digest only
    Table,
    /// Result files only
    Csv,
    /// Console table and result files
    Both,
}

impl OutputFormat {
    pub fn prints_table(self) -> bool {
        matches!(self, Self::Table | Self::Both)
    }

    pub fn writes_files(self) -> bool {
        matches!(self, Self::Csv | Self::Both)
    }
}

#[derive(Debug, Parser)]
pub struct DetectArgs {
    /// CSV file with the readings to score
    #[arg(long, value_name = "PATH", conflicts_with = "synthetic")]
    pub csv: Option<PathBuf>,

    /// Score the built-in synthetic batch instead of a file
    #[arg(long, default_value_t = false)]
    pub synthetic: bool,

    /// TOML file with a [detector] section
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Expected fraction of anomalous readings, in (0, 0.5]
    #[arg(long)]
    pub contamination: Option<f64>,

    /// Random seed for the forest
    #[arg(long)]
    pub seed: Option<u64>,

    /// Number of isolation trees
    #[arg(long)]
    pub estimators: Option<usize>,

    /// Subsample size per tree
    #[arg(long)]
    pub max_samples: Option<usize>,

    /// How to report results
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub output: OutputFormat,

    /// Directory for final_output_with_anomalies.csv, anomalies.csv and weekly_summary.txt
    #[arg(long, value_name = "PATH", default_value = ".")]
    pub output_dir: PathBuf,

    /// SQLite database whose solar_data table is replaced with the scored batch
    #[arg(long, value_name = "PATH")]
    pub sqlite: Option<PathBuf>,
}

#[derive(Debug, Parser)]
pub struct GenerateArgs {
    /// Where to write the CSV
    #[arg(long, value_name = "PATH", default_value = "synthetic_solar_data.csv")]
    pub path: PathBuf,

    /// Seed for the generated values
    #[arg(long, default_value_t = 42)]
    pub seed: u64,
}
