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

use anyhow::{Context, Result};
use clap::Parser;
use fluxion_anomaly_cli::cli::{self, Cli, Commands};
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<()> {
    // Logs go to stderr so stdout carries only the report
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to install tracing subscriber")?;

    match Cli::parse().command {
        Commands::Detect(args) => {
            let report = cli::detect(&args)?;
            if let Some(table) = report.table {
                print!("{table}");
            }
            if let Some(rows) = report.stored_rows {
                println!("Stored {rows} rows in solar_data");
            }
        }
        Commands::Generate(args) => {
            let count = cli::generate(&args)?;
            println!("Generated {count} readings at {}", args.path.display());
        }
    }

    Ok(())
}
