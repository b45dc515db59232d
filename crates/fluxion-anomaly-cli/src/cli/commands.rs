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

//! Subcommand implementations shared by the binary and its tests.

use anyhow::{Context, Result, bail};
use fluxion_anomaly_core::{PipelineOutput, run};
use std::path::PathBuf;
use tracing::info;

use super::args::{DetectArgs, GenerateArgs};
use super::config::load_config;
use super::data_loaders::{CsvLoader, DataLoader, SyntheticConfig, SyntheticLoader};
use super::formatters::{CsvFormatter, TableFormatter};
use super::store::SqliteStore;

/// What a `detect` run produced
#[derive(Debug)]
pub struct DetectReport {
    pub output: PipelineOutput,
    /// Console rendering, present for `--output table|both`
    pub table: Option<String>,
    pub written_files: Vec<PathBuf>,
    pub stored_rows: Option<usize>,
}

fn select_loader(args: &DetectArgs) -> Result<Box<dyn DataLoader>> {
    match (&args.csv, args.synthetic) {
        (Some(path), _) => Ok(Box::new(CsvLoader::new(path.clone()))),
        (None, true) => Ok(Box::new(SyntheticLoader::new(SyntheticConfig::default()))),
        (None, false) => bail!("No data source given, use --csv <PATH> or --synthetic"),
    }
}

pub fn detect(args: &DetectArgs) -> Result<DetectReport> {
    let mut config = load_config(args.config.as_deref())?;
    config.apply_overrides(args);

    let loader = select_loader(args)?;
    let source = loader.describe();
    let raw = loader
        .load()
        .with_context(|| format!("Failed to load readings from {source}"))?;
    info!("Loaded {} readings from {}", raw.len(), source);

    let output = run(&raw, &config.detector)
        .with_context(|| format!("Anomaly detection failed for {source}"))?;

    let table = args
        .output
        .prints_table()
        .then(|| TableFormatter::format_results(&output, &source));

    let written_files = if args.output.writes_files() {
        let paths = CsvFormatter::write_results(&output, &args.output_dir)?;
        for path in &paths {
            info!("Wrote {}", path.display());
        }
        paths
    } else {
        Vec::new()
    };

    let stored_rows = match &args.sqlite {
        Some(path) => {
            let mut store = SqliteStore::open(path)?;
            Some(store.replace_solar_data(&output.export_rows())?)
        }
        None => None,
    };

    Ok(DetectReport {
        output,
        table,
        written_files,
        stored_rows,
    })
}

/// Write the synthetic demo batch to `args.path`
pub fn generate(args: &GenerateArgs) -> Result<usize> {
    let loader = SyntheticLoader::new(SyntheticConfig {
        seed: args.seed,
        ..Default::default()
    });
    let batch = loader.load()?;
    CsvFormatter::write_batch(&batch, &args.path)?;
    info!("Wrote {} readings to {}", batch.len(), args.path.display());
    Ok(batch.len())
}
