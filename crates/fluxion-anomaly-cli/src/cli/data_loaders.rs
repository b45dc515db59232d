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

//! Data loaders producing raw reading batches for the pipeline.

use anyhow::{Context, Result, bail};
use chrono::{Duration, NaiveDate};
use fluxion_anomaly_core::RawReading;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, Normal};
use std::path::PathBuf;
use tracing::debug;

/// Trait for loading a batch of raw readings from some source
pub trait DataLoader {
    fn load(&self) -> Result<Vec<RawReading>>;

    /// Human-readable source name for logs and table captions
    fn describe(&self) -> String;
}

/// Column names that map onto the same reading field
const COLUMN_ALIASES: [(&str, &str); 2] = [("timestamp", "date"), ("generation_kw", "output_kw")];

/// Loader for header-driven CSV files
///
/// Accepts `timestamp` or `date` for the time column and `generation_kw` or
/// `output_kw` for the value column. A file carrying both names of a pair is
/// rejected. Extra columns are ignored.
pub struct CsvLoader {
    path: PathBuf,
}

impl CsvLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DataLoader for CsvLoader {
    fn load(&self) -> Result<Vec<RawReading>> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(&self.path)
            .with_context(|| format!("Failed to open CSV file: {}", self.path.display()))?;

        let headers = reader
            .headers()
            .with_context(|| format!("Failed to read CSV header in {}", self.path.display()))?;
        for (name, alias) in COLUMN_ALIASES {
            if headers.iter().any(|h| h == name) && headers.iter().any(|h| h == alias) {
                bail!(
                    "{} has both `{name}` and `{alias}` columns, keep only one",
                    self.path.display()
                );
            }
        }

        let mut batch = Vec::new();
        for (line, record) in reader.deserialize::<RawReading>().enumerate() {
            let raw = record.with_context(|| {
                format!(
                    "Failed to read CSV record {} in {}",
                    line + 1,
                    self.path.display()
                )
            })?;
            batch.push(raw);
        }

        debug!("Read {} rows from {}", batch.len(), self.path.display());
        Ok(batch)
    }

    fn describe(&self) -> String {
        format!("CSV ({})", self.path.display())
    }
}

/// Parameters for the synthetic demo batch
#[derive(Debug, Clone)]
pub struct SyntheticConfig {
    pub start: NaiveDate,
    pub days: usize,
    pub mean_kw: f64,
    pub std_dev_kw: f64,
    pub seed: u64,
    /// `(row index, generation_kw)` pairs overriding the drawn values
    pub outliers: Vec<(usize, f64)>,
}

impl Default for SyntheticConfig {
    fn default() -> Self {
        Self {
            start: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap_or_default(),
            days: 100,
            mean_kw: 5000.0,
            std_dev_kw: 300.0,
            seed: 42,
            outliers: vec![(10, 2000.0), (50, 8000.0)],
        }
    }
}

/// Loader for a generated batch of daily readings with injected outliers
pub struct SyntheticLoader {
    pub config: SyntheticConfig,
}

impl SyntheticLoader {
    pub fn new(config: SyntheticConfig) -> Self {
        Self { config }
    }
}

impl DataLoader for SyntheticLoader {
    fn load(&self) -> Result<Vec<RawReading>> {
        let config = &self.config;
        let normal = Normal::new(config.mean_kw, config.std_dev_kw)
            .context("Invalid synthetic generation distribution")?;
        let mut rng = StdRng::seed_from_u64(config.seed);

        let mut batch = Vec::with_capacity(config.days);
        let mut date = config.start;
        for index in 0..config.days {
            // Draw every day so outliers don't shift the rest of the series
            let drawn: f64 = normal.sample(&mut rng);
            let generation_kw = config
                .outliers
                .iter()
                .find(|(at, _)| *at == index)
                .map_or(drawn.max(0.0), |(_, kw)| *kw);

            batch.push(RawReading::new(
                date.format("%Y-%m-%d").to_string(),
                format!("{generation_kw:.4}"),
            ));
            date += Duration::days(1);
        }

        Ok(batch)
    }

    fn describe(&self) -> String {
        format!(
            "Synthetic ({} days from {})",
            self.config.days, self.config.start
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_synthetic_batch_shape() {
        let batch = SyntheticLoader::new(SyntheticConfig::default()).load().unwrap();
        assert_eq!(batch.len(), 100);
        assert_eq!(batch[0].timestamp.as_deref(), Some("2025-01-01"));
        assert_eq!(batch[99].timestamp.as_deref(), Some("2025-04-10"));
        assert_eq!(batch[10].generation_kw.as_deref(), Some("2000.0000"));
        assert_eq!(batch[50].generation_kw.as_deref(), Some("8000.0000"));
    }

    #[test]
    fn test_synthetic_batch_is_seeded() {
        let first = SyntheticLoader::new(SyntheticConfig::default()).load().unwrap();
        let again = SyntheticLoader::new(SyntheticConfig::default()).load().unwrap();
        assert_eq!(first, again);

        let other = SyntheticLoader::new(SyntheticConfig {
            seed: 7,
            ..Default::default()
        })
        .load()
        .unwrap();
        assert_ne!(first, other);
    }

    #[test]
    fn test_csv_loader_reads_aliases() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "date,output_kw,site").unwrap();
        writeln!(file, "2025-01-01, 4800.5 ,roof").unwrap();
        writeln!(file, "2025-01-02,,roof").unwrap();

        let batch = CsvLoader::new(file.path()).load().unwrap();
        assert_eq!(batch.len(), 2);
        assert_eq!(batch[0], RawReading::new("2025-01-01", "4800.5"));
        assert_eq!(batch[1].generation_kw, None);
    }

    #[test]
    fn test_csv_loader_rejects_column_and_alias() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "timestamp,date,generation_kw").unwrap();
        writeln!(file, "2025-01-01 12:00:00,2025-01-01,4800").unwrap();

        let err = CsvLoader::new(file.path()).load().unwrap_err();
        assert!(
            err.to_string()
                .contains("has both `timestamp` and `date` columns"),
            "{err:#}"
        );
    }

    #[test]
    fn test_csv_loader_missing_file() {
        let err = CsvLoader::new("/nonexistent/solar.csv").load().unwrap_err();
        assert!(err.to_string().contains("Failed to open CSV file"));
    }
}
