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

//! Output formatters for pipeline results.

use anyhow::{Context, Result};
use comfy_table::{Attribute, Cell, Color, Table, presets::UTF8_FULL};
use fluxion_anomaly_core::{PipelineOutput, RawReading};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Scored table with every input row
pub const SCORED_FILE: &str = "final_output_with_anomalies.csv";
/// Anomaly subset table
pub const ANOMALIES_FILE: &str = "anomalies.csv";
/// Plain-text digest
pub const DIGEST_FILE: &str = "weekly_summary.txt";

/// Formatter for console tables
pub struct TableFormatter;

/// Formatter for CSV and text file export
pub struct CsvFormatter;

impl TableFormatter {
    /// Flagged readings as a table, followed by the digest and run totals
    pub fn format_results(output: &PipelineOutput, source: &str) -> String {
        let mut text = String::new();

        if output.summary.has_anomalies() {
            let mut table = Table::new();
            table.load_preset(UTF8_FULL);
            table.set_header(vec![
                Cell::new("Row").add_attribute(Attribute::Bold),
                Cell::new("Timestamp").add_attribute(Attribute::Bold),
                Cell::new("Generation\n(kW)").add_attribute(Attribute::Bold),
                Cell::new("Hour").add_attribute(Attribute::Bold),
                Cell::new("Weekday").add_attribute(Attribute::Bold),
                Cell::new("Score").add_attribute(Attribute::Bold),
            ]);

            for row in &output.summary.anomalies {
                table.add_row(vec![
                    Cell::new(row.index),
                    Cell::new(row.reading.timestamp.to_string()),
                    Cell::new(format!("{:.2}", row.reading.generation_kw)).fg(Color::Red),
                    Cell::new(row.features.hour),
                    Cell::new(row.features.day_of_week),
                    Cell::new(format!("{:.4}", row.score)),
                ]);
            }

            text.push_str(&table.to_string());
            text.push('\n');
        }

        text.push_str(&output.summary.digest);
        if !output.summary.digest.ends_with('\n') {
            text.push('\n');
        }
        text.push_str(&format!(
            "Scored {} readings from {} | {} flagged\n",
            output.scored.len(),
            source,
            output.anomaly_count()
        ));

        text
    }
}

const SCORED_HEADERS: [&str; 7] = [
    "timestamp",
    "generation_kw",
    "hour",
    "day_of_week",
    "is_daylight",
    "is_anomaly",
    "score",
];
const ANOMALY_HEADERS: [&str; 4] = ["timestamp", "generation_kw", "hour", "day_of_week"];
const RAW_HEADERS: [&str; 2] = ["timestamp", "generation_kw"];

impl CsvFormatter {
    /// Write the scored table, anomaly subset and digest into `dir`
    pub fn write_results(output: &PipelineOutput, dir: &Path) -> Result<Vec<PathBuf>> {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;

        let scored_path = dir.join(SCORED_FILE);
        Self::write_rows(&scored_path, &SCORED_HEADERS, &output.export_rows())?;

        let anomalies_path = dir.join(ANOMALIES_FILE);
        Self::write_rows(
            &anomalies_path,
            &ANOMALY_HEADERS,
            &output.summary.export_rows(),
        )?;

        let digest_path = dir.join(DIGEST_FILE);
        std::fs::write(&digest_path, &output.summary.digest)
            .with_context(|| format!("Failed to write digest: {}", digest_path.display()))?;

        Ok(vec![scored_path, anomalies_path, digest_path])
    }

    /// Write a raw batch with `timestamp,generation_kw` headers
    pub fn write_batch(batch: &[RawReading], path: &Path) -> Result<()> {
        Self::write_rows(path, &RAW_HEADERS, batch)
    }

    // Headers are written by hand so an empty subset still gets them
    fn write_rows<T: Serialize>(path: &Path, headers: &[&str], rows: &[T]) -> Result<()> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(path)
            .with_context(|| format!("Failed to create CSV file: {}", path.display()))?;

        writer.write_record(headers)?;
        for row in rows {
            writer
                .serialize(row)
                .with_context(|| format!("Failed to write CSV row to {}", path.display()))?;
        }
        writer.flush()?;
        Ok(())
    }
}
