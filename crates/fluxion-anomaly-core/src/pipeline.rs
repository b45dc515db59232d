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

//! Raw batch → features → scores → summary, in one call.

use crate::features::{extract, ingest};
use crate::scaler::ScalerStats;
use crate::scorer::AnomalyDetector;
use crate::summary::summarize;
use fluxion_anomaly_types::{
    AnomalySummary, DetectorConfig, RawReading, Reading, Result, ScoredRecord, ScoredRow,
};
use tracing::info;

/// Result of one pipeline run
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// One row per input reading, input order
    pub scored: Vec<ScoredRow>,
    pub scaler: ScalerStats,
    pub summary: AnomalySummary,
}

impl PipelineOutput {
    pub fn export_rows(&self) -> Vec<ScoredRecord> {
        self.scored.iter().map(ScoredRow::export).collect()
    }

    pub fn anomaly_count(&self) -> usize {
        self.summary.count()
    }
}

/// Validate and score a loader batch. Bad rows are rejected before any
/// model is fitted.
pub fn run(raw: &[RawReading], config: &DetectorConfig) -> Result<PipelineOutput> {
    let readings = ingest(raw)?;
    run_readings(&readings, config)
}

pub fn run_readings(readings: &[Reading], config: &DetectorConfig) -> Result<PipelineOutput> {
    let detector = AnomalyDetector::new(config.clone())?;
    let features = extract(readings)?;
    let outcome = detector.score_batch(&features)?;

    let scored: Vec<ScoredRow> = readings
        .iter()
        .zip(&features)
        .zip(&outcome.scores)
        .enumerate()
        .map(|(index, ((reading, features), verdict))| ScoredRow {
            index,
            reading: *reading,
            features: *features,
            is_anomaly: verdict.is_anomaly,
            score: verdict.score,
        })
        .collect();

    let summary = summarize(&scored);
    info!(
        "Pipeline finished: {} readings, {} anomalies",
        scored.len(),
        summary.count()
    );

    Ok(PipelineOutput {
        scored,
        scaler: outcome.scaler,
        summary,
    })
}
