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

//! FluxION Solar Anomaly Detection
//!
//! Batch scoring of PV generation telemetry:
//!
//! - **Feature extraction**: timestamps → hour, weekday, daylight flag
//! - **Scaling**: per-batch standardization of the model columns
//! - **Isolation forest**: seeded ensemble of random isolation trees
//! - **Scoring**: contamination-calibrated anomaly flags
//! - **Summary**: plain-text digest and export rows for the flagged readings
//!
//! Every stage is a pure function over a caller-owned batch. Nothing is
//! cached between runs.

pub mod features;
pub mod forest;
pub mod pipeline;
pub mod scaler;
pub mod scorer;
pub mod summary;

pub use features::{extract, ingest, is_daylight};
pub use fluxion_anomaly_types as types;
pub use fluxion_anomaly_types::{
    AnomalyError, AnomalyScore, AnomalySummary, DetectorConfig, FeatureRow, NO_ANOMALIES_DIGEST,
    RawReading, Reading, ReadingTimestamp, Result, ScoredRow,
};
pub use forest::IsolationForest;
pub use pipeline::{PipelineOutput, run, run_readings};
pub use scaler::{ScalerStats, StandardScaler};
pub use scorer::{AnomalyDetector, ScoringOutcome, fit_and_score};
pub use summary::summarize;
