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

//! Shared data types for FluxION solar anomaly detection.
//!
//! Kept free of model and I/O code so that loaders, the scoring engine and
//! host applications can all depend on it.

pub mod config;
pub mod error;
pub mod features;
pub mod reading;
pub mod scoring;

// Re-export common types for convenience
pub use config::{DetectorConfig, MIN_BATCH_SIZE, MIN_SUBSAMPLE_SIZE};
pub use error::{AnomalyError, ReadingDefect, Result};
pub use features::{FEATURE_COUNT, FeatureRow, MODEL_COLUMNS};
pub use reading::{RawReading, Reading, ReadingTimestamp};
pub use scoring::{
    AnomalyRecord, AnomalyScore, AnomalySummary, NO_ANOMALIES_DIGEST, ScoredRecord, ScoredRow,
};
