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

use crate::features::FeatureRow;
use crate::reading::Reading;
use serde::{Deserialize, Serialize};

/// Digest text when nothing in the batch was flagged
pub const NO_ANOMALIES_DIGEST: &str = "No solar generation anomalies detected";

/// Model verdict for one row
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnomalyScore {
    pub is_anomaly: bool,
    /// Isolation score in [-1, 0); lower means more anomalous
    pub score: f64,
}

/// A reading with its features and model verdict
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoredRow {
    /// Position of the reading in its original batch
    pub index: usize,
    pub reading: Reading,
    pub features: FeatureRow,
    pub is_anomaly: bool,
    pub score: f64,
}

impl ScoredRow {
    /// Flat output record with all derived columns
    pub fn export(&self) -> ScoredRecord {
        ScoredRecord {
            timestamp: self.reading.timestamp.to_string(),
            generation_kw: self.reading.generation_kw,
            hour: self.features.hour,
            day_of_week: self.features.day_of_week,
            is_daylight: u8::from(self.features.is_daylight),
            is_anomaly: u8::from(self.is_anomaly),
            score: self.score,
        }
    }

    pub fn anomaly_record(&self) -> AnomalyRecord {
        AnomalyRecord {
            timestamp: self.reading.timestamp.to_string(),
            generation_kw: self.reading.generation_kw,
            hour: self.features.hour,
            day_of_week: self.features.day_of_week,
        }
    }
}

/// Output table row: input columns, derived columns, flag as 0/1
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredRecord {
    pub timestamp: String,
    pub generation_kw: f64,
    pub hour: u32,
    pub day_of_week: u32,
    pub is_daylight: u8,
    pub is_anomaly: u8,
    pub score: f64,
}

/// Export row for the anomaly subset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnomalyRecord {
    pub timestamp: String,
    pub generation_kw: f64,
    pub hour: u32,
    pub day_of_week: u32,
}

/// Digest of one scored batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnomalySummary {
    pub digest: String,
    /// Flagged rows in original batch order
    pub anomalies: Vec<ScoredRow>,
}

impl AnomalySummary {
    pub fn has_anomalies(&self) -> bool {
        !self.anomalies.is_empty()
    }

    pub fn count(&self) -> usize {
        self.anomalies.len()
    }

    /// Anomaly subset as `timestamp, generation_kw, hour, day_of_week` rows
    pub fn export_rows(&self) -> Vec<AnomalyRecord> {
        self.anomalies.iter().map(ScoredRow::anomaly_record).collect()
    }
}
