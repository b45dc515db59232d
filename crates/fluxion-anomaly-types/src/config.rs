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

//! Detector hyperparameters

use crate::error::{AnomalyError, Result};
use serde::{Deserialize, Serialize};

/// Smallest batch the forest is fitted on
pub const MIN_BATCH_SIZE: usize = 10;

/// Smallest per-tree subsample. With one or two rows every point is
/// isolated at the same depth, so all scores tie.
pub const MIN_SUBSAMPLE_SIZE: usize = 3;

fn default_contamination() -> f64 {
    0.05
}

fn default_seed() -> u64 {
    42
}

fn default_n_estimators() -> usize {
    100
}

fn default_max_samples() -> usize {
    256
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectorConfig {
    /// Expected fraction of anomalous readings, in (0, 0.5]
    #[serde(default = "default_contamination")]
    pub contamination: f64,

    /// Seed for every random choice made while fitting
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Number of isolation trees
    #[serde(default = "default_n_estimators")]
    pub n_estimators: usize,

    /// Subsample size per tree (capped at the batch size)
    #[serde(default = "default_max_samples")]
    pub max_samples: usize,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            contamination: default_contamination(),
            seed: default_seed(),
            n_estimators: default_n_estimators(),
            max_samples: default_max_samples(),
        }
    }
}

impl DetectorConfig {
    pub fn with_contamination(mut self, contamination: f64) -> Self {
        self.contamination = contamination;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn validate(&self) -> Result<()> {
        // NaN fails both comparisons
        if !(self.contamination > 0.0 && self.contamination <= 0.5) {
            return Err(AnomalyError::invalid_parameter(
                "contamination",
                format!("must be in (0, 0.5], got {}", self.contamination),
            ));
        }
        if self.n_estimators == 0 {
            return Err(AnomalyError::invalid_parameter(
                "n_estimators",
                "at least one tree is required",
            ));
        }
        if self.max_samples < MIN_SUBSAMPLE_SIZE {
            return Err(AnomalyError::invalid_parameter(
                "max_samples",
                format!(
                    "must be at least {MIN_SUBSAMPLE_SIZE}, got {}",
                    self.max_samples
                ),
            ));
        }
        Ok(())
    }
}
