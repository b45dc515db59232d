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

//! Runner configuration: a TOML file plus command-line overrides.

use anyhow::{Context, Result};
use fluxion_anomaly_core::DetectorConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

use super::args::DetectArgs;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunnerConfig {
    #[serde(default)]
    pub detector: DetectorConfig,
}

impl RunnerConfig {
    /// Apply `--contamination`, `--seed`, `--estimators` and `--max-samples`
    pub fn apply_overrides(&mut self, args: &DetectArgs) {
        if let Some(contamination) = args.contamination {
            self.detector.contamination = contamination;
        }
        if let Some(seed) = args.seed {
            self.detector.seed = seed;
        }
        if let Some(n_estimators) = args.estimators {
            self.detector.n_estimators = n_estimators;
        }
        if let Some(max_samples) = args.max_samples {
            self.detector.max_samples = max_samples;
        }
    }
}

/// Load the runner configuration, falling back to defaults without a file
pub fn load_config(path: Option<&Path>) -> Result<RunnerConfig> {
    let Some(path) = path else {
        return Ok(RunnerConfig::default());
    };

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config: RunnerConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

    info!("Loaded configuration from {}", path.display());
    Ok(config)
}
