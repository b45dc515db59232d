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

//! Contamination-calibrated anomaly scoring.

use crate::forest::IsolationForest;
use crate::scaler::{ScalerStats, StandardScaler};
use fluxion_anomaly_types::{
    AnomalyError, AnomalyScore, DetectorConfig, FeatureRow, MIN_BATCH_SIZE, Result,
};
use tracing::{debug, info, warn};

/// Everything produced while scoring one batch
#[derive(Debug, Clone)]
pub struct ScoringOutcome {
    /// One verdict per feature row, same order
    pub scores: Vec<AnomalyScore>,
    /// Scaling statistics of this batch
    pub scaler: ScalerStats,
    /// Decision threshold, `None` when the contamination target rounds to zero rows
    pub threshold: Option<f64>,
}

impl ScoringOutcome {
    pub fn flagged(&self) -> usize {
        self.scores.iter().filter(|s| s.is_anomaly).count()
    }
}

/// Fits a fresh isolation forest per batch and flags the lowest scores
#[derive(Debug, Clone)]
pub struct AnomalyDetector {
    config: DetectorConfig,
}

impl AnomalyDetector {
    pub fn new(config: DetectorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    pub fn fit_and_score(&self, features: &[FeatureRow]) -> Result<Vec<AnomalyScore>> {
        self.score_batch(features).map(|outcome| outcome.scores)
    }

    /// Standardize, fit, score and threshold one batch.
    pub fn score_batch(&self, features: &[FeatureRow]) -> Result<ScoringOutcome> {
        if features.len() < MIN_BATCH_SIZE {
            return Err(AnomalyError::InsufficientData {
                actual: features.len(),
                required: MIN_BATCH_SIZE,
            });
        }

        let (scaler, scaled) = StandardScaler::fit_transform(features);
        let constant = scaler.constant_columns();
        if !constant.is_empty() {
            warn!(
                "Columns without spread in this batch, scaled to 0: {}",
                constant.join(", ")
            );
        }

        let forest = IsolationForest::fit(
            &scaled,
            self.config.n_estimators,
            self.config.max_samples,
            self.config.seed,
        );
        debug!(
            "Fitted {} isolation trees on subsamples of {} rows (seed {})",
            forest.n_trees(),
            forest.sample_size(),
            self.config.seed
        );

        let raw_scores = forest.score_samples(&scaled);
        let target = target_count(features.len(), self.config.contamination);
        let threshold = threshold_for(&raw_scores, target);
        if threshold.is_none() {
            warn!(
                "Contamination {} of {} rows rounds to zero, nothing will be flagged",
                self.config.contamination,
                features.len()
            );
        }

        let scores: Vec<AnomalyScore> = raw_scores
            .into_iter()
            .map(|score| AnomalyScore {
                is_anomaly: threshold.is_some_and(|t| score <= t),
                score,
            })
            .collect();

        let outcome = ScoringOutcome {
            scores,
            scaler,
            threshold,
        };
        info!(
            "Scored {} readings: {} flagged (target {}, threshold {:?})",
            features.len(),
            outcome.flagged(),
            target,
            outcome.threshold
        );
        Ok(outcome)
    }
}

/// Score a batch with default forest settings.
pub fn fit_and_score(
    features: &[FeatureRow],
    contamination: f64,
    seed: u64,
) -> Result<Vec<AnomalyScore>> {
    let config = DetectorConfig::default()
        .with_contamination(contamination)
        .with_seed(seed);
    AnomalyDetector::new(config)?.fit_and_score(features)
}

/// Number of rows the contamination asks for, `round(contamination * n)`
#[expect(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn target_count(n: usize, contamination: f64) -> usize {
    (contamination * n as f64).round() as usize
}

/// The `target`-th lowest score. Every score at or below it gets flagged,
/// so ties at the boundary can push the count above `target`.
pub fn threshold_for(scores: &[f64], target: usize) -> Option<f64> {
    if target == 0 || scores.is_empty() {
        return None;
    }
    let mut sorted = scores.to_vec();
    sorted.sort_by(f64::total_cmp);
    Some(sorted[target.min(sorted.len()) - 1])
}
