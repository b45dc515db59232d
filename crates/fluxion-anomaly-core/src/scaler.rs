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

//! Per-batch standardization of the model columns.
//!
//! Statistics belong to one batch. A caller that wants to score a later
//! batch with the same scaling has to keep the returned [`ScalerStats`] and
//! apply them itself.

use fluxion_anomaly_types::{FEATURE_COUNT, FeatureRow, MODEL_COLUMNS};
use serde::{Deserialize, Serialize};

/// Relative tolerance below which a column counts as constant
const ZERO_SPREAD_TOLERANCE: f64 = 16.0 * f64::EPSILON;

/// Column means and population standard deviations of one batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalerStats {
    pub means: [f64; FEATURE_COUNT],
    /// 0.0 marks a constant column
    pub std_devs: [f64; FEATURE_COUNT],
}

impl ScalerStats {
    pub fn transform_row(&self, row: &FeatureRow) -> [f64; FEATURE_COUNT] {
        let raw = row.model_vector();
        let mut scaled = [0.0; FEATURE_COUNT];
        for (col, value) in scaled.iter_mut().enumerate() {
            let std_dev = self.std_devs[col];
            if std_dev > 0.0 {
                *value = (raw[col] - self.means[col]) / std_dev;
            }
        }
        scaled
    }

    pub fn transform(&self, rows: &[FeatureRow]) -> Vec<[f64; FEATURE_COUNT]> {
        rows.iter().map(|row| self.transform_row(row)).collect()
    }

    /// Names of columns with no spread in the fitted batch
    pub fn constant_columns(&self) -> Vec<&'static str> {
        MODEL_COLUMNS
            .iter()
            .zip(self.std_devs)
            .filter(|(_, std_dev)| *std_dev == 0.0)
            .map(|(name, _)| *name)
            .collect()
    }
}

/// Zero-mean, unit-variance scaler over generation, hour and weekday
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardScaler;

impl StandardScaler {
    pub fn fit(rows: &[FeatureRow]) -> ScalerStats {
        let mut means = [0.0; FEATURE_COUNT];
        let mut std_devs = [0.0; FEATURE_COUNT];
        if rows.is_empty() {
            return ScalerStats { means, std_devs };
        }

        #[expect(clippy::cast_precision_loss)]
        let n = rows.len() as f64;
        let vectors: Vec<_> = rows.iter().map(FeatureRow::model_vector).collect();

        for col in 0..FEATURE_COUNT {
            let mean = vectors.iter().map(|v| v[col]).sum::<f64>() / n;
            let variance = vectors.iter().map(|v| (v[col] - mean).powi(2)).sum::<f64>() / n;
            let std_dev = variance.sqrt();

            means[col] = mean;
            // Rounding in the mean leaves a tiny spread on constant columns
            std_devs[col] = if std_dev <= ZERO_SPREAD_TOLERANCE * mean.abs().max(1.0) {
                0.0
            } else {
                std_dev
            };
        }

        ScalerStats { means, std_devs }
    }

    pub fn fit_transform(rows: &[FeatureRow]) -> (ScalerStats, Vec<[f64; FEATURE_COUNT]>) {
        let stats = Self::fit(rows);
        let scaled = stats.transform(rows);
        (stats, scaled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(generation_kw: f64, hour: u32, day_of_week: u32) -> FeatureRow {
        FeatureRow {
            generation_kw,
            hour,
            day_of_week,
            is_daylight: (6..=18).contains(&hour),
        }
    }

    #[test]
    fn test_standardizes_to_zero_mean_unit_variance() {
        let rows: Vec<_> = (0..24).map(|h| row(f64::from(h) * 1.5, h, h % 7)).collect();
        let (stats, scaled) = StandardScaler::fit_transform(&rows);

        assert_eq!(scaled.len(), rows.len());
        for col in 0..FEATURE_COUNT {
            let mean = scaled.iter().map(|v| v[col]).sum::<f64>() / 24.0;
            let var = scaled.iter().map(|v| v[col].powi(2)).sum::<f64>() / 24.0 - mean.powi(2);
            assert!(mean.abs() < 1e-9, "column {col} mean {mean}");
            assert!((var - 1.0).abs() < 1e-9, "column {col} variance {var}");
        }
        assert!((stats.means[1] - 11.5).abs() < 1e-12);
    }

    #[test]
    fn test_constant_generation_scales_to_zero() {
        let rows: Vec<_> = (0..20).map(|i| row(4.2, i % 24, i % 7)).collect();
        let (stats, scaled) = StandardScaler::fit_transform(&rows);

        assert_eq!(stats.std_devs[0], 0.0);
        assert!(scaled.iter().all(|v| v[0] == 0.0));
        assert!(scaled.iter().all(|v| v.iter().all(|x| x.is_finite())));
        assert_eq!(stats.constant_columns(), vec!["generation_kw"]);
    }

    #[test]
    fn test_fractional_constant_column_has_no_spread() {
        let rows: Vec<_> = (0..30).map(|i| row(0.1, 12, i % 7)).collect();
        let stats = StandardScaler::fit(&rows);
        assert_eq!(stats.std_devs[0], 0.0);
        assert_eq!(stats.std_devs[1], 0.0);
    }

    #[test]
    fn test_stats_apply_to_another_batch() {
        let first: Vec<_> = [0.0, 10.0].iter().map(|&kw| row(kw, 0, 0)).collect();
        let stats = StandardScaler::fit(&first);
        let scaled = stats.transform_row(&row(15.0, 3, 2));
        assert_eq!(scaled[0], 2.0);
        // constant in the fitted batch, so ignored
        assert_eq!(scaled[1], 0.0);
        assert_eq!(scaled[2], 0.0);
    }

    #[test]
    fn test_empty_batch() {
        let stats = StandardScaler::fit(&[]);
        assert_eq!(stats.means, [0.0; FEATURE_COUNT]);
        assert!(stats.transform(&[]).is_empty());
    }
}
