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

use serde::{Deserialize, Serialize};

/// Number of columns fed to the scaler and the model
pub const FEATURE_COUNT: usize = 3;

/// Names of the model columns, in vector order
pub const MODEL_COLUMNS: [&str; FEATURE_COUNT] = ["generation_kw", "hour", "day_of_week"];

/// Features derived from one reading
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureRow {
    pub generation_kw: f64,
    /// Hour of day (0-23)
    pub hour: u32,
    /// Monday = 0 ... Sunday = 6
    pub day_of_week: u32,
    /// True for hours 6 through 18 inclusive. Not part of the model input.
    pub is_daylight: bool,
}

impl FeatureRow {
    /// Model input vector: generation, hour, day of week
    pub fn model_vector(&self) -> [f64; FEATURE_COUNT] {
        [
            self.generation_kw,
            f64::from(self.hour),
            f64::from(self.day_of_week),
        ]
    }
}
