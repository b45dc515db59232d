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

//! Calendar feature extraction from raw readings.

use fluxion_anomaly_types::reading::check_generation;
use fluxion_anomaly_types::{AnomalyError, FeatureRow, RawReading, Reading, Result};
use tracing::debug;

/// First hour counted as daylight
pub const DAYLIGHT_START_HOUR: u32 = 6;
/// Last hour counted as daylight (inclusive)
pub const DAYLIGHT_END_HOUR: u32 = 18;

pub fn is_daylight(hour: u32) -> bool {
    (DAYLIGHT_START_HOUR..=DAYLIGHT_END_HOUR).contains(&hour)
}

/// Validate a loader batch. Stops at the first bad row.
pub fn ingest(raw: &[RawReading]) -> Result<Vec<Reading>> {
    let readings = raw
        .iter()
        .enumerate()
        .map(|(index, row)| Reading::from_raw(index, row))
        .collect::<Result<Vec<_>>>()?;

    debug!("Ingested {} readings", readings.len());
    Ok(readings)
}

/// Derive one feature row per reading, index for index.
pub fn extract(readings: &[Reading]) -> Result<Vec<FeatureRow>> {
    readings
        .iter()
        .enumerate()
        .map(|(index, reading)| {
            check_generation(reading.generation_kw).map_err(|defect| {
                AnomalyError::InvalidReading {
                    index,
                    value: reading.generation_kw.to_string(),
                    defect,
                }
            })?;
            Ok(feature_row(reading))
        })
        .collect()
}

fn feature_row(reading: &Reading) -> FeatureRow {
    let hour = reading.timestamp.hour();
    FeatureRow {
        generation_kw: reading.generation_kw,
        hour,
        day_of_week: reading.timestamp.day_of_week(),
        is_daylight: is_daylight(hour),
    }
}
