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

//! Human-readable digest of a scored batch.

use fluxion_anomaly_types::{AnomalySummary, NO_ANOMALIES_DIGEST, ScoredRow};

/// `<timestamp>: Generation <kW, 2 decimals> kW`
pub fn digest_line(row: &ScoredRow) -> String {
    format!(
        "{}: Generation {:.2} kW",
        row.reading.timestamp, row.reading.generation_kw
    )
}

/// Collect the flagged rows in batch order and describe them.
pub fn summarize(scored: &[ScoredRow]) -> AnomalySummary {
    let anomalies: Vec<ScoredRow> = scored.iter().filter(|row| row.is_anomaly).copied().collect();

    if anomalies.is_empty() {
        return AnomalySummary {
            digest: NO_ANOMALIES_DIGEST.to_owned(),
            anomalies,
        };
    }

    let mut digest = format!(
        "Detected {} solar generation anomalies:\n",
        anomalies.len()
    );
    for row in &anomalies {
        digest.push_str(&format!("- {}\n", digest_line(row)));
    }

    AnomalySummary { digest, anomalies }
}
