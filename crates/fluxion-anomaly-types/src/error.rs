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

//! Error types for the anomaly detection pipeline

use thiserror::Error;

/// What is wrong with a rejected reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ReadingDefect {
    #[error("timestamp is missing")]
    MissingTimestamp,

    #[error("timestamp cannot be parsed")]
    UnparseableTimestamp,

    #[error("generation_kw is missing")]
    MissingGeneration,

    #[error("generation_kw is not a number")]
    NonNumericGeneration,

    #[error("generation_kw is not finite")]
    NonFiniteGeneration,

    /// Generation below zero is physically impossible for a PV plant
    #[error("generation_kw is negative")]
    NegativeGeneration,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnomalyError {
    #[error("invalid reading at row {index}: {defect} (value: {value:?})")]
    InvalidReading {
        index: usize,
        value: String,
        defect: ReadingDefect,
    },

    #[error("insufficient data: got {actual} readings, at least {required} required")]
    InsufficientData { actual: usize, required: usize },

    #[error("invalid parameter {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

impl AnomalyError {
    pub(crate) fn invalid_parameter(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AnomalyError>;
