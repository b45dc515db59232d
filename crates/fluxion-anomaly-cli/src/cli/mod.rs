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

//! CLI module for the anomaly detection batch runner.

pub mod args;
pub mod commands;
pub mod config;
pub mod data_loaders;
pub mod formatters;
pub mod store;

pub use args::{Cli, Commands, DetectArgs, GenerateArgs, OutputFormat};
pub use commands::{DetectReport, detect, generate};
pub use config::{RunnerConfig, load_config};
pub use data_loaders::{CsvLoader, DataLoader, SyntheticConfig, SyntheticLoader};
pub use formatters::{CsvFormatter, TableFormatter};
pub use store::SqliteStore;
