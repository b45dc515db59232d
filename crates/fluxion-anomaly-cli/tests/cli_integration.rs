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

//! End-to-end runs of the `detect` and `generate` commands against temp dirs

use clap::Parser;
use fluxion_anomaly_cli::cli::{self, Cli, Commands, DetectArgs, GenerateArgs, SqliteStore};
use std::io::Write;
use std::path::Path;
use tempfile::{NamedTempFile, TempDir};

fn detect_args(argv: &[&str]) -> DetectArgs {
    let mut full = vec!["fluxion-anomaly", "detect"];
    full.extend_from_slice(argv);
    match Cli::try_parse_from(full).unwrap().command {
        Commands::Detect(args) => args,
        Commands::Generate(_) => panic!("expected detect"),
    }
}

fn generate_args(path: &Path) -> GenerateArgs {
    let path = path.to_str().unwrap();
    match Cli::try_parse_from(["fluxion-anomaly", "generate", "--path", path])
        .unwrap()
        .command
    {
        Commands::Generate(args) => args,
        Commands::Detect(_) => panic!("expected generate"),
    }
}

#[test]
fn test_synthetic_run_writes_files_and_database() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("out");
    let db = dir.path().join("dashboard.db");

    let args = detect_args(&[
        "--synthetic",
        "--output",
        "both",
        "--output-dir",
        out.to_str().unwrap(),
        "--sqlite",
        db.to_str().unwrap(),
    ]);
    let report = cli::detect(&args).unwrap();

    let flagged: Vec<usize> = report
        .output
        .summary
        .anomalies
        .iter()
        .map(|r| r.index)
        .collect();
    assert!(flagged.contains(&10) && flagged.contains(&50), "{flagged:?}");

    assert_eq!(report.written_files.len(), 3);
    assert!(out.join("final_output_with_anomalies.csv").exists());
    assert!(out.join("anomalies.csv").exists());
    let digest = std::fs::read_to_string(out.join("weekly_summary.txt")).unwrap();
    assert!(digest.contains("- 2025-01-11 00:00:00: Generation 2000.00 kW"));
    assert!(digest.contains("- 2025-02-20 00:00:00: Generation 8000.00 kW"));

    assert!(report.table.unwrap().contains("2025-02-20 00:00:00"));

    assert_eq!(report.stored_rows, Some(100));
    let store = SqliteStore::open(&db).unwrap();
    assert_eq!(store.row_count().unwrap(), 100);
    let stored = store.flagged_readings().unwrap();
    assert_eq!(stored.len(), flagged.len());
    assert!(stored.contains(&("2025-01-11 00:00:00".to_string(), 2000.0)));
}

#[test]
fn test_generated_csv_matches_synthetic_run() {
    let dir = TempDir::new().unwrap();
    let csv_path = dir.path().join("demo.csv");

    assert_eq!(cli::generate(&generate_args(&csv_path)).unwrap(), 100);

    let from_file = cli::detect(&detect_args(&["--csv", csv_path.to_str().unwrap()])).unwrap();
    let synthetic = cli::detect(&detect_args(&["--synthetic"])).unwrap();

    assert_eq!(from_file.output.summary, synthetic.output.summary);
    assert!(from_file.written_files.is_empty());
    assert!(from_file.stored_rows.is_none());
}

#[test]
fn test_config_file_sets_contamination() {
    let mut config = NamedTempFile::new().unwrap();
    writeln!(config, "[detector]\ncontamination = 0.1\nseed = 99").unwrap();

    let report = cli::detect(&detect_args(&[
        "--synthetic",
        "--config",
        config.path().to_str().unwrap(),
    ]))
    .unwrap();

    // round(0.1 * 100) = 10, ties may add one or two
    let count = report.output.anomaly_count();
    assert!((10..=12).contains(&count), "got {count}");
}

#[test]
fn test_negative_reading_fails_with_row_context() {
    let mut csv = NamedTempFile::new().unwrap();
    writeln!(csv, "timestamp,generation_kw").unwrap();
    for day in 1..=15 {
        let kw = if day == 6 { "-50" } else { "4200" };
        writeln!(csv, "2025-05-{day:02} 12:00:00,{kw}").unwrap();
    }

    let err = cli::detect(&detect_args(&["--csv", csv.path().to_str().unwrap()])).unwrap_err();
    let chain = format!("{err:#}");
    assert!(chain.contains("Anomaly detection failed"), "{chain}");
    assert!(chain.contains("invalid reading at row 5"), "{chain}");
}

#[test]
fn test_out_of_range_contamination_override() {
    let err = cli::detect(&detect_args(&["--synthetic", "--contamination", "0.7"])).unwrap_err();
    assert!(format!("{err:#}").contains("contamination"));
}

#[test]
fn test_single_row_subsample_override_rejected() {
    let err = cli::detect(&detect_args(&["--synthetic", "--max-samples", "1"])).unwrap_err();
    let chain = format!("{err:#}");
    assert!(chain.contains("invalid parameter max_samples"), "{chain}");
}

#[test]
fn test_short_batch_is_rejected() {
    let mut csv = NamedTempFile::new().unwrap();
    writeln!(csv, "date,output_kw").unwrap();
    for day in 1..=5 {
        writeln!(csv, "2025-06-{day:02},3000").unwrap();
    }

    let err = cli::detect(&detect_args(&["--csv", csv.path().to_str().unwrap()])).unwrap_err();
    assert!(format!("{err:#}").contains("insufficient data: got 5 readings"));
}

#[test]
fn test_missing_source_is_error() {
    assert!(cli::detect(&detect_args(&[])).is_err());
}
