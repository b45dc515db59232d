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

//! SQLite sink for scored batches (`solar_data` table).

use anyhow::{Context, Result};
use fluxion_anomaly_core::types::ScoredRecord;
use rusqlite::{Connection, params};
use std::path::Path;
use tracing::info;

/// Scored rows in the dashboard database. Each write replaces the table.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database at {}", path.display()))?;
        Ok(Self { conn })
    }

    #[cfg(test)]
    fn in_memory() -> Result<Self> {
        Ok(Self {
            conn: Connection::open_in_memory()?,
        })
    }

    /// Drop and recreate `solar_data`, then insert `rows` in one transaction
    pub fn replace_solar_data(&mut self, rows: &[ScoredRecord]) -> Result<usize> {
        let tx = self.conn.transaction()?;

        tx.execute("DROP TABLE IF EXISTS solar_data", [])?;
        tx.execute(
            "CREATE TABLE solar_data (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                timestamp TEXT NOT NULL,
                generation_kw REAL NOT NULL,
                hour INTEGER NOT NULL,
                day_of_week INTEGER NOT NULL,
                is_daylight INTEGER NOT NULL,
                is_anomaly INTEGER NOT NULL DEFAULT 0,
                score REAL NOT NULL
            )",
            [],
        )?;

        {
            let mut stmt = tx.prepare(
                "INSERT INTO solar_data (
                    timestamp, generation_kw, hour, day_of_week, is_daylight, is_anomaly, score
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            )?;
            for row in rows {
                stmt.execute(params![
                    row.timestamp,
                    row.generation_kw,
                    row.hour,
                    row.day_of_week,
                    row.is_daylight,
                    row.is_anomaly,
                    row.score,
                ])?;
            }
        }

        tx.commit().context("Failed to commit solar_data")?;
        info!("Replaced solar_data with {} rows", rows.len());
        Ok(rows.len())
    }

    /// `(timestamp, generation_kw)` of flagged rows in insertion order
    pub fn flagged_readings(&self) -> Result<Vec<(String, f64)>> {
        let mut stmt = self.conn.prepare(
            "SELECT timestamp, generation_kw FROM solar_data
             WHERE is_anomaly = 1
             ORDER BY id ASC",
        )?;
        let rows = stmt
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    pub fn row_count(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM solar_data", [], |row| row.get(0))?;
        Ok(usize::try_from(count)?)
    }
}
