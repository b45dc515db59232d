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

use crate::error::{AnomalyError, ReadingDefect, Result};
use chrono::{
    DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Timelike, Utc,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Date-time formats carrying an explicit UTC offset
const OFFSET_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f%:z", "%Y-%m-%dT%H:%M:%S%.f%:z"];

/// Date-time formats without an offset (wall clock as written)
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
];

/// Timestamp of a telemetry sample.
///
/// Keeps the wall-clock value exactly as it was written together with its
/// UTC offset, if one was given. Calendar features are always taken from
/// the wall clock, never converted to another timezone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct ReadingTimestamp {
    local: NaiveDateTime,
    offset: Option<FixedOffset>,
}

impl ReadingTimestamp {
    /// Timestamp without offset information
    pub fn from_naive(local: NaiveDateTime) -> Self {
        Self {
            local,
            offset: None,
        }
    }

    /// Timestamp with an explicit UTC offset; the wall clock in that offset is kept
    pub fn from_fixed(datetime: DateTime<FixedOffset>) -> Self {
        Self {
            local: datetime.naive_local(),
            offset: Some(*datetime.offset()),
        }
    }

    /// Parse any of the supported ISO-8601 style representations.
    ///
    /// Bare dates (`2025-01-01`) are read as midnight.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        if let Ok(datetime) = DateTime::parse_from_rfc3339(text) {
            return Some(Self::from_fixed(datetime));
        }
        for format in OFFSET_FORMATS {
            if let Ok(datetime) = DateTime::parse_from_str(text, format) {
                return Some(Self::from_fixed(datetime));
            }
        }
        for format in NAIVE_FORMATS {
            if let Ok(local) = NaiveDateTime::parse_from_str(text, format) {
                return Some(Self::from_naive(local));
            }
        }
        NaiveDate::parse_from_str(text, "%Y-%m-%d")
            .ok()
            .map(|date| Self::from_naive(date.and_time(NaiveTime::MIN)))
    }

    pub fn offset(&self) -> Option<FixedOffset> {
        self.offset
    }

    /// Absolute instant. Timestamps without an offset are taken as UTC.
    pub fn instant(&self) -> DateTime<Utc> {
        match self.offset {
            Some(offset) => offset
                .from_local_datetime(&self.local)
                .single()
                .map_or_else(
                    || Utc.from_utc_datetime(&self.local),
                    |dt| dt.with_timezone(&Utc),
                ),
            None => Utc.from_utc_datetime(&self.local),
        }
    }

    /// Hour of day (0-23)
    pub fn hour(&self) -> u32 {
        self.local.hour()
    }

    /// Day of week with Monday = 0 and Sunday = 6
    pub fn day_of_week(&self) -> u32 {
        self.local.weekday().num_days_from_monday()
    }
}

impl fmt::Display for ReadingTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.local.format("%Y-%m-%d %H:%M:%S%.f"))?;
        if let Some(offset) = self.offset {
            write!(f, "{offset}")?;
        }
        Ok(())
    }
}

impl FromStr for ReadingTimestamp {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("unparseable timestamp: '{s}'"))
    }
}

impl From<ReadingTimestamp> for String {
    fn from(value: ReadingTimestamp) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for ReadingTimestamp {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        value.parse()
    }
}

/// A row as delivered by a loader, before any validation.
///
/// Column aliases cover the names used by the older batch exports
/// (`date`, `output_kw`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawReading {
    #[serde(default, alias = "date")]
    pub timestamp: Option<String>,
    #[serde(default, alias = "output_kw")]
    pub generation_kw: Option<String>,
}

impl RawReading {
    pub fn new(timestamp: impl Into<String>, generation_kw: impl Into<String>) -> Self {
        Self {
            timestamp: Some(timestamp.into()),
            generation_kw: Some(generation_kw.into()),
        }
    }
}

/// One validated telemetry sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub timestamp: ReadingTimestamp,
    /// Generated power (kW), finite and non-negative
    pub generation_kw: f64,
}

impl Reading {
    pub fn new(timestamp: ReadingTimestamp, generation_kw: f64) -> Self {
        Self {
            timestamp,
            generation_kw,
        }
    }

    /// Validate a raw row. `index` is the row's position in its batch and
    /// is carried in the error.
    pub fn from_raw(index: usize, raw: &RawReading) -> Result<Self> {
        let reject = |value: &str, defect| AnomalyError::InvalidReading {
            index,
            value: value.to_owned(),
            defect,
        };

        let ts_text = raw
            .timestamp
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| reject("", ReadingDefect::MissingTimestamp))?;
        let timestamp = ReadingTimestamp::parse(ts_text)
            .ok_or_else(|| reject(ts_text, ReadingDefect::UnparseableTimestamp))?;

        let kw_text = raw
            .generation_kw
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| reject("", ReadingDefect::MissingGeneration))?;
        let generation_kw: f64 = kw_text
            .trim()
            .parse()
            .map_err(|_| reject(kw_text, ReadingDefect::NonNumericGeneration))?;

        check_generation(generation_kw).map_err(|defect| reject(kw_text, defect))?;

        Ok(Self::new(timestamp, generation_kw))
    }
}

/// Generation must be a finite, non-negative number
pub fn check_generation(generation_kw: f64) -> std::result::Result<(), ReadingDefect> {
    if !generation_kw.is_finite() {
        Err(ReadingDefect::NonFiniteGeneration)
    } else if generation_kw < 0.0 {
        Err(ReadingDefect::NegativeGeneration)
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bare_date_is_midnight() {
        let ts = ReadingTimestamp::parse("2025-01-01").unwrap();
        assert_eq!(ts.hour(), 0);
        // 2025-01-01 was a Wednesday
        assert_eq!(ts.day_of_week(), 2);
        assert!(ts.offset().is_none());
    }

    #[test]
    fn test_parse_keeps_wall_clock_of_offset() {
        let ts = ReadingTimestamp::parse("2025-06-02T10:30:00+02:00").unwrap();
        assert_eq!(ts.hour(), 10);
        assert_eq!(ts.day_of_week(), 0);
        assert_eq!(ts.instant().hour(), 8);
        assert_eq!(ts.to_string(), "2025-06-02 10:30:00+02:00");
    }

    #[test]
    fn test_parse_naive_variants() {
        for text in [
            "2025-03-04 13:15:00",
            "2025-03-04T13:15:00",
            "2025-03-04 13:15",
            "2025-03-04T13:15:00.250",
            "  2025-03-04 13:15:00  ",
        ] {
            let ts = ReadingTimestamp::parse(text).unwrap_or_else(|| panic!("{text}"));
            assert_eq!(ts.hour(), 13, "{text}");
        }
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(ReadingTimestamp::parse("").is_none());
        assert!(ReadingTimestamp::parse("yesterday").is_none());
        assert!(ReadingTimestamp::parse("2025-13-01").is_none());
    }

    #[test]
    fn test_display_without_offset() {
        let ts = ReadingTimestamp::parse("2025-01-11").unwrap();
        assert_eq!(ts.to_string(), "2025-01-11 00:00:00");
    }

    #[test]
    fn test_timestamp_serde_as_string() {
        let ts = ReadingTimestamp::parse("2025-01-11 06:00:00").unwrap();
        let json = serde_json::to_string(&ts).unwrap();
        assert_eq!(json, "\"2025-01-11 06:00:00\"");
        let back: ReadingTimestamp = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ts);
    }

    #[test]
    fn test_from_raw_accepts_valid_row() {
        let reading = Reading::from_raw(0, &RawReading::new("2025-01-01 12:00:00", " 4.5 ")).unwrap();
        assert_eq!(reading.generation_kw, 4.5);
        assert_eq!(reading.timestamp.hour(), 12);
    }

    #[test]
    fn test_from_raw_rejections() {
        let cases = [
            (RawReading::default(), ReadingDefect::MissingTimestamp),
            (
                RawReading::new("not a date", "1.0"),
                ReadingDefect::UnparseableTimestamp,
            ),
            (
                RawReading {
                    timestamp: Some("2025-01-01".to_owned()),
                    generation_kw: None,
                },
                ReadingDefect::MissingGeneration,
            ),
            (
                RawReading::new("2025-01-01", "lots"),
                ReadingDefect::NonNumericGeneration,
            ),
            (
                RawReading::new("2025-01-01", "NaN"),
                ReadingDefect::NonFiniteGeneration,
            ),
            (
                RawReading::new("2025-01-01", "-50"),
                ReadingDefect::NegativeGeneration,
            ),
        ];

        for (raw, expected) in cases {
            match Reading::from_raw(4, &raw) {
                Err(AnomalyError::InvalidReading { index, defect, .. }) => {
                    assert_eq!(index, 4);
                    assert_eq!(defect, expected);
                }
                other => panic!("expected {expected:?}, got {other:?}"),
            }
        }
    }
}
