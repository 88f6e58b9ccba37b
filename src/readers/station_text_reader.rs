use crate::error::Result;
use crate::models::{Observation, ObservationTable};
use crate::utils::constants::{COLUMN_COUNT, HEADER_LINES, MISSING_VALUE_SENTINELS};
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// Parser for the whitespace-delimited station text published by the Met Office.
///
/// The layout is a fixed block of header lines followed by one line per month:
///
/// ```text
///    yyyy  mm   tmax    tmin      af    rain     sun
///                degC    degC    days      mm   hours
///    1959   1    4.4    -1.4      20    44.4    54.4
/// ```
///
/// Parsing never fails: nonconforming lines are skipped and unreadable values
/// become `None`.
pub struct StationTextReader {
    header_lines: usize,
}

impl StationTextReader {
    pub fn new() -> Self {
        Self {
            header_lines: HEADER_LINES,
        }
    }

    pub fn with_header_lines(header_lines: usize) -> Self {
        Self { header_lines }
    }

    /// Read a station text file from disk
    pub fn read_file(&self, path: &Path) -> Result<ObservationTable> {
        let bytes = fs::read(path)?;
        Ok(self.parse_bytes(&bytes))
    }

    /// Decode a raw response body and parse it
    pub fn parse_bytes(&self, bytes: &[u8]) -> ObservationTable {
        let (text, _, had_errors) = encoding_rs::UTF_8.decode(bytes);
        if had_errors {
            debug!("Station text contained invalid UTF-8; replaced malformed sequences");
        }
        self.parse_str(&text)
    }

    pub fn parse_str(&self, text: &str) -> ObservationTable {
        let mut rows = Vec::new();
        let mut line_count = 0;
        let mut skipped = 0;

        for line in text.lines() {
            line_count += 1;

            if line_count <= self.header_lines {
                continue;
            }

            if line.trim().is_empty() {
                continue;
            }

            match self.parse_line(line) {
                Some(observation) => rows.push(observation),
                None => {
                    skipped += 1;
                    debug!("Skipping nonconforming line {}: {:?}", line_count, line);
                }
            }
        }

        if line_count < self.header_lines {
            warn!(
                "Station text has {} lines, fewer than the {} header lines expected",
                line_count, self.header_lines
            );
        }

        info!(
            "Parsed {} observations ({} lines skipped)",
            rows.len(),
            skipped
        );

        ObservationTable::new(rows)
    }

    /// Parse one data line into an observation.
    ///
    /// Returns `None` unless the line has exactly seven tokens and the first
    /// two are integer year and month.
    pub fn parse_line(&self, line: &str) -> Option<Observation> {
        let parts: Vec<&str> = line.split_whitespace().collect();

        if parts.len() != COLUMN_COUNT {
            return None;
        }

        let year = parts[0].parse::<i32>().ok()?;
        let month = parts[1].parse::<u32>().ok()?;

        Some(Observation {
            year,
            month,
            tmax: parse_value(parts[2]),
            tmin: parse_value(parts[3]),
            af: parse_value(parts[4]),
            rain: parse_value(parts[5]),
            sun: parse_value(parts[6]),
        })
    }
}

impl Default for StationTextReader {
    fn default() -> Self {
        Self::new()
    }
}

/// Coerce a token to a number; sentinels and anything unreadable become `None`.
pub fn parse_value(token: &str) -> Option<f64> {
    if MISSING_VALUE_SENTINELS.contains(&token) {
        return None;
    }

    token.parse::<f64>().ok().filter(|v| v.is_finite())
}
