//! Module for parsing the free-text visit dates of the consult table.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Configuration for date format handling
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DateFormatConfig {
    /// Date-time formats, tried before the date-only formats
    pub datetime_formats: Vec<String>,
    /// List of date format strings to try when parsing dates
    pub date_formats: Vec<String>,
    /// Enable heuristic format detection
    pub enable_format_detection: bool,
}

impl Default for DateFormatConfig {
    fn default() -> Self {
        Self {
            datetime_formats: vec![
                "%Y-%m-%d %H:%M:%S".to_string(),
                "%Y-%m-%dT%H:%M:%S".to_string(),
                "%Y-%m-%d %H:%M".to_string(),
                "%m/%d/%Y %H:%M:%S".to_string(),
                "%m/%d/%Y %H:%M".to_string(),
            ],
            date_formats: vec![
                "%Y-%m-%d".to_string(), // ISO format: 2023-01-15
                "%Y/%m/%d".to_string(), // 2023/01/15
                "%m/%d/%Y".to_string(), // US: 01/15/2023
                "%d/%m/%Y".to_string(), // UK: 15/01/2023
                "%d-%m-%Y".to_string(), // European: 15-01-2023
                "%d.%m.%Y".to_string(), // 15.01.2023
                "%Y%m%d".to_string(),   // Compact: 20230115
                "%d %b %Y".to_string(), // 15 Jan 2023
                "%d %B %Y".to_string(), // 15 January 2023
                "%b %d %Y".to_string(), // Jan 15 2023
                "%B %d, %Y".to_string(), // January 15, 2023
            ],
            enable_format_detection: true,
        }
    }
}

/// Parse a date string with multiple format attempts
///
/// Date-only values are placed at midnight so that they compare against date-time values.
/// Returns `None` for empty or unrecognised strings.
#[must_use]
pub fn parse_date_string(s: &str, config: &DateFormatConfig) -> Option<NaiveDateTime> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    // Two-digit years would otherwise be read as years of the first century
    if config.enable_format_detection {
        if let Some(format) = detect_short_year_format(s) {
            if let Ok(date) = NaiveDate::parse_from_str(s, format) {
                return date.and_hms_opt(0, 0, 0);
            }
        }
    }

    for format in &config.datetime_formats {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(s, format) {
            return Some(datetime);
        }
    }

    for format in &config.date_formats {
        if let Ok(date) = NaiveDate::parse_from_str(s, format) {
            return date.and_hms_opt(0, 0, 0);
        }
    }

    // Compact day-first (DDMMYYYY) when no configured format matched
    if config.enable_format_detection && s.len() == 8 && s.chars().all(|c| c.is_ascii_digit()) {
        if let Ok(date) = NaiveDate::parse_from_str(s, "%d%m%Y") {
            return date.and_hms_opt(0, 0, 0);
        }
    }

    None
}

/// Detect numeric dates with a two-digit year (`04/02/19`, `25-12-18`, `01.02.20`)
///
/// Month-first is assumed unless the first component cannot be a month.
#[must_use]
pub fn detect_short_year_format(s: &str) -> Option<&'static str> {
    for separator in ['/', '-', '.'] {
        let parts: Vec<&str> = s.split(separator).collect();
        let numeric = parts
            .iter()
            .all(|p| !p.is_empty() && p.chars().all(|c| c.is_ascii_digit()));
        if parts.len() != 3 || !numeric {
            continue;
        }
        if parts[0].len() > 2 || parts[2].len() != 2 {
            return None;
        }
        let first = parts[0].parse::<u8>().ok()?;
        return Some(match (separator, first > 12) {
            ('/', false) => "%m/%d/%y",
            ('/', true) => "%d/%m/%y",
            ('-', false) => "%m-%d-%y",
            ('-', true) => "%d-%m-%y",
            _ => "%d.%m.%y",
        });
    }

    None
}
