//! Lab value extraction from free-text consult notes
//!
//! Notes are written in Spanish shorthand (`hdl: 52, col total 210`). The extractor is a
//! best-effort pattern matcher: it lower-cases the note and takes the first number that
//! follows a known label.

use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref HDL_PATTERN: Regex = Regex::new(r"hdl:? (\d+)").unwrap();
    // Alternation is leftmost-first, so `col total 210` is read through the `col total` label
    static ref TOTAL_CHOLESTEROL_PATTERN: Regex =
        Regex::new(r"(col|coles|colesterol|col total|total):? (\d+)").unwrap();
}

/// Keyword whose presence counts as HDL evidence
pub const HDL_KEYWORD: &str = "hdl";

/// Outcome of looking for a lab value in a note
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractedValue {
    /// A number was found after the label
    Found(String),
    /// The label is mentioned but no number follows it
    EvidenceOnly,
    /// The note has no evidence for the lab at all
    Absent,
}

impl ExtractedValue {
    /// Whether the note had any evidence for the lab
    #[must_use]
    pub fn has_evidence(&self) -> bool {
        !matches!(self, Self::Absent)
    }

    /// The extracted number, if any
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        match self {
            Self::Found(value) => Some(value),
            Self::EvidenceOnly | Self::Absent => None,
        }
    }

    /// The value as written to a table cell; evidence without a number is an empty cell
    #[must_use]
    pub fn into_cell(self) -> String {
        match self {
            Self::Found(value) => value,
            Self::EvidenceOnly | Self::Absent => String::new(),
        }
    }
}

impl fmt::Display for ExtractedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Found(value) => write!(f, "{value}"),
            Self::EvidenceOnly => write!(f, "<evidence only>"),
            Self::Absent => write!(f, "<absent>"),
        }
    }
}

/// Extract the HDL value from a note
///
/// Returns [`ExtractedValue::Absent`] when the note never mentions `hdl`.
#[must_use]
pub fn extract_hdl(note: &str) -> ExtractedValue {
    let note = note.to_lowercase();
    if !note.contains(HDL_KEYWORD) {
        return ExtractedValue::Absent;
    }

    HDL_PATTERN
        .captures(&note)
        .and_then(|caps| caps.get(1))
        .map_or(ExtractedValue::EvidenceOnly, |m| {
            ExtractedValue::Found(m.as_str().to_string())
        })
}

/// Extract the total cholesterol value from a note
///
/// Only HDL tracks evidence; a miss here is `None` and is written as an empty cell.
#[must_use]
pub fn extract_total_cholesterol(note: &str) -> Option<String> {
    let note = note.to_lowercase();
    TOTAL_CHOLESTEROL_PATTERN
        .captures(&note)
        .and_then(|caps| caps.get(2))
        .map(|m| m.as_str().to_string())
}
