//! Temporal merge of per-consult rows into one record per patient
//!
//! Rows are folded in input order. For every patient the accumulator holds the best record
//! so far; each further row is compared by visit date and the newer of the two is
//! back-filled field by field from the older one. The merged record replaces the
//! accumulator, it is never edited in place.
//!
//! When either date cannot be parsed the incoming row is treated as newer.

use std::cmp::Ordering;

use rustc_hash::FxHashMap;

use crate::models::ConsolidatedRecord;
use crate::schema::{DateFormatConfig, parse_date_string};

/// Which side of a merge step holds the more recent visit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recency {
    /// The incoming row is newer
    Incoming,
    /// The accumulated record is newer (also on equal dates)
    Accumulated,
}

/// Decide which of two rows is newer
///
/// Equal dates keep the accumulated record as newer; a date that fails to parse on either
/// side makes the incoming row newer.
#[must_use]
pub fn compare_recency(
    incoming_date: &str,
    accumulated_date: &str,
    formats: &DateFormatConfig,
) -> Recency {
    match (
        parse_date_string(incoming_date, formats),
        parse_date_string(accumulated_date, formats),
    ) {
        (Some(incoming), Some(accumulated)) => match incoming.cmp(&accumulated) {
            Ordering::Greater => Recency::Incoming,
            Ordering::Less | Ordering::Equal => Recency::Accumulated,
        },
        _ => {
            log::debug!(
                "Unparsable visit date ('{incoming_date}' vs '{accumulated_date}'), \
                 keeping the incoming row as newer"
            );
            Recency::Incoming
        }
    }
}

/// One merge step: the newer record back-filled from the older one
#[must_use]
pub fn merge_pair(
    accumulated: &ConsolidatedRecord,
    incoming: &ConsolidatedRecord,
    formats: &DateFormatConfig,
) -> ConsolidatedRecord {
    match compare_recency(&incoming.date, &accumulated.date, formats) {
        Recency::Incoming => incoming.backfilled_from(accumulated),
        Recency::Accumulated => accumulated.backfilled_from(incoming),
    }
}

/// Collapse rows to at most one record per patient identifier
///
/// Output order is the order in which each identifier was first seen.
#[must_use]
pub fn merge_latest_per_patient(
    rows: &[ConsolidatedRecord],
    formats: &DateFormatConfig,
) -> Vec<ConsolidatedRecord> {
    let mut position: FxHashMap<&str, usize> = FxHashMap::default();
    let mut merged: Vec<ConsolidatedRecord> = Vec::new();

    for row in rows {
        match position.get(row.patient_id.as_str()) {
            Some(&idx) => {
                let replacement = merge_pair(&merged[idx], row, formats);
                merged[idx] = replacement;
            }
            None => {
                position.insert(row.patient_id.as_str(), merged.len());
                merged.push(row.clone());
            }
        }
    }

    log::info!(
        "Merged {} consult rows into {} patient records",
        rows.len(),
        merged.len()
    );
    merged
}
