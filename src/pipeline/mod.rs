//! The two pipeline stages and their composition
//!
//! Stages receive the [`StudyContext`] explicitly and derive every table location from it.

pub mod extraction;
pub mod risk;

pub use extraction::{ExtractionOutput, ExtractionStage, consolidated_from_table};
pub use risk::{RiskOutput, RiskStage};

use crate::config::StudyContext;
use crate::error::Result;
use crate::utils::io::{TableSink, TableSource};

/// Run the extraction stage, then score its records without re-reading them
///
/// # Errors
/// Returns the first error of either stage
pub fn run_pipeline(
    ctx: &StudyContext,
    source: &impl TableSource,
    sink: &impl TableSink,
) -> Result<(ExtractionOutput, RiskOutput)> {
    let extraction = ExtractionStage::new().run(ctx, source, sink)?;
    let risk = RiskStage.score(ctx, &extraction.consolidated, sink)?;
    Ok((extraction, risk))
}
