//! Risk stage: attach the 10-year ASCVD estimate to every consolidated record

use crate::algorithm::risk::{RiskStats, ScoredRecord, score_records};
use crate::config::StudyContext;
use crate::error::Result;
use crate::models::{ConsolidatedRecord, rows_to_table};
use crate::pipeline::extraction::consolidated_from_table;
use crate::schema;
use crate::utils::io::{TableSink, TableSource, table_name};
use crate::utils::logging::{create_main_progress_bar, finish_progress_bar};

/// Everything the risk stage produced
#[derive(Debug, Clone, Default)]
pub struct RiskOutput {
    /// Every input record, with an estimate when one could be computed
    pub scored: Vec<ScoredRecord>,
    /// Scored and unscored counts
    pub stats: RiskStats,
}

/// Scores consolidated records and writes the risk output table
#[derive(Debug, Clone, Copy, Default)]
pub struct RiskStage;

impl RiskStage {
    /// Read the consolidated table of the community, score it and write the output table
    ///
    /// # Errors
    /// Returns an error when the consolidated table is missing or malformed, or when the output
    /// cannot be written. Records that cannot be scored are not errors.
    pub fn run(
        &self,
        ctx: &StudyContext,
        source: &impl TableSource,
        sink: &impl TableSink,
    ) -> Result<RiskOutput> {
        let table = source.read_table(&ctx.consolidated_table())?;
        let records = consolidated_from_table(&table)?;
        self.score(ctx, &records, sink)
    }

    /// Score records already in memory and write the output table
    ///
    /// # Errors
    /// Returns an error when the output table cannot be written
    pub fn score(
        &self,
        ctx: &StudyContext,
        records: &[ConsolidatedRecord],
        sink: &impl TableSink,
    ) -> Result<RiskOutput> {
        let settings = ctx.risk_settings();
        log::info!(
            "Computing ASCVD 10-year risk for {} patients of {} (reference year {})",
            records.len(),
            ctx.community(),
            settings.reference_year
        );

        let progress = create_main_progress_bar(
            records.len() as u64,
            Some("Scoring patients"),
            ctx.config().show_progress,
        );
        let (scored, stats) = score_records(records, &settings, &progress);
        finish_progress_bar(&progress, Some("Scoring complete"));
        log::info!("{stats}");

        let location = ctx.risk_output_table();
        sink.write_table(
            &rows_to_table(&table_name(&location), schema::risk_output_columns(), &scored),
            &location,
        )?;

        Ok(RiskOutput { scored, stats })
    }
}
