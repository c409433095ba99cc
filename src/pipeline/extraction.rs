//! Extraction stage: patients and consults to one consolidated record per patient

use std::time::Instant;

use crate::algorithm::cohort::{PatientFilter, cohort_ids, select_cohort};
use crate::algorithm::enrichment::{enrich_consults, join_with_patients};
use crate::algorithm::gaps::{find_gap_patients, gap_summary_line};
use crate::algorithm::merge::merge_latest_per_patient;
use crate::algorithm::statistics::ExtractionStats;
use crate::config::StudyContext;
use crate::error::Result;
use crate::models::{ConsolidatedRecord, Consult, Patient, Table, rows_to_table, table_to_rows};
use crate::schema;
use crate::utils::io::{TableSink, TableSource, table_name};
use crate::utils::logging::{create_spinner, finish_progress_bar};

/// Everything the extraction stage produced
#[derive(Debug, Clone, Default)]
pub struct ExtractionOutput {
    /// One record per cohort patient with HDL evidence, in first-seen order
    pub consolidated: Vec<ConsolidatedRecord>,
    /// Cohort patients without any consolidated record
    pub gap_patients: Vec<Patient>,
    /// Counts for the audit log
    pub stats: ExtractionStats,
}

/// Reads the patient and consult tables of a community and writes the consolidated records,
/// the gap report and the statistics file
#[derive(Debug, Clone, Default)]
pub struct ExtractionStage {
    criteria: PatientFilter,
}

impl ExtractionStage {
    /// Stage selecting diabetic or hypertensive patients
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage selecting the cohort with other criteria
    #[must_use]
    pub fn with_criteria(criteria: PatientFilter) -> Self {
        Self { criteria }
    }

    /// Run the stage
    ///
    /// Both source tables are read and validated before anything is written.
    ///
    /// # Errors
    /// Returns an error when a source table or one of its required columns is missing, or
    /// when an artifact cannot be written
    pub fn run(
        &self,
        ctx: &StudyContext,
        source: &impl TableSource,
        sink: &impl TableSink,
    ) -> Result<ExtractionOutput> {
        let start = Instant::now();
        let config = ctx.config();
        log::info!("Extracting cholesterol records for {}", ctx.community());

        let patient_table = source.read_table(&ctx.patients_table())?;
        patient_table.require_columns(&schema::PATIENT_REQUIRED_COLUMNS)?;
        let consult_table = source.read_table(&ctx.consults_table())?;
        consult_table.require_columns(&schema::CONSULT_REQUIRED_COLUMNS)?;

        let spinner = create_spinner(Some("Selecting cohort"), config.show_progress);
        let patients: Vec<Patient> = table_to_rows(&patient_table);
        let consults: Vec<Consult> = table_to_rows(&consult_table);

        let mut stats = ExtractionStats {
            total_patients: patients.len(),
            ..ExtractionStats::default()
        };

        let cohort = select_cohort(&patients, &self.criteria);
        stats.cohort_patients = cohort.len();

        spinner.set_message("Enriching consults");
        let ids = cohort_ids(&cohort);
        let enriched = enrich_consults(&ids, &consults);
        stats.record_enrichment(&enriched);

        if config.write_intermediates {
            let cohort_location = ctx.cohort_table();
            sink.write_table(
                &rows_to_table(
                    &table_name(&cohort_location),
                    patient_table.columns().to_vec(),
                    &cohort,
                ),
                &cohort_location,
            )?;
            let focus_location = ctx.focus_consults_table();
            sink.write_table(
                &rows_to_table(
                    &table_name(&focus_location),
                    consult_table.columns().to_vec(),
                    &enriched.focus_consults,
                ),
                &focus_location,
            )?;
            let hdl_location = ctx.hdl_consults_table();
            sink.write_table(
                &rows_to_table(
                    &table_name(&hdl_location),
                    consult_table.columns().to_vec(),
                    &enriched.with_hdl_evidence,
                ),
                &hdl_location,
            )?;
        }

        spinner.set_message("Merging records per patient");
        let candidates = join_with_patients(&cohort, &enriched.with_hdl_evidence);
        let consolidated = merge_latest_per_patient(&candidates, &config.date_formats);
        stats.consolidated_records = consolidated.len();

        let consolidated_location = ctx.consolidated_table();
        sink.write_table(
            &rows_to_table(
                &table_name(&consolidated_location),
                schema::consolidated_columns(),
                &consolidated,
            ),
            &consolidated_location,
        )?;

        let gap_patients = find_gap_patients(&cohort, &consolidated);
        stats.gap_patients = gap_patients.len();
        let gap_location = ctx.gap_table();
        sink.write_table(
            &rows_to_table(
                &table_name(&gap_location),
                patient_table.columns().to_vec(),
                &gap_patients,
            ),
            &gap_location,
        )?;
        sink.write_text(&gap_summary_line(gap_patients.len()), &ctx.stats_file())?;

        finish_progress_bar(&spinner, Some("Extraction complete"));
        log::info!("{stats}");
        log::info!(
            "Extraction for {} finished in {:?}",
            ctx.community(),
            start.elapsed()
        );

        Ok(ExtractionOutput {
            consolidated,
            gap_patients,
            stats,
        })
    }
}

/// Parse a consolidated table written by [`ExtractionStage`]
///
/// # Errors
/// Returns [`crate::error::PipelineError::MissingColumn`] when a consolidated column is absent
pub fn consolidated_from_table(table: &Table) -> Result<Vec<ConsolidatedRecord>> {
    table.require_columns(&schema::CONSULT_OUTPUT_FIELDS)?;
    table.require_columns(&schema::PATIENT_OUTPUT_FIELDS)?;
    Ok(table_to_rows(table))
}
