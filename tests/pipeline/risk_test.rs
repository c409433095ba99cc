use std::path::Path;

use lipid_cohort::{
    ExtractionStage, MemoryTableStore, PipelineError, RiskStage, TableFormat, TableSource,
    run_pipeline,
};
use pretty_assertions::assert_eq;

use crate::utils::{consults, ids, patients, test_context};

fn risk_column(table: &lipid_cohort::Table) -> Vec<String> {
    ids(table, "ASCVD 10 year")
}

#[test]
fn test_run_scores_consolidated_records() -> lipid_cohort::Result<()> {
    let ctx = test_context(Path::new("/study"), TableFormat::Csv);
    let store = MemoryTableStore::new();
    store.insert(ctx.patients_table(), patients());
    store.insert(ctx.consults_table(), consults());

    let (extraction, risk) = run_pipeline(&ctx, &store, &store)?;
    assert_eq!(risk.scored.len(), extraction.consolidated.len());
    assert_eq!(risk.stats.scored, 2);
    assert_eq!(risk.stats.unscored, 1);

    let output = store.read_table(&ctx.risk_output_table())?;
    assert_eq!(ids(&output, "CESid"), vec!["P1", "P4", "P5"]);
    assert_eq!(output.columns().last().map(String::as_str), Some("ASCVD 10 year"));

    let estimates = risk_column(&output);
    // P4 has no HDL value and is below the age range: written without an estimate
    assert_eq!(estimates[1], "");
    for estimate in [&estimates[0], &estimates[2]] {
        let value: f64 = estimate.parse().expect("numeric estimate");
        assert!((0.0..=1.0).contains(&value), "estimate {value} out of range");
    }
    Ok(())
}

#[test]
fn test_separate_stages_match_combined_run() -> lipid_cohort::Result<()> {
    let ctx = test_context(Path::new("/study"), TableFormat::Csv);

    let combined = MemoryTableStore::new();
    combined.insert(ctx.patients_table(), patients());
    combined.insert(ctx.consults_table(), consults());
    run_pipeline(&ctx, &combined, &combined)?;

    let staged = MemoryTableStore::new();
    staged.insert(ctx.patients_table(), patients());
    staged.insert(ctx.consults_table(), consults());
    ExtractionStage::new().run(&ctx, &staged, &staged)?;
    RiskStage.run(&ctx, &staged, &staged)?;

    assert_eq!(
        staged.read_table(&ctx.risk_output_table())?,
        combined.read_table(&ctx.risk_output_table())?
    );
    Ok(())
}

#[test]
fn test_risk_stage_requires_consolidated_table() {
    let ctx = test_context(Path::new("/study"), TableFormat::Csv);
    let store = MemoryTableStore::new();

    let err = RiskStage.run(&ctx, &store, &store).unwrap_err();
    assert!(matches!(err, PipelineError::MissingTable { .. }));
}

#[test]
fn test_reference_year_changes_age() -> lipid_cohort::Result<()> {
    let store = MemoryTableStore::new();
    let mut config = crate::utils::test_config(Path::new("/study"), TableFormat::Csv);

    config.reference_year = Some(2020);
    let ctx = config.context(crate::utils::COMMUNITY)?;
    store.insert(ctx.patients_table(), patients());
    store.insert(ctx.consults_table(), consults());
    let (_, at_2020) = run_pipeline(&ctx, &store, &store)?;

    config.reference_year = Some(2030);
    let ctx = config.context(crate::utils::COMMUNITY)?;
    let (_, at_2030) = run_pipeline(&ctx, &store, &store)?;

    let first = |output: &lipid_cohort::RiskOutput| output.scored[0].risk.unwrap_or_default();
    assert!(first(&at_2030) > first(&at_2020));
    Ok(())
}
