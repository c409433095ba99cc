use std::path::Path;

use lipid_cohort::algorithm::PatientFilter;
use lipid_cohort::{
    ExtractionStage, MemoryTableStore, PipelineError, Record, Table, TableFormat, TableSource,
};
use pretty_assertions::assert_eq;

use crate::utils::{consults, ids, patients, test_context};

fn store_with_inputs(ctx: &lipid_cohort::StudyContext) -> MemoryTableStore {
    let store = MemoryTableStore::new();
    store.insert(ctx.patients_table(), patients());
    store.insert(ctx.consults_table(), consults());
    store
}

#[test]
fn test_consolidates_one_record_per_patient() -> lipid_cohort::Result<()> {
    let ctx = test_context(Path::new("/study"), TableFormat::Csv);
    let store = store_with_inputs(&ctx);

    let output = ExtractionStage::new().run(&ctx, &store, &store)?;

    let consolidated = store.read_table(&ctx.consolidated_table())?;
    assert_eq!(ids(&consolidated, "CESid"), vec!["P1", "P4", "P5"]);
    assert_eq!(
        consolidated.columns(),
        [
            "Fecha",
            "Nota",
            "PA Sistólica",
            "CESid",
            "HDL",
            "Colesterol",
            "Apellido",
            "Nombre",
            "Sexo",
            "Comunidad",
            "FN_Ano",
            "Diabetes",
            "Hipertensión",
        ]
    );

    // newest consult wins, gaps filled from the older one
    let p1 = &consolidated.rows()[0];
    assert_eq!(p1.get("Fecha"), "2020-02-01");
    assert_eq!(p1.get("HDL"), "50");
    assert_eq!(p1.get("Colesterol"), "230");
    assert_eq!(p1.get("PA Sistólica"), "140");
    assert_eq!(p1.get("FN_Ano"), "1965");
    assert_eq!(p1.get("Diabetes"), "true");

    // mention of hdl without a number is kept with an empty value
    let p4 = &consolidated.rows()[1];
    assert_eq!(p4.get("HDL"), "");
    assert_eq!(p4.get("Diabetes"), "TRUE");

    // a malformed date makes the incoming row the newer one
    let p5 = &consolidated.rows()[2];
    assert_eq!(p5.get("Fecha"), "fecha?");
    assert_eq!(p5.get("HDL"), "42");
    assert_eq!(p5.get("Colesterol"), "190");
    assert_eq!(p5.get("PA Sistólica"), "135");

    assert_eq!(output.consolidated.len(), 3);
    assert_eq!(output.stats.total_patients, 5);
    assert_eq!(output.stats.cohort_patients, 4);
    assert_eq!(output.stats.focus_consults, 6);
    assert_eq!(output.stats.hdl_consults, 5);
    assert_eq!(output.stats.hdl_values, 4);
    assert_eq!(output.stats.cholesterol_values, 2);
    assert_eq!(output.stats.consolidated_records, 3);
    Ok(())
}

#[test]
fn test_gap_report_and_statistics_file() -> lipid_cohort::Result<()> {
    let ctx = test_context(Path::new("/study"), TableFormat::Csv);
    let store = store_with_inputs(&ctx);

    let output = ExtractionStage::new().run(&ctx, &store, &store)?;

    let gaps = store.read_table(&ctx.gap_table())?;
    assert_eq!(ids(&gaps, "CesID"), vec!["P2"]);
    // gap rows keep every source column
    assert_eq!(gaps.rows()[0].get("Telefono"), "555-0100");
    assert_eq!(output.gap_patients.len(), 1);
    assert_eq!(output.stats.gap_patients, 1);

    let consolidated = store.read_table(&ctx.consolidated_table())?;
    assert!(!ids(&consolidated, "CESid").contains(&"P2".to_string()));

    assert_eq!(
        store.text(&ctx.stats_file()).as_deref(),
        Some("Patients with DM or HTN but no cholesterol data: 1\n")
    );
    Ok(())
}

#[test]
fn test_intermediate_tables() -> lipid_cohort::Result<()> {
    let ctx = test_context(Path::new("/study"), TableFormat::Csv);
    let store = store_with_inputs(&ctx);
    ExtractionStage::new().run(&ctx, &store, &store)?;

    let cohort = store.read_table(&ctx.cohort_table())?;
    assert_eq!(ids(&cohort, "CesID"), vec!["P1", "P2", "P4", "P5"]);
    assert_eq!(cohort.columns(), patients().columns());

    let focus = store.read_table(&ctx.focus_consults_table())?;
    assert_eq!(focus.len(), 6);
    assert_eq!(focus.rows()[0].get("HDL"), "");

    let with_hdl = store.read_table(&ctx.hdl_consults_table())?;
    assert_eq!(ids(&with_hdl, "CESid"), vec!["P1", "P1", "P4", "P5", "P5"]);
    assert_eq!(with_hdl.rows()[0].get("HDL"), "45");
    assert_eq!(with_hdl.rows()[0].get("Colesterol"), "230");
    assert_eq!(with_hdl.rows()[0].get("Medico"), "Dra. Ruiz");
    Ok(())
}

#[test]
fn test_intermediates_can_be_switched_off() -> lipid_cohort::Result<()> {
    let mut config = crate::utils::test_config(Path::new("/study"), TableFormat::Csv);
    config.write_intermediates = false;
    let ctx = config.context(crate::utils::COMMUNITY)?;
    let store = store_with_inputs(&ctx);

    ExtractionStage::new().run(&ctx, &store, &store)?;

    assert!(!store.contains(&ctx.cohort_table()));
    assert!(!store.contains(&ctx.focus_consults_table()));
    assert!(!store.contains(&ctx.hdl_consults_table()));
    assert!(store.contains(&ctx.consolidated_table()));
    assert!(store.contains(&ctx.stats_file()));
    Ok(())
}

#[test]
fn test_custom_cohort_criteria() -> lipid_cohort::Result<()> {
    let ctx = test_context(Path::new("/study"), TableFormat::Csv);
    let store = store_with_inputs(&ctx);

    let output =
        ExtractionStage::with_criteria(PatientFilter::Hypertensive).run(&ctx, &store, &store)?;

    assert_eq!(output.stats.cohort_patients, 2);
    let ids: Vec<&str> = output.consolidated.iter().map(|r| r.patient_id.as_str()).collect();
    assert_eq!(ids, vec!["P5"]);
    Ok(())
}

#[test]
fn test_missing_consult_table_aborts_before_writing() {
    let ctx = test_context(Path::new("/study"), TableFormat::Csv);
    let store = MemoryTableStore::new();
    store.insert(ctx.patients_table(), patients());

    let err = ExtractionStage::new().run(&ctx, &store, &store).unwrap_err();
    match err {
        PipelineError::MissingTable { path } => assert_eq!(path, ctx.consults_table()),
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(store.table_locations(), vec![ctx.patients_table()]);
}

#[test]
fn test_missing_required_column() {
    let ctx = test_context(Path::new("/study"), TableFormat::Csv);
    let store = MemoryTableStore::new();
    store.insert(ctx.patients_table(), patients());
    store.insert(
        ctx.consults_table(),
        Table::with_rows(
            "Consultas",
            vec!["CESid".to_string(), "Fecha".to_string(), "Nota".to_string()],
            vec![Record::from([("CESid", "P1"), ("Fecha", "2020-01-01"), ("Nota", "hdl 40")])],
        ),
    );

    let err = ExtractionStage::new().run(&ctx, &store, &store).unwrap_err();
    assert!(matches!(
        err,
        PipelineError::MissingColumn { ref column, ref table }
            if column == "PA Sistólica" && table == "Consultas"
    ));
}

#[test]
fn test_empty_inputs_produce_empty_outputs() -> lipid_cohort::Result<()> {
    let ctx = test_context(Path::new("/study"), TableFormat::Csv);
    let store = MemoryTableStore::new();
    store.insert(
        ctx.patients_table(),
        Table::new("Pacientes", patients().columns().to_vec()),
    );
    store.insert(
        ctx.consults_table(),
        Table::new("Consultas", consults().columns().to_vec()),
    );

    let output = ExtractionStage::new().run(&ctx, &store, &store)?;
    assert!(output.consolidated.is_empty());
    assert!(store.read_table(&ctx.consolidated_table())?.is_empty());
    assert_eq!(
        store.text(&ctx.stats_file()).as_deref(),
        Some("Patients with DM or HTN but no cholesterol data: 0\n")
    );
    Ok(())
}
