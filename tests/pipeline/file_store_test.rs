use std::fs;

use lipid_cohort::{
    ExtractionStage, FileTableStore, PipelineError, RiskStage, TableFormat, TableSink, TableSource,
    run_pipeline,
};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

use crate::utils::{consults, ids, patients, test_context};

const PATIENTS_CSV: &str = "\
CesID,Apellido,Nombre,Sexo,Comunidad,FN_Ano,Diabetes,Hipertensión
001,Perez,Luis,1,Salitre,1965,true,false
002,Gomez,Ana,2,Salitre,1950,false,true
003,Diaz,Eva,2,Salitre,1960,false,false
";

const CONSULTS_CSV: &str = "\
CESid,Fecha,Nota,PA Sistólica,HDL,Colesterol
001,2019-01-10,\"Paciente refiere hdl: 45, col total 230\",140,,
002,2019-03-02,consulta de rutina,150,,
001,2020-02-01,\"control, hdl 50\",,,
003,2020-02-01,hdl 61,120,,
";

#[test]
fn test_csv_end_to_end() -> lipid_cohort::Result<()> {
    let dir = TempDir::new()?;
    let ctx = test_context(dir.path(), TableFormat::Csv);
    fs::create_dir_all(ctx.patients_table().parent().expect("community dir"))?;
    fs::write(ctx.patients_table(), PATIENTS_CSV)?;
    fs::write(ctx.consults_table(), CONSULTS_CSV)?;

    let store = FileTableStore::from_config(ctx.config());
    let (extraction, risk) = run_pipeline(&ctx, &store, &store)?;
    assert_eq!(extraction.consolidated.len(), 1);
    assert_eq!(risk.stats.scored, 1);

    // identifiers stay text, leading zeros included
    let consolidated = store.read_table(&ctx.consolidated_table())?;
    assert_eq!(ids(&consolidated, "CESid"), vec!["001"]);
    assert_eq!(consolidated.rows()[0].get("Nota"), "control, hdl 50");
    assert_eq!(consolidated.rows()[0].get("Colesterol"), "230");

    let header = fs::read_to_string(ctx.risk_output_table())?;
    assert_eq!(
        header.lines().next(),
        Some(
            "Fecha,Nota,PA Sistólica,CESid,HDL,Colesterol,Apellido,Nombre,Sexo,Comunidad,FN_Ano,Diabetes,Hipertensión,ASCVD 10 year"
        )
    );

    let gaps = store.read_table(&ctx.gap_table())?;
    assert_eq!(ids(&gaps, "CesID"), vec!["002"]);
    assert_eq!(
        fs::read_to_string(ctx.stats_file())?,
        "Patients with DM or HTN but no cholesterol data: 1\n"
    );
    assert!(ctx.cohort_table().is_file());
    assert!(ctx.focus_consults_table().is_file());
    assert!(ctx.hdl_consults_table().is_file());
    Ok(())
}

#[test]
fn test_risk_stage_reads_extraction_output() -> lipid_cohort::Result<()> {
    let dir = TempDir::new()?;
    let ctx = test_context(dir.path(), TableFormat::Csv);
    let store = FileTableStore::new(2);
    store.write_table(&patients(), &ctx.patients_table())?;
    store.write_table(&consults(), &ctx.consults_table())?;

    ExtractionStage::new().run(&ctx, &store, &store)?;
    let output = RiskStage.run(&ctx, &store, &store)?;

    assert_eq!(output.scored.len(), 3);
    assert_eq!(output.stats.scored, 2);
    let table = store.read_table(&ctx.risk_output_table())?;
    assert_eq!(ids(&table, "CESid"), vec!["P1", "P4", "P5"]);
    Ok(())
}

#[test]
fn test_parquet_end_to_end() -> lipid_cohort::Result<()> {
    let dir = TempDir::new()?;
    let ctx = test_context(dir.path(), TableFormat::Parquet);
    let store = FileTableStore::from_config(ctx.config());
    store.write_table(&patients(), &ctx.patients_table())?;
    store.write_table(&consults(), &ctx.consults_table())?;

    let (extraction, risk) = run_pipeline(&ctx, &store, &store)?;
    assert_eq!(extraction.consolidated.len(), 3);
    assert_eq!(risk.stats.scored, 2);

    assert!(ctx.risk_output_table().to_string_lossy().ends_with("ascvd-output.parquet"));
    let output = store.read_table(&ctx.risk_output_table())?;
    assert_eq!(ids(&output, "CESid"), vec!["P1", "P4", "P5"]);
    Ok(())
}

#[test]
fn test_missing_input_directory() {
    let dir = TempDir::new().unwrap();
    let ctx = test_context(dir.path(), TableFormat::Csv);
    let store = FileTableStore::default();

    let err = ExtractionStage::new().run(&ctx, &store, &store).unwrap_err();
    assert!(matches!(
        err,
        PipelineError::MissingTable { ref path } if *path == ctx.patients_table()
    ));
    assert!(!ctx.consolidated_table().exists());
}
