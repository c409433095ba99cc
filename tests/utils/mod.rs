//! Shared fixtures for the integration tests

use std::path::Path;

use lipid_cohort::{PipelineConfig, Record, StudyContext, Table, TableFormat};

/// Community used by the fixtures
pub const COMMUNITY: &str = "Salitre";

/// Patient table header, with a column the pipeline does not use
pub const PATIENT_COLUMNS: [&str; 9] = [
    "CesID",
    "Apellido",
    "Nombre",
    "Sexo",
    "Comunidad",
    "FN_Ano",
    "Diabetes",
    "Hipertensión",
    "Telefono",
];

/// Consult table header, with a column the pipeline does not use
pub const CONSULT_COLUMNS: [&str; 7] = [
    "CESid",
    "Fecha",
    "Nota",
    "PA Sistólica",
    "HDL",
    "Colesterol",
    "Medico",
];

fn columns(names: &[&str]) -> Vec<String> {
    names.iter().map(ToString::to_string).collect()
}

/// A patient row
pub fn patient(
    id: &str,
    sex: &str,
    birth_year: &str,
    diabetes: &str,
    hypertension: &str,
) -> Record {
    Record::from([
        ("CesID", id),
        ("Apellido", "Lopez"),
        ("Nombre", id),
        ("Sexo", sex),
        ("Comunidad", COMMUNITY),
        ("FN_Ano", birth_year),
        ("Diabetes", diabetes),
        ("Hipertensión", hypertension),
        ("Telefono", "555-0100"),
    ])
}

/// A consult row
pub fn consult(
    id: &str,
    date: &str,
    note: &str,
    sbp: &str,
    hdl: &str,
    cholesterol: &str,
) -> Record {
    Record::from([
        ("CESid", id),
        ("Fecha", date),
        ("Nota", note),
        ("PA Sistólica", sbp),
        ("HDL", hdl),
        ("Colesterol", cholesterol),
        ("Medico", "Dra. Ruiz"),
    ])
}

/// Patient table of the reference scenario
///
/// * `P1` diabetic male with two dated consults
/// * `P2` hypertensive female whose only consult has no HDL evidence
/// * `P3` without either condition
/// * `P4` diabetic female too young for the risk equations, HDL mentioned without a value
/// * `P5` hypertensive male whose latest consult has a malformed date
pub fn patients() -> Table {
    Table::with_rows(
        "Pacientes",
        columns(&PATIENT_COLUMNS),
        vec![
            patient("P1", "1", "1965", "true", "false"),
            patient("P2", "2", "1950", "false", "true"),
            patient("P3", "1", "1960", "false", "false"),
            patient("P4", "2", "1990", "TRUE", "false"),
            patient("P5", "1", "1958", "", "true"),
        ],
    )
}

/// Consult table of the reference scenario
pub fn consults() -> Table {
    Table::with_rows(
        "Consultas",
        columns(&CONSULT_COLUMNS),
        vec![
            consult("P1", "2019-01-10", "Paciente refiere hdl: 45, col total 230", "140", "", ""),
            consult("P2", "2019-03-02", "consulta de rutina", "150", "", ""),
            consult("P3", "2019-04-01", "hdl 60", "120", "", ""),
            consult("P1", "2020-02-01", "control, hdl 50", "", "", ""),
            consult("P4", "2020-05-05", "solicitar hdl", "118", "", ""),
            consult("P5", "2021-05-01", "laboratorio", "135", "40", "190"),
            consult("P5", "fecha?", "hdl: 42", "", "", ""),
        ],
    )
}

/// Configuration rooted in `root`, progress bars off and a fixed reference year
pub fn test_config(root: &Path, format: TableFormat) -> PipelineConfig {
    PipelineConfig {
        input_dir: root.join("Input CSVs"),
        intermediates_dir: root.join("Intermediates"),
        output_dir: root.join("Output"),
        table_format: format,
        show_progress: false,
        reference_year: Some(2020),
        ..PipelineConfig::default()
    }
}

/// Context of the fixture community
pub fn test_context(root: &Path, format: TableFormat) -> StudyContext {
    test_config(root, format)
        .context(COMMUNITY)
        .expect("fixture community is valid")
}

/// Identifier column of consolidated rows
pub fn ids(table: &Table, column: &str) -> Vec<String> {
    table.rows().iter().map(|r| r.get(column).to_string()).collect()
}
