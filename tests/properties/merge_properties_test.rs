use lipid_cohort::schema::DateFormatConfig;
use lipid_cohort::{ConsolidatedRecord, merge_latest_per_patient};
use proptest::prelude::*;
use rustc_hash::FxHashSet;

fn date() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec![
        "2018-12-31",
        "2019-01-01",
        "2020-06-15",
        "15/06/2020",
        "",
        "sin fecha",
    ])
}

fn lab_value() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec!["", "", "40", "55", "190", "230"])
}

fn row() -> impl Strategy<Value = ConsolidatedRecord> {
    (0..6u8, date(), lab_value(), lab_value(), lab_value()).prop_map(|(id, date, hdl, tc, sbp)| {
        ConsolidatedRecord {
            patient_id: format!("P{id}"),
            date: date.to_string(),
            hdl: hdl.to_string(),
            total_cholesterol: tc.to_string(),
            systolic_bp: sbp.to_string(),
            ..Default::default()
        }
    })
}

proptest! {
    #[test]
    fn merged_identifiers_are_unique(rows in prop::collection::vec(row(), 0..60)) {
        let merged = merge_latest_per_patient(&rows, &DateFormatConfig::default());

        let merged_ids: Vec<&str> = merged.iter().map(|r| r.patient_id.as_str()).collect();
        let unique: FxHashSet<&str> = merged_ids.iter().copied().collect();
        prop_assert_eq!(unique.len(), merged_ids.len());

        let input_ids: FxHashSet<&str> = rows.iter().map(|r| r.patient_id.as_str()).collect();
        prop_assert_eq!(unique, input_ids);
    }

    #[test]
    fn merged_fields_come_from_contributing_rows(rows in prop::collection::vec(row(), 1..60)) {
        let merged = merge_latest_per_patient(&rows, &DateFormatConfig::default());

        for record in &merged {
            let contributing: Vec<&ConsolidatedRecord> =
                rows.iter().filter(|r| r.patient_id == record.patient_id).collect();

            let fields: [(&str, fn(&ConsolidatedRecord) -> &str); 4] = [
                ("date", |r| r.date.as_str()),
                ("hdl", |r| r.hdl.as_str()),
                ("total_cholesterol", |r| r.total_cholesterol.as_str()),
                ("systolic_bp", |r| r.systolic_bp.as_str()),
            ];
            for (name, get) in fields {
                let value = get(record);
                if value.is_empty() {
                    prop_assert!(
                        contributing.iter().all(|r| get(r).is_empty()),
                        "{} left empty although a contributing row has it", name
                    );
                } else {
                    prop_assert!(
                        contributing.iter().any(|r| get(r) == value),
                        "{} value {} not found in any contributing row", name, value
                    );
                }
            }
        }
    }
}
