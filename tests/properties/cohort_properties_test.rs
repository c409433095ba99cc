use lipid_cohort::algorithm::{cohort_ids, filter_cohort};
use lipid_cohort::models::TableRow;
use lipid_cohort::{Patient, Record};
use proptest::prelude::*;

fn flag() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec!["true", "TRUE", "True", "false", "", "1", "si"])
}

proptest! {
    #[test]
    fn cohort_contains_exactly_flagged_patients(
        flags in prop::collection::vec((flag(), flag()), 0..40)
    ) {
        let patients: Vec<Patient> = flags
            .iter()
            .enumerate()
            .map(|(i, (dm, htn))| {
                let id = format!("P{i}");
                Patient::from_record(&Record::from([
                    ("CesID", id.as_str()),
                    ("Diabetes", *dm),
                    ("Hipertensión", *htn),
                ]))
            })
            .collect();

        let cohort = filter_cohort(&patients);
        let selected = cohort_ids(&cohort);

        for (patient, (dm, htn)) in patients.iter().zip(&flags) {
            let flagged = dm.eq_ignore_ascii_case("true") || htn.eq_ignore_ascii_case("true");
            prop_assert_eq!(selected.contains(patient.id.as_str()), flagged);
        }

        // order preserved
        let positions: Vec<usize> = cohort
            .iter()
            .map(|c| patients.iter().position(|p| p.id == c.id).unwrap_or(usize::MAX))
            .collect();
        prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }
}
