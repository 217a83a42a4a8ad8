mod common;

use common::{REFERENCE_ROWS, candidate_table, candidate_table_edited, reference_table};
use datascore::{CompareConfig, compare, serialize_report};

#[test]
fn identical_inputs_serialize_to_identical_bytes() {
    let reference = reference_table(REFERENCE_ROWS);
    let candidate = candidate_table(REFERENCE_ROWS);
    let config = CompareConfig::default();

    let first = compare(&reference, &candidate, &config).expect("first run succeeds");
    let second = compare(&reference, &candidate, &config).expect("second run succeeds");

    assert_eq!(first, second);
    assert_eq!(
        serialize_report(&first).expect("serializes"),
        serialize_report(&second).expect("serializes")
    );
}

#[test]
fn zero_report_is_deterministic_too() {
    let reference = reference_table(100);
    let candidate = candidate_table_edited(100, |column, _, value| {
        if column == "gtin" || column == "dan" {
            String::new()
        } else {
            // Scramble everything else into non-unique noise.
            format!("x{}", value.len() % 3)
        }
    });
    let config = CompareConfig::default();

    let first = compare(&reference, &candidate, &config).expect("first run succeeds");
    let second = compare(&reference, &candidate, &config).expect("second run succeeds");

    assert_eq!(
        serialize_report(&first).expect("serializes"),
        serialize_report(&second).expect("serializes")
    );
}

#[test]
fn key_and_mapping_choices_are_stable_across_runs() {
    let reference = reference_table(REFERENCE_ROWS);
    let candidate = candidate_table(REFERENCE_ROWS);
    let config = CompareConfig::default();

    let baseline = compare(&reference, &candidate, &config).expect("baseline succeeds");
    for _ in 0..3 {
        let run = compare(&reference, &candidate, &config).expect("repeat succeeds");
        assert_eq!(run.key_match.candidates, baseline.key_match.candidates);
        assert_eq!(
            run.column_mapping.pair_candidates_top,
            baseline.column_mapping.pair_candidates_top
        );
        assert_eq!(run.column_mapping.mapping, baseline.column_mapping.mapping);
    }
}
