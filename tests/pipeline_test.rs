//! Integration tests for voltrec
//!
//! These tests verify the full pipeline from CSV loading to artifact output.

use std::fs;
use std::path::PathBuf;

use tempfile::tempdir;
use voltrec::prelude::*;

const HEADER: &str = "id,Contaminant m/z,Ion adduct,\"Structural\nIdentity\n(if available)\",relative_20v,20v,relative_40v,40v,relative_60v,60v";

fn write_table(dir: &std::path::Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, format!("{HEADER}\n{body}")).unwrap();
    path
}

/// The canonical single-row example: missing identity, two peaks per cell
/// at 20 V, one peak per cell at 40 V and 60 V.
const EXAMPLE_ROW: &str = "C1,100.5,[M+H]+,,\"[1,10][2,20]\",\"[1,100][2,200]\",\"[3,30]\",\"[3,300]\",\"[5,50]\",\"[5,500]\"";

#[test]
fn test_end_to_end_expansion() {
    let dir = tempdir().unwrap();
    let path = write_table(dir.path(), "eppendorf_ref.csv", EXAMPLE_ROW);

    let table = SourceTable::from_path(&path).unwrap();
    let records = expand(&table).unwrap();

    assert_eq!(records.len(), 3);

    let record = &records[0];
    assert_eq!(record.id, "C1_20V");
    assert_eq!(record.contaminant, "C1");
    assert_eq!(record.precursor_mz, 100.5);
    assert_eq!(record.adduct, "[M+H]+");
    assert_eq!(record.structural_identity, UNKNOWN_IDENTITY);
    assert_eq!(record.peaks, vec![[1.0, 10.0], [2.0, 20.0]]);
    assert_eq!(record.absolute_peaks, vec![[1.0, 100.0], [2.0, 200.0]]);

    assert_eq!(records[1].id, "C1_40V");
    assert_eq!(records[1].peaks, vec![[3.0, 30.0]]);
    assert_eq!(records[2].id, "C1_60V");
    assert_eq!(records[2].absolute_peaks, vec![[5.0, 500.0]]);
}

#[test]
fn test_three_records_per_row_in_order() {
    let dir = tempdir().unwrap();
    let body = "C1,1.5,[M+H]+,A,,,,,,\nC2,2.5,[M+Na]+,B,,,,,,";
    let path = write_table(dir.path(), "table.csv", body);

    let table = SourceTable::from_path(&path).unwrap();
    let records = expand(&table).unwrap();

    let ids: Vec<_> = records.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(
        ids,
        ["C1_20V", "C1_40V", "C1_60V", "C2_20V", "C2_40V", "C2_60V"]
    );
}

#[test]
fn test_corrupt_peak_cell_degrades_gracefully() {
    let dir = tempdir().unwrap();
    let body = "C1,1.5,[M+H]+,A,\"[1.0,2.0][bad][3.0,4.0]\",\"garbage\",,,,";
    let path = write_table(dir.path(), "table.csv", body);

    let table = SourceTable::from_path(&path).unwrap();
    let records = expand(&table).unwrap();

    assert_eq!(records[0].peaks, vec![[1.0, 2.0], [3.0, 4.0]]);
    assert!(records[0].absolute_peaks.is_empty());
}

#[test]
fn test_sentinel_shared_across_all_voltages() {
    let dir = tempdir().unwrap();
    let path = write_table(dir.path(), "table.csv", EXAMPLE_ROW);

    let table = SourceTable::from_path(&path).unwrap();
    let records = expand(&table).unwrap();

    assert!(records
        .iter()
        .all(|r| r.structural_identity == UNKNOWN_IDENTITY));
}

#[test]
fn test_artifact_output_shape() {
    let dir = tempdir().unwrap();
    let table_path = write_table(dir.path(), "eppendorf_ref.csv", EXAMPLE_ROW);
    let output_path = dir.path().join("output_data.py");

    let table = SourceTable::from_path(&table_path).unwrap();
    let records = expand(&table).unwrap();

    let mut artifact = Artifact::new();
    artifact.push("eppendorf", &records).unwrap();
    artifact.write_to(&output_path).unwrap();

    let content = fs::read_to_string(&output_path).unwrap();
    assert!(content.starts_with("eppendorf = ["));
    assert!(content.ends_with("]\n\n"));
    assert!(content.contains("\"id\": \"C1_20V\""));
    assert!(content.contains("\"Structural Identity\": \"unknown Compound\""));

    // Stable key order within a record
    let id_pos = content.find("\"id\"").unwrap();
    let contaminant_pos = content.find("\"Contaminant\"").unwrap();
    let peaks_pos = content.find("\"peaks\"").unwrap();
    let absolute_pos = content.find("\"absolute_peaks\"").unwrap();
    assert!(id_pos < contaminant_pos);
    assert!(contaminant_pos < peaks_pos);
    assert!(peaks_pos < absolute_pos);
}

#[test]
fn test_multiple_sources_in_one_artifact() {
    let dir = tempdir().unwrap();
    let first = write_table(dir.path(), "eppendorf_ref.csv", EXAMPLE_ROW);
    let second = write_table(
        dir.path(),
        "glass_ref.csv",
        "G1,250.25,[M-H]-,Siloxane,\"[9,90]\",\"[9,900]\",,,,",
    );
    let output_path = dir.path().join("output_data.py");

    let mut artifact = Artifact::new();
    for (path, name) in [(&first, "eppendorf"), (&second, "glassware")] {
        let table = SourceTable::from_path(path).unwrap();
        let records = expand(&table).unwrap();
        artifact.push(name, &records).unwrap();
    }
    artifact.write_to(&output_path).unwrap();

    let content = fs::read_to_string(&output_path).unwrap();
    let eppendorf_pos = content.find("eppendorf = [").unwrap();
    let glassware_pos = content.find("glassware = [").unwrap();
    assert!(eppendorf_pos < glassware_pos);
    assert!(content.contains("\"id\": \"G1_20V\""));
}

#[test]
fn test_rerun_overwrites_instead_of_appending() {
    let dir = tempdir().unwrap();
    let table_path = write_table(dir.path(), "eppendorf_ref.csv", EXAMPLE_ROW);
    let output_path = dir.path().join("output_data.py");

    let run = || {
        let table = SourceTable::from_path(&table_path).unwrap();
        let records = expand(&table).unwrap();
        let mut artifact = Artifact::new();
        artifact.push("eppendorf", &records).unwrap();
        artifact.write_to(&output_path).unwrap();
        fs::read_to_string(&output_path).unwrap()
    };

    let first = run();
    let second = run();
    assert_eq!(first, second);
    assert_eq!(second.matches("eppendorf = ").count(), 1);
}

#[test]
fn test_schema_error_aborts_run() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("broken.csv");
    fs::write(&path, "id,Ion adduct\nC1,[M+H]+").unwrap();

    let result = SourceTable::from_path(&path);
    assert!(matches!(result, Err(TableError::MissingColumn(_))));
}

// ============================================================================
// Property-Based Tests
// ============================================================================

mod property_tests {
    use proptest::prelude::*;
    use voltrec::peaks::parse_peak_list;

    proptest! {
        /// Well-formed pair text always parses completely and exactly.
        #[test]
        fn test_well_formed_pairs_round_trip(
            pairs in prop::collection::vec((0.0f64..10_000.0, 0.0f64..1.0e6), 0..50)
        ) {
            let text: String = pairs.iter().map(|(x, y)| format!("[{x},{y}]")).collect();
            let parsed = parse_peak_list(&text).unwrap();

            prop_assert_eq!(parsed.len(), pairs.len());
            for ((x, y), (px, py)) in pairs.iter().zip(parsed.iter()) {
                prop_assert_eq!(x, px);
                prop_assert_eq!(y, py);
            }
        }

        /// Injected whitespace never changes the parse result.
        #[test]
        fn test_whitespace_injection_is_neutral(
            pairs in prop::collection::vec((0.0f64..10_000.0, 0.0f64..1.0e6), 1..20)
        ) {
            let compact: String = pairs.iter().map(|(x, y)| format!("[{x},{y}]")).collect();
            let spaced: String = pairs
                .iter()
                .map(|(x, y)| format!("[ {x} ,\n  {y} ]\r\n"))
                .collect();

            prop_assert_eq!(
                parse_peak_list(&compact).unwrap(),
                parse_peak_list(&spaced).unwrap()
            );
        }

        /// Alphabetic junk between pairs is discarded without affecting them.
        #[test]
        fn test_junk_between_pairs_is_ignored(
            pairs in prop::collection::vec((0.0f64..10_000.0, 0.0f64..1.0e6), 1..20),
            junk in prop::collection::vec("[a-z]{0,6}", 1..20)
        ) {
            let clean: String = pairs.iter().map(|(x, y)| format!("[{x},{y}]")).collect();
            let dirty: String = pairs
                .iter()
                .zip(junk.iter().cycle())
                .map(|((x, y), j)| format!("{j}[{x},{y}]"))
                .collect();

            prop_assert_eq!(
                parse_peak_list(&clean).unwrap(),
                parse_peak_list(&dirty).unwrap()
            );
        }

        /// Parsing is a pure function of its input.
        #[test]
        fn test_parse_is_pure(text in "[\\[\\],0-9a-z. \n+-]{0,80}") {
            let first = parse_peak_list(&text).unwrap();
            let second = parse_peak_list(&text).unwrap();
            prop_assert_eq!(first, second);
        }
    }
}
