//! Record Codec Format Tests
//!
//! Covers the on-disk contract of the flat-file codec:
//! - round trip, with floats rounded to two decimals
//! - append order is decode order
//! - list fields keep their elements and order
//! - a missing file decodes as empty
//! - a trailing block without `end` is ignored
//! - clear plus re-append replaces the file contents

use gymtracker::codec::{self, CodecError, LineFault, Record, RecordReader};
use gymtracker::records::{Exercise, TrainingSet};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

// =============================================================================
// Test Utilities
// =============================================================================

fn bench_press() -> Exercise {
    Exercise::new(
        "Bench Press",
        vec!["chest".into()],
        vec!["triceps".into(), "shoulders".into()],
        "push",
    )
}

fn exercise(name: &str) -> Exercise {
    Exercise::new(name, vec!["legs".into()], Vec::new(), "legs")
}

fn data_file(dir: &TempDir, name: &str) -> PathBuf {
    dir.path().join(name)
}

// =============================================================================
// Encoding
// =============================================================================

#[test]
fn test_exercise_block_is_exact() {
    let temp_dir = TempDir::new().unwrap();
    let path = data_file(&temp_dir, "exercises.txt");

    codec::append(&path, &bench_press()).unwrap();

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "name:\"Bench Press\"\n\
         primaryMuscles:[\"chest\"]\n\
         secondaryMuscles:[\"triceps\",\"shoulders\"]\n\
         type:\"push\"\n\
         end\n"
    );
}

#[test]
fn test_schema_lists_fields_in_file_order() {
    let names: Vec<&str> = Exercise::SCHEMA.fields.iter().map(|f| f.name).collect();
    assert_eq!(names, ["name", "primaryMuscles", "secondaryMuscles", "type"]);

    let names: Vec<&str> = TrainingSet::SCHEMA.fields.iter().map(|f| f.name).collect();
    assert_eq!(names, ["date", "exercise", "weight", "reps"]);
}

// =============================================================================
// Round Trip
// =============================================================================

#[test]
fn test_round_trip_exercise() {
    let temp_dir = TempDir::new().unwrap();
    let path = data_file(&temp_dir, "exercises.txt");

    codec::append(&path, &bench_press()).unwrap();

    let decoded: Vec<Exercise> = codec::decode(&path).unwrap();
    assert_eq!(decoded, vec![bench_press()]);
}

#[test]
fn test_round_trip_rounds_weight_to_two_decimals() {
    let temp_dir = TempDir::new().unwrap();
    let path = data_file(&temp_dir, "sets.txt");

    codec::append(&path, &TrainingSet::new("2024-05-01", "Squat", 82.456, 5)).unwrap();

    let decoded: Vec<TrainingSet> = codec::decode(&path).unwrap();
    assert_eq!(decoded.len(), 1);
    assert_eq!(decoded[0].weight, 82.46);
    assert_eq!(decoded[0].reps, 5);
    assert!(fs::read_to_string(&path).unwrap().contains("weight:82.46\n"));
}

#[test]
fn test_round_trip_empty_lists() {
    let temp_dir = TempDir::new().unwrap();
    let path = data_file(&temp_dir, "exercises.txt");
    let plank = Exercise::new("Plank", Vec::new(), Vec::new(), "core");

    codec::append(&path, &plank).unwrap();

    assert!(fs::read_to_string(&path)
        .unwrap()
        .contains("primaryMuscles:[]\nsecondaryMuscles:[]\n"));
    let decoded: Vec<Exercise> = codec::decode(&path).unwrap();
    assert_eq!(decoded, vec![plank]);
}

#[test]
fn test_order_preserved_across_appends() {
    let temp_dir = TempDir::new().unwrap();
    let path = data_file(&temp_dir, "exercises.txt");

    for name in ["R1", "R2", "R3"] {
        codec::append(&path, &exercise(name)).unwrap();
    }

    let names: Vec<String> = codec::decode::<Exercise>(&path)
        .unwrap()
        .into_iter()
        .map(|e| e.name)
        .collect();
    assert_eq!(names, vec!["R1", "R2", "R3"]);
}

#[test]
fn test_list_multiplicity_fidelity() {
    let temp_dir = TempDir::new().unwrap();
    let path = data_file(&temp_dir, "exercises.txt");
    let exercise = Exercise::new(
        "Dip",
        vec!["triceps".into()],
        vec!["chest".into(), "triceps".into()],
        "push",
    );

    codec::append(&path, &exercise).unwrap();

    assert!(fs::read_to_string(&path)
        .unwrap()
        .contains("secondaryMuscles:[\"chest\",\"triceps\"]\n"));
    let decoded: Vec<Exercise> = codec::decode(&path).unwrap();
    assert_eq!(decoded[0].secondary_muscles, vec!["chest", "triceps"]);
}

// =============================================================================
// Missing And Incomplete Data
// =============================================================================

#[test]
fn test_absent_file_decodes_empty() {
    let temp_dir = TempDir::new().unwrap();
    let decoded: Vec<Exercise> = codec::decode(&data_file(&temp_dir, "nope.txt")).unwrap();
    assert!(decoded.is_empty());
}

#[test]
fn test_truncated_trailing_block_excluded() {
    let temp_dir = TempDir::new().unwrap();
    let path = data_file(&temp_dir, "exercises.txt");

    codec::append(&path, &exercise("Complete")).unwrap();
    let mut contents = fs::read_to_string(&path).unwrap();
    contents.push_str("name:\"Partial\"\nprimaryMuscles:[\"legs\"]\n");
    fs::write(&path, contents).unwrap();

    let decoded: Vec<Exercise> = codec::decode(&path).unwrap();
    assert_eq!(decoded, vec![exercise("Complete")]);
}

#[test]
fn test_append_cut_off_mid_line_excluded() {
    let temp_dir = TempDir::new().unwrap();
    let path = data_file(&temp_dir, "exercises.txt");

    codec::append(&path, &exercise("A")).unwrap();
    codec::append(&path, &exercise("B")).unwrap();
    let mut contents = fs::read_to_string(&path).unwrap();
    contents.push_str("name:\"Par");
    fs::write(&path, contents).unwrap();

    let decoded: Vec<Exercise> = codec::decode(&path).unwrap();
    assert_eq!(decoded, vec![exercise("A"), exercise("B")]);
}

#[test]
fn test_malformed_line_aborts_decode() {
    let temp_dir = TempDir::new().unwrap();
    let path = data_file(&temp_dir, "sets.txt");
    fs::write(
        &path,
        "date:\"d1\"\nexercise:\"Squat\"\nweight:80.00\nreps:five\nend\n",
    )
    .unwrap();

    match codec::decode::<TrainingSet>(&path) {
        Err(CodecError::MalformedLine {
            line_number: 4,
            fault: LineFault::InvalidScalar { .. },
            ..
        }) => {}
        other => panic!("expected malformed line 4, got {:?}", other),
    }
}

#[test]
fn test_each_decode_rereads_from_start() {
    let temp_dir = TempDir::new().unwrap();
    let path = data_file(&temp_dir, "exercises.txt");
    codec::append(&path, &exercise("A")).unwrap();

    let mut reader = RecordReader::<Exercise>::open(&path).unwrap();
    assert!(reader.read_next().unwrap().is_some());
    assert!(reader.read_next().unwrap().is_none());

    assert_eq!(codec::decode::<Exercise>(&path).unwrap().len(), 1);
    assert_eq!(codec::decode::<Exercise>(&path).unwrap().len(), 1);
}

// =============================================================================
// Rewrite
// =============================================================================

#[test]
fn test_clear_then_reappend_simulates_delete() {
    let temp_dir = TempDir::new().unwrap();
    let path = data_file(&temp_dir, "exercises.txt");

    for name in ["A", "B", "C"] {
        codec::append(&path, &exercise(name)).unwrap();
    }

    codec::clear(&path).unwrap();
    codec::append(&path, &exercise("A")).unwrap();
    codec::append(&path, &exercise("C")).unwrap();

    let decoded: Vec<Exercise> = codec::decode(&path).unwrap();
    assert_eq!(decoded, vec![exercise("A"), exercise("C")]);
}

#[test]
fn test_rewrite_reports_every_record() {
    let temp_dir = TempDir::new().unwrap();
    let path = data_file(&temp_dir, "exercises.txt");

    for name in ["A", "B", "C"] {
        codec::append(&path, &exercise(name)).unwrap();
    }

    let survivors = vec![exercise("A"), exercise("C")];
    let report = codec::rewrite(&path, &survivors).unwrap();
    assert_eq!(report.written, 2);
    assert!(report.is_complete());

    let decoded: Vec<Exercise> = codec::decode(&path).unwrap();
    assert_eq!(decoded, survivors);
}
