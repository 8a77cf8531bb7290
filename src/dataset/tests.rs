// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use approx::assert_abs_diff_eq;
use tempfile::NamedTempFile;

use super::*;
use crate::retrieve::RetrievalMode;

fn series(label: &str, y: &[f64]) -> Series {
    let x = (0..y.len()).map(|i| i as f64).collect();
    Series::new(label, x, y.to_vec()).unwrap()
}

#[test]
fn test_series_lengths_must_match() {
    let result = Series::new("A", vec![0.0, 1.0], vec![1.0]);
    assert!(matches!(
        result,
        Err(DatasetError::UnequalLengths {
            x_len: 2,
            y_len: 1,
            ..
        })
    ));
}

#[test]
fn test_assemble_range() {
    let dataset = assemble_at(
        "Gain:*",
        RetrievalMode::Range,
        vec![series("A", &[1.0]), series("B", &[2.0])],
        0,
    )
    .unwrap();
    assert_eq!(dataset.name(), "dataset 'Gain:*'");
    assert_eq!(
        dataset.subname(),
        "generated at 1970-01-01 00:00:00 UTC (MJD 40587.5)"
    );
    assert_eq!(dataset.x_axis_label(), "Frequency");
    assert_eq!(dataset.x_axis_unit(), "(Hz)");
    assert_eq!(dataset.y_axis_label(), "Bandpass Gain");
    assert_eq!(dataset.y_axis_unit(), "");
    assert_eq!(dataset.labels().collect::<Vec<_>>(), ["A", "B"]);
}

#[test]
fn test_assemble_history() {
    let dataset = assemble_at(
        "Gain:*",
        RetrievalMode::History,
        vec![series("A", &[1.0, 2.0])],
        946_728_000_000,
    )
    .unwrap();
    assert_eq!(dataset.x_axis_label(), "Iteration");
    assert_eq!(dataset.x_axis_unit(), "");
    assert_eq!(dataset.y_axis_label(), "Value");
    assert_eq!(dataset.y_axis_unit(), "");
    assert!(dataset.subname().ends_with("(MJD 51544.5)"));
}

#[test]
fn test_assemble_empty() {
    let result = assemble("Gain:*", RetrievalMode::Range, vec![]);
    assert!(matches!(result, Err(DatasetError::Empty { name_filter }) if name_filter == "Gain:*"));
}

#[test]
fn test_assemble_drops_duplicate_labels() {
    let dataset = assemble_at(
        "*",
        RetrievalMode::Range,
        vec![series("A", &[1.0]), series("A", &[2.0]), series("B", &[3.0])],
        0,
    )
    .unwrap();
    assert_eq!(dataset.series().len(), 2);
    assert_abs_diff_eq!(dataset.get("A").unwrap().y_values()[0], 1.0);
}

#[test]
fn test_lookup_by_label() {
    let dataset = assemble_at(
        "*",
        RetrievalMode::Range,
        vec![series("A", &[1.0]), series("B", &[2.0])],
        0,
    )
    .unwrap();
    assert_eq!(dataset.position("B"), Some(1));
    assert!(dataset.contains("A"));
    assert!(!dataset.contains("C"));
    assert!(dataset.get("C").is_none());
}

#[test]
fn test_relabel() {
    let mut dataset = assemble_at(
        "*",
        RetrievalMode::Range,
        vec![series("A", &[1.0]), series("B", &[2.0]), series("C", &[3.0])],
        0,
    )
    .unwrap();

    // Swapping labels is fine, as only the final labels are checked.
    dataset
        .relabel(vec![(0, "B".to_string()), (1, "A".to_string())])
        .unwrap();
    assert_eq!(dataset.labels().collect::<Vec<_>>(), ["B", "A", "C"]);
    assert_abs_diff_eq!(dataset.get("A").unwrap().y_values(), [2.0].as_slice());

    let before = dataset.clone();
    let result = dataset.relabel(vec![(0, "D".to_string()), (2, "A".to_string())]);
    assert!(matches!(result, Err(DatasetError::DuplicateLabel(l)) if l == "A"));
    assert_eq!(dataset, before);
}

#[test]
fn test_json_round_trip_keeps_field_names() {
    let dataset = assemble_at(
        "Gain:*",
        RetrievalMode::Range,
        vec![series("A", &[1.5, 2.5])],
        0,
    )
    .unwrap();

    let mut buf = vec![];
    write_dataset(&dataset, &mut buf).unwrap();
    let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
    for key in [
        "name",
        "subname",
        "x_axis_label",
        "x_axis_unit",
        "y_axis_label",
        "y_axis_unit",
        "series",
    ] {
        assert!(value.get(key).is_some(), "missing key {key}");
    }
    let s = &value["series"][0];
    assert_eq!(s["label"], "A");
    assert_eq!(s["x_values"], serde_json::json!([0.0, 1.0]));
    assert_eq!(s["y_values"], serde_json::json!([1.5, 2.5]));

    let file = NamedTempFile::new().unwrap();
    std::fs::write(file.path(), &buf).unwrap();
    let read_back = read_dataset(file.path()).unwrap();
    assert_eq!(read_back, dataset);
}

#[test]
fn test_decoding_checks_invariants() {
    let bad_lengths = r#"{"name": "d", "subname": "", "x_axis_label": "", "x_axis_unit": "",
        "y_axis_label": "", "y_axis_unit": "",
        "series": [{"label": "A", "x_values": [0.0], "y_values": []}]}"#;
    assert!(serde_json::from_str::<Dataset>(bad_lengths).is_err());

    let dup_labels = r#"{"name": "d", "subname": "", "x_axis_label": "", "x_axis_unit": "",
        "y_axis_label": "", "y_axis_unit": "",
        "series": [{"label": "A", "x_values": [], "y_values": []},
                   {"label": "A", "x_values": [], "y_values": []}]}"#;
    let err = serde_json::from_str::<Dataset>(dup_labels).unwrap_err();
    assert!(err.to_string().contains("appears more than once"), "{err}");
}
