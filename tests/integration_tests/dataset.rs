// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Tests for the "dataset" subcommand.

use std::io::Write;

use approx::assert_abs_diff_eq;
use tempfile::TempDir;

use crate::{get_cmd_output, get_parmdb, make_gain_dataset, parmplot};
use parmplot::dataset::read_dataset;

#[test]
fn test_range_dataset() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let output = tmp_dir.path().join("gains.json");
    let dataset = make_gain_dataset(&output);

    assert_eq!(dataset.name(), "dataset 'Gain:0:0:*'");
    assert!(dataset.subname().starts_with("generated at "));
    assert!(dataset.subname().contains("(MJD "));
    assert_eq!(dataset.x_axis_label(), "Frequency");
    assert_eq!(dataset.x_axis_unit(), "(Hz)");
    assert_eq!(dataset.y_axis_label(), "Bandpass Gain");
    assert_eq!(
        dataset.labels().collect::<Vec<_>>(),
        vec!["Gain:0:0:Real:CS001", "Gain:0:0:Real:CS002"]
    );

    let cs001 = dataset.get("Gain:0:0:Real:CS001").unwrap();
    assert_abs_diff_eq!(cs001.x_values(), &[1.0, 3.0, 5.0, 7.0, 9.0][..]);
    assert_abs_diff_eq!(cs001.y_values(), &[1.5, 2.5, 3.5, 4.5, 5.5][..]);
    let cs002 = dataset.get("Gain:0:0:Real:CS002").unwrap();
    assert_abs_diff_eq!(cs002.y_values(), &[2.0; 5][..]);
}

#[test]
fn test_history_dataset() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let output = tmp_dir.path().join("history.json");
    let parmdb = get_parmdb();

    #[rustfmt::skip]
    let cmd = parmplot()
        .args([
            "dataset",
            "--parmdb", &format!("{}", parmdb.display()),
            "--constraints", "Gain:0:0:*", "0", "10", "1", "0", "2", "1", "History",
            "--output", &format!("{}", output.display()),
        ])
        .ok();
    assert!(cmd.is_ok(), "dataset failed: {:?}", get_cmd_output(cmd));

    let dataset = read_dataset(&output).unwrap();
    assert_eq!(dataset.x_axis_label(), "Iteration");
    assert_eq!(dataset.y_axis_label(), "Value");
    assert_eq!(
        dataset.labels().collect::<Vec<_>>(),
        vec![
            "History - Gain:0:0:Real:CS001",
            "History - Gain:0:0:Real:CS002"
        ]
    );
    // Only solutions in the solve-time window [0, 2] are kept.
    let cs001 = dataset.get("History - Gain:0:0:Real:CS001").unwrap();
    assert_abs_diff_eq!(cs001.x_values(), &[0.0, 1.0][..]);
    assert_abs_diff_eq!(cs001.y_values(), &[1.0, 1.1][..]);
}

#[test]
fn test_dataset_from_arg_file() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let output = tmp_dir.path().join("phase.json");
    let arg_file = tmp_dir.path().join("args.toml");
    let mut f = std::fs::File::create(&arg_file).unwrap();
    writeln!(f, "output = {:?}", output.display().to_string()).unwrap();
    writeln!(f, "[retrieve]").unwrap();
    writeln!(f, "parmdb = {:?}", get_parmdb().display().to_string()).unwrap();
    writeln!(f, "name_filter = \"Phase:*\"").unwrap();
    writeln!(f, "x_start = 100.0").unwrap();
    writeln!(f, "x_end = 120.0").unwrap();
    writeln!(f, "x_count = 2").unwrap();
    writeln!(f, "y_start = 0.0").unwrap();
    writeln!(f, "y_end = 4.0").unwrap();
    writeln!(f, "y_count = 1").unwrap();
    drop(f);

    // The CLI label prefix is used alongside the file's arguments.
    #[rustfmt::skip]
    let cmd = parmplot()
        .args([
            "dataset",
            &format!("{}", arg_file.display()),
            "--label-prefix", "CS001 phase",
        ])
        .ok();
    assert!(cmd.is_ok(), "dataset failed: {:?}", get_cmd_output(cmd));

    let dataset = read_dataset(&output).unwrap();
    assert_eq!(
        dataset.labels().collect::<Vec<_>>(),
        vec!["CS001 phase - Phase:CS001"]
    );
    // The phase is linear in y only; every x sample is at y = 2.
    let phase = &dataset.series()[0];
    assert_abs_diff_eq!(phase.x_values(), &[105.0, 115.0][..]);
    assert_abs_diff_eq!(phase.y_values(), &[2.0, 2.0][..]);
}

#[test]
fn test_no_matching_parameters() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let output = tmp_dir.path().join("none.json");
    let parmdb = get_parmdb();

    #[rustfmt::skip]
    let cmd = parmplot()
        .args([
            "dataset",
            "--parmdb", &format!("{}", parmdb.display()),
            "--constraints", "Clock:*", "0", "10", "5", "0", "1", "1", "",
            "--output", &format!("{}", output.display()),
        ])
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("Clock:*"), "{stderr}");
    assert!(!output.exists());
}

#[test]
fn test_zero_count_is_rejected() {
    let parmdb = get_parmdb();

    #[rustfmt::skip]
    let cmd = parmplot()
        .args([
            "dataset",
            "--parmdb", &format!("{}", parmdb.display()),
            "--constraints", "Gain:*", "0", "10", "0", "0", "1", "1", "",
        ])
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("x count"), "{stderr}");
    assert!(stderr.contains("NAME_FILTER"), "{stderr}");
}
