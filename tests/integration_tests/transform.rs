// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Tests for the "transform" subcommand.

use approx::assert_abs_diff_eq;
use tempfile::TempDir;

use crate::{get_cmd_output, get_parmdb, make_gain_dataset, parmplot};
use parmplot::dataset::read_dataset;

const CS001: &str = "Gain:0:0:Real:CS001";
const CS002: &str = "Gain:0:0:Real:CS002";

#[test]
fn test_subtract_line() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let input = tmp_dir.path().join("gains.json");
    let output = tmp_dir.path().join("subtracted.json");
    make_gain_dataset(&input);

    #[rustfmt::skip]
    let cmd = parmplot()
        .args([
            "transform",
            &format!("{}", input.display()),
            "--op", &format!("subtract-line:{CS001}"),
            "--output", &format!("{}", output.display()),
        ])
        .ok();
    assert!(cmd.is_ok(), "transform failed: {:?}", get_cmd_output(cmd));

    let dataset = read_dataset(&output).unwrap();
    let source = dataset
        .get(&format!("{CS001} MINUS ({CS001})"))
        .expect("source series was relabelled");
    assert_abs_diff_eq!(source.y_values(), &[0.0; 5][..]);
    let other = dataset.get(&format!("{CS002} MINUS ({CS001})")).unwrap();
    assert_abs_diff_eq!(other.y_values(), &[0.5, -0.5, -1.5, -2.5, -3.5][..]);

    // The input is untouched when an output is given.
    let input = read_dataset(&input).unwrap();
    assert!(input.contains(CS001));
}

#[test]
fn test_subtract_mean_all_in_place() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let file = tmp_dir.path().join("gains.json");
    make_gain_dataset(&file);

    let cmd = parmplot()
        .args([
            "transform",
            &format!("{}", file.display()),
            "--op",
            "subtract-mean-all",
        ])
        .ok();
    assert!(cmd.is_ok(), "transform failed: {:?}", get_cmd_output(cmd));

    let dataset = read_dataset(&file).unwrap();
    assert_eq!(dataset.series().len(), 2);
    let cs001 = dataset
        .get(&format!("{CS001} MINUS mean(all values)"))
        .unwrap();
    assert_abs_diff_eq!(cs001.y_values(), &[-0.25, 0.25, 0.75, 1.25, 1.75][..]);
    let cs002 = dataset
        .get(&format!("{CS002} MINUS mean(all values)"))
        .unwrap();
    assert_abs_diff_eq!(cs002.y_values(), &[0.25, -0.25, -0.75, -1.25, -1.75][..]);
}

#[test]
fn test_offset_round_trip() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let input = tmp_dir.path().join("gains.json");
    let output = tmp_dir.path().join("round_trip.json");
    let original = make_gain_dataset(&input);

    #[rustfmt::skip]
    let cmd = parmplot()
        .args([
            "transform",
            &format!("{}", input.display()),
            "-x", "add-offset:0.5",
            "-x", "remove-offset:0.5",
            "-o", &format!("{}", output.display()),
        ])
        .ok();
    assert!(cmd.is_ok(), "transform failed: {:?}", get_cmd_output(cmd));
    assert_eq!(read_dataset(&output).unwrap(), original);
}

#[test]
fn test_add_from_parmdb() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let file = tmp_dir.path().join("gains.json");
    make_gain_dataset(&file);
    let parmdb = get_parmdb();

    #[rustfmt::skip]
    let cmd = parmplot()
        .args([
            "transform",
            &format!("{}", file.display()),
            "--parmdb", &format!("{}", parmdb.display()),
            "--op", "add:Gain:*,0,10,5,0,1,1,",
        ])
        .ok();
    assert!(cmd.is_ok(), "transform failed: {:?}", get_cmd_output(cmd));

    // Only the new gain is added; the others were already there.
    let dataset = read_dataset(&file).unwrap();
    assert_eq!(
        dataset.labels().collect::<Vec<_>>(),
        vec![CS001, CS002, "Gain:1:1:Real:CS001"]
    );
    assert_eq!(dataset.name(), "dataset 'Gain:0:0:*'");
    let new = dataset.get("Gain:1:1:Real:CS001").unwrap();
    assert_abs_diff_eq!(new.y_values(), &[1.0, 3.0, 5.0, 7.0, 9.0][..]);
}

#[test]
fn test_add_without_parmdb() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let file = tmp_dir.path().join("gains.json");
    let original = make_gain_dataset(&file);

    let cmd = parmplot()
        .args([
            "transform",
            &format!("{}", file.display()),
            "--op",
            "add:Gain:*,0,10,5,0,1,1,",
        ])
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("no parameter database"), "{stderr}");
    assert_eq!(read_dataset(&file).unwrap(), original);
}

#[test]
fn test_missing_label_strictness() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let file = tmp_dir.path().join("gains.json");
    let original = make_gain_dataset(&file);

    // Ignored by default.
    let cmd = parmplot()
        .args([
            "transform",
            &format!("{}", file.display()),
            "--op",
            "subtract-line:not-a-series",
        ])
        .ok();
    assert!(cmd.is_ok(), "transform failed: {:?}", get_cmd_output(cmd));
    assert_eq!(read_dataset(&file).unwrap(), original);

    // An error when strict.
    let cmd = parmplot()
        .args([
            "transform",
            &format!("{}", file.display()),
            "--strict",
            "--op",
            "subtract-line:not-a-series",
        ])
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("not-a-series"), "{stderr}");
}

#[test]
fn test_bad_operations() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let file = tmp_dir.path().join("gains.json");
    make_gain_dataset(&file);

    let cmd = parmplot()
        .args(["transform", &format!("{}", file.display()), "--op", "rotate"])
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("Unknown operation 'rotate'"), "{stderr}");

    let cmd = parmplot()
        .args([
            "transform",
            &format!("{}", file.display()),
            "--op",
            "add-offset:lots",
        ])
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("a finite number"), "{stderr}");

    let cmd = parmplot()
        .args(["transform", &format!("{}", file.display())])
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("No operations"), "{stderr}");
}

#[test]
fn test_label_collision_leaves_file_untouched() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let file = tmp_dir.path().join("gains.json");
    let original = make_gain_dataset(&file);
    let parmdb = get_parmdb();

    // Re-adding CS001 after its mean was subtracted, then subtracting the mean
    // again, would give two series the same label.
    #[rustfmt::skip]
    let cmd = parmplot()
        .args([
            "transform",
            &format!("{}", file.display()),
            "--parmdb", &format!("{}", parmdb.display()),
            "--op", &format!("subtract-mean-line:{CS001}"),
            "--op", "add:Gain:0:0:*,0,10,5,0,1,1,",
            "--op", &format!("subtract-mean-line:{CS001}"),
        ])
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(
        stderr.contains(&format!("'{CS001} MINUS mean(all values)'")),
        "{stderr}"
    );
    assert_eq!(read_dataset(&file).unwrap(), original);
}
