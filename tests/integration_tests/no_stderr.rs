// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Tests to ensure there is no stderr output for successful commands.

use tempfile::TempDir;

use crate::{get_cmd_output, get_parmdb, make_gain_dataset, parmplot};

#[test]
fn test_dataset_no_stderr() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let output = tmp_dir.path().join("gains.json");
    let parmdb = get_parmdb();

    #[rustfmt::skip]
    let cmd = parmplot()
        .args([
            "dataset",
            "--parmdb", &format!("{}", parmdb.display()),
            "--constraints", "Gain:*", "0", "10", "5", "0", "1", "1", "",
            "--output", &format!("{}", output.display()),
        ])
        .ok();
    assert!(
        cmd.is_ok(),
        "dataset failed on simple test data: {}",
        cmd.err().unwrap()
    );
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.is_empty(), "stderr wasn't empty: {stderr}");
}

#[test]
fn test_transform_no_stderr() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let file = tmp_dir.path().join("gains.json");
    make_gain_dataset(&file);

    #[rustfmt::skip]
    let cmd = parmplot()
        .args([
            "transform",
            &format!("{}", file.display()),
            "--op", "subtract-mean-all",
            "--op", "add-offset:1",
            "--op", "delete:not-a-series",
        ])
        .ok();
    assert!(
        cmd.is_ok(),
        "transform failed on simple test data: {}",
        cmd.err().unwrap()
    );
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.is_empty(), "stderr wasn't empty: {stderr}");
}
