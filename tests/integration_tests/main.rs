// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Integration tests.
//!
//! Some help for laying out these tests was taken from:
//! https://matklad.github.io/2021/02/27/delete-cargo-integration-tests.html

mod dataset;
mod no_stderr;
mod transform;

use std::{
    path::{Path, PathBuf},
    process::Output,
    str::from_utf8,
};

use assert_cmd::{output::OutputError, Command};

use parmplot::Dataset;

fn parmplot() -> Command {
    Command::cargo_bin("parmplot").unwrap()
}

fn get_cmd_output(result: Result<Output, OutputError>) -> (String, String) {
    let output = match result {
        Ok(o) => o,
        Err(o) => o.as_output().unwrap().clone(),
    };
    (
        from_utf8(&output.stdout).unwrap().to_string(),
        from_utf8(&output.stderr).unwrap().to_string(),
    )
}

/// The parameter database inside the parmplot repo. It has 3 "Gain:*"
/// parameters and one "Phase:*" parameter.
fn get_parmdb() -> PathBuf {
    // Use absolute paths.
    let parmdb = PathBuf::from("test_files/parmdb.toml")
        .canonicalize()
        .unwrap();
    assert!(
        parmdb.exists(),
        "Could not find {}, which is required for this test",
        parmdb.display()
    );
    parmdb
}

/// Run "parmplot dataset" for all "Gain:0:0:*" parameters sampled at 5
/// frequencies over 0 to 10, writing to `output`.
fn make_gain_dataset(output: &Path) -> Dataset {
    let parmdb = get_parmdb();
    #[rustfmt::skip]
    let cmd = parmplot()
        .args([
            "dataset",
            "--parmdb", &format!("{}", parmdb.display()),
            "--constraints", "Gain:0:0:*", "0", "10", "5", "0", "1", "1", "",
            "--output", &format!("{}", output.display()),
        ])
        .ok();
    assert!(cmd.is_ok(), "dataset failed: {:?}", get_cmd_output(cmd));
    parmplot::dataset::read_dataset(output).unwrap()
}
