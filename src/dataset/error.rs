// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Errors associated with datasets.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("No series were retrieved for '{name_filter}'; can't make an empty dataset")]
    Empty { name_filter: String },

    #[error("Series '{label}' has {x_len} x values but {y_len} y values")]
    UnequalLengths {
        label: String,
        x_len: usize,
        y_len: usize,
    },

    #[error("The series label '{0}' appears more than once in the dataset")]
    DuplicateLabel(String),

    #[error("Couldn't decode dataset from '{}': {source}", file.display())]
    Json {
        file: PathBuf,
        source: serde_json::Error,
    },

    #[error("Couldn't encode dataset: {0}")]
    Encode(#[source] serde_json::Error),

    #[error(transparent)]
    IO(#[from] std::io::Error),
}
