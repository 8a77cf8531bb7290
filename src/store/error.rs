// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Errors associated with parameter stores.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParmStoreError {
    #[error("'{pattern}' is not a valid parameter name pattern: {source}")]
    Pattern {
        pattern: String,
        source: glob::PatternError,
    },

    #[error("Parameter '{0}' doesn't exist in the parameter store")]
    UnknownParm(String),

    #[error("Parameter '{name}' has {got} coefficient rows of unequal length; every row needs {expected} columns")]
    RaggedCoeffs {
        name: String,
        expected: usize,
        got: usize,
    },

    #[error("Parameter '{name}' has a zero {axis} scale")]
    ZeroScale { name: String, axis: &'static str },

    #[error("Parameter '{0}' appears more than once in the parameter store")]
    DuplicateParm(String),

    #[error(
        "Parameter database '{}' doesn't have a recognised file extension! Valid extensions are: {}",
        .0.display(),
        *super::PARMDB_FILE_TYPES_COMMA_SEPARATED
    )]
    UnsupportedExt(PathBuf),

    #[error("Couldn't decode toml structure from '{}': {source}", file.display())]
    Toml {
        file: PathBuf,
        source: toml::de::Error,
    },

    #[error("Couldn't decode json structure from '{}': {source}", file.display())]
    Json {
        file: PathBuf,
        source: serde_json::Error,
    },

    #[error(transparent)]
    IO(#[from] std::io::Error),
}
