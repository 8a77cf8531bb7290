// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Errors associated with transforming datasets.

use thiserror::Error;

use crate::{
    dataset::DatasetError,
    retrieve::{ConstraintsError, RetrieveError},
};

#[derive(Error, Debug)]
pub enum TransformError {
    #[error("There is no series labelled '{0}' in the dataset")]
    MissingLabel(String),

    #[error("Series '{label}' has {got} values, but {expected} were expected; all series must have the same length")]
    UnequalLengths {
        label: String,
        expected: usize,
        got: usize,
    },

    #[error("Relabelling would give more than one series the label '{0}'; the dataset was left unchanged")]
    LabelCollision(String),

    #[error(
        "Unknown operation '{0}'. Valid operations are: {}",
        *super::OPERATION_TAGS_COMMA_SEPARATED
    )]
    UnknownOperation(String),

    #[error("Operation '{op}' needs {expected}, but got '{got}'")]
    BadArgument {
        op: &'static str,
        expected: &'static str,
        got: String,
    },

    #[error(transparent)]
    Constraints(#[from] ConstraintsError),

    #[error(transparent)]
    Retrieve(#[from] RetrieveError),

    #[error(transparent)]
    Dataset(#[from] DatasetError),
}
