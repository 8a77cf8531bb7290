// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Errors associated with retrieving series.

use thiserror::Error;

use crate::{constants::NUM_POSITIONAL_CONSTRAINTS, store::ParmStoreError};

/// The retrieval constraints were malformed. These are always detected before
/// the parameter store is touched.
#[derive(Error, Debug, PartialEq)]
pub enum ConstraintsError {
    #[error("Expected {NUM_POSITIONAL_CONSTRAINTS} retrieval constraints (name filter, x start, x end, x count, y start, y end, y count, label prefix), but got {0}")]
    WrongArity(usize),

    #[error("Couldn't parse {field} '{value}' as a number")]
    BadNumber { field: &'static str, value: String },

    #[error("{field} must be at least 1")]
    ZeroCount { field: &'static str },

    #[error("{field} is not finite")]
    NotFinite { field: &'static str },
}

#[derive(Error, Debug)]
pub enum RetrieveError {
    #[error(transparent)]
    Constraints(#[from] ConstraintsError),

    #[error("The parameter store returned no results for filter '{filter}'")]
    NoResults { filter: String },

    #[error("Couldn't get parameter names matching '{filter}': {source}")]
    Names {
        filter: String,
        source: ParmStoreError,
    },

    #[error("Couldn't get values for parameter '{name}': {source}")]
    Values {
        name: String,
        source: ParmStoreError,
    },
}
