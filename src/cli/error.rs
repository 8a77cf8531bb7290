// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Error type for all parmplot-related errors. This should be the *only*
//! error enum that is publicly visible from the command-line interface.

use thiserror::Error;

use super::{common::RetrieveArgsError, plot::PlotError, transform::TransformArgsError};
use crate::{
    dataset::DatasetError,
    retrieve::{ConstraintsError, RetrieveError},
    store::ParmStoreError,
    transform::{TransformError, OPERATION_TAGS_COMMA_SEPARATED},
};

const CONSTRAINTS_HELP: &str = "Retrieval constraints are, in order: NAME_FILTER X_START X_END X_COUNT Y_START Y_END Y_COUNT LABEL_PREFIX";

/// The *only* publicly visible error from the parmplot binary. Each error
/// message should include a hint, unless it's "generic".
#[derive(Error, Debug)]
pub enum ParmplotError {
    /// An error related to parameter database files.
    #[error("{0}\n\nParameter databases are TOML or JSON files with a list of [[parm]] tables, each with a name and optional coeffs and history")]
    ParmDb(String),

    /// An error related to retrieval constraints.
    #[error("{0}\n\n{CONSTRAINTS_HELP}")]
    Constraints(String),

    /// An error from retrieving parameters.
    #[error("{0}")]
    Retrieve(String),

    /// An error related to dataset files.
    #[error("{0}\n\nDatasets are JSON files as written by 'parmplot dataset'")]
    Dataset(String),

    /// An error related to dataset operations.
    #[error("{0}\n\nValid operations are: {}", *OPERATION_TAGS_COMMA_SEPARATED)]
    Transform(String),

    /// An error related to plotting.
    #[error("{0}")]
    Plot(String),

    /// An error related to argument files.
    #[error("{0}\n\nArgument files are TOML or JSON files with the same keys as the long CLI arguments")]
    ArgFile(String),

    /// A generic error that can't be clarified further, e.g. IO errors.
    #[error("{0}")]
    Generic(String),
}

// When changing the error propagation below, ensure `Self::from(e)` uses the
// correct `e`!

impl From<ParmStoreError> for ParmplotError {
    fn from(e: ParmStoreError) -> Self {
        match e {
            ParmStoreError::Pattern { .. } => Self::Constraints(e.to_string()),
            ParmStoreError::UnknownParm(_) => Self::Retrieve(e.to_string()),
            ParmStoreError::RaggedCoeffs { .. }
            | ParmStoreError::ZeroScale { .. }
            | ParmStoreError::DuplicateParm(_)
            | ParmStoreError::UnsupportedExt(_)
            | ParmStoreError::Toml { .. }
            | ParmStoreError::Json { .. } => Self::ParmDb(e.to_string()),
            ParmStoreError::IO(e) => Self::from(e),
        }
    }
}

impl From<ConstraintsError> for ParmplotError {
    fn from(e: ConstraintsError) -> Self {
        Self::Constraints(e.to_string())
    }
}

impl From<RetrieveError> for ParmplotError {
    fn from(e: RetrieveError) -> Self {
        match e {
            RetrieveError::Constraints(e) => Self::from(e),
            RetrieveError::Names {
                source: ParmStoreError::Pattern { .. },
                ..
            } => Self::Constraints(e.to_string()),
            RetrieveError::NoResults { .. }
            | RetrieveError::Names { .. }
            | RetrieveError::Values { .. } => Self::Retrieve(e.to_string()),
        }
    }
}

impl From<DatasetError> for ParmplotError {
    fn from(e: DatasetError) -> Self {
        match e {
            DatasetError::Empty { .. } => Self::Retrieve(e.to_string()),
            DatasetError::UnequalLengths { .. }
            | DatasetError::DuplicateLabel(_)
            | DatasetError::Json { .. }
            | DatasetError::Encode(_) => Self::Dataset(e.to_string()),
            DatasetError::IO(e) => Self::from(e),
        }
    }
}

impl From<TransformError> for ParmplotError {
    fn from(e: TransformError) -> Self {
        match e {
            TransformError::MissingLabel(_)
            | TransformError::UnequalLengths { .. }
            | TransformError::LabelCollision(_)
            | TransformError::UnknownOperation(_)
            | TransformError::BadArgument { .. } => Self::Transform(e.to_string()),
            TransformError::Constraints(e) => Self::from(e),
            TransformError::Retrieve(e) => Self::from(e),
            TransformError::Dataset(e) => Self::from(e),
        }
    }
}

impl From<RetrieveArgsError> for ParmplotError {
    fn from(e: RetrieveArgsError) -> Self {
        match e {
            RetrieveArgsError::NoParmdb | RetrieveArgsError::MissingField(_) => {
                Self::Constraints(e.to_string())
            }
            RetrieveArgsError::Constraints(e) => Self::from(e),
        }
    }
}

impl From<TransformArgsError> for ParmplotError {
    fn from(e: TransformArgsError) -> Self {
        match e {
            TransformArgsError::NoOperations | TransformArgsError::AddWithoutParmdb => {
                Self::Transform(e.to_string())
            }
        }
    }
}

impl From<PlotError> for ParmplotError {
    fn from(e: PlotError) -> Self {
        let s = e.to_string();
        match e {
            PlotError::Dataset(e) => Self::from(e),
            PlotError::IO(e) => Self::from(e),
            #[cfg(not(feature = "plotting"))]
            PlotError::NoPlottingFeature => Self::Plot(s),
            #[cfg(feature = "plotting")]
            PlotError::NoInputs | PlotError::Draw(_) => Self::Plot(s),
        }
    }
}

// Library errors.

impl From<log::SetLoggerError> for ParmplotError {
    fn from(e: log::SetLoggerError) -> Self {
        Self::Generic(format!("Couldn't set up logging: {e}"))
    }
}

impl From<std::io::Error> for ParmplotError {
    fn from(e: std::io::Error) -> Self {
        Self::Generic(e.to_string())
    }
}
