// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use thiserror::Error;

use crate::dataset::DatasetError;

#[derive(Error, Debug)]
pub(crate) enum PlotError {
    #[cfg(not(feature = "plotting"))]
    #[error("parmplot was not compiled with the \"plotting\" feature.\nYou need to compile parmplot from source with this feature to plot datasets.")]
    NoPlottingFeature,

    #[cfg(feature = "plotting")]
    #[error("No dataset files supplied!")]
    NoInputs,

    #[cfg(feature = "plotting")]
    #[error("Error from the plotters library: {0}")]
    Draw(#[from] super::plotting::DrawError),

    #[error(transparent)]
    Dataset(#[from] DatasetError),

    #[error(transparent)]
    IO(#[from] std::io::Error),
}
