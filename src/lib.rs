// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Retrieve LOFAR calibration parameters into plot-ready datasets, and transform
those datasets in place.

The pipeline is:
- a [`ParmStore`] supplies parameter names and sampled values;
- a [`Retriever`] turns matching parameters into labelled [`Series`];
- [`assemble`] wraps series into a [`Dataset`] with titles and axis metadata;
- [`Transformer`] applies [`Operation`]s (mean and line subtraction, y
  offsets, adding and deleting series) to an existing dataset.
 */

mod cli;
pub mod constants;
pub mod dataset;
pub(crate) mod math;
pub mod retrieve;
pub mod store;
pub mod time;
pub mod transform;

// Re-exports.
pub use cli::{Parmplot, ParmplotError};
pub use dataset::{assemble, assemble_at, Dataset, DatasetError, Series};
pub use retrieve::{
    ConstraintsError, RetrievalConstraints, RetrievalMode, RetrieveError, Retriever,
};
pub use store::{MemoryParmStore, ParmDbFile, ParmStore, ParmStoreError};
pub use transform::{apply, Operation, TransformError, Transformer};
