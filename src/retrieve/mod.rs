// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Retrieve labelled series from a parameter store.
//!
//! Two retrieval modes exist. In range mode, parameters are sampled on a
//! regular grid and the x values are the midpoints of the sampling cells; a
//! grid with more than one y cell gives one series per y cell. In history
//! mode, the store returns the solve history of each parameter and the x
//! values are plain iteration indices.

mod error;

pub use error::{ConstraintsError, RetrieveError};

use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

use crate::{
    constants::{HISTORY_LABEL_PREFIX, LABEL_PREFIX_SEPARATOR, NUM_POSITIONAL_CONSTRAINTS},
    dataset::Series,
    math::cell_midpoint,
    store::ParmStore,
};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum RetrievalMode {
    /// Sample parameters uniformly over the (x, y) domain. Produces bandpass
    /// plots.
    #[strum(serialize = "range")]
    Range,

    /// Get the iteration-indexed solve history of parameters.
    #[strum(serialize = "history")]
    History,
}

/// What to retrieve from a parameter store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievalConstraints {
    /// A parameter name pattern understood by the store.
    pub name_filter: String,
    pub x_start: f64,
    pub x_end: f64,
    pub x_count: usize,
    pub y_start: f64,
    pub y_end: f64,
    pub y_count: usize,
    /// Prepended to every series label (with a separator), unless empty.
    #[serde(default)]
    pub label_prefix: String,
    pub mode: RetrievalMode,
}

impl RetrievalConstraints {
    /// Parse the positional encoding `[name_filter, x_start, x_end, x_count,
    /// y_start, y_end, y_count, label_prefix]`. A label prefix of exactly
    /// "History" selects history mode; anything else is range mode.
    pub fn from_positional<S: AsRef<str>>(
        fields: &[S],
    ) -> Result<RetrievalConstraints, ConstraintsError> {
        if fields.len() != NUM_POSITIONAL_CONSTRAINTS {
            return Err(ConstraintsError::WrongArity(fields.len()));
        }
        let fields: Vec<&str> = fields.iter().map(|s| s.as_ref()).collect();

        fn float(field: &'static str, value: &str) -> Result<f64, ConstraintsError> {
            value
                .trim()
                .parse()
                .map_err(|_| ConstraintsError::BadNumber {
                    field,
                    value: value.to_string(),
                })
        }
        fn count(field: &'static str, value: &str) -> Result<usize, ConstraintsError> {
            value
                .trim()
                .parse()
                .map_err(|_| ConstraintsError::BadNumber {
                    field,
                    value: value.to_string(),
                })
        }

        let label_prefix = fields[7].to_string();
        let mode = if label_prefix == HISTORY_LABEL_PREFIX {
            RetrievalMode::History
        } else {
            RetrievalMode::Range
        };
        let c = RetrievalConstraints {
            name_filter: fields[0].to_string(),
            x_start: float("x start", fields[1])?,
            x_end: float("x end", fields[2])?,
            x_count: count("x count", fields[3])?,
            y_start: float("y start", fields[4])?,
            y_end: float("y end", fields[5])?,
            y_count: count("y count", fields[6])?,
            label_prefix,
            mode,
        };
        c.validate()?;
        Ok(c)
    }

    /// Check that the constraints can be used for sampling.
    pub fn validate(&self) -> Result<(), ConstraintsError> {
        if self.x_count == 0 {
            return Err(ConstraintsError::ZeroCount { field: "x count" });
        }
        if self.y_count == 0 {
            return Err(ConstraintsError::ZeroCount { field: "y count" });
        }
        for (field, v) in [
            ("x start", self.x_start),
            ("x end", self.x_end),
            ("y start", self.y_start),
            ("y end", self.y_end),
        ] {
            if !v.is_finite() {
                return Err(ConstraintsError::NotFinite { field });
            }
        }
        Ok(())
    }

    /// The label of a series made from the raw parameter name `name`.
    pub fn label_for(&self, name: &str) -> String {
        if self.label_prefix.is_empty() {
            name.to_string()
        } else {
            format!("{}{LABEL_PREFIX_SEPARATOR}{name}", self.label_prefix)
        }
    }
}

/// Retrieves series from a parameter store. The store is owned by the
/// retriever; pass a reference if the store is shared.
#[derive(Debug)]
pub struct Retriever<S> {
    store: S,
}

impl<S: ParmStore> Retriever<S> {
    pub fn new(store: S) -> Retriever<S> {
        Retriever { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Get one series for each parameter matching the constraints' name
    /// filter, in the store's enumeration order.
    pub fn retrieve(&self, c: &RetrievalConstraints) -> Result<Vec<Series>, RetrieveError> {
        c.validate()?;

        let names = self
            .store
            .names(&c.name_filter)
            .map_err(|source| RetrieveError::Names {
                filter: c.name_filter.clone(),
                source,
            })?;
        if names.is_empty() {
            return Err(RetrieveError::NoResults {
                filter: c.name_filter.clone(),
            });
        }
        debug!(
            "{} parameters match '{}' ({} mode)",
            names.len(),
            c.name_filter,
            c.mode
        );

        let mut series = Vec::with_capacity(names.len());
        for name in names {
            let values = match c.mode {
                RetrievalMode::Range => self.store.range_values(
                    &name, c.x_start, c.x_end, c.x_count, c.y_start, c.y_end, c.y_count,
                ),
                // The solve-time window is the y (time) domain.
                RetrievalMode::History => self.store.history_values(
                    &name, c.x_start, c.x_end, c.y_start, c.y_end, c.y_start, c.y_end,
                ),
            };
            let mut values = values.map_err(|source| RetrieveError::Values {
                name: name.clone(),
                source,
            })?;
            let y_values = match values.remove(&name) {
                Some(v) => v,
                None => {
                    warn!("The parameter store returned no values for '{name}'");
                    vec![]
                }
            };
            trace!("{name}: {} values", y_values.len());

            let label = c.label_for(&name);
            match c.mode {
                RetrievalMode::Range => series.extend(range_series(c, label, y_values)),
                RetrievalMode::History => {
                    let x_values = (0..y_values.len()).map(|i| i as f64).collect();
                    series.push(Series::sampled(label, x_values, y_values));
                }
            }
        }

        Ok(series)
    }
}

/// Turn the range values of one parameter into series. A full grid of
/// `x_count * y_count` values (x varying fastest) with more than one y cell is
/// split into one series per y cell, labelled with the y cell index. The x
/// values of every series are the x cell midpoints, so they never leave
/// `[x_start, x_end]`.
fn range_series(c: &RetrievalConstraints, label: String, y_values: Vec<f64>) -> Vec<Series> {
    let x_midpoints = |count: usize| -> Vec<f64> {
        (0..count)
            .map(|i| cell_midpoint(c.x_start, c.x_end, count, i))
            .collect()
    };

    if c.y_count > 1 && y_values.len() == c.x_count * c.y_count {
        return y_values
            .chunks_exact(c.x_count)
            .enumerate()
            .map(|(i_y, row)| {
                Series::sampled(
                    format!("{label} [y={i_y}]"),
                    x_midpoints(c.x_count),
                    row.to_vec(),
                )
            })
            .collect();
    }

    let count = if y_values.is_empty() || y_values.len() == c.x_count {
        c.x_count
    } else {
        warn!(
            "'{label}' has {} values but {} x cells were asked for; spreading them over the x range",
            y_values.len(),
            c.x_count
        );
        y_values.len()
    };
    let mut x_values = x_midpoints(count);
    x_values.truncate(y_values.len());
    vec![Series::sampled(label, x_values, y_values)]
}
