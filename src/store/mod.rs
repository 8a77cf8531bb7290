// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Parameter stores. These supply parameter names and sampled values to the
//! retriever.
//!
//! The only thing the rest of the crate needs from a store is the [`ParmStore`]
//! trait. [`ParmDbFile`] reads parameters from a TOML or JSON file, and
//! [`MemoryParmStore`] holds preset values in memory.

mod error;
mod file;
mod memory;

pub use error::ParmStoreError;
pub use file::{ParmDbFile, ParmDbFileType, ParmDef, PARMDB_FILE_TYPES_COMMA_SEPARATED};
pub use memory::MemoryParmStore;

use std::collections::HashMap;

/// Values returned by a store, keyed by parameter name.
pub type ParmValues = HashMap<String, Vec<f64>>;

/// A source of calibration parameters.
pub trait ParmStore {
    /// Get all parameter names matching `pattern`. Names are returned in the
    /// store's enumeration order.
    fn names(&self, pattern: &str) -> Result<Vec<String>, ParmStoreError>;

    /// Sample the parameter `name` on a grid of `x_count` by `y_count` cells
    /// spanning the given domain.
    #[allow(clippy::too_many_arguments)]
    fn range_values(
        &self,
        name: &str,
        x_start: f64,
        x_end: f64,
        x_count: usize,
        y_start: f64,
        y_end: f64,
        y_count: usize,
    ) -> Result<ParmValues, ParmStoreError>;

    /// Get the solve history of the parameter `name`, restricted to solutions
    /// made between `solve_time_start` and `solve_time_end`.
    #[allow(clippy::too_many_arguments)]
    fn history_values(
        &self,
        name: &str,
        x_start: f64,
        x_end: f64,
        y_start: f64,
        y_end: f64,
        solve_time_start: f64,
        solve_time_end: f64,
    ) -> Result<ParmValues, ParmStoreError>;
}

impl<S: ParmStore + ?Sized> ParmStore for &S {
    fn names(&self, pattern: &str) -> Result<Vec<String>, ParmStoreError> {
        (**self).names(pattern)
    }

    fn range_values(
        &self,
        name: &str,
        x_start: f64,
        x_end: f64,
        x_count: usize,
        y_start: f64,
        y_end: f64,
        y_count: usize,
    ) -> Result<ParmValues, ParmStoreError> {
        (**self).range_values(name, x_start, x_end, x_count, y_start, y_end, y_count)
    }

    fn history_values(
        &self,
        name: &str,
        x_start: f64,
        x_end: f64,
        y_start: f64,
        y_end: f64,
        solve_time_start: f64,
        solve_time_end: f64,
    ) -> Result<ParmValues, ParmStoreError> {
        (**self).history_values(
            name,
            x_start,
            x_end,
            y_start,
            y_end,
            solve_time_start,
            solve_time_end,
        )
    }
}

/// Match names against a shell-style wildcard pattern, preserving the order of
/// `names`.
pub(crate) fn match_names<'a, I>(names: I, pattern: &str) -> Result<Vec<String>, ParmStoreError>
where
    I: IntoIterator<Item = &'a str>,
{
    let pattern = glob::Pattern::new(pattern).map_err(|e| ParmStoreError::Pattern {
        pattern: pattern.to_string(),
        source: e,
    })?;
    Ok(names
        .into_iter()
        .filter(|n| pattern.matches(n))
        .map(|n| n.to_string())
        .collect())
}
