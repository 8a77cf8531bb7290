// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Plot-ready datasets.
//!
//! A [`Dataset`] is a named collection of labelled [`Series`] with axis
//! metadata. Datasets are made by [`assemble`] from retrieved series and
//! then mutated in place by the operators in [`crate::transform`].
//!
//! Two invariants hold for every dataset:
//! - each series has as many x values as y values, and this never changes after
//!   the series is made;
//! - no two series in a dataset have the same label.

mod assemble;
mod error;
mod io;
#[cfg(test)]
mod tests;

pub use assemble::{assemble, assemble_at};
pub use error::DatasetError;
pub use io::{read_dataset, write_dataset};

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// One labelled (x, y) value series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSeries")]
pub struct Series {
    label: String,
    x_values: Vec<f64>,
    y_values: Vec<f64>,
}

#[derive(Deserialize)]
struct RawSeries {
    label: String,
    x_values: Vec<f64>,
    y_values: Vec<f64>,
}

impl TryFrom<RawSeries> for Series {
    type Error = DatasetError;

    fn try_from(raw: RawSeries) -> Result<Series, DatasetError> {
        Series::new(raw.label, raw.x_values, raw.y_values)
    }
}

impl Series {
    /// Make a new series. `x_values` and `y_values` must have the same length.
    pub fn new(
        label: impl Into<String>,
        x_values: Vec<f64>,
        y_values: Vec<f64>,
    ) -> Result<Series, DatasetError> {
        let label = label.into();
        if x_values.len() != y_values.len() {
            return Err(DatasetError::UnequalLengths {
                label,
                x_len: x_values.len(),
                y_len: y_values.len(),
            });
        }
        Ok(Series {
            label,
            x_values,
            y_values,
        })
    }

    /// Make a series whose x values were generated from its y values.
    pub(crate) fn sampled(label: String, x_values: Vec<f64>, y_values: Vec<f64>) -> Series {
        debug_assert_eq!(x_values.len(), y_values.len());
        Series {
            label,
            x_values,
            y_values,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn x_values(&self) -> &[f64] {
        &self.x_values
    }

    pub fn y_values(&self) -> &[f64] {
        &self.y_values
    }

    /// The number of samples in this series.
    pub fn len(&self) -> usize {
        self.y_values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.y_values.is_empty()
    }

    /// Mutable access to the y values. Only a slice is handed out, so the
    /// length can't change.
    pub(crate) fn y_values_mut(&mut self) -> &mut [f64] {
        &mut self.y_values
    }
}

/// A named collection of labelled series, ready for plotting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawDataset")]
pub struct Dataset {
    name: String,
    subname: String,
    x_axis_label: String,
    x_axis_unit: String,
    y_axis_label: String,
    y_axis_unit: String,
    series: Vec<Series>,
}

#[derive(Deserialize)]
struct RawDataset {
    name: String,
    subname: String,
    x_axis_label: String,
    x_axis_unit: String,
    y_axis_label: String,
    y_axis_unit: String,
    series: Vec<Series>,
}

impl TryFrom<RawDataset> for Dataset {
    type Error = DatasetError;

    fn try_from(raw: RawDataset) -> Result<Dataset, DatasetError> {
        for (i, s) in raw.series.iter().enumerate() {
            if raw.series[..i].iter().any(|o| o.label == s.label) {
                return Err(DatasetError::DuplicateLabel(s.label.clone()));
            }
        }
        Ok(Dataset {
            name: raw.name,
            subname: raw.subname,
            x_axis_label: raw.x_axis_label,
            x_axis_unit: raw.x_axis_unit,
            y_axis_label: raw.y_axis_label,
            y_axis_unit: raw.y_axis_unit,
            series: raw.series,
        })
    }
}

impl Dataset {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn subname(&self) -> &str {
        &self.subname
    }

    pub fn x_axis_label(&self) -> &str {
        &self.x_axis_label
    }

    pub fn x_axis_unit(&self) -> &str {
        &self.x_axis_unit
    }

    pub fn y_axis_label(&self) -> &str {
        &self.y_axis_label
    }

    pub fn y_axis_unit(&self) -> &str {
        &self.y_axis_unit
    }

    pub fn series(&self) -> &[Series] {
        &self.series
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.series.iter().map(|s| s.label())
    }

    /// The index of the series with this label. Linear in the number of series.
    pub fn position(&self, label: &str) -> Option<usize> {
        self.series.iter().position(|s| s.label == label)
    }

    pub fn get(&self, label: &str) -> Option<&Series> {
        self.series.iter().find(|s| s.label == label)
    }

    pub fn contains(&self, label: &str) -> bool {
        self.position(label).is_some()
    }

    /// Add a series, unless its label is already present. Returns whether the
    /// series was added.
    pub(crate) fn push_unique(&mut self, series: Series) -> bool {
        if self.contains(&series.label) {
            false
        } else {
            self.series.push(series);
            true
        }
    }

    /// Give new labels to the series at the given indices. If the labels
    /// would no longer be unique, nothing is changed and the first repeated
    /// label is returned in the error.
    pub(crate) fn relabel(
        &mut self,
        new_labels: Vec<(usize, String)>,
    ) -> Result<(), DatasetError> {
        let mut labels = self.labels().collect::<Vec<_>>();
        for (i, label) in &new_labels {
            labels[*i] = label.as_str();
        }
        let mut seen = HashSet::with_capacity(labels.len());
        if let Some(repeated) = labels.into_iter().find(|l| !seen.insert(*l)) {
            return Err(DatasetError::DuplicateLabel(repeated.to_string()));
        }

        for (i, label) in new_labels {
            self.series[i].label = label;
        }
        Ok(())
    }

    pub(crate) fn series_mut(&mut self) -> &mut [Series] {
        &mut self.series
    }

    pub(crate) fn retain_series<F: FnMut(&Series) -> bool>(&mut self, f: F) {
        self.series.retain(f);
    }

    pub(crate) fn into_series(self) -> Vec<Series> {
        self.series
    }
}
