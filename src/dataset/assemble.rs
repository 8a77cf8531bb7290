// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Wrap retrieved series into a dataset.

use log::{debug, warn};

use super::{Dataset, DatasetError, Series};
use crate::{
    constants::{HISTORY_X_AXIS, HISTORY_Y_AXIS, RANGE_X_AXIS, RANGE_Y_AXIS},
    retrieve::RetrievalMode,
    time::{format_utc, mjd_from_unix_millis, now_unix_millis},
};

/// Make a dataset out of retrieved series, stamped with the current time.
pub fn assemble(
    name_filter: &str,
    mode: RetrievalMode,
    series: Vec<Series>,
) -> Result<Dataset, DatasetError> {
    assemble_at(name_filter, mode, series, now_unix_millis())
}

/// Make a dataset out of retrieved series, stamped with the given generation
/// time (Unix milliseconds).
///
/// Series whose label was already seen are dropped.
pub fn assemble_at(
    name_filter: &str,
    mode: RetrievalMode,
    series: Vec<Series>,
    unix_millis: i64,
) -> Result<Dataset, DatasetError> {
    if series.is_empty() {
        return Err(DatasetError::Empty {
            name_filter: name_filter.to_string(),
        });
    }

    let ((x_axis_label, x_axis_unit), (y_axis_label, y_axis_unit)) = match mode {
        RetrievalMode::Range => (RANGE_X_AXIS, RANGE_Y_AXIS),
        RetrievalMode::History => (HISTORY_X_AXIS, HISTORY_Y_AXIS),
    };
    let subname = format!(
        "generated at {} (MJD {})",
        format_utc(unix_millis),
        mjd_from_unix_millis(unix_millis)
    );

    let mut dataset = Dataset {
        name: format!("dataset '{name_filter}'"),
        subname,
        x_axis_label: x_axis_label.to_string(),
        x_axis_unit: x_axis_unit.to_string(),
        y_axis_label: y_axis_label.to_string(),
        y_axis_unit: y_axis_unit.to_string(),
        series: Vec::with_capacity(series.len()),
    };
    for s in series {
        let label = s.label.clone();
        if !dataset.push_unique(s) {
            warn!("Dropping a second series labelled '{label}'");
        }
    }
    debug!(
        "Assembled {} with {} series",
        dataset.name,
        dataset.series.len()
    );

    Ok(dataset)
}
