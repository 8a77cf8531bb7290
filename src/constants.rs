// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Useful constants.

The MJD constants follow the LOFAR plotting convention: whole days since the
Unix epoch, shifted onto the MJD scale. Dataset subnames built from them are
compared as strings downstream, so they must stay as they are.
 */

/// The number of milliseconds in a day.
pub const MILLIS_PER_DAY: i64 = 86_400_000;

/// The Julian Day of the Unix epoch, truncated to a whole day.
pub const UNIX_EPOCH_JD: f64 = 2_440_588.0;

/// The offset between a Julian Day and a Modified Julian Day.
pub const MJD_OFFSET: f64 = 2_400_000.5;

/// When the positional label prefix is exactly this, the retrieval is done in
/// history mode.
pub const HISTORY_LABEL_PREFIX: &str = "History";

/// Separates a label prefix from the raw parameter name in a series label.
pub const LABEL_PREFIX_SEPARATOR: &str = " - ";

/// The number of fields in the positional encoding of retrieval constraints.
pub const NUM_POSITIONAL_CONSTRAINTS: usize = 8;

/// Appended to a series label after the cross-series mean is subtracted.
pub const MEAN_SUFFIX: &str = " MINUS mean(all values)";

/// Axis labels and units for range (bandpass) datasets.
pub const RANGE_X_AXIS: (&str, &str) = ("Frequency", "(Hz)");
pub const RANGE_Y_AXIS: (&str, &str) = ("Bandpass Gain", "");

/// Axis labels and units for history datasets.
pub const HISTORY_X_AXIS: (&str, &str) = ("Iteration", "");
pub const HISTORY_Y_AXIS: (&str, &str) = ("Value", "");
