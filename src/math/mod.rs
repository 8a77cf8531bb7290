// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Some helper mathematics.


/// The midpoint of cell `i` of `count` equal cells spanning `[start, end]`.
///
/// # Examples
///
/// `assert_abs_diff_eq!(cell_midpoint(0.0, 10.0, 5, 0), 1.0);`
#[inline]
pub(crate) fn cell_midpoint(start: f64, end: f64, count: usize, i: usize) -> f64 {
    start + (end - start) / count as f64 * (i as f64 + 0.5)
}

/// For each of the first `len` sample indices, the mean of that sample over all
/// of `rows`. Every row must have at least `len` elements.
pub(crate) fn mean_across<'a, I>(rows: I, len: usize) -> Vec<f64>
where
    I: IntoIterator<Item = &'a [f64]>,
{
    let mut sums = vec![0.0; len];
    let mut num_rows = 0;
    for row in rows {
        for (sum, v) in sums.iter_mut().zip(row.iter()) {
            *sum += v;
        }
        num_rows += 1;
    }
    if num_rows > 0 {
        let n = num_rows as f64;
        sums.iter_mut().for_each(|s| *s /= n);
    }
    sums
}
