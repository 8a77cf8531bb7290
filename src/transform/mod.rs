// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Operators that update an existing dataset in place.
//!
//! Every operator keeps the dataset invariants: series are never resized, and
//! labels stay unique. Operators that modify y values record what they did by
//! appending to the series' labels; if the new labels would repeat one another,
//! the operator fails with [`TransformError::LabelCollision`] and the dataset
//! is left untouched.
//!
//! Operators that need the values of one series to modify others (line and
//! mean subtraction) first take an owned snapshot of those values; the inner
//! arithmetic takes the operand as `&[f64]` and the target as `&mut [f64]`, so
//! a series can never be subtracted from itself through a live reference.
//!
//! By default, referring to a series label that doesn't exist is logged and
//! otherwise ignored. [`Transformer::strict`] turns this into an error.

mod error;

pub use error::TransformError;

use std::{fmt, str::FromStr};

use itertools::Itertools;
use log::{debug, warn};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::{
    constants::MEAN_SUFFIX,
    dataset::{assemble, Dataset, DatasetError, Series},
    math::mean_across,
    retrieve::{RetrievalConstraints, RetrievalMode, Retriever},
    store::ParmStore,
};

lazy_static::lazy_static! {
    pub(crate) static ref OPERATION_TAGS_COMMA_SEPARATED: String = OperationTag::iter().join(", ");
}

/// The textual tags of [`Operation`]s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter, EnumString, IntoStaticStr)]
pub enum OperationTag {
    #[strum(serialize = "add")]
    Add,

    #[strum(serialize = "delete")]
    Delete,

    #[strum(serialize = "subtract-mean-all")]
    SubtractMeanAllFromAll,

    #[strum(serialize = "subtract-mean-line")]
    SubtractMeanAllFromLine,

    #[strum(serialize = "subtract-line")]
    SubtractLine,

    #[strum(serialize = "add-offset")]
    AddYOffset,

    #[strum(serialize = "remove-offset")]
    RemoveYOffset,
}

/// An update to apply to a dataset.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// Retrieve more series and append those whose labels are new.
    Add(RetrievalConstraints),

    /// Remove the series with these labels.
    Delete(Vec<String>),

    /// Subtract the per-sample mean over all series from every series.
    SubtractMeanAllFromAll,

    /// Subtract the per-sample mean over all series from the named series.
    SubtractMeanAllFromLine(String),

    /// Subtract the named series from every series, including itself.
    SubtractLine(String),

    /// Shift the k-th series (counting from 1) up by k times the offset.
    AddYOffset(f64),

    /// Undo [`Operation::AddYOffset`] with the same offset.
    RemoveYOffset(f64),
}

impl Operation {
    pub fn tag(&self) -> OperationTag {
        match self {
            Operation::Add(_) => OperationTag::Add,
            Operation::Delete(_) => OperationTag::Delete,
            Operation::SubtractMeanAllFromAll => OperationTag::SubtractMeanAllFromAll,
            Operation::SubtractMeanAllFromLine(_) => OperationTag::SubtractMeanAllFromLine,
            Operation::SubtractLine(_) => OperationTag::SubtractLine,
            Operation::AddYOffset(_) => OperationTag::AddYOffset,
            Operation::RemoveYOffset(_) => OperationTag::RemoveYOffset,
        }
    }
}

/// The textual form of an operation, as parsed by [`Operation::from_str`].
///
/// The positional constraints of "add" can't say everything a
/// [`RetrievalConstraints`] can: history mode is only expressed by the
/// "History" label prefix, so a history retrieval with another prefix is
/// written with "History", and a range retrieval with the "History" prefix
/// reads back as a history retrieval. Commas in the name filter or prefix also
/// don't survive.
impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = self.tag();
        match self {
            Operation::Add(c) => {
                let prefix = match c.mode {
                    RetrievalMode::History => crate::constants::HISTORY_LABEL_PREFIX,
                    RetrievalMode::Range => c.label_prefix.as_str(),
                };
                write!(
                    f,
                    "{tag}:{},{},{},{},{},{},{},{prefix}",
                    c.name_filter, c.x_start, c.x_end, c.x_count, c.y_start, c.y_end, c.y_count
                )
            }
            Operation::Delete(labels) => {
                write!(f, "{tag}:{}", labels.iter().map(|l| escape_label(l)).join(";"))
            }
            Operation::SubtractMeanAllFromAll => write!(f, "{tag}"),
            Operation::SubtractMeanAllFromLine(label) | Operation::SubtractLine(label) => {
                write!(f, "{tag}:{label}")
            }
            Operation::AddYOffset(offset) | Operation::RemoveYOffset(offset) => {
                write!(f, "{tag}:{offset}")
            }
        }
    }
}

impl FromStr for Operation {
    type Err = TransformError;

    /// Parse operations like "subtract-line:Gain:CS001" or "add-offset:0.5".
    /// "add" takes the 8 comma-separated retrieval constraints and "delete"
    /// takes labels separated by semicolons. In "delete" labels, a backslash
    /// escapes the next character, e.g. `delete:a\;b` deletes the label "a;b".
    fn from_str(s: &str) -> Result<Operation, TransformError> {
        let (tag_str, arg) = match s.split_once(':') {
            Some((t, a)) => (t.trim(), Some(a)),
            None => (s.trim(), None),
        };
        let tag = OperationTag::from_str(tag_str)
            .map_err(|_| TransformError::UnknownOperation(tag_str.to_string()))?;
        let bad = |expected: &'static str| TransformError::BadArgument {
            op: tag.into(),
            expected,
            got: arg.unwrap_or_default().to_string(),
        };

        let op = match tag {
            OperationTag::Add => {
                let fields = arg
                    .ok_or_else(|| bad("retrieval constraints"))?
                    .split(',')
                    .collect::<Vec<_>>();
                Operation::Add(RetrievalConstraints::from_positional(&fields)?)
            }

            OperationTag::Delete => {
                let labels = arg.map(split_labels).unwrap_or_default();
                if labels.is_empty() {
                    return Err(bad("at least one series label"));
                }
                Operation::Delete(labels)
            }

            OperationTag::SubtractMeanAllFromAll => match arg {
                None => Operation::SubtractMeanAllFromAll,
                Some(_) => return Err(bad("no argument")),
            },

            OperationTag::SubtractMeanAllFromLine | OperationTag::SubtractLine => {
                let label = match arg {
                    Some(a) if !a.is_empty() => a.to_string(),
                    _ => return Err(bad("a series label")),
                };
                if tag == OperationTag::SubtractLine {
                    Operation::SubtractLine(label)
                } else {
                    Operation::SubtractMeanAllFromLine(label)
                }
            }

            OperationTag::AddYOffset | OperationTag::RemoveYOffset => {
                let offset = arg
                    .and_then(|a| a.trim().parse::<f64>().ok())
                    .filter(|o| o.is_finite())
                    .ok_or_else(|| bad("a finite number"))?;
                if tag == OperationTag::AddYOffset {
                    Operation::AddYOffset(offset)
                } else {
                    Operation::RemoveYOffset(offset)
                }
            }
        };
        Ok(op)
    }
}

/// Apply an operation to a dataset, ignoring references to missing series.
pub fn apply<'d, S: ParmStore>(
    dataset: &'d mut Dataset,
    op: &Operation,
    retriever: &Retriever<S>,
) -> Result<&'d mut Dataset, TransformError> {
    Transformer::new(retriever).apply(dataset, op)
}

/// Applies operations to datasets. The retriever is used to get new series for
/// [`Operation::Add`].
pub struct Transformer<'a, S> {
    retriever: &'a Retriever<S>,
    strict: bool,
}

impl<'a, S: ParmStore> Transformer<'a, S> {
    pub fn new(retriever: &'a Retriever<S>) -> Transformer<'a, S> {
        Transformer {
            retriever,
            strict: false,
        }
    }

    /// When strict, referring to a series that doesn't exist is an error
    /// rather than a no-op.
    pub fn strict(mut self, strict: bool) -> Transformer<'a, S> {
        self.strict = strict;
        self
    }

    /// Apply `op` to `dataset` in place, handing the same dataset back.
    pub fn apply<'d>(
        &self,
        dataset: &'d mut Dataset,
        op: &Operation,
    ) -> Result<&'d mut Dataset, TransformError> {
        debug!("Applying '{op}' to {}", dataset.name());
        let result = match op {
            Operation::Add(c) => self.add(dataset, c),
            Operation::Delete(labels) => delete_series(dataset, labels),
            Operation::SubtractMeanAllFromAll => subtract_mean_all_from_all(dataset),
            Operation::SubtractMeanAllFromLine(label) => {
                subtract_mean_all_from_line(dataset, label)
            }
            Operation::SubtractLine(label) => subtract_line(dataset, label),
            Operation::AddYOffset(offset) => add_y_offset(dataset, *offset),
            Operation::RemoveYOffset(offset) => remove_y_offset(dataset, *offset),
        };

        match result {
            Ok(()) => Ok(dataset),
            Err(TransformError::MissingLabel(label)) if !self.strict => {
                warn!(
                    "There is no series labelled '{label}'; '{}' ignored it",
                    op.tag()
                );
                Ok(dataset)
            }
            Err(e) => Err(e),
        }
    }

    fn add(&self, dataset: &mut Dataset, c: &RetrievalConstraints) -> Result<(), TransformError> {
        let retrieved = self.retriever.retrieve(c)?;
        let new = assemble(&c.name_filter, c.mode, retrieved)?;
        let added = add_series(dataset, new.into_series());
        debug!("Added {added} series to {}", dataset.name());
        Ok(())
    }
}

/// Append each series whose label isn't already in the dataset. Returns the
/// number of series added.
pub fn add_series(dataset: &mut Dataset, new: Vec<Series>) -> usize {
    let mut added = 0;
    for s in new {
        if dataset.contains(s.label()) {
            debug!("'{}' is already in the dataset; skipping it", s.label());
            continue;
        }
        dataset.push_unique(s);
        added += 1;
    }
    added
}

/// Remove every series whose label is one of `labels`. Labels that aren't in
/// the dataset are reported after the others are removed.
pub fn delete_series(dataset: &mut Dataset, labels: &[String]) -> Result<(), TransformError> {
    let missing = labels.iter().find(|l| !dataset.contains(l)).cloned();
    dataset.retain_series(|s| !labels.iter().any(|l| l == s.label()));
    match missing {
        Some(label) => Err(TransformError::MissingLabel(label)),
        None => Ok(()),
    }
}

/// Subtract the per-sample cross-series mean from every series.
pub fn subtract_mean_all_from_all(dataset: &mut Dataset) -> Result<(), TransformError> {
    let means = match cross_series_mean(dataset)? {
        Some(m) => m,
        None => return Ok(()),
    };
    let new_labels = dataset
        .labels()
        .map(|l| format!("{l}{MEAN_SUFFIX}"))
        .enumerate()
        .collect();
    relabel(dataset, new_labels)?;
    for s in dataset.series_mut() {
        subtract(s.y_values_mut(), &means);
    }
    Ok(())
}

/// Subtract the per-sample cross-series mean from the series labelled
/// `label` only.
pub fn subtract_mean_all_from_line(
    dataset: &mut Dataset,
    label: &str,
) -> Result<(), TransformError> {
    let i = dataset
        .position(label)
        .ok_or_else(|| TransformError::MissingLabel(label.to_string()))?;
    let means = match cross_series_mean(dataset)? {
        Some(m) => m,
        None => return Ok(()),
    };
    relabel(dataset, vec![(i, format!("{label}{MEAN_SUFFIX}"))])?;
    subtract(dataset.series_mut()[i].y_values_mut(), &means);
    Ok(())
}

/// Subtract the series labelled `source` from every series. The source ends up
/// all zeros.
pub fn subtract_line(dataset: &mut Dataset, source: &str) -> Result<(), TransformError> {
    let snapshot = dataset
        .get(source)
        .map(|s| s.y_values().to_vec())
        .ok_or_else(|| TransformError::MissingLabel(source.to_string()))?;
    check_lengths(dataset, snapshot.len())?;

    let new_labels = dataset
        .labels()
        .map(|l| format!("{l} MINUS ({source})"))
        .enumerate()
        .collect();
    relabel(dataset, new_labels)?;
    for s in dataset.series_mut() {
        subtract(s.y_values_mut(), &snapshot);
    }
    Ok(())
}

/// The label suffix recording a y offset of `offset`. Formatting is
/// locale-independent and round-trips, so the same offset always gives the
/// same suffix.
pub fn offset_suffix(offset: f64) -> String {
    format!(" OFFSET({offset})")
}

/// Shift the k-th series (counting from 1) up by `offset * k`.
///
/// Values are restored exactly by [`remove_y_offset`] only when the shifts and
/// values are exactly representable (e.g. 0.5); otherwise they come back to
/// within rounding. Labels always come back exactly.
pub fn add_y_offset(dataset: &mut Dataset, offset: f64) -> Result<(), TransformError> {
    let shift = |k: usize| offset * (k + 1) as f64;
    let new_labels = dataset
        .labels()
        .enumerate()
        .map(|(k, l)| (k, format!("{l}{}", offset_suffix(shift(k)))))
        .collect();
    relabel(dataset, new_labels)?;
    for (k, s) in dataset.series_mut().iter_mut().enumerate() {
        let amount = shift(k);
        s.y_values_mut().iter_mut().for_each(|y| *y += amount);
    }
    Ok(())
}

/// Shift the k-th series (counting from 1) down by `offset * k`, and remove
/// the last matching offset suffix from its label.
pub fn remove_y_offset(dataset: &mut Dataset, offset: f64) -> Result<(), TransformError> {
    let shift = |k: usize| offset * (k + 1) as f64;
    let mut new_labels = vec![];
    for (k, label) in dataset.labels().enumerate() {
        let suffix = offset_suffix(shift(k));
        match label.rfind(&suffix) {
            Some(i) => {
                let mut label = label.to_string();
                label.replace_range(i..i + suffix.len(), "");
                new_labels.push((k, label));
            }
            None => debug!("'{label}' has no '{}' to remove", suffix.trim_start()),
        }
    }
    relabel(dataset, new_labels)?;
    for (k, s) in dataset.series_mut().iter_mut().enumerate() {
        let amount = shift(k);
        s.y_values_mut().iter_mut().for_each(|y| *y -= amount);
    }
    Ok(())
}

/// The per-sample mean over all series, or `None` if there are no series. The
/// sample count is taken from the first series; all others must match it.
fn cross_series_mean(dataset: &Dataset) -> Result<Option<Vec<f64>>, TransformError> {
    let n = match dataset.series().first() {
        Some(s) => s.len(),
        None => return Ok(None),
    };
    check_lengths(dataset, n)?;
    Ok(Some(mean_across(
        dataset.series().iter().map(|s| s.y_values()),
        n,
    )))
}

fn check_lengths(dataset: &Dataset, expected: usize) -> Result<(), TransformError> {
    match dataset.series().iter().find(|s| s.len() != expected) {
        Some(s) => Err(TransformError::UnequalLengths {
            label: s.label().to_string(),
            expected,
            got: s.len(),
        }),
        None => Ok(()),
    }
}

/// Give series new labels, or fail without changing anything if a label would
/// be repeated.
fn relabel(
    dataset: &mut Dataset,
    new_labels: Vec<(usize, String)>,
) -> Result<(), TransformError> {
    dataset.relabel(new_labels).map_err(|e| match e {
        DatasetError::DuplicateLabel(label) => TransformError::LabelCollision(label),
        e => TransformError::Dataset(e),
    })
}

/// Split "delete" labels on semicolons. A backslash makes the next character
/// part of the label.
fn split_labels(arg: &str) -> Vec<String> {
    let mut labels = vec![];
    let mut label = String::new();
    let mut chars = arg.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => label.extend(chars.next()),
            ';' => labels.push(std::mem::take(&mut label)),
            c => label.push(c),
        }
    }
    labels.push(label);
    labels.retain(|l| !l.is_empty());
    labels
}

fn escape_label(label: &str) -> String {
    label.replace('\\', "\\\\").replace(';', "\\;")
}

fn subtract(target: &mut [f64], operand: &[f64]) {
    for (t, o) in target.iter_mut().zip(operand) {
        *t -= o;
    }
}
