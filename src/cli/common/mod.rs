// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Common arguments for command-line interfaces. The `dataset` subcommand and
//! arguments files both describe what to retrieve from a parameter database,
//! so those arguments live here.

mod printers;

pub(super) use printers::print_dataset_summary;

use std::path::PathBuf;

use clap::Parser;
use itertools::Itertools;
use log::debug;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};
use thiserror::Error;

use crate::{
    constants::HISTORY_LABEL_PREFIX,
    retrieve::{ConstraintsError, RetrievalConstraints, RetrievalMode},
    store::PARMDB_FILE_TYPES_COMMA_SEPARATED,
};

lazy_static::lazy_static! {
    pub(super) static ref ARG_FILE_TYPES_COMMA_SEPARATED: String = ArgFileTypes::iter().join(", ");

    pub(super) static ref ARG_FILE_HELP: String =
        format!("All arguments may be specified in a file. Any CLI arguments override arguments set in the file. Supported formats: {}", *ARG_FILE_TYPES_COMMA_SEPARATED);

    static ref PARMDB_HELP: String =
        format!("Path to the parameter database. Supported formats: {}", *PARMDB_FILE_TYPES_COMMA_SEPARATED);

    static ref MODE_HELP: String =
        format!("How parameters are retrieved. Valid modes are: {}. Default: range, unless the label prefix is \"{HISTORY_LABEL_PREFIX}\"",
                RetrievalMode::iter().join(", "));
}

#[derive(Debug, Display, EnumIter, EnumString)]
pub(super) enum ArgFileTypes {
    #[strum(serialize = "toml")]
    Toml,
    #[strum(serialize = "json")]
    Json,
}

macro_rules! unpack_arg_file {
    ($arg_file:expr) => ({
        use std::{fs::File, io::Read, str::FromStr};

        use crate::cli::common::{ArgFileTypes, ARG_FILE_TYPES_COMMA_SEPARATED};

        debug!("Attempting to parse argument file {}", $arg_file.display());

        let mut contents = String::new();
        let arg_file_type = $arg_file
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .and_then(|e| ArgFileTypes::from_str(&e).ok());

        match arg_file_type {
            Some(ArgFileTypes::Toml) => {
                debug!("Parsing toml file...");
                let mut fh = File::open(&$arg_file)?;
                fh.read_to_string(&mut contents)?;
                match toml::from_str(&contents) {
                    Ok(p) => p,
                    Err(err) => {
                        return Err(ParmplotError::ArgFile(format!(
                            "Couldn't decode toml structure from {:?}:\n{err}",
                            $arg_file
                        )))
                    }
                }
            }
            Some(ArgFileTypes::Json) => {
                debug!("Parsing json file...");
                let mut fh = File::open(&$arg_file)?;
                fh.read_to_string(&mut contents)?;
                match serde_json::from_str(&contents) {
                    Ok(p) => p,
                    Err(err) => {
                        return Err(ParmplotError::ArgFile(format!(
                            "Couldn't decode json structure from {:?}:\n{err}",
                            $arg_file
                        )))
                    }
                }
            }

            _ => {
                return Err(ParmplotError::ArgFile(format!(
                    "Argument file '{:?}' doesn't have a recognised file extension! Valid extensions are: {}", $arg_file, *ARG_FILE_TYPES_COMMA_SEPARATED)
                ))
            }
        }
    });
}

/// Which parameter database to read and what to retrieve from it. The
/// constraints may be given all at once with `--constraints` (the positional
/// encoding), or field by field; fields override the positional values.
#[derive(Parser, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub(super) struct RetrieveArgs {
    #[clap(short, long, help = PARMDB_HELP.as_str(), parse(from_os_str), help_heading = "INPUT DATA")]
    pub(super) parmdb: Option<PathBuf>,

    /// All of the retrieval constraints, in order.
    #[clap(
        short,
        long,
        number_of_values = 8,
        value_names = &["NAME_FILTER", "X_START", "X_END", "X_COUNT", "Y_START", "Y_END", "Y_COUNT", "LABEL_PREFIX"],
        allow_hyphen_values = true,
        help_heading = "RETRIEVAL"
    )]
    pub(super) constraints: Option<Vec<String>>,

    /// The parameter name pattern, e.g. "Gain:0:0:*".
    #[clap(short, long, help_heading = "RETRIEVAL")]
    pub(super) name_filter: Option<String>,

    /// The start of the x (frequency) domain.
    #[clap(long, allow_hyphen_values = true, help_heading = "RETRIEVAL")]
    pub(super) x_start: Option<f64>,

    /// The end of the x (frequency) domain.
    #[clap(long, allow_hyphen_values = true, help_heading = "RETRIEVAL")]
    pub(super) x_end: Option<f64>,

    /// The number of samples along x.
    #[clap(long, help_heading = "RETRIEVAL")]
    pub(super) x_count: Option<usize>,

    /// The start of the y (time) domain. In history mode, this is also the
    /// start of the solve-time window.
    #[clap(long, allow_hyphen_values = true, help_heading = "RETRIEVAL")]
    pub(super) y_start: Option<f64>,

    /// The end of the y (time) domain. In history mode, this is also the end
    /// of the solve-time window.
    #[clap(long, allow_hyphen_values = true, help_heading = "RETRIEVAL")]
    pub(super) y_end: Option<f64>,

    /// The number of samples along y.
    #[clap(long, help_heading = "RETRIEVAL")]
    pub(super) y_count: Option<usize>,

    /// Prepended to every series label.
    #[clap(short, long, help_heading = "RETRIEVAL")]
    pub(super) label_prefix: Option<String>,

    #[clap(short, long, help = MODE_HELP.as_str(), help_heading = "RETRIEVAL")]
    pub(super) mode: Option<RetrievalMode>,
}

#[derive(Error, Debug)]
pub(super) enum RetrieveArgsError {
    #[error("No parameter database was supplied")]
    NoParmdb,

    #[error("The retrieval constraint '{0}' wasn't supplied")]
    MissingField(&'static str),

    #[error(transparent)]
    Constraints(#[from] ConstraintsError),
}

impl RetrieveArgs {
    pub(super) fn merge(self, other: Self) -> Self {
        Self {
            parmdb: self.parmdb.or(other.parmdb),
            constraints: self.constraints.or(other.constraints),
            name_filter: self.name_filter.or(other.name_filter),
            x_start: self.x_start.or(other.x_start),
            x_end: self.x_end.or(other.x_end),
            x_count: self.x_count.or(other.x_count),
            y_start: self.y_start.or(other.y_start),
            y_end: self.y_end.or(other.y_end),
            y_count: self.y_count.or(other.y_count),
            label_prefix: self.label_prefix.or(other.label_prefix),
            mode: self.mode.or(other.mode),
        }
    }

    /// Turn the arguments into a parameter database path and validated
    /// constraints.
    pub(super) fn parse(self) -> Result<(PathBuf, RetrievalConstraints), RetrieveArgsError> {
        debug!("{:#?}", self);

        let Self {
            parmdb,
            constraints,
            name_filter,
            x_start,
            x_end,
            x_count,
            y_start,
            y_end,
            y_count,
            label_prefix,
            mode,
        } = self;

        let parmdb = parmdb.ok_or(RetrieveArgsError::NoParmdb)?;
        let positional = match constraints {
            Some(fields) => Some(RetrievalConstraints::from_positional(&fields)?),
            None => None,
        };
        let p = positional.as_ref();

        let label_prefix = label_prefix
            .or_else(|| p.map(|p| p.label_prefix.clone()))
            .unwrap_or_default();
        let mode = mode.or_else(|| p.map(|p| p.mode)).unwrap_or(
            if label_prefix == HISTORY_LABEL_PREFIX {
                RetrievalMode::History
            } else {
                RetrievalMode::Range
            },
        );
        let c = RetrievalConstraints {
            name_filter: name_filter
                .or_else(|| p.map(|p| p.name_filter.clone()))
                .ok_or(RetrieveArgsError::MissingField("name filter"))?,
            x_start: x_start
                .or_else(|| p.map(|p| p.x_start))
                .ok_or(RetrieveArgsError::MissingField("x start"))?,
            x_end: x_end
                .or_else(|| p.map(|p| p.x_end))
                .ok_or(RetrieveArgsError::MissingField("x end"))?,
            x_count: x_count
                .or_else(|| p.map(|p| p.x_count))
                .ok_or(RetrieveArgsError::MissingField("x count"))?,
            y_start: y_start
                .or_else(|| p.map(|p| p.y_start))
                .ok_or(RetrieveArgsError::MissingField("y start"))?,
            y_end: y_end
                .or_else(|| p.map(|p| p.y_end))
                .ok_or(RetrieveArgsError::MissingField("y end"))?,
            y_count: y_count
                .or_else(|| p.map(|p| p.y_count))
                .ok_or(RetrieveArgsError::MissingField("y count"))?,
            label_prefix,
            mode,
        };
        c.validate()?;
        Ok((parmdb, c))
    }
}
