// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Parameter databases stored in TOML or JSON files.
//!
//! A file lists parameters in order. Each parameter is a 2-D polynomial over a
//! normalised (x, y) domain (usually frequency and time), plus an optional
//! solve history:
//!
//! ```toml
//! [[parm]]
//! name = "Gain:0:0:Real:CS001HBA0"
//! # Rows are powers of x, columns are powers of y.
//! coeffs = [[1.0, 0.0], [0.25, 0.0]]
//! x_offset = 120e6
//! x_scale = 1e6
//! # [solve time, value] pairs.
//! history = [[0.0, 1.5], [10.0, 1.25]]
//! ```

use std::{
    collections::HashSet,
    fs::File,
    io::Read,
    path::{Path, PathBuf},
    str::FromStr,
};

use itertools::Itertools;
use log::{debug, trace};
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

use super::{match_names, ParmStore, ParmStoreError, ParmValues};
use crate::math::cell_midpoint;

lazy_static::lazy_static! {
    pub static ref PARMDB_FILE_TYPES_COMMA_SEPARATED: String = ParmDbFileType::iter().join(", ");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter, EnumString)]
pub enum ParmDbFileType {
    #[strum(serialize = "toml")]
    Toml,

    #[strum(serialize = "json")]
    Json,
}

fn one() -> f64 {
    1.0
}

/// The definition of a single parameter in a parameter database file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParmDef {
    pub name: String,

    /// Polynomial coefficients. `coeffs[i][j]` multiplies `x^i * y^j`, where x
    /// and y are normalised with the offsets and scales below. No coefficients
    /// means the parameter has no range values.
    #[serde(default)]
    pub coeffs: Vec<Vec<f64>>,

    #[serde(default)]
    pub x_offset: f64,

    #[serde(default = "one")]
    pub x_scale: f64,

    #[serde(default)]
    pub y_offset: f64,

    #[serde(default = "one")]
    pub y_scale: f64,

    /// (solve time, value) pairs, in the order they were solved.
    #[serde(default)]
    pub history: Vec<(f64, f64)>,
}

impl ParmDef {
    /// Evaluate the polynomial at (x, y).
    pub fn eval(&self, x: f64, y: f64) -> f64 {
        let x = (x - self.x_offset) / self.x_scale;
        let y = (y - self.y_offset) / self.y_scale;
        let mut x_pow = 1.0;
        let mut sum = 0.0;
        for row in &self.coeffs {
            let mut y_pow = 1.0;
            for c in row {
                sum += c * x_pow * y_pow;
                y_pow *= y;
            }
            x_pow *= x;
        }
        sum
    }

    fn validate(&self) -> Result<(), ParmStoreError> {
        if let Some(first) = self.coeffs.first() {
            if let Some(bad) = self.coeffs.iter().find(|r| r.len() != first.len()) {
                return Err(ParmStoreError::RaggedCoeffs {
                    name: self.name.clone(),
                    expected: first.len(),
                    got: bad.len(),
                });
            }
        }
        if self.x_scale == 0.0 {
            return Err(ParmStoreError::ZeroScale {
                name: self.name.clone(),
                axis: "x",
            });
        }
        if self.y_scale == 0.0 {
            return Err(ParmStoreError::ZeroScale {
                name: self.name.clone(),
                axis: "y",
            });
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct ParmDbContents {
    #[serde(rename = "parm", default)]
    parms: Vec<ParmDef>,
}

/// A parameter database read from a file.
#[derive(Debug, Clone)]
pub struct ParmDbFile {
    parms: Vec<ParmDef>,
}

impl ParmDbFile {
    /// Make a parameter database from parameter definitions. Names must be
    /// unique.
    pub fn new(parms: Vec<ParmDef>) -> Result<ParmDbFile, ParmStoreError> {
        let mut seen = HashSet::with_capacity(parms.len());
        for parm in &parms {
            if !seen.insert(parm.name.as_str()) {
                return Err(ParmStoreError::DuplicateParm(parm.name.clone()));
            }
            parm.validate()?;
        }
        Ok(ParmDbFile { parms })
    }

    /// Read a parameter database file. The type is determined by the file's
    /// extension.
    pub fn read<P: AsRef<Path>>(file: P) -> Result<ParmDbFile, ParmStoreError> {
        let file = file.as_ref();
        debug!("Attempting to read parameter database {}", file.display());
        let file_type = file
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .and_then(|e| ParmDbFileType::from_str(&e).ok())
            .ok_or_else(|| ParmStoreError::UnsupportedExt(file.to_path_buf()))?;

        let mut contents = String::new();
        File::open(file)?.read_to_string(&mut contents)?;
        Self::parse(&contents, file_type, file)
    }

    pub(crate) fn parse(
        contents: &str,
        file_type: ParmDbFileType,
        file: &Path,
    ) -> Result<ParmDbFile, ParmStoreError> {
        let contents: ParmDbContents = match file_type {
            ParmDbFileType::Toml => {
                toml::from_str(contents).map_err(|source| ParmStoreError::Toml {
                    file: PathBuf::from(file),
                    source,
                })?
            }
            ParmDbFileType::Json => {
                serde_json::from_str(contents).map_err(|source| ParmStoreError::Json {
                    file: PathBuf::from(file),
                    source,
                })?
            }
        };
        debug!("Read {} parameters", contents.parms.len());
        ParmDbFile::new(contents.parms)
    }

    pub fn parms(&self) -> &[ParmDef] {
        &self.parms
    }

    fn get(&self, name: &str) -> Result<&ParmDef, ParmStoreError> {
        self.parms
            .iter()
            .find(|p| p.name == name)
            .ok_or_else(|| ParmStoreError::UnknownParm(name.to_string()))
    }
}

impl ParmStore for ParmDbFile {
    fn names(&self, pattern: &str) -> Result<Vec<String>, ParmStoreError> {
        match_names(self.parms.iter().map(|p| p.name.as_str()), pattern)
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
        let parm = self.get(name)?;
        let values = if parm.coeffs.is_empty() {
            vec![]
        } else {
            let mut values = Vec::with_capacity(x_count * y_count);
            for i_y in 0..y_count {
                let y = cell_midpoint(y_start, y_end, y_count, i_y);
                for i_x in 0..x_count {
                    let x = cell_midpoint(x_start, x_end, x_count, i_x);
                    values.push(parm.eval(x, y));
                }
            }
            values
        };
        trace!("{name}: {values:?}");
        Ok(ParmValues::from([(parm.name.clone(), values)]))
    }

    fn history_values(
        &self,
        name: &str,
        _x_start: f64,
        _x_end: f64,
        _y_start: f64,
        _y_end: f64,
        solve_time_start: f64,
        solve_time_end: f64,
    ) -> Result<ParmValues, ParmStoreError> {
        let parm = self.get(name)?;
        let values = parm
            .history
            .iter()
            .filter(|(t, _)| (solve_time_start..=solve_time_end).contains(t))
            .map(|&(_, v)| v)
            .collect::<Vec<_>>();
        trace!("{name}: {values:?}");
        Ok(ParmValues::from([(parm.name.clone(), values)]))
    }
}
