// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! A parameter store that hands back preset values.

use log::trace;

use super::{match_names, ParmStore, ParmStoreError, ParmValues};

#[derive(Debug, Clone, Default)]
struct MemoryParm {
    name: String,
    range: Vec<f64>,
    history: Vec<f64>,
}

/// Parameters held in memory. Range and history queries return the preset
/// arrays regardless of the requested domain; names are enumerated in
/// insertion order.
#[derive(Debug, Clone, Default)]
pub struct MemoryParmStore {
    parms: Vec<MemoryParm>,
}

impl MemoryParmStore {
    pub fn new() -> MemoryParmStore {
        MemoryParmStore::default()
    }

    /// Set the values returned for range queries of `name`, adding the
    /// parameter if it doesn't exist yet.
    pub fn with_range(mut self, name: &str, values: Vec<f64>) -> MemoryParmStore {
        self.entry(name).range = values;
        self
    }

    /// Set the values returned for history queries of `name`, adding the
    /// parameter if it doesn't exist yet.
    pub fn with_history(mut self, name: &str, values: Vec<f64>) -> MemoryParmStore {
        self.entry(name).history = values;
        self
    }

    fn entry(&mut self, name: &str) -> &mut MemoryParm {
        let i = match self.parms.iter().position(|p| p.name == name) {
            Some(i) => i,
            None => {
                self.parms.push(MemoryParm {
                    name: name.to_string(),
                    ..Default::default()
                });
                self.parms.len() - 1
            }
        };
        &mut self.parms[i]
    }

    fn get(&self, name: &str) -> Result<&MemoryParm, ParmStoreError> {
        self.parms
            .iter()
            .find(|p| p.name == name)
            .ok_or_else(|| ParmStoreError::UnknownParm(name.to_string()))
    }
}

impl ParmStore for MemoryParmStore {
    fn names(&self, pattern: &str) -> Result<Vec<String>, ParmStoreError> {
        match_names(self.parms.iter().map(|p| p.name.as_str()), pattern)
    }

    fn range_values(
        &self,
        name: &str,
        _x_start: f64,
        _x_end: f64,
        _x_count: usize,
        _y_start: f64,
        _y_end: f64,
        _y_count: usize,
    ) -> Result<ParmValues, ParmStoreError> {
        let parm = self.get(name)?;
        trace!("{name}: {:?}", parm.range);
        Ok(ParmValues::from([(parm.name.clone(), parm.range.clone())]))
    }

    fn history_values(
        &self,
        name: &str,
        _x_start: f64,
        _x_end: f64,
        _y_start: f64,
        _y_end: f64,
        _solve_time_start: f64,
        _solve_time_end: f64,
    ) -> Result<ParmValues, ParmStoreError> {
        let parm = self.get(name)?;
        trace!("{name}: {:?}", parm.history);
        Ok(ParmValues::from([(parm.name.clone(), parm.history.clone())]))
    }
}
