// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Reading and writing datasets as JSON.

use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::Path,
};

use log::debug;

use super::{Dataset, DatasetError};

/// Read a dataset from a JSON file. The series invariants are checked while
/// decoding.
pub fn read_dataset<P: AsRef<Path>>(file: P) -> Result<Dataset, DatasetError> {
    let file = file.as_ref();
    debug!("Reading dataset from {}", file.display());
    let reader = BufReader::new(File::open(file)?);
    serde_json::from_reader(reader).map_err(|source| DatasetError::Json {
        file: file.to_path_buf(),
        source,
    })
}

/// Write a dataset as pretty-printed JSON.
pub fn write_dataset<W: Write>(dataset: &Dataset, writer: W) -> Result<(), DatasetError> {
    let mut writer = BufWriter::new(writer);
    serde_json::to_writer_pretty(&mut writer, dataset).map_err(DatasetError::Encode)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}
