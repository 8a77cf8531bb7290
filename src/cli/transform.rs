// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Apply operations to a dataset file.

use std::{fs::File, path::PathBuf, str::FromStr};

use clap::Parser;
use log::{debug, info};
use thiserror::Error;

use super::common::print_dataset_summary;
use crate::{
    dataset::{read_dataset, write_dataset, Dataset},
    retrieve::Retriever,
    store::{MemoryParmStore, ParmDbFile, ParmStore},
    transform::{Operation, Transformer, OPERATION_TAGS_COMMA_SEPARATED},
    ParmplotError,
};

lazy_static::lazy_static! {
    static ref OP_HELP: String =
        format!("An operation to apply; may be given multiple times, and operations are applied in order. Valid operations are: {}. e.g. 'subtract-line:Gain:0:0:CS001', 'add-offset:0.5', 'delete:a;b', 'add:Gain:*,0,10,5,0,1,1,'",
                *OPERATION_TAGS_COMMA_SEPARATED);
}

#[derive(Parser, Debug, Clone, Default)]
pub(super) struct TransformArgs {
    /// Path to the dataset (JSON) to transform.
    #[clap(name = "DATASET", parse(from_os_str))]
    input: PathBuf,

    #[clap(
        short = 'x',
        long = "op",
        multiple_occurrences(true),
        allow_hyphen_values = true,
        help = OP_HELP.as_str()
    )]
    ops: Vec<String>,

    /// Path to the parameter database used by "add" operations.
    #[clap(short, long, parse(from_os_str))]
    parmdb: Option<PathBuf>,

    /// Referring to a series that isn't in the dataset is an error, rather
    /// than being ignored.
    #[clap(long)]
    strict: bool,

    /// Path to the output dataset. The default is to overwrite the input
    /// dataset.
    #[clap(short, long, parse(from_os_str))]
    output: Option<PathBuf>,
}

#[derive(Error, Debug)]
pub(super) enum TransformArgsError {
    #[error("No operations were specified")]
    NoOperations,

    #[error("An \"add\" operation was specified, but no parameter database was supplied")]
    AddWithoutParmdb,
}

impl TransformArgs {
    pub(super) fn run(self) -> Result<(), ParmplotError> {
        debug!("{:#?}", self);

        let Self {
            input,
            ops,
            parmdb,
            strict,
            output,
        } = self;

        // Parse everything before touching any files.
        if ops.is_empty() {
            return Err(TransformArgsError::NoOperations.into());
        }
        let ops = ops
            .iter()
            .map(|s| Operation::from_str(s))
            .collect::<Result<Vec<_>, _>>()?;
        let needs_store = ops.iter().any(|op| matches!(op, Operation::Add(_)));

        let mut dataset = read_dataset(&input)?;
        match parmdb {
            Some(parmdb) => {
                info!("Reading parameter database {}", parmdb.display());
                let retriever = Retriever::new(ParmDbFile::read(&parmdb)?);
                apply_all(&mut dataset, &ops, &retriever, strict)?;
            }
            None if needs_store => return Err(TransformArgsError::AddWithoutParmdb.into()),
            None => {
                let retriever = Retriever::new(MemoryParmStore::new());
                apply_all(&mut dataset, &ops, &retriever, strict)?;
            }
        }
        print_dataset_summary(&dataset);

        let output = output.unwrap_or(input);
        write_dataset(&dataset, File::create(&output)?)?;
        info!("Wrote {}", output.display());
        Ok(())
    }
}

fn apply_all<S: ParmStore>(
    dataset: &mut Dataset,
    ops: &[Operation],
    retriever: &Retriever<S>,
    strict: bool,
) -> Result<(), ParmplotError> {
    let transformer = Transformer::new(retriever).strict(strict);
    for op in ops {
        info!("Applying {op}");
        transformer.apply(dataset, op)?;
    }
    Ok(())
}
