// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Given a parameter database and retrieval constraints, write out a new
//! dataset.

use std::{fs::File, path::PathBuf};

use clap::Parser;
use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::common::{print_dataset_summary, RetrieveArgs, ARG_FILE_HELP};
use crate::{
    dataset::{assemble, write_dataset},
    retrieve::Retriever,
    store::ParmDbFile,
    ParmplotError,
};

pub(super) const DEFAULT_OUTPUT_DATASET_FILENAME: &str = "parmplot_dataset.json";

lazy_static::lazy_static! {
    static ref OUTPUT_HELP: String =
        format!("Path to the output dataset (JSON). Default: {DEFAULT_OUTPUT_DATASET_FILENAME}");
}

#[derive(Parser, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub(super) struct DatasetArgs {
    #[clap(name = "ARGUMENTS_FILE", help = ARG_FILE_HELP.as_str(), parse(from_os_str))]
    pub(super) args_file: Option<PathBuf>,

    #[clap(flatten)]
    #[serde(rename = "retrieve")]
    #[serde(default)]
    pub(super) retrieve_args: RetrieveArgs,

    #[clap(short, long, help = OUTPUT_HELP.as_str(), parse(from_os_str), help_heading = "OUTPUT FILES")]
    pub(super) output: Option<PathBuf>,
}

impl DatasetArgs {
    /// Both command-line and file arguments overlap in terms of what is
    /// available; this function consolidates everything that was specified into
    /// a single struct. Where applicable, it will prefer CLI parameters over
    /// those in the file.
    ///
    /// This function should only ever merge arguments, and not try to make
    /// sense of them.
    pub(super) fn merge(self) -> Result<DatasetArgs, ParmplotError> {
        debug!("Merging command-line arguments with the argument file");

        let cli_args = self;

        if let Some(arg_file) = cli_args.args_file {
            // Read in the file arguments. Ensure all of the file args are
            // accounted for by pattern matching.
            let DatasetArgs {
                args_file: _,
                retrieve_args,
                output,
            } = unpack_arg_file!(arg_file);

            // Merge all the arguments, preferring the CLI args when available.
            Ok(DatasetArgs {
                args_file: None,
                retrieve_args: cli_args.retrieve_args.merge(retrieve_args),
                output: cli_args.output.or(output),
            })
        } else {
            Ok(cli_args)
        }
    }

    pub(super) fn run(self) -> Result<(), ParmplotError> {
        let Self {
            args_file: _,
            retrieve_args,
            output,
        } = self;
        let (parmdb, constraints) = retrieve_args.parse()?;
        let output = output.unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DATASET_FILENAME));

        info!("Reading parameter database {}", parmdb.display());
        let store = ParmDbFile::read(&parmdb)?;
        let retriever = Retriever::new(store);
        let series = retriever.retrieve(&constraints)?;
        let dataset = assemble(&constraints.name_filter, constraints.mode, series)?;
        print_dataset_summary(&dataset);

        write_dataset(&dataset, File::create(&output)?)?;
        info!("Wrote {}", output.display());
        Ok(())
    }
}
