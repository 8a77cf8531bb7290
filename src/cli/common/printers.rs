// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/// Pretty printers for reporting information.
use std::borrow::Cow;

use crate::dataset::Dataset;

const VERTICAL: char = '│';
const UP_AND_RIGHT: char = '└';
const VERTICAL_AND_RIGHT: char = '├';

/// Lines of a dataset summary, as blocks of lines that share a tree branch.
fn dataset_summary_blocks(dataset: &Dataset) -> Vec<Vec<Cow<'static, str>>> {
    let mut blocks: Vec<Vec<Cow<'static, str>>> = vec![
        vec![dataset.subname().to_string().into()],
        vec![
            format!("x: {} {}", dataset.x_axis_label(), dataset.x_axis_unit())
                .trim_end()
                .to_string()
                .into(),
            format!("y: {} {}", dataset.y_axis_label(), dataset.y_axis_unit())
                .trim_end()
                .to_string()
                .into(),
        ],
    ];
    let series = dataset
        .series()
        .iter()
        .map(|s| format!("{} ({} samples)", s.label(), s.len()).into())
        .collect::<Vec<_>>();
    if series.is_empty() {
        blocks.push(vec!["No series".into()]);
    } else {
        blocks.push(series);
    }
    blocks
}

/// The tree symbol in front of a line.
fn symbol(i_line: usize, num_lines: usize, i_block: usize, num_blocks: usize) -> char {
    match (i_line, i_line + 1 == num_lines, i_block + 1 == num_blocks) {
        (0, false, _) => VERTICAL_AND_RIGHT,
        (0, _, false) => VERTICAL_AND_RIGHT,
        (0, true, true) => UP_AND_RIGHT,
        _ => VERTICAL,
    }
}

/// Log a summary of a dataset (its name, axes and series) at info level.
pub(crate) fn print_dataset_summary(dataset: &Dataset) {
    log::info!("{}", console::style(dataset.name()).bold());
    let blocks = dataset_summary_blocks(dataset);
    let num_blocks = blocks.len();
    for (i_block, block) in blocks.into_iter().enumerate() {
        let num_lines = block.len();
        for (i_line, line) in block.into_iter().enumerate() {
            log::info!("{} {line}", symbol(i_line, num_lines, i_block, num_blocks));
        }
    }
    log::info!("");
}
