// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Code to plot datasets.

mod error;

pub(crate) use error::PlotError;

use std::path::PathBuf;

use clap::Parser;

use crate::ParmplotError;

#[derive(Parser, Debug, Default)]
pub(crate) struct PlotArgs {
    #[clap(name = "DATASET_FILES", parse(from_os_str))]
    files: Vec<PathBuf>,

    /// The directory to write the plots into. If this doesn't exist, then it
    /// will be created. The filenames are based off of the input files.
    #[clap(short, long, parse(from_os_str))]
    output_directory: Option<PathBuf>,

    /// The width of the plots [pixels].
    #[clap(long, default_value = "1600")]
    width: u32,

    /// The height of the plots [pixels].
    #[clap(long, default_value = "900")]
    height: u32,

    /// Don't draw the legend of series labels.
    #[clap(long)]
    no_legend: bool,
}

impl PlotArgs {
    #[cfg(not(feature = "plotting"))]
    pub(crate) fn run(self) -> Result<(), ParmplotError> {
        // Plotting is an optional feature, as it needs font libraries at
        // compile time.
        Err(ParmplotError::from(PlotError::NoPlottingFeature))
    }

    #[cfg(feature = "plotting")]
    pub(crate) fn run(self) -> Result<(), ParmplotError> {
        plotting::plot_all_dataset_files(self)?;
        Ok(())
    }
}

#[cfg(feature = "plotting")]
mod plotting {
    use std::path::Path;

    use log::{debug, info, warn};
    use plotters::prelude::*;
    use thiserror::Error;

    use super::*;
    use crate::dataset::{read_dataset, Dataset};

    pub(super) fn plot_all_dataset_files(args: PlotArgs) -> Result<(), PlotError> {
        let PlotArgs {
            files,
            output_directory,
            width,
            height,
            no_legend,
        } = args;

        if files.is_empty() {
            return Err(PlotError::NoInputs);
        }
        if let Some(dir) = output_directory.as_deref() {
            if !dir.exists() {
                std::fs::create_dir_all(dir)?;
            }
        }

        for dataset_file in &files {
            debug!("Plotting dataset '{}'", dataset_file.display());
            let dataset = read_dataset(dataset_file)?;
            if dataset.series().is_empty() {
                warn!("'{}' has no series; the plot will be empty", dataset_file.display());
            }

            let mut output = dataset_file.with_extension("png");
            if let Some(dir) = output_directory.as_deref() {
                if let Some(name) = output.file_name() {
                    output = dir.join(name);
                }
            }
            plot_dataset(&dataset, &output, (width, height), !no_legend)?;
            info!("Wrote {}", output.display());
        }

        Ok(())
    }

    /// Draw every series of a dataset as a line on one chart.
    pub(super) fn plot_dataset(
        dataset: &Dataset,
        output: &Path,
        (width, height): (u32, u32),
        legend: bool,
    ) -> Result<(), DrawError> {
        let root = BitMapBackend::new(output, (width, height)).into_drawing_area();
        root.fill(&WHITE)
            .map_err(|e| DrawError::Plotters(Box::new(e)))?;
        let root = root
            .titled(dataset.name(), ("sans-serif", 40))
            .map_err(|e| DrawError::Plotters(Box::new(e)))?;

        let (x_min, x_max) = axis_range(dataset.series().iter().flat_map(|s| s.x_values()));
        let (y_min, y_max) = axis_range(dataset.series().iter().flat_map(|s| s.y_values()));
        let mut cc = ChartBuilder::on(&root)
            .caption(dataset.subname(), ("sans-serif", 24))
            .margin(20)
            .x_label_area_size(60)
            .y_label_area_size(90)
            .build_cartesian_2d(x_min..x_max, y_min..y_max)
            .map_err(|e| DrawError::Chart(e.to_string()))?;

        cc.configure_mesh()
            .x_desc(axis_desc(dataset.x_axis_label(), dataset.x_axis_unit()))
            .y_desc(axis_desc(dataset.y_axis_label(), dataset.y_axis_unit()))
            .light_line_style(WHITE)
            .draw()
            .map_err(|e| DrawError::Chart(e.to_string()))?;

        for (i, series) in dataset.series().iter().enumerate() {
            let colour = Palette99::pick(i).to_rgba();
            cc.draw_series(LineSeries::new(
                series
                    .x_values()
                    .iter()
                    .zip(series.y_values())
                    .filter(|(x, y)| x.is_finite() && y.is_finite())
                    .map(|(&x, &y)| (x, y)),
                ShapeStyle::from(&colour).stroke_width(2),
            ))
            .map_err(|e| DrawError::Series {
                label: series.label().to_string(),
                err: e.to_string(),
            })?
            .label(series.label())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], colour));
        }

        if legend && !dataset.series().is_empty() {
            cc.configure_series_labels()
                .background_style(WHITE.mix(0.8))
                .border_style(BLACK)
                .draw()
                .map_err(|e| DrawError::Chart(e.to_string()))?;
        }

        // Finalise the plot.
        root.present()
            .map_err(|e| DrawError::Plotters(Box::new(e)))?;
        Ok(())
    }

    #[derive(Error, Debug)]
    pub(crate) enum DrawError {
        #[error("While drawing the chart: {0}")]
        Chart(String),

        #[error("While drawing series '{label}': {err}")]
        Series { label: String, err: String },

        #[error("Error from the plotters library: {0}")]
        Plotters(Box<dyn std::error::Error>),
    }
}

/// The range of an axis covering all finite values. Degenerate ranges are
/// widened so that something can be drawn.
#[cfg_attr(not(feature = "plotting"), allow(dead_code))]
fn axis_range<'a, I: Iterator<Item = &'a f64>>(values: I) -> (f64, f64) {
    let (min, max) = values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), &v| {
            (min.min(v), max.max(v))
        });
    if min > max {
        // No finite values.
        (0.0, 1.0)
    } else if (max - min).abs() < f64::EPSILON {
        (min - 0.5, max + 0.5)
    } else {
        (min, max)
    }
}

/// An axis description, e.g. "Frequency (Hz)", or just the label if there's
/// no unit.
#[cfg_attr(not(feature = "plotting"), allow(dead_code))]
fn axis_desc(label: &str, unit: &str) -> String {
    if unit.is_empty() {
        label.to_string()
    } else {
        format!("{label} {unit}")
    }
}
