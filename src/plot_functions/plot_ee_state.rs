// src/plot_functions/plot_ee_state.rs

use std::error::Error;

use crate::channel_names::{pose_name, ORIENTATION_OFFSET};
use crate::constants::{
    COLOR_MEASURED, COLOR_REQUESTED, COLOR_SEGMENT_BOUNDARY, COLOR_SPEED, LINE_WIDTH_PLOT,
};
use crate::data_analysis::motion_analysis::TraceAnalysis;
use crate::plot_framework::{draw_stacked_plot, padded_y_range, PlotSeries};
use crate::types::TimeSeriesPoints;

fn zip_time(time: &[f64], values: &[f64]) -> TimeSeriesPoints {
    time.iter().copied().zip(values.iter().copied()).collect()
}

/// Which half of the pose a figure shows.
#[derive(Debug, Clone, Copy)]
enum PoseFigure {
    Position,
    Orientation,
}

impl PoseFigure {
    fn component_offset(self) -> usize {
        match self {
            PoseFigure::Position => 0,
            PoseFigure::Orientation => ORIENTATION_OFFSET,
        }
    }

    fn file_tag(self) -> &'static str {
        match self {
            PoseFigure::Position => "EEPosition",
            PoseFigure::Orientation => "EEOrientation",
        }
    }

    fn unit(self) -> &'static str {
        match self {
            PoseFigure::Position => "m",
            PoseFigure::Orientation => "rad",
        }
    }

    fn speed_label(self) -> &'static str {
        match self {
            PoseFigure::Position => "Laydown Speed (m/s)",
            PoseFigure::Orientation => "Angular Speed (rad/s)",
        }
    }
}

/// Generates the end-effector position figure (X, Y, Z, laydown speed) and the
/// orientation figure (A, B, C, angular speed).
pub fn plot_ee_state(
    analysis: &TraceAnalysis,
    output_prefix: &str,
    root_name: &str,
) -> Result<(), Box<dyn Error>> {
    plot_pose_figure(analysis, output_prefix, root_name, PoseFigure::Position)?;
    plot_pose_figure(analysis, output_prefix, root_name, PoseFigure::Orientation)
}

fn plot_pose_figure(
    analysis: &TraceAnalysis,
    output_prefix: &str,
    root_name: &str,
    figure: PoseFigure,
) -> Result<(), Box<dyn Error>> {
    let time = &analysis.cleaned.time;
    let (Some(&t_first), Some(&t_last)) = (time.first(), time.last()) else {
        return Err("End-effector plots need a non-empty trace".into());
    };
    let x_range = t_first..t_last;
    let offset = figure.component_offset();
    let output_file = format!("{output_prefix}_{}_stacked.png", figure.file_tag());
    let plot_type_name = format!("{} Data", figure.file_tag());

    let components: Vec<(&str, TimeSeriesPoints, Option<TimeSeriesPoints>)> = (offset
        ..offset + 3)
        .map(|c| {
            let measured = zip_time(time, analysis.cleaned.pose(c));
            let requested = analysis
                .cleaned
                .request
                .as_ref()
                .map(|req| zip_time(time, &req.pose[c]));
            (pose_name(c), measured, requested)
        })
        .collect();

    let speed_values = match figure {
        PoseFigure::Position => &analysis.ee_speed.linear,
        PoseFigure::Orientation => &analysis.ee_speed.angular,
    };
    let speed = zip_time(&analysis.ee_speed.time, speed_values);

    let row_names: Vec<&str> = components
        .iter()
        .map(|(name, _, _)| *name)
        .chain(std::iter::once("Speed"))
        .collect();

    draw_stacked_plot(
        &output_file,
        root_name,
        &plot_type_name,
        &row_names,
        |row_index| {
            let (title, y_label, series) = match components.get(row_index) {
                Some((name, measured, requested)) => {
                    let mut series = vec![PlotSeries::line(
                        measured.clone(),
                        "Measured",
                        *COLOR_MEASURED,
                        LINE_WIDTH_PLOT,
                    )];
                    if let Some(requested) = requested {
                        series.push(PlotSeries::line(
                            requested.clone(),
                            "Requested",
                            *COLOR_REQUESTED,
                            LINE_WIDTH_PLOT,
                        ));
                    }
                    (
                        format!("End-Effector {name}"),
                        format!("{name} ({})", figure.unit()),
                        series,
                    )
                }
                None if row_index == components.len() => {
                    let mut series = vec![PlotSeries::line(
                        speed.clone(),
                        figure.speed_label(),
                        *COLOR_SPEED,
                        LINE_WIDTH_PLOT,
                    )];
                    series.extend(analysis.boundaries.iter().filter_map(|&i| {
                        time.get(i).map(|&t| {
                            PlotSeries::vertical_marker(t, *COLOR_SEGMENT_BOUNDARY, LINE_WIDTH_PLOT)
                        })
                    }));
                    (
                        figure.speed_label().to_string(),
                        figure.speed_label().to_string(),
                        series,
                    )
                }
                None => return None,
            };

            let y_range = padded_y_range(
                series
                    .iter()
                    .filter(|s| !s.is_marker_line())
                    .map(|s| s.data.as_slice()),
            )?;

            Some((
                title,
                x_range.clone(),
                y_range,
                series,
                "Time (s)".to_string(),
                y_label,
            ))
        },
    )
}
