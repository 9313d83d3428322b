// src/plot_functions/plot_path_overlay.rs

use std::error::Error;

use crate::constants::{
    COLOR_PATH_PERFORMED, COLOR_PATH_REFERENCE, LINE_WIDTH_PATH, LINE_WIDTH_PLOT, PATH_MARKER_SIZE,
};
use crate::data_input::reference_path::ReferencePath;
use crate::plot_framework::{calculate_range, draw_single_plot, value_bounds, PlotConfig, PlotSeries};
use crate::types::PlanarPath;

/// Requested path: dashed red line with a marker on every reference point.
fn reference_series(points: PlanarPath) -> PlotSeries {
    PlotSeries::line(points, "Path requested", *COLOR_PATH_REFERENCE, LINE_WIDTH_PLOT)
        .dashed()
        .with_markers(PATH_MARKER_SIZE)
}

/// Plots the performed end-effector path on top of the requested reference path.
///
/// Both axes share the same padded extent so the path shape is not distorted by
/// the aspect ratio.
pub fn plot_path_overlay(
    reference: &ReferencePath,
    performed: &PlanarPath,
    output_prefix: &str,
    root_name: &str,
) -> Result<(), Box<dyn Error>> {
    let output_file = format!("{output_prefix}_PathOverlay.png");
    let reference_points = reference.xy_points();

    let xs: Vec<f64> = reference_points
        .iter()
        .chain(performed.iter())
        .map(|&(x, _)| x)
        .collect();
    let ys: Vec<f64> = reference_points
        .iter()
        .chain(performed.iter())
        .map(|&(_, y)| y)
        .collect();

    let (x_range, y_range) = match (value_bounds(&xs), value_bounds(&ys)) {
        (Some((x_min, x_max)), Some((y_min, y_max))) => {
            let half_span = (x_max - x_min).max(y_max - y_min) / 2.0;
            let (x_mid, y_mid) = ((x_min + x_max) / 2.0, (y_min + y_max) / 2.0);
            let (x_lo, x_hi) = calculate_range(x_mid - half_span, x_mid + half_span);
            let (y_lo, y_hi) = calculate_range(y_mid - half_span, y_mid + half_span);
            (x_lo..x_hi, y_lo..y_hi)
        }
        _ => (0.0..0.0, 0.0..0.0),
    };

    let plot_config = PlotConfig {
        title: "Path performed".to_string(),
        x_range,
        y_range,
        series: vec![
            reference_series(reference_points),
            PlotSeries::line(
                performed.clone(),
                "Path performed",
                *COLOR_PATH_PERFORMED,
                LINE_WIDTH_PATH,
            ),
        ],
        x_label: "x (m)".to_string(),
        y_label: "y (m)".to_string(),
    };

    draw_single_plot(&output_file, root_name, "Path Overlay", &plot_config)
}
