// src/plot_functions/plot_joint_states.rs

use std::error::Error;

use crate::channel_names::{joint_name, JOINT_COUNT};
use crate::constants::{
    COLOR_ACCELERATION, COLOR_MEASURED, COLOR_REQUESTED, COLOR_SEGMENT_BOUNDARY, COLOR_VELOCITY,
    LINE_WIDTH_PLOT,
};
use crate::data_analysis::motion_analysis::TraceAnalysis;
use crate::plot_framework::{draw_stacked_plot, padded_y_range, PlotSeries};
use crate::types::TimeSeriesPoints;

const ROW_NAMES: [&str; 3] = ["Angle", "Speed", "Acceleration"];

fn zip_time(time: &[f64], values: &[f64]) -> TimeSeriesPoints {
    time.iter().copied().zip(values.iter().copied()).collect()
}

/// Generates one stacked plot per joint: angle, velocity and acceleration over time.
///
/// The angle row also shows the commanded angle when the log carried it.
/// Segment boundaries are drawn as dotted markers on the velocity row.
pub fn plot_joint_states(
    analysis: &TraceAnalysis,
    output_prefix: &str,
    root_name: &str,
) -> Result<(), Box<dyn Error>> {
    let time = &analysis.cleaned.time;
    let (Some(&t_first), Some(&t_last)) = (time.first(), time.last()) else {
        return Err("Joint state plots need a non-empty trace".into());
    };
    let x_range = t_first..t_last;

    let boundary_markers: Vec<PlotSeries> = analysis
        .boundaries
        .iter()
        .filter_map(|&i| time.get(i))
        .map(|&t| PlotSeries::vertical_marker(t, *COLOR_SEGMENT_BOUNDARY, LINE_WIDTH_PLOT))
        .collect();

    for joint in 0..JOINT_COUNT {
        let name = joint_name(joint);
        let output_file = format!("{output_prefix}_JointState_{name}_stacked.png");
        let plot_type_name = format!("Joint {name}");

        let angle = zip_time(time, analysis.cleaned.joint(joint));
        let requested_angle = analysis
            .cleaned
            .request
            .as_ref()
            .map(|req| zip_time(time, &req.joints[joint]));
        let velocity = zip_time(time, analysis.velocity.joint(joint));
        let acceleration = zip_time(time, analysis.acceleration.joint(joint));

        draw_stacked_plot(
            &output_file,
            root_name,
            &plot_type_name,
            &ROW_NAMES,
            |row_index| {
                let (title, y_label, series) = match row_index {
                    0 => {
                        let mut series = vec![PlotSeries::line(
                            angle.clone(),
                            "Measured",
                            *COLOR_MEASURED,
                            LINE_WIDTH_PLOT,
                        )];
                        if let Some(requested) = &requested_angle {
                            series.push(PlotSeries::line(
                                requested.clone(),
                                "Requested",
                                *COLOR_REQUESTED,
                                LINE_WIDTH_PLOT,
                            ));
                        }
                        (format!("Joint State {name}"), "Angle (rad)", series)
                    }
                    1 => {
                        let mut series = vec![PlotSeries::line(
                            velocity.clone(),
                            "d(Angle)/dt",
                            *COLOR_VELOCITY,
                            LINE_WIDTH_PLOT,
                        )];
                        series.extend(boundary_markers.iter().cloned());
                        (format!("{name} Speed"), "Speed (rad/s)", series)
                    }
                    2 => (
                        format!("{name} Acceleration"),
                        "Acceleration (rad/s²)",
                        vec![PlotSeries::line(
                            acceleration.clone(),
                            "d²(Angle)/dt²",
                            *COLOR_ACCELERATION,
                            LINE_WIDTH_PLOT,
                        )],
                    ),
                    _ => return None,
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
                    y_label.to_string(),
                ))
            },
        )?;
    }

    Ok(())
}
