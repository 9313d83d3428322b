// src/plot_framework.rs

use ndarray::ArrayView1;
use ndarray_stats::QuantileExt;
use plotters::backend::{BitMapBackend, DrawingBackend};
use plotters::chart::{ChartBuilder, SeriesLabelPosition};
use plotters::coord::Shift;
use plotters::drawing::{DrawingArea, IntoDrawingArea};
use plotters::element::{Circle, PathElement, Text};
use plotters::series::{DashedLineSeries, LineSeries};
use plotters::style::colors::{BLACK, RED, WHITE};
use plotters::style::{Color, IntoFont, RGBColor};

use std::error::Error;
use std::ops::Range;

use crate::constants::{
    DASH_LENGTH_PX, DASH_SPACING_PX, DOTTED_LINE_SEGMENTS, FONT_SIZE_AXIS_LABEL, FONT_SIZE_CHART_TITLE, FONT_SIZE_LEGEND,
    FONT_SIZE_MAIN_TITLE, FONT_SIZE_MESSAGE, LINE_WIDTH_LEGEND, PLOT_HEIGHT, PLOT_WIDTH,
};
use crate::types::RowPlotData;

/// Special prefix for vertical marker series (segment boundaries) kept out of legends
pub const MARKER_LINE_PREFIX: &str = "__MARKER_LINE__";
/// Special prefix for dotted vertical marker series
pub const MARKER_LINE_DOTTED_PREFIX: &str = "__MARKER_LINE_DOTTED__";

/// Calculate plot range with padding.
/// Adds 15% padding, or a fixed padding for very small ranges.
pub fn calculate_range(min_val: f64, max_val: f64) -> (f64, f64) {
    let (min, max) = if min_val <= max_val {
        (min_val, max_val)
    } else {
        (max_val, min_val)
    };
    let range = (max - min).abs();
    let padding = if range < 1e-6 { 0.5 } else { range * 0.15 };
    (min - padding, max + padding)
}

/// Minimum and maximum of `values`; `None` when empty or not comparable (NaN).
pub fn value_bounds(values: &[f64]) -> Option<(f64, f64)> {
    let view = ArrayView1::from(values);
    let min = *view.min().ok()?;
    let max = *view.max().ok()?;
    Some((min, max))
}

/// Padded Y range covering every point of every series.
pub fn padded_y_range<'a, I>(series: I) -> Option<Range<f64>>
where
    I: IntoIterator<Item = &'a [(f64, f64)]>,
{
    let ys: Vec<f64> = series
        .into_iter()
        .flat_map(|s| s.iter().map(|&(_, y)| y))
        .collect();
    let (min, max) = value_bounds(&ys)?;
    let (lo, hi) = calculate_range(min, max);
    Some(lo..hi)
}

/// Axis tick label text: k/M notation for large values, scientific notation for tiny ones.
pub fn format_axis_value(value: f64) -> String {
    let magnitude = value.abs();
    if magnitude >= 1_000_000.0 {
        format!("{:.1}M", value / 1_000_000.0)
    } else if magnitude >= 1000.0 {
        format!("{:.0}k", value / 1000.0)
    } else if magnitude >= 10.0 {
        format!("{:.0}", value)
    } else if magnitude >= 0.01 || magnitude == 0.0 {
        format!("{:.2}", value)
    } else {
        format!("{:.1e}", value)
    }
}

/// Draw a "Data Unavailable" message on a plot area.
pub fn draw_unavailable_message(
    area: &DrawingArea<BitMapBackend, Shift>,
    row_name: &str,
    plot_type: &str,
    reason: &str,
) -> Result<(), Box<dyn Error>> {
    const CHAR_WIDTH_RATIO: f32 = 0.6; // Approximate character width relative to font size
    const LINE_HEIGHT_SPACING: i32 = 4;

    let (x_range, y_range) = area.get_pixel_range();
    let (width, height) = (x_range.end - x_range.start, y_range.end - y_range.start);
    let message = format!("{row_name} {plot_type} Data Unavailable:\n{reason}");

    let estimated_char_width = (FONT_SIZE_MESSAGE as f32 * CHAR_WIDTH_RATIO) as i32;
    let estimated_line_height = FONT_SIZE_MESSAGE + LINE_HEIGHT_SPACING;
    let lines: Vec<&str> = message.split('\n').collect();
    let max_line_length = lines.iter().map(|line| line.len()).max().unwrap_or(0) as i32;
    let estimated_text_width = max_line_length.saturating_mul(estimated_char_width);
    let estimated_text_height = (lines.len() as i32).saturating_mul(estimated_line_height);

    let center_x = width / 2 - estimated_text_width / 2;
    let center_y = height / 2 - estimated_text_height / 2;

    let text_style = ("sans-serif", FONT_SIZE_MESSAGE).into_font().color(&RED);
    area.draw(&Text::new(message, (center_x, center_y), text_style))?;
    Ok(())
}

#[derive(Clone)]
pub struct PlotSeries {
    pub data: Vec<(f64, f64)>,
    pub label: String,
    pub color: RGBColor,
    pub stroke_width: u32,
    /// Radius of point markers drawn on every data point; 0 draws none.
    pub marker_size: u32,
    pub dashed: bool,
}

impl PlotSeries {
    pub fn line(data: Vec<(f64, f64)>, label: &str, color: RGBColor, stroke_width: u32) -> Self {
        Self {
            data,
            label: label.to_string(),
            color,
            stroke_width,
            marker_size: 0,
            dashed: false,
        }
    }

    /// Same series drawn as a dashed line.
    pub fn dashed(mut self) -> Self {
        self.dashed = true;
        self
    }

    /// Same series with a point marker of radius `size` on every data point.
    pub fn with_markers(mut self, size: u32) -> Self {
        self.marker_size = size;
        self
    }

    /// Dotted vertical line at `x`, drawn across the full Y range and left out of the legend.
    pub fn vertical_marker(x: f64, color: RGBColor, stroke_width: u32) -> Self {
        Self {
            data: vec![(x, 0.0), (x, 0.0)],
            label: MARKER_LINE_DOTTED_PREFIX.to_string(),
            color,
            stroke_width,
            marker_size: 0,
            dashed: false,
        }
    }

    pub fn is_marker_line(&self) -> bool {
        (self.label.starts_with(MARKER_LINE_PREFIX)
            || self.label.starts_with(MARKER_LINE_DOTTED_PREFIX))
            && self.data.len() == 2
    }
}

#[derive(Clone)]
pub struct PlotConfig {
    pub title: String,
    pub x_range: Range<f64>,
    pub y_range: Range<f64>,
    pub series: Vec<PlotSeries>,
    pub x_label: String,
    pub y_label: String,
}

impl PlotConfig {
    fn has_data(&self) -> bool {
        self.series
            .iter()
            .any(|s| !s.data.is_empty() && !s.is_marker_line())
    }

    fn has_valid_ranges(&self) -> bool {
        self.x_range.end > self.x_range.start && self.y_range.end > self.y_range.start
    }

    /// Why the chart cannot be drawn, if it cannot.
    fn unavailable_reason(&self) -> Option<&'static str> {
        if !self.has_data() {
            Some("No data points")
        } else if !self.has_valid_ranges() {
            Some("Invalid ranges")
        } else {
            None
        }
    }
}

/// Draws a single chart using a PlotConfig struct.
fn draw_single_chart_with_config(
    area: &DrawingArea<BitMapBackend, Shift>,
    plot_config: &PlotConfig,
) -> Result<(), Box<dyn Error>> {
    let mut chart = ChartBuilder::on(area)
        .caption(&plot_config.title, ("sans-serif", FONT_SIZE_CHART_TITLE))
        .margin(5)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(plot_config.x_range.clone(), plot_config.y_range.clone())?;

    chart
        .configure_mesh()
        .x_desc(&plot_config.x_label)
        .y_desc(&plot_config.y_label)
        .x_labels(20)
        .y_labels(10)
        .x_label_formatter(&|x| format_axis_value(*x))
        .y_label_formatter(&|y| format_axis_value(*y))
        .light_line_style(WHITE.mix(0.7))
        .label_style(("sans-serif", FONT_SIZE_AXIS_LABEL))
        .draw()?;

    let mut legend_series_count = 0;

    for s in &plot_config.series {
        if s.data.is_empty() {
            continue;
        }

        if s.is_marker_line() {
            let mut x = s.data[0].0;
            if !x.is_finite() {
                continue; // skip malformed input
            }
            // Keep the line within the plotted X range
            x = x.clamp(plot_config.x_range.start, plot_config.x_range.end);
            let y0 = plot_config.y_range.start;
            let y1 = plot_config.y_range.end;

            if s.label.starts_with(MARKER_LINE_DOTTED_PREFIX) {
                // Half of each segment is dash, half is gap
                let segment_length = (y1 - y0) / (DOTTED_LINE_SEGMENTS as f64 * 2.0);
                for i in 0..DOTTED_LINE_SEGMENTS {
                    let y_start = y0 + (i as f64 * 2.0) * segment_length;
                    let y_end = y_start + segment_length;
                    if y_end <= y1 {
                        chart.draw_series(LineSeries::new(
                            vec![(x, y_start), (x, y_end)],
                            s.color.stroke_width(s.stroke_width),
                        ))?;
                    }
                }
            } else {
                chart.draw_series(LineSeries::new(
                    vec![(x, y0), (x, y1)],
                    s.color.stroke_width(s.stroke_width),
                ))?;
            }
            continue;
        }

        let style = s.color.stroke_width(s.stroke_width);
        let series = if s.dashed {
            chart.draw_series(DashedLineSeries::new(
                s.data.iter().cloned(),
                DASH_LENGTH_PX,
                DASH_SPACING_PX,
                style,
            ))?
        } else {
            chart.draw_series(LineSeries::new(s.data.iter().cloned(), style))?
        };

        if !s.label.is_empty() {
            series.label(&s.label).legend(move |(x, y)| {
                PathElement::new(
                    vec![(x, y), (x + 20, y)],
                    s.color.stroke_width(LINE_WIDTH_LEGEND),
                )
            });
            legend_series_count += 1;
        }

        if s.marker_size > 0 {
            chart.draw_series(
                s.data
                    .iter()
                    .map(|&point| Circle::new(point, s.marker_size, s.color.filled())),
            )?;
        }
    }

    if legend_series_count > 0 {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .label_font(("sans-serif", FONT_SIZE_LEGEND))
            .draw()?;
    }

    Ok(())
}

fn draw_title(
    root_area: &DrawingArea<BitMapBackend, Shift>,
    root_name: &str,
) -> Result<(), Box<dyn Error>> {
    root_area.fill(&WHITE)?;
    root_area.draw(&Text::new(
        root_name,
        (10, 10),
        ("sans-serif", FONT_SIZE_MAIN_TITLE)
            .into_font()
            .color(&BLACK),
    ))?;
    Ok(())
}

/// Creates a stacked plot image with one subplot per entry of `row_names`.
pub fn draw_stacked_plot<'a, F>(
    output_filename: &'a str,
    root_name: &str,
    plot_type_name: &str,
    row_names: &[&str],
    mut get_row_plot_data: F,
) -> Result<(), Box<dyn Error>>
where
    F: FnMut(usize) -> Option<RowPlotData>,
    <BitMapBackend<'a> as DrawingBackend>::ErrorType: 'static,
{
    let root_area =
        BitMapBackend::new(output_filename, (PLOT_WIDTH, PLOT_HEIGHT)).into_drawing_area();
    draw_title(&root_area, root_name)?;
    let margined_root_area = root_area.margin(50, 5, 5, 5);
    let sub_plot_areas = margined_root_area.split_evenly((row_names.len(), 1));
    let mut any_row_plotted = false;

    for (row_index, (area, row_name)) in sub_plot_areas.iter().zip(row_names).enumerate() {
        match get_row_plot_data(row_index) {
            Some((title, x_range, y_range, series, x_label, y_label)) => {
                let plot_config = PlotConfig {
                    title,
                    x_range,
                    y_range,
                    series,
                    x_label,
                    y_label,
                };
                match plot_config.unavailable_reason() {
                    None => {
                        draw_single_chart_with_config(area, &plot_config)?;
                        any_row_plotted = true;
                    }
                    Some(reason) => {
                        draw_unavailable_message(area, row_name, plot_type_name, reason)?;
                    }
                }
            }
            None => {
                draw_unavailable_message(
                    area,
                    row_name,
                    plot_type_name,
                    "Calculation/Data Extraction Failed",
                )?;
            }
        }
    }

    root_area.present()?;
    if any_row_plotted {
        println!("  Stacked plot saved as '{output_filename}'.");
    } else {
        println!("  '{output_filename}' saved with placeholder messages only: no row had data to plot.");
    }
    Ok(())
}

/// Creates a single-chart plot image.
pub fn draw_single_plot<'a>(
    output_filename: &'a str,
    root_name: &str,
    plot_type_name: &str,
    plot_config: &PlotConfig,
) -> Result<(), Box<dyn Error>>
where
    <BitMapBackend<'a> as DrawingBackend>::ErrorType: 'static,
{
    let root_area =
        BitMapBackend::new(output_filename, (PLOT_WIDTH, PLOT_HEIGHT)).into_drawing_area();
    draw_title(&root_area, root_name)?;
    let area = root_area.margin(50, 5, 5, 5);

    match plot_config.unavailable_reason() {
        None => {
            draw_single_chart_with_config(&area, plot_config)?;
            root_area.present()?;
            println!("  Plot saved as '{output_filename}'.");
        }
        Some(reason) => {
            draw_unavailable_message(&area, &plot_config.title, plot_type_name, reason)?;
            root_area.present()?;
            println!("  '{output_filename}' saved with placeholder message only: {reason}.");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn calculate_range_pads_fifteen_percent() {
        let (lo, hi) = calculate_range(0.0, 10.0);
        assert!((lo + 1.5).abs() < 1e-12);
        assert!((hi - 11.5).abs() < 1e-12);
    }

    #[test]
    fn calculate_range_handles_flat_and_swapped_input() {
        assert_eq!(calculate_range(2.0, 2.0), (1.5, 2.5));
        let (lo, hi) = calculate_range(4.0, 0.0);
        assert!(lo < 0.0 && hi > 4.0);
    }

    #[test]
    fn value_bounds_of_empty_is_none() {
        assert_eq!(value_bounds(&[]), None);
        assert_eq!(value_bounds(&[3.0, -1.0, 2.0]), Some((-1.0, 3.0)));
    }

    #[test]
    fn padded_y_range_spans_all_series() {
        let a = vec![(0.0, 1.0), (1.0, 2.0)];
        let b = vec![(0.0, -2.0)];
        let range = padded_y_range([a.as_slice(), b.as_slice()]).unwrap();
        assert!(range.start < -2.0 && range.end > 2.0);
        assert!(padded_y_range(std::iter::empty::<&[(f64, f64)]>()).is_none());
    }

    #[test]
    fn marker_series_do_not_count_as_data() {
        let config = PlotConfig {
            title: "t".to_string(),
            x_range: 0.0..1.0,
            y_range: 0.0..1.0,
            series: vec![PlotSeries::vertical_marker(0.5, RED, 1)],
            x_label: String::new(),
            y_label: String::new(),
        };
        assert!(!config.has_data());
        assert!(config.has_valid_ranges());
        assert_eq!(config.unavailable_reason(), Some("No data points"));
    }

    #[test]
    fn unavailable_reason_distinguishes_flat_ranges() {
        let mut config = PlotConfig {
            title: "t".to_string(),
            x_range: 0.0..1.0,
            y_range: 2.0..2.0,
            series: vec![PlotSeries::line(vec![(0.0, 2.0), (1.0, 2.0)], "y", RED, 1)],
            x_label: String::new(),
            y_label: String::new(),
        };
        assert_eq!(config.unavailable_reason(), Some("Invalid ranges"));
        config.y_range = 1.5..2.5;
        assert_eq!(config.unavailable_reason(), None);
    }

    #[test]
    fn series_builders_set_style_flags() {
        let series = PlotSeries::line(vec![(0.0, 1.0)], "ref", RED, 1)
            .dashed()
            .with_markers(3);
        assert!(series.dashed);
        assert_eq!(series.marker_size, 3);
        assert!(!PlotSeries::vertical_marker(0.5, RED, 1).dashed);
    }
}
