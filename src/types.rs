// src/types.rs
// Type aliases to reduce complexity warnings

use std::ops::Range;

use crate::plot_framework::PlotSeries;

/// (x, y) pairs ready to be drawn as one series.
pub type TimeSeriesPoints = Vec<(f64, f64)>;

/// Path in a 2D plane, one point per sample.
pub type PlanarPath = Vec<(f64, f64)>;

/// One row of a stacked plot
pub type RowPlotData = (
    String,          // title
    Range<f64>,      // x_range
    Range<f64>,      // y_range
    Vec<PlotSeries>, // series
    String,          // x_label
    String,          // y_label
);
