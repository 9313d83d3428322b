// src/data_analysis/path_overlay.rs

use tracing::info;

use crate::data_input::reference_path::ReferencePath;
use crate::data_input::trace_data::Trace;
use crate::error::{Result, TraceError};
use crate::types::PlanarPath;

/// Picks the boundary at position `ordinal` of the detector output.
pub fn select_boundary(boundaries: &[usize], ordinal: usize) -> Result<usize> {
    boundaries
        .get(ordinal)
        .copied()
        .ok_or(TraceError::InsufficientSegments {
            required: ordinal + 1,
            found: boundaries.len(),
        })
}

/// Maps the executed end-effector path into the reference frame for comparison.
///
/// Covers trace indices `start..end` (`end` defaults to the trace length). The executed
/// XY path is rotated by -90 degrees and translated so that index `start` lands on the
/// reference path's first point:
/// `x' = ref_x0 + (y - y_start)`, `y' = ref_y0 - (x - x_start)`.
pub fn overlay_path(
    trace: &Trace,
    start: usize,
    end: Option<usize>,
    reference: &ReferencePath,
) -> Result<PlanarPath> {
    let len = trace.len();
    let end = end.unwrap_or(len);
    if start >= len {
        return Err(TraceError::BoundaryOutOfRange { index: start, len });
    }
    if end > len || end <= start {
        return Err(TraceError::BoundaryOutOfRange { index: end, len });
    }
    let (ref_x0, ref_y0) = reference
        .origin_xy()
        .ok_or(TraceError::EmptyReferencePath)?;

    let ee_x = trace.pose(0);
    let ee_y = trace.pose(1);
    let (x_start, y_start) = (ee_x[start], ee_y[start]);

    let path: PlanarPath = (start..end)
        .map(|i| (ref_x0 + (ee_y[i] - y_start), ref_y0 + (-ee_x[i] + x_start)))
        .collect();

    info!(
        start,
        end,
        points = path.len(),
        "Mapped executed path onto reference origin ({ref_x0:.4}, {ref_y0:.4})"
    );
    Ok(path)
}
