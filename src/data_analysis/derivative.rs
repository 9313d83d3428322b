// src/data_analysis/derivative.rs

use crate::data_input::trace_data::Trace;
use crate::error::{Result, TraceError};

/// Finite-difference stencil used to estimate a derivative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Stencil {
    /// First order, central: (v[i+1] - v[i-1]) / (t[i+1] - t[i-1]).
    #[default]
    Central,
    /// First order, forward: (v[i+1] - v[i]) / (t[i+1] - t[i]).
    Forward,
    /// First order, backward: (v[i] - v[i-1]) / (t[i] - t[i-1]).
    Backward,
    /// Second order, forward: (-v[i+2] + 4v[i+1] - 3v[i]) / (t[i+2] - t[i]).
    ForwardSecondOrder,
    /// Second order, backward: (3v[i] - 4v[i-1] + v[i-2]) / (t[i] - t[i-2]).
    BackwardSecondOrder,
}

fn validate_time_axis(time: &[f64], values: &[f64]) -> Result<()> {
    if time.len() != values.len() {
        return Err(TraceError::LengthMismatch {
            expected: time.len(),
            found: values.len(),
        });
    }
    if time.len() < 2 {
        return Err(TraceError::TooFewSamples(time.len()));
    }
    if let Some(i) = time.windows(2).position(|w| w[1] <= w[0]) {
        return Err(TraceError::NonIncreasingTime(i + 1));
    }
    Ok(())
}

/// Calculates the discrete derivative of `values` over `time`.
///
/// The output has the same length as the input. Samples the stencil cannot reach
/// (both ends for `Central`) are set to 0.
pub fn compute_derivative(time: &[f64], values: &[f64], stencil: Stencil) -> Result<Vec<f64>> {
    validate_time_axis(time, values)?;

    let n = values.len();
    let mut derivative = vec![0.0; n];

    match stencil {
        Stencil::Central => {
            for i in 1..n - 1 {
                derivative[i] = (values[i + 1] - values[i - 1]) / (time[i + 1] - time[i - 1]);
            }
        }
        Stencil::Forward => {
            for i in 0..n - 1 {
                derivative[i] = (values[i + 1] - values[i]) / (time[i + 1] - time[i]);
            }
        }
        Stencil::Backward => {
            for i in 1..n {
                derivative[i] = (values[i] - values[i - 1]) / (time[i] - time[i - 1]);
            }
        }
        Stencil::ForwardSecondOrder => {
            for i in 0..n.saturating_sub(2) {
                derivative[i] = (-values[i + 2] + 4.0 * values[i + 1] - 3.0 * values[i])
                    / (time[i + 2] - time[i]);
            }
        }
        Stencil::BackwardSecondOrder => {
            for i in 2..n {
                derivative[i] = (3.0 * values[i] - 4.0 * values[i - 1] + values[i - 2])
                    / (time[i] - time[i - 2]);
            }
        }
    }

    Ok(derivative)
}

/// Differentiates every channel of `trace` (measured and requested) over its time axis.
pub fn differentiate_trace(trace: &Trace, stencil: Stencil) -> Result<Trace> {
    let time = &trace.time;
    let state = trace
        .state
        .try_map(|channel| compute_derivative(time, channel, stencil))?;
    let request = trace
        .request
        .as_ref()
        .map(|req| req.try_map(|channel| compute_derivative(time, channel, stencil)))
        .transpose()?;

    Ok(Trace {
        time: time.clone(),
        state,
        request,
    })
}
