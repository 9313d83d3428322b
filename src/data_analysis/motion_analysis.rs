// src/data_analysis/motion_analysis.rs

use tracing::info;

use crate::constants::SAMPLE_PERIOD_S;
use crate::data_analysis::derivative::{differentiate_trace, Stencil};
use crate::data_analysis::segment_detector::{detect_segments, SegmentConfig};
use crate::data_analysis::speed::{compute_ee_speed, EeSpeed};
use crate::data_analysis::trace_cleaner::clean_trace;
use crate::data_input::trace_data::Trace;
use crate::error::{Result, TraceError};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalysisConfig {
    pub sample_period_s: f64,
    pub stencil: Stencil,
    pub segment: SegmentConfig,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            sample_period_s: SAMPLE_PERIOD_S,
            stencil: Stencil::default(),
            segment: SegmentConfig::default(),
        }
    }
}

/// Every stage of the offline analysis, kept for plotting and reporting.
#[derive(Debug, Clone)]
pub struct TraceAnalysis {
    pub cleaned: Trace,
    pub velocity: Trace,
    pub acceleration: Trace,
    pub ee_speed: EeSpeed,
    /// Segment boundaries detected on the A1 velocity.
    pub boundaries: Vec<usize>,
}

/// Clean, differentiate twice, aggregate EE speed and detect segment boundaries.
pub fn analyze_trace(raw: &Trace, config: &AnalysisConfig) -> Result<TraceAnalysis> {
    let cleaned = clean_trace(raw, config.sample_period_s);
    if cleaned.len() < 2 {
        return Err(TraceError::EmptyTrace(format!(
            "{} usable samples after removing the dwell prefix of {} raw samples",
            cleaned.len(),
            raw.len()
        )));
    }

    let velocity = differentiate_trace(&cleaned, config.stencil)?;
    let acceleration = differentiate_trace(&velocity, config.stencil)?;
    let ee_speed = compute_ee_speed(&velocity)?;
    let boundaries = detect_segments(velocity.joint(0), &config.segment);

    info!(
        samples = cleaned.len(),
        boundaries = boundaries.len(),
        stencil = ?config.stencil,
        rule = ?config.segment.rule,
        "Trace analysis complete"
    );

    Ok(TraceAnalysis {
        cleaned,
        velocity,
        acceleration,
        ee_speed,
        boundaries,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_input::trace_data::Sample;

    fn raw_trace(a1: &[f64]) -> Trace {
        let samples: Vec<Sample> = a1
            .iter()
            .enumerate()
            .map(|(i, &a)| Sample {
                time_sec: i as f64 * SAMPLE_PERIOD_S,
                joints: [a, 0.0, 0.0, 0.0, 0.0, 0.0],
                pose: [a, 0.0, 0.0, 0.0, 0.0, 0.0],
                joint_request: None,
                pose_request: None,
            })
            .collect();
        Trace::from_samples(&samples)
    }

    #[test]
    fn stationary_trace_is_empty_trace_error() {
        let err = analyze_trace(&raw_trace(&[0.2; 10]), &AnalysisConfig::default()).unwrap_err();
        assert!(matches!(err, TraceError::EmptyTrace(_)));
    }

    #[test]
    fn single_moving_sample_is_not_enough() {
        let err = analyze_trace(&raw_trace(&[0.0, 0.0, 0.1]), &AnalysisConfig::default()).unwrap_err();
        assert!(matches!(err, TraceError::EmptyTrace(_)));
    }

    #[test]
    fn stages_share_time_axis() {
        let a1: Vec<f64> = (0..30).map(|i| if i < 5 { 0.0 } else { 0.01 * i as f64 }).collect();
        let analysis = analyze_trace(&raw_trace(&a1), &AnalysisConfig::default()).unwrap();
        let n = analysis.cleaned.len();
        assert_eq!(n, 25);
        assert_eq!(analysis.velocity.len(), n);
        assert_eq!(analysis.acceleration.len(), n);
        assert_eq!(analysis.ee_speed.linear.len(), n);
        assert_eq!(analysis.boundaries, vec![0]);
        // Slope 0.01 rad per 4 ms sample.
        assert!((analysis.velocity.joint(0)[10] - 2.5).abs() < 1e-9);
        assert!((analysis.ee_speed.linear[10] - 2.5).abs() < 1e-9);
    }
}
