// src/data_analysis/segment_detector.rs

use tracing::debug;

use crate::constants::{SEGMENT_MIN_GAP, SEGMENT_VELOCITY_THRESHOLD};

/// Condition set used to switch between moving and paused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransitionRule {
    /// MOVING -> PAUSED on three consecutive near-zero samples;
    /// PAUSED -> MOVING on a near-zero sample flanked by two samples at or above the threshold.
    #[default]
    Sustained,
    /// MOVING -> PAUSED on a falling edge (above, near-zero, near-zero);
    /// PAUSED -> MOVING on a rising edge (near-zero, near-zero, above).
    Edge,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionState {
    Moving,
    Paused,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentConfig {
    /// Velocity magnitude below which a sample counts as near-zero.
    pub threshold: f64,
    /// A new boundary must lie more than this many samples after the previous one.
    pub min_gap: usize,
    pub rule: TransitionRule,
}

impl Default for SegmentConfig {
    fn default() -> Self {
        Self {
            threshold: SEGMENT_VELOCITY_THRESHOLD,
            min_gap: SEGMENT_MIN_GAP,
            rule: TransitionRule::default(),
        }
    }
}

impl SegmentConfig {
    fn switches(&self, state: MotionState, prev: f64, cur: f64, next: f64) -> bool {
        let eps = self.threshold;
        match (self.rule, state) {
            (TransitionRule::Sustained, MotionState::Moving) => {
                prev.abs() < eps && cur.abs() < eps && next.abs() < eps
            }
            (TransitionRule::Sustained, MotionState::Paused) => {
                prev.abs() >= eps && cur.abs() < eps && next.abs() >= eps
            }
            (TransitionRule::Edge, MotionState::Moving) => {
                prev.abs() > eps && cur.abs() < eps && next.abs() < eps
            }
            (TransitionRule::Edge, MotionState::Paused) => {
                prev.abs() < eps && cur.abs() < eps && next.abs() > eps
            }
        }
    }
}

/// Finds the indices where the robot switches between moving and paused.
///
/// `velocity` is the A1 joint velocity. The result always starts with 0 (start of the
/// trace, moving) and then alternates pause-start / motion-start. Indices are strictly
/// increasing and consecutive indices differ by more than `config.min_gap`.
pub fn detect_segments(velocity: &[f64], config: &SegmentConfig) -> Vec<usize> {
    let mut boundaries = vec![0usize];
    let mut state = MotionState::Moving;
    let mut last_boundary = 0usize;

    for i in 1..velocity.len().saturating_sub(1) {
        if i - last_boundary <= config.min_gap {
            continue;
        }
        if config.switches(state, velocity[i - 1], velocity[i], velocity[i + 1]) {
            state = match state {
                MotionState::Moving => MotionState::Paused,
                MotionState::Paused => MotionState::Moving,
            };
            debug!(index = i, ?state, "Segment boundary");
            boundaries.push(i);
            last_boundary = i;
        }
    }

    boundaries
}

/// Motion state that begins at the boundary in position `ordinal` of a detector result.
pub fn state_after_boundary(ordinal: usize) -> MotionState {
    if ordinal % 2 == 0 {
        MotionState::Moving
    } else {
        MotionState::Paused
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MOVE: f64 = 0.01;

    /// Velocity profile made of alternating moving/paused runs.
    fn profile(runs: &[(f64, usize)]) -> Vec<f64> {
        runs.iter()
            .flat_map(|&(v, n)| std::iter::repeat(v).take(n))
            .collect()
    }

    fn assert_invariants(boundaries: &[usize], min_gap: usize) {
        assert_eq!(boundaries[0], 0);
        for w in boundaries.windows(2) {
            assert!(w[1] > w[0]);
            assert!(w[1] - w[0] > min_gap);
        }
    }

    #[test]
    fn sustained_detects_pause_start() {
        let v = profile(&[(MOVE, 20), (0.0, 20), (MOVE, 20)]);
        let config = SegmentConfig::default();
        let boundaries = detect_segments(&v, &config);
        // First index with three near-zero samples centred on it.
        assert_eq!(boundaries, vec![0, 21]);
        assert_invariants(&boundaries, config.min_gap);
    }

    #[test]
    fn sustained_resumes_on_isolated_near_zero_sample() {
        let mut v = profile(&[(MOVE, 20), (0.0, 20), (MOVE, 30)]);
        v[50] = 0.0;
        let boundaries = detect_segments(&v, &SegmentConfig::default());
        assert_eq!(boundaries, vec![0, 21, 50]);
        assert_eq!(state_after_boundary(1), MotionState::Paused);
        assert_eq!(state_after_boundary(2), MotionState::Moving);
    }

    #[test]
    fn edge_rule_tracks_pause_and_resume() {
        let v = profile(&[(MOVE, 20), (0.0, 20), (MOVE, 20), (0.0, 20), (MOVE, 5)]);
        let config = SegmentConfig {
            rule: TransitionRule::Edge,
            ..SegmentConfig::default()
        };
        let boundaries = detect_segments(&v, &config);
        // Falling edge at 20 (prev moving, two zeros), rising edge at 39 (two zeros, next moving).
        assert_eq!(boundaries, vec![0, 20, 39, 60, 79]);
        assert_invariants(&boundaries, config.min_gap);
    }

    #[test]
    fn min_gap_suppresses_early_retrigger() {
        // Pause right after the seed boundary is ignored until the gap has elapsed.
        let v = profile(&[(0.0, 30)]);
        let boundaries = detect_segments(&v, &SegmentConfig::default());
        assert_eq!(boundaries, vec![0, 11]);
    }

    #[test]
    fn threshold_is_strict_for_near_zero() {
        let config = SegmentConfig::default();
        let v = profile(&[(MOVE, 15), (config.threshold, 15)]);
        assert_eq!(detect_segments(&v, &config), vec![0]);
    }

    #[test]
    fn sustained_counts_threshold_neighbours_as_moving() {
        let config = SegmentConfig::default();
        let mut v = profile(&[(MOVE, 20), (0.0, 20), (config.threshold, 30)]);
        v[50] = 0.0;
        // v[49] and v[51] sit exactly on the threshold, which counts as moving.
        assert_eq!(detect_segments(&v, &config), vec![0, 21, 50]);
    }

    #[test]
    fn edge_needs_strictly_above_threshold_to_resume() {
        let config = SegmentConfig {
            rule: TransitionRule::Edge,
            ..SegmentConfig::default()
        };
        let v = profile(&[(MOVE, 20), (0.0, 20), (config.threshold, 20)]);
        assert_eq!(detect_segments(&v, &config), vec![0, 20]);
    }

    #[test]
    fn edge_needs_strictly_above_threshold_to_pause() {
        let config = SegmentConfig {
            rule: TransitionRule::Edge,
            ..SegmentConfig::default()
        };
        let v = profile(&[(config.threshold, 20), (0.0, 20)]);
        assert_eq!(detect_segments(&v, &config), vec![0]);
    }

    #[test]
    fn steady_ramp_has_no_boundaries() {
        let mut v = vec![0.05; 40];
        v[0] = 0.0;
        v[39] = 0.0;
        assert_eq!(detect_segments(&v, &SegmentConfig::default()), vec![0]);
    }

    #[test]
    fn short_input_yields_seed_only() {
        let config = SegmentConfig::default();
        assert_eq!(detect_segments(&[], &config), vec![0]);
        assert_eq!(detect_segments(&[0.0, 0.0], &config), vec![0]);
    }

    #[test]
    fn invariants_hold_on_noisy_signal() {
        let v: Vec<f64> = (0..500)
            .map(|i| if (i / 37) % 2 == 0 { MOVE } else { 0.0001 * ((i % 3) as f64) })
            .collect();
        for rule in [TransitionRule::Sustained, TransitionRule::Edge] {
            let config = SegmentConfig {
                rule,
                ..SegmentConfig::default()
            };
            assert_invariants(&detect_segments(&v, &config), config.min_gap);
        }
    }
}
