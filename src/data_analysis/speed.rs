// src/data_analysis/speed.rs

use ndarray::ArrayView1;

use crate::channel_names::ORIENTATION_OFFSET;
use crate::data_input::trace_data::Trace;
use crate::error::{Result, TraceError};

/// Euclidean norm of three velocity components, sample by sample.
pub fn compute_speed(vx: &[f64], vy: &[f64], vz: &[f64]) -> Result<Vec<f64>> {
    for other in [vy.len(), vz.len()] {
        if other != vx.len() {
            return Err(TraceError::LengthMismatch {
                expected: vx.len(),
                found: other,
            });
        }
    }

    let vx = ArrayView1::from(vx);
    let vy = ArrayView1::from(vy);
    let vz = ArrayView1::from(vz);
    let squared = &vx * &vx + &vy * &vy + &vz * &vz;
    Ok(squared.mapv(f64::sqrt).to_vec())
}

/// End-effector linear (laydown) and angular speed over a velocity trace's time axis.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EeSpeed {
    pub time: Vec<f64>,
    pub linear: Vec<f64>,  // m/s
    pub angular: Vec<f64>, // rad/s
}

/// Aggregates the measured pose velocities of `velocity` into linear and angular speed.
pub fn compute_ee_speed(velocity: &Trace) -> Result<EeSpeed> {
    let pose = &velocity.state.pose;
    let a = ORIENTATION_OFFSET;
    Ok(EeSpeed {
        time: velocity.time.clone(),
        linear: compute_speed(&pose[0], &pose[1], &pose[2])?,
        angular: compute_speed(&pose[a], &pose[a + 1], &pose[a + 2])?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_input::trace_data::Sample;

    #[test]
    fn equal_components_scale_by_sqrt3() {
        let k = 0.7;
        let speed = compute_speed(&[k, -k], &[k, -k], &[k, -k]).unwrap();
        for s in speed {
            assert!((s - 3f64.sqrt() * k.abs()).abs() < 1e-12);
        }
    }

    #[test]
    fn zero_components_give_zero_speed() {
        let speed = compute_speed(&[0.0, 3.0], &[0.0, 4.0], &[0.0, 0.0]).unwrap();
        assert_eq!(speed, vec![0.0, 5.0]);
    }

    #[test]
    fn speed_is_never_negative() {
        let vx = [-1.0, 0.2, -0.003];
        let vy = [0.5, -0.9, 0.0];
        let vz = [-0.1, -0.1, -7.0];
        assert!(compute_speed(&vx, &vy, &vz).unwrap().iter().all(|&s| s >= 0.0));
    }

    #[test]
    fn mismatched_lengths_are_rejected() {
        let err = compute_speed(&[1.0, 2.0], &[1.0], &[1.0, 2.0]).unwrap_err();
        assert!(matches!(err, TraceError::LengthMismatch { expected: 2, found: 1 }));
    }

    #[test]
    fn ee_speed_splits_linear_and_angular() {
        let samples: Vec<Sample> = (0..3)
            .map(|i| Sample {
                time_sec: i as f64,
                joints: [0.0; 6],
                pose: [3.0, 4.0, 0.0, 0.0, 0.0, 2.0],
                joint_request: None,
                pose_request: None,
            })
            .collect();
        let velocity = Trace::from_samples(&samples);
        let speed = compute_ee_speed(&velocity).unwrap();
        assert_eq!(speed.linear, vec![5.0; 3]);
        assert_eq!(speed.angular, vec![2.0; 3]);
        assert_eq!(speed.time, velocity.time);
    }
}
