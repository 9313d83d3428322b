// src/data_analysis/trace_cleaner.rs

use tracing::{info, warn};

use crate::data_input::trace_data::{Sample, Trace};

/// Drops the dwell prefix of a raw trace and re-bases time to a uniform step.
///
/// Scanning from the second sample, output starts at the first sample whose A1 angle
/// differs from its predecessor; from then on every sample is kept. The n-th emitted
/// sample is stamped `n * sample_period_s`. A trace whose A1 never changes cleans to empty.
pub fn clean_trace(raw: &Trace, sample_period_s: f64) -> Trace {
    let a1 = raw.joint(0);
    let mut cleaned: Vec<Sample> = Vec::with_capacity(raw.len());

    for (i, sample) in raw.samples().enumerate().skip(1) {
        if a1[i] != a1[i - 1] || !cleaned.is_empty() {
            cleaned.push(sample.with_time(sample_period_s * cleaned.len() as f64));
        }
    }

    if cleaned.is_empty() {
        warn!(raw_samples = raw.len(), "A1 never moved; cleaned trace is empty");
    } else {
        info!(
            raw_samples = raw.len(),
            dropped = raw.len() - cleaned.len(),
            "Cleaned trace has {} samples",
            cleaned.len()
        );
    }

    Trace::from_samples(&cleaned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::SAMPLE_PERIOD_S;

    fn trace_from_a1(a1: &[f64]) -> Trace {
        let samples: Vec<Sample> = a1
            .iter()
            .enumerate()
            .map(|(i, &a)| Sample {
                time_sec: 10.0 + i as f64,
                joints: [a, 0.0, 0.0, 0.0, 0.0, i as f64],
                pose: [i as f64; 6],
                joint_request: None,
                pose_request: None,
            })
            .collect();
        Trace::from_samples(&samples)
    }

    #[test]
    fn drops_dwell_prefix_and_rebases_time() {
        let trace = trace_from_a1(&[0.0, 0.0, 0.0, 0.1, 0.2, 0.2, 0.3]);
        let cleaned = clean_trace(&trace, SAMPLE_PERIOD_S);
        assert_eq!(cleaned.len(), 4);
        assert_eq!(cleaned.joint(0), &[0.1, 0.2, 0.2, 0.3]);
        // Channel values are copied from the raw index.
        assert_eq!(cleaned.joint(5), &[3.0, 4.0, 5.0, 6.0]);
        assert_eq!(cleaned.pose(0), &[3.0, 4.0, 5.0, 6.0]);
        for (n, &t) in cleaned.time.iter().enumerate() {
            assert_eq!(t, SAMPLE_PERIOD_S * n as f64);
        }
    }

    #[test]
    fn keeps_later_stalls_once_started() {
        let trace = trace_from_a1(&[0.0, 1.0, 1.0, 1.0]);
        let cleaned = clean_trace(&trace, SAMPLE_PERIOD_S);
        assert_eq!(cleaned.joint(0), &[1.0, 1.0, 1.0]);
    }

    #[test]
    fn constant_a1_cleans_to_empty() {
        let trace = trace_from_a1(&[0.5; 8]);
        assert!(clean_trace(&trace, SAMPLE_PERIOD_S).is_empty());
    }

    #[test]
    fn output_is_never_longer_than_input_minus_one() {
        let trace = trace_from_a1(&[0.0, 0.1, 0.2, 0.3]);
        assert_eq!(clean_trace(&trace, SAMPLE_PERIOD_S).len(), 3);
        assert!(clean_trace(&Trace::default(), SAMPLE_PERIOD_S).is_empty());
        assert!(clean_trace(&trace_from_a1(&[0.3]), SAMPLE_PERIOD_S).is_empty());
    }
}
