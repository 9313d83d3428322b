// src/data_input/trace_data.rs

use crate::channel_names::{JOINT_COUNT, POSE_COUNT};

/// One time-stamped observation parsed from a single log line.
/// Joint angles and orientation are in radians, positions in meters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub time_sec: f64,
    pub joints: [f64; JOINT_COUNT], // Measured joint angles [A1..A6].
    pub pose: [f64; POSE_COUNT],    // Measured end-effector pose [X, Y, Z, A, B, C].
    pub joint_request: Option<[f64; JOINT_COUNT]>, // Commanded joint angles, when logged.
    pub pose_request: Option<[f64; POSE_COUNT]>,   // Commanded pose, when logged.
}

impl Sample {
    /// Copy of this sample with a new time stamp.
    pub fn with_time(&self, time_sec: f64) -> Self {
        Self { time_sec, ..*self }
    }
}

/// Column-oriented storage of joint and pose channels.
/// Every channel has the same length as the owning trace's time axis.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChannelSet {
    pub joints: [Vec<f64>; JOINT_COUNT],
    pub pose: [Vec<f64>; POSE_COUNT],
}

impl ChannelSet {
    fn with_capacity(n: usize) -> Self {
        Self {
            joints: std::array::from_fn(|_| Vec::with_capacity(n)),
            pose: std::array::from_fn(|_| Vec::with_capacity(n)),
        }
    }

    fn push(&mut self, joints: &[f64; JOINT_COUNT], pose: &[f64; POSE_COUNT]) {
        for (channel, &value) in self.joints.iter_mut().zip(joints) {
            channel.push(value);
        }
        for (channel, &value) in self.pose.iter_mut().zip(pose) {
            channel.push(value);
        }
    }

    fn joints_at(&self, i: usize) -> [f64; JOINT_COUNT] {
        std::array::from_fn(|j| self.joints[j][i])
    }

    fn pose_at(&self, i: usize) -> [f64; POSE_COUNT] {
        std::array::from_fn(|j| self.pose[j][i])
    }

    /// Apply `f` to every channel, keeping the joint/pose layout.
    pub fn try_map<F, E>(&self, mut f: F) -> Result<ChannelSet, E>
    where
        F: FnMut(&[f64]) -> Result<Vec<f64>, E>,
    {
        let mut mapped = ChannelSet::default();
        for (dst, src) in mapped.joints.iter_mut().zip(&self.joints) {
            *dst = f(src)?;
        }
        for (dst, src) in mapped.pose.iter_mut().zip(&self.pose) {
            *dst = f(src)?;
        }
        Ok(mapped)
    }
}

/// Ordered time series of samples sharing one time axis.
///
/// `request` holds commanded channels and is only present when every sample carried them.
/// The same shape is used for derived traces (velocity, acceleration), where each
/// channel holds the derivative of the source channel.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Trace {
    pub time: Vec<f64>,
    pub state: ChannelSet,
    pub request: Option<ChannelSet>,
}

impl Trace {
    pub fn from_samples(samples: &[Sample]) -> Self {
        let n = samples.len();
        let has_request = n > 0
            && samples
                .iter()
                .all(|s| s.joint_request.is_some() && s.pose_request.is_some());

        let mut time = Vec::with_capacity(n);
        let mut state = ChannelSet::with_capacity(n);
        let mut request = has_request.then(|| ChannelSet::with_capacity(n));

        for sample in samples {
            time.push(sample.time_sec);
            state.push(&sample.joints, &sample.pose);
            if let (Some(req), Some(joints), Some(pose)) =
                (request.as_mut(), sample.joint_request, sample.pose_request)
            {
                req.push(&joints, &pose);
            }
        }

        Self {
            time,
            state,
            request,
        }
    }

    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// Reassemble the sample at index `i`.
    pub fn sample(&self, i: usize) -> Option<Sample> {
        if i >= self.len() {
            return None;
        }
        Some(Sample {
            time_sec: self.time[i],
            joints: self.state.joints_at(i),
            pose: self.state.pose_at(i),
            joint_request: self.request.as_ref().map(|r| r.joints_at(i)),
            pose_request: self.request.as_ref().map(|r| r.pose_at(i)),
        })
    }

    pub fn samples(&self) -> impl Iterator<Item = Sample> + '_ {
        (0..self.len()).filter_map(move |i| self.sample(i))
    }

    /// Measured angle of joint `joint` (0 = A1).
    pub fn joint(&self, joint: usize) -> &[f64] {
        &self.state.joints[joint]
    }

    /// Measured pose component `component` (0 = X ... 5 = C).
    pub fn pose(&self, component: usize) -> &[f64] {
        &self.state.pose[component]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(t: f64, a1: f64, with_request: bool) -> Sample {
        Sample {
            time_sec: t,
            joints: [a1, 0.1, 0.2, 0.3, 0.4, 0.5],
            pose: [1.0, 2.0, 3.0, 0.0, 0.0, 0.0],
            joint_request: with_request.then_some([a1; JOINT_COUNT]),
            pose_request: with_request.then_some([0.5; POSE_COUNT]),
        }
    }

    #[test]
    fn channels_share_time_axis_length() {
        let trace = Trace::from_samples(&[sample(0.0, 1.0, true), sample(0.004, 2.0, true)]);
        assert_eq!(trace.len(), 2);
        for channel in trace.state.joints.iter().chain(trace.state.pose.iter()) {
            assert_eq!(channel.len(), 2);
        }
        let request = trace.request.as_ref().expect("request channels kept");
        assert_eq!(request.joints[0], vec![1.0, 2.0]);
    }

    #[test]
    fn request_dropped_unless_every_sample_has_it() {
        let trace = Trace::from_samples(&[sample(0.0, 1.0, true), sample(0.004, 2.0, false)]);
        assert!(trace.request.is_none());
        assert_eq!(trace.sample(1).and_then(|s| s.joint_request), None);
    }

    #[test]
    fn sample_round_trips_through_columns() {
        let original = sample(0.008, 0.7, true);
        let trace = Trace::from_samples(&[sample(0.0, 0.1, true), original]);
        assert_eq!(trace.sample(1), Some(original));
        assert_eq!(trace.sample(2), None);
        assert_eq!(trace.samples().count(), 2);
    }

    #[test]
    fn try_map_keeps_layout() {
        let trace = Trace::from_samples(&[sample(0.0, 1.0, false), sample(0.004, 3.0, false)]);
        let doubled: Result<ChannelSet, ()> =
            trace.state.try_map(|c| Ok(c.iter().map(|v| v * 2.0).collect()));
        let doubled = doubled.unwrap();
        assert_eq!(doubled.joints[0], vec![2.0, 6.0]);
        assert_eq!(doubled.pose[2], vec![6.0, 6.0]);
    }
}
