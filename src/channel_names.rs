/// Centralized channel naming utilities
///
/// Provides consistent joint and end-effector channel names across plot functions
/// and analysis modules.
pub const JOINT_COUNT: usize = 6;
pub const POSE_COUNT: usize = 6;

/// Joint names as used by the KUKA controller
pub const JOINT_NAMES: [&str; JOINT_COUNT] = ["A1", "A2", "A3", "A4", "A5", "A6"];

/// End-effector pose components: position X, Y, Z followed by orientation A, B, C
pub const POSE_NAMES: [&str; POSE_COUNT] = ["X", "Y", "Z", "A", "B", "C"];

/// Index of the first orientation component within a pose
pub const ORIENTATION_OFFSET: usize = 3;

/// Get the joint name for a given index
///
/// # Arguments
/// * `index` - Joint index (0=A1 ... 5=A6)
///
/// # Panics
/// Panics if index is greater than 5
pub fn joint_name(index: usize) -> &'static str {
    match JOINT_NAMES.get(index) {
        Some(&name) => name,
        None => panic!(
            "Invalid joint index: {}. Expected 0 (A1) to 5 (A6)",
            index
        ),
    }
}

/// Get the pose component name for a given index
///
/// # Panics
/// Panics if index is greater than 5
pub fn pose_name(index: usize) -> &'static str {
    match POSE_NAMES.get(index) {
        Some(&name) => name,
        None => panic!(
            "Invalid pose index: {}. Expected 0 (X) to 5 (C)",
            index
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_joint_name() {
        assert_eq!(joint_name(0), "A1");
        assert_eq!(joint_name(5), "A6");
    }

    #[test]
    #[should_panic(expected = "Invalid joint index")]
    fn test_joint_name_panic() {
        joint_name(6);
    }

    #[test]
    fn test_pose_names() {
        assert_eq!(pose_name(0), "X");
        assert_eq!(pose_name(ORIENTATION_OFFSET), "A");
        assert_eq!(POSE_NAMES[5], "C");
    }

    #[test]
    #[should_panic(expected = "Invalid pose index")]
    fn test_pose_name_panic() {
        pose_name(6);
    }
}
