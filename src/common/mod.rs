//! Common types shared across the odometry crate

/// A commanded body-frame velocity: forward speed and yaw rate.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct VelocityCommand {
    /// Forward speed along the robot's x axis, m/s
    pub linear_x: f64,
    /// Yaw rate about the vertical axis, rad/s
    pub angular_z: f64,
}

/// Estimated robot pose in the odom frame.
///
/// `theta` accumulates without wrapping; consumers that need a bounded
/// heading normalize it themselves.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Pose2D {
    pub x: f64,
    pub y: f64,
    pub theta: f64,
}
