//! Configuration for the odometry node

use std::time::Duration;
use thiserror::Error;

/// Errors raised when validating the node configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("tick rate must be a positive, finite frequency, got {0}")]
    InvalidTickRate(f64),
    #[error("{0} must not be empty")]
    EmptyField(&'static str),
}

/// Tick rate, frame ids and topic names for the odometry node.
///
/// Defaults match the usual ROS conventions: 100 Hz, `odom` -> `base_link`,
/// commands on `cmd_vel`.
#[derive(Debug, Clone)]
pub struct OdomConfig {
    /// Nominal integration rate, Hz
    pub tick_rate_hz: f64,
    /// Fixed frame the pose is reported in
    pub odom_frame: String,
    /// Moving frame attached to the robot
    pub base_frame: String,
    pub cmd_vel_topic: String,
    pub odom_topic: String,
    pub tf_topic: String,
}

impl Default for OdomConfig {
    fn default() -> Self {
        OdomConfig {
            tick_rate_hz: 100.0,
            odom_frame: "odom".to_string(),
            base_frame: "base_link".to_string(),
            cmd_vel_topic: "cmd_vel".to_string(),
            odom_topic: "odom".to_string(),
            tf_topic: "tf".to_string(),
        }
    }
}

impl OdomConfig {
    /// Check the configuration once, before the node starts
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.tick_rate_hz.is_finite() || self.tick_rate_hz <= 0.0 {
            return Err(ConfigError::InvalidTickRate(self.tick_rate_hz));
        }

        let fields = [
            ("odom_frame", &self.odom_frame),
            ("base_frame", &self.base_frame),
            ("cmd_vel_topic", &self.cmd_vel_topic),
            ("odom_topic", &self.odom_topic),
            ("tf_topic", &self.tf_topic),
        ];
        for (name, value) in fields {
            if value.is_empty() {
                return Err(ConfigError::EmptyField(name));
            }
        }

        Ok(())
    }

    /// Nominal sleep between ticks
    pub fn tick_period(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.tick_rate_hz)
    }
}
