//! Dead-reckoning odometry for a differential-drive robot.
//!
//! Integrates commanded velocities (`cmd_vel`) into a planar pose estimate
//! and publishes it each tick as `nav_msgs/Odometry` plus an
//! `odom` -> `base_link` transform. Open loop: no encoders, no IMU, no
//! external correction.

pub mod command;
pub mod common;
pub mod config;
pub mod estimator;
pub mod output;
