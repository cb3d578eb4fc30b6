//! Message assembly for the odometry and transform outputs

use crate::config::OdomConfig;
use crate::estimator::OdomSample;
use builtin_interfaces::msg::Time;
use geometry_msgs::msg::{Quaternion, TransformStamped};
use nalgebra::UnitQuaternion;
use nav_msgs::msg::Odometry;
use tf2_msgs::msg::TFMessage;

/// Yaw-only quaternion for a planar heading:
/// `(0, 0, sin(theta/2), cos(theta/2))`.
pub fn yaw_quaternion(theta: f64) -> Quaternion {
    let q = UnitQuaternion::from_euler_angles(0.0, 0.0, theta);
    Quaternion {
        x: q.coords.x,
        y: q.coords.y,
        z: q.coords.z,
        w: q.coords.w,
    }
}

/// Convert a seconds-since-epoch stamp into a ROS time message
pub fn to_time_msg(stamp_secs: f64) -> Time {
    let sec = stamp_secs as i32;
    let nanosec = ((stamp_secs - sec as f64) * 1e9) as u32;
    Time { sec, nanosec }
}

/// Build the odometry message for one integration sample.
///
/// The twist is the command that was just integrated, not a separate
/// measurement.
pub fn odometry_message(sample: &OdomSample, config: &OdomConfig) -> Odometry {
    let mut odom = Odometry::default();
    odom.header.stamp = to_time_msg(sample.stamp_secs);
    odom.header.frame_id = config.odom_frame.clone();
    odom.child_frame_id = config.base_frame.clone();

    odom.pose.pose.position.x = sample.pose.x;
    odom.pose.pose.position.y = sample.pose.y;
    odom.pose.pose.position.z = 0.0;
    odom.pose.pose.orientation = yaw_quaternion(sample.pose.theta);

    odom.twist.twist.linear.x = sample.cmd.linear_x;
    odom.twist.twist.angular.z = sample.cmd.angular_z;

    odom
}

/// Build the odom -> base_link transform for the same sample
pub fn transform_message(sample: &OdomSample, config: &OdomConfig) -> TransformStamped {
    let mut transform = TransformStamped::default();
    transform.header.stamp = to_time_msg(sample.stamp_secs);
    transform.header.frame_id = config.odom_frame.clone();
    transform.child_frame_id = config.base_frame.clone();

    transform.transform.translation.x = sample.pose.x;
    transform.transform.translation.y = sample.pose.y;
    transform.transform.translation.z = 0.0;
    transform.transform.rotation = yaw_quaternion(sample.pose.theta);

    transform
}

/// Wrap a transform in the broadcast message published on /tf
pub fn tf_message(transform: TransformStamped) -> TFMessage {
    TFMessage {
        transforms: vec![transform],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{Pose2D, VelocityCommand};
    use assert_approx_eq::assert_approx_eq;

    fn sample() -> OdomSample {
        OdomSample {
            stamp_secs: 1234.5,
            pose: Pose2D {
                x: 1.5,
                y: -0.25,
                theta: 0.8,
            },
            cmd: VelocityCommand {
                linear_x: 0.4,
                angular_z: -0.2,
            },
        }
    }

    #[test]
    fn yaw_quaternion_matches_half_angle_form() {
        for theta in [0.0, 0.5, 1.0, -2.0, std::f64::consts::PI, 7.0] {
            let q = yaw_quaternion(theta);
            assert_eq!(q.x, 0.0);
            assert_eq!(q.y, 0.0);
            assert_approx_eq!(q.z, (theta / 2.0).sin());
            assert_approx_eq!(q.w, (theta / 2.0).cos());
        }
    }

    #[test]
    fn zero_heading_is_identity_rotation() {
        let q = yaw_quaternion(0.0);
        assert_eq!(q.z, 0.0);
        assert_eq!(q.w, 1.0);
    }

    #[test]
    fn time_msg_splits_seconds_and_nanoseconds() {
        let t = to_time_msg(1.5);
        assert_eq!(t.sec, 1);
        assert_eq!(t.nanosec, 500_000_000);

        let t = to_time_msg(2.0);
        assert_eq!(t.sec, 2);
        assert_eq!(t.nanosec, 0);

        let t = to_time_msg(0.0);
        assert_eq!(t.sec, 0);
        assert_eq!(t.nanosec, 0);
    }

    #[test]
    fn odometry_carries_pose_twist_and_frames() {
        let config = OdomConfig::default();
        let odom = odometry_message(&sample(), &config);

        assert_eq!(odom.header.frame_id, "odom");
        assert_eq!(odom.child_frame_id, "base_link");
        assert_eq!(odom.pose.pose.position.x, 1.5);
        assert_eq!(odom.pose.pose.position.y, -0.25);
        assert_eq!(odom.pose.pose.position.z, 0.0);
        assert_eq!(odom.twist.twist.linear.x, 0.4);
        assert_eq!(odom.twist.twist.angular.z, -0.2);
    }

    #[test]
    fn odometry_and_transform_agree_for_a_tick() {
        let config = OdomConfig::default();
        let sample = sample();

        let odom = odometry_message(&sample, &config);
        let transform = transform_message(&sample, &config);

        assert_eq!(odom.header.stamp, transform.header.stamp);
        assert_eq!(odom.header.frame_id, transform.header.frame_id);
        assert_eq!(odom.child_frame_id, transform.child_frame_id);
        assert_eq!(
            odom.pose.pose.position.x,
            transform.transform.translation.x
        );
        assert_eq!(
            odom.pose.pose.position.y,
            transform.transform.translation.y
        );
        assert_eq!(odom.pose.pose.orientation, transform.transform.rotation);
    }

    #[test]
    fn tf_message_wraps_a_single_transform() {
        let config = OdomConfig::default();
        let transform = transform_message(&sample(), &config);
        let msg = tf_message(transform.clone());
        assert_eq!(msg.transforms.len(), 1);
        assert_eq!(msg.transforms[0], transform);
    }
}
