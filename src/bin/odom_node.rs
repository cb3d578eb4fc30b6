use anyhow::{Error, Result};
use odom_core::command::CommandStore;
use odom_core::common::VelocityCommand;
use odom_core::config::OdomConfig;
use odom_core::estimator::PoseIntegrator;
use odom_core::output::{odometry_message, tf_message, transform_message};
use rclrs::{Context, CreateBasicExecutor, Node, RclrsErrorFilter, SpinOptions, QOS_PROFILE_DEFAULT};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{SystemTime, UNIX_EPOCH};

// Import the message types directly from the crates
use geometry_msgs::msg::Twist;
use nav_msgs::msg::Odometry;
use tf2_msgs::msg::TFMessage;

struct OdomNode {
    node: Arc<Node>,
    commands: Arc<CommandStore>,
    odom_publisher: Arc<rclrs::Publisher<Odometry>>,
    tf_publisher: Arc<rclrs::Publisher<TFMessage>>,
    cmd_vel_subscription: Mutex<Option<Arc<rclrs::Subscription<Twist>>>>,
    running: Arc<Mutex<bool>>,
}

impl OdomNode {
    pub fn new(executor: &rclrs::Executor, name: &str, config: OdomConfig) -> Result<Arc<Self>> {
        config.validate()?;

        let node = executor.create_node(name)?;

        println!(
            "Using parameters: tick_rate_hz={}, odom_frame={}, base_frame={}",
            config.tick_rate_hz, config.odom_frame, config.base_frame
        );
        println!(
            "Topics: cmd_vel={}, odom={}, tf={}",
            config.cmd_vel_topic, config.odom_topic, config.tf_topic
        );

        // Create publishers for the odometry and the transform broadcast
        let odom_publisher =
            node.create_publisher::<Odometry>(&config.odom_topic, QOS_PROFILE_DEFAULT)?;
        let tf_publisher =
            node.create_publisher::<TFMessage>(&config.tf_topic, QOS_PROFILE_DEFAULT)?;

        let running = Arc::new(Mutex::new(true));

        let odom_node = Arc::new(OdomNode {
            node,
            commands: Arc::new(CommandStore::new()),
            odom_publisher,
            tf_publisher,
            cmd_vel_subscription: None.into(),
            running,
        });

        // Set up the velocity command subscription; the callback only
        // stores the latest value, integration happens on the tick thread
        let commands = Arc::clone(&odom_node.commands);
        let cmd_vel_subscription = odom_node.node.create_subscription::<Twist, _>(
            &config.cmd_vel_topic,
            QOS_PROFILE_DEFAULT,
            move |msg: Twist| {
                commands.update(VelocityCommand {
                    linear_x: msg.linear.x,
                    angular_z: msg.angular.z,
                });
            },
        )?;

        *odom_node.cmd_vel_subscription.lock().unwrap() = Some(cmd_vel_subscription);

        // Start the fixed-rate integration thread. Sleeping the nominal
        // period drifts under load; the integrator works from measured
        // elapsed time, so drift stretches dt instead of corrupting the pose.
        let odom_node_clone = Arc::clone(&odom_node);
        let running_clone = Arc::clone(&odom_node.running);
        let period = config.tick_period();

        thread::spawn(move || {
            let mut integrator = PoseIntegrator::new();
            while *running_clone.lock().unwrap() {
                odom_node_clone.tick(&mut integrator, &config);
                thread::sleep(period);
            }
        });

        Ok(odom_node)
    }

    fn tick(&self, integrator: &mut PoseIntegrator, config: &OdomConfig) {
        let stamp_secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_secs_f64())
            .unwrap_or(0.0);

        let cmd = self.commands.snapshot();
        let sample = integrator.tick(stamp_secs, cmd);

        // Publish failures are per-tick; log and move on to the next tick
        let transform = transform_message(&sample, config);
        if let Err(e) = self.tf_publisher.publish(&tf_message(transform)) {
            eprintln!("Failed to publish transform: {}", e);
        }

        let odom = odometry_message(&sample, config);
        if let Err(e) = self.odom_publisher.publish(&odom) {
            eprintln!("Failed to publish odometry: {}", e);
        }
    }
}

impl Drop for OdomNode {
    fn drop(&mut self) {
        // Stop the tick thread when the node is dropped
        if let Ok(mut running) = self.running.lock() {
            *running = false;
        }
    }
}

fn main() -> Result<(), Error> {
    println!("Initializing odometry node...");

    // Create the ROS 2 context and executor
    let mut executor = Context::default_from_env()?.create_basic_executor();

    let _odom_node = OdomNode::new(&executor, "odom_node", OdomConfig::default())?;

    println!("Odometry node initialized. Starting to spin...");

    // Spin the executor to process callbacks
    executor
        .spin(SpinOptions::default())
        .first_error()
        .map_err(|err| err.into())
}
