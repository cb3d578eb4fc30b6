//! Latest-value store for incoming velocity commands

use crate::common::VelocityCommand;
use std::sync::Mutex;

/// Holds the most recent velocity command, shared between the subscription
/// callback and the tick thread.
///
/// Only the latest value matters: a command received once keeps being
/// integrated until a newer one replaces it. Before the first update the
/// store reads as the zero command.
pub struct CommandStore {
    latest: Mutex<VelocityCommand>,
}

impl CommandStore {
    /// Create a store holding the zero command
    pub fn new() -> Self {
        CommandStore {
            latest: Mutex::new(VelocityCommand::default()),
        }
    }

    /// Replace the stored command. No validation; last write wins.
    pub fn update(&self, cmd: VelocityCommand) {
        *self.latest.lock().unwrap() = cmd;
    }

    /// Copy of the stored command, both fields from the same update.
    pub fn snapshot(&self) -> VelocityCommand {
        *self.latest.lock().unwrap()
    }
}

impl Default for CommandStore {
    fn default() -> Self {
        Self::new()
    }
}
