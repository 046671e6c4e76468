use std::time::Duration;

use clap::ValueEnum;
use shared::DEFAULT_PORT;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OverflowPolicy {
    /// Wait up to the enqueue timeout for space, then drop the item.
    Block,
    /// Drop the incoming item immediately.
    DropNewest,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub queue_capacity: usize,
    pub overflow_policy: OverflowPolicy,
    pub enqueue_timeout: Duration,
}

impl ServerConfig {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            queue_capacity: 1024,
            overflow_policy: OverflowPolicy::Block,
            enqueue_timeout: Duration::from_millis(1000),
        }
    }
}
