pub mod broadcaster;
pub mod config;
pub mod connection;
pub mod error;
pub mod http_handler;
pub mod room;
pub mod session;
pub mod signal_server;
pub mod ws_handler;

pub use config::{OverflowPolicy, ServerConfig};
pub use signal_server::SignalServer;
