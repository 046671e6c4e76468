use std::time::Duration;

use log::{error, info};
use shared::DEFAULT_PORT;

use clap::Parser;

use signal_server::{OverflowPolicy, ServerConfig, SignalServer};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    port: u16,

    #[arg(long, default_value_t = 1024)]
    queue_capacity: usize,

    #[arg(long, value_enum, default_value_t = OverflowPolicy::Block)]
    overflow_policy: OverflowPolicy,

    #[arg(long, default_value_t = 1000)]
    enqueue_timeout_ms: u64,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ServerConfig {
        host: args.host,
        port: args.port,
        queue_capacity: args.queue_capacity,
        overflow_policy: args.overflow_policy,
        enqueue_timeout: Duration::from_millis(args.enqueue_timeout_ms),
    };
    let addr = config.addr();

    let server = match SignalServer::bind(config).await {
        Ok(signal_server) => signal_server,
        Err(e) => {
            error!("Error binding {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    info!("Signaling server listening on {}", addr);

    if let Err(e) = server.listen().await {
        error!("{}", e);
        std::process::exit(1);
    }
}
