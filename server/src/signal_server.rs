use core::error::Error;
use std::{net::SocketAddr, sync::Arc};

use log::{error, info};
use tokio::net::TcpListener;

use crate::{
    broadcaster::Broadcaster,
    config::ServerConfig,
    http_handler::{AppState, router},
    room::RoomRegistry,
};

pub struct SignalServer {
    listener: TcpListener,
    config: ServerConfig,
}

impl SignalServer {
    pub async fn bind(config: ServerConfig) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Ok(Self {
            listener: TcpListener::bind(config.addr()).await?,
            config,
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr, Box<dyn Error + Send + Sync>> {
        Ok(self.listener.local_addr()?)
    }

    pub async fn listen(self) -> Result<(), Box<dyn Error + Send + Sync>> {
        let registry = Arc::new(RoomRegistry::new());
        let (broadcaster, broadcast_sender) = Broadcaster::new(registry.clone(), &self.config);

        let mut broadcaster_task = tokio::spawn(broadcaster.run());

        let app = router(AppState {
            registry,
            broadcaster: broadcast_sender,
        });

        info!(
            "Broadcast queue capacity {} with {:?} overflow policy",
            self.config.queue_capacity, self.config.overflow_policy
        );

        tokio::select! {

            result = &mut broadcaster_task => {

                result?;
                error!("Broadcast dispatcher exited");

                return Err("Broadcast dispatcher exited".into());
            }

            result = axum::serve(self.listener, app).into_future() => {

                result?;
            }
        }

        return Ok(());
    }
}
