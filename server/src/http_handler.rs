use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{
        Query, State,
        ws::{WebSocketUpgrade, rejection::WebSocketUpgradeRejection},
    },
    response::{IntoResponse, Response},
    routing::get,
};
use log::{error, info, warn};
use serde::Deserialize;
use serde_json::json;
use shared::{
    CREATE_PATH, HEALTH_PATH, JOIN_PATH, RoomID, create_room_response::CreateRoomResponse,
};
use tower_http::cors::CorsLayer;

use crate::{
    broadcaster::BroadcastSender, error::JoinError, room::RoomRegistry, ws_handler::WsHandler,
};

#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<RoomRegistry>,
    pub broadcaster: BroadcastSender,
}

#[derive(Debug, Default, Deserialize)]
pub struct JoinParams {
    #[serde(rename = "roomID")]
    pub room_id: Option<String>,
    pub username: Option<String>,
}

impl JoinParams {
    pub fn validate(self) -> Result<(RoomID, String), JoinError> {
        let room_id = self
            .room_id
            .filter(|room_id| !room_id.is_empty())
            .ok_or(JoinError::MissingRoomId)?;
        let username = self
            .username
            .filter(|username| !username.is_empty())
            .ok_or(JoinError::MissingUsername)?;

        Ok((room_id, username))
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route(CREATE_PATH, get(create_room))
        .route(JOIN_PATH, get(join_room))
        .route(HEALTH_PATH, get(health))
        .with_state(state)
        .layer(CorsLayer::permissive())
}

async fn create_room(State(state): State<AppState>) -> Json<CreateRoomResponse> {
    let room_id = state.registry.create_room().await;

    Json(CreateRoomResponse { room_id })
}

async fn join_room(
    State(state): State<AppState>,
    Query(params): Query<JoinParams>,
    upgrade: Result<WebSocketUpgrade, WebSocketUpgradeRejection>,
) -> Response {
    let (room_id, username) = match params.validate() {
        Ok(valid) => valid,
        Err(e) => {
            warn!("Rejected join request: {}", e);
            return e.into_response();
        }
    };

    let ws = match upgrade {
        Ok(ws) => ws,
        Err(rejection) => {
            error!("Web socket upgrade error: {}", rejection);
            return rejection.into_response();
        }
    };

    info!("{} is joining room {}", username, room_id);

    ws.on_failed_upgrade(|e| error!("Web socket upgrade error: {}", e))
        .on_upgrade(move |socket| {
            WsHandler::handle_socket(
                socket,
                room_id,
                username,
                state.registry,
                state.broadcaster,
            )
        })
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let occupancy = state.registry.occupancy().await;
    let stats = state.broadcaster.stats().await;

    Json(json!({
        "status": "ok",
        "rooms": occupancy.rooms,
        "participants": occupancy.participants,
        "deliveries_failed": stats.deliveries_failed,
        "items_dropped": stats.items_dropped,
    }))
}
