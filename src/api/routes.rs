use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::services::ConnectionService;

use super::handlers::{create_connection_handler, get_connection_handler, health_handler};

#[derive(Clone)]
pub struct ApiState {
    pub connection_service: Arc<ConnectionService>,
}

pub fn build_router(connection_service: Arc<ConnectionService>) -> Router {
    let api_state = ApiState { connection_service };

    Router::new()
        .route("/connection", post(create_connection_handler))
        .route("/connection/{id}", get(get_connection_handler))
        .route("/health", get(health_handler))
        .with_state(api_state)
        .layer(TraceLayer::new_for_http())
}
