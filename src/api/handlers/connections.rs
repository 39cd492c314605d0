//! Connection endpoints

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use tracing::instrument;

use crate::api::dto::{ConnectionDetailsResponse, CreateConnectionRequest, CreateConnectionResponse};
use crate::api::error::ApiError;
use crate::api::routes::ApiState;
use crate::domain::ConnectionId;

/// Create a connection: metadata to the relational store, password to the secret store.
#[instrument(skip(state, payload))]
pub async fn create_connection_handler(
    State(state): State<ApiState>,
    payload: Result<Json<CreateConnectionRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateConnectionResponse>), ApiError> {
    let Json(body) = payload?;
    let (connection, password) = body.into_parts()?;
    let record = state.connection_service.create(connection, password).await?;

    Ok((StatusCode::CREATED, Json(CreateConnectionResponse::from(record))))
}

/// Fetch a connection with its password.
#[instrument(skip(state))]
pub async fn get_connection_handler(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<Json<ConnectionDetailsResponse>, ApiError> {
    // A malformed id cannot name a stored connection
    let id = ConnectionId::parse(&id).map_err(|_| ApiError::not_found("Connection not found"))?;

    let details = state.connection_service.fetch(&id).await?;
    Ok(Json(ConnectionDetailsResponse::from(details)))
}
