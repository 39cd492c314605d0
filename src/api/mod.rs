//! HTTP API surface: `POST /connection`, `GET /connection/{id}`, `GET /health`.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod server;

pub use routes::{build_router, ApiState};
pub use server::start_api_server;
