//! JSON admin API (`/api/v1`): block listing, save, and owner deletion.

pub mod error;
mod handlers;
mod models;

pub use error::{ApiError, ApiErrorBody, ApiErrorMessage};
pub use models::{SaveCaseBlockRequest, SaveLandingBlockRequest};

use axum::{
    Router,
    routing::{delete, get},
};

use super::HttpState;

pub fn build_router() -> Router<HttpState> {
    Router::new()
        .route(
            "/api/v1/landing-pages/{id}/blocks",
            get(handlers::list_landing_blocks).post(handlers::save_landing_block),
        )
        .route(
            "/api/v1/landing-pages/{id}/blocks/{block_id}",
            delete(handlers::delete_landing_block),
        )
        .route(
            "/api/v1/landing-pages/{id}",
            delete(handlers::delete_landing_page),
        )
        .route(
            "/api/v1/cases/{id}/blocks",
            get(handlers::list_case_blocks).post(handlers::save_case_block),
        )
        .route(
            "/api/v1/cases/{id}/blocks/{block_id}",
            delete(handlers::delete_case_block),
        )
        .route("/api/v1/cases/{id}", delete(handlers::delete_case))
}
