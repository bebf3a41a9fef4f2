pub mod api;
mod middleware;
mod public;

pub use public::build_router;

use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::application::{blocks::BlockService, pages::CompositionService};
use crate::infra::db::PostgresRepositories;
use crate::presentation::views::SiteChrome;

#[derive(Clone)]
pub struct HttpState {
    pub composition: Arc<CompositionService>,
    pub blocks: Arc<BlockService>,
    pub chrome: SiteChrome,
    pub db: Arc<PostgresRepositories>,
}

pub(crate) async fn db_health_response(db: &PostgresRepositories) -> Response {
    match db.health_check().await {
        Ok(()) => (StatusCode::OK, "ok").into_response(),
        Err(err) => {
            tracing::warn!(target = "infra::http", error = %err, "Database health check failed");
            (StatusCode::SERVICE_UNAVAILABLE, "database unavailable").into_response()
        }
    }
}
