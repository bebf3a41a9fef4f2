//! Public HTML routes: page composition and the database health probe.

use axum::{
    Router,
    extract::{Path, State},
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::get,
};

use crate::presentation::views::{
    CaseTemplate, LandingTemplate, PageTemplate, render_not_found_response,
    render_template_response,
};

use super::{
    HttpState, db_health_response,
    middleware::{log_responses, set_request_context},
};

/// The landing page served at the site root.
const HOME_SLUG: &str = "home";

pub fn build_router(state: HttpState) -> Router {
    let api_router = super::api::build_router();

    Router::new()
        .route("/", get(index))
        .route("/landing/{slug}", get(landing_page))
        .route("/cases/{slug}", get(case_page))
        .route("/_health/db", get(health))
        // custom pages mount at the top level; anything unmatched above
        // falls through to a slug lookup
        .route("/{slug}", get(custom_page))
        .merge(api_router)
        .with_state(state)
        .layer(middleware::from_fn(log_responses))
        .layer(middleware::from_fn(set_request_context))
}

async fn index(State(state): State<HttpState>) -> Response {
    render_landing(state, HOME_SLUG).await
}

async fn landing_page(State(state): State<HttpState>, Path(slug): Path<String>) -> Response {
    render_landing(state, &slug).await
}

async fn render_landing(state: HttpState, slug: &str) -> Response {
    match state.composition.landing_page(slug).await {
        Ok(Some(page)) => render_template_response(
            LandingTemplate {
                chrome: state.chrome.clone(),
                page,
            },
            StatusCode::OK,
        ),
        Ok(None) => render_not_found_response(state.chrome.clone()),
        Err(err) => err.into_response(),
    }
}

async fn case_page(State(state): State<HttpState>, Path(slug): Path<String>) -> Response {
    match state.composition.case_page(&slug).await {
        Ok(Some(page)) => render_template_response(
            CaseTemplate {
                chrome: state.chrome.clone(),
                page,
            },
            StatusCode::OK,
        ),
        Ok(None) => render_not_found_response(state.chrome.clone()),
        Err(err) => err.into_response(),
    }
}

async fn custom_page(State(state): State<HttpState>, Path(slug): Path<String>) -> Response {
    match state.composition.custom_page(&slug).await {
        Ok(Some(page)) => render_template_response(
            PageTemplate {
                chrome: state.chrome.clone(),
                page,
            },
            StatusCode::OK,
        ),
        Ok(None) => render_not_found_response(state.chrome.clone()),
        Err(err) => err.into_response(),
    }
}

async fn health(State(state): State<HttpState>) -> Response {
    db_health_response(&state.db).await
}
