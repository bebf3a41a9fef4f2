use std::time::Instant;

use axum::{
    extract::Request,
    http::{HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::application::error::ErrorReport;

const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Per-request correlation id, attached to the request extensions and
/// echoed back on the response.
#[derive(Debug, Clone, Copy)]
pub struct RequestContext {
    pub request_id: Uuid,
}

pub async fn set_request_context(mut request: Request, next: Next) -> Response {
    let context = RequestContext {
        request_id: Uuid::new_v4(),
    };
    request.extensions_mut().insert(context);

    let mut response = next.run(request).await;
    if let Ok(value) = HeaderValue::from_str(&context.request_id.to_string()) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}

pub async fn log_responses(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let request_id = request
        .extensions()
        .get::<RequestContext>()
        .map(|context| context.request_id);

    let start = Instant::now();
    let response = next.run(request).await;
    let elapsed_ms = start.elapsed().as_millis() as u64;
    let status = response.status().as_u16();

    if let Some(report) = response.extensions().get::<ErrorReport>() {
        warn!(
            target = "infra::http",
            %method,
            path = %path,
            status,
            elapsed_ms,
            request_id = ?request_id,
            error_source = report.source,
            error_chain = ?report.messages,
            "Request failed"
        );
    } else {
        info!(
            target = "infra::http",
            %method,
            path = %path,
            status,
            elapsed_ms,
            request_id = ?request_id,
            "Request served"
        );
    }

    response
}
