use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::application::blocks::BlockSaveError;
use crate::application::error::ErrorReport;
use crate::application::repos::RepoError;
use crate::domain::blocks::BlockContentError;

#[derive(Debug, Serialize)]
pub struct ApiErrorBody {
    pub error: ApiErrorMessage,
}

pub mod codes {
    pub const NOT_FOUND: &str = "not_found";
    pub const UNSUPPORTED_BLOCK_KIND: &str = "unsupported_block_kind";
    pub const VALIDATION_REJECTED: &str = "validation_rejected";
    pub const KIND_IMMUTABLE: &str = "kind_immutable";
    pub const STORE_UNAVAILABLE: &str = "store_unavailable";
}

#[derive(Debug, Serialize)]
pub struct ApiErrorMessage {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    code: &'static str,
    message: &'static str,
    hint: Option<String>,
}

impl ApiError {
    pub fn new(
        status: StatusCode,
        code: &'static str,
        message: &'static str,
        hint: Option<String>,
    ) -> Self {
        Self {
            status,
            code,
            message,
            hint,
        }
    }

    pub fn not_found(message: &'static str) -> Self {
        Self::new(StatusCode::NOT_FOUND, codes::NOT_FOUND, message, None)
    }

    pub fn validation_rejected(hint: Option<String>) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            codes::VALIDATION_REJECTED,
            "Block payload does not match its kind's schema",
            hint,
        )
    }
}

impl From<RepoError> for ApiError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound => ApiError::not_found("owner or block not found"),
            RepoError::ValidationRejected { message } => {
                ApiError::validation_rejected(Some(message))
            }
            RepoError::Unavailable(message) => ApiError::new(
                StatusCode::SERVICE_UNAVAILABLE,
                codes::STORE_UNAVAILABLE,
                "Store temporarily unavailable; retry the operation",
                Some(message),
            ),
        }
    }
}

impl From<BlockSaveError> for ApiError {
    fn from(err: BlockSaveError) -> Self {
        match err {
            BlockSaveError::Content(BlockContentError::UnsupportedKind { kind }) => ApiError::new(
                StatusCode::BAD_REQUEST,
                codes::UNSUPPORTED_BLOCK_KIND,
                "Unknown block kind",
                Some(format!("kind `{kind}` is not registered")),
            ),
            BlockSaveError::Content(BlockContentError::Payload { message, .. }) => {
                ApiError::validation_rejected(Some(message))
            }
            BlockSaveError::KindImmutable => ApiError::new(
                StatusCode::CONFLICT,
                codes::KIND_IMMUTABLE,
                "Block kind cannot change; delete and recreate the block",
                None,
            ),
            BlockSaveError::Repo(err) => err.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let detail = self.hint.clone();
        let body = ApiErrorBody {
            error: ApiErrorMessage {
                code: self.code.to_string(),
                message: self.message.to_string(),
                hint: self.hint,
            },
        };

        let mut response = (self.status, Json(body)).into_response();
        ErrorReport::from_message(
            "infra::http::api",
            self.status,
            detail.unwrap_or_else(|| self.message.to_string()),
        )
        .attach(&mut response);
        response
    }
}
