//! Block CRUD handlers.
//!
//! Authentication and role resolution happen upstream of this service;
//! these handlers assume the caller has already passed that gate.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use uuid::Uuid;

use crate::application::blocks::{SaveCaseBlockParams, SaveLandingBlockParams};
use crate::domain::types::BlockCollection;
use crate::infra::http::HttpState;

use super::error::ApiError;
use super::models::{SaveCaseBlockRequest, SaveLandingBlockRequest};

pub async fn list_landing_blocks(
    State(state): State<HttpState>,
    Path(owner_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let blocks = state.blocks.list_landing_blocks(owner_id).await?;
    let records: Vec<_> = blocks.into_iter().map(|block| block.record).collect();
    Ok(Json(records))
}

pub async fn save_landing_block(
    State(state): State<HttpState>,
    Path(owner_id): Path<Uuid>,
    Json(payload): Json<SaveLandingBlockRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let is_create = payload.block_id.is_none();

    let record = state
        .blocks
        .save_landing_block(SaveLandingBlockParams {
            owner_id,
            kind: payload.kind,
            content: payload.content,
            position: payload.position,
            block_id: payload.block_id,
        })
        .await?;

    let status = if is_create {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(record)))
}

pub async fn delete_landing_block(
    State(state): State<HttpState>,
    Path((owner_id, block_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .blocks
        .delete_block(BlockCollection::LandingPage, owner_id, block_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_landing_page(
    State(state): State<HttpState>,
    Path(owner_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .blocks
        .delete_owner(BlockCollection::LandingPage, owner_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_case_blocks(
    State(state): State<HttpState>,
    Path(owner_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let blocks = state.blocks.list_case_blocks(owner_id).await?;
    let records: Vec<_> = blocks.into_iter().map(|block| block.record).collect();
    Ok(Json(records))
}

pub async fn save_case_block(
    State(state): State<HttpState>,
    Path(owner_id): Path<Uuid>,
    Json(payload): Json<SaveCaseBlockRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let is_create = payload.block_id.is_none();

    let record = state
        .blocks
        .save_case_block(SaveCaseBlockParams {
            owner_id,
            kind: payload.kind,
            content: payload.content,
            position: payload.position,
            block_id: payload.block_id,
        })
        .await?;

    let status = if is_create {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(record)))
}

pub async fn delete_case_block(
    State(state): State<HttpState>,
    Path((owner_id, block_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .blocks
        .delete_block(BlockCollection::Case, owner_id, block_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_case(
    State(state): State<HttpState>,
    Path(owner_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .blocks
        .delete_owner(BlockCollection::Case, owner_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
