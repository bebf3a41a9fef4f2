//! Repository traits describing persistence adapters.
//!
//! The service layer depends only on these traits; the Postgres
//! implementation lives in `infra::db` and the listing cache wraps
//! `BlocksRepo` in `cache::repo`.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::entities::{BlockRecord, CaseRecord, CustomPageRecord, LandingPageRecord};
use crate::domain::types::BlockCollection;

/// Failures surfaced by the store adapter.
///
/// `Unavailable` is transient: the specific operation may be retried, but
/// partial success must never be assumed. `ValidationRejected` and
/// `NotFound` are terminal for the request that produced them.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("store rejected the payload: {message}")]
    ValidationRejected { message: String },
    #[error("resource not found")]
    NotFound,
}

impl RepoError {
    pub fn unavailable(err: impl std::fmt::Display) -> Self {
        Self::Unavailable(err.to_string())
    }

    pub fn validation_rejected(message: impl Into<String>) -> Self {
        Self::ValidationRejected {
            message: message.into(),
        }
    }

    /// Whether retrying the same operation can succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, RepoError::Unavailable(_))
    }
}

#[derive(Debug, Clone)]
pub struct InsertBlockParams {
    pub owner_id: Uuid,
    pub kind: String,
    pub content: serde_json::Value,
    /// `None` appends at the end of the sequence (current max + 1, 0 when
    /// the collection is empty), resolved atomically by the adapter.
    pub position: Option<i32>,
}

#[derive(Debug, Clone)]
pub struct UpdateBlockParams {
    pub owner_id: Uuid,
    pub block_id: Uuid,
    pub content: serde_json::Value,
    /// `None` preserves the stored position.
    pub position: Option<i32>,
}

#[async_trait]
pub trait BlocksRepo: Send + Sync {
    /// Blocks for one owner, ascending by `(position, created_at, id)`.
    /// Fails with `NotFound` when the owner row itself is absent.
    async fn list_blocks(
        &self,
        collection: BlockCollection,
        owner_id: Uuid,
    ) -> Result<Vec<BlockRecord>, RepoError>;

    async fn find_block(
        &self,
        collection: BlockCollection,
        block_id: Uuid,
    ) -> Result<Option<BlockRecord>, RepoError>;
}

#[async_trait]
pub trait BlocksWriteRepo: Send + Sync {
    async fn insert_block(
        &self,
        collection: BlockCollection,
        params: InsertBlockParams,
    ) -> Result<BlockRecord, RepoError>;

    /// Updates content and (optionally) position only; `kind` is never
    /// altered by an update. `NotFound` for stale block ids.
    async fn update_block(
        &self,
        collection: BlockCollection,
        params: UpdateBlockParams,
    ) -> Result<BlockRecord, RepoError>;

    /// Changing a block's kind is delete + recreate, never an in-place
    /// type change; this is the delete half of that flow.
    async fn delete_block(
        &self,
        collection: BlockCollection,
        block_id: Uuid,
    ) -> Result<(), RepoError>;

    /// Deletes the owner row; its blocks cascade at the store.
    async fn delete_owner(
        &self,
        collection: BlockCollection,
        owner_id: Uuid,
    ) -> Result<(), RepoError>;
}

#[async_trait]
pub trait LandingPagesRepo: Send + Sync {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<LandingPageRecord>, RepoError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<LandingPageRecord>, RepoError>;
}

#[async_trait]
pub trait CasesRepo: Send + Sync {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<CaseRecord>, RepoError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<CaseRecord>, RepoError>;
}

#[async_trait]
pub trait CustomPagesRepo: Send + Sync {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<CustomPageRecord>, RepoError>;
}
