//! Block collection service: decoding on read, create-vs-update policy on
//! save, cache invalidation after every successful write.

use std::sync::Arc;

use metrics::counter;
use thiserror::Error;
use tracing::warn;
use uuid::Uuid;

use crate::application::repos::{
    BlocksRepo, BlocksWriteRepo, InsertBlockParams, RepoError, UpdateBlockParams,
};
use crate::cache::CacheTrigger;
use crate::domain::blocks::{
    BlockContentError, CaseBlockContent, CaseBlockKind, LandingBlockContent, LandingBlockKind,
    decode_case_payload, decode_landing_payload,
};
use crate::domain::entities::BlockRecord;
use crate::domain::types::BlockCollection;

const SOURCE: &str = "application::blocks::BlockService";

/// A stored block together with its decoded landing content.
#[derive(Debug, Clone, PartialEq)]
pub struct LandingBlock {
    pub record: BlockRecord,
    pub content: LandingBlockContent,
}

/// A stored block together with its decoded case content.
#[derive(Debug, Clone, PartialEq)]
pub struct CaseBlock {
    pub record: BlockRecord,
    pub content: CaseBlockContent,
}

#[derive(Debug, Error)]
pub enum BlockSaveError {
    #[error(transparent)]
    Content(#[from] BlockContentError),
    #[error("block kind is immutable; delete and recreate to change it")]
    KindImmutable,
    #[error(transparent)]
    Repo(#[from] RepoError),
}

#[derive(Debug, Clone)]
pub struct SaveLandingBlockParams {
    pub owner_id: Uuid,
    pub kind: LandingBlockKind,
    pub content: serde_json::Value,
    /// On create: `None` appends at the end of the sequence. On update:
    /// `None` preserves the stored position.
    pub position: Option<i32>,
    /// Present means update; absent means create. There is no content-based
    /// dedup: re-submitting a create without the returned id is a caller
    /// error.
    pub block_id: Option<Uuid>,
}

#[derive(Debug, Clone)]
pub struct SaveCaseBlockParams {
    pub owner_id: Uuid,
    pub kind: CaseBlockKind,
    pub content: serde_json::Value,
    pub position: Option<i32>,
    pub block_id: Option<Uuid>,
}

#[derive(Clone)]
pub struct BlockService {
    reader: Arc<dyn BlocksRepo>,
    writer: Arc<dyn BlocksWriteRepo>,
    cache_trigger: Option<Arc<CacheTrigger>>,
}

impl BlockService {
    pub fn new(reader: Arc<dyn BlocksRepo>, writer: Arc<dyn BlocksWriteRepo>) -> Self {
        Self {
            reader,
            writer,
            cache_trigger: None,
        }
    }

    /// Set the cache trigger for this service (optional).
    pub fn with_cache_trigger_opt(mut self, trigger: Option<Arc<CacheTrigger>>) -> Self {
        self.cache_trigger = trigger;
        self
    }

    /// The ordered, decoded block sequence for a landing page.
    ///
    /// Records that fail decoding are skipped with a warning so one bad
    /// block never blanks its siblings; the repo already returns the rows
    /// in render order and they are not re-sorted here.
    pub async fn list_landing_blocks(
        &self,
        owner_id: Uuid,
    ) -> Result<Vec<LandingBlock>, RepoError> {
        let records = self
            .reader
            .list_blocks(BlockCollection::LandingPage, owner_id)
            .await?;

        let mut blocks = Vec::with_capacity(records.len());
        for record in records {
            match LandingBlockKind::try_from(record.kind.as_str())
                .map_err(|()| BlockContentError::UnsupportedKind {
                    kind: record.kind.clone(),
                })
                .and_then(|kind| decode_landing_payload(kind, &record.content))
            {
                Ok(content) => blocks.push(LandingBlock { record, content }),
                Err(err) => skip_undecodable(BlockCollection::LandingPage, &record, &err),
            }
        }
        Ok(blocks)
    }

    /// The ordered, decoded block sequence for a case.
    pub async fn list_case_blocks(&self, owner_id: Uuid) -> Result<Vec<CaseBlock>, RepoError> {
        let records = self
            .reader
            .list_blocks(BlockCollection::Case, owner_id)
            .await?;

        let mut blocks = Vec::with_capacity(records.len());
        for record in records {
            match CaseBlockKind::try_from(record.kind.as_str())
                .map_err(|()| BlockContentError::UnsupportedKind {
                    kind: record.kind.clone(),
                })
                .and_then(|kind| decode_case_payload(kind, &record.content))
            {
                Ok(content) => blocks.push(CaseBlock { record, content }),
                Err(err) => skip_undecodable(BlockCollection::Case, &record, &err),
            }
        }
        Ok(blocks)
    }

    /// Save one landing-page block.
    ///
    /// The presence of `block_id` is the create-vs-update discriminator.
    /// The payload is validated against the declared kind before any write,
    /// and an update against a row of a different kind is rejected rather
    /// than silently re-typing the block.
    pub async fn save_landing_block(
        &self,
        params: SaveLandingBlockParams,
    ) -> Result<BlockRecord, BlockSaveError> {
        let SaveLandingBlockParams {
            owner_id,
            kind,
            content,
            position,
            block_id,
        } = params;

        decode_landing_payload(kind, &content)?;
        self.save(
            BlockCollection::LandingPage,
            owner_id,
            kind.as_str(),
            content,
            position,
            block_id,
        )
        .await
    }

    /// Save one case block.
    pub async fn save_case_block(
        &self,
        params: SaveCaseBlockParams,
    ) -> Result<BlockRecord, BlockSaveError> {
        let SaveCaseBlockParams {
            owner_id,
            kind,
            content,
            position,
            block_id,
        } = params;

        decode_case_payload(kind, &content)?;
        self.save(
            BlockCollection::Case,
            owner_id,
            kind.as_str(),
            content,
            position,
            block_id,
        )
        .await
    }

    async fn save(
        &self,
        collection: BlockCollection,
        owner_id: Uuid,
        kind: &str,
        content: serde_json::Value,
        position: Option<i32>,
        block_id: Option<Uuid>,
    ) -> Result<BlockRecord, BlockSaveError> {
        let record = match block_id {
            Some(block_id) => {
                let existing = self
                    .reader
                    .find_block(collection, block_id)
                    .await?
                    .ok_or(RepoError::NotFound)?;
                if existing.kind != kind {
                    return Err(BlockSaveError::KindImmutable);
                }

                self.writer
                    .update_block(
                        collection,
                        UpdateBlockParams {
                            owner_id,
                            block_id,
                            content,
                            position,
                        },
                    )
                    .await?
            }
            None => {
                self.writer
                    .insert_block(
                        collection,
                        InsertBlockParams {
                            owner_id,
                            kind: kind.to_string(),
                            content,
                            position,
                        },
                    )
                    .await?
            }
        };

        // The listing for this owner must be refetched by the next read;
        // resolve only after the invalidation has been applied.
        if let Some(trigger) = &self.cache_trigger {
            trigger.blocks_changed(collection, owner_id).await;
        }

        Ok(record)
    }

    /// Delete one block (the delete half of a kind change).
    pub async fn delete_block(
        &self,
        collection: BlockCollection,
        owner_id: Uuid,
        block_id: Uuid,
    ) -> Result<(), RepoError> {
        self.writer.delete_block(collection, block_id).await?;

        if let Some(trigger) = &self.cache_trigger {
            trigger.blocks_changed(collection, owner_id).await;
        }
        Ok(())
    }

    /// Delete an owner page/case; its blocks cascade at the store.
    pub async fn delete_owner(
        &self,
        collection: BlockCollection,
        owner_id: Uuid,
    ) -> Result<(), RepoError> {
        self.writer.delete_owner(collection, owner_id).await?;

        if let Some(trigger) = &self.cache_trigger {
            trigger.owner_deleted(collection, owner_id).await;
        }
        Ok(())
    }
}

fn skip_undecodable(collection: BlockCollection, record: &BlockRecord, err: &BlockContentError) {
    counter!("vetrina_blocks_skipped_total").increment(1);
    warn!(
        target = SOURCE,
        collection = collection.as_str(),
        block_id = %record.id,
        owner_id = %record.owner_id,
        kind = %record.kind,
        error = %err,
        "Skipping undecodable block"
    );
}
