//! Caching decorator for the block store adapter.
//!
//! Wraps any `BlocksRepo` with the listing store: hits skip the store
//! round-trip entirely, misses populate the cache. Point lookups pass
//! through untouched. Errors are never cached.

use std::sync::Arc;

use async_trait::async_trait;
use metrics::counter;
use uuid::Uuid;

use crate::application::repos::{BlocksRepo, RepoError};
use crate::domain::entities::BlockRecord;
use crate::domain::types::BlockCollection;

use super::store::ListingStore;

pub struct CachedBlocksRepo {
    inner: Arc<dyn BlocksRepo>,
    store: Arc<ListingStore>,
}

impl CachedBlocksRepo {
    pub fn new(inner: Arc<dyn BlocksRepo>, store: Arc<ListingStore>) -> Self {
        Self { inner, store }
    }
}

#[async_trait]
impl BlocksRepo for CachedBlocksRepo {
    async fn list_blocks(
        &self,
        collection: BlockCollection,
        owner_id: Uuid,
    ) -> Result<Vec<BlockRecord>, RepoError> {
        if let Some(hit) = self.store.get(collection, owner_id) {
            counter!("vetrina_cache_listing_hit_total").increment(1);
            return Ok(hit);
        }
        counter!("vetrina_cache_listing_miss_total").increment(1);

        let blocks = self.inner.list_blocks(collection, owner_id).await?;
        self.store.set(collection, owner_id, blocks.clone());
        Ok(blocks)
    }

    async fn find_block(
        &self,
        collection: BlockCollection,
        block_id: Uuid,
    ) -> Result<Option<BlockRecord>, RepoError> {
        self.inner.find_block(collection, block_id).await
    }
}
