//! Listing cache storage.
//!
//! Caches the ordered block collection per owner. Entries are whole
//! listings: invalidation drops the entry so the next read refetches from
//! the store. Block payloads are large and multi-field, so stale entries
//! are never patched in place.

use std::num::NonZeroUsize;
use std::sync::RwLock;

use lru::LruCache;
use uuid::Uuid;

use crate::domain::entities::BlockRecord;
use crate::domain::types::BlockCollection;

use super::config::CacheConfig;
use super::lock::rw_write;

const SOURCE: &str = "cache::store";

pub struct ListingStore {
    listings: RwLock<LruCache<(BlockCollection, Uuid), Vec<BlockRecord>>>,
}

impl ListingStore {
    pub fn new(config: &CacheConfig) -> Self {
        Self {
            listings: RwLock::new(LruCache::new(config.listing_limit_non_zero())),
        }
    }

    /// An LRU store sized for tests: one entry.
    pub fn with_capacity(capacity: NonZeroUsize) -> Self {
        Self {
            listings: RwLock::new(LruCache::new(capacity)),
        }
    }

    pub fn get(&self, collection: BlockCollection, owner_id: Uuid) -> Option<Vec<BlockRecord>> {
        rw_write(&self.listings, SOURCE, "get")
            .get(&(collection, owner_id))
            .cloned()
    }

    pub fn set(&self, collection: BlockCollection, owner_id: Uuid, blocks: Vec<BlockRecord>) {
        rw_write(&self.listings, SOURCE, "set").put((collection, owner_id), blocks);
    }

    pub fn invalidate(&self, collection: BlockCollection, owner_id: Uuid) {
        rw_write(&self.listings, SOURCE, "invalidate").pop(&(collection, owner_id));
    }

    pub fn clear(&self) {
        rw_write(&self.listings, SOURCE, "clear").clear();
    }

    pub fn len(&self) -> usize {
        rw_write(&self.listings, SOURCE, "len").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
