//! In-memory block store used by the integration tests: implements the
//! adapter traits with the same contract as the Postgres implementation,
//! including the defensive owner check and end-of-sequence position
//! assignment.

use std::collections::HashSet;
use std::sync::Mutex;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

use vetrina::application::repos::{
    BlocksRepo, BlocksWriteRepo, InsertBlockParams, RepoError, UpdateBlockParams,
};
use vetrina::domain::entities::BlockRecord;
use vetrina::domain::ordering::{next_position, sort_blocks};
use vetrina::domain::types::BlockCollection;

#[derive(Default)]
pub struct MemoryBlockStore {
    owners: Mutex<HashSet<(BlockCollection, Uuid)>>,
    blocks: Mutex<Vec<(BlockCollection, BlockRecord)>>,
    clock: AtomicI64,
}

impl MemoryBlockStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_owner(&self, collection: BlockCollection, owner_id: Uuid) {
        self.owners
            .lock()
            .expect("owners lock")
            .insert((collection, owner_id));
    }

    /// Write a raw record directly, bypassing the service layer. Used to
    /// seed rows the service itself would refuse (unknown kinds) and to
    /// demonstrate cache staleness.
    pub fn seed_raw(&self, collection: BlockCollection, record: BlockRecord) {
        self.blocks
            .lock()
            .expect("blocks lock")
            .push((collection, record));
    }

    /// Mutate a stored block's content directly, bypassing invalidation.
    pub fn overwrite_content(&self, block_id: Uuid, content: serde_json::Value) {
        let mut blocks = self.blocks.lock().expect("blocks lock");
        for (_, record) in blocks.iter_mut() {
            if record.id == block_id {
                record.content = content.clone();
            }
        }
    }

    fn tick(&self) -> OffsetDateTime {
        let seconds = self.clock.fetch_add(1, Ordering::SeqCst);
        OffsetDateTime::UNIX_EPOCH + time::Duration::seconds(seconds)
    }

    fn owner_exists(&self, collection: BlockCollection, owner_id: Uuid) -> bool {
        self.owners
            .lock()
            .expect("owners lock")
            .contains(&(collection, owner_id))
    }

    fn owner_blocks(&self, collection: BlockCollection, owner_id: Uuid) -> Vec<BlockRecord> {
        let blocks = self.blocks.lock().expect("blocks lock");
        let mut owned: Vec<BlockRecord> = blocks
            .iter()
            .filter(|(entry_collection, record)| {
                *entry_collection == collection && record.owner_id == owner_id
            })
            .map(|(_, record)| record.clone())
            .collect();
        sort_blocks(&mut owned);
        owned
    }
}

#[async_trait]
impl BlocksRepo for MemoryBlockStore {
    async fn list_blocks(
        &self,
        collection: BlockCollection,
        owner_id: Uuid,
    ) -> Result<Vec<BlockRecord>, RepoError> {
        if !self.owner_exists(collection, owner_id) {
            return Err(RepoError::NotFound);
        }
        Ok(self.owner_blocks(collection, owner_id))
    }

    async fn find_block(
        &self,
        collection: BlockCollection,
        block_id: Uuid,
    ) -> Result<Option<BlockRecord>, RepoError> {
        let blocks = self.blocks.lock().expect("blocks lock");
        Ok(blocks
            .iter()
            .find(|(entry_collection, record)| {
                *entry_collection == collection && record.id == block_id
            })
            .map(|(_, record)| record.clone()))
    }
}

#[async_trait]
impl BlocksWriteRepo for MemoryBlockStore {
    async fn insert_block(
        &self,
        collection: BlockCollection,
        params: InsertBlockParams,
    ) -> Result<BlockRecord, RepoError> {
        if !self.owner_exists(collection, params.owner_id) {
            return Err(RepoError::NotFound);
        }

        let position = match params.position {
            Some(position) => position,
            None => next_position(&self.owner_blocks(collection, params.owner_id)),
        };
        let now = self.tick();

        let record = BlockRecord {
            id: Uuid::new_v4(),
            owner_id: params.owner_id,
            kind: params.kind,
            position,
            content: params.content,
            created_at: now,
            updated_at: now,
        };

        self.blocks
            .lock()
            .expect("blocks lock")
            .push((collection, record.clone()));
        Ok(record)
    }

    async fn update_block(
        &self,
        collection: BlockCollection,
        params: UpdateBlockParams,
    ) -> Result<BlockRecord, RepoError> {
        let now = self.tick();
        let mut blocks = self.blocks.lock().expect("blocks lock");

        for (entry_collection, record) in blocks.iter_mut() {
            if *entry_collection == collection
                && record.id == params.block_id
                && record.owner_id == params.owner_id
            {
                record.content = params.content;
                if let Some(position) = params.position {
                    record.position = position;
                }
                record.updated_at = now;
                return Ok(record.clone());
            }
        }

        Err(RepoError::NotFound)
    }

    async fn delete_block(
        &self,
        collection: BlockCollection,
        block_id: Uuid,
    ) -> Result<(), RepoError> {
        let mut blocks = self.blocks.lock().expect("blocks lock");
        let before = blocks.len();
        blocks.retain(|(entry_collection, record)| {
            !(*entry_collection == collection && record.id == block_id)
        });
        if blocks.len() == before {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }

    async fn delete_owner(
        &self,
        collection: BlockCollection,
        owner_id: Uuid,
    ) -> Result<(), RepoError> {
        let removed = self
            .owners
            .lock()
            .expect("owners lock")
            .remove(&(collection, owner_id));
        if !removed {
            return Err(RepoError::NotFound);
        }

        // cascade, as the store would
        self.blocks
            .lock()
            .expect("blocks lock")
            .retain(|(entry_collection, record)| {
                !(*entry_collection == collection && record.owner_id == owner_id)
            });
        Ok(())
    }
}
