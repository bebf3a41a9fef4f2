//! Cache trigger service.
//!
//! High-level API used by write paths. Every trigger publishes its event
//! and consumes the queue before returning, so the invalidation is visible
//! to the caller's next read: a mutation must never resolve while a stale
//! listing is still servable.

use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use crate::domain::types::BlockCollection;

use super::config::CacheConfig;
use super::consumer::CacheConsumer;
use super::events::{EventKind, EventQueue};

pub struct CacheTrigger {
    config: CacheConfig,
    queue: Arc<EventQueue>,
    consumer: Arc<CacheConsumer>,
}

impl CacheTrigger {
    pub fn new(config: CacheConfig, queue: Arc<EventQueue>, consumer: Arc<CacheConsumer>) -> Self {
        Self {
            config,
            queue,
            consumer,
        }
    }

    pub async fn trigger(&self, kind: EventKind) {
        if !self.config.is_enabled() {
            debug!(event_kind = ?kind, "Cache trigger skipped: cache disabled");
            return;
        }

        self.queue.publish(kind);
        self.consumer.consume().await;
    }

    /// A block was created or updated for `owner_id`.
    pub async fn blocks_changed(&self, collection: BlockCollection, owner_id: Uuid) {
        self.trigger(EventKind::BlocksChanged {
            collection,
            owner_id,
        })
        .await;
    }

    /// An owner page/case was deleted (blocks cascade at the store).
    pub async fn owner_deleted(&self, collection: BlockCollection, owner_id: Uuid) {
        self.trigger(EventKind::OwnerDeleted {
            collection,
            owner_id,
        })
        .await;
    }
}
