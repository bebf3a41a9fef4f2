//! Cache event consumer.
//!
//! Drains the event queue and translates each event into listing-store
//! invalidations. Dropping the entry (instead of patching it) forces the
//! next `list` to refetch, which is what gives writers read-after-write
//! consistency.

use std::sync::Arc;

use metrics::counter;
use tracing::debug;

use super::events::{CacheEvent, EventKind, EventQueue};
use super::store::ListingStore;

const DRAIN_BATCH: usize = 64;

pub struct CacheConsumer {
    store: Arc<ListingStore>,
    queue: Arc<EventQueue>,
}

impl CacheConsumer {
    pub fn new(store: Arc<ListingStore>, queue: Arc<EventQueue>) -> Self {
        Self { store, queue }
    }

    /// Consume all pending events.
    pub async fn consume(&self) {
        loop {
            let events = self.queue.drain(DRAIN_BATCH);
            if events.is_empty() {
                break;
            }
            for event in events {
                self.apply(event);
            }
        }
    }

    fn apply(&self, event: CacheEvent) {
        debug!(
            event_id = %event.id,
            event_epoch = event.epoch,
            event_kind = ?event.kind,
            "Applying cache event"
        );
        counter!("vetrina_cache_events_applied_total").increment(1);

        match event.kind {
            EventKind::BlocksChanged {
                collection,
                owner_id,
            }
            | EventKind::OwnerDeleted {
                collection,
                owner_id,
            } => {
                self.store.invalidate(collection, owner_id);
            }
        }
    }
}
