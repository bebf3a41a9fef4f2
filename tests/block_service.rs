//! Service-level tests for the ordering/upsert policy and the listing
//! cache's read-after-write behavior, run against the in-memory store.

mod support;

use std::sync::Arc;

use serde_json::json;
use uuid::Uuid;

use support::MemoryBlockStore;
use vetrina::application::blocks::{
    BlockSaveError, BlockService, SaveCaseBlockParams, SaveLandingBlockParams,
};
use vetrina::application::repos::{BlocksRepo, BlocksWriteRepo, RepoError};
use vetrina::cache::{
    CacheConfig, CacheConsumer, CacheTrigger, CachedBlocksRepo, EventQueue, ListingStore,
};
use vetrina::domain::blocks::{CaseBlockContent, CaseBlockKind, LandingBlockKind};
use vetrina::domain::entities::BlockRecord;
use vetrina::domain::types::BlockCollection;
use vetrina::presentation::blocks::render_case_sequence;

fn service_without_cache(store: Arc<MemoryBlockStore>) -> BlockService {
    let reader: Arc<dyn BlocksRepo> = store.clone();
    let writer: Arc<dyn BlocksWriteRepo> = store;
    BlockService::new(reader, writer)
}

fn service_with_cache(store: Arc<MemoryBlockStore>) -> BlockService {
    let listing_store = Arc::new(ListingStore::new(&CacheConfig::default()));
    let queue = Arc::new(EventQueue::new());
    let consumer = Arc::new(CacheConsumer::new(listing_store.clone(), queue.clone()));
    let trigger = Arc::new(CacheTrigger::new(CacheConfig::default(), queue, consumer));

    let reader: Arc<dyn BlocksRepo> = Arc::new(CachedBlocksRepo::new(store.clone(), listing_store));
    let writer: Arc<dyn BlocksWriteRepo> = store;
    BlockService::new(reader, writer).with_cache_trigger_opt(Some(trigger))
}

fn hero_payload(title: &str) -> serde_json::Value {
    json!({ "titulo": title })
}

#[tokio::test]
async fn create_without_position_appends_past_the_max() {
    let store = Arc::new(MemoryBlockStore::new());
    let owner = Uuid::from_u128(1);
    store.register_owner(BlockCollection::LandingPage, owner);
    let service = service_without_cache(store);

    let first = service
        .save_landing_block(SaveLandingBlockParams {
            owner_id: owner,
            kind: LandingBlockKind::Hero,
            content: hero_payload("A"),
            position: None,
            block_id: None,
        })
        .await
        .expect("first create");
    assert_eq!(first.position, 0);

    let second = service
        .save_landing_block(SaveLandingBlockParams {
            owner_id: owner,
            kind: LandingBlockKind::Text,
            content: json!({ "conteudo": "body" }),
            position: None,
            block_id: None,
        })
        .await
        .expect("second create");
    assert_eq!(second.position, 1);

    // an explicit position is honored verbatim, and the next append goes
    // strictly past it
    let pinned = service
        .save_landing_block(SaveLandingBlockParams {
            owner_id: owner,
            kind: LandingBlockKind::Cta,
            content: json!({
                "titulo": "Go",
                "texto_botao": "Now",
                "url_botao": "https://example.com/signup"
            }),
            position: Some(7),
            block_id: None,
        })
        .await
        .expect("pinned create");
    assert_eq!(pinned.position, 7);

    let appended = service
        .save_landing_block(SaveLandingBlockParams {
            owner_id: owner,
            kind: LandingBlockKind::Faq,
            content: json!({ "items": [] }),
            position: None,
            block_id: None,
        })
        .await
        .expect("append after pin");
    assert_eq!(appended.position, 8);
}

#[tokio::test]
async fn update_is_idempotent_and_never_creates_a_second_row() {
    let store = Arc::new(MemoryBlockStore::new());
    let owner = Uuid::from_u128(2);
    store.register_owner(BlockCollection::LandingPage, owner);
    let service = service_without_cache(store);

    let created = service
        .save_landing_block(SaveLandingBlockParams {
            owner_id: owner,
            kind: LandingBlockKind::Hero,
            content: hero_payload("A"),
            position: None,
            block_id: None,
        })
        .await
        .expect("create");

    for _ in 0..2 {
        let updated = service
            .save_landing_block(SaveLandingBlockParams {
                owner_id: owner,
                kind: LandingBlockKind::Hero,
                content: hero_payload("A2"),
                position: None,
                block_id: Some(created.id),
            })
            .await
            .expect("update");
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.content["titulo"], "A2");
        // omitted position preserves the stored value
        assert_eq!(updated.position, created.position);
    }

    let blocks = service
        .list_landing_blocks(owner)
        .await
        .expect("list after updates");
    assert_eq!(blocks.len(), 1);
}

#[tokio::test]
async fn update_cannot_change_kind() {
    let store = Arc::new(MemoryBlockStore::new());
    let owner = Uuid::from_u128(3);
    store.register_owner(BlockCollection::LandingPage, owner);
    let service = service_without_cache(store);

    let created = service
        .save_landing_block(SaveLandingBlockParams {
            owner_id: owner,
            kind: LandingBlockKind::Hero,
            content: hero_payload("A"),
            position: None,
            block_id: None,
        })
        .await
        .expect("create");

    let err = service
        .save_landing_block(SaveLandingBlockParams {
            owner_id: owner,
            kind: LandingBlockKind::Text,
            content: json!({ "conteudo": "now text" }),
            position: None,
            block_id: Some(created.id),
        })
        .await
        .expect_err("kind change must fail");
    assert!(matches!(err, BlockSaveError::KindImmutable));
}

#[tokio::test]
async fn stale_block_id_is_not_found() {
    let store = Arc::new(MemoryBlockStore::new());
    let owner = Uuid::from_u128(4);
    store.register_owner(BlockCollection::LandingPage, owner);
    let service = service_without_cache(store);

    let err = service
        .save_landing_block(SaveLandingBlockParams {
            owner_id: owner,
            kind: LandingBlockKind::Hero,
            content: hero_payload("A"),
            position: None,
            block_id: Some(Uuid::from_u128(999)),
        })
        .await
        .expect_err("stale id");
    assert!(matches!(err, BlockSaveError::Repo(RepoError::NotFound)));
}

#[tokio::test]
async fn listing_an_unknown_owner_is_not_found() {
    let store = Arc::new(MemoryBlockStore::new());
    let service = service_without_cache(store);

    let err = service
        .list_landing_blocks(Uuid::from_u128(77))
        .await
        .expect_err("unknown owner");
    assert!(matches!(err, RepoError::NotFound));
}

#[tokio::test]
async fn invalid_payload_is_rejected_before_any_write() {
    let store = Arc::new(MemoryBlockStore::new());
    let owner = Uuid::from_u128(5);
    store.register_owner(BlockCollection::Case, owner);
    let service = service_without_cache(store.clone());

    let err = service
        .save_case_block(SaveCaseBlockParams {
            owner_id: owner,
            kind: CaseBlockKind::Benefits,
            content: json!({ "benefits": "not-a-list" }),
            position: None,
            block_id: None,
        })
        .await
        .expect_err("bad payload");
    assert!(matches!(err, BlockSaveError::Content(_)));

    let blocks = service.list_case_blocks(owner).await.expect("list");
    assert!(blocks.is_empty());
}

#[tokio::test]
async fn unknown_kind_rows_are_skipped_not_fatal() {
    let store = Arc::new(MemoryBlockStore::new());
    let owner = Uuid::from_u128(6);
    store.register_owner(BlockCollection::LandingPage, owner);

    store.seed_raw(
        BlockCollection::LandingPage,
        BlockRecord {
            id: Uuid::from_u128(100),
            owner_id: owner,
            kind: "carousel".to_string(),
            position: 0,
            content: json!({}),
            created_at: time::OffsetDateTime::UNIX_EPOCH,
            updated_at: time::OffsetDateTime::UNIX_EPOCH,
        },
    );

    let service = service_without_cache(store);
    let created = service
        .save_landing_block(SaveLandingBlockParams {
            owner_id: owner,
            kind: LandingBlockKind::Hero,
            content: hero_payload("Still renders"),
            position: None,
            block_id: None,
        })
        .await
        .expect("create beside bad row");

    let blocks = service.list_landing_blocks(owner).await.expect("list");
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].record.id, created.id);
}

#[tokio::test]
async fn listings_are_cached_and_invalidated_on_write() {
    let store = Arc::new(MemoryBlockStore::new());
    let owner = Uuid::from_u128(7);
    store.register_owner(BlockCollection::LandingPage, owner);
    let service = service_with_cache(store.clone());

    let created = service
        .save_landing_block(SaveLandingBlockParams {
            owner_id: owner,
            kind: LandingBlockKind::Hero,
            content: hero_payload("v1"),
            position: None,
            block_id: None,
        })
        .await
        .expect("create");

    // prime the cache
    let first = service.list_landing_blocks(owner).await.expect("list v1");
    assert_eq!(first[0].record.content["titulo"], "v1");

    // a direct store mutation is invisible: the listing is served from cache
    store.overwrite_content(created.id, hero_payload("backdoor"));
    let cached = service.list_landing_blocks(owner).await.expect("cached");
    assert_eq!(cached[0].record.content["titulo"], "v1");

    // a service write invalidates before resolving, so the next read
    // refetches
    service
        .save_landing_block(SaveLandingBlockParams {
            owner_id: owner,
            kind: LandingBlockKind::Hero,
            content: hero_payload("v2"),
            position: None,
            block_id: Some(created.id),
        })
        .await
        .expect("update");

    let fresh = service.list_landing_blocks(owner).await.expect("fresh");
    assert_eq!(fresh[0].record.content["titulo"], "v2");
}

#[tokio::test]
async fn delete_owner_cascades_and_invalidates() {
    let store = Arc::new(MemoryBlockStore::new());
    let owner = Uuid::from_u128(8);
    store.register_owner(BlockCollection::Case, owner);
    let service = service_with_cache(store.clone());

    service
        .save_case_block(SaveCaseBlockParams {
            owner_id: owner,
            kind: CaseBlockKind::Hero,
            content: hero_payload("A"),
            position: None,
            block_id: None,
        })
        .await
        .expect("create");
    service.list_case_blocks(owner).await.expect("prime cache");

    service
        .delete_owner(BlockCollection::Case, owner)
        .await
        .expect("delete owner");

    let err = service
        .list_case_blocks(owner)
        .await
        .expect_err("owner is gone");
    assert!(matches!(err, RepoError::NotFound));
}

#[tokio::test]
async fn case_blocks_end_to_end_scenario() {
    let store = Arc::new(MemoryBlockStore::new());
    let owner = Uuid::from_u128(42);
    store.register_owner(BlockCollection::Case, owner);
    let service = service_with_cache(store);

    let hero = service
        .save_case_block(SaveCaseBlockParams {
            owner_id: owner,
            kind: CaseBlockKind::Hero,
            content: json!({ "titulo": "A" }),
            position: Some(0),
            block_id: None,
        })
        .await
        .expect("hero create");
    service
        .save_case_block(SaveCaseBlockParams {
            owner_id: owner,
            kind: CaseBlockKind::Benefits,
            content: json!({
                "benefits": [{ "icon": "Zap", "titulo": "B", "descricao": "C" }]
            }),
            position: Some(1),
            block_id: None,
        })
        .await
        .expect("benefits create");

    let blocks = service.list_case_blocks(owner).await.expect("list");
    assert_eq!(blocks.len(), 2);
    assert!(matches!(blocks[0].content, CaseBlockContent::Hero(_)));
    assert!(matches!(blocks[1].content, CaseBlockContent::Benefits(_)));

    let outputs = render_case_sequence(&blocks);
    assert_eq!(outputs.len(), 2);
    assert!(outputs[0].contains("block-hero"));
    assert!(outputs[1].contains("block-benefits"));

    // update only the hero title
    service
        .save_case_block(SaveCaseBlockParams {
            owner_id: owner,
            kind: CaseBlockKind::Hero,
            content: json!({ "titulo": "A2" }),
            position: None,
            block_id: Some(hero.id),
        })
        .await
        .expect("hero update");

    let after = service.list_case_blocks(owner).await.expect("relist");
    assert_eq!(after.len(), 2);
    assert_eq!(after[0].record.id, hero.id);
    assert_eq!(after[0].record.position, 0);
    assert_eq!(after[0].record.content["titulo"], "A2");
    assert_eq!(after[1].record.position, 1);
    assert_eq!(after[1].record.content, blocks[1].record.content);
}
