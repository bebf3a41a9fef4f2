//! Domain entities mirrored from persistent storage.

use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::domain::types::PageLayout;

/// Persisted shape of one content block. `kind` and `content` are stored as
/// the raw `(tag, JSON)` pair; the schema registry decodes them into typed
/// content. `kind` is immutable after creation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlockRecord {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub kind: String,
    pub position: i32,
    pub content: serde_json::Value,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LandingPageRecord {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub meta_description: Option<String>,
    pub published: bool,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaseRecord {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub client: Option<String>,
    pub excerpt: Option<String>,
    pub published: bool,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// A fully custom page: raw HTML/CSS/JS channels plus an optional embedded
/// block sequence. A non-empty `blocks_content` array takes precedence over
/// `html_content`; the raw channel is the fallback, never merged with it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomPageRecord {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub html_content: String,
    pub css_content: String,
    pub js_content: String,
    pub custom_head: String,
    pub header_visible: bool,
    pub footer_visible: bool,
    pub layout: PageLayout,
    pub blocks_content: serde_json::Value,
    pub published: bool,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// One flat comment row as stored; threading is reconstructed in
/// `domain::comments`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommentRecord {
    pub id: Uuid,
    pub page_id: Uuid,
    pub parent_id: Option<Uuid>,
    pub author_name: String,
    pub body_html: String,
    pub created_at: OffsetDateTime,
}
