use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::application::repos::{CustomPagesRepo, RepoError};
use crate::domain::entities::CustomPageRecord;
use crate::domain::types::PageLayout;

use super::{PostgresRepositories, map_sqlx_error};

const CUSTOM_PAGE_COLUMNS: &str = "id, slug, title, html_content, css_content, js_content, \
     custom_head, header_visible, footer_visible, layout, blocks_content, published, \
     created_at, updated_at";

#[derive(sqlx::FromRow)]
struct CustomPageRow {
    id: Uuid,
    slug: String,
    title: String,
    html_content: String,
    css_content: String,
    js_content: String,
    custom_head: String,
    header_visible: bool,
    footer_visible: bool,
    layout: PageLayout,
    blocks_content: serde_json::Value,
    published: bool,
    created_at: OffsetDateTime,
    updated_at: OffsetDateTime,
}

impl From<CustomPageRow> for CustomPageRecord {
    fn from(row: CustomPageRow) -> Self {
        Self {
            id: row.id,
            slug: row.slug,
            title: row.title,
            html_content: row.html_content,
            css_content: row.css_content,
            js_content: row.js_content,
            custom_head: row.custom_head,
            header_visible: row.header_visible,
            footer_visible: row.footer_visible,
            layout: row.layout,
            blocks_content: row.blocks_content,
            published: row.published,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl CustomPagesRepo for PostgresRepositories {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<CustomPageRecord>, RepoError> {
        let row: Option<CustomPageRow> = sqlx::query_as(&format!(
            "SELECT {CUSTOM_PAGE_COLUMNS} FROM custom_pages WHERE slug = $1"
        ))
        .bind(slug)
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(CustomPageRecord::from))
    }
}
