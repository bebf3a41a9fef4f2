use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::application::repos::{LandingPagesRepo, RepoError};
use crate::domain::entities::LandingPageRecord;

use super::{PostgresRepositories, map_sqlx_error};

const LANDING_PAGE_COLUMNS: &str =
    "id, slug, title, meta_description, published, created_at, updated_at";

#[derive(sqlx::FromRow)]
struct LandingPageRow {
    id: Uuid,
    slug: String,
    title: String,
    meta_description: Option<String>,
    published: bool,
    created_at: OffsetDateTime,
    updated_at: OffsetDateTime,
}

impl From<LandingPageRow> for LandingPageRecord {
    fn from(row: LandingPageRow) -> Self {
        Self {
            id: row.id,
            slug: row.slug,
            title: row.title,
            meta_description: row.meta_description,
            published: row.published,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl LandingPagesRepo for PostgresRepositories {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<LandingPageRecord>, RepoError> {
        let row: Option<LandingPageRow> = sqlx::query_as(&format!(
            "SELECT {LANDING_PAGE_COLUMNS} FROM landing_pages WHERE slug = $1"
        ))
        .bind(slug)
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(LandingPageRecord::from))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<LandingPageRecord>, RepoError> {
        let row: Option<LandingPageRow> = sqlx::query_as(&format!(
            "SELECT {LANDING_PAGE_COLUMNS} FROM landing_pages WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(LandingPageRecord::from))
    }
}
