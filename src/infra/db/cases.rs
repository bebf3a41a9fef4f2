use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::application::repos::{CasesRepo, RepoError};
use crate::domain::entities::CaseRecord;

use super::{PostgresRepositories, map_sqlx_error};

const CASE_COLUMNS: &str = "id, slug, title, client, excerpt, published, created_at, updated_at";

#[derive(sqlx::FromRow)]
struct CaseRow {
    id: Uuid,
    slug: String,
    title: String,
    client: Option<String>,
    excerpt: Option<String>,
    published: bool,
    created_at: OffsetDateTime,
    updated_at: OffsetDateTime,
}

impl From<CaseRow> for CaseRecord {
    fn from(row: CaseRow) -> Self {
        Self {
            id: row.id,
            slug: row.slug,
            title: row.title,
            client: row.client,
            excerpt: row.excerpt,
            published: row.published,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl CasesRepo for PostgresRepositories {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<CaseRecord>, RepoError> {
        let row: Option<CaseRow> =
            sqlx::query_as(&format!("SELECT {CASE_COLUMNS} FROM cases WHERE slug = $1"))
                .bind(slug)
                .fetch_optional(self.pool())
                .await
                .map_err(map_sqlx_error)?;

        Ok(row.map(CaseRecord::from))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<CaseRecord>, RepoError> {
        let row: Option<CaseRow> =
            sqlx::query_as(&format!("SELECT {CASE_COLUMNS} FROM cases WHERE id = $1"))
                .bind(id)
                .fetch_optional(self.pool())
                .await
                .map_err(map_sqlx_error)?;

        Ok(row.map(CaseRecord::from))
    }
}
