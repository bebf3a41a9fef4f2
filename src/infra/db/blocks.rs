use async_trait::async_trait;
use sqlx::error::ErrorKind;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::application::repos::{
    BlocksRepo, BlocksWriteRepo, InsertBlockParams, RepoError, UpdateBlockParams,
};
use crate::domain::entities::BlockRecord;
use crate::domain::types::BlockCollection;

use super::{PostgresRepositories, map_sqlx_error};

const BLOCK_COLUMNS: &str = "id, owner_id, kind, position, content, created_at, updated_at";

fn blocks_table(collection: BlockCollection) -> &'static str {
    match collection {
        BlockCollection::LandingPage => "landing_page_blocks",
        BlockCollection::Case => "case_blocks",
    }
}

fn owners_table(collection: BlockCollection) -> &'static str {
    match collection {
        BlockCollection::LandingPage => "landing_pages",
        BlockCollection::Case => "cases",
    }
}

#[derive(sqlx::FromRow)]
struct BlockRow {
    id: Uuid,
    owner_id: Uuid,
    kind: String,
    position: i32,
    content: serde_json::Value,
    created_at: OffsetDateTime,
    updated_at: OffsetDateTime,
}

impl From<BlockRow> for BlockRecord {
    fn from(row: BlockRow) -> Self {
        Self {
            id: row.id,
            owner_id: row.owner_id,
            kind: row.kind,
            position: row.position,
            content: row.content,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl BlocksRepo for PostgresRepositories {
    async fn list_blocks(
        &self,
        collection: BlockCollection,
        owner_id: Uuid,
    ) -> Result<Vec<BlockRecord>, RepoError> {
        let owner_exists: bool = sqlx::query_scalar(&format!(
            "SELECT EXISTS(SELECT 1 FROM {owners} WHERE id = $1)",
            owners = owners_table(collection)
        ))
        .bind(owner_id)
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        if !owner_exists {
            return Err(RepoError::NotFound);
        }

        let rows: Vec<BlockRow> = sqlx::query_as(&format!(
            "SELECT {BLOCK_COLUMNS} FROM {table} WHERE owner_id = $1 \
             ORDER BY position ASC, created_at ASC, id ASC",
            table = blocks_table(collection)
        ))
        .bind(owner_id)
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(BlockRecord::from).collect())
    }

    async fn find_block(
        &self,
        collection: BlockCollection,
        block_id: Uuid,
    ) -> Result<Option<BlockRecord>, RepoError> {
        let row: Option<BlockRow> = sqlx::query_as(&format!(
            "SELECT {BLOCK_COLUMNS} FROM {table} WHERE id = $1",
            table = blocks_table(collection)
        ))
        .bind(block_id)
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(BlockRecord::from))
    }
}

#[async_trait]
impl BlocksWriteRepo for PostgresRepositories {
    async fn insert_block(
        &self,
        collection: BlockCollection,
        params: InsertBlockParams,
    ) -> Result<BlockRecord, RepoError> {
        let InsertBlockParams {
            owner_id,
            kind,
            content,
            position,
        } = params;

        let id = Uuid::new_v4();
        let now = OffsetDateTime::now_utc();

        // A NULL position appends at the end of the owner's sequence,
        // resolved in the same statement so concurrent creates cannot both
        // read the same max.
        let row: BlockRow = sqlx::query_as(&format!(
            "INSERT INTO {table} (id, owner_id, kind, position, content, created_at, updated_at) \
             VALUES ($1, $2, $3, \
                     COALESCE($4, (SELECT COALESCE(MAX(position) + 1, 0) \
                                   FROM {table} WHERE owner_id = $2)), \
                     $5, $6, $6) \
             RETURNING {BLOCK_COLUMNS}",
            table = blocks_table(collection)
        ))
        .bind(id)
        .bind(owner_id)
        .bind(&kind)
        .bind(position)
        .bind(&content)
        .bind(now)
        .fetch_one(self.pool())
        .await
        .map_err(missing_owner_to_not_found)?;

        Ok(BlockRecord::from(row))
    }

    async fn update_block(
        &self,
        collection: BlockCollection,
        params: UpdateBlockParams,
    ) -> Result<BlockRecord, RepoError> {
        let UpdateBlockParams {
            owner_id,
            block_id,
            content,
            position,
        } = params;

        let now = OffsetDateTime::now_utc();

        // content/position only; kind is never part of an update
        let row: Option<BlockRow> = sqlx::query_as(&format!(
            "UPDATE {table} \
             SET content = $3, position = COALESCE($4, position), updated_at = $5 \
             WHERE id = $1 AND owner_id = $2 \
             RETURNING {BLOCK_COLUMNS}",
            table = blocks_table(collection)
        ))
        .bind(block_id)
        .bind(owner_id)
        .bind(&content)
        .bind(position)
        .bind(now)
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        row.map(BlockRecord::from).ok_or(RepoError::NotFound)
    }

    async fn delete_block(
        &self,
        collection: BlockCollection,
        block_id: Uuid,
    ) -> Result<(), RepoError> {
        let result = sqlx::query(&format!(
            "DELETE FROM {table} WHERE id = $1",
            table = blocks_table(collection)
        ))
        .bind(block_id)
        .execute(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }

    async fn delete_owner(
        &self,
        collection: BlockCollection,
        owner_id: Uuid,
    ) -> Result<(), RepoError> {
        // blocks cascade via the FK
        let result = sqlx::query(&format!(
            "DELETE FROM {owners} WHERE id = $1",
            owners = owners_table(collection)
        ))
        .bind(owner_id)
        .execute(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}

/// Inserting a block for an owner that no longer exists trips the FK; that
/// is a stale owner id, not a payload problem.
fn missing_owner_to_not_found(err: sqlx::Error) -> RepoError {
    if let sqlx::Error::Database(db_err) = &err
        && matches!(db_err.kind(), ErrorKind::ForeignKeyViolation)
    {
        return RepoError::NotFound;
    }
    map_sqlx_error(err)
}
