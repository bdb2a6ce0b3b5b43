//! PostgreSQL implementation of PackStore.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{DomainError, Timestamp, UserId};
use crate::domain::pack::{Pack, PackName};
use crate::ports::{PackStore, SaveResult};

use super::db_error;

const PACK_COLUMNS: &str = "name, creator, contributors, deleted, created_at, version";

#[derive(Clone)]
pub struct PostgresPackStore {
    pool: PgPool,
}

impl PostgresPackStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn list_where(&self, clause: &str, user_id: UserId) -> Result<Vec<Pack>, DomainError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM packs WHERE {} ORDER BY pack_key",
            PACK_COLUMNS, clause
        ))
        .bind(user_id.as_i64())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("list packs"))?;

        rows.into_iter().map(row_to_pack).collect()
    }
}

#[async_trait]
impl PackStore for PostgresPackStore {
    async fn insert_if_absent(&self, pack: &Pack) -> Result<SaveResult, DomainError> {
        let result = sqlx::query(
            r#"
            INSERT INTO packs (pack_key, name, creator, contributors, deleted, created_at, version)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (pack_key) DO NOTHING
            "#,
        )
        .bind(pack.name().key())
        .bind(pack.name().as_str())
        .bind(pack.creator().as_i64())
        .bind(contributor_ids(pack))
        .bind(pack.is_deleted())
        .bind(pack.created_at().as_datetime())
        .bind(pack.version() as i64)
        .execute(&self.pool)
        .await
        .map_err(db_error("insert pack"))?;

        Ok(if result.rows_affected() == 0 {
            SaveResult::AlreadyExists
        } else {
            SaveResult::Inserted
        })
    }

    async fn find(&self, name: &PackName) -> Result<Option<Pack>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM packs WHERE pack_key = $1",
            PACK_COLUMNS
        ))
        .bind(name.key())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("fetch pack"))?;

        row.map(row_to_pack).transpose()
    }

    async fn update_if_version(
        &self,
        pack: &Pack,
        expected_version: u64,
    ) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE packs SET
                contributors = $2,
                deleted = $3,
                version = $4
            WHERE pack_key = $1 AND version = $5
            "#,
        )
        .bind(pack.name().key())
        .bind(contributor_ids(pack))
        .bind(pack.is_deleted())
        .bind(pack.version() as i64)
        .bind(expected_version as i64)
        .execute(&self.pool)
        .await
        .map_err(db_error("update pack"))?;

        Ok(result.rows_affected() == 1)
    }

    async fn delete(&self, name: &PackName) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM packs WHERE pack_key = $1")
            .bind(name.key())
            .execute(&self.pool)
            .await
            .map_err(db_error("delete pack"))?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_created_by(&self, user_id: UserId) -> Result<Vec<Pack>, DomainError> {
        self.list_where("creator = $1", user_id).await
    }

    async fn list_contributed_to(&self, user_id: UserId) -> Result<Vec<Pack>, DomainError> {
        self.list_where("$1 = ANY(contributors)", user_id).await
    }
}

fn contributor_ids(pack: &Pack) -> Vec<i64> {
    pack.contributors().iter().map(UserId::as_i64).collect()
}

fn row_to_pack(row: PgRow) -> Result<Pack, DomainError> {
    let name: String = row.try_get("name").map_err(db_error("decode pack"))?;
    let creator: i64 = row.try_get("creator").map_err(db_error("decode pack"))?;
    let contributors: Vec<i64> = row
        .try_get("contributors")
        .map_err(db_error("decode pack"))?;
    let deleted: bool = row.try_get("deleted").map_err(db_error("decode pack"))?;
    let created_at: DateTime<Utc> = row.try_get("created_at").map_err(db_error("decode pack"))?;
    let version: i64 = row.try_get("version").map_err(db_error("decode pack"))?;

    Ok(Pack::reconstitute(
        PackName::parse(name)?,
        UserId::new(creator),
        contributors.into_iter().map(UserId::new).collect(),
        deleted,
        Timestamp::from_datetime(created_at),
        version as u64,
    ))
}
