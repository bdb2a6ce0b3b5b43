//! PostgreSQL implementation of ClipStore.
//!
//! Keywords are matched with `to_tsvector('simple', ...)`, which lower-cases
//! and splits on non-word characters like the in-process tokenizer. Pages
//! are keyset-paginated on `clip_key`.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::domain::clip::{clip_key, Clip, IndexQuery};
use crate::domain::foundation::{ClipId, DomainError};
use crate::domain::pack::PackName;
use crate::ports::{ClipStore, SaveResult, SearchCursor, SearchPage};

use super::db_error;

const DEFAULT_PAGE_SIZE: i64 = 50;

#[derive(Clone)]
pub struct PostgresClipStore {
    pool: PgPool,
    page_size: i64,
}

impl PostgresClipStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

#[async_trait]
impl ClipStore for PostgresClipStore {
    async fn put_if_absent(&self, clip: &Clip) -> Result<SaveResult, DomainError> {
        let result = sqlx::query(
            r#"
            INSERT INTO clips (clip_key, pack_key, pack_name, clip_id, keywords)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (clip_key) DO NOTHING
            "#,
        )
        .bind(clip.key())
        .bind(clip.pack.key())
        .bind(clip.pack.as_str())
        .bind(clip.clip_id.as_str())
        .bind(&clip.keywords)
        .execute(&self.pool)
        .await
        .map_err(db_error("insert clip"))?;

        Ok(if result.rows_affected() == 0 {
            SaveResult::AlreadyExists
        } else {
            SaveResult::Inserted
        })
    }

    async fn replace(&self, clip: &Clip) -> Result<bool, DomainError> {
        let result = sqlx::query("UPDATE clips SET keywords = $2 WHERE clip_key = $1")
            .bind(clip.key())
            .bind(&clip.keywords)
            .execute(&self.pool)
            .await
            .map_err(db_error("update clip"))?;

        Ok(result.rows_affected() > 0)
    }

    async fn get(&self, pack: &PackName, clip_id: &ClipId) -> Result<Option<Clip>, DomainError> {
        let row = sqlx::query("SELECT pack_name, clip_id, keywords FROM clips WHERE clip_key = $1")
            .bind(clip_key(pack, clip_id))
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("fetch clip"))?;

        row.map(row_to_clip).transpose()
    }

    async fn delete(&self, pack: &PackName, clip_id: &ClipId) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM clips WHERE clip_key = $1")
            .bind(clip_key(pack, clip_id))
            .execute(&self.pool)
            .await
            .map_err(db_error("delete clip"))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_pack(&self, pack: &PackName) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM clips WHERE pack_key = $1")
            .bind(pack.key())
            .execute(&self.pool)
            .await
            .map_err(db_error("delete pack clips"))?;

        Ok(result.rows_affected())
    }

    async fn search(
        &self,
        query: &IndexQuery,
        cursor: Option<SearchCursor>,
    ) -> Result<SearchPage, DomainError> {
        // Tokens are alphanumeric, so joining them is a valid tsquery.
        let any_keyword = (!query.keywords.is_empty()).then(|| query.keywords.join(" | "));

        let rows = sqlx::query(
            r#"
            SELECT pack_name, clip_id, keywords, clip_key
            FROM clips
            WHERE pack_key = $1
              AND ($2::text IS NULL OR keywords_tsv @@ to_tsquery('simple', $2))
              AND ($3::text IS NULL OR clip_key > $3)
            ORDER BY clip_key
            LIMIT $4
            "#,
        )
        .bind(&query.pack_key)
        .bind(any_keyword)
        .bind(cursor.map(|c| c.0))
        .bind(self.page_size)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("search clips"))?;

        let next_cursor = if rows.len() as i64 == self.page_size {
            match rows.last() {
                Some(row) => Some(SearchCursor(
                    row.try_get("clip_key").map_err(db_error("decode clip"))?,
                )),
                None => None,
            }
        } else {
            None
        };

        let clips = rows
            .into_iter()
            .map(row_to_clip)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(SearchPage { clips, next_cursor })
    }
}

fn row_to_clip(row: PgRow) -> Result<Clip, DomainError> {
    let pack: String = row.try_get("pack_name").map_err(db_error("decode clip"))?;
    let clip_id: String = row.try_get("clip_id").map_err(db_error("decode clip"))?;
    let keywords: String = row.try_get("keywords").map_err(db_error("decode clip"))?;

    Ok(Clip::new(PackName::parse(pack)?, ClipId::new(clip_id)?, keywords))
}
