//! PostgreSQL implementation of SubscriptionStore.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::pack::PackName;
use crate::domain::subscription::Subscription;
use crate::ports::{SaveResult, SubscriptionStore};

use super::db_error;

#[derive(Clone)]
pub struct PostgresSubscriptionStore {
    pool: PgPool,
}

impl PostgresSubscriptionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SubscriptionStore for PostgresSubscriptionStore {
    async fn insert_if_absent(
        &self,
        subscription: &Subscription,
    ) -> Result<SaveResult, DomainError> {
        let result = sqlx::query(
            r#"
            INSERT INTO subscriptions (user_id, pack_key, pack_name)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id, pack_key) DO NOTHING
            "#,
        )
        .bind(subscription.user_id.as_i64())
        .bind(subscription.pack.key())
        .bind(subscription.pack.as_str())
        .execute(&self.pool)
        .await
        .map_err(db_error("insert subscription"))?;

        Ok(if result.rows_affected() == 0 {
            SaveResult::AlreadyExists
        } else {
            SaveResult::Inserted
        })
    }

    async fn delete(&self, subscription: &Subscription) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM subscriptions WHERE user_id = $1 AND pack_key = $2")
            .bind(subscription.user_id.as_i64())
            .bind(subscription.pack.key())
            .execute(&self.pool)
            .await
            .map_err(db_error("delete subscription"))?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Subscription>, DomainError> {
        let rows = sqlx::query(
            "SELECT pack_name FROM subscriptions WHERE user_id = $1 ORDER BY pack_key",
        )
        .bind(user_id.as_i64())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("list subscriptions"))?;

        rows.into_iter()
            .map(|row| {
                let name: String = row
                    .try_get("pack_name")
                    .map_err(db_error("decode subscription"))?;
                Ok(Subscription::new(user_id, PackName::parse(name)?))
            })
            .collect()
    }

    async fn delete_for_pack(&self, pack: &PackName) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM subscriptions WHERE pack_key = $1")
            .bind(pack.key())
            .execute(&self.pool)
            .await
            .map_err(db_error("delete pack subscriptions"))?;

        Ok(result.rows_affected())
    }
}
