// region:    --- Imports
use super::{AuctionStore, StatusFilter, StatusUpdate};
use crate::error::StoreError;
use crate::repository::record::AuctionRecord;
use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

// endregion: --- Imports

// region:    --- Queries
const INSERT_AUCTION: &str = r#"
    INSERT INTO auctions (id, product_name, category, description, condition, status, "timestamp")
    VALUES ($1, $2, $3, $4, $5, $6, $7)
"#;

const CLOSE_AUCTIONS: &str =
    r#"UPDATE auctions SET status = $1 WHERE status = $2 AND "timestamp" <= $3"#;

const GET_AUCTION: &str = r#"
    SELECT id, product_name, category, description, condition, status, "timestamp"
    FROM auctions
    WHERE id = $1
"#;

// endregion: --- Queries

// region:    --- Postgres Auction Store
/// PostgreSQL 경매 저장소 구현체
pub struct PostgresAuctionStore {
    pool: Arc<PgPool>,
}

impl PostgresAuctionStore {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuctionStore for PostgresAuctionStore {
    async fn insert_one(&self, record: AuctionRecord) -> Result<(), StoreError> {
        let result = sqlx::query(INSERT_AUCTION)
            .bind(&record.id)
            .bind(&record.product_name)
            .bind(&record.category)
            .bind(&record.description)
            .bind(record.condition)
            .bind(record.status)
            .bind(record.timestamp)
            .execute(&*self.pool)
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(StoreError::Duplicate(record.id))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn update_many(
        &self,
        filter: StatusFilter,
        update: StatusUpdate,
    ) -> Result<u64, StoreError> {
        let result = sqlx::query(CLOSE_AUCTIONS)
            .bind(update.status)
            .bind(filter.status)
            .bind(filter.timestamp_lte)
            .execute(&*self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn find_one(&self, id: &str) -> Result<Option<AuctionRecord>, StoreError> {
        let record = sqlx::query_as::<_, AuctionRecord>(GET_AUCTION)
            .bind(id)
            .fetch_optional(&*self.pool)
            .await?;

        Ok(record)
    }
}

// endregion: --- Postgres Auction Store
