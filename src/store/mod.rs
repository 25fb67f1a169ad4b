/// 경매 저장소 추상화
/// 단건 삽입, 조건부 일괄 상태 변경, 단건 조회만 제공한다.
/// 각 호출의 원자성은 구현체(데이터베이스)가 보장한다.
// region:    --- Imports
use crate::error::StoreError;
use crate::repository::record::AuctionRecord;
use async_trait::async_trait;

// endregion: --- Imports

// region:    --- Modules
pub mod memory;
pub mod postgres;

pub use memory::InMemoryAuctionStore;
pub use postgres::PostgresAuctionStore;

// endregion: --- Modules

// region:    --- Filter / Update
/// 일괄 변경 대상 조건: `status == status AND timestamp <= timestamp_lte`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusFilter {
    pub status: i32,
    pub timestamp_lte: i64,
}

impl StatusFilter {
    pub fn matches(&self, record: &AuctionRecord) -> bool {
        record.status == self.status && record.timestamp <= self.timestamp_lte
    }
}

/// 일괄 변경 내용: `status = status`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusUpdate {
    pub status: i32,
}

// endregion: --- Filter / Update

// region:    --- Auction Store Trait
/// 경매 저장소 트레이트
#[async_trait]
pub trait AuctionStore: Send + Sync {
    /// 단건 삽입, 동일 id 가 있으면 `StoreError::Duplicate`
    async fn insert_one(&self, record: AuctionRecord) -> Result<(), StoreError>;

    /// 조건에 맞는 모든 레코드를 한 번에 변경하고 변경된 개수를 반환
    async fn update_many(
        &self,
        filter: StatusFilter,
        update: StatusUpdate,
    ) -> Result<u64, StoreError>;

    async fn find_one(&self, id: &str) -> Result<Option<AuctionRecord>, StoreError>;
}

// endregion: --- Auction Store Trait
