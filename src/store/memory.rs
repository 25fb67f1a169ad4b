/// 프로세스 내 경매 저장소
/// 테스트와 DATABASE_URL 없이 실행하는 개발 환경에서 사용한다.
/// 모든 연산은 하나의 잠금 안에서 끝나므로 호출 단위로 원자적이다.
// region:    --- Imports
use super::{AuctionStore, StatusFilter, StatusUpdate};
use crate::error::StoreError;
use crate::repository::record::AuctionRecord;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

// endregion: --- Imports

// region:    --- In-Memory Auction Store
#[derive(Default)]
pub struct InMemoryAuctionStore {
    records: RwLock<HashMap<String, AuctionRecord>>,
    unavailable: AtomicBool,
    update_calls: AtomicU64,
}

impl InMemoryAuctionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 저장소 장애 상태 전환 (장애 중에는 모든 호출이 실패)
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// 지금까지 호출된 update_many 횟수 (실패 포함)
    pub fn update_calls(&self) -> u64 {
        self.update_calls.load(Ordering::SeqCst)
    }

    pub fn get(&self, id: &str) -> Option<AuctionRecord> {
        self.read().get(id).cloned()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("in-memory store offline".to_string()));
        }
        Ok(())
    }

    // 패닉으로 잠금이 오염되어도 데이터는 그대로 사용한다
    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, AuctionRecord>> {
        self.records.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, AuctionRecord>> {
        self.records.write().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl AuctionStore for InMemoryAuctionStore {
    async fn insert_one(&self, record: AuctionRecord) -> Result<(), StoreError> {
        self.check_available()?;

        let mut records = self.write();
        if records.contains_key(&record.id) {
            return Err(StoreError::Duplicate(record.id));
        }
        records.insert(record.id.clone(), record);
        Ok(())
    }

    async fn update_many(
        &self,
        filter: StatusFilter,
        update: StatusUpdate,
    ) -> Result<u64, StoreError> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;

        let mut records = self.write();
        let mut modified = 0;
        for record in records.values_mut().filter(|r| filter.matches(r)) {
            record.status = update.status;
            modified += 1;
        }
        Ok(modified)
    }

    async fn find_one(&self, id: &str) -> Result<Option<AuctionRecord>, StoreError> {
        self.check_available()?;
        Ok(self.get(id))
    }
}

// endregion: --- In-Memory Auction Store

// endregion: --- Tests
