/// 경매 저장소 게이트웨이
/// 도메인 경매와 저장 형식 사이의 변환, 저장소 호출을 전담한다.
// region:    --- Imports
use crate::auction::{Auction, AuctionStatus};
use crate::config::AuctionConfig;
use crate::error::StorageError;
use crate::scheduler::{Clock, ExpirationMonitor, MonitorHandle, SystemClock};
use crate::store::{AuctionStore, StatusFilter, StatusUpdate};
use chrono::{DateTime, TimeDelta, Utc};
use self::record::{status_code, AuctionRecord};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, error, info};

// endregion: --- Imports

pub mod record;

// region:    --- Auction Gateway
#[derive(Clone)]
pub struct AuctionGateway {
    store: Arc<dyn AuctionStore>,
    auction_interval: Duration,
}

impl AuctionGateway {
    pub fn new(store: Arc<dyn AuctionStore>, auction_interval: Duration) -> Self {
        Self {
            store,
            auction_interval,
        }
    }

    /// 경매 등록
    /// 실패는 항상 호출자에게 반환한다.
    pub async fn create_auction(&self, auction: &Auction) -> Result<(), StorageError> {
        let record = AuctionRecord::from(auction);

        if let Err(e) = self.store.insert_one(record).await {
            error!("{:<12} --> 경매 등록 실패 id: {}: {:?}", "Repository", auction.id, e);
            return Err(StorageError::new("Error trying to insert auction"));
        }

        info!("{:<12} --> 경매 등록 id: {}", "Repository", auction.id);
        Ok(())
    }

    /// 경매 조회
    pub async fn find_auction_by_id(&self, id: &str) -> Result<Option<Auction>, StorageError> {
        let record = self.store.find_one(id).await.map_err(|e| {
            error!("{:<12} --> 경매 조회 실패 id: {}: {:?}", "Repository", id, e);
            StorageError::new("Error trying to find auction")
        })?;

        record
            .map(Auction::try_from)
            .transpose()
            .map_err(|e| {
                error!("{:<12} --> 경매 레코드 변환 실패 id: {}: {:?}", "Repository", id, e);
                StorageError::new("Error trying to find auction")
            })
    }

    /// 만료 경매 일괄 종료
    /// `timestamp <= now - auction_interval` 인 Active 경매를 한 번의 일괄 변경으로 Completed 처리한다.
    /// 오류는 로그만 남기고 0 을 반환한다. 다음 주기가 재시도 역할을 한다.
    pub async fn close_expired_auctions(&self, now: DateTime<Utc>) -> u64 {
        let filter = StatusFilter {
            status: status_code(AuctionStatus::Active),
            timestamp_lte: expiration_threshold(now, self.auction_interval),
        };
        let update = StatusUpdate {
            status: status_code(AuctionStatus::Completed),
        };

        match self.store.update_many(filter, update).await {
            Ok(0) => {
                debug!("{:<12} --> 만료된 경매 없음", "Repository");
                0
            }
            Ok(closed) => {
                info!("{:<12} --> Closed {} expired auction(s)", "Repository", closed);
                closed
            }
            Err(e) => {
                error!(
                    "{:<12} --> Error trying to close expired auctions: {:?}",
                    "Repository", e
                );
                0
            }
        }
    }
}

/// 만료 기준 시각 (epoch 초)
/// 경매 유지 시간이 표현 범위를 넘으면 어떤 경매도 만료되지 않는다.
pub fn expiration_threshold(now: DateTime<Utc>, auction_interval: Duration) -> i64 {
    TimeDelta::from_std(auction_interval)
        .ok()
        .and_then(|lifetime| now.checked_sub_signed(lifetime))
        .map(|threshold| threshold.timestamp())
        .unwrap_or(i64::MIN)
}

// endregion: --- Auction Gateway

// region:    --- Auction Repository
/// 경매 저장소
/// 생성 시 만료 모니터를 하나 띄우고, 호출자가 넘긴 종료 신호에 묶어 둔다.
/// 모니터 핸들은 저장소와 따로 반환되므로 저장소를 공유해도 종료 대기가 가능하다.
#[derive(Clone)]
pub struct AuctionRepository {
    gateway: AuctionGateway,
}

impl AuctionRepository {
    pub fn new(
        store: Arc<dyn AuctionStore>,
        config: &AuctionConfig,
        shutdown: watch::Receiver<bool>,
    ) -> (Self, MonitorHandle) {
        Self::with_clock(store, config, Arc::new(SystemClock), shutdown)
    }

    pub fn with_clock(
        store: Arc<dyn AuctionStore>,
        config: &AuctionConfig,
        clock: Arc<dyn Clock>,
        shutdown: watch::Receiver<bool>,
    ) -> (Self, MonitorHandle) {
        let gateway = AuctionGateway::new(store, config.auction_interval);
        let monitor = ExpirationMonitor::new(gateway.clone(), config.close_check_interval, clock)
            .spawn(shutdown);

        (Self { gateway }, monitor)
    }

    pub async fn create_auction(&self, auction: &Auction) -> Result<(), StorageError> {
        self.gateway.create_auction(auction).await
    }

    pub async fn find_auction_by_id(&self, id: &str) -> Result<Option<Auction>, StorageError> {
        self.gateway.find_auction_by_id(id).await
    }

    pub async fn close_expired_auctions(&self, now: DateTime<Utc>) -> u64 {
        self.gateway.close_expired_auctions(now).await
    }
}

// endregion: --- Auction Repository

// region:    --- Tests
#[cfg(test)]
mod tests {
    use super::*;
    use crate::auction::ProductCondition;
    use crate::store::InMemoryAuctionStore;
    use chrono::TimeZone;

    const LIFETIME: Duration = Duration::from_secs(300);

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap()
    }

    fn auction_at(id: &str, timestamp: DateTime<Utc>) -> Auction {
        let mut auction = Auction::new("자전거", "sports", "로드 자전거 판매", ProductCondition::Used);
        auction.id = id.to_string();
        auction.timestamp = timestamp;
        auction
    }

    fn gateway() -> (Arc<InMemoryAuctionStore>, AuctionGateway) {
        let store = Arc::new(InMemoryAuctionStore::new());
        let gateway = AuctionGateway::new(store.clone(), LIFETIME);
        (store, gateway)
    }

    #[tokio::test]
    async fn create_auction_persists_record() {
        let (store, gateway) = gateway();
        let auction = auction_at("a-1", now());

        gateway.create_auction(&auction).await.unwrap();

        let record = store.get("a-1").unwrap();
        assert_eq!(record.timestamp, now().timestamp());
        assert_eq!(
            gateway.find_auction_by_id("a-1").await.unwrap(),
            Some(auction)
        );
    }

    #[tokio::test]
    async fn duplicate_insert_returns_error_without_duplicating() {
        let (store, gateway) = gateway();
        let auction = auction_at("dup", now());
        gateway.create_auction(&auction).await.unwrap();

        let err = gateway.create_auction(&auction).await.unwrap_err();

        assert_eq!(err.message, "Error trying to insert auction");
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn threshold_boundary_is_inclusive() {
        let (store, gateway) = gateway();
        let threshold = now() - TimeDelta::seconds(300);
        gateway
            .create_auction(&auction_at("at-threshold", threshold))
            .await
            .unwrap();
        gateway
            .create_auction(&auction_at("after-threshold", threshold + TimeDelta::seconds(1)))
            .await
            .unwrap();

        assert_eq!(gateway.close_expired_auctions(now()).await, 1);
        assert_eq!(store.get("at-threshold").unwrap().status, record::STATUS_COMPLETED);
        assert_eq!(store.get("after-threshold").unwrap().status, record::STATUS_ACTIVE);
    }

    #[tokio::test]
    async fn second_sweep_is_a_no_op() {
        let (_store, gateway) = gateway();
        for i in 0..3 {
            let auction = auction_at(&format!("old-{i}"), now() - TimeDelta::hours(1));
            gateway.create_auction(&auction).await.unwrap();
        }

        assert_eq!(gateway.close_expired_auctions(now()).await, 3);
        assert_eq!(gateway.close_expired_auctions(now()).await, 0);
    }

    #[tokio::test]
    async fn completed_auctions_are_never_touched() {
        let (store, gateway) = gateway();
        let mut auction = auction_at("closed", now() - TimeDelta::hours(2));
        auction.status = AuctionStatus::Completed;
        gateway.create_auction(&auction).await.unwrap();

        assert_eq!(gateway.close_expired_auctions(now()).await, 0);
        assert_eq!(store.get("closed").unwrap().status, record::STATUS_COMPLETED);
    }

    #[tokio::test]
    async fn sweep_failure_is_swallowed() {
        let (store, gateway) = gateway();
        gateway
            .create_auction(&auction_at("old", now() - TimeDelta::hours(1)))
            .await
            .unwrap();
        store.set_unavailable(true);

        assert_eq!(gateway.close_expired_auctions(now()).await, 0);

        // 다음 주기에서 복구
        store.set_unavailable(false);
        assert_eq!(gateway.close_expired_auctions(now()).await, 1);
    }

    #[test]
    fn oversized_lifetime_expires_nothing() {
        assert_eq!(expiration_threshold(now(), Duration::MAX), i64::MIN);
        assert_eq!(
            expiration_threshold(now(), Duration::from_millis(1500)),
            now().timestamp() - 2
        );
    }
}
// endregion: --- Tests
