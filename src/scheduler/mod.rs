/// 경매 만료 모니터
/// 주기적으로 만료된 Active 경매를 Completed 로 일괄 변경한다.
/// 외부 트리거(cron, 클라이언트 폴링) 없이 프로세스 안에서 동작하며,
/// 호출자가 넘긴 종료 신호(watch)를 받으면 멈추고 다시 시작하지 않는다.
// region:    --- Imports
use crate::config::DEFAULT_CLOSE_CHECK_INTERVAL;
use crate::repository::AuctionGateway;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{error, info, warn};

// endregion: --- Imports

// region:    --- Clock
/// 현재 시각 제공
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// 시스템 시계
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

// endregion: --- Clock

// region:    --- Monitor Handle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorState {
    Running,
    Stopped,
}

/// 실행 중인 모니터 태스크 핸들
pub struct MonitorHandle {
    join: JoinHandle<()>,
}

impl MonitorHandle {
    pub fn state(&self) -> MonitorState {
        if self.join.is_finished() {
            MonitorState::Stopped
        } else {
            MonitorState::Running
        }
    }

    /// 모니터 태스크 종료 대기
    /// 종료 신호를 보낸 뒤에 호출해야 한다.
    pub async fn stopped(self) {
        if let Err(e) = self.join.await {
            error!("{:<12} --> 만료 모니터 태스크 비정상 종료: {:?}", "Scheduler", e);
        }
    }
}

// endregion: --- Monitor Handle

// region:    --- Expiration Monitor
pub struct ExpirationMonitor {
    gateway: AuctionGateway,
    check_interval: Duration,
    clock: Arc<dyn Clock>,
}

impl ExpirationMonitor {
    pub fn new(gateway: AuctionGateway, check_interval: Duration, clock: Arc<dyn Clock>) -> Self {
        // 주기가 0인 타이머는 만들 수 없다
        let check_interval = if check_interval.is_zero() {
            warn!(
                "{:<12} --> 만료 검사 주기가 0 이므로 기본값 {:?} 사용",
                "Scheduler", DEFAULT_CLOSE_CHECK_INTERVAL
            );
            DEFAULT_CLOSE_CHECK_INTERVAL
        } else {
            check_interval
        };

        Self {
            gateway,
            check_interval,
            clock,
        }
    }

    /// 백그라운드 태스크로 실행하고 바로 반환
    pub fn spawn(self, shutdown: watch::Receiver<bool>) -> MonitorHandle {
        let join = tokio::spawn(self.run(shutdown));
        MonitorHandle { join }
    }

    /// 종료 신호가 올 때까지 주기마다 만료 경매를 닫는다.
    /// 한 번에 하나의 정리 작업만 실행되며, 진행 중인 정리는 종료 신호로 중단되지 않는다.
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        info!(
            "{:<12} --> 경매 만료 모니터 시작 (주기: {:?})",
            "Scheduler", self.check_interval
        );

        // 첫 검사는 한 주기 뒤
        let mut ticker = interval_at(Instant::now() + self.check_interval, self.check_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            if *shutdown.borrow_and_update() {
                break;
            }

            tokio::select! {
                biased;

                changed = shutdown.changed() => {
                    // 송신측이 사라지면 종료 신호로 본다
                    if changed.is_err() {
                        break;
                    }
                }
                _ = ticker.tick() => {
                    self.gateway.close_expired_auctions(self.clock.now()).await;
                }
            }
        }

        drop(ticker);
        info!("{:<12} --> 경매 만료 모니터 종료", "Scheduler");
    }
}

// endregion: --- Expiration Monitor

// endregion: --- Tests
