// region:    --- Imports
use auction_lifecycle::config::AppConfig;
use auction_lifecycle::database::DatabaseManager;
use auction_lifecycle::handlers;
use auction_lifecycle::repository::AuctionRepository;
use auction_lifecycle::store::{AuctionStore, InMemoryAuctionStore, PostgresAuctionStore};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing::{error, info, warn};
// endregion: --- Imports

// region:    --- Main
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // logging 초기화
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .without_time()
        .with_target(false)
        .init();

    // 설정은 시작 시 한 번만 읽는다
    let config = AppConfig::from_env();
    info!(
        "{:<12} --> 경매 유지 시간: {:?}, 만료 검사 주기: {:?}",
        "Main", config.auction.auction_interval, config.auction.close_check_interval
    );

    // 저장소 선택
    let store: Arc<dyn AuctionStore> = match &config.database_url {
        Some(database_url) => {
            let db_manager = DatabaseManager::new(database_url).await?;
            if let Err(e) = db_manager.initialize_database().await {
                error!("{:<12} --> 데이터베이스 초기화 실패: {:?}", "Main", e);
                return Err(e.into());
            }
            info!("{:<12} --> 데이터베이스 초기화 성공", "Main");
            Arc::new(PostgresAuctionStore::new(db_manager.get_pool()))
        }
        None => {
            warn!(
                "{:<12} --> DATABASE_URL 미설정: 메모리 저장소 사용 (재시작 시 데이터 유실)",
                "Main"
            );
            Arc::new(InMemoryAuctionStore::new())
        }
    };

    // 경매 저장소 생성 (만료 모니터가 함께 시작된다)
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let (repository, monitor) = AuctionRepository::new(store, &config.auction, shutdown_rx);
    let repository = Arc::new(repository);

    // 리스너 생성
    let listener = TcpListener::bind(&config.bind_addr).await?;
    info!(
        "{:<12} --> Web Server: Listening on {}",
        "Main",
        listener.local_addr()?
    );

    // 서버 실행
    let routes_all = handlers::routes(repository);
    if let Err(err) = axum::serve(listener, routes_all.into_make_service())
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            info!("{:<12} --> 종료 신호 수신", "Main");
        })
        .await
    {
        error!("{:<12} --> Server error: {}", "Main", err);
    }

    // 만료 모니터 종료
    let _ = shutdown_tx.send(true);
    monitor.stopped().await;

    Ok(())
}
// endregion: --- Main
