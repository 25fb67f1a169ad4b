// region:    --- Imports
use crate::auction::{Auction, ProductCondition};
use crate::repository::AuctionRepository;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

// endregion: --- Imports

// region:    --- Router
pub fn routes(repository: Arc<AuctionRepository>) -> Router {
    // 테스트 페이지를 위한 cors 설정
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/auction", post(handle_create_auction))
        .route("/auction/:id", get(handle_get_auction))
        .layer(cors)
        .with_state(repository)
}

// endregion: --- Router

// region:    --- Command Handlers
/// 경매 등록 요청
#[derive(Debug, Deserialize)]
pub struct CreateAuctionRequest {
    pub product_name: String,
    pub category: String,
    pub description: String,
    pub condition: ProductCondition,
}

/// 경매 등록 요청 처리
pub async fn handle_create_auction(
    State(repository): State<Arc<AuctionRepository>>,
    Json(req): Json<CreateAuctionRequest>,
) -> impl IntoResponse {
    info!("{:<12} --> 경매 등록 요청: {:?}", "Handler", req);

    let auction = Auction::new(req.product_name, req.category, req.description, req.condition);
    if let Err(reason) = auction.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "error": reason })),
        )
            .into_response();
    }

    match repository.create_auction(&auction).await {
        Ok(()) => (
            StatusCode::CREATED,
            Json(serde_json::json!({ "id": auction.id })),
        )
            .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({ "error": e.message })),
        )
            .into_response(),
    }
}

// endregion: --- Command Handlers

// region:    --- Query Handlers
/// 경매 조회
pub async fn handle_get_auction(
    State(repository): State<Arc<AuctionRepository>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    info!("{:<12} --> 경매 조회 id: {}", "Handler", id);
    match repository.find_auction_by_id(&id).await {
        Ok(Some(auction)) => Json(auction).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({ "error": "auction not found" })),
        )
            .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({ "error": e.message })),
        )
            .into_response(),
    }
}

// endregion: --- Query Handlers

// region:    --- Tests
#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AuctionConfig;
    use crate::store::InMemoryAuctionStore;
    use axum::body::Body;
    use axum::http::Request;
    use tokio::sync::watch;
    use tower::ServiceExt;

    fn test_repository() -> (watch::Sender<bool>, Arc<AuctionRepository>) {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let (repository, _monitor) = AuctionRepository::new(
            Arc::new(InMemoryAuctionStore::new()),
            &AuctionConfig::default(),
            shutdown_rx,
        );
        (shutdown_tx, Arc::new(repository))
    }

    fn create_request(body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/auction")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn create_then_get_auction() {
        let (_shutdown_tx, repository) = test_repository();
        let app = routes(repository);

        let resp = app
            .clone()
            .oneshot(create_request(serde_json::json!({
                "product_name": "기타",
                "category": "instrument",
                "description": "어쿠스틱 기타",
                "condition": "new"
            })))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);

        let body = axum::body::to_bytes(resp.into_body(), 10_000).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        let id = json["id"].as_str().unwrap().to_string();

        let resp = app
            .oneshot(
                Request::builder()
                    .uri(format!("/auction/{id}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let body = axum::body::to_bytes(resp.into_body(), 10_000).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "active");
        assert_eq!(json["condition"], "new");
    }

    #[tokio::test]
    async fn blank_fields_are_rejected() {
        let (_shutdown_tx, repository) = test_repository();
        let resp = routes(repository)
            .oneshot(create_request(serde_json::json!({
                "product_name": "",
                "category": "instrument",
                "description": "어쿠스틱 기타",
                "condition": "used"
            })))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn unknown_auction_returns_not_found() {
        let (_shutdown_tx, repository) = test_repository();
        let resp = routes(repository)
            .oneshot(
                Request::builder()
                    .uri("/auction/missing")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
// endregion: --- Tests
