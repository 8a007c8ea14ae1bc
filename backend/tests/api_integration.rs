//! Backend API Integration Tests
//!
//! Tests for the Axum HTTP endpoints using Router::oneshot pattern.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use backend::api;
use backend::registry::SessionRegistry;
use backend::store::{MoveStore, SqliteMoveStore};
use serde_json::Value;
use shared::{MoveRecord, ParticipantId};
use sqlx::sqlite::SqlitePoolOptions;
use tokio::sync::mpsc::unbounded_channel;
use tower::ServiceExt;

/// Helper to create a migrated in-memory store
async fn test_store() -> SqliteMoveStore {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect(":memory:")
        .await
        .expect("Failed to create test database");
    let store = SqliteMoveStore::new(pool);
    store.migrate().await.expect("Failed to create schema");
    store
}

/// Helper to create test router
async fn test_router() -> (Router, SqliteMoveStore) {
    let (app, store, _) = test_router_with_registry().await;
    (app, store)
}

async fn test_router_with_registry() -> (Router, SqliteMoveStore, Arc<SessionRegistry>) {
    let store = test_store().await;
    let registry = Arc::new(SessionRegistry::new(Arc::new(store.clone()), true));
    (api::router(registry.clone()), store, registry)
}

/// Persists long algebraic moves under `code`, replaying them for their SAN
async fn persist_game(store: &SqliteMoveStore, code: &str, moves: &[&str]) {
    let mut game = chess_engine::GameState::new();
    for text in moves {
        let played = game.play(text.parse().unwrap()).unwrap();
        let record = MoveRecord::from_played(game.ply() as u32, &played);
        store.append_move(code, &record).await.unwrap();
    }
}

async fn body_json(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_create_lobby_returns_room_code() {
    let (app, _) = test_router().await;

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/lobby")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let room_code = body["room_code"].as_str().unwrap();
    assert_eq!(room_code.len(), 9);
    assert_eq!(&room_code[4..5], "-");
    assert!(room_code
        .chars()
        .all(|c| c == '-' || c.is_ascii_uppercase() || c.is_ascii_digit()));
}

#[tokio::test]
async fn test_health() {
    let (app, _) = test_router().await;

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&body[..], b"ok");
}

#[tokio::test]
async fn test_session_moves_in_ply_order() {
    let (app, store) = test_router().await;
    for (ply, san, from, to) in [(1, "d4", "d2", "d4"), (2, "Nf6", "g8", "f6")] {
        let record = MoveRecord {
            ply,
            san: san.to_string(),
            from: from.parse().unwrap(),
            to: to.parse().unwrap(),
            promotion: None,
        };
        store.append_move("ABCD-2345", &record).await.unwrap();
    }

    let response = app
        .oneshot(
            Request::builder()
                .uri("/sessions/ABCD-2345/moves")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let moves = body.as_array().unwrap();
    assert_eq!(moves.len(), 2);
    assert_eq!(moves[0]["san"], "d4");
    assert_eq!(moves[0]["color"], "white");
    assert_eq!(moves[1]["from"], "g8");
    assert_eq!(moves[1]["color"], "black");
    let played_at = moves[1]["played_at"].as_str().unwrap();
    assert!(chrono::DateTime::parse_from_rfc3339(played_at).is_ok());
}

#[tokio::test]
async fn test_session_listing_reports_status_and_result() {
    let (app, store, registry) = test_router_with_registry().await;
    persist_game(&store, "MATE-0001", &["f2f3", "e7e5", "g2g4", "d8h4"]).await;
    persist_game(&store, "IDLE-0002", &["e2e4"]).await;
    persist_game(&store, "LIVE-0003", &["d2d4", "d7d5"]).await;

    let (outbox, _inbox) = unbounded_channel();
    registry
        .host("LIVE-0003", ParticipantId::new(), "host", None, outbox)
        .await
        .unwrap();

    let response = app
        .oneshot(Request::builder().uri("/sessions").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let sessions = body.as_array().unwrap();
    assert_eq!(sessions.len(), 3);

    let find = |code: &str| {
        sessions
            .iter()
            .find(|s| s["code"] == code)
            .unwrap_or_else(|| panic!("{code} should be listed"))
    };
    let mate = find("MATE-0001");
    assert_eq!(mate["status"], "finished");
    assert_eq!(mate["moves"], 4);
    assert_eq!(mate["result"], serde_json::json!({ "winner": "black" }));

    let idle = find("IDLE-0002");
    assert_eq!(idle["status"], "suspended");
    assert_eq!(idle["result"], Value::Null);

    assert_eq!(find("LIVE-0003")["status"], "live");
}

#[tokio::test]
async fn test_unknown_session_has_empty_log() {
    let (app, _) = test_router().await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/sessions/NONE-0000/moves")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, serde_json::json!([]));
}

#[tokio::test]
async fn test_ws_route_requires_upgrade() {
    let (app, _) = test_router().await;

    let response = app
        .oneshot(Request::builder().uri("/ws").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn test_invalid_route_returns_404() {
    let (app, _) = test_router().await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/nonexistent")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
