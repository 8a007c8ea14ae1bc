use std::sync::Arc;

use axum::{
    extract::{ws::WebSocketUpgrade, Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chess_engine::{GameState, Outcome};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::game;
use crate::registry::SessionRegistry;
use crate::store::{LoggedMove, LoggedSession};

/// Characters used in invite codes; 0/O and 1/I are left out
const CODE_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";
const CODE_LEN: usize = 8;

#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<SessionRegistry>,
}

#[derive(Serialize, Deserialize)]
pub struct CreateLobbyResponse {
    pub room_code: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    /// Held by the registry and still in play
    Live,
    /// The replayed log ends the game
    Finished,
    /// Unfinished and not held by the registry; a `Host` with the code resumes it
    Suspended,
}

/// Entry of the match history listing
#[derive(Debug, Clone, Serialize)]
pub struct SessionSummary {
    #[serde(flatten)]
    pub log: LoggedSession,
    pub status: SessionStatus,
    pub result: Option<Outcome>,
}

pub fn router(registry: Arc<SessionRegistry>) -> Router {
    let state = AppState { registry };

    Router::new()
        .route("/ws", get(ws_handler))
        .route("/lobby", post(create_lobby))
        .route("/sessions", get(list_sessions))
        .route("/sessions/{code}/moves", get(session_moves))
        .route("/health", get(health))
        .with_state(state)
}

async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| game::handle_socket(socket, state.registry))
}

/// Hands out an invite code that no live session uses
///
/// The code is only reserved once someone sends `Host` with it.
async fn create_lobby(State(state): State<AppState>) -> Json<CreateLobbyResponse> {
    let mut room_code = generate_room_code();
    while state.registry.contains(&room_code) {
        room_code = generate_room_code();
    }
    info!("[SERVER] Issued invite code {}", room_code);
    Json(CreateLobbyResponse { room_code })
}

fn log_unavailable(e: impl std::fmt::Display, what: &str) -> (StatusCode, String) {
    error!("[SERVER] Failed to load {}: {}", what, e);
    (StatusCode::SERVICE_UNAVAILABLE, "move log unavailable".to_string())
}

/// Every persisted session with its status and result, most recently active first
async fn list_sessions(
    State(state): State<AppState>,
) -> Result<Json<Vec<SessionSummary>>, (StatusCode, String)> {
    let store = state.registry.store();
    let logs = store
        .list_sessions()
        .await
        .map_err(|e| log_unavailable(e, "session list"))?;

    let mut summaries = Vec::with_capacity(logs.len());
    for log in logs {
        let moves = store
            .load_moves(&log.code)
            .await
            .map_err(|e| log_unavailable(e, &log.code))?;
        let result = match GameState::replay(moves.iter().map(|record| record.to_move())) {
            Ok(game) => game.outcome(),
            Err(e) => {
                warn!("[SERVER] Log of {} does not replay: {}", log.code, e);
                None
            }
        };
        let status = if result.is_some() {
            SessionStatus::Finished
        } else if state.registry.contains(&log.code) {
            SessionStatus::Live
        } else {
            SessionStatus::Suspended
        };
        summaries.push(SessionSummary {
            log,
            status,
            result,
        });
    }
    Ok(Json(summaries))
}

async fn session_moves(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<Vec<LoggedMove>>, (StatusCode, String)> {
    state
        .registry
        .store()
        .load_log(&code)
        .await
        .map(Json)
        .map_err(|e| log_unavailable(e, &code))
}

async fn health() -> &'static str {
    "ok"
}

/// Eight characters from [`CODE_ALPHABET`], rendered `XXXX-XXXX`
pub fn generate_room_code() -> String {
    let mut rng = rand::rng();
    let mut code = String::with_capacity(CODE_LEN + 1);
    for i in 0..CODE_LEN {
        if i == CODE_LEN / 2 {
            code.push('-');
        }
        let idx = rng.random_range(0..CODE_ALPHABET.len());
        code.push(CODE_ALPHABET[idx] as char);
    }
    code
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_room_code_shape() {
        let code = generate_room_code();
        assert_eq!(code.len(), 9, "Room code should be XXXX-XXXX");
        assert_eq!(code.as_bytes()[4], b'-');
    }

    #[test]
    fn test_generate_room_code_charset() {
        let code = generate_room_code();
        for c in code.chars().filter(|c| *c != '-') {
            assert!(
                CODE_ALPHABET.contains(&(c as u8)),
                "Room code should only use the invite alphabet, got {c}"
            );
        }
    }

    #[test]
    fn test_generate_room_code_uniqueness() {
        let code1 = generate_room_code();
        let code2 = generate_room_code();
        // 32^8 possibilities
        assert_ne!(code1, code2, "Room codes should be unique");
    }

    #[test]
    fn test_create_lobby_response_serialization() {
        let response = CreateLobbyResponse {
            room_code: "ABCD-2345".to_string(),
        };
        let json = serde_json::to_string(&response).expect("Should serialize");
        assert_eq!(json, r#"{"room_code":"ABCD-2345"}"#);
    }

    #[test]
    fn test_session_summary_serialization() {
        let at = chrono::DateTime::parse_from_rfc3339("2026-01-02T03:04:05Z")
            .unwrap()
            .with_timezone(&chrono::Utc);
        let summary = SessionSummary {
            log: LoggedSession {
                code: "ABCD-2345".to_string(),
                moves: 4,
                started_at: at,
                last_move_at: at,
            },
            status: SessionStatus::Finished,
            result: Some(Outcome::Winner(chess_engine::Color::Black)),
        };
        let json = serde_json::to_value(&summary).expect("Should serialize");
        assert_eq!(json["code"], "ABCD-2345");
        assert_eq!(json["moves"], 4);
        assert_eq!(json["status"], "finished");
        assert_eq!(json["result"], serde_json::json!({ "winner": "black" }));
    }
}
