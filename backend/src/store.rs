//! Move log persistence
//!
//! The session layer needs exactly two operations from storage: append an accepted
//! move and read a session's moves back in the order they were appended. The
//! history endpoints additionally read each move's acceptance time and a per-code
//! summary. Squares are stored as algebraic text (`e2`), promotions as a lowercase
//! piece letter and times as fixed-width RFC 3339 UTC text, so text order is time
//! order.

use std::collections::HashMap;

use async_trait::async_trait;
use chess_engine::{Color, PieceKind, Square};
use chrono::{DateTime, SecondsFormat, Utc};
use parking_lot::Mutex;
use serde::Serialize;
use shared::MoveRecord;
use sqlx::{Pool, Sqlite};
use tracing::debug;

use crate::error::{StoreError, StoreResult};

/// A persisted move with the side that played it and when it was accepted
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoggedMove {
    #[serde(flatten)]
    pub record: MoveRecord,
    pub color: Color,
    pub played_at: DateTime<Utc>,
}

impl LoggedMove {
    pub fn new(record: MoveRecord, played_at: DateTime<Utc>) -> Self {
        Self {
            color: record.color(),
            record,
            played_at,
        }
    }
}

/// One code's move log at a glance
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoggedSession {
    pub code: String,
    pub moves: u32,
    pub started_at: DateTime<Utc>,
    pub last_move_at: DateTime<Utc>,
}

#[async_trait]
pub trait MoveStore: Send + Sync {
    /// Durably appends one accepted move, stamped with the current time
    async fn append_move(&self, code: &str, record: &MoveRecord) -> StoreResult<()>;

    /// All moves of a session with their timestamps, in ply order; empty for an
    /// unknown code
    async fn load_log(&self, code: &str) -> StoreResult<Vec<LoggedMove>>;

    /// Every code with at least one persisted move, most recently active first
    async fn list_sessions(&self) -> StoreResult<Vec<LoggedSession>>;

    /// All moves of a session, in ply order; empty for an unknown code
    async fn load_moves(&self, code: &str) -> StoreResult<Vec<MoveRecord>> {
        Ok(self
            .load_log(code)
            .await?
            .into_iter()
            .map(|logged| logged.record)
            .collect())
    }
}

fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_timestamp(text: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(text)
        .map(|at| at.with_timezone(&Utc))
        .map_err(|e| format!("bad timestamp {text:?}: {e}"))
}

/// sqlite-backed store
#[derive(Clone)]
pub struct SqliteMoveStore {
    pool: Pool<Sqlite>,
}

impl SqliteMoveStore {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// Creates the `moves` table if it does not exist
    pub async fn migrate(&self) -> StoreResult<()> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS moves (
                session_code TEXT NOT NULL,
                ply INTEGER NOT NULL,
                san TEXT NOT NULL,
                from_sq TEXT NOT NULL,
                to_sq TEXT NOT NULL,
                promotion TEXT,
                played_at TEXT NOT NULL,
                PRIMARY KEY (session_code, ply)
            );",
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

#[async_trait]
impl MoveStore for SqliteMoveStore {
    async fn append_move(&self, code: &str, record: &MoveRecord) -> StoreResult<()> {
        sqlx::query(
            "INSERT INTO moves (session_code, ply, san, from_sq, to_sq, promotion, played_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(code)
        .bind(record.ply as i64)
        .bind(&record.san)
        .bind(record.from.to_string())
        .bind(record.to.to_string())
        .bind(record.promotion.map(|kind| kind.letter().to_ascii_lowercase().to_string()))
        .bind(timestamp(Utc::now()))
        .execute(&self.pool)
        .await?;

        debug!("[STORE] {} ply {} {}", code, record.ply, record.san);
        Ok(())
    }

    async fn load_log(&self, code: &str) -> StoreResult<Vec<LoggedMove>> {
        let rows: Vec<(i64, String, String, String, Option<String>, String)> = sqlx::query_as(
            "SELECT ply, san, from_sq, to_sq, promotion, played_at FROM moves
             WHERE session_code = ? ORDER BY ply ASC",
        )
        .bind(code)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|(ply, san, from, to, promotion, played_at)| {
                let corrupt = |message: String| StoreError::Corrupt {
                    code: code.to_string(),
                    ply,
                    message,
                };
                let from: Square = from.parse().map_err(|e| corrupt(format!("{e}")))?;
                let to: Square = to.parse().map_err(|e| corrupt(format!("{e}")))?;
                let promotion = match promotion {
                    None => None,
                    Some(text) => Some(
                        text.chars()
                            .next()
                            .and_then(PieceKind::from_char)
                            .ok_or_else(|| corrupt(format!("bad promotion {text:?}")))?,
                    ),
                };
                let played_at = parse_timestamp(&played_at).map_err(corrupt)?;
                let ply = u32::try_from(ply).map_err(|e| corrupt(format!("{e}")))?;
                let record = MoveRecord {
                    ply,
                    san,
                    from,
                    to,
                    promotion,
                };
                Ok(LoggedMove::new(record, played_at))
            })
            .collect()
    }

    async fn list_sessions(&self) -> StoreResult<Vec<LoggedSession>> {
        let rows: Vec<(String, i64, String, String)> = sqlx::query_as(
            "SELECT session_code, COUNT(*), MIN(played_at), MAX(played_at) FROM moves
             GROUP BY session_code ORDER BY MAX(played_at) DESC, session_code ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|(code, moves, first, last)| {
                let corrupt = |message: String| StoreError::Corrupt {
                    code: code.clone(),
                    ply: 0,
                    message,
                };
                let started_at = parse_timestamp(&first).map_err(corrupt)?;
                let last_move_at = parse_timestamp(&last).map_err(corrupt)?;
                let moves = u32::try_from(moves).map_err(|e| corrupt(format!("{e}")))?;
                Ok(LoggedSession {
                    code,
                    moves,
                    started_at,
                    last_move_at,
                })
            })
            .collect()
    }
}

/// In-process store, for tests and single-process use
#[derive(Default)]
pub struct MemoryMoveStore {
    logs: Mutex<HashMap<String, Vec<LoggedMove>>>,
}

impl MemoryMoveStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MoveStore for MemoryMoveStore {
    async fn append_move(&self, code: &str, record: &MoveRecord) -> StoreResult<()> {
        self.logs
            .lock()
            .entry(code.to_string())
            .or_default()
            .push(LoggedMove::new(record.clone(), Utc::now()));
        Ok(())
    }

    async fn load_log(&self, code: &str) -> StoreResult<Vec<LoggedMove>> {
        Ok(self.logs.lock().get(code).cloned().unwrap_or_default())
    }

    async fn list_sessions(&self) -> StoreResult<Vec<LoggedSession>> {
        let mut sessions: Vec<LoggedSession> = self
            .logs
            .lock()
            .iter()
            .filter_map(|(code, log)| {
                let first = log.first()?;
                let last = log.last()?;
                Some(LoggedSession {
                    code: code.clone(),
                    moves: log.len() as u32,
                    started_at: first.played_at,
                    last_move_at: last.played_at,
                })
            })
            .collect();
        sessions.sort_by(|a, b| {
            b.last_move_at
                .cmp(&a.last_move_at)
                .then_with(|| a.code.cmp(&b.code))
        });
        Ok(sessions)
    }
}
