//! Live sessions keyed by invite code
//!
//! The map itself sits behind a `parking_lot::RwLock` that is only held long
//! enough to look up, insert or remove a handle. Everything a session does runs
//! under that session's own `tokio::sync::Mutex`, so independent sessions never
//! wait on each other and requests for one session are processed one at a time.

use std::collections::HashMap;
use std::sync::Arc;

use chess_engine::{PieceKind, Square};
use parking_lot::RwLock;
use shared::{JoinRejection, MoveRejection, ParticipantId, Seat};
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use crate::session::{Outbox, Session};
use crate::store::MoveStore;

pub type SessionHandle = Arc<Mutex<Session>>;

pub struct SessionRegistry {
    sessions: RwLock<HashMap<String, SessionHandle>>,
    store: Arc<dyn MoveStore>,
    default_allow_spectators: bool,
}

impl SessionRegistry {
    pub fn new(store: Arc<dyn MoveStore>, default_allow_spectators: bool) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            store,
            default_allow_spectators,
        }
    }

    pub fn store(&self) -> &Arc<dyn MoveStore> {
        &self.store
    }

    pub fn get(&self, code: &str) -> Option<SessionHandle> {
        self.sessions.read().get(code).cloned()
    }

    pub fn contains(&self, code: &str) -> bool {
        self.sessions.read().contains_key(code)
    }

    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.read().is_empty()
    }

    /// Opens a session for `code` and seats the host in it
    ///
    /// A code with a persisted move log is rebuilt from that log.
    pub async fn host(
        &self,
        code: &str,
        id: ParticipantId,
        name: &str,
        allow_spectators: Option<bool>,
        outbox: Outbox,
    ) -> Result<(SessionHandle, Seat), JoinRejection> {
        if self.contains(code) {
            return Err(JoinRejection::CodeInUse);
        }

        let allow_spectators = allow_spectators.unwrap_or(self.default_allow_spectators);
        let records = self.store.load_moves(code).await.map_err(|e| {
            error!("[REGISTRY] Failed to load moves for {}: {}", code, e);
            JoinRejection::StorageUnavailable
        })?;
        let session = if records.is_empty() {
            Session::new(code, allow_spectators)
        } else {
            Session::rehydrate(code, records, allow_spectators).map_err(|e| {
                error!("[REGISTRY] Stored log for {} does not replay: {}", code, e);
                JoinRejection::StorageUnavailable
            })?
        };

        // Seat the host before anyone else can reach the new session.
        let handle: SessionHandle = Arc::new(Mutex::new(session));
        let mut guard = handle.lock().await;
        {
            let mut sessions = self.sessions.write();
            if sessions.contains_key(code) {
                return Err(JoinRejection::CodeInUse);
            }
            sessions.insert(code.to_string(), Arc::clone(&handle));
        }
        let seat = guard.join(id, name, outbox)?;
        drop(guard);

        info!("[REGISTRY] Opened {} ({} live)", code, self.len());
        Ok((handle, seat))
    }

    pub async fn join(
        &self,
        code: &str,
        id: ParticipantId,
        name: &str,
        outbox: Outbox,
    ) -> Result<(SessionHandle, Seat), JoinRejection> {
        let handle = self.get(code).ok_or(JoinRejection::CodeNotFound)?;
        let seat = handle.lock().await.join(id, name, outbox)?;
        Ok((handle, seat))
    }

    /// Removes a participant, dropping the session once nobody is left
    pub async fn leave(&self, handle: &SessionHandle, id: ParticipantId) {
        let mut session = handle.lock().await;
        if session.leave(id) {
            let mut sessions = self.sessions.write();
            // A closed session is removed by the call that closed it, and only if
            // the map still points at this very session.
            if sessions
                .get(session.code())
                .is_some_and(|live| Arc::ptr_eq(live, handle))
            {
                sessions.remove(session.code());
                info!("[REGISTRY] Closed {} ({} live)", session.code(), sessions.len());
            }
        }
    }

    /// Validates, persists, then applies and broadcasts a move
    ///
    /// The session lock is held across the store write, so moves of one session
    /// are persisted in the order they are applied.
    pub async fn submit_move(
        &self,
        handle: &SessionHandle,
        id: ParticipantId,
        from: Square,
        to: Square,
        promotion: Option<PieceKind>,
    ) -> Result<(), MoveRejection> {
        let mut session = handle.lock().await;
        let prepared = session.prepare_move(id, from, to, promotion)?;

        if let Err(e) = self.store.append_move(session.code(), &prepared.record).await {
            warn!(
                "[REGISTRY] Could not persist ply {} of {}: {}",
                prepared.record.ply,
                session.code(),
                e
            );
            return Err(MoveRejection::StorageUnavailable);
        }

        session.commit(prepared);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryMoveStore;
    use shared::MoveRecord;
    use tokio::sync::mpsc::unbounded_channel;

    fn registry() -> SessionRegistry {
        SessionRegistry::new(Arc::new(MemoryMoveStore::new()), true)
    }

    fn outbox() -> Outbox {
        unbounded_channel().0
    }

    #[tokio::test]
    async fn test_host_then_second_host_is_rejected() {
        let registry = registry();
        let (_, seat) = registry
            .host("ROOM", ParticipantId::new(), "Ada", None, outbox())
            .await
            .unwrap();
        assert_eq!(seat, Seat::White);

        let second = registry
            .host("ROOM", ParticipantId::new(), "Grace", None, outbox())
            .await;
        assert!(matches!(second, Err(JoinRejection::CodeInUse)));
        assert_eq!(registry.len(), 1);
    }

    #[tokio::test]
    async fn test_join_unknown_code() {
        let registry = registry();
        let result = registry
            .join("NOPE", ParticipantId::new(), "Ada", outbox())
            .await;
        assert!(matches!(result, Err(JoinRejection::CodeNotFound)));
    }

    #[tokio::test]
    async fn test_last_leave_removes_session_once() {
        let registry = registry();
        let host = ParticipantId::new();
        let guest = ParticipantId::new();
        let (handle, _) = registry.host("ROOM", host, "Ada", None, outbox()).await.unwrap();
        registry.join("ROOM", guest, "Grace", outbox()).await.unwrap();

        registry.leave(&handle, host).await;
        assert!(registry.contains("ROOM"));
        registry.leave(&handle, guest).await;
        assert!(registry.is_empty());

        // A fresh session under the same code is not touched by a stale leave.
        let (_, _) = registry
            .host("ROOM", ParticipantId::new(), "Linus", None, outbox())
            .await
            .unwrap();
        registry.leave(&handle, guest).await;
        assert!(registry.contains("ROOM"));
    }

    #[tokio::test]
    async fn test_host_rehydrates_from_store() {
        let store = Arc::new(MemoryMoveStore::new());
        let record = MoveRecord {
            ply: 1,
            san: "e4".to_string(),
            from: "e2".parse().unwrap(),
            to: "e4".parse().unwrap(),
            promotion: None,
        };
        store.append_move("OLD", &record).await.unwrap();

        let registry = SessionRegistry::new(store, true);
        let (handle, _) = registry
            .host("OLD", ParticipantId::new(), "Ada", None, outbox())
            .await
            .unwrap();
        let session = handle.lock().await;
        assert_eq!(session.state().ply(), 1);
        assert_eq!(session.records(), &[record]);
    }
}
