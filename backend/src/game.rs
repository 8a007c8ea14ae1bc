//! Websocket connections
//!
//! Each socket gets one [`Connection`], which owns the participant id, the
//! outbound channel and the handle of the session it joined. Incoming frames are
//! decoded into [`WireMessage`]s and dispatched to the registry or the session;
//! a writer task drains the outbound channel into the socket.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use futures::{SinkExt, StreamExt};
use shared::{
    ActionRejection, GameMessage, JoinRejection, LobbyMessage, MoveRejection, ParticipantId,
    WireMessage,
};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::registry::{SessionHandle, SessionRegistry};
use crate::session::Outbox;

pub struct Connection {
    id: ParticipantId,
    outbox: Outbox,
    registry: Arc<SessionRegistry>,
    joined: Option<SessionHandle>,
}

impl Connection {
    pub fn new(registry: Arc<SessionRegistry>, outbox: Outbox) -> Self {
        Self {
            id: ParticipantId::new(),
            outbox,
            registry,
            joined: None,
        }
    }

    pub fn id(&self) -> ParticipantId {
        self.id
    }

    pub fn is_joined(&self) -> bool {
        self.joined.is_some()
    }

    fn send(&self, msg: impl Into<WireMessage>) {
        if self.outbox.send(msg.into()).is_err() {
            debug!("[WS] Outbox closed for {}", self.id);
        }
    }

    fn reject_join(&self, reason: JoinRejection) {
        debug!("[WS] {} join rejected: {}", self.id, reason);
        self.send(LobbyMessage::JoinRejected { reason });
    }

    fn reject_action(&self, reason: ActionRejection) {
        debug!("[WS] {} action rejected: {}", self.id, reason);
        self.send(LobbyMessage::ActionRejected { reason });
    }

    fn reject_move(&self, reason: MoveRejection) {
        debug!("[WS] {} move rejected: {}", self.id, reason);
        self.send(GameMessage::MoveRejected { reason });
    }

    /// Handles one decoded client message
    pub async fn handle(&mut self, msg: WireMessage) {
        match msg {
            WireMessage::Lobby(msg) => self.handle_lobby(msg).await,
            WireMessage::Game(msg) => self.handle_game(msg).await,
        }
    }

    async fn handle_lobby(&mut self, msg: LobbyMessage) {
        match msg {
            LobbyMessage::Host {
                code,
                name,
                allow_spectators,
            } => {
                if self.joined.is_some() {
                    return self.reject_join(JoinRejection::AlreadyJoined);
                }
                match self
                    .registry
                    .host(&code, self.id, &name, allow_spectators, self.outbox.clone())
                    .await
                {
                    Ok((handle, _)) => self.joined = Some(handle),
                    Err(reason) => self.reject_join(reason),
                }
            }
            LobbyMessage::Join { code, name } => {
                if self.joined.is_some() {
                    return self.reject_join(JoinRejection::AlreadyJoined);
                }
                match self
                    .registry
                    .join(&code, self.id, &name, self.outbox.clone())
                    .await
                {
                    Ok((handle, _)) => self.joined = Some(handle),
                    Err(reason) => self.reject_join(reason),
                }
            }
            LobbyMessage::SetReady { ready } => {
                let result = match &self.joined {
                    Some(handle) => handle.lock().await.set_ready(self.id, ready),
                    None => Err(ActionRejection::NotJoined),
                };
                if let Err(reason) = result {
                    self.reject_action(reason);
                }
            }
            LobbyMessage::Configure { allow_spectators } => {
                let result = match &self.joined {
                    Some(handle) => handle.lock().await.configure(self.id, allow_spectators),
                    None => Err(ActionRejection::NotJoined),
                };
                if let Err(reason) = result {
                    self.reject_action(reason);
                }
            }
            LobbyMessage::Start => {
                let result = match &self.joined {
                    Some(handle) => handle.lock().await.start(self.id),
                    None => Err(ActionRejection::NotJoined),
                };
                if let Err(reason) = result {
                    self.reject_action(reason);
                }
            }
            LobbyMessage::Leave => {
                if self.joined.is_none() {
                    return self.reject_action(ActionRejection::NotJoined);
                }
                self.disconnect().await;
            }
            LobbyMessage::Joined { .. }
            | LobbyMessage::JoinRejected { .. }
            | LobbyMessage::RoomUpdate(_)
            | LobbyMessage::ActionRejected { .. }
            | LobbyMessage::GameStarted => self.reject_action(ActionRejection::UnexpectedMessage),
        }
    }

    async fn handle_game(&mut self, msg: GameMessage) {
        match msg {
            GameMessage::SubmitMove {
                from,
                to,
                promotion,
            } => {
                let Some(handle) = &self.joined else {
                    return self.reject_move(MoveRejection::NotSeated);
                };
                if let Err(reason) = self
                    .registry
                    .submit_move(handle, self.id, from, to, promotion)
                    .await
                {
                    self.reject_move(reason);
                }
            }
            GameMessage::History { .. }
            | GameMessage::MoveMade { .. }
            | GameMessage::MoveRejected { .. }
            | GameMessage::GameOver { .. } => self.reject_action(ActionRejection::UnexpectedMessage),
        }
    }

    /// Leaves the joined session, if any
    pub async fn disconnect(&mut self) {
        if let Some(handle) = self.joined.take() {
            self.registry.leave(&handle, self.id).await;
        }
    }
}

/// Drives one websocket until the peer goes away
pub async fn handle_socket(socket: WebSocket, registry: Arc<SessionRegistry>) {
    let (mut sink, mut stream) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel::<WireMessage>();

    let writer = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            let text = match msg.to_json() {
                Ok(text) => text,
                Err(e) => {
                    warn!("[WS] Failed to encode outbound message: {}", e);
                    continue;
                }
            };
            if sink.send(Message::Text(text.into())).await.is_err() {
                break;
            }
        }
    });

    let mut connection = Connection::new(registry, tx);
    info!("[WS] Connection {} opened", connection.id());

    while let Some(frame) = stream.next().await {
        match frame {
            Ok(Message::Text(text)) => match WireMessage::from_json(text.as_str()) {
                Ok(msg) => connection.handle(msg).await,
                Err(e) => {
                    debug!("[WS] {} sent an undecodable frame: {}", connection.id(), e);
                    connection.reject_action(ActionRejection::UnexpectedMessage);
                }
            },
            Ok(Message::Close(_)) => break,
            Ok(_) => {}
            Err(e) => {
                debug!("[WS] {} read error: {}", connection.id(), e);
                break;
            }
        }
    }

    connection.disconnect().await;
    info!("[WS] Connection {} closed", connection.id());
    writer.abort();
}
