//! Wire protocol between clients and the game server
//!
//! Every websocket text frame carries one JSON-encoded [`WireMessage`]. Lobby
//! traffic (hosting, joining, ready flags, start) and in-game traffic (moves,
//! history, results) travel in separate enums, each listing its client → server
//! requests first and its server → client events after.
//!
//! Rejections carry stable snake_case reason codes so clients can localize them.

use chess_engine::{Color, Outcome, PieceKind, Square};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::record::MoveRecord;
use crate::seat::{Participant, ParticipantId, Seat, SessionPhase};

/// Lobby-related messages for session management
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum LobbyMessage {
    // Client → Server
    Host {
        code: String,
        name: String,
        /// Falls back to the server default when absent
        allow_spectators: Option<bool>,
    },
    Join {
        code: String,
        name: String,
    },
    SetReady {
        ready: bool,
    },
    /// Host only, before the game starts
    Configure {
        allow_spectators: bool,
    },
    /// Host only
    Start,
    Leave,

    // Server → Client
    Joined {
        code: String,
        you: ParticipantId,
        seat: Seat,
        is_host: bool,
    },
    JoinRejected {
        reason: JoinRejection,
    },
    RoomUpdate(RoomSnapshot),
    ActionRejected {
        reason: ActionRejection,
    },
    GameStarted,
}

/// In-game messages
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum GameMessage {
    // Client → Server
    SubmitMove {
        from: Square,
        to: Square,
        promotion: Option<PieceKind>,
    },

    // Server → Client
    /// Full move log, sent on join so the client can rebuild the game by replay
    History {
        moves: Vec<MoveRecord>,
    },
    /// Broadcast to every participant once the move is persisted
    MoveMade {
        record: MoveRecord,
        color: Color,
        by: String,
        next_turn: Color,
        outcome: Option<Outcome>,
    },
    /// Sent to the submitter only
    MoveRejected {
        reason: MoveRejection,
    },
    GameOver {
        outcome: Outcome,
    },
}

/// Envelope for one websocket frame
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum WireMessage {
    Lobby(LobbyMessage),
    Game(GameMessage),
}

impl WireMessage {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

impl From<LobbyMessage> for WireMessage {
    fn from(msg: LobbyMessage) -> Self {
        WireMessage::Lobby(msg)
    }
}

impl From<GameMessage> for WireMessage {
    fn from(msg: GameMessage) -> Self {
        WireMessage::Game(msg)
    }
}

/// Roster and readiness of a session, broadcast after every lobby change
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct RoomSnapshot {
    pub code: String,
    pub host: Option<ParticipantId>,
    pub roster: Vec<Participant>,
    pub white_ready: bool,
    pub black_ready: bool,
    pub allow_spectators: bool,
    pub phase: SessionPhase,
}

#[derive(Serialize, Deserialize, Error, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum JoinRejection {
    #[error("no session with that code")]
    CodeNotFound,
    #[error("a session with that code is already running")]
    CodeInUse,
    #[error("both seats are taken and spectators are not allowed")]
    RoomFull,
    #[error("the game has already started")]
    AlreadyStarted,
    #[error("this connection is already in a session")]
    AlreadyJoined,
    #[error("the session could not be loaded")]
    StorageUnavailable,
}

#[derive(Serialize, Deserialize, Error, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ActionRejection {
    #[error("only the host can do that")]
    NotHost,
    #[error("spectators cannot do that")]
    NotSeated,
    #[error("both seats must be filled")]
    SeatsNotFilled,
    #[error("both players must be ready")]
    PlayersNotReady,
    #[error("the game has already started")]
    AlreadyStarted,
    #[error("join a session first")]
    NotJoined,
    #[error("that message is not accepted from clients")]
    UnexpectedMessage,
}

#[derive(Serialize, Deserialize, Error, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MoveRejection {
    #[error("the game is not in progress")]
    NotInProgress,
    #[error("only seated players can move")]
    NotSeated,
    #[error("it is not your turn")]
    WrongTurn,
    #[error("that move is not legal")]
    IllegalMove,
    #[error("the move could not be saved")]
    StorageUnavailable,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(text: &str) -> Square {
        text.parse().unwrap()
    }

    #[test]
    fn test_lobby_message_join_serialization() {
        let msg = LobbyMessage::Join {
            code: "ABCD-EFGH".to_string(),
            name: "Ada".to_string(),
        };
        let bytes = bincode::serialize(&msg).expect("Should serialize");
        let decoded: LobbyMessage = bincode::deserialize(&bytes).expect("Should deserialize");
        assert_eq!(decoded, msg);
    }

    #[test]
    fn test_game_message_submit_move_bincode() {
        let msg = GameMessage::SubmitMove {
            from: sq("e7"),
            to: sq("e8"),
            promotion: Some(PieceKind::Queen),
        };
        let bytes = bincode::serialize(&msg).expect("Should serialize");
        let decoded: GameMessage = bincode::deserialize(&bytes).expect("Should deserialize");

        match decoded {
            GameMessage::SubmitMove { from, to, promotion } => {
                assert_eq!(from, sq("e7"));
                assert_eq!(to, sq("e8"));
                assert_eq!(promotion, Some(PieceKind::Queen));
            }
            _ => panic!("Wrong message type"),
        }
    }

    #[test]
    fn test_wire_message_json_shape() {
        let msg = WireMessage::from(GameMessage::SubmitMove {
            from: sq("e2"),
            to: sq("e4"),
            promotion: None,
        });
        let json = msg.to_json().expect("Should serialize");
        assert_eq!(
            json,
            r#"{"game":{"submit_move":{"from":"e2","to":"e4","promotion":null}}}"#
        );
        assert_eq!(WireMessage::from_json(&json).expect("Should parse"), msg);
    }

    #[test]
    fn test_reason_codes_are_snake_case() {
        let msg = WireMessage::from(LobbyMessage::JoinRejected {
            reason: JoinRejection::CodeNotFound,
        });
        let json = msg.to_json().expect("Should serialize");
        assert!(json.contains(r#""reason":"code_not_found""#), "got {json}");

        let reason: MoveRejection = serde_json::from_str(r#""wrong_turn""#).expect("Should parse");
        assert_eq!(reason, MoveRejection::WrongTurn);
    }

    #[test]
    fn test_game_over_outcome_json() {
        let msg = GameMessage::GameOver {
            outcome: Outcome::Winner(Color::Black),
        };
        let json = serde_json::to_string(&msg).expect("Should serialize");
        assert_eq!(json, r#"{"game_over":{"outcome":{"winner":"black"}}}"#);
    }

    #[test]
    fn test_bad_square_is_rejected_on_parse() {
        let json = r#"{"game":{"submit_move":{"from":"z9","to":"e4","promotion":null}}}"#;
        assert!(WireMessage::from_json(json).is_err());
    }
}
