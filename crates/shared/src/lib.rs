//! Types shared by the game server and its clients
//!
//! - [`protocol`] - lobby and game messages exchanged over the websocket
//! - [`seat`] - seats, participants and the session phase
//! - [`record`] - the persisted and broadcast form of an accepted move

pub mod protocol;
pub mod record;
pub mod seat;

pub use protocol::{
    ActionRejection, GameMessage, JoinRejection, LobbyMessage, MoveRejection, RoomSnapshot,
    WireMessage,
};
pub use record::MoveRecord;
pub use seat::{Participant, ParticipantId, Seat, SessionPhase};
