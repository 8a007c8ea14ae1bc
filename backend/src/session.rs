//! Authoritative state of one game session
//!
//! A [`Session`] owns the roster, the ready flags, the rules state and the list of
//! accepted moves for a single invite code. It is never shared directly: the
//! registry wraps each one in its own mutex, so every method here runs with
//! exclusive access and may assume nothing changes underneath it.
//!
//! ## Lifecycle
//!
//! ```text
//! Waiting ──both seats filled──► ReadyPending ──host Start──► InProgress ──outcome──► Finished
//! ```
//!
//! Rejected requests return a reason code and leave every field untouched.
//! Accepted requests notify participants through their outbound channels.

use chess_engine::{ChessEngineResult, Color, GameState, Move, Outcome, PieceKind, Square};
use shared::{
    ActionRejection, GameMessage, JoinRejection, LobbyMessage, MoveRecord, MoveRejection,
    Participant, ParticipantId, RoomSnapshot, Seat, SessionPhase, WireMessage,
};
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info};

/// Outbound half of a participant's connection
pub type Outbox = UnboundedSender<WireMessage>;

struct Member {
    id: ParticipantId,
    name: String,
    seat: Seat,
    outbox: Outbox,
}

impl Member {
    fn participant(&self) -> Participant {
        Participant {
            id: self.id,
            name: self.name.clone(),
            seat: self.seat,
        }
    }
}

/// A validated move waiting to be persisted
///
/// Produced by [`Session::prepare_move`] without touching the session, and applied
/// by [`Session::commit`] once the record is durable.
#[derive(Debug, Clone)]
pub struct PreparedMove {
    state: GameState,
    pub record: MoveRecord,
    pub color: Color,
    pub by: String,
}

impl PreparedMove {
    pub fn outcome(&self) -> Option<Outcome> {
        self.state.outcome()
    }
}

pub struct Session {
    code: String,
    members: Vec<Member>,
    host: Option<ParticipantId>,
    white_ready: bool,
    black_ready: bool,
    started: bool,
    allow_spectators: bool,
    state: GameState,
    records: Vec<MoveRecord>,
    closed: bool,
}

impl Session {
    pub fn new(code: impl Into<String>, allow_spectators: bool) -> Self {
        Self {
            code: code.into(),
            members: Vec::new(),
            host: None,
            white_ready: false,
            black_ready: false,
            started: false,
            allow_spectators,
            state: GameState::new(),
            records: Vec::new(),
            closed: false,
        }
    }

    /// Rebuilds a session from its persisted move log
    ///
    /// The rebuilt session has an empty roster and has not been started; the
    /// players ready up and the host starts it again before play resumes.
    pub fn rehydrate(
        code: impl Into<String>,
        records: Vec<MoveRecord>,
        allow_spectators: bool,
    ) -> ChessEngineResult<Self> {
        let state = GameState::replay(records.iter().map(MoveRecord::to_move))?;
        let mut session = Self::new(code, allow_spectators);
        info!(
            "[SESSION] {} rehydrated at ply {}, {} to move",
            session.code,
            state.ply(),
            state.turn()
        );
        session.state = state;
        session.records = records;
        Ok(session)
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn host(&self) -> Option<ParticipantId> {
        self.host
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn records(&self) -> &[MoveRecord] {
        &self.records
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn seat_of(&self, id: ParticipantId) -> Option<Seat> {
        self.member(id).map(|m| m.seat)
    }

    pub fn phase(&self) -> SessionPhase {
        if self.state.is_over() {
            SessionPhase::Finished
        } else if self.started {
            SessionPhase::InProgress
        } else if self.open_colored_seat().is_none() {
            SessionPhase::ReadyPending
        } else {
            SessionPhase::Waiting
        }
    }

    pub fn snapshot(&self) -> RoomSnapshot {
        RoomSnapshot {
            code: self.code.clone(),
            host: self.host,
            roster: self.members.iter().map(Member::participant).collect(),
            white_ready: self.white_ready,
            black_ready: self.black_ready,
            allow_spectators: self.allow_spectators,
            phase: self.phase(),
        }
    }

    /// Seats a new participant
    ///
    /// Open colored seats are filled first, White before Black, also after the
    /// game started so a returning player can take their seat back. Otherwise the
    /// participant watches when spectators are allowed. The first member becomes
    /// host. The joiner receives `Joined` and the move log, everyone receives the
    /// new roster.
    pub fn join(
        &mut self,
        id: ParticipantId,
        name: impl Into<String>,
        outbox: Outbox,
    ) -> Result<Seat, JoinRejection> {
        if self.closed {
            return Err(JoinRejection::CodeNotFound);
        }
        if self.member(id).is_some() {
            return Err(JoinRejection::AlreadyJoined);
        }

        let seat = if let Some(seat) = self.open_colored_seat() {
            seat
        } else if self.allow_spectators {
            Seat::Spectator
        } else if self.started {
            return Err(JoinRejection::AlreadyStarted);
        } else {
            return Err(JoinRejection::RoomFull);
        };

        let name = name.into();
        info!("[SESSION] {} {} joined as {}", self.code, name, seat);
        self.members.push(Member {
            id,
            name,
            seat,
            outbox,
        });
        if self.host.is_none() {
            self.host = Some(id);
        }

        self.send_to(
            id,
            LobbyMessage::Joined {
                code: self.code.clone(),
                you: id,
                seat,
                is_host: self.host == Some(id),
            },
        );
        self.send_to(id, self.history());
        if self.started {
            self.send_to(id, LobbyMessage::GameStarted);
        }
        self.broadcast_roster();
        Ok(seat)
    }

    /// Sets the caller's own ready flag
    pub fn set_ready(&mut self, id: ParticipantId, ready: bool) -> Result<(), ActionRejection> {
        let seat = self.seat_of(id).ok_or(ActionRejection::NotJoined)?;
        if self.started {
            return Err(ActionRejection::AlreadyStarted);
        }
        match seat {
            Seat::White => self.white_ready = ready,
            Seat::Black => self.black_ready = ready,
            Seat::Spectator => return Err(ActionRejection::NotSeated),
        }
        debug!("[SESSION] {} {} ready={}", self.code, seat, ready);
        self.broadcast_roster();
        Ok(())
    }

    /// Host-only, before start
    pub fn configure(
        &mut self,
        id: ParticipantId,
        allow_spectators: bool,
    ) -> Result<(), ActionRejection> {
        self.require_host(id)?;
        if self.started {
            return Err(ActionRejection::AlreadyStarted);
        }
        self.allow_spectators = allow_spectators;
        self.broadcast_roster();
        Ok(())
    }

    /// Host-only; both colored seats filled and ready
    pub fn start(&mut self, id: ParticipantId) -> Result<(), ActionRejection> {
        self.require_host(id)?;
        if self.started {
            return Err(ActionRejection::AlreadyStarted);
        }
        if self.open_colored_seat().is_some() {
            return Err(ActionRejection::SeatsNotFilled);
        }
        if !(self.white_ready && self.black_ready) {
            return Err(ActionRejection::PlayersNotReady);
        }

        self.started = true;
        info!("[SESSION] {} started at ply {}", self.code, self.state.ply());
        self.broadcast(LobbyMessage::GameStarted);
        self.broadcast_roster();
        Ok(())
    }

    /// Validates a submitted move without changing the session
    ///
    /// The promotion request is advisory: a pawn reaching the last rank always
    /// becomes a queen.
    pub fn prepare_move(
        &self,
        id: ParticipantId,
        from: Square,
        to: Square,
        promotion: Option<PieceKind>,
    ) -> Result<PreparedMove, MoveRejection> {
        if self.phase() != SessionPhase::InProgress {
            return Err(MoveRejection::NotInProgress);
        }
        let member = self.member(id).ok_or(MoveRejection::NotSeated)?;
        let color = member.seat.color().ok_or(MoveRejection::NotSeated)?;
        if color != self.state.turn() {
            return Err(MoveRejection::WrongTurn);
        }

        let mut state = self.state.clone();
        let played = state
            .play(Move {
                from,
                to,
                promotion,
            })
            .map_err(|e| {
                debug!("[SESSION] {} rejected {}{}: {}", self.code, from, to, e);
                MoveRejection::IllegalMove
            })?;

        let ply = u32::try_from(state.ply()).map_err(|_| MoveRejection::IllegalMove)?;
        Ok(PreparedMove {
            record: MoveRecord::from_played(ply, &played),
            color,
            by: member.name.clone(),
            state,
        })
    }

    /// Applies a prepared move whose record has been persisted, then tells
    /// everyone about it
    pub fn commit(&mut self, prepared: PreparedMove) -> Option<Outcome> {
        let PreparedMove {
            state,
            record,
            color,
            by,
        } = prepared;

        self.state = state;
        self.records.push(record.clone());
        let outcome = self.state.outcome();

        info!(
            "[SESSION] {} ply {} {} {}",
            self.code, record.ply, color, record.san
        );
        self.broadcast(GameMessage::MoveMade {
            record,
            color,
            by,
            next_turn: self.state.turn(),
            outcome,
        });
        if let Some(outcome) = outcome {
            info!("[SESSION] {} finished: {}", self.code, outcome.message());
            self.broadcast(GameMessage::GameOver { outcome });
            self.broadcast_roster();
        }
        outcome
    }

    /// Removes a participant and vacates their seat
    ///
    /// Returns `true` when the session is now empty. An empty session is closed
    /// and refuses further joins.
    pub fn leave(&mut self, id: ParticipantId) -> bool {
        let Some(index) = self.members.iter().position(|m| m.id == id) else {
            return self.members.is_empty();
        };
        let member = self.members.remove(index);
        info!("[SESSION] {} {} left ({})", self.code, member.name, member.seat);

        match member.seat {
            Seat::White => self.white_ready = false,
            Seat::Black => self.black_ready = false,
            Seat::Spectator => {}
        }

        if self.members.is_empty() {
            self.host = None;
            self.closed = true;
            return true;
        }

        if self.host == Some(id) {
            self.host = self
                .members
                .iter()
                .find(|m| m.seat != Seat::Spectator)
                .or_else(|| self.members.first())
                .map(|m| m.id);
            debug!("[SESSION] {} host passed to {:?}", self.code, self.host);
        }
        self.broadcast_roster();
        false
    }

    /// Full move log, as sent to joiners
    pub fn history(&self) -> GameMessage {
        GameMessage::History {
            moves: self.records.clone(),
        }
    }

    pub fn broadcast(&self, msg: impl Into<WireMessage>) {
        let msg = msg.into();
        for member in &self.members {
            if member.outbox.send(msg.clone()).is_err() {
                debug!("[SESSION] {} outbox closed for {}", self.code, member.id);
            }
        }
    }

    pub fn send_to(&self, id: ParticipantId, msg: impl Into<WireMessage>) {
        if let Some(member) = self.member(id) {
            if member.outbox.send(msg.into()).is_err() {
                debug!("[SESSION] {} outbox closed for {}", self.code, member.id);
            }
        }
    }

    fn broadcast_roster(&self) {
        self.broadcast(LobbyMessage::RoomUpdate(self.snapshot()));
    }

    fn member(&self, id: ParticipantId) -> Option<&Member> {
        self.members.iter().find(|m| m.id == id)
    }

    fn seat_taken(&self, seat: Seat) -> bool {
        self.members.iter().any(|m| m.seat == seat)
    }

    /// First vacant colored seat, White before Black
    fn open_colored_seat(&self) -> Option<Seat> {
        Color::ALL
            .into_iter()
            .map(Seat::for_color)
            .find(|seat| !self.seat_taken(*seat))
    }

    fn require_host(&self, id: ParticipantId) -> Result<(), ActionRejection> {
        if self.member(id).is_none() {
            return Err(ActionRejection::NotJoined);
        }
        if self.host != Some(id) {
            return Err(ActionRejection::NotHost);
        }
        Ok(())
    }
}
