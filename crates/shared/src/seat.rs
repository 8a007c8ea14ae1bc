use std::fmt;

use chess_engine::Color;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Server-assigned identity of a connected participant
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ParticipantId(pub Uuid);

impl ParticipantId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ParticipantId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where a participant sits in a session
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Seat {
    White,
    Black,
    Spectator,
}

impl Seat {
    /// Color played from this seat; spectators have none
    pub fn color(self) -> Option<Color> {
        match self {
            Seat::White => Some(Color::White),
            Seat::Black => Some(Color::Black),
            Seat::Spectator => None,
        }
    }

    pub fn for_color(color: Color) -> Self {
        match color {
            Color::White => Seat::White,
            Color::Black => Seat::Black,
        }
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Seat::White => "white",
            Seat::Black => "black",
            Seat::Spectator => "spectator",
        })
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Participant {
    pub id: ParticipantId,
    pub name: String,
    pub seat: Seat,
}

/// Lifecycle of a session as seen by its participants
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    /// Colored seats still filling
    Waiting,
    /// Both seats filled, waiting for both ready flags and the host's start
    ReadyPending,
    InProgress,
    Finished,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seat_and_color_correspond() {
        for color in Color::ALL {
            assert_eq!(Seat::for_color(color).color(), Some(color));
        }
        assert_eq!(Seat::Spectator.color(), None);
    }
}
