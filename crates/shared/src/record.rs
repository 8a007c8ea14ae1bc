use chess_engine::{Color, Move, PieceKind, PlayedMove, Square};
use serde::{Deserialize, Serialize};

/// An accepted move as it is persisted and broadcast
///
/// `ply` is 1-based. Replaying records in ply order from the initial position
/// rebuilds the game.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct MoveRecord {
    pub ply: u32,
    pub san: String,
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceKind>,
}

impl MoveRecord {
    pub fn from_played(ply: u32, played: &PlayedMove) -> Self {
        Self {
            ply,
            san: played.san.clone(),
            from: played.mv.from,
            to: played.mv.to,
            promotion: played.mv.promotion,
        }
    }

    /// Side that played this ply; White plays the odd plies
    pub fn color(&self) -> Color {
        if self.ply % 2 == 1 {
            Color::White
        } else {
            Color::Black
        }
    }

    pub fn to_move(&self) -> Move {
        Move {
            from: self.from,
            to: self.to,
            promotion: self.promotion,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_engine::GameState;

    #[test]
    fn test_record_from_played_move() {
        let mut game = GameState::new();
        let played = game.play("g1f3".parse().unwrap()).unwrap();
        let record = MoveRecord::from_played(1, &played);

        assert_eq!(record.san, "Nf3");
        assert_eq!(record.to_move(), played.mv);
        assert_eq!(record.color(), Color::White);

        let reply = game.play("g8f6".parse().unwrap()).unwrap();
        assert_eq!(MoveRecord::from_played(2, &reply).color(), Color::Black);
    }

    #[test]
    fn test_record_json_uses_algebraic_squares() {
        let record = MoveRecord {
            ply: 1,
            san: "e4".to_string(),
            from: "e2".parse().unwrap(),
            to: "e4".parse().unwrap(),
            promotion: None,
        };
        let json = serde_json::to_string(&record).expect("Should serialize");
        assert_eq!(
            json,
            r#"{"ply":1,"san":"e4","from":"e2","to":"e4","promotion":null}"#
        );
    }
}
