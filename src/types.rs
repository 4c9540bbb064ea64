//! Domain types shared across the protocol: moves, players and scores.
//! Each type carries its own wire codec; decoding failures are syntax
//! failures that the dispatch loop reports back to the controller.

use std::fmt;

use anyhow::ensure;

use crate::error::SyntaxError;

/// Smallest board edge the protocol itself allows. Engines may support a
/// narrower range and veto sizes through [`crate::GoEngine::resize_board`].
pub const MIN_BOARD_SIZE: usize = 2;
/// Largest board edge the protocol itself allows.
pub const MAX_BOARD_SIZE: usize = 25;

/// The GTP column alphabet. 25 letters, `i` is skipped per protocol.
const COLUMN_LETTERS: &str = "abcdefghjklmnopqrstuvwxyz";

const PASS_STR: &str = "pass";
const RESIGN_STR: &str = "resign";

/// One move as spoken on the wire.
///
/// Board coordinates are zero-based Cartesian: `x` grows to the right,
/// `y` grows upward. The wire form is column letter plus one-based row,
/// e.g. `d4` is `Point { x: 3, y: 3 }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    /// Relinquish the turn without placing a stone.
    Pass,
    /// Concede the game.
    Resign,
    /// A stone at a board coordinate; both components are below
    /// [`MAX_BOARD_SIZE`].
    Point { x: u8, y: u8 },
}

impl Move {
    /// Decode a wire token (case-insensitive) into a move.
    pub fn decode(token: &str) -> Result<Self, SyntaxError> {
        if token.is_empty() {
            return Err(SyntaxError::new("No move given!"));
        }
        let token = token.to_lowercase();

        if token == PASS_STR {
            return Ok(Move::Pass);
        }
        if token == RESIGN_STR {
            return Ok(Move::Resign);
        }

        let mut chars = token.chars();
        let column = chars.next().and_then(|c| COLUMN_LETTERS.find(c));
        let row: i64 = chars.as_str().parse().map_err(|_| {
            SyntaxError::new(format!(
                "Invalid move: {token}, expected integer after first character!"
            ))
        })?;

        match column {
            Some(x) if (1..=MAX_BOARD_SIZE as i64).contains(&row) => Ok(Move::Point {
                x: x as u8,
                y: (row - 1) as u8,
            }),
            _ => Err(SyntaxError::new(format!(
                "Invalid move: {token}, coordinate out of range!"
            ))),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::Pass => f.write_str(PASS_STR),
            Move::Resign => f.write_str(RESIGN_STR),
            Move::Point { x, y } => {
                let letter = COLUMN_LETTERS.as_bytes()[*x as usize] as char;
                write!(f, "{}{}", letter, *y as u32 + 1)
            }
        }
    }
}

/// The two stone colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    Black,
    White,
}

impl Player {
    /// Decode a wire token (case-insensitive single letter or full word).
    pub fn decode(token: &str) -> Result<Self, SyntaxError> {
        if token.is_empty() {
            return Err(SyntaxError::new("Not a valid player string!"));
        }
        match token.to_lowercase().as_str() {
            "b" | "black" => Ok(Player::Black),
            "w" | "white" => Ok(Player::White),
            other => Err(SyntaxError::new(format!("Unknown player: {other}!"))),
        }
    }

    /// Short wire form, used in score strings.
    pub fn letter(self) -> char {
        match self {
            Player::Black => 'B',
            Player::White => 'W',
        }
    }
}

/// Final result of a game: a winner and their margin, or a draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Score {
    winner: Option<Player>,
    margin: f64,
}

impl Score {
    /// The drawn game.
    pub const DRAW: Score = Score {
        winner: None,
        margin: 0.0,
    };

    /// A win for `winner` by `margin` points. The margin must be
    /// non-negative; a negative value means the engine mixed up its own
    /// sign convention, which is a bug rather than a protocol failure.
    pub fn win(winner: Player, margin: f64) -> anyhow::Result<Self> {
        ensure!(
            margin >= 0.0,
            "score margin must be non-negative, got {margin}"
        );
        Ok(Score {
            winner: Some(winner),
            margin,
        })
    }

    pub fn winner(&self) -> Option<Player> {
        self.winner
    }
}

impl fmt::Display for Score {
    /// Canonical wire form: `0` for a draw, else `<letter>+<margin>` with a
    /// decimal point and at most one fractional digit, no trailing zero.
    /// Locale never enters into it.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(winner) = self.winner else {
            return f.write_str("0");
        };
        let tenths = (self.margin * 10.0).round() as i64;
        if tenths % 10 == 0 {
            write!(f, "{}+{}", winner.letter(), tenths / 10)
        } else {
            write!(f, "{}+{}.{}", winner.letter(), tenths / 10, tenths % 10)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_decode_point() {
        assert_eq!(Move::decode("a1").unwrap(), Move::Point { x: 0, y: 0 });
        assert_eq!(Move::decode("d4").unwrap(), Move::Point { x: 3, y: 3 });
        assert_eq!(Move::decode("z25").unwrap(), Move::Point { x: 24, y: 24 });
        // Column letters skip 'i': 'j' is the ninth column.
        assert_eq!(Move::decode("j1").unwrap(), Move::Point { x: 8, y: 0 });
    }

    #[test]
    fn test_move_decode_case_insensitive() {
        assert_eq!(Move::decode("R14").unwrap(), Move::decode("r14").unwrap());
        assert_eq!(Move::decode("PASS").unwrap(), Move::Pass);
        assert_eq!(Move::decode("Resign").unwrap(), Move::Resign);
    }

    #[test]
    fn test_move_decode_rejects_bad_column() {
        assert!(Move::decode("i5").is_err());
        assert!(Move::decode("!5").is_err());
    }

    #[test]
    fn test_move_decode_rejects_bad_row() {
        assert!(Move::decode("d0").is_err());
        assert!(Move::decode("d26").is_err());
        assert!(Move::decode("d-1").is_err());
        assert!(Move::decode("dd").is_err());
        assert!(Move::decode("d").is_err());
        assert!(Move::decode("").is_err());
    }

    #[test]
    fn test_move_decode_row_error_message() {
        let err = Move::decode("dx").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid move: dx, expected integer after first character!"
        );
        let err = Move::decode("d99").unwrap_err();
        assert_eq!(err.to_string(), "Invalid move: d99, coordinate out of range!");
    }

    #[test]
    fn test_move_encode() {
        assert_eq!(Move::Pass.to_string(), "pass");
        assert_eq!(Move::Resign.to_string(), "resign");
        assert_eq!(Move::Point { x: 3, y: 3 }.to_string(), "d4");
        assert_eq!(Move::Point { x: 8, y: 0 }.to_string(), "j1");
        assert_eq!(Move::Point { x: 24, y: 24 }.to_string(), "z25");
    }

    #[test]
    fn test_move_roundtrip() {
        for x in 0..MAX_BOARD_SIZE as u8 {
            for y in 0..MAX_BOARD_SIZE as u8 {
                let mv = Move::Point { x, y };
                assert_eq!(Move::decode(&mv.to_string()).unwrap(), mv);
            }
        }
    }

    #[test]
    fn test_player_decode() {
        assert_eq!(Player::decode("b").unwrap(), Player::Black);
        assert_eq!(Player::decode("BLACK").unwrap(), Player::Black);
        assert_eq!(Player::decode("W").unwrap(), Player::White);
        assert_eq!(Player::decode("White").unwrap(), Player::White);
        assert!(Player::decode("").is_err());
        assert!(Player::decode("green").is_err());
        assert_eq!(
            Player::decode("Green").unwrap_err().to_string(),
            "Unknown player: green!"
        );
    }

    #[test]
    fn test_player_letter() {
        assert_eq!(Player::Black.letter(), 'B');
        assert_eq!(Player::White.letter(), 'W');
    }

    #[test]
    fn test_score_draw() {
        assert_eq!(Score::DRAW.to_string(), "0");
        assert_eq!(Score::DRAW.winner(), None);
    }

    #[test]
    fn test_score_display() {
        assert_eq!(Score::win(Player::White, 2.5).unwrap().to_string(), "W+2.5");
        assert_eq!(Score::win(Player::Black, 6.0).unwrap().to_string(), "B+6");
        assert_eq!(Score::win(Player::Black, 0.0).unwrap().to_string(), "B+0");
        assert_eq!(
            Score::win(Player::White, 100.5).unwrap().to_string(),
            "W+100.5"
        );
    }

    #[test]
    fn test_score_rounds_to_one_fractional_digit() {
        assert_eq!(Score::win(Player::Black, 2.25).unwrap().to_string(), "B+2.3");
        assert_eq!(Score::win(Player::White, 7.96).unwrap().to_string(), "W+8");
    }

    #[test]
    fn test_score_rejects_negative_margin() {
        assert!(Score::win(Player::Black, -1.0).is_err());
        assert!(Score::win(Player::White, f64::NAN).is_err());
    }
}
