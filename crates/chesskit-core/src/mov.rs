//! Move values and move requests.

use crate::{Piece, PieceKind, Square};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// What kind of special handling a move needs when it is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveKind {
    /// Plain relocation, possibly capturing on the destination.
    Normal,
    /// Pawn advancing two squares from its start rank.
    DoublePush,
    /// King to the g-file with the h-rook hopping over (O-O).
    CastleKingside,
    /// King to the c-file with the a-rook hopping over (O-O-O).
    CastleQueenside,
    /// Pawn capture of a pawn that just passed it with a double push.
    EnPassant,
}

/// A fully described move.
///
/// Moves are values produced by the move generator for one position. They
/// carry the moving piece and any captured piece so that they can be rendered
/// and compared without consulting the board again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    /// The piece standing on `from` before the move.
    pub piece: Piece,
    /// The piece removed by this move, if any. For en passant this is the
    /// pawn behind `to`, not an occupant of `to`.
    pub captured: Option<Piece>,
    pub promotion: Option<PieceKind>,
    pub kind: MoveKind,
}

impl Move {
    #[inline]
    pub const fn is_castle(&self) -> bool {
        matches!(self.kind, MoveKind::CastleKingside | MoveKind::CastleQueenside)
    }

    #[inline]
    pub const fn is_en_passant(&self) -> bool {
        matches!(self.kind, MoveKind::EnPassant)
    }

    #[inline]
    pub const fn is_capture(&self) -> bool {
        self.captured.is_some()
    }

    #[inline]
    pub const fn is_double_push(&self) -> bool {
        matches!(self.kind, MoveKind::DoublePush)
    }

    /// True when this move matches a caller's `(from, to, promotion)` triple.
    pub fn matches(&self, request: &MoveRequest) -> bool {
        self.from == request.from && self.to == request.to && self.promotion == request.promotion
    }

    /// The `(from, to, promotion)` triple that selects this move.
    pub const fn request(&self) -> MoveRequest {
        MoveRequest {
            from: self.from,
            to: self.to,
            promotion: self.promotion,
        }
    }

    /// UCI text such as `e2e4` or `e7e8q`.
    pub fn to_uci(&self) -> String {
        self.request().to_string()
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.request())
    }
}

/// Returned when text is not a UCI move.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid move text: '{0}'")]
pub struct ParseMoveError(pub String);

/// A caller's request to move from one square to another.
///
/// The request carries no piece information; the engine resolves it against
/// the legal moves of the current position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MoveRequest {
    pub from: Square,
    pub to: Square,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promotion: Option<PieceKind>,
}

impl MoveRequest {
    pub const fn new(from: Square, to: Square) -> Self {
        MoveRequest {
            from,
            to,
            promotion: None,
        }
    }

    pub const fn with_promotion(mut self, kind: PieceKind) -> Self {
        self.promotion = Some(kind);
        self
    }

    /// Parses UCI move text (`e2e4`, `e7e8q`; promotion letter in either case).
    pub fn from_uci(s: &str) -> Result<Self, ParseMoveError> {
        let err = || ParseMoveError(s.to_string());
        if !s.is_ascii() || !(4..=5).contains(&s.len()) {
            return Err(err());
        }
        let from = Square::from_algebraic(&s[0..2]).ok_or_else(err)?;
        let to = Square::from_algebraic(&s[2..4]).ok_or_else(err)?;
        let promotion = match s[4..].chars().next() {
            None => None,
            Some(c) => match PieceKind::from_char(c) {
                Some(kind) if PieceKind::PROMOTIONS.contains(&kind) => Some(kind),
                _ => return Err(err()),
            },
        };
        Ok(MoveRequest {
            from,
            to,
            promotion,
        })
    }
}

impl FromStr for MoveRequest {
    type Err = ParseMoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MoveRequest::from_uci(s)
    }
}

impl fmt::Display for MoveRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(kind) = self.promotion {
            write!(f, "{}", kind.to_char())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Color;

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    #[test]
    fn request_from_uci() {
        let r = MoveRequest::from_uci("e2e4").unwrap();
        assert_eq!(r.from, sq("e2"));
        assert_eq!(r.to, sq("e4"));
        assert_eq!(r.promotion, None);

        let promo: MoveRequest = "e7e8N".parse().unwrap();
        assert_eq!(promo.promotion, Some(PieceKind::Knight));
        assert_eq!(promo.to_string(), "e7e8n");
    }

    #[test]
    fn request_rejects_malformed_text() {
        for bad in ["", "e2", "e2e", "e2e9", "e7e8k", "e7e8p", "e7e8qq", "é2e4"] {
            assert!(MoveRequest::from_uci(bad).is_err(), "{bad} should not parse");
        }
    }

    #[test]
    fn move_flags_follow_kind() {
        let pawn = Piece::new(PieceKind::Pawn, Color::White);
        let ep = Move {
            from: sq("e5"),
            to: sq("d6"),
            piece: pawn,
            captured: Some(Piece::new(PieceKind::Pawn, Color::Black)),
            promotion: None,
            kind: MoveKind::EnPassant,
        };
        assert!(ep.is_en_passant());
        assert!(ep.is_capture());
        assert!(!ep.is_castle());
        assert_eq!(ep.to_uci(), "e5d6");
        assert!(ep.matches(&MoveRequest::new(sq("e5"), sq("d6"))));
        let promoting = MoveRequest::new(sq("e5"), sq("d6")).with_promotion(PieceKind::Queen);
        assert!(!ep.matches(&promoting));
    }

    #[test]
    fn castle_flags() {
        let king = Piece::new(PieceKind::King, Color::Black);
        let castle = Move {
            from: Square::E8,
            to: Square::C8,
            piece: king,
            captured: None,
            promotion: None,
            kind: MoveKind::CastleQueenside,
        };
        assert!(castle.is_castle());
        assert!(!castle.is_capture());
        assert_eq!(format!("{}", castle), "e8c8");
    }
}
