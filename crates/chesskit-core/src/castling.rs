//! Castling rights.

use crate::Color;
use serde::{Deserialize, Serialize};

/// Which wing a castling move goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CastleSide {
    Kingside,
    Queenside,
}

impl CastleSide {
    pub const BOTH: [CastleSide; 2] = [CastleSide::Kingside, CastleSide::Queenside];
}

/// The set of castling moves each side may still make, as four bit flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct CastlingRights(u8);

impl CastlingRights {
    pub const NONE: CastlingRights = CastlingRights(0);
    pub const ALL: CastlingRights = CastlingRights(0b1111);

    const fn flag(color: Color, side: CastleSide) -> u8 {
        match (color, side) {
            (Color::White, CastleSide::Kingside) => 0b0001,
            (Color::White, CastleSide::Queenside) => 0b0010,
            (Color::Black, CastleSide::Kingside) => 0b0100,
            (Color::Black, CastleSide::Queenside) => 0b1000,
        }
    }

    #[inline]
    pub const fn has(self, color: Color, side: CastleSide) -> bool {
        self.0 & Self::flag(color, side) != 0
    }

    #[inline]
    pub fn insert(&mut self, color: Color, side: CastleSide) {
        self.0 |= Self::flag(color, side);
    }

    #[inline]
    pub fn remove(&mut self, color: Color, side: CastleSide) {
        self.0 &= !Self::flag(color, side);
    }

    /// Drops both rights of `color`.
    #[inline]
    pub fn remove_color(&mut self, color: Color) {
        for side in CastleSide::BOTH {
            self.remove(color, side);
        }
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Raw flags, White kingside in bit 0 through Black queenside in bit 3.
    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Parses the FEN castling letter for one right.
    pub const fn from_fen_char(c: char) -> Option<(Color, CastleSide)> {
        match c {
            'K' => Some((Color::White, CastleSide::Kingside)),
            'Q' => Some((Color::White, CastleSide::Queenside)),
            'k' => Some((Color::Black, CastleSide::Kingside)),
            'q' => Some((Color::Black, CastleSide::Queenside)),
            _ => None,
        }
    }

    /// FEN castling field in canonical `KQkq` order, `-` when empty.
    pub fn to_fen(self) -> String {
        if self.is_empty() {
            return "-".to_string();
        }
        [
            ('K', Color::White, CastleSide::Kingside),
            ('Q', Color::White, CastleSide::Queenside),
            ('k', Color::Black, CastleSide::Kingside),
            ('q', Color::Black, CastleSide::Queenside),
        ]
        .iter()
        .filter(|(_, color, side)| self.has(*color, *side))
        .map(|(c, _, _)| *c)
        .collect()
    }
}
