//! Zobrist hashing for position identification.
//!
//! A position's key is the XOR of one random number per feature:
//! - each piece on each square (6 kinds x 2 colors x 64 squares)
//! - Black to move
//! - each castling right held
//! - the en passant file, when a target is set
//!
//! The move clocks are not part of the key, so two positions that repeat for
//! the purpose of draw detection share a key.

use chesskit_core::{CastleSide, Color, Piece, Position, Square};

/// Zobrist hash keys, generated from a fixed seed for reproducibility.
pub struct ZobristKeys {
    /// Keys for pieces: [kind][color][square]
    pieces: [[[u64; 64]; 2]; 6],
    black_to_move: u64,
    castling: [u64; 4],
    en_passant: [u64; 8],
}

impl ZobristKeys {
    /// Fills the tables with a const xorshift64 sequence.
    pub const fn new() -> Self {
        const fn next_random(state: u64) -> u64 {
            let mut x = state;
            x ^= x << 13;
            x ^= x >> 7;
            x ^= x << 17;
            x
        }

        let mut state = 0x9E37_79B9_7F4A_7C15u64;
        let mut pieces = [[[0u64; 64]; 2]; 6];
        let mut castling = [0u64; 4];
        let mut en_passant = [0u64; 8];

        let mut kind = 0;
        while kind < 6 {
            let mut color = 0;
            while color < 2 {
                let mut square = 0;
                while square < 64 {
                    state = next_random(state);
                    pieces[kind][color][square] = state;
                    square += 1;
                }
                color += 1;
            }
            kind += 1;
        }

        state = next_random(state);
        let black_to_move = state;

        let mut i = 0;
        while i < 4 {
            state = next_random(state);
            castling[i] = state;
            i += 1;
        }

        let mut i = 0;
        while i < 8 {
            state = next_random(state);
            en_passant[i] = state;
            i += 1;
        }

        ZobristKeys {
            pieces,
            black_to_move,
            castling,
            en_passant,
        }
    }

    #[inline]
    pub const fn piece_key(&self, piece: Piece, square: Square) -> u64 {
        self.pieces[piece.kind.index()][piece.color.index()][square.index() as usize]
    }

    /// Key for one castling right.
    #[inline]
    pub const fn castling_key(&self, color: Color, side: CastleSide) -> u64 {
        let index = match (color, side) {
            (Color::White, CastleSide::Kingside) => 0,
            (Color::White, CastleSide::Queenside) => 1,
            (Color::Black, CastleSide::Kingside) => 2,
            (Color::Black, CastleSide::Queenside) => 3,
        };
        self.castling[index]
    }

    /// Key for an en passant target on the given file (0-7).
    #[inline]
    pub const fn en_passant_key(&self, file: u8) -> u64 {
        self.en_passant[file as usize]
    }

    /// Full key of a position.
    pub fn hash(&self, position: &Position) -> u64 {
        let mut key = position
            .board
            .occupied()
            .fold(0u64, |acc, (sq, piece)| acc ^ self.piece_key(piece, sq));

        if position.side_to_move == Color::Black {
            key ^= self.black_to_move;
        }

        for color in Color::BOTH {
            for side in CastleSide::BOTH {
                if position.castling.has(color, side) {
                    key ^= self.castling_key(color, side);
                }
            }
        }

        if let Some(ep) = position.en_passant {
            key ^= self.en_passant_key(ep.file());
        }

        key
    }
}

impl Default for ZobristKeys {
    fn default() -> Self {
        Self::new()
    }
}

/// Global Zobrist keys (initialized at compile time).
pub static ZOBRIST: ZobristKeys = ZobristKeys::new();

/// Zobrist key of `position` using the global tables.
pub fn position_key(position: &Position) -> u64 {
    ZOBRIST.hash(position)
}
