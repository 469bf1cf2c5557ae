//! Complete game state at one moment.

use crate::fen::{self, FenError};
use crate::{Board, CastlingRights, Color, Piece, PieceKind, Square};
use std::fmt;
use std::str::FromStr;

/// Everything needed to continue a game from one position.
///
/// A `Position` built through [`Position::from_fen`] always has exactly one
/// king per side. Rules code treats positions as values: applying a move
/// produces a new `Position` and leaves the old one intact.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Position {
    pub board: Board,

    pub side_to_move: Color,

    pub castling: CastlingRights,

    /// Square a pawn skipped over on the previous move, if that move was a
    /// double push.
    pub en_passant: Option<Square>,

    /// Half-moves since the last pawn move or capture.
    pub halfmove_clock: u32,

    /// Starts at 1 and increments after each Black move.
    pub fullmove_number: u32,
}

impl Position {
    /// The standard initial position.
    pub fn startpos() -> Self {
        Position {
            board: start_board(),
            side_to_move: Color::White,
            castling: CastlingRights::ALL,
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    pub fn from_fen(text: &str) -> Result<Self, FenError> {
        fen::parse(text)
    }

    pub fn to_fen(&self) -> String {
        fen::produce(self)
    }

    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.board.piece_at(sq)
    }

    /// Square of the side's king.
    ///
    /// Positions built from FEN always have one; a missing king is an
    /// invariant violation reported as `None`.
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.board.king_square(color)
    }

    /// True when the two positions agree on every field that counts for
    /// repetition: placement, side to move, castling rights and en passant
    /// target. The move clocks are ignored.
    pub fn same_placement(&self, other: &Position) -> bool {
        self.board == other.board
            && self.side_to_move == other.side_to_move
            && self.castling == other.castling
            && self.en_passant == other.en_passant
    }
}

fn start_board() -> Board {
    const BACK_RANK: [PieceKind; 8] = [
        PieceKind::Rook,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Queen,
        PieceKind::King,
        PieceKind::Bishop,
        PieceKind::Knight,
        PieceKind::Rook,
    ];

    let mut board = Board::empty();
    for color in Color::BOTH {
        let back = color.back_rank();
        let pawns = color.pawn_start_rank();
        for (file, kind) in BACK_RANK.iter().enumerate() {
            let file = file as u8;
            if let Some(sq) = Square::from_coords(file, back) {
                board.set(sq, Some(Piece::new(*kind, color)));
            }
            if let Some(sq) = Square::from_coords(file, pawns) {
                board.set(sq, Some(Piece::new(PieceKind::Pawn, color)));
            }
        }
    }
    board
}

impl Default for Position {
    fn default() -> Self {
        Self::startpos()
    }
}

impl FromStr for Position {
    type Err = FenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        fen::parse(s)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_fen())
    }
}
