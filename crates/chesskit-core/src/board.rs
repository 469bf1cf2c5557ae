//! Piece placement storage.

use crate::{Color, Piece, PieceKind, Square};
use std::fmt;

/// A 64-entry mailbox mapping each square to its occupant.
///
/// The board stores pieces and nothing else: it knows no rules.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    squares: [Option<Piece>; 64],
}

impl Board {
    /// A board with no pieces.
    pub const fn empty() -> Self {
        Board {
            squares: [None; 64],
        }
    }

    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.squares[sq.index() as usize]
    }

    #[inline]
    pub fn set(&mut self, sq: Square, piece: Option<Piece>) {
        self.squares[sq.index() as usize] = piece;
    }

    /// Empties `sq` and returns what stood there.
    #[inline]
    pub fn take(&mut self, sq: Square) -> Option<Piece> {
        self.squares[sq.index() as usize].take()
    }

    #[inline]
    pub fn is_empty(&self, sq: Square) -> bool {
        self.piece_at(sq).is_none()
    }

    /// Iterates occupied squares in index order.
    pub fn occupied(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| self.piece_at(sq).map(|p| (sq, p)))
    }

    /// Iterates the squares holding pieces of `color`.
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.occupied().filter(move |(_, p)| p.color == color)
    }

    /// Counts pieces of the given kind and color.
    pub fn count(&self, kind: PieceKind, color: Color) -> usize {
        self.pieces_of(color).filter(|(_, p)| p.kind == kind).count()
    }

    /// Square of the first king of `color`, scanning from a1.
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces_of(color)
            .find(|(_, p)| p.kind == PieceKind::King)
            .map(|(sq, _)| sq)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Board")?;
        for rank in (0..8).rev() {
            write!(f, "{} ", rank + 1)?;
            for file in 0..8 {
                let c = Square::from_coords(file, rank)
                    .and_then(|sq| self.piece_at(sq))
                    .map_or('.', Piece::to_fen_char);
                write!(f, "{} ", c)?;
            }
            writeln!(f)?;
        }
        writeln!(f, "  a b c d e f g h")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_and_take() {
        let mut board = Board::empty();
        let rook = Piece::new(PieceKind::Rook, Color::Black);
        board.set(Square::H8, Some(rook));
        assert_eq!(board.piece_at(Square::H8), Some(rook));
        assert_eq!(board.take(Square::H8), Some(rook));
        assert!(board.is_empty(Square::H8));
    }

    #[test]
    fn king_lookup_and_counts() {
        let mut board = Board::empty();
        board.set(Square::E1, Some(Piece::new(PieceKind::King, Color::White)));
        board.set(Square::E8, Some(Piece::new(PieceKind::King, Color::Black)));
        board.set(Square::B1, Some(Piece::new(PieceKind::Knight, Color::White)));
        board.set(Square::G1, Some(Piece::new(PieceKind::Knight, Color::White)));

        assert_eq!(board.king_square(Color::White), Some(Square::E1));
        assert_eq!(board.king_square(Color::Black), Some(Square::E8));
        assert_eq!(board.count(PieceKind::Knight, Color::White), 2);
        assert_eq!(board.pieces_of(Color::Black).count(), 1);
        assert_eq!(board.occupied().count(), 4);
    }

    #[test]
    fn debug_draws_ranks_top_down() {
        let mut board = Board::empty();
        board.set(Square::A8, Some(Piece::new(PieceKind::Queen, Color::Black)));
        let text = format!("{:?}", board);
        let first_rank = text.lines().nth(1).unwrap();
        assert!(first_rank.starts_with("8 q"));
    }
}
