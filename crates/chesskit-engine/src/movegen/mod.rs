//! Move generation.
//!
//! Generation runs in two phases. The pseudo-legal phase walks offset and
//! direction tables for every piece of the side to move, ignoring whether the
//! mover's king ends up attacked. The legality filter then plays each
//! candidate on a scratch copy of the position and drops those that leave the
//! mover's king in check.

pub mod perft;

use crate::attacks::{
    is_king_attacked, is_square_attacked, ray, slider_directions, step_targets, KING_OFFSETS,
    KNIGHT_OFFSETS,
};
use crate::execute::make_move;
use chesskit_core::{
    CastleSide, Color, Move, MoveKind, MoveRequest, Piece, PieceKind, Position, Square,
};

/// A list of generated moves.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct MoveList {
    moves: Vec<Move>,
}

impl MoveList {
    /// Enough room for the moves of a typical middlegame position.
    const TYPICAL_CAPACITY: usize = 48;

    /// Creates an empty move list.
    pub fn new() -> Self {
        MoveList {
            moves: Vec::with_capacity(Self::TYPICAL_CAPACITY),
        }
    }

    #[inline]
    pub fn push(&mut self, m: Move) {
        self.moves.push(m);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.moves.iter()
    }

    pub fn clear(&mut self) {
        self.moves.clear();
    }

    /// Retains only moves for which the predicate returns true.
    pub fn retain<F>(&mut self, f: F)
    where
        F: FnMut(&Move) -> bool,
    {
        self.moves.retain(f);
    }

    pub fn contains(&self, m: &Move) -> bool {
        self.moves.contains(m)
    }

    /// The move selected by a `(from, to, promotion)` triple, if present.
    pub fn find(&self, request: &MoveRequest) -> Option<Move> {
        self.moves.iter().find(|m| m.matches(request)).copied()
    }

    /// Moves landing on `to`.
    pub fn to_square(&self, to: Square) -> impl Iterator<Item = &Move> + '_ {
        self.moves.iter().filter(move |m| m.to == to)
    }

    pub fn into_vec(self) -> Vec<Move> {
        self.moves
    }
}

impl std::ops::Index<usize> for MoveList {
    type Output = Move;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.moves[index]
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.moves.iter()
    }
}

impl IntoIterator for MoveList {
    type Item = Move;
    type IntoIter = std::vec::IntoIter<Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.moves.into_iter()
    }
}

impl FromIterator<Move> for MoveList {
    fn from_iter<I: IntoIterator<Item = Move>>(iter: I) -> Self {
        MoveList {
            moves: iter.into_iter().collect(),
        }
    }
}

impl std::fmt::Debug for MoveList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.moves.iter().map(|m| m.to_uci()))
            .finish()
    }
}

/// Generates all legal moves for the side to move.
pub fn legal_moves(position: &Position) -> MoveList {
    let mut moves = pseudo_legal_moves(position);
    retain_legal(position, &mut moves);
    moves
}

/// Generates the legal moves of the piece on `from`.
///
/// Empty when `from` is vacant or holds a piece of the side not to move.
pub fn legal_moves_from(position: &Position, from: Square) -> MoveList {
    let mut moves = MoveList::new();
    match position.piece_at(from) {
        Some(piece) if piece.color == position.side_to_move => {
            generate_piece_moves(position, from, piece, &mut moves);
            retain_legal(position, &mut moves);
        }
        _ => {}
    }
    moves
}

/// Returns true if the side to move has at least one legal move.
pub fn has_legal_move(position: &Position) -> bool {
    let us = position.side_to_move;
    pseudo_legal_moves(position)
        .iter()
        .any(|m| !is_king_attacked(&make_move(position, m), us))
}

/// Generates moves that are geometrically valid for the side to move,
/// including ones that leave its own king attacked.
pub fn pseudo_legal_moves(position: &Position) -> MoveList {
    let mut moves = MoveList::new();
    for (from, piece) in position.board.pieces_of(position.side_to_move) {
        generate_piece_moves(position, from, piece, &mut moves);
    }
    moves
}

fn retain_legal(position: &Position, moves: &mut MoveList) {
    let us = position.side_to_move;
    moves.retain(|m| {
        let scratch = make_move(position, m);
        !is_king_attacked(&scratch, us)
    });
}

fn generate_piece_moves(position: &Position, from: Square, piece: Piece, moves: &mut MoveList) {
    match piece.kind {
        PieceKind::Pawn => generate_pawn_moves(position, from, piece, moves),
        PieceKind::Knight => {
            for to in step_targets(from, &KNIGHT_OFFSETS) {
                push_unless_own(position, from, to, piece, moves);
            }
        }
        PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen => {
            for &dir in slider_directions(piece.kind) {
                for to in ray(&position.board, from, dir) {
                    push_unless_own(position, from, to, piece, moves);
                }
            }
        }
        PieceKind::King => {
            for to in step_targets(from, &KING_OFFSETS) {
                push_unless_own(position, from, to, piece, moves);
            }
            generate_castling_moves(position, from, piece, moves);
        }
    }
}

/// Pushes a normal move to `to` unless a friendly piece stands there.
fn push_unless_own(
    position: &Position,
    from: Square,
    to: Square,
    piece: Piece,
    moves: &mut MoveList,
) {
    let captured = position.piece_at(to);
    if captured.is_some_and(|c| c.color == piece.color) {
        return;
    }
    moves.push(Move {
        from,
        to,
        piece,
        captured,
        promotion: None,
        kind: MoveKind::Normal,
    });
}

fn generate_pawn_moves(position: &Position, from: Square, piece: Piece, moves: &mut MoveList) {
    let us = piece.color;
    let forward = us.pawn_direction();

    // Pushes
    if let Some(one) = from.offset(0, forward).filter(|sq| position.board.is_empty(*sq)) {
        push_pawn_move(from, one, piece, None, moves);

        if from.rank() == us.pawn_start_rank() {
            if let Some(two) = one.offset(0, forward).filter(|sq| position.board.is_empty(*sq)) {
                moves.push(Move {
                    from,
                    to: two,
                    piece,
                    captured: None,
                    promotion: None,
                    kind: MoveKind::DoublePush,
                });
            }
        }
    }

    // Captures
    for df in [-1, 1] {
        let Some(to) = from.offset(df, forward) else {
            continue;
        };
        match position.piece_at(to) {
            Some(target) if target.color != us => {
                push_pawn_move(from, to, piece, Some(target), moves);
            }
            None if position.en_passant == Some(to) => {
                // The double-pushed pawn sits beside us, one rank behind the target.
                let victim = to
                    .offset(0, -forward)
                    .and_then(|sq| position.piece_at(sq))
                    .filter(|p| p.kind == PieceKind::Pawn && p.color != us);
                if let Some(victim) = victim {
                    moves.push(Move {
                        from,
                        to,
                        piece,
                        captured: Some(victim),
                        promotion: None,
                        kind: MoveKind::EnPassant,
                    });
                }
            }
            _ => {}
        }
    }
}

/// Pushes a pawn move, expanding it into the four promotions on the last rank.
fn push_pawn_move(
    from: Square,
    to: Square,
    piece: Piece,
    captured: Option<Piece>,
    moves: &mut MoveList,
) {
    if to.rank() == piece.color.promotion_rank() {
        for kind in PieceKind::PROMOTIONS {
            moves.push(Move {
                from,
                to,
                piece,
                captured,
                promotion: Some(kind),
                kind: MoveKind::Normal,
            });
        }
    } else {
        moves.push(Move {
            from,
            to,
            piece,
            captured,
            promotion: None,
            kind: MoveKind::Normal,
        });
    }
}

/// Squares involved in castling for one side and wing.
pub(crate) struct CastlingPath {
    pub king_from: Square,
    pub king_to: Square,
    pub rook_from: Square,
    pub rook_to: Square,
}

impl CastlingPath {
    pub(crate) fn new(color: Color, side: CastleSide) -> Self {
        let (king_from, king_to, rook_from, rook_to) = match (color, side) {
            (Color::White, CastleSide::Kingside) => {
                (Square::E1, Square::G1, Square::H1, Square::F1)
            }
            (Color::White, CastleSide::Queenside) => {
                (Square::E1, Square::C1, Square::A1, Square::D1)
            }
            (Color::Black, CastleSide::Kingside) => {
                (Square::E8, Square::G8, Square::H8, Square::F8)
            }
            (Color::Black, CastleSide::Queenside) => {
                (Square::E8, Square::C8, Square::A8, Square::D8)
            }
        };
        CastlingPath {
            king_from,
            king_to,
            rook_from,
            rook_to,
        }
    }

    /// Squares strictly between king and rook; all must be empty.
    fn between(&self) -> impl Iterator<Item = Square> {
        let rank = self.king_from.rank();
        let (lo, hi) = if self.rook_from.file() < self.king_from.file() {
            (self.rook_from.file(), self.king_from.file())
        } else {
            (self.king_from.file(), self.rook_from.file())
        };
        (lo + 1..hi).filter_map(move |file| Square::from_coords(file, rank))
    }

    /// Squares the king stands on, passes through or lands on.
    fn king_walk(&self) -> impl Iterator<Item = Square> {
        let rank = self.king_from.rank();
        let (lo, hi) = if self.king_to.file() < self.king_from.file() {
            (self.king_to.file(), self.king_from.file())
        } else {
            (self.king_from.file(), self.king_to.file())
        };
        (lo..=hi).filter_map(move |file| Square::from_coords(file, rank))
    }
}

fn generate_castling_moves(position: &Position, from: Square, king: Piece, moves: &mut MoveList) {
    let us = king.color;
    let them = us.opposite();

    for side in CastleSide::BOTH {
        if !position.castling.has(us, side) {
            continue;
        }
        let path = CastlingPath::new(us, side);
        if from != path.king_from
            || position.piece_at(path.rook_from) != Some(Piece::new(PieceKind::Rook, us))
        {
            continue;
        }
        if !path.between().all(|sq| position.board.is_empty(sq)) {
            continue;
        }
        if path.king_walk().any(|sq| is_square_attacked(position, sq, them)) {
            continue;
        }
        moves.push(Move {
            from,
            to: path.king_to,
            piece: king,
            captured: None,
            promotion: None,
            kind: match side {
                CastleSide::Kingside => MoveKind::CastleKingside,
                CastleSide::Queenside => MoveKind::CastleQueenside,
            },
        });
    }
}
