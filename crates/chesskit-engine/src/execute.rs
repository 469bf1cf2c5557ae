//! Applying moves to positions.

use crate::movegen::{legal_moves, CastlingPath};
use crate::session::GameError;
use crate::status::classify;
use chesskit_core::{CastleSide, Color, Move, MoveKind, Piece, PieceKind, Position, Square};

/// Plays `m` on `position` after checking that it is legal there.
///
/// Returns the resulting position; `position` itself is untouched. A position
/// that is already decided (checkmate, stalemate, fifty-move rule,
/// insufficient material) accepts no moves. Repetition depends on the game
/// history and is enforced by [`Session`](crate::Session).
pub fn apply(position: &Position, m: &Move) -> Result<Position, GameError> {
    if classify(position, 1).game_over() {
        return Err(GameError::GameAlreadyOver);
    }
    if !legal_moves(position).contains(m) {
        return Err(GameError::IllegalMove(m.to_uci()));
    }
    Ok(make_move(position, m))
}

/// Plays a move produced by the generator for `position`, without checking it.
///
/// Feeding a move from another position gives a meaningless result.
pub fn make_move(position: &Position, m: &Move) -> Position {
    let mut next = position.clone();
    let us = position.side_to_move;
    let board = &mut next.board;

    board.set(m.from, None);
    if m.is_en_passant() {
        if let Some(victim) = m.to.offset(0, -us.pawn_direction()) {
            board.set(victim, None);
        }
    }
    let landed = match m.promotion {
        Some(kind) => Piece::new(kind, us),
        None => m.piece,
    };
    board.set(m.to, Some(landed));

    let castled = match m.kind {
        MoveKind::CastleKingside => Some(CastleSide::Kingside),
        MoveKind::CastleQueenside => Some(CastleSide::Queenside),
        _ => None,
    };
    if let Some(side) = castled {
        let path = CastlingPath::new(us, side);
        let rook = board.take(path.rook_from);
        board.set(path.rook_to, rook);
    }

    // Rights go when the king moves, or when anything leaves or lands on a
    // rook's home square.
    if m.piece.kind == PieceKind::King {
        next.castling.remove_color(us);
    }
    for sq in [m.from, m.to] {
        if let Some((color, side)) = rook_home(sq) {
            next.castling.remove(color, side);
        }
    }

    next.en_passant = if m.is_double_push() {
        m.from.offset(0, us.pawn_direction())
    } else {
        None
    };

    if m.piece.kind == PieceKind::Pawn || m.is_capture() {
        next.halfmove_clock = 0;
    } else {
        next.halfmove_clock = next.halfmove_clock.saturating_add(1);
    }

    if us == Color::Black {
        next.fullmove_number = next.fullmove_number.saturating_add(1);
    }

    next.side_to_move = us.opposite();
    next
}

/// The castling right tied to a rook starting on `sq`.
fn rook_home(sq: Square) -> Option<(Color, CastleSide)> {
    match sq {
        Square::H1 => Some((Color::White, CastleSide::Kingside)),
        Square::A1 => Some((Color::White, CastleSide::Queenside)),
        Square::H8 => Some((Color::Black, CastleSide::Kingside)),
        Square::A8 => Some((Color::Black, CastleSide::Queenside)),
        _ => None,
    }
}
