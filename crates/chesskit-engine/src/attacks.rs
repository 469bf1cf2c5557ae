//! Piece geometry and attack detection.

use chesskit_core::{Board, Color, PieceKind, Position, Square};

/// Knight jumps as (file, rank) deltas.
pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

/// King steps as (file, rank) deltas.
pub const KING_OFFSETS: [(i8, i8); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

/// Diagonal ray directions.
pub const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, -1), (-1, 1)];

/// Orthogonal ray directions.
pub const ROOK_DIRECTIONS: [(i8, i8); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

/// Ray directions for a sliding piece kind; empty for non-sliders.
pub fn slider_directions(kind: PieceKind) -> &'static [(i8, i8)] {
    const QUEEN_DIRECTIONS: [(i8, i8); 8] = [
        (0, 1),
        (1, 1),
        (1, 0),
        (1, -1),
        (0, -1),
        (-1, -1),
        (-1, 0),
        (-1, 1),
    ];
    match kind {
        PieceKind::Bishop => &BISHOP_DIRECTIONS,
        PieceKind::Rook => &ROOK_DIRECTIONS,
        PieceKind::Queen => &QUEEN_DIRECTIONS,
        _ => &[],
    }
}

/// Squares reached from `from` by the given deltas, staying on the board.
pub fn step_targets(from: Square, offsets: &[(i8, i8)]) -> impl Iterator<Item = Square> + '_ {
    offsets
        .iter()
        .filter_map(move |&(df, dr)| from.offset(df, dr))
}

/// Walks from `from` along `(df, dr)` up to and including the first occupied square.
pub fn ray(board: &Board, from: Square, (df, dr): (i8, i8)) -> impl Iterator<Item = Square> + '_ {
    let mut next = from.offset(df, dr);
    let mut blocked = false;
    std::iter::from_fn(move || {
        if blocked {
            return None;
        }
        let sq = next?;
        blocked = !board.is_empty(sq);
        next = sq.offset(df, dr);
        Some(sq)
    })
}

/// Returns true if any piece of `by` attacks `sq`.
///
/// Works backwards from the target: a knight of `by` a knight's jump away
/// attacks it, and so on for each kind. The occupant of `sq` itself is
/// irrelevant.
pub fn is_square_attacked(position: &Position, sq: Square, by: Color) -> bool {
    let board = &position.board;
    let holds = |target: Square, kinds: &[PieceKind]| {
        board
            .piece_at(target)
            .is_some_and(|p| p.color == by && kinds.contains(&p.kind))
    };

    // A pawn of `by` attacks diagonally forward, so look one rank behind `sq`
    // from the attacker's point of view.
    let behind = -by.pawn_direction();
    if [-1, 1]
        .iter()
        .filter_map(|&df| sq.offset(df, behind))
        .any(|from| holds(from, &[PieceKind::Pawn]))
    {
        return true;
    }

    if step_targets(sq, &KNIGHT_OFFSETS).any(|from| holds(from, &[PieceKind::Knight])) {
        return true;
    }

    if step_targets(sq, &KING_OFFSETS).any(|from| holds(from, &[PieceKind::King])) {
        return true;
    }

    let diagonal = [PieceKind::Bishop, PieceKind::Queen];
    let straight = [PieceKind::Rook, PieceKind::Queen];
    BISHOP_DIRECTIONS
        .iter()
        .any(|&dir| ray(board, sq, dir).last().is_some_and(|end| holds(end, &diagonal)))
        || ROOK_DIRECTIONS
            .iter()
            .any(|&dir| ray(board, sq, dir).last().is_some_and(|end| holds(end, &straight)))
}

/// Returns true if the king of `color` is attacked.
pub fn is_king_attacked(position: &Position, color: Color) -> bool {
    match position.king_square(color) {
        Some(king) => is_square_attacked(position, king, color.opposite()),
        None => {
            debug_assert!(false, "{} has no king", color);
            false
        }
    }
}
