use super::{ChessBoard, Move, MoveList};

/// Counts the leaf nodes of the pseudo-legal move tree `depth` plies deep.
pub fn perft(board: &ChessBoard, depth: u8) -> u64 {
    if depth == 0 {
        return 1u64;
    }

    let moves = board.generate_pseudo_moves();
    if depth == 1 {
        return moves.len() as u64;
    }

    let mut node_count = 0u64;
    for &mv in &moves {
        let mut new_board = board.clone();
        new_board.make_move(mv);
        node_count += perft(&new_board, depth - 1);
    }
    node_count
}

/// Node counts per root move, sorted by move text.
pub fn divide(board: &ChessBoard, depth: u8) -> Vec<(Move, u64)> {
    let mut moves = MoveList::new();
    board.generate_pseudo_moves_into(&mut moves);

    let mut result: Vec<(Move, u64)> = moves
        .iter()
        .map(|&mv| {
            let mut new_board = board.clone();
            new_board.make_move(mv);
            (mv, perft(&new_board, depth.saturating_sub(1)))
        })
        .collect();
    result.sort_by_key(|(mv, _)| mv.as_algebraic());
    result
}
