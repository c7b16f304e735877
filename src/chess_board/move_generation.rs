use super::edge_distance::{EdgeDistances, EDGE_DISTANCES};
use super::{ChessBoard, Color, Direction, Move, MoveList, PieceType, Square};
use tracing::trace;

/// Knight jumps as (row delta, file delta). Negative rows point towards rank 8.
const KNIGHT_JUMPS: [(i8, i8); 8] = [(-2, -1), (-2, 1), (-1, 2), (1, 2), (2, 1), (2, -1), (1, -2), (-1, -2)];

/// Generates every pseudo-legal move for the side to move.
pub fn generate_moves(board: &ChessBoard, edges: &EdgeDistances) -> MoveList {
    let mut moves = MoveList::new();
    board.generate_moves_into(edges, &mut moves);
    moves
}

#[inline]
fn step(square: u8, direction: Direction, distance: u8) -> u8 {
    (square as i8 + direction.offset() * distance as i8) as u8
}

impl ChessBoard {
    pub fn generate_pseudo_moves(&self) -> MoveList {
        generate_moves(self, &EDGE_DISTANCES)
    }

    /// Clears `moves` and refills it for the side to move.
    pub fn generate_pseudo_moves_into(&self, moves: &mut MoveList) {
        self.generate_moves_into(&EDGE_DISTANCES, moves);
    }

    pub fn generate_moves_into(&self, edges: &EdgeDistances, moves: &mut MoveList) {
        moves.clear();

        for square in 0..64u8 {
            self.generate_pseudo_moves_from_square(edges, square, moves);
        }

        trace!(side = %self.active_color, count = moves.len(), "generated pseudo moves");
    }

    /// Appends the moves of the piece on `square`, if it belongs to the side to move.
    pub fn generate_pseudo_moves_from_square(&self, edges: &EdgeDistances, square: u8, moves: &mut MoveList) {
        if let Square::Occupied(piece) = self.square(square) {
            if piece.color == self.active_color {
                match piece.kind {
                    PieceType::Pawn => self.generate_pawn_moves(edges, square, moves),
                    PieceType::Knight => self.generate_knight_moves(edges, square, moves),
                    PieceType::Bishop => self.generate_sliding_moves(edges, square, &Direction::DIAGONALS, moves),
                    PieceType::Rook => self.generate_sliding_moves(edges, square, &Direction::ORTHOGONALS, moves),
                    PieceType::Queen => self.generate_sliding_moves(edges, square, &Direction::ALL, moves),
                    PieceType::King => self.generate_king_moves(edges, square, moves),
                }
            }
        }
    }

    fn is_friendly(&self, square: u8) -> bool {
        self.square(square).has_color(self.active_color)
    }

    /// Generate sliding piece moves (bishop, rook, queen).
    fn generate_sliding_moves(&self, edges: &EdgeDistances, square: u8, directions: &[Direction], moves: &mut MoveList) {
        for &direction in directions {
            for distance in 1..=edges.get(square, direction) {
                let target = step(square, direction, distance);
                if self.is_friendly(target) {
                    break;
                }

                moves.push(Move::new(square, target));

                // Block sliding
                if !self.square(target).is_empty() {
                    break;
                }
            }
        }
    }

    /// Generate king moves. No castling.
    fn generate_king_moves(&self, edges: &EdgeDistances, square: u8, moves: &mut MoveList) {
        for direction in Direction::ALL {
            if edges.get(square, direction) == 0 {
                continue;
            }
            let target = step(square, direction, 1);
            if !self.is_friendly(target) {
                moves.push(Move::new(square, target));
            }
        }
    }

    /// Generate knight moves.
    fn generate_knight_moves(&self, edges: &EdgeDistances, square: u8, moves: &mut MoveList) {
        for &(d_row, d_file) in &KNIGHT_JUMPS {
            let vertical = if d_row < 0 { Direction::North } else { Direction::South };
            let horizontal = if d_file < 0 { Direction::West } else { Direction::East };

            // Both legs must stay on the board, otherwise the jump wraps around a file edge
            if edges.get(square, vertical) < d_row.unsigned_abs() || edges.get(square, horizontal) < d_file.unsigned_abs() {
                continue;
            }

            let target = (square as i8 + d_row * 8 + d_file) as u8;
            if !self.is_friendly(target) {
                moves.push(Move::new(square, target));
            }
        }
    }

    fn generate_pawn_moves(&self, edges: &EdgeDistances, square: u8, moves: &mut MoveList) {
        let (forward, captures, start_row) = match self.active_color {
            Color::White => (Direction::North, [Direction::NorthWest, Direction::NorthEast], 6),
            Color::Black => (Direction::South, [Direction::SouthWest, Direction::SouthEast], 1),
        };
        let opponent = self.active_color.opposite();

        // Capture diagonally
        for direction in captures {
            if edges.get(square, direction) == 0 {
                continue;
            }
            let target = step(square, direction, 1);
            if self.square(target).has_color(opponent) {
                moves.push(Move::new(square, target));
            }
        }

        // Regular forward move
        if edges.get(square, forward) == 0 {
            return;
        }
        let one_forward = step(square, forward, 1);
        if !self.square(one_forward).is_empty() {
            return;
        }
        moves.push(Move::new(square, one_forward));

        // Double move from start position
        if square / 8 == start_row {
            let two_forward = step(square, forward, 2);
            if self.square(two_forward).is_empty() {
                moves.push(Move::new(square, two_forward));
            }
        }
    }
}
