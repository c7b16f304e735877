pub mod edge_distance;
pub mod fen;
pub mod model;
pub mod move_list;
pub mod perft;
pub use edge_distance::{EdgeDistances, EDGE_DISTANCES};
pub use model::{square_from_algebraic, to_algebraic_square, Color, Direction, Move, Piece, PieceType, Square};
pub use move_list::MoveList;

mod chess_board;
mod move_generation;
#[cfg(test)]
pub mod test_utils;
pub use chess_board::ChessBoard;
pub use move_generation::generate_moves;
