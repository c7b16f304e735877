//! Pseudo-legal chess move generation on a 64-square mailbox board.
//!
//! Positions are loaded from FEN-like strings, every square knows how far it
//! is from each board edge, and moves are produced by stepping through that
//! table. The [`ui`] module holds the headless glue a drag-and-drop front end
//! needs: pixel mapping, pointer events and the turn controller.

pub mod chess_board;
pub mod error;
pub mod ui;

pub use chess_board::{ChessBoard, Color, Move, MoveList, Piece, PieceType, Square};
pub use error::{FenError, FenResult, MoveParseError};
