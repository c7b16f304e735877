use super::input::{square_from_coords, InputQueue, PointerEvent};
use crate::chess_board::{ChessBoard, Color, Move, MoveList, Piece, Square};
use crate::error::FenResult;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnState {
    WaitingForSelection,
    /// A piece of the side to move has been taken off `from` and follows the pointer.
    PieceLifted { from: u8, piece: Piece },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseOutcome {
    /// The move was in the move list and has been played.
    Moved(Move),
    /// The lifted piece went back to `from`.
    Rejected { from: u8 },
    /// Nothing was lifted.
    Ignored,
}

/// Owns the board and the move list of the current turn, and turns pointer
/// input into moves.
#[derive(Debug, Clone)]
pub struct TurnController {
    board: ChessBoard,
    moves: MoveList,
    state: TurnState,
}

impl TurnController {
    pub fn new(board: ChessBoard) -> Self {
        let mut controller = Self {
            board,
            moves: MoveList::new(),
            state: TurnState::WaitingForSelection,
        };
        controller.new_turn();
        controller
    }

    pub fn from_fen(fen: &str) -> FenResult<Self> {
        Ok(Self::new(ChessBoard::from_fen(fen)?))
    }

    pub fn board(&self) -> &ChessBoard {
        &self.board
    }

    pub fn moves(&self) -> &MoveList {
        &self.moves
    }

    pub fn state(&self) -> TurnState {
        self.state
    }

    pub fn active_color(&self) -> Color {
        self.board.active_color
    }

    /// True when a press on `square` would lift a piece. The renderer uses
    /// this for the hover cursor.
    pub fn is_selectable(&self, square: u8) -> bool {
        self.board.square(square).has_color(self.board.active_color)
    }

    fn new_turn(&mut self) {
        self.board.generate_pseudo_moves_into(&mut self.moves);
        debug!(side = %self.board.active_color, moves = self.moves.len(), "move list regenerated");
    }

    /// Lifts the piece on `square` if it belongs to the side to move.
    pub fn press(&mut self, square: u8) -> bool {
        if self.state != TurnState::WaitingForSelection || !self.is_selectable(square) {
            return false;
        }
        if let Square::Occupied(piece) = self.board.take(square) {
            debug!(square, ?piece, "piece lifted");
            self.state = TurnState::PieceLifted { from: square, piece };
            return true;
        }
        false
    }

    /// Drops the lifted piece on `target`. `None` stands for a release outside
    /// the board.
    pub fn release(&mut self, target: Option<u8>) -> ReleaseOutcome {
        let (from, piece) = match self.state {
            TurnState::PieceLifted { from, piece } => (from, piece),
            TurnState::WaitingForSelection => return ReleaseOutcome::Ignored,
        };
        self.state = TurnState::WaitingForSelection;

        // Put the piece back first so the move is applied from its origin
        self.board.set_square(from, Square::Occupied(piece));

        match target {
            Some(to) if self.moves.contains(from, to) => {
                let mv = Move::new(from, to);
                self.board.make_move(mv);
                debug!(%mv, "move applied");
                self.new_turn();
                ReleaseOutcome::Moved(mv)
            }
            _ => {
                debug!(from, ?target, "move rejected");
                ReleaseOutcome::Rejected { from }
            }
        }
    }

    /// Feeds one pointer event through the state machine. Only releases
    /// produce an outcome.
    pub fn handle_event(&mut self, event: PointerEvent) -> Option<ReleaseOutcome> {
        match event {
            PointerEvent::Press { x, y } => {
                if let Some(square) = square_from_coords(x, y) {
                    self.press(square);
                }
                None
            }
            // Dragging only moves the sprite
            PointerEvent::Drag { .. } => None,
            PointerEvent::Release { x, y } => Some(self.release(square_from_coords(x, y))),
        }
    }

    /// Drains one frame's worth of input.
    pub fn poll(&mut self, queue: &mut InputQueue) -> Vec<ReleaseOutcome> {
        let mut outcomes = Vec::new();
        while let Some(event) = queue.pop() {
            if let Some(outcome) = self.handle_event(event) {
                outcomes.push(outcome);
            }
        }
        outcomes
    }

    /// Press on `mv.from` and release on `mv.to`.
    pub fn play(&mut self, mv: Move) -> ReleaseOutcome {
        if !self.press(mv.from) {
            return ReleaseOutcome::Ignored;
        }
        self.release(Some(mv.to))
    }
}

#[cfg(test)]
mod tests {
    use super::super::input::square_center;
    use super::*;
    use crate::chess_board::fen::INITIAL_POSITION;
    use crate::chess_board::{square_from_algebraic, PieceType};

    fn sq(name: &str) -> u8 {
        square_from_algebraic(name).unwrap()
    }

    fn initial() -> TurnController {
        TurnController::from_fen(INITIAL_POSITION).unwrap()
    }

    #[test]
    fn test_starts_waiting_with_moves_for_white() {
        let controller = initial();
        assert_eq!(controller.state(), TurnState::WaitingForSelection);
        assert_eq!(controller.active_color(), Color::White);
        assert_eq!(controller.moves().len(), 20);
    }

    #[test]
    fn test_press_only_lifts_own_pieces() {
        let mut controller = initial();
        assert!(!controller.press(sq("e4")));
        assert!(!controller.press(sq("e7")));
        assert_eq!(controller.state(), TurnState::WaitingForSelection);

        assert!(controller.press(sq("e2")));
        assert_eq!(
            controller.state(),
            TurnState::PieceLifted {
                from: sq("e2"),
                piece: Piece::new(Color::White, PieceType::Pawn)
            }
        );
        assert!(controller.board().square(sq("e2")).is_empty());

        // A second press while lifted changes nothing
        assert!(!controller.press(sq("d2")));
        assert!(controller.board().piece_at(sq("d2")).is_some());
    }

    #[test]
    fn test_matched_release_applies_the_move() {
        let mut controller = initial();
        controller.press(sq("e2"));
        let outcome = controller.release(Some(sq("e4")));

        assert_eq!(outcome, ReleaseOutcome::Moved(Move::new(sq("e2"), sq("e4"))));
        assert_eq!(controller.state(), TurnState::WaitingForSelection);
        assert_eq!(controller.active_color(), Color::Black);
        assert_eq!(controller.board().piece_at(sq("e4")), Some(Piece::new(Color::White, PieceType::Pawn)));
        assert!(controller.board().square(sq("e2")).is_empty());

        // The list now belongs to black
        assert_eq!(controller.moves().len(), 20);
        assert!(controller
            .moves()
            .iter()
            .all(|m| controller.board().square(m.from).has_color(Color::Black)));
        assert_eq!(controller.moves().from_square(sq("e2")).count(), 0);
    }

    #[test]
    fn test_rejected_release_restores_the_board() {
        let mut controller = initial();
        let before = controller.board().clone();
        let moves_before = controller.moves().clone();

        controller.press(sq("e2"));
        assert_eq!(controller.release(Some(sq("e5"))), ReleaseOutcome::Rejected { from: sq("e2") });
        assert_eq!(controller.board(), &before);
        assert_eq!(controller.moves(), &moves_before);

        controller.press(sq("g1"));
        assert_eq!(controller.release(Some(sq("g1"))), ReleaseOutcome::Rejected { from: sq("g1") });
        assert_eq!(controller.board(), &before);

        controller.press(sq("b1"));
        assert_eq!(controller.release(None), ReleaseOutcome::Rejected { from: sq("b1") });
        assert_eq!(controller.board(), &before);
        assert_eq!(controller.active_color(), Color::White);
    }

    #[test]
    fn test_release_without_lift_is_ignored() {
        let mut controller = initial();
        assert_eq!(controller.release(Some(sq("e4"))), ReleaseOutcome::Ignored);
        assert_eq!(controller.active_color(), Color::White);
    }

    #[test]
    fn test_capture_through_controller() {
        let mut controller = TurnController::from_fen("8/8/8/3p4/4P3/8/8/8 w - - 0 1").unwrap();
        assert_eq!(controller.play(Move::new(sq("e4"), sq("d5"))), ReleaseOutcome::Moved(Move::new(sq("e4"), sq("d5"))));
        assert_eq!(controller.board().all_pieces_with_coordinates().count(), 1);
        assert!(controller.moves().is_empty());
    }

    #[test]
    fn test_pointer_events_drive_the_controller() {
        let mut controller = initial();
        let (x, y) = square_center(sq("g1"));
        assert_eq!(controller.handle_event(PointerEvent::Press { x, y }), None);
        assert_eq!(controller.handle_event(PointerEvent::Drag { x: 5, y: 5 }), None);
        assert!(controller.board().square(sq("g1")).is_empty());

        let (x, y) = square_center(sq("f3"));
        assert_eq!(
            controller.handle_event(PointerEvent::Release { x, y }),
            Some(ReleaseOutcome::Moved(Move::new(sq("g1"), sq("f3"))))
        );
    }

    #[test]
    fn test_poll_drains_the_queue_in_order() {
        let mut controller = initial();
        let mut queue = InputQueue::new();
        queue.drag_and_drop(sq("e2"), sq("e4"));
        queue.drag_and_drop(sq("e7"), sq("e5"));
        queue.drag_and_drop(sq("e4"), sq("e5"));

        let outcomes = controller.poll(&mut queue);
        assert!(queue.is_empty());
        assert_eq!(
            outcomes,
            vec![
                ReleaseOutcome::Moved(Move::new(sq("e2"), sq("e4"))),
                ReleaseOutcome::Moved(Move::new(sq("e7"), sq("e5"))),
                ReleaseOutcome::Rejected { from: sq("e4") },
            ]
        );
        assert_eq!(controller.active_color(), Color::White);
    }

    #[test]
    fn test_is_selectable_follows_side_to_move() {
        let mut controller = initial();
        assert!(controller.is_selectable(sq("e2")));
        assert!(!controller.is_selectable(sq("e7")));
        controller.play(Move::new(sq("e2"), sq("e4")));
        assert!(controller.is_selectable(sq("e7")));
        assert!(!controller.is_selectable(sq("e4")));
    }

    #[test]
    fn test_play_from_wrong_square_is_ignored() {
        let mut controller = initial();
        assert_eq!(controller.play(Move::new(sq("e7"), sq("e5"))), ReleaseOutcome::Ignored);
        assert_eq!(controller.state(), TurnState::WaitingForSelection);
    }
}
