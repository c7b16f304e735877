//! Pointer input as reported by the rendering layer, and the mapping between
//! window pixels and board squares.

use circular_buffer::CircularBuffer;

/// Edge length of one rendered square in pixels.
pub const CELL_SIZE: i32 = 75;
pub const BOARD_PIXELS: i32 = CELL_SIZE * 8;
pub const INPUT_QUEUE_CAPACITY: usize = 32;

/// Maps a window coordinate to a square. Row 0 is the top of the rendered
/// board, so index 0 is a8 just like in the position loader.
pub fn square_from_coords(x: i32, y: i32) -> Option<u8> {
    if !(0..BOARD_PIXELS).contains(&x) || !(0..BOARD_PIXELS).contains(&y) {
        return None;
    }
    let file = x / CELL_SIZE;
    let row = y / CELL_SIZE;
    Some((row * 8 + file) as u8)
}

/// Top-left pixel of a square.
pub fn square_origin(square: u8) -> (i32, i32) {
    let file = (square % 8) as i32;
    let row = (square / 8) as i32;
    (file * CELL_SIZE, row * CELL_SIZE)
}

pub fn square_center(square: u8) -> (i32, i32) {
    let (x, y) = square_origin(square);
    (x + CELL_SIZE / 2, y + CELL_SIZE / 2)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEvent {
    Press { x: i32, y: i32 },
    Drag { x: i32, y: i32 },
    Release { x: i32, y: i32 },
}

/// Events collected between two frames. When full the oldest event is dropped.
pub struct InputQueue {
    events: CircularBuffer<INPUT_QUEUE_CAPACITY, PointerEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self { events: CircularBuffer::new() }
    }

    pub fn push(&mut self, event: PointerEvent) {
        self.events.push_back(event);
    }

    pub fn pop(&mut self) -> Option<PointerEvent> {
        self.events.pop_front()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Queues the press/drag/release sequence of dragging a piece between the
    /// centres of two squares.
    pub fn drag_and_drop(&mut self, from: u8, to: u8) {
        let (fx, fy) = square_center(from);
        let (tx, ty) = square_center(to);
        self.push(PointerEvent::Press { x: fx, y: fy });
        self.push(PointerEvent::Drag { x: tx, y: ty });
        self.push(PointerEvent::Release { x: tx, y: ty });
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}
