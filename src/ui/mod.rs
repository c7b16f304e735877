//! Headless glue for a drag-and-drop board view: pixel mapping, pointer
//! input and the turn controller. Drawing is left to the caller.

pub mod input;
pub mod turn_controller;

pub use input::{square_from_coords, InputQueue, PointerEvent};
pub use turn_controller::{ReleaseOutcome, TurnController, TurnState};
