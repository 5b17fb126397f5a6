//! Core Sudoku engine.
//!
//! The engine is split into a static half and a dynamic half: [`Topology`]
//! precomputes the fixed geometry of the 9×9 grid (the 27 row/column/box
//! groups and each cell's 20-cell conflict set), and [`Solver`] runs a
//! recursive backtracking search over a working copy of the puzzle, always
//! branching on the digit/group with the fewest legal placements. A solve
//! can be aborted from another thread through a [`CancelToken`].

mod board;
mod cancel;
mod solver;
mod topology;

pub use board::{Board, Position};
pub use cancel::{CancelToken, Cancelled};
pub use solver::{SolveReport, Solver};
pub use topology::Topology;
