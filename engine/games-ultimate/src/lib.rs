//! Ultimate Tic-Tac-Toe rules.
//!
//! A 3×3 grid of 3×3 sub-boards played on 81 cells. Each move's position
//! within its sub-board selects the sub-board the opponent must answer in;
//! a decided target frees the opponent to play in any undecided sub-board.
//! Winning three sub-boards in a line wins the game, and a game where all
//! nine sub-boards finish without a line falls to whoever won more of them.
//!
//! The crate provides the full state machine — [`Board`], [`Move`],
//! [`LegalMoves`] — and nothing about how to pick a move; evaluation lives
//! in a separate crate built on top of this one.

mod board;
mod moves;

pub use board::{majority_outcome, winning_line, Board, Cell, Outcome, Player};
pub use moves::{LegalMoves, Move, MoveError, NUM_CELLS, NUM_SUB_BOARDS};
