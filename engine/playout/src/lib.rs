//! Monte Carlo playout evaluation for Ultimate Tic-Tac-Toe.
//!
//! Move selection runs a small pipeline of strategies: take an immediate
//! winning move when one exists, drop moves that hand the opponent an
//! immediate win, and score whatever remains by playing random games to
//! completion. Scoring clones the board per playout and fans the trial
//! budget out over rayon workers, each with its own deterministically
//! derived rng, so a fixed budget with a fixed seed reproduces exactly.

pub mod config;
pub mod search;
pub mod simulate;
pub mod strategy;

pub use config::{PlayoutConfig, TrialAllocation, TrialBudget};
pub use search::{choose_move, CandidateScore, Decision, SearchError};
pub use simulate::simulate_playout;
pub use strategy::{non_losing_moves, winning_move, Strategy};
