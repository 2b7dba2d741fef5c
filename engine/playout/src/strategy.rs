//! Decision stages tried before and around random-playout scoring.

use games_ultimate::{Board, Move, Player};
use serde::Deserialize;

/// One stage of the move-selection pipeline.
///
/// Stages run in the configured order. A stage either decides the move
/// outright, narrows the candidate set for later stages, or scores the
/// remaining candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Take a move that immediately completes a meta line, if one exists.
    WinningMoveLookahead,

    /// Drop candidates that let the opponent complete a meta line on the
    /// very next move. Falls back to the full set when nothing survives.
    NonLosingFilter,

    /// Score the remaining candidates with random playouts.
    RandomPlayout,
}

/// The lowest-indexed candidate that wins the game outright, if any.
pub fn winning_move(board: &Board, candidates: &[Move], player: Player) -> Option<Move> {
    candidates.iter().copied().find(|&mov| {
        let mut next = *board;
        next.apply_move(mov, player).is_ok() && next.has_won(player)
    })
}

/// Candidates that do not hand the opponent an immediate meta win.
///
/// May return an empty vector when every candidate loses on the spot; the
/// caller decides what to do then.
pub fn non_losing_moves(board: &Board, candidates: &[Move], player: Player) -> Vec<Move> {
    let opponent = player.other();
    candidates
        .iter()
        .copied()
        .filter(|&mov| {
            let mut next = *board;
            if next.apply_move(mov, player).is_err() {
                return false;
            }
            if next.game_result().is_decided() {
                // the move ends the game itself, the opponent never replies
                return true;
            }
            let replies = next.legal_moves(Some(mov));
            winning_move(&next, &replies.to_vec(), opponent).is_none()
        })
        .collect()
}
