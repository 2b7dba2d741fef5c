//! Random playout of a game to completion.

use games_ultimate::{Board, Move, MoveError, Outcome, Player};
use rand::Rng;

/// Play a game to completion from `board`, starting with `mover` placing
/// `first`, then alternating uniformly random legal moves.
///
/// The board is taken by value; the caller's position is never touched.
/// Always terminates within 81 applied moves and never returns
/// [`Outcome::InProgress`]: either a player completes a meta line, or the
/// legal moves run out and the majority of won sub-boards decides.
pub fn simulate_playout<R: Rng + ?Sized>(
    mut board: Board,
    first: Move,
    mut mover: Player,
    rng: &mut R,
) -> Result<Outcome, MoveError> {
    let mut pending = first;
    loop {
        board.apply_move(pending, mover)?;
        if board.has_won(mover) {
            return Ok(Outcome::Won(mover));
        }

        let legal = board.legal_moves(Some(pending));
        let Some(next) = legal.choose(rng) else {
            // every sub-board is decided, so this is the majority result
            return Ok(board.game_result());
        };
        pending = next;
        mover = mover.other();
    }
}
