//! Monte Carlo move evaluation.
//!
//! Scores each candidate move by playing many games to completion with
//! uniformly random moves and averaging the results from the evaluating
//! player's perspective. Playouts share no state, so the trial budget is
//! fanned out over worker threads and the per-candidate tallies are merged
//! by summation at the end.

use std::time::Instant;

use games_ultimate::{Board, LegalMoves, Move, MoveError, Outcome, Player};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use rayon::prelude::*;
use thiserror::Error;
use tracing::{debug, trace};

use crate::config::{PlayoutConfig, TrialAllocation, TrialBudget};
use crate::simulate::simulate_playout;
use crate::strategy::{non_losing_moves, winning_move, Strategy};

/// Errors that can occur during move evaluation.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The caller passed an empty candidate set.
    #[error("no candidate moves to evaluate")]
    EmptyCandidateSet,

    /// A rule violation surfaced while simulating, which means the caller's
    /// board and candidate set disagree.
    #[error("illegal move during evaluation: {0}")]
    Move(#[from] MoveError),
}

/// Accumulated result for one candidate move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateScore {
    pub mov: Move,
    /// Sum of +1 per won playout, -1 per lost playout, 0 per draw.
    pub score: i64,
    /// Playouts spent on this candidate.
    pub trials: u32,
}

/// Outcome of one evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    /// The selected move.
    pub mov: Move,

    /// The selected move's accumulated score.
    pub score: i64,

    /// Total playouts performed.
    pub trials: u32,

    /// Per-candidate tallies, in ascending move order. A decision made by
    /// lookahead alone carries the single chosen candidate with no trials.
    pub candidates: Vec<CandidateScore>,
}

/// Pick a move for `player` from `legal` on `board`.
///
/// Runs the configured strategy pipeline in order: an immediate winning
/// move short-circuits everything, the non-losing filter narrows the
/// candidate set, and random-playout scoring decides among whatever
/// remains. An empty candidate set is a contract violation and fails with
/// [`SearchError::EmptyCandidateSet`]. The board is never mutated.
///
/// With [`TrialBudget::Fixed`] the result is fully determined by the
/// state of `rng`, regardless of worker count.
pub fn choose_move(
    board: &Board,
    legal: &LegalMoves,
    player: Player,
    config: &PlayoutConfig,
    rng: &mut ChaCha20Rng,
) -> Result<Decision, SearchError> {
    let mut candidates = legal.to_vec();
    if candidates.is_empty() {
        return Err(SearchError::EmptyCandidateSet);
    }

    for stage in &config.strategies {
        match stage {
            Strategy::WinningMoveLookahead => {
                if let Some(mov) = winning_move(board, &candidates, player) {
                    debug!(%mov, %player, "immediate winning move");
                    return Ok(Decision {
                        mov,
                        score: 0,
                        trials: 0,
                        candidates: vec![CandidateScore {
                            mov,
                            score: 0,
                            trials: 0,
                        }],
                    });
                }
            }
            Strategy::NonLosingFilter => {
                let safe = non_losing_moves(board, &candidates, player);
                if safe.is_empty() {
                    trace!("every candidate loses on the spot, keeping the full set");
                } else {
                    trace!(
                        kept = safe.len(),
                        dropped = candidates.len() - safe.len(),
                        "non-losing filter applied"
                    );
                    candidates = safe;
                }
            }
            Strategy::RandomPlayout => {
                return score_candidates(board, &candidates, player, config, rng);
            }
        }
    }

    // no scoring stage configured, fall back to the lowest index
    let mov = candidates[0];
    Ok(Decision {
        mov,
        score: 0,
        trials: 0,
        candidates: candidates
            .into_iter()
            .map(|mov| CandidateScore {
                mov,
                score: 0,
                trials: 0,
            })
            .collect(),
    })
}

/// One worker's share of the trial budget.
#[derive(Debug, Clone, Copy)]
struct WorkerPlan {
    seed: u64,
    /// Global index of the worker's first trial; keeps round-robin
    /// allocation exact across workers for fixed budgets.
    first_trial: u32,
    /// `None` means run until the deadline.
    count: Option<u32>,
}

#[derive(Debug)]
struct Tally {
    scores: Vec<i64>,
    trials: Vec<u32>,
}

impl Tally {
    fn zeroed(len: usize) -> Self {
        Self {
            scores: vec![0; len],
            trials: vec![0; len],
        }
    }

    fn merge(mut self, other: Tally) -> Self {
        for (a, b) in self.scores.iter_mut().zip(&other.scores) {
            *a += *b;
        }
        for (a, b) in self.trials.iter_mut().zip(&other.trials) {
            *a += *b;
        }
        self
    }
}

fn score_candidates(
    board: &Board,
    candidates: &[Move],
    player: Player,
    config: &PlayoutConfig,
    rng: &mut ChaCha20Rng,
) -> Result<Decision, SearchError> {
    let workers = config.workers.max(1) as u32;
    let deadline = match config.budget {
        TrialBudget::Timeout(limit) => Some(Instant::now() + limit),
        TrialBudget::Fixed(_) => None,
    };

    // Worker seeds are drawn from the caller's rng up front, so the whole
    // evaluation depends only on its state at the call site.
    let plans: Vec<WorkerPlan> = match config.budget {
        TrialBudget::Fixed(total) => {
            let base = total / workers;
            let extra = total % workers;
            let mut start = 0u32;
            (0..workers)
                .map(|w| {
                    let count = base + u32::from(w < extra);
                    let plan = WorkerPlan {
                        seed: rng.gen(),
                        first_trial: start,
                        count: Some(count),
                    };
                    start += count;
                    plan
                })
                .collect()
        }
        TrialBudget::Timeout(_) => (0..workers)
            .map(|w| WorkerPlan {
                seed: rng.gen(),
                first_trial: w,
                count: None,
            })
            .collect(),
    };

    let allocation = config.allocation;
    let tally = plans
        .into_par_iter()
        .map(|plan| run_worker(board, candidates, player, allocation, plan, deadline))
        .try_reduce(
            || Tally::zeroed(candidates.len()),
            |a, b| Ok(a.merge(b)),
        )?;

    // candidates are in ascending move order, so the first maximum is the
    // lowest-index tie-break
    let mut best = 0;
    for (i, &score) in tally.scores.iter().enumerate().skip(1) {
        if score > tally.scores[best] {
            best = i;
        }
    }

    let trials: u32 = tally.trials.iter().sum();
    debug!(
        mov = %candidates[best],
        score = tally.scores[best],
        trials,
        workers,
        "playout evaluation complete"
    );

    Ok(Decision {
        mov: candidates[best],
        score: tally.scores[best],
        trials,
        candidates: candidates
            .iter()
            .zip(tally.scores.iter().zip(&tally.trials))
            .map(|(&mov, (&score, &trials))| CandidateScore { mov, score, trials })
            .collect(),
    })
}

fn run_worker(
    board: &Board,
    candidates: &[Move],
    player: Player,
    allocation: TrialAllocation,
    plan: WorkerPlan,
    deadline: Option<Instant>,
) -> Result<Tally, SearchError> {
    let k = candidates.len();
    let mut rng = ChaCha20Rng::seed_from_u64(plan.seed);
    let mut tally = Tally::zeroed(k);

    let mut t = 0u32;
    loop {
        match plan.count {
            Some(count) if t >= count => break,
            Some(_) => {}
            // deadline checks happen between playouts only
            None => match deadline {
                Some(d) if Instant::now() < d => {}
                _ => break,
            },
        }

        let slot = match allocation {
            TrialAllocation::EvenSplit => {
                ((plan.first_trial as u64 + t as u64) % k as u64) as usize
            }
            TrialAllocation::RandomDraw => rng.gen_range(0..k),
        };

        let outcome = simulate_playout(*board, candidates[slot], player, &mut rng)?;
        tally.scores[slot] += match outcome {
            Outcome::Won(winner) if winner == player => 1,
            Outcome::Won(_) => -1,
            _ => 0,
        };
        tally.trials[slot] += 1;
        t += 1;
    }
    Ok(tally)
}
