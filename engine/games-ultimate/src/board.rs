//! Board state, move application, and win/draw detection.
//!
//! Cells are stored per sub-board, so a move's `(sub_board, cell)`
//! decomposition addresses storage directly. Win detection is implemented
//! once over a 9-cell view and applied at both levels: a sub-board's cells
//! and the meta-board of sub-board outcomes are checked by the same
//! function.

use crate::moves::{LegalMoves, Move, MoveError, NUM_CELLS, NUM_SUB_BOARDS};

/// One of the two players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    X,
    O,
}

impl Player {
    /// The opposing player.
    #[inline]
    pub const fn other(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Player::X => write!(f, "X"),
            Player::O => write!(f, "O"),
        }
    }
}

/// Occupancy of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Occupied(Player),
}

impl Cell {
    #[inline]
    pub const fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// The occupying player, if any.
    #[inline]
    pub const fn owner(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::Occupied(p) => Some(p),
        }
    }
}

/// Result of a 9-cell board, used for sub-boards and the whole game alike.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Outcome {
    #[default]
    InProgress,
    Won(Player),
    Draw,
}

impl Outcome {
    /// Whether the board has reached a final result.
    #[inline]
    pub const fn is_decided(self) -> bool {
        !matches!(self, Outcome::InProgress)
    }

    /// The winning player, if decided by a win.
    #[inline]
    pub const fn winner(self) -> Option<Player> {
        match self {
            Outcome::Won(p) => Some(p),
            _ => None,
        }
    }
}

/// The 8 winning lines of a 3×3 board (rows, columns, diagonals).
const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8], // rows
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8], // columns
    [0, 4, 8],
    [2, 4, 6], // diagonals
];

/// Check whether `player` owns a full row, column, or diagonal of a 9-cell
/// view. Works for a sub-board's cells and for the meta-board of sub-board
/// winners alike.
pub fn winning_line(view: &[Option<Player>; 9], player: Player) -> bool {
    LINES
        .iter()
        .any(|line| line.iter().all(|&i| view[i] == Some(player)))
}

/// Tie-break for a fully decided board with no winning line: the player
/// owning strictly more units wins, equal counts are a draw.
pub fn majority_outcome(view: &[Option<Player>; 9]) -> Outcome {
    let x = view.iter().filter(|&&c| c == Some(Player::X)).count();
    let o = view.iter().filter(|&&c| c == Some(Player::O)).count();
    match x.cmp(&o) {
        std::cmp::Ordering::Greater => Outcome::Won(Player::X),
        std::cmp::Ordering::Less => Outcome::Won(Player::O),
        std::cmp::Ordering::Equal => Outcome::Draw,
    }
}

/// Full game state: 81 cells grouped by sub-board plus the 9 sub-board
/// outcomes.
///
/// The type is a plain value; evaluation clones it freely and never mutates
/// the caller's copy. Invariant: once a sub-board's outcome is decided, its
/// outcome and its cells never change again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Board {
    cells: [[Cell; NUM_SUB_BOARDS]; NUM_SUB_BOARDS],
    sub_outcomes: [Outcome; NUM_SUB_BOARDS],
}

impl Board {
    /// An empty board: all cells empty, all sub-boards in progress.
    pub fn new() -> Self {
        Self::default()
    }

    /// Occupancy of the cell addressed by `mov`.
    #[inline]
    pub fn cell(&self, mov: Move) -> Cell {
        self.cells[mov.sub_board() as usize][mov.cell() as usize]
    }

    /// Outcome of one sub-board.
    #[inline]
    pub fn sub_outcome(&self, sub: u8) -> Outcome {
        self.sub_outcomes[sub as usize]
    }

    /// The 9 sub-board outcomes, indexed by sub-board.
    pub fn sub_outcomes(&self) -> &[Outcome; NUM_SUB_BOARDS] {
        &self.sub_outcomes
    }

    fn sub_view(&self, sub: usize) -> [Option<Player>; 9] {
        let mut view = [None; 9];
        for (i, cell) in self.cells[sub].iter().enumerate() {
            view[i] = cell.owner();
        }
        view
    }

    fn meta_view(&self) -> [Option<Player>; 9] {
        let mut view = [None; 9];
        for (i, outcome) in self.sub_outcomes.iter().enumerate() {
            view[i] = outcome.winner();
        }
        view
    }

    /// Whether `player` has completed a line across the meta-board.
    pub fn has_won(&self, player: Player) -> bool {
        winning_line(&self.meta_view(), player)
    }

    /// Playable cells given the previous move (`None` at game start).
    ///
    /// A cell is playable iff it is empty, its own sub-board is undecided,
    /// and it lies in the active sub-board — unless the active sub-board is
    /// already decided (or there is no previous move), which frees the
    /// player to play in any undecided sub-board. Only the immediately
    /// preceding move is ever consulted.
    pub fn legal_moves(&self, last: Option<Move>) -> LegalMoves {
        let active = last.map(Move::next_sub_board);
        let anywhere = match active {
            None => true,
            Some(sub) => self.sub_outcomes[sub as usize].is_decided(),
        };

        let mut playable = [false; NUM_CELLS];
        for (index, slot) in playable.iter_mut().enumerate() {
            let mov = Move::from_index_unchecked(index as u8);
            let sub = mov.sub_board();
            if self.sub_outcomes[sub as usize].is_decided() {
                continue;
            }
            if !self.cell(mov).is_empty() {
                continue;
            }
            *slot = anywhere || active == Some(sub);
        }
        LegalMoves::from_mask(playable)
    }

    /// Write `player` into the cell addressed by `mov` and update that
    /// sub-board's outcome.
    ///
    /// Rejects occupied cells and decided sub-boards. Only the sub-board
    /// the move lands in is re-evaluated; other sub-boards and the
    /// meta-board are untouched. Callers that have not already consulted
    /// [`Board::legal_moves`] should use [`Board::play`], which also
    /// enforces the active-sub-board rule.
    pub fn apply_move(&mut self, mov: Move, player: Player) -> Result<(), MoveError> {
        let sub = mov.sub_board() as usize;
        let cell = mov.cell() as usize;

        if self.sub_outcomes[sub].is_decided() {
            return Err(MoveError::SubBoardDecided {
                mov,
                sub: sub as u8,
            });
        }
        if !self.cells[sub][cell].is_empty() {
            return Err(MoveError::Occupied { mov });
        }

        self.cells[sub][cell] = Cell::Occupied(player);

        let view = self.sub_view(sub);
        if winning_line(&view, player) {
            self.sub_outcomes[sub] = Outcome::Won(player);
        } else if self.cells[sub].iter().all(|c| !c.is_empty()) {
            self.sub_outcomes[sub] = Outcome::Draw;
        }
        Ok(())
    }

    /// Fully validated move application: additionally rejects moves outside
    /// the active sub-board implied by `last`.
    pub fn play(&mut self, mov: Move, player: Player, last: Option<Move>) -> Result<(), MoveError> {
        if let Some(last) = last {
            let active = last.next_sub_board();
            if mov.sub_board() != active && !self.sub_outcomes[active as usize].is_decided() {
                return Err(MoveError::WrongSubBoard { mov, active });
            }
        }
        self.apply_move(mov, player)
    }

    /// Whole-game result.
    ///
    /// A meta-board line wins outright. When all 9 sub-boards are decided
    /// without a line, the majority of won sub-boards decides (equal counts
    /// are a draw). Otherwise the game is still in progress.
    pub fn game_result(&self) -> Outcome {
        let meta = self.meta_view();
        for player in [Player::X, Player::O] {
            if winning_line(&meta, player) {
                return Outcome::Won(player);
            }
        }
        if self.sub_outcomes.iter().all(|o| o.is_decided()) {
            majority_outcome(&meta)
        } else {
            Outcome::InProgress
        }
    }

    /// Whether the game has reached a final result.
    pub fn is_game_over(&self) -> bool {
        self.game_result().is_decided()
    }
}
