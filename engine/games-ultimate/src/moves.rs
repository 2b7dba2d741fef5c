//! Move indexing and legal-move sets.
//!
//! A move addresses one of the 81 cells of the full grid by a flat index.
//! The index decomposes with fixed-radix arithmetic: `row = index / 9`,
//! `col = index % 9`; the meta coordinates are `row / 3`, `col / 3` and the
//! inner (within-sub-board) coordinates are `row % 3`, `col % 3`.

use thiserror::Error;

use rand::Rng;

/// Number of cells on the full grid (and the exclusive upper bound for moves).
pub const NUM_CELLS: usize = 81;

/// Number of sub-boards (also the number of cells per sub-board).
pub const NUM_SUB_BOARDS: usize = 9;

/// Errors raised when a move cannot be constructed or applied.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum MoveError {
    #[error("move index {index} is out of range (must be < 81)")]
    OutOfRange { index: u8 },

    #[error("cell {mov} is already occupied")]
    Occupied { mov: Move },

    #[error("sub-board {sub} of move {mov} is already decided")]
    SubBoardDecided { mov: Move, sub: u8 },

    #[error("move {mov} is outside the active sub-board {active}")]
    WrongSubBoard { mov: Move, active: u8 },
}

/// A validated cell address on the full 9×9 grid.
///
/// Ordered by flat index, which gives evaluation a deterministic tie-break.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Move(u8);

impl Move {
    /// Validate a flat index in `[0, 81)`.
    pub fn new(index: u8) -> Result<Self, MoveError> {
        if (index as usize) < NUM_CELLS {
            Ok(Self(index))
        } else {
            Err(MoveError::OutOfRange { index })
        }
    }

    /// Build a move from a sub-board index and a cell index within it,
    /// both in `[0, 9)`.
    pub fn from_parts(sub: u8, cell: u8) -> Result<Self, MoveError> {
        if sub as usize >= NUM_SUB_BOARDS || cell as usize >= NUM_SUB_BOARDS {
            return Err(MoveError::OutOfRange {
                index: sub.saturating_mul(9).saturating_add(cell),
            });
        }
        let row = (sub / 3) * 3 + cell / 3;
        let col = (sub % 3) * 3 + cell % 3;
        Ok(Self(row * 9 + col))
    }

    // Internal constructor for indices already known to be in range.
    pub(crate) fn from_index_unchecked(index: u8) -> Self {
        debug_assert!((index as usize) < NUM_CELLS);
        Self(index)
    }

    /// Flat index in `[0, 81)`.
    #[inline]
    pub const fn index(self) -> u8 {
        self.0
    }

    /// Grid row in `[0, 9)`.
    #[inline]
    pub const fn row(self) -> u8 {
        self.0 / 9
    }

    /// Grid column in `[0, 9)`.
    #[inline]
    pub const fn col(self) -> u8 {
        self.0 % 9
    }

    /// Index of the sub-board this move lands in.
    #[inline]
    pub const fn sub_board(self) -> u8 {
        (self.row() / 3) * 3 + self.col() / 3
    }

    /// Index of the cell within its sub-board.
    #[inline]
    pub const fn cell(self) -> u8 {
        (self.row() % 3) * 3 + self.col() % 3
    }

    /// The sub-board the *next* player is sent to.
    ///
    /// This is the game's defining rule: the inner coordinates of a move
    /// address the sub-board the opponent must play in, which makes the
    /// next active sub-board equal to this move's within-sub-board cell
    /// index.
    #[inline]
    pub const fn next_sub_board(self) -> u8 {
        self.cell()
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The set of playable cells for one position, backed by an 81-entry
/// boolean mask.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegalMoves {
    playable: [bool; NUM_CELLS],
}

impl LegalMoves {
    pub(crate) fn from_mask(playable: [bool; NUM_CELLS]) -> Self {
        Self { playable }
    }

    /// The raw 81-entry mask, indexed by flat move index.
    pub fn mask(&self) -> &[bool; NUM_CELLS] {
        &self.playable
    }

    /// Whether the given move is playable.
    #[inline]
    pub fn contains(&self, mov: Move) -> bool {
        self.playable[mov.index() as usize]
    }

    /// Number of playable cells.
    pub fn count(&self) -> usize {
        self.playable.iter().filter(|&&p| p).count()
    }

    /// True when the position has no playable cell (a terminal game state,
    /// not an error).
    pub fn is_empty(&self) -> bool {
        !self.playable.iter().any(|&p| p)
    }

    /// Playable moves in ascending index order.
    pub fn iter(&self) -> impl Iterator<Item = Move> + '_ {
        self.playable
            .iter()
            .enumerate()
            .filter(|(_, &p)| p)
            .map(|(idx, _)| Move::from_index_unchecked(idx as u8))
    }

    /// The n-th playable move in ascending index order.
    pub fn nth(&self, n: usize) -> Option<Move> {
        self.iter().nth(n)
    }

    /// Pick a playable move uniformly at random, or `None` when empty.
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Move> {
        let count = self.count();
        if count == 0 {
            return None;
        }
        self.nth(rng.gen_range(0..count))
    }

    /// Collect the playable moves in ascending index order.
    pub fn to_vec(&self) -> Vec<Move> {
        self.iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_decomposition() {
        // move 0: top-left cell of the top-left sub-board
        let m = Move::new(0).unwrap();
        assert_eq!((m.row(), m.col()), (0, 0));
        assert_eq!(m.sub_board(), 0);
        assert_eq!(m.cell(), 0);

        // move 10: row 1, col 1 -> sub-board 0, cell (1,1) = 4
        let m = Move::new(10).unwrap();
        assert_eq!((m.row(), m.col()), (1, 1));
        assert_eq!(m.sub_board(), 0);
        assert_eq!(m.cell(), 4);

        // move 80: bottom-right everything
        let m = Move::new(80).unwrap();
        assert_eq!((m.row(), m.col()), (8, 8));
        assert_eq!(m.sub_board(), 8);
        assert_eq!(m.cell(), 8);
    }

    #[test]
    fn next_sub_board_follows_inner_coordinates() {
        // After move 0 (inner (0,0)) the opponent is sent to sub-board 0.
        assert_eq!(Move::new(0).unwrap().next_sub_board(), 0);
        // After move 10 (inner (1,1)) the opponent is sent to sub-board 4.
        assert_eq!(Move::new(10).unwrap().next_sub_board(), 4);
    }

    #[test]
    fn out_of_range_rejected() {
        for index in [81, 100, 255] {
            assert_eq!(Move::new(index), Err(MoveError::OutOfRange { index }));
        }
    }

    #[test]
    fn from_parts_roundtrip() {
        for sub in 0..9u8 {
            for cell in 0..9u8 {
                let m = Move::from_parts(sub, cell).unwrap();
                assert_eq!(m.sub_board(), sub);
                assert_eq!(m.cell(), cell);
            }
        }
        assert!(Move::from_parts(9, 0).is_err());
        assert!(Move::from_parts(0, 9).is_err());
    }

    #[test]
    fn from_parts_matches_flat_decomposition() {
        for index in 0..NUM_CELLS as u8 {
            let m = Move::new(index).unwrap();
            let rebuilt = Move::from_parts(m.sub_board(), m.cell()).unwrap();
            assert_eq!(rebuilt, m);
        }
    }

    #[test]
    fn legal_moves_iteration_is_ascending() {
        let mut mask = [false; NUM_CELLS];
        mask[7] = true;
        mask[3] = true;
        mask[80] = true;
        let legal = LegalMoves::from_mask(mask);

        let indices: Vec<u8> = legal.iter().map(Move::index).collect();
        assert_eq!(indices, vec![3, 7, 80]);
        assert_eq!(legal.count(), 3);
        assert!(!legal.is_empty());
        assert_eq!(legal.nth(1).map(Move::index), Some(7));
        assert_eq!(legal.nth(3), None);
    }

    #[test]
    fn choose_only_returns_members() {
        use rand::SeedableRng;
        let mut mask = [false; NUM_CELLS];
        mask[5] = true;
        mask[40] = true;
        let legal = LegalMoves::from_mask(mask);

        let mut rng = rand_chacha::ChaCha20Rng::seed_from_u64(42);
        for _ in 0..100 {
            let m = legal.choose(&mut rng).unwrap();
            assert!(legal.contains(m));
        }

        let empty = LegalMoves::from_mask([false; NUM_CELLS]);
        assert!(empty.choose(&mut rng).is_none());
    }
}
