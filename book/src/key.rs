use anyhow::{anyhow, Result};
use othello::{Board, NUM_SYMMETRIES};

/// The book's identity for a position: the smallest of its up to eight symmetric images, compared by
/// mover bits and then opponent bits.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct CanonicalKey {
    player: u64,
    opponent: u64,
}

impl CanonicalKey {
    pub fn new(board: &Board) -> Self {
        Self::with_symmetry(board).0
    }

    /// The key together with the symmetry that carries `board` onto it.
    pub fn with_symmetry(board: &Board) -> (Self, usize) {
        (0..NUM_SYMMETRIES)
            .map(|symmetry| (Self::from_board(&board.transform(symmetry)), symmetry))
            .min()
            .expect("There is always the identity symmetry")
    }

    /// Rebuilds a key from stored bits, rejecting overlapping or non canonical bitboards.
    pub fn from_bits(player: u64, opponent: u64) -> Result<Self> {
        let board = Board::from_bits(player, opponent)?;
        let key = Self::from_board(&board);

        if Self::new(&board) != key {
            return Err(anyhow!(
                "Key {:#018x} {:#018x} is not in canonical form",
                player,
                opponent
            ));
        }

        Ok(key)
    }

    fn from_board(board: &Board) -> Self {
        Self {
            player: board.player(),
            opponent: board.opponent(),
        }
    }

    /// A board of the equivalence class, in the orientation of the key rather than the one first looked up.
    pub fn to_board(&self) -> Board {
        Board::from_bits(self.player, self.opponent).expect("Keys never hold overlapping bits")
    }

    pub fn player(&self) -> u64 {
        self.player
    }

    pub fn opponent(&self) -> u64 {
        self.opponent
    }

    pub fn empty_count(&self) -> usize {
        self.to_board().empty_count()
    }
}

impl From<&Board> for CanonicalKey {
    fn from(board: &Board) -> Self {
        Self::new(board)
    }
}
