use std::fmt::{self, Display, Formatter};

use anyhow::{anyhow, Result};
use common::bits::bit_indices;

use super::constants::{BOARD_WIDTH, CENTI_DISKS_PER_DISK, NUM_SQUARES};
use super::symmetries::transform_bits;
use super::Square;

// d5 and e4 for the side to move, d4 and e5 for the opponent.
const INITIAL_PLAYER: u64 = (1 << 35) | (1 << 28);
const INITIAL_OPPONENT: u64 = (1 << 27) | (1 << 36);

/// A position seen from the side to move: `player` holds the mover's disks and `opponent` the others.
///
/// Boards are immutable values, every move returns a new board with the sides swapped.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct Board {
    player: u64,
    opponent: u64,
}

impl Board {
    pub fn initial() -> Self {
        Self {
            player: INITIAL_PLAYER,
            opponent: INITIAL_OPPONENT,
        }
    }

    pub fn from_bits(player: u64, opponent: u64) -> Result<Self> {
        if player & opponent != 0 {
            return Err(anyhow!(
                "Player {:#018x} and opponent {:#018x} share squares",
                player,
                opponent
            ));
        }

        Ok(Self { player, opponent })
    }

    pub fn player(&self) -> u64 {
        self.player
    }

    pub fn opponent(&self) -> u64 {
        self.opponent
    }

    pub fn occupied(&self) -> u64 {
        self.player | self.opponent
    }

    pub fn empty(&self) -> u64 {
        !self.occupied()
    }

    pub fn empty_count(&self) -> usize {
        NUM_SQUARES - self.occupied().count_ones() as usize
    }

    /// Bitboard of every square the mover may play.
    pub fn legal_moves(&self) -> u64 {
        moves_for(self.player, self.opponent)
    }

    pub fn legal_squares(&self) -> impl Iterator<Item = Square> {
        bit_indices(self.legal_moves()).map(Square::from_index)
    }

    pub fn is_legal(&self, square: Square) -> bool {
        self.legal_moves() & square.bit() != 0
    }

    pub fn has_moves(&self) -> bool {
        self.legal_moves() != 0
    }

    /// True when neither side has a move left.
    pub fn is_game_over(&self) -> bool {
        !self.has_moves() && moves_for(self.opponent, self.player) == 0
    }

    /// Opponent disks turned over by the mover playing `square`. Zero when the move is not legal.
    pub fn flips(&self, square: Square) -> u64 {
        let (player, opponent) = (self.player, self.opponent);

        if self.occupied() & square.bit() != 0 {
            return 0;
        }

        let mut flipped = 0;

        for shift in DIRECTIONS {
            let mut line = 0;
            let mut cursor = shift(square.bit());

            while cursor & opponent != 0 {
                line |= cursor;
                cursor = shift(cursor);
            }

            if cursor & player != 0 {
                flipped |= line;
            }
        }

        flipped
    }

    /// Plays a legal move for the side to move and hands the turn over.
    pub fn play(&self, square: Square) -> Self {
        let flipped = self.flips(square);
        debug_assert!(flipped != 0, "{} is not a legal move\n{}", square, self);

        Self {
            player: self.opponent & !flipped,
            opponent: self.player | flipped | square.bit(),
        }
    }

    pub fn pass(&self) -> Self {
        Self {
            player: self.opponent,
            opponent: self.player,
        }
    }

    /// Disk differential from the mover's point of view, empty squares are not counted.
    pub fn final_score(&self) -> i32 {
        self.player.count_ones() as i32 - self.opponent.count_ones() as i32
    }

    pub fn final_score_centi_disks(&self) -> i32 {
        self.final_score() * CENTI_DISKS_PER_DISK
    }

    pub fn transform(&self, symmetry: usize) -> Self {
        Self {
            player: transform_bits(self.player, symmetry),
            opponent: transform_bits(self.opponent, symmetry),
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::initial()
    }
}

const DIRECTIONS: [fn(u64) -> u64; 8] = [
    |b| shift_north!(b),
    |b| shift_south!(b),
    |b| shift_east!(b),
    |b| shift_west!(b),
    |b| shift_north_east!(b),
    |b| shift_north_west!(b),
    |b| shift_south_east!(b),
    |b| shift_south_west!(b),
];

fn moves_for(player: u64, opponent: u64) -> u64 {
    let empty = !(player | opponent);
    let mut moves = 0;

    for shift in DIRECTIONS {
        // A run of opponent disks is at most six long.
        let mut run = shift(player) & opponent;
        for _ in 0..5 {
            run |= shift(run) & opponent;
        }

        moves |= shift(run) & empty;
    }

    moves
}

impl Display for Board {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "   a b c d e f g h")?;

        for row in 0..BOARD_WIDTH {
            write!(f, " {}", row + 1)?;
            for col in 0..BOARD_WIDTH {
                let bit = Square::from_col_row(col, row).bit();
                let c = if self.player & bit != 0 {
                    'X'
                } else if self.opponent & bit != 0 {
                    'O'
                } else {
                    '.'
                };
                write!(f, " {}", c)?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}
