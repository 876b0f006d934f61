use anyhow::{anyhow, bail, Result};
use common::bits::bit_indices;
use othello::{eval, solve, Board, Square, CENTI_DISKS_PER_DISK};

use super::{BookOptions, MoveScore};

/// Supplies the scores the book merges. Implementations decide how deep and how exact they are, the book
/// only calls them.
pub trait ScoringStrategy {
    /// The final value of a position at or below `solve_depth` empties, with the move that achieves it.
    fn solve(&self, board: &Board) -> Result<MoveScore>;

    /// Estimates the best of the `unplayed` moves of `board`. Must return one of them.
    fn calc_deviation(&self, board: &Board, unplayed: u64) -> Result<MoveScore>;

    /// The empty count at or below which `solve` is used instead of merging.
    fn solve_depth(&self) -> usize;
}

/// Exact endgame solving below the solve depth and one ply static evaluation for deviations, less a
/// penalty for leaving the book.
#[derive(Clone, Debug)]
pub struct HeuristicStrategy {
    solve_depth: usize,
    deviation_penalty: i32,
}

impl HeuristicStrategy {
    pub fn new(solve_depth: usize, deviation_penalty: i32) -> Self {
        Self {
            solve_depth,
            deviation_penalty,
        }
    }

    pub fn from_options(options: &BookOptions) -> Self {
        Self::new(options.solve_depth, options.deviation_penalty)
    }
}

impl ScoringStrategy for HeuristicStrategy {
    fn solve(&self, board: &Board) -> Result<MoveScore> {
        let solution = solve::solve(board);

        Ok(MoveScore::new(
            solution.best_move,
            solution.score * CENTI_DISKS_PER_DISK,
        ))
    }

    fn calc_deviation(&self, board: &Board, unplayed: u64) -> Result<MoveScore> {
        let illegal = unplayed & !board.legal_moves();
        if illegal != 0 {
            bail!("Unplayed moves {:#018x} are not legal\n{}", illegal, board);
        }

        bit_indices(unplayed)
            .map(Square::from_index)
            .map(|square| {
                let score = -eval::evaluate(&board.play(square)) - self.deviation_penalty;
                MoveScore::new(Some(square), score)
            })
            .max_by_key(|move_score| move_score.score)
            .ok_or_else(|| anyhow!("No unplayed moves to deviate to\n{}", board))
    }

    fn solve_depth(&self) -> usize {
        self.solve_depth
    }
}
