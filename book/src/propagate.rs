use anyhow::{bail, Result};
use log::{info, warn};
use othello::{Board, NUM_SQUARES};

use super::{BestUnplayed, Book, CanonicalKey, Data, ScoringStrategy};

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct PropagationStats {
    pub solved: usize,
    pub merged: usize,
}

impl Book {
    /// Rescores every stored position, deepest bucket first, so each merge only reads children that are already
    /// final for this sweep.
    ///
    /// Positions at or below the strategy's solve depth become `Solved`. Positions above it become `Branch`
    /// entries holding the best of their stored children and the strategy's deviation over the moves that are
    /// not stored. `Solved` entries are never revisited.
    ///
    /// A strategy error stops the sweep. Buckets already processed keep their new scores.
    pub fn propagate<S: ScoringStrategy>(&mut self, strategy: &S) -> Result<PropagationStats> {
        let mut stats = PropagationStats::default();
        let min_depth = match self.min_depth() {
            Some(min_depth) => min_depth,
            None => return Ok(stats),
        };

        for empty_count in min_depth..=NUM_SQUARES {
            let (movers, passers): (Vec<_>, Vec<_>) = self
                .keys_at_empty_count(empty_count)
                .filter(|key| !matches!(self.get_key(key), Some(Data::Solved { .. })))
                .map(|key| (key, key.to_board()))
                .partition(|(_, board)| board.has_moves() || board.is_game_over());

            if movers.is_empty() && passers.is_empty() {
                continue;
            }

            let before = stats;

            // A pass child sits in the same bucket as its parent.
            for (key, board) in movers.into_iter().chain(passers) {
                self.propagate_position(strategy, key, &board, &mut stats)?;
            }

            info!(
                "Propagated {} empties: {} solved, {} merged",
                empty_count,
                stats.solved - before.solved,
                stats.merged - before.merged
            );
        }

        Ok(stats)
    }

    fn propagate_position<S: ScoringStrategy>(
        &mut self,
        strategy: &S,
        key: CanonicalKey,
        board: &Board,
        stats: &mut PropagationStats,
    ) -> Result<()> {
        let data = if board.is_game_over() {
            Data::Solved {
                score: board.final_score_centi_disks(),
                best_move: None,
            }
        } else if board.empty_count() <= strategy.solve_depth() {
            let solution = strategy.solve(board)?;
            Data::Solved {
                score: solution.score,
                best_move: solution.square,
            }
        } else if !board.has_moves() {
            match self.get(&board.pass()) {
                Some(child) => Data::Branch {
                    score: -child.score(),
                    best_unplayed: BestUnplayed::NoLegalMoves,
                },
                None => {
                    warn!("Pass position without a stored reply, left as is\n{}", board);
                    return Ok(());
                }
            }
        } else {
            self.merge(strategy, board)?
        };

        if self.put_key(key, data) {
            match data {
                Data::Solved { .. } => stats.solved += 1,
                _ => stats.merged += 1,
            }
        }

        Ok(())
    }

    /// The negamax value of `board` over its stored children and, when some moves are not stored, the
    /// strategy's deviation. The deviation only wins when it is strictly better.
    fn merge<S: ScoringStrategy>(&self, strategy: &S, board: &Board) -> Result<Data> {
        let mut best_stored = None;
        let mut unplayed = 0u64;

        for square in board.legal_squares() {
            match self.get(&board.play(square)) {
                Some(child) => {
                    best_stored = best_stored.max(Some(-child.score()));
                }
                None => unplayed |= square.bit(),
            }
        }

        let deviation = if unplayed != 0 {
            let deviation = strategy.calc_deviation(board, unplayed)?;
            match deviation.square {
                Some(square) if unplayed & square.bit() != 0 => Some((square, deviation.score)),
                square => bail!(
                    "Deviation {:?} is not one of the unplayed moves {:#018x}\n{}",
                    square,
                    unplayed,
                    board
                ),
            }
        } else {
            None
        };

        Ok(match (best_stored, deviation) {
            (Some(stored), Some((_, score))) if stored >= score => Data::Branch {
                score: stored,
                best_unplayed: BestUnplayed::InBook,
            },
            (_, Some((square, score))) => Data::Branch {
                score,
                best_unplayed: BestUnplayed::Square(square),
            },
            (Some(stored), None) => Data::Branch {
                score: stored,
                best_unplayed: BestUnplayed::InBook,
            },
            (None, None) => bail!("Position has legal moves but nothing to merge\n{}", board),
        })
    }
}
