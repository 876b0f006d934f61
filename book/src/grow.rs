use std::collections::HashMap;

use anyhow::{bail, Result};
use log::{debug, info};
use othello::{eval, Board, Square};

use super::{BestUnplayed, Book, CanonicalKey, Data, ScoringStrategy};

/// An unplayed move worth adding to the book: playing `square` on `board` reaches a new position. `score` is
/// the deviation estimate for the side to move on `board`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Expansion {
    pub board: Board,
    pub square: Square,
    pub score: i32,
}

impl Expansion {
    pub fn child(&self) -> Board {
        self.board.play(self.square)
    }
}

/// What the grower found below a root position.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Growth {
    Expand(Expansion),
    /// The root has unplayed moves, but none beats the best known line and that line needs no expansion.
    NoImprovement,
    /// The root has no unplayed moves and no known line leads to anything to expand.
    Exhausted,
}

impl Growth {
    pub const NO_IMPROVEMENT_CODE: i8 = BestUnplayed::IN_BOOK_CODE;
    pub const EXHAUSTED_CODE: i8 = BestUnplayed::NO_LEGAL_MOVES_CODE;

    /// The square to expand, or a negative sentinel.
    pub fn code(&self) -> i8 {
        match self {
            Growth::Expand(expansion) => expansion.square.index() as i8,
            Growth::NoImprovement => Self::NO_IMPROVEMENT_CODE,
            Growth::Exhausted => Self::EXHAUSTED_CODE,
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct SearchNode {
    score: i32,
    expansion: Option<Expansion>,
}

impl SearchNode {
    fn settled(score: i32) -> Self {
        Self {
            score,
            expansion: None,
        }
    }

    fn negate(self) -> Self {
        Self {
            score: -self.score,
            expansion: self.expansion,
        }
    }
}

/// A negamax walk over the stored lines below a root. Scores are recomputed from the stored frontier rather
/// than read from Branch entries, so the book does not need to be propagated first.
struct GrowthSearch<'a, S> {
    book: &'a Book,
    strategy: &'a S,
    visited: HashMap<CanonicalKey, SearchNode>,
}

impl<'a, S: ScoringStrategy> GrowthSearch<'a, S> {
    fn new(book: &'a Book, strategy: &'a S) -> Self {
        Self {
            book,
            strategy,
            visited: HashMap::new(),
        }
    }

    fn search(&mut self, board: &Board) -> Result<SearchNode> {
        let key = CanonicalKey::new(board);
        if let Some(node) = self.visited.get(&key) {
            return Ok(*node);
        }

        let node = self.search_uncached(board)?;
        self.visited.insert(key, node);
        Ok(node)
    }

    fn search_uncached(&mut self, board: &Board) -> Result<SearchNode> {
        if board.is_game_over() {
            return Ok(SearchNode::settled(board.final_score_centi_disks()));
        }

        let stored = self.book.get(board);
        if let Some(Data::Solved { score, .. }) = stored {
            return Ok(SearchNode::settled(score));
        }

        let static_score = || stored.map_or_else(|| eval::one_ply(board), |data| data.score());

        if board.empty_count() <= self.strategy.solve_depth() {
            return Ok(SearchNode::settled(static_score()));
        }

        if !board.has_moves() {
            let pass = board.pass();
            return if self.book.contains(&pass) {
                Ok(self.search(&pass)?.negate())
            } else {
                Ok(SearchNode::settled(static_score()))
            };
        }

        let mut best: Option<SearchNode> = None;
        let mut unplayed = 0u64;

        for square in board.legal_squares() {
            let child = board.play(square);
            if !self.book.contains(&child) {
                unplayed |= square.bit();
                continue;
            }

            let option = self.search(&child)?.negate();
            if best.map_or(true, |best| option.score > best.score) {
                best = Some(option);
            }
        }

        if unplayed != 0 {
            let expansion = self.deviation(board, unplayed)?;
            if best.map_or(true, |best| expansion.score > best.score) {
                best = Some(SearchNode {
                    score: expansion.score,
                    expansion: Some(expansion),
                });
            }
        }

        match best {
            Some(best) => Ok(best),
            None => bail!("Position has legal moves but no options\n{}", board),
        }
    }

    fn deviation(&self, board: &Board, unplayed: u64) -> Result<Expansion> {
        let deviation = self.strategy.calc_deviation(board, unplayed)?;

        match deviation.square {
            Some(square) if unplayed & square.bit() != 0 => Ok(Expansion {
                board: *board,
                square,
                score: deviation.score,
            }),
            square => bail!(
                "Deviation {:?} is not one of the unplayed moves {:#018x}\n{}",
                square,
                unplayed,
                board
            ),
        }
    }
}

impl Book {
    /// Finds the unplayed move that the best line from `root` runs into, if any.
    pub fn search_for_best_unplayed_move<S: ScoringStrategy>(
        &self,
        strategy: &S,
        root: &Board,
    ) -> Result<Growth> {
        let node = GrowthSearch::new(self, strategy).search(root)?;

        let has_unplayed = root
            .legal_squares()
            .any(|square| !self.contains(&root.play(square)));

        Ok(match node.expansion {
            Some(expansion) => Growth::Expand(expansion),
            None if has_unplayed && root.empty_count() > strategy.solve_depth() => {
                Growth::NoImprovement
            }
            None => Growth::Exhausted,
        })
    }

    /// Adds up to `max_expansions` positions below `root`, one per search, stopping early once the search has
    /// nothing left to propose. The root itself is added first when it is missing, and a child that has to pass
    /// is added along with its pass image. Returns the number of expansions made.
    pub fn grow<S: ScoringStrategy>(
        &mut self,
        strategy: &S,
        root: &Board,
        max_expansions: usize,
    ) -> Result<usize> {
        if !self.contains(root) {
            self.add_unevaluated_position(root);
        }

        let mut added = 0;
        while added < max_expansions {
            match self.search_for_best_unplayed_move(strategy, root)? {
                Growth::Expand(expansion) => {
                    let child = expansion.child();
                    self.add_unevaluated_position(&child);
                    added += 1;

                    // The reply to a forced pass is a line of its own, as on import.
                    if !child.has_moves() && !child.is_game_over() {
                        self.add_unevaluated_position(&child.pass());
                    }

                    debug!(
                        "Expanded {} at {} empties, deviation {}",
                        expansion.square,
                        child.empty_count(),
                        expansion.score
                    );
                }
                outcome => {
                    info!("Growth stopped after {} expansions: {:?}", added, outcome);
                    return Ok(added);
                }
            }
        }

        info!("Growth reached the limit of {} expansions", max_expansions);
        Ok(added)
    }
}
