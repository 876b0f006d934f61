//! Exact endgame search. Scores are final disk differentials for the side to move.

use common::bits::bit_indices;
use itertools::Itertools;

use super::{Board, Square, NUM_SQUARES};

const MAX_SCORE: i32 = NUM_SQUARES as i32;

// Below this many empties move ordering costs more than it saves.
const ORDERING_MIN_EMPTIES: usize = 6;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Solution {
    /// `None` when the side to move has to pass or the game is over.
    pub best_move: Option<Square>,
    pub score: i32,
}

pub fn solve(board: &Board) -> Solution {
    if !board.has_moves() {
        let score = if board.is_game_over() {
            board.final_score()
        } else {
            -negamax(&board.pass(), -MAX_SCORE, MAX_SCORE)
        };

        return Solution {
            best_move: None,
            score,
        };
    }

    let mut alpha = -MAX_SCORE;
    let mut best_move = None;

    for square in ordered_moves(board) {
        let score = -negamax(&board.play(square), -MAX_SCORE, -alpha);

        if best_move.is_none() || score > alpha {
            alpha = score;
            best_move = Some(square);
        }
    }

    Solution {
        best_move,
        score: alpha,
    }
}

fn negamax(board: &Board, mut alpha: i32, beta: i32) -> i32 {
    if !board.has_moves() {
        let passed = board.pass();

        if !passed.has_moves() {
            return board.final_score();
        }

        return -negamax(&passed, -beta, -alpha);
    }

    let mut best = -MAX_SCORE - 1;

    for square in ordered_moves(board) {
        let score = -negamax(&board.play(square), -beta, -alpha);

        if score > best {
            best = score;

            if score > alpha {
                alpha = score;

                if alpha >= beta {
                    break;
                }
            }
        }
    }

    best
}

// Fastest first: replies that leave the opponent the fewest moves are searched first.
fn ordered_moves(board: &Board) -> Vec<Square> {
    let squares = bit_indices(board.legal_moves()).map(Square::from_index);

    if board.empty_count() < ORDERING_MIN_EMPTIES {
        return squares.collect();
    }

    squares
        .sorted_by_key(|square| board.play(*square).legal_moves().count_ones())
        .collect()
}
