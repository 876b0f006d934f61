//! A cheap static evaluation in centi-disks, from the point of view of the side to move.

use common::bits::bit_indices;

use super::Board;

#[rustfmt::skip]
const SQUARE_WEIGHTS: [i32; 64] = [
    100, -25,  10,   5,   5,  10, -25, 100,
    -25, -50,  -2,  -2,  -2,  -2, -50, -25,
     10,  -2,   1,   1,   1,   1,  -2,  10,
      5,  -2,   1,   0,   0,   1,  -2,   5,
      5,  -2,   1,   0,   0,   1,  -2,   5,
     10,  -2,   1,   1,   1,   1,  -2,  10,
    -25, -50,  -2,  -2,  -2,  -2, -50, -25,
    100, -25,  10,   5,   5,  10, -25, 100,
];

const MOBILITY_WEIGHT: i32 = 10;

pub fn evaluate(board: &Board) -> i32 {
    if board.is_game_over() {
        return board.final_score_centi_disks();
    }

    let positional = weight(board.player()) - weight(board.opponent());
    let mobility = board.legal_moves().count_ones() as i32
        - board.pass().legal_moves().count_ones() as i32;

    positional + mobility * MOBILITY_WEIGHT
}

/// The best static evaluation reachable with one move.
pub fn one_ply(board: &Board) -> i32 {
    if board.is_game_over() {
        return board.final_score_centi_disks();
    }

    board
        .legal_squares()
        .map(|square| -evaluate(&board.play(square)))
        .max()
        .unwrap_or_else(|| -evaluate(&board.pass()))
}

fn weight(bits: u64) -> i32 {
    bit_indices(bits).map(|i| SQUARE_WEIGHTS[i]).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{NUM_SYMMETRIES, Square};
    use rand::prelude::*;

    #[test]
    fn test_initial_is_balanced() {
        assert_eq!(evaluate(&Board::initial()), 0);
    }

    #[test]
    fn test_terminal_is_exact() {
        let board = Board::from_bits(u64::MAX, 0).unwrap();
        assert_eq!(evaluate(&board), 6400);
        assert_eq!(one_ply(&board.pass()), -6400);
    }

    #[test]
    fn test_corner_is_valuable() {
        let corner = Board::from_bits(Square::from_index(0).bit(), Square::from_index(27).bit() | Square::from_index(9).bit()).unwrap();
        let x_square = Board::from_bits(Square::from_index(9).bit(), Square::from_index(27).bit() | Square::from_index(0).bit()).unwrap();

        assert!(evaluate(&corner) > evaluate(&x_square));
    }

    #[test]
    fn test_evaluate_is_symmetric() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut board = Board::initial();

        while !board.is_game_over() {
            for symmetry in 0..NUM_SYMMETRIES {
                assert_eq!(evaluate(&board.transform(symmetry)), evaluate(&board));
            }

            let moves = board.legal_squares().collect::<Vec<_>>();
            board = match moves.choose(&mut rng) {
                Some(square) => board.play(*square),
                None => board.pass(),
            };
        }
    }

    #[test]
    fn test_one_ply_initial() {
        // Every opening move is symmetric to f5.
        let f5 = Board::initial().play("f5".parse().unwrap());
        assert_eq!(one_ply(&Board::initial()), -evaluate(&f5));
    }
}
