use std::fmt::{self, Display, Formatter};

use super::{Action, Board, BOARD_WIDTH, Square};

/// A board together with the colour to move, as needed when replaying recorded games.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct GameState {
    pub board: Board,
    pub black_to_move: bool,
}

impl engine::GameState for GameState {
    fn initial() -> Self {
        GameState {
            board: Board::initial(),
            black_to_move: true,
        }
    }
}

impl GameState {
    pub fn take_action(&self, action: &Action) -> Self {
        let board = match action {
            Action::Play(square) => self.board.play(*square),
            Action::Pass => self.board.pass(),
        };

        Self {
            board,
            black_to_move: !self.black_to_move,
        }
    }

    pub fn black_disks(&self) -> u64 {
        if self.black_to_move {
            self.board.player()
        } else {
            self.board.opponent()
        }
    }

    pub fn white_disks(&self) -> u64 {
        if self.black_to_move {
            self.board.opponent()
        } else {
            self.board.player()
        }
    }
}

impl Display for GameState {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let black = self.black_disks();
        let white = self.white_disks();

        writeln!(f, "   a b c d e f g h")?;
        for row in 0..BOARD_WIDTH {
            write!(f, " {}", row + 1)?;
            for col in 0..BOARD_WIDTH {
                let bit = Square::from_col_row(col, row).bit();
                let c = if black & bit != 0 {
                    '*'
                } else if white & bit != 0 {
                    'O'
                } else {
                    '-'
                };
                write!(f, " {}", c)?;
            }
            writeln!(f)?;
        }

        let to_move = if self.black_to_move { "Black" } else { "White" };
        write!(
            f,
            "{} to move. Black {} White {}",
            to_move,
            black.count_ones(),
            white.count_ones()
        )
    }
}
