use othello::{Action, Board, Game};

/// Always plays the first legal move in index order. Stops early, without passing, when the mover is stuck.
pub fn first_move_game(max_plies: usize) -> Game {
    let mut board = Board::initial();
    let mut moves = vec![];

    while moves.len() < max_plies {
        match board.legal_squares().next() {
            Some(square) => {
                moves.push(Action::Play(square));
                board = board.play(square);
            }
            None => break,
        }
    }

    Game::new(moves)
}
