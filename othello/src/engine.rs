use engine::GameEngine;

use super::{Action, GameState};

#[derive(Default)]
pub struct Engine {}

impl Engine {
    pub fn new() -> Self {
        Self {}
    }
}

impl GameEngine for Engine {
    type Action = Action;
    type State = GameState;

    fn take_action(&self, game_state: &Self::State, action: &Self::Action) -> Self::State {
        game_state.take_action(action)
    }

    fn valid_actions(&self, game_state: &Self::State) -> Vec<Self::Action> {
        let board = &game_state.board;

        if board.has_moves() {
            board.legal_squares().map(Action::Play).collect()
        } else if board.is_game_over() {
            vec![]
        } else {
            vec![Action::Pass]
        }
    }
}
