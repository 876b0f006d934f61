/// The rules of a two player game, applied to immutable states.
pub trait GameEngine {
    type Action;
    type State;

    fn take_action(&self, game_state: &Self::State, action: &Self::Action) -> Self::State;

    /// Every action the player to move may take. A forced pass is reported as an action of its own.
    fn valid_actions(&self, game_state: &Self::State) -> Vec<Self::Action>;
}
