use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use anyhow::{anyhow, bail, Result};
use engine::{GameEngine, GameState as GameStateTrait};
use itertools::Itertools;

use super::{Action, Board, Engine, GameState};

/// A recorded game: a starting state and the actions played from it.
///
/// Forced passes may be left out of the record, they are filled in when the game is replayed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Game {
    start: GameState,
    actions: Vec<Action>,
}

impl Game {
    pub fn new(actions: Vec<Action>) -> Self {
        Self::with_start(GameState::initial(), actions)
    }

    pub fn with_start(start: GameState, actions: Vec<Action>) -> Self {
        Self { start, actions }
    }

    pub fn start(&self) -> &GameState {
        &self.start
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// Replays the game, returning every state visited from the start through the final state.
    ///
    /// Fails on an illegal move, on a pass while a move is available and on moves after the game is over.
    pub fn states(&self) -> Result<Vec<GameState>> {
        let engine = Engine::new();
        let mut state = self.start;
        let mut states = vec![state];

        for (ply, action) in self.actions.iter().enumerate() {
            let mut valid_actions = engine.valid_actions(&state);

            if valid_actions == [Action::Pass] && !action.is_pass() {
                state = engine.take_action(&state, &Action::Pass);
                states.push(state);
                valid_actions = engine.valid_actions(&state);
            }

            if valid_actions.is_empty() {
                bail!("Action {} at ply {} was played after the game ended", action, ply + 1);
            }

            if !valid_actions.contains(action) {
                return Err(anyhow!(
                    "Action {} at ply {} is not legal. Valid actions are {}\n{}",
                    action,
                    ply + 1,
                    valid_actions.iter().join(" "),
                    state
                ));
            }

            state = engine.take_action(&state, action);
            states.push(state);
        }

        Ok(states)
    }

    /// The boards visited by the game, each from the point of view of its side to move.
    pub fn positions(&self) -> Result<Vec<Board>> {
        Ok(self.states()?.into_iter().map(|s| s.board).collect())
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new(vec![])
    }
}

impl FromStr for Game {
    type Err = anyhow::Error;

    /// Parses a transcript such as `f5d6c3d3c4` or `f5 d6 c3 pass d3`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let compact = s.split_whitespace().collect::<String>().to_ascii_lowercase();
        let mut rest = compact.as_str();
        let mut actions = vec![];

        while !rest.is_empty() {
            let token_len = if rest.starts_with("pass") { 4 } else { 2 };
            let token = rest
                .get(..token_len)
                .ok_or_else(|| anyhow!("Transcript ends with an incomplete move: {}", rest))?;

            actions.push(token.parse()?);
            rest = &rest[token_len..];
        }

        Ok(Self::new(actions))
    }
}

impl Display for Game {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for action in &self.actions {
            write!(f, "{}", action)?;
        }

        Ok(())
    }
}
