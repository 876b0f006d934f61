#![allow(clippy::unusual_byte_groupings)]

#[macro_use]
mod bits;

pub mod action;
pub mod board;
pub mod constants;
pub mod engine;
pub mod eval;
pub mod game;
pub mod game_state;
pub mod solve;
pub mod square;
pub mod symmetries;

pub use action::*;
pub use board::*;
pub use constants::*;
pub use engine::*;
pub use game::*;
pub use game_state::*;
pub use square::*;
pub use symmetries::*;
