mod book;
mod data;
mod grow;
mod key;
mod options;
mod persistence;
mod propagate;
mod strategy;

#[cfg(test)]
mod test_games;

pub use book::*;
pub use data::*;
pub use grow::*;
pub use key::*;
pub use options::*;
pub use propagate::*;
pub use strategy::*;
