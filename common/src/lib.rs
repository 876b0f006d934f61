pub mod bits;
pub mod config;

pub use bits::*;
pub use config::*;
