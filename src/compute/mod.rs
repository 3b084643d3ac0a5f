//! Compute module - Board generation, turn simulation and breeding.

mod board;
mod breeder;
mod coordinate;
mod display;
mod engine;
mod game;
mod player;
mod rng;
mod specimen;
mod trap;
mod validator;

pub use board::*;
pub use breeder::*;
pub use coordinate::*;
pub use display::*;
pub use engine::*;
pub use game::*;
pub use player::*;
pub use rng::*;
pub use specimen::*;
pub use trap::*;
pub use validator::*;
