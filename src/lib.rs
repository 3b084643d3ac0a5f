//! Trap Race - Genetic specimens racing across a trapped grid.
//!
//! A population of specimens, each carrying a fixed-length bit-string
//! genome, crosses a rectangular board toward a finish column. Every color of
//! the board may carry a trap (lethal neighbor, teleport or wall); a movement
//! strategy reads the genome and the colors around a specimen and picks a
//! step. Specimens that score are sent back to the start with bonus fitness,
//! and new specimens are bred from fitness-proportionally selected parents.
//!
//! # Architecture
//!
//! The crate is split into two main modules:
//!
//! - `schema`: Configuration types and validation
//! - `compute`: Board generation, reachability validation, the turn engine,
//!   the genetic breeder and the run driver
//!
//! # Example
//!
//! ```rust,no_run
//! use trap_race::{
//!     schema::GameConfig,
//!     compute::{Game, player_for},
//! };
//!
//! let config = GameConfig::default();
//! let player = player_for(config.player, config.genome.length);
//!
//! let mut game = Game::new(config, player).expect("valid config");
//! let summary = game.run().expect("run completes");
//!
//! println!("Your bot got {} points", summary.total_points);
//! ```

pub mod compute;
pub mod schema;

// Re-export commonly used types
pub use compute::{Board, Game, GameError, Player, RunSummary, Vision};
pub use schema::{ConfigError, GameConfig};
