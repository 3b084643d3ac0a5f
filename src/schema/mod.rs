//! Schema module - Configuration types for Trap Race runs.

mod config;

pub use config::*;
