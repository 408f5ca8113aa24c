//! Fight Kokaton: dodge the bouncing bombs, beam them for points.
//!
//! - `config`: immutable tunables built once at startup
//! - `entities`: pure game data
//! - `compute`: pure state transitions (one `tick` per frame)
//! - `input`: held-key tracking on top of terminal key events
//! - `clock`: fixed-rate frame limiter

pub mod clock;
pub mod compute;
pub mod config;
pub mod entities;
pub mod input;

pub use config::GameConfig;
pub use entities::{Direction, GameState, GameStatus};
