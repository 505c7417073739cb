//! Simulation core of a wave-based arcade shooter.
//!
//! The library owns every gameplay rule: bullets, opponents entering along
//! scripted paths, wave scheduling, particles and the playing / game-over
//! transition.  Input capture, drawing surfaces and the frame driver are
//! collaborators supplied by the host (see `src/main.rs` for a terminal one).

pub mod bullets;
pub mod collision;
pub mod config;
pub mod effects;
pub mod entities;
pub mod game;
pub mod input;
pub mod opponents;
pub mod particles;
pub mod player;
pub mod render;
pub mod waves;

pub use config::{ConfigError, GameConfig};
pub use effects::{Effect, UpdateUiFunctions};
pub use entities::GameStatus;
pub use game::GameState;
pub use input::InputSnapshot;
pub use render::Surface;
