//! # Starfire
//!
//! A wave shooter on top of `starfire_engine`: the player flies around a
//! wrap-around arena, shoots incoming enemy waves and survives as long as
//! lives last.
//!
//! Everything here is host-agnostic. A host drives a [`states::StateStack`]
//! with input snapshots and frame times and collects sprite and sound requests
//! through the engine's sink traits.

#![warn(missing_docs)]

pub mod actors;
pub mod assets;
pub mod config;
pub mod constants;
pub mod events;
pub mod session;
pub mod spawner;
pub mod states;

use starfire_engine::config::ConfigError;
use thiserror::Error;

pub use config::GameConfig;
pub use session::{PlaySession, SessionStatus};
pub use states::{GameState, StateStack};

/// Game-level errors
#[derive(Debug, Error)]
pub enum GameError {
    /// Loading or validating the configuration failed
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The constants table was loaded twice
    #[error("Game constants are already loaded")]
    ConstantsAlreadyLoaded,
}

/// Result alias for game operations
pub type GameResult<T> = Result<T, GameError>;
