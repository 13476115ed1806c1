//! Engine errors

use thiserror::Error;

use super::player::PlayerId;

/// Errors raised by the engine's public API
#[derive(Debug, Error, PartialEq)]
pub enum EngineError {
    /// Lookup of an id that was never handed out (or belongs to a reset world)
    #[error("player {0} does not exist")]
    PlayerNotFound(PlayerId),
    /// Indicates an invalid configuration value.
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),
}
