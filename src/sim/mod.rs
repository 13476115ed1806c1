//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied timestep only
//! - Seeded RNG only
//! - Stable iteration order (by player ID)
//! - No rendering or platform dependencies

pub mod ball;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod player;
pub mod policy;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use ball::{Ball, Cell, Food, Mass, Pellet, Virus};
pub use engine::Engine;
pub use error::EngineError;
pub use geometry::Location;
pub use player::{Action, Color, Player, PlayerId};
pub use policy::{Decision, Manual, Policy};
pub use snapshot::{CellView, ScoreEntry, Snapshot};
pub use state::GameState;
pub use tick::TickContext;
