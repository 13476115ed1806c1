//! Agar Arena - a deterministic Agar.io-style arena simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, players, collisions, engine)
//! - `bots`: Reference policies that drive players
//! - `settings`: Engine configuration

pub mod bots;
pub mod settings;
pub mod sim;

pub use settings::{ConfigLoadError, EngineConfig};
pub use sim::{Action, Decision, Engine, EngineError, GameState, Player, PlayerId, Policy};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Default simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Default arena dimensions
    pub const DEFAULT_ARENA_WIDTH: f32 = 500.0;
    pub const DEFAULT_ARENA_HEIGHT: f32 = 500.0;
    pub const DEFAULT_NUM_PELLETS: usize = 1024;
    pub const DEFAULT_NUM_VIRUSES: usize = 25;
    pub const DEFAULT_SEED: u64 = 42;

    /// Area per unit of mass (radius = sqrt(mass / ratio / π))
    pub const MASS_AREA_RATIO: f32 = 1.0;

    /// Passive entity masses
    pub const PELLET_MASS: u32 = 1;
    pub const FOOD_MASS: u32 = 10;
    pub const VIRUS_MASS: u32 = 100;

    /// Food emitted by feeding
    pub const FOOD_SPEED: f32 = 100.0;
    pub const FOOD_DECEL: f32 = 80.0;

    /// No cell is ever lighter than this
    pub const CELL_MIN_SIZE: u32 = 10;
    /// Speed of a minimum-size cell; heavier cells are slower by 1/sqrt(mass)
    pub const CELL_MAX_SPEED: f32 = 200.0;
    /// Proportional steering gain toward the player's target (1/s)
    pub const STEERING_GAIN: f32 = 3.0;

    /// A predator must be this many times heavier than its prey
    pub const CELL_EAT_MARGIN: f32 = 1.1;
    /// Minimum mass a cell needs before it may eat another cell
    pub const CELL_EAT_REQUIREMENT: u32 = 25;

    /// Splitting
    pub const CELL_SPLIT_MINIMUM: u32 = 35;
    pub const SPLIT_DECELERATION: f32 = 100.0;
    pub const SPLIT_MIN_SPEED: f32 = 100.0;
    pub const SPLIT_MAX_SPEED: f32 = 400.0;
    pub const PLAYER_CELL_LIMIT: usize = 25;

    /// Simulated seconds before split or popped cells may merge again
    pub const RECOMBINE_TIMER_SEC: f32 = 30.0;

    /// Action cooldowns (ticks)
    pub const SPLIT_COOLDOWN_TICKS: u32 = 30;
    pub const FEED_COOLDOWN_TICKS: u32 = 10;

    /// Virus disruption
    pub const CELL_POP_REDUCTION: u32 = 2;
    pub const CELL_POP_SIZE: u32 = 25;
    pub const CELL_POP_SPEED: f32 = 25.0;
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Radius of a ball with the given mass
#[inline]
pub fn radius_conversion(mass: u32) -> f32 {
    let area = mass as f32 / consts::MASS_AREA_RATIO;
    (area / std::f32::consts::PI).sqrt()
}

/// Speed limit for a cell of the given mass
#[inline]
pub fn max_speed(mass: u32) -> f32 {
    let mass = mass.max(1) as f32;
    consts::CELL_MAX_SPEED * (consts::CELL_MIN_SIZE as f32 / mass).sqrt()
}
