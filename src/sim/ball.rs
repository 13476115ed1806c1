//! Circular entities: pellets, food, viruses and player cells
//!
//! Every entity is a ball whose radius follows from its mass. Passive
//! entities have a fixed mass; cells carry a mutable mass that never drops
//! below `CELL_MIN_SIZE`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::{Location, clamp_to_arena, decelerate};
use crate::consts::*;
use crate::radius_conversion;

/// Mass is counted in whole units so conservation is exact
pub type Mass = u32;

/// Shared geometry of every circular entity
pub trait Ball {
    fn location(&self) -> Location;
    fn mass(&self) -> Mass;

    fn radius(&self) -> f32 {
        radius_conversion(self.mass())
    }

    /// Centers are within the larger of the two radii
    fn collides_with(&self, other: &dyn Ball) -> bool {
        let reach = self.radius().max(other.radius());
        self.location().distance_squared(other.location()) <= reach * reach
    }

    /// Circles overlap or touch
    fn touches(&self, other: &dyn Ball) -> bool {
        let reach = self.radius() + other.radius();
        self.location().distance_squared(other.location()) <= reach * reach
    }

    /// Heavier by at least the eat margin
    fn can_eat(&self, other: &dyn Ball) -> bool {
        self.mass() as f32 >= CELL_EAT_MARGIN * other.mass() as f32
    }
}

/// Immobile unit of mass scattered over the arena
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pellet {
    pub pos: Location,
}

impl Pellet {
    pub fn new(pos: Location) -> Self {
        Self { pos }
    }
}

impl Ball for Pellet {
    fn location(&self) -> Location {
        self.pos
    }

    fn mass(&self) -> Mass {
        PELLET_MASS
    }
}

/// Mass ejected by a feeding cell; glides to a stop
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Food {
    pub pos: Location,
    pub vel: Vec2,
}

impl Food {
    pub fn new(pos: Location, vel: Vec2) -> Self {
        Self { pos, vel }
    }

    /// Advance, decelerate and keep inside the arena
    pub fn advance(&mut self, dt: f32, width: f32, height: f32) {
        if self.vel == Vec2::ZERO {
            return;
        }
        self.pos = clamp_to_arena(self.pos + self.vel * dt, width, height);
        self.vel = decelerate(self.vel, FOOD_DECEL * dt);
    }
}

impl Ball for Food {
    fn location(&self) -> Location {
        self.pos
    }

    fn mass(&self) -> Mass {
        FOOD_MASS
    }
}

/// Immobile hazard that pops any cell large enough to swallow it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Virus {
    pub pos: Location,
}

impl Virus {
    pub fn new(pos: Location) -> Self {
        Self { pos }
    }
}

impl Ball for Virus {
    fn location(&self) -> Location {
        self.pos
    }

    fn mass(&self) -> Mass {
        VIRUS_MASS
    }
}

/// A player-owned cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub pos: Location,
    /// Steering velocity, recomputed every tick from the player's target
    pub vel: Vec2,
    /// Impulse from a split or pop; decays on its own and never steers
    pub splitting_vel: Vec2,
    /// Simulated seconds until this cell may merge with a sibling
    recombine_timer: f32,
    mass: Mass,
}

impl Cell {
    pub fn new(pos: Location, mass: Mass) -> Self {
        Self::with_velocity(pos, Vec2::ZERO, mass)
    }

    pub fn with_velocity(pos: Location, vel: Vec2, mass: Mass) -> Self {
        Self {
            pos,
            vel,
            splitting_vel: Vec2::ZERO,
            recombine_timer: 0.0,
            mass: mass.max(CELL_MIN_SIZE),
        }
    }

    /// Every mass mutation goes through here to keep the floor
    pub fn set_mass(&mut self, mass: Mass) {
        self.mass = mass.max(CELL_MIN_SIZE);
    }

    pub fn increment_mass(&mut self, inc: Mass) {
        self.set_mass(self.mass.saturating_add(inc));
    }

    pub fn decrement_mass(&mut self, dec: Mass) {
        self.set_mass(self.mass.saturating_sub(dec));
    }

    pub fn reduce_mass_by_factor(&mut self, factor: Mass) {
        self.set_mass(self.mass / factor.max(1));
    }

    /// Cells other than our own may only be eaten by cells past a minimum size
    pub fn can_eat_cell(&self, other: &Cell) -> bool {
        self.mass > CELL_EAT_REQUIREMENT && self.can_eat(other)
    }

    pub fn can_recombine(&self) -> bool {
        self.recombine_timer <= 0.0
    }

    pub fn recombine_timer(&self) -> f32 {
        self.recombine_timer
    }

    pub fn reset_recombine_timer(&mut self, seconds: f32) {
        self.recombine_timer = seconds;
    }

    /// Integrate position over `dt` and tick down the split impulse and timer
    pub fn advance(&mut self, dt: f32) {
        self.pos += (self.vel + self.splitting_vel) * dt;
        self.splitting_vel = decelerate(self.splitting_vel, SPLIT_DECELERATION * dt);
        self.recombine_timer = (self.recombine_timer - dt).max(0.0);
    }
}

impl Ball for Cell {
    fn location(&self) -> Location {
        self.pos
    }

    fn mass(&self) -> Mass {
        self.mass
    }
}
