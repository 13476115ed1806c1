//! Players: named aggregates of cells steered toward a target

use std::fmt;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::ball::{Ball, Cell, Mass};
use super::geometry::Location;

/// Unique player identifier, assigned sequentially by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u32);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What a player wants to do this tick besides steering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Action {
    #[default]
    None,
    Feed,
    Split,
}

/// Player palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Color {
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
    Purple,
}

impl Color {
    pub const ALL: [Color; 6] = [
        Color::Red,
        Color::Orange,
        Color::Yellow,
        Color::Green,
        Color::Blue,
        Color::Purple,
    ];

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }

    /// Linear RGB for renderers
    pub fn rgb(&self) -> [f32; 3] {
        match self {
            Color::Red => [1.0, 0.0, 0.0],
            Color::Orange => [1.0, 0.65, 0.0],
            Color::Yellow => [1.0, 1.0, 0.0],
            Color::Green => [0.0, 1.0, 0.0],
            Color::Blue => [0.0, 0.0, 1.0],
            Color::Purple => [0.6, 0.2, 0.8],
        }
    }
}

/// A player and the cells it owns
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    id: PlayerId,
    name: String,
    color: Color,
    pub cells: Vec<Cell>,
    pub action: Action,
    pub target: Location,
    pub split_cooldown: u32,
    pub feed_cooldown: u32,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<String>, color: Color) -> Self {
        Self {
            id,
            name: name.into(),
            color,
            cells: Vec::new(),
            action: Action::None,
            target: Vec2::ZERO,
            split_cooldown: 0,
            feed_cooldown: 0,
        }
    }

    pub fn id(&self) -> PlayerId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn add_cell(&mut self, cell: Cell) {
        self.cells.push(cell);
    }

    /// Append cells created during a tick
    pub fn add_cells(&mut self, cells: impl IntoIterator<Item = Cell>) {
        self.cells.extend(cells);
    }

    pub fn kill(&mut self) {
        self.cells.clear();
    }

    pub fn is_dead(&self) -> bool {
        self.cells.is_empty()
    }

    /// Total mass over all cells
    pub fn mass(&self) -> Mass {
        self.cells.iter().map(Ball::mass).sum()
    }

    pub fn score(&self) -> Mass {
        self.mass()
    }

    /// Mass-weighted centroid of the cells (origin for a dead player)
    pub fn location(&self) -> Location {
        let mass = self.mass();
        if mass == 0 {
            return Vec2::ZERO;
        }
        let weighted: Vec2 = self
            .cells
            .iter()
            .map(|cell| cell.pos * cell.mass() as f32)
            .sum();
        weighted / mass as f32
    }

    /// The heaviest cell, if any
    pub fn largest_cell(&self) -> Option<&Cell> {
        self.cells.iter().max_by_key(|cell| cell.mass())
    }

    /// Count down action cooldowns by one tick
    pub fn tick_cooldowns(&mut self) {
        self.split_cooldown = self.split_cooldown.saturating_sub(1);
        self.feed_cooldown = self.feed_cooldown.saturating_sub(1);
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name, self.id)
    }
}
