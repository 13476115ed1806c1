//! Game state container
//!
//! Everything the engine mutates during a tick lives here. Policies and
//! renderers only ever see it by shared reference between ticks.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::ball::{Food, Pellet, Virus};
use super::player::{Player, PlayerId};

/// Complete world state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Players keyed by id (iterated in ascending id order)
    pub players: BTreeMap<PlayerId, Player>,
    pub pellets: Vec<Pellet>,
    pub foods: Vec<Food>,
    pub viruses: Vec<Virus>,
    pub arena_width: f32,
    pub arena_height: f32,
    /// Simulation tick counter
    pub ticks: u64,
}

impl GameState {
    pub fn new(arena_width: f32, arena_height: f32) -> Self {
        Self {
            players: BTreeMap::new(),
            pellets: Vec::new(),
            foods: Vec::new(),
            viruses: Vec::new(),
            arena_width,
            arena_height,
            ticks: 0,
        }
    }

    pub fn clear(&mut self) {
        self.players.clear();
        self.pellets.clear();
        self.foods.clear();
        self.viruses.clear();
        self.ticks = 0;
    }

    /// Players sorted by descending mass, ties broken by id
    pub fn leaderboard(&self) -> Vec<&Player> {
        let mut board: Vec<&Player> = self.players.values().collect();
        board.sort_by(|a, b| b.mass().cmp(&a.mass()).then(a.id().cmp(&b.id())));
        board
    }
}

/// Prints the leaderboard
impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (rank, player) in self.leaderboard().into_iter().enumerate() {
            writeln!(f, "{}.\t{:>5}\t{}", rank + 1, player.mass(), player)?;
        }
        Ok(())
    }
}
