//! Serializable view of the world for renderers and recordings

use serde::{Deserialize, Serialize};

use super::ball::{Ball, Mass};
use super::player::PlayerId;
use super::state::GameState;

/// One player cell as a renderer needs it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellView {
    pub owner: PlayerId,
    pub color: [f32; 3],
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub mass: Mass,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub player: PlayerId,
    pub name: String,
    pub mass: Mass,
}

/// Flat copy of everything drawable at a given tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub tick: u64,
    pub arena_width: f32,
    pub arena_height: f32,
    pub cells: Vec<CellView>,
    pub pellets: Vec<[f32; 2]>,
    pub foods: Vec<[f32; 2]>,
    pub viruses: Vec<[f32; 2]>,
    /// Descending by mass
    pub leaderboard: Vec<ScoreEntry>,
}

impl Snapshot {
    pub fn capture(state: &GameState) -> Self {
        let cells = state
            .players
            .values()
            .flat_map(|player| {
                let color = player.color().rgb();
                player.cells.iter().map(move |cell| CellView {
                    owner: player.id(),
                    color,
                    x: cell.pos.x,
                    y: cell.pos.y,
                    radius: cell.radius(),
                    mass: cell.mass(),
                })
            })
            .collect();

        let leaderboard = state
            .leaderboard()
            .into_iter()
            .map(|player| ScoreEntry {
                player: player.id(),
                name: player.name().to_string(),
                mass: player.mass(),
            })
            .collect();

        Self {
            tick: state.ticks,
            arena_width: state.arena_width,
            arena_height: state.arena_height,
            cells,
            pellets: state.pellets.iter().map(|p| p.pos.to_array()).collect(),
            foods: state.foods.iter().map(|f| f.pos.to_array()).collect(),
            viruses: state.viruses.iter().map(|v| v.pos.to_array()).collect(),
            leaderboard,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Total mass held by players
    pub fn player_mass(&self) -> Mass {
        self.cells.iter().map(|c| c.mass).sum()
    }
}
