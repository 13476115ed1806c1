//! Reference policies
//!
//! Simple scripted players, useful as opponents and for exercising the
//! engine headless. All of them only read the world through [`GameState`].

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::DEFAULT_SEED;
use crate::sim::{Ball, Cell, Decision, GameState, Location, Mass, Player, Policy};

/// Players closer than this that outweigh us are fled from
pub const SHY_RADIUS: f32 = 25.0;
/// Players within this distance are considered prey
pub const AGGRESSIVE_RADIUS: f32 = 20.0;
/// How far past the prey's edible centroid the chaser aims
const CHASE_OVERSHOOT: f32 = 3.0;
/// Half-width of `RandomBot`'s jitter box
const JITTER: f32 = 5.0;

/// Location of the pellet nearest to `from`
pub fn nearest_pellet(state: &GameState, from: Location) -> Option<Location> {
    state
        .pellets
        .iter()
        .map(|pellet| pellet.pos)
        .min_by(|a, b| a.distance_squared(from).total_cmp(&b.distance_squared(from)))
}

/// Mass of `prey`'s cells that `hunter` could swallow
pub fn edible_mass(prey: &Player, hunter: &Cell) -> Mass {
    prey.cells
        .iter()
        .filter(|cell| hunter.can_eat_cell(cell))
        .map(Ball::mass)
        .sum()
}

fn forage(me: &Player, state: &GameState) -> Decision {
    let here = me.location();
    Decision::move_to(nearest_pellet(state, here).unwrap_or(here))
}

/// Point directly away from the first nearby player heavier than `me`
fn flee(me: &Player, state: &GameState) -> Option<Decision> {
    let here = me.location();
    state
        .players
        .values()
        .filter(|other| other.id() != me.id() && !other.is_dead())
        .find(|other| other.location().distance(here) < SHY_RADIUS && other.mass() > me.mass())
        .map(|threat| Decision::move_to(here - (threat.location() - here)))
}

/// Heads for the nearest pellet
#[derive(Debug, Clone, Copy, Default)]
pub struct HungryBot;

impl Policy for HungryBot {
    fn take_action(&mut self, me: &Player, state: &GameState) -> Decision {
        forage(me, state)
    }
}

/// Forages like [`HungryBot`] but runs from bigger neighbours
#[derive(Debug, Clone, Copy, Default)]
pub struct HungryShyBot;

impl Policy for HungryShyBot {
    fn take_action(&mut self, me: &Player, state: &GameState) -> Decision {
        flee(me, state).unwrap_or_else(|| forage(me, state))
    }
}

/// Runs from bigger neighbours, chases smaller ones, forages otherwise
#[derive(Debug, Clone, Copy, Default)]
pub struct AggressiveShyBot;

impl AggressiveShyBot {
    fn chase(me: &Player, state: &GameState) -> Option<Decision> {
        let hunter = me.largest_cell()?;
        let here = me.location();

        let prey = state
            .players
            .values()
            .filter(|other| other.id() != me.id())
            .filter(|other| other.location().distance(here) <= AGGRESSIVE_RADIUS)
            .find(|other| edible_mass(other, hunter) > 0)?;

        // overshoot the mass-weighted centroid of the edible cells
        let (weighted, mass) = prey
            .cells
            .iter()
            .filter(|cell| hunter.can_eat_cell(cell))
            .fold((Location::ZERO, 0.0), |(sum, total), cell| {
                let m = cell.mass() as f32;
                (sum + cell.pos * m, total + m)
            });
        let centroid = weighted / mass;
        Some(Decision::move_to(here + CHASE_OVERSHOOT * (centroid - here)))
    }
}

impl Policy for AggressiveShyBot {
    fn take_action(&mut self, me: &Player, state: &GameState) -> Decision {
        flee(me, state)
            .or_else(|| Self::chase(me, state))
            .unwrap_or_else(|| forage(me, state))
    }
}

/// Wanders by jittering its target around its own centroid
#[derive(Debug, Clone)]
pub struct RandomBot {
    rng: Pcg32,
}

impl RandomBot {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }
}

impl Default for RandomBot {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

impl Policy for RandomBot {
    fn take_action(&mut self, me: &Player, _state: &GameState) -> Decision {
        let here = me.location();
        let offset = Location::new(
            self.rng.random_range(-JITTER..JITTER),
            self.rng.random_range(-JITTER..JITTER),
        );
        Decision::move_to(here + offset)
    }
}
