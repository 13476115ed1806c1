//! Simulation engine
//!
//! Owns the world, the seeded RNG and every player's policy, and advances
//! them together one tick at a time. Given the same config, the same players
//! and the same sequence of `tick` calls, two engines evolve identically.

use std::collections::BTreeMap;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::ball::{Cell, Pellet, Virus};
use super::error::EngineError;
use super::geometry::Location;
use super::player::{Action, Color, Player, PlayerId};
use super::policy::Policy;
use super::snapshot::Snapshot;
use super::state::GameState;
use super::tick::{TickContext, check_player_collisions, move_foods, tick_player};
use crate::consts::*;
use crate::settings::EngineConfig;

pub struct Engine {
    config: EngineConfig,
    state: GameState,
    rng: Pcg32,
    policies: BTreeMap<PlayerId, Box<dyn Policy>>,
    next_player_id: u32,
}

impl Engine {
    /// Build an arena populated with the configured pellets and viruses
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;

        let mut engine = Self {
            state: GameState::new(config.arena_width, config.arena_height),
            rng: Pcg32::seed_from_u64(config.seed),
            policies: BTreeMap::new(),
            next_player_id: 0,
            config,
        };
        engine.add_pellets(engine.config.num_pellets);
        engine.add_viruses(engine.config.num_viruses);
        log::info!(
            "Engine ready: {}x{} arena, {} pellets, {} viruses, seed {}",
            engine.config.arena_width,
            engine.config.arena_height,
            engine.state.pellets.len(),
            engine.state.viruses.len(),
            engine.config.seed
        );
        Ok(engine)
    }

    /// Add a player driven by a default-constructed policy
    pub fn add_player<P>(&mut self, name: impl Into<String>) -> PlayerId
    where
        P: Policy + Default + 'static,
    {
        self.add_player_with(name, P::default())
    }

    /// Add a player driven by the given policy
    pub fn add_player_with(&mut self, name: impl Into<String>, policy: impl Policy + 'static) -> PlayerId {
        let id = PlayerId(self.next_player_id);
        self.next_player_id += 1;

        let color = Color::random(&mut self.rng);
        let mut player = Player::new(id, name, color);
        self.spawn_cell(&mut player);
        log::debug!("Added player {} at {:?}", player, player.location());

        self.state.players.insert(id, player);
        self.policies.insert(id, Box::new(policy));
        id
    }

    /// Advance the world by `elapsed` simulated seconds. A negative or
    /// non-finite `elapsed` is treated as zero.
    pub fn tick(&mut self, elapsed: f32) {
        let dt = if elapsed.is_finite() { elapsed.max(0.0) } else { 0.0 };
        let ctx = TickContext {
            dt,
            arena_width: self.config.arena_width,
            arena_height: self.config.arena_height,
            recombine_time: self.config.recombine_time,
        };

        move_foods(&mut self.state.foods, &ctx);

        let consult_policies = self.state.ticks % self.config.policy_interval == 0;
        let ids: Vec<PlayerId> = self.state.players.keys().copied().collect();
        for id in ids {
            if consult_policies {
                self.consult_policy(id);
            }

            let GameState {
                players,
                pellets,
                foods,
                viruses,
                ..
            } = &mut self.state;
            if let Some(player) = players.get_mut(&id) {
                tick_player(player, pellets, foods, viruses, &ctx);
            }
        }

        check_player_collisions(&mut self.state.players);

        if self.config.pellet_regen {
            let missing = self.config.num_pellets.saturating_sub(self.state.pellets.len());
            self.add_pellets(missing);
        }
        let missing = self.config.num_viruses.saturating_sub(self.state.viruses.len());
        self.add_viruses(missing);

        self.state.ticks += 1;
        log::trace!(
            "Tick {}: {} players, {} pellets, {} foods, {} viruses",
            self.state.ticks,
            self.state.players.len(),
            self.state.pellets.len(),
            self.state.foods.len(),
            self.state.viruses.len()
        );
    }

    fn consult_policy(&mut self, id: PlayerId) {
        let (Some(policy), Some(player)) = (self.policies.get_mut(&id), self.state.players.get(&id))
        else {
            return;
        };
        if player.is_dead() {
            return;
        }

        let decision = policy.take_action(player, &self.state);
        if let Some(player) = self.state.players.get_mut(&id) {
            player.action = decision.action;
            player.target = decision.target;
        }
    }

    /// Replace a player's cells with one fresh minimum-size cell
    pub fn respawn(&mut self, id: PlayerId) -> Result<(), EngineError> {
        let mut player = self
            .state
            .players
            .remove(&id)
            .ok_or(EngineError::PlayerNotFound(id))?;

        player.kill();
        player.action = Action::None;
        player.split_cooldown = 0;
        player.feed_cooldown = 0;
        self.spawn_cell(&mut player);
        log::debug!("Respawned {} at {:?}", player, player.location());

        self.state.players.insert(id, player);
        Ok(())
    }

    /// Drop a player and its policy from the world
    pub fn remove_player(&mut self, id: PlayerId) -> Result<Player, EngineError> {
        self.policies.remove(&id);
        self.state
            .players
            .remove(&id)
            .ok_or(EngineError::PlayerNotFound(id))
    }

    /// Clear every player and entity, then repopulate the arena.
    /// Player ids are never reused, even across resets.
    pub fn reset(&mut self) {
        self.state.clear();
        self.policies.clear();
        self.add_pellets(self.config.num_pellets);
        self.add_viruses(self.config.num_viruses);
        log::info!("Engine reset");
    }

    pub fn player(&self, id: PlayerId) -> Result<&Player, EngineError> {
        self.state
            .players
            .get(&id)
            .ok_or(EngineError::PlayerNotFound(id))
    }

    /// Mutable access for external control (e.g. a `Manual` policy)
    pub fn player_mut(&mut self, id: PlayerId) -> Result<&mut Player, EngineError> {
        self.state
            .players
            .get_mut(&id)
            .ok_or(EngineError::PlayerNotFound(id))
    }

    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.state.players.values()
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct world access for scenario setup
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn ticks(&self) -> u64 {
        self.state.ticks
    }

    pub fn arena_width(&self) -> f32 {
        self.config.arena_width
    }

    pub fn arena_height(&self) -> f32 {
        self.config.arena_height
    }

    pub fn player_count(&self) -> usize {
        self.state.players.len()
    }

    pub fn pellet_count(&self) -> usize {
        self.state.pellets.len()
    }

    pub fn food_count(&self) -> usize {
        self.state.foods.len()
    }

    pub fn virus_count(&self) -> usize {
        self.state.viruses.len()
    }

    pub fn leaderboard(&self) -> Vec<&Player> {
        self.state.leaderboard()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.state)
    }

    fn random_location(&mut self) -> Location {
        Vec2::new(
            self.rng.random_range(0.0..=self.config.arena_width),
            self.rng.random_range(0.0..=self.config.arena_height),
        )
    }

    fn spawn_cell(&mut self, player: &mut Player) {
        let loc = self.random_location();
        player.add_cell(Cell::new(loc, CELL_MIN_SIZE));
        player.target = loc;
    }

    fn add_pellets(&mut self, n: usize) {
        for _ in 0..n {
            let loc = self.random_location();
            self.state.pellets.push(Pellet::new(loc));
        }
    }

    fn add_viruses(&mut self, n: usize) {
        for _ in 0..n {
            let loc = self.random_location();
            self.state.viruses.push(Virus::new(loc));
        }
    }
}
