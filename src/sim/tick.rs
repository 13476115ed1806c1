//! Per-tick simulation phases
//!
//! Each phase is a free function over the pieces of state it touches so the
//! engine can borrow players and entity collections independently. Anything
//! created while a player's cells are being iterated is buffered and appended
//! afterwards.

use std::collections::BTreeMap;
use std::f32::consts::TAU;

use super::ball::{Ball, Cell, Food, Mass, Pellet, Virus};
use super::geometry::{
    Location, clamp_to_arena, direction_or_x, heading, velocity_from_polar,
};
use super::player::{Action, Player, PlayerId};
use crate::consts::*;
use crate::max_speed;

/// Per-tick parameters shared by every phase
#[derive(Debug, Clone, Copy)]
pub struct TickContext {
    pub dt: f32,
    pub arena_width: f32,
    pub arena_height: f32,
    /// Seconds a freshly split or popped cell waits before it may merge
    pub recombine_time: f32,
}

impl TickContext {
    #[inline]
    fn clamp(&self, loc: Location) -> Location {
        clamp_to_arena(loc, self.arena_width, self.arena_height)
    }
}

/// Glide all free food and keep it inside the arena
pub fn move_foods(foods: &mut [Food], ctx: &TickContext) {
    for food in foods.iter_mut() {
        food.advance(ctx.dt, ctx.arena_width, ctx.arena_height);
    }
}

/// Advance one player through every per-player phase of a tick
pub fn tick_player(
    player: &mut Player,
    pellets: &mut Vec<Pellet>,
    foods: &mut Vec<Food>,
    viruses: &mut Vec<Virus>,
    ctx: &TickContext,
) {
    move_player(player, ctx);
    separate_cells(player, ctx);

    let mut created_cells = Vec::new();
    for cell in &mut player.cells {
        eat_pellets(cell, pellets);
        eat_food(cell, foods);
        check_virus_collisions(cell, viruses, ctx.recombine_time, &mut created_cells);
    }

    player.tick_cooldowns();
    match player.action {
        Action::Feed if player.feed_cooldown == 0 => {
            emit_foods(player, foods, ctx);
            player.feed_cooldown = FEED_COOLDOWN_TICKS;
        }
        Action::Split if player.split_cooldown == 0 => {
            player_split(player, ctx, &mut created_cells);
            player.split_cooldown = SPLIT_COOLDOWN_TICKS;
        }
        _ => {}
    }

    // add any cells that were created
    player.add_cells(created_cells);

    recombine_cells(player);
}

/// Steer every cell toward the player's target and integrate its motion
pub fn move_player(player: &mut Player, ctx: &TickContext) {
    let target = player.target;
    for cell in &mut player.cells {
        let desired = (target - cell.pos) * STEERING_GAIN;
        cell.vel = desired.clamp_length_max(max_speed(cell.mass()));
        cell.advance(ctx.dt);
        cell.pos = ctx.clamp(cell.pos);
    }
}

/// Push apart touching sibling cells unless both are free to recombine
pub fn separate_cells(player: &mut Player, ctx: &TickContext) {
    let cells = &mut player.cells;
    for j in 1..cells.len() {
        let (left, right) = cells.split_at_mut(j);
        let b = &mut right[0];
        for a in left.iter_mut() {
            if a.can_recombine() && b.can_recombine() {
                continue;
            }
            if !a.touches(&*b) {
                continue;
            }

            let delta = b.pos - a.pos;
            let dist = delta.length();
            let overlap = a.radius() + b.radius() - dist;
            if overlap <= 0.0 {
                continue;
            }
            let axis = delta.try_normalize().unwrap_or(glam::Vec2::X);
            a.pos = ctx.clamp(a.pos - axis * (overlap / 2.0));
            b.pos = ctx.clamp(b.pos + axis * (overlap / 2.0));
        }
    }
}

/// Remove every pellet the cell swallows; returns the mass gained
pub fn eat_pellets(cell: &mut Cell, pellets: &mut Vec<Pellet>) -> Mass {
    let before = pellets.len();
    pellets.retain(|pellet| !(cell.can_eat(pellet) && cell.collides_with(pellet)));
    let gained = (before - pellets.len()) as Mass * PELLET_MASS;
    cell.increment_mass(gained);
    gained
}

/// Remove every food the cell swallows; returns the mass gained
pub fn eat_food(cell: &mut Cell, foods: &mut Vec<Food>) -> Mass {
    if cell.mass() <= FOOD_MASS {
        return 0;
    }
    let before = foods.len();
    foods.retain(|food| !(cell.can_eat(food) && cell.collides_with(food)));
    let gained = (before - foods.len()) as Mass * FOOD_MASS;
    cell.increment_mass(gained);
    gained
}

/// Pop the cell on the first virus it can swallow (at most one per tick)
pub fn check_virus_collisions(
    cell: &mut Cell,
    viruses: &mut Vec<Virus>,
    recombine_time: f32,
    created_cells: &mut Vec<Cell>,
) -> bool {
    let Some(index) = viruses
        .iter()
        .position(|virus| cell.can_eat(virus) && cell.collides_with(virus))
    else {
        return false;
    };

    // O(1) removal
    let virus = viruses.swap_remove(index);
    let pieces = disrupt(cell, virus.pos, recombine_time, created_cells);
    log::debug!("Cell of mass {} popped into {} pieces", cell.mass(), pieces);
    true
}

/// Split a cell into itself plus chunks of `CELL_POP_SIZE`, fanned out
/// around its heading from `origin`. Returns the number of new cells.
pub fn disrupt(
    cell: &mut Cell,
    origin: Location,
    recombine_time: f32,
    created_cells: &mut Vec<Cell>,
) -> usize {
    let total_mass = cell.mass();

    // shrink by roughly CELL_POP_REDUCTION while keeping the popped part a
    // whole number of chunks
    cell.reduce_mass_by_factor(CELL_POP_REDUCTION);
    let removed = total_mass - cell.mass();
    cell.increment_mass(removed % CELL_POP_SIZE);

    let pop_mass = total_mass - cell.mass();
    let num_new_cells = pop_mass.div_ceil(CELL_POP_SIZE);

    let theta = heading(cell.vel);
    let mut remaining_mass = pop_mass;
    for c in 0..num_new_cells {
        let angle = theta + TAU * c as f32 / num_new_cells as f32;
        let new_cell_mass = remaining_mass.min(CELL_POP_SIZE);

        let mut new_cell = Cell::new(origin, new_cell_mass);
        new_cell.splitting_vel = velocity_from_polar(angle, CELL_POP_SPEED);
        new_cell.reset_recombine_timer(recombine_time);
        created_cells.push(new_cell);

        remaining_mass -= new_cell_mass;
    }

    cell.reset_recombine_timer(recombine_time);
    num_new_cells as usize
}

/// Emit one food from every cell heavy enough, toward the target
pub fn emit_foods(player: &mut Player, foods: &mut Vec<Food>, ctx: &TickContext) {
    let target = player.target;
    for cell in &mut player.cells {
        if cell.mass() < CELL_MIN_SIZE + FOOD_MASS {
            continue;
        }

        let dir = direction_or_x(cell.pos, target);
        let loc = ctx.clamp(cell.pos + dir * cell.radius());
        foods.push(Food::new(loc, dir * FOOD_SPEED));
        cell.decrement_mass(FOOD_MASS);
    }
}

/// Halve every cell heavy enough, launching the new half toward the target
pub fn player_split(player: &mut Player, ctx: &TickContext, created_cells: &mut Vec<Cell>) {
    let target = player.target;
    let mut cell_count = player.cells.len() + created_cells.len();

    for cell in &mut player.cells {
        if cell.mass() < CELL_SPLIT_MINIMUM {
            continue;
        }
        if cell_count >= PLAYER_CELL_LIMIT {
            break;
        }

        let split_mass = cell.mass() / 2;
        cell.set_mass(cell.mass() - split_mass);

        let dir = direction_or_x(cell.pos, target);
        let loc = ctx.clamp(cell.pos + dir * cell.radius());
        let speed = (2.0 * max_speed(split_mass)).clamp(SPLIT_MIN_SPEED, SPLIT_MAX_SPEED);

        let mut new_cell = Cell::new(loc, split_mass);
        new_cell.splitting_vel = dir * speed;
        new_cell.reset_recombine_timer(ctx.recombine_time);
        cell.reset_recombine_timer(ctx.recombine_time);

        created_cells.push(new_cell);
        cell_count += 1;
    }
}

/// Merge sibling cells that are both eligible and overlapping
pub fn recombine_cells(player: &mut Player) {
    let cells = &mut player.cells;
    let mut absorbed = vec![false; cells.len()];

    for i in 0..cells.len() {
        if absorbed[i] || !cells[i].can_recombine() {
            continue;
        }
        for j in (i + 1)..cells.len() {
            if absorbed[j] || !cells[j].can_recombine() {
                continue;
            }
            if cells[i].collides_with(&cells[j]) {
                let mass = cells[j].mass();
                cells[i].increment_mass(mass);
                absorbed[j] = true;
            }
        }
    }

    let mut index = 0;
    cells.retain(|_| {
        let keep = !absorbed[index];
        index += 1;
        keep
    });
}

/// Move every cell of `prey` that some cell of `predator` can swallow into
/// that predator cell. Returns the mass transferred.
pub fn eat_others(predator: &mut Player, prey: &mut Player) -> Mass {
    let mut gained = 0;
    prey.cells.retain(|cell| {
        let eater = predator
            .cells
            .iter_mut()
            .find(|eater| eater.can_eat_cell(cell) && eater.collides_with(cell));
        match eater {
            Some(eater) => {
                eater.increment_mass(cell.mass());
                gained += cell.mass();
                false
            }
            None => true,
        }
    });
    gained
}

/// Resolve eating between every unordered pair of distinct players
pub fn check_player_collisions(players: &mut BTreeMap<PlayerId, Player>) {
    let ids: Vec<PlayerId> = players.keys().copied().collect();
    for (i, &a_id) in ids.iter().enumerate() {
        for &b_id in &ids[i + 1..] {
            let Some(mut b) = players.remove(&b_id) else {
                continue;
            };
            if let Some(a) = players.get_mut(&a_id) {
                if !a.is_dead() && !b.is_dead() {
                    eat_others(a, &mut b);
                    eat_others(&mut b, a);
                    for player in [&*a, &b] {
                        if player.is_dead() {
                            log::debug!("{} was eaten", player);
                        }
                    }
                }
            }
            players.insert(b_id, b);
        }
    }
}
