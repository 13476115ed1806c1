//! End-to-end scenarios driven through the public engine API

use agar_arena::bots::{AggressiveShyBot, HungryBot, HungryShyBot, RandomBot};
use agar_arena::consts::*;
use agar_arena::sim::{Ball, Cell, Manual, Mass, Pellet, Virus};
use agar_arena::{Action, Decision, Engine, EngineConfig, EngineError, GameState, Player, PlayerId};
use glam::Vec2;

fn empty_engine() -> Engine {
    Engine::new(EngineConfig::empty(500.0, 500.0)).unwrap()
}

/// Add a manually controlled player whose only cell has the given mass and position
fn place_player(engine: &mut Engine, pos: Vec2, mass: Mass) -> PlayerId {
    let id = engine.add_player::<Manual>("manual");
    let player = engine.player_mut(id).unwrap();
    player.cells = vec![Cell::new(pos, mass)];
    player.target = pos;
    id
}

fn world_mass(engine: &Engine) -> u64 {
    let state = engine.state();
    let players: u64 = state.players.values().map(|p| p.mass() as u64).sum();
    players
        + state.pellets.len() as u64 * PELLET_MASS as u64
        + state.foods.len() as u64 * FOOD_MASS as u64
        + state.viruses.len() as u64 * VIRUS_MASS as u64
}

#[test]
fn pellet_is_eaten() {
    let mut engine = empty_engine();
    let id = place_player(&mut engine, Vec2::ZERO, 25);
    engine.state_mut().pellets.push(Pellet::new(Vec2::new(1.0, 1.0)));
    engine.player_mut(id).unwrap().target = Vec2::new(1.0, 1.0);

    engine.tick(SIM_DT);

    assert_eq!(engine.player(id).unwrap().mass(), 26);
    assert_eq!(engine.pellet_count(), 0);
}

#[test]
fn split_then_recombine() {
    let config = EngineConfig {
        recombine_time: 1.0,
        ..EngineConfig::empty(500.0, 500.0)
    };
    let mut engine = Engine::new(config).unwrap();
    let home = Vec2::new(250.0, 250.0);
    let id = place_player(&mut engine, home, 40);
    {
        let player = engine.player_mut(id).unwrap();
        player.action = Action::Split;
        player.target = Vec2::new(400.0, 250.0);
    }

    engine.tick(SIM_DT);
    {
        let player = engine.player(id).unwrap();
        let mut masses: Vec<Mass> = player.cells.iter().map(Ball::mass).collect();
        masses.sort();
        assert_eq!(masses, vec![20, 20]);
        assert!(player.cells.iter().all(|cell| !cell.can_recombine()));
    }

    let player = engine.player_mut(id).unwrap();
    player.action = Action::None;
    player.target = home;

    // still apart while the timers run
    for _ in 0..30 {
        engine.tick(SIM_DT);
    }
    assert_eq!(engine.player(id).unwrap().cells.len(), 2);

    for _ in 0..600 {
        engine.tick(SIM_DT);
    }
    let player = engine.player(id).unwrap();
    assert_eq!(player.cells.len(), 1);
    assert_eq!(player.mass(), 40);
}

#[test]
fn virus_pops_large_cell() {
    let mut engine = empty_engine();
    let loc = Vec2::new(100.0, 100.0);
    let id = place_player(&mut engine, loc, 200);
    engine.state_mut().viruses.push(Virus::new(loc));

    engine.tick(SIM_DT);

    let player = engine.player(id).unwrap();
    let mut masses: Vec<Mass> = player.cells.iter().map(Ball::mass).collect();
    masses.sort();
    assert_eq!(masses, vec![25, 25, 25, 25, 100]);
    assert_eq!(engine.virus_count(), 0);
}

#[test]
fn small_cell_passes_virus() {
    let mut engine = empty_engine();
    let loc = Vec2::new(100.0, 100.0);
    let id = place_player(&mut engine, loc, 60);
    engine.state_mut().viruses.push(Virus::new(loc));

    engine.tick(SIM_DT);

    assert_eq!(engine.player(id).unwrap().cells.len(), 1);
    assert_eq!(engine.virus_count(), 1);
}

#[test]
fn death_and_respawn() {
    let mut engine = empty_engine();
    let hunter = place_player(&mut engine, Vec2::new(50.0, 50.0), 100);
    let victim = place_player(&mut engine, Vec2::new(51.0, 50.0), 15);

    engine.tick(SIM_DT);

    assert!(engine.player(victim).unwrap().is_dead());
    assert_eq!(engine.player(hunter).unwrap().mass(), 115);

    engine.respawn(victim).unwrap();
    let player = engine.player(victim).unwrap();
    assert_eq!(player.cells.len(), 1);
    assert_eq!(player.mass(), CELL_MIN_SIZE);
}

#[test]
fn later_player_eats_earlier_player() {
    let mut engine = empty_engine();
    let victim = place_player(&mut engine, Vec2::new(51.0, 50.0), 15);
    let hunter = place_player(&mut engine, Vec2::new(50.0, 50.0), 100);
    assert!(victim < hunter);

    engine.tick(SIM_DT);

    assert!(engine.player(victim).unwrap().is_dead());
    assert_eq!(engine.player(hunter).unwrap().mass(), 115);
}

#[test]
fn cells_below_eat_requirement_do_not_hunt() {
    let mut engine = empty_engine();
    let a = place_player(&mut engine, Vec2::new(50.0, 50.0), CELL_EAT_REQUIREMENT - 1);
    let b = place_player(&mut engine, Vec2::new(50.5, 50.0), CELL_MIN_SIZE);

    engine.tick(SIM_DT);

    assert!(!engine.player(a).unwrap().is_dead());
    assert!(!engine.player(b).unwrap().is_dead());
}

#[test]
fn idle_tick_changes_nothing() {
    let mut engine = empty_engine();
    let loc = Vec2::new(123.0, 321.0);
    let id = place_player(&mut engine, loc, 30);

    engine.tick(SIM_DT);

    let player = engine.player(id).unwrap();
    assert_eq!(player.cells.len(), 1);
    assert_eq!(player.mass(), 30);
    assert!(player.cells[0].pos.distance(loc) < 1e-4);
    assert_eq!(engine.ticks(), 1);
}

#[test]
fn lookups_of_unknown_players_fail() {
    let mut engine = empty_engine();
    let ghost = PlayerId(1234);
    assert_eq!(engine.player(ghost).err(), Some(EngineError::PlayerNotFound(ghost)));
    assert_eq!(engine.respawn(ghost), Err(EngineError::PlayerNotFound(ghost)));
}

#[test]
fn same_seed_same_world() {
    let run = || {
        let mut engine = Engine::new(EngineConfig {
            seed: 7,
            ..EngineConfig::default()
        })
        .unwrap();
        engine.add_player::<HungryBot>("hungry");
        engine.add_player::<HungryShyBot>("shy");
        engine.add_player::<AggressiveShyBot>("aggressive");
        engine.add_player_with("random", RandomBot::new(3));
        for _ in 0..300 {
            engine.tick(SIM_DT);
        }
        engine.snapshot()
    };
    assert_eq!(run(), run());
}

#[test]
fn mass_is_conserved_without_regeneration() {
    let config = EngineConfig {
        num_pellets: 300,
        ..EngineConfig::empty(300.0, 300.0)
    };
    let mut engine = Engine::new(config).unwrap();
    for i in 0..4 {
        engine.add_player::<HungryBot>(format!("hungry{i}"));
    }

    let mut step = 0u32;
    let juggler = engine.add_player_with("juggler", move |me: &Player, _: &GameState| {
        step += 1;
        let action = match step % 3 {
            0 => Action::Split,
            1 => Action::Feed,
            _ => Action::None,
        };
        Decision::new(action, me.location() + Vec2::new(20.0, -10.0))
    });
    engine.player_mut(juggler).unwrap().cells = vec![Cell::new(Vec2::new(150.0, 150.0), 400)];

    let expected = world_mass(&engine);
    for _ in 0..400 {
        engine.tick(SIM_DT);
        assert_eq!(world_mass(&engine), expected);
    }
}

#[test]
fn entities_stay_in_arena() {
    let mut engine = Engine::new(EngineConfig::with_arena_size(200.0)).unwrap();
    for i in 0..6 {
        engine.add_player_with(format!("random{i}"), RandomBot::new(i));
    }
    let corner = engine.add_player_with("corner", |_: &Player, _: &GameState| {
        Decision::new(Action::Split, Vec2::new(-1000.0, 1000.0))
    });
    engine.player_mut(corner).unwrap().cells = vec![Cell::new(Vec2::new(100.0, 100.0), 300)];

    let inside = |pos: Vec2| (0.0..=200.0).contains(&pos.x) && (0.0..=200.0).contains(&pos.y);
    for _ in 0..240 {
        engine.tick(SIM_DT);
        let state = engine.state();
        assert!(state.players.values().flat_map(|p| &p.cells).all(|c| inside(c.pos)));
        assert!(state.foods.iter().all(|f| inside(f.pos)));
        assert!(state.pellets.iter().all(|p| inside(p.pos)));
    }
}

#[test]
fn cell_limit_caps_splitting() {
    let mut engine = empty_engine();
    let id = engine.add_player_with("splitter", |me: &Player, _: &GameState| {
        Decision::new(Action::Split, me.location() + Vec2::X)
    });
    engine.player_mut(id).unwrap().cells = vec![Cell::new(Vec2::new(250.0, 250.0), 100_000)];

    for _ in 0..(SPLIT_COOLDOWN_TICKS as usize * 8) {
        engine.tick(SIM_DT);
        assert!(engine.player(id).unwrap().cells.len() <= PLAYER_CELL_LIMIT);
    }
    assert_eq!(engine.player(id).unwrap().mass(), 100_000);
}

#[test]
fn leaderboard_orders_by_mass() {
    let mut engine = empty_engine();
    let small = place_player(&mut engine, Vec2::new(10.0, 10.0), 12);
    let big = place_player(&mut engine, Vec2::new(400.0, 400.0), 80);

    let board: Vec<PlayerId> = engine.leaderboard().iter().map(|p| p.id()).collect();
    assert_eq!(board, vec![big, small]);
    assert_eq!(engine.snapshot().leaderboard[0].player, big);
}
