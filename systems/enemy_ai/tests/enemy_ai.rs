use axolotl_core::{Command, EnemyId, EnemyTuning, Event, ScriptedRandom, Tile, WorldMap};
use axolotl_system_enemy_ai::{Behavior, EnemyPool, Lifecycle};
use glam::Vec2;

const PLAYER: Vec2 = Vec2::new(600.0, 400.0);

#[test]
fn distant_player_is_ignored_until_within_aggro_range() {
    // 0.375 rolls an aggro radius of exactly 150.
    let mut rng = ScriptedRandom::constant(0.375);
    let mut pool = EnemyPool::new(EnemyTuning::default());
    let map = open_map();
    let enemy = pool.spawn(Vec2::new(800.0, 400.0), &mut rng);

    let (commands, _) = tick(&mut pool, PLAYER, &map, &mut rng);
    assert!(commands.is_empty());
    assert_eq!(behavior(&pool, enemy), Behavior::Wandering);

    let _ = tick(&mut pool, Vec2::new(700.0, 400.0), &map, &mut rng);
    assert_eq!(
        behavior(&pool, enemy),
        Behavior::Chasing,
        "player at distance 100 must be noticed within one tick"
    );
}

#[test]
fn adjacent_enemy_strikes_once_per_attack_after_windup() {
    let mut rng = ScriptedRandom::constant(0.375);
    let mut pool = EnemyPool::new(EnemyTuning::default());
    let map = open_map();
    let enemy = pool.spawn(Vec2::new(610.0, 400.0), &mut rng);

    let _ = tick(&mut pool, PLAYER, &map, &mut rng);
    assert_eq!(behavior(&pool, enemy), Behavior::Chasing);

    let (commands, _) = tick(&mut pool, PLAYER, &map, &mut rng);
    assert!(commands.is_empty());
    assert_eq!(behavior(&pool, enemy), Behavior::Attacking);

    let mut strikes_by_tick = Vec::new();
    for attack_tick in 1..=20 {
        let (commands, _) = tick(&mut pool, PLAYER, &map, &mut rng);
        for command in commands {
            match command {
                Command::DamagePlayer { amount } => {
                    assert!((amount - 0.7).abs() < f32::EPSILON);
                    strikes_by_tick.push(attack_tick);
                }
                other => panic!("unexpected command emitted: {other:?}"),
            }
        }
    }

    assert_eq!(strikes_by_tick, vec![3], "exactly one strike, three ticks in");
    assert_eq!(
        behavior(&pool, enemy),
        Behavior::Chasing,
        "a 37 roll keeps chasing after the attack"
    );
}

#[test]
fn attacks_respect_the_cooldown() {
    let mut rng = ScriptedRandom::constant(0.375);
    let mut pool = EnemyPool::new(EnemyTuning::default());
    let map = open_map();
    let _ = pool.spawn(Vec2::new(610.0, 400.0), &mut rng);

    let mut strike_frames = Vec::new();
    for _ in 0..100 {
        let (commands, _) = tick(&mut pool, PLAYER, &map, &mut rng);
        if commands
            .iter()
            .any(|command| matches!(command, Command::DamagePlayer { .. }))
        {
            strike_frames.push(pool.frame());
        }
    }

    assert_eq!(strike_frames, vec![5, 66]);
}

#[test]
fn chasing_steps_toward_the_player() {
    // 0.5 rolls zero jitter and a chase speed of 1.1.
    let mut rng = ScriptedRandom::constant(0.5);
    let mut pool = EnemyPool::new(EnemyTuning::default());
    let map = open_map();
    let enemy = pool.spawn(Vec2::new(700.0, 400.0), &mut rng);

    let _ = tick(&mut pool, PLAYER, &map, &mut rng);
    assert_eq!(position(&pool, enemy), Vec2::new(700.0, 400.0));

    let _ = tick(&mut pool, PLAYER, &map, &mut rng);
    let moved = position(&pool, enemy);
    assert!((moved.x - 698.9).abs() < 1e-3, "expected a 1.1 step, got {moved:?}");
    assert!((moved.y - 400.0).abs() < 1e-3);
}

#[test]
fn lost_player_sends_enemy_back_to_wandering() {
    let mut rng = ScriptedRandom::constant(0.1);
    let mut pool = EnemyPool::new(EnemyTuning::default());
    let map = open_map();
    let enemy = pool.spawn(Vec2::new(610.0, 400.0), &mut rng);

    let _ = tick(&mut pool, PLAYER, &map, &mut rng);
    assert_eq!(behavior(&pool, enemy), Behavior::Chasing);

    let _ = tick(&mut pool, Vec2::new(1200.0, 400.0), &map, &mut rng);
    assert_eq!(behavior(&pool, enemy), Behavior::Wandering);
}

#[test]
fn wounded_enemy_retreats_then_gives_up_after_its_budget() {
    // 0.1 rolls a 10 on percentile checks, under the 15% retreat chance.
    let mut rng = ScriptedRandom::constant(0.1);
    let mut pool = EnemyPool::new(EnemyTuning::default());
    let map = open_map();
    let mut events = Vec::new();
    let enemy = pool.spawn(Vec2::new(610.0, 400.0), &mut rng);
    assert!(!pool.damage(enemy, 4.0, &mut events));

    let _ = tick(&mut pool, PLAYER, &map, &mut rng);
    let _ = tick(&mut pool, PLAYER, &map, &mut rng);
    assert_eq!(behavior(&pool, enemy), Behavior::Retreating);

    for _ in 0..180 {
        let chaser = position(&pool, enemy) - Vec2::new(10.0, 0.0);
        let _ = tick(&mut pool, chaser, &map, &mut rng);
        assert_eq!(behavior(&pool, enemy), Behavior::Retreating);
    }

    let before = position(&pool, enemy);
    let chaser = before - Vec2::new(10.0, 0.0);
    let _ = tick(&mut pool, chaser, &map, &mut rng);
    assert_eq!(behavior(&pool, enemy), Behavior::Chasing);
    assert!(position(&pool, enemy).x > before.x, "retreat moves away from the player");
}

#[test]
fn ground_in_the_chase_path_rolls_the_step_back() {
    let mut rng = ScriptedRandom::constant(0.5);
    let mut pool = EnemyPool::new(EnemyTuning::default());
    // Hit-box spans x 711..721, y 419..429; the wall ends one unit short of it.
    let map = WorldMap::new(10, vec![Tile::new(70, 42)], Vec::new()).expect("valid map");
    let enemy = pool.spawn(Vec2::new(700.0, 400.0), &mut rng);

    let _ = tick(&mut pool, PLAYER, &map, &mut rng);
    assert_eq!(behavior(&pool, enemy), Behavior::Chasing);

    for _ in 0..3 {
        let _ = tick(&mut pool, PLAYER, &map, &mut rng);
        assert_eq!(
            position(&pool, enemy),
            Vec2::new(700.0, 400.0),
            "a step into ground must be undone wholesale"
        );
        assert_eq!(behavior(&pool, enemy), Behavior::Chasing);
    }
}

#[test]
fn dying_enemies_neither_think_nor_move() {
    let mut rng = ScriptedRandom::constant(0.5);
    let mut pool = EnemyPool::new(EnemyTuning::default());
    let map = open_map();
    let mut events = Vec::new();
    let enemy = pool.spawn(Vec2::new(650.0, 400.0), &mut rng);
    assert_eq!(pool.live_count(), 1);

    assert!(pool.damage(enemy, 5.0, &mut events));
    assert_eq!(pool.live_count(), 0);

    for _ in 0..60 {
        let (commands, _) = tick(&mut pool, Vec2::new(640.0, 400.0), &map, &mut rng);
        assert!(commands.is_empty(), "dying enemies never strike");
        let snapshot = pool.snapshot(enemy).expect("still dying");
        assert_eq!(snapshot.position, Vec2::new(650.0, 400.0));
        assert_eq!(snapshot.behavior, Behavior::Wandering);
    }
}

#[test]
fn negative_or_nan_damage_never_heals() {
    let mut rng = ScriptedRandom::constant(0.5);
    let mut pool = EnemyPool::new(EnemyTuning::default());
    let mut events = Vec::new();
    let enemy = pool.spawn(PLAYER, &mut rng);

    assert!(!pool.damage(enemy, -5.0, &mut events));
    assert!(!pool.damage(enemy, f32::NAN, &mut events));
    let snapshot = pool.snapshot(enemy).expect("enemy is alive");
    assert_eq!(snapshot.health, snapshot.max_health, "health must not exceed maximum");
    assert_eq!(snapshot.bar_tier.get(), 0);
}

#[test]
fn damage_clamps_health_and_updates_bar_tier() {
    let mut rng = ScriptedRandom::constant(0.5);
    let mut pool = EnemyPool::new(EnemyTuning::default());
    let mut events = Vec::new();
    let enemy = pool.spawn(PLAYER, &mut rng);

    assert!(!pool.damage(enemy, 1.2, &mut events));
    let snapshot = pool.snapshot(enemy).expect("enemy is alive");
    assert!((snapshot.health - 3.8).abs() < 1e-5);
    assert_eq!(snapshot.bar_tier.get(), 1);

    assert!(pool.damage(enemy, 50.0, &mut events));
    let snapshot = pool.snapshot(enemy).expect("dying enemies remain visible");
    assert_eq!(snapshot.health, 0.0);
    assert_eq!(snapshot.bar_tier.get(), 7);
    assert_eq!(snapshot.lifecycle, Lifecycle::Dying { elapsed: 0 });
}

#[test]
fn kill_is_reported_once_and_death_lasts_its_full_duration() {
    let mut rng = ScriptedRandom::constant(0.5);
    let mut pool = EnemyPool::new(EnemyTuning::default());
    let map = open_map();
    let mut events = Vec::new();
    let enemy = pool.spawn(Vec2::new(100.0, 100.0), &mut rng);

    assert!(pool.damage(enemy, 5.0, &mut events));
    assert!(!pool.damage(enemy, 5.0, &mut events), "dying enemies ignore damage");
    let kills = events
        .iter()
        .filter(|event| matches!(event, Event::EnemyKilled { .. }))
        .count();
    assert_eq!(kills, 1);
    assert!(!pool.any_alive());
    assert_eq!(pool.closest_live(PLAYER), None);
    assert_eq!(pool.position_of(enemy), None);

    for _ in 0..119 {
        let (_, events) = tick(&mut pool, PLAYER, &map, &mut rng);
        assert!(events.is_empty());
    }
    let snapshot = pool.snapshot(enemy).expect("still dying");
    assert_eq!(snapshot.lifecycle, Lifecycle::Dying { elapsed: 119 });
    assert_eq!(snapshot.position, Vec2::new(100.0, 100.0));
    assert_eq!(snapshot.sprite_row, 4);

    let (_, events) = tick(&mut pool, PLAYER, &map, &mut rng);
    assert_eq!(events, vec![Event::EnemyRecycled { enemy }]);
    assert!(pool.snapshot(enemy).is_none());
    assert!(pool.snapshots().is_empty());

    let reused = pool.spawn(Vec2::new(300.0, 300.0), &mut rng);
    assert_eq!(reused, enemy, "vacant slots are refilled before the pool grows");
    assert_eq!(pool.capacity(), 1);
    assert_eq!(pool.position_of(reused), Some(Vec2::new(300.0, 300.0)));
}

#[test]
fn closest_live_prefers_first_slot_on_ties() {
    let mut rng = ScriptedRandom::constant(0.5);
    let mut pool = EnemyPool::new(EnemyTuning::default());
    let mut events = Vec::new();
    let left = pool.spawn(Vec2::new(550.0, 400.0), &mut rng);
    let right = pool.spawn(Vec2::new(650.0, 400.0), &mut rng);
    let near = pool.spawn(Vec2::new(600.0, 420.0), &mut rng);

    assert_eq!(pool.closest_live(PLAYER), Some(near));

    assert!(pool.damage(near, 10.0, &mut events));
    assert_eq!(pool.closest_live(PLAYER), Some(left));
    assert_ne!(left, right);

    let target = pool.closest_target(PLAYER).expect("live enemies remain");
    assert_eq!(target.enemy, left);
    assert_eq!(target.position, Vec2::new(550.0, 400.0));
}

#[test]
fn unknown_slots_are_ignored() {
    let mut pool = EnemyPool::new(EnemyTuning::default());
    let mut events = Vec::new();

    assert!(!pool.damage(EnemyId::new(3), 1.0, &mut events));
    assert!(events.is_empty());
    assert_eq!(pool.position_of(EnemyId::new(3)), None);
    assert_eq!(pool.closest_live(PLAYER), None);
}

#[test]
fn animation_frames_stay_within_their_cycles() {
    let mut rng = ScriptedRandom::constant(0.5);
    let mut pool = EnemyPool::new(EnemyTuning::default());
    let map = open_map();
    let mut events = Vec::new();
    let walker = pool.spawn(Vec2::new(100.0, 100.0), &mut rng);
    let dier = pool.spawn(Vec2::new(200.0, 100.0), &mut rng);
    assert!(pool.damage(dier, 5.0, &mut events));

    for _ in 0..110 {
        let _ = tick(&mut pool, PLAYER, &map, &mut rng);
        let walking = pool.snapshot(walker).expect("alive");
        let dying = pool.snapshot(dier).expect("dying");
        assert!(walking.animation_frame < 5);
        assert!(dying.animation_frame < 3);
    }
}

#[test]
fn reset_empties_the_pool() {
    let mut rng = ScriptedRandom::constant(0.5);
    let mut pool = EnemyPool::new(EnemyTuning::default());
    let map = open_map();
    let _ = pool.spawn(PLAYER, &mut rng);
    let _ = tick(&mut pool, PLAYER, &map, &mut rng);

    pool.reset();

    assert_eq!(pool.frame(), 0);
    assert_eq!(pool.capacity(), 0);
    assert!(!pool.any_alive());
}

fn open_map() -> WorldMap {
    WorldMap::new(32, Vec::new(), Vec::new()).expect("valid map")
}

fn tick(
    pool: &mut EnemyPool,
    player: Vec2,
    map: &WorldMap,
    rng: &mut ScriptedRandom,
) -> (Vec<Command>, Vec<Event>) {
    let mut commands = Vec::new();
    let mut events = Vec::new();
    pool.advance(player, map, rng, &mut commands, &mut events);
    (commands, events)
}

fn behavior(pool: &EnemyPool, enemy: EnemyId) -> Behavior {
    pool.snapshot(enemy).expect("enemy slot occupied").behavior
}

fn position(pool: &EnemyPool, enemy: EnemyId) -> Vec2 {
    pool.snapshot(enemy).expect("enemy slot occupied").position
}
