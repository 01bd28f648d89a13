//! Game-loop logic.
//!
//! `tick` advances the whole world by one frame; input handlers run between
//! ticks. All randomness comes through an injected `Rng` and all time through
//! the `now_ms` argument, so a seeded RNG and fixed timestamps make every
//! tick reproducible.

use rand::Rng;
use tracing::{debug, info, trace};

use crate::config::GameConfig;
use crate::entities::{Bullet, Crosshair, Enemy, Shooter};
use crate::geometry::Vector;
use crate::input::InputEvent;
use crate::physics::{Damageable, Kinematic};

/// The entire game state, owned by the loop.
#[derive(Clone, Debug)]
pub struct GameState {
    pub config: GameConfig,
    pub shooter: Shooter,
    pub crosshair: Crosshair,
    pub bullets: Vec<Bullet>,
    pub enemies: Vec<Enemy>,
    pub frame: u64,
    /// Timestamp of the previous tick; `None` before the first one.
    pub last_tick_ms: Option<f64>,
    pub next_enemy_id: u64,
}

/// What happened during one tick.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickReport {
    pub dt_ms: f64,
    pub spawned: usize,
    pub hits: usize,
    pub bullets_culled: usize,
    pub enemies_destroyed: usize,
    pub enemies_escaped: usize,
}

// ── Constructors ─────────────────────────────────────────────────────────────

/// Empty arena with the shooter centred on the bottom edge.
pub fn init_state(config: GameConfig) -> GameState {
    let shooter = Shooter::new(config.arena, config.shooter.size);
    GameState {
        shooter,
        crosshair: Crosshair::default(),
        bullets: Vec::new(),
        enemies: Vec::new(),
        frame: 0,
        last_tick_ms: None,
        next_enemy_id: 1,
        config,
    }
}

// ── Input-driven state transitions ──────────────────────────────────────────

pub fn handle_input(state: &mut GameState, event: InputEvent) {
    match event {
        InputEvent::PointerMoved(at) => pointer_moved(state, at),
        InputEvent::Click(at) => {
            pointer_moved(state, at);
            fire(state);
        }
        InputEvent::Key { repeat: false } | InputEvent::ContextAction => fire(state),
        InputEvent::Key { repeat: true } | InputEvent::Quit => {}
    }
}

pub fn pointer_moved(state: &mut GameState, at: Vector) {
    state.shooter.track_pointer(at.x, state.config.arena);
    state.crosshair.position = at;
}

/// Launch one bullet straight up from the shooter's muzzle.
pub fn fire(state: &mut GameState) {
    let velocity = Vector::new(0.0, -state.config.bullet.speed);
    let bullet = Bullet::new(state.shooter.muzzle(), velocity, state.config.bullet.size);
    trace!(x = bullet.body.position.x, "bullet fired");
    state.bullets.push(bullet);
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

/// Advance the simulation to `now_ms`.
///
/// Order within a tick: maybe spawn, integrate bullets, integrate enemies,
/// resolve hits, poll hp bars, cull. Every entity sees the same `dt`, taken
/// once from the previous tick's timestamp (zero on the first tick).
pub fn tick(state: &mut GameState, now_ms: f64, rng: &mut impl Rng) -> TickReport {
    let dt_ms = state
        .last_tick_ms
        .map(|last| (now_ms - last).max(0.0))
        .unwrap_or(0.0);
    state.last_tick_ms = Some(now_ms);
    state.frame += 1;

    let mut report = TickReport {
        dt_ms,
        ..TickReport::default()
    };

    // ── 1. Spawn ─────────────────────────────────────────────────────────────
    if rng.gen_bool(state.config.enemy.spawn_probability) {
        spawn_enemy(state, rng);
        report.spawned = 1;
    }

    // ── 2. Integrate ─────────────────────────────────────────────────────────
    for bullet in state.bullets.iter_mut() {
        bullet.advance(dt_ms);
    }
    for enemy in state.enemies.iter_mut() {
        enemy.advance(dt_ms);
    }

    // ── 3. Collisions ────────────────────────────────────────────────────────
    report.hits = resolve_hits(&mut state.enemies, &mut state.bullets, now_ms);

    // ── 4. Hp bar timers ─────────────────────────────────────────────────────
    for enemy in state.enemies.iter_mut() {
        enemy.hp_bar.update(now_ms);
    }

    // ── 5. Cull ──────────────────────────────────────────────────────────────
    let culled = cull(state);
    report.bullets_culled = culled.bullets;
    report.enemies_destroyed = culled.enemies_destroyed;
    report.enemies_escaped = culled.enemies_escaped;

    report
}

/// Place one enemy at a random x, just above the visible top edge.
pub fn spawn_enemy(state: &mut GameState, rng: &mut impl Rng) {
    let cfg = &state.config.enemy;
    let span = (state.config.arena.w() - cfg.size.w()).max(0.0);
    let position = Vector::new(rng.gen::<f64>() * span, -cfg.size.h());

    let id = state.next_enemy_id;
    state.next_enemy_id += 1;

    debug!(id, x = position.x, "enemy spawned");
    state
        .enemies
        .push(Enemy::new(id, position, cfg, &state.config.hp_bar));
}

/// Test every live bullet against every live enemy; returns the hit count.
///
/// A bullet that lands is only flagged, so it stays in the collection until
/// `cull` but cannot land twice. An enemy already at zero hp stops absorbing
/// bullets for the rest of the tick.
pub fn resolve_hits(enemies: &mut [Enemy], bullets: &mut [Bullet], now_ms: f64) -> usize {
    let mut hits = 0;

    for enemy in enemies.iter_mut() {
        for bullet in bullets.iter_mut() {
            if bullet.hit || enemy.hittable.is_destroyed() {
                continue;
            }
            if enemy.collides(&*bullet) {
                let hp = enemy.receive_hit(bullet.velocity(), now_ms);
                bullet.hit = true;
                hits += 1;
                debug!(id = enemy.id, hp, "enemy hit");
            }
        }
    }

    hits
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Culled {
    pub bullets: usize,
    pub enemies_destroyed: usize,
    pub enemies_escaped: usize,
}

/// Drop every bullet and enemy whose liveness check fails.
pub fn cull(state: &mut GameState) -> Culled {
    let arena = state.config.arena;
    let mut culled = Culled::default();

    let before = state.bullets.len();
    state.bullets.retain(Bullet::is_live);
    culled.bullets = before - state.bullets.len();

    state.enemies.retain(|enemy| {
        if enemy.is_live(arena) {
            return true;
        }
        if enemy.hittable.is_destroyed() {
            info!(id = enemy.id, "enemy destroyed");
            culled.enemies_destroyed += 1;
        } else {
            debug!(id = enemy.id, "enemy escaped");
            culled.enemies_escaped += 1;
        }
        false
    });

    culled
}
