//! Swarm controller
//!
//! Moves every live enemy as one rigid formation, bounces it off the world
//! edges and decides who shoots next. Enemies never move on their own.

use std::collections::BTreeMap;

use rand::Rng;

use super::entity::{Enemy, EnemyBullet};
use super::state::{Direction, GameEvent, GameState, SwarmState, World};
use crate::consts::*;

impl SwarmState {
    /// Fresh swarm parameters for a level
    pub fn for_level(level: u32) -> Self {
        let level_f = level as f32;
        Self {
            speed: 24.0 + (level_f * 8.0).min(90.0),
            direction: Direction::Right,
            drop: 18.0 + (level_f * 3.0).min(42.0),
            fire_timer: 0.0,
        }
    }
}

/// Seconds between enemy shots at a level
pub fn fire_interval(level: u32) -> f32 {
    (FIRE_INTERVAL_BASE - level as f32 * FIRE_INTERVAL_PER_LEVEL).max(FIRE_INTERVAL_MIN)
}

/// Horizontal extent of the live formation: (min left edge, max right edge)
pub fn formation_bounds(enemies: &[Enemy]) -> Option<(f32, f32)> {
    enemies
        .iter()
        .filter(|e| e.alive)
        .fold(None, |acc, e| {
            let (min_x, max_x) = acc.unwrap_or((f32::INFINITY, f32::NEG_INFINITY));
            Some((min_x.min(e.rect().left()), max_x.max(e.rect().right())))
        })
}

/// Flip the heading if the formation touches the edge it is heading toward.
/// Returns true when a bounce happened. At most one flip per call.
pub fn bounce(swarm: &mut SwarmState, bounds: (f32, f32), world: &World) -> bool {
    let (min_x, max_x) = bounds;
    let hit_left = min_x <= EDGE_MARGIN && swarm.direction == Direction::Left;
    let hit_right = max_x >= world.width - EDGE_MARGIN && swarm.direction == Direction::Right;
    if hit_left || hit_right {
        swarm.direction = swarm.direction.flipped();
        true
    } else {
        false
    }
}

/// Step every live enemy down and speed the swarm up
pub fn drop_swarm(swarm: &mut SwarmState, enemies: &mut [Enemy]) {
    for enemy in enemies.iter_mut().filter(|e| e.alive) {
        enemy.pos.y += swarm.drop;
    }
    swarm.speed *= SWARM_ACCEL;
}

/// Column bucket for shooter selection. Halves round up.
fn column_of(enemy: &Enemy) -> i32 {
    (enemy.pos.x / SHOOTER_COLUMN_WIDTH + 0.5).floor() as i32
}

/// Lowest live enemy in each column bucket, ordered by column
pub fn front_line(enemies: &[Enemy]) -> Vec<usize> {
    let mut columns: BTreeMap<i32, usize> = BTreeMap::new();
    for (idx, enemy) in enemies.iter().enumerate().filter(|(_, e)| e.alive) {
        columns
            .entry(column_of(enemy))
            .and_modify(|best| {
                if enemy.pos.y > enemies[*best].pos.y {
                    *best = idx;
                }
            })
            .or_insert(idx);
    }
    columns.into_values().collect()
}

/// Advance the swarm one step: bounce, drop, slide, then maybe fire
pub fn update(state: &mut GameState, dt: f32) {
    if let Some(bounds) = formation_bounds(&state.enemies) {
        if bounce(&mut state.swarm, bounds, &state.world) {
            drop_swarm(&mut state.swarm, &mut state.enemies);
            log::debug!(
                "Swarm bounced {:?}, speed now {:.1}",
                state.swarm.direction,
                state.swarm.speed
            );
        }
    }

    let dx = state.swarm.speed * dt * state.swarm.direction.sign();
    for enemy in state.enemies.iter_mut().filter(|e| e.alive) {
        enemy.pos.x += dx;
    }

    state.swarm.fire_timer -= dt;
    if state.swarm.fire_timer <= 0.0 {
        let shooters = front_line(&state.enemies);
        if shooters.is_empty() {
            return;
        }
        state.swarm.fire_timer = fire_interval(state.level);

        let pick = shooters[state.rng.random_range(0..shooters.len())];
        let muzzle = state.enemies[pick].muzzle();
        state.enemy_bullets.push(EnemyBullet::new(muzzle));
        state.push_event(GameEvent::EnemyFired { pos: muzzle });
        log::trace!("Enemy fired from {:?}", muzzle);
    }
}
