//! Simulation step
//!
//! Advances every entity by one frame in a fixed order: player, player
//! bullets, swarm, enemy bullets, then collisions.

use super::collision;
use super::director;
use super::entity::Advance;
use super::state::{GamePhase, GameState};
use super::swarm;

/// Control intent for a single step
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Move left (held)
    pub left: bool,
    /// Move right (held)
    pub right: bool,
    /// Fire (held; repeats at the reload rate)
    pub fire: bool,
    /// Start or restart a run (one-shot)
    pub start: bool,
    /// Pause toggle (one-shot)
    pub pause: bool,
}

/// Advance the game state by one frame of `dt` seconds.
///
/// Does nothing unless a run is actively playing.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if state.phase != GamePhase::Playing {
        return;
    }
    let dt = dt.clamp(0.0, state.max_frame_dt);
    state.time_ticks += 1;

    let world = state.world;
    if let Some(shot) = state.player.update(dt, input, &world) {
        log::trace!("Player fired from {:?}", shot.pos);
        state.bullets.push(shot);
    }

    for bullet in &mut state.bullets {
        bullet.advance(dt, &world);
    }
    state.bullets.retain(|b| b.alive);

    swarm::update(state, dt);

    for bullet in &mut state.enemy_bullets {
        bullet.advance(dt, &world);
    }
    state.enemy_bullets.retain(|b| b.alive);

    collision::resolve(state);
}

/// One full frame of game logic: lifecycle inputs, the step itself, then the
/// post-step level check. Runs the check even while paused; it only acts
/// when actively playing.
pub fn advance(state: &mut GameState, input: &TickInput, dt: f32) {
    if input.start && !state.is_running() {
        director::start(state);
    }
    if input.pause {
        director::toggle_pause(state);
    }

    tick(state, input, dt);

    director::check_level_complete(state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::entity::{Enemy, EnemyBullet, Tier};
    use crate::sim::state::Direction;
    use glam::Vec2;

    fn playing() -> GameState {
        let mut state = GameState::new(12345);
        director::start(&mut state);
        state.drain_events();
        state
    }

    #[test]
    fn test_tick_ignored_outside_play() {
        let mut state = GameState::new(1);
        let input = TickInput {
            fire: true,
            ..Default::default()
        };
        tick(&mut state, &input, 0.016);
        assert_eq!(state.time_ticks, 0);
        assert!(state.bullets.is_empty());
    }

    #[test]
    fn test_start_input_begins_run() {
        let mut state = GameState::new(1);
        let input = TickInput {
            start: true,
            ..Default::default()
        };
        advance(&mut state, &input, 0.016);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.level, 1);
    }

    #[test]
    fn test_start_input_ignored_mid_run() {
        let mut state = playing();
        state.score = 50;
        let input = TickInput {
            start: true,
            ..Default::default()
        };
        advance(&mut state, &input, 0.016);
        assert_eq!(state.score, 50);
    }

    #[test]
    fn test_pause_freezes_simulation() {
        let mut state = playing();
        let pause = TickInput {
            pause: true,
            ..Default::default()
        };
        advance(&mut state, &pause, 0.016);
        assert_eq!(state.phase, GamePhase::Paused);

        let enemies_before: Vec<Vec2> = state.enemies.iter().map(|e| e.pos).collect();
        let ticks = state.time_ticks;
        for _ in 0..10 {
            advance(&mut state, &TickInput::default(), 0.016);
        }
        let enemies_after: Vec<Vec2> = state.enemies.iter().map(|e| e.pos).collect();
        assert_eq!(enemies_before, enemies_after);
        assert_eq!(state.time_ticks, ticks);

        advance(&mut state, &pause, 0.016);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_dt_is_clamped() {
        let mut state = playing();
        let x0 = state.enemies[0].pos.x;
        let speed = state.swarm.speed;
        tick(&mut state, &TickInput::default(), 5.0);
        let moved = state.enemies[0].pos.x - x0;
        assert!((moved - speed * MAX_FRAME_DT).abs() < 1e-3);
    }

    #[test]
    fn test_swarm_bounce_on_right_edge() {
        let mut state = playing();
        state.shields.clear();
        state.enemies = vec![Enemy::new(Vec2::new(WORLD_WIDTH - 45.0, 100.0), Tier::One)];
        let speed = state.swarm.speed;
        let drop = state.swarm.drop;

        tick(&mut state, &TickInput::default(), 0.016);

        assert_eq!(state.swarm.direction, Direction::Left);
        assert_eq!(state.enemies[0].pos.y, 100.0 + drop);
        assert!((state.swarm.speed - speed * SWARM_ACCEL).abs() < 1e-4);

        // Moving away from the edge: no further flips
        for _ in 0..30 {
            tick(&mut state, &TickInput::default(), 0.016);
        }
        assert_eq!(state.swarm.direction, Direction::Left);
        assert_eq!(state.enemies[0].pos.y, 100.0 + drop);
    }

    #[test]
    fn test_swarm_bounce_on_left_edge() {
        let mut state = playing();
        state.shields.clear();
        state.swarm.direction = Direction::Left;
        state.enemies = vec![Enemy::new(Vec2::new(5.0, 100.0), Tier::One)];
        let speed = state.swarm.speed;
        let drop = state.swarm.drop;

        tick(&mut state, &TickInput::default(), 0.016);

        assert_eq!(state.swarm.direction, Direction::Right);
        assert_eq!(state.enemies[0].pos.y, 100.0 + drop);
        assert!((state.swarm.speed - speed * SWARM_ACCEL).abs() < 1e-4);
        // Moved right in the same step
        assert!(state.enemies[0].pos.x > 5.0);

        for _ in 0..30 {
            tick(&mut state, &TickInput::default(), 0.016);
        }
        assert_eq!(state.swarm.direction, Direction::Right);
        assert_eq!(state.enemies[0].pos.y, 100.0 + drop);
    }

    #[test]
    fn test_enemy_shot_hits_player() {
        let mut state = playing();
        state.swarm.fire_timer = 10.0;
        let target = state.player.rect().center();
        // Far enough above that one step lands it inside the ship
        state
            .enemy_bullets
            .push(EnemyBullet::new(target - Vec2::new(0.0, 2.0)));

        tick(&mut state, &TickInput::default(), 0.016);

        assert_eq!(state.lives, START_LIVES - 1);
        assert!(state.enemy_bullets.is_empty());
    }

    #[test]
    fn test_clearing_the_swarm_levels_up_same_frame() {
        let mut state = playing();
        state.enemies.truncate(1);
        let center = state.enemies[0].rect().center();
        state.bullets.push(crate::sim::entity::Bullet::new(center + Vec2::new(0.0, 5.0)));
        state.swarm.fire_timer = 10.0;

        advance(&mut state, &TickInput::default(), 0.01);

        assert_eq!(state.level, 2);
        assert_eq!(state.enemies.len(), 54);
        assert!(state.score > 0);
    }

    #[test]
    fn test_determinism() {
        let mut a = playing();
        let mut b = playing();
        let inputs = [
            TickInput {
                left: true,
                fire: true,
                ..Default::default()
            },
            TickInput {
                right: true,
                ..Default::default()
            },
            TickInput::default(),
        ];
        for i in 0..600 {
            let input = &inputs[i % inputs.len()];
            advance(&mut a, input, 0.016);
            advance(&mut b, input, 0.016);
        }
        assert_eq!(a.score, b.score);
        assert_eq!(a.lives, b.lives);
        assert_eq!(a.enemy_bullets.len(), b.enemy_bullets.len());
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }
}
