//! Level director and run lifecycle
//!
//! ```text
//! Menu -> Playing <-> Paused
//! Playing -> (level cleared) -> Playing at level + 1
//! Playing -> GameOver -> Playing (restart)
//! ```

use glam::Vec2;

use super::entity::{Enemy, Player, Shield, Tier};
use super::state::{GameEvent, GamePhase, GameState, LossCause, RunSummary, SwarmState};
use crate::consts::*;

/// Formation size for a level: (rows, cols)
pub fn grid_size(level: u32) -> (u32, u32) {
    let rows = (5 + level / 2).min(MAX_ROWS);
    let cols = (8 + (level as f32 / 1.5).floor() as u32).min(MAX_COLS);
    (rows, cols)
}

/// Width and height of a `rows` x `cols` formation (px)
pub fn formation_extent(rows: u32, cols: u32) -> Vec2 {
    let span = |n: u32, cell: f32, gap: f32| n as f32 * cell + n.saturating_sub(1) as f32 * gap;
    Vec2::new(
        span(cols, ENEMY_WIDTH, GRID_GAP_X),
        span(rows, ENEMY_HEIGHT, GRID_GAP_Y),
    )
}

/// Begin a new run from any phase
pub fn start(state: &mut GameState) {
    state.lives = START_LIVES;
    state.score = 0;
    state.level = 1;
    state.time_ticks = 0;
    state.last_run = None;
    state.effects = Default::default();
    state.player = Player::new(&state.world);
    state.phase = GamePhase::Playing;
    state.push_event(GameEvent::Started);
    log::info!("Run started (seed {})", state.seed);

    setup_level(state, 1);
}

/// Clear the field and lay out the formation and shields for `level`
pub fn setup_level(state: &mut GameState, level: u32) {
    state.level = level;
    state.bullets.clear();
    state.enemy_bullets.clear();
    state.enemies.clear();
    state.shields.clear();

    let (rows, cols) = grid_size(level);
    let pitch_x = ENEMY_WIDTH + GRID_GAP_X;
    let pitch_y = ENEMY_HEIGHT + GRID_GAP_Y;
    let start_x = (state.world.width - formation_extent(rows, cols).x) / 2.0;

    for row in 0..rows {
        for col in 0..cols {
            let pos = Vec2::new(
                start_x + col as f32 * pitch_x,
                GRID_TOP + row as f32 * pitch_y,
            );
            state.enemies.push(Enemy::new(pos, Tier::for_row(row)));
        }
    }

    // Evenly spaced between the edge insets, centered on each slot
    let span = state.world.width - 2.0 * SHIELD_EDGE_INSET;
    let step = span / (SHIELD_COUNT as f32 - 1.0);
    let shield_y = state.world.ground - SHIELD_RISE;
    for i in 0..SHIELD_COUNT {
        let x = SHIELD_EDGE_INSET + i as f32 * step - SHIELD_WIDTH / 2.0;
        state.shields.push(Shield::new(Vec2::new(x, shield_y)));
    }

    state.swarm = SwarmState::for_level(level);

    log::info!(
        "Level {}: {}x{} swarm, speed {:.0}, drop {:.0}",
        level,
        rows,
        cols,
        state.swarm.speed,
        state.swarm.drop
    );
    state.push_event(GameEvent::LevelStarted { level });
}

/// Flip between Playing and Paused. Does nothing outside a run.
///
/// Toggling twice leaves the simulation unchanged apart from the queued
/// `Paused` and `Resumed` notifications.
pub fn toggle_pause(state: &mut GameState) {
    match state.phase {
        GamePhase::Playing => {
            state.phase = GamePhase::Paused;
            state.push_event(GameEvent::Paused);
        }
        GamePhase::Paused => {
            state.phase = GamePhase::Playing;
            state.push_event(GameEvent::Resumed);
        }
        GamePhase::Menu | GamePhase::GameOver => {}
    }
}

/// End the run and remember how it went
pub fn game_over(state: &mut GameState, cause: LossCause) {
    if state.phase == GamePhase::GameOver {
        return;
    }
    state.phase = GamePhase::GameOver;
    state.last_run = Some(RunSummary {
        score: state.score,
        level: state.level,
        cause,
    });
    log::info!(
        "Game over ({:?}): score {}, level {}",
        cause,
        state.score,
        state.level
    );
    state.push_event(GameEvent::GameOver {
        score: state.score,
        level: state.level,
        cause,
    });
}

/// Post-step invariant check: an empty swarm while actively playing means the
/// level is cleared. Returns true when a new level was set up.
pub fn check_level_complete(state: &mut GameState) -> bool {
    if state.phase != GamePhase::Playing || !state.enemies.is_empty() {
        return false;
    }
    let cleared = state.level;
    state.push_event(GameEvent::LevelCleared { level: cleared });
    log::info!("Level {} cleared", cleared);
    setup_level(state, cleared + 1);
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_size_scaling() {
        assert_eq!(grid_size(1), (5, 8));
        assert_eq!(grid_size(2), (6, 9));
        assert_eq!(grid_size(3), (6, 10));
        assert_eq!(grid_size(6), (8, 12));
        assert_eq!(grid_size(30), (8, 12));
    }

    #[test]
    fn test_start_resets_run() {
        let mut state = GameState::new(5);
        state.score = 999;
        state.lives = 1;
        state.level = 7;
        state.phase = GamePhase::GameOver;

        start(&mut state);

        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, START_LIVES);
        assert_eq!(state.level, 1);
        assert_eq!(state.enemies.len(), 40);
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::Started, GameEvent::LevelStarted { level: 1 }]
        );
    }

    #[test]
    fn test_level_three_layout() {
        let mut state = GameState::new(5);
        setup_level(&mut state, 3);

        assert_eq!(state.enemies.len(), 60);
        let tiers: Vec<Tier> = state.enemies.chunks(10).map(|row| row[0].tier).collect();
        assert_eq!(
            tiers,
            vec![Tier::Three, Tier::Three, Tier::Two, Tier::Two, Tier::One, Tier::One]
        );
        // Every row shares its tier
        for row in state.enemies.chunks(10) {
            assert!(row.iter().all(|e| e.tier == row[0].tier));
        }
    }

    #[test]
    fn test_formation_is_centered() {
        let mut state = GameState::new(5);
        setup_level(&mut state, 1);
        let left = state.enemies.first().map(|e| e.rect().left()).unwrap_or_default();
        let right = state.enemies.last().map(|e| e.rect().right()).unwrap_or_default();
        assert!((left - (WORLD_WIDTH - right)).abs() < 0.001);
        assert_eq!(state.enemies[0].pos.y, GRID_TOP);
    }

    #[test]
    fn test_three_shields_near_ground() {
        let mut state = GameState::new(5);
        setup_level(&mut state, 1);
        assert_eq!(state.shields.len(), 3);
        let xs: Vec<f32> = state.shields.iter().map(|s| s.pos.x).collect();
        assert_eq!(xs, vec![45.0, 365.0, 685.0]);
        assert!(state.shields.iter().all(|s| s.pos.y == state.world.ground - SHIELD_RISE));
        assert!(state.shields.iter().all(|s| s.hp == SHIELD_HP));
    }

    #[test]
    fn test_setup_clears_projectiles_and_resets_swarm() {
        let mut state = GameState::new(5);
        start(&mut state);
        state.swarm.speed = 500.0;
        state.bullets.push(crate::sim::entity::Bullet::new(Vec2::ZERO));
        setup_level(&mut state, 2);
        assert!(state.bullets.is_empty());
        assert_eq!(state.swarm.speed, 40.0);
        assert_eq!(state.swarm.drop, 24.0);
    }

    #[test]
    fn test_toggle_pause_twice_is_identity() {
        let mut state = GameState::new(5);
        start(&mut state);
        state.drain_events();
        let before = serde_json::to_string(&state).unwrap();

        toggle_pause(&mut state);
        assert_eq!(state.phase, GamePhase::Paused);
        toggle_pause(&mut state);

        assert_eq!(serde_json::to_string(&state).unwrap(), before);
        // Only the notifications differ, and those are not serialized
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::Paused, GameEvent::Resumed]
        );
    }

    #[test]
    fn test_formation_extent() {
        assert_eq!(formation_extent(5, 8), Vec2::new(400.0, 182.0));
        assert_eq!(formation_extent(1, 1), Vec2::new(ENEMY_WIDTH, ENEMY_HEIGHT));
        assert_eq!(formation_extent(0, 0), Vec2::ZERO);
    }

    #[test]
    fn test_toggle_pause_ignored_outside_run() {
        let mut state = GameState::new(5);
        toggle_pause(&mut state);
        assert_eq!(state.phase, GamePhase::Menu);
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_game_over_records_summary_once() {
        let mut state = GameState::new(5);
        start(&mut state);
        state.score = 120;
        game_over(&mut state, LossCause::Invaded);
        game_over(&mut state, LossCause::OutOfLives);
        assert_eq!(
            state.last_run,
            Some(RunSummary {
                score: 120,
                level: 1,
                cause: LossCause::Invaded
            })
        );
    }

    #[test]
    fn test_level_complete_advances() {
        let mut state = GameState::new(5);
        start(&mut state);
        state.enemies.clear();
        assert!(check_level_complete(&mut state));
        assert_eq!(state.level, 2);
        assert_eq!(state.enemies.len(), 54);
    }

    #[test]
    fn test_level_complete_waits_while_paused() {
        let mut state = GameState::new(5);
        start(&mut state);
        state.enemies.clear();
        toggle_pause(&mut state);
        assert!(!check_level_complete(&mut state));
        assert_eq!(state.level, 1);
    }
}
