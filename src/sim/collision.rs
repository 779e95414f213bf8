//! Collision detection and response
//!
//! Every test is "projectile center strictly inside entity box". Passes run in
//! a fixed order so that a shot stopped by a shield can never also score a
//! kill, and so that damage is applied before the invasion check.

use glam::Vec2;

use super::director::game_over;
use super::entity::{Projectile, Shield, Tier, palette};
use super::state::{GameEvent, GameState, LossCause};
use crate::consts::*;

/// What happened during one resolution pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollisionReport {
    pub enemies_destroyed: u32,
    pub score_gained: u64,
    pub shield_hits: u32,
    pub player_hits: u32,
    pub invaded: bool,
}

/// Find the first intact shield containing the shot and let it absorb it.
/// Returns the index of the shield that took the hit.
pub fn absorb_by_shield<P: Projectile>(shot: &mut P, shields: &mut [Shield]) -> Option<usize> {
    if !shot.is_alive() {
        return None;
    }
    let center = shot.center();
    let (idx, shield) = shields
        .iter_mut()
        .enumerate()
        .find(|(_, s)| s.is_intact() && s.rect().contains_point(center))?;
    shield.absorb();
    shot.kill();
    Some(idx)
}

/// Player bullets vs enemies. Each bullet kills at most one enemy.
fn bullets_vs_enemies(state: &mut GameState, report: &mut CollisionReport) {
    let mut kills: Vec<(Tier, Vec2)> = Vec::new();

    for bullet in state.bullets.iter_mut().filter(|b| b.alive) {
        if let Some(enemy) = state
            .enemies
            .iter_mut()
            .find(|e| e.alive && e.rect().contains_point(bullet.pos))
        {
            enemy.alive = false;
            bullet.alive = false;
            kills.push((enemy.tier, enemy.rect().center()));
        }
    }

    for (tier, pos) in kills {
        state.score += tier.score_value();
        report.enemies_destroyed += 1;
        report.score_gained += tier.score_value();
        state.effects.flash(pos, palette::HIT_FLASH);
        state.push_event(GameEvent::EnemyDestroyed { tier, pos });
    }
}

/// Both kinds of bullet vs shields
fn bullets_vs_shields(state: &mut GameState, report: &mut CollisionReport) {
    let mut hits = Vec::new();
    for bullet in &mut state.bullets {
        if let Some(idx) = absorb_by_shield(bullet, &mut state.shields) {
            hits.push(idx);
        }
    }
    for bullet in &mut state.enemy_bullets {
        if let Some(idx) = absorb_by_shield(bullet, &mut state.shields) {
            hits.push(idx);
        }
    }

    for idx in hits {
        report.shield_hits += 1;
        let hp = state.shields[idx].hp;
        state.push_event(GameEvent::ShieldAbsorbed { shield: idx, hp });
    }
}

/// Enemy bullets vs the player ship. Stops as soon as the run ends.
fn enemy_bullets_vs_player(state: &mut GameState, report: &mut CollisionReport) {
    let player_box = state.player.rect();
    for i in 0..state.enemy_bullets.len() {
        if !state.is_running() {
            break;
        }
        let bullet = &mut state.enemy_bullets[i];
        if !bullet.alive || !player_box.contains_point(bullet.pos) {
            continue;
        }
        bullet.alive = false;
        report.player_hits += 1;
        damage_player(state);
    }
}

/// Apply one hit to the player: lose a life, shake, flash, maybe end the run
pub fn damage_player(state: &mut GameState) {
    state.lives = state.lives.saturating_sub(1);
    if state.shake_enabled {
        state.effects.shake(SHAKE_MAGNITUDE, SHAKE_DURATION_MS);
    }
    let player = &state.player;
    let at = Vec2::new(player.pos.x + player.size.x / 2.0, player.pos.y);
    state.effects.flash(at, palette::DAMAGE_FLASH);
    state.push_event(GameEvent::PlayerHit { lives: state.lives });
    log::debug!("Player hit, {} lives left", state.lives);

    if state.lives == 0 {
        game_over(state, LossCause::OutOfLives);
    }
}

/// Has any live enemy reached the ground line?
///
/// Only the current position is checked; an enemy is not swept along the
/// path it took this step.
pub fn swarm_landed(state: &GameState) -> bool {
    state
        .enemies
        .iter()
        .any(|e| e.alive && e.rect().bottom() >= state.world.ground)
}

/// Drop everything marked dead
pub fn purge_dead(state: &mut GameState) {
    state.bullets.retain(|b| b.alive);
    state.enemy_bullets.retain(|b| b.alive);
    state.enemies.retain(|e| e.alive);
}

/// Run all collision passes in order, then purge
pub fn resolve(state: &mut GameState) -> CollisionReport {
    let mut report = CollisionReport::default();

    bullets_vs_enemies(state, &mut report);
    bullets_vs_shields(state, &mut report);
    enemy_bullets_vs_player(state, &mut report);

    if state.is_running() && swarm_landed(state) {
        report.invaded = true;
        game_over(state, LossCause::Invaded);
    }

    purge_dead(state);
    report
}
