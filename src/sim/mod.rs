//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (insertion order of every collection)
//! - No rendering or platform dependencies

pub mod collision;
pub mod director;
pub mod entity;
pub mod rect;
pub mod state;
pub mod swarm;
pub mod tick;

pub use collision::{CollisionReport, resolve};
pub use director::{check_level_complete, game_over, grid_size, setup_level, start, toggle_pause};
pub use entity::{
    Advance, Bullet, Enemy, EnemyBullet, EntityKind, Player, Projectile, Render, Shield, Sprite,
    Tier,
};
pub use rect::Rect;
pub use state::{
    Direction, Effects, Flash, GameEvent, GamePhase, GameState, Hud, LossCause, RunSummary, Shake,
    SwarmState, World,
};
pub use tick::{TickInput, advance, tick};
