//! Swarm Defender - simulation core for a swarm-defense arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, swarm, collisions, lifecycle)
//! - `driver`: Per-frame loop glue (dt clamping, effect timers, event fan-out)
//! - `platform`: Presentation contract and a headless implementation
//! - `settings`: Data-driven configuration loaded from JSON

pub mod driver;
pub mod platform;
pub mod settings;
pub mod sim;

pub use driver::{Driver, Frame};
pub use settings::{Settings, SettingsError};

/// Game configuration constants
pub mod consts {
    /// Largest simulation step a single frame may take (seconds)
    pub const MAX_FRAME_DT: f32 = 0.033;

    /// Default world dimensions
    pub const WORLD_WIDTH: f32 = 800.0;
    pub const WORLD_HEIGHT: f32 = 600.0;
    /// Ground line sits this far above the bottom of the world
    pub const GROUND_OFFSET: f32 = 40.0;
    /// Horizontal margin kept by the ship and used as the swarm bounce bound
    pub const EDGE_MARGIN: f32 = 10.0;
    /// Projectiles die this far outside the world
    pub const OFFSCREEN_MARGIN: f32 = 20.0;

    /// Player ship
    pub const PLAYER_WIDTH: f32 = 46.0;
    pub const PLAYER_HEIGHT: f32 = 18.0;
    pub const PLAYER_SPEED: f32 = 320.0; // px/sec
    pub const PLAYER_RELOAD: f32 = 0.25; // seconds between shots
    pub const START_LIVES: u8 = 3;

    /// Projectiles
    pub const BULLET_RADIUS: f32 = 3.0;
    pub const BULLET_SPEED: f32 = 520.0;
    pub const ENEMY_BULLET_SPEED: f32 = 260.0;

    /// Enemies and formation layout
    pub const ENEMY_WIDTH: f32 = 36.0;
    pub const ENEMY_HEIGHT: f32 = 22.0;
    pub const GRID_GAP_X: f32 = 16.0;
    pub const GRID_GAP_Y: f32 = 18.0;
    pub const GRID_TOP: f32 = 60.0;
    pub const MAX_ROWS: u32 = 8;
    pub const MAX_COLS: u32 = 12;

    /// Swarm behaviour
    pub const SWARM_ACCEL: f32 = 1.05; // speed multiplier per bounce
    pub const SHOOTER_COLUMN_WIDTH: f32 = 52.0;
    pub const FIRE_INTERVAL_BASE: f32 = 1.2;
    pub const FIRE_INTERVAL_PER_LEVEL: f32 = 0.08;
    pub const FIRE_INTERVAL_MIN: f32 = 0.35;

    /// Shields
    pub const SHIELD_WIDTH: f32 = 70.0;
    pub const SHIELD_HEIGHT: f32 = 26.0;
    pub const SHIELD_HP: u8 = 8;
    pub const SHIELD_COUNT: usize = 3;
    pub const SHIELD_EDGE_INSET: f32 = 80.0;
    pub const SHIELD_RISE: f32 = 110.0; // distance above the ground line

    /// Visual feedback
    pub const FLASH_LIFETIME: f32 = 0.5;
    pub const SHAKE_MAGNITUDE: f32 = 10.0;
    pub const SHAKE_DURATION_MS: f32 = 300.0;
    pub const SHAKE_INTERVAL_MS: f32 = 16.0;
}
