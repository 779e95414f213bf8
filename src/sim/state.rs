//! Game state and core simulation types
//!
//! Everything the simulation mutates lives in [`GameState`]. The renderer gets
//! read-only access to it; nothing here knows how it is drawn.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entity::{Bullet, Enemy, EnemyBullet, Player, Render, Shield, Sprite, Tier};
use crate::consts::*;
use crate::settings::Settings;

/// Current phase of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, nothing simulated yet
    Menu,
    /// Active gameplay
    Playing,
    /// Simulation suspended, frame loop still running
    Paused,
    /// Run ended
    GameOver,
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LossCause {
    /// Lives ran out
    OutOfLives,
    /// An enemy reached the ground line
    Invaded,
}

/// Final result kept around for the game over screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub score: u64,
    pub level: u32,
    pub cause: LossCause,
}

/// Lifecycle and gameplay notifications for the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Started,
    LevelStarted { level: u32 },
    LevelCleared { level: u32 },
    Paused,
    Resumed,
    EnemyDestroyed { tier: Tier, pos: Vec2 },
    ShieldAbsorbed { shield: usize, hp: u8 },
    PlayerHit { lives: u8 },
    EnemyFired { pos: Vec2 },
    GameOver { score: u64, level: u32, cause: LossCause },
}

/// Playfield dimensions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct World {
    pub width: f32,
    pub height: f32,
    /// y of the ground line; enemies touching it end the run
    pub ground: f32,
}

impl World {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            ground: height - GROUND_OFFSET,
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new(WORLD_WIDTH, WORLD_HEIGHT)
    }
}

/// Horizontal heading of the swarm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    /// -1 for left, +1 for right
    pub fn sign(self) -> f32 {
        match self {
            Direction::Left => -1.0,
            Direction::Right => 1.0,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// Shared motion/fire state of the whole enemy formation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwarmState {
    /// Horizontal speed magnitude (px/sec)
    pub speed: f32,
    pub direction: Direction,
    /// Vertical step applied on every bounce
    pub drop: f32,
    /// Seconds until the next enemy shot
    pub fire_timer: f32,
}

impl Default for SwarmState {
    fn default() -> Self {
        Self {
            speed: 28.0,
            direction: Direction::Right,
            drop: 18.0,
            fire_timer: 0.0,
        }
    }
}

/// A short-lived burst drawn at a point
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flash {
    pub pos: Vec2,
    pub color: u32,
    /// Seconds left; also used as the draw alpha
    pub ttl: f32,
}

/// Screen shake slot. A new shake replaces the current one.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Shake {
    pub magnitude: f32,
    pub remaining_ms: f32,
}

impl Shake {
    pub fn is_active(&self) -> bool {
        self.remaining_ms > 0.0
    }

    /// One beat of the shake interval timer: burn down the duration and pick
    /// an offset in `[-magnitude, magnitude]` on both axes.
    pub fn tick_interval<R: Rng>(&mut self, interval_ms: f32, rng: &mut R) -> Vec2 {
        if !self.is_active() {
            return Vec2::ZERO;
        }
        self.remaining_ms -= interval_ms;
        let dx = (rng.random::<f32>() * 2.0 - 1.0) * self.magnitude;
        let dy = (rng.random::<f32>() * 2.0 - 1.0) * self.magnitude;
        Vec2::new(dx, dy)
    }
}

/// Non-authoritative visual feedback queued by the simulation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Effects {
    pub flashes: Vec<Flash>,
    pub shake: Shake,
}

impl Effects {
    pub fn flash(&mut self, pos: Vec2, color: u32) {
        self.flashes.push(Flash {
            pos,
            color,
            ttl: FLASH_LIFETIME,
        });
    }

    pub fn shake(&mut self, magnitude: f32, duration_ms: f32) {
        self.shake = Shake {
            magnitude,
            remaining_ms: duration_ms,
        };
    }

    /// Age flashes and drop the expired ones
    pub fn decay_flashes(&mut self, dt: f32) {
        for flash in &mut self.flashes {
            flash.ttl -= dt;
        }
        self.flashes.retain(|f| f.ttl > 0.0);
    }
}

/// Heads-up display values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hud {
    pub score: u64,
    pub lives: u8,
    pub level: u32,
    pub paused: bool,
}

/// Complete simulation state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Gameplay RNG (enemy shooter choice)
    pub rng: Pcg32,
    pub world: World,
    pub phase: GamePhase,
    /// Current level (1-based)
    pub level: u32,
    pub score: u64,
    pub lives: u8,
    /// Simulation steps taken this run
    pub time_ticks: u64,
    /// Largest dt a single tick accepts
    pub max_frame_dt: f32,
    /// Whether player hits queue a screen shake
    pub shake_enabled: bool,
    pub player: Player,
    pub bullets: Vec<Bullet>,
    pub enemy_bullets: Vec<EnemyBullet>,
    /// Alive enemies, in grid order
    pub enemies: Vec<Enemy>,
    /// Shields in creation order (left to right)
    pub shields: Vec<Shield>,
    pub swarm: SwarmState,
    pub effects: Effects,
    /// Set when the run ends
    pub last_run: Option<RunSummary>,
    /// Pending notifications (not part of snapshots)
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a state in the menu with default world settings
    pub fn new(seed: u64) -> Self {
        let world = World::default();
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            world,
            phase: GamePhase::Menu,
            level: 1,
            score: 0,
            lives: START_LIVES,
            time_ticks: 0,
            max_frame_dt: MAX_FRAME_DT,
            shake_enabled: true,
            player: Player::new(&world),
            bullets: Vec::new(),
            enemy_bullets: Vec::new(),
            enemies: Vec::new(),
            shields: Vec::new(),
            swarm: SwarmState::default(),
            effects: Effects::default(),
            last_run: None,
            events: Vec::new(),
        }
    }

    /// Create a state in the menu configured from settings
    pub fn from_settings(settings: &Settings) -> Self {
        let mut state = Self::new(settings.seed);
        state.world = World::new(settings.world_width, settings.world_height);
        state.player = Player::new(&state.world);
        state.max_frame_dt = settings.max_frame_dt;
        state.shake_enabled = settings.effective_screen_shake();
        state
    }

    /// Playing or paused
    pub fn is_running(&self) -> bool {
        matches!(self.phase, GamePhase::Playing | GamePhase::Paused)
    }

    pub fn is_paused(&self) -> bool {
        self.phase == GamePhase::Paused
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Hand all pending events to the caller
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn hud(&self) -> Hud {
        Hud {
            score: self.score,
            lives: self.lives,
            level: self.level,
            paused: self.is_paused(),
        }
    }

    /// Render data in draw order: shields, player, bullets, enemies, enemy bullets
    pub fn sprites(&self) -> impl Iterator<Item = Sprite> + '_ {
        self.shields
            .iter()
            .map(Render::sprite)
            .chain(std::iter::once(self.player.sprite()))
            .chain(self.bullets.iter().map(Render::sprite))
            .chain(self.enemies.iter().map(Render::sprite))
            .chain(self.enemy_bullets.iter().map(Render::sprite))
    }
}
