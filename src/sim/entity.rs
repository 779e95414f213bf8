//! Entity model: the closed set of things that live in the world
//!
//! Every entity can describe itself for rendering through [`Render`]. Only
//! the player and projectiles move on their own; enemies are driven by the
//! swarm controller and shields only change when something hits them.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use super::state::World;
use super::tick::TickInput;
use crate::consts::*;

/// RGB colors handed to the renderer
pub mod palette {
    pub const PLAYER: u32 = 0x5ee6ff;
    pub const BULLET: u32 = 0xe6f0ff;
    pub const ENEMY_TIER_1: u32 = 0xff87ab;
    pub const ENEMY_TIER_2: u32 = 0xffd166;
    pub const ENEMY_TIER_3: u32 = 0xa0f79b;
    pub const ENEMY_BULLET: u32 = 0xff6b6b;
    pub const SHIELD: u32 = 0x7cc5ff;
    pub const HIT_FLASH: u32 = 0xffffff;
    pub const DAMAGE_FLASH: u32 = 0xff6b6b;
}

/// Which kind of entity a sprite came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Player,
    Bullet,
    EnemyBullet,
    Enemy,
    Shield,
}

/// Render data for one entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sprite {
    pub kind: EntityKind,
    /// Bounding box (projectiles: the square around the circle)
    pub rect: Rect,
    pub color: u32,
    /// 0-1 opacity
    pub alpha: f32,
}

/// Capability shared by every entity: describe yourself to the renderer
pub trait Render {
    fn sprite(&self) -> Sprite;
}

/// Self-driven per-frame motion (projectiles only)
pub trait Advance {
    fn advance(&mut self, dt: f32, world: &World);
}

/// Anything that can be absorbed or destroyed by a point hit test
pub trait Projectile {
    fn center(&self) -> Vec2;
    fn is_alive(&self) -> bool;
    fn kill(&mut self);
}

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Horizontal speed (px/sec)
    pub speed: f32,
    /// Seconds until the next shot is allowed (never negative)
    pub cooldown: f32,
}

impl Player {
    /// Spawn centered, resting on the ground line
    pub fn new(world: &World) -> Self {
        let size = Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT);
        Self {
            pos: Vec2::new((world.width - size.x) / 2.0, world.ground - size.y),
            size,
            speed: PLAYER_SPEED,
            cooldown: 0.0,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    /// Leftmost allowed x
    pub fn min_x(&self) -> f32 {
        EDGE_MARGIN
    }

    /// Rightmost allowed x
    pub fn max_x(&self, world: &World) -> f32 {
        world.width - self.size.x - EDGE_MARGIN
    }

    /// Move, reload and maybe fire. Returns the bullet fired this step.
    ///
    /// Left and right are applied independently, so holding both cancels out.
    pub fn update(&mut self, dt: f32, input: &TickInput, world: &World) -> Option<Bullet> {
        if input.left {
            self.pos.x -= self.speed * dt;
        }
        if input.right {
            self.pos.x += self.speed * dt;
        }
        self.pos.x = self.pos.x.min(self.max_x(world)).max(self.min_x());

        self.cooldown = (self.cooldown - dt).max(0.0);
        if input.fire && self.cooldown <= 0.0 {
            self.cooldown = PLAYER_RELOAD;
            return Some(Bullet::new(Vec2::new(self.pos.x + self.size.x / 2.0, self.pos.y)));
        }
        None
    }
}

impl Render for Player {
    fn sprite(&self) -> Sprite {
        Sprite {
            kind: EntityKind::Player,
            rect: self.rect(),
            color: palette::PLAYER,
            alpha: 1.0,
        }
    }
}

/// A player-fired shot traveling up
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    /// Center
    pub pos: Vec2,
    pub radius: f32,
    pub speed: f32,
    pub alive: bool,
}

impl Bullet {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            radius: BULLET_RADIUS,
            speed: BULLET_SPEED,
            alive: true,
        }
    }
}

impl Advance for Bullet {
    fn advance(&mut self, dt: f32, _world: &World) {
        self.pos.y -= self.speed * dt;
        if self.pos.y < -OFFSCREEN_MARGIN {
            self.alive = false;
        }
    }
}

/// An enemy shot traveling down
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyBullet {
    /// Center
    pub pos: Vec2,
    pub radius: f32,
    pub speed: f32,
    pub alive: bool,
}

impl EnemyBullet {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            radius: BULLET_RADIUS,
            speed: ENEMY_BULLET_SPEED,
            alive: true,
        }
    }
}

impl Advance for EnemyBullet {
    fn advance(&mut self, dt: f32, world: &World) {
        self.pos.y += self.speed * dt;
        if self.pos.y > world.height + OFFSCREEN_MARGIN {
            self.alive = false;
        }
    }
}

macro_rules! impl_round_shot {
    ($ty:ty, $kind:expr, $color:expr) => {
        impl Projectile for $ty {
            fn center(&self) -> Vec2 {
                self.pos
            }

            fn is_alive(&self) -> bool {
                self.alive
            }

            fn kill(&mut self) {
                self.alive = false;
            }
        }

        impl Render for $ty {
            fn sprite(&self) -> Sprite {
                Sprite {
                    kind: $kind,
                    rect: Rect::new(self.pos - Vec2::splat(self.radius), Vec2::splat(self.radius * 2.0)),
                    color: $color,
                    alpha: 1.0,
                }
            }
        }
    };
}

impl_round_shot!(Bullet, EntityKind::Bullet, palette::BULLET);
impl_round_shot!(EnemyBullet, EntityKind::EnemyBullet, palette::ENEMY_BULLET);

/// Enemy rank: controls score value and color
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Tier {
    One = 1,
    Two = 2,
    Three = 3,
}

impl Tier {
    /// Front rows are the most valuable
    pub fn for_row(row: u32) -> Self {
        match row {
            0 | 1 => Tier::Three,
            2 | 3 => Tier::Two,
            _ => Tier::One,
        }
    }

    pub fn rank(self) -> u8 {
        self as u8
    }

    /// Points awarded for destroying an enemy of this tier
    pub fn score_value(self) -> u64 {
        u64::from(self.rank()) * 10
    }

    pub fn color(self) -> u32 {
        match self {
            Tier::One => palette::ENEMY_TIER_1,
            Tier::Two => palette::ENEMY_TIER_2,
            Tier::Three => palette::ENEMY_TIER_3,
        }
    }
}

/// A member of the swarm. Has no update of its own: the swarm controller
/// moves every enemy together.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub tier: Tier,
    pub alive: bool,
}

impl Enemy {
    pub fn new(pos: Vec2, tier: Tier) -> Self {
        Self {
            pos,
            size: Vec2::new(ENEMY_WIDTH, ENEMY_HEIGHT),
            tier,
            alive: true,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    /// Where this enemy's shots spawn
    pub fn muzzle(&self) -> Vec2 {
        Vec2::new(self.pos.x + self.size.x / 2.0, self.pos.y + self.size.y)
    }
}

impl Render for Enemy {
    fn sprite(&self) -> Sprite {
        Sprite {
            kind: EntityKind::Enemy,
            rect: self.rect(),
            color: self.tier.color(),
            alpha: 1.0,
        }
    }
}

/// Destructible cover. Never removed, just fades as it wears down.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shield {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub hp: u8,
}

impl Shield {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            size: Vec2::new(SHIELD_WIDTH, SHIELD_HEIGHT),
            hp: SHIELD_HP,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    pub fn is_intact(&self) -> bool {
        self.hp > 0
    }

    /// Take one projectile
    pub fn absorb(&mut self) {
        self.hp = self.hp.saturating_sub(1);
    }
}

impl Render for Shield {
    fn sprite(&self) -> Sprite {
        Sprite {
            kind: EntityKind::Shield,
            rect: self.rect(),
            color: palette::SHIELD,
            alpha: (f32::from(self.hp) / f32::from(SHIELD_HP)).max(0.25),
        }
    }
}
