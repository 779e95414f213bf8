//! Idle/demo mode: a simple bot that plays the game
//!
//! Dodges enemy shots falling toward the ship, otherwise lines up under the
//! lowest front-line enemy and keeps the trigger held.

use crate::sim::GameState;
use crate::sim::TickInput;
use crate::sim::swarm::front_line;

/// How far above the ship an incoming shot counts as a threat (px)
const THREAT_RANGE: f32 = 140.0;
/// Close enough to the target column to stop moving (px)
const AIM_TOLERANCE: f32 = 4.0;

#[derive(Debug, Clone, Default)]
pub struct Autopilot {
    /// Press start whenever no run is active
    pub auto_restart: bool,
    /// Whether a run has been started yet
    started: bool,
}

impl Autopilot {
    pub fn new(auto_restart: bool) -> Self {
        Self {
            auto_restart,
            started: false,
        }
    }

    /// Decide this frame's input
    pub fn decide(&mut self, state: &GameState) -> TickInput {
        let mut input = TickInput::default();
        if !state.is_running() {
            if !self.started || self.auto_restart {
                input.start = true;
                self.started = true;
            }
            return input;
        }

        let ship = state.player.rect();
        let ship_x = ship.center().x;

        // Incoming shot over the ship? Step away toward the roomier side.
        let threat = state.enemy_bullets.iter().find(|b| {
            b.alive
                && b.pos.y < ship.top()
                && ship.top() - b.pos.y < THREAT_RANGE
                && b.pos.x > ship.left() - b.radius * 2.0
                && b.pos.x < ship.right() + b.radius * 2.0
        });
        if let Some(shot) = threat {
            let room_left = ship.left() - state.player.min_x();
            let room_right = state.player.max_x(&state.world) - ship.left();
            if (shot.pos.x >= ship_x && room_left > 0.0) || room_right <= 0.0 {
                input.left = true;
            } else {
                input.right = true;
            }
            return input;
        }

        // Line up under the lowest shooter
        let target = front_line(&state.enemies)
            .into_iter()
            .map(|idx| &state.enemies[idx])
            .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
            .map(|e| e.rect().center().x);

        if let Some(target_x) = target {
            if target_x < ship_x - AIM_TOLERANCE {
                input.left = true;
            } else if target_x > ship_x + AIM_TOLERANCE {
                input.right = true;
            }
        }
        input.fire = true;
        input
    }
}
