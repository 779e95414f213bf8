//! Frame driver
//!
//! Called once per display refresh. Turns wall-clock timestamps into clamped
//! simulation steps, runs the shake interval timer, ages flashes and hands
//! events and the finished frame to the presentation layer.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::consts::*;
use crate::platform::Presentation;
use crate::settings::Settings;
use crate::sim::{GameState, TickInput, advance};

/// Shake intervals processed per frame at most (long stalls are dropped)
const MAX_SHAKE_INTERVALS: u32 = 8;

/// Read-only view handed to the renderer
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub state: &'a GameState,
    /// Current screen shake translation
    pub shake_offset: Vec2,
}

/// Owns the simulation and paces it against real time
#[derive(Debug)]
pub struct Driver {
    pub state: GameState,
    /// Timestamp of the previous frame (seconds)
    last_time: Option<f64>,
    /// Real milliseconds not yet consumed by the shake timer
    shake_accumulator: f32,
    shake_offset: Vec2,
    /// Visual-only randomness, kept apart from the gameplay RNG
    fx_rng: Pcg32,
}

impl Driver {
    pub fn new(settings: &Settings) -> Self {
        Self::with_state(GameState::from_settings(settings))
    }

    pub fn with_state(state: GameState) -> Self {
        let fx_seed = state.seed ^ 0x9e37_79b9_7f4a_7c15;
        Self {
            state,
            last_time: None,
            shake_accumulator: 0.0,
            shake_offset: Vec2::ZERO,
            fx_rng: Pcg32::seed_from_u64(fx_seed),
        }
    }

    pub fn shake_offset(&self) -> Vec2 {
        self.shake_offset
    }

    /// Real elapsed time since the previous frame and the clamped step to
    /// simulate. The first frame only records the timestamp.
    pub fn frame_delta(&mut self, now: f64) -> (f32, f32) {
        let elapsed = match self.last_time {
            Some(last) => ((now - last).max(0.0)) as f32,
            None => 0.0,
        };
        self.last_time = Some(now);
        (elapsed, elapsed.min(self.state.max_frame_dt))
    }

    /// Run one frame at wall-clock time `now` (seconds)
    pub fn frame<P: Presentation>(&mut self, now: f64, presenter: &mut P) {
        let (elapsed, dt) = self.frame_delta(now);

        let input: TickInput = presenter.poll_input(&self.state);
        advance(&mut self.state, &input, dt);

        self.state.effects.decay_flashes(dt);
        self.run_shake_timer(elapsed * 1000.0);

        for event in self.state.drain_events() {
            presenter.on_event(&event);
        }

        presenter.render(&Frame {
            state: &self.state,
            shake_offset: self.shake_offset,
        });
    }

    /// Fixed-interval shake clock driven by real time. Only touches shake state.
    fn run_shake_timer(&mut self, elapsed_ms: f32) {
        self.shake_accumulator = (self.shake_accumulator + elapsed_ms)
            .min(SHAKE_INTERVAL_MS * MAX_SHAKE_INTERVALS as f32);

        while self.shake_accumulator >= SHAKE_INTERVAL_MS {
            self.shake_accumulator -= SHAKE_INTERVAL_MS;
            self.shake_offset = self
                .state
                .effects
                .shake
                .tick_interval(SHAKE_INTERVAL_MS, &mut self.fx_rng);
        }
    }
}
