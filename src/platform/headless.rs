//! Headless front-end: logs instead of drawing
//!
//! Used by the native binary and tests. Input comes from the autopilot.

use super::{Presentation, status_text};
use crate::driver::Frame;
use crate::sim::{GameEvent, GameState, Hud, TickInput};

use super::autopilot::Autopilot;

#[derive(Debug, Default)]
pub struct HeadlessPresenter {
    pub autopilot: Autopilot,
    /// Latest chrome status line
    pub status: &'static str,
    /// HUD as of the last rendered frame
    pub hud: Option<Hud>,
    pub frames_rendered: u64,
    /// Sprites drawn in the last frame
    pub last_sprite_count: usize,
    pub enemies_destroyed: u64,
    pub levels_cleared: u32,
}

impl HeadlessPresenter {
    pub fn new(autopilot: Autopilot) -> Self {
        Self {
            autopilot,
            status: "Menu",
            ..Default::default()
        }
    }
}

impl Presentation for HeadlessPresenter {
    fn poll_input(&mut self, state: &GameState) -> TickInput {
        self.autopilot.decide(state)
    }

    fn on_event(&mut self, event: &GameEvent) {
        if let Some(status) = status_text(event) {
            self.status = status;
        }
        match event {
            GameEvent::EnemyDestroyed { .. } => self.enemies_destroyed += 1,
            GameEvent::LevelCleared { level } => {
                self.levels_cleared += 1;
                log::info!("Level {} cleared", level);
            }
            GameEvent::PlayerHit { lives } => log::info!("Ship hit, {} lives left", lives),
            GameEvent::GameOver { score, level, cause } => {
                log::info!("Game over ({:?}) - score {}, level {}", cause, score, level)
            }
            _ => {}
        }
    }

    fn render(&mut self, frame: &Frame<'_>) {
        self.frames_rendered += 1;
        self.last_sprite_count = frame.state.sprites().count();
        self.hud = Some(frame.state.hud());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::Driver;
    use crate::settings::Settings;

    #[test]
    fn test_headless_run_plays_a_game() {
        let mut driver = Driver::new(&Settings::default());
        let mut presenter = HeadlessPresenter::new(Autopilot::new(false));

        for frame in 0..600 {
            driver.frame(frame as f64 / 60.0, &mut presenter);
        }

        assert_eq!(presenter.frames_rendered, 600);
        assert!(presenter.enemies_destroyed > 0);
        let hud = presenter.hud.expect("rendered at least once");
        assert!(hud.score > 0);
        assert!(presenter.last_sprite_count > 0);
    }
}
