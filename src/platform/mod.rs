//! Platform abstraction layer
//!
//! The simulation never draws, reads keys or shows menus itself. A front-end
//! implements [`Presentation`] and the [`Driver`](crate::Driver) calls into it
//! once per frame:
//! - `poll_input`: current control intent
//! - `on_event`: lifecycle/gameplay notifications for HUD and menus
//! - `render`: read-only frame data

pub mod autopilot;
pub mod headless;

pub use autopilot::Autopilot;
pub use headless::HeadlessPresenter;

use crate::driver::Frame;
use crate::sim::{GameEvent, GameState, TickInput};

/// Everything the core needs from a front-end
pub trait Presentation {
    /// Control intent for the coming step. `start`/`pause` are one-shot.
    fn poll_input(&mut self, state: &GameState) -> TickInput;

    /// React to a lifecycle or gameplay event (menus, overlays, sounds)
    fn on_event(&mut self, event: &GameEvent);

    /// Draw the frame. Must not mutate simulation state.
    fn render(&mut self, frame: &Frame<'_>);
}

/// Status line shown in the chrome for lifecycle events
pub fn status_text(event: &GameEvent) -> Option<&'static str> {
    match event {
        GameEvent::Started | GameEvent::Resumed => Some("Playing"),
        GameEvent::LevelCleared { .. } => Some("Level Up!"),
        GameEvent::Paused => Some("Paused"),
        GameEvent::GameOver { .. } => Some("Game Over"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::LossCause;

    #[test]
    fn test_status_text() {
        assert_eq!(status_text(&GameEvent::Started), Some("Playing"));
        assert_eq!(status_text(&GameEvent::LevelCleared { level: 1 }), Some("Level Up!"));
        assert_eq!(status_text(&GameEvent::Paused), Some("Paused"));
        assert_eq!(
            status_text(&GameEvent::GameOver {
                score: 0,
                level: 1,
                cause: LossCause::Invaded
            }),
            Some("Game Over")
        );
        assert_eq!(status_text(&GameEvent::PlayerHit { lives: 2 }), None);
    }
}
