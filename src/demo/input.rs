//! Fullscreen shortcuts: the "f" key and a double click.

use instant::{Duration, Instant};
use winit::{
    event::{ElementState, KeyEvent, MouseButton, WindowEvent},
    keyboard::{Key, NamedKey},
};

/// Two left presses closer together than this count as a double click.
pub const DOUBLE_CLICK_WINDOW: Duration = Duration::from_millis(300);

/// Detects double clicks from a stream of left-button presses.
#[derive(Debug, Default)]
pub struct ClickTracker {
    last_press: Option<Instant>,
}

impl ClickTracker {
    /// Register a press at `now`, returns true if it completes a double click.
    ///
    /// A completed double click is consumed, so a triple click only toggles once.
    pub fn press(&mut self, now: Instant) -> bool {
        match self.last_press.take() {
            Some(last) if now.duration_since(last) <= DOUBLE_CLICK_WINDOW => true,
            _ => {
                self.last_press = Some(now);
                false
            }
        }
    }
}

/// Whether `event` asks for fullscreen to be toggled.
pub fn wants_fullscreen_toggle(event: &WindowEvent, clicks: &mut ClickTracker) -> bool {
    match event {
        WindowEvent::KeyboardInput {
            event:
                KeyEvent {
                    logical_key,
                    state: ElementState::Pressed,
                    repeat: false,
                    ..
                },
            ..
        } => is_fullscreen_key(logical_key),
        WindowEvent::MouseInput {
            state: ElementState::Pressed,
            button: MouseButton::Left,
            ..
        } => clicks.press(Instant::now()),
        _ => false,
    }
}

fn is_fullscreen_key(key: &Key) -> bool {
    match key {
        Key::Character(c) => c.eq_ignore_ascii_case("f"),
        Key::Named(NamedKey::F11) => true,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_quick_presses_are_a_double_click() {
        let mut clicks = ClickTracker::default();
        let t0 = Instant::now();
        assert!(!clicks.press(t0));
        assert!(clicks.press(t0 + Duration::from_millis(120)));
    }

    #[test]
    fn slow_presses_are_not() {
        let mut clicks = ClickTracker::default();
        let t0 = Instant::now();
        assert!(!clicks.press(t0));
        assert!(!clicks.press(t0 + Duration::from_millis(301)));
        // the slow press starts a new pair
        assert!(clicks.press(t0 + Duration::from_millis(450)));
    }

    #[test]
    fn triple_click_toggles_once() {
        let mut clicks = ClickTracker::default();
        let t0 = Instant::now();
        let presses: Vec<bool> = [0, 100, 200]
            .iter()
            .map(|ms| clicks.press(t0 + Duration::from_millis(*ms)))
            .collect();
        assert_eq!(presses, vec![false, true, false]);
    }

    #[test]
    fn f_and_f11_toggle_fullscreen() {
        assert!(is_fullscreen_key(&Key::Character("f".into())));
        assert!(is_fullscreen_key(&Key::Character("F".into())));
        assert!(is_fullscreen_key(&Key::Named(NamedKey::F11)));
        assert!(!is_fullscreen_key(&Key::Character("g".into())));
    }
}
