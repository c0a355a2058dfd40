//=========================================================================
// State Tracker
//=========================================================================
//
// Keyboard state with per-tick deltas.
//
// Architecture:
//   InputEvent → process_events() → HashSet (keys held) → query
//
// Tick lifecycle: begin_tick() → process_events() → query
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashSet;

//=== Internal Dependencies ===============================================

use super::event::{InputEvent, KeyCode};

//=== StateTracker ========================================================

/// Tracks keys held across ticks and keys pressed/released this tick.
#[derive(Debug, Default)]
pub struct StateTracker {
    //--- Persistent State (survives tick boundary) ------------------------
    keys_down: HashSet<KeyCode>,

    //--- Tick Deltas (reset by begin_tick()) ------------------------------
    keys_pressed_this_tick: HashSet<KeyCode>,
    keys_released_this_tick: HashSet<KeyCode>,
}

impl StateTracker {
    pub fn new() -> Self {
        Self::default()
    }

    //--- Tick Processing --------------------------------------------------

    /// Clears the previous tick's pressed/released sets.
    pub(crate) fn begin_tick(&mut self) {
        self.keys_pressed_this_tick.clear();
        self.keys_released_this_tick.clear();
    }

    pub(crate) fn process_events(&mut self, events: &[InputEvent]) {
        for event in events {
            match *event {
                InputEvent::KeyDown(key) => {
                    // Only mark as pressed if it wasn't already down
                    if self.keys_down.insert(key) {
                        self.keys_pressed_this_tick.insert(key);
                    }
                }
                InputEvent::KeyUp(key) => {
                    if self.keys_down.remove(&key) {
                        self.keys_released_this_tick.insert(key);
                    }
                }
            }
        }
    }

    //=====================================================================
    // Query API
    //=====================================================================

    /// `true` only on the tick the key went down.
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed_this_tick.contains(&key)
    }

    /// `true` while the key is held.
    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    /// `true` only on the tick the key went up.
    pub fn is_key_released(&self, key: KeyCode) -> bool {
        self.keys_released_this_tick.contains(&key)
    }

    /// Number-row key pressed this tick, if any (lowest digit wins).
    pub fn digit_pressed(&self) -> Option<u8> {
        KeyCode::DIGITS
            .iter()
            .find(|key| self.is_key_pressed(**key))
            .and_then(|key| key.digit())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn tick(tracker: &mut StateTracker, events: &[InputEvent]) {
        tracker.begin_tick();
        tracker.process_events(events);
    }

    #[test]
    fn key_pressed_only_on_transition_tick() {
        let mut tracker = StateTracker::new();

        tick(&mut tracker, &[InputEvent::KeyDown(KeyCode::Enter)]);
        assert!(tracker.is_key_pressed(KeyCode::Enter));
        assert!(tracker.is_key_down(KeyCode::Enter));

        tick(&mut tracker, &[]);
        assert!(!tracker.is_key_pressed(KeyCode::Enter), "Pressed lasts one tick");
        assert!(tracker.is_key_down(KeyCode::Enter), "Still held");
    }

    #[test]
    fn key_released_only_on_transition_tick() {
        let mut tracker = StateTracker::new();
        tick(&mut tracker, &[InputEvent::KeyDown(KeyCode::Space)]);

        tick(&mut tracker, &[InputEvent::KeyUp(KeyCode::Space)]);
        assert!(tracker.is_key_released(KeyCode::Space));
        assert!(!tracker.is_key_down(KeyCode::Space));

        tick(&mut tracker, &[]);
        assert!(!tracker.is_key_released(KeyCode::Space));
    }

    #[test]
    fn release_without_press_is_ignored() {
        let mut tracker = StateTracker::new();
        tick(&mut tracker, &[InputEvent::KeyUp(KeyCode::Escape)]);
        assert!(!tracker.is_key_released(KeyCode::Escape));
    }

    #[test]
    fn tap_within_one_tick() {
        let mut tracker = StateTracker::new();
        tick(
            &mut tracker,
            &[
                InputEvent::KeyDown(KeyCode::ArrowUp),
                InputEvent::KeyUp(KeyCode::ArrowUp),
            ],
        );
        assert!(tracker.is_key_pressed(KeyCode::ArrowUp));
        assert!(tracker.is_key_released(KeyCode::ArrowUp));
        assert!(!tracker.is_key_down(KeyCode::ArrowUp));
    }

    #[test]
    fn digit_pressed_reports_number_keys() {
        let mut tracker = StateTracker::new();
        tick(&mut tracker, &[InputEvent::KeyDown(KeyCode::Digit2)]);
        assert_eq!(tracker.digit_pressed(), Some(2));

        tick(&mut tracker, &[]);
        assert_eq!(tracker.digit_pressed(), None);
    }
}
