//=========================================================================
// Input Processor
//=========================================================================
//
// Converts Winit keyboard events into engine InputEvents.
//
// Architecture:
//   Winit KeyEvent → InputProcessor → InputEvent (engine type) → InputBuffer
//
// OS key-repeat is dropped here so the core sees one KeyDown per physical
// press. Unmapped keys return None.
//
//=========================================================================

//=== External Dependencies ===============================================

use winit::{
    event::{ElementState, KeyEvent},
    keyboard::{KeyCode as WinitKeyCode, PhysicalKey},
};

//=== Internal Dependencies ===============================================

use crate::core::input::event::{InputEvent, KeyCode};

//=== InputProcessor ======================================================

/// Converts Winit key events to engine InputEvents.
pub(crate) struct InputProcessor;

impl InputProcessor {
    pub(crate) fn new() -> Self {
        Self
    }

    /// Converts a Winit KeyEvent (filters repeats and unmapped keys).
    pub(crate) fn process_key_event(&self, key_event: &KeyEvent) -> Option<InputEvent> {
        self.translate(key_event.physical_key, key_event.state, key_event.repeat)
    }

    fn translate(
        &self,
        physical_key: PhysicalKey,
        state: ElementState,
        repeat: bool,
    ) -> Option<InputEvent> {
        if repeat {
            return None;
        }

        let key = match physical_key {
            PhysicalKey::Code(code) => KeyCode::from(code),
            PhysicalKey::Unidentified(_) => return None,
        };

        if key == KeyCode::Unidentified {
            return None;
        }

        Some(match state {
            ElementState::Pressed => InputEvent::KeyDown(key),
            ElementState::Released => InputEvent::KeyUp(key),
        })
    }
}

//=========================================================================
// Winit Conversions
//=========================================================================

/// Maps digits, arrows, and the handful of special keys the scenes use.
/// Numpad digits fold onto the number row.
impl From<WinitKeyCode> for KeyCode {
    fn from(code: WinitKeyCode) -> Self {
        use WinitKeyCode::*;
        match code {
            //--- Digits -------------------------------------------------------
            Digit0 | Numpad0 => KeyCode::Digit0,
            Digit1 | Numpad1 => KeyCode::Digit1,
            Digit2 | Numpad2 => KeyCode::Digit2,
            Digit3 | Numpad3 => KeyCode::Digit3,
            Digit4 | Numpad4 => KeyCode::Digit4,
            Digit5 | Numpad5 => KeyCode::Digit5,
            Digit6 | Numpad6 => KeyCode::Digit6,
            Digit7 | Numpad7 => KeyCode::Digit7,
            Digit8 | Numpad8 => KeyCode::Digit8,
            Digit9 | Numpad9 => KeyCode::Digit9,

            //--- Arrows -------------------------------------------------------
            ArrowUp => KeyCode::ArrowUp,
            ArrowDown => KeyCode::ArrowDown,
            ArrowLeft => KeyCode::ArrowLeft,
            ArrowRight => KeyCode::ArrowRight,

            //--- Special ------------------------------------------------------
            Space => KeyCode::Space,
            Enter | NumpadEnter => KeyCode::Enter,
            Escape => KeyCode::Escape,
            Tab => KeyCode::Tab,
            Backspace => KeyCode::Backspace,

            _ => KeyCode::Unidentified,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use winit::keyboard::NativeKeyCode;

    fn code(code: WinitKeyCode) -> PhysicalKey {
        PhysicalKey::Code(code)
    }

    #[test]
    fn press_and_release_map_to_down_and_up() {
        let processor = InputProcessor::new();

        assert_eq!(
            processor.translate(code(WinitKeyCode::Enter), ElementState::Pressed, false),
            Some(InputEvent::KeyDown(KeyCode::Enter))
        );
        assert_eq!(
            processor.translate(code(WinitKeyCode::Enter), ElementState::Released, false),
            Some(InputEvent::KeyUp(KeyCode::Enter))
        );
    }

    #[test]
    fn repeats_are_dropped() {
        let processor = InputProcessor::new();
        assert_eq!(
            processor.translate(code(WinitKeyCode::ArrowDown), ElementState::Pressed, true),
            None
        );
    }

    #[test]
    fn unmapped_keys_are_dropped() {
        let processor = InputProcessor::new();
        assert_eq!(
            processor.translate(code(WinitKeyCode::F13), ElementState::Pressed, false),
            None
        );
        assert_eq!(
            processor.translate(
                PhysicalKey::Unidentified(NativeKeyCode::Unidentified),
                ElementState::Pressed,
                false
            ),
            None
        );
    }

    #[test]
    fn numpad_folds_onto_number_row() {
        assert_eq!(KeyCode::from(WinitKeyCode::Numpad2), KeyCode::Digit2);
        assert_eq!(KeyCode::from(WinitKeyCode::NumpadEnter), KeyCode::Enter);
    }
}
