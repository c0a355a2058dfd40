//=========================================================================
// Input Event Types
//
// Platform-independent keyboard events consumed by the scene layer.
//
// Event Flow:
// ```text
// Platform Layer (Winit)
//         ↓
//    InputEvent (this module)
//         ↓
//    StateTracker (held / pressed / released per tick)
//         ↓
//    Scenes (menu navigation, back to menu)
// ```
//
// Only the keys the showcase binds are represented; anything else maps to
// `KeyCode::Unidentified` and is dropped by the platform layer.
//
//=========================================================================

//=== KeyCode =============================================================

/// Physical keyboard key identifier.
///
/// Represents the physical key location, not the character produced, so
/// `Digit1` is the same key on QWERTY and AZERTY layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    //--- Numeric Keys -----------------------------------------------------

    /// Number row: 0-9 (menu shortcuts)
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    //--- Arrow Keys -------------------------------------------------------

    ArrowDown,
    ArrowLeft,
    ArrowRight,
    ArrowUp,

    //--- Special Keys -----------------------------------------------------

    Space,
    Enter,
    Escape,
    Tab,
    Backspace,

    /// Fallback for keys not mapped by the input layer.
    Unidentified,
}

impl KeyCode {
    /// Number-row keys in order, `Digit0` first.
    pub const DIGITS: [KeyCode; 10] = [
        KeyCode::Digit0, KeyCode::Digit1, KeyCode::Digit2, KeyCode::Digit3, KeyCode::Digit4,
        KeyCode::Digit5, KeyCode::Digit6, KeyCode::Digit7, KeyCode::Digit8, KeyCode::Digit9,
    ];

    /// Numeric value of a number-row key.
    pub fn digit(self) -> Option<u8> {
        Self::DIGITS
            .iter()
            .position(|&key| key == self)
            .map(|index| index as u8)
    }
}

//=== InputEvent ==========================================================

/// Low-level keyboard event from the platform layer.
///
/// OS key-repeat is filtered before events get here, so a held key
/// produces exactly one `KeyDown` followed by one `KeyUp`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputEvent {
    KeyDown(KeyCode),
    KeyUp(KeyCode),
}

impl InputEvent {
    pub fn key(&self) -> KeyCode {
        match self {
            Self::KeyDown(key) | Self::KeyUp(key) => *key,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
