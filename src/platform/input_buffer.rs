//=========================================================================
// Input Buffer
//
// Collects key events and window resizes between two frame boundaries.
//
// Responsibilities:
// - Store incoming key events in arrival order
// - Drop an event identical to the one just before it
// - Coalesce resizes so only the latest size is sent
//
// Notes:
// The buffer lives on the platform thread and is drained on every
// RedrawRequested.
//=========================================================================

//=== Internal Modules ====================================================

use crate::core::input::event::InputEvent;

//=== InputBuffer =========================================================

/// Transient event store for one frame of platform input.
pub(crate) struct InputBuffer {
    keys: Vec<InputEvent>,
    resized: Option<(f32, f32)>,
}

impl InputBuffer {
    pub(crate) fn new() -> Self {
        const KEYS_BASE: usize = 32;

        Self {
            keys: Vec::with_capacity(KEYS_BASE),
            resized: None,
        }
    }

    //--- Key Events --------------------------------------------------------
    //
    // Duplicate consecutive events are ignored to prevent flooding.
    //
    pub(crate) fn push_key(&mut self, event: InputEvent) {
        if self.keys.last() != Some(&event) {
            self.keys.push(event);
        }
    }

    //--- Resize -----------------------------------------------------------
    //
    // The latest size always replaces any earlier one this frame.
    //
    pub(crate) fn push_resize(&mut self, width: f32, height: f32) {
        self.resized = Some((width, height));
    }

    //--- Drain ------------------------------------------------------------

    /// Takes this frame's key events (possibly empty) and latest resize.
    pub(crate) fn drain(&mut self) -> (Vec<InputEvent>, Option<(f32, f32)>) {
        let keys = self.keys.drain(..).collect();
        (keys, self.resized.take())
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.keys.is_empty() && self.resized.is_none()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::event::KeyCode;

    #[test]
    fn consecutive_duplicates_are_dropped() {
        let mut buffer = InputBuffer::new();
        buffer.push_key(InputEvent::KeyDown(KeyCode::Enter));
        buffer.push_key(InputEvent::KeyDown(KeyCode::Enter));
        buffer.push_key(InputEvent::KeyUp(KeyCode::Enter));
        buffer.push_key(InputEvent::KeyDown(KeyCode::Enter));

        let (keys, _) = buffer.drain();
        assert_eq!(keys.len(), 3, "Only the back-to-back duplicate is dropped");
    }

    #[test]
    fn resize_keeps_latest() {
        let mut buffer = InputBuffer::new();
        buffer.push_resize(640.0, 480.0);
        buffer.push_resize(1920.0, 1080.0);

        let (keys, resized) = buffer.drain();
        assert!(keys.is_empty());
        assert_eq!(resized, Some((1920.0, 1080.0)));
    }

    #[test]
    fn drain_clears_buffer() {
        let mut buffer = InputBuffer::new();
        buffer.push_key(InputEvent::KeyDown(KeyCode::Space));
        buffer.push_resize(10.0, 10.0);
        assert!(!buffer.is_empty());

        let _ = buffer.drain();
        assert!(buffer.is_empty());
        assert_eq!(buffer.drain(), (Vec::new(), None));
    }

    #[test]
    fn drain_keeps_capacity() {
        let mut buffer = InputBuffer::new();
        for _ in 0..64 {
            buffer.push_key(InputEvent::KeyDown(KeyCode::Tab));
            buffer.push_key(InputEvent::KeyUp(KeyCode::Tab));
        }
        let capacity = buffer.keys.capacity();

        let _ = buffer.drain();
        assert_eq!(buffer.keys.capacity(), capacity);
    }
}
