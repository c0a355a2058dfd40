//=========================================================================
// FPS Counter
//=========================================================================
//
// Counts presented frames over one-second windows.
//
// The platform records a frame on every RedrawRequested; when a window
// closes with a different count than the last one, the new value is
// returned so the caller can refresh the window title.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::{Duration, Instant};

//=== FpsCounter ==========================================================

pub(crate) struct FpsCounter {
    window_start: Option<Instant>,
    frames: u32,
    last_reported: Option<u32>,
}

impl FpsCounter {
    const WINDOW: Duration = Duration::from_secs(1);

    pub(crate) fn new() -> Self {
        Self {
            window_start: None,
            frames: 0,
            last_reported: None,
        }
    }

    /// Records one frame at `now`.
    ///
    /// Returns the frame count of the window that just closed, only if it
    /// differs from the previously reported count.
    pub(crate) fn record_frame(&mut self, now: Instant) -> Option<u32> {
        let start = *self.window_start.get_or_insert(now);
        self.frames += 1;

        if now.duration_since(start) < Self::WINDOW {
            return None;
        }

        let fps = self.frames;
        self.frames = 0;
        self.window_start = Some(now);

        if self.last_reported == Some(fps) {
            return None;
        }
        self.last_reported = Some(fps);
        Some(fps)
    }
}

/// Window title with the FPS overlay appended.
pub(crate) fn titled(base: &str, fps: u32) -> String {
    format!("{} | FPS: {}", base, fps)
}

//=========================================================================
// Unit Tests
//=========================================================================
