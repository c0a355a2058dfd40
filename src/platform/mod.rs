//=========================================================================
// Platform Subsystem
//
// Bridges Winit (OS-level events) with the engine's core thread.
//
// Architecture:
// ```text
//  Main Thread:                     Logic Thread:
//  ┌──────────────────────────┐    ┌──────────────────┐
//  │  Winit Event Loop        │    │  Core Systems    │
//  │   ↓                      │    │                  │
//  │  InputProcessor          │    │  StateTracker    │
//  │   └─ drops key repeat    │    │  ↓               │
//  │   ↓                      │    │  SceneManager    │
//  │  InputBuffer             │    │  ↓               │
//  │   ├─ keys: Vec<>         │    │  Scenes          │
//  │   └─ resized: Option<>   │    └──────────────────┘
//  │   ↓                      │             ↑
//  │  RedrawRequested         │             │
//  │   ↓ (flush + FPS)        │             │
//  │  Channel ────────────────┼─────────────┘
//  └──────────────────────────┘    PlatformEvent
// ```
//
// Frame Boundary: RedrawRequested
//   → buffered keys sent as one batch, then the latest resize
//   → the core ticks at fixed TPS, independent of refresh rate
//   → empty buffers are not sent
//
// Winit mandates the main thread on macOS/iOS, so this runs on the
// thread that called `Engine::run()`.
//
//=========================================================================

//=== Submodules ==========================================================

mod fps_counter;
mod input_buffer;
mod input_processor;

//=== External Crates =====================================================

use std::time::Instant;

use crossbeam_channel::Sender;
use log::*;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowAttributes, WindowId},
};

//=== Internal Imports ====================================================

use crate::core::platform_bridge::{PlatformError, PlatformEvent};
use fps_counter::FpsCounter;
use input_buffer::InputBuffer;
use input_processor::InputProcessor;

//=== WindowConfig ========================================================

/// Initial window parameters.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

//=== Platform ============================================================

/// Window manager and input event aggregator.
///
/// This type stays on the main thread; other threads only see the
/// `PlatformEvent`s it sends.
pub(crate) struct Platform {
    /// OS window handle (None until `resumed()` called).
    window: Option<Window>,

    config: WindowConfig,

    /// Buffers key events and resizes until frame boundary.
    buffer: InputBuffer,

    event_sender: Sender<PlatformEvent>,
    input_processor: InputProcessor,
    fps: FpsCounter,
}

impl Platform {
    //--- Construction -----------------------------------------------------

    /// Does not create the window yet; that happens lazily in `resumed()`.
    pub(crate) fn new(event_sender: Sender<PlatformEvent>, config: WindowConfig) -> Self {
        info!(target: "platform", "Platform subsystem initialized");
        Self {
            window: None,
            config,
            buffer: InputBuffer::new(),
            event_sender,
            input_processor: InputProcessor::new(),
            fps: FpsCounter::new(),
        }
    }

    //--- Execution --------------------------------------------------------

    /// Runs the Winit event loop until the window closes.
    ///
    /// # Errors
    ///
    /// [`PlatformError`] if the event loop cannot be created or fails while
    /// running.
    pub(crate) fn run(mut self) -> Result<(), PlatformError> {
        debug!(target: "platform", "Starting Winit event loop");

        let event_loop =
            EventLoop::new().map_err(|e| PlatformError::EventLoopCreation(e.to_string()))?;

        event_loop
            .run_app(&mut self)
            .map_err(|e| PlatformError::EventLoopExecution(e.to_string()))
    }

    //--- Internal Helpers -------------------------------------------------

    /// Flushes buffered input to the core thread.
    ///
    /// If the core thread is gone the events are dropped with a warning so
    /// the window can still be closed normally.
    fn flush_input_buffer(&mut self) {
        if self.buffer.is_empty() {
            return;
        }

        let (keys, resized) = self.buffer.drain();
        trace!(target: "platform::input", "Flushing {} key events", keys.len());

        if !keys.is_empty() {
            self.send(PlatformEvent::Inputs(keys));
        }
        if let Some((width, height)) = resized {
            self.send(PlatformEvent::Resized { width, height });
        }
    }

    fn send(&self, event: PlatformEvent) {
        if self.event_sender.send(event).is_err() {
            warn!(target: "platform::input", "Channel disconnected, dropping platform event");
        }
    }

    /// Counts a presented frame and refreshes the title when the rate changes.
    fn record_frame(&mut self) {
        if let Some(fps) = self.fps.record_frame(Instant::now()) {
            if let Some(window) = &self.window {
                window.set_title(&fps_counter::titled(&self.config.title, fps));
            }
        }
    }

    //--- Test Accessors ---------------------------------------------------

    #[cfg(test)]
    pub(crate) fn window(&self) -> Option<&Window> {
        self.window.as_ref()
    }
}

//=== Winit Integration ===================================================

impl ApplicationHandler for Platform {
    /// Creates the window on first resume.
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            debug!(target: "platform", "Window already exists (mobile resume?)");
            return;
        }

        let attrs = WindowAttributes::default()
            .with_title(self.config.title.clone())
            .with_inner_size(LogicalSize::new(self.config.width, self.config.height));

        match event_loop.create_window(attrs) {
            Ok(window) => {
                let size = window.inner_size().to_logical::<f32>(window.scale_factor());
                info!(
                    target: "platform",
                    "Window created: {}x{} @ {}x DPI",
                    size.width,
                    size.height,
                    window.scale_factor()
                );
                self.buffer.push_resize(size.width, size.height);
                window.request_redraw();
                self.window = Some(window);
            }
            Err(e) => {
                error!(target: "platform", "Window creation failed: {}", e);
                self.send(PlatformEvent::WindowClosed);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match &event {
            WindowEvent::CloseRequested => {
                info!(target: "platform", "Window close requested");
                self.send(PlatformEvent::WindowClosed);
                event_loop.exit();
            }

            WindowEvent::KeyboardInput { event: key_event, .. } => {
                if let Some(event) = self.input_processor.process_key_event(key_event) {
                    self.buffer.push_key(event);
                }
            }

            WindowEvent::Resized(physical) => {
                let scale = self.window.as_ref().map_or(1.0, Window::scale_factor);
                let size = physical.to_logical::<f32>(scale);
                self.buffer.push_resize(size.width, size.height);
            }

            WindowEvent::RedrawRequested => {
                // Frame boundary: flush all buffered input
                self.flush_input_buffer();
                self.record_frame();

                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            _ => {}
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::{InputEvent, KeyCode};
    use crossbeam_channel::unbounded;

    fn platform() -> (Platform, crossbeam_channel::Receiver<PlatformEvent>) {
        let (tx, rx) = unbounded();
        let config = WindowConfig {
            title: "Test".to_string(),
            width: 320,
            height: 240,
        };
        (Platform::new(tx, config), rx)
    }

    #[test]
    fn platform_creation() {
        let (platform, _rx) = platform();
        assert!(platform.window().is_none(), "Window should be created lazily");
    }

    #[test]
    fn flush_empty_buffer_is_noop() {
        let (mut platform, rx) = platform();
        platform.flush_input_buffer();
        assert!(rx.try_recv().is_err(), "No events should be sent for empty buffer");
    }

    #[test]
    fn flush_sends_keys_then_resize() {
        let (mut platform, rx) = platform();
        platform.buffer.push_key(InputEvent::KeyDown(KeyCode::Space));
        platform.buffer.push_resize(640.0, 480.0);

        platform.flush_input_buffer();

        assert_eq!(
            rx.try_recv().ok(),
            Some(PlatformEvent::Inputs(vec![InputEvent::KeyDown(KeyCode::Space)]))
        );
        assert_eq!(
            rx.try_recv().ok(),
            Some(PlatformEvent::Resized { width: 640.0, height: 480.0 })
        );
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn flush_handles_disconnected_channel() {
        let (mut platform, rx) = platform();
        platform.buffer.push_key(InputEvent::KeyDown(KeyCode::Space));
        drop(rx);

        // Should not panic, just log warning
        platform.flush_input_buffer();
    }

    #[test]
    fn multiple_flushes_clear_buffer() {
        let (mut platform, rx) = platform();
        platform.buffer.push_key(InputEvent::KeyDown(KeyCode::Enter));

        platform.flush_input_buffer();
        platform.flush_input_buffer();

        assert!(rx.try_recv().is_ok(), "First flush should send");
        assert!(rx.try_recv().is_err(), "Second flush should not send");
    }

    #[test]
    fn platform_error_display_format() {
        let error = PlatformError::EventLoopCreation("no display".to_string());
        assert_eq!(error.to_string(), "Event loop creation failed: no display");
    }
}
