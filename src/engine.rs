//=========================================================================
// Aetheric Engine
//
// Main entry point and coordinator for the showcase runtime.
//
// Architecture:
// ```text
//     EngineBuilder  ──build()──>  Engine  ──run()──>  [Runtime]
//         │                          │
//         ├─ with_tps()              └─ spawns logic thread
//         ├─ with_channel_capacity()    runs platform
//         ├─ with_title()               blocks until exit
//         └─ with_window_size()
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{bounded, Receiver, Sender};
use log::{error, info};

//=== Internal Dependencies ===============================================

use crate::core::geometry::Size;
use crate::core::platform_bridge::PlatformEvent;
use crate::core::{CoreSystemsOrchestrator, GlobalSystems, SceneKey};
use crate::platform::{Platform, WindowConfig};

//=== EngineBuilder =======================================================

/// Builder for configuring and constructing an [`Engine`].
///
/// # Default Values
///
/// - **TPS**: 60.0 (logic updates per second)
/// - **Channel capacity**: 128 events
/// - **Window**: 1280×720, titled "Aetheric Showcase"
///
/// # Examples
///
/// ```no_run
/// use aetheric_showcase::EngineBuilder;
/// use aetheric_showcase::scenes::{self, ShowcaseScene};
///
/// EngineBuilder::<ShowcaseScene>::new()
///     .with_tps(120.0)
///     .with_window_size(1024, 768)
///     .build()
///     .init(scenes::register)
///     .run();
/// ```
pub struct EngineBuilder<S: SceneKey> {
    tps: f64,
    channel_capacity: usize,
    window: WindowConfig,
    _phantom: std::marker::PhantomData<S>,
}

impl<S: SceneKey> EngineBuilder<S> {
    pub fn new() -> Self {
        Self {
            tps: 60.0,
            channel_capacity: 128,
            window: WindowConfig {
                title: "Aetheric Showcase".to_string(),
                width: 1280,
                height: 720,
            },
            _phantom: std::marker::PhantomData,
        }
    }

    /// Sets the target ticks per second for the logic thread.
    ///
    /// # Panics
    ///
    /// Panics if `tps <= 0.0`.
    pub fn with_tps(mut self, tps: f64) -> Self {
        assert!(tps > 0.0, "TPS must be positive, got {}", tps);
        self.tps = tps;
        self
    }

    /// Sets the channel capacity for platform → core communication.
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Channel capacity must be positive");
        self.channel_capacity = capacity;
        self
    }

    /// Sets the window title; the FPS overlay is appended to it.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.window.title = title.into();
        self
    }

    /// Sets the initial window size in logical pixels.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        assert!(width > 0 && height > 0, "Window size must be positive, got {}x{}", width, height);
        self.window.width = width;
        self.window.height = height;
        self
    }

    /// Builds the engine; scenes see the configured window size as their
    /// viewport until the platform reports the real one.
    pub fn build(self) -> Engine<S> {
        info!(
            target: "core",
            "Building engine (TPS: {}, channel: {}, window: {}x{})",
            self.tps,
            self.channel_capacity,
            self.window.width,
            self.window.height
        );

        let viewport = Size::new(self.window.width as f32, self.window.height as f32);
        Engine {
            orchestrator: CoreSystemsOrchestrator::new(viewport),
            tps: self.tps,
            channel_capacity: self.channel_capacity,
            window: self.window,
        }
    }
}

impl<S: SceneKey> Default for EngineBuilder<S> {
    fn default() -> Self {
        Self::new()
    }
}

//=== Engine ==============================================================

/// Showcase runtime.
///
/// # Architecture
///
/// ```text
/// Engine (Main Thread)
///   ├─► CoreSystemsOrchestrator (Logic Thread @ TPS)
///   │     └─► StateTracker, SceneManager, Scenes
///   │
///   └─► Platform (Event Loop)
///         └─► Window, Input Polling, FPS title
///
/// Communication: bounded channel (PlatformEvent)
/// ```
pub struct Engine<S: SceneKey> {
    orchestrator: CoreSystemsOrchestrator<S>,
    tps: f64,
    channel_capacity: usize,
    window: WindowConfig,
}

impl<S: SceneKey> Engine<S> {
    //--- Initialization ---------------------------------------------------

    /// Gives mutable access to [`GlobalSystems`] for scene registration
    /// before the engine starts running.
    pub fn init<F>(mut self, init_fn: F) -> Self
    where
        F: FnOnce(&mut GlobalSystems<S>),
    {
        info!(target: "core", "Initializing engine systems");
        self.orchestrator.init_systems(init_fn);
        info!(target: "core", "Engine initialization complete");
        self
    }

    //--- Execution --------------------------------------------------------

    /// Starts the runtime and blocks until the application exits.
    ///
    /// # Lifecycle
    ///
    /// 1. Creates the bounded channel for platform → core communication
    /// 2. Spawns the logic thread running at the configured TPS
    /// 3. Runs the platform event loop (blocks here)
    /// 4. On window close: platform exits → logic thread exits its scenes
    ///    and terminates → joined here
    pub fn run(self) {
        info!(target: "core", "Starting engine runtime (TPS: {})", self.tps);

        //--- 1. Create communication channel -----------------------------
        let (tx, rx): (Sender<PlatformEvent>, Receiver<PlatformEvent>) =
            bounded(self.channel_capacity);

        //--- 2. Spawn the core logic thread -------------------------------
        let core_handle = self.orchestrator.spawn_core_thread(rx, self.tps);
        info!(target: "core", "Core logic thread spawned");

        //--- 3. Launch the platform subsystem -----------------------------
        let platform = Platform::new(tx, self.window);
        if let Err(e) = platform.run() {
            error!(target: "platform", "Platform error: {}", e);
        }
        info!(target: "platform", "Platform event loop exited");

        //--- 4. Cleanup: Wait for logic thread to terminate --------------
        match core_handle.join() {
            Ok(()) => info!(target: "core", "Core thread terminated cleanly"),
            Err(e) => error!(target: "core", "Core thread panicked: {:?}", e),
        }

        info!(target: "core", "Engine shutdown complete");
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
