//=========================================================================
// Core Systems Orchestrator
//
// Central coordinator for all engine subsystems running on the logic
// (non-platform) thread.
//
// Responsibilities:
// - Own the scene systems and the context scenes read and write
// - Receive platform events via the bounded channel
// - Sample the clock once per tick and hand it to scenes
// - Maintain deterministic pacing using a fixed tick rate (TPS)
//
// Notes:
// The orchestrator runs independently from the platform layer.
// Communication with the platform occurs only through message passing,
// so scenes never touch windowing state.
//
//=========================================================================

//=== Module Declarations =================================================

pub mod clock;
pub mod geometry;
pub mod globals;
pub mod input;
pub(crate) mod platform_bridge;
pub mod scene;

//=== Public API ==========================================================

pub use globals::{GlobalContext, GlobalSystems};
pub use scene::{Scene, SceneKey, SceneManager, SceneTransition};

//=== External Dependencies ===============================================

use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::Receiver;
use log::{info, trace};

//=== Internal Dependencies ===============================================

use clock::{Clock, SystemClock};
use geometry::Size;
use platform_bridge::{EventCollector, PlatformEvent, TickControl};

//=== CoreSystemsOrchestrator =============================================

/// Owns every logic-thread system and advances them one tick at a time.
pub(crate) struct CoreSystemsOrchestrator<S: SceneKey> {
    systems: GlobalSystems<S>,
    context: GlobalContext<S>,
    clock: Box<dyn Clock>,
}

impl<S: SceneKey> CoreSystemsOrchestrator<S> {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new(viewport: Size) -> Self {
        Self::with_clock(viewport, Box::new(SystemClock::new()))
    }

    pub(crate) fn with_clock(viewport: Size, clock: Box<dyn Clock>) -> Self {
        Self {
            systems: GlobalSystems::new(),
            context: GlobalContext::new(viewport),
            clock,
        }
    }

    /// Gives the caller mutable access to systems before the loop starts.
    pub(crate) fn init_systems<F>(&mut self, init_fn: F)
    where
        F: FnOnce(&mut GlobalSystems<S>),
    {
        init_fn(&mut self.systems);
    }

    //--- Tick -------------------------------------------------------------

    /// Enters the initial scene at the current clock reading.
    pub(crate) fn start(&mut self) {
        self.context.time = self.context.time.advance_to(self.clock.now());
        self.systems.scene_manager.start(&self.context);
    }

    /// Runs one logic tick: sample clock, update input, scenes, transitions.
    pub(crate) fn step(&mut self) {
        self.context.time = self.context.time.advance_to(self.clock.now());
        self.systems.update(&mut self.context);
    }

    /// Exits every active scene so their teardown runs.
    pub(crate) fn shutdown(&mut self) {
        info!(target: "core", "Shutting down scenes");
        self.systems.shutdown(&self.context);
    }

    /// Moves one frame's worth of collected platform state into the context.
    fn absorb(&mut self, collector: &mut EventCollector) {
        self.context.frame_events.extend(collector.take_batches());
        if let Some(size) = collector.take_resize() {
            self.context.viewport = size;
        }
    }

    //--- spawn_core_thread() ---------------------------------------------
    //
    // Each tick:
    //  1. Collects platform events (exit on close / disconnect)
    //  2. Steps every system
    //  3. Sleeps the remainder of the tick
    //
    pub(crate) fn spawn_core_thread(
        mut self,
        receiver: Receiver<PlatformEvent>,
        tps: f64,
    ) -> thread::JoinHandle<()> {
        let frame_duration = Duration::from_secs_f64(1.0 / tps);

        thread::spawn(move || {
            let mut collector = EventCollector::new(receiver);
            self.start();

            loop {
                let frame_start = Instant::now();

                //--- Step 1: Gather platform events ------------------------
                if collector.collect_frame() == TickControl::Exit {
                    info!(target: "core", "Core thread exiting.");
                    break;
                }
                self.absorb(&mut collector);

                //--- Step 2: Update systems --------------------------------
                self.step();

                //--- Step 3: Maintain deterministic pacing ----------------
                let elapsed = frame_start.elapsed();
                if elapsed < frame_duration {
                    thread::sleep(frame_duration - elapsed);
                } else {
                    trace!(target: "core", "Tick overran by {:?}", elapsed - frame_duration);
                }
            }

            self.shutdown();
        })
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::ManualClock;
    use crate::core::input::{InputEvent, KeyCode};
    use crate::core::scene::Scene;
    use crossbeam_channel::bounded;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
    enum Key {
        Main,
    }

    impl SceneKey for Key {}

    #[derive(Default, Debug)]
    struct Seen {
        times: Vec<Duration>,
        viewports: Vec<Size>,
        enters: usize,
        exits: usize,
        pressed_enter: usize,
    }

    struct Probe(Arc<Mutex<Seen>>);

    impl Scene<Key> for Probe {
        fn on_enter(&mut self, _context: &GlobalContext<Key>) {
            self.0.lock().unwrap().enters += 1;
        }

        fn on_exit(&mut self, _context: &GlobalContext<Key>) {
            self.0.lock().unwrap().exits += 1;
        }

        fn update(&mut self, context: &mut GlobalContext<Key>) {
            let mut seen = self.0.lock().unwrap();
            seen.times.push(context.time.now);
            seen.viewports.push(context.viewport);
            if context.input_state.is_key_pressed(KeyCode::Enter) {
                seen.pressed_enter += 1;
            }
        }
    }

    fn orchestrator(clock: &ManualClock) -> (CoreSystemsOrchestrator<Key>, Arc<Mutex<Seen>>) {
        let seen = Arc::new(Mutex::new(Seen::default()));
        let mut core = CoreSystemsOrchestrator::with_clock(
            Size::new(1280.0, 720.0),
            Box::new(clock.clone()),
        );
        let probe = Probe(Arc::clone(&seen));
        core.init_systems(|systems| systems.scene_manager.register_default(Key::Main, probe));
        (core, seen)
    }

    //=====================================================================
    // Stepping
    //=====================================================================

    #[test]
    fn step_samples_clock_each_tick() {
        let clock = ManualClock::new();
        let (mut core, seen) = orchestrator(&clock);
        core.start();

        clock.advance(Duration::from_millis(16));
        core.step();
        clock.advance(Duration::from_millis(17));
        core.step();

        let seen = seen.lock().unwrap();
        assert_eq!(seen.enters, 1);
        assert_eq!(
            seen.times,
            vec![Duration::from_millis(16), Duration::from_millis(33)]
        );
        assert_eq!(core.context.time.delta, Duration::from_millis(17));
    }

    #[test]
    fn absorbed_events_reach_scenes() {
        let clock = ManualClock::new();
        let (mut core, seen) = orchestrator(&clock);
        let (tx, rx) = bounded(8);
        let mut collector = EventCollector::new(rx);
        core.start();

        tx.send(PlatformEvent::Inputs(vec![InputEvent::KeyDown(KeyCode::Enter)]))
            .unwrap();
        tx.send(PlatformEvent::Resized { width: 800.0, height: 600.0 })
            .unwrap();
        assert_eq!(collector.collect_frame(), TickControl::Continue);
        core.absorb(&mut collector);
        core.step();

        let seen = seen.lock().unwrap();
        assert_eq!(seen.pressed_enter, 1);
        assert_eq!(seen.viewports, vec![Size::new(800.0, 600.0)]);
    }

    #[test]
    fn shutdown_exits_scenes() {
        let clock = ManualClock::new();
        let (mut core, seen) = orchestrator(&clock);
        core.start();
        core.shutdown();

        assert_eq!(seen.lock().unwrap().exits, 1);
    }

    //=====================================================================
    // Thread
    //=====================================================================

    #[test]
    fn core_thread_exits_on_window_closed() {
        let clock = ManualClock::new();
        let (core, seen) = orchestrator(&clock);
        let (tx, rx) = bounded(8);

        let handle = core.spawn_core_thread(rx, 240.0);
        tx.send(PlatformEvent::WindowClosed).unwrap();
        handle.join().expect("core thread should not panic");

        let seen = seen.lock().unwrap();
        assert_eq!(seen.enters, 1);
        assert_eq!(seen.exits, 1, "Scenes are exited on shutdown");
    }

    #[test]
    fn core_thread_exits_on_disconnect() {
        let clock = ManualClock::new();
        let (core, _seen) = orchestrator(&clock);
        let (tx, rx) = bounded::<PlatformEvent>(8);

        let handle = core.spawn_core_thread(rx, 240.0);
        drop(tx);
        handle.join().expect("core thread should not panic");
    }
}
