//=========================================================================
// Scene System
//=========================================================================
//
// Manages scene lifecycle and stack-based scene switching.
//
// Architecture:
//   SceneManager
//     ├─ scenes: HashMap<S, Box<dyn Scene>>
//     └─ stack: Vec<S>
//
// Flow:
//   update() → collect_active_scenes() → Scene::update()
//   process_transitions() → TransitionQueue drained in FIFO order
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::globals::GlobalContext;

//=== Module Declarations =================================================

mod scene_manager;
mod transition_queue;

//=== Public API ==========================================================

pub use scene_manager::{SceneKey, SceneManager, SceneTransition};
pub use transition_queue::TransitionQueue;

//=== Scene Trait =========================================================

/// Defines scene behavior with lifecycle hooks and update logic.
///
/// Scenes are registered in SceneManager and activated via scene stack.
/// Each scene keeps its own state between activations.
///
/// # Minimal Implementation
///
/// Only `update()` is required. Lifecycle hooks have default empty implementations:
///
/// ```rust
/// # use aetheric_showcase::prelude::*;
/// # #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// # enum DemoScene { Main }
/// # impl SceneKey for DemoScene {}
/// struct MyScene;
///
/// impl Scene<DemoScene> for MyScene {
///     fn update(&mut self, context: &mut GlobalContext<DemoScene>) {
///         // Only this method is required
///     }
/// }
/// ```
pub trait Scene<S: SceneKey>: Send {
    /// Called when scene enters the active stack.
    fn on_enter(&mut self, _context: &GlobalContext<S>) {}

    /// Called when scene exits the active stack.
    fn on_exit(&mut self, _context: &GlobalContext<S>) {}

    /// Called every tick while scene is active on stack.
    ///
    /// Transitions pushed onto `context.scene_transitions` are applied
    /// after every active scene has updated.
    fn update(&mut self, context: &mut GlobalContext<S>);

    /// Whether scenes below this one should receive updates.
    ///
    /// Transparent scenes (e.g., overlays) allow underlying scenes
    /// to continue updating. Opaque scenes block updates to lower stack.
    fn is_transparent(&self) -> bool {
        false
    }
}
