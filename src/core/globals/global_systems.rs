//=========================================================================
// Global Systems
//=========================================================================
//
// Container for engine-level systems with logic.
//
// Systems operate on GlobalContext data once per logic tick.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::GlobalContext;
use crate::core::scene::{SceneKey, SceneManager};

//=== GlobalSystems =======================================================

/// Container for engine-level logic systems.
pub struct GlobalSystems<S: SceneKey> {
    /// Stack-based scene lifecycle manager.
    pub scene_manager: SceneManager<S>,
}

impl<S: SceneKey> GlobalSystems<S> {
    pub(crate) fn new() -> Self {
        Self {
            scene_manager: SceneManager::new(),
        }
    }

    //--- Update Loop ------------------------------------------------------

    /// Runs one logic tick over `context`.
    ///
    /// # Processing Pipeline
    ///
    /// 1. **Input**: folds this tick's event batches into `input_state`
    /// 2. **Scene Update**: updates active scenes
    /// 3. **Transitions**: applies transitions the scenes queued
    pub(crate) fn update(&mut self, context: &mut GlobalContext<S>) {
        context.input_state.begin_tick();
        for batch in context.frame_events.drain(..) {
            context.input_state.process_events(&batch);
        }

        self.scene_manager.update(context);
        self.scene_manager.process_transitions(context);
    }

    /// Exits every active scene.
    pub(crate) fn shutdown(&mut self, context: &GlobalContext<S>) {
        self.scene_manager.clear(context);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::Size;
    use crate::core::input::{InputEvent, KeyCode};
    use crate::core::scene::{Scene, SceneTransition};

    #[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
    enum Key {
        First,
        Second,
    }

    impl crate::core::scene::SceneKey for Key {}

    /// Leaves for `Second` when Enter goes down.
    struct EnterAdvances;

    impl Scene<Key> for EnterAdvances {
        fn update(&mut self, context: &mut GlobalContext<Key>) {
            if context.input_state.is_key_pressed(KeyCode::Enter) {
                context
                    .scene_transitions
                    .push(SceneTransition::Replace(Key::First, Key::Second));
            }
        }
    }

    struct Idle;

    impl Scene<Key> for Idle {
        fn update(&mut self, _context: &mut GlobalContext<Key>) {}
    }

    #[test]
    fn input_reaches_scene_and_transition_applies() {
        let mut systems = GlobalSystems::new();
        let mut context = GlobalContext::new(Size::new(640.0, 480.0));
        systems.scene_manager.register_default(Key::First, EnterAdvances);
        systems.scene_manager.register_scene(Key::Second, Idle);
        systems.scene_manager.start(&context);

        systems.update(&mut context);
        assert_eq!(systems.scene_manager.top(), Some(Key::First));

        context
            .frame_events
            .push(vec![InputEvent::KeyDown(KeyCode::Enter)]);
        systems.update(&mut context);

        assert_eq!(systems.scene_manager.top(), Some(Key::Second));
        assert!(context.frame_events.is_empty(), "Batches are consumed");
    }

    #[test]
    fn pressed_state_resets_next_tick() {
        let mut systems: GlobalSystems<Key> = GlobalSystems::new();
        let mut context = GlobalContext::new(Size::new(640.0, 480.0));

        context.frame_events.push(vec![InputEvent::KeyDown(KeyCode::Space)]);
        systems.update(&mut context);
        assert!(context.input_state.is_key_pressed(KeyCode::Space));

        systems.update(&mut context);
        assert!(!context.input_state.is_key_pressed(KeyCode::Space));
        assert!(context.input_state.is_key_down(KeyCode::Space));
    }

    #[test]
    fn shutdown_empties_stack() {
        let mut systems = GlobalSystems::new();
        let context = GlobalContext::new(Size::new(640.0, 480.0));
        systems.scene_manager.register_default(Key::First, Idle);
        systems.scene_manager.start(&context);

        systems.shutdown(&context);
        assert!(systems.scene_manager.stack().is_empty());
    }
}
