//=========================================================================
// Scene Manager
//=========================================================================
//
// Manages scene registration, stack operations, and lifecycle.
//
// Scenes are stored in a HashMap by key and referenced via a stack
// of keys. This allows scenes to maintain state between activations.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use log::{debug, info, warn};

//=== Internal Dependencies ===============================================

use super::Scene;
use crate::core::globals::GlobalContext;

//=== Scene Transition ====================================================

/// Encapsulates scene stack operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneTransition<K: SceneKey> {
    /// Adds a new scene to the top of the stack.
    Push(K),

    /// Removes a specific scene from the stack by key.
    Remove(K),

    /// Replaces a specific scene with another scene.
    Replace(K, K),

    /// Clears all scenes from the stack.
    Clear,

    /// No transition occurs.
    Empty,
}

impl<K: SceneKey> Default for SceneTransition<K> {
    fn default() -> Self {
        Self::Empty
    }
}

//=== Scene Key Trait =====================================================

/// Marker trait for scene identifiers.
///
/// Typically implemented by an application enum.
pub trait SceneKey: Clone + Copy + Eq + Hash + Debug + Send + 'static {}

//=== Scene Manager =======================================================

/// Stack of active scenes over a registry of every known scene.
///
/// The topmost scene receives updates first in priority; scenes below it
/// update only while everything above them is transparent.
pub struct SceneManager<S: SceneKey> {
    scenes: HashMap<S, Box<dyn Scene<S>>>,
    stack: Vec<S>,
}

impl<S: SceneKey> SceneManager<S> {
    //--- Construction -----------------------------------------------------

    pub fn new() -> Self {
        Self {
            scenes: HashMap::new(),
            stack: Vec::new(),
        }
    }

    //--- Registration -----------------------------------------------------

    /// Registers a scene with the manager.
    ///
    /// Scenes must be registered before being pushed to the stack.
    pub fn register_scene<T>(&mut self, key: S, scene: T)
    where
        T: Scene<S> + 'static,
    {
        if self.scenes.insert(key, Box::new(scene)).is_some() {
            warn!(target: "scene", "Scene {:?} was already registered and has been replaced", key);
        }
    }

    /// Registers a scene and places it at the bottom of the stack.
    ///
    /// Its `on_enter` runs when [`SceneManager::start`] is called.
    pub fn register_default<T>(&mut self, key: S, scene: T)
    where
        T: Scene<S> + 'static,
    {
        self.register_scene(key, scene);

        if self.stack.contains(&key) {
            warn!(target: "scene", "Scene {:?} is already in the stack", key);
        } else {
            debug!(target: "scene", "Registered scene {:?} as default and added to stack", key);
            self.stack.push(key);
        }
    }

    /// Calls `on_enter` on the initial scene.
    pub fn start(&mut self, context: &GlobalContext<S>) {
        let Some(&initial) = self.stack.first() else {
            warn!(target: "scene", "Scene manager started with an empty stack");
            return;
        };

        info!(target: "scene", "Starting scene manager with initial scene: {:?}", initial);
        match self.scenes.get_mut(&initial) {
            Some(scene) => scene.on_enter(context),
            None => warn!(target: "scene", "Initial scene {:?} not registered", initial),
        }
    }

    //--- Queries ----------------------------------------------------------

    /// Scene keys bottom to top.
    pub fn stack(&self) -> &[S] {
        &self.stack
    }

    pub fn top(&self) -> Option<S> {
        self.stack.last().copied()
    }

    pub fn is_registered(&self, key: S) -> bool {
        self.scenes.contains_key(&key)
    }

    //--- Update Loop ------------------------------------------------------

    /// Calls update on the topmost opaque scene and every transparent
    /// scene above it, bottom to top.
    pub fn update(&mut self, context: &mut GlobalContext<S>) {
        if self.stack.is_empty() {
            return;
        }

        for key in self.collect_active_scenes() {
            if let Some(scene) = self.scenes.get_mut(&key) {
                scene.update(context);
            }
        }
    }

    //--- Transition Processing --------------------------------------------

    /// Applies every queued transition in FIFO order.
    ///
    /// Called at the tick boundary after scene updates.
    pub fn process_transitions(&mut self, context: &mut GlobalContext<S>) {
        for transition in context.scene_transitions.take() {
            match transition {
                SceneTransition::Push(key) => self.push_internal(key, context),
                SceneTransition::Remove(key) => self.remove_internal(key, context),
                SceneTransition::Replace(old_key, new_key) => {
                    self.replace_internal(old_key, new_key, context)
                }
                SceneTransition::Clear => self.clear(context),
                SceneTransition::Empty => {}
            }
        }
    }

    /// Exits every scene on the stack, top first, and empties it.
    pub fn clear(&mut self, context: &GlobalContext<S>) {
        debug!(target: "scene", "Clearing all scenes from stack");

        while let Some(key) = self.stack.pop() {
            if let Some(scene) = self.scenes.get_mut(&key) {
                info!(target: "scene", "Exiting scene {:?}", key);
                scene.on_exit(context);
            }
        }
    }

    //--- Internal Helpers -------------------------------------------------

    fn push_internal(&mut self, key: S, context: &GlobalContext<S>) {
        if self.stack.contains(&key) {
            warn!(target: "scene", "Scene {:?} is already in the stack, skipping push", key);
            return;
        }

        let Some(scene) = self.scenes.get_mut(&key) else {
            warn!(target: "scene", "Attempted to push unregistered scene {:?}", key);
            return;
        };

        info!(target: "scene", "Entering scene {:?}", key);
        self.stack.push(key);
        scene.on_enter(context);
    }

    fn remove_internal(&mut self, key: S, context: &GlobalContext<S>) {
        let Some(pos) = self.stack.iter().position(|&k| k == key) else {
            debug!(target: "scene", "Scene {:?} not found in stack, skipping removal", key);
            return;
        };

        info!(target: "scene", "Exiting scene {:?}", key);
        self.stack.remove(pos);
        if let Some(scene) = self.scenes.get_mut(&key) {
            scene.on_exit(context);
        }
    }

    fn replace_internal(&mut self, old_key: S, new_key: S, context: &GlobalContext<S>) {
        let Some(pos) = self.stack.iter().position(|&k| k == old_key) else {
            warn!(target: "scene", "Scene {:?} not found in stack, skipping replacement", old_key);
            return;
        };

        if self.stack.contains(&new_key) {
            warn!(target: "scene", "Scene {:?} is already in the stack, skipping replacement", new_key);
            return;
        }

        if !self.scenes.contains_key(&new_key) {
            warn!(target: "scene", "Attempted to replace with unregistered scene {:?}", new_key);
            return;
        }

        info!(target: "scene", "Replacing scene {:?} with {:?}", old_key, new_key);

        if let Some(scene) = self.scenes.get_mut(&old_key) {
            scene.on_exit(context);
        }

        self.stack[pos] = new_key;

        if let Some(scene) = self.scenes.get_mut(&new_key) {
            scene.on_enter(context);
        }
    }

    fn collect_active_scenes(&self) -> Vec<S> {
        let mut active = Vec::new();

        // Iterate stack top-down, stop at first opaque scene
        for &key in self.stack.iter().rev() {
            active.push(key);

            if self.scenes.get(&key).is_some_and(|scene| !scene.is_transparent()) {
                break;
            }
        }

        active.reverse();
        active
    }
}

impl<S: SceneKey> Default for SceneManager<S> {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
