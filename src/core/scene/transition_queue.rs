//=========================================================================
// Transition Queue
//=========================================================================
//
// Queue for scene transitions.
//
// Scenes queue transitions here during updates. The scene manager
// processes this queue at tick boundaries.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::{SceneKey, SceneTransition};

//=== Transition Queue ====================================================

/// FIFO of scene transitions requested during the current tick.
#[derive(Debug)]
pub struct TransitionQueue<S: SceneKey> {
    queue: Vec<SceneTransition<S>>,
}

impl<S: SceneKey> TransitionQueue<S> {
    pub fn new() -> Self {
        Self { queue: Vec::new() }
    }

    /// Queues a scene transition to be processed at the next tick boundary.
    pub fn push(&mut self, transition: SceneTransition<S>) {
        self.queue.push(transition);
    }

    pub fn iter(&self) -> impl Iterator<Item = &SceneTransition<S>> {
        self.queue.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Takes all transitions from the queue, leaving it empty.
    pub fn take(&mut self) -> Vec<SceneTransition<S>> {
        std::mem::take(&mut self.queue)
    }
}

impl<S: SceneKey> Default for TransitionQueue<S> {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
