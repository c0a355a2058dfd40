//=========================================================================
// Global Context
//=========================================================================
//
// Shared data container for scenes.
//
// Contains state data that scenes read/write:
// - input_state: keyboard state for the current tick
// - scene_transitions: command queue for scene changes
// - time: logic clock sample for the current tick
// - viewport: latest window size
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::clock::FrameTime;
use crate::core::geometry::Size;
use crate::core::input::{InputEvent, StateTracker};
use crate::core::scene::{SceneKey, TransitionQueue};

//=== GlobalContext =======================================================

/// Shared context data accessible to scenes during updates.
pub struct GlobalContext<S: SceneKey> {
    /// Keyboard state (held, pressed this tick, released this tick).
    pub input_state: StateTracker,

    /// Transitions requested this tick; applied after scene updates.
    pub scene_transitions: TransitionQueue<S>,

    /// Clock sample taken at the start of the tick.
    pub time: FrameTime,

    /// Window inner size in logical pixels.
    pub viewport: Size,

    /// Input batches received this tick, folded into `input_state` by
    /// `GlobalSystems::update`.
    pub(crate) frame_events: Vec<Vec<InputEvent>>,
}

impl<S: SceneKey> GlobalContext<S> {
    pub(crate) fn new(viewport: Size) -> Self {
        Self {
            input_state: StateTracker::new(),
            scene_transitions: TransitionQueue::new(),
            time: FrameTime::default(),
            viewport,
            frame_events: Vec::new(),
        }
    }
}
