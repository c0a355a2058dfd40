//=========================================================================
// Input
//=========================================================================
//
// Keyboard input as seen by scenes.
//
// The platform thread translates Winit key events into `InputEvent`s and
// ships them in batches; each logic tick `GlobalSystems` folds the
// batches into the `StateTracker` held by `GlobalContext`.
//
//=========================================================================

//=== Module Declarations =================================================

pub mod event;
mod state_tracker;

//=== Public API ==========================================================

pub use event::{InputEvent, KeyCode};
pub use state_tracker::StateTracker;
