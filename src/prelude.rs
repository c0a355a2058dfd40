//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use aetheric_showcase::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Engine core
pub use crate::engine::{Engine, EngineBuilder};

// Global systems and context
pub use crate::core::globals::{GlobalContext, GlobalSystems};

// Time and geometry
pub use crate::core::clock::{Clock, FrameTime, ManualClock, SystemClock};
pub use crate::core::geometry::{Size, Vec2};

// Input
pub use crate::core::input::{InputEvent, KeyCode};

// Scene system
pub use crate::core::scene::{Scene, SceneKey, SceneTransition};

// Card stacks
pub use crate::cards::{SceneController, ShuffleConfig, ShuffleError};
