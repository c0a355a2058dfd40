//=========================================================================
// Card Stacks
//=========================================================================
//
// Bookkeeping and scheduling for the shuffling-stacks scene: a fixed
// population of tokens spread over piles, relocated one at a time on a
// cadence, with any number of flights interleaved across ticks.
//
// Architecture:
// ```text
//   SceneController
//     ├─ LayoutPlanner       anchors + resting offsets (once, at create)
//     ├─ PileStore           piles, tokens, lock flags
//     ├─ TransferScheduler   one dispatch per cadence
//     └─ TransferAnimator    eased flights, landings handed back
// ```
//
// Invariants:
// - resting + in-flight tokens is constant for the scene's lifetime
// - a pile receiving a flight is locked until that flight lands
// - nothing lands after destroy()
//
// Everything here is single-threaded and driven by the caller's ticks.
//
//=========================================================================

//=== Module Declarations =================================================

mod animator;
mod config;
mod controller;
mod error;
mod layout;
mod pile_store;
mod scheduler;
mod token;

//=== Public API ==========================================================

pub use animator::{ease_in_out, Landing, Transfer, TransferAnimator, TransferHandle};
pub use config::ShuffleConfig;
pub use controller::{SceneController, TickReport};
pub use error::{ConfigError, LayoutError, ShuffleError};
pub use layout::{LayoutPlanner, LayoutStrategy, STACK_STEP_RATIO, VIEWPORT_PADDING};
pub use pile_store::{Pile, PileStore};
pub use scheduler::{DispatchOutcome, SchedulerState, TransferScheduler};
pub use token::{Token, TokenId};
