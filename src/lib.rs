//=========================================================================
// Aetheric Showcase: Library Root
//
// Scene showcase on a fixed-rate engine runtime.
//
// Responsibilities:
// - Expose the engine facade (`Engine`, `EngineBuilder`)
// - Expose the card-stack scheduler (`cards`) as a standalone library
// - Keep the windowing layer (`platform`) hidden from end users
//
// Typical usage:
// ```no_run
// use aetheric_showcase::EngineBuilder;
// use aetheric_showcase::scenes::{self, ShowcaseScene};
//
// EngineBuilder::<ShowcaseScene>::new()
//     .build()
//     .init(scenes::register)
//     .run();
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `cards` is the card-stack transfer scheduler; it has no dependency on
// the engine runtime beyond geometry and can be driven by any clock.
//
// `core` holds the logic-thread systems (input, scenes, clock).
//
// `scenes` holds the menu and the three demos.
//
pub mod cards;
pub mod core;
pub mod prelude;
pub mod scenes;

//--- Internal Modules ----------------------------------------------------
//
// `platform` contains the Winit integration and is not part of the
// public API surface. `engine` wires platform and core together.
//
mod engine;
mod platform;

//--- Public Exports ------------------------------------------------------

pub use engine::{Engine, EngineBuilder};
