//=========================================================================
// Showcase Scenes
//=========================================================================
//
// The menu and the three demos, registered with the engine's scene
// manager under `ShowcaseScene` keys.
//
// Navigation:
// ```text
//   Menu ──Enter / 1-3──> AceOfShadows | MagicWords | PhoenixFlame
//     ^                          │
//     └──────── Escape ──────────┘        (Replace, never Push)
// ```
//
// Exactly one scene is on the stack at a time.
//
//=========================================================================

//=== Module Declarations =================================================

mod ace_of_shadows;
pub mod dialogue;
mod magic_words;
mod menu;
mod phoenix_flame;

//=== Public API ==========================================================

pub use ace_of_shadows::{AceOfShadowsScene, CardVisual, CARD_PALETTE};
pub use magic_words::MagicWordsScene;
pub use menu::{MenuItem, MenuScene, MENU_OPTIONS};
pub use phoenix_flame::{FireCircle, FireSprite, FlameField, PhoenixFlameScene, FIRE_PALETTE};

//=== Internal Dependencies ===============================================

use crate::core::globals::{GlobalContext, GlobalSystems};
use crate::core::input::KeyCode;
use crate::core::scene::{SceneKey, SceneTransition};

//=== ShowcaseScene =======================================================

/// Keys of every scene in the showcase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShowcaseScene {
    Menu,
    AceOfShadows,
    MagicWords,
    PhoenixFlame,
}

impl SceneKey for ShowcaseScene {}

/// Registers all four scenes with the menu as the starting scene.
///
/// Shaped to be passed straight to `Engine::init`.
pub fn register(systems: &mut GlobalSystems<ShowcaseScene>) {
    let scenes = &mut systems.scene_manager;
    scenes.register_default(ShowcaseScene::Menu, MenuScene::new());
    scenes.register_scene(ShowcaseScene::AceOfShadows, AceOfShadowsScene::new());
    scenes.register_scene(ShowcaseScene::MagicWords, MagicWordsScene::new());
    scenes.register_scene(ShowcaseScene::PhoenixFlame, PhoenixFlameScene::new());
}

//--- Shared Navigation ----------------------------------------------------

/// Replaces `from` with the menu.
fn return_to_menu(context: &mut GlobalContext<ShowcaseScene>, from: ShowcaseScene) {
    context
        .scene_transitions
        .push(SceneTransition::Replace(from, ShowcaseScene::Menu));
}

/// Queues the return to the menu if Escape went down this tick.
fn escape_to_menu(context: &mut GlobalContext<ShowcaseScene>, from: ShowcaseScene) -> bool {
    if context.input_state.is_key_pressed(KeyCode::Escape) {
        return_to_menu(context, from);
        return true;
    }
    false
}

//=========================================================================
// Unit Tests
//=========================================================================
