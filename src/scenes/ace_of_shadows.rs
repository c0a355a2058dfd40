//=========================================================================
// Ace of Shadows
//=========================================================================
//
// Scene shell around the card-stack `SceneController`.
//
// on_enter  → SceneController::create(for_viewport(viewport), now)
// update    → SceneController::tick(now), Escape → menu
// on_exit   → SceneController::destroy()
//
// A scene that fails to build logs the error and returns to the menu on
// its first update.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{error, info, trace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

//=== Internal Dependencies ===============================================

use super::{escape_to_menu, return_to_menu, ShowcaseScene};
use crate::cards::{DispatchOutcome, SceneController, ShuffleConfig, TokenId};
use crate::core::geometry::Vec2;
use crate::core::globals::GlobalContext;
use crate::core::scene::Scene;

//=== CardVisual ==========================================================

/// Card face colours (0xRRGGBB).
pub const CARD_PALETTE: [u32; 6] = [0xFF4500, 0xFFA500, 0xFFD700, 0xFFFF00, 0xFFFFFF, 0xFF8000];

/// Border drawn around every card.
pub const CARD_BORDER: (f32, u32) = (2.0, 0xFFFFFF);

/// Presentation payload carried by each card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardVisual {
    pub colour: u32,
}

//=== AceOfShadowsScene ===================================================

pub struct AceOfShadowsScene {
    /// Fixed config; `None` derives one from the viewport on every enter.
    config: Option<ShuffleConfig>,
    controller: Option<SceneController<CardVisual>>,
    failed: bool,
}

impl AceOfShadowsScene {
    pub fn new() -> Self {
        Self {
            config: None,
            controller: None,
            failed: false,
        }
    }

    /// Uses `config` instead of the viewport-derived default.
    pub fn with_config(config: ShuffleConfig) -> Self {
        Self {
            config: Some(config),
            ..Self::new()
        }
    }

    pub fn controller(&self) -> Option<&SceneController<CardVisual>> {
        self.controller.as_ref()
    }

    /// Every card with its current position, resting ones pile by pile
    /// bottom to top, then in-flight ones.
    pub fn cards(&self) -> Vec<(Vec2, CardVisual)> {
        let Some(controller) = &self.controller else {
            return Vec::new();
        };

        let resting = controller
            .store()
            .into_iter()
            .flat_map(|store| store.piles())
            .flat_map(|pile| pile.tokens())
            .map(|token| (token.position, *token.payload()));
        let flying = controller
            .animator()
            .into_iter()
            .flat_map(|animator| animator.transfers())
            .map(|transfer| (transfer.token.position, *transfer.token.payload()));

        resting.chain(flying).collect()
    }
}

impl Default for AceOfShadowsScene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene<ShowcaseScene> for AceOfShadowsScene {
    fn on_enter(&mut self, context: &GlobalContext<ShowcaseScene>) {
        let config = self
            .config
            .clone()
            .unwrap_or_else(|| ShuffleConfig::for_viewport(context.viewport.width, context.viewport.height));

        // Colours come from their own stream so the shuffle stays reproducible.
        let mut colours = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(1)),
            None => StdRng::from_os_rng(),
        };
        let paint = |_: TokenId| CardVisual {
            colour: CARD_PALETTE[colours.random_range(0..CARD_PALETTE.len())],
        };

        match SceneController::create(&config, context.time.now, paint) {
            Ok(controller) => {
                info!(target: "scene", "Ace of Shadows: {} cards dealt", controller.total_tokens());
                self.controller = Some(controller);
                self.failed = false;
            }
            Err(e) => {
                error!(target: "scene", "Ace of Shadows could not start: {}", e);
                self.failed = true;
            }
        }
    }

    fn on_exit(&mut self, _context: &GlobalContext<ShowcaseScene>) {
        if let Some(mut controller) = self.controller.take() {
            controller.destroy();
        }
        self.failed = false;
    }

    fn update(&mut self, context: &mut GlobalContext<ShowcaseScene>) {
        if self.failed {
            self.failed = false;
            return_to_menu(context, ShowcaseScene::AceOfShadows);
            return;
        }

        if escape_to_menu(context, ShowcaseScene::AceOfShadows) {
            return;
        }

        let Some(controller) = self.controller.as_mut() else {
            return;
        };

        let report = controller.tick(context.time.now);
        if let Some(DispatchOutcome::Started { source, destination, .. }) = report.dispatch {
            trace!(target: "scene", "Card {} → {}, {} in flight", source, destination, controller.in_flight());
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
