//=========================================================================
// Magic Words
//=========================================================================
//
// Dialogue scene: speaker names followed by text with inline emoji.
//
// The payload is bundled with the crate; fetching one from a remote
// service is left to whoever constructs the scene with `with_payload`.
// Layout is recomputed whenever the viewport width changes.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{error, info};

//=== Internal Dependencies ===============================================

use super::dialogue::{self, DialogueLine, EmojiMap, LaidOutLine};
use super::{escape_to_menu, return_to_menu, ShowcaseScene};
use crate::core::globals::GlobalContext;
use crate::core::scene::Scene;

//=== Payload =============================================================

const BUNDLED_DIALOGUE: &str = include_str!("../../assets/magic_words.json");

//=== MagicWordsScene =====================================================

pub struct MagicWordsScene {
    payload: String,
    emojis: EmojiMap,
    lines: Vec<DialogueLine>,
    laid_out: Vec<LaidOutLine>,
    laid_out_width: f32,
    failed: bool,
}

impl MagicWordsScene {
    pub fn new() -> Self {
        Self::with_payload(BUNDLED_DIALOGUE)
    }

    pub fn with_payload(json: impl Into<String>) -> Self {
        Self {
            payload: json.into(),
            emojis: EmojiMap::twemoji(),
            lines: Vec::new(),
            laid_out: Vec::new(),
            laid_out_width: 0.0,
            failed: false,
        }
    }

    /// Current layout, one entry per dialogue line.
    pub fn lines(&self) -> &[LaidOutLine] {
        &self.laid_out
    }

    fn relayout(&mut self, width: f32) {
        self.laid_out = dialogue::layout(&self.lines, &self.emojis, width);
        self.laid_out_width = width;
    }
}

impl Default for MagicWordsScene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene<ShowcaseScene> for MagicWordsScene {
    fn on_enter(&mut self, context: &GlobalContext<ShowcaseScene>) {
        match dialogue::parse(&self.payload) {
            Ok(lines) => {
                info!(target: "scene", "Magic Words: {} line(s)", lines.len());
                self.lines = lines;
                self.failed = false;
                self.relayout(context.viewport.width);
            }
            Err(e) => {
                error!(target: "scene", "Magic Words could not start: {}", e);
                self.failed = true;
            }
        }
    }

    fn on_exit(&mut self, _context: &GlobalContext<ShowcaseScene>) {
        self.lines.clear();
        self.laid_out.clear();
        self.failed = false;
    }

    fn update(&mut self, context: &mut GlobalContext<ShowcaseScene>) {
        if self.failed {
            self.failed = false;
            return_to_menu(context, ShowcaseScene::MagicWords);
            return;
        }

        if escape_to_menu(context, ShowcaseScene::MagicWords) {
            return;
        }

        if context.viewport.width != self.laid_out_width {
            self.relayout(context.viewport.width);
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
