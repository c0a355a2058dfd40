//=========================================================================
// Menu Scene
//=========================================================================
//
// Keyboard menu over the three demos.
//
// ArrowUp / ArrowDown move the highlight (wrapping), Enter opens the
// highlighted demo, 1-3 open a demo directly. Opening a demo replaces
// the menu on the stack.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, info};

//=== Internal Dependencies ===============================================

use super::ShowcaseScene;
use crate::core::globals::GlobalContext;
use crate::core::input::KeyCode;
use crate::core::scene::{Scene, SceneTransition};

//=== Layout ==============================================================

pub const MENU_TITLE: &str = "Game Developer Assignment";

/// Demo labels and their scenes, in display order.
pub const MENU_OPTIONS: [(&str, ShowcaseScene); 3] = [
    ("Ace of Shadows", ShowcaseScene::AceOfShadows),
    ("Magic Words", ShowcaseScene::MagicWords),
    ("Phoenix Flame", ShowcaseScene::PhoenixFlame),
];

const TITLE_Y: f32 = 100.0;
const FIRST_OPTION_Y: f32 = 200.0;
const OPTION_SPACING: f32 = 80.0;

/// One menu line, horizontally centred by the renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MenuItem {
    pub label: &'static str,
    pub y: f32,
    pub highlighted: bool,
}

//=== MenuScene ===========================================================

pub struct MenuScene {
    selected: usize,
}

impl MenuScene {
    pub fn new() -> Self {
        Self { selected: 0 }
    }

    pub fn selected(&self) -> ShowcaseScene {
        MENU_OPTIONS[self.selected].1
    }

    pub fn title_y(&self) -> f32 {
        TITLE_Y
    }

    pub fn items(&self) -> Vec<MenuItem> {
        MENU_OPTIONS
            .iter()
            .enumerate()
            .map(|(index, &(label, _))| MenuItem {
                label,
                y: FIRST_OPTION_Y + index as f32 * OPTION_SPACING,
                highlighted: index == self.selected,
            })
            .collect()
    }

    fn move_selection(&mut self, forward: bool) {
        let count = MENU_OPTIONS.len();
        self.selected = if forward {
            (self.selected + 1) % count
        } else {
            (self.selected + count - 1) % count
        };
        debug!(target: "scene", "Menu highlight: {}", MENU_OPTIONS[self.selected].0);
    }

    /// Option chosen this tick, if any; a digit wins over Enter.
    fn chosen(&self, context: &GlobalContext<ShowcaseScene>) -> Option<usize> {
        let input = &context.input_state;
        let by_digit = input
            .digit_pressed()
            .map(usize::from)
            .filter(|digit| (1..=MENU_OPTIONS.len()).contains(digit))
            .map(|digit| digit - 1);

        by_digit.or_else(|| input.is_key_pressed(KeyCode::Enter).then_some(self.selected))
    }
}

impl Default for MenuScene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene<ShowcaseScene> for MenuScene {
    fn on_enter(&mut self, _context: &GlobalContext<ShowcaseScene>) {
        info!(target: "scene", "{}", MENU_TITLE);
    }

    fn update(&mut self, context: &mut GlobalContext<ShowcaseScene>) {
        if context.input_state.is_key_pressed(KeyCode::ArrowDown) {
            self.move_selection(true);
        }
        if context.input_state.is_key_pressed(KeyCode::ArrowUp) {
            self.move_selection(false);
        }

        if let Some(index) = self.chosen(context) {
            self.selected = index;
            let (label, scene) = MENU_OPTIONS[index];
            info!(target: "scene", "Opening {}", label);
            context
                .scene_transitions
                .push(SceneTransition::Replace(ShowcaseScene::Menu, scene));
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
