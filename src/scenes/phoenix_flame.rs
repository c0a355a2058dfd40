//=========================================================================
// Phoenix Flame
//=========================================================================
//
// Fire effect with a hard cap of ten visual elements.
//
// Elements:
// ```text
//   5 × FireSprite   fixed columns at 30/70/40/60/50 % of the width,
//                    jitter upward and snap back below a ceiling
//   5 × FireCircle   rise, drift, fade and shrink; respawn at the base
// ```
//
// One `FlameField::step` per logic tick.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

//=== Internal Dependencies ===============================================

use super::{escape_to_menu, ShowcaseScene};
use crate::core::geometry::{Size, Vec2};
use crate::core::globals::GlobalContext;
use crate::core::scene::Scene;

//=== Constants ===========================================================

pub const FIRE_PALETTE: [u32; 5] = [0xFF4500, 0xFFA500, 0xFFD700, 0xFFFF00, 0xFFFFFF];

const SPRITE_COLUMNS: [f32; 5] = [0.30, 0.70, 0.40, 0.60, 0.50];
const SPRITE_BASE_OFFSET: f32 = 260.0;
const SPRITE_RESET_OFFSET: f32 = 250.0;
const SPRITE_CEILING_OFFSET: f32 = 280.0;

/// Sprite-sheet frames advanced per tick.
const SPRITE_ANIMATION_SPEED: f32 = 0.1;

const CIRCLE_COUNT: usize = 5;
const CIRCLE_SPAWN_OFFSET: f32 = 250.0;
const CIRCLE_FADE: f32 = 0.01;
const CIRCLE_SHRINK: f32 = 0.98;

/// Width divisor for the spawn spread around the centre.
const SPAWN_SPREAD_DIVISOR: f32 = 3.75;

//=== Elements ============================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FireSprite {
    pub position: Vec2,
    /// Fractional sprite-sheet frame.
    pub frame: f32,
}

impl FireSprite {
    /// Sheet frame to draw for a sheet of `frame_count` frames.
    pub fn frame_index(&self, frame_count: usize) -> usize {
        if frame_count == 0 {
            return 0;
        }
        self.frame as usize % frame_count
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FireCircle {
    pub position: Vec2,
    pub radius: f32,
    pub colour: u32,
    pub alpha: f32,
    pub scale: f32,
}

//=== FlameField ==========================================================

pub struct FlameField {
    viewport: Size,
    sprites: Vec<FireSprite>,
    circles: Vec<FireCircle>,
    rng: StdRng,
}

impl FlameField {
    pub fn new(viewport: Size, mut rng: StdRng) -> Self {
        let base_y = viewport.height - SPRITE_BASE_OFFSET;
        let sprites = SPRITE_COLUMNS
            .iter()
            .map(|column| FireSprite {
                position: Vec2::new(viewport.width * column, base_y),
                frame: 0.0,
            })
            .collect();

        let circles = (0..CIRCLE_COUNT)
            .map(|_| spawn_circle(viewport, &mut rng))
            .collect();

        Self {
            viewport,
            sprites,
            circles,
            rng,
        }
    }

    pub fn sprites(&self) -> &[FireSprite] {
        &self.sprites
    }

    pub fn circles(&self) -> &[FireCircle] {
        &self.circles
    }

    /// Total elements on screen; never more than ten.
    pub fn element_count(&self) -> usize {
        self.sprites.len() + self.circles.len()
    }

    /// New viewport for subsequent respawns and sprite snapping.
    pub fn resize(&mut self, viewport: Size) {
        self.viewport = viewport;
    }

    /// Advances every element by one tick.
    pub fn step(&mut self) {
        let ceiling = self.viewport.height - SPRITE_CEILING_OFFSET;
        let reset_y = self.viewport.height - SPRITE_RESET_OFFSET;

        for sprite in &mut self.sprites {
            sprite.position.y -= self.rng.random_range(0.0..2.0);
            sprite.position.x += self.rng.random_range(-1.0..1.0);
            sprite.frame += SPRITE_ANIMATION_SPEED;

            if sprite.position.y < ceiling {
                sprite.position.y = reset_y;
            }
        }

        for circle in &mut self.circles {
            circle.position.y -= self.rng.random_range(2.0..7.0);
            circle.position.x += self.rng.random_range(-2.0..2.0);
            circle.alpha -= CIRCLE_FADE;
            circle.scale *= CIRCLE_SHRINK;

            if circle.alpha <= 0.0 || circle.position.y < 0.0 {
                *circle = spawn_circle(self.viewport, &mut self.rng);
            }
        }
    }
}

fn spawn_circle(viewport: Size, rng: &mut StdRng) -> FireCircle {
    FireCircle {
        position: Vec2::new(spawn_x(viewport.width, rng), viewport.height - CIRCLE_SPAWN_OFFSET),
        radius: rng.random_range(10.0..25.0),
        colour: FIRE_PALETTE[rng.random_range(0..FIRE_PALETTE.len())],
        alpha: 1.0,
        scale: 1.0,
    }
}

/// Triangular distribution centred on the viewport, clamped to it.
fn spawn_x(width: f32, rng: &mut StdRng) -> f32 {
    let spread = width / SPAWN_SPREAD_DIVISOR;
    let offset = (rng.random::<f32>() + rng.random::<f32>() - 1.0) * spread;
    (width / 2.0 + offset).clamp(0.0, width)
}

//=== PhoenixFlameScene ===================================================

pub struct PhoenixFlameScene {
    seed: Option<u64>,
    field: Option<FlameField>,
}

impl PhoenixFlameScene {
    pub fn new() -> Self {
        Self { seed: None, field: None }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            field: None,
        }
    }

    pub fn field(&self) -> Option<&FlameField> {
        self.field.as_ref()
    }
}

impl Default for PhoenixFlameScene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene<ShowcaseScene> for PhoenixFlameScene {
    fn on_enter(&mut self, context: &GlobalContext<ShowcaseScene>) {
        let rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let field = FlameField::new(context.viewport, rng);
        info!(target: "scene", "Phoenix Flame: {} elements", field.element_count());
        self.field = Some(field);
    }

    fn on_exit(&mut self, _context: &GlobalContext<ShowcaseScene>) {
        self.field = None;
    }

    fn update(&mut self, context: &mut GlobalContext<ShowcaseScene>) {
        if escape_to_menu(context, ShowcaseScene::PhoenixFlame) {
            return;
        }

        if let Some(field) = self.field.as_mut() {
            if field.viewport != context.viewport {
                field.resize(context.viewport);
            }
            field.step();
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
