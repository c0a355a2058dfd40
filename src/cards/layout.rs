//=========================================================================
// Layout Planner
//=========================================================================
//
// Places pile anchors inside the viewport so token footprints never
// overlap, and computes where the Nth token of a pile rests.
//
// Strategies:
// ```text
//   Row      deterministic; centered rows with a fixed gap, wrapping
//            onto further rows only when one row cannot hold them all
//   Scatter  rejection sampling with a minimum anchor separation and
//            a bounded attempt budget (LayoutError when exhausted)
// ```
//
// Tokens within a pile fan downward from the anchor by a fixed fraction
// of the token height.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::debug;
use rand::Rng;

//=== Internal Dependencies ===============================================

use super::error::LayoutError;
use crate::core::geometry::{Size, Vec2};

//=== Constants ===========================================================

/// Vertical step between stacked tokens, as a fraction of token height.
pub const STACK_STEP_RATIO: f32 = 0.6;

/// Margin kept free along every viewport edge.
pub const VIEWPORT_PADDING: f32 = 20.0;

/// Horizontal gap between neighbouring piles in the row layout.
pub const ROW_GAP: f32 = 2.0;

/// Attempt budget used by [`LayoutStrategy::scatter_for`].
pub const DEFAULT_SCATTER_ATTEMPTS: usize = 1_000;

//=== LayoutStrategy ======================================================

/// How pile anchors are chosen.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum LayoutStrategy {
    /// Centered row(s) with fixed spacing.
    #[default]
    Row,

    /// Random positions at least `min_separation` apart, giving up after
    /// `max_attempts` candidates in total.
    Scatter {
        min_separation: f32,
        max_attempts: usize,
    },
}

impl LayoutStrategy {
    /// Scatter whose separation is the footprint diagonal, which keeps any
    /// two footprints from overlapping.
    pub fn scatter_for(token_size: Size) -> Self {
        Self::Scatter {
            min_separation: token_size.diagonal(),
            max_attempts: DEFAULT_SCATTER_ATTEMPTS,
        }
    }
}

//=== LayoutPlanner =======================================================

/// Computes pile anchors and token resting offsets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutPlanner {
    viewport: Size,
    token: Size,
}

impl LayoutPlanner {
    pub fn new(viewport: Size, token: Size) -> Self {
        Self { viewport, token }
    }

    //--- Stacking ---------------------------------------------------------

    /// Vertical distance between consecutive tokens of one pile.
    pub fn stack_step(&self) -> f32 {
        self.token.height * STACK_STEP_RATIO
    }

    /// Resting position of the token at `depth` (0 = bottom) in a pile
    /// anchored at `anchor`.
    pub fn resting_position(&self, anchor: Vec2, depth: usize) -> Vec2 {
        anchor.offset_y(depth as f32 * self.stack_step())
    }

    //--- Placement --------------------------------------------------------

    /// Computes `pile_count` anchors using `strategy`.
    ///
    /// # Errors
    ///
    /// - [`LayoutError::ViewportTooSmall`] if one padded footprint does not
    ///   fit, or the row layout runs out of vertical room.
    /// - [`LayoutError::RetryBudgetExhausted`] if scatter sampling gives up.
    pub fn plan<R: Rng + ?Sized>(
        &self,
        pile_count: usize,
        strategy: LayoutStrategy,
        rng: &mut R,
    ) -> Result<Vec<Vec2>, LayoutError> {
        let (max_x, max_y) = self.placement_bounds()?;

        match strategy {
            LayoutStrategy::Row => self.plan_rows(pile_count, max_y),
            LayoutStrategy::Scatter {
                min_separation,
                max_attempts,
            } => self.plan_scatter(pile_count, min_separation, max_attempts, max_x, max_y, rng),
        }
    }

    /// Largest anchor coordinates that keep a footprint inside the padding.
    fn placement_bounds(&self) -> Result<(f32, f32), LayoutError> {
        let max_x = self.viewport.width - self.token.width - VIEWPORT_PADDING;
        let max_y = self.viewport.height - self.token.height - VIEWPORT_PADDING;

        if max_x < VIEWPORT_PADDING || max_y < VIEWPORT_PADDING {
            return Err(LayoutError::ViewportTooSmall {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }

        Ok((max_x, max_y))
    }

    fn plan_rows(&self, pile_count: usize, max_y: f32) -> Result<Vec<Vec2>, LayoutError> {
        if pile_count == 0 {
            return Ok(Vec::new());
        }

        let pitch_x = self.token.width + ROW_GAP;
        let usable_width = self.viewport.width - 2.0 * VIEWPORT_PADDING;

        // At least one column always fits: placement_bounds() checked that.
        let columns = (((usable_width + ROW_GAP) / pitch_x).floor() as usize).clamp(1, pile_count);
        let rows = pile_count.div_ceil(columns);

        let pitch_y = if rows > 1 {
            (max_y - VIEWPORT_PADDING) / (rows - 1) as f32
        } else {
            0.0
        };

        if rows > 1 && pitch_y < self.token.height {
            return Err(LayoutError::ViewportTooSmall {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }

        let mut anchors = Vec::with_capacity(pile_count);
        for row in 0..rows {
            let in_row = columns.min(pile_count - row * columns);
            let row_width = in_row as f32 * pitch_x - ROW_GAP;
            let start_x = (self.viewport.width - row_width) / 2.0;
            let y = VIEWPORT_PADDING + row as f32 * pitch_y;

            for column in 0..in_row {
                anchors.push(Vec2::new(start_x + column as f32 * pitch_x, y));
            }
        }

        debug!(
            target: "cards::layout",
            "Row layout: {} piles in {} row(s) of up to {}",
            pile_count,
            rows,
            columns
        );

        Ok(anchors)
    }

    fn plan_scatter<R: Rng + ?Sized>(
        &self,
        pile_count: usize,
        min_separation: f32,
        max_attempts: usize,
        max_x: f32,
        max_y: f32,
        rng: &mut R,
    ) -> Result<Vec<Vec2>, LayoutError> {
        let mut anchors: Vec<Vec2> = Vec::with_capacity(pile_count);
        let mut attempts = 0;

        while anchors.len() < pile_count {
            if attempts >= max_attempts {
                return Err(LayoutError::RetryBudgetExhausted {
                    placed: anchors.len(),
                    requested: pile_count,
                    attempts,
                });
            }
            attempts += 1;

            let candidate = Vec2::new(
                rng.random_range(VIEWPORT_PADDING..=max_x),
                rng.random_range(VIEWPORT_PADDING..=max_y),
            );

            if anchors
                .iter()
                .all(|accepted| accepted.distance(candidate) >= min_separation)
            {
                anchors.push(candidate);
            }
        }

        debug!(
            target: "cards::layout",
            "Scatter layout: {} piles placed in {} attempts",
            pile_count,
            attempts
        );

        Ok(anchors)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn planner() -> LayoutPlanner {
        LayoutPlanner::new(Size::new(1280.0, 720.0), Size::new(100.0, 108.0))
    }

    fn footprints_overlap(a: Vec2, b: Vec2, token: Size) -> bool {
        (a.x - b.x).abs() < token.width && (a.y - b.y).abs() < token.height
    }

    fn assert_no_overlap(anchors: &[Vec2], token: Size) {
        for (i, a) in anchors.iter().enumerate() {
            for b in &anchors[i + 1..] {
                assert!(
                    !footprints_overlap(*a, *b, token),
                    "Footprints at {:?} and {:?} overlap",
                    a,
                    b
                );
            }
        }
    }

    //=====================================================================
    // Stacking
    //=====================================================================

    #[test]
    fn resting_position_fans_downward() {
        let planner = planner();
        let anchor = Vec2::new(50.0, 40.0);

        assert_eq!(planner.resting_position(anchor, 0), anchor);
        let third = planner.resting_position(anchor, 3);
        assert_relative_eq!(third.x, 50.0);
        assert_relative_eq!(third.y, 40.0 + 3.0 * 108.0 * STACK_STEP_RATIO);
    }

    //=====================================================================
    // Row Layout
    //=====================================================================

    #[test]
    fn row_layout_is_deterministic() {
        let planner = planner();
        let a = planner
            .plan(12, LayoutStrategy::Row, &mut StdRng::seed_from_u64(1))
            .unwrap();
        let b = planner
            .plan(12, LayoutStrategy::Row, &mut StdRng::seed_from_u64(99))
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn row_layout_single_row_is_centered() {
        let planner = planner();
        let anchors = planner
            .plan(12, LayoutStrategy::Row, &mut StdRng::seed_from_u64(0))
            .unwrap();

        assert_eq!(anchors.len(), 12);
        assert!(anchors.iter().all(|a| a.y == VIEWPORT_PADDING));

        let left_margin = anchors[0].x;
        let right_margin = 1280.0 - (anchors[11].x + 100.0);
        assert_relative_eq!(left_margin, right_margin, epsilon = 1e-3);
        assert_no_overlap(&anchors, Size::new(100.0, 108.0));
    }

    #[test]
    fn row_layout_wraps_on_narrow_viewport() {
        let token = Size::new(80.0, 60.0);
        let planner = LayoutPlanner::new(Size::new(500.0, 600.0), token);
        let anchors = planner
            .plan(12, LayoutStrategy::Row, &mut StdRng::seed_from_u64(0))
            .unwrap();

        assert_eq!(anchors.len(), 12);
        let rows: std::collections::BTreeSet<u32> =
            anchors.iter().map(|a| a.y.to_bits()).collect();
        assert!(rows.len() > 1, "Expected the row to wrap");
        assert_no_overlap(&anchors, token);

        for anchor in &anchors {
            assert!(anchor.x >= VIEWPORT_PADDING);
            assert!(anchor.x + token.width <= 500.0 - VIEWPORT_PADDING + 1e-3);
        }
    }

    #[test]
    fn row_layout_without_vertical_room_fails() {
        let planner = LayoutPlanner::new(Size::new(200.0, 200.0), Size::new(100.0, 100.0));
        let result = planner.plan(4, LayoutStrategy::Row, &mut StdRng::seed_from_u64(0));
        assert!(matches!(result, Err(LayoutError::ViewportTooSmall { .. })));
    }

    #[test]
    fn zero_piles_yields_no_anchors() {
        let anchors = planner()
            .plan(0, LayoutStrategy::Row, &mut StdRng::seed_from_u64(0))
            .unwrap();
        assert!(anchors.is_empty());
    }

    //=====================================================================
    // Scatter Layout
    //=====================================================================

    #[test]
    fn scatter_respects_separation_and_bounds() {
        let token = Size::new(100.0, 108.0);
        let planner = LayoutPlanner::new(Size::new(1280.0, 720.0), token);
        let strategy = LayoutStrategy::scatter_for(token);
        let anchors = planner
            .plan(8, strategy, &mut StdRng::seed_from_u64(42))
            .unwrap();

        assert_eq!(anchors.len(), 8);
        assert_no_overlap(&anchors, token);
        for anchor in &anchors {
            assert!(anchor.x >= VIEWPORT_PADDING && anchor.x <= 1280.0 - 100.0 - VIEWPORT_PADDING);
            assert!(anchor.y >= VIEWPORT_PADDING && anchor.y <= 720.0 - 108.0 - VIEWPORT_PADDING);
        }
    }

    #[test]
    fn scatter_is_reproducible_with_same_seed() {
        let planner = planner();
        let strategy = LayoutStrategy::scatter_for(Size::new(100.0, 108.0));
        let a = planner.plan(6, strategy, &mut StdRng::seed_from_u64(7)).unwrap();
        let b = planner.plan(6, strategy, &mut StdRng::seed_from_u64(7)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn scatter_gives_up_when_budget_is_exhausted() {
        let planner = planner();
        let strategy = LayoutStrategy::Scatter {
            min_separation: 10_000.0,
            max_attempts: 50,
        };
        let result = planner.plan(3, strategy, &mut StdRng::seed_from_u64(3));

        assert_eq!(
            result,
            Err(LayoutError::RetryBudgetExhausted {
                placed: 1,
                requested: 3,
                attempts: 50,
            })
        );
    }

    #[test]
    fn footprint_larger_than_viewport_fails() {
        let planner = LayoutPlanner::new(Size::new(100.0, 100.0), Size::new(90.0, 90.0));
        let result = planner.plan(2, LayoutStrategy::Row, &mut StdRng::seed_from_u64(0));
        assert_eq!(
            result,
            Err(LayoutError::ViewportTooSmall {
                width: 100.0,
                height: 100.0
            })
        );
    }
}
