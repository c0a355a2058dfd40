//=========================================================================
// Shuffle Configuration
//=========================================================================
//
// Parameters for one shuffling-stacks scene, with defaults matching the
// classic demo: 12 piles of 12 cards, one move per second, two-second
// flights.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

//=== Internal Dependencies ===============================================

use super::error::ConfigError;
use super::layout::LayoutStrategy;
use crate::core::geometry::Size;

//=== ShuffleConfig =======================================================

/// Configuration for [`SceneController::create`](super::SceneController::create).
///
/// Build with [`ShuffleConfig::for_viewport`] (or `Default`) and adjust
/// with the `with_*` setters. Nothing is checked until
/// [`validate`](Self::validate), which `create` calls first.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use aetheric_showcase::cards::ShuffleConfig;
///
/// let config = ShuffleConfig::for_viewport(1280.0, 720.0)
///     .with_piles(6, 8)
///     .with_cadence(Duration::from_millis(500))
///     .with_seed(7);
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ShuffleConfig {
    /// Number of piles; at least 2.
    pub pile_count: usize,

    /// Tokens dealt onto each pile at creation.
    pub tokens_per_pile: usize,

    /// Area the piles are laid out in.
    pub viewport: Size,

    /// Footprint of a single token.
    pub token_size: Size,

    /// Interval between dispatch attempts.
    pub transfer_cadence: Duration,

    /// Flight time of one token.
    pub transfer_duration: Duration,

    /// How pile anchors are placed.
    pub layout: LayoutStrategy,

    /// Fixed RNG seed; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl ShuffleConfig {
    /// Fastest cadence the scheduler accepts.
    pub const MIN_CADENCE: Duration = Duration::from_millis(100);

    /// Largest token footprint derived by [`for_viewport`](Self::for_viewport).
    pub const MAX_TOKEN_SIZE: Size = Size::new(100.0, 150.0);

    //--- Construction -----------------------------------------------------

    /// Defaults with a token footprint scaled to the viewport
    /// (8% of the width, 15% of the height, capped at 100×150).
    pub fn for_viewport(width: f32, height: f32) -> Self {
        Self {
            pile_count: 12,
            tokens_per_pile: 12,
            viewport: Size::new(width, height),
            token_size: Size::new(
                Self::MAX_TOKEN_SIZE.width.min(width * 0.08),
                Self::MAX_TOKEN_SIZE.height.min(height * 0.15),
            ),
            transfer_cadence: Duration::from_secs(1),
            transfer_duration: Duration::from_secs(2),
            layout: LayoutStrategy::Row,
            seed: None,
        }
    }

    //--- Fluent Setters ---------------------------------------------------

    pub fn with_piles(mut self, pile_count: usize, tokens_per_pile: usize) -> Self {
        self.pile_count = pile_count;
        self.tokens_per_pile = tokens_per_pile;
        self
    }

    pub fn with_token_size(mut self, width: f32, height: f32) -> Self {
        self.token_size = Size::new(width, height);
        self
    }

    pub fn with_cadence(mut self, cadence: Duration) -> Self {
        self.transfer_cadence = cadence;
        self
    }

    pub fn with_transfer_duration(mut self, duration: Duration) -> Self {
        self.transfer_duration = duration;
        self
    }

    pub fn with_layout(mut self, layout: LayoutStrategy) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    //--- Validation -------------------------------------------------------

    /// Checks every field; returns the first violation found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pile_count < 2 {
            return Err(ConfigError::TooFewPiles(self.pile_count));
        }

        if !self.viewport.is_positive() {
            return Err(ConfigError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }

        if !self.token_size.is_positive() {
            return Err(ConfigError::InvalidTokenSize {
                width: self.token_size.width,
                height: self.token_size.height,
            });
        }

        if self.transfer_cadence < Self::MIN_CADENCE {
            return Err(ConfigError::CadenceTooShort {
                cadence: self.transfer_cadence,
                min: Self::MIN_CADENCE,
            });
        }

        if self.transfer_duration.is_zero() {
            return Err(ConfigError::ZeroTransferDuration);
        }

        Ok(())
    }

    /// Total tokens the scene holds for its whole lifetime.
    pub fn total_tokens(&self) -> usize {
        self.pile_count * self.tokens_per_pile
    }
}

impl Default for ShuffleConfig {
    fn default() -> Self {
        Self::for_viewport(1280.0, 720.0)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn defaults_match_classic_demo() {
        let config = ShuffleConfig::default();
        assert_eq!(config.pile_count, 12);
        assert_eq!(config.tokens_per_pile, 12);
        assert_eq!(config.transfer_cadence, Duration::from_secs(1));
        assert_eq!(config.transfer_duration, Duration::from_secs(2));
        assert_eq!(config.layout, LayoutStrategy::Row);
        assert_eq!(config.total_tokens(), 144);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn token_size_scales_with_small_viewport() {
        let config = ShuffleConfig::for_viewport(500.0, 400.0);
        assert_relative_eq!(config.token_size.width, 40.0);
        assert_relative_eq!(config.token_size.height, 60.0);
    }

    #[test]
    fn token_size_is_capped_on_large_viewport() {
        let config = ShuffleConfig::for_viewport(3840.0, 2160.0);
        assert_eq!(config.token_size, ShuffleConfig::MAX_TOKEN_SIZE);
    }

    #[test]
    fn single_pile_is_rejected() {
        let config = ShuffleConfig::default().with_piles(1, 12);
        assert_eq!(config.validate(), Err(ConfigError::TooFewPiles(1)));
    }

    #[test]
    fn empty_piles_are_allowed() {
        let config = ShuffleConfig::default().with_piles(4, 0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_viewport_is_rejected() {
        let config = ShuffleConfig::for_viewport(0.0, 600.0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidViewport { .. })
        ));
    }

    #[test]
    fn zero_token_size_is_rejected() {
        let config = ShuffleConfig::default().with_token_size(0.0, 10.0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidTokenSize { .. })
        ));
    }

    #[test]
    fn cadence_below_minimum_is_rejected() {
        let config = ShuffleConfig::default().with_cadence(Duration::from_millis(99));
        assert_eq!(
            config.validate(),
            Err(ConfigError::CadenceTooShort {
                cadence: Duration::from_millis(99),
                min: ShuffleConfig::MIN_CADENCE,
            })
        );

        let config = ShuffleConfig::default().with_cadence(ShuffleConfig::MIN_CADENCE);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_duration_is_rejected() {
        let config = ShuffleConfig::default().with_transfer_duration(Duration::ZERO);
        assert_eq!(config.validate(), Err(ConfigError::ZeroTransferDuration));
    }
}
