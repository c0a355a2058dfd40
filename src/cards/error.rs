//=========================================================================
// Card Core Errors
//=========================================================================
//
// Construction-time failures of the shuffle scene. Both kinds are fatal:
// nothing is built when either is returned.
//
// Runtime absence of an eligible source/destination pile is NOT an
// error; the scheduler skips the cadence instead.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

use thiserror::Error;

//=== ConfigError =========================================================

/// Invalid shuffle configuration.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A transfer needs two distinct piles.
    #[error("at least 2 piles are required, got {0}")]
    TooFewPiles(usize),

    #[error("viewport must be positive, got {width}x{height}")]
    InvalidViewport { width: f32, height: f32 },

    #[error("token footprint must be positive, got {width}x{height}")]
    InvalidTokenSize { width: f32, height: f32 },

    #[error("transfer cadence {cadence:?} is below the minimum interval {min:?}")]
    CadenceTooShort { cadence: Duration, min: Duration },

    #[error("transfer duration must be non-zero")]
    ZeroTransferDuration,
}

//=== LayoutError =========================================================

/// Pile placement could not be completed.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    /// Rejection sampling ran out of attempts before every pile found a
    /// spot far enough from the others.
    #[error("placed {placed} of {requested} piles before exhausting {attempts} attempts")]
    RetryBudgetExhausted {
        placed: usize,
        requested: usize,
        attempts: usize,
    },

    /// Not even one footprint fits inside the padded viewport.
    #[error("viewport {width}x{height} cannot hold a single token footprint")]
    ViewportTooSmall { width: f32, height: f32 },
}

//=== ShuffleError ========================================================

/// Any failure while creating a shuffle scene.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ShuffleError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("layout failed: {0}")]
    Layout(#[from] LayoutError),
}

/// Result alias for shuffle construction.
pub type Result<T> = std::result::Result<T, ShuffleError>;

//=========================================================================
// Unit Tests
//=========================================================================
