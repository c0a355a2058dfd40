//=========================================================================
// Scene Controller
//=========================================================================
//
// Lifecycle wrapper of one shuffling-stacks scene.
//
// Architecture:
// ```text
//   SceneController::create(config)
//     ├─ validate config                 → ConfigError
//     ├─ LayoutPlanner::plan()           → LayoutError
//     └─ PileStore::initialize()
//
//   tick(now)
//     ├─ TransferAnimator::advance()  → landings → TransferScheduler::complete()
//     └─ TransferScheduler::tick()    → at most one new transfer
//
//   destroy()
//     ├─ TransferScheduler::stop()       no further cadences
//     ├─ TransferAnimator::cancel_all()  landings never run
//     └─ drop PileStore                  all piles and tokens released
// ```
//
// Landings are committed before the cadence check so a pile unlocked on
// this tick is already eligible for this tick's dispatch.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;

//=== Internal Dependencies ===============================================

use super::animator::TransferAnimator;
use super::config::ShuffleConfig;
use super::error::Result;
use super::layout::LayoutPlanner;
use super::pile_store::PileStore;
use super::scheduler::{DispatchOutcome, TransferScheduler};
use super::token::TokenId;

//=== TickReport ==========================================================

/// What happened during one [`SceneController::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickReport {
    /// Outcome of the cadence, if one was due.
    pub dispatch: Option<DispatchOutcome>,

    /// Transfers that landed on this tick.
    pub landed: usize,
}

//=== LiveScene ===========================================================

struct LiveScene<V> {
    store: PileStore<V>,
    scheduler: TransferScheduler,
    animator: TransferAnimator<V>,
}

//=== SceneController =====================================================

/// Owns the pile store, scheduler and animator of one scene.
///
/// The controller is the scene handle: [`create`](Self::create) enters the
/// scene, [`destroy`](Self::destroy) tears it down. Everything runs on the
/// caller's thread, one [`tick`](Self::tick) at a time.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use aetheric_showcase::cards::{SceneController, ShuffleConfig};
///
/// let config = ShuffleConfig::default().with_seed(1);
/// let mut scene = SceneController::create(&config, Duration::ZERO, |id| id.0).unwrap();
///
/// for second in 1..=10 {
///     scene.tick(Duration::from_secs(second));
/// }
/// assert_eq!(scene.total_tokens(), 144);
///
/// scene.destroy();
/// assert!(!scene.is_active());
/// ```
pub struct SceneController<V> {
    config: ShuffleConfig,
    live: Option<LiveScene<V>>,
}

impl<V> SceneController<V> {
    //--- Lifecycle --------------------------------------------------------

    /// Lays out the piles, deals the tokens and arms the scheduler; the
    /// first cadence fires one interval after `now`.
    ///
    /// # Errors
    ///
    /// [`ShuffleError::Config`](super::ShuffleError::Config) or
    /// [`ShuffleError::Layout`](super::ShuffleError::Layout); nothing is
    /// built in either case.
    pub fn create<F>(config: &ShuffleConfig, now: Duration, make_payload: F) -> Result<Self>
    where
        F: FnMut(TokenId) -> V,
    {
        config.validate()?;

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let planner = LayoutPlanner::new(config.viewport, config.token_size);
        let anchors = planner.plan(config.pile_count, config.layout, &mut rng)?;
        let store = PileStore::initialize(&anchors, config.tokens_per_pile, planner, rng, make_payload)?;

        info!(
            target: "cards",
            "Shuffle scene created: {} piles × {} tokens, cadence {:?}, flight {:?}",
            config.pile_count,
            config.tokens_per_pile,
            config.transfer_cadence,
            config.transfer_duration
        );

        Ok(Self {
            config: config.clone(),
            live: Some(LiveScene {
                store,
                scheduler: TransferScheduler::new(
                    config.transfer_cadence,
                    config.transfer_duration,
                    now,
                ),
                animator: TransferAnimator::new(),
            }),
        })
    }

    /// Advances the scene to `now`. No-op after [`destroy`](Self::destroy).
    pub fn tick(&mut self, now: Duration) -> TickReport {
        let Some(live) = self.live.as_mut() else {
            return TickReport::default();
        };

        let landings = live.animator.advance(now);
        let landed = landings.len();
        for landing in landings {
            live.scheduler.complete(&mut live.store, landing);
        }

        let dispatch = live.scheduler.tick(now, &mut live.store, &mut live.animator);

        TickReport { dispatch, landed }
    }

    /// Stops the scheduler, cancels every in-flight transfer without
    /// landing it, and releases all piles and tokens. Idempotent.
    pub fn destroy(&mut self) {
        let Some(mut live) = self.live.take() else {
            return;
        };

        live.scheduler.stop();
        let cancelled = live.animator.cancel_all();
        let resting = live.store.drain();

        debug!(
            target: "cards",
            "Shuffle scene destroyed: {} resting token(s) released, {} transfer(s) abandoned",
            resting.len(),
            cancelled.len()
        );
    }

    //--- Queries ----------------------------------------------------------

    pub fn is_active(&self) -> bool {
        self.live.is_some()
    }

    pub fn config(&self) -> &ShuffleConfig {
        &self.config
    }

    /// Pile state; `None` once destroyed.
    pub fn store(&self) -> Option<&PileStore<V>> {
        self.live.as_ref().map(|live| &live.store)
    }

    /// In-flight transfers; `None` once destroyed.
    pub fn animator(&self) -> Option<&TransferAnimator<V>> {
        self.live.as_ref().map(|live| &live.animator)
    }

    pub fn scheduler(&self) -> Option<&TransferScheduler> {
        self.live.as_ref().map(|live| &live.scheduler)
    }

    pub fn in_flight(&self) -> usize {
        self.live.as_ref().map_or(0, |live| live.animator.in_flight())
    }

    /// Resting plus in-flight tokens; constant while the scene is live.
    pub fn total_tokens(&self) -> usize {
        self.live.as_ref().map_or(0, |live| {
            live.store.resting_tokens() + live.animator.in_flight()
        })
    }
}

impl<V> Drop for SceneController<V> {
    fn drop(&mut self) {
        self.destroy();
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
