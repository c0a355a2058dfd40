//=========================================================================
// Transfer Scheduler
//=========================================================================
//
// Starts one single-token transfer per cadence, independent of how fast
// the logic loop ticks.
//
// States:
// ```text
//            cadence due                 transfer started / skipped
//   Idle ─────────────────► Dispatching ───────────────────────────► Idle
//     │
//     └── stop() ──► Stopped   (terminal; no further cadences fire)
// ```
//
// Dispatch steps:
//   1. pick an eligible source          (none → skip this cadence)
//   2. pick an eligible destination     (none → skip this cadence)
//   3. lock the destination
//   4. pop the source's top token
//   5. landing spot = destination resting position at its CURRENT length
//   6. hand the flight to the animator
//
// Landing (the completion continuation) pushes the token onto the
// destination and unlocks it. A locked destination holds at most one
// incoming transfer, so its length cannot change under the flight and the
// landing spot computed in step 5 stays correct.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

use log::{debug, trace, warn};

//=== Internal Dependencies ===============================================

use super::animator::{Landing, Transfer, TransferAnimator, TransferHandle};
use super::pile_store::PileStore;

//=== SchedulerState ======================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    /// Waiting for the next cadence.
    Idle,

    /// Selecting and starting this cadence's transfer.
    Dispatching,

    /// Torn down; `tick` does nothing.
    Stopped,
}

//=== DispatchOutcome =====================================================

/// Result of one cadence firing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// A transfer started.
    Started {
        handle: TransferHandle,
        source: usize,
        destination: usize,
    },

    /// Every pile is locked or empty.
    NoSource,

    /// No unlocked pile other than the chosen source.
    NoDestination { source: usize },
}

//=== TransferScheduler ===================================================

/// Cadence-driven dispatcher of pile-to-pile transfers.
#[derive(Debug)]
pub struct TransferScheduler {
    cadence: Duration,
    transfer_duration: Duration,
    next_due: Duration,
    state: SchedulerState,
    dispatched: u64,
    skipped: u64,
}

impl TransferScheduler {
    //--- Construction -----------------------------------------------------

    /// Scheduler whose first cadence fires one `cadence` after `start`.
    pub fn new(cadence: Duration, transfer_duration: Duration, start: Duration) -> Self {
        Self {
            cadence,
            transfer_duration,
            next_due: start + cadence,
            state: SchedulerState::Idle,
            dispatched: 0,
            skipped: 0,
        }
    }

    //--- Accessors --------------------------------------------------------

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn cadence(&self) -> Duration {
        self.cadence
    }

    pub fn next_due(&self) -> Duration {
        self.next_due
    }

    /// Transfers started so far.
    pub fn dispatched(&self) -> u64 {
        self.dispatched
    }

    /// Cadences that found no eligible pair.
    pub fn skipped(&self) -> u64 {
        self.skipped
    }

    //--- Tick -------------------------------------------------------------

    /// Fires at most one cadence if it is due at `now`.
    ///
    /// Returns `None` when nothing was due (or the scheduler is stopped).
    /// If the loop stalled for several cadences, the missed ones are
    /// dropped rather than fired in a burst.
    pub fn tick<V>(
        &mut self,
        now: Duration,
        store: &mut PileStore<V>,
        animator: &mut TransferAnimator<V>,
    ) -> Option<DispatchOutcome> {
        if self.state == SchedulerState::Stopped || now < self.next_due {
            return None;
        }

        self.next_due += self.cadence;
        if self.next_due <= now {
            debug!(
                target: "cards::scheduler",
                "Loop fell {:?} behind, dropping missed cadences",
                now - self.next_due
            );
            self.next_due = now + self.cadence;
        }

        Some(self.dispatch(now, store, animator))
    }

    /// Runs one Idle → Dispatching → Idle pass unconditionally.
    pub fn dispatch<V>(
        &mut self,
        now: Duration,
        store: &mut PileStore<V>,
        animator: &mut TransferAnimator<V>,
    ) -> DispatchOutcome {
        self.state = SchedulerState::Dispatching;
        let outcome = self.select_and_start(now, store, animator);
        self.state = SchedulerState::Idle;

        match outcome {
            DispatchOutcome::Started { handle, source, destination } => {
                self.dispatched += 1;
                debug!(
                    target: "cards::scheduler",
                    "Dispatched {:?}: pile {} → pile {}",
                    handle,
                    source,
                    destination
                );
            }
            DispatchOutcome::NoSource | DispatchOutcome::NoDestination { .. } => {
                self.skipped += 1;
                trace!(target: "cards::scheduler", "Cadence skipped: {:?}", outcome);
            }
        }

        outcome
    }

    fn select_and_start<V>(
        &self,
        now: Duration,
        store: &mut PileStore<V>,
        animator: &mut TransferAnimator<V>,
    ) -> DispatchOutcome {
        let Some(source) = store.pick_eligible_source() else {
            return DispatchOutcome::NoSource;
        };

        let Some(destination) = store.pick_eligible_destination(source) else {
            return DispatchOutcome::NoDestination { source };
        };

        store.set_locked(destination, true);

        let Some(token) = store.pop_top(source) else {
            // Eligible sources are non-empty; reaching this means the store
            // changed between pick and pop.
            warn!(target: "cards::scheduler", "Eligible pile {} had no top token", source);
            store.set_locked(destination, false);
            return DispatchOutcome::NoSource;
        };

        let Some(to) = store.resting_position(destination) else {
            warn!(target: "cards::scheduler", "Destination pile {} vanished", destination);
            store.set_locked(destination, false);
            return DispatchOutcome::NoDestination { source };
        };

        let transfer = Transfer::new(source, destination, token, to, self.transfer_duration);
        let handle = animator.start(transfer, now);

        DispatchOutcome::Started {
            handle,
            source,
            destination,
        }
    }

    //--- Completion -------------------------------------------------------

    /// Commits a finished flight: push onto the destination, then unlock it.
    pub fn complete<V>(&self, store: &mut PileStore<V>, landing: Landing<V>) {
        trace!(
            target: "cards::scheduler",
            "Landed {:?} on pile {}",
            landing.handle,
            landing.destination
        );
        store.push_top(landing.destination, landing.token);
        store.set_locked(landing.destination, false);
    }

    //--- Teardown ---------------------------------------------------------

    /// Stops the cadence timer permanently.
    pub fn stop(&mut self) {
        if self.state != SchedulerState::Stopped {
            debug!(
                target: "cards::scheduler",
                "Stopped after {} transfer(s), {} skipped cadence(s)",
                self.dispatched,
                self.skipped
            );
            self.state = SchedulerState::Stopped;
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::layout::LayoutPlanner;
    use crate::core::geometry::{Size, Vec2};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const CADENCE: Duration = Duration::from_millis(1_000);
    const FLIGHT: Duration = Duration::from_millis(2_000);

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    fn fixture(piles: usize, tokens: usize) -> (TransferScheduler, PileStore<()>, TransferAnimator<()>) {
        let anchors: Vec<Vec2> = (0..piles)
            .map(|i| Vec2::new(20.0 + i as f32 * 60.0, 20.0))
            .collect();
        let planner = LayoutPlanner::new(Size::new(1280.0, 720.0), Size::new(50.0, 70.0));
        let store = PileStore::initialize(&anchors, tokens, planner, StdRng::seed_from_u64(11), |_| ())
            .unwrap();
        (
            TransferScheduler::new(CADENCE, FLIGHT, Duration::ZERO),
            store,
            TransferAnimator::new(),
        )
    }

    //=====================================================================
    // Cadence
    //=====================================================================

    #[test]
    fn nothing_fires_before_first_cadence() {
        let (mut scheduler, mut store, mut animator) = fixture(4, 4);
        assert!(scheduler.tick(ms(999), &mut store, &mut animator).is_none());
        assert_eq!(scheduler.state(), SchedulerState::Idle);
        assert_eq!(animator.in_flight(), 0);
    }

    #[test]
    fn fires_once_per_cadence_regardless_of_tick_rate() {
        let (mut scheduler, mut store, mut animator) = fixture(6, 6);

        // 60 ticks per second for three seconds.
        let mut fired = 0;
        for tick in 1..=180u64 {
            let now = Duration::from_micros(tick * 16_667);
            if scheduler.tick(now, &mut store, &mut animator).is_some() {
                fired += 1;
            }
        }

        assert_eq!(fired, 3);
        assert_eq!(scheduler.dispatched(), 3);
    }

    #[test]
    fn stalled_loop_does_not_burst() {
        let (mut scheduler, mut store, mut animator) = fixture(4, 4);

        assert!(scheduler.tick(ms(5_500), &mut store, &mut animator).is_some());
        assert_eq!(scheduler.next_due(), ms(6_500));
        assert!(scheduler.tick(ms(5_600), &mut store, &mut animator).is_none());
    }

    //=====================================================================
    // Dispatch
    //=====================================================================

    #[test]
    fn dispatch_pops_source_and_locks_destination() {
        let (mut scheduler, mut store, mut animator) = fixture(3, 4);

        let outcome = scheduler.dispatch(ms(0), &mut store, &mut animator);
        let DispatchOutcome::Started { source, destination, handle } = outcome else {
            panic!("Expected a started transfer, got {:?}", outcome);
        };

        assert_ne!(source, destination);
        assert_eq!(store.len(source), 3);
        assert_eq!(store.len(destination), 4);
        assert!(store.is_locked(destination));
        assert!(!store.is_locked(source));

        let transfer = animator.get(handle).unwrap();
        assert_eq!(transfer.to, store.resting_position(destination).unwrap());
        assert_eq!(scheduler.state(), SchedulerState::Idle);
    }

    #[test]
    fn landing_pushes_and_unlocks() {
        let (mut scheduler, mut store, mut animator) = fixture(2, 3);

        let DispatchOutcome::Started { destination, .. } =
            scheduler.dispatch(ms(0), &mut store, &mut animator)
        else {
            panic!("Expected a started transfer");
        };

        for landing in animator.advance(FLIGHT) {
            scheduler.complete(&mut store, landing);
        }

        assert_eq!(store.len(destination), 4);
        assert!(!store.is_locked(destination));
        assert_eq!(store.resting_tokens(), 6);
    }

    #[test]
    fn all_empty_skips_cadence() {
        let (mut scheduler, mut store, mut animator) = fixture(3, 0);
        let outcome = scheduler.dispatch(ms(0), &mut store, &mut animator);
        assert_eq!(outcome, DispatchOutcome::NoSource);
        assert_eq!(scheduler.skipped(), 1);
        assert_eq!(animator.in_flight(), 0);
    }

    #[test]
    fn only_one_unlocked_pile_skips_cadence() {
        let (mut scheduler, mut store, mut animator) = fixture(4, 2);
        for i in 0..3 {
            store.set_locked(i, true);
        }

        let outcome = scheduler.dispatch(ms(0), &mut store, &mut animator);
        assert_eq!(outcome, DispatchOutcome::NoDestination { source: 3 });
        assert_eq!(store.len(3), 2, "Skipped cadence must not pop");
        assert!(!store.is_locked(3));
        assert_eq!(animator.in_flight(), 0);
    }

    #[test]
    fn two_piles_serialize_through_locks() {
        let (mut scheduler, mut store, mut animator) = fixture(2, 5);

        assert!(matches!(
            scheduler.dispatch(ms(0), &mut store, &mut animator),
            DispatchOutcome::Started { .. }
        ));

        // The destination is locked and the only other pile is the
        // source candidate: nothing else can start until it lands.
        let second = scheduler.dispatch(ms(100), &mut store, &mut animator);
        assert!(matches!(second, DispatchOutcome::NoDestination { .. }));
        assert_eq!(animator.in_flight(), 1);
    }

    //=====================================================================
    // Teardown
    //=====================================================================

    #[test]
    fn stopped_scheduler_never_fires() {
        let (mut scheduler, mut store, mut animator) = fixture(4, 4);
        scheduler.stop();
        scheduler.stop();

        assert_eq!(scheduler.state(), SchedulerState::Stopped);
        assert!(scheduler.tick(ms(10_000), &mut store, &mut animator).is_none());
        assert_eq!(store.resting_tokens(), 16);
    }
}
