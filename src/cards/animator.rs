//=========================================================================
// Transfer Animator
//=========================================================================
//
// Moves in-flight tokens from their source coordinate to their landing
// coordinate over a fixed duration, one eased step per tick.
//
// Contract:
// ```text
//   start(transfer, now)  → TransferHandle
//   advance(now)          → Vec<Landing>   (each handle lands exactly once,
//                                           on the first tick where
//                                           elapsed ≥ duration)
//   cancel(handle)        → Option<Transfer> (no landing; token returned
//                                             where it stopped)
// ```
//
// The animator owns a token for the whole flight. Landings are handed
// back to the caller, which commits them to the pile store; there are no
// stored callbacks, so a cancelled transfer can never complete.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

use log::trace;

//=== Internal Dependencies ===============================================

use super::token::Token;
use crate::core::geometry::Vec2;

//=== Easing ==============================================================

/// Quadratic ease-in-out on `t ∈ [0, 1]` (input is clamped).
pub fn ease_in_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

//=== Transfer ============================================================

/// One token in flight between two piles.
#[derive(Debug)]
pub struct Transfer<V> {
    pub source: usize,
    pub destination: usize,
    pub token: Token<V>,
    pub from: Vec2,
    pub to: Vec2,
    pub duration: Duration,
    started_at: Duration,
}

impl<V> Transfer<V> {
    pub fn new(
        source: usize,
        destination: usize,
        token: Token<V>,
        to: Vec2,
        duration: Duration,
    ) -> Self {
        let from = token.position;
        Self {
            source,
            destination,
            token,
            from,
            to,
            duration,
            started_at: Duration::ZERO,
        }
    }

    /// Elapsed fraction of the flight at `now`, clamped to `[0, 1]`.
    pub fn progress(&self, now: Duration) -> f32 {
        let elapsed = now.saturating_sub(self.started_at);
        if self.duration.is_zero() {
            return 1.0;
        }
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }

    fn is_finished(&self, now: Duration) -> bool {
        now.saturating_sub(self.started_at) >= self.duration
    }
}

//=== TransferHandle ======================================================

/// Identifies one started transfer; never reused within an animator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TransferHandle(u64);

//=== Landing =============================================================

/// A finished flight, ready to be pushed onto its destination.
#[derive(Debug)]
pub struct Landing<V> {
    pub handle: TransferHandle,
    pub source: usize,
    pub destination: usize,
    pub token: Token<V>,
}

//=== TransferAnimator ====================================================

/// Drives every in-flight transfer of one scene.
pub struct TransferAnimator<V> {
    active: Vec<(TransferHandle, Transfer<V>)>,
    next_handle: u64,
}

impl<V> TransferAnimator<V> {
    pub fn new() -> Self {
        Self {
            active: Vec::new(),
            next_handle: 0,
        }
    }

    //--- Control ----------------------------------------------------------

    /// Begins animating `transfer` from `now`.
    pub fn start(&mut self, mut transfer: Transfer<V>, now: Duration) -> TransferHandle {
        let handle = TransferHandle(self.next_handle);
        self.next_handle += 1;

        transfer.started_at = now;
        transfer.token.position = transfer.from;
        trace!(
            target: "cards::animator",
            "Start {:?}: pile {} → {} over {:?}",
            handle,
            transfer.source,
            transfer.destination,
            transfer.duration
        );

        self.active.push((handle, transfer));
        handle
    }

    /// Stops a transfer without landing it.
    ///
    /// The token stays where the last tick left it and is handed back for
    /// cleanup. Returns `None` for unknown or already-landed handles.
    pub fn cancel(&mut self, handle: TransferHandle) -> Option<Transfer<V>> {
        let index = self.active.iter().position(|(h, _)| *h == handle)?;
        trace!(target: "cards::animator", "Cancel {:?}", handle);
        Some(self.active.swap_remove(index).1)
    }

    /// Cancels every in-flight transfer.
    pub fn cancel_all(&mut self) -> Vec<Transfer<V>> {
        self.active.drain(..).map(|(_, transfer)| transfer).collect()
    }

    //--- Update -----------------------------------------------------------

    /// Moves every token to its eased position at `now` and returns the
    /// transfers that finished on this tick, in start order.
    pub fn advance(&mut self, now: Duration) -> Vec<Landing<V>> {
        let mut landings = Vec::new();
        let mut index = 0;

        while index < self.active.len() {
            let (_, transfer) = &mut self.active[index];

            if transfer.is_finished(now) {
                let (handle, transfer) = self.active.remove(index);
                let mut token = transfer.token;
                token.position = transfer.to;
                landings.push(Landing {
                    handle,
                    source: transfer.source,
                    destination: transfer.destination,
                    token,
                });
                continue;
            }

            let eased = ease_in_out(transfer.progress(now));
            transfer.token.position = transfer.from.lerp(transfer.to, eased);
            index += 1;
        }

        landings
    }

    //--- Queries ----------------------------------------------------------

    pub fn in_flight(&self) -> usize {
        self.active.len()
    }

    pub fn is_idle(&self) -> bool {
        self.active.is_empty()
    }

    pub fn get(&self, handle: TransferHandle) -> Option<&Transfer<V>> {
        self.active
            .iter()
            .find(|(h, _)| *h == handle)
            .map(|(_, transfer)| transfer)
    }

    /// In-flight transfers in start order.
    pub fn transfers(&self) -> impl Iterator<Item = &Transfer<V>> {
        self.active.iter().map(|(_, transfer)| transfer)
    }
}

impl<V> Default for TransferAnimator<V> {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
