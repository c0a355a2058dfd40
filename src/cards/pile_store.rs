//=========================================================================
// Pile Store
//=========================================================================
//
// Authoritative owner of every pile and every resting token.
//
// Architecture:
// ```text
//   PileStore
//     ├─ piles: Vec<Pile<V>>      tokens bottom → top, anchor, locked
//     ├─ planner: LayoutPlanner   resting offsets
//     └─ rng: StdRng              uniform eligibility picks
// ```
//
// Locking contract:
//   A transfer locks its DESTINATION from dispatch until landing. Locked
//   piles are excluded from both source and destination picks. The source
//   is never locked; its pop is immediate, so its remaining tokens are
//   available again at once.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{trace, warn};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;

//=== Internal Dependencies ===============================================

use super::error::ConfigError;
use super::layout::LayoutPlanner;
use super::token::{Token, TokenId};
use crate::core::geometry::Vec2;

//=== Pile ================================================================

/// Ordered tokens (top = last) resting on a fixed anchor.
#[derive(Debug)]
pub struct Pile<V> {
    tokens: Vec<Token<V>>,
    anchor: Vec2,
    locked: bool,
}

impl<V> Pile<V> {
    fn new(anchor: Vec2, capacity: usize) -> Self {
        Self {
            tokens: Vec::with_capacity(capacity),
            anchor,
            locked: false,
        }
    }

    pub fn anchor(&self) -> Vec2 {
        self.anchor
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Tokens bottom to top.
    pub fn tokens(&self) -> &[Token<V>] {
        &self.tokens
    }

    pub fn top(&self) -> Option<&Token<V>> {
        self.tokens.last()
    }
}

//=== PileStore ===========================================================

/// Fixed set of piles plus the primitives that mutate them.
pub struct PileStore<V> {
    piles: Vec<Pile<V>>,
    planner: LayoutPlanner,
    rng: StdRng,
}

impl<V> PileStore<V> {
    //--- Construction -----------------------------------------------------

    /// Builds one pile per anchor and deals `tokens_per_pile` tokens onto
    /// each, fanned from the anchor by the planner's stack step.
    ///
    /// Token ids are assigned in dealing order; `make_payload` is called
    /// once per token with its id.
    ///
    /// # Errors
    ///
    /// [`ConfigError::TooFewPiles`] if fewer than two anchors are given.
    pub fn initialize<F>(
        anchors: &[Vec2],
        tokens_per_pile: usize,
        planner: LayoutPlanner,
        rng: StdRng,
        mut make_payload: F,
    ) -> Result<Self, ConfigError>
    where
        F: FnMut(TokenId) -> V,
    {
        if anchors.len() < 2 {
            return Err(ConfigError::TooFewPiles(anchors.len()));
        }

        let mut next_id = 0u32;
        let piles = anchors
            .iter()
            .map(|&anchor| {
                let mut pile = Pile::new(anchor, tokens_per_pile);
                for depth in 0..tokens_per_pile {
                    let id = TokenId(next_id);
                    next_id += 1;
                    let position = planner.resting_position(anchor, depth);
                    pile.tokens.push(Token::new(id, make_payload(id), position));
                }
                pile
            })
            .collect();

        Ok(Self { piles, planner, rng })
    }

    //--- Queries ----------------------------------------------------------

    pub fn pile_count(&self) -> usize {
        self.piles.len()
    }

    pub fn pile(&self, index: usize) -> Option<&Pile<V>> {
        self.piles.get(index)
    }

    pub fn piles(&self) -> impl Iterator<Item = &Pile<V>> {
        self.piles.iter()
    }

    /// Length of pile `index` (0 for an unknown index).
    pub fn len(&self, index: usize) -> usize {
        self.piles.get(index).map_or(0, Pile::len)
    }

    pub fn is_locked(&self, index: usize) -> bool {
        self.piles.get(index).is_some_and(Pile::is_locked)
    }

    /// Tokens currently resting in piles (in-flight tokens excluded).
    pub fn resting_tokens(&self) -> usize {
        self.piles.iter().map(Pile::len).sum()
    }

    /// Where the next token arriving on pile `index` will rest, from the
    /// pile's current length.
    pub fn resting_position(&self, index: usize) -> Option<Vec2> {
        self.piles
            .get(index)
            .map(|pile| self.planner.resting_position(pile.anchor, pile.len()))
    }

    //--- Eligibility ------------------------------------------------------

    /// Uniformly random unlocked, non-empty pile, or `None` if there is none.
    pub fn pick_eligible_source(&mut self) -> Option<usize> {
        let candidates: Vec<usize> = self
            .piles
            .iter()
            .enumerate()
            .filter(|(_, pile)| !pile.locked && !pile.is_empty())
            .map(|(index, _)| index)
            .collect();

        candidates.choose(&mut self.rng).copied()
    }

    /// Uniformly random unlocked pile other than `excluding`, or `None`.
    pub fn pick_eligible_destination(&mut self, excluding: usize) -> Option<usize> {
        let candidates: Vec<usize> = self
            .piles
            .iter()
            .enumerate()
            .filter(|(index, pile)| *index != excluding && !pile.locked)
            .map(|(index, _)| index)
            .collect();

        candidates.choose(&mut self.rng).copied()
    }

    //--- Mutation ---------------------------------------------------------

    /// Removes and returns the top token of pile `index`.
    ///
    /// The length drops immediately, so later picks in the same tick see it.
    pub fn pop_top(&mut self, index: usize) -> Option<Token<V>> {
        let token = self.piles.get_mut(index)?.tokens.pop();
        trace!(target: "cards::store", "Popped {:?} from pile {}", token.as_ref().map(Token::id), index);
        token
    }

    /// Appends `token` to the top of pile `index`.
    ///
    /// Only the transfer holding the pile's lock may push onto it.
    pub fn push_top(&mut self, index: usize, token: Token<V>) {
        let Some(pile) = self.piles.get_mut(index) else {
            warn!(target: "cards::store", "Push onto unknown pile {}, token {:?} dropped", index, token.id());
            return;
        };

        debug_assert!(pile.locked, "push onto pile {} without holding its lock", index);
        trace!(target: "cards::store", "Pushed {:?} onto pile {}", token.id(), index);
        pile.tokens.push(token);
    }

    pub fn set_locked(&mut self, index: usize, locked: bool) {
        if let Some(pile) = self.piles.get_mut(index) {
            pile.locked = locked;
        }
    }

    /// Empties every pile, returning the tokens that were resting.
    pub fn drain(&mut self) -> Vec<Token<V>> {
        self.piles
            .drain(..)
            .flat_map(|pile| pile.tokens)
            .collect()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::Size;
    use approx::assert_relative_eq;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn store(piles: usize, tokens: usize) -> PileStore<u32> {
        let anchors: Vec<Vec2> = (0..piles)
            .map(|i| Vec2::new(20.0 + i as f32 * 110.0, 20.0))
            .collect();
        let planner = LayoutPlanner::new(Size::new(1280.0, 720.0), Size::new(100.0, 100.0));
        PileStore::initialize(&anchors, tokens, planner, StdRng::seed_from_u64(5), |id| id.0)
            .unwrap()
    }

    //=====================================================================
    // Initialization
    //=====================================================================

    #[test]
    fn initialize_deals_every_pile() {
        let store = store(12, 12);
        assert_eq!(store.pile_count(), 12);
        assert_eq!(store.resting_tokens(), 144);
        assert!(store.piles().all(|p| p.len() == 12 && !p.is_locked()));
    }

    #[test]
    fn initialize_assigns_unique_ids() {
        let store = store(4, 5);
        let ids: HashSet<TokenId> = store
            .piles()
            .flat_map(|p| p.tokens().iter().map(Token::id))
            .collect();
        assert_eq!(ids.len(), 20);
    }

    #[test]
    fn initialize_fans_tokens_from_anchor() {
        let store = store(2, 3);
        let pile = store.pile(1).unwrap();
        for (depth, token) in pile.tokens().iter().enumerate() {
            assert_relative_eq!(token.position.x, pile.anchor().x);
            assert_relative_eq!(token.position.y, 20.0 + depth as f32 * 60.0);
        }
    }

    #[test]
    fn initialize_rejects_single_pile() {
        let planner = LayoutPlanner::new(Size::new(800.0, 600.0), Size::new(10.0, 10.0));
        let result = PileStore::initialize(
            &[Vec2::ZERO],
            3,
            planner,
            StdRng::seed_from_u64(0),
            |_| (),
        );
        assert_eq!(result.err(), Some(ConfigError::TooFewPiles(1)));
    }

    //=====================================================================
    // Eligibility
    //=====================================================================

    #[test]
    fn source_skips_locked_and_empty_piles() {
        let mut store = store(3, 1);
        store.set_locked(0, true);
        let _ = store.pop_top(1);

        for _ in 0..50 {
            assert_eq!(store.pick_eligible_source(), Some(2));
        }
    }

    #[test]
    fn source_is_none_when_everything_is_empty() {
        let mut store = store(3, 0);
        assert_eq!(store.pick_eligible_source(), None);
    }

    #[test]
    fn destination_excludes_source_and_locked_piles() {
        let mut store = store(4, 2);
        store.set_locked(1, true);

        for _ in 0..100 {
            let dest = store.pick_eligible_destination(0).unwrap();
            assert!(dest == 2 || dest == 3, "Got {}", dest);
        }
    }

    #[test]
    fn destination_accepts_empty_piles() {
        let mut store = store(2, 1);
        let _ = store.pop_top(1);
        assert_eq!(store.pick_eligible_destination(0), Some(1));
    }

    #[test]
    fn all_but_one_locked() {
        let mut store = store(5, 3);
        for i in 0..4 {
            store.set_locked(i, true);
        }

        assert_eq!(store.pick_eligible_source(), Some(4));
        assert_eq!(store.pick_eligible_destination(4), None);
    }

    #[test]
    fn picks_cover_every_candidate() {
        let mut store = store(6, 1);
        let seen: HashSet<usize> = (0..500).filter_map(|_| store.pick_eligible_source()).collect();
        assert_eq!(seen.len(), 6);
    }

    //=====================================================================
    // Mutation
    //=====================================================================

    #[test]
    fn pop_is_immediate_and_lifo() {
        let mut store = store(2, 3);
        let top_id = store.pile(0).unwrap().top().unwrap().id();

        let token = store.pop_top(0).unwrap();
        assert_eq!(token.id(), top_id);
        assert_eq!(store.len(0), 2);
    }

    #[test]
    fn resting_position_tracks_length() {
        let mut store = store(2, 2);
        let before = store.resting_position(1).unwrap();
        assert_relative_eq!(before.y, 20.0 + 2.0 * 60.0);

        let _ = store.pop_top(1);
        let after = store.resting_position(1).unwrap();
        assert_relative_eq!(after.y, 20.0 + 60.0);
    }

    #[test]
    fn push_lands_on_top() {
        let mut store = store(2, 2);
        let token = store.pop_top(0).unwrap();
        let id = token.id();

        store.set_locked(1, true);
        store.push_top(1, token);
        store.set_locked(1, false);

        assert_eq!(store.len(1), 3);
        assert_eq!(store.pile(1).unwrap().top().unwrap().id(), id);
    }

    #[test]
    fn unknown_index_is_harmless() {
        let mut store = store(2, 1);
        assert!(store.pop_top(9).is_none());
        assert!(store.resting_position(9).is_none());
        assert_eq!(store.len(9), 0);
        assert!(!store.is_locked(9));
        store.set_locked(9, true);
    }

    #[test]
    fn drain_empties_the_store() {
        let mut store = store(3, 4);
        let tokens = store.drain();
        assert_eq!(tokens.len(), 12);
        assert_eq!(store.pile_count(), 0);
        assert_eq!(store.resting_tokens(), 0);
    }
}
