// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use rand::seq::SliceRandom;
use rand::thread_rng;

use crate::store::Store;
use crate::types::card::CardId;
use crate::types::outcome::Outcome;

/// A swipe session traverses the deck once, classifying each card as
/// known or still learning. Classifying the last card makes the
/// session terminal until it is reset.
///
/// Classification and advancement are decoupled: `classify` tallies
/// the outcome and queues an advance, and the presentation layer calls
/// `complete_transition` once its swipe transition has finished. A
/// classification arriving while an advance is still pending first
/// applies the pending advance, so actions are serialized and none are
/// lost.
pub struct SwipeSession {
    /// Traversal order over the deck, as card ids. Starts in storage
    /// order; `reset` shuffles it. Storage order is never touched.
    order: Vec<CardId>,
    position: usize,
    flipped: bool,
    known: usize,
    learning: usize,
    finished: bool,
    advance_pending: bool,
}

impl SwipeSession {
    pub fn new(store: &Store) -> Self {
        Self {
            order: store.cards().iter().map(|card| card.id()).collect(),
            position: 0,
            flipped: false,
            known: 0,
            learning: 0,
            finished: false,
            advance_pending: false,
        }
    }

    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn known(&self) -> usize {
        self.known
    }

    pub fn learning(&self) -> usize {
        self.learning
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// The id of the card currently shown, if any.
    pub fn current(&self) -> Option<CardId> {
        if self.finished {
            None
        } else {
            self.order.get(self.position).copied()
        }
    }

    /// Flip between the question and answer faces. No-op when the
    /// session is finished or the deck is empty.
    pub fn toggle_flip(&mut self) {
        if !self.finished && !self.order.is_empty() {
            self.flipped = !self.flipped;
        }
    }

    /// Record an outcome for the current card and queue an advance.
    /// No-op when the session is finished or the deck is empty.
    pub fn classify(&mut self, outcome: Outcome) {
        if self.advance_pending {
            self.apply_advance();
        }
        if self.finished || self.order.is_empty() {
            return;
        }
        log::debug!("Card {} classified {}", self.position, outcome.as_str());
        match outcome {
            Outcome::Known => self.known += 1,
            Outcome::Learning => self.learning += 1,
        }
        self.advance_pending = true;
    }

    /// Apply a queued advance: move to the next card, or finish the
    /// session when the last card was classified. Called by the
    /// presentation layer after its transition ends; no-op when
    /// nothing is pending.
    pub fn complete_transition(&mut self) {
        if self.advance_pending {
            self.apply_advance();
        }
    }

    /// Start over: zero the tally, clear the finished flag, and
    /// shuffle the traversal order over the full deck.
    pub fn reset(&mut self, store: &Store) {
        self.order = store.cards().iter().map(|card| card.id()).collect();
        self.order.shuffle(&mut thread_rng());
        self.position = 0;
        self.flipped = false;
        self.known = 0;
        self.learning = 0;
        self.finished = false;
        self.advance_pending = false;
    }

    /// Drop vanished cards from the traversal order after the deck
    /// shrinks, clamping the position.
    pub fn reconcile(&mut self, store: &Store) {
        self.order.retain(|id| store.cards().iter().any(|card| card.id() == *id));
        if self.order.is_empty() {
            self.position = 0;
        } else if self.position >= self.order.len() {
            self.position = self.order.len() - 1;
        }
        self.flipped = false;
    }

    fn apply_advance(&mut self) {
        self.advance_pending = false;
        if self.position + 1 < self.order.len() {
            self.position += 1;
            self.flipped = false;
        } else {
            log::debug!(
                "Session finished: {} known, {} learning",
                self.known,
                self.learning
            );
            self.finished = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;
    use tempfile::tempdir;

    use crate::error::Fallible;
    use crate::slot::Slot;

    use super::*;

    fn store_with(cards: &[(&str, &str)]) -> (TempDir, Store) {
        let dir = tempdir().unwrap();
        let mut store = Store::load(Slot::new(dir.path().join("flipdeck.json"), "deck"));
        for (question, answer) in cards {
            store
                .add(question.to_string(), answer.to_string())
                .unwrap();
        }
        (dir, store)
    }

    fn classify_and_advance(session: &mut SwipeSession, outcome: Outcome) {
        session.classify(outcome);
        session.complete_transition();
    }

    #[test]
    fn test_classifying_every_card_finishes() {
        let (_dir, store) = store_with(&[("a?", "a"), ("b?", "b"), ("c?", "c")]);
        let mut session = SwipeSession::new(&store);
        classify_and_advance(&mut session, Outcome::Known);
        classify_and_advance(&mut session, Outcome::Learning);
        assert!(!session.is_finished());
        classify_and_advance(&mut session, Outcome::Known);
        assert!(session.is_finished());
        assert_eq!(session.known() + session.learning(), store.len());
    }

    #[test]
    fn test_initial_order_is_storage_order() {
        let (_dir, store) = store_with(&[("a?", "a"), ("b?", "b")]);
        let session = SwipeSession::new(&store);
        assert_eq!(session.current(), Some(store.get(0).unwrap().id()));
    }

    #[test]
    fn test_classify_during_pending_transition_is_serialized() {
        let (_dir, store) = store_with(&[("a?", "a"), ("b?", "b")]);
        let mut session = SwipeSession::new(&store);
        session.classify(Outcome::Known);
        // The second action lands before the transition completes: the
        // pending advance is applied first, then the classification.
        session.classify(Outcome::Known);
        session.complete_transition();
        assert!(session.is_finished());
        assert_eq!(session.known(), 2);
    }

    #[test]
    fn test_complete_transition_without_pending_is_noop() {
        let (_dir, store) = store_with(&[("a?", "a"), ("b?", "b")]);
        let mut session = SwipeSession::new(&store);
        session.complete_transition();
        assert_eq!(session.position(), 0);
        assert!(!session.is_finished());
    }

    #[test]
    fn test_classify_resets_flip_on_advance() {
        let (_dir, store) = store_with(&[("a?", "a"), ("b?", "b")]);
        let mut session = SwipeSession::new(&store);
        session.toggle_flip();
        classify_and_advance(&mut session, Outcome::Learning);
        assert!(!session.is_flipped());
        assert_eq!(session.position(), 1);
    }

    #[test]
    fn test_empty_deck_is_all_noops() {
        let (_dir, store) = store_with(&[]);
        let mut session = SwipeSession::new(&store);
        session.toggle_flip();
        classify_and_advance(&mut session, Outcome::Known);
        assert!(!session.is_flipped());
        assert!(!session.is_finished());
        assert_eq!(session.known(), 0);
        assert_eq!(session.current(), None);
    }

    #[test]
    fn test_classify_after_finish_is_noop() {
        let (_dir, store) = store_with(&[("a?", "a")]);
        let mut session = SwipeSession::new(&store);
        classify_and_advance(&mut session, Outcome::Known);
        assert!(session.is_finished());
        classify_and_advance(&mut session, Outcome::Learning);
        assert_eq!(session.known(), 1);
        assert_eq!(session.learning(), 0);
    }

    #[test]
    fn test_reset_clears_tally_and_rebuilds_order() -> Fallible<()> {
        let (_dir, mut store) = store_with(&[("a?", "a")]);
        let mut session = SwipeSession::new(&store);
        classify_and_advance(&mut session, Outcome::Known);
        assert!(session.is_finished());
        // A card added mid-session enters the traversal on reset.
        store.add("b?".to_string(), "b".to_string())?;
        session.reset(&store);
        assert!(!session.is_finished());
        assert_eq!(session.known(), 0);
        assert_eq!(session.learning(), 0);
        assert_eq!(session.position(), 0);
        assert_eq!(session.len(), 2);
        Ok(())
    }

    #[test]
    fn test_reset_order_is_a_permutation() {
        let (_dir, store) = store_with(&[("a?", "a"), ("b?", "b"), ("c?", "c")]);
        let mut session = SwipeSession::new(&store);
        session.reset(&store);
        let mut seen = Vec::new();
        while let Some(id) = session.current() {
            seen.push(id);
            classify_and_advance(&mut session, Outcome::Known);
        }
        assert_eq!(seen.len(), 3);
        for card in store.cards() {
            assert!(seen.contains(&card.id()));
        }
    }

    #[test]
    fn test_reconcile_after_deletion() -> Fallible<()> {
        let (_dir, mut store) = store_with(&[("a?", "a"), ("b?", "b"), ("c?", "c")]);
        let mut session = SwipeSession::new(&store);
        classify_and_advance(&mut session, Outcome::Known);
        classify_and_advance(&mut session, Outcome::Known);
        assert_eq!(session.position(), 2);
        store.delete_at(2)?;
        session.reconcile(&store);
        assert_eq!(session.len(), 2);
        assert_eq!(session.position(), 1);
        Ok(())
    }
}
