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

use std::collections::HashSet;

use crate::error::Fallible;
use crate::slot::Slot;
use crate::types::card::Card;
use crate::types::card::CardId;

/// Owns the ordered deck and writes it through to the durable slot on
/// every mutation.
pub struct Store {
    slot: Slot,
    deck: Vec<Card>,
}

impl Store {
    /// Load the deck from the slot. Missing or corrupt data yields an
    /// empty deck. Cards with duplicate ids are dropped, keeping the
    /// first occurrence.
    pub fn load(slot: Slot) -> Self {
        let deck: Vec<Card> = match slot.read() {
            Some(value) => match serde_json::from_value(value) {
                Ok(deck) => deck,
                Err(e) => {
                    log::warn!("Discarding corrupt deck data: {e}");
                    Vec::new()
                }
            },
            None => Vec::new(),
        };
        let mut seen: HashSet<CardId> = HashSet::new();
        let mut unique = Vec::with_capacity(deck.len());
        for card in deck {
            if seen.insert(card.id()) {
                unique.push(card);
            } else {
                log::warn!("Dropping card with duplicate id {}", card.id());
            }
        }
        Self { slot, deck: unique }
    }

    pub fn cards(&self) -> &[Card] {
        &self.deck
    }

    pub fn len(&self) -> usize {
        self.deck.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deck.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Card> {
        self.deck.get(index)
    }

    /// Append a new card with a fresh id and persist. Returns the new
    /// card.
    pub fn add(&mut self, question: String, answer: String) -> Fallible<Card> {
        let card = Card::new(question, answer);
        log::debug!("Adding card {}", card.id());
        self.deck.push(card.clone());
        self.persist()?;
        Ok(card)
    }

    /// Replace the text of the card with the given id, preserving its
    /// position and id, and persist. No-op if the id is not present.
    pub fn update(&mut self, id: CardId, question: String, answer: String) -> Fallible<()> {
        match self.deck.iter_mut().find(|card| card.id() == id) {
            Some(card) => {
                log::debug!("Updating card {id}");
                card.set_text(question, answer);
                self.persist()
            }
            None => {
                log::debug!("Ignoring update for unknown card {id}");
                Ok(())
            }
        }
    }

    /// Remove the card at the given position and persist. No-op if the
    /// index is out of bounds.
    pub fn delete_at(&mut self, index: usize) -> Fallible<()> {
        if index < self.deck.len() {
            let card = self.deck.remove(index);
            log::debug!("Deleting card {} at position {index}", card.id());
            self.persist()
        } else {
            log::debug!("Ignoring delete at out-of-bounds position {index}");
            Ok(())
        }
    }

    fn persist(&self) -> Fallible<()> {
        let value = serde_json::to_value(&self.deck)?;
        self.slot.write(&value)
    }
}
