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

/// Navigation state for browsing the deck one card at a time.
///
/// The session holds only a position into the deck, never a copy of it.
/// The position is in `[0, deck_len - 1]` whenever the deck is
/// non-empty and 0 otherwise. Every operation is total: on an empty
/// deck they are all no-ops.
pub struct BrowseSession {
    position: usize,
    flipped: bool,
}

impl BrowseSession {
    pub fn new() -> Self {
        Self {
            position: 0,
            flipped: false,
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    /// Advance to the next card, showing its question face. No-op at
    /// the last card.
    pub fn next(&mut self, deck_len: usize) {
        if deck_len > 0 && self.position + 1 < deck_len {
            self.position += 1;
            self.flipped = false;
        }
    }

    /// Go back to the previous card, showing its question face. No-op
    /// at the first card.
    pub fn previous(&mut self) {
        if self.position > 0 {
            self.position -= 1;
            self.flipped = false;
        }
    }

    /// Flip between the question and answer faces. The position is
    /// untouched.
    pub fn toggle_flip(&mut self, deck_len: usize) {
        if deck_len > 0 {
            self.flipped = !self.flipped;
        }
    }

    /// Clamp the position after the deck shrinks and show the question
    /// face.
    pub fn reconcile(&mut self, deck_len: usize) {
        if deck_len == 0 {
            self.position = 0;
        } else if self.position >= deck_len {
            self.position = deck_len - 1;
        }
        self.flipped = false;
    }
}
