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

use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

/// A card's identifier. Assigned at creation and stable for the card's
/// lifetime: editing the text does not change the id.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct CardId(Uuid);

impl CardId {
    pub fn fresh() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A question/answer study unit.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Card {
    id: CardId,
    question: String,
    answer: String,
}

impl Card {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            id: CardId::fresh(),
            question: question.into(),
            answer: answer.into(),
        }
    }

    pub fn id(&self) -> CardId {
        self.id
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }

    pub fn set_text(&mut self, question: String, answer: String) {
        self.question = question;
        self.answer = answer;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_ids_are_unique() {
        let a = Card::new("q", "a");
        let b = Card::new("q", "a");
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_set_text_preserves_id() {
        let mut card = Card::new("2+2?", "4");
        let id = card.id();
        card.set_text("3+3?".to_string(), "6".to_string());
        assert_eq!(card.id(), id);
        assert_eq!(card.question(), "3+3?");
        assert_eq!(card.answer(), "6");
    }

    #[test]
    fn test_json_shape() {
        let card = Card::new("2+2?", "4");
        let value = serde_json::to_value(&card).unwrap();
        assert!(value.get("id").unwrap().is_string());
        assert_eq!(value.get("question").unwrap(), "2+2?");
        assert_eq!(value.get("answer").unwrap(), "4");
    }
}
