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

use crate::error::Fallible;
use crate::store::Store;
use crate::types::card::CardId;

/// Which card a form submission writes to.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum FormMode {
    Add,
    Edit(CardId),
}

/// A free-text question/answer pair on its way into the repository.
pub struct CardForm {
    mode: FormMode,
    question: String,
    answer: String,
}

impl CardForm {
    pub fn add(question: String, answer: String) -> Self {
        Self {
            mode: FormMode::Add,
            question,
            answer,
        }
    }

    pub fn edit(id: CardId, question: String, answer: String) -> Self {
        Self {
            mode: FormMode::Edit(id),
            question,
            answer,
        }
    }

    /// The trimmed question/answer pair, if both are non-empty.
    pub fn validated(&self) -> Option<(String, String)> {
        let question = self.question.trim();
        let answer = self.answer.trim();
        if question.is_empty() || answer.is_empty() {
            None
        } else {
            Some((question.to_string(), answer.to_string()))
        }
    }

    /// Apply the form to the store. Returns true if the submission was
    /// accepted and the form should be dismissed, false if validation
    /// rejected it.
    pub fn submit(&self, store: &mut Store) -> Fallible<bool> {
        match self.validated() {
            Some((question, answer)) => {
                match self.mode {
                    FormMode::Add => {
                        store.add(question, answer)?;
                    }
                    FormMode::Edit(id) => {
                        store.update(id, question, answer)?;
                    }
                }
                Ok(true)
            }
            None => {
                log::debug!("Rejecting card form with empty trimmed text");
                Ok(false)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;
    use tempfile::tempdir;

    use crate::slot::Slot;

    use super::*;

    fn scratch_store() -> (TempDir, Store) {
        let dir = tempdir().unwrap();
        let store = Store::load(Slot::new(dir.path().join("flipdeck.json"), "deck"));
        (dir, store)
    }

    #[test]
    fn test_whitespace_question_rejected() -> Fallible<()> {
        let (_dir, mut store) = scratch_store();
        let form = CardForm::add("   ".to_string(), "4".to_string());
        assert!(form.validated().is_none());
        assert!(!form.submit(&mut store)?);
        assert!(store.is_empty());
        Ok(())
    }

    #[test]
    fn test_whitespace_answer_rejected() {
        let form = CardForm::add("2+2?".to_string(), "\n\t".to_string());
        assert!(form.validated().is_none());
    }

    #[test]
    fn test_valid_submission_appends_one_card() -> Fallible<()> {
        let (_dir, mut store) = scratch_store();
        let form = CardForm::add("  2+2?  ".to_string(), " 4 ".to_string());
        assert!(form.submit(&mut store)?);
        assert_eq!(store.len(), 1);
        // Surrounding whitespace is trimmed before storage.
        assert_eq!(store.get(0).unwrap().question(), "2+2?");
        assert_eq!(store.get(0).unwrap().answer(), "4");
        Ok(())
    }

    #[test]
    fn test_edit_submission() -> Fallible<()> {
        let (_dir, mut store) = scratch_store();
        let card = store.add("a?".to_string(), "a".to_string())?;
        let form = CardForm::edit(card.id(), "b?".to_string(), "b".to_string());
        assert!(form.submit(&mut store)?);
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(0).unwrap().question(), "b?");
        Ok(())
    }
}
