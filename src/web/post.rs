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

use axum::Form;
use axum::extract::State;
use axum::response::Redirect;
use serde::Deserialize;

use crate::error::Fallible;
use crate::form::CardForm;
use crate::types::card::CardId;
use crate::types::outcome::Outcome;
use crate::web::state::ServerState;

#[derive(Debug, Deserialize)]
enum BrowseAction {
    Next,
    Previous,
    Flip,
    Delete,
    Add,
    Edit,
}

#[derive(Deserialize)]
pub struct BrowseForm {
    action: BrowseAction,
    #[serde(default)]
    question: String,
    #[serde(default)]
    answer: String,
    id: Option<CardId>,
}

pub async fn browse_post_handler(
    State(state): State<ServerState>,
    Form(form): Form<BrowseForm>,
) -> Redirect {
    match browse_action_handler(state, form) {
        Ok(_) => {}
        Err(e) => {
            log::error!("error: {e}");
        }
    }
    Redirect::to("/")
}

fn browse_action_handler(state: ServerState, form: BrowseForm) -> Fallible<()> {
    let mut mutable = state.mutable.lock().unwrap();
    match form.action {
        BrowseAction::Next => {
            let deck_len = mutable.store.len();
            mutable.browse.next(deck_len);
        }
        BrowseAction::Previous => {
            mutable.browse.previous();
        }
        BrowseAction::Flip => {
            let deck_len = mutable.store.len();
            mutable.browse.toggle_flip(deck_len);
        }
        BrowseAction::Delete => {
            let position = mutable.browse.position();
            mutable.store.delete_at(position)?;
            let deck_len = mutable.store.len();
            mutable.browse.reconcile(deck_len);
            let mutable = &mut *mutable;
            mutable.swipe.reconcile(&mutable.store);
        }
        BrowseAction::Add => {
            let card_form = CardForm::add(form.question, form.answer);
            card_form.submit(&mut mutable.store)?;
        }
        BrowseAction::Edit => {
            match form.id {
                Some(id) => {
                    let card_form = CardForm::edit(id, form.question, form.answer);
                    card_form.submit(&mut mutable.store)?;
                }
                None => {
                    log::debug!("Ignoring edit action without a card id");
                }
            }
        }
    }
    Ok(())
}

#[derive(Debug, Deserialize)]
enum StudyAction {
    Flip,
    Known,
    Learning,
    Reset,
}

impl StudyAction {
    pub fn outcome(&self) -> Outcome {
        match self {
            StudyAction::Known => Outcome::Known,
            StudyAction::Learning => Outcome::Learning,
            _ => panic!("Action does not correspond to an outcome"),
        }
    }
}

#[derive(Deserialize)]
pub struct StudyForm {
    action: StudyAction,
}

pub async fn study_post_handler(
    State(state): State<ServerState>,
    Form(form): Form<StudyForm>,
) -> Redirect {
    let mut mutable = state.mutable.lock().unwrap();
    match form.action {
        StudyAction::Flip => {
            mutable.swipe.toggle_flip();
        }
        StudyAction::Known | StudyAction::Learning => {
            let outcome = form.action.outcome();
            mutable.swipe.classify(outcome);
            // The web screen has no swipe animation, so the transition
            // completes immediately.
            mutable.swipe.complete_transition();
        }
        StudyAction::Reset => {
            let mutable = &mut *mutable;
            mutable.swipe.reset(&mutable.store);
        }
    }
    Redirect::to("/study")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_study_action_outcome() {
        assert_eq!(StudyAction::Known.outcome(), Outcome::Known);
        assert_eq!(StudyAction::Learning.outcome(), Outcome::Learning);
    }
}
