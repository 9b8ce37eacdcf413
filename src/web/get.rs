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

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use maud::Markup;
use maud::PreEscaped;
use maud::html;

use crate::markdown::markdown_to_html;
use crate::types::card::Card;
use crate::web::state::MutableState;
use crate::web::state::ServerState;
use crate::web::template::page_template;

pub async fn browse_handler(State(state): State<ServerState>) -> (StatusCode, Html<String>) {
    let mutable = state.mutable.lock().unwrap();
    let body = if mutable.store.is_empty() {
        html! {
            div.root {
                div.card {
                    div.header {
                        h1 { "flipdeck" }
                    }
                    p.empty { "No cards yet. Add one below." }
                    (add_form())
                    div.nav {
                        a href="/study" { "Study" }
                    }
                }
            }
        }
    } else {
        let position = mutable.browse.position();
        let card = mutable.store.get(position).cloned();
        let card = match card {
            Some(card) => card,
            // The session position is reconciled on every deletion, so
            // this cannot happen; render the empty state anyway.
            None => {
                let html = page_template(html! { p.empty { "No cards." } });
                return (StatusCode::OK, Html(html.into_string()));
            }
        };
        let progress = format!("{} / {}", position + 1, mutable.store.len());
        let prev_disabled = position == 0;
        let next_disabled = position + 1 == mutable.store.len();
        html! {
            div.root {
                div.card {
                    div.header {
                        h1 { "flipdeck" }
                        div.progress { (progress) }
                    }
                    (card_faces(&card, mutable.browse.is_flipped()))
                    div.controls {
                        form action="/" method="post" {
                            @if prev_disabled {
                                input id="previous" type="submit" name="action" value="Previous" disabled;
                            } @else {
                                input id="previous" type="submit" name="action" value="Previous";
                            }
                            input id="flip" type="submit" name="action" value="Flip";
                            @if next_disabled {
                                input id="next" type="submit" name="action" value="Next" disabled;
                            } @else {
                                input id="next" type="submit" name="action" value="Next";
                            }
                            div.spacer {}
                            input id="delete" type="submit" name="action" value="Delete";
                        }
                    }
                    (editor(&card))
                    (add_form())
                    div.nav {
                        a href="/study" { "Study" }
                    }
                }
            }
        }
    };
    let html = page_template(body);
    (StatusCode::OK, Html(html.into_string()))
}

pub async fn study_handler(State(state): State<ServerState>) -> (StatusCode, Html<String>) {
    let mutable = state.mutable.lock().unwrap();
    let body = if mutable.swipe.is_finished() {
        html! {
            div.root {
                div.card {
                    div.finished {
                        h1 { "Session Complete" }
                        p {
                            (format!("{} known, {} still learning.",
                                mutable.swipe.known(),
                                mutable.swipe.learning()))
                        }
                    }
                    div.controls {
                        form action="/study" method="post" {
                            input id="reset" type="submit" name="action" value="Reset";
                        }
                    }
                    div.nav {
                        a href="/" { "Back to deck" }
                    }
                }
            }
        }
    } else {
        match current_card(&mutable) {
            None => {
                html! {
                    div.root {
                        div.card {
                            div.header {
                                h1 { "flipdeck" }
                            }
                            p.empty { "No cards to study." }
                            div.nav {
                                a href="/" { "Back to deck" }
                            }
                        }
                    }
                }
            }
            Some(card) => {
                let progress =
                    format!("{} / {}", mutable.swipe.position() + 1, mutable.swipe.len());
                let tally = format!(
                    "{} known · {} learning",
                    mutable.swipe.known(),
                    mutable.swipe.learning()
                );
                html! {
                    div.root {
                        div.card {
                            div.header {
                                h1 { "flipdeck" }
                                div.progress { (progress) }
                            }
                            (card_faces(&card, mutable.swipe.is_flipped()))
                            div.tally { (tally) }
                            div.controls {
                                form action="/study" method="post" {
                                    input id="flip" type="submit" name="action" value="Flip";
                                    div.spacer {}
                                    input id="known" type="submit" name="action" value="Known";
                                    input id="learning" type="submit" name="action" value="Learning";
                                    div.spacer {}
                                    input id="reset" type="submit" name="action" value="Reset";
                                }
                            }
                            div.nav {
                                a href="/" { "Back to deck" }
                            }
                        }
                    }
                }
            }
        }
    };
    let html = page_template(body);
    (StatusCode::OK, Html(html.into_string()))
}

fn current_card(mutable: &MutableState) -> Option<Card> {
    let id = mutable.swipe.current()?;
    mutable
        .store
        .cards()
        .iter()
        .find(|card| card.id() == id)
        .cloned()
}

fn card_faces(card: &Card, flipped: bool) -> Markup {
    let question = markdown_to_html(card.question());
    if flipped {
        let answer = markdown_to_html(card.answer());
        html! {
            div.content {
                div.question { (PreEscaped(question)) }
                div.answer { (PreEscaped(answer)) }
            }
        }
    } else {
        html! {
            div.content {
                div.question { (PreEscaped(question)) }
                div.answer {}
            }
        }
    }
}

fn add_form() -> Markup {
    html! {
        div.editor {
            h2 { "Add a card" }
            form action="/" method="post" {
                input type="text" name="question" placeholder="Question" required;
                input type="text" name="answer" placeholder="Answer" required;
                input id="add" type="submit" name="action" value="Add";
            }
        }
    }
}

fn editor(card: &Card) -> Markup {
    html! {
        div.editor {
            h2 { "Edit this card" }
            form action="/" method="post" {
                input type="hidden" name="id" value=(card.id());
                input type="text" name="question" value=(card.question()) required;
                input type="text" name="answer" value=(card.answer()) required;
                input id="edit" type="submit" name="action" value="Edit";
            }
        }
    }
}
