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

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

use axum::Router;
use axum::http::HeaderName;
use axum::http::StatusCode;
use axum::http::header::CACHE_CONTROL;
use axum::http::header::CONTENT_TYPE;
use axum::response::Html;
use axum::routing::get;
use axum::routing::post;
use tokio::net::TcpListener;
use tokio::net::TcpStream;
use tokio::time::sleep;

use crate::error::Fallible;
use crate::error::fail;
use crate::session::BrowseSession;
use crate::slot::Slot;
use crate::store::Store;
use crate::swipe::SwipeSession;
use crate::web::get::browse_handler;
use crate::web::get::study_handler;
use crate::web::post::browse_post_handler;
use crate::web::post::study_post_handler;
use crate::web::state::MutableState;
use crate::web::state::ServerState;

/// The file inside the deck directory holding the durable slot.
pub const STORE_FILE: &str = "flipdeck.json";

/// The key within the store file under which the deck is persisted.
pub const DECK_KEY: &str = "deck";

pub async fn start_server(directory: PathBuf, port: u16, open_browser: bool) -> Fallible<()> {
    if !directory.exists() {
        return fail("directory does not exist.");
    }

    let slot = Slot::new(directory.join(STORE_FILE), DECK_KEY);
    let store = Store::load(slot);
    log::debug!("Loaded deck with {} cards.", store.len());

    let browse = BrowseSession::new();
    let swipe = SwipeSession::new(&store);
    let state = ServerState {
        mutable: Arc::new(Mutex::new(MutableState {
            store,
            browse,
            swipe,
        })),
    };

    let app = Router::new();
    let app = app.route("/", get(browse_handler));
    let app = app.route("/", post(browse_post_handler));
    let app = app.route("/study", get(study_handler));
    let app = app.route("/study", post(study_post_handler));
    let app = app.route("/style.css", get(stylesheet));
    let app = app.fallback(not_found_handler);
    let app = app.with_state(state);
    let bind = format!("0.0.0.0:{port}");

    // Start a separate task to open the browser.
    if open_browser {
        let bind = bind.clone();
        let url = format!("http://{bind}/");
        tokio::spawn(async move {
            loop {
                if let Ok(stream) = TcpStream::connect(&bind).await {
                    drop(stream);
                    break;
                }
                sleep(Duration::from_millis(1)).await;
            }
            let _ = open::that(url);
        });
    }

    // Start the server.
    log::debug!("Starting server on {bind}");
    let listener = TcpListener::bind(&bind).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

async fn stylesheet() -> (StatusCode, [(HeaderName, &'static str); 2], &'static [u8]) {
    let bytes = include_bytes!("style.css");
    (
        StatusCode::OK,
        [
            (CONTENT_TYPE, "text/css"),
            (CACHE_CONTROL, "public, max-age=604800, immutable"),
        ],
        bytes,
    )
}

async fn not_found_handler() -> (StatusCode, Html<String>) {
    (StatusCode::NOT_FOUND, Html("Not Found".to_string()))
}
