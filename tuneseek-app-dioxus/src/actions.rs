//! User actions that reach the network or the DOM.
//!
//! Each action takes a synchronous step on the `Browser` signal, then spawns
//! the I/O and applies the result in a second short write. No signal borrow
//! is held across an await.

use crate::state::AppState;
use dioxus::prelude::*;
use std::rc::Rc;
use std::sync::Arc;
use tracing::{debug, info, warn};
use tuneseek_core::{CardId, CatalogProvider, ElementBounds, MediaType, PendingSearch, Viewport};

const LOG_TARGET: &str = "tuneseek::actions";

/// Run a new search with the current query text
pub fn search(state: AppState, provider: Arc<dyn CatalogProvider>) {
    let mut browser = state.browser;
    let query = state.query.peek().clone();
    let pending = browser.write().search(&query);
    if let Some(pending) = pending {
        clear_artwork(state);
        fetch(state, provider, pending);
    }
}

pub fn load_more(state: AppState, provider: Arc<dyn CatalogProvider>) {
    let mut browser = state.browser;
    let pending = browser.write().load_more();
    if let Some(pending) = pending {
        fetch(state, provider, pending);
    }
}

pub fn select_media_type(state: AppState, provider: Arc<dyn CatalogProvider>, media_type: MediaType) {
    let mut browser = state.browser;
    let query = state.query.peek().clone();
    let pending = browser.write().select_media_type(media_type, &query);
    if let Some(pending) = pending {
        clear_artwork(state);
        fetch(state, provider, pending);
    }
}

pub fn clear(mut state: AppState) {
    state.query.set(String::new());
    state.browser.write().clear();
    clear_artwork(state);
}

/// Route a click on a card body
pub fn card_clicked(state: AppState, provider: Arc<dyn CatalogProvider>, card: CardId) {
    let mut browser = state.browser;
    let pending = browser.write().card_clicked(card);
    let Some(pending) = pending else {
        return;
    };
    spawn(async move {
        let result = pending.execute(provider.as_ref()).await;
        browser.write().finish_details(&pending, result);
    });
}

fn fetch(state: AppState, provider: Arc<dyn CatalogProvider>, pending: PendingSearch) {
    let mut browser = state.browser;
    spawn(async move {
        let result = pending.execute(provider.as_ref()).await;
        browser.write().finish_search(pending.ticket, result);
    });
}

fn clear_artwork(mut state: AppState) {
    state.artwork.write().clear();
}

/// Register a card's artwork element and check whether it is already in view
pub fn artwork_mounted(mut state: AppState, card: CardId, element: Rc<MountedData>) {
    state.artwork.write().insert(card, element);
    spawn(refresh_visibility(state));
}

/// Measure the viewport and every card still waiting for artwork, then let
/// the observer assign images to those in range.
pub async fn refresh_visibility(mut state: AppState) {
    let Some(container) = state.viewport.peek().clone() else {
        return;
    };
    let Ok(rect) = container.get_client_rect().await else {
        return;
    };
    let viewport = Viewport {
        top: rect.min_y(),
        bottom: rect.max_y(),
    };

    let targets: Vec<(CardId, Rc<MountedData>)> = {
        let browser = state.browser.peek();
        let elements = state.artwork.peek();
        browser
            .results()
            .observer()
            .pending()
            .filter_map(|id| elements.get(id).map(|element| (*id, element.clone())))
            .collect()
    };
    if targets.is_empty() {
        return;
    }

    let mut entries = Vec::with_capacity(targets.len());
    for (id, element) in targets {
        if let Ok(bounds) = element.get_client_rect().await {
            entries.push((
                id,
                ElementBounds {
                    top: bounds.min_y(),
                    bottom: bounds.max_y(),
                },
            ));
        }
    }

    let loaded = state.browser.write().apply_visibility(viewport, entries);
    if loaded > 0 {
        debug!(target: LOG_TARGET, "Assigned artwork to {} cards", loaded);
        let browser = state.browser;
        state
            .artwork
            .write()
            .retain(|id, _| browser.peek().results().observer().is_watching(id));
    }
}

/// Set the volume of the preview element once its media is loaded
pub fn apply_volume(volume: f64) {
    info!(target: LOG_TARGET, "Starting preview at volume {}", volume);
    let eval_result = document::eval(&format!(
        "const el = document.getElementById('preview-audio'); if (el) {{ el.volume = {volume}; }}"
    ));
    spawn(async move {
        if let Err(e) = eval_result.await {
            warn!(target: LOG_TARGET, "Failed to set preview volume: {e}");
        }
    });
}
