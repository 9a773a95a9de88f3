use crate::actions;
use crate::state::AppState;
use dioxus::prelude::*;
use std::sync::Arc;
use tuneseek_core::CatalogProvider;

/// Query input with search and clear buttons. Enter submits.
#[component]
pub fn SearchBar() -> Element {
    let state = use_context::<AppState>();
    let provider = use_context::<Arc<dyn CatalogProvider>>();
    let mut query = state.query;
    let enabled = state.browser.read().controls_enabled();

    let submit_provider = provider.clone();
    let on_key_down = move |evt: KeyboardEvent| {
        if evt.key() == Key::Enter {
            actions::search(state, submit_provider.clone());
        }
    };

    rsx! {
        div {
            class: "search-bar",
            input {
                r#type: "search",
                placeholder: "Search for songs, albums or artists...",
                value: "{query}",
                disabled: !enabled,
                oninput: move |evt: FormEvent| query.set(evt.value()),
                onkeydown: on_key_down,
            }
            button {
                class: "search-button",
                disabled: !enabled,
                onclick: move |_| actions::search(state, provider.clone()),
                "Search"
            }
            button {
                class: "clear-button",
                disabled: !enabled,
                onclick: move |_| actions::clear(state),
                "Clear"
            }
        }
    }
}
