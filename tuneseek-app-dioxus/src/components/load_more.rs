use crate::actions;
use crate::state::AppState;
use dioxus::prelude::*;
use std::sync::Arc;
use tuneseek_core::CatalogProvider;

#[component]
pub fn LoadMoreButton() -> Element {
    let state = use_context::<AppState>();
    let provider = use_context::<Arc<dyn CatalogProvider>>();
    let browser = state.browser.read();

    if !browser.load_more_visible() {
        return rsx! {};
    }

    rsx! {
        div {
            class: "load-more",
            button {
                disabled: !browser.controls_enabled(),
                onclick: move |_| actions::load_more(state, provider.clone()),
                "Load More"
            }
        }
    }
}
