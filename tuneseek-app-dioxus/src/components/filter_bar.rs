use crate::actions;
use crate::state::AppState;
use dioxus::prelude::*;
use std::sync::Arc;
use tuneseek_core::{CatalogProvider, MediaType};

/// Media type filter buttons; picking one searches again with the current query
#[component]
pub fn FilterBar() -> Element {
    let state = use_context::<AppState>();
    let provider = use_context::<Arc<dyn CatalogProvider>>();
    let browser = state.browser.read();
    let active = browser.media_type();
    let enabled = browser.controls_enabled();

    rsx! {
        div {
            class: "filter-bar",
            for media_type in MediaType::ALL {
                {
                    let provider = provider.clone();
                    rsx! {
                        button {
                            key: "{media_type}",
                            class: if media_type == active { "filter-button active" } else { "filter-button" },
                            disabled: !enabled,
                            onclick: move |_| actions::select_media_type(state, provider.clone(), media_type),
                            "{media_type.label()}"
                        }
                    }
                }
            }
        }
    }
}
