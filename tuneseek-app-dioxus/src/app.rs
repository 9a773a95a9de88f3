use crate::actions;
use crate::components::{
    DetailsModal, FilterBar, LoadMoreButton, PreviewAudio, ResultsGrid, SearchBar, StatusBar,
};
use crate::state::AppState;
use dioxus::prelude::*;

/// Root application component.
/// Search controls on top, scrollable results below, overlays last.
#[component]
pub fn App() -> Element {
    let state = use_context::<AppState>();
    let mut browser = state.browser;
    let mut viewport = state.viewport;

    // Escape closes the details overlay from anywhere in the window
    let on_key_down = move |evt: KeyboardEvent| {
        if evt.key() == Key::Escape && browser.peek().details().is_open() {
            browser.write().close_details();
        }
    };

    rsx! {
        div {
            class: "app",
            tabindex: "0",
            onkeydown: on_key_down,

            header {
                class: "app-header",
                h1 { "Tuneseek" }
                SearchBar {}
                FilterBar {}
            }

            StatusBar {}

            main {
                class: "results-container",
                onmounted: move |evt: MountedEvent| {
                    viewport.set(Some(evt.data()));
                },
                onscroll: move |_| {
                    spawn(actions::refresh_visibility(state));
                },

                ResultsGrid {}
                LoadMoreButton {}
            }

            DetailsModal {}
            PreviewAudio {}
        }
    }
}
