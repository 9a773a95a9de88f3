use crate::state::AppState;
use dioxus::prelude::*;
use tuneseek_core::{ControlState, DetailPanel, PanelState, PreviewControl};

/// Album/artist details overlay. Backdrop click and the close button dismiss it.
#[component]
pub fn DetailsModal() -> Element {
    let state = use_context::<AppState>();
    let mut browser = state.browser;
    let details = browser.read().details().clone();

    let body = match details {
        PanelState::Closed => return rsx! {},
        PanelState::Loading { .. } => rsx! {
            div {
                class: "details-loading",
                div { class: "skeleton-image large" }
                div { class: "skeleton-text" }
                div { class: "skeleton-text short" }
            }
        },
        PanelState::Message(message) => rsx! {
            p { class: "text-center", "{message}" }
        },
        PanelState::Ready(panel) => rsx! {
            PanelBody { panel }
        },
    };

    rsx! {
        div {
            class: "modal show",
            onclick: move |_| browser.write().close_details(),

            div {
                class: "modal-content",
                onclick: move |evt: MouseEvent| evt.stop_propagation(),

                button {
                    class: "close-button",
                    aria_label: "Close details",
                    onclick: move |_| browser.write().close_details(),
                    "\u{00D7}"
                }
                {body}
            }
        }
    }
}

#[component]
fn PanelBody(panel: DetailPanel) -> Element {
    let state = use_context::<AppState>();
    let mut browser = state.browser;
    let panel_id = panel.panel;

    rsx! {
        div {
            class: "details-header",
            img { src: "{panel.artwork_url}", alt: "{panel.title}" }
            div {
                h2 { "{panel.title}" }
                for (label, value) in panel.facts.iter() {
                    p { key: "{label}", strong { "{label}: " } "{value}" }
                }
            }
        }
        h3 { "{panel.tracks_heading}" }
        if panel.tracks.is_empty() {
            p { "{panel.empty_tracks_message}" }
        } else {
            ul {
                class: "track-list",
                for (row, track) in panel.tracks.iter().enumerate() {
                    {
                        let playing = browser
                            .read()
                            .control_state(PreviewControl::DetailRow { panel: panel_id, row })
                            == ControlState::Playing;
                        rsx! {
                            li {
                                key: "{row}",
                                span { "{track.title}" }
                                if track.preview_url.is_some() {
                                    button {
                                        class: if playing { "track-play-button playing" } else { "track-play-button" },
                                        aria_label: "Play preview of {track.title}",
                                        onclick: move |_| browser.write().play_detail_row(row),
                                        if playing { "\u{23F8}" } else { "\u{25B6}" }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
