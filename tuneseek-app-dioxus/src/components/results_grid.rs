use crate::actions;
use crate::state::AppState;
use dioxus::prelude::*;
use std::sync::Arc;
use tuneseek_core::{Card, CatalogProvider, ControlState, PreviewControl, ResultsContent};

/// Results area: a placeholder message, or cards followed by pending skeletons
#[component]
pub fn ResultsGrid() -> Element {
    let state = use_context::<AppState>();
    let browser = state.browser.read();

    match browser.results().content() {
        ResultsContent::Placeholder(placeholder) => rsx! {
            p { class: "placeholder-text", "{placeholder.message()}" }
        },
        ResultsContent::Cards { cards, pending } => rsx! {
            div {
                class: "results-grid",
                for card in cards.iter().cloned() {
                    ResultCard { key: "{card.id}", card }
                }
                for i in 0..*pending {
                    SkeletonCard { key: "skeleton-{i}" }
                }
            }
        },
    }
}

#[component]
fn ResultCard(card: Card) -> Element {
    let state = use_context::<AppState>();
    let provider = use_context::<Arc<dyn CatalogProvider>>();
    let mut browser = state.browser;

    let id = card.id;
    let artwork_src = browser.read().results().artwork_src(id).to_string();
    let playing =
        browser.read().control_state(PreviewControl::Card(id)) == ControlState::Playing;

    rsx! {
        div {
            class: "music-card",
            "data-item-type": card.kind.as_str(),
            onclick: move |_| actions::card_clicked(state, provider.clone(), id),

            img {
                class: "card-artwork",
                src: "{artwork_src}",
                alt: "{card.title}",
                onmounted: move |evt: MountedEvent| actions::artwork_mounted(state, id, evt.data()),
            }
            div {
                class: "card-info",
                h3 { "{card.title}" }
                p { "{card.subtitles[0]}" }
                p { "{card.subtitles[1]}" }
            }
            if card.has_play_control() {
                button {
                    class: if playing { "play-button playing" } else { "play-button" },
                    aria_label: if playing { "Pause preview" } else { "Play preview" },
                    onclick: move |evt: MouseEvent| {
                        evt.stop_propagation();
                        browser.write().play_card(id);
                    },
                    if playing { "\u{23F8}" } else { "\u{25B6}" }
                }
            }
        }
    }
}

#[component]
fn SkeletonCard() -> Element {
    rsx! {
        div {
            class: "music-card skeleton",
            div { class: "skeleton-image" }
            div { class: "skeleton-text" }
            div { class: "skeleton-text short" }
        }
    }
}
