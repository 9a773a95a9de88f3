use crate::actions;
use crate::state::AppState;
use dioxus::prelude::*;
use tracing::warn;
use tuneseek_core::{SessionId, START_TIMEOUT};

/// Hidden audio element for the active preview.
///
/// Keyed by session so every new preview gets a fresh element; media events
/// report back with that session and are ignored once it is superseded.
#[component]
pub fn PreviewAudio() -> Element {
    let state = use_context::<AppState>();
    let browser = state.browser;

    let Some(active) = browser.read().audio().active().cloned() else {
        return rsx! {};
    };

    rsx! {
        PreviewElement {
            key: "{active.session.0}",
            url: active.url,
            session: active.session,
        }
    }
}

#[component]
fn PreviewElement(url: String, session: SessionId) -> Element {
    let state = use_context::<AppState>();
    let mut browser = state.browser;
    let volume = state.volume;

    // Autoplay can be blocked without an error event; give up on a session that never starts
    use_hook(move || {
        spawn(async move {
            tokio::time::sleep(START_TIMEOUT).await;
            browser.write().audio_start_deadline(session);
        })
    });

    rsx! {
        audio {
            id: "preview-audio",
            src: "{url}",
            autoplay: true,
            onloadedmetadata: move |_| actions::apply_volume(volume),
            onplaying: move |_| browser.write().audio_started(session),
            onended: move |_| browser.write().audio_ended(session),
            onerror: move |_| {
                warn!("Preview element reported an error for session {}", session.0);
                browser.write().audio_failed(session, "media error");
            },
        }
    }
}
