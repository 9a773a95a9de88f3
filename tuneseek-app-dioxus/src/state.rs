use dioxus::prelude::*;
use std::collections::HashMap;
use std::rc::Rc;
use tuneseek_core::{Browser, CardId, TuneseekConfig};

/// Shared UI state.
///
/// All controller state lives in one `Browser` signal; the other signals hold
/// what only the webview knows about: the text in the search box and the
/// mounted elements used for lazy-load geometry.
#[derive(Clone, Copy)]
pub struct AppState {
    pub browser: Signal<Browser>,
    /// Current text of the search input
    pub query: Signal<String>,
    /// Scrollable results container, used as the lazy-load viewport
    pub viewport: Signal<Option<Rc<MountedData>>>,
    /// Mounted artwork elements of cards still waiting for their image
    pub artwork: Signal<HashMap<CardId, Rc<MountedData>>>,
    /// Preview playback volume (0.0 to 1.0)
    pub volume: f64,
}

impl AppState {
    #[must_use]
    pub fn new(config: &TuneseekConfig) -> Self {
        Self {
            browser: Signal::new(Browser::new(config)),
            query: Signal::new(String::new()),
            viewport: Signal::new(None),
            artwork: Signal::new(HashMap::new()),
            volume: config.audio.volume,
        }
    }
}
