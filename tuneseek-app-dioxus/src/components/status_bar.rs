use crate::state::AppState;
use dioxus::prelude::*;
use tracing::debug;

/// Transient status message with auto-dismiss
#[component]
pub fn StatusBar() -> Element {
    let state = use_context::<AppState>();
    let mut browser = state.browser;

    // A new notice restarts the timer; an expired timer only dismisses its own notice
    let timer = use_memo(move || browser.read().status().timer());
    use_effect(move || {
        if let Some((id, duration)) = timer() {
            spawn(async move {
                tokio::time::sleep(duration).await;
                if browser.write().dismiss_notice(id) {
                    debug!("Notice {:?} dismissed after {:?}", id, duration);
                }
            });
        }
    });

    let browser = browser.read();
    let Some(notice) = browser.status().current() else {
        return rsx! {
            div { class: "status-bar hidden" }
        };
    };
    let class = format!("status-bar {}", notice.level.as_str());

    rsx! {
        div {
            class: "{class}",
            role: "status",
            "{notice.message}"
        }
    }
}
