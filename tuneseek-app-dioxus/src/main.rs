#![cfg_attr(feature = "bundle", windows_subsystem = "windows")]
mod actions;
mod app;
mod components;
mod state;

use crate::app::App;
use crate::state::AppState;
use dioxus::desktop::{LogicalSize, WindowBuilder};
use dioxus::prelude::*;
use rfd::{MessageButtons, MessageDialog, MessageDialogResult, MessageLevel};
use std::fs::File;
use std::path::Path;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use tuneseek_catalog_itunes::ItunesProvider;
use tuneseek_core::{CatalogProvider, CoreError, TomlParseError, TuneseekConfig};

const APP_NAME: &str = "Tuneseek";

fn main() {
    // Check config for logging.enabled before full config load
    let file_logging_enabled = check_file_logging_enabled();
    init_tracing(file_logging_enabled);

    // Load config or write the template on first run
    let config = match TuneseekConfig::load_or_create() {
        Ok(config) => config,
        Err(CoreError::ConfigParseError(parse_error)) => {
            show_config_parse_error_dialog(&parse_error, &TuneseekConfig::config_path());
            std::process::exit(1);
        }
        Err(e) => {
            error!("{e}");
            show_config_error_dialog(&e.to_string(), &TuneseekConfig::config_path());
            std::process::exit(1);
        }
    };

    let provider: Arc<dyn CatalogProvider> = match ItunesProvider::new(&config.catalog) {
        Ok(provider) => Arc::new(provider),
        Err(e) => {
            error!("Failed to create catalog provider: {}", e);
            std::process::exit(1);
        }
    };
    info!(
        "Initialized {} catalog provider ({} per page, default filter {})",
        provider.name(),
        config.catalog.page_size,
        config.catalog.default_media_type
    );

    let window = WindowBuilder::new()
        .with_title(APP_NAME)
        .with_resizable(true)
        .with_inner_size(LogicalSize::new(1200.0, 860.0));

    let dioxus_config = dioxus::desktop::Config::default()
        .with_window(window)
        .with_disable_context_menu(true);

    // Inject config and provider before launch
    dioxus::LaunchBuilder::desktop()
        .with_cfg(dioxus_config)
        .with_context(config)
        .with_context(provider)
        .launch(app);
}

/// Root component that sets up shared state and renders the app
fn app() -> Element {
    let config: TuneseekConfig = use_context();
    use_context_provider(|| AppState::new(&config));

    rsx! {
        document::Title { "{APP_NAME}" },
        document::Stylesheet { href: asset!("/assets/main.css") },
        App {}
    }
}

/// Show dialog when config file has TOML parsing errors
fn show_config_parse_error_dialog(parse_error: &TomlParseError, config_path: &Path) {
    let message = format!(
        "Your configuration file has a syntax error and cannot be loaded.\n\n\
        Error: {parse_error}\n\n\
        You can either:\n\
        \u{2022} Open the config file and fix the syntax error\n\
        \u{2022} Reset to a fresh configuration template"
    );

    let result = MessageDialog::new()
        .set_level(MessageLevel::Error)
        .set_title("Tuneseek - Configuration Error")
        .set_description(&message)
        .set_buttons(MessageButtons::OkCancelCustom(
            "Open Config".into(),
            "Reset Config".into(),
        ))
        .show();

    match result {
        MessageDialogResult::Custom(button) if button == "Open Config" => {
            if let Err(e) = open::that(config_path) {
                error!("Failed to open config file: {e}");
            }
        }
        MessageDialogResult::Custom(button) if button == "Reset Config" => {
            if let Err(e) = reset_config_to_template(config_path) {
                error!("Failed to reset config file: {e}");
                MessageDialog::new()
                    .set_level(MessageLevel::Error)
                    .set_title("Tuneseek - Reset Failed")
                    .set_description(format!("Failed to reset configuration:\n{e}"))
                    .set_buttons(MessageButtons::Ok)
                    .show();
            } else {
                MessageDialog::new()
                    .set_level(MessageLevel::Info)
                    .set_title("Tuneseek - Configuration Reset")
                    .set_description(
                        "Configuration has been reset to the default template.\n\n\
                        Restart the app to use it.",
                    )
                    .set_buttons(MessageButtons::Ok)
                    .show();
            }
        }
        _ => {}
    }
}

/// Show dialog for config values out of range or an unreadable config file
fn show_config_error_dialog(error_message: &str, config_path: &Path) {
    let message = format!(
        "The configuration could not be loaded:\n\n{error_message}\n\n\
        Please edit the configuration file and restart the app."
    );

    let result = MessageDialog::new()
        .set_level(MessageLevel::Error)
        .set_title("Tuneseek - Configuration Error")
        .set_description(&message)
        .set_buttons(MessageButtons::OkCancelCustom(
            "Open Config".into(),
            "Exit".into(),
        ))
        .show();

    if matches!(result, MessageDialogResult::Custom(ref s) if s == "Open Config") {
        if let Err(e) = open::that(config_path) {
            error!("Failed to open config file: {e}");
        }
    }
}

fn reset_config_to_template(config_path: &Path) -> std::io::Result<()> {
    std::fs::write(config_path, tuneseek_core::build_config_template())
}

/// Check if file logging is enabled by reading the config file.
/// This is done before full config loading to set up tracing first.
/// Returns `false` if config doesn't exist or can't be parsed.
fn check_file_logging_enabled() -> bool {
    #[derive(serde::Deserialize)]
    struct PartialConfig {
        #[serde(default)]
        logging: PartialLoggingConfig,
    }
    #[derive(serde::Deserialize, Default)]
    struct PartialLoggingConfig {
        #[serde(default)]
        enabled: bool,
    }

    let config_path = TuneseekConfig::config_path();
    let Ok(content) = std::fs::read_to_string(&config_path) else {
        return false;
    };

    toml::from_str::<PartialConfig>(&content)
        .map(|c| c.logging.enabled)
        .unwrap_or(false)
}

/// Initialize tracing with console output and optional file logging
fn init_tracing(file_logging_enabled: bool) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,reqwest_retry=warn"));

    let fmt_layer = tracing_subscriber::fmt::layer();

    if file_logging_enabled {
        let log_path = tuneseek_core::log_file_path();

        if let Some(parent) = log_path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }

        match File::create(&log_path) {
            Ok(file) => {
                let file_layer = tracing_subscriber::fmt::layer()
                    .with_writer(Arc::new(file))
                    .with_ansi(false);

                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(fmt_layer)
                    .with(file_layer)
                    .init();

                return;
            }
            Err(e) => {
                eprintln!("Failed to create log file at {}: {e}", log_path.display());
            }
        }
    }

    // Fallback: console only
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}
