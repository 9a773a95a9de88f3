pub mod audio;
pub mod browser;
pub mod config;
pub mod details;
pub mod error;
pub mod item;
pub mod lazy_load;
pub mod media;
pub mod notice;
pub mod paths;
pub mod provider;
pub mod render;
pub mod search;

pub use audio::{AudioSession, AudioState, ControlState, PreviewControl, SessionId, START_TIMEOUT};
pub use browser::Browser;
pub use config::{
    build_config_template, AudioConfig, CatalogConfig, LoggingConfig, TuneseekConfig, UiConfig,
};

/// Re-export toml error type for config parsing error handling
pub use toml::de::Error as TomlParseError;
pub use details::{DetailPanel, DetailSubject, DetailsController, PanelState, PendingLookup, TrackRow};
pub use error::{CoreError, Result};
pub use item::{Album, Artist, CatalogRecord, ItemKind, ResultItem, Track};
pub use lazy_load::{ElementBounds, LazyLoadObserver, Viewport};
pub use media::MediaType;
pub use notice::{Notice, NoticeId, NoticeLevel, StatusLine};
pub use paths::{config_dir, log_file_path, CONFIG_DIR_NAME, CONFIG_FILE_NAME, LOG_FILE_NAME};
pub use provider::{CatalogProvider, LookupRequest, SearchPage, SearchRequest};
pub use render::{Card, CardId, Placeholder, ResultsContent, ResultsRenderer};
pub use search::{FetchMode, PendingSearch, SearchController, SearchOutcome, SearchState};
