mod details_modal;
mod filter_bar;
mod load_more;
mod preview_audio;
mod results_grid;
mod search_bar;
mod status_bar;

pub use details_modal::DetailsModal;
pub use filter_bar::FilterBar;
pub use load_more::LoadMoreButton;
pub use preview_audio::PreviewAudio;
pub use results_grid::ResultsGrid;
pub use search_bar::SearchBar;
pub use status_bar::StatusBar;
