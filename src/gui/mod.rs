pub mod app;
mod card;
mod filter_panel;
mod playback_bar;
mod settings;
pub mod theme;

pub use app::SejongApp;
