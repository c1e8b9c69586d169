//! The components module contains all shared components for our app.

mod app;
mod hooks;
mod icons;
mod playback_editor;
mod slider;
mod song_tile;
pub mod views;

pub use app::*;
pub use hooks::*;
pub use icons::*;
pub use playback_editor::*;
pub use slider::Slider;
pub use song_tile::*;
