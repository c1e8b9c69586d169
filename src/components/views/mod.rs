mod queue;
mod queue_entry;
mod settings;
mod song_detail;
mod songs;

pub use queue::QueueListView;
pub use queue_entry::{NewQueueEntryView, QueueEntryView};
pub use settings::SettingsView;
pub use song_detail::SongDetailView;
pub use songs::SongListView;

use crate::routes::Route;
use dioxus::logger::tracing::debug;
use dioxus::prelude::*;

/// Any unknown path lands on the song list.
#[component]
pub fn NotFound(segments: Vec<String>) -> Element {
    let nav = navigator();
    let path = segments.join("/");
    use_effect(move || {
        debug!(%path, "unknown route, redirecting to songs");
        nav.replace(Route::SongListView {});
    });
    rsx! {}
}
