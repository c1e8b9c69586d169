use crate::components::Icon;
use crate::routes::Route;
use dioxus::prelude::*;

/// Row used by both the song list and the queue list.
#[component]
pub fn SongTile(
    title: String,
    artist: String,
    cover_url: String,
    to: Route,
    #[props(default)] highlight: bool,
) -> Element {
    let row_class = if highlight {
        "song-tile flex items-center gap-4 p-3 bg-emerald-500/10"
    } else {
        "song-tile flex items-center gap-4 p-3 hover:bg-zinc-700/30 transition-colors"
    };

    rsx! {
        Link { to, class: "{row_class}",
            div { class: "w-14 h-14 rounded-lg bg-zinc-800 flex-shrink-0 overflow-hidden",
                img {
                    class: "w-full h-full object-cover",
                    src: "{cover_url}",
                    alt: "",
                    loading: "lazy",
                }
            }
            div { class: "min-w-0 flex-1",
                p { class: "font-medium text-white truncate", "{title}" }
                p { class: "text-sm text-zinc-400 truncate", "{artist}" }
            }
            if highlight {
                Icon {
                    name: "play".to_string(),
                    class: "w-4 h-4 text-emerald-400".to_string(),
                }
            }
        }
    }
}
