use crate::api::*;
use crate::components::{use_client, use_display_change, Icon, PlaybackEditor};
use crate::config::COVER_SIZE_DETAIL;
use crate::routes::Route;
use crate::sync::ReadSequence;
use dioxus::logger::tracing::{debug, warn};
use dioxus::prelude::*;

/// Loads the song and, the first time only, seeds a fresh config for it. The
/// config the user is editing survives later refreshes.
async fn refresh_song(
    client: KaraokeClient,
    song_id: u32,
    sequence: ReadSequence,
    mut song: Signal<Option<Song>>,
    mut config: Signal<Option<PlaybackConfig>>,
) {
    let request = sequence.begin();
    let result = client.get_song(song_id).await;
    if !sequence.is_current(request) {
        debug!(song_id, "dropping superseded song response");
        return;
    }
    match result {
        Ok(fresh) => {
            if config.peek().is_none() {
                config.set(Some(PlaybackConfig::for_song(&fresh)));
            }
            song.set(Some(fresh));
        }
        Err(err) => warn!(song_id, "song fetch failed: {err}"),
    }
}

#[component]
pub fn SongDetailView(song_id: u32) -> Element {
    rsx! {
        SongDetailPage { key: "{song_id}", song_id }
    }
}

#[component]
fn SongDetailPage(song_id: u32) -> Element {
    let client = use_client();
    let nav = navigator();
    let sequence = use_hook(ReadSequence::default);
    let song = use_signal(|| None::<Song>);
    let mut config = use_signal(|| None::<PlaybackConfig>);
    let mut adding = use_signal(|| false);

    {
        let client = client.clone();
        let sequence = sequence.clone();
        use_hook(move || spawn(refresh_song(client, song_id, sequence, song, config)));
    }
    {
        let client = client.clone();
        let sequence = sequence.clone();
        use_display_change(move || {
            spawn(refresh_song(
                client.clone(),
                song_id,
                sequence.clone(),
                song,
                config,
            ));
        });
    }

    let on_add = {
        let client = client.clone();
        move |_| {
            if adding() {
                return;
            }
            let Some(current) = config.peek().clone() else {
                return;
            };
            let client = client.clone();
            adding.set(true);
            spawn(async move {
                match client.add_to_queue(song_id, &current).await {
                    Ok(qid) => {
                        nav.push(Route::NewQueueEntryView { qid });
                    }
                    Err(err) => warn!(song_id, "adding to queue failed: {err}"),
                }
                adding.set(false);
            });
        }
    };

    let (Some(loaded), Some(current)) = (song(), config()) else {
        return rsx! {
            div { class: "flex justify-center py-20",
                Icon {
                    name: "loader".to_string(),
                    class: "w-8 h-8 text-zinc-500".to_string(),
                }
            }
        };
    };
    let cover_url = client.cover_url(loaded.id, COVER_SIZE_DETAIL);

    rsx! {
        div { class: "space-y-8 max-w-2xl",
            Link {
                to: Route::SongListView {},
                class: "inline-flex items-center gap-2 text-sm text-zinc-400 hover:text-white",
                Icon {
                    name: "arrow-left".to_string(),
                    class: "w-4 h-4".to_string(),
                }
                "Songs"
            }

            header { class: "flex items-center gap-6",
                img {
                    class: "w-32 h-32 rounded-2xl bg-zinc-800 object-cover shadow-lg",
                    src: "{cover_url}",
                    alt: "",
                }
                div { class: "min-w-0",
                    h1 { class: "page-title truncate", "{loaded.title()}" }
                    p { class: "text-zinc-400 truncate", "{loaded.artist()}" }
                }
            }

            PlaybackEditor {
                variants: loaded.variants.clone(),
                channels: loaded.channels,
                config: current,
                on_change: move |next: PlaybackConfig| config.set(Some(next)),
            }

            button {
                r#type: "button",
                class: "px-5 py-3 rounded-xl bg-emerald-500 hover:bg-emerald-400 text-white font-semibold flex items-center gap-2 disabled:opacity-50",
                disabled: adding(),
                onclick: on_add,
                if adding() {
                    Icon {
                        name: "loader".to_string(),
                        class: "w-5 h-5".to_string(),
                    }
                } else {
                    Icon {
                        name: "plus".to_string(),
                        class: "w-5 h-5".to_string(),
                    }
                }
                "Add to queue"
            }
        }
    }
}
