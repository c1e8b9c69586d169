use crate::api::*;
use crate::components::{use_client, use_display_change, Icon, SongTile};
use crate::config::COVER_SIZE_LIST;
use crate::routes::Route;
use crate::sync::ReadSequence;
use dioxus::logger::tracing::{debug, warn};
use dioxus::prelude::*;

async fn refresh_song_list(
    client: KaraokeClient,
    sequence: ReadSequence,
    mut songs: Signal<Option<Vec<SongSummary>>>,
) {
    let request = sequence.begin();
    let result = client.get_song_list().await;
    if !sequence.is_current(request) {
        debug!("dropping superseded song list response");
        return;
    }
    match result {
        Ok(list) => songs.set(Some(list)),
        Err(err) => warn!("song list fetch failed: {err}"),
    }
}

#[component]
pub fn SongListView() -> Element {
    let client = use_client();
    let sequence = use_hook(ReadSequence::default);
    let songs = use_signal(|| None::<Vec<SongSummary>>);

    // The catalogue only changes with display preferences, so there is no poll.
    {
        let client = client.clone();
        let sequence = sequence.clone();
        use_hook(move || spawn(refresh_song_list(client, sequence, songs)));
    }
    {
        let client = client.clone();
        let sequence = sequence.clone();
        use_display_change(move || {
            spawn(refresh_song_list(client.clone(), sequence.clone(), songs));
        });
    }

    rsx! {
        div { class: "space-y-6",
            header { class: "page-header",
                h1 { class: "page-title", "Songs" }
                if let Some(list) = songs() {
                    p { class: "page-subtitle", "{list.len()} songs" }
                }
            }

            match songs() {
                None => rsx! {
                    div { class: "flex justify-center py-20",
                        Icon {
                            name: "loader".to_string(),
                            class: "w-8 h-8 text-zinc-500".to_string(),
                        }
                    }
                },
                Some(list) if list.is_empty() => rsx! {
                    div { class: "flex flex-col items-center justify-center py-20",
                        Icon {
                            name: "music".to_string(),
                            class: "w-16 h-16 text-zinc-600 mb-4".to_string(),
                        }
                        p { class: "text-zinc-400", "No songs on the server" }
                    }
                },
                Some(list) => rsx! {
                    div { class: "bg-zinc-800/30 rounded-2xl border border-zinc-700/30 overflow-hidden divide-y divide-zinc-800/50",
                        for song in list {
                            SongTile {
                                key: "{song.id}",
                                title: song.title().to_string(),
                                artist: song.artist().to_string(),
                                cover_url: client.cover_url(song.id, COVER_SIZE_LIST),
                                to: Route::SongDetailView { song_id: song.id },
                            }
                        }
                    }
                },
            }
        }
    }
}
