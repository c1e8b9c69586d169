use crate::api::*;
use crate::components::{use_client, use_display_change, use_poll, Icon, SongTile};
use crate::config::COVER_SIZE_LIST;
use crate::routes::Route;
use crate::sync::ReadSequence;
use dioxus::logger::tracing::{debug, warn};
use dioxus::prelude::*;

async fn refresh_queue(
    client: KaraokeClient,
    sequence: ReadSequence,
    mut queue: Signal<Option<Vec<QueueListItem>>>,
) {
    let request = sequence.begin();
    let result = client.get_queue().await;
    if !sequence.is_current(request) {
        debug!("dropping superseded queue response");
        return;
    }
    match result {
        Ok(items) => queue.set(Some(items)),
        Err(err) => warn!("queue fetch failed: {err}"),
    }
}

#[component]
pub fn QueueListView() -> Element {
    let client = use_client();
    let sequence = use_hook(ReadSequence::default);
    let queue = use_signal(|| None::<Vec<QueueListItem>>);

    {
        let client = client.clone();
        let sequence = sequence.clone();
        use_poll(move || refresh_queue(client.clone(), sequence.clone(), queue));
    }
    {
        let client = client.clone();
        let sequence = sequence.clone();
        use_display_change(move || {
            spawn(refresh_queue(client.clone(), sequence.clone(), queue));
        });
    }

    rsx! {
        div { class: "space-y-6",
            header { class: "page-header",
                h1 { class: "page-title", "Queue" }
                if let Some(items) = queue() {
                    p { class: "page-subtitle", "{items.len()} queued" }
                }
            }

            match queue() {
                None => rsx! {
                    div { class: "flex justify-center py-20",
                        Icon {
                            name: "loader".to_string(),
                            class: "w-8 h-8 text-zinc-500".to_string(),
                        }
                    }
                },
                Some(items) if items.is_empty() => rsx! {
                    div { class: "flex flex-col items-center justify-center py-20",
                        Icon {
                            name: "queue".to_string(),
                            class: "w-16 h-16 text-zinc-600 mb-4".to_string(),
                        }
                        p { class: "text-zinc-400", "The queue is empty" }
                        Link {
                            to: Route::SongListView {},
                            class: "text-emerald-400 text-sm mt-2",
                            "Pick a song"
                        }
                    }
                },
                Some(items) => rsx! {
                    div { class: "bg-zinc-800/30 rounded-2xl border border-zinc-700/30 overflow-hidden divide-y divide-zinc-800/50",
                        for item in items {
                            SongTile {
                                key: "{item.qid}",
                                title: item.title().to_string(),
                                artist: item.artist().to_string(),
                                cover_url: client.cover_url(item.id, COVER_SIZE_LIST),
                                to: Route::for_queue_item(item.idx, item.qid),
                                highlight: item.idx == 0,
                            }
                        }
                    }
                },
            }
        }
    }
}
