use crate::api::*;
use crate::components::{use_client, use_display_change, use_poll, Icon, PlaybackEditor};
use crate::config::COVER_SIZE_DETAIL;
use crate::routes::Route;
use crate::sync::{Refresh, SyncSession};
use dioxus::logger::tracing::{debug, warn};
use dioxus::prelude::*;
use dioxus::router::Navigator;

const SEEK_STEP_SECONDS: f64 = 10.0;

/// How the user reached a queue entry; decides where removal leads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryOrigin {
    QueueList,
    NewlyAdded,
}

/// An entry opened by qid that turns out to be playing is shown as "now".
fn redirect_after_fetch(qref: QueueRef, entry: &QueueEntry) -> Option<Route> {
    match qref {
        QueueRef::Qid(_) if entry.is_now_playing() => Some(Route::now_playing()),
        _ => None,
    }
}

/// `None` means stay and refresh: "now" moves on to the next entry.
fn after_removal(qref: QueueRef, origin: EntryOrigin, song_id: u32) -> Option<Route> {
    match (qref, origin) {
        (QueueRef::Now, _) => None,
        (_, EntryOrigin::QueueList) => Some(Route::QueueListView {}),
        (_, EntryOrigin::NewlyAdded) => Some(Route::SongDetailView { song_id }),
    }
}

fn back_target(origin: EntryOrigin) -> (Route, &'static str) {
    match origin {
        EntryOrigin::QueueList => (Route::QueueListView {}, "Queue"),
        EntryOrigin::NewlyAdded => (Route::SongListView {}, "Songs"),
    }
}

type EntrySession = SyncSession<QueueEntryEndpoint>;

fn apply_entry_refresh(
    refresh: Refresh<QueueEntry>,
    qref: QueueRef,
    mut entry: Signal<Option<QueueEntry>>,
    nav: Navigator,
) {
    match refresh {
        Refresh::Fresh(fresh) => {
            if let Some(target) = redirect_after_fetch(qref, &fresh) {
                nav.replace(target);
                return;
            }
            entry.set(Some(fresh));
        }
        Refresh::Skipped => debug!(%qref, "write in flight, skipping entry refresh"),
        Refresh::Stale => debug!(%qref, "dropping stale entry response"),
        Refresh::Failed(err) => {
            warn!(%qref, "queue entry fetch failed: {err}");
            nav.push(Route::QueueListView {});
        }
    }
}

async fn refresh_entry(
    session: EntrySession,
    qref: QueueRef,
    entry: Signal<Option<QueueEntry>>,
    nav: Navigator,
) {
    let refresh = session.refresh().await;
    apply_entry_refresh(refresh, qref, entry, nav);
}

async fn write_entry(
    session: EntrySession,
    qref: QueueRef,
    entry: Signal<Option<QueueEntry>>,
    nav: Navigator,
) {
    if let Err(resync) = session.write_or_resync(move || entry.peek().clone()).await {
        warn!(%qref, "queue entry update failed: {}", resync.error);
        apply_entry_refresh(resync.refresh, qref, entry, nav);
    }
}

#[component]
pub fn QueueEntryView(qid: QueueRef) -> Element {
    rsx! {
        QueueEntryPage { key: "{qid}", qref: qid, origin: EntryOrigin::QueueList }
    }
}

#[component]
pub fn NewQueueEntryView(qid: u64) -> Element {
    rsx! {
        QueueEntryPage {
            key: "new-{qid}",
            qref: QueueRef::Qid(qid),
            origin: EntryOrigin::NewlyAdded,
        }
    }
}

#[component]
fn QueueEntryPage(qref: QueueRef, origin: EntryOrigin) -> Element {
    let client = use_client();
    let nav = navigator();
    let session = {
        let client = client.clone();
        use_hook(move || SyncSession::new(QueueEntryEndpoint::new(client, qref)))
    };
    let mut entry = use_signal(|| None::<QueueEntry>);
    let mut removing = use_signal(|| false);

    {
        let session = session.clone();
        use_poll(move || refresh_entry(session.clone(), qref, entry, nav));
    }
    {
        let session = session.clone();
        use_display_change(move || {
            spawn(refresh_entry(session.clone(), qref, entry, nav));
        });
    }

    let on_remove = {
        let client = client.clone();
        let session = session.clone();
        move |_| {
            if removing() {
                return;
            }
            let Some(current) = entry.peek().clone() else {
                return;
            };
            let client = client.clone();
            let session = session.clone();
            removing.set(true);
            spawn(async move {
                match client.remove_from_queue(current.qid).await {
                    Ok(()) => match after_removal(qref, origin, current.id) {
                        Some(target) => {
                            nav.push(target);
                        }
                        None => refresh_entry(session, qref, entry, nav).await,
                    },
                    Err(err) => {
                        warn!(qid = current.qid, "removing from queue failed: {err}");
                        refresh_entry(session, qref, entry, nav).await;
                    }
                }
                removing.set(false);
            });
        }
    };

    let seek = {
        let client = client.clone();
        move |request: SeekRequest| {
            let client = client.clone();
            spawn(async move {
                if let Err(err) = client.seek(request).await {
                    warn!("seek failed: {err}");
                }
            });
        }
    };

    let (back_route, back_label) = back_target(origin);
    let Some(current) = entry() else {
        return rsx! {
            div { class: "flex justify-center py-20",
                Icon {
                    name: "loader".to_string(),
                    class: "w-8 h-8 text-zinc-500".to_string(),
                }
            }
        };
    };
    let cover_url = client.cover_url(current.id, COVER_SIZE_DETAIL);
    let now_playing = current.is_now_playing();

    rsx! {
        div { class: "space-y-8 max-w-2xl",
            Link {
                to: back_route,
                class: "inline-flex items-center gap-2 text-sm text-zinc-400 hover:text-white",
                Icon {
                    name: "arrow-left".to_string(),
                    class: "w-4 h-4".to_string(),
                }
                "{back_label}"
            }

            header { class: "flex items-center gap-6",
                img {
                    class: "w-32 h-32 rounded-2xl bg-zinc-800 object-cover shadow-lg",
                    src: "{cover_url}",
                    alt: "",
                }
                div { class: "min-w-0",
                    if now_playing {
                        p { class: "text-xs uppercase tracking-wider text-emerald-400", "Now playing" }
                    } else {
                        p { class: "text-xs uppercase tracking-wider text-zinc-500",
                            "Position {current.idx}"
                        }
                    }
                    h1 { class: "page-title truncate", "{current.title()}" }
                    p { class: "text-zinc-400 truncate", "{current.artist()}" }
                }
            }

            if now_playing {
                div { class: "flex items-center gap-3",
                    button {
                        r#type: "button",
                        class: "p-3 rounded-xl bg-zinc-800 text-zinc-300 hover:text-white",
                        title: "Restart",
                        onclick: {
                            let seek = seek.clone();
                            move |_| seek(SeekRequest::Position(0.0))
                        },
                        Icon {
                            name: "restart".to_string(),
                            class: "w-5 h-5".to_string(),
                        }
                    }
                    button {
                        r#type: "button",
                        class: "p-3 rounded-xl bg-zinc-800 text-zinc-300 hover:text-white",
                        title: "Back {SEEK_STEP_SECONDS}s",
                        onclick: {
                            let seek = seek.clone();
                            move |_| seek(SeekRequest::Offset(-SEEK_STEP_SECONDS))
                        },
                        Icon {
                            name: "rewind".to_string(),
                            class: "w-5 h-5".to_string(),
                        }
                    }
                    button {
                        r#type: "button",
                        class: "p-3 rounded-xl bg-zinc-800 text-zinc-300 hover:text-white",
                        title: "Forward {SEEK_STEP_SECONDS}s",
                        onclick: {
                            let seek = seek.clone();
                            move |_| seek(SeekRequest::Offset(SEEK_STEP_SECONDS))
                        },
                        Icon {
                            name: "forward".to_string(),
                            class: "w-5 h-5".to_string(),
                        }
                    }
                }
            }

            PlaybackEditor {
                variants: current.variants.clone(),
                channels: current.channels,
                config: current.config.clone(),
                on_change: {
                    let session = session.clone();
                    move |next: PlaybackConfig| {
                        let needs_write = entry
                            .write()
                            .as_mut()
                            .is_some_and(|local| session.edit(local, |local| local.config = next));
                        if needs_write {
                            spawn(write_entry(session.clone(), qref, entry, nav));
                        }
                    }
                },
            }

            button {
                r#type: "button",
                class: "px-5 py-3 rounded-xl bg-red-500/15 hover:bg-red-500/25 text-red-300 font-semibold flex items-center gap-2 disabled:opacity-50",
                disabled: removing(),
                onclick: on_remove,
                Icon {
                    name: "trash".to_string(),
                    class: "w-5 h-5".to_string(),
                }
                "Remove from queue"
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn entry_at(idx: usize) -> QueueEntry {
        QueueEntry {
            idx,
            id: 7,
            qid: 40,
            meta: BTreeMap::new(),
            variants: Vec::new(),
            channels: 1,
            config: PlaybackConfig::default(),
        }
    }

    #[test]
    fn entry_reached_by_qid_becomes_now_when_it_starts_playing() {
        assert_eq!(
            redirect_after_fetch(QueueRef::Qid(40), &entry_at(0)),
            Some(Route::now_playing())
        );
        assert_eq!(redirect_after_fetch(QueueRef::Qid(40), &entry_at(2)), None);
        assert_eq!(redirect_after_fetch(QueueRef::Now, &entry_at(0)), None);
    }

    #[test]
    fn removal_destination_depends_on_how_the_entry_was_reached() {
        assert_eq!(after_removal(QueueRef::Now, EntryOrigin::QueueList, 7), None);
        assert_eq!(
            after_removal(QueueRef::Qid(40), EntryOrigin::QueueList, 7),
            Some(Route::QueueListView {})
        );
        assert_eq!(
            after_removal(QueueRef::Qid(40), EntryOrigin::NewlyAdded, 7),
            Some(Route::SongDetailView { song_id: 7 })
        );
    }
}
