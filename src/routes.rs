use crate::api::QueueRef;
use crate::components::views::*;
use crate::components::AppShell;
use dioxus::prelude::*;

#[derive(Routable, Clone, PartialEq, Debug)]
#[rustfmt::skip]
pub enum Route {
    #[layout(AppShell)]
        #[route("/songs")]
        SongListView {},
        #[route("/songs/:song_id")]
        SongDetailView { song_id: u32 },
        #[route("/queue")]
        QueueListView {},
        #[route("/queue/:qid")]
        QueueEntryView { qid: QueueRef },
        #[route("/queue/:qid/new")]
        NewQueueEntryView { qid: u64 },
        #[route("/settings")]
        SettingsView {},
    #[end_layout]
    #[redirect("/", || Route::SongListView {})]
    #[route("/:..segments")]
    NotFound { segments: Vec<String> },
}

impl Route {
    pub fn now_playing() -> Self {
        Route::QueueEntryView { qid: QueueRef::Now }
    }

    /// Where a queue list row links to: the head of the queue is always "now".
    pub fn for_queue_item(idx: usize, qid: u64) -> Self {
        if idx == 0 {
            Route::now_playing()
        } else {
            Route::QueueEntryView {
                qid: QueueRef::Qid(qid),
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Songs,
    Queue,
    NowPlaying,
    Settings,
}

impl Tab {
    pub fn of(route: &Route) -> Self {
        match route {
            Route::SongListView {} | Route::SongDetailView { .. } | Route::NotFound { .. } => {
                Tab::Songs
            }
            Route::QueueEntryView { qid: QueueRef::Now } => Tab::NowPlaying,
            Route::QueueListView {}
            | Route::QueueEntryView { .. }
            | Route::NewQueueEntryView { .. } => Tab::Queue,
            Route::SettingsView {} => Tab::Settings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_resolve_to_views() {
        assert_eq!(
            "/songs/12".parse::<Route>().ok(),
            Some(Route::SongDetailView { song_id: 12 })
        );
        assert_eq!("/queue/now".parse::<Route>().ok(), Some(Route::now_playing()));
        assert_eq!(
            "/queue/4".parse::<Route>().ok(),
            Some(Route::QueueEntryView { qid: QueueRef::Qid(4) })
        );
        assert_eq!(
            "/queue/4/new".parse::<Route>().ok(),
            Some(Route::NewQueueEntryView { qid: 4 })
        );
        assert_eq!("/settings".parse::<Route>().ok(), Some(Route::SettingsView {}));
    }

    #[test]
    fn routes_render_back_to_paths() {
        assert_eq!(Route::now_playing().to_string(), "/queue/now");
        assert_eq!(Route::NewQueueEntryView { qid: 9 }.to_string(), "/queue/9/new");
    }

    #[test]
    fn queue_head_links_to_now_playing() {
        assert_eq!(Route::for_queue_item(0, 31), Route::now_playing());
        assert_eq!(
            Route::for_queue_item(2, 31),
            Route::QueueEntryView { qid: QueueRef::Qid(31) }
        );
    }

    #[test]
    fn tabs_follow_the_route() {
        assert_eq!(Tab::of(&Route::SongDetailView { song_id: 1 }), Tab::Songs);
        assert_eq!(Tab::of(&Route::now_playing()), Tab::NowPlaying);
        assert_eq!(Tab::of(&Route::NewQueueEntryView { qid: 2 }), Tab::Queue);
        assert_eq!(Tab::of(&Route::SettingsView {}), Tab::Settings);
    }
}
