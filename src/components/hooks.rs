use crate::api::KaraokeClient;
use crate::config::poll_interval;
use crate::prefs::{DisplayPrefs, DisplayWatch};
use crate::sync::{run_poll, PollHandle};
use dioxus::logger::tracing::debug;
use dioxus::prelude::*;
use std::cell::RefCell;
use std::future::Future;
use std::rc::Rc;

pub fn use_client() -> KaraokeClient {
    use_context::<KaraokeClient>()
}

/// Runs `tick` on mount and then on the poll interval until the component
/// unmounts. The handle and the task are both released exactly once.
pub fn use_poll<F, Fut>(tick: F)
where
    F: FnMut() -> Fut + 'static,
    Fut: Future<Output = ()> + 'static,
{
    let handle = use_hook(PollHandle::new);
    let task = {
        let handle = handle.clone();
        use_hook(move || spawn(run_poll(handle, poll_interval(), tick)))
    };
    use_drop(move || {
        if handle.cancel() {
            debug!("poll cancelled");
        }
        task.cancel();
    });
}

/// Calls `on_change` whenever the shared display preferences change after the
/// first render (language or latin mode), so the view can refetch formatted
/// fields.
pub fn use_display_change(mut on_change: impl FnMut() + 'static) {
    let prefs = use_context::<Signal<DisplayPrefs>>();
    let watch = use_hook(|| Rc::new(RefCell::new(DisplayWatch::default())));
    use_effect(move || {
        let current = prefs();
        if watch.borrow_mut().changed(&current) {
            on_change();
        }
    });
}
