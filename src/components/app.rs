use crate::components::{use_client, Icon};
use crate::config::LANGUAGES;
use crate::prefs::{save_prefs, DisplayPrefs};
use crate::routes::{Route, Tab};
use dioxus::logger::tracing::{debug, warn};
use dioxus::prelude::*;

fn language_label(code: &str) -> &'static str {
    match code {
        "en-gb" => "English",
        "es-es" => "Español",
        "ja-jp" => "日本語",
        "de-de" => "Deutsch",
        "es-eu" => "Euskara",
        "fr-fr" => "Français",
        _ => "Unknown",
    }
}

fn persist(prefs: &DisplayPrefs) {
    if let Err(err) = save_prefs(prefs) {
        warn!("saving display preferences failed: {err}");
    }
}

/// Server-rendered strings change with the language, so the web build starts
/// over from a clean page.
#[cfg(target_arch = "wasm32")]
fn reload_page() {
    if let Some(window) = web_sys::window() {
        if let Err(err) = window.location().reload() {
            warn!("page reload failed: {err:?}");
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn reload_page() {}

#[component]
pub fn AppShell() -> Element {
    let client = use_client();
    let mut prefs = use_context::<Signal<DisplayPrefs>>();
    let tab = Tab::of(&use_route::<Route>());

    // The browser already holds the language and latin cookies. A native
    // cookie jar starts empty, so the saved choice is pushed before any view
    // loads.
    let mut ready = use_signal(|| cfg!(target_arch = "wasm32"));
    {
        let client = client.clone();
        use_hook(move || {
            if *ready.peek() {
                return;
            }
            let saved = prefs.peek().clone();
            spawn(async move {
                if let Err(err) = client.set_language(&saved.lang).await {
                    warn!("restoring language failed: {err}");
                }
                if let Err(err) = client.set_latin(saved.latin).await {
                    warn!("restoring latin mode failed: {err}");
                }
                debug!(lang = %saved.lang, latin = saved.latin, "display preferences restored");
                ready.set(true);
            });
        })
    }

    let on_language = {
        let client = client.clone();
        move |evt: FormEvent| {
            let lang = evt.value();
            if !LANGUAGES.contains(&lang.as_str()) || prefs.peek().lang == lang {
                return;
            }
            let client = client.clone();
            spawn(async move {
                match client.set_language(&lang).await {
                    Ok(()) => {
                        prefs.with_mut(|current| current.lang = lang);
                        persist(&prefs.peek());
                        reload_page();
                    }
                    Err(err) => warn!("changing language failed: {err}"),
                }
            });
        }
    };

    let on_latin = {
        let client = client.clone();
        move |_| {
            let latin = !prefs.peek().latin;
            let client = client.clone();
            spawn(async move {
                match client.set_latin(latin).await {
                    Ok(()) => {
                        prefs.with_mut(|current| current.latin = latin);
                        persist(&prefs.peek());
                    }
                    Err(err) => warn!("toggling latin mode failed: {err}"),
                }
            });
        }
    };

    let current = prefs();

    rsx! {
        div { class: "app-container min-h-screen flex flex-col bg-zinc-950 text-white",
            header { class: "sticky top-0 z-20 border-b border-zinc-800/60 bg-zinc-950/80 backdrop-blur-xl",
                div { class: "flex items-center justify-between gap-4 px-4 py-3 max-w-3xl mx-auto w-full",
                    div { class: "flex items-center gap-3",
                        div { class: "w-9 h-9 rounded-xl bg-gradient-to-br from-emerald-500 to-teal-600 flex items-center justify-center text-white font-bold shadow-lg shadow-emerald-500/20",
                            "K"
                        }
                        span { class: "text-sm font-semibold", "Karaoke Remote" }
                    }
                    div { class: "flex items-center gap-2",
                        select {
                            class: "bg-zinc-900 border border-zinc-700 rounded-lg px-2 py-1 text-sm",
                            aria_label: "Language",
                            value: "{current.lang}",
                            onchange: on_language,
                            for code in LANGUAGES {
                                option {
                                    key: "{code}",
                                    value: "{code}",
                                    selected: current.lang == code,
                                    "{language_label(code)}"
                                }
                            }
                        }
                        button {
                            r#type: "button",
                            class: if current.latin { "px-2 py-1 rounded-lg text-sm bg-emerald-500/20 text-emerald-300" } else { "px-2 py-1 rounded-lg text-sm bg-zinc-900 text-zinc-400 hover:text-white" },
                            aria_pressed: "{current.latin}",
                            title: "Show titles in latin script",
                            onclick: on_latin,
                            "Aa"
                        }
                    }
                }
                nav { class: "flex gap-1 px-2 pb-2 max-w-3xl mx-auto w-full",
                    TabLink {
                        to: Route::SongListView {},
                        icon: "music",
                        label: "Songs",
                        active: tab == Tab::Songs,
                    }
                    TabLink {
                        to: Route::QueueListView {},
                        icon: "queue",
                        label: "Queue",
                        active: tab == Tab::Queue,
                    }
                    TabLink {
                        to: Route::now_playing(),
                        icon: "play",
                        label: "Now playing",
                        active: tab == Tab::NowPlaying,
                    }
                    TabLink {
                        to: Route::SettingsView {},
                        icon: "settings",
                        label: "Settings",
                        active: tab == Tab::Settings,
                    }
                }
            }

            main { class: "flex-1 overflow-y-auto",
                div { class: "page-shell max-w-3xl mx-auto w-full px-4 py-6",
                    if ready() {
                        Outlet::<Route> {}
                    } else {
                        div { class: "flex justify-center py-20",
                            Icon {
                                name: "loader".to_string(),
                                class: "w-8 h-8 text-zinc-500".to_string(),
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn TabLink(to: Route, icon: String, label: String, active: bool) -> Element {
    let base_class = "flex-1 flex items-center justify-center gap-2 px-3 py-2 rounded-xl text-sm font-medium transition-all duration-200";
    let active_class = if active {
        "bg-gradient-to-r from-emerald-500/20 to-teal-500/10 text-emerald-400 shadow-sm"
    } else {
        "text-zinc-400 hover:text-white hover:bg-zinc-800/50"
    };

    rsx! {
        Link { to, class: "{base_class} {active_class}",
            Icon { name: icon.clone(), class: "w-5 h-5".to_string() }
            span { class: "hidden sm:inline", "{label}" }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_language_has_a_label() {
        for code in LANGUAGES {
            assert_ne!(language_label(code), "Unknown", "{code}");
        }
    }
}
