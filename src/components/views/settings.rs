use crate::api::*;
use crate::components::{use_client, use_poll, Icon, Slider};
use crate::sync::{Refresh, SyncSession};
use dioxus::logger::tracing::{debug, warn};
use dioxus::prelude::*;

type SettingsSession = SyncSession<SettingsEndpoint>;

fn apply_settings_refresh(refresh: Refresh<Settings>, mut settings: Signal<Option<Settings>>) {
    match refresh {
        Refresh::Fresh(fresh) => settings.set(Some(fresh)),
        Refresh::Skipped => debug!("write in flight, skipping settings refresh"),
        Refresh::Stale => debug!("dropping stale settings response"),
        Refresh::Failed(err) => warn!("settings fetch failed: {err}"),
    }
}

async fn refresh_settings(session: SettingsSession, settings: Signal<Option<Settings>>) {
    let refresh = session.refresh().await;
    apply_settings_refresh(refresh, settings);
}

async fn write_settings(session: SettingsSession, settings: Signal<Option<Settings>>) {
    if let Err(resync) = session.write_or_resync(move || settings.peek().clone()).await {
        warn!("settings update failed: {}", resync.error);
        apply_settings_refresh(resync.refresh, settings);
    }
}

/// Applies an edit and, if it diverges from the server, starts the writer.
fn edit_settings(
    session: &SettingsSession,
    mut settings: Signal<Option<Settings>>,
    edit: impl FnOnce(&mut Settings),
) {
    let needs_write = settings
        .write()
        .as_mut()
        .is_some_and(|local| session.edit(local, edit));
    if needs_write {
        spawn(write_settings(session.clone(), settings));
    }
}

#[derive(Clone, Copy)]
struct SettingField {
    label: &'static str,
    get: fn(&Settings) -> i32,
    set: fn(&mut Settings, i32),
}

const FIELDS: [SettingField; 5] = [
    SettingField {
        label: "Volume",
        get: |s| s.volume,
        set: |s, v| s.volume = v,
    },
    SettingField {
        label: "Headstart",
        get: |s| s.headstart,
        set: |s, v| s.headstart = v,
    },
    SettingField {
        label: "Mic volume",
        get: |s| s.mic_volume,
        set: |s, v| s.mic_volume = v,
    },
    SettingField {
        label: "Mic feedback",
        get: |s| s.mic_feedback,
        set: |s, v| s.mic_feedback = v,
    },
    SettingField {
        label: "Mic delay",
        get: |s| s.mic_delay,
        set: |s, v| s.mic_delay = v,
    },
];

#[component]
pub fn SettingsView() -> Element {
    let client = use_client();
    let session = use_hook(move || SyncSession::new(SettingsEndpoint::new(client)));
    let settings = use_signal(|| None::<Settings>);

    {
        let session = session.clone();
        use_poll(move || refresh_settings(session.clone(), settings));
    }

    let on_reset = {
        let session = session.clone();
        move |_| edit_settings(&session, settings, Settings::reset_to_defaults)
    };

    rsx! {
        div { class: "space-y-8 max-w-2xl",
            header { class: "page-header",
                h1 { class: "page-title", "Settings" }
                p { class: "page-subtitle", "Shared by everyone at the party" }
            }

            match settings() {
                None => rsx! {
                    div { class: "flex justify-center py-20",
                        Icon {
                            name: "loader".to_string(),
                            class: "w-8 h-8 text-zinc-500".to_string(),
                        }
                    }
                },
                Some(current) => rsx! {
                    section { class: "bg-zinc-800/30 rounded-2xl border border-zinc-700/30 p-6 space-y-5",
                        for field in FIELDS {
                            Slider {
                                key: "{field.label}",
                                label: field.label.to_string(),
                                value: (field.get)(&current),
                                min: 0,
                                max: 100,
                                on_change: {
                                    let session = session.clone();
                                    move |value: i32| {
                                        edit_settings(&session, settings, |local| (field.set)(local, value));
                                    }
                                },
                            }
                        }
                    }
                    button {
                        r#type: "button",
                        class: "px-4 py-2 rounded-xl bg-zinc-800 text-zinc-300 hover:text-white flex items-center gap-2",
                        onclick: on_reset,
                        Icon {
                            name: "restart".to_string(),
                            class: "w-4 h-4".to_string(),
                        }
                        "Reset to defaults"
                    }
                },
            }
        }
    }
}
