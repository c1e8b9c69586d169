use crate::api::{PlaybackConfig, Variant, MAX_CHANNEL_LEVEL};
use crate::components::{Icon, Slider};
use dioxus::prelude::*;

/// Semitones either way for speed and pitch.
const SHIFT_RANGE: i32 = 12;

fn channel_label(channel: usize, channel_count: u32) -> String {
    match (channel_count, channel) {
        (1, _) => "Vocals".to_string(),
        (_, 0) => "Vocals".to_string(),
        (_, n) => format!("Channel {}", n + 1),
    }
}

/// Controls for one song's playback config. Every change hands a complete new
/// config to `on_change`; the owner decides whether it is synced or kept local.
#[component]
pub fn PlaybackEditor(
    variants: Vec<Variant>,
    channels: u32,
    config: PlaybackConfig,
    on_change: EventHandler<PlaybackConfig>,
) -> Element {
    let selected = variants.get(config.variant).cloned();
    let paused = config.pause;

    rsx! {
        div { class: "playback-editor space-y-5",
            if variants.len() > 1 {
                div { class: "flex flex-wrap gap-2",
                    for (index , variant) in variants.iter().enumerate() {
                        {
                            let active = index == config.variant;
                            let config = config.clone();
                            rsx! {
                                button {
                                    key: "{variant.id}",
                                    r#type: "button",
                                    class: if active { "px-3 py-1.5 rounded-xl bg-emerald-500/20 text-emerald-300 text-sm" } else { "px-3 py-1.5 rounded-xl bg-zinc-800 text-zinc-300 hover:text-white text-sm" },
                                    onclick: move |_| {
                                        if !active {
                                            let mut next = config.clone();
                                            next.variant = index;
                                            on_change.call(next);
                                        }
                                    },
                                    "{variant.name}"
                                }
                            }
                        }
                    }
                }
            }

            if let Some(snippet) = selected.and_then(|variant| variant.snippet) {
                p { class: "snippet text-sm text-zinc-400 italic whitespace-pre-line", "{snippet}" }
            }

            for channel in 0..channels as usize {
                {
                    let config = config.clone();
                    rsx! {
                        Slider {
                            key: "channel-{channel}",
                            label: channel_label(channel, channels),
                            value: config.channel_level(channel),
                            min: 0,
                            max: MAX_CHANNEL_LEVEL,
                            on_change: move |level: i32| {
                                let mut next = config.clone();
                                next.set_channel_level(channel, level);
                                on_change.call(next);
                            },
                        }
                    }
                }
            }

            Slider {
                label: "Speed".to_string(),
                value: config.speed,
                min: -SHIFT_RANGE,
                max: SHIFT_RANGE,
                plus: true,
                on_change: {
                    let config = config.clone();
                    move |speed: i32| {
                        let mut next = config.clone();
                        next.speed = speed;
                        on_change.call(next);
                    }
                },
            }

            Slider {
                label: "Pitch".to_string(),
                value: config.pitch,
                min: -SHIFT_RANGE,
                max: SHIFT_RANGE,
                plus: true,
                on_change: {
                    let config = config.clone();
                    move |pitch: i32| {
                        let mut next = config.clone();
                        next.pitch = pitch;
                        on_change.call(next);
                    }
                },
            }

            button {
                r#type: "button",
                class: if paused { "px-4 py-2 rounded-xl bg-amber-500/20 text-amber-300 flex items-center gap-2" } else { "px-4 py-2 rounded-xl bg-zinc-800 text-zinc-300 hover:text-white flex items-center gap-2" },
                onclick: {
                    let config = config.clone();
                    move |_| {
                        let mut next = config.clone();
                        next.pause = !next.pause;
                        on_change.call(next);
                    }
                },
                Icon {
                    name: if paused { "play".to_string() } else { "pause".to_string() },
                    class: "w-4 h-4".to_string(),
                }
                if paused {
                    "Resume"
                } else {
                    "Pause"
                }
            }
        }
    }
}
