//! Draggable integer slider with a zero-anchored fill.

#[cfg(target_arch = "wasm32")]
mod drag_web;
pub mod geometry;
pub mod session;

use dioxus::prelude::*;
use geometry::{chunk_span, position_percent, value_label};
use session::SliderBinding;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicUsize, Ordering};

static NEXT_SLIDER_ID: AtomicUsize = AtomicUsize::new(0);

/// DOM ids of the parts the drag code needs to find.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SliderIds {
    pub outer: String,
    pub track: String,
    pub knob: String,
}

impl SliderIds {
    fn next() -> Self {
        let n = NEXT_SLIDER_ID.fetch_add(1, Ordering::Relaxed);
        Self {
            outer: format!("slider-{n}"),
            track: format!("slider-{n}-track"),
            knob: format!("slider-{n}-knob"),
        }
    }
}

#[component]
pub fn Slider(
    label: String,
    value: i32,
    min: i32,
    max: i32,
    #[props(default)]
    plus: bool,
    on_change: EventHandler<i32>,
) -> Element {
    let ids = use_hook(SliderIds::next);
    let binding = use_hook(|| Rc::new(RefCell::new(SliderBinding { value, min, max })));
    // External changes must reach listeners that were armed on an earlier render.
    *binding.borrow_mut() = SliderBinding { value, min, max };

    #[cfg(target_arch = "wasm32")]
    {
        let armed = use_hook(|| Rc::new(RefCell::new(None::<drag_web::ArmedSlider>)));
        {
            let armed = armed.clone();
            let ids = ids.clone();
            let binding = binding.clone();
            use_effect(move || {
                if armed.borrow().is_none() {
                    let slider = drag_web::arm(&ids, binding.clone(), on_change);
                    *armed.borrow_mut() = slider;
                }
            });
        }
        use_drop(move || {
            armed.borrow_mut().take();
        });
    }

    let knob_left = position_percent(value, min, max);
    let chunk = chunk_span(value, min, max);
    let shown = value_label(value, plus);
    // Renderers without a DOM get a native range input layered over the track.
    let native_input = !cfg!(target_arch = "wasm32");

    rsx! {
        div { class: "slider",
            div { class: "label", "{label}" }
            div { class: "value",
                div {
                    div { "{shown}" }
                }
            }
            div { class: "outer", id: "{ids.outer}",
                div { class: "bar", id: "{ids.track}",
                    div {
                        class: "chunk",
                        style: "left: {chunk.left}%; width: {chunk.width}%;",
                    }
                    div {
                        class: "knob",
                        id: "{ids.knob}",
                        style: "left: {knob_left}%;",
                    }
                }
                if native_input {
                    input {
                        r#type: "range",
                        class: "slider-native-input",
                        min: "{min}",
                        max: "{max}",
                        step: "1",
                        value: "{value}",
                        oninput: move |evt: FormEvent| {
                            if let Ok(next) = evt.value().parse::<i32>() {
                                if next != value {
                                    on_change.call(next.clamp(min.min(max), max.max(min)));
                                }
                            }
                        },
                    }
                }
            }
        }
    }
}
