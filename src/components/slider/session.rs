use super::geometry::{pointer_fraction, value_at};
use dioxus::logger::tracing::debug;
use std::fmt::Debug;

/// Which kind of input a slider listens to. Only one is ever armed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragSource {
    Touch,
    Mouse,
}

impl DragSource {
    pub fn detect(supports_touch: bool) -> Self {
        if supports_touch {
            DragSource::Touch
        } else {
            DragSource::Mouse
        }
    }
}

/// Guards a touch drag: one finger, one session at a time.
#[derive(Debug, Default, Clone, Copy)]
pub struct TouchSession {
    active: bool,
}

impl TouchSession {
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Returns `false` when a session is already running.
    pub fn begin(&mut self) -> bool {
        if self.active {
            return false;
        }
        self.active = true;
        true
    }

    pub fn accepts_move(&self, touch_count: u32) -> bool {
        self.active && touch_count <= 1
    }

    pub fn end(&mut self) {
        self.active = false;
    }
}

/// What a drag needs to know about the slider it moves. Refreshed on every
/// render so long-lived listeners always see current props.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderBinding {
    pub value: i32,
    pub min: i32,
    pub max: i32,
}

impl SliderBinding {
    /// New value for a pointer at `pointer_x`, or `None` when unchanged.
    pub fn drag_to(&mut self, pointer_x: f64, track_left: f64, track_width: f64) -> Option<i32> {
        let fraction = pointer_fraction(pointer_x, track_left, track_width);
        let next = value_at(fraction, self.min, self.max);
        if next == self.value {
            return None;
        }
        self.value = next;
        Some(next)
    }
}

/// Records a listener only when registering it succeeded, so detaching never
/// targets a listener the DOM refused.
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
pub fn keep_registered<T, E: Debug>(
    registered: &mut Vec<T>,
    event: &str,
    listener: T,
    result: Result<(), E>,
) -> bool {
    match result {
        Ok(()) => {
            registered.push(listener);
            true
        }
        Err(err) => {
            debug!(event, ?err, "listener registration failed");
            false
        }
    }
}
