// Browser drag handling: listeners on the knob/track arm a session, listeners on
// the whole document follow the pointer until release.
use super::session::{keep_registered, DragSource, SliderBinding, TouchSession};
use super::SliderIds;
use dioxus::core::{Runtime, RuntimeGuard};
use dioxus::logger::tracing::debug;
use dioxus::prelude::*;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, Event, MouseEvent, TouchEvent};

type Handler = Closure<dyn FnMut(Event)>;

fn handler(f: impl FnMut(Event) + 'static) -> Handler {
    Closure::wrap(Box::new(f) as Box<dyn FnMut(Event)>)
}

fn function_of(handler: &Handler) -> js_sys::Function {
    handler.as_ref().unchecked_ref::<js_sys::Function>().clone()
}

pub(super) fn supports_touch() -> bool {
    web_sys::window()
        .and_then(|w| w.document())
        .map(|doc| js_sys::Reflect::has(&doc, &JsValue::from_str("ontouchend")).unwrap_or(false))
        .unwrap_or(false)
}

/// Listeners currently attached to the document for a running drag.
#[derive(Clone)]
struct DocumentListeners {
    document: Document,
    attached: Rc<RefCell<Vec<(&'static str, js_sys::Function)>>>,
}

impl DocumentListeners {
    fn attach(&self, listeners: &[(&'static str, &js_sys::Function)]) {
        let mut attached = self.attached.borrow_mut();
        for (event, callback) in listeners {
            let result = self
                .document
                .add_event_listener_with_callback(event, callback);
            keep_registered(&mut *attached, event, (*event, (*callback).clone()), result);
        }
    }

    fn detach_all(&self) {
        for (event, callback) in self.attached.borrow_mut().drain(..) {
            let _ = self
                .document
                .remove_event_listener_with_callback(event, &callback);
        }
    }
}

/// Keeps a slider's listeners alive; dropping it unhooks everything.
pub(super) struct ArmedSlider {
    element_listeners: Vec<(Element, &'static str, js_sys::Function)>,
    document_listeners: DocumentListeners,
    _handlers: Vec<Handler>,
}

impl Drop for ArmedSlider {
    fn drop(&mut self) {
        for (element, event, callback) in self.element_listeners.drain(..) {
            let _ = element.remove_event_listener_with_callback(event, &callback);
        }
        self.document_listeners.detach_all();
    }
}

pub(super) fn arm(
    ids: &SliderIds,
    binding: Rc<RefCell<SliderBinding>>,
    on_change: EventHandler<i32>,
) -> Option<ArmedSlider> {
    let document = web_sys::window()?.document()?;
    let knob = document.get_element_by_id(&ids.knob)?;
    let outer = document.get_element_by_id(&ids.outer)?;

    let runtime = Runtime::current();
    let update: Rc<dyn Fn(f64)> = {
        let document = document.clone();
        let track_id = ids.track.clone();
        Rc::new(move |pointer_x: f64| {
            let Some(track) = document.get_element_by_id(&track_id) else {
                return;
            };
            let rect = track.get_bounding_client_rect();
            let changed = binding
                .borrow_mut()
                .drag_to(pointer_x, rect.left(), rect.width());
            if let Some(value) = changed {
                let _guard = RuntimeGuard::new(runtime.clone());
                on_change.call(value);
            }
        })
    };

    let document_listeners = DocumentListeners {
        document,
        attached: Rc::new(RefCell::new(Vec::new())),
    };

    let source = DragSource::detect(supports_touch());
    debug!(slider = %ids.outer, ?source, "arming slider");

    let mut armed = ArmedSlider {
        element_listeners: Vec::new(),
        document_listeners: document_listeners.clone(),
        _handlers: Vec::new(),
    };

    match source {
        DragSource::Mouse => {
            let on_move = {
                let update = update.clone();
                handler(move |event: Event| {
                    if let Some(event) = event.dyn_ref::<MouseEvent>() {
                        update(event.client_x() as f64);
                    }
                })
            };
            let on_up = {
                let listeners = document_listeners.clone();
                handler(move |_event: Event| listeners.detach_all())
            };
            let on_down = {
                let listeners = document_listeners.clone();
                let move_fn = function_of(&on_move);
                let up_fn = function_of(&on_up);
                handler(move |event: Event| {
                    event.prevent_default();
                    listeners.detach_all();
                    listeners.attach(&[("mouseup", &up_fn), ("mousemove", &move_fn)]);
                })
            };
            armed.listen(&knob, "mousedown", &on_down);
            armed._handlers.extend([on_move, on_up, on_down]);
        }
        DragSource::Touch => {
            let session = Rc::new(Cell::new(TouchSession::default()));
            let on_move = {
                let update = update.clone();
                let session = session.clone();
                handler(move |event: Event| {
                    let Some(event) = event.dyn_ref::<TouchEvent>() else {
                        return;
                    };
                    let touches = event.touches();
                    if !session.get().accepts_move(touches.length()) {
                        return;
                    }
                    if let Some(touch) = touches.get(0) {
                        update(touch.client_x() as f64);
                    }
                })
            };
            let on_end = {
                let listeners = document_listeners.clone();
                let session = session.clone();
                handler(move |_event: Event| {
                    let mut state = session.get();
                    state.end();
                    session.set(state);
                    listeners.detach_all();
                })
            };
            let on_start = {
                let listeners = document_listeners.clone();
                let session = session.clone();
                let move_fn = function_of(&on_move);
                let end_fn = function_of(&on_end);
                handler(move |event: Event| {
                    let mut state = session.get();
                    if !state.begin() {
                        return;
                    }
                    session.set(state);
                    event.prevent_default();
                    listeners.attach(&[
                        ("touchend", &end_fn),
                        ("touchmove", &move_fn),
                        ("touchcancel", &end_fn),
                    ]);
                    if let Some(touch) = event
                        .dyn_ref::<TouchEvent>()
                        .and_then(|event| event.touches().get(0))
                    {
                        update(touch.client_x() as f64);
                    }
                })
            };
            armed.listen(&knob, "touchstart", &on_start);
            armed.listen(&outer, "touchstart", &on_start);
            armed._handlers.extend([on_move, on_end, on_start]);
        }
    }

    Some(armed)
}

impl ArmedSlider {
    fn listen(&mut self, element: &Element, event: &'static str, handler: &Handler) {
        let callback = function_of(handler);
        let result = element.add_event_listener_with_callback(event, &callback);
        keep_registered(
            &mut self.element_listeners,
            event,
            (element.clone(), event, callback),
            result,
        );
    }
}
