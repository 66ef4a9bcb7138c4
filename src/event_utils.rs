use gloo::events::{EventListener, EventListenerOptions};
use kurbo::Point;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, EventTarget, MouseEvent, TouchEvent};

use crate::application::PointerInput;
use crate::infrastructure::rendering::svg_tree::SEGMENT_ID_ATTR;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PointerPhase {
    Down,
    Move,
    Up,
    Cancel,
}

/// Mouse and touch share the same phases.
const POINTER_EVENTS: [(&str, PointerPhase); 7] = [
    ("mousedown", PointerPhase::Down),
    ("mousemove", PointerPhase::Move),
    ("mouseup", PointerPhase::Up),
    ("touchstart", PointerPhase::Down),
    ("touchmove", PointerPhase::Move),
    ("touchend", PointerPhase::Up),
    ("touchcancel", PointerPhase::Cancel),
];

/// Keeps DOM listeners attached; dropping it detaches them.
#[must_use = "listeners are removed when the handle is dropped"]
pub struct ListenerHandle {
    listeners: Vec<EventListener>,
}

impl ListenerHandle {
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

/// Client position of a mouse event, or of the primary touch.
pub fn pointer_point(event: &Event) -> Option<Point> {
    if let Some(mouse) = event.dyn_ref::<MouseEvent>() {
        return Some(Point::new(mouse.client_x() as f64, mouse.client_y() as f64));
    }
    let touch = event.dyn_ref::<TouchEvent>()?.touches().get(0)?;
    Some(Point::new(touch.client_x() as f64, touch.client_y() as f64))
}

fn pointer_input(phase: PointerPhase, event: &Event) -> Option<PointerInput> {
    match phase {
        PointerPhase::Down => pointer_point(event).map(PointerInput::Down),
        PointerPhase::Move => pointer_point(event).map(PointerInput::Move),
        PointerPhase::Up => Some(PointerInput::Up),
        PointerPhase::Cancel => Some(PointerInput::Cancel),
    }
}

/// Feed mouse and touch input on `target` to `handler`. Listeners are not
/// passive: moves never scroll the page and a mouse press never starts a text
/// selection. Touch start and end keep their default so taps still click.
pub fn listen_pointer<F>(target: &EventTarget, handler: F) -> ListenerHandle
where
    F: Fn(PointerInput) + Clone + 'static,
{
    let options = EventListenerOptions::enable_prevent_default();
    let listeners = POINTER_EVENTS
        .iter()
        .map(|&(name, phase)| {
            let handler = handler.clone();
            let suppress = phase == PointerPhase::Move || name == "mousedown";
            EventListener::new_with_options(target, name, options, move |event| {
                if suppress {
                    event.prevent_default();
                }
                if let Some(input) = pointer_input(phase, event) {
                    handler(input);
                }
            })
        })
        .collect();
    ListenerHandle { listeners }
}

pub fn parse_segment_id(raw: &str) -> Option<u32> {
    raw.trim().parse().ok().filter(|id| *id > 0)
}

fn segment_id_of(event: &Event) -> Option<u32> {
    let element = event.target()?.dyn_into::<Element>().ok()?;
    let owner = element.closest(&format!("[{}]", SEGMENT_ID_ATTR)).ok()??;
    let raw = owner.get_attribute(SEGMENT_ID_ATTR)?;
    parse_segment_id(&raw)
}

/// One delegated click listener for every segment drawn under `target`, so
/// re-renders never need to rewire listeners.
pub fn listen_segment_clicks<F>(target: &EventTarget, mut handler: F) -> ListenerHandle
where
    F: FnMut(u32) + 'static,
{
    let listener = EventListener::new(target, "click", move |event| {
        if let Some(id) = segment_id_of(event) {
            handler(id);
        }
    });
    ListenerHandle { listeners: vec![listener] }
}
