use std::cell::RefCell;
use std::rc::Rc;

use dotplot_wasm::application::{
    DotplotController, PointerInput, SelectionOutcome, use_cases::dataset_from_text,
};
use dotplot_wasm::domain::clipping::Regime;
use dotplot_wasm::domain::config::{RenderConfig, UrlState};
use dotplot_wasm::domain::dotplot::{Direction, ViewBox};
use dotplot_wasm::domain::events::DotplotEvent;
use dotplot_wasm::infrastructure::{MemoryStateStore, RecordingSurface};
use kurbo::Point;

type Controller = DotplotController<RecordingSurface, MemoryStateStore>;

const COORDINATES: &str = "0\n1000\n0\n500\nf\n900\n100\n50\n450\nr\n";

fn loaded() -> Controller {
    let url = UrlState { id: Some("job42".to_string()), ..UrlState::default() };
    let config = RenderConfig::default();
    let surface = RecordingSurface::beside_axis(config.axis_margin);
    let mut controller = DotplotController::new(surface, MemoryStateStore::new(url), config);
    controller.load_dataset(dataset_from_text(COORDINATES).unwrap()).unwrap();
    controller
}

fn screen(controller: &Controller, x: f64, y: f64) -> Point {
    controller.surface().data_to_screen(Point::new(x, y)).unwrap()
}

fn assert_close(a: ViewBox, b: ViewBox) {
    let close = |p: f64, q: f64| (p - q).abs() < 1e-9 * q.abs().max(1.0);
    assert!(
        close(a.x, b.x) && close(a.y, b.y) && close(a.width, b.width) && close(a.height, b.height),
        "{:?} != {:?}",
        a,
        b
    );
}

#[test]
fn click_without_drag_keeps_the_view() {
    let mut controller = loaded();
    let before = controller.current_view();

    let p = Point::new(5.0, 5.0);
    assert!(matches!(controller.handle_pointer(PointerInput::Down(p)), SelectionOutcome::Started(_)));
    controller.handle_pointer(PointerInput::Move(p));
    assert_eq!(controller.handle_pointer(PointerInput::Up), SelectionOutcome::Discarded);

    assert_eq!(controller.current_view(), before);
    assert_eq!(controller.surface().selection, None);
    assert_eq!(controller.surface().scenes.len(), 1);
}

#[test]
fn drag_zooms_to_the_selected_rectangle() {
    let mut controller = loaded();
    let start = screen(&controller, 100.0, 50.0);
    let end = screen(&controller, 300.0, 150.0);

    controller.handle_pointer(PointerInput::Down(start));
    controller.handle_pointer(PointerInput::Move(end));
    let live = controller.surface().selection.unwrap();
    assert_close(live, ViewBox::new(100.0, 50.0, 200.0, 100.0));

    assert!(matches!(controller.handle_pointer(PointerInput::Up), SelectionOutcome::Committed(_)));
    assert_close(controller.current_view().unwrap(), ViewBox::new(100.0, 50.0, 200.0, 100.0));
    assert_eq!(controller.surface().selection, None);
    assert_eq!(controller.current_scene().unwrap().regime, Regime::Zoomed);

    let saved = controller.store().snapshot();
    assert_close(saved.view_box.unwrap(), ViewBox::new(100.0, 50.0, 200.0, 100.0));
    assert_eq!(controller.store().save_count(), 2);
}

#[test]
fn dragging_up_and_left_normalizes_the_rectangle() {
    let mut controller = loaded();
    controller.handle_pointer(PointerInput::Down(screen(&controller, 400.0, 300.0)));
    controller.handle_pointer(PointerInput::Move(screen(&controller, 200.0, 100.0)));
    controller.handle_pointer(PointerInput::Up);
    assert_close(controller.current_view().unwrap(), ViewBox::new(200.0, 100.0, 200.0, 200.0));
}

#[test]
fn touch_cancel_discards_the_drag() {
    let mut controller = loaded();
    controller.handle_pointer(PointerInput::Down(screen(&controller, 100.0, 100.0)));
    controller.handle_pointer(PointerInput::Move(screen(&controller, 200.0, 200.0)));
    assert_eq!(controller.handle_pointer(PointerInput::Cancel), SelectionOutcome::Discarded);
    assert_eq!(controller.current_view(), Some(ViewBox::new(0.0, 0.0, 1000.0, 500.0)));
}

#[test]
fn reset_restores_overview() {
    let mut controller = loaded();
    controller.set_view_box(ViewBox::new(10.0, 10.0, 100.0, 100.0)).unwrap();
    controller.reset_zoom().unwrap();
    assert_eq!(controller.current_view(), Some(ViewBox::new(0.0, 0.0, 1000.0, 500.0)));
    assert_eq!(controller.current_scene().unwrap().regime, Regime::Overview);
}

#[test]
fn map_mode_ignores_drags_and_opens_details() {
    let mut controller = loaded();
    assert_eq!(controller.segment_clicked(1), None);

    controller.set_zoom_mode(false).unwrap();
    assert!(controller.current_scene().unwrap().inspectable);
    let p = screen(&controller, 100.0, 100.0);
    assert_eq!(controller.handle_pointer(PointerInput::Down(p)), SelectionOutcome::Ignored);

    let url = controller.segment_clicked(2).unwrap();
    assert_eq!(url, "https://bioinfo.univ-lille.fr/cgi-bin/yass/print_align-cgi?id=job42&noLine=2");
}

#[test]
fn switching_to_map_mode_drops_a_drag_in_progress() {
    let mut controller = loaded();
    controller.handle_pointer(PointerInput::Down(screen(&controller, 100.0, 100.0)));
    controller.set_zoom_mode(false).unwrap();
    assert_eq!(controller.surface().selection, None);
    assert_eq!(controller.handle_pointer(PointerInput::Up), SelectionOutcome::Ignored);
}

#[test]
fn detached_surface_makes_pointer_input_a_no_op() {
    let mut controller = loaded();
    controller.surface_mut().detach();
    let outcome = controller.handle_pointer(PointerInput::Down(Point::new(100.0, 100.0)));
    assert_eq!(outcome, SelectionOutcome::Ignored);
    assert!(controller.screen_to_data(Point::new(100.0, 100.0)).is_none());
}

#[test]
fn degenerate_manual_zoom_is_rejected() {
    let mut controller = loaded();
    assert!(controller.apply_manual_zoom(50.0, 50.0, 0.0, 10.0).is_err());
    assert!(controller.set_view_box(ViewBox::new(0.0, 0.0, 10.0, 0.0)).is_err());
    assert_eq!(controller.surface().scenes.len(), 1);
}

#[test]
fn drag_publishes_live_selection_then_view_change() {
    let mut controller = loaded();
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = events.clone();
    controller.subscribe(move |event| sink.borrow_mut().push(event.clone()));

    controller.handle_pointer(PointerInput::Down(screen(&controller, 100.0, 50.0)));
    controller.handle_pointer(PointerInput::Move(screen(&controller, 300.0, 150.0)));
    controller.handle_pointer(PointerInput::Up);

    let kinds: Vec<&'static str> = events
        .borrow()
        .iter()
        .map(|e| match e {
            DotplotEvent::SelectionChanged { .. } => "selection",
            DotplotEvent::SelectionCleared => "cleared",
            DotplotEvent::ViewBoxChanged { .. } => "view",
            DotplotEvent::Rendered { .. } => "rendered",
            _ => "other",
        })
        .collect();
    assert_eq!(kinds, ["selection", "selection", "cleared", "view", "rendered"]);
}

#[test]
fn undrawable_view_is_rejected_and_previous_view_kept() {
    let mut controller = loaded();
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = events.clone();
    controller.subscribe(move |event| sink.borrow_mut().push(event.clone()));
    let before = controller.current_view();

    assert!(controller.set_view_box(ViewBox::new(0.0, 0.0, 1e-310, 1.0)).is_err());
    // Normal width whose tick step underflows.
    assert!(controller.set_view_box(ViewBox::new(0.0, 0.0, 5e-308, 1.0)).is_err());

    assert_eq!(controller.current_view(), before);
    assert_eq!(controller.surface().scenes.len(), 1);
    assert!(events.borrow().is_empty());

    controller.set_color(Direction::Forward, "blue").unwrap();
    assert_eq!(controller.surface().scenes.len(), 2);
    assert_eq!(controller.current_view(), before);
}

#[test]
fn undrawable_persisted_view_falls_back_to_data_extent() {
    let url = UrlState {
        view_box: Some(ViewBox::new(0.0, 0.0, 5e-308, 1.0)),
        ..UrlState::default()
    };
    let config = RenderConfig::default();
    let surface = RecordingSurface::beside_axis(config.axis_margin);
    let mut controller = DotplotController::new(surface, MemoryStateStore::new(url), config);
    controller.load_dataset(dataset_from_text(COORDINATES).unwrap()).unwrap();

    assert_eq!(controller.current_view(), Some(ViewBox::new(0.0, 0.0, 1000.0, 500.0)));
    assert_eq!(controller.current_scene().unwrap().regime, Regime::Overview);
    assert_eq!(controller.surface().scenes.len(), 1);
}
