#![cfg(target_arch = "wasm32")]

use dotplot_wasm::application::{RenderChartUseCase, ViewportManager, use_cases::dataset_from_text};
use dotplot_wasm::domain::config::RenderConfig;
use dotplot_wasm::domain::dotplot::{Colors, Theme, ViewBox};
use dotplot_wasm::domain::scene::{RenderSurface, Scene};
use dotplot_wasm::infrastructure::SvgDomSurface;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn mount(id: &str) -> web_sys::Element {
    let document = web_sys::window().unwrap().document().unwrap();
    let container = document.create_element("div").unwrap();
    container.set_id(id);
    document.body().unwrap().append_child(&container).unwrap();
    container
}

fn scene(theme: Theme) -> Scene {
    let dataset = dataset_from_text("0\n1000\n0\n500\nf\n900\n100\n50\n450\nr\n").unwrap();
    let viewport = ViewportManager::new(dataset.default_view, None);
    RenderChartUseCase::new(RenderConfig::default())
        .build_scene(&dataset, &viewport, &Colors::default(), theme)
        .unwrap()
}

#[wasm_bindgen_test]
fn present_builds_axes_around_the_plot() {
    let container = mount("dom-surface-present");
    let mut surface = SvgDomSurface::new("dom-surface-present").unwrap();
    surface.present(&scene(Theme::Dark)).unwrap();

    let wrapper = container.first_element_child().unwrap();
    assert_eq!(wrapper.class_name(), "wrapper");
    assert_eq!(wrapper.child_element_count(), 3);
    assert_eq!(surface.plot_element().get_attribute("viewBox").as_deref(), Some("0 0 1000 500"));

    let body = web_sys::window().unwrap().document().unwrap().body().unwrap();
    assert!(body.class_list().contains("dark"));
    assert!(surface.screen_transform().is_some());
}

#[wasm_bindgen_test]
fn rerender_keeps_the_plot_element() {
    let container = mount("dom-surface-rerender");
    let mut surface = SvgDomSurface::new("dom-surface-rerender").unwrap();
    surface.present(&scene(Theme::Light)).unwrap();
    let before = surface.plot_element().clone();
    surface.present(&scene(Theme::Light)).unwrap();

    assert!(before.is_same_node(Some(surface.plot_element())));
    assert_eq!(container.child_element_count(), 1);
}

#[wasm_bindgen_test]
fn selection_overlay_shows_and_hides() {
    mount("dom-surface-selection");
    let mut surface = SvgDomSurface::new("dom-surface-selection").unwrap();
    surface.present(&scene(Theme::Light)).unwrap();
    let overlay = surface.plot_element().last_element_child().unwrap();

    surface.show_selection(Some(ViewBox::new(10.0, 20.0, 30.0, 40.0)));
    assert_eq!(overlay.get_attribute("display").as_deref(), Some("block"));
    assert_eq!(overlay.get_attribute("width").as_deref(), Some("30"));

    surface.show_selection(None);
    assert_eq!(overlay.get_attribute("display").as_deref(), Some("none"));
}

#[wasm_bindgen_test]
fn missing_container_is_an_error() {
    assert!(SvgDomSurface::new("no-such-container").is_err());
}
