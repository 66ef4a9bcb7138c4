use kurbo::Affine;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, SvgsvgElement};

use super::svg_tree::{self, SVG_NS, SvgNode};
use crate::domain::{
    dotplot::{Theme, ViewBox},
    errors::{DotplotError, DotplotResult},
    logging::{LogComponent, get_logger},
    scene::{RenderSurface, Scene},
};

/// Draws scenes into a container element as `div.wrapper > [y axis, plot, x axis]`.
///
/// The plot `<svg>` is created once and reused across renders so listeners
/// attached to it stay valid; only its attributes and children are replaced.
pub struct SvgDomSurface {
    document: Document,
    container: Element,
    plot: SvgsvgElement,
    selection: Option<Element>,
}

impl SvgDomSurface {
    pub fn new(container_id: &str) -> DotplotResult<Self> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| DotplotError::SurfaceUnavailable("no document".to_string()))?;
        let container = document.get_element_by_id(container_id).ok_or_else(|| {
            DotplotError::SurfaceUnavailable(format!("#{} not found", container_id))
        })?;
        let plot = document
            .create_element_ns(Some(SVG_NS), "svg")?
            .dyn_into::<SvgsvgElement>()
            .map_err(|_| DotplotError::SurfaceUnavailable("svg element has wrong type".to_string()))?;

        get_logger().info(
            LogComponent::Infrastructure("SvgDomSurface"),
            &format!("attached to #{}", container_id),
        );
        Ok(Self { document, container, plot, selection: None })
    }

    /// The long-lived plot element, for wiring pointer listeners.
    pub fn plot_element(&self) -> &SvgsvgElement {
        &self.plot
    }

    fn build(&self, node: &SvgNode) -> DotplotResult<Element> {
        let element = self.document.create_element_ns(Some(SVG_NS), node.tag)?;
        for (name, value) in &node.attributes {
            element.set_attribute(name, value)?;
        }
        if let Some(text) = &node.text {
            element.set_text_content(Some(text));
        }
        for child in &node.children {
            let child = self.build(child)?;
            element.append_child(&child)?;
        }
        Ok(element)
    }

    fn apply_theme(&self, theme: Theme) -> DotplotResult<()> {
        let Some(body) = self.document.body() else {
            return Ok(());
        };
        let classes = body.class_list();
        classes.remove_2(Theme::Light.as_ref(), Theme::Dark.as_ref())?;
        classes.add_1(theme.as_ref())?;
        Ok(())
    }

    fn rebuild_plot(&mut self, scene: &Scene) -> DotplotResult<()> {
        self.plot.set_inner_html("");
        for (name, value) in svg_tree::plot_attributes(scene) {
            self.plot.set_attribute(name, &value)?;
        }
        for node in svg_tree::plot_content(scene) {
            let element = self.build(&node)?;
            self.plot.append_child(&element)?;
        }
        let selection = self.build(&svg_tree::selection_rect(None))?;
        self.plot.append_child(&selection)?;
        self.selection = Some(selection);
        Ok(())
    }
}

impl RenderSurface for SvgDomSurface {
    fn present(&mut self, scene: &Scene) -> DotplotResult<()> {
        self.apply_theme(scene.theme)?;
        self.container.set_inner_html("");

        let wrapper = self.document.create_element("div")?;
        wrapper.set_class_name("wrapper");
        let y_axis = self.build(&svg_tree::y_axis(&scene.y_axis))?;
        let x_axis = self.build(&svg_tree::x_axis(&scene.x_axis))?;
        wrapper.append_child(&y_axis)?;
        self.rebuild_plot(scene)?;
        wrapper.append_child(&self.plot)?;
        wrapper.append_child(&x_axis)?;
        self.container.append_child(&wrapper)?;

        get_logger().trace(
            LogComponent::Infrastructure("SvgDomSurface"),
            &format!("presented {} lines", scene.lines.len()),
        );
        Ok(())
    }

    fn show_selection(&mut self, selection: Option<ViewBox>) {
        let Some(rect) = &self.selection else {
            return;
        };
        let node = svg_tree::selection_rect(selection);
        for (name, value) in &node.attributes {
            if rect.set_attribute(name, value).is_err() {
                get_logger().warn(
                    LogComponent::Infrastructure("SvgDomSurface"),
                    "selection overlay is stale",
                );
                return;
            }
        }
    }

    fn screen_transform(&self) -> Option<Affine> {
        if !self.plot.is_connected() {
            return None;
        }
        let m = self.plot.get_screen_ctm()?;
        Some(Affine::new([
            m.a() as f64,
            m.b() as f64,
            m.c() as f64,
            m.d() as f64,
            m.e() as f64,
            m.f() as f64,
        ]))
    }
}
