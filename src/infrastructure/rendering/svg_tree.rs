//! Scene to SVG element tree. The same tree feeds the live DOM surface and the
//! markup written for export.

use std::fmt::Write;

use crate::domain::scene::{AxisGuide, LinePrimitive, Scene};
use crate::domain::clipping::HitRegion;
use crate::domain::dotplot::ViewBox;

pub const SVG_NS: &str = "http://www.w3.org/2000/svg";
pub const PLOT_CLIP_ID: &str = "plotClip";
pub const SEGMENT_ID_ATTR: &str = "data-segment-id";
const AXIS_COLOR: &str = "var(--axis-text)";

/// Tag, attributes, text and children of one SVG element
#[derive(Debug, Clone, PartialEq)]
pub struct SvgNode {
    pub tag: &'static str,
    pub attributes: Vec<(&'static str, String)>,
    pub text: Option<String>,
    pub children: Vec<SvgNode>,
}

impl SvgNode {
    pub fn new(tag: &'static str) -> Self {
        Self { tag, attributes: Vec::new(), text: None, children: Vec::new() }
    }

    pub fn attr(mut self, name: &'static str, value: impl ToString) -> Self {
        self.attributes.push((name, value.to_string()));
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn child(mut self, child: SvgNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = SvgNode>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.attributes.iter().find(|(n, _)| *n == name).map(|(_, v)| v.as_str())
    }

    /// Depth-first search for every node with `tag`.
    pub fn find_all<'a>(&'a self, tag: &str, out: &mut Vec<&'a SvgNode>) {
        if self.tag == tag {
            out.push(self);
        }
        for child in &self.children {
            child.find_all(tag, out);
        }
    }

    pub fn to_markup(&self) -> String {
        let mut out = String::new();
        self.write_markup(&mut out);
        out
    }

    fn write_markup(&self, out: &mut String) {
        let _ = write!(out, "<{}", self.tag);
        for (name, value) in &self.attributes {
            let _ = write!(out, " {}=\"{}\"", name, escape(value));
        }
        if self.text.is_none() && self.children.is_empty() {
            out.push_str("/>");
            return;
        }
        out.push('>');
        if let Some(text) = &self.text {
            out.push_str(&escape(text));
        }
        for child in &self.children {
            child.write_markup(out);
        }
        let _ = write!(out, "</{}>", self.tag);
    }
}

pub fn escape(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn arrow_marker(id: &'static str, ref_y: &'static str) -> SvgNode {
    SvgNode::new("marker")
        .attr("id", id)
        .attr("markerUnits", "strokeWidth")
        .attr("markerWidth", 6)
        .attr("markerHeight", 6)
        .attr("refX", 0)
        .attr("refY", ref_y)
        .attr("orient", "auto")
        .child(SvgNode::new("path").attr("d", "M0,0 L6,3 L0,6 Z").attr("fill", AXIS_COLOR))
}

fn axis_line(x1: f64, y1: f64, x2: f64, y2: f64) -> SvgNode {
    SvgNode::new("line")
        .attr("x1", x1)
        .attr("y1", y1)
        .attr("x2", x2)
        .attr("y2", y2)
        .attr("stroke", AXIS_COLOR)
}

fn axis_label(x: f64, y: f64, anchor: &'static str, label: &str) -> SvgNode {
    SvgNode::new("text")
        .attr("x", x)
        .attr("y", y)
        .attr("fill", AXIS_COLOR)
        .attr("font-size", 14)
        .attr("text-anchor", anchor)
        .text(label)
}

/// Vertical axis: `margin` wide, as tall as the plot; arrow pointing down.
pub fn y_axis(guide: &AxisGuide) -> SvgNode {
    let (m, len) = (guide.margin, guide.length);
    let spine = m - 10.0;
    let mut svg = SvgNode::new("svg")
        .attr("width", m)
        .attr("height", len)
        .attr("class", "axis-vertical")
        .child(SvgNode::new("defs").child(arrow_marker("arrowHeadY", "3")))
        .child(SvgNode::new("circle").attr("cx", spine).attr("cy", 0).attr("r", 4).attr("fill", AXIS_COLOR))
        .child(
            axis_line(spine, -1.0, spine, len + 1.0)
                .attr("stroke-width", 2)
                .attr("marker-end", "url(#arrowHeadY)"),
        );
    for tick in &guide.ticks {
        let y = tick.pixel_offset;
        svg = svg
            .child(axis_line(m - 20.0, y, spine, y).attr("class", "tick"))
            .child(axis_label(m - 25.0, y + 4.0, "end", &tick.label));
    }
    svg
}

/// Horizontal axis: spans the plot plus a margin either side; arrow pointing right.
pub fn x_axis(guide: &AxisGuide) -> SvgNode {
    let (m, len) = (guide.margin, guide.length);
    let mut svg = SvgNode::new("svg")
        .attr("width", len + 2.0 * m)
        .attr("height", m)
        .attr("class", "axis-horizontal")
        .child(SvgNode::new("defs").child(arrow_marker("arrowHeadX", "2.6")))
        .child(SvgNode::new("circle").attr("cx", m).attr("cy", 10).attr("r", 4).attr("fill", AXIS_COLOR))
        .child(
            axis_line(m, 10.0, len + m, 10.0)
                .attr("stroke-width", 2)
                .attr("marker-end", "url(#arrowHeadX)"),
        );
    for tick in &guide.ticks {
        let x = m + tick.pixel_offset;
        svg = svg
            .child(axis_line(x, 10.0, x, 25.0).attr("class", "tick"))
            .child(axis_label(x, 45.0, "middle", &tick.label));
    }
    svg
}

fn hit_line(hit: &HitRegion, inspectable: bool) -> SvgNode {
    SvgNode::new("line")
        .attr("x1", hit.x1)
        .attr("y1", hit.y1)
        .attr("x2", hit.x2)
        .attr("y2", hit.y2)
        .attr("stroke", "transparent")
        .attr("stroke-width", hit.width)
        .attr("pointer-events", "stroke")
        .attr("cursor", if inspectable { "pointer" } else { "crosshair" })
        .attr(SEGMENT_ID_ATTR, hit.segment_id)
}

fn visible_line(line: &LinePrimitive) -> SvgNode {
    let mut node = SvgNode::new("line")
        .attr("x1", line.x1)
        .attr("y1", line.y1)
        .attr("x2", line.x2)
        .attr("y2", line.y2)
        .attr("stroke", &line.color)
        .attr("stroke-width", 1)
        .attr("vector-effect", "non-scaling-stroke")
        .attr("pointer-events", "none");
    if line.rounded {
        node = node.attr("stroke-linejoin", "round").attr("stroke-linecap", "round");
    }
    node.attr("class", line.direction)
}

/// Clip path plus the clipped group of hit regions and lines, in data coordinates.
pub fn plot_content(scene: &Scene) -> Vec<SvgNode> {
    let vb = &scene.view_box;
    let clip = SvgNode::new("defs").child(
        SvgNode::new("clipPath").attr("id", PLOT_CLIP_ID).child(
            SvgNode::new("rect")
                .attr("x", vb.x)
                .attr("y", vb.y)
                .attr("width", vb.width)
                .attr("height", vb.height),
        ),
    );
    let group = SvgNode::new("g")
        .attr("clip-path", format!("url(#{})", PLOT_CLIP_ID))
        .children(scene.hits.iter().map(|h| hit_line(h, scene.inspectable)))
        .children(scene.lines.iter().map(visible_line));
    vec![clip, group]
}

/// Attributes of the plot `<svg>` element itself.
pub fn plot_attributes(scene: &Scene) -> Vec<(&'static str, String)> {
    vec![
        ("width", scene.layout.plot_width.to_string()),
        ("height", scene.layout.plot_height.to_string()),
        ("viewBox", scene.view_box.to_attribute()),
        ("style", "border: 1px solid black".to_string()),
        ("pointer-events", "all".to_string()),
    ]
}

/// Drag rectangle, hidden until a drag starts.
pub fn selection_rect(selection: Option<ViewBox>) -> SvgNode {
    let rect = SvgNode::new("rect")
        .attr("class", "selection")
        .attr("fill", "rgba(0,0,255,0.2)")
        .attr("stroke", "blue")
        .attr("stroke-width", 2)
        .attr("vector-effect", "non-scaling-stroke");
    match selection {
        Some(vb) => rect
            .attr("x", vb.x)
            .attr("y", vb.y)
            .attr("width", vb.width)
            .attr("height", vb.height)
            .attr("display", "block"),
        None => rect.attr("display", "none"),
    }
}

/// One standalone SVG: y axis left, plot beside it, x axis underneath.
pub fn combined_svg(scene: &Scene) -> SvgNode {
    let layout = &scene.layout;
    let m = layout.axis_margin;
    let width = layout.plot_width + 2.0 * m;
    let height = layout.plot_height + m;

    let mut plot = SvgNode::new("svg")
        .attr("x", m)
        .attr("y", 0)
        .attr("width", layout.plot_width)
        .attr("height", layout.plot_height)
        .attr("viewBox", scene.view_box.to_attribute());
    plot = plot.children(plot_content(scene));

    let mut y = y_axis(&scene.y_axis);
    y.tag = "g";
    y.attributes = vec![("class", "axis-vertical".to_string())];
    let mut x = x_axis(&scene.x_axis);
    x.tag = "g";
    x.attributes = vec![
        ("class", "axis-horizontal".to_string()),
        ("transform", format!("translate(0, {})", layout.plot_height)),
    ];

    let mut root = SvgNode::new("svg")
        .attr("xmlns", SVG_NS)
        .attr("width", width)
        .attr("height", height)
        .attr("class", scene.theme)
        .child(y)
        .child(plot)
        .child(x);
    root.resolve_axis_color(scene.theme.axis_color());
    root
}

impl SvgNode {
    fn resolve_axis_color(&mut self, color: &str) {
        for (_, value) in &mut self.attributes {
            if *value == AXIS_COLOR {
                *value = color.to_string();
            }
        }
        for child in &mut self.children {
            child.resolve_axis_color(color);
        }
    }
}
