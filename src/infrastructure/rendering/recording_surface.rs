use kurbo::{Affine, Point};

use crate::domain::{
    dotplot::{ViewBox, view_box_transform},
    errors::{DotplotError, DotplotResult},
    scene::{RenderSurface, Scene},
};

/// Surface without a DOM: keeps what it was asked to draw, and derives its
/// screen transform from the last scene as if the plot sat at `origin`.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    pub scenes: Vec<Scene>,
    pub selection: Option<ViewBox>,
    pub selection_updates: usize,
    origin: Point,
    attached: bool,
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self::new(Point::ORIGIN)
    }
}

impl RecordingSurface {
    pub fn new(origin: Point) -> Self {
        Self { scenes: Vec::new(), selection: None, selection_updates: 0, origin, attached: true }
    }

    /// Surface whose plot sits right of the y axis, like the DOM layout.
    pub fn beside_axis(axis_margin: f64) -> Self {
        Self::new(Point::new(axis_margin, 0.0))
    }

    pub fn last_scene(&self) -> Option<&Scene> {
        self.scenes.last()
    }

    /// Simulate the plot element leaving the document.
    pub fn detach(&mut self) {
        self.attached = false;
    }

    /// Screen position of a data point under the last scene.
    pub fn data_to_screen(&self, point: Point) -> Option<Point> {
        self.screen_transform().map(|t| t * point)
    }
}

impl RenderSurface for RecordingSurface {
    fn present(&mut self, scene: &Scene) -> DotplotResult<()> {
        if !self.attached {
            return Err(DotplotError::SurfaceUnavailable("recording surface detached".to_string()));
        }
        self.scenes.push(scene.clone());
        Ok(())
    }

    fn show_selection(&mut self, selection: Option<ViewBox>) {
        self.selection = selection;
        self.selection_updates += 1;
    }

    fn screen_transform(&self) -> Option<Affine> {
        if !self.attached {
            return None;
        }
        let scene = self.scenes.last()?;
        view_box_transform(
            &scene.view_box,
            scene.layout.plot_width,
            scene.layout.plot_height,
            self.origin,
        )
    }
}
