use kurbo::{Affine, Point};

use super::value_objects::ViewBox;
use crate::domain::scene::RenderSurface;

/// Data-to-screen transform an SVG element of `width × height` pixels, placed
/// at `origin`, applies to `view_box` (default `preserveAspectRatio`: xMidYMid meet).
pub fn view_box_transform(view_box: &ViewBox, width: f64, height: f64, origin: Point) -> Option<Affine> {
    if !view_box.is_valid() || !(width > 0.0 && height > 0.0) {
        return None;
    }
    let scale = (width / view_box.width).min(height / view_box.height);
    let tx = origin.x + (width - view_box.width * scale) / 2.0 - view_box.x * scale;
    let ty = origin.y + (height - view_box.height * scale) / 2.0 - view_box.y * scale;
    Some(Affine::new([scale, 0.0, 0.0, scale, tx, ty]))
}

/// Inverse of `transform`, or `None` when it is singular or not finite.
pub fn invert(transform: Affine) -> Option<Affine> {
    let det = transform.determinant();
    if det == 0.0 || !det.is_finite() || !transform.is_finite() {
        return None;
    }
    let inverse = transform.inverse();
    inverse.is_finite().then_some(inverse)
}

/// Map a screen-space point into the data space of `surface`'s current view.
///
/// `None` means the surface is detached or its transform cannot be inverted;
/// callers treat that as a no-op.
pub fn screen_to_data(point: Point, surface: &dyn RenderSurface) -> Option<Point> {
    let to_screen = surface.screen_transform()?;
    let mapped = invert(to_screen)? * point;
    (mapped.x.is_finite() && mapped.y.is_finite()).then_some(mapped)
}
