use crate::domain::dotplot::{ViewBox, ZoomRatio};
use crate::domain::errors::DotplotResult;
use crate::domain::logging::{LogComponent, get_logger};

/// Owns the current view, the data-extent view it is measured against, and
/// whether dragging zooms (true) or clicking inspects segments (false).
#[derive(Debug, Clone, PartialEq)]
pub struct ViewportManager {
    current: ViewBox,
    default: ViewBox,
    zoom_allowed: bool,
}

impl ViewportManager {
    /// `initial` (usually a persisted view) seeds the current view when valid.
    pub fn new(default: ViewBox, initial: Option<ViewBox>) -> Self {
        let current = initial.filter(ViewBox::is_valid).unwrap_or(default);
        Self { current, default, zoom_allowed: true }
    }

    pub fn current(&self) -> ViewBox {
        self.current
    }

    pub fn default_view(&self) -> ViewBox {
        self.default
    }

    pub fn zoom_allowed(&self) -> bool {
        self.zoom_allowed
    }

    /// Replace the current view. A degenerate box is rejected and the previous view kept.
    ///
    /// Returns the view that was replaced.
    pub fn set_view_box(&mut self, view_box: ViewBox) -> DotplotResult<ViewBox> {
        let view_box = view_box.validated().inspect_err(|e| {
            get_logger().warn(LogComponent::Application("Viewport"), &format!("rejected: {}", e));
        })?;
        let old = std::mem::replace(&mut self.current, view_box);
        Ok(old)
    }

    /// Back to the data extent. Idempotent.
    pub fn reset_zoom(&mut self) -> ViewBox {
        std::mem::replace(&mut self.current, self.default)
    }

    pub fn set_zoom_mode(&mut self, allowed: bool) {
        self.zoom_allowed = allowed;
    }

    pub fn zoom_ratio(&self) -> ZoomRatio {
        self.current.zoom_ratio(&self.default)
    }

    pub fn is_default_view(&self) -> bool {
        self.current == self.default
    }
}
