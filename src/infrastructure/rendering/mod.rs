pub mod recording_surface;
pub mod svg_surface;
pub mod svg_tree;

pub use recording_surface::RecordingSurface;
pub use svg_surface::SvgDomSurface;
pub use svg_tree::SvgNode;
