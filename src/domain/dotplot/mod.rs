//! Dotplot aggregate: alignment segments, view rectangles and the screen/data mapping.

pub mod coordinates;
pub mod entities;
pub mod value_objects;

pub use coordinates::*;
pub use entities::*;
pub use value_objects::*;
