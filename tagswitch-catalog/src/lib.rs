//! Reference variant sets dispatched through `tagswitch`.
//!
//! Each module pairs a closed enumeration with the logic that consumes it, once as a
//! native exhaustive `match` and once as a dispatch table:
//! - [`shape`]: perimeter of circles, rectangles and triangles;
//! - [`animal`]: the sound of each farm animal, including a legacy table that
//!   forgot the chicken;
//! - [`taste`]: descriptions of the five basic tastes, loaded from a manifest.

pub mod animal;
pub mod shape;
pub mod taste;

pub use animal::Animal;
pub use shape::{Circle, Rectangle, Shape, ShapeKind, Triangle};
pub use taste::Taste;
