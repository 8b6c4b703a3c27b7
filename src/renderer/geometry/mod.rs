//! Geometry primitives
//!
//! Provides the 2D bounding areas used for ground-plane footprints and the
//! convex hull they are fitted to.

mod bounds;
mod hull;

pub use bounds::{Aabb2d, Obb2d};
pub use hull::{convex_hull, dedup_sorted, lexicographic};
