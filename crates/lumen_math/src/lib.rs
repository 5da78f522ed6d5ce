//! Lumen math - the geometry substrate shared by the renderer.
//!
//! Vectors are glam's double precision `DVec3`, reused under three names:
//! a displacement ([`Vec3`]), a position ([`Point3`]) and a linear RGB
//! [`Color`]. All of them are plain `Copy` values; every operation returns
//! a new vector.

// Re-export glam for convenience
pub use glam::DVec3;

mod interval;
mod ray;
mod vec3;

pub use interval::Interval;
pub use ray::Ray;
pub use vec3::{near_zero, reflect, refract};

/// A displacement or direction in world space.
pub type Vec3 = DVec3;

/// A position in world space.
pub type Point3 = DVec3;

/// Linear RGB color, components in `[0, inf)` before tone mapping.
pub type Color = DVec3;
