//! Reflection and refraction operators on top of glam's vector algebra.
//!
//! glam already provides the arithmetic the renderer needs (`+`, `-`,
//! component-wise `*`, negation, scalar `+ * /`, `dot`, `cross`,
//! `length_squared`, `length`, `normalize`). This module adds the two
//! optical operators and the near-zero test used to reject degenerate
//! scatter directions.

use crate::Vec3;

/// Threshold below which every component of a vector counts as zero.
const NEAR_ZERO_EPSILON: f64 = 1e-8;

/// Returns true if the vector is close to zero in all dimensions.
#[inline]
pub fn near_zero(v: Vec3) -> bool {
    v.x.abs() < NEAR_ZERO_EPSILON && v.y.abs() < NEAR_ZERO_EPSILON && v.z.abs() < NEAR_ZERO_EPSILON
}

/// Mirror `v` about the unit normal `n`: `v - 2(v.n)n`.
///
/// `n` must be unit length, otherwise the result is meaningless.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract the unit vector `uv` through a surface with unit normal `n`
/// using Snell's law.
///
/// The result is split into a component parallel to the surface,
/// `etai_over_etat * (uv + cos_theta * n)`, and one along the normal,
/// `-sqrt(1 - |parallel|^2) * n`.
///
/// Only valid when `etai_over_etat * sin_theta <= 1`; the caller must have
/// ruled out total internal reflection first.
#[inline]
pub fn refract(uv: Vec3, n: Vec3, etai_over_etat: f64) -> Vec3 {
    let cos_theta = (-uv).dot(n);
    let r_out_parallel = etai_over_etat * (uv + cos_theta * n);
    let k = 1.0 - r_out_parallel.length_squared();
    debug_assert!(k > -1e-9, "refract called under total internal reflection (k = {k})");
    // Rounding can leave k a hair below zero at grazing angles
    let r_out_perp = -k.max(0.0).sqrt() * n;
    r_out_parallel + r_out_perp
}
