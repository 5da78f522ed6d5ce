//! Random sampling helpers for lens jitter and scattering.
//!
//! Every function draws from a caller-owned generator. There is no global
//! RNG: each render thread (or each image row) owns its own `RngCore`, so
//! concurrent callers never contend and their streams stay independent.

use lumen_math::Vec3;
use rand::{Rng, RngCore};

/// Uniform f64 in [0, 1).
#[inline]
pub fn gen_f64(rng: &mut dyn RngCore) -> f64 {
    rng.gen()
}

/// Uniform f64 in [min, max).
#[inline]
pub fn gen_range(rng: &mut dyn RngCore, min: f64, max: f64) -> f64 {
    min + (max - min) * gen_f64(rng)
}

/// Sample a point strictly inside the unit disk in the z = 0 plane.
pub fn random_in_unit_disk(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let p = Vec3::new(gen_range(rng, -1.0, 1.0), gen_range(rng, -1.0, 1.0), 0.0);
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}

/// Sample a point inside the unit sphere by rejection in the unit cube.
pub fn random_in_unit_sphere(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let p = Vec3::new(
            gen_range(rng, -1.0, 1.0),
            gen_range(rng, -1.0, 1.0),
            gen_range(rng, -1.0, 1.0),
        );
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}

/// A unit vector made by normalizing a point inside the unit sphere.
///
/// Added to a surface normal this gives the Lambertian scatter direction.
/// The resulting distribution is the normalized-in-sphere approximation,
/// not an exact cosine-weighted hemisphere sample; renders depend on it.
pub fn random_unit_vector(rng: &mut dyn RngCore) -> Vec3 {
    random_in_unit_sphere(rng).normalize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const N: usize = 2_000;

    #[test]
    fn test_gen_f64_range() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..N {
            let x = gen_f64(&mut rng);
            assert!((0.0..1.0).contains(&x));
        }
    }

    #[test]
    fn test_gen_range_bounds() {
        let mut rng = StdRng::seed_from_u64(2);
        for _ in 0..N {
            let x = gen_range(&mut rng, -3.0, 5.0);
            assert!((-3.0..5.0).contains(&x));
        }
    }

    #[test]
    fn test_unit_disk_samples() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..N {
            let p = random_in_unit_disk(&mut rng);
            assert_eq!(p.z, 0.0);
            assert!(p.length_squared() < 1.0);
        }
    }

    #[test]
    fn test_unit_sphere_samples() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut mean = Vec3::ZERO;
        for _ in 0..N {
            let p = random_in_unit_sphere(&mut rng);
            assert!(p.length_squared() < 1.0);
            mean += p;
        }
        // Uniform in the ball, so roughly centered on the origin
        mean /= N as f64;
        assert!(mean.length() < 0.1, "mean = {mean}");
    }

    #[test]
    fn test_unit_vector_samples() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..N {
            let v = random_unit_vector(&mut rng);
            assert!((v.length() - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_same_seed_same_stream() {
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);
        for _ in 0..16 {
            assert_eq!(random_unit_vector(&mut a), random_unit_vector(&mut b));
        }
    }
}
