//! Sphere primitive for ray tracing.

use crate::{HitRecord, Hittable, Material, Ray};
use lumen_math::{Interval, Point3};

/// A sphere primitive.
#[derive(Debug, Clone)]
pub struct Sphere {
    center: Point3,
    radius: f64,
    material: Material,
}

impl Sphere {
    /// Create a new sphere.
    ///
    /// The radius must be finite and non-zero. A negative radius keeps the
    /// same surface but flips the normals inward, which turns a dielectric
    /// sphere into a hollow shell when nested inside a positive one.
    pub fn new(center: Point3, radius: f64, material: Material) -> Self {
        debug_assert!(radius.is_finite() && radius != 0.0, "bad sphere radius {radius}");
        Self {
            center,
            radius,
            material,
        }
    }

    pub fn center(&self) -> Point3 {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn material(&self) -> &Material {
        &self.material
    }
}

impl Hittable for Sphere {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let oc = self.center - ray.origin();
        let a = ray.direction().length_squared();
        let h = ray.direction().dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = h * h - a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();

        // Find the nearest root in the acceptable range
        let mut root = (h - sqrtd) / a;
        if !ray_t.surrounds(root) {
            root = (h + sqrtd) / a;
            if !ray_t.surrounds(root) {
                return None;
            }
        }

        let outward_normal = (ray.at(root) - self.center) / self.radius;
        Some(HitRecord::new(ray, root, outward_normal, &self.material))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Color, Dielectric, Lambertian, Vec3};

    fn unit_sphere() -> Sphere {
        Sphere::new(
            Point3::new(0.0, 0.0, -1.0),
            0.5,
            Material::Lambertian(Lambertian::new(Color::splat(0.5))),
        )
    }

    #[test]
    fn test_sphere_hit() {
        let sphere = unit_sphere();
        let ray = Ray::new(Point3::ZERO, Vec3::NEG_Z);

        let rec = sphere
            .hit(&ray, Interval::new(0.001, f64::INFINITY))
            .expect("ray should hit the sphere");
        assert!((rec.t - 0.5).abs() < 1e-9);
        assert!(rec.front_face);
        assert!(rec.normal.abs_diff_eq(Vec3::Z, 1e-12));
    }

    #[test]
    fn test_sphere_miss() {
        let sphere = unit_sphere();
        let ray = Ray::new(Point3::ZERO, Vec3::Y);
        assert!(sphere.hit(&ray, Interval::new(0.001, f64::INFINITY)).is_none());
    }

    #[test]
    fn test_sphere_hit_from_inside_is_back_face() {
        let sphere = Sphere::new(Point3::ZERO, 1.0, Material::Dielectric(Dielectric::new(1.5)));
        let ray = Ray::new(Point3::ZERO, Vec3::X);

        let rec = sphere
            .hit(&ray, Interval::new(0.001, f64::INFINITY))
            .expect("ray from the center must hit the shell");
        assert!((rec.t - 1.0).abs() < 1e-9);
        assert!(!rec.front_face);
        assert!(rec.normal.abs_diff_eq(Vec3::NEG_X, 1e-12));
    }

    #[test]
    fn test_sphere_respects_interval() {
        let sphere = unit_sphere();
        let ray = Ray::new(Point3::ZERO, Vec3::NEG_Z);
        assert!(sphere.hit(&ray, Interval::new(0.001, 0.4)).is_none());
    }

    #[test]
    fn test_negative_radius_flips_normal() {
        let sphere = Sphere::new(Point3::new(0.0, 0.0, -1.0), -0.5, *unit_sphere().material());
        let ray = Ray::new(Point3::ZERO, Vec3::NEG_Z);

        let rec = sphere
            .hit(&ray, Interval::new(0.001, f64::INFINITY))
            .expect("same surface as the positive sphere");
        assert_eq!(sphere.radius(), -0.5);
        assert!((rec.t - 0.5).abs() < 1e-9);
        assert!(!rec.front_face);
        assert!(rec.normal.is_finite());
        assert!(rec.normal.abs_diff_eq(Vec3::Z, 1e-12));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "bad sphere radius")]
    fn test_zero_radius_asserts() {
        let _ = Sphere::new(Point3::ZERO, 0.0, *unit_sphere().material());
    }
}
