//! Camera for ray generation.
//!
//! A thin-lens camera. Rays start at a random point on the lens disk and
//! aim at a fixed point on the focal plane, so only geometry at the focus
//! distance is sharp.

use crate::config::{xyz, ConfigError, ConfigResult};
use crate::sampling::random_in_unit_disk;
use crate::Ray;
use lumen_math::{near_zero, Point3, Vec3};
use rand::RngCore;
use serde::{Deserialize, Serialize};

/// Parameters a [`Camera`] is built from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CameraConfig {
    /// Where the camera sits
    #[serde(with = "xyz")]
    pub look_from: Point3,
    /// Point at the center of the image
    #[serde(with = "xyz")]
    pub look_at: Point3,
    /// Which way is up; need not be orthogonal to the view direction
    #[serde(with = "xyz", alias = "vup")]
    pub view_up: Vec3,
    /// Vertical field of view in degrees
    pub vfov: f64,
    /// Image width over height
    #[serde(alias = "aspect")]
    pub aspect_ratio: f64,
    /// Lens diameter; 0 gives a pinhole camera
    pub aperture: f64,
    /// Distance from the camera to the plane of perfect focus
    #[serde(alias = "focusDist")]
    pub focus_distance: f64,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            look_from: Point3::ZERO,
            look_at: Point3::new(0.0, 0.0, -1.0),
            view_up: Vec3::Y,
            vfov: 90.0,
            aspect_ratio: 16.0 / 9.0,
            aperture: 0.0,
            focus_distance: 1.0,
        }
    }
}

impl CameraConfig {
    /// Set camera position.
    pub fn with_position(mut self, look_from: Point3, look_at: Point3, view_up: Vec3) -> Self {
        self.look_from = look_from;
        self.look_at = look_at;
        self.view_up = view_up;
        self
    }

    /// Set lens settings.
    pub fn with_lens(mut self, vfov: f64, aperture: f64, focus_distance: f64) -> Self {
        self.vfov = vfov;
        self.aperture = aperture;
        self.focus_distance = focus_distance;
        self
    }

    pub fn with_aspect_ratio(mut self, aspect_ratio: f64) -> Self {
        self.aspect_ratio = aspect_ratio;
        self
    }

    /// Reject parameters that would produce a degenerate camera basis.
    pub fn validate(&self) -> ConfigResult<()> {
        let invalid =
            |reason: String| -> ConfigResult<()> { Err(ConfigError::InvalidCamera(reason)) };

        if !(self.vfov > 0.0 && self.vfov < 180.0) {
            return invalid(format!("vfov must be in (0, 180) degrees, got {}", self.vfov));
        }
        if !(self.aspect_ratio.is_finite() && self.aspect_ratio > 0.0) {
            return invalid(format!("aspect ratio must be positive, got {}", self.aspect_ratio));
        }
        if !(self.focus_distance.is_finite() && self.focus_distance > 0.0) {
            return invalid(format!(
                "focus distance must be positive, got {}",
                self.focus_distance
            ));
        }
        if !(self.aperture.is_finite() && self.aperture >= 0.0) {
            return invalid(format!("aperture must be non-negative, got {}", self.aperture));
        }

        let view = self.look_from - self.look_at;
        if near_zero(view) {
            return invalid("lookFrom and lookAt coincide".to_string());
        }
        if near_zero(self.view_up.cross(view.normalize())) {
            return invalid("viewUp is parallel to the view direction".to_string());
        }
        Ok(())
    }

    /// Validate the parameters and build the camera.
    pub fn build(&self) -> ConfigResult<Camera> {
        self.validate()?;
        Ok(Camera::new(self))
    }
}

/// Camera for generating rays into the scene. Immutable once built.
#[derive(Debug, Clone)]
pub struct Camera {
    origin: Point3,
    lower_left: Point3,
    horizontal: Vec3,
    vertical: Vec3,
    u: Vec3,
    v: Vec3,
    w: Vec3,
    lens_radius: f64,
    aspect_ratio: f64,
}

impl Camera {
    /// Derive the camera frame from `config`.
    ///
    /// Does not validate: `view_up` parallel to the view direction leaves
    /// the basis undefined. Use [`CameraConfig::build`] for untrusted input.
    pub fn new(config: &CameraConfig) -> Self {
        let theta = config.vfov.to_radians();
        let h = (theta / 2.0).tan();
        let viewport_height = 2.0 * h;
        let viewport_width = config.aspect_ratio * viewport_height;

        // Orthonormal basis; w points from the scene back toward the camera
        let w = (config.look_from - config.look_at).normalize();
        let u = config.view_up.cross(w).normalize();
        let v = w.cross(u);

        let origin = config.look_from;
        let horizontal = u * viewport_width * config.focus_distance;
        let vertical = v * viewport_height * config.focus_distance;
        let lower_left = origin - horizontal / 2.0 - vertical / 2.0 - w * config.focus_distance;
        let lens_radius = config.aperture / 2.0;

        log::debug!("camera at {origin} basis u={u} v={v} w={w}, lens radius {lens_radius}");

        Self {
            origin,
            lower_left,
            horizontal,
            vertical,
            u,
            v,
            w,
            lens_radius,
            aspect_ratio: config.aspect_ratio,
        }
    }

    /// Generate a ray through normalized image-plane coordinates.
    ///
    /// `s` runs left to right and `t` bottom to top, both in [0, 1].
    pub fn get_ray(&self, s: f64, t: f64, rng: &mut dyn RngCore) -> Ray {
        let rd = self.lens_radius * random_in_unit_disk(rng);
        let offset = self.u * rd.x + self.v * rd.y;

        let target = self.lower_left + self.horizontal * s + self.vertical * t;
        Ray::new(self.origin + offset, target - self.origin - offset)
    }

    pub fn origin(&self) -> Point3 {
        self.origin
    }

    /// Camera basis as (u, v, w): right, up and backward.
    pub fn basis(&self) -> (Vec3, Vec3, Vec3) {
        (self.u, self.v, self.w)
    }

    pub fn lens_radius(&self) -> f64 {
        self.lens_radius
    }

    pub fn aspect_ratio(&self) -> f64 {
        self.aspect_ratio
    }
}
