//! Lumen renderer - CPU path tracing core.
//!
//! Light transport and shading for a Monte Carlo path tracer:
//!
//! - **Camera**: thin-lens ray generation with depth of field
//! - **Materials**: Lambertian, metal and dielectric scattering
//! - **Integrator**: recursive radiance estimate and a row-parallel driver
//! - **Config**: JSON scene descriptions with validated materials
//!
//! All types are immutable once built and safe to share across threads.
//! Randomness is always passed in as `&mut dyn RngCore`; there is no
//! global generator.
//!
//! # Example
//!
//! ```ignore
//! use lumen_renderer::{render, SceneDescription};
//!
//! let scene = SceneDescription::load("scene.json")?.build()?;
//! let image = render(&scene.camera, &scene.world, &scene.config);
//! let bytes = image.to_rgb8();
//! ```

mod camera;
mod config;
mod hittable;
mod material;
mod renderer;
pub mod sampling;
mod sphere;

pub use camera::{Camera, CameraConfig};
pub use config::{
    ConfigError, ConfigResult, RenderSettings, Scene, SceneDescription, SphereDescription,
    Vec3Description,
};
pub use hittable::{HitRecord, Hittable, HittableList};
pub use material::{
    Dielectric, Lambertian, Material, MaterialDescription, MaterialError, MaterialResult, Metal,
    Scatter, ScatterResult,
};
pub use renderer::{
    color_to_rgb8, linear_to_gamma, ray_color, render, render_pixel, ImageBuffer, RenderConfig,
};
pub use sphere::Sphere;

/// Re-export the math types used throughout the API
pub use lumen_math::{Color, Interval, Point3, Ray, Vec3};
