//! Core path tracing renderer.
//!
//! Implements Monte Carlo path tracing with:
//! - Recursive ray tracing with configurable depth
//! - Anti-aliasing via jittered multi-sampling
//! - Row-parallel rendering with one independent RNG per image row

use std::time::Instant;

use crate::sampling::gen_f64;
use crate::{Camera, Color, Hittable, Ray, Scatter};
use lumen_math::Interval;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use rayon::prelude::*;

/// Rays start this far along their direction to skip self-intersection.
const SHADOW_ACNE_EPSILON: f64 = 0.001;

/// Render configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    pub image_width: u32,
    pub image_height: u32,
    /// Samples per pixel for anti-aliasing
    pub samples_per_pixel: u32,
    /// Maximum ray bounce depth
    pub max_depth: u32,
    /// Base seed; each row derives its own generator from it
    pub seed: u64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            image_width: 400,
            image_height: 225,
            samples_per_pixel: 100,
            max_depth: 50,
            seed: 0,
        }
    }
}

/// Compute the color seen by a ray.
///
/// Follows the ray through the world, multiplying in each surface's
/// attenuation, until it escapes to the sky, is absorbed, or runs out of
/// bounces.
pub fn ray_color(ray: &Ray, world: &dyn Hittable, depth: u32, rng: &mut dyn RngCore) -> Color {
    if depth == 0 {
        return Color::ZERO;
    }

    let Some(rec) = world.hit(ray, Interval::new(SHADOW_ACNE_EPSILON, f64::INFINITY)) else {
        return sky_gradient(ray);
    };

    match rec.material.scatter(ray, &rec, rng) {
        Some(result) => result.attenuation * ray_color(&result.scattered, world, depth - 1, rng),
        None => Color::ZERO,
    }
}

/// Background: white straight down blending to light blue straight up.
fn sky_gradient(ray: &Ray) -> Color {
    let unit_direction = ray.direction().normalize();
    let a = 0.5 * (unit_direction.y + 1.0);
    Color::ONE * (1.0 - a) + Color::new(0.5, 0.7, 1.0) * a
}

/// Render a single pixel with multi-sampling.
///
/// `(x, y)` are image coordinates with `y = 0` at the top row.
pub fn render_pixel(
    camera: &Camera,
    world: &dyn Hittable,
    x: u32,
    y: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    let width_span = config.image_width.saturating_sub(1).max(1) as f64;
    let height_span = config.image_height.saturating_sub(1).max(1) as f64;
    let row_from_bottom = config.image_height.saturating_sub(1 + y) as f64;

    let mut pixel_color = Color::ZERO;
    for _ in 0..config.samples_per_pixel {
        let s = (x as f64 + gen_f64(rng)) / width_span;
        let t = (row_from_bottom + gen_f64(rng)) / height_span;
        let ray = camera.get_ray(s, t, rng);
        pixel_color += ray_color(&ray, world, config.max_depth, rng);
    }

    pixel_color / config.samples_per_pixel.max(1) as f64
}

/// Generator for one image row, derived from the base seed.
fn row_rng(seed: u64, row: u32) -> StdRng {
    StdRng::seed_from_u64(seed ^ (row as u64 + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15))
}

/// Render the entire scene, rows in parallel.
///
/// Output is deterministic for a given `config.seed` regardless of how
/// rayon schedules the rows.
pub fn render(camera: &Camera, world: &dyn Hittable, config: &RenderConfig) -> ImageBuffer {
    let start = Instant::now();
    log::info!(
        "rendering {}x{} @ {} spp, max depth {}",
        config.image_width,
        config.image_height,
        config.samples_per_pixel,
        config.max_depth
    );

    let mut image = ImageBuffer::new(config.image_width, config.image_height);
    if config.image_width == 0 {
        return image;
    }

    image
        .pixels
        .par_chunks_mut(config.image_width as usize)
        .enumerate()
        .for_each(|(y, row)| {
            let y = y as u32;
            let mut rng = row_rng(config.seed, y);
            for (x, pixel) in row.iter_mut().enumerate() {
                *pixel = render_pixel(camera, world, x as u32, y, config, &mut rng);
            }
        });

    log::info!("rendered in {:?}", start.elapsed());
    image
}

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f64) -> f64 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Convert a linear color to gamma-corrected 8-bit RGB.
pub fn color_to_rgb8(color: Color) -> [u8; 3] {
    let channel = |c: f64| (256.0 * linear_to_gamma(c).clamp(0.0, 0.999)) as u8;
    [channel(color.x), channel(color.y), channel(color.z)]
}

/// Linear color pixels in row-major order, top row first.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    /// Row-major index of `(x, y)`.
    fn index(&self, x: u32, y: u32) -> usize {
        debug_assert!(
            x < self.width && y < self.height,
            "pixel ({x}, {y}) outside {}x{} image",
            self.width,
            self.height
        );
        y as usize * self.width as usize + x as usize
    }

    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let index = self.index(x, y);
        self.pixels[index] = color;
    }

    /// Convert to packed 8-bit RGB bytes.
    pub fn to_rgb8(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|c| color_to_rgb8(*c)).collect()
    }
}
