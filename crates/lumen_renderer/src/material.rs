//! Surface scattering: how light interacts with a hit point.
//!
//! The set of materials is closed. [`Material`] is an enum over the three
//! models and dispatches [`Scatter::scatter`] with a single `match`. Each
//! model is its own struct so it can be built and tested on its own.

use crate::config::Vec3Description;
use crate::sampling::{gen_f64, random_in_unit_sphere, random_unit_vector};
use crate::{HitRecord, Ray};
use lumen_math::{near_zero, reflect, refract, Color};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result of a successful scatter event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScatterResult {
    /// Per-channel factor applied to the light arriving along `scattered`
    pub attenuation: Color,
    /// The outgoing ray, starting at the hit point
    pub scattered: Ray,
}

/// One step of the light transport random walk.
pub trait Scatter {
    /// Scatter an incoming ray at a surface hit.
    ///
    /// Returns `None` when the ray is absorbed.
    fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord<'_>,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult>;
}

/// Lambertian (diffuse) material.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lambertian {
    albedo: Color,
}

impl Lambertian {
    pub fn new(albedo: Color) -> Self {
        Self { albedo }
    }

    pub fn albedo(&self) -> Color {
        self.albedo
    }
}

impl Scatter for Lambertian {
    fn scatter(
        &self,
        _ray_in: &Ray,
        rec: &HitRecord<'_>,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        let mut scatter_direction = rec.normal + random_unit_vector(rng);

        // The random vector can cancel the normal almost exactly
        if near_zero(scatter_direction) {
            scatter_direction = rec.normal;
        }

        Some(ScatterResult {
            attenuation: self.albedo,
            scattered: Ray::new(rec.p, scatter_direction),
        })
    }
}

/// Metal (specular) material.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metal {
    albedo: Color,
    fuzz: f64,
}

impl Metal {
    /// Create a new Metal material.
    ///
    /// - `albedo`: The color of the metal
    /// - `fuzz`: Roughness, 0.0 = perfect mirror, 1.0 = very rough.
    ///   Values outside that range are clamped.
    pub fn new(albedo: Color, fuzz: f64) -> Self {
        let clamped = fuzz.clamp(0.0, 1.0);
        if clamped != fuzz {
            log::warn!("metal fuzz {fuzz} outside [0, 1], clamped to {clamped}");
        }
        Self {
            albedo,
            fuzz: clamped,
        }
    }

    pub fn albedo(&self) -> Color {
        self.albedo
    }

    pub fn fuzz(&self) -> f64 {
        self.fuzz
    }
}

impl Scatter for Metal {
    fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord<'_>,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        let reflected = reflect(ray_in.direction().normalize(), rec.normal);
        let direction = reflected + self.fuzz * random_in_unit_sphere(rng);

        // Fuzz pushed the ray below the surface: absorb it
        if direction.dot(rec.normal) <= 0.0 {
            return None;
        }

        Some(ScatterResult {
            attenuation: self.albedo,
            scattered: Ray::new(rec.p, direction),
        })
    }
}

/// Dielectric (glass) material.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dielectric {
    /// Index of refraction relative to the surrounding medium
    ref_index: f64,
}

impl Dielectric {
    /// Create a new Dielectric material.
    ///
    /// - `ref_index`: Index of refraction (1.0 = air, 1.5 = glass, 2.4 = diamond)
    pub fn new(ref_index: f64) -> Self {
        Self { ref_index }
    }

    pub fn ref_index(&self) -> f64 {
        self.ref_index
    }

    /// Probability of reflection at incidence `cosine`.
    ///
    /// This is `r0 * (1 - r0) * (1 - cos)^5`, not the textbook Schlick
    /// `r0 + (1 - r0) * (1 - cos)^5`. Existing renders were produced with
    /// this curve, so it stays until they are regenerated.
    pub fn reflectance(cosine: f64, ratio: f64) -> f64 {
        let r0 = (1.0 - ratio) / (1.0 + ratio);
        let r0 = r0 * r0;
        r0 * (1.0 - r0) * (1.0 - cosine).powi(5)
    }
}

impl Scatter for Dielectric {
    fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord<'_>,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        let refraction_ratio = if rec.front_face {
            1.0 / self.ref_index
        } else {
            self.ref_index
        };

        let unit_direction = ray_in.direction().normalize();
        let cos_theta = (-unit_direction).dot(rec.normal).min(1.0);
        let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();

        let cannot_refract = refraction_ratio * sin_theta > 1.0;
        let reflects = cannot_refract
            || gen_f64(rng) < Self::reflectance(cos_theta, refraction_ratio);
        let direction = if reflects {
            reflect(unit_direction, rec.normal)
        } else {
            refract(unit_direction, rec.normal, refraction_ratio)
        };

        Some(ScatterResult {
            attenuation: Color::ONE,
            scattered: Ray::new(rec.p, direction),
        })
    }
}

/// The closed set of surface materials.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Material {
    Lambertian(Lambertian),
    Metal(Metal),
    Dielectric(Dielectric),
}

impl Material {
    /// Decode a material from its JSON key-value description.
    pub fn from_json(json: &str) -> MaterialResult<Self> {
        let description: MaterialDescription = serde_json::from_str(json)?;
        Self::try_from(description)
    }

    /// Decode a material from an already parsed JSON value.
    pub fn from_value(value: serde_json::Value) -> MaterialResult<Self> {
        let description: MaterialDescription = serde_json::from_value(value)?;
        Self::try_from(description)
    }

    /// Lower-case name of the material kind, as used in descriptions.
    pub fn kind(&self) -> &'static str {
        match self {
            Material::Lambertian(_) => "lambertian",
            Material::Metal(_) => "metal",
            Material::Dielectric(_) => "dielectric",
        }
    }
}

impl Scatter for Material {
    fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord<'_>,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        match self {
            Material::Lambertian(m) => m.scatter(ray_in, rec, rng),
            Material::Metal(m) => m.scatter(ray_in, rec, rng),
            Material::Dielectric(m) => m.scatter(ray_in, rec, rng),
        }
    }
}

impl From<Lambertian> for Material {
    fn from(m: Lambertian) -> Self {
        Material::Lambertian(m)
    }
}

impl From<Metal> for Material {
    fn from(m: Metal) -> Self {
        Material::Metal(m)
    }
}

impl From<Dielectric> for Material {
    fn from(m: Dielectric) -> Self {
        Material::Dielectric(m)
    }
}

// =============================================================================
// Descriptions
// =============================================================================

/// Errors raised while building a material from a description.
#[derive(Error, Debug)]
pub enum MaterialError {
    #[error("unrecognized material: missing `type` field")]
    MissingKind,

    #[error("unrecognized material type: {0:?}")]
    UnknownKind(String),

    #[error("unrecognized material: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("unrecognized material: dielectric refindex must be positive and finite, got {0}")]
    InvalidRefIndex(f64),
}

pub type MaterialResult<T> = Result<T, MaterialError>;

/// Key-value description of a material.
///
/// Only `type` is required. Absent optional fields take the zero value:
/// a missing albedo is black, a missing fuzz is a perfect mirror.
/// Unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MaterialDescription {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub albedo: Option<Vec3Description>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fuzz: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refindex: Option<f64>,
}

impl TryFrom<MaterialDescription> for Material {
    type Error = MaterialError;

    fn try_from(description: MaterialDescription) -> MaterialResult<Self> {
        let kind = description.kind.ok_or(MaterialError::MissingKind)?;
        let albedo = description.albedo.map(Color::from).unwrap_or(Color::ZERO);

        let material = match kind.to_lowercase().as_str() {
            "lambertian" => Material::Lambertian(Lambertian::new(albedo)),
            "metal" => Material::Metal(Metal::new(albedo, description.fuzz.unwrap_or(0.0))),
            "dielectric" => {
                let ref_index = description.refindex.unwrap_or(0.0);
                if !(ref_index.is_finite() && ref_index > 0.0) {
                    return Err(MaterialError::InvalidRefIndex(ref_index));
                }
                Material::Dielectric(Dielectric::new(ref_index))
            }
            _ => return Err(MaterialError::UnknownKind(kind)),
        };

        log::debug!("decoded {} material: {:?}", material.kind(), material);
        Ok(material)
    }
}
