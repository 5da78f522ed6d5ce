//! Scene and render configuration loaded from JSON.
//!
//! A scene file looks like:
//!
//! ```json
//! {
//!   "settings": { "imgWidth": 400, "samplesPerPixel": 100, "maxDepth": 50, "seed": 1 },
//!   "camera": { "lookFrom": {"x": 13, "y": 2, "z": 3}, "lookAt": {"x": 0, "y": 0, "z": 0},
//!               "vfov": 20, "aspectRatio": 1.5, "aperture": 0.1, "focusDistance": 10 },
//!   "objects": [
//!     { "center": {"x": 0, "y": -1000, "z": 0}, "radius": 1000,
//!       "material": { "type": "lambertian", "albedo": {"x": 0.5, "y": 0.5, "z": 0.5} } }
//!   ]
//! }
//! ```
//!
//! `settings.aspect`, when present, overrides `camera.aspectRatio`.

use std::fs;
use std::path::Path;

use crate::material::MaterialError;
use crate::{Camera, CameraConfig, HittableList, Material, RenderConfig, Sphere};
use lumen_math::{Point3, Vec3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while loading a scene.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("object {index}: {source}")]
    Material {
        index: usize,
        #[source]
        source: MaterialError,
    },

    #[error("object {index}: {reason}")]
    InvalidObject { index: usize, reason: String },

    #[error("invalid camera: {0}")]
    InvalidCamera(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// A vector written out as `{"x": .., "y": .., "z": ..}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vec3Description {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl From<Vec3Description> for Vec3 {
    fn from(d: Vec3Description) -> Self {
        Vec3::new(d.x, d.y, d.z)
    }
}

impl From<Vec3> for Vec3Description {
    fn from(v: Vec3) -> Self {
        Self { x: v.x, y: v.y, z: v.z }
    }
}

/// `#[serde(with = "xyz")]` for `Vec3` fields in the `{x, y, z}` shape.
pub(crate) mod xyz {
    use super::Vec3Description;
    use lumen_math::Vec3;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(v: &Vec3, serializer: S) -> Result<S::Ok, S::Error> {
        Vec3Description::from(*v).serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec3, D::Error> {
        Vec3Description::deserialize(deserializer).map(Vec3::from)
    }
}

/// Image and sampling settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RenderSettings {
    /// Image width in pixels; the height follows from the aspect ratio
    pub img_width: u32,
    /// Overrides the camera's aspect ratio when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aspect: Option<f64>,
    pub samples_per_pixel: u32,
    pub max_depth: u32,
    pub seed: u64,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            img_width: 400,
            aspect: None,
            samples_per_pixel: 100,
            max_depth: 50,
            seed: 0,
        }
    }
}

/// A sphere in a scene file. The material stays raw JSON until
/// [`SceneDescription::build`] decodes it, so errors can name the object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SphereDescription {
    #[serde(with = "xyz")]
    pub center: Point3,
    pub radius: f64,
    pub material: serde_json::Value,
}

/// A complete scene: settings, camera and objects.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneDescription {
    pub settings: RenderSettings,
    pub camera: CameraConfig,
    pub objects: Vec<SphereDescription>,
}

/// A scene ready to render.
pub struct Scene {
    pub camera: Camera,
    pub world: HittableList,
    pub config: RenderConfig,
}

impl SceneDescription {
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a scene description from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let description = Self::from_json(&content)?;
        log::info!(
            "loaded scene {} with {} objects",
            path.display(),
            description.objects.len()
        );
        Ok(description)
    }

    /// Camera settings with the settings-level aspect ratio applied.
    pub fn camera_config(&self) -> CameraConfig {
        match self.settings.aspect {
            Some(aspect) => self.camera.clone().with_aspect_ratio(aspect),
            None => self.camera.clone(),
        }
    }

    /// Render settings with the image height derived from the aspect ratio.
    pub fn render_config(&self) -> RenderConfig {
        let width = self.settings.img_width;
        let aspect_ratio = self.camera_config().aspect_ratio;
        let height = ((width as f64 / aspect_ratio).round() as u32).max(1);
        RenderConfig {
            image_width: width,
            image_height: height,
            samples_per_pixel: self.settings.samples_per_pixel,
            max_depth: self.settings.max_depth,
            seed: self.settings.seed,
        }
    }

    /// Validate everything and build the camera and world.
    ///
    /// Fails on the first bad object or a degenerate camera; nothing is
    /// replaced with a default.
    pub fn build(&self) -> ConfigResult<Scene> {
        let camera = self.camera_config().build()?;

        let mut world = HittableList::new();
        for (index, object) in self.objects.iter().enumerate() {
            if !(object.radius.is_finite() && object.radius > 0.0) {
                return Err(ConfigError::InvalidObject {
                    index,
                    reason: format!("radius must be positive, got {}", object.radius),
                });
            }
            let material = Material::from_value(object.material.clone())
                .map_err(|source| ConfigError::Material { index, source })?;
            world.add(Box::new(Sphere::new(object.center, object.radius, material)));
        }

        Ok(Scene {
            camera,
            world,
            config: self.render_config(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Hittable, Ray};
    use lumen_math::Interval;

    const SCENE: &str = r#"{
        "settings": {"imgWidth": 300, "samplesPerPixel": 8, "maxDepth": 5, "seed": 3},
        "camera": {
            "lookFrom": {"x": 0, "y": 0, "z": 0},
            "lookAt": {"x": 0, "y": 0, "z": -1},
            "viewUp": {"x": 0, "y": 1, "z": 0},
            "vfov": 90,
            "aspectRatio": 2.0,
            "aperture": 0,
            "focusDistance": 1
        },
        "objects": [
            {"center": {"x": 0, "y": 0, "z": -1}, "radius": 0.5,
             "material": {"type": "Lambertian", "albedo": {"x": 0.1, "y": 0.2, "z": 0.5}}},
            {"center": {"x": 1, "y": 0, "z": -1}, "radius": 0.5,
             "material": {"type": "metal", "albedo": {"x": 0.8, "y": 0.6, "z": 0.2}, "fuzz": 0.0}},
            {"center": {"x": -1, "y": 0, "z": -1}, "radius": 0.5,
             "material": {"type": "dielectric", "refindex": 1.5}}
        ]
    }"#;

    #[test]
    fn test_parse_scene() {
        let description = SceneDescription::from_json(SCENE).expect("valid scene");

        assert_eq!(description.settings.img_width, 300);
        assert_eq!(description.camera.aspect_ratio, 2.0);
        assert_eq!(description.objects.len(), 3);
        assert_eq!(description.objects[1].center, Point3::new(1.0, 0.0, -1.0));
    }

    #[test]
    fn test_render_config_derives_height() {
        let description = SceneDescription::from_json(SCENE).expect("valid scene");
        let config = description.render_config();

        assert_eq!(config.image_width, 300);
        assert_eq!(config.image_height, 150);
        assert_eq!(config.samples_per_pixel, 8);
        assert_eq!(config.max_depth, 5);
        assert_eq!(config.seed, 3);
    }

    #[test]
    fn test_build_scene() {
        let scene = SceneDescription::from_json(SCENE)
            .expect("valid scene")
            .build()
            .expect("scene builds");

        assert_eq!(scene.world.len(), 3);
        let rec = scene
            .world
            .hit(&Ray::new(Point3::ZERO, Vec3::NEG_Z), Interval::new(0.001, f64::INFINITY))
            .expect("center sphere is in view");
        assert_eq!(rec.material.kind(), "lambertian");
    }

    #[test]
    fn test_bad_material_names_object() {
        let json = r#"{"objects": [
            {"center": {"x": 0, "y": 0, "z": -1}, "radius": 0.5,
             "material": {"type": "lambertian"}},
            {"center": {"x": 0, "y": 0, "z": -3}, "radius": 0.5,
             "material": {"type": "plasma"}}
        ]}"#;
        let err = SceneDescription::from_json(json)
            .expect("structurally valid")
            .build()
            .err()
            .expect("unknown material must fail");

        match err {
            ConfigError::Material { index, source } => {
                assert_eq!(index, 1);
                assert!(matches!(source, MaterialError::UnknownKind(_)));
            }
            other => panic!("expected material error, got {other:?}"),
        }
    }

    #[test]
    fn test_bad_radius_names_object() {
        for radius in ["-0.4", "0"] {
            let json = format!(
                r#"{{"objects": [
                    {{"center": {{"x": 0, "y": 0, "z": -1}}, "radius": 0.5,
                      "material": {{"type": "lambertian"}}}},
                    {{"center": {{"x": 0, "y": 0, "z": -3}}, "radius": {radius},
                      "material": {{"type": "lambertian"}}}}
                ]}}"#
            );
            let err = SceneDescription::from_json(&json)
                .expect("structurally valid")
                .build()
                .err()
                .expect("non-positive radius must fail");

            match err {
                ConfigError::InvalidObject { index, reason } => {
                    assert_eq!(index, 1);
                    assert!(reason.contains("radius"), "{reason}");
                }
                other => panic!("expected object error, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_settings_aspect_overrides_camera() {
        let json = r#"{
            "settings": {"imgWidth": 300, "aspect": 1.5},
            "camera": {"aspectRatio": 2.0}
        }"#;
        let description = SceneDescription::from_json(json).expect("valid scene");
        assert_eq!(description.settings.aspect, Some(1.5));
        assert_eq!(description.render_config().image_height, 200);

        let scene = description.build().expect("scene builds");
        assert_eq!(scene.camera.aspect_ratio(), 1.5);
        assert_eq!(scene.config.image_height, 200);
    }

    #[test]
    fn test_bad_settings_aspect_fails_build() {
        let json = r#"{"settings": {"aspect": 0}}"#;
        let result = SceneDescription::from_json(json).expect("structurally valid").build();
        assert!(matches!(result, Err(ConfigError::InvalidCamera(_))));
    }

    #[test]
    fn test_bad_camera_fails_build() {
        let json = r#"{"camera": {"lookAt": {"x": 0, "y": 5, "z": 0}}}"#;
        let result = SceneDescription::from_json(json).expect("structurally valid").build();
        assert!(matches!(result, Err(ConfigError::InvalidCamera(_))));
    }

    #[test]
    fn test_empty_scene_uses_defaults() {
        let description = SceneDescription::from_json("{}").expect("valid scene");
        assert_eq!(description, SceneDescription::default());
        assert!(description.objects.is_empty());
        assert_eq!(description.render_config().image_height, 225);
    }

    #[test]
    fn test_load_missing_file() {
        let err = SceneDescription::load("/nonexistent/scene.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_load_from_disk() {
        let path = std::env::temp_dir().join(format!("lumen_scene_{}.json", std::process::id()));
        fs::write(&path, SCENE).expect("temp dir is writable");

        let description = SceneDescription::load(&path).expect("scene loads");
        let _ = fs::remove_file(&path);

        assert_eq!(description.objects.len(), 3);
    }

    #[test]
    fn test_vec3_description_round_trip_shape() {
        let description = Vec3Description::from(Vec3::new(1.0, 2.0, 3.0));
        let json = serde_json::to_value(description).expect("serializable");
        assert_eq!(json, serde_json::json!({"x": 1.0, "y": 2.0, "z": 3.0}));
    }
}
