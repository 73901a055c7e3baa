//! Scene validation - ensures a document is consistent before it is used
//!
//! Deserialization already guarantees that every token is known and every
//! value has the right shape. This pass checks what the types can't:
//! - Index references resolve inside their target section
//! - Group levels form a tree whose inner nodes are groups
//! - Numeric fields are inside their domain
//! - Shape specific fields are present only where they belong

use crate::document::{
    BvhSettings, ColorValue, EmitterKind, ModelIndex, ObjectKind, RenderingMethodKind,
    SceneDocument, SceneObject, SurfaceKind, TextureKind,
};
use crate::hierarchy::ObjectTree;
use crate::schema::ShapeType;

/// Result of validation
pub type ValidationResult<T = ()> = Result<T, ValidationError>;

/// Errors that can occur during validation
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// An index field points outside its target section
    InvalidReference {
        path: String,
        index: usize,
        len: usize,
    },
    /// A value outside its domain, a malformed tree, or fields that don't belong together
    SchemaViolation { path: String, message: String },
}

impl ValidationError {
    /// Token path of the offending field, e.g. `Object[3].SurfaceIndex`
    pub fn path(&self) -> &str {
        match self {
            Self::InvalidReference { path, .. } | Self::SchemaViolation { path, .. } => path,
        }
    }

    fn violation(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SchemaViolation {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidReference { path, index, len } => {
                write!(f, "Invalid reference at {}: index {} out of {} entries", path, index, len)
            }
            Self::SchemaViolation { path, message } if path.is_empty() => {
                write!(f, "Schema violation: {}", message)
            }
            Self::SchemaViolation { path, message } => {
                write!(f, "Schema violation at {}: {}", path, message)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validation pass over a whole document
#[derive(Debug, Default)]
pub struct SceneValidator {
    errors: Vec<ValidationError>,
}

impl SceneValidator {
    /// Validate a document, stopping at the first error
    pub fn validate(document: &SceneDocument) -> ValidationResult {
        match Self::collect(document).into_iter().next() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    /// Every error in the document, in section order
    pub fn collect(document: &SceneDocument) -> Vec<ValidationError> {
        let mut validator = Self::default();
        validator.check_system(document);
        validator.check_color(document);
        validator.check_bvh(document);
        validator.check_rendering_method(document);
        validator.check_textures(document);
        validator.check_surfaces(document);
        validator.check_emitters(document);
        validator.check_objects(document);
        validator.errors
    }

    fn reference<T>(&mut self, path: String, index: ModelIndex<T>, models: &[T]) {
        if index.resolve(models).is_none() {
            self.errors.push(ValidationError::InvalidReference {
                path,
                index: index.get(),
                len: models.len(),
            });
        }
    }

    fn require(&mut self, condition: bool, path: impl Into<String>, message: impl Into<String>) {
        if !condition {
            self.errors.push(ValidationError::violation(path, message));
        }
    }

    fn check_system(&mut self, document: &SceneDocument) {
        let system = &document.system;
        self.require(system.num_of_threads > 0, "System.NumOfThreads", "must be positive");
        let [width, height] = system.image_resolution;
        self.require(
            width > 0 && height > 0,
            "System.ImageResolution",
            format!("{}x{} is not a valid resolution", width, height),
        );
    }

    fn check_color(&mut self, document: &SceneDocument) {
        let color = &document.color;
        self.require(
            color.gamma.is_finite() && color.gamma > 0.0,
            "Color.Gamma",
            "must be positive",
        );
        self.require(color.exposure.is_finite(), "Color.Exposure", "must be finite");
        if color.enable_denoising {
            self.require(color.histogram_bins > 0, "Color.HistogramBins", "must be positive");
            self.require(color.number_of_scales > 0, "Color.NumberOfScales", "must be positive");
        }
    }

    fn check_bvh(&mut self, document: &SceneDocument) {
        match &document.bvh {
            BvhSettings::BinaryRadixTree => {}
            BvhSettings::ApproximateAgglomerativeClustering { delta, epsilon } => {
                self.require(*delta > 0, "Bvh.Delta", "must be positive");
                self.require(
                    epsilon.is_finite() && *epsilon >= 0.0,
                    "Bvh.Epsilon",
                    "must not be negative",
                );
            }
            BvhSettings::AgglomerativeTreeletRestructuring {
                optimization_loop_count,
                treelet_size,
            } => {
                self.require(*treelet_size >= 2, "Bvh.TreeletSize", "must be at least 2");
                self.require(
                    *optimization_loop_count > 0,
                    "Bvh.OptimizationLoopCount",
                    "must be positive",
                );
            }
        }
    }

    fn check_rendering_method(&mut self, document: &SceneDocument) {
        let method = &document.rendering_method;
        self.require(
            method.ray_cast_epsilon.is_finite() && method.ray_cast_epsilon > 0.0,
            "RenderingMethod.RayCastEpsilon",
            "must be positive",
        );
        self.require(method.path_length > 0, "RenderingMethod.PathLength", "must be positive");

        if let RenderingMethodKind::ProbabilisticPpm {
            k_nearest_neighbor,
            num_of_photons,
            photon_search_radius,
            radius_reduction_rate,
            ..
        } = &method.method
        {
            self.require(*num_of_photons > 0, "RenderingMethod.NumOfPhotons", "must be positive");
            self.require(
                photon_search_radius.is_finite() && *photon_search_radius > 0.0,
                "RenderingMethod.PhotonSearchRadius",
                "must be positive",
            );
            self.require(
                *radius_reduction_rate > 0.0 && *radius_reduction_rate <= 1.0,
                "RenderingMethod.RadiusReductionRate",
                "must be in (0, 1]",
            );
            self.require(
                *k_nearest_neighbor > 0,
                "RenderingMethod.KNearestNeighbor",
                "must be positive",
            );
        }
    }

    fn check_color_value(&mut self, path: String, color: &ColorValue) {
        match color {
            ColorValue::Rgb { value } => self.require(
                value.iter().all(|c| c.is_finite() && *c >= 0.0),
                path,
                "RGB components must be finite and non-negative",
            ),
            ColorValue::Spectra { value } => {
                self.require(!value.is_empty(), path, "spectra file path is empty")
            }
        }
    }

    fn check_textures(&mut self, document: &SceneDocument) {
        for (i, texture) in document.texture_models.iter().enumerate() {
            let base = format!("TextureModel[{}]", i);
            match &texture.kind {
                TextureKind::Value { value } => self.require(
                    (0.0..=1.0).contains(value),
                    format!("{}.Value", base),
                    format!("{} is not in [0, 1]", value),
                ),
                TextureKind::Unicolor { color } => {
                    self.check_color_value(format!("{}.Color", base), color)
                }
                TextureKind::Checkerboard {
                    color1,
                    color2,
                    height,
                    width,
                } => {
                    self.check_color_value(format!("{}.Color1", base), color1);
                    self.check_color_value(format!("{}.Color2", base), color2);
                    self.require(
                        *width > 0 && *height > 0,
                        format!("{}.Width", base),
                        "checkerboard resolution must be positive",
                    );
                }
                TextureKind::Image { image_file_path } => self.require(
                    !image_file_path.is_empty(),
                    format!("{}.ImageFilePath", base),
                    "image file path is empty",
                ),
            }
        }
    }

    fn check_surfaces(&mut self, document: &SceneDocument) {
        for (i, surface) in document.surface_models.iter().enumerate() {
            for (field, index) in surface.texture_references() {
                self.reference(
                    format!("SurfaceModel[{}].{}", i, field),
                    index,
                    &document.texture_models,
                );
            }
            if let SurfaceKind::Cloth {
                bandwidth_parameter,
                isotropic_scattering_coefficient,
                ..
            } = &surface.kind
            {
                self.require(
                    *isotropic_scattering_coefficient >= 0.0,
                    format!("SurfaceModel[{}].IsotropicScatteringCoefficient", i),
                    "must not be negative",
                );
                self.require(
                    *bandwidth_parameter > 0.0,
                    format!("SurfaceModel[{}].BandwidthParameter", i),
                    "must be positive",
                );
            }
        }
    }

    fn check_emitters(&mut self, document: &SceneDocument) {
        for (i, emitter) in document.emitter_models.iter().enumerate() {
            match &emitter.kind {
                EmitterKind::NonDirectional {
                    emissive_color_index,
                    radiant_exitance,
                } => {
                    self.reference(
                        format!("EmitterModel[{}].EmissiveColorIndex", i),
                        *emissive_color_index,
                        &document.texture_models,
                    );
                    self.require(
                        radiant_exitance.is_finite() && *radiant_exitance >= 0.0,
                        format!("EmitterModel[{}].RadiantExitance", i),
                        format!("{} is not a valid radiant exitance", radiant_exitance),
                    );
                }
            }
        }
    }

    fn check_objects(&mut self, document: &SceneDocument) {
        let objects = &document.objects;
        let tree = ObjectTree::build(objects);

        // The camera comes first, then the World group that holds every other object
        match objects.first() {
            None => self.require(false, "Object", "the scene has no camera"),
            Some(first) => self.require(
                first.is_camera(),
                "Object[0].Type",
                format!("the first object must be the camera, found {}", first.symbol()),
            ),
        }
        match objects.get(1) {
            None => self.require(false, "Object", "the scene has no world group"),
            Some(world) => self.require(
                world.is_group() && world.group_level == 0,
                "Object[1].Type",
                "the second object must be the world group at level 0",
            ),
        }

        let mut previous_level: Option<u32> = None;
        for (i, object) in objects.iter().enumerate() {
            let base = format!("Object[{}]", i);
            let level = object.group_level;

            match previous_level {
                None => self.require(
                    level == 0,
                    format!("{}.GroupLevel", base),
                    "the first object must be at level 0",
                ),
                Some(previous) => self.require(
                    level <= previous.saturating_add(1),
                    format!("{}.GroupLevel", base),
                    format!("level jumps from {} to {}", previous, level),
                ),
            }
            if i >= 2 {
                self.require(
                    level >= 1,
                    format!("{}.GroupLevel", base),
                    "objects after the world group must be inside it",
                );
            }
            previous_level = Some(level);

            if let Some(parent) = tree.parent(i) {
                self.require(
                    objects[parent].is_group(),
                    format!("{}.GroupLevel", base),
                    format!("parent '{}' is not a group", objects[parent].name),
                );
            }

            for (t, transformation) in object.transformation.iter().enumerate() {
                self.require(
                    transformation.components().iter().all(|c| c.is_finite()),
                    format!("{}.Transformation[{}]", base, t),
                    "transformation values must be finite",
                );
            }

            self.check_object_kind(document, &base, object);
        }
    }

    fn check_object_kind(&mut self, document: &SceneDocument, base: &str, object: &SceneObject) {
        match &object.kind {
            ObjectKind::Camera { angle_of_view, .. } => {
                self.require(
                    object.group_level == 0,
                    format!("{}.GroupLevel", base),
                    "cameras must be at level 0",
                );
                self.require(
                    *angle_of_view > 0.0 && *angle_of_view < 180.0,
                    format!("{}.AngleOfView", base),
                    format!("{} is not in (0, 180)", angle_of_view),
                );
            }
            ObjectKind::Group => {}
            ObjectKind::Single {
                emitter_index,
                object_file_path,
                shape_type,
                smoothing,
                surface_index,
                ..
            } => {
                self.reference(
                    format!("{}.SurfaceIndex", base),
                    *surface_index,
                    &document.surface_models,
                );
                self.reference(
                    format!("{}.EmitterIndex", base),
                    *emitter_index,
                    &document.emitter_models,
                );
                match shape_type {
                    ShapeType::Mesh => self.require(
                        object_file_path.as_deref().map_or(false, |p| !p.is_empty()),
                        format!("{}.ObjectFilePath", base),
                        "mesh objects need a file path",
                    ),
                    ShapeType::Plane => self.require(
                        object_file_path.is_none() && smoothing.is_none(),
                        format!("{}.ShapeType", base),
                        "plane objects can't carry mesh fields",
                    ),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{cornell_box_scene, empty_scene};
    use crate::document::{SurfaceIndex, Transformation};

    #[test]
    fn test_built_in_scenes_are_valid() {
        assert!(SceneValidator::collect(&cornell_box_scene()).is_empty());
        assert!(SceneValidator::collect(&empty_scene()).is_empty());
    }

    #[test]
    fn test_surface_index_out_of_range() {
        let mut scene = cornell_box_scene();
        if let ObjectKind::Single { surface_index, .. } = &mut scene.objects[3].kind {
            *surface_index = SurfaceIndex::new(3);
        }

        let err = SceneValidator::validate(&scene).unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidReference {
                path: "Object[3].SurfaceIndex".into(),
                index: 3,
                len: 3,
            }
        );
        assert_eq!(err.to_string(), "Invalid reference at Object[3].SurfaceIndex: index 3 out of 3 entries");
    }

    #[test]
    fn test_emissive_color_index_out_of_range() {
        let mut scene = cornell_box_scene();
        scene.texture_models.pop();

        let errors = SceneValidator::collect(&scene);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].path(), "EmitterModel[0].EmissiveColorIndex");
    }

    #[test]
    fn test_group_level_jump() {
        let mut scene = cornell_box_scene();
        scene.objects[2].group_level = 3;

        let errors = SceneValidator::collect(&scene);
        assert!(errors.iter().any(|e| e.path() == "Object[2].GroupLevel"));
    }

    #[test]
    fn test_parent_must_be_group() {
        let mut scene = empty_scene();
        scene.objects.push(SceneObject::plane("Floor", 1, 0));
        scene.objects.push(SceneObject::plane("Decal", 2, 0));

        let err = SceneValidator::validate(&scene).unwrap_err();
        assert_eq!(err.path(), "Object[3].GroupLevel");
    }

    #[test]
    fn test_scene_needs_a_camera() {
        let mut scene = empty_scene();
        scene.objects.remove(0);

        let err = SceneValidator::validate(&scene).unwrap_err();
        assert_eq!(err.path(), "Object[0].Type");

        scene.objects.clear();
        let paths: Vec<_> = SceneValidator::collect(&scene).iter().map(|e| e.path().to_string()).collect();
        assert_eq!(paths, ["Object", "Object"]);
    }

    #[test]
    fn test_second_object_is_world_group() {
        let mut scene = cornell_box_scene();
        scene.objects.remove(1);
        for object in &mut scene.objects {
            object.group_level = 0;
        }

        let errors = SceneValidator::collect(&scene);
        assert_eq!(errors[0].path(), "Object[1].Type");
        assert!(errors.iter().all(|e| matches!(e, ValidationError::SchemaViolation { .. })));
    }

    #[test]
    fn test_objects_stay_inside_world() {
        let mut scene = cornell_box_scene();
        scene.objects.push(SceneObject::plane("Stray", 0, 0));

        let err = SceneValidator::validate(&scene).unwrap_err();
        assert_eq!(err.path(), "Object[10].GroupLevel");
        assert!(matches!(err, ValidationError::SchemaViolation { .. }));
    }

    #[test]
    fn test_camera_must_come_first() {
        let mut scene = cornell_box_scene();
        scene.objects.swap(0, 1);

        let paths: Vec<_> = SceneValidator::collect(&scene).iter().map(|e| e.path().to_string()).collect();
        assert_eq!(&paths[..2], ["Object[0].Type", "Object[1].Type"]);
    }

    #[test]
    fn test_huge_group_level() {
        let mut scene = cornell_box_scene();
        scene.objects[2].group_level = u32::MAX;
        scene.objects[3].group_level = u32::MAX;

        let errors = SceneValidator::collect(&scene);
        assert_eq!(errors[0].path(), "Object[2].GroupLevel");
        assert!(errors.iter().all(|e| matches!(e, ValidationError::SchemaViolation { .. })));
    }

    #[test]
    fn test_numeric_domains() {
        let mut scene = cornell_box_scene();
        scene.system.num_of_threads = 0;
        scene.rendering_method.ray_cast_epsilon = 0.0;
        if let EmitterKind::NonDirectional { radiant_exitance, .. } = &mut scene.emitter_models[0].kind {
            *radiant_exitance = -1.0;
        }
        scene.objects[2].transformation.push(Transformation::translation(f64::NAN, 0.0, 0.0));

        let paths: Vec<_> = SceneValidator::collect(&scene).iter().map(|e| e.path().to_string()).collect();
        assert_eq!(
            paths,
            [
                "System.NumOfThreads",
                "RenderingMethod.RayCastEpsilon",
                "EmitterModel[0].RadiantExitance",
                "Object[2].Transformation[2]",
            ]
        );
    }

    #[test]
    fn test_mesh_fields() {
        let mut scene = empty_scene();
        let mut plane = SceneObject::plane("Floor", 1, 0);
        if let ObjectKind::Single { smoothing, .. } = &mut plane.kind {
            *smoothing = Some(true);
        }
        scene.objects.push(plane);
        scene.objects.push(SceneObject::mesh("Bunny", 1, "", true, 0));

        let paths: Vec<_> = SceneValidator::collect(&scene).iter().map(|e| e.path().to_string()).collect();
        assert_eq!(paths, ["Object[2].ShapeType", "Object[3].ObjectFilePath"]);
    }
}
