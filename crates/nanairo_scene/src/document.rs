//! Typed scene document
//!
//! Each section of a `.nana` file is modeled as a struct or a tagged enum
//! over the variants the renderer knows. Deserialization rejects unknown
//! `Type` tokens and mismatched value shapes; positional references between
//! sections are carried by [`ModelIndex`] and checked by the validation pass.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use crate::error::Result;
use crate::schema::{
    AngleUnit, Axis, CameraType, ColorMode, ColorSpace, DenoiserType, KernelType,
    LightSamplerType, RouletteType, SamplerType, ShapeType, Symbol, ToneMapping,
    WavelengthSampling,
};
use crate::validation::SceneValidator;
use crate::value::{PropertyMap, Value};

// ============================================================================
// Index references
// ============================================================================

/// Zero-based position of a model in its section.
///
/// The target type is carried only for type checking, so a surface index
/// can't be passed where a texture index is expected.
pub struct ModelIndex<T> {
    index: usize,
    _marker: PhantomData<fn() -> T>,
}

/// Position in `TextureModel`
pub type TextureIndex = ModelIndex<TextureModel>;
/// Position in `SurfaceModel`
pub type SurfaceIndex = ModelIndex<SurfaceModel>;
/// Position in `EmitterModel`
pub type EmitterIndex = ModelIndex<EmitterModel>;

impl<T> ModelIndex<T> {
    pub const fn new(index: usize) -> Self {
        Self {
            index,
            _marker: PhantomData,
        }
    }

    /// Raw position
    pub const fn get(self) -> usize {
        self.index
    }

    /// Resolve against the referenced section
    pub fn resolve(self, models: &[T]) -> Option<&T> {
        models.get(self.index)
    }
}

impl<T> Clone for ModelIndex<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ModelIndex<T> {}

impl<T> PartialEq for ModelIndex<T> {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

impl<T> Eq for ModelIndex<T> {}

impl<T> Hash for ModelIndex<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.index.hash(state);
    }
}

impl<T> fmt::Debug for ModelIndex<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ModelIndex({})", self.index)
    }
}

impl<T> fmt::Display for ModelIndex<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index)
    }
}

impl<T> From<usize> for ModelIndex<T> {
    fn from(index: usize) -> Self {
        Self::new(index)
    }
}

impl<T> Serialize for ModelIndex<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_u64(self.index as u64)
    }
}

impl<'de, T> Deserialize<'de> for ModelIndex<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        usize::deserialize(deserializer).map(Self::new)
    }
}

// ============================================================================
// Document
// ============================================================================

/// Complete description of a scene to render
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneDocument {
    #[serde(rename = "Bvh")]
    pub bvh: BvhSettings,
    #[serde(rename = "Color")]
    pub color: ColorSettings,
    #[serde(rename = "EmitterModel")]
    pub emitter_models: Vec<EmitterModel>,
    #[serde(rename = "Object")]
    pub objects: Vec<SceneObject>,
    #[serde(rename = "RenderingMethod")]
    pub rendering_method: RenderingMethod,
    #[serde(rename = "Scene")]
    pub scene: SceneTag,
    #[serde(rename = "SurfaceModel")]
    pub surface_models: Vec<SurfaceModel>,
    #[serde(rename = "System")]
    pub system: SystemSettings,
    #[serde(rename = "TextureModel")]
    pub texture_models: Vec<TextureModel>,
}

impl SceneDocument {
    /// Scene name from the tag section
    pub fn scene_name(&self) -> &str {
        &self.scene.scene_name
    }

    pub fn texture(&self, index: TextureIndex) -> Option<&TextureModel> {
        index.resolve(&self.texture_models)
    }

    pub fn surface(&self, index: SurfaceIndex) -> Option<&SurfaceModel> {
        index.resolve(&self.surface_models)
    }

    pub fn emitter(&self, index: EmitterIndex) -> Option<&EmitterModel> {
        index.resolve(&self.emitter_models)
    }

    /// First object with the given name, with its position
    pub fn find_object(&self, name: &str) -> Option<(usize, &SceneObject)> {
        self.objects.iter().enumerate().find(|(_, o)| o.name == name)
    }

    /// Camera objects in document order
    pub fn cameras(&self) -> impl Iterator<Item = &SceneObject> {
        self.objects.iter().filter(|o| o.is_camera())
    }

    /// Untyped view of the document for property bindings
    pub fn to_properties(&self) -> Result<PropertyMap> {
        let map = match Value::from(serde_json::to_value(self)?) {
            Value::Object(map) => map,
            _ => return Ok(PropertyMap::new()),
        };
        let properties = map.read().clone();
        Ok(properties)
    }

    /// Rebuild a document from an edited property view.
    ///
    /// The result goes through the validation pass before it is returned.
    pub fn from_properties(properties: &PropertyMap) -> Result<Self> {
        let json = Value::object(properties.clone()).to_json()?;
        let document: SceneDocument = serde_json::from_value(json)?;
        SceneValidator::validate(&document)?;
        Ok(document)
    }
}

// ============================================================================
// Settings sections
// ============================================================================

/// `Scene` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SceneTag {
    pub scene_name: String,
}

impl SceneTag {
    pub fn new(scene_name: impl Into<String>) -> Self {
        Self {
            scene_name: scene_name.into(),
        }
    }
}

/// `System` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SystemSettings {
    pub image_resolution: [u32; 2],
    pub num_of_threads: u32,
    pub power2_cycle_saving: bool,
    pub sampler_seed: u32,
    pub sampler_type: SamplerType,
    /// Save every N cycles, 0 disables
    pub saving_interval_cycle: u64,
    /// Save every N milliseconds, 0 disables
    pub saving_interval_time: u64,
    pub termination_cycle: u64,
    pub termination_time: u64,
}

impl Default for SystemSettings {
    fn default() -> Self {
        Self {
            image_resolution: [1280, 720],
            num_of_threads: 1,
            power2_cycle_saving: true,
            sampler_seed: 123456789,
            sampler_type: SamplerType::Cmj,
            saving_interval_cycle: 0,
            saving_interval_time: 3_600_000,
            termination_cycle: 1024,
            termination_time: 0,
        }
    }
}

/// `Color` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ColorSettings {
    pub color_mode: ColorMode,
    pub color_space: ColorSpace,
    #[serde(default)]
    pub denoiser_type: DenoiserType,
    #[serde(default)]
    pub enable_denoising: bool,
    pub exposure: f64,
    pub gamma: f64,
    #[serde(default = "default_histogram_bins")]
    pub histogram_bins: u32,
    #[serde(default = "default_histogram_distance_threshold")]
    pub histogram_distance_threshold: f64,
    #[serde(default = "default_number_of_scales")]
    pub number_of_scales: u32,
    #[serde(default = "default_patch_radius")]
    pub patch_radius: u32,
    #[serde(default = "default_search_window_radius")]
    pub search_window_radius: u32,
    pub tone_mapping: ToneMapping,
    pub wavelength_sampling: WavelengthSampling,
}

fn default_histogram_bins() -> u32 {
    16
}

fn default_histogram_distance_threshold() -> f64 {
    1.0
}

fn default_number_of_scales() -> u32 {
    3
}

fn default_patch_radius() -> u32 {
    1
}

fn default_search_window_radius() -> u32 {
    6
}

impl Default for ColorSettings {
    fn default() -> Self {
        Self {
            color_mode: ColorMode::Rgb,
            color_space: ColorSpace::SRgbD65,
            denoiser_type: DenoiserType::BayesianCollaborative,
            enable_denoising: false,
            exposure: 1.0,
            gamma: 2.2,
            histogram_bins: default_histogram_bins(),
            histogram_distance_threshold: default_histogram_distance_threshold(),
            number_of_scales: default_number_of_scales(),
            patch_radius: default_patch_radius(),
            search_window_radius: default_search_window_radius(),
            tone_mapping: ToneMapping::Reinhard,
            wavelength_sampling: WavelengthSampling::Regular,
        }
    }
}

/// `Bvh` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "Type", rename_all_fields = "PascalCase")]
pub enum BvhSettings {
    #[serde(rename = "BinaryRadixTreeBvh")]
    BinaryRadixTree,
    #[serde(rename = "ApproximateAgglomerativeClusteringBvh")]
    ApproximateAgglomerativeClustering { delta: u32, epsilon: f64 },
    #[serde(rename = "AgglomerativeTreeletRestructuringBvh")]
    AgglomerativeTreeletRestructuring {
        optimization_loop_count: u32,
        treelet_size: u32,
    },
}

impl BvhSettings {
    /// Registry entry of the `Type` tag
    pub fn symbol(&self) -> Symbol {
        match self {
            BvhSettings::BinaryRadixTree => Symbol::BinaryRadixTreeBvh,
            BvhSettings::ApproximateAgglomerativeClustering { .. } => {
                Symbol::ApproximateAgglomerativeClusteringBvh
            }
            BvhSettings::AgglomerativeTreeletRestructuring { .. } => {
                Symbol::AgglomerativeTreeletRestructuringBvh
            }
        }
    }
}

impl Default for BvhSettings {
    fn default() -> Self {
        BvhSettings::BinaryRadixTree
    }
}

/// `RenderingMethod` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RenderingMethod {
    #[serde(default = "default_path_length")]
    pub path_length: u32,
    pub ray_cast_epsilon: f64,
    pub russian_roulette: RouletteType,
    #[serde(flatten)]
    pub method: RenderingMethodKind,
}

fn default_path_length() -> u32 {
    3
}

impl Default for RenderingMethod {
    fn default() -> Self {
        Self {
            path_length: default_path_length(),
            ray_cast_epsilon: 1.0e-7,
            russian_roulette: RouletteType::MaxReflectance,
            method: RenderingMethodKind::PathTracing {
                eye_path_light_sampler: LightSamplerType::PowerWeighted,
            },
        }
    }
}

/// Light transport algorithm and its parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "Type", rename_all_fields = "PascalCase")]
pub enum RenderingMethodKind {
    PathTracing {
        eye_path_light_sampler: LightSamplerType,
    },
    LightTracing {
        light_path_light_sampler: LightSamplerType,
    },
    ProbabilisticPpm {
        eye_path_light_sampler: LightSamplerType,
        k_nearest_neighbor: u32,
        kernel_type: KernelType,
        light_path_light_sampler: LightSamplerType,
        num_of_photons: u64,
        photon_search_radius: f64,
        radius_reduction_rate: f64,
    },
}

impl RenderingMethodKind {
    /// Registry entry of the `Type` tag
    pub fn symbol(&self) -> Symbol {
        match self {
            RenderingMethodKind::PathTracing { .. } => Symbol::PathTracing,
            RenderingMethodKind::LightTracing { .. } => Symbol::LightTracing,
            RenderingMethodKind::ProbabilisticPpm { .. } => Symbol::ProbabilisticPpm,
        }
    }
}

// ============================================================================
// Models
// ============================================================================

/// Color value of a texture, either inline RGB or a spectral data file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "ColorMode")]
pub enum ColorValue {
    #[serde(rename = "RGB")]
    Rgb {
        #[serde(rename = "Value")]
        value: [f64; 3],
    },
    #[serde(rename = "Spectra")]
    Spectra {
        /// Relative path of the spectral sample file
        #[serde(rename = "Value")]
        value: String,
    },
}

impl ColorValue {
    pub fn rgb(r: f64, g: f64, b: f64) -> Self {
        ColorValue::Rgb { value: [r, g, b] }
    }

    pub fn spectra(path: impl Into<String>) -> Self {
        ColorValue::Spectra { value: path.into() }
    }

    pub fn mode(&self) -> ColorMode {
        match self {
            ColorValue::Rgb { .. } => ColorMode::Rgb,
            ColorValue::Spectra { .. } => ColorMode::Spectra,
        }
    }
}

/// Element of the `TextureModel` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextureModel {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(flatten)]
    pub kind: TextureKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "Type", rename_all_fields = "PascalCase")]
pub enum TextureKind {
    #[serde(rename = "ValueTexture")]
    Value { value: f64 },
    #[serde(rename = "UnicolorTexture")]
    Unicolor { color: ColorValue },
    #[serde(rename = "CheckerboardTexture")]
    Checkerboard {
        color1: ColorValue,
        color2: ColorValue,
        #[serde(default = "default_checkerboard_resolution")]
        height: u32,
        #[serde(default = "default_checkerboard_resolution")]
        width: u32,
    },
    #[serde(rename = "ImageTexture")]
    Image { image_file_path: String },
}

fn default_checkerboard_resolution() -> u32 {
    10
}

impl TextureModel {
    pub fn new(name: impl Into<String>, kind: TextureKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    /// Colors embedded in the texture
    pub fn colors(&self) -> Vec<&ColorValue> {
        match &self.kind {
            TextureKind::Unicolor { color } => vec![color],
            TextureKind::Checkerboard { color1, color2, .. } => vec![color1, color2],
            _ => Vec::new(),
        }
    }
}

/// Element of the `SurfaceModel` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurfaceModel {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(flatten)]
    pub kind: SurfaceKind,
}

/// Surface scattering model.
///
/// Refractive index and extinction fields name spectral data files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "Type", rename_all_fields = "PascalCase")]
pub enum SurfaceKind {
    #[serde(rename = "SmoothDiffuseSurface")]
    SmoothDiffuse { reflectance_index: TextureIndex },
    #[serde(rename = "SmoothDielectricSurface")]
    SmoothDielectric {
        inner_refractive_index: String,
        outer_refractive_index: String,
    },
    #[serde(rename = "SmoothConductorSurface")]
    SmoothConductor {
        inner_extinction: String,
        inner_refractive_index: String,
        outer_refractive_index: String,
    },
    #[serde(rename = "RoughDielectricSurface")]
    RoughDielectric {
        inner_refractive_index: String,
        outer_refractive_index: String,
        roughness_index: TextureIndex,
    },
    #[serde(rename = "RoughConductorSurface")]
    RoughConductor {
        inner_extinction: String,
        inner_refractive_index: String,
        outer_refractive_index: String,
        roughness_index: TextureIndex,
    },
    #[serde(rename = "LayeredDiffuseSurface")]
    LayeredDiffuse {
        inner_refractive_index: String,
        outer_refractive_index: String,
        reflectance_index: TextureIndex,
        roughness_index: TextureIndex,
    },
    #[serde(rename = "ClothSurface")]
    Cloth {
        bandwidth_parameter: f64,
        fabric_refractive_index: String,
        isotropic_scattering_coefficient: f64,
        reflectance_index: TextureIndex,
        surface_reflectance_gaussian_width: f64,
        volume_reflectance_gaussian_width: f64,
    },
}

impl SurfaceModel {
    pub fn new(name: impl Into<String>, kind: SurfaceKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    /// Texture references of the surface, paired with their field token
    pub fn texture_references(&self) -> Vec<(&'static str, TextureIndex)> {
        match &self.kind {
            SurfaceKind::SmoothDiffuse { reflectance_index } => {
                vec![("ReflectanceIndex", *reflectance_index)]
            }
            SurfaceKind::RoughDielectric { roughness_index, .. }
            | SurfaceKind::RoughConductor { roughness_index, .. } => {
                vec![("RoughnessIndex", *roughness_index)]
            }
            SurfaceKind::LayeredDiffuse {
                reflectance_index,
                roughness_index,
                ..
            } => vec![
                ("ReflectanceIndex", *reflectance_index),
                ("RoughnessIndex", *roughness_index),
            ],
            SurfaceKind::Cloth {
                reflectance_index, ..
            } => vec![("ReflectanceIndex", *reflectance_index)],
            SurfaceKind::SmoothDielectric { .. } | SurfaceKind::SmoothConductor { .. } => Vec::new(),
        }
    }
}

/// Element of the `EmitterModel` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmitterModel {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(flatten)]
    pub kind: EmitterKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "Type", rename_all_fields = "PascalCase")]
pub enum EmitterKind {
    #[serde(rename = "NonDirectionalEmitter")]
    NonDirectional {
        emissive_color_index: TextureIndex,
        radiant_exitance: f64,
    },
}

impl EmitterModel {
    pub fn non_directional(
        name: impl Into<String>,
        emissive_color_index: usize,
        radiant_exitance: f64,
    ) -> Self {
        Self {
            name: name.into(),
            kind: EmitterKind::NonDirectional {
                emissive_color_index: TextureIndex::new(emissive_color_index),
                radiant_exitance,
            },
        }
    }
}

// ============================================================================
// Objects
// ============================================================================

/// Element of the `Object` section.
///
/// The tree structure is implied by `GroupLevel` and sequence order; see
/// [`crate::hierarchy::ObjectTree`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SceneObject {
    pub enabled: bool,
    pub group_level: u32,
    pub name: String,
    pub transformation: Vec<Transformation>,
    #[serde(flatten)]
    pub kind: ObjectKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "Type", rename_all_fields = "PascalCase")]
pub enum ObjectKind {
    #[serde(rename = "CameraObject")]
    Camera {
        /// Vertical field of view in degrees
        angle_of_view: f64,
        camera_type: CameraType,
        jittering: bool,
    },
    #[serde(rename = "GroupObject")]
    Group,
    #[serde(rename = "SingleObject")]
    Single {
        emitter_index: EmitterIndex,
        is_emissive_object: bool,
        /// Mesh file, present only for mesh shapes
        #[serde(default, skip_serializing_if = "Option::is_none")]
        object_file_path: Option<String>,
        shape_type: ShapeType,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        smoothing: Option<bool>,
        surface_index: SurfaceIndex,
    },
}

impl SceneObject {
    /// Pinhole camera with jittering enabled
    pub fn camera(name: impl Into<String>, angle_of_view: f64) -> Self {
        Self {
            enabled: true,
            group_level: 0,
            name: name.into(),
            transformation: Vec::new(),
            kind: ObjectKind::Camera {
                angle_of_view,
                camera_type: CameraType::Pinhole,
                jittering: true,
            },
        }
    }

    pub fn group(name: impl Into<String>, group_level: u32) -> Self {
        Self {
            enabled: true,
            group_level,
            name: name.into(),
            transformation: Vec::new(),
            kind: ObjectKind::Group,
        }
    }

    /// Non-emissive plane bound to a surface
    pub fn plane(name: impl Into<String>, group_level: u32, surface_index: usize) -> Self {
        Self {
            enabled: true,
            group_level,
            name: name.into(),
            transformation: Vec::new(),
            kind: ObjectKind::Single {
                emitter_index: EmitterIndex::new(0),
                is_emissive_object: false,
                object_file_path: None,
                shape_type: ShapeType::Plane,
                smoothing: None,
                surface_index: SurfaceIndex::new(surface_index),
            },
        }
    }

    /// Non-emissive mesh loaded from `object_file_path`
    pub fn mesh(
        name: impl Into<String>,
        group_level: u32,
        object_file_path: impl Into<String>,
        smoothing: bool,
        surface_index: usize,
    ) -> Self {
        Self {
            enabled: true,
            group_level,
            name: name.into(),
            transformation: Vec::new(),
            kind: ObjectKind::Single {
                emitter_index: EmitterIndex::new(0),
                is_emissive_object: false,
                object_file_path: Some(object_file_path.into()),
                shape_type: ShapeType::Mesh,
                smoothing: Some(smoothing),
                surface_index: SurfaceIndex::new(surface_index),
            },
        }
    }

    /// Make a single object emissive through the given emitter
    pub fn emissive(mut self, emitter: usize) -> Self {
        if let ObjectKind::Single {
            emitter_index,
            is_emissive_object,
            ..
        } = &mut self.kind
        {
            *emitter_index = EmitterIndex::new(emitter);
            *is_emissive_object = true;
        }
        self
    }

    /// Append a transformation
    pub fn with(mut self, transformation: Transformation) -> Self {
        self.transformation.push(transformation);
        self
    }

    pub fn is_camera(&self) -> bool {
        matches!(self.kind, ObjectKind::Camera { .. })
    }

    pub fn is_group(&self) -> bool {
        matches!(self.kind, ObjectKind::Group)
    }

    /// Registry entry of the `Type` tag
    pub fn symbol(&self) -> Symbol {
        match self.kind {
            ObjectKind::Camera { .. } => Symbol::CameraObject,
            ObjectKind::Group => Symbol::GroupObject,
            ObjectKind::Single { .. } => Symbol::SingleObject,
        }
    }

    pub fn surface_index(&self) -> Option<SurfaceIndex> {
        match &self.kind {
            ObjectKind::Single { surface_index, .. } => Some(*surface_index),
            _ => None,
        }
    }

    pub fn emitter_index(&self) -> Option<EmitterIndex> {
        match &self.kind {
            ObjectKind::Single { emitter_index, .. } => Some(*emitter_index),
            _ => None,
        }
    }
}

/// Element of an object's `Transformation` list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "Type", rename_all_fields = "PascalCase")]
pub enum Transformation {
    Translation { enabled: bool, value: [f64; 3] },
    Scaling { enabled: bool, value: [f64; 3] },
    Rotation {
        angle: f64,
        axis: Axis,
        enabled: bool,
        unit: AngleUnit,
    },
}

impl Transformation {
    pub fn translation(x: f64, y: f64, z: f64) -> Self {
        Transformation::Translation {
            enabled: true,
            value: [x, y, z],
        }
    }

    pub fn scaling(x: f64, y: f64, z: f64) -> Self {
        Transformation::Scaling {
            enabled: true,
            value: [x, y, z],
        }
    }

    /// Rotation in degrees
    pub fn rotation(axis: Axis, angle: f64) -> Self {
        Transformation::Rotation {
            angle,
            axis,
            enabled: true,
            unit: AngleUnit::Degree,
        }
    }

    pub fn is_enabled(&self) -> bool {
        match self {
            Transformation::Translation { enabled, .. }
            | Transformation::Scaling { enabled, .. }
            | Transformation::Rotation { enabled, .. } => *enabled,
        }
    }

    pub fn set_enabled(&mut self, value: bool) {
        match self {
            Transformation::Translation { enabled, .. }
            | Transformation::Scaling { enabled, .. }
            | Transformation::Rotation { enabled, .. } => *enabled = value,
        }
    }

    /// Numeric components, for finiteness checks
    pub fn components(&self) -> Vec<f64> {
        match self {
            Transformation::Translation { value, .. } | Transformation::Scaling { value, .. } => {
                value.to_vec()
            }
            Transformation::Rotation { angle, .. } => vec![*angle],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_object_serialization() {
        let object = SceneObject::plane("Floor", 1, 0).with(Transformation::scaling(3.0, 4.5, 1.0));
        let json = serde_json::to_value(&object).unwrap();

        assert_eq!(json["Type"], object.symbol().token());
        assert_eq!(json["ShapeType"], "PlaneObject");
        assert_eq!(json["GroupLevel"], 1);
        assert_eq!(json["SurfaceIndex"], 0);
        assert!(json.get("ObjectFilePath").is_none());
        assert_eq!(json["Transformation"][0]["Type"], "Scaling");
        assert_eq!(json["Transformation"][0]["Value"], json!([3.0, 4.5, 1.0]));
    }

    #[test]
    fn test_object_deserialization() {
        let json = json!({
            "Name": "Camera",
            "Type": "CameraObject",
            "Enabled": true,
            "GroupLevel": 0,
            "CameraType": "PinholeCamera",
            "AngleOfView": 60,
            "Jittering": true,
            "Transformation": [
                {"Type": "Rotation", "Enabled": false, "Axis": "Z Axis", "Angle": 15, "Unit": "Degree"}
            ]
        });
        let object: SceneObject = serde_json::from_value(json).unwrap();

        assert!(object.is_camera());
        assert!(!object.transformation[0].is_enabled());
        assert_eq!(object.transformation[0].components(), vec![15.0]);
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        let json = json!({"Name": "Glass", "Type": "FluorescentSurface"});
        let err = serde_json::from_value::<SurfaceModel>(json).unwrap_err();
        assert!(err.is_data());
    }

    #[test]
    fn test_color_shapes_are_exclusive() {
        let rgb: ColorValue = serde_json::from_value(json!({"ColorMode": "RGB", "Value": [1, 0.5, 0]})).unwrap();
        assert_eq!(rgb, ColorValue::rgb(1.0, 0.5, 0.0));
        assert_eq!(rgb.mode(), ColorMode::Rgb);

        let mixed = json!({"ColorMode": "RGB", "Value": "resources/spectrum/reflectance/white.csv"});
        assert!(serde_json::from_value::<ColorValue>(mixed).is_err());

        let mixed = json!({"ColorMode": "Spectra", "Value": [1, 1, 1]});
        assert!(serde_json::from_value::<ColorValue>(mixed).is_err());
    }

    #[test]
    fn test_checkerboard_defaults() {
        let json = json!({
            "Name": "Checker",
            "Type": "CheckerboardTexture",
            "Color1": {"ColorMode": "RGB", "Value": [0, 0, 0]},
            "Color2": {"ColorMode": "RGB", "Value": [1, 1, 1]}
        });
        let texture: TextureModel = serde_json::from_value(json).unwrap();
        match &texture.kind {
            TextureKind::Checkerboard { width, height, .. } => assert_eq!((*width, *height), (10, 10)),
            other => panic!("unexpected texture {:?}", other),
        }
        assert_eq!(texture.colors().len(), 2);
    }

    #[test]
    fn test_model_index() {
        let textures = vec![TextureModel::new("Gray", TextureKind::Value { value: 0.25 })];
        assert_eq!(TextureIndex::new(0).resolve(&textures).map(|t| t.name.as_str()), Some("Gray"));
        assert!(TextureIndex::new(1).resolve(&textures).is_none());
        assert_eq!(serde_json::to_value(TextureIndex::new(3)).unwrap(), json!(3));
        assert!(serde_json::from_value::<TextureIndex>(json!(-1)).is_err());
    }

    #[test]
    fn test_surface_texture_references() {
        let surface = SurfaceModel::new(
            "Layered",
            SurfaceKind::LayeredDiffuse {
                inner_refractive_index: "resources/spectrum/ior/glass.csv".into(),
                outer_refractive_index: "resources/spectrum/ior/air.csv".into(),
                reflectance_index: TextureIndex::new(1),
                roughness_index: TextureIndex::new(2),
            },
        );
        let refs = surface.texture_references();
        assert_eq!(refs, vec![("ReflectanceIndex", TextureIndex::new(1)), ("RoughnessIndex", TextureIndex::new(2))]);
    }

    #[test]
    fn test_rendering_method_path_length_default() {
        let json = json!({
            "Type": "PathTracing",
            "RayCastEpsilon": 1e-7,
            "RussianRoulette": "Reflectance (Max)",
            "EyePathLightSampler": "PowerWeightedLightSampler"
        });
        let method: RenderingMethod = serde_json::from_value(json).unwrap();
        assert_eq!(method, RenderingMethod::default());
    }

    #[test]
    fn test_ppm_round_trip() {
        let method = RenderingMethod {
            method: RenderingMethodKind::ProbabilisticPpm {
                eye_path_light_sampler: LightSamplerType::PowerWeighted,
                k_nearest_neighbor: 16,
                kernel_type: KernelType::Cone,
                light_path_light_sampler: LightSamplerType::Uniform,
                num_of_photons: 100_000,
                photon_search_radius: 0.01,
                radius_reduction_rate: 0.66,
            },
            ..RenderingMethod::default()
        };
        let json = serde_json::to_value(&method).unwrap();
        assert_eq!(json["KNearestNeighbor"], 16);
        assert_eq!(json["KernelType"], "ConeKernel");
        assert_eq!(serde_json::from_value::<RenderingMethod>(json).unwrap(), method);
    }

    #[test]
    fn test_bvh_tokens() {
        assert_eq!(serde_json::to_value(BvhSettings::default()).unwrap(), json!({"Type": "BinaryRadixTreeBvh"}));
        let bvh: BvhSettings = serde_json::from_value(json!({
            "Type": "AgglomerativeTreeletRestructuringBvh",
            "TreeletSize": 9,
            "OptimizationLoopCount": 2
        }))
        .unwrap();
        assert_eq!(bvh, BvhSettings::AgglomerativeTreeletRestructuring { optimization_loop_count: 2, treelet_size: 9 });
    }
}
