//! Built-in scene documents
//!
//! Pure constructors with literal values. Nothing here can fail; positional
//! references are kept consistent by hand and checked by the tests below.

use crate::document::{
    BvhSettings, ColorSettings, ColorValue, EmitterModel, RenderingMethod, RenderingMethodKind,
    SceneDocument, SceneObject, SceneTag, SurfaceKind, SurfaceModel, SystemSettings, TextureIndex,
    TextureKind, TextureModel, Transformation,
};
use crate::layout::PresetScene;
use crate::schema::{
    Axis, ColorMode, ColorSpace, DenoiserType, LightSamplerType, RouletteType, SamplerType, Symbol,
    ToneMapping, WavelengthSampling,
};

/// Mesh shared by both blocks of the Cornell box
const CUBE_MESH: &str = "resources/models/Primitives/Cube.obj";

/// The document the editor opens with
pub fn build_default_scene() -> SceneDocument {
    cornell_box_scene()
}

/// The Cornell box example scene
pub fn cornell_box_scene() -> SceneDocument {
    log::debug!("Building {} scene", PresetScene::CornellBox);

    let bvh = BvhSettings::BinaryRadixTree;

    let color = ColorSettings {
        color_mode: ColorMode::Spectra,
        color_space: ColorSpace::SRgbD50,
        denoiser_type: DenoiserType::BayesianCollaborative,
        enable_denoising: true,
        exposure: 2.0,
        gamma: 2.4,
        histogram_bins: 10,
        histogram_distance_threshold: 2.0,
        number_of_scales: 5,
        patch_radius: 3,
        search_window_radius: 13,
        tone_mapping: ToneMapping::Filmic,
        wavelength_sampling: WavelengthSampling::Random,
    };

    let emitter_models = vec![EmitterModel::non_directional("Emitter", 3, 512.0)];

    let world = Symbol::World.token();
    let objects = vec![
        SceneObject::camera(Symbol::Camera.token(), 60.0)
            .with(Transformation::translation(0.0, -5.8, 0.0)),
        SceneObject::group(world, 0).with(Transformation::translation(0.0, 0.0, 0.0)),
        SceneObject::plane("Floor", 1, 0)
            .with(Transformation::scaling(3.0, 4.5, 1.0))
            .with(Transformation::translation(0.0, 0.75, -1.5)),
        SceneObject::plane("LeftWall", 1, 2)
            .with(Transformation::scaling(3.0, 4.5, 1.0))
            .with(Transformation::rotation(Axis::Y, 90.0))
            .with(Transformation::translation(-1.5, 0.75, 0.0)),
        SceneObject::plane("RightWall", 1, 1)
            .with(Transformation::scaling(3.0, 4.5, 1.0))
            .with(Transformation::rotation(Axis::Y, -90.0))
            .with(Transformation::translation(1.5, 0.75, 0.0)),
        SceneObject::plane("BackWall", 1, 0)
            .with(Transformation::scaling(3.0, 3.0, 1.0))
            .with(Transformation::rotation(Axis::X, 90.0))
            .with(Transformation::translation(0.0, 3.0, 0.0)),
        SceneObject::plane("Ceiling", 1, 0)
            .with(Transformation::scaling(3.0, 4.5, 1.0))
            .with(Transformation::rotation(Axis::X, 180.0))
            .with(Transformation::translation(0.0, 0.75, 1.5)),
        SceneObject::mesh("TallBlock", 1, CUBE_MESH, false, 0)
            .with(Transformation::scaling(1.0, 1.0, 2.0))
            .with(Transformation::scaling(0.9, 0.9, 0.9))
            .with(Transformation::rotation(Axis::Z, 15.0))
            .with(Transformation::translation(-0.5, 1.0, -1.5)),
        SceneObject::mesh("ShortBlock", 1, CUBE_MESH, false, 0)
            .with(Transformation::scaling(0.9, 0.9, 0.9))
            .with(Transformation::rotation(Axis::Z, -15.0))
            .with(Transformation::translation(0.5, -0.4, -1.5)),
        SceneObject::plane("Light", 1, 0)
            .emissive(0)
            .with(Transformation::scaling(0.75, 0.75, 1.0))
            .with(Transformation::rotation(Axis::X, 180.0))
            .with(Transformation::translation(0.0, 0.75, 1.49)),
    ];

    let rendering_method = RenderingMethod {
        path_length: 3,
        ray_cast_epsilon: 1.0e-7,
        russian_roulette: RouletteType::MaxReflectance,
        method: RenderingMethodKind::PathTracing {
            eye_path_light_sampler: LightSamplerType::PowerWeighted,
        },
    };

    let surface_models = vec![
        smooth_diffuse("WhiteWallSurface", 0),
        smooth_diffuse("GreenWallSurface", 1),
        smooth_diffuse("RedWallSurface", 2),
    ];

    let system = SystemSettings {
        image_resolution: [1280, 720],
        num_of_threads: 4,
        power2_cycle_saving: true,
        sampler_seed: 123456789,
        sampler_type: SamplerType::Cmj,
        saving_interval_cycle: 1,
        saving_interval_time: 10000,
        termination_cycle: 1024,
        termination_time: 1,
    };

    let texture_models = vec![
        spectra_texture("WhiteTexture", "resources/spectrum/reflectance/cornell_box_white.csv"),
        spectra_texture("GreenTexture", "resources/spectrum/reflectance/cornell_box_green.csv"),
        spectra_texture("RedTexture", "resources/spectrum/reflectance/cornell_box_red.csv"),
        spectra_texture("EmitterTexture", "resources/spectrum/illuminant/cornell_box_light.csv"),
    ];

    SceneDocument {
        bvh,
        color,
        emitter_models,
        objects,
        rendering_method,
        scene: SceneTag::new(PresetScene::CornellBox.name()),
        surface_models,
        system,
        texture_models,
    }
}

/// Minimal scene: a camera, the world group and one model of each kind
pub fn empty_scene() -> SceneDocument {
    log::debug!("Building {} scene", PresetScene::Default);

    SceneDocument {
        bvh: BvhSettings::default(),
        color: ColorSettings::default(),
        emitter_models: vec![EmitterModel::non_directional("Emitter", 0, 1.0)],
        objects: vec![
            SceneObject::camera(Symbol::Camera.token(), 45.0),
            SceneObject::group(Symbol::World.token(), 0),
        ],
        rendering_method: RenderingMethod::default(),
        scene: SceneTag::new(PresetScene::Default.name()),
        surface_models: vec![smooth_diffuse("Surface", 0)],
        system: SystemSettings::default(),
        texture_models: vec![TextureModel::new("Texture", TextureKind::Value { value: 0.25 })],
    }
}

fn smooth_diffuse(name: &str, reflectance: usize) -> SurfaceModel {
    SurfaceModel::new(
        name,
        SurfaceKind::SmoothDiffuse {
            reflectance_index: TextureIndex::new(reflectance),
        },
    )
}

fn spectra_texture(name: &str, path: &str) -> TextureModel {
    TextureModel::new(
        name,
        TextureKind::Unicolor {
            color: ColorValue::spectra(path),
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::ObjectKind;
    use crate::validation::SceneValidator;

    fn surface_name(scene: &SceneDocument, object: usize) -> &str {
        let index = scene.objects[object].surface_index().unwrap();
        &scene.surface(index).unwrap().name
    }

    #[test]
    fn test_default_scene_is_deterministic() {
        assert_eq!(build_default_scene(), build_default_scene());
    }

    #[test]
    fn test_wall_bindings() {
        let scene = build_default_scene();
        assert_eq!(scene.objects[2].name, "Floor");
        assert_eq!(surface_name(&scene, 2), "WhiteWallSurface");
        assert_eq!(surface_name(&scene, 3), "RedWallSurface");
        assert_eq!(surface_name(&scene, 4), "GreenWallSurface");
    }

    #[test]
    fn test_section_order() {
        let scene = build_default_scene();
        let names: Vec<_> = scene.objects.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(
            names,
            [
                "Camera", "World", "Floor", "LeftWall", "RightWall", "BackWall", "Ceiling",
                "TallBlock", "ShortBlock", "Light"
            ]
        );
        let textures: Vec<_> = scene.texture_models.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(textures, ["WhiteTexture", "GreenTexture", "RedTexture", "EmitterTexture"]);
    }

    #[test]
    fn test_literal_values() {
        let scene = build_default_scene();
        assert_eq!(scene.objects[0].transformation, vec![Transformation::translation(0.0, -5.8, 0.0)]);
        assert_eq!(scene.objects[3].transformation[1], Transformation::rotation(Axis::Y, 90.0));
        assert_eq!(scene.system.image_resolution, [1280, 720]);
        assert_eq!(scene.color.gamma, 2.4);
        assert_eq!(scene.scene_name(), "CornellBox");
    }

    #[test]
    fn test_only_light_is_emissive() {
        let scene = build_default_scene();
        let emissive: Vec<_> = scene
            .objects
            .iter()
            .filter(|o| matches!(o.kind, ObjectKind::Single { is_emissive_object: true, .. }))
            .map(|o| o.name.as_str())
            .collect();
        assert_eq!(emissive, ["Light"]);

        let emitter = scene.emitter(scene.objects[9].emitter_index().unwrap()).unwrap();
        assert_eq!(emitter.name, "Emitter");
    }

    #[test]
    fn test_built_scenes_validate() {
        SceneValidator::validate(&cornell_box_scene()).unwrap();
        SceneValidator::validate(&empty_scene()).unwrap();
    }
}
