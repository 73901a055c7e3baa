//! Derived constants shared with the editor front end
//!
//! These are plain values (pixel geometry, spin box ranges, list model keys,
//! preset scene names). They are not scene tokens and never appear as keys
//! in a `.nana` file.

use std::fmt;
use std::str::FromStr;

use crate::builder;
use crate::document::SceneDocument;
use crate::error::{Result, SceneError};

// ============================================================================
// Widget geometry
// ============================================================================

pub const DEFAULT_ITEM_SPACE: u32 = 4;
pub const DEFAULT_BLOCK_SIZE: u32 = 16;
pub const DEFAULT_BUTTON_HEIGHT: u32 = 32;
pub const DEFAULT_IMAGE_BUTTON_SIZE: u32 = 24;
/// Factor applied to a widget color when it is pressed
pub const DEFAULT_DARKER_SCALE: f64 = 1.2;
/// Factor applied to a widget color when it is hovered
pub const DEFAULT_LIGHTER_SCALE: f64 = 0.83;
pub const DEFAULT_TEXT_FONT_SIZE: u32 = 12;
pub const DEFAULT_SETTING_ITEM_WIDTH: u32 = 128;
pub const DEFAULT_SETTING_ITEM_HEIGHT: u32 = 24;
pub const DEFAULT_SETTING_ITEM_COLUMN_INTERVAL: u32 = 64;

// Window
pub const MAIN_WINDOW_WIDTH: u32 = 960;
pub const MAIN_WINDOW_HEIGHT: u32 = 540;
pub const DEFAULT_MENU_HEIGHT: u32 = 24;
pub const DEFAULT_TAB_HEIGHT: u32 = 32;
pub const SETTING_VIEW_WIDTH: u32 = MAIN_WINDOW_WIDTH;
pub const SETTING_VIEW_HEIGHT: u32 = MAIN_WINDOW_HEIGHT - (DEFAULT_MENU_HEIGHT + DEFAULT_TAB_HEIGHT);

// Object view
pub const OBJECT_TREE_WIDTH: u32 = 256;
pub const OBJECT_INFO_SETTING_VIEW_WIDTH: u32 =
    MAIN_WINDOW_WIDTH - (OBJECT_TREE_WIDTH + 3 * DEFAULT_ITEM_SPACE);

// ============================================================================
// Ranges
// ============================================================================

/// Upper bound of integer spin boxes
pub const INT32_MAX: i64 = (1 << 31) - 1;

/// Largest magnitude a transformation value may be edited to
pub const TRANSFORMATION_MAX_VALUE: f64 = 10000.0;

/// File extension of scene files, without the dot
pub const SCENE_FILE_EXTENSION: &str = "nana";

// ============================================================================
// List model keys
// ============================================================================

/// Role names of the object tree list model
pub mod model_key {
    pub const GROUP_LEVEL: &str = "grouplevel";
    pub const ENABLED: &str = "enabled";
    pub const EXPANDED: &str = "expanded";
    pub const VISIBLE_INDEX: &str = "visibleindex";
    pub const NAME: &str = "name";
    pub const TYPE: &str = "type";

    // Transformation model
    pub const TRANSFORMATION: &str = "transformation";
    pub const AXIS: &str = "axis";
    pub const X_AXIS: &str = "x";
    pub const Y_AXIS: &str = "y";
    pub const Z_AXIS: &str = "z";
    pub const ANGLE: &str = "angle";
    pub const UNIT: &str = "unit";
}

// ============================================================================
// Preset scenes
// ============================================================================

/// Scenes bundled with the editor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PresetScene {
    Default,
    CornellBox,
    JensenCornellBox,
    CausticsTest,
    DispersionTest,
    VeachMisTest,
    VeachBdptTest,
    SmoothDiffuseTest,
    SmoothDielectricTest,
    SmoothConductorTest,
    RoughDielectricTest,
    RoughConductorTest,
    LayeredDiffuseTest,
    ClothTest,
    ColorCheckerSpectrum,
    ColorCheckerSRgb,
    RaytracingCamp4,
    PrivateRoom,
}

impl PresetScene {
    pub const ALL: &'static [PresetScene] = &[
        PresetScene::Default,
        PresetScene::CornellBox,
        PresetScene::JensenCornellBox,
        PresetScene::CausticsTest,
        PresetScene::DispersionTest,
        PresetScene::VeachMisTest,
        PresetScene::VeachBdptTest,
        PresetScene::SmoothDiffuseTest,
        PresetScene::SmoothDielectricTest,
        PresetScene::SmoothConductorTest,
        PresetScene::RoughDielectricTest,
        PresetScene::RoughConductorTest,
        PresetScene::LayeredDiffuseTest,
        PresetScene::ClothTest,
        PresetScene::ColorCheckerSpectrum,
        PresetScene::ColorCheckerSRgb,
        PresetScene::RaytracingCamp4,
        PresetScene::PrivateRoom,
    ];

    /// Scene name, which is also the preset's file stem
    pub const fn name(self) -> &'static str {
        match self {
            PresetScene::Default => "DefaultScene",
            PresetScene::CornellBox => "CornellBox",
            PresetScene::JensenCornellBox => "JensenCornellBox",
            PresetScene::CausticsTest => "CausticsTest",
            PresetScene::DispersionTest => "DispersionTest",
            PresetScene::VeachMisTest => "VeachMisTest",
            PresetScene::VeachBdptTest => "VeachBdptTest",
            PresetScene::SmoothDiffuseTest => "SurfaceTest-SmoothDiffuse",
            PresetScene::SmoothDielectricTest => "SurfaceTest-SmoothDielectric",
            PresetScene::SmoothConductorTest => "SurfaceTest-SmoothConductor",
            PresetScene::RoughDielectricTest => "SurfaceTest-RoughDielectric",
            PresetScene::RoughConductorTest => "SurfaceTest-RoughConductor",
            PresetScene::LayeredDiffuseTest => "SurfaceTest-LayeredDiffuse",
            PresetScene::ClothTest => "SurfaceTest-Cloth",
            PresetScene::ColorCheckerSpectrum => "ColorChecker-Spectrum",
            PresetScene::ColorCheckerSRgb => "ColorChecker-sRGB",
            PresetScene::RaytracingCamp4 => "RaytracingCamp4",
            PresetScene::PrivateRoom => "PrivateRoom",
        }
    }

    /// File name of the preset, e.g. `CornellBox.nana`
    pub fn file_name(self) -> String {
        format!("{}.{}", self.name(), SCENE_FILE_EXTENSION)
    }

    /// Build the preset in memory.
    ///
    /// Only the default scene and the Cornell box are compiled in; the other
    /// presets ship as scene files and return `None`.
    pub fn build(self) -> Option<SceneDocument> {
        match self {
            PresetScene::Default => Some(builder::empty_scene()),
            PresetScene::CornellBox => Some(builder::cornell_box_scene()),
            _ => None,
        }
    }
}

impl fmt::Display for PresetScene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PresetScene {
    type Err = SceneError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|preset| preset.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| SceneError::UnknownSymbol(s.to_string()))
    }
}
