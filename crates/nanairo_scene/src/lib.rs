//! # Nanairo Scene - scene description layer
//!
//! Typed model of the `.nana` scene files read by the Nanairo renderer and
//! written by its editor.
//!
//! ## Architecture
//!
//! ```text
//! schema (tokens) ──► document (typed sections) ──► validation ──► file / session
//!                          ▲
//!                       builder (Cornell box, default scene)
//! ```
//!
//! ## Key Concepts
//!
//! - **Symbol**: closed vocabulary of keys and enumerated values
//! - **SceneDocument**: tagged-union model of a scene file
//! - **ModelIndex**: positional reference into a model section
//! - **SceneValidator**: consistency checks run at every load
//! - **PropertyMap**: untyped view used by editor bindings

pub mod builder;
pub mod document;
pub mod error;
pub mod file;
pub mod hierarchy;
pub mod layout;
pub mod property;
pub mod schema;
pub mod session;
pub mod validation;
pub mod value;

pub use builder::{build_default_scene, cornell_box_scene, empty_scene};
pub use document::{
    BvhSettings, ColorSettings, ColorValue, EmitterIndex, EmitterKind, EmitterModel, ModelIndex,
    ObjectKind, RenderingMethod, RenderingMethodKind, SceneDocument, SceneObject, SceneTag,
    SurfaceIndex, SurfaceKind, SurfaceModel, SystemSettings, TextureIndex, TextureKind,
    TextureModel, Transformation,
};
pub use error::{Result, SceneError};
pub use file::{missing_resources, resolve_resource_path, resource_paths, SceneFile};
pub use hierarchy::ObjectTree;
pub use layout::PresetScene;
pub use property::{
    copy_color, get_property, is_in_bounds, merge_data_list, set_property, shallow_copy, Rgba,
};
pub use schema::{lookup, Symbol};
pub use session::SceneSession;
pub use validation::{SceneValidator, ValidationError, ValidationResult};
pub use value::{PropertyMap, Value};
