//! Scene file load/save.
//!
//! Scene files are JSON with sorted keys and four-space indentation. Every
//! load runs the validation pass, so a document handed out by this module
//! is always consistent.

use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::document::{ColorValue, ObjectKind, SceneDocument, SurfaceKind, TextureKind};
use crate::error::{Result, SceneError};
use crate::layout::SCENE_FILE_EXTENSION;
use crate::validation::SceneValidator;

/// Scene file serializer
pub struct SceneFile;

impl SceneFile {
    /// Load and validate a `.nana` file
    pub fn load(path: impl AsRef<Path>) -> Result<SceneDocument> {
        let path = path.as_ref();
        let document = Self::read(path).and_then(|document| {
            SceneValidator::validate(&document)?;
            Ok(document)
        });
        let document = document.map_err(|err| {
            log::warn!("Rejected scene {}: {}", path.display(), err);
            err
        })?;

        log::info!(
            "Loaded scene '{}' from {} ({} objects)",
            document.scene_name(),
            path.display(),
            document.objects.len()
        );
        Ok(document)
    }

    /// Read and deserialize a `.nana` file without the validation pass.
    ///
    /// Only for tools that report every validation error at once; everything
    /// else goes through [`SceneFile::load`].
    pub fn read(path: impl AsRef<Path>) -> Result<SceneDocument> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(SceneError::FileNotFound(path.to_path_buf()));
        }
        if !is_scene_file(path) {
            return Err(SceneError::NotSceneFile(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Parse and validate scene JSON
    pub fn from_json_str(content: &str) -> Result<SceneDocument> {
        let document: SceneDocument = serde_json::from_str(content)?;
        SceneValidator::validate(&document)?;
        Ok(document)
    }

    /// Scene JSON with sorted keys and four-space indentation
    pub fn to_json_string(document: &SceneDocument) -> Result<String> {
        // Going through serde_json::Value sorts the keys
        let value = serde_json::to_value(document)?;

        let mut buffer = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
        value.serialize(&mut serializer)?;
        buffer.push(b'\n');

        String::from_utf8(buffer)
            .map_err(|err| SceneError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, err)))
    }

    /// Write a document to `path`
    pub fn save(document: &SceneDocument, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = Self::to_json_string(document)?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)?;

        log::info!("Saved scene '{}' to {}", document.scene_name(), path.display());
        Ok(())
    }
}

/// Whether the path carries the scene file extension
pub fn is_scene_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map_or(false, |ext| ext == SCENE_FILE_EXTENSION)
}

/// Resolve a forward-slash relative path against the scene file's directory
pub fn resolve_resource_path(scene_path: &Path, relative: &str) -> PathBuf {
    let mut resolved = scene_path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default();
    for component in relative.split('/').filter(|c| !c.is_empty() && *c != ".") {
        resolved.push(component);
    }
    resolved
}

/// Relative resource paths referenced by a document, in section order
pub fn resource_paths(document: &SceneDocument) -> Vec<&str> {
    let mut paths = Vec::new();

    for texture in &document.texture_models {
        if let TextureKind::Image { image_file_path } = &texture.kind {
            paths.push(image_file_path.as_str());
        }
        for color in texture.colors() {
            if let ColorValue::Spectra { value } = color {
                paths.push(value.as_str());
            }
        }
    }

    for surface in &document.surface_models {
        match &surface.kind {
            SurfaceKind::SmoothDiffuse { .. } => {}
            SurfaceKind::SmoothDielectric {
                inner_refractive_index,
                outer_refractive_index,
            }
            | SurfaceKind::RoughDielectric {
                inner_refractive_index,
                outer_refractive_index,
                ..
            }
            | SurfaceKind::LayeredDiffuse {
                inner_refractive_index,
                outer_refractive_index,
                ..
            } => {
                paths.push(outer_refractive_index.as_str());
                paths.push(inner_refractive_index.as_str());
            }
            SurfaceKind::SmoothConductor {
                inner_extinction,
                inner_refractive_index,
                outer_refractive_index,
            }
            | SurfaceKind::RoughConductor {
                inner_extinction,
                inner_refractive_index,
                outer_refractive_index,
                ..
            } => {
                paths.push(outer_refractive_index.as_str());
                paths.push(inner_refractive_index.as_str());
                paths.push(inner_extinction.as_str());
            }
            SurfaceKind::Cloth {
                fabric_refractive_index,
                ..
            } => paths.push(fabric_refractive_index.as_str()),
        }
    }

    for object in &document.objects {
        if let ObjectKind::Single {
            object_file_path: Some(path),
            ..
        } = &object.kind
        {
            paths.push(path.as_str());
        }
    }

    paths
}

/// Referenced resources that don't exist next to the scene file
pub fn missing_resources(document: &SceneDocument, scene_path: &Path) -> Vec<PathBuf> {
    let mut missing: Vec<PathBuf> = resource_paths(document)
        .into_iter()
        .map(|relative| resolve_resource_path(scene_path, relative))
        .filter(|path| !path.exists())
        .collect();
    missing.dedup();
    missing
}
