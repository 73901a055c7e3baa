//! Shell commands.
//!
//! Each command returns the text it prints so it can be checked without
//! capturing stdout.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use nanairo_scene::{
    lookup as lookup_token, missing_resources, ObjectTree, PresetScene, SceneDocument, SceneFile,
    SceneSession, SceneValidator, Symbol,
};

use crate::config::ShellConfig;
use crate::error::{Result, ShellError};

/// Write a built-in preset scene.
///
/// `preset` falls back to the configured default; `output` falls back to
/// `<scene_dir>/<preset>.nana`. Returns the written path.
pub fn write_default(
    config: &ShellConfig,
    preset: Option<&str>,
    output: Option<&Path>,
) -> Result<PathBuf> {
    let preset = match preset {
        Some(name) => name.parse::<PresetScene>()?,
        None => config.preset()?,
    };
    let document = preset
        .build()
        .ok_or_else(|| ShellError::ExternalPreset(preset.name().to_string()))?;

    let output = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| config.scene_dir.join(preset.name()));

    let mut session = SceneSession::with_document(document);
    Ok(session.save_as(output)?)
}

/// Check a scene file and report every validation error
pub fn validate(path: &Path) -> Result<String> {
    let document = SceneFile::read(path)?;
    let errors = SceneValidator::collect(&document);
    if errors.is_empty() {
        return Ok(format!("{}: OK\n", path.display()));
    }

    for err in &errors {
        log::error!("{}: {}", path.display(), err);
    }
    Err(ShellError::Invalid {
        path: path.display().to_string(),
        count: errors.len(),
    })
}

/// Summary of a scene file
pub fn info(path: &Path) -> Result<String> {
    let session = SceneSession::open(path)?;
    let document = session.document();
    let tree = session.object_tree();

    let mut out = String::new();
    let [width, height] = document.system.image_resolution;
    // Writing to a String can't fail
    let _ = writeln!(out, "Scene: {}", document.scene_name());
    let _ = writeln!(out, "Resolution: {}x{}", width, height);
    let _ = writeln!(out, "Rendering method: {}", document.rendering_method.method.symbol());
    let _ = writeln!(out, "Bvh: {}", document.bvh.symbol());
    let _ = writeln!(out, "Textures: {}", document.texture_models.len());
    let _ = writeln!(out, "Surfaces: {}", document.surface_models.len());
    let _ = writeln!(out, "Emitters: {}", document.emitter_models.len());
    let _ = writeln!(out, "Objects: {}", document.objects.len());
    write_object_tree(&mut out, &tree, document);

    let missing = missing_resources(document, path);
    if !missing.is_empty() {
        let _ = writeln!(out, "Missing resources:");
        for resource in missing {
            let _ = writeln!(out, "  {}", resource.display());
        }
    }
    Ok(out)
}

fn write_object_tree(out: &mut String, tree: &ObjectTree, document: &SceneDocument) {
    for (index, object) in document.objects.iter().enumerate() {
        let depth = tree.ancestors(index).len() + 1;
        let disabled = if tree.is_effectively_enabled(&document.objects, index) {
            ""
        } else {
            " [disabled]"
        };
        let _ = writeln!(
            out,
            "{:indent$}{} ({}){}",
            "",
            object.name,
            object.symbol(),
            disabled,
            indent = depth * 2
        );
    }
}

/// Resolve symbolic names to their tokens, one per line
pub fn lookup(names: &[String]) -> Result<String> {
    let mut out = String::new();
    for name in names {
        let token = lookup_token(name)?;
        let _ = writeln!(out, "{}\t{}", name, token);
    }
    Ok(out)
}

/// Every registry entry as `name<TAB>token`
pub fn tokens() -> String {
    Symbol::ALL
        .iter()
        .map(|symbol| format!("{}\t{}\n", symbol.name(), symbol.token()))
        .collect()
}

/// Preset file names, marking the ones built into the binary
pub fn presets() -> String {
    PresetScene::ALL
        .iter()
        .map(|preset| {
            let built_in = if preset.build().is_some() { " (built in)" } else { "" };
            format!("{}{}\n", preset.file_name(), built_in)
        })
        .collect()
}

/// Copy a scene file to the configured backup location
pub fn backup(config: &ShellConfig, path: &Path) -> Result<PathBuf> {
    let session = SceneSession::open(path)?;
    Ok(session.save_backup(&config.scene_dir, &config.backup_file_name)?)
}
