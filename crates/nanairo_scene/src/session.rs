//! Editing session - owns the current scene document.
//!
//! A session lives as long as the editor keeps a scene open. Loading another
//! scene or creating a new one replaces the document wholesale.

use std::path::{Path, PathBuf};

use crate::builder;
use crate::document::SceneDocument;
use crate::error::{Result, SceneError};
use crate::file::{is_scene_file, SceneFile};
use crate::hierarchy::ObjectTree;
use crate::layout::SCENE_FILE_EXTENSION;
use crate::validation::SceneValidator;

/// Current document, its file and its dirty flag
#[derive(Debug, Clone)]
pub struct SceneSession {
    document: SceneDocument,
    path: Option<PathBuf>,
    modified: bool,
}

impl Default for SceneSession {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneSession {
    /// Session on the default scene, not yet backed by a file
    pub fn new() -> Self {
        Self::with_document(builder::build_default_scene())
    }

    pub fn with_document(document: SceneDocument) -> Self {
        Self {
            document,
            path: None,
            modified: false,
        }
    }

    /// Open a scene file
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let document = SceneFile::load(path)?;
        Ok(Self {
            document,
            path: Some(path.to_path_buf()),
            modified: false,
        })
    }

    pub fn document(&self) -> &SceneDocument {
        &self.document
    }

    /// Mutable access for edits; marks the session modified
    pub fn document_mut(&mut self) -> &mut SceneDocument {
        self.modified = true;
        &mut self.document
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Object tree of the current document
    pub fn object_tree(&self) -> ObjectTree {
        ObjectTree::build(&self.document.objects)
    }

    /// Replace the document, as when a preset or another scene is loaded.
    ///
    /// The new document is validated first; on error the session is untouched.
    pub fn replace(&mut self, document: SceneDocument) -> Result<()> {
        SceneValidator::validate(&document)?;
        log::info!(
            "Replacing scene '{}' with '{}'",
            self.document.scene_name(),
            document.scene_name()
        );
        self.document = document;
        self.path = None;
        self.modified = false;
        Ok(())
    }

    /// Save to the file the session was opened from or last saved to
    pub fn save(&mut self) -> Result<()> {
        let path = self.path.clone().ok_or(SceneError::NoFilePath)?;
        self.write(&path)
    }

    /// Save under a new path; `.nana` is appended when missing
    pub fn save_as(&mut self, path: impl AsRef<Path>) -> Result<PathBuf> {
        let mut path = path.as_ref().to_path_buf();
        if !is_scene_file(&path) {
            let mut name = path.clone().into_os_string();
            name.push(".");
            name.push(SCENE_FILE_EXTENSION);
            path = PathBuf::from(name);
        }
        self.write(&path)?;
        self.path = Some(path.clone());
        Ok(path)
    }

    /// Write a backup copy without touching the session's own path
    pub fn save_backup(&self, dir: impl AsRef<Path>, file_name: &str) -> Result<PathBuf> {
        let path = dir.as_ref().join(file_name);
        if !is_scene_file(&path) {
            return Err(SceneError::NotSceneFile(path));
        }
        SceneValidator::validate(&self.document)?;
        SceneFile::save(&self.document, &path)?;
        log::debug!("Backed up scene to {}", path.display());
        Ok(path)
    }

    fn write(&mut self, path: &Path) -> Result<()> {
        SceneValidator::validate(&self.document)?;
        SceneFile::save(&self.document, path)?;
        self.modified = false;
        Ok(())
    }
}
