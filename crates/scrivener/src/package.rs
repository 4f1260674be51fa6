use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::xml::XmlElement;
use crate::{BinderNode, Result, ScrivenerError, ScrivxProject};

/// Per-item resources the mapping engine pulls from the project.
///
/// Every method is infallible: a missing synopsis, note or image is part of
/// normal projects and only means "nothing to copy".
pub trait ProjectResources {
    /// Synopsis text of an item, empty when it has none.
    fn synopsis(&self, node: &BinderNode) -> String;

    /// Plain-text notes of an item. Scrivener keeps notes as rich text,
    /// which is not decoded, so the default yields nothing.
    fn notes(&self, _node: &BinderNode) -> Option<String> {
        None
    }

    /// Where an item's index-card image would live, if it declares one.
    fn cover_image(&self, node: &BinderNode) -> Option<PathBuf>;

    /// Raw bytes of an asset, `None` when it does not exist.
    fn read_asset(&self, path: &Path) -> Option<Vec<u8>>;
}

/// A `.scriv` package directory on disk.
#[derive(Debug, Clone)]
pub struct ScrivPackage {
    root: PathBuf,
    project_file: PathBuf,
}

impl ScrivPackage {
    /// Locates `<Name>.scriv/<Name>.scrivx`. A trailing separator on the
    /// package path is ignored.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let root: PathBuf = path.as_ref().components().collect();
        if !root.is_dir() {
            return Err(ScrivenerError::PackageNotFound(root));
        }

        let Some(name) = root.file_name() else {
            return Err(ScrivenerError::NotScrivener3(root));
        };
        let mut scrivx = name.to_os_string();
        scrivx.push("x");
        let project_file = root.join(scrivx);
        if !project_file.is_file() {
            return Err(ScrivenerError::NotScrivener3(root));
        }

        debug!("Found project file {:?}", project_file);
        Ok(Self { root, project_file })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn project_file(&self) -> &Path {
        &self.project_file
    }

    pub fn load_project(&self) -> Result<ScrivxProject> {
        let content = fs::read_to_string(&self.project_file)?;
        ScrivxProject::parse(&content)
    }

    /// `ProjectTitle` from the compile settings, else the package name
    /// without its `.scriv` extension.
    pub fn book_title(&self) -> String {
        let compile_xml = self.root.join("Settings").join("compile.xml");
        let from_settings = fs::read_to_string(&compile_xml)
            .ok()
            .and_then(|content| match XmlElement::parse(&content) {
                Ok(root) => root.find("ProjectTitle").map(|t| t.text.clone()),
                Err(e) => {
                    warn!("Ignoring unreadable {:?}: {}", compile_xml, e);
                    None
                }
            })
            .filter(|title| !title.is_empty());

        from_settings.unwrap_or_else(|| {
            self.root
                .file_name()
                .map(|n| n.to_string_lossy().trim_end_matches(".scriv").to_string())
                .unwrap_or_default()
        })
    }

    /// `<dir>/<Name>.pltr` next to the package.
    pub fn default_output_path(&self) -> PathBuf {
        self.root.with_extension("pltr")
    }

    fn data_dir(&self, uuid: &str) -> PathBuf {
        self.root.join("Files").join("Data").join(uuid)
    }
}

impl ProjectResources for ScrivPackage {
    fn synopsis(&self, node: &BinderNode) -> String {
        let path = self.data_dir(&node.uuid).join("synopsis.txt");
        match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => String::new(),
            Err(e) => {
                warn!("Failed to read synopsis {:?}: {}", path, e);
                String::new()
            }
        }
    }

    fn cover_image(&self, node: &BinderNode) -> Option<PathBuf> {
        let extension = node.image_extension.as_deref().filter(|e| !e.is_empty())?;
        Some(
            self.data_dir(&node.uuid)
                .join(format!("card-image.{extension}")),
        )
    }

    fn read_asset(&self, path: &Path) -> Option<Vec<u8>> {
        match fs::read(path) {
            Ok(bytes) => Some(bytes),
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => {
                warn!("Failed to read asset {:?}: {}", path, e);
                None
            }
        }
    }
}
