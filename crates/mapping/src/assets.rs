use base64::Engine;
use plottr::{Image, ImageMap};
use scrivener::ProjectResources;
use std::path::Path;
use tracing::debug;

/// Image type declared in the embedded `data:` URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MimeKind {
    Jpeg,
    Png,
    Gif,
    Unknown,
}

impl MimeKind {
    pub fn from_extension(extension: &str) -> Self {
        match extension.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Self::Jpeg,
            "png" => Self::Png,
            "gif" => Self::Gif,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Jpeg => "jpeg",
            Self::Png => "png",
            Self::Gif => "gif",
            Self::Unknown => "unknown",
        }
    }
}

/// Copies image files into the document. Ids come from one counter for the
/// whole run, starting at 1.
#[derive(Debug, Default)]
pub struct AssetEmbedder {
    images: Vec<Image>,
    last_id: u32,
}

impl AssetEmbedder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Embeds the file at `path`, or returns `None` if it does not exist.
    pub fn embed<R>(&mut self, path: &Path, resources: &R) -> Option<u32>
    where
        R: ProjectResources + ?Sized,
    {
        let bytes = resources.read_asset(path)?;
        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().into_owned())
            .unwrap_or_default();
        let kind = MimeKind::from_extension(&extension);
        let payload = base64::engine::general_purpose::STANDARD.encode(&bytes);

        self.last_id += 1;
        let id = self.last_id;
        let name = unique_name(path, &extension);
        debug!("Embedding image {} as {} ({} bytes)", id, name, bytes.len());

        self.images.push(Image {
            id,
            name,
            path: path.to_string_lossy().into_owned(),
            data: format!("data:image/{};base64,{}", kind.as_str(), payload),
        });
        Some(id)
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn into_images(self) -> ImageMap {
        ImageMap(self.images)
    }
}

/// Names the image after its parent directory (the owning item's UUID);
/// the files themselves are nearly all called `card-image.<ext>`.
fn unique_name(path: &Path, extension: &str) -> String {
    let stem = path
        .parent()
        .and_then(|p| p.file_name())
        .or_else(|| path.file_stem())
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    if extension.is_empty() {
        stem
    } else {
        format!("{stem}.{extension}")
    }
}
