#![allow(dead_code)]

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use plottr::{color::color_at, BookId, Outline};
use scrivener::{BinderKind, BinderNode, KeywordDef, LabelDef, ProjectMetadata, ProjectResources, ScrivxProject};

/// Synopses and files held in memory, keyed like the on-disk package.
#[derive(Debug, Default)]
pub struct MemoryResources {
    pub synopses: HashMap<String, String>,
    pub notes: HashMap<String, String>,
    pub files: HashMap<PathBuf, Vec<u8>>,
}

impl MemoryResources {
    pub fn with_synopsis(mut self, uuid: &str, text: &str) -> Self {
        self.synopses.insert(uuid.to_string(), text.to_string());
        self
    }

    pub fn with_image(mut self, uuid: &str, extension: &str, bytes: &[u8]) -> Self {
        self.files.insert(image_path(uuid, extension), bytes.to_vec());
        self
    }
}

pub fn image_path(uuid: &str, extension: &str) -> PathBuf {
    PathBuf::from(format!("/Files/Data/{uuid}/card-image.{extension}"))
}

impl ProjectResources for MemoryResources {
    fn synopsis(&self, node: &BinderNode) -> String {
        self.synopses.get(&node.uuid).cloned().unwrap_or_default()
    }

    fn notes(&self, node: &BinderNode) -> Option<String> {
        self.notes.get(&node.uuid).cloned()
    }

    fn cover_image(&self, node: &BinderNode) -> Option<PathBuf> {
        node.image_extension
            .as_deref()
            .map(|extension| image_path(&node.uuid, extension))
    }

    fn read_asset(&self, path: &Path) -> Option<Vec<u8>> {
        self.files.get(path).cloned()
    }
}

pub fn text(uuid: &str) -> BinderNode {
    BinderNode::new(uuid, BinderKind::Text, Some(uuid))
}

pub fn folder(uuid: &str, children: Vec<BinderNode>) -> BinderNode {
    BinderNode::new(uuid, BinderKind::Folder, Some(uuid)).with_children(children)
}

/// A binder with the manuscript plus optional top-level folders next to it.
pub fn project(draft: Vec<BinderNode>, siblings: Vec<BinderNode>) -> ScrivxProject {
    let mut binder = vec![BinderNode::new("DRAFT", BinderKind::DraftRoot, Some("Manuscript")).with_children(draft)];
    binder.extend(siblings);
    ScrivxProject {
        version: "2.0".to_string(),
        binder,
        metadata: ProjectMetadata::default(),
    }
}

pub fn label(id: &str, name: &str, color: &str) -> LabelDef {
    LabelDef {
        id: id.to_string(),
        name: name.to_string(),
        color: color.to_string(),
    }
}

pub fn keyword(id: &str, name: &str, color: &str) -> KeywordDef {
    KeywordDef {
        id: id.to_string(),
        name: name.to_string(),
        color: color.to_string(),
    }
}

/// Checks the structural guarantees every finished outline must satisfy.
pub fn assert_well_formed(outline: &Outline) {
    for (index, card) in outline.cards.iter().enumerate() {
        assert_eq!(card.id as usize, index + 1, "card ids are dense");
        assert_eq!(card.beat_id as usize, index + 2, "one beat per card, in order");
        assert!(
            card.line_id >= 1 && (card.line_id as usize) <= outline.lines.len(),
            "card {} points at missing plotline {}",
            card.id,
            card.line_id
        );
    }

    assert_eq!(outline.beats.len(), outline.cards.len() + 1);
    assert_eq!(outline.beats[0].id, 1);
    assert_eq!(outline.beats[0].book_id, BookId::Series);
    for (index, beat) in outline.beats.iter().enumerate().skip(1) {
        assert_eq!(beat.id as usize, index + 1);
        assert_eq!(beat.position as usize, index - 1);
    }

    for (index, line) in outline.lines.iter().enumerate() {
        assert_eq!(line.id as usize, index + 1, "plotline ids are dense");
        assert_eq!(line.position as usize, index);
        assert_eq!(line.color, color_at(index));
    }

    let (series, regular) = outline.lines.split_last().expect("series plotline");
    assert_eq!(series.book_id, BookId::Series);
    for line in regular {
        assert!(
            outline.cards.iter().any(|c| c.line_id == line.id),
            "plotline {} ({:?}) has no cards",
            line.id,
            line.title
        );
    }

    for entities in [&outline.characters, &outline.places] {
        for (index, entity) in entities.iter().enumerate() {
            assert_eq!(entity.id as usize, index + 1);
        }
    }
}
