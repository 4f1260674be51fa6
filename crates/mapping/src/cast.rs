use plottr::{Entity, RichText};
use scrivener::{find_top_level_folder, BinderKind, BinderNode, ProjectResources};
use tracing::{debug, info};

use crate::{AssetEmbedder, LabelKeywordRegistry, Limit};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CastKind {
    Character,
    Place,
}

impl CastKind {
    fn entity(&self, id: u32, name: String) -> Entity {
        match self {
            Self::Character => Entity::character(id, name),
            Self::Place => Entity::place(id, name),
        }
    }
}

/// Builds the character and place lists from their binder folders.
pub struct CastCollector<'a, R: ?Sized> {
    resources: &'a R,
    registry: &'a LabelKeywordRegistry,
    keywords_are_tags: bool,
    embedder: &'a mut AssetEmbedder,
}

impl<'a, R> CastCollector<'a, R>
where
    R: ProjectResources + ?Sized,
{
    pub fn new(
        resources: &'a R,
        registry: &'a LabelKeywordRegistry,
        keywords_are_tags: bool,
        embedder: &'a mut AssetEmbedder,
    ) -> Self {
        Self {
            resources,
            registry,
            keywords_are_tags,
            embedder,
        }
    }

    /// One entry per text item anywhere below the top-level folder named
    /// `folder`, in document order, numbered from 1.
    pub fn collect(
        &mut self,
        kind: CastKind,
        binder: &[BinderNode],
        folder: &str,
        limit: Limit,
    ) -> Vec<Entity> {
        let mut entries = Vec::new();
        if limit == Limit::Skip {
            debug!("Skipping {:?} folder {:?}", kind, folder);
            return entries;
        }

        let Some(root) = find_top_level_folder(binder, folder) else {
            info!("No {:?} folder named {:?} in the binder", kind, folder);
            return entries;
        };

        for node in root.descendants().filter(|n| n.kind == BinderKind::Text) {
            if !limit.allows(entries.len()) {
                break;
            }
            let id = entries.len() as u32 + 1;
            entries.push(self.entry(kind, id, node));
        }

        debug!("Read {} {:?} entries from {:?}", entries.len(), kind, folder);
        entries
    }

    fn entry(&mut self, kind: CastKind, id: u32, node: &BinderNode) -> Entity {
        let mut entity = kind.entity(id, node.title.clone().unwrap_or_default());
        entity.description = self.resources.synopsis(node);

        if let Some(notes) = self.resources.notes(node).filter(|n| !n.is_empty()) {
            entity.notes = vec![RichText::block(notes)];
        }

        if let Some(path) = self.resources.cover_image(node) {
            entity.image_id = self
                .embedder
                .embed(&path, self.resources)
                .map(|image| image.to_string());
        }

        if self.keywords_are_tags {
            entity.tags = self.registry.tags_for_keywords(&node.keyword_ids);
        }
        entity
    }
}
