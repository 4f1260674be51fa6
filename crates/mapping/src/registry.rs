use std::collections::HashMap;

use plottr::{Entity, Tag};
use scrivener::ProjectMetadata;
use tracing::debug;

use crate::ConvertOptions;

#[derive(Debug, Clone)]
struct LabelEntry {
    name: String,
    color: String,
}

#[derive(Debug, Clone)]
struct KeywordEntry {
    name: String,
    color: String,
    tag_id: Option<u32>,
}

/// Project-wide labels and keywords, keyed by their Scrivener ids.
///
/// Matching against characters is by exact, case-sensitive name only.
#[derive(Debug, Clone)]
pub struct LabelKeywordRegistry {
    default_label_id: String,
    labels: HashMap<String, LabelEntry>,
    keywords: HashMap<String, KeywordEntry>,
    keyword_order: Vec<String>,
    assign_tags: bool,
    next_tag_id: u32,
}

impl LabelKeywordRegistry {
    pub fn new(default_label_id: impl Into<String>, assign_tags: bool) -> Self {
        Self {
            default_label_id: default_label_id.into(),
            labels: HashMap::new(),
            keywords: HashMap::new(),
            keyword_order: Vec::new(),
            assign_tags,
            next_tag_id: 1,
        }
    }

    pub fn from_metadata(metadata: &ProjectMetadata, assign_tags: bool) -> Self {
        let mut registry = Self::new(metadata.default_label_id.clone(), assign_tags);
        for label in &metadata.labels {
            registry.register_label(&label.id, &label.name, &label.color);
        }
        for keyword in &metadata.keywords {
            registry.register_keyword(&keyword.id, &keyword.name, &keyword.color);
        }
        debug!(
            "Registered {} labels and {} keywords",
            registry.label_count(),
            registry.keyword_count()
        );
        registry
    }

    /// Returns false for the project's default label, which is never registered.
    pub fn register_label(&mut self, id: &str, name: &str, color: &str) -> bool {
        if id == self.default_label_id {
            return false;
        }
        self.labels.insert(
            id.to_string(),
            LabelEntry {
                name: name.to_string(),
                color: color.to_string(),
            },
        );
        true
    }

    /// Registers a keyword; in tag mode its first registration also hands out
    /// the next tag id. Tag ids are never reassigned.
    pub fn register_keyword(&mut self, id: &str, name: &str, color: &str) {
        if let Some(existing) = self.keywords.get_mut(id) {
            existing.name = name.to_string();
            existing.color = color.to_string();
            return;
        }

        let tag_id = if self.assign_tags {
            let tag_id = self.next_tag_id;
            self.next_tag_id += 1;
            Some(tag_id)
        } else {
            None
        };
        self.keywords.insert(
            id.to_string(),
            KeywordEntry {
                name: name.to_string(),
                color: color.to_string(),
                tag_id,
            },
        );
        self.keyword_order.push(id.to_string());
    }

    pub fn label_count(&self) -> usize {
        self.labels.len()
    }

    pub fn keyword_count(&self) -> usize {
        self.keywords.len()
    }

    pub fn color_for_label(&self, id: &str) -> Option<&str> {
        self.labels.get(id).map(|l| l.color.as_str())
    }

    pub fn tag_for_keyword(&self, id: &str) -> Option<u32> {
        self.keywords.get(id).and_then(|k| k.tag_id)
    }

    /// The character named like the label, if any.
    pub fn characters_for_label(&self, id: &str, characters: &[Entity]) -> Vec<u32> {
        self.labels
            .get(id)
            .and_then(|label| character_named(characters, &label.name))
            .into_iter()
            .collect()
    }

    /// Appends, in keyword order, every character named like one of the
    /// keywords and not already in `found`.
    pub fn characters_for_keywords(
        &self,
        ids: &[String],
        mut found: Vec<u32>,
        characters: &[Entity],
    ) -> Vec<u32> {
        for id in ids {
            let Some(keyword) = self.keywords.get(id) else {
                continue;
            };
            if let Some(character) = character_named(characters, &keyword.name) {
                if !found.contains(&character) {
                    found.push(character);
                }
            }
        }
        found
    }

    pub fn tags_for_keywords(&self, ids: &[String]) -> Vec<u32> {
        ids.iter().filter_map(|id| self.tag_for_keyword(id)).collect()
    }

    /// Every keyword promoted to a tag, in registration order.
    pub fn tags(&self) -> Vec<Tag> {
        self.keyword_order
            .iter()
            .filter_map(|id| self.keywords.get(id))
            .filter_map(|keyword| {
                keyword.tag_id.map(|tag_id| Tag {
                    id: tag_id,
                    title: keyword.name.clone(),
                    color: Some(keyword.color.clone()),
                })
            })
            .collect()
    }
}

fn character_named(characters: &[Entity], name: &str) -> Option<u32> {
    characters.iter().find(|c| c.name == name).map(|c| c.id)
}

/// Resolves a scene's label and keywords into card fields, honoring the
/// options that enable each kind of match.
#[derive(Debug, Clone, Copy)]
pub struct CrossReference<'a> {
    registry: &'a LabelKeywordRegistry,
    characters: &'a [Entity],
    options: &'a ConvertOptions,
}

impl<'a> CrossReference<'a> {
    pub fn new(
        registry: &'a LabelKeywordRegistry,
        characters: &'a [Entity],
        options: &'a ConvertOptions,
    ) -> Self {
        Self {
            registry,
            characters,
            options,
        }
    }

    pub fn characters(&self, label: Option<&str>, keywords: &[String]) -> Vec<u32> {
        let mut found = Vec::new();
        if self.options.labels_are_characters {
            if let Some(label) = label {
                found = self.registry.characters_for_label(label, self.characters);
            }
        }
        if self.options.keywords_are_characters {
            found = self
                .registry
                .characters_for_keywords(keywords, found, self.characters);
        }
        found
    }

    pub fn tags(&self, keywords: &[String]) -> Vec<u32> {
        if self.options.keywords_are_tags {
            self.registry.tags_for_keywords(keywords)
        } else {
            Vec::new()
        }
    }

    pub fn color(&self, label: Option<&str>) -> Option<String> {
        if !self.options.use_label_colors {
            return None;
        }
        label
            .and_then(|id| self.registry.color_for_label(id))
            .map(str::to_string)
    }
}
