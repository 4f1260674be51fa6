use tracing::{debug, warn};

use crate::xml::XmlElement;

/// Label id Scrivener uses for "No Label" unless the project says otherwise.
pub const DEFAULT_LABEL_ID: &str = "-1";

#[derive(Debug, Clone, PartialEq)]
pub struct LabelDef {
    pub id: String,
    pub name: String,
    /// `#rrggbb`
    pub color: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct KeywordDef {
    pub id: String,
    pub name: String,
    /// `#rrggbb`
    pub color: String,
}

/// Project-wide label and keyword tables.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectMetadata {
    pub default_label_id: String,
    pub labels: Vec<LabelDef>,
    pub keywords: Vec<KeywordDef>,
}

impl Default for ProjectMetadata {
    fn default() -> Self {
        Self {
            default_label_id: DEFAULT_LABEL_ID.to_string(),
            labels: Vec::new(),
            keywords: Vec::new(),
        }
    }
}

impl ProjectMetadata {
    /// Reads `LabelSettings` and the project-level `Keywords` list. Entries
    /// without a name or a usable color are skipped.
    pub(crate) fn from_xml(project: &XmlElement) -> Self {
        let mut metadata = Self::default();

        if let Some(settings) = project.child("LabelSettings") {
            if let Some(id) = settings.child_text("DefaultLabelID") {
                metadata.default_label_id = id.to_string();
            }
            for label in settings
                .child("Labels")
                .into_iter()
                .flat_map(|l| l.children_named("Label"))
            {
                let id = label.attr("ID").unwrap_or_default();
                if id == metadata.default_label_id {
                    debug!("Ignoring default label {:?}", id);
                    continue;
                }
                let color = label.attr("Color").and_then(rgb_to_hex);
                match color {
                    Some(color) if !label.text.is_empty() => metadata.labels.push(LabelDef {
                        id: id.to_string(),
                        name: label.text.clone(),
                        color,
                    }),
                    _ => warn!("Skipping label {:?}: missing name or color", id),
                }
            }
        }

        if let Some(keywords) = project.child("Keywords") {
            read_keywords(keywords, &mut metadata.keywords);
        }

        metadata
    }
}

/// Reads the `Keyword` entries under `parent` in document order. Nested
/// keywords live in `Keyword/Children` and follow their parent.
fn read_keywords(parent: &XmlElement, keywords: &mut Vec<KeywordDef>) {
    for keyword in parent.children_named("Keyword") {
        let id = keyword.attr("ID").unwrap_or_default();
        let name = keyword.child_text("Title");
        let color = keyword.child_text("Color").and_then(rgb_to_hex);
        match (name, color) {
            (Some(name), Some(color)) => keywords.push(KeywordDef {
                id: id.to_string(),
                name: name.to_string(),
                color,
            }),
            _ => warn!("Skipping keyword {:?}: missing title or color", id),
        }

        if let Some(children) = keyword.child("Children") {
            read_keywords(children, keywords);
        }
    }
}

/// Converts Scrivener's `"r g b"` float triple (0.0..=1.0) to `#rrggbb`.
pub fn rgb_to_hex(value: &str) -> Option<String> {
    let channels: Vec<f64> = value
        .split_whitespace()
        .map(|c| c.parse::<f64>().ok())
        .collect::<Option<_>>()?;
    if channels.len() < 3 {
        return None;
    }

    let hex: String = channels[..3]
        .iter()
        .map(|c| format!("{:02x}", (c * 255.0).round().clamp(0.0, 255.0) as u8))
        .collect();
    Some(format!("#{hex}"))
}
