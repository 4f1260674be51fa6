use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::BOOK_ID;

/// Owner of a plotline or beat: a regular book, or the "series" pseudo-book.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookId {
    Book(u32),
    Series,
}

impl Default for BookId {
    fn default() -> Self {
        Self::Book(BOOK_ID)
    }
}

// Plottr stores book ids as numbers, except the series which is the literal "series".
impl Serialize for BookId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            BookId::Book(id) => serializer.serialize_u32(*id),
            BookId::Series => serializer.serialize_str("series"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextLeaf {
    pub text: String,
}

/// One block of Plottr's slate-style rich text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RichText {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub block_type: Option<String>,
    pub children: Vec<TextLeaf>,
}

impl RichText {
    pub fn paragraph(text: impl Into<String>) -> Self {
        Self {
            block_type: Some("paragraph".to_string()),
            children: vec![TextLeaf { text: text.into() }],
        }
    }

    /// Untyped block, the shape Plottr uses for character and place notes.
    pub fn block(text: impl Into<String>) -> Self {
        Self {
            block_type: None,
            children: vec![TextLeaf { text: text.into() }],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Plotline {
    pub id: u32,
    pub book_id: BookId,
    pub color: String,
    pub title: String,
    pub position: u32,
    pub character_id: Option<u32>,
    pub expanded: Option<bool>,
    pub from_template_id: Option<String>,
}

impl Plotline {
    pub fn new(id: u32, book_id: BookId, title: impl Into<String>) -> Self {
        let mut line = Self {
            id,
            book_id,
            color: String::new(),
            title: title.into(),
            position: 0,
            character_id: None,
            expanded: None,
            from_template_id: None,
        };
        line.renumber(id);
        line
    }

    /// Moves the line to `id`; position and color always follow the id.
    pub fn renumber(&mut self, id: u32) {
        let index = id.saturating_sub(1);
        self.id = id;
        self.position = index;
        self.color = crate::color::color_at(index as usize).to_string();
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Beat {
    pub id: u32,
    pub book_id: BookId,
    pub position: u32,
    pub title: String,
    pub time: i64,
    pub templates: Vec<Value>,
    pub auto_outline_sort: bool,
    pub from_template_id: Option<String>,
}

impl Beat {
    pub fn new(id: u32, book_id: BookId, position: u32) -> Self {
        Self {
            id,
            book_id,
            position,
            title: "auto".to_string(),
            time: 0,
            templates: Vec::new(),
            auto_outline_sort: true,
            from_template_id: None,
        }
    }
}

/// A scene card. `color` is only written when a label color was resolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: u32,
    pub line_id: u32,
    pub beat_id: u32,
    pub book_id: Option<u32>,
    pub position_within_line: u32,
    pub position_in_beat: u32,
    pub title: String,
    pub description: Vec<RichText>,
    pub tags: Vec<u32>,
    pub characters: Vec<u32>,
    pub places: Vec<u32>,
    pub templates: Vec<Value>,
    pub image_id: Option<String>,
    pub from_template_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Card {
    pub fn new(id: u32, line_id: u32, beat_id: u32, title: impl Into<String>) -> Self {
        Self {
            id,
            line_id,
            beat_id,
            book_id: None,
            position_within_line: 0,
            position_in_beat: 0,
            title: title.into(),
            description: Vec::new(),
            tags: Vec::new(),
            characters: Vec::new(),
            places: Vec::new(),
            templates: Vec::new(),
            image_id: None,
            from_template_id: None,
            color: None,
        }
    }
}

/// A character or a place. Only characters carry a category.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    pub id: u32,
    pub name: String,
    pub description: String,
    pub notes: Vec<RichText>,
    pub color: Option<String>,
    pub cards: Vec<u32>,
    pub note_ids: Vec<u32>,
    pub templates: Vec<Value>,
    pub tags: Vec<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    pub image_id: Option<String>,
    pub book_ids: Vec<u32>,
}

impl Entity {
    fn new(id: u32, name: impl Into<String>, category_id: Option<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: String::new(),
            notes: Vec::new(),
            color: None,
            cards: Vec::new(),
            note_ids: Vec::new(),
            templates: Vec::new(),
            tags: Vec::new(),
            category_id,
            image_id: None,
            book_ids: vec![BOOK_ID],
        }
    }

    /// New character in the "Main" category.
    pub fn character(id: u32, name: impl Into<String>) -> Self {
        Self::new(id, name, Some("1".to_string()))
    }

    pub fn place(id: u32, name: impl Into<String>) -> Self {
        Self::new(id, name, None)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tag {
    pub id: u32,
    pub title: String,
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Image {
    pub id: u32,
    pub name: String,
    pub path: String,
    /// `data:` URL holding the base64 payload.
    pub data: String,
}

/// Embedded images, written as an object keyed by the stringified id in id order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageMap(pub Vec<Image>);

impl ImageMap {
    pub fn get(&self, id: u32) -> Option<&Image> {
        self.0.iter().find(|image| image.id == id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for ImageMap {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for image in &self.0 {
            map.serialize_entry(&image.id.to_string(), image)?;
        }
        map.end()
    }
}

/// The flat, id-indexed part of a Plottr file produced by a conversion.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Outline {
    pub lines: Vec<Plotline>,
    pub beats: Vec<Beat>,
    pub cards: Vec<Card>,
    pub characters: Vec<Entity>,
    pub places: Vec<Entity>,
    pub tags: Vec<Tag>,
    pub images: ImageMap,
}
