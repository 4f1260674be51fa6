use serde::Serialize;
use serde_json::{json, Value};
use std::path::Path;

use crate::{Beat, Card, Entity, ImageMap, Outline, Plotline, PlottrError, Tag, PLOTTR_VERSION};

/// A complete `.pltr` document: the converted outline wrapped in the
/// sections an empty Plottr file carries.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlottrFile {
    file: Value,
    ui: Value,
    series: Value,
    books: Value,
    beats: Vec<Beat>,
    cards: Vec<Card>,
    categories: Value,
    characters: Vec<Entity>,
    custom_attributes: Value,
    lines: Vec<Plotline>,
    notes: Vec<Value>,
    places: Vec<Entity>,
    tags: Vec<Tag>,
    images: ImageMap,
}

impl PlottrFile {
    pub fn new(file_name: &str, book_title: &str, outline: Outline) -> Self {
        let Outline {
            lines,
            beats,
            cards,
            characters,
            places,
            tags,
            images,
        } = outline;

        Self {
            file: json!({
                "fileName": file_name,
                "loaded": true,
                "dirty": false,
                "version": PLOTTR_VERSION,
            }),
            ui: default_ui(),
            series: json!({
                "name": book_title,
                "premise": "",
                "genre": "",
                "theme": "",
                "templates": [],
            }),
            books: json!({
                "1": {
                    "id": 1,
                    "title": book_title,
                    "premise": "",
                    "genre": "",
                    "theme": "",
                    "templates": [],
                    "timelineTemplates": [],
                    "imageId": null,
                },
                "allIds": [1],
            }),
            beats,
            cards,
            categories: default_categories(),
            characters,
            custom_attributes: json!({
                "characters": [],
                "places": [],
                "scenes": [],
                "lines": [],
            }),
            lines,
            notes: Vec::new(),
            places,
            tags,
            images,
        }
    }

    pub fn to_json(&self) -> Result<String, PlottrError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Write the document as compact JSON, the way Plottr saves it.
    pub fn write(&self, path: &Path) -> Result<(), PlottrError> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

fn default_ui() -> Value {
    json!({
        "currentView": "timeline",
        "currentTimeline": 1,
        "timelineIsExpanded": true,
        "orientation": "horizontal",
        "darkMode": false,
        "characterSort": "name~asc",
        "characterFilter": null,
        "placeSort": "name-asc",
        "placeFilter": null,
        "noteSort": "title-asc",
        "noteFilter": null,
        "timelineFilter": null,
        "timelineScrollPosition": { "x": 0, "y": 0 },
        "timeline": { "size": "large" },
    })
}

fn default_categories() -> Value {
    json!({
        "characters": [
            { "id": 1, "name": "Main", "position": 0 },
            { "id": 2, "name": "Supporting", "position": 1 },
            { "id": 3, "name": "Other", "position": 2 },
        ],
        "places": [],
        "notes": [],
        "tags": [],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BookId, Image};

    fn sample_outline() -> Outline {
        Outline {
            lines: vec![
                Plotline::new(1, BookId::default(), "Main Plot"),
                Plotline::new(2, BookId::Series, "Main Plot"),
            ],
            beats: vec![Beat::new(1, BookId::Series, 0), Beat::new(2, BookId::default(), 0)],
            cards: vec![Card::new(1, 1, 2, "Opening")],
            images: ImageMap(vec![Image {
                id: 1,
                name: "abc.png".to_string(),
                path: "/tmp/abc/card-image.png".to_string(),
                data: "data:image/png;base64,AA==".to_string(),
            }]),
            ..Outline::default()
        }
    }

    struct TopLevelKeys(Vec<String>);

    impl<'de> serde::Deserialize<'de> for TopLevelKeys {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: serde::Deserializer<'de>,
        {
            struct KeyVisitor;

            impl<'de> serde::de::Visitor<'de> for KeyVisitor {
                type Value = TopLevelKeys;

                fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                    f.write_str("a JSON object")
                }

                fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
                where
                    A: serde::de::MapAccess<'de>,
                {
                    let mut keys = Vec::new();
                    while let Some(key) = map.next_key::<String>()? {
                        map.next_value::<serde::de::IgnoredAny>()?;
                        keys.push(key);
                    }
                    Ok(TopLevelKeys(keys))
                }
            }

            deserializer.deserialize_map(KeyVisitor)
        }
    }

    #[test]
    fn test_sections_in_plottr_order() {
        let text = PlottrFile::new("novel.pltr", "Novel", sample_outline())
            .to_json()
            .unwrap();
        let keys: TopLevelKeys = serde_json::from_str(&text).unwrap();
        assert_eq!(
            keys.0,
            vec![
                "file",
                "ui",
                "series",
                "books",
                "beats",
                "cards",
                "categories",
                "characters",
                "customAttributes",
                "lines",
                "notes",
                "places",
                "tags",
                "images",
            ]
        );
    }

    #[test]
    fn test_book_title_and_file_name() {
        let file = PlottrFile::new("novel.pltr", "My Novel", sample_outline());
        let value: Value = serde_json::from_str(&file.to_json().unwrap()).unwrap();
        assert_eq!(value["file"]["fileName"], "novel.pltr");
        assert_eq!(value["file"]["version"], PLOTTR_VERSION);
        assert_eq!(value["series"]["name"], "My Novel");
        assert_eq!(value["books"]["1"]["title"], "My Novel");
        assert_eq!(value["lines"][1]["bookId"], "series");
        assert_eq!(value["images"]["1"]["name"], "abc.png");
    }

    #[test]
    fn test_write_to_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.pltr");

        let file = PlottrFile::new("out.pltr", "Novel", sample_outline());
        file.write(&path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, file.to_json().unwrap());
    }
}
