use serde::{Deserialize, Serialize};

pub const DEFAULT_CHARACTERS_FOLDER: &str = "Characters";
pub const DEFAULT_PLACES_FOLDER: &str = "Places";

/// Switches that change how the binder is mapped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConvertOptions {
    /// Create scene cards for folders, too.
    pub folders_as_scenes: bool,
    /// Put every card on the default plotline instead of one plotline per folder.
    pub flatten_timeline: bool,
    /// Copy a scene's label color onto its card.
    pub use_label_colors: bool,
    pub labels_are_characters: bool,
    pub keywords_are_characters: bool,
    /// Turn keywords into Plottr tags.
    pub keywords_are_tags: bool,
    /// Max. number of characters to read; negative is unlimited, 0 skips them.
    pub max_characters: i64,
    /// Max. number of places to read; negative is unlimited, 0 skips them.
    pub max_places: i64,
    pub characters_folder: String,
    pub places_folder: String,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            folders_as_scenes: false,
            flatten_timeline: false,
            use_label_colors: false,
            labels_are_characters: false,
            keywords_are_characters: false,
            keywords_are_tags: false,
            max_characters: -1,
            max_places: -1,
            characters_folder: DEFAULT_CHARACTERS_FOLDER.to_string(),
            places_folder: DEFAULT_PLACES_FOLDER.to_string(),
        }
    }
}

impl ConvertOptions {
    pub fn character_limit(&self) -> Limit {
        Limit::from_cap(self.max_characters)
    }

    pub fn place_limit(&self) -> Limit {
        Limit::from_cap(self.max_places)
    }

    pub fn characters_folder_name(&self) -> &str {
        non_empty_or(&self.characters_folder, DEFAULT_CHARACTERS_FOLDER)
    }

    pub fn places_folder_name(&self) -> &str {
        non_empty_or(&self.places_folder, DEFAULT_PLACES_FOLDER)
    }
}

fn non_empty_or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.is_empty() {
        fallback
    } else {
        value
    }
}

/// How many entries a character or place registry may hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Limit {
    Skip,
    AtMost(usize),
    Unlimited,
}

impl Limit {
    pub fn from_cap(cap: i64) -> Self {
        match cap {
            0 => Self::Skip,
            n if n < 0 => Self::Unlimited,
            n => Self::AtMost(usize::try_from(n).unwrap_or(usize::MAX)),
        }
    }

    pub fn allows(&self, count: usize) -> bool {
        match self {
            Self::Skip => false,
            Self::AtMost(max) => count < *max,
            Self::Unlimited => true,
        }
    }
}
