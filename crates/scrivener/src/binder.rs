use crate::xml::XmlElement;

/// Kind of a binder item, from its `Type` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinderKind {
    Text,
    Folder,
    /// The manuscript ("Draft") folder. Users may rename it; the type stays.
    DraftRoot,
    /// Research, trash and any other container the converter does not map.
    Other,
}

impl BinderKind {
    pub fn from_type(value: &str) -> Self {
        match value {
            "Text" => Self::Text,
            "Folder" => Self::Folder,
            "DraftFolder" => Self::DraftRoot,
            _ => Self::Other,
        }
    }
}

/// One item of the binder tree, read-only once parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct BinderNode {
    pub uuid: String,
    pub kind: BinderKind,
    pub title: Option<String>,
    pub label_id: Option<String>,
    pub keyword_ids: Vec<String>,
    /// Extension of the index-card image stored next to the item's content.
    pub image_extension: Option<String>,
    pub children: Vec<BinderNode>,
}

impl BinderNode {
    pub fn new(uuid: impl Into<String>, kind: BinderKind, title: Option<&str>) -> Self {
        Self {
            uuid: uuid.into(),
            kind,
            title: title.map(str::to_string),
            label_id: None,
            keyword_ids: Vec::new(),
            image_extension: None,
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<BinderNode>) -> Self {
        self.children = children;
        self
    }

    pub fn with_label(mut self, label_id: &str) -> Self {
        self.label_id = Some(label_id.to_string());
        self
    }

    pub fn with_keywords(mut self, keyword_ids: &[&str]) -> Self {
        self.keyword_ids = keyword_ids.iter().map(|k| k.to_string()).collect();
        self
    }

    pub fn with_image_extension(mut self, extension: &str) -> Self {
        self.image_extension = Some(extension.to_string());
        self
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// All items below this one in document (depth-first, pre-order) order.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants {
            stack: self.children.iter().rev().collect(),
        }
    }

    pub(crate) fn from_xml(item: &XmlElement) -> Self {
        let metadata = item.child("MetaData");
        let keyword_ids = item
            .child("Keywords")
            .map(|k| {
                k.children_named("KeywordID")
                    .map(|id| id.text.clone())
                    .filter(|id| !id.is_empty())
                    .collect()
            })
            .unwrap_or_default();
        let children = item
            .child("Children")
            .map(|c| c.children_named("BinderItem").map(Self::from_xml).collect())
            .unwrap_or_default();

        Self {
            uuid: item
                .attr("UUID")
                .or_else(|| item.attr("ID"))
                .unwrap_or_default()
                .to_string(),
            kind: BinderKind::from_type(item.attr("Type").unwrap_or_default()),
            title: item.child_text("Title").map(str::to_string),
            label_id: metadata
                .and_then(|m| m.child_text("LabelID"))
                .map(str::to_string),
            keyword_ids,
            image_extension: metadata
                .and_then(|m| m.child_text("IndexCardImageFileExtension"))
                .map(str::to_string),
            children,
        }
    }
}

pub struct Descendants<'a> {
    stack: Vec<&'a BinderNode>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a BinderNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

/// The manuscript folder: the first draft-typed item in document order.
pub fn find_draft(binder: &[BinderNode]) -> Option<&BinderNode> {
    binder.iter().find_map(|root| {
        if root.kind == BinderKind::DraftRoot {
            Some(root)
        } else {
            root.descendants().find(|n| n.kind == BinderKind::DraftRoot)
        }
    })
}

/// A folder directly under the binder root whose title is exactly `title`.
pub fn find_top_level_folder<'a>(binder: &'a [BinderNode], title: &str) -> Option<&'a BinderNode> {
    binder
        .iter()
        .find(|n| n.kind == BinderKind::Folder && n.title.as_deref() == Some(title))
}
