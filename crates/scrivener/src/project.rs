use crate::xml::XmlElement;
use crate::{find_draft, BinderNode, ProjectMetadata, Result, ScrivenerError};

/// Oldest `.scrivx` format version (Scrivener 3) the reader understands.
pub const MIN_PROJECT_VERSION: u32 = 2;

/// The parsed contents of a `.scrivx` project file.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrivxProject {
    pub version: String,
    pub binder: Vec<BinderNode>,
    pub metadata: ProjectMetadata,
}

impl ScrivxProject {
    pub fn parse(content: &str) -> Result<Self> {
        let root = XmlElement::parse(content)?;
        if root.name != "ScrivenerProject" {
            return Err(ScrivenerError::UnexpectedRoot(root.name));
        }

        let version = root.attr("Version").unwrap_or_default().to_string();
        let major = version
            .split('.')
            .next()
            .and_then(|m| m.trim().parse::<u32>().ok());
        match major {
            Some(major) if major >= MIN_PROJECT_VERSION => {}
            _ => return Err(ScrivenerError::UnsupportedVersion(version)),
        }

        let binder = root
            .child("Binder")
            .map(|b| b.children_named("BinderItem").map(BinderNode::from_xml).collect())
            .unwrap_or_default();

        Ok(Self {
            version,
            binder,
            metadata: ProjectMetadata::from_xml(&root),
        })
    }

    pub fn draft(&self) -> Option<&BinderNode> {
        find_draft(&self.binder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BinderKind;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<ScrivenerProject Template="No" Version="2.0" Identifier="X" Creator="SCRMAC-3.2">
    <Binder>
        <BinderItem UUID="D" Type="DraftFolder">
            <Title>Manuscript</Title>
            <Children>
                <BinderItem UUID="S1" Type="Text"><Title>Scene</Title></BinderItem>
            </Children>
        </BinderItem>
        <BinderItem UUID="R" Type="ResearchFolder"><Title>Research</Title></BinderItem>
        <BinderItem UUID="T" Type="TrashFolder"><Title>Trash</Title></BinderItem>
    </Binder>
    <LabelSettings>
        <DefaultLabelID>-1</DefaultLabelID>
        <Labels><Label ID="0" Color="0 0 0">Concept</Label></Labels>
    </LabelSettings>
</ScrivenerProject>"#;

    #[test]
    fn test_parse_project() {
        let project = ScrivxProject::parse(SAMPLE).unwrap();
        assert_eq!(project.version, "2.0");
        assert_eq!(project.binder.len(), 3);
        assert_eq!(project.binder[1].kind, BinderKind::Other);
        assert_eq!(project.metadata.labels.len(), 1);

        let draft = project.draft().unwrap();
        assert_eq!(draft.title.as_deref(), Some("Manuscript"));
        assert_eq!(draft.children[0].uuid, "S1");
    }

    #[test]
    fn test_rejects_old_versions() {
        let old = SAMPLE.replace("Version=\"2.0\"", "Version=\"1.0\"");
        assert!(matches!(
            ScrivxProject::parse(&old),
            Err(ScrivenerError::UnsupportedVersion(v)) if v == "1.0"
        ));

        let missing = SAMPLE.replace("Version=\"2.0\"", "");
        assert!(matches!(
            ScrivxProject::parse(&missing),
            Err(ScrivenerError::UnsupportedVersion(_))
        ));
    }

    #[test]
    fn test_rejects_other_documents() {
        assert!(matches!(
            ScrivxProject::parse("<html/>"),
            Err(ScrivenerError::UnexpectedRoot(name)) if name == "html"
        ));
    }

    #[test]
    fn test_project_without_draft() {
        let project =
            ScrivxProject::parse(r#"<ScrivenerProject Version="2.0"><Binder/></ScrivenerProject>"#)
                .unwrap();
        assert!(project.binder.is_empty());
        assert!(project.draft().is_none());
    }
}
