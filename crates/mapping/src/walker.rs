use plottr::{Beat, Card, Plotline};
use scrivener::{BinderKind, BinderNode, ProjectResources};
use tracing::debug;

use crate::{ConvertOptions, CrossReference, PlotlineStack, SceneBuilder, SceneSource};

/// Title given to a plotline opened for an untitled folder.
pub const UNTITLED_PLOTLINE: &str = "Untitled";

/// Depth-first walk over the manuscript that turns folders into plotlines
/// and text items into scene cards.
pub struct BinderWalker<'a, R: ?Sized> {
    resources: &'a R,
    options: &'a ConvertOptions,
    xref: CrossReference<'a>,
    stack: PlotlineStack,
    scenes: SceneBuilder,
}

impl<'a, R> BinderWalker<'a, R>
where
    R: ProjectResources + ?Sized,
{
    pub fn new(resources: &'a R, options: &'a ConvertOptions, xref: CrossReference<'a>) -> Self {
        Self {
            resources,
            options,
            xref,
            stack: PlotlineStack::new(),
            scenes: SceneBuilder::new(),
        }
    }

    pub fn walk(&mut self, nodes: &[BinderNode]) {
        for node in nodes {
            self.visit(node);
        }
    }

    fn visit(&mut self, node: &BinderNode) {
        let handle = (!self.options.flatten_timeline && node.has_children()).then(|| {
            let title = node.title.as_deref().unwrap_or(UNTITLED_PLOTLINE);
            debug!("Opening plotline {:?} for {}", title, node.uuid);
            self.stack.open(title)
        });

        if self.is_scene(node) {
            let synopsis = self.resources.synopsis(node);
            let scene = SceneSource {
                title: node.title.as_deref().unwrap_or_default(),
                synopsis: &synopsis,
                label: node.label_id.as_deref(),
                keywords: &node.keyword_ids,
            };
            self.scenes.emit(scene, &self.xref, &mut self.stack);
        }

        self.walk(&node.children);

        if let Some(handle) = handle {
            self.stack.close(handle, self.scenes.cards_mut());
        }
    }

    fn is_scene(&self, node: &BinderNode) -> bool {
        match node.kind {
            BinderKind::Text => true,
            BinderKind::Folder => self.options.folders_as_scenes,
            _ => false,
        }
    }

    /// Closes the default plotline, appends the series plotline, and hands
    /// back the finished plotlines, beats and cards.
    pub fn finish(self) -> (Vec<Plotline>, Vec<Beat>, Vec<Card>) {
        let mut scenes = self.scenes;
        let lines = self.stack.finish(scenes.cards_mut());
        let (beats, cards) = scenes.into_parts();
        (lines, beats, cards)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LabelKeywordRegistry;
    use std::path::{Path, PathBuf};

    struct NoFiles;

    impl ProjectResources for NoFiles {
        fn synopsis(&self, node: &BinderNode) -> String {
            format!("about {}", node.uuid)
        }

        fn cover_image(&self, _node: &BinderNode) -> Option<PathBuf> {
            None
        }

        fn read_asset(&self, _path: &Path) -> Option<Vec<u8>> {
            None
        }
    }

    fn run(nodes: &[BinderNode], options: &ConvertOptions) -> (Vec<Plotline>, Vec<Beat>, Vec<Card>) {
        let registry = LabelKeywordRegistry::new("-1", false);
        let xref = CrossReference::new(&registry, &[], options);
        let mut walker = BinderWalker::new(&NoFiles, options, xref);
        walker.walk(nodes);
        walker.finish()
    }

    fn manuscript() -> Vec<BinderNode> {
        vec![BinderNode::new("F1", BinderKind::Folder, Some("Part One")).with_children(vec![
            BinderNode::new("T1", BinderKind::Text, Some("Opening")),
            BinderNode::new("F2", BinderKind::Folder, None)
                .with_children(vec![BinderNode::new("T2", BinderKind::Text, Some("Fight"))]),
        ])]
    }

    #[test]
    fn test_folders_become_plotlines() {
        let (lines, beats, cards) = run(&manuscript(), &ConvertOptions::default());

        let titles: Vec<_> = lines.iter().map(|l| l.title.as_str()).collect();
        assert_eq!(titles, vec!["Part One", "Untitled", "Main Plot"]);
        assert_eq!(cards.len(), 2);
        assert_eq!(beats.len(), 3);
        assert_eq!(cards[0].line_id, 1);
        assert_eq!(cards[1].line_id, 2);
        assert_eq!(cards[0].description[0].children[0].text, "about T1");
    }

    #[test]
    fn test_flatten_keeps_everything_on_default() {
        let options = ConvertOptions {
            flatten_timeline: true,
            ..ConvertOptions::default()
        };
        let (lines, _, cards) = run(&manuscript(), &options);

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].title, "Main Plot");
        assert!(cards.iter().all(|c| c.line_id == 1));
    }

    #[test]
    fn test_folders_as_scenes_emit_before_children() {
        let options = ConvertOptions {
            folders_as_scenes: true,
            ..ConvertOptions::default()
        };
        let (_, _, cards) = run(&manuscript(), &options);

        let titles: Vec<_> = cards.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["Part One", "Opening", "", "Fight"]);
        assert_eq!(cards[0].line_id, 1);
        assert_eq!(cards[2].line_id, 2);
    }

    #[test]
    fn test_text_with_children_emits_once() {
        let nodes = vec![BinderNode::new("T1", BinderKind::Text, Some("Chapter"))
            .with_children(vec![BinderNode::new("T2", BinderKind::Text, Some("Scene"))])];
        let (lines, _, cards) = run(&nodes, &ConvertOptions::default());

        assert_eq!(cards.len(), 2);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].title, "Chapter");
        assert!(cards.iter().all(|c| c.line_id == 1));
    }

    #[test]
    fn test_other_kinds_are_transparent() {
        let nodes = vec![BinderNode::new("O1", BinderKind::Other, Some("Trash"))];
        let (lines, _, cards) = run(&nodes, &ConvertOptions::default());
        assert!(cards.is_empty());
        assert_eq!(lines.len(), 1);
    }
}
