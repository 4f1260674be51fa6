use plottr::Outline;
use scrivener::{ProjectResources, ScrivPackage, ScrivenerError, ScrivxProject};
use thiserror::Error;
use tracing::{debug, info};

mod assets;
pub use assets::*;
mod cast;
pub use cast::*;
mod options;
pub use options::*;
mod plotlines;
pub use plotlines::*;
mod registry;
pub use registry::*;
mod scenes;
pub use scenes::*;
mod walker;
pub use walker::*;

#[derive(Debug, Error)]
pub enum MappingError {
    #[error("No manuscript (draft) folder in the binder")]
    MissingDraft,
    #[error(transparent)]
    Scrivener(#[from] ScrivenerError),
}

/// Maps a parsed project onto a Plottr outline.
///
/// Characters and places are read first so scene cards can reference them;
/// the draft is then walked in document order.
pub fn convert<R>(
    project: &ScrivxProject,
    resources: &R,
    options: &ConvertOptions,
) -> Result<Outline, MappingError>
where
    R: ProjectResources + ?Sized,
{
    let draft = project.draft().ok_or(MappingError::MissingDraft)?;
    let registry = LabelKeywordRegistry::from_metadata(&project.metadata, options.keywords_are_tags);

    let mut embedder = AssetEmbedder::new();
    let (characters, places) = {
        let mut cast = CastCollector::new(
            resources,
            &registry,
            options.keywords_are_tags,
            &mut embedder,
        );
        let characters = cast.collect(
            CastKind::Character,
            &project.binder,
            options.characters_folder_name(),
            options.character_limit(),
        );
        let places = cast.collect(
            CastKind::Place,
            &project.binder,
            options.places_folder_name(),
            options.place_limit(),
        );
        (characters, places)
    };

    if !embedder.is_empty() {
        debug!("Embedded {} images from the cast folders", embedder.len());
    }

    let xref = CrossReference::new(&registry, &characters, options);
    let mut walker = BinderWalker::new(resources, options, xref);
    walker.walk(&draft.children);
    let (lines, beats, cards) = walker.finish();

    let outline = Outline {
        lines,
        beats,
        cards,
        characters,
        places,
        tags: registry.tags(),
        images: embedder.into_images(),
    };

    info!(
        "Mapped {} cards, {} beats, {} plotlines",
        outline.cards.len(),
        outline.beats.len(),
        outline.lines.len()
    );
    info!(
        "Mapped {} characters, {} places, {} tags, {} images",
        outline.characters.len(),
        outline.places.len(),
        outline.tags.len(),
        outline.images.len()
    );
    Ok(outline)
}

/// Loads the package's project file and converts it using files from the
/// package itself.
pub fn convert_package(
    package: &ScrivPackage,
    options: &ConvertOptions,
) -> Result<Outline, MappingError> {
    let project = package.load_project()?;
    convert(&project, package, options)
}
