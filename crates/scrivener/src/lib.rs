use std::path::PathBuf;
use thiserror::Error;

mod binder;
pub use binder::*;
mod metadata;
pub use metadata::*;
mod package;
pub use package::*;
mod project;
pub use project::*;
pub mod xml;

#[derive(Debug, Error)]
pub enum ScrivenerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("XML parse error: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("XML attribute error: {0}")]
    Attribute(#[from] quick_xml::events::attributes::AttrError),
    #[error("Scrivener file {} does not exist", .0.display())]
    PackageNotFound(PathBuf),
    #[error("{} does not appear to be a Scrivener 3 file", .0.display())]
    NotScrivener3(PathBuf),
    #[error("unsupported Scrivener project version: {0}")]
    UnsupportedVersion(String),
    #[error("XML document has no root element")]
    EmptyDocument,
    #[error("unexpected root element <{0}>")]
    UnexpectedRoot(String),
}

pub type Result<T> = std::result::Result<T, ScrivenerError>;
