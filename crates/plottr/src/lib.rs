use thiserror::Error;

mod model;
pub use model::*;
pub mod color;
mod file;
pub use file::*;

#[derive(Debug, Error)]
pub enum PlottrError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON serialization error: {0}")]
    JsonSerialization(#[from] serde_json::Error),
}

/// Plottr release whose empty-file layout the writer reproduces.
pub const PLOTTR_VERSION: &str = "2021.2.19";

/// Title shared by the default plotline and the series plotline.
pub const DEFAULT_LINE_TITLE: &str = "Main Plot";

/// The only book a converted project ever has.
pub const BOOK_ID: u32 = 1;
