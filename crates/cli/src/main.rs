use anyhow::{Context, Result};
use clap::Parser;
use mapping::ConvertOptions;
use plottr::PlottrFile;
use scrivener::ScrivPackage;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Parser)]
#[command(name = "scrivx2pltr")]
#[command(about = "Creating a Plottr file from a Scrivener file")]
#[command(version)]
struct Cli {
    /// Scrivener file to read
    scrivfile: PathBuf,

    /// Plottr file to write
    #[arg(short, long, value_name = "PLTRFILE")]
    output: Option<PathBuf>,

    /// JSON file with conversion options; flags given here override it
    #[arg(long, value_name = "JSON")]
    config: Option<PathBuf>,

    /// Create scene cards for folders, too
    #[arg(long = "foldersAsScenes")]
    folders_as_scenes: bool,

    /// Put all scenes on a single plotline
    #[arg(long = "flattenTimeline")]
    flatten_timeline: bool,

    /// Color scene cards with their label color
    #[arg(long = "useLabelColors")]
    use_label_colors: bool,

    /// Link scenes to the character named like their label
    #[arg(long = "labelsAreCharacters")]
    labels_are_characters: bool,

    /// Link scenes to characters named like their keywords
    #[arg(long = "keywordsAreCharacters")]
    keywords_are_characters: bool,

    /// Turn keywords into Plottr tags
    #[arg(long = "keywordsAreTags")]
    keywords_are_tags: bool,

    /// Max. number of Characters to read (-1 for all, 0 for none)
    #[arg(long = "maxCharacters", value_name = "N", allow_negative_numbers = true)]
    max_characters: Option<i64>,

    /// Max. number of Places to read (-1 for all, 0 for none)
    #[arg(long = "maxPlaces", value_name = "N", allow_negative_numbers = true)]
    max_places: Option<i64>,

    /// Name of the Characters folder, if renamed
    #[arg(long = "charactersFolder", value_name = "NAME")]
    characters_folder: Option<String>,

    /// Name of the Places folder, if renamed
    #[arg(long = "placesFolder", value_name = "NAME")]
    places_folder: Option<String>,

    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn options(&self) -> Result<ConvertOptions> {
        let mut options = match &self.config {
            Some(path) => load_options(path)?,
            None => ConvertOptions::default(),
        };

        options.folders_as_scenes |= self.folders_as_scenes;
        options.flatten_timeline |= self.flatten_timeline;
        options.use_label_colors |= self.use_label_colors;
        options.labels_are_characters |= self.labels_are_characters;
        options.keywords_are_characters |= self.keywords_are_characters;
        options.keywords_are_tags |= self.keywords_are_tags;
        if let Some(max) = self.max_characters {
            options.max_characters = max;
        }
        if let Some(max) = self.max_places {
            options.max_places = max;
        }
        if let Some(name) = &self.characters_folder {
            options.characters_folder = name.clone();
        }
        if let Some(name) = &self.places_folder {
            options.places_folder = name.clone();
        }
        Ok(options)
    }
}

fn load_options(path: &Path) -> Result<ConvertOptions> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {:?}", path))?;
    serde_json::from_str(&content).with_context(|| format!("Invalid config file {:?}", path))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt().with_max_level(level).init();

    let options = cli.options()?;
    debug!("Conversion options: {:?}", options);

    let package = ScrivPackage::open(&cli.scrivfile)
        .with_context(|| format!("Cannot open Scrivener file {:?}", cli.scrivfile))?;
    info!("Reading {:?}", package.project_file());

    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| package.default_output_path());

    let outline = mapping::convert_package(&package, &options)
        .with_context(|| format!("Failed to convert {:?}", package.root()))?;

    let book_title = package.book_title();
    let file_name = output.to_string_lossy();
    PlottrFile::new(&file_name, &book_title, outline)
        .write(&output)
        .with_context(|| format!("Failed to write {:?}", output))?;

    info!("Wrote {:?} ({:?})", output, book_title);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_defaults() {
        let cli = Cli::parse_from([
            "scrivx2pltr",
            "Novel.scriv",
            "--foldersAsScenes",
            "--keywordsAreTags",
            "--maxCharacters",
            "-1",
            "--maxPlaces",
            "0",
            "--charactersFolder",
            "Cast",
        ]);
        let options = cli.options().unwrap();

        assert!(options.folders_as_scenes);
        assert!(options.keywords_are_tags);
        assert!(!options.flatten_timeline);
        assert_eq!(options.max_characters, -1);
        assert_eq!(options.max_places, 0);
        assert_eq!(options.characters_folder, "Cast");
        assert_eq!(options.places_folder, "Places");
        assert_eq!(cli.output, None);
    }

    #[test]
    fn test_config_file_then_flags() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("options.json");
        std::fs::write(
            &config,
            r#"{"flattenTimeline": true, "maxPlaces": 3, "placesFolder": "Locations"}"#,
        )
        .unwrap();

        let config = config.to_string_lossy().into_owned();
        let cli = Cli::parse_from([
            "scrivx2pltr",
            "Novel.scriv",
            "--config",
            config.as_str(),
            "--maxPlaces",
            "5",
            "-o",
            "out.pltr",
        ]);
        let options = cli.options().unwrap();

        assert!(options.flatten_timeline);
        assert_eq!(options.max_places, 5);
        assert_eq!(options.places_folder, "Locations");
        assert_eq!(options.max_characters, -1);
        assert_eq!(cli.output, Some(PathBuf::from("out.pltr")));
    }
}
