// ABOUTME: HTML generation module for the remarker application
// ABOUTME: Turns a markdown file or a section directory into a finished HTML slideshow

use crate::errors::{RemarkerError, Result};
use crate::manifest::DEFAULT_METAFILE;
use crate::presentation::{Presentation, DEFAULT_TITLE};
use crate::resources::Assets;
use crate::utils;
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

/// Everything needed to produce one HTML slideshow.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// A markdown file, or a directory holding a metafile.
    pub source: PathBuf,
    pub assets: Assets,
    pub title: String,
    /// Metafile name, used when `source` is a directory.
    pub metafile: String,
}

impl BuildConfig {
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            assets: Assets::default(),
            title: DEFAULT_TITLE.to_string(),
            metafile: DEFAULT_METAFILE.to_string(),
        }
    }
}

/// Load the presentation described by `config`.
pub fn load_presentation(config: &BuildConfig) -> Result<Presentation> {
    utils::validate_path_exists(&config.source)?;

    if config.source.is_dir() {
        Presentation::from_directory(&config.source, &config.metafile, &config.assets)
    } else {
        info!("Loading presentation from markdown: {:?}", config.source);
        Presentation::with_assets(config.source.clone(), &config.assets)
    }
}

/// Generate the HTML slideshow described by `config`.
pub fn generate_html(config: &BuildConfig) -> Result<String> {
    let presentation = load_presentation(config)?;
    info!("Rendering presentation: {}", config.title);
    presentation.to_html(&config.title)
}

/// Utility function to write HTML content to a file
pub fn write_html_to_file(html_content: &str, output_path: &Path) -> Result<()> {
    info!("Writing HTML to file: {:?}", output_path);

    utils::ensure_parent_directory_exists(output_path)?;

    fs::write(output_path, html_content).map_err(|e| RemarkerError::Write {
        path: output_path.to_path_buf(),
        source: e,
    })
}
