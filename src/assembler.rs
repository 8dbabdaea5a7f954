// ABOUTME: Multi-file assembly for the remarker application
// ABOUTME: Stitches the markdown files listed in a metafile into one presentation

use crate::errors::Result;
use crate::manifest::Manifest;
use crate::presentation::Presentation;
use crate::resources::Assets;
use log::{debug, info};
use std::path::Path;

/// Create a slideshow from the markdown files in `directory`.
///
/// `metafile` names the YAML file in that directory which lists the sections
/// in order and may override the template and stylesheet. Every section is
/// loaded with the same assets and the results are merged left to right.
pub fn assemble(directory: &Path, metafile: &str, defaults: &Assets) -> Result<Presentation> {
    info!("Assembling presentation from directory: {:?}", directory);

    let manifest = Manifest::load(directory, metafile)?;
    let assets = manifest.assets(defaults);

    let presentations = manifest
        .sections
        .iter()
        .map(|file_name| {
            debug!("Loading section: {}", file_name);
            Presentation::with_assets(directory.join(file_name), &assets)
        })
        .collect::<Result<Vec<_>>>()?;

    info!("Merging {} sections", presentations.len());
    Presentation::merge_all(presentations)
}
