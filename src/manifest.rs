// ABOUTME: Metafile parsing for the remarker application
// ABOUTME: Reads the YAML file that orders section files and overrides assets

use crate::errors::{RemarkerError, Result};
use crate::resources::Assets;
use log::{debug, info};
use serde_yaml::Value;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Metafile name looked up in a directory when none is given.
pub const DEFAULT_METAFILE: &str = "sections.yaml";

/// Parsed metafile.
///
/// ```yaml
/// html_template: templates/talk.html   # optional
/// stylesheet: templates/talk.css       # optional
/// sections:
///   - intro.md
///   - file: body.md                    # record form
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    /// Section file names, in slide order.
    pub sections: Vec<String>,
    pub html_template: Option<PathBuf>,
    pub stylesheet: Option<PathBuf>,
}

impl Manifest {
    /// Read and parse `directory/metafile`.
    pub fn load(directory: &Path, metafile: &str) -> Result<Self> {
        let path = directory.join(metafile);
        info!("Reading metafile: {:?}", path);

        let content = fs::read_to_string(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => RemarkerError::MetafileNotFound {
                metafile: metafile.to_string(),
                directory: directory.to_path_buf(),
            },
            _ => RemarkerError::FileRead {
                path: path.clone(),
                source: e,
            },
        })?;

        Self::from_yaml(&content)
    }

    /// Parse metafile content.
    pub fn from_yaml(content: &str) -> Result<Self> {
        let document: Value = if content.trim().is_empty() {
            Value::Null
        } else {
            serde_yaml::from_str(content)
                .map_err(|e| RemarkerError::InvalidManifest(format!("Invalid YAML: {e}")))?
        };

        let mapping = document.as_mapping().ok_or(RemarkerError::MissingSections)?;
        let sections = mapping
            .get("sections")
            .ok_or(RemarkerError::MissingSections)?;

        let manifest = Self {
            sections: section_files(sections)?,
            html_template: override_path(&document, "html_template")?,
            stylesheet: override_path(&document, "stylesheet")?,
        };
        debug!("Metafile lists {} sections", manifest.sections.len());
        Ok(manifest)
    }

    /// The assets to build sections with: overrides from the metafile where
    /// present, `defaults` otherwise.
    ///
    /// Override paths are used exactly as written, so relative paths resolve
    /// against the current working directory, not the metafile's directory.
    pub fn assets(&self, defaults: &Assets) -> Assets {
        let mut assets = defaults.clone();
        if let Some(html_template) = &self.html_template {
            assets = assets.with_html_template(html_template.clone());
        }
        if let Some(stylesheet) = &self.stylesheet {
            assets = assets.with_stylesheet(stylesheet.clone());
        }
        assets
    }
}

/// Normalize `sections` into file names.
///
/// The first entry decides the shape of the whole list: if it is a record,
/// every entry is read as a record with a `file` key; otherwise every entry
/// must be a plain file name.
fn section_files(sections: &Value) -> Result<Vec<String>> {
    let entries = sections
        .as_sequence()
        .ok_or_else(|| RemarkerError::InvalidManifest("'sections' must be a list".to_string()))?;

    match entries.first() {
        Some(Value::Mapping(_)) => entries
            .iter()
            .map(|entry| match entry.get("file") {
                Some(file) => file.as_str().map(str::to_string).ok_or_else(|| {
                    RemarkerError::InvalidManifest(format!(
                        "section \"file\" must be a file name, got {file:?}"
                    ))
                }),
                None => Err(RemarkerError::MissingFileKey),
            })
            .collect(),
        _ => entries
            .iter()
            .map(|entry| {
                entry.as_str().map(str::to_string).ok_or_else(|| {
                    RemarkerError::InvalidManifest(format!(
                        "section entry must be a file name, got {entry:?}"
                    ))
                })
            })
            .collect(),
    }
}

fn override_path(document: &Value, key: &str) -> Result<Option<PathBuf>> {
    match document.get(key) {
        None => Ok(None),
        Some(Value::String(path)) => Ok(Some(PathBuf::from(path))),
        Some(other) => Err(RemarkerError::InvalidManifest(format!(
            "'{key}' must be a file path, got {other:?}"
        ))),
    }
}
