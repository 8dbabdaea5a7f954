// ABOUTME: Resource loading for the remarker application
// ABOUTME: Resolves markdown, HTML templates and stylesheets from literal text or files

use crate::errors::{RemarkerError, Result};
use log::info;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// HTML template shipped with remarker.
pub const DEFAULT_HTML_TEMPLATE: &str = include_str!("templates/default.html");

/// Stylesheet shipped with remarker.
pub const DEFAULT_STYLESHEET: &str = include_str!("templates/default.css");

/// Where a piece of text comes from: given literally, or read from a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Text(String),
    File(PathBuf),
}

impl Source {
    /// Resolve the source to its full text.
    /// Files are read eagerly and used verbatim.
    pub fn load(&self) -> Result<String> {
        match self {
            Source::Text(text) => Ok(text.clone()),
            Source::File(path) => read_local_content(path),
        }
    }

    /// The backing file, if this source is one.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Source::Text(_) => None,
            Source::File(path) => Some(path),
        }
    }
}

impl From<&str> for Source {
    fn from(text: &str) -> Self {
        Source::Text(text.to_string())
    }
}

impl From<String> for Source {
    fn from(text: String) -> Self {
        Source::Text(text)
    }
}

impl From<PathBuf> for Source {
    fn from(path: PathBuf) -> Self {
        Source::File(path)
    }
}

impl From<&Path> for Source {
    fn from(path: &Path) -> Self {
        Source::File(path.to_path_buf())
    }
}

/// The HTML template and stylesheet a presentation is built with when the
/// caller does not name its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assets {
    pub html_template: Source,
    pub stylesheet: Source,
}

impl Default for Assets {
    fn default() -> Self {
        Self {
            html_template: Source::Text(DEFAULT_HTML_TEMPLATE.to_string()),
            stylesheet: Source::Text(DEFAULT_STYLESHEET.to_string()),
        }
    }
}

impl Assets {
    pub fn new(html_template: impl Into<Source>, stylesheet: impl Into<Source>) -> Self {
        Self {
            html_template: html_template.into(),
            stylesheet: stylesheet.into(),
        }
    }

    /// Replace the template, keeping the stylesheet.
    pub fn with_html_template(mut self, html_template: impl Into<Source>) -> Self {
        self.html_template = html_template.into();
        self
    }

    /// Replace the stylesheet, keeping the template.
    pub fn with_stylesheet(mut self, stylesheet: impl Into<Source>) -> Self {
        self.stylesheet = stylesheet.into();
        self
    }
}

/// Read content from a local file
fn read_local_content(path: &Path) -> Result<String> {
    info!("Reading local resource: {:?}", path);
    fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => RemarkerError::PathNotFound(path.to_path_buf()),
        _ => RemarkerError::FileRead {
            path: path.to_path_buf(),
            source: e,
        },
    })
}
