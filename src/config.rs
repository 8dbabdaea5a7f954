// ABOUTME: Configuration module for the remarker application
// ABOUTME: Provides configuration settings and environment variable handling

use crate::html::BuildConfig;
use crate::manifest::DEFAULT_METAFILE;
use crate::presentation::DEFAULT_TITLE;
use crate::resources::Assets;
use std::env;
use std::path::PathBuf;

/// Process-wide defaults for building presentations
#[derive(Debug, Clone)]
pub struct Config {
    /// Template used instead of the bundled one
    pub html_template_path: Option<PathBuf>,
    /// Stylesheet used instead of the bundled one
    pub stylesheet_path: Option<PathBuf>,
    pub title: String,
    pub metafile: String,
    pub debounce_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            html_template_path: None,
            stylesheet_path: None,
            title: DEFAULT_TITLE.to_string(),
            metafile: DEFAULT_METAFILE.to_string(),
            debounce_ms: 500,
        }
    }
}

impl Config {
    /// Create a new configuration instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let html_template_path = env::var("REMARKER_HTML_TEMPLATE").ok().map(PathBuf::from);
        let stylesheet_path = env::var("REMARKER_STYLESHEET").ok().map(PathBuf::from);
        let title = env::var("REMARKER_TITLE").unwrap_or(defaults.title);
        let metafile = env::var("REMARKER_METAFILE").unwrap_or(defaults.metafile);
        let debounce_ms = env::var("REMARKER_DEBOUNCE_MS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(defaults.debounce_ms);

        Self {
            html_template_path,
            stylesheet_path,
            title,
            metafile,
            debounce_ms,
        }
    }

    /// The template and stylesheet presentations are built with by default
    pub fn assets(&self) -> Assets {
        let mut assets = Assets::default();
        if let Some(path) = &self.html_template_path {
            assets = assets.with_html_template(path.clone());
        }
        if let Some(path) = &self.stylesheet_path {
            assets = assets.with_stylesheet(path.clone());
        }
        assets
    }

    /// Get a build configuration, with explicit options taking precedence
    /// over this config
    pub fn build_config(
        &self,
        source: PathBuf,
        html_template: Option<PathBuf>,
        stylesheet: Option<PathBuf>,
        title: Option<String>,
        metafile: Option<String>,
    ) -> BuildConfig {
        let mut assets = self.assets();
        if let Some(path) = html_template {
            assets = assets.with_html_template(path);
        }
        if let Some(path) = stylesheet {
            assets = assets.with_stylesheet(path);
        }

        BuildConfig {
            source,
            assets,
            title: title.unwrap_or_else(|| self.title.clone()),
            metafile: metafile.unwrap_or_else(|| self.metafile.clone()),
        }
    }
}
