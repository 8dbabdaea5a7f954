// ABOUTME: Library module for the remarker program.
// ABOUTME: Contains core functionality for loading, merging and rendering remark.js slideshows.

// Reexport modules
pub mod assembler;
pub mod config;
pub mod errors;
pub mod html;
pub mod manifest;
pub mod presentation;
pub mod resources;
pub mod utils;
pub mod watch;

// Reexport common types and functions
pub use assembler::assemble;
pub use config::Config;
pub use errors::{RemarkerError, Result};
pub use html::{generate_html, load_presentation, write_html_to_file, BuildConfig};
pub use manifest::{Manifest, DEFAULT_METAFILE};
pub use presentation::{Presentation, DEFAULT_JAVASCRIPT, DEFAULT_TITLE, SLIDE_SEPARATOR};
pub use resources::{Assets, Source, DEFAULT_HTML_TEMPLATE, DEFAULT_STYLESHEET};
pub use watch::{watch_presentation, WatchConfig};
