// ABOUTME: Presentation model for the remarker application
// ABOUTME: Holds markdown, template and stylesheet; merges and renders presentations

use crate::errors::{RemarkerError, Result};
use crate::resources::{Assets, Source};
use log::debug;
use minijinja::{context, AutoEscape, Environment};
use std::path::Path;

/// Title used when the caller does not pick one.
pub const DEFAULT_TITLE: &str = "Remarker Presentation";

/// Marker remark.js treats as a slide boundary.
pub const SLIDE_SEPARATOR: &str = "\n---\n";

/// Script snippet that loads remark.js and turns the markdown into slides.
pub const DEFAULT_JAVASCRIPT: &str = r#"
<script src="https://remarkjs.com/downloads/remark-latest.min.js"></script>
<script>var slideshow = remark.create({ratio: '16:9', slideNumberFormat: '(%current%/%total%)', countIncrementalSlides: false, highlightLines: true});</script>"#;

/// One slideshow: its markdown and the HTML template and stylesheet it is
/// rendered with.
///
/// All three parts are resolved when the presentation is built. Two
/// presentations are equal when all three texts are equal, regardless of
/// where they were loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Presentation {
    markdown: String,
    html_template: String,
    stylesheet: String,
}

impl Presentation {
    /// Build a presentation, reading any of the three sources that are files.
    pub fn new(
        markdown: impl Into<Source>,
        html_template: impl Into<Source>,
        stylesheet: impl Into<Source>,
    ) -> Result<Self> {
        Ok(Self {
            markdown: markdown.into().load()?,
            html_template: html_template.into().load()?,
            stylesheet: stylesheet.into().load()?,
        })
    }

    /// Build a presentation using the template and stylesheet from `assets`.
    pub fn with_assets(markdown: impl Into<Source>, assets: &Assets) -> Result<Self> {
        Self::new(
            markdown,
            assets.html_template.clone(),
            assets.stylesheet.clone(),
        )
    }

    /// Assemble a presentation from the markdown files listed in a metafile.
    /// See [`crate::assembler::assemble`].
    pub fn from_directory(directory: &Path, metafile: &str, defaults: &Assets) -> Result<Self> {
        crate::assembler::assemble(directory, metafile, defaults)
    }

    pub fn markdown(&self) -> &str {
        &self.markdown
    }

    pub fn html_template(&self) -> &str {
        &self.html_template
    }

    pub fn stylesheet(&self) -> &str {
        &self.stylesheet
    }

    /// Render the presentation to a complete HTML document.
    ///
    /// The markdown is inserted as-is; remark.js turns it into slides in the
    /// browser.
    pub fn to_html(&self, title: &str) -> Result<String> {
        let mut env = Environment::new();
        env.set_keep_trailing_newline(true);
        env.set_auto_escape_callback(|_| AutoEscape::None);

        let stylesheet_html = format!("<style>\n{}\n</style>", self.stylesheet);
        let html = env.render_str(
            &self.html_template,
            context! {
                title => title,
                markdown => &self.markdown,
                stylesheet => stylesheet_html,
                js => DEFAULT_JAVASCRIPT,
            },
        )?;
        Ok(html)
    }

    /// Concatenate two presentations into a new one, `self` first.
    ///
    /// Both sides must share the same template and stylesheet.
    pub fn merge(&self, other: &Presentation) -> Result<Presentation> {
        if self.html_template != other.html_template || self.stylesheet != other.stylesheet {
            return Err(RemarkerError::IncompatibleMerge);
        }
        Ok(Presentation {
            markdown: format!("{}{}{}", self.markdown, SLIDE_SEPARATOR, other.markdown),
            html_template: self.html_template.clone(),
            stylesheet: self.stylesheet.clone(),
        })
    }

    /// Merge presentations left to right into one.
    pub fn merge_all<I>(presentations: I) -> Result<Presentation>
    where
        I: IntoIterator<Item = Presentation>,
    {
        let mut presentations = presentations.into_iter();
        let first = presentations.next().ok_or(RemarkerError::EmptyMerge)?;
        presentations.try_fold(first, |merged, next| {
            debug!("Merging presentation ({} bytes of markdown)", next.markdown.len());
            merged.merge(&next)
        })
    }
}
