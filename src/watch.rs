// ABOUTME: Watch module for monitoring source changes and rebuilding the slideshow
// ABOUTME: Re-renders the output HTML whenever sections, metafile or assets change

use log::{debug, error, info, warn};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::Duration;

use notify::{RecursiveMode, Watcher};
use notify_debouncer_full::new_debouncer;

use crate::errors::{RemarkerError, Result};
use crate::html::{self, BuildConfig};
use crate::manifest::Manifest;
use crate::resources::Assets;
use crate::utils;

/// File extensions that trigger a rebuild when changed under a watched directory
const RELEVANT_EXTENSIONS: &[&str] = &["md", "markdown", "yaml", "yml", "html", "css"];

/// Configuration for watch mode
pub struct WatchConfig {
    /// What to build
    pub build: BuildConfig,

    /// Output HTML file path
    pub html_output: PathBuf,

    /// Debounce time in milliseconds
    pub debounce_ms: u64,
}

/// Builds the slideshow once, then rebuilds it whenever its inputs change.
/// Blocks until the watcher shuts down.
pub fn watch_presentation(config: WatchConfig) -> Result<()> {
    utils::validate_path_exists(&config.build.source)?;
    utils::ensure_parent_directory_exists(&config.html_output)?;

    // Initial generation
    regenerate_output(&config)?;

    let (tx, rx) = mpsc::channel();

    let mut debouncer = new_debouncer(Duration::from_millis(config.debounce_ms), None, tx)
        .map_err(|e| RemarkerError::Watch(format!("Failed to create file watcher: {}", e)))?;

    let mut watched: Vec<PathBuf> = Vec::new();
    let mut assets = watched_assets(&config.build);
    for (path, mode) in watch_targets(&config.build, &assets)? {
        debug!("Watching absolute path: {:?} ({:?})", path, mode);
        debouncer
            .watcher()
            .watch(&path, mode)
            .map_err(|e| {
                RemarkerError::Watch(format!("Failed to start watching {:?}: {}", path, e))
            })?;
        watched.push(path);
    }

    info!("Watching for changes in {:?}", config.build.source);
    eprintln!(
        "Watching for changes in {:?} (Press Ctrl+C to stop)",
        config.build.source
    );

    let output_abs = utils::get_absolute_path(&config.html_output)
        .unwrap_or_else(|_| config.html_output.clone());

    for result in rx {
        match result {
            Ok(events) => {
                let changed = events
                    .iter()
                    .flat_map(|event| event.paths.iter().map(PathBuf::as_path));
                if !needs_rebuild(changed, &assets, &output_abs) {
                    continue;
                }

                match regenerate_output(&config) {
                    Ok(()) => info!("Rebuilt {:?}", config.html_output),
                    Err(e) => error!("Failed to rebuild presentation: {}", e),
                }

                // The metafile may now name different assets
                assets = watched_assets(&config.build);
                match watch_targets(&config.build, &assets) {
                    Ok(targets) => {
                        for (path, mode) in targets {
                            if watched.contains(&path) {
                                continue;
                            }
                            debug!("Watching absolute path: {:?} ({:?})", path, mode);
                            match debouncer.watcher().watch(&path, mode) {
                                Ok(()) => watched.push(path),
                                Err(e) => warn!("Failed to start watching {:?}: {}", path, e),
                            }
                        }
                    }
                    Err(e) => warn!("Failed to refresh watched paths: {}", e),
                }
            }
            Err(errors) => {
                for e in errors {
                    error!("Watch error: {:?}", e);
                }
            }
        }
    }

    Ok(())
}

/// The template and stylesheet a build actually uses. For a directory source
/// this includes the overrides named in its metafile.
fn watched_assets(build: &BuildConfig) -> Assets {
    if !build.source.is_dir() {
        return build.assets.clone();
    }
    match Manifest::load(&build.source, &build.metafile) {
        Ok(manifest) => manifest.assets(&build.assets),
        Err(e) => {
            warn!("Not watching metafile assets in {:?}: {}", build.source, e);
            build.assets.clone()
        }
    }
}

/// Paths to hand to the watcher: the source itself (a file is watched via
/// its parent directory) plus any asset files.
fn watch_targets(build: &BuildConfig, assets: &Assets) -> Result<Vec<(PathBuf, RecursiveMode)>> {
    let mut targets = Vec::new();

    if build.source.is_dir() {
        targets.push((
            utils::get_absolute_path(&build.source)?,
            RecursiveMode::Recursive,
        ));
    } else {
        let parent = match build.source.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        targets.push((utils::get_absolute_path(parent)?, RecursiveMode::NonRecursive));
    }

    for asset in [&assets.html_template, &assets.stylesheet] {
        let Some(path) = asset.path() else {
            continue;
        };
        match utils::get_absolute_path(path) {
            Ok(abs) => {
                if !targets.iter().any(|(watched, _)| abs.starts_with(watched)) {
                    targets.push((abs, RecursiveMode::NonRecursive));
                }
            }
            Err(e) => warn!("Not watching asset {:?}: {}", path, e),
        }
    }

    Ok(targets)
}

/// Whether a debounced batch of changed paths calls for a rebuild. Every
/// batch is judged on its own, so changes flushed in quick succession each
/// get rebuilt.
fn needs_rebuild<'a>(
    changed: impl IntoIterator<Item = &'a Path>,
    assets: &Assets,
    output_abs: &Path,
) -> bool {
    changed.into_iter().any(|path| {
        let is_relevant = is_relevant_path(path, assets, output_abs);
        if is_relevant {
            debug!("Detected relevant change in {:?}", path);
        }
        is_relevant
    })
}

/// Checks if a changed path should trigger a rebuild
fn is_relevant_path(path: &Path, assets: &Assets, output_abs: &Path) -> bool {
    let path_abs = utils::get_absolute_path(path).unwrap_or_else(|_| path.to_path_buf());

    // Writing the output must not retrigger a build
    if path_abs == output_abs {
        return false;
    }

    let is_asset = [&assets.html_template, &assets.stylesheet]
        .into_iter()
        .filter_map(|asset| asset.path())
        .any(|asset| {
            asset == path
                || utils::get_absolute_path(asset)
                    .map(|abs| abs == path_abs)
                    .unwrap_or(false)
        });
    if is_asset {
        return true;
    }

    match path.extension() {
        Some(ext) => {
            let ext = ext.to_string_lossy().to_lowercase();
            RELEVANT_EXTENSIONS.contains(&ext.as_str())
        }
        None => false,
    }
}

/// Rebuild the HTML output from the current state of the sources
fn regenerate_output(config: &WatchConfig) -> Result<()> {
    info!("Regenerating output...");
    let html_content = html::generate_html(&config.build)?;
    html::write_html_to_file(&html_content, &config.html_output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_output_file_is_never_relevant() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("slides.html");
        fs::write(&output, "").unwrap();
        let output_abs = utils::get_absolute_path(&output).unwrap();

        assert!(!is_relevant_path(&output, &Assets::default(), &output_abs));
    }

    #[test]
    fn test_relevant_extensions() {
        let dir = TempDir::new().unwrap();
        let output_abs = dir.path().join("out.html");
        let assets = Assets::default();

        assert!(is_relevant_path(&dir.path().join("intro.md"), &assets, &output_abs));
        assert!(is_relevant_path(&dir.path().join("sections.yaml"), &assets, &output_abs));
        assert!(is_relevant_path(&dir.path().join("theme.CSS"), &assets, &output_abs));
        assert!(!is_relevant_path(&dir.path().join("notes.txt"), &assets, &output_abs));
        assert!(!is_relevant_path(&dir.path().join("Makefile"), &assets, &output_abs));
    }

    #[test]
    fn test_back_to_back_batches_each_rebuild() {
        let dir = TempDir::new().unwrap();
        let output_abs = dir.path().join("out.html");
        let assets = Assets::default();
        let first = dir.path().join("a.md");
        let second = dir.path().join("b.md");

        assert!(needs_rebuild([first.as_path()], &assets, &output_abs));
        assert!(needs_rebuild([second.as_path()], &assets, &output_abs));
        assert!(!needs_rebuild([output_abs.as_path()], &assets, &output_abs));
        assert!(!needs_rebuild(Vec::<&Path>::new(), &assets, &output_abs));
    }

    #[test]
    fn test_explicit_asset_is_relevant() {
        let dir = TempDir::new().unwrap();
        let template = dir.path().join("talk.tmpl");
        fs::write(&template, "{{ markdown }}").unwrap();

        let assets = Assets::default().with_html_template(template.clone());
        let output_abs = dir.path().join("out.html");

        assert!(is_relevant_path(&template, &assets, &output_abs));
    }

    #[test]
    fn test_watch_targets_for_file_source() {
        let dir = TempDir::new().unwrap();
        let markdown = dir.path().join("slides.md");
        fs::write(&markdown, "# Hi").unwrap();

        let build = BuildConfig::new(&markdown);
        let targets = watch_targets(&build, &watched_assets(&build)).unwrap();
        assert_eq!(targets.len(), 1);
        assert_eq!(targets[0].0, utils::get_absolute_path(dir.path()).unwrap());
        assert_eq!(targets[0].1, RecursiveMode::NonRecursive);
    }

    #[test]
    fn test_watch_targets_include_outside_assets() {
        let sources = TempDir::new().unwrap();
        let theme = TempDir::new().unwrap();
        let stylesheet = theme.path().join("talk.css");
        fs::write(&stylesheet, "body {}").unwrap();

        let mut build = BuildConfig::new(sources.path());
        build.assets = Assets::default().with_stylesheet(stylesheet.clone());

        let targets = watch_targets(&build, &watched_assets(&build)).unwrap();
        assert_eq!(targets.len(), 2);
        assert_eq!(targets[0].1, RecursiveMode::Recursive);
        assert_eq!(targets[1].0, utils::get_absolute_path(&stylesheet).unwrap());
    }

    #[test]
    fn test_metafile_overrides_are_watched() {
        let talk = TempDir::new().unwrap();
        let theme = TempDir::new().unwrap();
        let stylesheet = theme.path().join("theme.css");
        let template = theme.path().join("theme.tmpl");
        fs::write(&stylesheet, "body {}").unwrap();
        fs::write(&template, "{{ markdown }}").unwrap();
        fs::write(
            talk.path().join("sections.yaml"),
            format!(
                "html_template: {}\nstylesheet: {}\nsections: [a.md]\n",
                template.display(),
                stylesheet.display()
            ),
        )
        .unwrap();
        fs::write(talk.path().join("a.md"), "# A").unwrap();

        let build = BuildConfig::new(talk.path());
        let assets = watched_assets(&build);
        let targets = watch_targets(&build, &assets).unwrap();

        let stylesheet_abs = utils::get_absolute_path(&stylesheet).unwrap();
        let template_abs = utils::get_absolute_path(&template).unwrap();
        assert!(targets.iter().any(|(path, _)| *path == stylesheet_abs));
        assert!(targets.iter().any(|(path, _)| *path == template_abs));

        let output_abs = talk.path().join("out.html");
        assert!(is_relevant_path(&template, &assets, &output_abs));
    }

    #[test]
    fn test_unreadable_metafile_falls_back_to_build_assets() {
        let talk = TempDir::new().unwrap();
        let build = BuildConfig::new(talk.path());

        assert_eq!(watched_assets(&build), build.assets);
        let targets = watch_targets(&build, &watched_assets(&build)).unwrap();
        assert_eq!(targets.len(), 1);
    }
}
