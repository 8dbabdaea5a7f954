// ABOUTME: Main entry point for the remarker program.
// ABOUTME: Provides CLI interface and executes commands from the library.

use anyhow::{bail, Context};
use clap::{ArgAction, Parser};
use log::LevelFilter;
use std::io::Write;
use std::path::PathBuf;

/// Stitch Markdown files into a single remark.js HTML slideshow
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Markdown file, or directory containing a metafile
    source: PathBuf,

    /// Path to output HTML file (stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// HTML template to use instead of the default
    #[arg(long)]
    html_template: Option<PathBuf>,

    /// Stylesheet to use instead of the default
    #[arg(long)]
    stylesheet: Option<PathBuf>,

    /// Title of the generated HTML document
    #[arg(short, long)]
    title: Option<String>,

    /// Name of the metafile listing the sections of a directory source
    #[arg(short, long)]
    metafile: Option<String>,

    /// Rebuild the output whenever the sources change
    #[arg(short, long, requires = "output")]
    watch: bool,

    /// Debounce time in milliseconds for watch mode
    #[arg(long)]
    debounce_ms: Option<u64>,

    /// Increase logging verbosity (-v, -vv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let app_config = remarker::Config::from_env();
    let build = app_config.build_config(
        cli.source,
        cli.html_template,
        cli.stylesheet,
        cli.title,
        cli.metafile,
    );

    if cli.watch {
        let Some(html_output) = cli.output else {
            bail!("--watch requires --output");
        };
        let watch_config = remarker::WatchConfig {
            build,
            html_output,
            debounce_ms: cli.debounce_ms.unwrap_or(app_config.debounce_ms),
        };
        remarker::watch_presentation(watch_config)?;
        return Ok(());
    }

    let html_content = remarker::generate_html(&build)?;

    match &cli.output {
        Some(output) => {
            remarker::write_html_to_file(&html_content, output)?;
            log::info!("HTML generated successfully: {:?}", output);
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(html_content.as_bytes())
                .context("Failed to write HTML to stdout")?;
            stdout.flush().context("Failed to flush stdout")?;
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
