use std::fs;
use std::process::{Command, Output};
use tempfile::TempDir;

fn run_command(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_remarker"))
        .args(args)
        .env_remove("REMARKER_HTML_TEMPLATE")
        .env_remove("REMARKER_STYLESHEET")
        .env_remove("REMARKER_TITLE")
        .env_remove("REMARKER_METAFILE")
        .output()
        .expect("Failed to execute command")
}

#[test]
fn test_single_file_to_output() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let temp_path = temp_dir.path();

    let markdown_path = temp_path.join("talk.md");
    fs::write(&markdown_path, "# Test Slide\n\nThis is a test slide.")
        .expect("Failed to write markdown file");
    let output_path = temp_path.join("talk.html");

    let output = run_command(&[
        markdown_path.to_str().unwrap(),
        "-o",
        output_path.to_str().unwrap(),
        "--title",
        "CLI Talk",
    ]);

    assert!(output.status.success(), "Command failed: {:?}", output);
    let html_content = fs::read_to_string(&output_path).expect("Failed to read output file");

    assert!(html_content.contains("<title>CLI Talk</title>"));
    assert!(
        html_content.contains("# Test Slide\n\nThis is a test slide."),
        "Markdown should be embedded verbatim"
    );
    assert!(html_content.contains("remark-latest.min.js"));
}

#[test]
fn test_single_file_to_stdout() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let markdown_path = temp_dir.path().join("talk.md");
    fs::write(&markdown_path, "# To stdout").expect("Failed to write markdown file");

    let output = run_command(&[markdown_path.to_str().unwrap()]);

    assert!(output.status.success(), "Command failed: {:?}", output);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("<title>Remarker Presentation</title>"));
    assert!(stdout.contains("# To stdout"));
}

#[test]
fn test_custom_template_and_stylesheet() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let temp_path = temp_dir.path();

    let markdown_path = temp_path.join("talk.md");
    fs::write(&markdown_path, "# Custom").unwrap();
    let template_path = temp_path.join("talk.jinja");
    fs::write(&template_path, "[{{ title }}]{{ stylesheet }}{{ markdown }}\n").unwrap();
    let css_path = temp_path.join("talk.css");
    fs::write(&css_path, "body { font-family: Arial; }").unwrap();

    let output = run_command(&[
        markdown_path.to_str().unwrap(),
        "--html-template",
        template_path.to_str().unwrap(),
        "--stylesheet",
        css_path.to_str().unwrap(),
        "-t",
        "T",
    ]);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "[T]<style>\nbody { font-family: Arial; }\n</style># Custom\n"
    );
}

#[test]
fn test_missing_source_fails() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let missing = temp_dir.path().join("missing.md");

    let output = run_command(&[missing.to_str().unwrap()]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error:"), "stderr: {}", stderr);
    assert!(stderr.contains("missing.md"), "stderr: {}", stderr);
}

#[test]
fn test_watch_requires_output() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let markdown_path = temp_dir.path().join("talk.md");
    fs::write(&markdown_path, "# Watch").unwrap();

    let output = run_command(&[markdown_path.to_str().unwrap(), "--watch"]);

    assert!(!output.status.success());
}
