use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn shotmark_cmd() -> Command {
    Command::cargo_bin("shotmark").expect("binary exists")
}

fn write_png(path: &Path, width: i32, height: i32) {
    let surface = cairo::ImageSurface::create(cairo::Format::Rgb24, width, height).unwrap();
    let mut file = fs::File::create(path).unwrap();
    surface.write_to_png(&mut file).unwrap();
}

const RECT_EVENTS: &str = r#"
[[events]]
type = "set-tool"
tool = "rect"

[[events]]
type = "pointer-down"
x = 20.0
y = 20.0

[[events]]
type = "pointer-move"
x = 80.0
y = 60.0

[[events]]
type = "pointer-up"
x = 80.0
y = 60.0
"#;

#[test]
fn help_prints_usage() {
    shotmark_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Annotate a screenshot with boxes, arrows, and labels",
        ));
}

#[test]
fn image_argument_is_required() {
    shotmark_cmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "required arguments were not provided",
        ));
}

#[test]
fn undecodable_image_fails() {
    let temp = TempDir::new().unwrap();
    let image = temp.path().join("broken.png");
    fs::write(&image, b"not an image").unwrap();

    shotmark_cmd()
        .arg("--image")
        .arg(&image)
        .arg("--config")
        .arg(temp.path().join("missing.toml"))
        .arg("--out")
        .arg(temp.path().join("out"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Could not open"));

    assert!(!temp.path().join("out").exists());
}

#[test]
fn malformed_crop_is_rejected() {
    shotmark_cmd()
        .args(["--image", "shot.png", "--crop", "1,2,3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--crop"));
}

#[test]
fn replays_events_and_writes_image_and_notes() {
    let temp = TempDir::new().unwrap();
    let image = temp.path().join("shot.png");
    write_png(&image, 200, 100);
    let events = temp.path().join("events.toml");
    fs::write(&events, RECT_EVENTS).unwrap();
    let out = temp.path().join("out");

    shotmark_cmd()
        .arg("--image")
        .arg(&image)
        .arg("--events")
        .arg(&events)
        .arg("--config")
        .arg(temp.path().join("missing.toml"))
        .arg("--out")
        .arg(&out)
        .args(["--notes", "  button is misaligned  ", "--title", "Checkout"])
        .args(["--url", "https://example.com/checkout"])
        .assert()
        .success()
        .stdout(predicate::str::contains(".png").and(predicate::str::contains(".md")));

    let mut written: Vec<_> = fs::read_dir(&out)
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .collect();
    written.sort();
    assert_eq!(written.len(), 2);

    let report_path = written
        .iter()
        .find(|p| p.extension().is_some_and(|ext| ext == "md"))
        .unwrap();
    let report = fs::read_to_string(report_path).unwrap();
    assert!(report.starts_with("**Screenshot from Checkout**"));
    assert!(report.contains("**Notes:** button is misaligned\n"));
    assert!(report.contains("https://example.com/checkout"));
    assert!(report.contains("200x100"));

    let image_path = written
        .iter()
        .find(|p| p.extension().is_some_and(|ext| ext == "png"))
        .unwrap();
    let mut file = fs::File::open(image_path).unwrap();
    let decoded = cairo::ImageSurface::create_from_png(&mut file).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (200, 100));
}

#[test]
fn crop_changes_output_size() {
    let temp = TempDir::new().unwrap();
    let image = temp.path().join("shot.png");
    write_png(&image, 400, 300);
    let out = temp.path().join("out");

    shotmark_cmd()
        .arg("--image")
        .arg(&image)
        .args(["--crop", "10,10,60,40,2"])
        .arg("--config")
        .arg(temp.path().join("missing.toml"))
        .arg("--out")
        .arg(&out)
        .assert()
        .success();

    let report = fs::read_dir(&out)
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .find(|p| p.extension().is_some_and(|ext| ext == "md"))
        .unwrap();
    let report = fs::read_to_string(report).unwrap();
    assert!(report.contains("120x80"));
    assert!(!report.contains("**Notes:**"));
}

#[test]
fn huge_crop_offset_fails_without_panicking() {
    let temp = TempDir::new().unwrap();
    let image = temp.path().join("shot.png");
    write_png(&image, 40, 40);

    shotmark_cmd()
        .arg("--image")
        .arg(&image)
        .arg("--crop=-1e300,0,2,2")
        .arg("--config")
        .arg(temp.path().join("missing.toml"))
        .arg("--out")
        .arg(temp.path().join("out"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid crop region"));
}

#[test]
fn unknown_filename_specifier_uses_default_template() {
    let temp = TempDir::new().unwrap();
    let image = temp.path().join("shot.png");
    write_png(&image, 40, 40);
    let config = temp.path().join("config.toml");
    fs::write(&config, "[output]\nfilename_template = \"shot_%Q\"\n").unwrap();
    let out = temp.path().join("out");

    shotmark_cmd()
        .arg("--image")
        .arg(&image)
        .arg("--config")
        .arg(&config)
        .arg("--out")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("shotmark_"));

    assert_eq!(fs::read_dir(&out).unwrap().count(), 2);
}
