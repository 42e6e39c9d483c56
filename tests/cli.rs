use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn shapecanvas_cmd(config_home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("shapecanvas").expect("binary exists");
    cmd.env("XDG_CONFIG_HOME", config_home.path());
    cmd
}

#[test]
fn help_prints_about() {
    let temp = TempDir::new().unwrap();
    shapecanvas_cmd(&temp)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Retained-mode 2D scene graph with color-keyed hit testing",
        ));
}

#[test]
fn version_prints_package_version() {
    let temp = TempDir::new().unwrap();
    shapecanvas_cmd(&temp)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::diff(format!(
            "shapecanvas {}\n",
            env!("CARGO_PKG_VERSION")
        )));
}

#[test]
fn no_arguments_prints_usage() {
    let temp = TempDir::new().unwrap();
    shapecanvas_cmd(&temp)
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"));
}

#[test]
fn click_on_demo_shape_reports_its_name() {
    let temp = TempDir::new().unwrap();
    shapecanvas_cmd(&temp)
        .args(["--click", "120,120"])
        .assert()
        .success()
        .stdout(predicate::str::contains("clicked: dot"));
}

#[test]
fn click_on_background_reports_nothing() {
    let temp = TempDir::new().unwrap();
    shapecanvas_cmd(&temp)
        .args(["--click", "5,5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("clicked: nothing"));
}

#[test]
fn malformed_click_is_rejected() {
    let temp = TempDir::new().unwrap();
    shapecanvas_cmd(&temp)
        .args(["--click", "twelve"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected X,Y"));
}

#[test]
fn output_flags_write_png_files() {
    let temp = TempDir::new().unwrap();
    let scene = temp.path().join("scene.png");
    let hit = temp.path().join("hit.png");

    shapecanvas_cmd(&temp)
        .arg("--output")
        .arg(&scene)
        .arg("--hit-output")
        .arg(&hit)
        .assert()
        .success();

    for path in [&scene, &hit] {
        let bytes = std::fs::read(path).unwrap();
        assert!(bytes.starts_with(b"\x89PNG"));
    }
}

#[test]
fn config_file_controls_surface_size() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("small.toml");
    std::fs::write(&config, "[surface]\nwidth = 64\nheight = 32\npixel_ratio = 2.0\n").unwrap();
    let scene = temp.path().join("scene.png");

    shapecanvas_cmd(&temp)
        .arg("--config")
        .arg(&config)
        .arg("--output")
        .arg(&scene)
        .assert()
        .success();

    let mut file = std::fs::File::open(&scene).unwrap();
    let image = cairo::ImageSurface::create_from_png(&mut file).unwrap();
    assert_eq!((image.width(), image.height()), (128, 64));
}

#[test]
fn invalid_config_reports_path() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("broken.toml");
    std::fs::write(&config, "[surface\nwidth = ").unwrap();

    shapecanvas_cmd(&temp)
        .arg("--config")
        .arg(&config)
        .arg("--click")
        .arg("1,1")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse config"));
}

#[test]
fn schema_dump_is_json() {
    Command::cargo_bin("dump_config_schema")
        .expect("binary exists")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"interaction\""));
}
