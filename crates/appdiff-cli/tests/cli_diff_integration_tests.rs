//! CLI diff integration tests
//!
//! Drive the built binary against an app directory and an exported
//! snapshot of the deployed version.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

fn write(root: &Path, rel: &str, content: &[u8]) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn write_export(temp_dir: &TempDir, document: serde_json::Value) -> PathBuf {
    let path = temp_dir.path().join("deployed.json");
    fs::write(&path, serde_json::to_vec_pretty(&document).unwrap()).unwrap();
    path
}

fn run(temp_dir: &TempDir, args: &[&str]) -> Output {
    let cli_bin = env!("CARGO_BIN_EXE_appdiff-cli");
    Command::new(cli_bin)
        .current_dir(temp_dir.path())
        .env("RUST_LOG", "off")
        .args(args)
        .output()
        .expect("Failed to execute CLI")
}

fn sha256_of(content: &[u8]) -> String {
    appdiff_core::digest::sha256_hex(content)
}

#[test]
fn test_cli_identical_app() {
    let temp_dir = TempDir::new().unwrap();
    let app = temp_dir.path().join("app");
    write(&app, "config.json", b"{}");
    let export = write_export(
        &temp_dir,
        serde_json::json!({
            "group_id": "group-1",
            "app_id": "app-1",
            "config": [{"path": "config.json", "content": "{}"}]
        }),
    );

    let output = run(
        &temp_dir,
        &[
            "diff",
            "--local",
            app.to_str().unwrap(),
            "--remote",
            export.to_str().unwrap(),
        ],
    );

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.trim(), "Deployed app is identical to proposed version");
}

#[test]
fn test_cli_reports_all_facets() {
    let temp_dir = TempDir::new().unwrap();
    let app = temp_dir.path().join("app");
    write(&app, "config.json", b"{}");
    write(&app, "a.json", b"{}");
    write(&app, "hosting/files/img.png", b"new pixels");
    let export = write_export(
        &temp_dir,
        serde_json::json!({
            "group_id": "group-1",
            "app_id": "app-1",
            "config": [
                {"path": "config.json", "content": "{}"},
                {"path": "a.json", "content": "{}"},
                {"path": "b.json", "content": "e30=", "encoding": "base64"}
            ],
            "dependencies": {"digest": sha256_of(b"deployed deps")},
            "hosting": [{"path": "/img.png", "hash": sha256_of(b"old pixels"), "size": 10, "attrs": []}]
        }),
    );

    let output = run(
        &temp_dir,
        &[
            "diff",
            "--local",
            app.to_str().unwrap(),
            "--remote",
            export.to_str().unwrap(),
            "-d",
            "-s",
        ],
    );

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines[0], "The following reflects the proposed changes to your app");
    assert_eq!(lines[1], "- [config] b.json (2 bytes)");
    assert!(lines[2].starts_with("- [dependency] dependency-archive"));
    assert_eq!(lines[3], "~ [hosting] img.png (content)");
    assert_eq!(lines.len(), 4);

    // the default cache lives under the working directory
    assert!(temp_dir.path().join(".appdiff/cache.db").exists());
}

#[test]
fn test_cli_hosting_dir_override() {
    let temp_dir = TempDir::new().unwrap();
    let app = temp_dir.path().join("app");
    write(&app, "config.json", b"{}");
    let site = temp_dir.path().join("site");
    write(&site, "index.html", b"<html/>");
    let export = write_export(
        &temp_dir,
        serde_json::json!({
            "group_id": "group-1",
            "app_id": "app-1",
            "config": [{"path": "config.json", "content": "{}"}]
        }),
    );

    let output = run(
        &temp_dir,
        &[
            "diff",
            "--local",
            app.to_str().unwrap(),
            "--remote",
            export.to_str().unwrap(),
            "--include-hosting",
            "--hosting-dir",
            site.to_str().unwrap(),
            "--cache",
            temp_dir.path().join("custom.db").to_str().unwrap(),
        ],
    );

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("+ [hosting] index.html"));
    assert!(!stdout.contains("[config]"), "stdout: {}", stdout);
    assert!(temp_dir.path().join("custom.db").exists());
}

#[test]
fn test_cli_hosting_dir_inside_app_not_reported_as_config() {
    let temp_dir = TempDir::new().unwrap();
    let app = temp_dir.path().join("app");
    write(&app, "config.json", b"{}");
    write(&app, "public/index.html", b"<html/>");
    let export = write_export(
        &temp_dir,
        serde_json::json!({
            "group_id": "group-1",
            "app_id": "app-1",
            "config": [{"path": "config.json", "content": "{}"}],
            "hosting": [{"path": "/index.html", "hash": sha256_of(b"<html/>"), "size": 7, "attrs": []}]
        }),
    );

    let output = run(
        &temp_dir,
        &[
            "diff",
            "--local",
            app.to_str().unwrap(),
            "--remote",
            export.to_str().unwrap(),
            "--include-hosting",
            "--hosting-dir",
            app.join("public").to_str().unwrap(),
        ],
    );

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.trim(), "Deployed app is identical to proposed version");
}

#[test]
fn test_cli_directory_without_app_config_fails_with_io_error() {
    let temp_dir = TempDir::new().unwrap();
    let app = temp_dir.path().join("app");
    write(&app, "notes.txt", b"not an app");
    let export = write_export(
        &temp_dir,
        serde_json::json!({"group_id": "group-1", "app_id": "app-1"}),
    );

    let output = run(
        &temp_dir,
        &[
            "diff",
            "--local",
            app.to_str().unwrap(),
            "--remote",
            export.to_str().unwrap(),
        ],
    );

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("[ERR_IO]"), "stderr: {}", stderr);
    assert!(stderr.contains("no app directory found at"), "stderr: {}", stderr);
}

#[test]
fn test_cli_app_id_mismatch_fails() {
    let temp_dir = TempDir::new().unwrap();
    let app = temp_dir.path().join("app");
    write(&app, "config.json", b"{}");
    let export = write_export(
        &temp_dir,
        serde_json::json!({"group_id": "group-1", "app_id": "app-1"}),
    );

    let output = run(
        &temp_dir,
        &[
            "diff",
            "--local",
            app.to_str().unwrap(),
            "--remote",
            export.to_str().unwrap(),
            "--app-id",
            "someone-else",
        ],
    );

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error: [ERR_SERVICE]"), "stderr: {}", stderr);
}

#[test]
fn test_cli_missing_dependency_archive_fails_with_build_error() {
    let temp_dir = TempDir::new().unwrap();
    let app = temp_dir.path().join("app");
    write(&app, "config.json", b"{}");
    write(&app, "functions/package.json", b"{}");
    let export = write_export(
        &temp_dir,
        serde_json::json!({"group_id": "group-1", "app_id": "app-1"}),
    );

    let output = run(
        &temp_dir,
        &[
            "diff",
            "--local",
            app.to_str().unwrap(),
            "--remote",
            export.to_str().unwrap(),
            "--include-dependencies",
        ],
    );

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("[ERR_BUILD]"));
}
