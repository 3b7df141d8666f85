//! Integration tests for the ssb CLI
//!
//! These tests run the binary against temporary projects and check exit
//! codes and output.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

use image::{Rgba, RgbaImage};

/// Run ssb with arguments from a working directory
fn run_ssb(cwd: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_ssb"))
        .current_dir(cwd)
        .env("XDG_CONFIG_HOME", cwd.join(".xdg"))
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .expect("Failed to execute ssb")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

/// Create a frames folder with `count` numbered PNGs
fn create_frames(temp: &TempDir, count: usize) -> PathBuf {
    let frames = temp.path().join("frames");
    fs::create_dir_all(&frames).unwrap();
    for i in 0..count {
        RgbaImage::from_pixel(24, 24, Rgba([i as u8 * 20, 0, 0, 255]))
            .save(frames.join(format!("{}.png", i)))
            .unwrap();
    }
    frames
}

#[test]
fn test_init_assigns_frames_in_numeric_order() {
    let temp = TempDir::new().unwrap();
    create_frames(&temp, 12);

    let output = run_ssb(temp.path(), &["init", "frames", "--name", "hero", "--cols", "5", "--rows", "2"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("10 of 12 frame(s) assigned"));
    assert!(stderr(&output).contains("2 frame(s) did not fit"));

    let project: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(temp.path().join("hero.json")).unwrap()).unwrap();
    assert_eq!(project["grid"]["cols"], 5);
    assert_eq!(project["cells_basenames"][0][2], "2.png");
    assert_eq!(project["cells_basenames"][1][0], "5.png");
    assert_eq!(project["rows_meta"]["1"]["fps"], 6);
}

#[test]
fn test_init_uses_config_defaults() {
    let temp = TempDir::new().unwrap();
    create_frames(&temp, 2);
    fs::write(
        temp.path().join("ssb.toml"),
        "[grid]\ncols = 2\nrows = 1\ntile_width = 32\ntile_height = 32\n\n[rows]\nfps = 12\nloop_mode = \"loop\"\n",
    )
    .unwrap();

    let output = run_ssb(temp.path(), &["init", "frames", "--name", "hero", "-o", "p.json", "--tile", "16x8"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let project: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(temp.path().join("p.json")).unwrap()).unwrap();
    assert_eq!(project["grid"]["cols"], 2);
    assert_eq!(project["grid"]["tile_width"], 16);
    assert_eq!(project["grid"]["tile_height"], 8);
    assert_eq!(project["rows_meta"]["0"]["fps"], 12);
    assert_eq!(project["rows_meta"]["0"]["loop_mode"], "loop");
}

#[test]
fn test_init_missing_folder() {
    let temp = TempDir::new().unwrap();
    let output = run_ssb(temp.path(), &["init", "nope", "--name", "hero"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Source folder not found"));
}

#[test]
fn test_invalid_config_fails() {
    let temp = TempDir::new().unwrap();
    create_frames(&temp, 1);
    fs::write(temp.path().join("ssb.toml"), "[rows]\nfps = 0\n").unwrap();
    let output = run_ssb(temp.path(), &["init", "frames", "--name", "hero"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("rows.fps"));
}

#[test]
fn test_info_reports_rows() {
    let temp = TempDir::new().unwrap();
    create_frames(&temp, 6);
    run_ssb(temp.path(), &["init", "frames", "--name", "hero", "--cols", "4", "--rows", "2"]);

    let output = run_ssb(temp.path(), &["info", "hero.json"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let text = stdout(&output);
    assert!(text.contains("Canvas:  256x128"));
    assert!(text.contains("row_0"));
    assert!(text.contains("Trigger sounds: 0 of 16 assigned"));
}

#[test]
fn test_export_then_play() {
    let temp = TempDir::new().unwrap();
    create_frames(&temp, 3);
    run_ssb(temp.path(), &["init", "frames", "--name", "hero", "--cols", "3", "--rows", "1"]);

    let output = run_ssb(temp.path(), &["export", "hero.json", "-o", "out"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("3 frame(s) in 1 row(s)"));
    assert!(temp.path().join("out/hero/meta.json").is_file());
    assert!(temp.path().join("out/hero.zip").is_file());

    let output = run_ssb(temp.path(), &["play", "out/hero", "--duration-ms", "700", "--step-ms", "50"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let text = stdout(&output);
    assert!(text.contains("Playing 'row_0': 3 frame(s) at 6 fps (pingpong)"));
    assert!(text.contains("frame  2"));
}

#[test]
fn test_export_no_archive_uses_config_out() {
    let temp = TempDir::new().unwrap();
    create_frames(&temp, 1);
    fs::write(temp.path().join("ssb.toml"), "[export]\nout = \"bundles\"\n").unwrap();
    run_ssb(temp.path(), &["init", "frames", "--name", "hero"]);

    let output = run_ssb(temp.path(), &["export", "hero.json", "--no-archive", "--compact"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(temp.path().join("bundles/hero/meta.json").is_file());
    assert!(!temp.path().join("bundles/hero.zip").exists());
}

#[test]
fn test_config_out_resolves_against_config_dir() {
    let temp = TempDir::new().unwrap();
    create_frames(&temp, 1);
    fs::write(temp.path().join("ssb.toml"), "[export]\nout = \"bundles\"\n").unwrap();
    run_ssb(temp.path(), &["init", "frames", "--name", "hero"]);
    let art = temp.path().join("art");
    fs::create_dir_all(&art).unwrap();

    let output = run_ssb(&art, &["export", "../hero.json", "--no-archive"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(temp.path().join("bundles/hero/meta.json").is_file());
    assert!(!art.join("bundles").exists());
}

#[test]
fn test_project_exports_from_another_directory() {
    let temp = TempDir::new().unwrap();
    create_frames(&temp, 3);
    let init = run_ssb(temp.path(), &["init", "frames", "--name", "hero", "--cols", "3", "--rows", "1"]);
    assert!(init.status.success(), "stderr: {}", stderr(&init));

    let project: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(temp.path().join("hero.json")).unwrap()).unwrap();
    assert!(Path::new(project["source_folder"].as_str().unwrap()).is_absolute());
    assert!(Path::new(project["cells"][0][0].as_str().unwrap()).is_absolute());

    let elsewhere = temp.path().join("elsewhere");
    fs::create_dir_all(&elsewhere).unwrap();
    let output = run_ssb(&elsewhere, &["export", "../hero.json", "-o", "out", "--no-archive"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let meta: serde_json::Value = serde_json::from_str(
        &fs::read_to_string(elsewhere.join("out/hero/meta.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(meta["rows"][0]["frames"].as_array().unwrap().len(), 3);
}

#[test]
fn test_export_invalid_project() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("bad.json"), r#"{"sheet_name": "", "source_folder": "frames"}"#).unwrap();
    let output = run_ssb(temp.path(), &["export", "bad.json"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Sheet name is required"));
}

#[test]
fn test_play_unknown_row() {
    let temp = TempDir::new().unwrap();
    create_frames(&temp, 1);
    run_ssb(temp.path(), &["init", "frames", "--name", "hero", "--cols", "1", "--rows", "1"]);
    run_ssb(temp.path(), &["export", "hero.json", "-o", "out"]);

    let output = run_ssb(temp.path(), &["play", "out/hero", "--row", "jump"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("available: row_0"));
}
