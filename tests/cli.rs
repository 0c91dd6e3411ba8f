extern crate assert_cmd;
extern crate predicates;
extern crate tempfile;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

#[test]
fn rejects_a_malformed_size() {
    Command::cargo_bin("mandelscan")
        .unwrap()
        .args(&["--output", "frame.pnm", "--size", "wide"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Could not parse output image size"));
}

#[test]
fn rejects_an_unknown_command() {
    Command::cargo_bin("mandelscan")
        .unwrap()
        .args(&["--output", "frame.pnm", "--command", "sideways"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown command"));
}

#[test]
fn rejects_an_iteration_budget_out_of_range() {
    Command::cargo_bin("mandelscan")
        .unwrap()
        .args(&["--output", "frame.pnm", "--iterations", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Iteration count"));
}

#[test]
fn refuses_a_zero_area_frame() {
    Command::cargo_bin("mandelscan")
        .unwrap()
        .args(&["--output", "frame.pnm", "--size", "0x0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("must be non-zero"));
}

#[test]
fn renders_a_small_frame_to_disk() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("frame.pnm");
    Command::cargo_bin("mandelscan")
        .unwrap()
        .args(&[
            "--output",
            out.to_str().unwrap(),
            "--size",
            "16x12",
            "--iterations",
            "30",
            "--command",
            "zoom-in",
            "--command",
            "move-left",
        ])
        .assert()
        .success();
    let written = std::fs::metadata(&out).unwrap().len();
    // Binary PPM: header plus 16 * 12 * 3 bytes of pixels.
    assert!(written >= 16 * 12 * 3);
}
