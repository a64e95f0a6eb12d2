use assert_cmd::prelude::*;
use std::fs;
use std::path::PathBuf;
use std::process::Command;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join("nal_tests").join(name);
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn runs_without_arguments() {
    let mut cmd = Command::cargo_bin("nal").unwrap();
    cmd.assert().success();
}

#[test]
fn compiles_and_runs_a_sample_program() {
    let dir = scratch_dir("add");
    let src = dir.join("add.nal");
    let img = dir.join("add.nac");
    fs::write(&src, "MOVLA 5\nMOVLB 3\nADDA\nOUTA\nHLT\n").unwrap();

    Command::cargo_bin("nal")
        .unwrap()
        .arg("compile")
        .arg(&src)
        .arg(&img)
        .assert()
        .success();

    // Operands ride through verbatim; a trailing separator is part of the format
    let image = fs::read_to_string(&img).unwrap();
    assert_eq!(image, "v2.0 raw\n11 5 12 3 21 03 00 ");

    Command::cargo_bin("nal")
        .unwrap()
        .args(["run", "--minimal"])
        .arg(&img)
        .assert()
        .success()
        .stdout("8\n");
}

#[test]
fn runs_source_directly() {
    let dir = scratch_dir("direct");
    let src = dir.join("out.nal");
    fs::write(&src, "OUTL 2a\nHLT\n").unwrap();

    Command::cargo_bin("nal")
        .unwrap()
        .args(["run", "--minimal"])
        .arg(&src)
        .assert()
        .success()
        .stdout("42\n");
}

#[test]
fn reports_unknown_mnemonic_without_writing_an_image() {
    let dir = scratch_dir("unknown");
    let src = dir.join("bad.nal");
    let img = dir.join("bad.nac");
    let _ = fs::remove_file(&img);
    fs::write(&src, "FOO\nHLT\n").unwrap();

    let output = Command::cargo_bin("nal")
        .unwrap()
        .arg("compile")
        .arg(&src)
        .arg(&img)
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("FOO"));
    assert!(!img.exists());
}

#[test]
fn check_accepts_a_valid_file() {
    let dir = scratch_dir("check");
    let src = dir.join("ok.nal");
    fs::write(&src, "MOVLA 1\nHLT\n").unwrap();

    Command::cargo_bin("nal")
        .unwrap()
        .arg("check")
        .arg(&src)
        .assert()
        .success();
}

#[test]
fn run_uses_a_custom_opcode_table() {
    let dir = scratch_dir("table");
    let src = dir.join("halt.nal");
    let table = dir.join("opcodes.json");
    fs::write(&src, "STOP\n").unwrap();
    fs::write(&table, r#"{"STOP": "00"}"#).unwrap();

    Command::cargo_bin("nal")
        .unwrap()
        .args(["run", "--minimal", "--table"])
        .arg(&table)
        .arg(&src)
        .assert()
        .success()
        .stdout("0\n");
}

#[test]
fn faulting_program_exits_with_failure() {
    let dir = scratch_dir("fault");
    let src = dir.join("overflow.nal");
    fs::write(&src, "MOVLA fa\nMOVLB a\nADDA\nHLT\n").unwrap();

    let output = Command::cargo_bin("nal")
        .unwrap()
        .arg("run")
        .arg(&src)
        .output()
        .unwrap();

    assert!(!output.status.success());
}
