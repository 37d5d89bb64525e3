use std::fs;

use assert_cmd::Command;

const BIN: &str = "concat-csv";

#[test]
fn test_empty_args() {
    let mut cmd = Command::cargo_bin(BIN).unwrap();
    cmd.assert().failure();
}

#[test]
fn test_help() {
    let mut cmd = Command::cargo_bin(BIN).unwrap();
    cmd.arg("-h").assert().success();
}

#[test]
fn test_not_a_dir() {
    let mut cmd = Command::cargo_bin(BIN).unwrap();
    cmd.arg("/nonexistent").assert().failure();
}

#[test]
fn test_default_output() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a.csv"), "x,y\n1,2\n").unwrap();
    fs::write(dir.path().join("b.csv"), "x,y\n3,4\n").unwrap();

    let mut cmd = Command::cargo_bin(BIN).unwrap();
    cmd.arg(dir.path()).assert().success();

    let s = fs::read_to_string(dir.path().join("combined.csv")).unwrap();
    assert_eq!("x,y\n1,2\n3,4\n", s);

    // Running again must not pick up the previous output.
    let mut cmd = Command::cargo_bin(BIN).unwrap();
    cmd.arg(dir.path()).assert().success();

    let s = fs::read_to_string(dir.path().join("combined.csv")).unwrap();
    assert_eq!("x,y\n1,2\n3,4\n", s);
}

#[test]
fn test_output_opt() {
    let dir = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a.csv"), "x,y\n1,2\n").unwrap();
    let fname = out.path().join("all.csv");

    let mut cmd = Command::cargo_bin(BIN).unwrap();
    cmd.arg("-o").arg(&fname).arg(dir.path()).assert().success();

    assert_eq!("x,y\n1,2\n", fs::read_to_string(&fname).unwrap());
}
