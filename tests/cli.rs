//! Tests for the `protospec` binary: argument handling, output and exit codes.

use std::io::Write;
use std::process::{Command, Output};

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_protospec"))
        .args(args)
        .output()
        .expect("run protospec")
}

fn dsl_file(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(contents.as_bytes()).expect("write dsl");
    file
}

#[test]
fn missing_argument_prints_usage() {
    let out = run(&[]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stdout).starts_with("Usage: "));
}

#[test]
fn extra_arguments_print_usage() {
    let out = run(&["a.dsl", "b.dsl"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stdout).contains("<file>"));
}

#[test]
fn compiles_enums_to_stdout() {
    let file = dsl_file("// test\nenum Foo(u8) { A, B = 5, C }\n");
    let path = file.path().to_str().expect("utf-8 path");
    let out = run(&[path]);
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("#[repr(u8)]"));
    assert!(stdout.contains("pub enum Foo {\n    A,\n    B = 5,\n    C,\n}\n"));
}

#[test]
fn parse_error_reports_and_prints_nothing() {
    let file = dsl_file("enum Good(u8) { A }\nenum Foo(u12) {}\n");
    let path = file.path().to_str().expect("utf-8 path");
    let out = run(&[path]);
    assert_eq!(out.status.code(), Some(1));
    assert!(out.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("u12"), "stderr: {}", stderr);
    assert!(stderr.contains(path), "stderr: {}", stderr);
}

#[test]
fn unreadable_file_is_an_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let missing = dir.path().join("missing.dsl");
    let out = run(&[missing.to_str().expect("utf-8 path")]);
    assert_eq!(out.status.code(), Some(1));
    assert!(out.stdout.is_empty());
    assert!(String::from_utf8_lossy(&out.stderr).contains("read failed"));
}

#[test]
fn unrepresentable_enum_is_an_error() {
    let file = dsl_file("enum E(u8) { A = 300, B = -1 }\nenum D(u8) { A = 1, B = 0, C }\n");
    let path = file.path().to_str().expect("utf-8 path");
    let out = run(&[path]);
    assert_eq!(out.status.code(), Some(1));
    assert!(out.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("emit failed"), "stderr: {}", stderr);
    assert!(stderr.contains("value 300 of 'A' does not fit in u8"), "stderr: {}", stderr);
}

#[test]
fn duplicate_enum_value_is_an_error() {
    let file = dsl_file("enum D(u8) { A = 1, B = 0, C }\n");
    let out = run(&[file.path().to_str().expect("utf-8 path")]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("'C' repeats value 1"));
}

#[test]
fn empty_enum_compiles_without_repr() {
    let file = dsl_file("enum Empty(u8) {}\n");
    let out = run(&[file.path().to_str().expect("utf-8 path")]);
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(!stdout.contains("#[repr"));
    assert!(stdout.contains("pub enum Empty {\n}\n"));
}

#[test]
fn packets_are_summarized() {
    let file = dsl_file("packet KeepAlive(serverbound, Play, 0x1a) { i64 id }\n");
    let out = run(&[file.path().to_str().expect("utf-8 path")]);
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    assert_eq!(
        String::from_utf8_lossy(&out.stdout),
        "// packet KeepAlive (serverbound, Play, 0x1a)\n//    id: i64\n"
    );
}
