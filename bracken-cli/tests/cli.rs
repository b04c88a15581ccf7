//! End-to-end tests for the `bracken` binary.

use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;

fn write_source(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("cannot create temp file");
    file.write_all(content.as_bytes()).expect("cannot write temp file");
    file
}

#[test]
fn test_convert_to_html_on_stdout() {
    let source = write_source("\\s {bold}");
    Command::cargo_bin("bracken")
        .expect("binary not built")
        .arg(source.path())
        .args(["--format", "html", "--no-wrap"])
        .assert()
        .success()
        .stdout("<b>bold</b>");
}

#[test]
fn test_convert_to_output_file() {
    let source = write_source("\\e {alas}");
    let output = tempfile::NamedTempFile::new().expect("cannot create temp file");
    Command::cargo_bin("bracken")
        .expect("binary not built")
        .arg(source.path())
        .args(["--format", "markdown", "--no-wrap"])
        .arg("--output")
        .arg(output.path())
        .assert()
        .success();
    let written = std::fs::read_to_string(output.path()).expect("cannot read output");
    assert_eq!(written, "*alas*");
}

#[test]
fn test_list_formats() {
    Command::cargo_bin("bracken")
        .expect("binary not built")
        .arg("--list-formats")
        .assert()
        .success()
        .stdout(predicate::str::contains("html").and(predicate::str::contains("rtf")));
}

#[test]
fn test_unknown_tag_fails() {
    let source = write_source("\\definitelyNotATag {x}");
    Command::cargo_bin("bracken")
        .expect("binary not built")
        .arg(source.path())
        .args(["--format", "html", "--no-wrap"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown tag \\definitelyNotATag"));
}

#[test]
fn test_dump_lexemes() {
    let source = write_source("\\s {bold}");
    Command::cargo_bin("bracken")
        .expect("binary not built")
        .arg(source.path())
        .args(["--dump", "lexemes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("tag_name").and(predicate::str::contains("param_begin")));
}
