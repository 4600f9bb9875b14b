use std::fs;
use std::path::PathBuf;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn bookcheck() -> Command {
    let mut cmd: Command = cargo_bin_cmd!("bookcheck").into();
    cmd.env_remove("OPENAI_API_KEY");
    cmd.env("RUST_LOG", "off");
    cmd
}

/// Write `content` to a file inside a fresh tempdir. The guard must be kept alive.
fn reply_file(name: &str, content: &str) -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join(name);
    fs::write(&path, content).unwrap();
    (tmp, path)
}

const FENCED_REPLY: &str = "Here you go:\n```json\n[\n  {\"title\": \"The Wild Robot\", \"author\": \"Peter Brown\", \"series\": \"The Wild Robot\", \"confidence\": 0.92},\n  {\"title\": \"Hatchet\", \"confidence\": 0.5, \"notes\": \"spine partially hidden\"}\n]\n```\n";

// --- Binary startup ---

#[test]
fn binary_runs() {
    bookcheck()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("bookcheck"));
}

#[test]
fn no_subcommand_fails() {
    bookcheck().assert().failure();
}

// --- Parse ---

#[test]
fn parse_fenced_reply() {
    let (_tmp, path) = reply_file("reply.txt", FENCED_REPLY);

    bookcheck()
        .arg("parse")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Identified 2 book(s)"))
        .stdout(predicate::str::contains("The Wild Robot"))
        .stdout(predicate::str::contains("Confidence: 92%"));
}

#[test]
fn parse_json_output() {
    let (_tmp, path) = reply_file("reply.txt", FENCED_REPLY);

    let output = bookcheck()
        .args(["parse", "--json"])
        .arg(&path)
        .output()
        .unwrap();
    assert!(output.status.success());

    let books: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let books = books.as_array().unwrap();
    assert_eq!(books.len(), 2);
    assert_eq!(books[0]["author"], "Peter Brown");
    assert!(books[1]["author"].is_null());
}

#[test]
fn parse_from_stdin() {
    bookcheck()
        .args(["parse", "-"])
        .write_stdin(r#"[{"title": "Dune", "confidence": 1.0}]"#)
        .assert()
        .success()
        .stdout(predicate::str::contains("Title:      Dune"));
}

#[test]
fn parse_missing_title_fails() {
    let (_tmp, path) = reply_file("reply.txt", r#"[{"author": "Anon", "confidence": 0.3}]"#);

    bookcheck()
        .arg("parse")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing required field `title`"));
}

#[test]
fn parse_confidence_out_of_range_fails() {
    let (_tmp, path) = reply_file("reply.txt", r#"[{"title": "Dune", "confidence": 1.5}]"#);

    bookcheck()
        .arg("parse")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("outside [0, 1]"));
}

#[test]
fn parse_missing_file_fails() {
    bookcheck()
        .args(["parse", "/nonexistent/reply.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read"));
}

// --- Identify ---

#[test]
fn identify_without_api_key_fails() {
    let (_tmp, path) = reply_file("shelf.jpg", "not really a jpeg");

    bookcheck()
        .arg("identify")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("OPENAI_API_KEY"));
}

#[test]
fn identify_unsupported_format_fails() {
    let (_tmp, path) = reply_file("shelf.bmp", "BM");

    bookcheck()
        .env("OPENAI_API_KEY", "test-key")
        .arg("identify")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported image format"));
}

// --- Search ---

#[test]
fn search_requires_a_query() {
    bookcheck().arg("search").assert().failure();
}

#[test]
fn search_rejects_two_queries() {
    bookcheck()
        .args(["search", "--title", "Dune", "--author", "Herbert"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn search_rejects_bad_page_size_setting() {
    bookcheck()
        .env("BOOKCHECK_PAGE_SIZE", "lots")
        .args(["search", "--title", "Dune"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("BOOKCHECK_PAGE_SIZE"));
}
