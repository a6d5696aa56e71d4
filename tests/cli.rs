//! End-to-end tests for the `mailbody` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;

fn mailbody() -> Command {
    let mut cmd = Command::cargo_bin("mailbody").unwrap();
    cmd.env_remove("MAILBODY_FORMAT").env_remove("RUST_LOG");
    cmd
}

fn temp_file(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("mailbody-{}-{name}", std::process::id()));
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn render_markdown_document() {
    mailbody()
        .args(["render", "--format", "md"])
        .write_stdin("# Hi\n\n**there**")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("<!DOCTYPE html>"))
        .stdout(predicate::str::contains("<h1>Hi</h1>"))
        .stdout(predicate::str::contains("<p><strong>there</strong></p>"));
}

#[test]
fn render_plain_fragment() {
    mailbody()
        .args(["render", "--fragment"])
        .write_stdin("a & b\n\n<c>")
        .assert()
        .success()
        .stdout("<p>a &amp; b</p>\n<p>&lt;c&gt;</p>\n");
}

#[test]
fn format_comes_from_environment() {
    mailbody()
        .env("MAILBODY_FORMAT", "markdown")
        .args(["render", "--fragment"])
        .write_stdin("- x")
        .assert()
        .success()
        .stdout("<ul>\n<li>x</li>\n</ul>\n");
}

#[test]
fn unknown_format_means_plain_text() {
    mailbody()
        .args(["render", "--fragment", "--format", "rtf"])
        .write_stdin("**x**")
        .assert()
        .success()
        .stdout("<p>**x**</p>\n");
}

#[test]
fn strict_render_fails_on_deep_quotes() {
    mailbody()
        .args(["render", "-f", "md", "--strict", "--max-quote-depth", "1"])
        .write_stdin("> > deep")
        .assert()
        .failure()
        .stderr(predicate::str::contains("nesting exceeds the limit of 1"));
}

#[test]
fn lenient_render_flattens_deep_quotes() {
    mailbody()
        .args(["render", "-f", "md", "--fragment", "--max-quote-depth", "1"])
        .write_stdin("> > deep")
        .assert()
        .success()
        .stdout("<blockquote>\n<p>> deep</p>\n</blockquote>\n");
}

#[test]
fn text_reduces_html() {
    mailbody()
        .arg("text")
        .write_stdin("<p>Tom &amp; Jerry</p>\n\n\n<p>zero\u{200B}width</p>")
        .assert()
        .success()
        .stdout("Tom & Jerry\n\nzerowidth\n");
}

#[test]
fn extract_prints_body_content() {
    mailbody()
        .args(["extract", "-"])
        .write_stdin("<html><BODY id=\"b\"><p>inside</p></BODY></html>")
        .assert()
        .success()
        .stdout("<p>inside</p>\n");
}

#[test]
fn forward_splices_above_original() {
    let original = temp_file("original.html", "<html><body><p>first message</p></body></html>");
    let out = std::env::temp_dir().join(format!("mailbody-{}-forward-out.html", std::process::id()));

    mailbody()
        .args(["forward", "--format", "md", "--original"])
        .arg(&original)
        .arg("-o")
        .arg(&out)
        .write_stdin("*see below*")
        .assert()
        .success()
        .stdout("");

    let doc = fs::read_to_string(&out).unwrap();
    assert!(doc.contains("<p><em>see below</em></p>\n\n<hr>\n<p>first message</p></body>"));
    fs::remove_file(original).ok();
    fs::remove_file(out).ok();
}

#[test]
fn missing_input_reports_path() {
    mailbody()
        .args(["text", "/definitely/not/here.html"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("reading /definitely/not/here.html"));
}
