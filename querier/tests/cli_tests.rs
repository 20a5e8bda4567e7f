use common::{PageDir, PageRecord};
use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};
use tempfile::{tempdir, TempDir};

fn querier(args: &[&Path], input: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_querier"))
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    // The process may exit before reading stdin.
    let _ = child.stdin.take().unwrap().write_all(input.as_bytes());
    child.wait_with_output().unwrap()
}

fn corpus() -> TempDir {
    let dir = tempdir().unwrap();
    let pages = PageDir::new(dir.path());
    pages.init().unwrap();
    pages.save(&PageRecord::new("http://example.com/1", 0, "<p>search</p>"), 1).unwrap();
    pages.save(&PageRecord::new("http://example.com/2", 1, "<p>search engine</p>"), 2).unwrap();
    fs::write(dir.path().join("index"), "search 1 1 2 3 \nengine 2 1 \n").unwrap();
    dir
}

#[test]
fn answers_queries_from_stdin() {
    let dir = corpus();
    let index = dir.path().join("index");
    let out = querier(&[dir.path(), &index, Path::new("--no-prompt")], "SEARCH and engine\nor\n");
    assert_eq!(out.status.code(), Some(0), "{}", String::from_utf8_lossy(&out.stderr));
    assert_eq!(
        String::from_utf8(out.stdout).unwrap(),
        "Query: search and engine\nScore:1  DocID:2  URL:http://example.com/2\nBad Query\n"
    );
}

#[test]
fn wrong_argument_count_exits_1() {
    let dir = corpus();
    assert_eq!(querier(&[dir.path()], "").status.code(), Some(1));
}

#[test]
fn missing_marker_exits_2() {
    let dir = corpus();
    fs::remove_file(dir.path().join(".crawler")).unwrap();
    let index = dir.path().join("index");
    assert_eq!(querier(&[dir.path(), &index], "").status.code(), Some(2));
}

#[test]
fn unreadable_or_malformed_index_exits_2() {
    let dir = corpus();
    assert_eq!(querier(&[dir.path(), &dir.path().join("missing")], "").status.code(), Some(2));
    let bad = dir.path().join("bad.index");
    fs::write(&bad, "search 1 one \n").unwrap();
    assert_eq!(querier(&[dir.path(), &bad], "").status.code(), Some(2));
}

#[test]
fn missing_page_during_ranking_exits_3() {
    let dir = corpus();
    fs::remove_file(dir.path().join("2")).unwrap();
    let index = dir.path().join("index");
    assert_eq!(querier(&[dir.path(), &index, Path::new("--no-prompt")], "engine\n").status.code(), Some(3));
}
