use common::persist::load_index;
use common::{PageDir, PageRecord};
use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::tempdir;

fn indexer(args: &[&Path]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_indexer")).args(args).output().unwrap()
}

fn indextest(args: &[&Path]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_indextest")).args(args).output().unwrap()
}

fn crawl(dir: &Path) -> PageDir {
    let pages = PageDir::new(dir);
    pages.init().unwrap();
    pages.save(&PageRecord::new("http://example.com/1", 0, "<p>Tiny search engine</p>"), 1).unwrap();
    pages.save(&PageRecord::new("http://example.com/2", 1, "<p>search again</p>"), 2).unwrap();
    pages
}

#[test]
fn indexer_builds_an_index_file() {
    let dir = tempdir().unwrap();
    let pages_dir = dir.path().join("pages");
    fs::create_dir(&pages_dir).unwrap();
    crawl(&pages_dir);
    let index_file = dir.path().join("index");
    let out = indexer(&[&pages_dir, &index_file]);
    assert_eq!(out.status.code(), Some(0), "{}", String::from_utf8_lossy(&out.stderr));
    let index = load_index(&index_file).unwrap();
    assert_eq!(index.get("search").map(|c| (c.get(1), c.get(2))), Some((1, 1)));
    assert!(index.contains("tiny"));
}

#[test]
fn indexer_wrong_argument_count_exits_1() {
    let dir = tempdir().unwrap();
    assert_eq!(indexer(&[]).status.code(), Some(1));
    assert_eq!(indexer(&[dir.path()]).status.code(), Some(1));
    let extra = dir.path().join("x");
    assert_eq!(indexer(&[dir.path(), &extra, &extra]).status.code(), Some(1));
}

#[test]
fn indexer_without_marker_exits_2() {
    let dir = tempdir().unwrap();
    let index_file = dir.path().join("index");
    let out = indexer(&[dir.path(), &index_file]);
    assert_eq!(out.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&out.stderr).contains(".crawler"));
}

#[test]
fn indexer_with_uncreatable_output_exits_2() {
    let dir = tempdir().unwrap();
    crawl(dir.path());
    let index_file = dir.path().join("no/such/dir/index");
    assert_eq!(indexer(&[dir.path(), &index_file]).status.code(), Some(2));
}

#[test]
fn indextest_rewrites_an_equal_index() {
    let dir = tempdir().unwrap();
    let old = dir.path().join("old.index");
    let new = dir.path().join("new.index");
    fs::write(&old, "search 1 1 2 1 \ntiny 1 1 \nengine 1 1 \n").unwrap();
    let out = indextest(&[&old, &new]);
    assert_eq!(out.status.code(), Some(0), "{}", String::from_utf8_lossy(&out.stderr));
    assert_eq!(load_index(&new).unwrap(), load_index(&old).unwrap());
}

#[test]
fn indextest_wrong_argument_count_exits_1() {
    let dir = tempdir().unwrap();
    assert_eq!(indextest(&[dir.path()]).status.code(), Some(1));
}

#[test]
fn indextest_bad_inputs_exit_2() {
    let dir = tempdir().unwrap();
    let new = dir.path().join("new.index");
    assert_eq!(indextest(&[&dir.path().join("missing"), &new]).status.code(), Some(2));

    let malformed = dir.path().join("bad.index");
    fs::write(&malformed, "word 1 \n").unwrap();
    assert_eq!(indextest(&[&malformed, &new]).status.code(), Some(2));

    let good = dir.path().join("good.index");
    fs::write(&good, "word 1 1 \n").unwrap();
    let unwritable = dir.path().join("no/such/dir/new.index");
    assert_eq!(indextest(&[&good, &unwritable]).status.code(), Some(2));
}
