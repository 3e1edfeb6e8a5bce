//! Edge cases: line endings, rewrites, and the trim asymmetry

mod common;

use common::Scratch;
use linefile::{
    append_delimited_text, append_line, append_lines, read_all_as_lines, read_all_as_string,
    read_first_line, TextFiles, TrimPolicy,
};

#[test]
fn test_crlf_file_is_rewritten_with_lf() {
    let scratch = Scratch::new();
    let path = scratch.file("windows.txt", "a\r\nb\r\n");

    assert!(append_lines(&path, ["c"]));
    assert_eq!(scratch.content("windows.txt"), "a\nb\nc\n");
}

#[test]
fn test_lone_carriage_returns_end_lines() {
    let scratch = Scratch::new();
    let path = scratch.file("classic-mac.txt", "a\rb\rc");

    assert_eq!(read_all_as_lines(&path), vec!["a", "b", "c"]);
    assert_eq!(read_first_line(&path), "a");

    assert!(append_lines(&path, ["d"]));
    assert_eq!(scratch.content("classic-mac.txt"), "a\nb\nc\nd\n");
}

#[test]
fn test_last_line_without_newline_is_read() {
    let scratch = Scratch::new();
    let path = scratch.file("tail.txt", "a\nb");
    assert_eq!(read_all_as_lines(&path), vec!["a", "b"]);
}

#[test]
fn test_single_newline_file_has_one_empty_line() {
    let scratch = Scratch::new();
    let path = scratch.file("newline.txt", "\n");

    assert_eq!(read_all_as_lines(&path), vec![""]);
    assert_eq!(read_first_line(&path), "");
    assert_eq!(read_all_as_string(&path), "");
}

#[test]
fn test_trim_asymmetry_between_create_and_existing() {
    let scratch = Scratch::new();
    let created = scratch.path("created.txt");
    let existing = scratch.file("existing.txt", "");

    assert!(append_delimited_text(&created, "x , y", ","));
    assert!(append_delimited_text(&existing, "x , y", ","));

    assert_eq!(read_all_as_lines(&created), vec!["x", "y"]);
    assert_eq!(read_all_as_lines(&existing), vec!["x ", " y"]);
}

#[test]
fn test_trim_policy_always_unifies_branches() {
    let scratch = Scratch::new();
    let existing = scratch.file("existing.txt", "");
    let files = TextFiles::default().with_trim_policy(TrimPolicy::Always);

    assert!(files.append_delimited_text(&existing, "x , y", ","));
    assert_eq!(read_all_as_lines(&existing), vec!["x", "y"]);
}

#[test]
fn test_whole_text_is_trimmed_before_splitting() {
    let scratch = Scratch::new();
    let path = scratch.file("trimmed.txt", "");

    assert!(append_delimited_text(&path, "   a,b   ", ","));
    assert_eq!(scratch.content("trimmed.txt"), "a\nb\n");
}

#[test]
fn test_append_line_with_embedded_newline() {
    let scratch = Scratch::new();
    let path = scratch.path("embedded.txt");

    assert!(append_line(&path, "one\ntwo"));
    assert_eq!(read_all_as_lines(&path), vec!["one", "two"]);
}

#[test]
fn test_many_appends_keep_order() {
    let scratch = Scratch::new();
    let path = scratch.path("order.txt");

    for i in 0..20 {
        assert!(append_lines(&path, [format!("line {}", i)]));
    }

    let lines = read_all_as_lines(&path);
    assert_eq!(lines.len(), 20);
    assert_eq!(lines[0], "line 0");
    assert_eq!(lines[19], "line 19");
}
