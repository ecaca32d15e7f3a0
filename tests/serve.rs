use std::io::Cursor;

use infix_calc::serve;
use pretty_assertions::assert_eq;

fn session(input: &str) -> String {
    let mut out = Vec::new();
    serve(Cursor::new(input), &mut out, "q", "ERROR").unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn quit_token_ends_the_session() {
    assert_eq!(session("1+2\nq\n3\n"), "1 2 +\n3\n");
}

#[test]
fn quit_token_must_be_the_whole_line() {
    assert_eq!(session("q \nquit\n2*3\n"), "ERROR\nERROR\n2 3 *\n6\n");
}

#[test]
fn failing_line_prints_only_the_marker() {
    assert_eq!(session("5/0\n(1+2\na+1\n4\n"), "ERROR\nERROR\nERROR\n4\n4\n");
}

#[test]
fn crlf_lines() {
    assert_eq!(session("2^3^2\r\n-2^2\r\n"), "2 3 2 ^ ^\n512\n2 2 ^ ~\n-4\n");
}

#[test]
fn eof_ends_the_session() {
    assert_eq!(session(""), "");
    assert_eq!(session("007+1"), "007 1 +\n8\n");
}

#[test]
fn long_line_does_not_end_the_session() {
    let input = format!("1{}\n1+1\n", "+1".repeat(10_000));
    assert_eq!(session(&input), "ERROR\n1 1 +\n2\n");
}

#[test]
fn custom_quit_and_marker() {
    let mut out = Vec::new();
    serve(Cursor::new("1/0\nexit\n1\n"), &mut out, "exit", "nope").unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "nope\n");
}
