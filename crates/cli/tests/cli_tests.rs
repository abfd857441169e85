//! CLI integration tests
use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;

const DATED_HTML: &str = "<html><body><p>The date is 5.5.2010</p></body></html>";
const UNDATED_HTML: &str = "<html><body><p>nothing to see here</p></body></html>";

fn tempora() -> Command {
    Command::cargo_bin("tempora").unwrap()
}

#[test]
fn test_stdin_input() {
    tempora()
        .arg("-")
        .write_stdin(DATED_HTML)
        .assert()
        .success()
        .stdout(predicate::str::contains("2010-05-05"));
}

#[test]
fn test_file_input() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(DATED_HTML.as_bytes()).unwrap();

    tempora()
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("2010-05-05"));
}

#[test]
fn test_no_date_found_exits_nonzero() {
    tempora()
        .arg("-")
        .write_stdin(UNDATED_HTML)
        .assert()
        .failure()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_custom_format() {
    tempora()
        .args(["-", "--format", "%d.%m.%Y"])
        .write_stdin(DATED_HTML)
        .assert()
        .success()
        .stdout(predicate::str::contains("05.05.2010"));
}

#[test]
fn test_invalid_format_is_an_error() {
    tempora()
        .args(["-", "--format", "plain"])
        .write_stdin(DATED_HTML)
        .assert()
        .failure()
        .stderr(predicate::str::contains("format"));
}

#[test]
fn test_json_output() {
    let output = tempora()
        .args(["-", "--json"])
        .write_stdin(DATED_HTML)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(value["date"], "2010-05-05");
    assert_eq!(value["original"], false);
}

#[test]
fn test_json_output_without_date() {
    let output = tempora()
        .args(["-", "--json"])
        .write_stdin(UNDATED_HTML)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert!(value["date"].is_null());
}

#[test]
fn test_url_flag_supplies_source_url() {
    tempora()
        .args(["-", "--url", "https://example.org/blog/2016/07/12/title", "--fast"])
        .write_stdin(UNDATED_HTML)
        .assert()
        .success()
        .stdout(predicate::str::contains("2016-07-12"));
}

#[test]
fn test_min_date_rejects_older_candidates() {
    tempora()
        .args(["-", "--min-date", "2011-01-01"])
        .write_stdin(DATED_HTML)
        .assert()
        .failure();
}

#[test]
fn test_malformed_bound_is_an_error() {
    tempora()
        .args(["-", "--min-date", "last tuesday"])
        .write_stdin(DATED_HTML)
        .assert()
        .failure()
        .stderr(predicate::str::contains("YYYY-MM-DD"));
}

#[test]
fn test_missing_file() {
    tempora().arg("/nonexistent/file.html").assert().failure();
}
