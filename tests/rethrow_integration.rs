//! Integration tests for error contextualization against files on disk

use std::fmt;
use std::io::Write;
use std::path::Path;

use pretty_assertions::assert_eq;
use tempfile::NamedTempFile;

use pug_runtime::{rethrow, rethrow_with, RuntimeConfig, TemplateError, Thrown, Value};

const TEMPLATE: &str = "doctype html\nhtml\n  body\n    h1= title\n    p= user.name\n    footer\n    script\n  end";

#[derive(Debug)]
struct UndefinedVariable(&'static str);

impl fmt::Display for UndefinedVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} is not defined", self.0)
    }
}

impl std::error::Error for UndefinedVariable {}

fn template_file() -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Should create temp file");
    file.write_all(TEMPLATE.as_bytes()).expect("Should write template");
    file
}

fn unwrap_template(thrown: Thrown) -> TemplateError {
    match thrown {
        Thrown::Template(err) => err,
        Thrown::Value(v) => panic!("expected a template error, got value {v}"),
    }
}

#[test]
fn test_rethrow_reads_source_file() {
    let file = template_file();
    let result: Result<(), Thrown> = rethrow(
        Thrown::error(UndefinedVariable("user")),
        Some(file.path()),
        5,
        None,
    );
    let err = unwrap_template(result.unwrap_err());

    let expected = format!(
        "{}:5\n    3|   body\n    4|     h1= title\n  > 5|     p= user.name\n    6|     footer\n    7|     script\n    8|   end\n\nuser is not defined",
        file.path().display()
    );
    assert_eq!(err.message(), expected);
    assert_eq!(err.path(), Some(file.path()));
    assert_eq!(err.line(), Some(5));
    assert_eq!(err.detail(), "user is not defined");
    assert!(err.downcast_ref::<UndefinedVariable>().is_some());
}

#[test]
fn test_rethrow_prefers_supplied_source() {
    let result: Result<(), Thrown> = rethrow(
        TemplateError::new("bad"),
        Some(Path::new("does/not/exist.pug")),
        1,
        Some("only line"),
    );
    let err = unwrap_template(result.unwrap_err());
    assert_eq!(err.message(), "does/not/exist.pug:1\n  > 1| only line\n\nbad");
    assert_eq!(err.path(), Some(Path::new("does/not/exist.pug")));
}

#[test]
fn test_rethrow_unreadable_file_degrades_to_line_number() {
    let dir = tempfile::tempdir().expect("Should create temp dir");
    let missing = dir.path().join("missing.pug");
    let io_message = std::fs::read_to_string(&missing).unwrap_err().to_string();

    let result: Result<(), Thrown> =
        rethrow(TemplateError::new("boom"), Some(&missing), 3, None);
    let err = unwrap_template(result.unwrap_err());

    assert_eq!(
        err.message(),
        format!(
            "boom - could not read from {} ({}) on line 3",
            missing.display(),
            io_message
        )
    );
    assert_eq!(err.path(), None);
    assert_eq!(err.line(), Some(3));
}

#[test]
fn test_rethrow_without_file_access_skips_read() {
    let file = template_file();
    let config = RuntimeConfig::new().with_read_sources(false);
    let result: Result<(), Thrown> =
        rethrow_with(&config, TemplateError::new("boom"), Some(file.path()), 2, None);
    assert_eq!(unwrap_template(result.unwrap_err()).message(), "boom on line 2");
}

#[test]
fn test_rethrow_plain_value_is_untouched() {
    let file = template_file();
    let thrown = Value::from(vec!["not", "an", "error"]);
    let result: Result<(), Thrown> = rethrow(thrown.clone(), Some(file.path()), 2, None);
    match result.unwrap_err() {
        Thrown::Value(v) => assert_eq!(v, thrown),
        Thrown::Template(e) => panic!("value was wrapped: {e}"),
    }
}

#[test]
fn test_report_after_rethrow() {
    let file = template_file();
    let result: Result<(), Thrown> =
        rethrow(TemplateError::new("title is missing"), Some(file.path()), 4, None);
    let err = unwrap_template(result.unwrap_err());
    let report = err.report(TEMPLATE).expect("Should render report");
    assert!(report.contains("title is missing"));
    assert!(report.contains("h1= title"));
}
