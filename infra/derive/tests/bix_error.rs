use std::borrow::Cow;

mod demo {
    use std::borrow::Cow;

    #[bix_derive::bix_error]
    pub enum DemoError {
        #[error("IO error{}: {source}", format_context(.context))]
        Io { source: std::io::Error, context: Option<Cow<'static, str>> },

        #[error("Tag {tag} already exists{}", format_context(.context))]
        Duplicate { tag: String, context: Option<Cow<'static, str>> },

        #[error("Internal error{}: {message}", format_context(.context))]
        Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
    }
}

use demo::{DemoError, DemoErrorExt};

fn failing_io() -> Result<(), std::io::Error> {
    Err(std::io::Error::new(std::io::ErrorKind::NotFound, "missing"))
}

#[test]
fn source_errors_convert_with_question_mark() {
    fn run() -> Result<(), DemoError> {
        failing_io()?;
        Ok(())
    }

    let err = run().unwrap_err();
    assert!(matches!(err, DemoError::Io { context: None, .. }));
    assert_eq!(err.to_string(), "IO error: missing");
}

#[test]
fn context_is_attached_to_source_results() {
    let err = failing_io().context("reading package.json").unwrap_err();
    assert_eq!(err.to_string(), "IO error (reading package.json): missing");
}

#[test]
fn context_overrides_on_own_results() {
    let result: Result<(), DemoError> =
        Err(DemoError::Duplicate { tag: "1.0.0".to_owned(), context: None });
    let err = result.context("us registry").unwrap_err();
    assert_eq!(err.to_string(), "Tag 1.0.0 already exists (us registry)");
}

#[test]
fn strings_become_internal_errors() {
    let from_static: DemoError = "boom".into();
    let from_owned: DemoError = String::from("bang").into();

    assert!(
        matches!(from_static, DemoError::Internal { message: Cow::Borrowed("boom"), .. })
    );
    assert_eq!(from_owned.to_string(), "Internal error: bang");
}
