//! Integration tests for Error types
//!
//! Tests error construction, display, context, and error kinds.

use vardump_foundation::{Error, ErrorKind, Handle};

#[test]
fn not_configured_names_component() {
    let err = Error::not_configured("EventCollector");
    assert!(matches!(err.kind, ErrorKind::NotConfigured { .. }));
    assert!(format!("{err}").contains("EventCollector"));
}

#[test]
fn serialization_message() {
    let err = Error::serialization("bad float");
    assert!(matches!(err.kind, ErrorKind::Serialization(_)));
    assert!(format!("{err}").contains("bad float"));
}

#[test]
fn internal_message() {
    let err = Error::internal("target busy");
    assert!(format!("{err}").contains("target busy"));
}

#[test]
fn context_is_kept() {
    let err = Error::closed_handle().with_context("writing log");
    assert_eq!(err.context.as_deref(), Some("writing log"));
}

#[test]
fn closed_handle_io_is_an_error() {
    let h = Handle::memory(b"abc".to_vec(), "rb");
    h.close();
    let mut buf = [0u8; 3];
    let err = h.read(&mut buf).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::ClosedHandle));
}

#[test]
fn unknown_mode_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let err = Handle::open(dir.path().join("f"), "rw").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::InvalidMode(_)));
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Handle::open(dir.path().join("missing"), "r").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Io(_)));
}
