//! Integration tests for session persistence.

use std::fs;

use serde_json::{Value, json};
use tempfile::TempDir;

use backoffice::session::TOKEN_KEY;
use backoffice::{BackofficeError, FileSessionStore, Session, SessionStore};

fn read_json(path: &std::path::Path) -> Value {
    let text = fs::read_to_string(path).expect("Failed to read session file");
    serde_json::from_str(&text).expect("Session file is not JSON")
}

// =============================================================================
// FileSessionStore
// =============================================================================

#[test]
fn test_file_store_roundtrip() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("session.json");
    let store = FileSessionStore::new(&path);

    assert_eq!(store.load().unwrap(), None);
    store.save("tok-1").unwrap();
    assert_eq!(store.load().unwrap().as_deref(), Some("tok-1"));
    assert_eq!(read_json(&path), json!({ TOKEN_KEY: "tok-1" }));

    store.save("tok-2").unwrap();
    assert_eq!(store.load().unwrap().as_deref(), Some("tok-2"));

    store.clear().unwrap();
    assert_eq!(store.load().unwrap(), None);
}

#[test]
fn test_file_store_preserves_other_keys() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("session.json");
    fs::write(&path, r#"{"theme": "dark"}"#).unwrap();

    let store = FileSessionStore::new(&path);
    store.save("tok").unwrap();
    assert_eq!(read_json(&path), json!({ "theme": "dark", TOKEN_KEY: "tok" }));

    store.clear().unwrap();
    assert_eq!(read_json(&path), json!({ "theme": "dark" }));
}

#[test]
fn test_file_store_creates_parent_directories() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("nested").join("backoffice").join("session.json");

    let store = FileSessionStore::new(&path);
    store.save("tok").unwrap();
    assert!(path.exists());
    assert_eq!(store.path(), path.as_path());
}

#[test]
fn test_file_store_clear_missing_file() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let store = FileSessionStore::new(dir.path().join("absent.json"));

    store.clear().unwrap();
    assert!(!store.path().exists());
}

#[test]
fn test_file_store_corrupt_file() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("session.json");
    fs::write(&path, "not json").unwrap();

    let store = FileSessionStore::new(&path);
    assert!(matches!(store.load(), Err(BackofficeError::Persistence(_))));
}

#[test]
fn test_file_store_empty_token_is_logged_out() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("session.json");
    fs::write(&path, r#"{"admin_token": ""}"#).unwrap();

    assert_eq!(FileSessionStore::new(&path).load().unwrap(), None);
}

#[cfg(unix)]
#[test]
fn test_file_store_is_owner_only() {
    use std::os::unix::fs::PermissionsExt;

    let dir = TempDir::new().expect("Failed to create temp dir");
    let fresh = dir.path().join("fresh.json");
    FileSessionStore::new(&fresh).save("tok").unwrap();
    let mode = fs::metadata(&fresh).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);

    // A file left world-readable by something else is narrowed on save.
    let existing = dir.path().join("existing.json");
    fs::write(&existing, "{}").unwrap();
    fs::set_permissions(&existing, fs::Permissions::from_mode(0o644)).unwrap();
    FileSessionStore::new(&existing).save("tok").unwrap();
    let mode = fs::metadata(&existing).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
}

// =============================================================================
// Session
// =============================================================================

#[test]
fn test_session_lifecycle() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("session.json");
    let session = Session::from_file(&path);

    assert!(!session.is_authenticated());
    session.establish("abc").unwrap();
    assert!(session.is_authenticated());

    // A second session over the same file sees the token.
    let reopened = Session::from_file(&path);
    assert_eq!(reopened.token().unwrap().as_deref(), Some("abc"));

    reopened.invalidate().unwrap();
    assert!(!session.is_authenticated());
}

#[test]
fn test_session_unreadable_store_is_logged_out() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("session.json");
    fs::write(&path, "{").unwrap();

    let session = Session::from_file(&path);
    assert!(!session.is_authenticated());
    assert!(session.token().is_err());
}

#[test]
fn test_session_debug_hides_token() {
    let session = Session::in_memory();
    session.establish("secret-token").unwrap();
    let rendered = format!("{:?}", session);
    assert!(rendered.contains("authenticated: true"));
    assert!(!rendered.contains("secret-token"));
}
