//! Tests for dotenv loading behavior.
//!
//! Invariants / Assumptions:
//! - Tests serialize mutations to process-global state (cwd/env).
//! - Error messages must never contain secret values from `.env` files.

use std::fs;
use std::path::PathBuf;

use serial_test::serial;
use tempfile::TempDir;

use crate::loader::builder::ConfigLoader;
use crate::loader::error::ConfigError;

/// RAII guard for temporarily changing the current working directory.
struct CwdGuard {
    original_dir: PathBuf,
}

impl CwdGuard {
    fn new(temp_dir: &TempDir) -> Self {
        let original_dir = std::env::current_dir().expect("Failed to get current directory");
        std::env::set_current_dir(temp_dir.path()).expect("Failed to set current directory");
        Self { original_dir }
    }
}

impl Drop for CwdGuard {
    fn drop(&mut self) {
        let _ = std::env::set_current_dir(&self.original_dir);
    }
}

#[test]
#[serial]
fn test_missing_dotenv_is_ok() {
    let temp_dir = TempDir::new().unwrap();
    let _cwd = CwdGuard::new(&temp_dir);

    temp_env::with_var("DOTENV_DISABLED", None::<&str>, || {
        assert!(ConfigLoader::new().load_dotenv().is_ok());
    });
}

#[test]
#[serial]
fn test_valid_dotenv_populates_env() {
    let temp_dir = TempDir::new().unwrap();
    let _cwd = CwdGuard::new(&temp_dir);
    fs::write(temp_dir.path().join(".env"), "APICONN_DOTENV_PROBE=loaded\n").unwrap();

    temp_env::with_vars(
        [
            ("DOTENV_DISABLED", None::<&str>),
            ("APICONN_DOTENV_PROBE", None),
        ],
        || {
            assert!(ConfigLoader::new().load_dotenv().is_ok());
            assert_eq!(
                std::env::var("APICONN_DOTENV_PROBE").as_deref(),
                Ok("loaded")
            );
        },
    );
}

#[test]
#[serial]
fn test_invalid_dotenv_does_not_leak_secret() {
    let temp_dir = TempDir::new().unwrap();
    let _cwd = CwdGuard::new(&temp_dir);
    let secret_value = "hunter2-very-secret";
    fs::write(
        temp_dir.path().join(".env"),
        format!("APICONN_API_KEY={secret_value}\nINVALID_LINE_WITHOUT_EQUALS"),
    )
    .unwrap();

    temp_env::with_vars(
        [("DOTENV_DISABLED", None::<&str>), ("APICONN_API_KEY", None)],
        || match ConfigLoader::new().load_dotenv() {
            Err(err @ ConfigError::DotenvParse { .. }) => {
                assert!(!err.to_string().contains(secret_value));
            }
            Err(other) => panic!("Expected DotenvParse, got {other:?}"),
            Ok(_) => panic!("Expected invalid .env to fail"),
        },
    );
}

#[test]
#[serial]
fn test_dotenv_disabled_skips_invalid_file() {
    let temp_dir = TempDir::new().unwrap();
    let _cwd = CwdGuard::new(&temp_dir);
    fs::write(temp_dir.path().join(".env"), "INVALID_LINE_WITHOUT_EQUALS").unwrap();

    for value in ["1", "true"] {
        temp_env::with_var("DOTENV_DISABLED", Some(value), || {
            assert!(ConfigLoader::new().load_dotenv().is_ok());
        });
    }
}
