//! Environment overrides. Kept in their own test binary so the process-wide
//! variables never leak into the file-based config tests.

use std::sync::{Mutex, MutexGuard};

use distill_core::config::{ConfigError, DEFAULT_ADJACENT_RATING, DEFAULT_LINE_BREAK_RATING};
use distill_core::Config;

const VARS: [&str; 6] = [
    "DISTILL_MERGE_LINE_COMMENTS",
    "DISTILL_DROP_COMMENTED_CODE",
    "DISTILL_ADJACENT_RATING",
    "DISTILL_LINE_BREAK_RATING",
    "DISTILL_VOID_TYPE_NAME",
    "XDG_CONFIG_HOME",
];

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Holds the environment lock and clears every override on drop.
struct EnvGuard {
    _lock: MutexGuard<'static, ()>,
    _config_home: tempfile::TempDir,
}

impl EnvGuard {
    fn new(vars: &[(&str, &str)]) -> Self {
        let lock = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        for var in VARS {
            std::env::remove_var(var);
        }
        // Keep `load()` away from a real user config.
        let config_home = tempfile::tempdir().unwrap();
        std::env::set_var("XDG_CONFIG_HOME", config_home.path());
        for (key, value) in vars {
            std::env::set_var(key, value);
        }
        Self { _lock: lock, _config_home: config_home }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for var in VARS {
            std::env::remove_var(var);
        }
    }
}

#[test]
fn test_env_overrides_file_values() {
    let _env = EnvGuard::new(&[("DISTILL_ADJACENT_RATING", "6"), ("DISTILL_VOID_TYPE_NAME", "Unit")]);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("distill.toml");
    std::fs::write(&path, "[association]\nadjacent_rating = 5\n\n[classification]\nvoid_type_name = \"Void\"\n").unwrap();

    let config = Config::from_file(&path).unwrap();
    assert_eq!(config.association.adjacent_rating, 6);
    assert_eq!(config.classification.void_type_name, "Unit");
}

#[test]
fn test_load_applies_env_overrides_to_defaults() {
    let _env = EnvGuard::new(&[
        ("DISTILL_MERGE_LINE_COMMENTS", "false"),
        ("DISTILL_DROP_COMMENTED_CODE", "false"),
        ("DISTILL_LINE_BREAK_RATING", "3"),
    ]);

    let config = Config::load().unwrap();
    assert!(!config.comments.merge_line_comments);
    assert!(!config.comments.drop_commented_code);
    assert_eq!(config.association.adjacent_rating, DEFAULT_ADJACENT_RATING);
    assert_eq!(config.association.line_break_rating, 3);
}

#[test]
fn test_load_validates_overridden_defaults() {
    let _env = EnvGuard::new(&[("DISTILL_LINE_BREAK_RATING", "9")]);
    assert!(matches!(Config::load(), Err(ConfigError::Invalid(_))));
}

#[test]
fn test_unparsable_override_is_ignored() {
    let _env = EnvGuard::new(&[("DISTILL_ADJACENT_RATING", "lots"), ("DISTILL_MERGE_LINE_COMMENTS", "maybe")]);

    let config = Config::load().unwrap();
    assert_eq!(config.association.adjacent_rating, DEFAULT_ADJACENT_RATING);
    assert_eq!(config.association.line_break_rating, DEFAULT_LINE_BREAK_RATING);
    assert!(config.comments.merge_line_comments);
}

// `dirs` honours XDG_CONFIG_HOME on Linux only.
#[cfg(target_os = "linux")]
#[test]
fn test_load_reads_user_config() {
    let _env = EnvGuard::new(&[]);
    let home = std::env::var("XDG_CONFIG_HOME").unwrap();
    let dir = std::path::Path::new(&home).join("distill");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("config.toml"), "[classification]\nvoid_type_name = \"Nothing\"\n").unwrap();

    let config = Config::load().unwrap();
    assert_eq!(config.classification.void_type_name, "Nothing");
}
