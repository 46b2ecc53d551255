//! Integration tests for Settings config loading with layered merge semantics.
//!
//! Every test runs under [`IsolatedEnv`]: `XDG_CONFIG_HOME` points at an empty
//! temp directory and host `OUTLINER_*` variables are hidden, so the explicit
//! file and env vars are layered directly onto the compiled defaults.

use std::env;
use std::ffi::OsString;
use std::fs;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

use rstest::rstest;
use tempfile::TempDir;

use outliner::config::{RenderSettings, Settings};
use outliner::OutlineError;

// Tests in this binary share the process environment.
static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Holds the env lock and restores the saved variables on drop.
struct IsolatedEnv {
    saved: Vec<(OsString, Option<OsString>)>,
    _xdg: TempDir,
    _lock: MutexGuard<'static, ()>,
}

impl IsolatedEnv {
    fn new() -> Self {
        let lock = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let xdg = TempDir::new().unwrap();

        let mut saved: Vec<(OsString, Option<OsString>)> = env::vars_os()
            .filter(|(key, _)| key.to_string_lossy().starts_with("OUTLINER_"))
            .map(|(key, val)| (key, Some(val)))
            .collect();
        saved.push(("XDG_CONFIG_HOME".into(), env::var_os("XDG_CONFIG_HOME")));
        for (key, _) in &saved {
            env::remove_var(key);
        }
        env::set_var("XDG_CONFIG_HOME", xdg.path());

        Self {
            saved,
            _xdg: xdg,
            _lock: lock,
        }
    }

    fn set(&mut self, key: &str, value: &str) {
        if !self.saved.iter().any(|(k, _)| k == key) {
            self.saved.push((key.into(), None));
        }
        env::set_var(key, value);
    }
}

impl Drop for IsolatedEnv {
    fn drop(&mut self) {
        for (key, val) in &self.saved {
            match val {
                Some(val) => env::set_var(key, val),
                None => env::remove_var(key),
            }
        }
    }
}

#[test]
fn given_no_config_file_when_load_then_defaults() {
    let _env = IsolatedEnv::new();

    let settings = Settings::load(None).expect("load settings");

    assert_eq!(settings.render, RenderSettings::default());
    assert_eq!(settings.render.indent_width, 5);
}

#[test]
fn given_full_config_file_when_load_then_all_values_applied() {
    let _env = IsolatedEnv::new();
    // Arrange
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("outliner.toml");
    fs::write(
        &path,
        r#"
[render]
indent_width = 2
show_body = false
show_tags = true
"#,
    )
    .unwrap();

    // Act
    let settings = Settings::load(Some(path.as_path())).expect("load settings");

    // Assert
    assert_eq!(
        settings.render,
        RenderSettings {
            indent_width: 2,
            show_body: false,
            show_tags: true,
        }
    );
}

#[test]
fn given_partial_config_file_when_load_then_unset_fields_keep_defaults() {
    let _env = IsolatedEnv::new();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("outliner.toml");
    fs::write(&path, "[render]\nshow_tags = true\n").unwrap();

    let settings = Settings::load(Some(path.as_path())).expect("load settings");

    assert!(settings.render.show_tags);
    assert!(settings.render.show_body);
    assert_eq!(settings.render.indent_width, 5);
}

#[test]
fn given_invalid_toml_when_load_then_config_error() {
    let _env = IsolatedEnv::new();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("outliner.toml");
    fs::write(&path, "[render\nindent_width = ").unwrap();

    let result = Settings::load(Some(path.as_path()));

    match result {
        Err(OutlineError::Config { message }) => assert!(message.contains("parse")),
        other => panic!("expected config error, got {:?}", other),
    }
}

#[test]
fn given_missing_config_file_when_load_then_config_error() {
    let _env = IsolatedEnv::new();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("does-not-exist.toml");

    let result = Settings::load(Some(path.as_path()));

    assert!(matches!(result, Err(OutlineError::Config { .. })));
}

// directories only honors XDG_CONFIG_HOME on Linux
#[cfg(target_os = "linux")]
#[test]
fn given_global_config_when_load_then_explicit_file_overrides_it() {
    let _env = IsolatedEnv::new();
    let global_dir = PathBuf::from(env::var_os("XDG_CONFIG_HOME").unwrap()).join("outliner");
    fs::create_dir_all(&global_dir).unwrap();
    fs::write(global_dir.join("outliner.toml"), "[render]\nindent_width = 3\nshow_tags = true\n").unwrap();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("outliner.toml");
    fs::write(&path, "[render]\nindent_width = 7\n").unwrap();

    let settings = Settings::load(Some(path.as_path())).expect("load settings");

    assert_eq!(settings.render.indent_width, 7);
    assert!(settings.render.show_tags);
}

#[test]
fn given_env_override_when_load_then_wins_over_file() {
    let mut env = IsolatedEnv::new();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("outliner.toml");
    fs::write(&path, "[render]\nindent_width = 2\nshow_body = true\n").unwrap();
    env.set("OUTLINER_RENDER__INDENT_WIDTH", "8");
    env.set("OUTLINER_RENDER__SHOW_BODY", "false");

    let settings = Settings::load(Some(path.as_path())).expect("load settings");

    assert_eq!(settings.render.indent_width, 8);
    assert!(!settings.render.show_body);
}

#[rstest]
#[case::indent_not_a_number("OUTLINER_RENDER__INDENT_WIDTH", "abc")]
#[case::indent_negative("OUTLINER_RENDER__INDENT_WIDTH", "-1")]
#[case::show_body_not_a_bool("OUTLINER_RENDER__SHOW_BODY", "maybe")]
#[case::show_tags_not_a_bool("OUTLINER_RENDER__SHOW_TAGS", "sometimes")]
fn given_malformed_env_value_when_load_then_config_error(#[case] key: &str, #[case] value: &str) {
    let mut env = IsolatedEnv::new();
    env.set(key, value);

    let result = Settings::load(None);

    assert!(
        matches!(result, Err(OutlineError::Config { .. })),
        "{key}={value} gave {result:?}"
    );
}
