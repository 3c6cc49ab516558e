//! Settings loading from configuration files.
//!
//! This module provides functions to load [`Settings`] from TOML files, JSON
//! files, and to apply environment variable overrides.
//!
//! ## Loading Order
//!
//! 1. Start with default settings.
//! 2. Load from a TOML or JSON file (overriding defaults).
//! 3. Apply environment variable overrides (highest priority).
//!
//! ## Environment Variable Mapping
//!
//! | Env Var | Setting |
//! |---|---|
//! | `FORMWRIGHT_DEBUG` | `debug` |
//! | `FORMWRIGHT_LOG_LEVEL` | `log_level` |
//! | `FORMWRIGHT_FORM_SALT` | `form_salt` |
//! | `FORMWRIGHT_FORM_TIMEOUT_HOURS` | `form_timeout_hours` |
//! | `FORMWRIGHT_METHOD` | `method` |
//! | `FORMWRIGHT_CSS_PATH` | `css_path` |
//!
//! ## Examples
//!
//! ```rust,no_run
//! use formwright_core::settings_loader;
//!
//! let settings = settings_loader::from_toml_file_with_env("config/formwright.toml").unwrap();
//! ```

use std::path::{Path, PathBuf};

use crate::error::FormwrightError;
use crate::settings::Settings;

/// Loads settings from a TOML string.
///
/// Any setting not present in the TOML keeps its default value.
///
/// # Errors
///
/// Returns an error if the TOML is malformed or cannot be deserialized.
pub fn from_toml_str(toml_str: &str) -> Result<Settings, FormwrightError> {
    // Deserialize into a serde_json::Value first so a partial file can be
    // merged over the defaults.
    let toml_value: toml::Value = toml::from_str(toml_str)
        .map_err(|e| FormwrightError::ConfigurationError(format!("Failed to parse TOML: {e}")))?;

    merge_over_defaults(toml_to_json(toml_value), "TOML")
}

/// Loads settings from a TOML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the TOML is malformed.
pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Settings, FormwrightError> {
    let content = read_config(path.as_ref(), "TOML")?;
    from_toml_str(&content)
}

/// Loads settings from a TOML file and then applies environment variable overrides.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the TOML is malformed.
pub fn from_toml_file_with_env(path: impl AsRef<Path>) -> Result<Settings, FormwrightError> {
    let mut settings = from_toml_file(path)?;
    apply_env_overrides(&mut settings);
    Ok(settings)
}

/// Loads settings from a JSON string.
///
/// # Errors
///
/// Returns an error if the JSON is malformed or cannot be deserialized.
pub fn from_json_str(json_str: &str) -> Result<Settings, FormwrightError> {
    let json_value: serde_json::Value = serde_json::from_str(json_str)
        .map_err(|e| FormwrightError::ConfigurationError(format!("Failed to parse JSON: {e}")))?;

    merge_over_defaults(json_value, "JSON")
}

/// Loads settings from a JSON file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the JSON is malformed.
pub fn from_json_file(path: impl AsRef<Path>) -> Result<Settings, FormwrightError> {
    let content = read_config(path.as_ref(), "JSON")?;
    from_json_str(&content)
}

/// Loads settings from a JSON file and then applies environment variable overrides.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the JSON is malformed.
pub fn from_json_file_with_env(path: impl AsRef<Path>) -> Result<Settings, FormwrightError> {
    let mut settings = from_json_file(path)?;
    apply_env_overrides(&mut settings);
    Ok(settings)
}

/// Loads settings from just environment variables (starting from defaults).
pub fn from_env() -> Settings {
    let mut settings = Settings::default();
    apply_env_overrides(&mut settings);
    settings
}

/// Reads the stylesheet named by `settings.css_path`, if any.
///
/// Returns `Ok(None)` when no path is configured.
///
/// # Errors
///
/// Returns an error if the configured file cannot be read.
pub fn load_css(settings: &Settings) -> Result<Option<String>, FormwrightError> {
    let Some(path) = settings.css_path.as_deref() else {
        return Ok(None);
    };
    let css = std::fs::read_to_string(path)?;
    tracing::debug!(path = %path.display(), bytes = css.len(), "loaded custom CSS");
    Ok(Some(css))
}

/// Applies environment variable overrides to a settings struct.
///
/// Supported environment variables:
///
/// - `FORMWRIGHT_DEBUG` -> `debug` (values: "true"/"1"/"yes" => true, anything else => false)
/// - `FORMWRIGHT_LOG_LEVEL` -> `log_level`
/// - `FORMWRIGHT_FORM_SALT` -> `form_salt`
/// - `FORMWRIGHT_FORM_TIMEOUT_HOURS` -> `form_timeout_hours` (ignored unless an integer)
/// - `FORMWRIGHT_METHOD` -> `method`
/// - `FORMWRIGHT_CSS_PATH` -> `css_path`
pub fn apply_env_overrides(settings: &mut Settings) {
    if let Ok(val) = std::env::var("FORMWRIGHT_DEBUG") {
        settings.debug = matches!(val.to_lowercase().as_str(), "true" | "1" | "yes");
    }

    if let Ok(val) = std::env::var("FORMWRIGHT_LOG_LEVEL") {
        settings.log_level = val;
    }

    if let Ok(val) = std::env::var("FORMWRIGHT_FORM_SALT") {
        settings.form_salt = val;
    }

    if let Ok(val) = std::env::var("FORMWRIGHT_FORM_TIMEOUT_HOURS") {
        if let Ok(hours) = val.parse::<i64>() {
            settings.form_timeout_hours = hours;
        }
    }

    if let Ok(val) = std::env::var("FORMWRIGHT_METHOD") {
        settings.method = val;
    }

    if let Ok(val) = std::env::var("FORMWRIGHT_CSS_PATH") {
        settings.css_path = Some(PathBuf::from(val));
    }
}

// ============================================================
// Helpers
// ============================================================

fn read_config(path: &Path, format: &str) -> Result<String, FormwrightError> {
    std::fs::read_to_string(path).map_err(|e| {
        FormwrightError::ConfigurationError(format!(
            "Failed to read {format} file '{}': {e}",
            path.display()
        ))
    })
}

fn merge_over_defaults(
    value: serde_json::Value,
    format: &str,
) -> Result<Settings, FormwrightError> {
    let default_json = serde_json::to_value(Settings::default()).map_err(|e| {
        FormwrightError::ConfigurationError(format!("Failed to serialize default settings: {e}"))
    })?;

    let merged = merge_json(default_json, value);
    serde_json::from_value(merged).map_err(|e| {
        FormwrightError::ConfigurationError(format!(
            "Failed to deserialize settings from {format}: {e}"
        ))
    })
}

/// Converts a TOML value to a `serde_json::Value`.
fn toml_to_json(value: toml::Value) -> serde_json::Value {
    match value {
        toml::Value::String(s) => serde_json::Value::String(s),
        toml::Value::Integer(i) => serde_json::json!(i),
        toml::Value::Float(f) => serde_json::json!(f),
        toml::Value::Boolean(b) => serde_json::Value::Bool(b),
        toml::Value::Datetime(dt) => serde_json::Value::String(dt.to_string()),
        toml::Value::Array(arr) => {
            serde_json::Value::Array(arr.into_iter().map(toml_to_json).collect())
        }
        toml::Value::Table(table) => {
            let map: serde_json::Map<String, serde_json::Value> = table
                .into_iter()
                .map(|(k, v)| (k, toml_to_json(v)))
                .collect();
            serde_json::Value::Object(map)
        }
    }
}

/// Deep-merges two JSON values. The `override_val` takes precedence.
fn merge_json(base: serde_json::Value, override_val: serde_json::Value) -> serde_json::Value {
    match (base, override_val) {
        (serde_json::Value::Object(mut base_map), serde_json::Value::Object(override_map)) => {
            for (key, override_v) in override_map {
                let merged = if let Some(base_v) = base_map.remove(&key) {
                    merge_json(base_v, override_v)
                } else {
                    override_v
                };
                base_map.insert(key, merged);
            }
            serde_json::Value::Object(base_map)
        }
        (_, override_val) => override_val,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── TOML loading ────────────────────────────────────────────────

    #[test]
    fn test_from_toml_str_basic() {
        let toml = r#"
            form_salt = "my-salt"
            show_headline = true
            form_timeout_hours = 4
        "#;

        let settings = from_toml_str(toml).unwrap();
        assert_eq!(settings.form_salt, "my-salt");
        assert!(settings.show_headline);
        assert_eq!(settings.form_timeout_hours, 4);
        // Defaults preserved
        assert_eq!(settings.method, "POST");
        assert_eq!(settings.form_name, "frmMain");
    }

    #[test]
    fn test_from_toml_str_float_spacer() {
        let settings = from_toml_str("vertical_spacer = 1.2").unwrap();
        assert!((settings.vertical_spacer - 1.2).abs() < f64::EPSILON);
    }

    #[test]
    fn test_from_toml_str_css_path() {
        let settings = from_toml_str(r#"css_path = "assets/site.css""#).unwrap();
        assert_eq!(settings.css_path, Some(PathBuf::from("assets/site.css")));
    }

    #[test]
    fn test_from_toml_str_empty() {
        let settings = from_toml_str("").unwrap();
        assert!(!settings.debug);
        assert!(settings.form_salt.is_empty());
    }

    #[test]
    fn test_from_toml_str_invalid() {
        let result = from_toml_str("[[invalid toml content");
        assert!(result.is_err());
    }

    #[test]
    fn test_from_toml_str_wrong_type() {
        let result = from_toml_str(r#"indent = "wide""#);
        assert!(matches!(result, Err(FormwrightError::ConfigurationError(_))));
    }

    // ── JSON loading ────────────────────────────────────────────────

    #[test]
    fn test_from_json_str_basic() {
        let json = r#"{
            "form_salt": "json-salt",
            "debug": true,
            "log_level": "debug"
        }"#;

        let settings = from_json_str(json).unwrap();
        assert_eq!(settings.form_salt, "json-salt");
        assert!(settings.debug);
        assert_eq!(settings.log_level, "debug");
        assert_eq!(settings.form_timeout_hours, 2);
    }

    #[test]
    fn test_from_json_str_empty_object() {
        let settings = from_json_str("{}").unwrap();
        assert_eq!(settings.method, "POST");
    }

    #[test]
    fn test_from_json_str_invalid() {
        assert!(from_json_str("{not json").is_err());
    }

    // ── Files ───────────────────────────────────────────────────────

    #[test]
    fn test_from_toml_file_missing() {
        let result = from_toml_file("/definitely/not/here/formwright.toml");
        match result {
            Err(FormwrightError::ConfigurationError(msg)) => assert!(msg.contains("TOML")),
            other => panic!("expected configuration error, got {other:?}"),
        }
    }

    #[test]
    fn test_from_json_file_roundtrip() {
        let dir = std::env::temp_dir();
        let path = dir.join(format!("formwright-settings-{}.json", std::process::id()));
        std::fs::write(&path, r#"{"indent": 80}"#).unwrap();
        let settings = from_json_file(&path).unwrap();
        assert_eq!(settings.indent, 80);
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_load_css_without_path() {
        let settings = Settings::default();
        assert!(load_css(&settings).unwrap().is_none());
    }

    #[test]
    fn test_load_css_missing_file() {
        let settings = Settings {
            css_path: Some(PathBuf::from("/definitely/not/here/site.css")),
            ..Settings::default()
        };
        assert!(matches!(load_css(&settings), Err(FormwrightError::IoError(_))));
    }

    // ── Environment variable overrides ──────────────────────────────

    // The process environment is shared by all test threads.
    static ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

    fn with_env<T>(vars: &[(&str, &str)], f: impl FnOnce() -> T) -> T {
        let _guard = ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        for (key, val) in vars {
            std::env::set_var(key, val);
        }
        let out = f();
        for (key, _) in vars {
            std::env::remove_var(key);
        }
        out
    }

    #[test]
    fn test_apply_env_overrides_strings() {
        let settings = with_env(
            &[
                ("FORMWRIGHT_LOG_LEVEL", "debug"),
                ("FORMWRIGHT_FORM_SALT", "env-salt"),
                ("FORMWRIGHT_METHOD", "GET"),
                ("FORMWRIGHT_CSS_PATH", "/srv/site.css"),
            ],
            from_env,
        );
        assert_eq!(settings.log_level, "debug");
        assert_eq!(settings.form_salt, "env-salt");
        assert_eq!(settings.method, "GET");
        assert_eq!(settings.css_path, Some(PathBuf::from("/srv/site.css")));
    }

    #[test]
    fn test_apply_env_overrides_debug_values() {
        for (val, expected) in [("true", true), ("1", true), ("YES", true), ("false", false), ("on", false)] {
            let mut settings = Settings {
                debug: !expected,
                ..Settings::default()
            };
            with_env(&[("FORMWRIGHT_DEBUG", val)], || apply_env_overrides(&mut settings));
            assert_eq!(settings.debug, expected, "FORMWRIGHT_DEBUG={val}");
        }
    }

    #[test]
    fn test_apply_env_overrides_timeout() {
        let settings = with_env(&[("FORMWRIGHT_FORM_TIMEOUT_HOURS", "5")], from_env);
        assert_eq!(settings.form_timeout_hours, 5);
    }

    #[test]
    fn test_apply_env_overrides_timeout_not_integer() {
        let mut settings = Settings {
            form_timeout_hours: 3,
            ..Settings::default()
        };
        with_env(&[("FORMWRIGHT_FORM_TIMEOUT_HOURS", "two")], || {
            apply_env_overrides(&mut settings);
        });
        assert_eq!(settings.form_timeout_hours, 3);
    }

    #[test]
    fn test_from_toml_file_with_env_overrides_file() {
        let path = std::env::temp_dir().join(format!("formwright-settings-{}.toml", std::process::id()));
        std::fs::write(&path, "form_salt = \"file-salt\"\nindent = 40\n").unwrap();
        let settings = with_env(&[("FORMWRIGHT_FORM_SALT", "env-salt")], || {
            from_toml_file_with_env(&path).unwrap()
        });
        std::fs::remove_file(&path).ok();
        assert_eq!(settings.form_salt, "env-salt");
        assert_eq!(settings.indent, 40);
    }

    #[test]
    fn test_from_env_without_variables_is_default() {
        let settings = with_env(&[], from_env);
        assert_eq!(settings.form_timeout_hours, Settings::default().form_timeout_hours);
        assert_eq!(settings.method, Settings::default().method);
    }

    // ── Helpers ─────────────────────────────────────────────────────

    #[test]
    fn test_merge_json_nested() {
        let base = serde_json::json!({"a": {"b": 1, "c": 2}, "d": 3});
        let over = serde_json::json!({"a": {"b": 10}});
        let merged = merge_json(base, over);
        assert_eq!(merged, serde_json::json!({"a": {"b": 10, "c": 2}, "d": 3}));
    }
}
