//! Settings for formwright.
//!
//! [`Settings`] holds the renderer defaults, the token parameters, and the
//! logging configuration. It is a plain value: build one at startup (see
//! [`settings_loader`](crate::settings_loader)) and derive a renderer from it
//! at each call site. There is no global instance.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// The complete set of formwright settings.
///
/// # Examples
///
/// ```
/// use formwright_core::settings::Settings;
///
/// let settings = Settings::default();
/// assert_eq!(settings.method, "POST");
/// assert_eq!(settings.form_timeout_hours, 2);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    // ── Core ─────────────────────────────────────────────────────────

    /// Whether debug mode is enabled (pretty logs instead of JSON).
    pub debug: bool,

    // ── Form rendering ───────────────────────────────────────────────

    /// The `name` attribute of the rendered `<form>` tag.
    pub form_name: String,
    /// The HTTP method of the rendered `<form>` tag.
    pub method: String,
    /// Whether rendered forms include the `<form>` tags.
    pub form_tag: bool,
    /// Whether a headline derived from the record name is rendered.
    pub show_headline: bool,
    /// Width of the label column in pixels; `0` leaves it to the CSS.
    pub indent: u32,
    /// Height of the spacer between fields, in CSS `rem`.
    pub vertical_spacer: f64,
    /// Render a submit button even if only auto-submitting selects exist.
    pub force_submit: bool,
    /// Put the `autofocus` attribute on the first field with an error.
    pub focus_first_error: bool,
    /// Card view: skip fields whose value is empty.
    pub skip_empty: bool,
    /// Optional CSS file replacing the built-in stylesheet.
    pub css_path: Option<PathBuf>,

    // ── Security ─────────────────────────────────────────────────────

    /// Secret salt mixed into form tokens.
    pub form_salt: String,
    /// Hours until a form post is rejected.
    pub form_timeout_hours: i64,

    // ── Logging ──────────────────────────────────────────────────────

    /// The log level (e.g. "info", "debug", "warn").
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            // Core
            debug: false,

            // Form rendering
            form_name: "frmMain".to_string(),
            method: "POST".to_string(),
            form_tag: true,
            show_headline: false,
            indent: 0,
            vertical_spacer: 0.6,
            force_submit: false,
            focus_first_error: false,
            skip_empty: false,
            css_path: None,

            // Security
            form_salt: String::new(),
            form_timeout_hours: 2,

            // Logging
            log_level: "info".to_string(),
        }
    }
}
