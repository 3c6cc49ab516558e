//! Renderer configuration and the parts shared by all output modes.
//!
//! [`FormRenderer`] holds the formatting options together with two tables
//! filled by the caller before rendering: option lists for select-backed
//! fields and validation messages by external key. The output modes live in
//! their own modules: [`form`](crate::form), [`card`](crate::card) and
//! [`csv`](crate::csv).
//!
//! A renderer is a plain value. Configure one at startup, then take a
//! [`clone_for_request`](FormRenderer::clone_for_request) copy for every
//! request that adds errors, so concurrent requests never share messages.

use std::collections::{BTreeMap, HashMap};
use std::fmt::Write;

use chrono::Utc;
use formwright_core::settings_loader::load_css;
use formwright_core::{FormToken, FormwrightError, FormwrightResult, Settings};

use crate::attrs::{self, AttrSet};
use crate::fields::Field;
use crate::options::OptionList;
use crate::widgets::{widget_for, WidgetKind};

/// The built-in stylesheet.
pub const DEFAULT_CSS: &str = include_str!("../assets/default.css");

/// Error map key whose message renders above the whole form.
pub const GLOBAL_ERROR_KEY: &str = "global";

/// Horizontal padding plus margin of labels and inputs, in pixels.
pub const DEFAULT_INDENT_ADDENDUM: u32 = 2 * (4 + 4);

/// Closes the container opened by every markup mode.
pub(crate) const CONTAINER_CLOSE: &str = "</div><!-- </div class='formwright'... -->\n";

/// Where the card view puts a field's suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SuffixPosition {
    /// Suffixes are not shown.
    Hidden,
    /// In parentheses below the label.
    BelowLabel,
    /// Right after the value.
    #[default]
    AfterValue,
}

/// Converts records into forms, cards and CSV lines.
///
/// # Examples
///
/// ```
/// use formwright_forms::fields::{FieldDescriptor, FieldType};
/// use formwright_forms::record::JsonRecord;
/// use formwright_forms::renderer::FormRenderer;
///
/// let mut renderer = FormRenderer::new();
/// renderer.set_options("department", [("ds", "Data Science"), ("hr", "Human Resources")]);
///
/// let value = serde_json::json!({"department": "hr"});
/// let record = JsonRecord::new("EntryForm", &value)
///     .field(FieldDescriptor::new("department", FieldType::Text).attrs("subtype='select'"));
///
/// let html = renderer.form(&record);
/// assert!(html.contains("<option value='hr' selected >Human Resources</option>"));
/// ```
#[derive(Debug, Clone)]
pub struct FormRenderer {
    /// Wrap the fields in `<form>` tags.
    pub form_tag: bool,
    /// The form's `name` attribute.
    pub name: String,
    /// The form's `method` attribute.
    pub method: String,
    /// Distinguishes several renderings on one page in CSS selectors.
    pub instance_id: String,
    /// Hours a form token stays valid.
    pub form_timeout: i64,
    /// Secret mixed into form tokens.
    pub salt: String,
    /// Label column width in pixels; `0` leaves it to the stylesheet.
    pub indent: u32,
    /// Added to `indent` for the headline and the submit button.
    pub indent_addendum: u32,
    /// Render a submit button even if every field submits on its own.
    pub force_submit: bool,
    /// Render a headline derived from the record name.
    pub show_headline: bool,
    /// Height of the gap after each field, in `rem`.
    pub vertical_spacer: f64,
    /// The stylesheet block written before the container.
    pub css: String,
    /// Card view: leave out fields with empty values.
    pub skip_empty: bool,
    /// Card view: suffix placement.
    pub suffix_position: SuffixPosition,
    /// Put `autofocus` on the first field that has an error.
    pub focus_first_error: bool,
    select_options: HashMap<String, OptionList>,
    errors: BTreeMap<String, String>,
}

impl Default for FormRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl FormRenderer {
    /// Creates a renderer with the built-in defaults.
    pub fn new() -> Self {
        Self {
            form_tag: true,
            name: "frmMain".to_string(),
            method: "POST".to_string(),
            instance_id: new_instance_id(),
            form_timeout: 2,
            salt: String::new(),
            indent: 0,
            indent_addendum: DEFAULT_INDENT_ADDENDUM,
            force_submit: false,
            show_headline: false,
            vertical_spacer: 0.6,
            css: style_block(DEFAULT_CSS),
            skip_empty: false,
            suffix_position: SuffixPosition::default(),
            focus_first_error: false,
            select_options: HashMap::new(),
            errors: BTreeMap::new(),
        }
    }

    /// Creates a renderer from settings, reading `css_path` if set.
    pub fn from_settings(settings: &Settings) -> FormwrightResult<Self> {
        let css = load_css(settings)?.map_or_else(|| style_block(DEFAULT_CSS), |custom| style_block(&custom));
        Ok(Self {
            form_tag: settings.form_tag,
            name: settings.form_name.clone(),
            method: settings.method.clone(),
            form_timeout: settings.form_timeout_hours,
            salt: settings.form_salt.clone(),
            indent: settings.indent,
            force_submit: settings.force_submit,
            show_headline: settings.show_headline,
            vertical_spacer: settings.vertical_spacer,
            css,
            skip_empty: settings.skip_empty,
            focus_first_error: settings.focus_first_error,
            ..Self::new()
        })
    }

    /// Copies the renderer for one request: same options, no errors, and a
    /// fresh instance id.
    pub fn clone_for_request(&self) -> Self {
        Self {
            errors: BTreeMap::new(),
            instance_id: new_instance_id(),
            ..self.clone()
        }
    }

    // ── Option lists ─────────────────────────────────────────────────

    /// Registers the options of a select-backed field, replacing any
    /// previous list for `key`.
    pub fn set_options<I, K, L>(&mut self, key: impl Into<String>, pairs: I)
    where
        I: IntoIterator<Item = (K, L)>,
        K: Into<String>,
        L: Into<String>,
    {
        self.select_options.insert(key.into(), OptionList::from_pairs(pairs));
    }

    /// Registers a prepared option list, replacing any previous one.
    pub fn set_option_list(&mut self, key: impl Into<String>, options: OptionList) {
        self.select_options.insert(key.into(), options);
    }

    /// The options registered for `key`.
    pub fn options(&self, key: &str) -> Option<&OptionList> {
        self.select_options.get(key)
    }

    /// The key to preselect on a fresh form: the first registered option.
    pub fn default_option_key(&self, key: &str) -> &str {
        self.select_options.get(key).map_or("", OptionList::first_key)
    }

    // ── Errors ───────────────────────────────────────────────────────

    /// Adds a message for `key`. Messages for the same key accumulate,
    /// separated by a line break. Key [`GLOBAL_ERROR_KEY`] renders above the
    /// form.
    pub fn add_error(&mut self, key: impl Into<String>, msg: impl AsRef<str>) {
        let entry = self.errors.entry(key.into()).or_default();
        if !entry.is_empty() {
            entry.push_str("<br>\n");
        }
        entry.push_str(msg.as_ref());
    }

    /// Adds several messages, e.g. those of a [`Validation`](crate::record::Validation).
    pub fn add_errors<I, K, M>(&mut self, errors: I)
    where
        I: IntoIterator<Item = (K, M)>,
        K: Into<String>,
        M: AsRef<str>,
    {
        for (key, msg) in errors {
            self.add_error(key, msg);
        }
    }

    /// All messages by key.
    pub const fn errors(&self) -> &BTreeMap<String, String> {
        &self.errors
    }

    /// The message for `key`.
    pub fn error(&self, key: &str) -> Option<&str> {
        self.errors.get(key).map(String::as_str)
    }

    // ── Tokens ───────────────────────────────────────────────────────

    /// The token scheme configured by `salt` and `form_timeout`.
    pub fn token_scheme(&self) -> FormToken {
        FormToken::new(self.salt.clone(), self.form_timeout)
    }

    /// Issues the token embedded in rendered forms.
    pub fn form_token(&self) -> String {
        self.token_scheme().issue()
    }

    /// Validates a submitted form token.
    pub fn validate_form_token(&self, token: &str) -> FormwrightResult<()> {
        self.token_scheme().validate(token)
    }

    // ── Shared markup ────────────────────────────────────────────────

    /// The stylesheet block, plus instance specific rules when `indent` is
    /// set.
    pub fn render_css(&self) -> String {
        let mut out = self.css.clone();
        if self.indent == 0 {
            return out;
        }
        let selector = format!("div.formwright-{}", self.instance_id);
        let indented = self.indent + self.indent_addendum;
        let _ = write!(
            out,
            "\n<style>\n\t/* instance specifics */\n\
             \t{selector}  label {{\n\t\tmin-width: {}px;\n\t}}\n\
             \t{selector}  h3 {{\n\t\tmargin-left: {indented}px;\n\t}}\n\
             \t{selector}  button[type=submit],\n\
             \t{selector}  input[type=submit]\n\t{{\n\t\tmargin-left: {indented}px;\n\t}}\n\
             </style>\n",
            self.indent,
        );
        out
    }

    /// The gap written after each field.
    pub(crate) fn vertical_spacer_html(&self) -> String {
        format!("\t<div style='height:{:3.1}rem'>&nbsp;</div>", self.vertical_spacer)
    }

    /// Stylesheet, container and optional headline.
    pub(crate) fn container_open(&self, record_name: &str) -> String {
        let mut out = self.render_css();
        let _ = writeln!(out, "<div class='formwright formwright-{}'>", self.instance_id);
        if self.show_headline {
            let _ = writeln!(
                out,
                "<h3>{}</h3>",
                formwright_core::utils::text::labelize(record_name)
            );
        }
        out
    }

    /// Turns a render error into the text returned in place of markup.
    pub(crate) fn diagnostic(mode: &str, err: &FormwrightError) -> String {
        tracing::warn!(mode, error = %err, "render aborted");
        format!("formwright {mode}: {err}")
    }
}

/// A field prepared for rendering: attributes parsed and validated, label
/// resolved, widget chosen.
#[derive(Debug)]
pub(crate) struct FieldPlan<'a> {
    pub field: &'a Field,
    pub attrs: AttrSet,
    pub label: String,
    pub suffix: String,
    pub kind: WidgetKind,
}

impl<'a> FieldPlan<'a> {
    pub fn build(field: &'a Field) -> FormwrightResult<Self> {
        let d = &field.descriptor;
        let attrs = d.attr_set();
        let label = d.resolved_label(&attrs);
        attrs::validate(&d.key, attrs.raw())?;
        let suffix = d.resolved_suffix(&attrs);
        let kind = widget_for(d.field_type, &attrs);
        Ok(Self {
            field,
            attrs,
            label,
            suffix,
            kind,
        })
    }

    pub fn key(&self) -> &str {
        &self.field.descriptor.key
    }

    /// Separator by widget, name or key.
    pub fn is_separator(&self) -> bool {
        self.kind == WidgetKind::Separator || self.field.descriptor.is_separator()
    }
}

fn style_block(css: &str) -> String {
    format!("<style>\n{css}\n</style>")
}

/// The last eight digits of the current time in nanoseconds.
fn new_instance_id() -> String {
    let nanos = Utc::now().timestamp_nanos_opt().unwrap_or_default();
    format!("{:08}", nanos.rem_euclid(100_000_000))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::{FieldDescriptor, FieldType, FieldValue};

    #[test]
    fn test_defaults() {
        let r = FormRenderer::new();
        assert!(r.form_tag);
        assert_eq!(r.name, "frmMain");
        assert_eq!(r.method, "POST");
        assert_eq!(r.form_timeout, 2);
        assert_eq!(r.indent_addendum, 16);
        assert_eq!(r.instance_id.len(), 8);
        assert!(r.instance_id.chars().all(|c| c.is_ascii_digit()));
        assert_eq!(r.suffix_position, SuffixPosition::AfterValue);
        assert!(r.css.starts_with("<style>\n"));
        assert!(r.css.ends_with("\n</style>"));
    }

    #[test]
    fn test_from_settings() {
        let settings = Settings {
            form_name: "frmEntry".to_string(),
            method: "GET".to_string(),
            form_salt: "pepper".to_string(),
            indent: 80,
            show_headline: true,
            ..Settings::default()
        };
        let r = FormRenderer::from_settings(&settings).unwrap();
        assert_eq!(r.name, "frmEntry");
        assert_eq!(r.method, "GET");
        assert_eq!(r.salt, "pepper");
        assert_eq!(r.indent, 80);
        assert!(r.show_headline);
    }

    #[test]
    fn test_from_settings_missing_css_file() {
        let settings = Settings {
            css_path: Some("/definitely/not/here.css".into()),
            ..Settings::default()
        };
        let err = FormRenderer::from_settings(&settings).unwrap_err();
        assert!(!err.is_caller_error());
    }

    #[test]
    fn test_set_options_resets() {
        let mut r = FormRenderer::new();
        r.set_options("dept", [("a", "A"), ("b", "B")]);
        r.set_options("dept", [("c", "C")]);
        assert_eq!(r.options("dept").unwrap().len(), 1);
        assert_eq!(r.default_option_key("dept"), "c");
        assert_eq!(r.default_option_key("unknown"), "");
    }

    #[test]
    fn test_add_error_accumulates() {
        let mut r = FormRenderer::new();
        r.add_error("items", "too many");
        r.add_error("items", "must be even");
        assert_eq!(r.error("items"), Some("too many<br>\nmust be even"));
        assert_eq!(r.error("other"), None);
    }

    #[test]
    fn test_add_errors() {
        let mut r = FormRenderer::new();
        r.add_errors([("a", "x"), ("b", "y")]);
        assert_eq!(r.errors().len(), 2);
    }

    #[test]
    fn test_clone_for_request_drops_errors_keeps_options() {
        let mut base = FormRenderer::new();
        base.set_options("dept", [("a", "A")]);
        base.add_error("global", "boom");
        let clone = base.clone_for_request();
        assert!(clone.errors().is_empty());
        assert!(clone.options("dept").is_some());
        assert_eq!(base.errors().len(), 1);
    }

    #[test]
    fn test_render_css_instance_specific() {
        let mut r = FormRenderer::new();
        assert_eq!(r.render_css(), r.css);

        r.indent = 100;
        r.instance_id = "12345678".to_string();
        let css = r.render_css();
        assert!(css.contains("div.formwright-12345678  label {\n\t\tmin-width: 100px;"));
        assert!(css.contains("div.formwright-12345678  h3 {\n\t\tmargin-left: 116px;"));
    }

    #[test]
    fn test_vertical_spacer() {
        let r = FormRenderer::new();
        assert_eq!(
            r.vertical_spacer_html(),
            "\t<div style='height:0.6rem'>&nbsp;</div>"
        );
    }

    #[test]
    fn test_form_token_roundtrip() {
        let mut r = FormRenderer::new();
        r.salt = "pepper".to_string();
        assert!(r.validate_form_token(&r.form_token()).is_ok());
        assert!(r.validate_form_token("stale").is_err());
    }

    #[test]
    fn test_field_plan_rejects_malformed() {
        let field = Field::new(
            FieldDescriptor::new("Layout", FieldType::Text)
                .key("date_layout")
                .attrs("size='16', maxlength='16'"),
            FieldValue::empty(),
        );
        let err = FieldPlan::build(&field).unwrap_err();
        assert!(err.to_string().contains("date_layout"));
    }
}
