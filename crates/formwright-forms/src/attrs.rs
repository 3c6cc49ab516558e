//! The field attribute mini-language.
//!
//! Every field carries an attribute string of comma separated tokens such as
//! `subtype='select',size='1',suffix='optional'`. Values may be quoted with
//! single quotes. Since the comma separates tokens, a literal comma inside a
//! value is written as `&comma;`; the renderer unescapes it once, on the
//! finished markup.
//!
//! [`AttrSet`] gives access to single values and to the subset of tokens that
//! are passed through verbatim as HTML attributes. [`validate`] rejects
//! attribute strings the tokenizer would misread.

use formwright_core::{FormwrightError, FormwrightResult};

/// The escape sequence standing in for a literal comma inside values.
pub const COMMA_ESCAPE: &str = "&comma;";

/// The attribute string that removes a field from all renderings.
pub const SKIP_MARKER: &str = "-";

/// Keys copied verbatim into the widget tag.
const PASS_THROUGH: &[&str] = &[
    "size",
    "maxlength",
    "min",
    "max",
    "step",
    "pattern",
    "placeholder",
    "rows",
    "cols",
    "accept",
    "accesskey",
    "title",
    "autocapitalize",
    "inputmode",
];

/// Boolean HTML attributes, passed through with or without a value.
const PASS_THROUGH_FLAGS: &[&str] = &["multiple", "autofocus"];

/// The markup emitted for an `onchange` token.
const ONCHANGE_SUBMIT: &str = "onchange='javascript:this.form.submit();'";

/// One `key=value` token.
#[derive(Debug, Clone, PartialEq, Eq)]
struct AttrToken {
    key: String,
    value: String,
    raw: String,
    has_value: bool,
}

impl AttrToken {
    fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        let (key, value, has_value) = match raw.split_once('=') {
            Some((key, value)) => (key.trim(), value.trim().trim_matches('\''), true),
            None => (raw, "", false),
        };
        Some(Self {
            key: key.to_ascii_lowercase(),
            value: value.to_string(),
            raw: raw.to_string(),
            has_value,
        })
    }
}

/// A parsed attribute string.
///
/// # Examples
///
/// ```
/// use formwright_forms::attrs::AttrSet;
///
/// let attrs = AttrSet::parse("maxlength='42',size='28',suffix='optional'");
/// assert_eq!(attrs.get("size"), "28");
/// assert_eq!(attrs.get("SUFFIX"), "optional");
/// assert_eq!(attrs.get("label"), "");
/// assert_eq!(attrs.html_attrs(), " maxlength='42' size='28'");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttrSet {
    raw: String,
    tokens: Vec<AttrToken>,
}

impl AttrSet {
    /// Parses an attribute string. Parsing never fails; see [`validate`].
    pub fn parse(raw: &str) -> Self {
        Self {
            raw: raw.to_string(),
            tokens: raw.split(',').filter_map(AttrToken::parse).collect(),
        }
    }

    /// The attribute string as written.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Whether the attribute string is the skip marker `-`.
    pub fn is_skip(&self) -> bool {
        self.raw.trim() == SKIP_MARKER
    }

    /// Returns the value for `key`, or `""` when the key is absent.
    ///
    /// Keys match case-insensitively and as a whole, not by prefix: `max`
    /// never answers for a `maxlength` token. Surrounding single quotes are
    /// removed.
    pub fn get(&self, key: &str) -> &str {
        self.token(key).map_or("", |t| t.value.as_str())
    }

    /// Whether a token for `key` is present, with or without a value.
    pub fn contains(&self, key: &str) -> bool {
        self.token(key).is_some()
    }

    /// Whether `key` is switched on.
    ///
    /// A bare token (`nobreak`) and any value other than `false` count as on.
    pub fn flag(&self, key: &str) -> bool {
        self.token(key)
            .is_some_and(|t| !t.value.eq_ignore_ascii_case("false"))
    }

    /// Renders the pass-through tokens as HTML attributes.
    ///
    /// Each attribute is preceded by a single space. Keys that steer
    /// rendering (`subtype`, `label`, `suffix`, `nobreak`, `wildcardselect`)
    /// and unknown keys are left out.
    pub fn html_attrs(&self) -> String {
        let mut out = String::new();
        for token in &self.tokens {
            let key = token.key.as_str();
            if (token.has_value && PASS_THROUGH.contains(&key)) || PASS_THROUGH_FLAGS.contains(&key) {
                out.push(' ');
                out.push_str(&token.raw);
            } else if key == "onchange" {
                out.push(' ');
                out.push_str(ONCHANGE_SUBMIT);
            }
        }
        out
    }

    fn token(&self, key: &str) -> Option<&AttrToken> {
        self.tokens.iter().find(|t| t.key.eq_ignore_ascii_case(key))
    }
}

/// Checks an attribute string for constructs the tokenizer would misread.
///
/// Rejects `", "` and `" ,"` anywhere in the string, and raw commas inside
/// single quoted values. `field` names the offending field in the error.
pub fn validate(field: &str, raw: &str) -> FormwrightResult<()> {
    if raw.contains(", ") || raw.contains(" ,") {
        return Err(FormwrightError::malformed(
            field,
            "cannot contain ', ' or ' ,'",
        ));
    }
    if comma_inside_quotes(raw) {
        return Err(FormwrightError::malformed(
            field,
            "must use &comma; instead of ',' inside of single quoted values",
        ));
    }
    Ok(())
}

/// Whether a raw comma appears inside single quoted content.
///
/// Splitting on `'` puts quoted content at the odd indices.
///
/// # Examples
///
/// ```
/// use formwright_forms::attrs::comma_inside_quotes;
///
/// assert!(!comma_inside_quotes("size='16'"));
/// assert!(comma_inside_quotes("pattern='a,b'"));
/// assert!(!comma_inside_quotes("pattern='a&comma;b'"));
/// ```
pub fn comma_inside_quotes(raw: &str) -> bool {
    raw.split('\'')
        .enumerate()
        .any(|(idx, part)| idx % 2 == 1 && part.contains(','))
}

/// Replaces every [`COMMA_ESCAPE`] in finished markup with a literal comma.
pub fn unescape_commas(markup: &str) -> String {
    markup.replace(COMMA_ESCAPE, ",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_values() {
        let attrs = AttrSet::parse("subtype='select',size='1',suffix='days'");
        assert_eq!(attrs.get("subtype"), "select");
        assert_eq!(attrs.get("size"), "1");
        assert_eq!(attrs.get("suffix"), "days");
    }

    #[test]
    fn test_get_unquoted_value() {
        let attrs = AttrSet::parse("step=any,min=0");
        assert_eq!(attrs.get("step"), "any");
        assert_eq!(attrs.get("min"), "0");
    }

    #[test]
    fn test_get_is_case_insensitive() {
        let attrs = AttrSet::parse("AccessKey='t'");
        assert_eq!(attrs.get("accesskey"), "t");
    }

    #[test]
    fn test_get_exact_key_match() {
        // "max" must not answer for "maxlength".
        let attrs = AttrSet::parse("maxlength='42'");
        assert_eq!(attrs.get("max"), "");
        assert_eq!(attrs.get("maxlength"), "42");
    }

    #[test]
    fn test_get_value_with_equals_sign() {
        let attrs = AttrSet::parse("pattern='[a-z]{1=3}'");
        assert_eq!(attrs.get("pattern"), "[a-z]{1=3}");
    }

    #[test]
    fn test_bare_token() {
        let attrs = AttrSet::parse("size='3',nobreak");
        assert!(attrs.contains("nobreak"));
        assert!(attrs.flag("nobreak"));
        assert_eq!(attrs.get("nobreak"), "");
        assert!(!attrs.flag("onchange"));
    }

    #[test]
    fn test_flag_false() {
        let attrs = AttrSet::parse("nobreak='false'");
        assert!(attrs.contains("nobreak"));
        assert!(!attrs.flag("nobreak"));
    }

    #[test]
    fn test_empty_string() {
        let attrs = AttrSet::parse("");
        assert_eq!(attrs.get("size"), "");
        assert_eq!(attrs.html_attrs(), "");
        assert!(!attrs.is_skip());
    }

    #[test]
    fn test_skip_marker() {
        assert!(AttrSet::parse("-").is_skip());
        assert!(!AttrSet::parse("-,size='1'").is_skip());
    }

    #[test]
    fn test_html_attrs_filters_steering_keys() {
        let attrs = AttrSet::parse(
            "subtype='textarea',label='Notes',suffix='x',nobreak='true',rows='4',cols='20',wildcardselect",
        );
        assert_eq!(attrs.html_attrs(), " rows='4' cols='20'");
    }

    #[test]
    fn test_html_attrs_onchange() {
        let attrs = AttrSet::parse("subtype='select',size='1',onchange='true'");
        assert_eq!(
            attrs.html_attrs(),
            " size='1' onchange='javascript:this.form.submit();'"
        );
    }

    #[test]
    fn test_html_attrs_boolean_flags() {
        let attrs = AttrSet::parse("subtype='select',multiple,autofocus='autofocus'");
        assert_eq!(attrs.html_attrs(), " multiple autofocus='autofocus'");
    }

    #[test]
    fn test_html_attrs_keeps_escape() {
        let attrs = AttrSet::parse("pattern='[0-9]{1&comma;3}'");
        assert_eq!(attrs.html_attrs(), " pattern='[0-9]{1&comma;3}'");
    }

    #[test]
    fn test_comma_inside_quotes_table() {
        let cases = [
            ("size='16'", false),
            ("pattern='a,b'", true),
            ("pattern='a&comma;b'", false),
            ("size='16',maxlength='4'", false),
            ("title='x',placeholder='one,two'", true),
            ("", false),
        ];
        for (input, want) in cases {
            assert_eq!(comma_inside_quotes(input), want, "comma_inside_quotes({input:?})");
        }
    }

    #[test]
    fn test_validate_rejects_comma_space() {
        let err = validate("date_layout", "size='16', maxlength='4'").unwrap_err();
        assert!(err.to_string().contains("date_layout"));
        assert!(validate("x", "size='16' ,maxlength='4'").is_err());
    }

    #[test]
    fn test_validate_rejects_comma_in_quotes() {
        let err = validate("pattern_field", "pattern='a,b'").unwrap_err();
        assert!(matches!(err, FormwrightError::MalformedAttributes { ref field, .. } if field == "pattern_field"));
    }

    #[test]
    fn test_validate_accepts_escape() {
        assert!(validate("f", "pattern='a&comma;b',size='3'").is_ok());
    }

    #[test]
    fn test_unescape_commas() {
        assert_eq!(unescape_commas("a&comma;b&comma;c"), "a,b,c");
    }
}
