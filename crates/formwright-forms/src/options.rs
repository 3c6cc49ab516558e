//! Option lists for select-backed fields.

use std::fmt::Write;

/// One `(key, label)` entry of a select.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    /// The submitted value.
    pub key: String,
    /// The displayed text.
    pub label: String,
}

/// An ordered list of select options.
///
/// # Examples
///
/// ```
/// use formwright_forms::options::OptionList;
///
/// let opts = OptionList::from_pairs([("ds", "Data Science"), ("hr", "Human Resources")]);
/// assert_eq!(opts.first_key(), "ds");
/// assert_eq!(opts.label_for("hr"), Some("Human Resources"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionList {
    entries: Vec<SelectOption>,
}

impl OptionList {
    /// Creates an empty list.
    pub const fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Builds a list from `(key, label)` pairs, keeping their order.
    pub fn from_pairs<I, K, L>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, L)>,
        K: Into<String>,
        L: Into<String>,
    {
        Self {
            entries: pairs
                .into_iter()
                .map(|(key, label)| SelectOption {
                    key: key.into(),
                    label: label.into(),
                })
                .collect(),
        }
    }

    /// Appends an option.
    pub fn push(&mut self, key: impl Into<String>, label: impl Into<String>) {
        self.entries.push(SelectOption {
            key: key.into(),
            label: label.into(),
        });
    }

    /// The number of options.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the list has no options.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the options in order.
    pub fn iter(&self) -> impl Iterator<Item = &SelectOption> {
        self.entries.iter()
    }

    /// The key of the first option, or `""`.
    pub fn first_key(&self) -> &str {
        self.entries.first().map_or("", |o| o.key.as_str())
    }

    /// The non-empty label registered for `key`.
    pub fn label_for(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|o| o.key == key && !o.label.is_empty())
            .map(|o| o.label.as_str())
    }

    /// Renders the `<option>` tags, marking every key in `selected`.
    pub fn to_html(&self, selected: &[String]) -> String {
        let mut out = String::new();
        for o in &self.entries {
            if selected.iter().any(|s| *s == o.key) {
                let _ = writeln!(out, "\t\t<option value='{}' selected >{}</option>", o.key, o.label);
            } else {
                let _ = writeln!(out, "\t\t<option value='{}'          >{}</option>", o.key, o.label);
            }
        }
        out
    }
}

impl<'a> IntoIterator for &'a OptionList {
    type Item = &'a SelectOption;
    type IntoIter = std::slice::Iter<'a, SelectOption>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn departments() -> OptionList {
        OptionList::from_pairs([("", "Please choose"), ("ds", "Data Science"), ("hr", "Human Resources")])
    }

    #[test]
    fn test_first_key() {
        assert_eq!(departments().first_key(), "");
        assert_eq!(OptionList::new().first_key(), "");
        assert_eq!(OptionList::from_pairs([("a", "A")]).first_key(), "a");
    }

    #[test]
    fn test_label_for_skips_empty_labels() {
        let mut opts = OptionList::from_pairs([("x", "")]);
        assert_eq!(opts.label_for("x"), None);
        opts.push("x", "Ex");
        assert_eq!(opts.label_for("x"), Some("Ex"));
        assert_eq!(opts.label_for("nope"), None);
    }

    #[test]
    fn test_to_html_single_selection() {
        let html = departments().to_html(&["ds".to_string()]);
        assert_eq!(html.matches(" selected ").count(), 1);
        assert!(html.contains("<option value='ds' selected >Data Science</option>"));
        assert!(html.contains("<option value='hr'          >Human Resources</option>"));
    }

    #[test]
    fn test_to_html_multi_selection() {
        let html = departments().to_html(&["ds".to_string(), "hr".to_string()]);
        assert_eq!(html.matches(" selected ").count(), 2);
    }

    #[test]
    fn test_to_html_empty() {
        assert_eq!(OptionList::new().to_html(&[]), "");
    }

    #[test]
    fn test_len_and_iter() {
        let opts = departments();
        assert_eq!(opts.len(), 3);
        assert!(!opts.is_empty());
        let keys: Vec<&str> = opts.iter().map(|o| o.key.as_str()).collect();
        assert_eq!(keys, ["", "ds", "hr"]);
    }
}
