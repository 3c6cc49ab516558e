//! Widget selection.
//!
//! Every field renders as one of a closed set of [`WidgetKind`]s, chosen from
//! its semantic type and its `subtype` attribute by [`widget_for`].

use std::fmt;

use crate::attrs::AttrSet;
use crate::fields::FieldType;

/// The kinds of markup a field can render as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidgetKind {
    /// `<input type='text'>`.
    Text,
    /// `<input type='number'>`.
    Number,
    /// `<input type='checkbox'>` with a hidden fallback.
    Checkbox,
    /// `<input type='date'>`.
    Date,
    /// `<input type='time'>`.
    Time,
    /// `<textarea>`.
    Textarea,
    /// `<select>`.
    Select,
    /// `<input type='file'>`.
    File,
    /// A divider line; carries no value.
    Separator,
    /// Opens a `<fieldset>` with a legend; carries no value.
    Fieldset,
}

impl WidgetKind {
    /// The HTML name of the widget, used as the `type` of plain inputs.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::Checkbox => "checkbox",
            Self::Date => "date",
            Self::Time => "time",
            Self::Textarea => "textarea",
            Self::Select => "select",
            Self::File => "file",
            Self::Separator => "separator",
            Self::Fieldset => "fieldset",
        }
    }

    /// Whether the widget only structures the form.
    pub const fn is_structural(self) -> bool {
        matches!(self, Self::Separator | Self::Fieldset)
    }
}

impl fmt::Display for WidgetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Chooses the widget for a field.
///
/// | type | default | `subtype` choices |
/// |---|---|---|
/// | text (list) | text | separator, fieldset, date, time, textarea, select |
/// | integer, float (list) | number | select |
/// | boolean (list) | checkbox | select |
/// | bytes | file | none |
///
/// # Examples
///
/// ```
/// use formwright_forms::attrs::AttrSet;
/// use formwright_forms::fields::FieldType;
/// use formwright_forms::widgets::{widget_for, WidgetKind};
///
/// let attrs = AttrSet::parse("subtype='date'");
/// assert_eq!(widget_for(FieldType::Text, &attrs), WidgetKind::Date);
/// assert_eq!(widget_for(FieldType::Integer, &attrs), WidgetKind::Number);
/// ```
pub fn widget_for(field_type: FieldType, attrs: &AttrSet) -> WidgetKind {
    let subtype = attrs.get("subtype").to_ascii_lowercase();
    match field_type.scalar() {
        FieldType::Text => match subtype.as_str() {
            "separator" => WidgetKind::Separator,
            "fieldset" => WidgetKind::Fieldset,
            "date" => WidgetKind::Date,
            "time" => WidgetKind::Time,
            "textarea" => WidgetKind::Textarea,
            "select" => WidgetKind::Select,
            _ => WidgetKind::Text,
        },
        FieldType::Integer | FieldType::Float => {
            if subtype == "select" {
                WidgetKind::Select
            } else {
                WidgetKind::Number
            }
        }
        FieldType::Boolean => {
            if subtype == "select" {
                WidgetKind::Select
            } else {
                WidgetKind::Checkbox
            }
        }
        _ => WidgetKind::File,
    }
}
