//! The record field model.
//!
//! A [`FieldDescriptor`] describes one field of a record: its source name,
//! semantic [`FieldType`], visibility, external key and attribute string.
//! Paired with the field's current [`FieldValue`] it forms a [`Field`], the
//! unit every renderer iterates over.
//!
//! [`FieldData`] connects Rust types to the model. `#[derive(Record)]` uses it
//! to obtain both the semantic type (at compile time) and the value of every
//! field.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use formwright_core::utils::text::labelize;

use crate::attrs::AttrSet;

/// The semantic type of a field, which drives widget selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    /// A string.
    Text,
    /// Any integer.
    Integer,
    /// A floating point number.
    Float,
    /// A boolean.
    Boolean,
    /// A byte sequence, typically an uploaded file.
    Bytes,
    /// A sequence of strings.
    TextList,
    /// A sequence of integers.
    IntegerList,
    /// A sequence of floats.
    FloatList,
    /// A sequence of booleans.
    BooleanList,
}

impl FieldType {
    /// Whether this is a sequence-of-primitive type.
    pub const fn is_multi(self) -> bool {
        matches!(
            self,
            Self::TextList | Self::IntegerList | Self::FloatList | Self::BooleanList
        )
    }

    /// The scalar counterpart of a sequence type; scalars map to themselves.
    pub const fn scalar(self) -> Self {
        match self {
            Self::TextList => Self::Text,
            Self::IntegerList => Self::Integer,
            Self::FloatList => Self::Float,
            Self::BooleanList => Self::Boolean,
            other => other,
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Text => "text",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Boolean => "boolean",
            Self::Bytes => "bytes",
            Self::TextList => "text list",
            Self::IntegerList => "integer list",
            Self::FloatList => "float list",
            Self::BooleanList => "boolean list",
        };
        write!(f, "{name}")
    }
}

/// The current value of a field.
///
/// The [`Display`](fmt::Display) rendering is what cards and CSV lines show:
/// booleans as `true`/`false`, byte sequences as their length, and lists
/// joined by single spaces.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// A string value.
    Text(String),
    /// An integer value.
    Integer(i64),
    /// A floating point value.
    Float(f64),
    /// A boolean value.
    Boolean(bool),
    /// Raw bytes.
    Bytes(Vec<u8>),
    /// A sequence of primitives, already converted to text.
    List(Vec<String>),
}

impl FieldValue {
    /// The empty text value, used for absent optional fields.
    pub const fn empty() -> Self {
        Self::Text(String::new())
    }

    /// Whether the displayed value is empty.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(s) => s.is_empty(),
            Self::List(items) => items.iter().all(String::is_empty),
            _ => false,
        }
    }

    /// The truth value used for checkboxes.
    pub fn is_true(&self) -> bool {
        match self {
            Self::Boolean(b) => *b,
            Self::Text(s) => s.eq_ignore_ascii_case("true"),
            Self::Integer(i) => *i != 0,
            _ => false,
        }
    }

    /// The value as individual elements; scalars yield one element.
    pub fn elements(&self) -> Vec<String> {
        match self {
            Self::List(items) => items.clone(),
            other => vec![other.to_string()],
        }
    }

    /// The value as placed into an input's `value` attribute.
    ///
    /// Lists are joined by commas.
    pub fn input_value(&self) -> String {
        match self {
            Self::List(items) => items.join(","),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => write!(f, "{s}"),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Bytes(b) => write!(f, "{} bytes", b.len()),
            Self::List(items) => write!(f, "{}", items.join(" ")),
        }
    }
}

/// Static description of one record field.
///
/// # Examples
///
/// ```
/// use formwright_forms::fields::{FieldDescriptor, FieldType};
///
/// let d = FieldDescriptor::new("date_layout", FieldType::Text)
///     .attrs("accesskey='t',maxlength='16',size='16'")
///     .suffix("optional");
/// assert_eq!(d.key, "date_layout");
/// assert_eq!(d.resolved_label(&d.attr_set()), "Date layout");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// The source field name.
    pub name: String,
    /// The semantic type.
    pub field_type: FieldType,
    /// Whether the field is public; private fields are never rendered.
    pub exported: bool,
    /// The external key: input name, error map key and option table key.
    pub key: String,
    /// The attribute string.
    pub attrs: String,
    /// Label override, taking precedence over the `label` attribute.
    pub label: Option<String>,
    /// Suffix override, taking precedence over the `suffix` attribute.
    pub suffix: Option<String>,
}

impl FieldDescriptor {
    /// Creates an exported descriptor whose key equals its name.
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        let name = name.into();
        Self {
            key: name.clone(),
            name,
            field_type,
            exported: true,
            attrs: String::new(),
            label: None,
            suffix: None,
        }
    }

    /// Sets the external key.
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// Sets the attribute string.
    pub fn attrs(mut self, attrs: impl Into<String>) -> Self {
        self.attrs = attrs.into();
        self
    }

    /// Sets the label override.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Sets the suffix override.
    pub fn suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = Some(suffix.into());
        self
    }

    /// Sets whether the field is exported.
    pub const fn exported(mut self, exported: bool) -> Self {
        self.exported = exported;
        self
    }

    /// Parses the attribute string.
    pub fn attr_set(&self) -> AttrSet {
        AttrSet::parse(&self.attrs)
    }

    /// The label: the override, else the `label` attribute, else the
    /// labelized key.
    pub fn resolved_label(&self, attrs: &AttrSet) -> String {
        if let Some(label) = &self.label {
            return label.clone();
        }
        match attrs.get("label") {
            "" => labelize(&self.key),
            label => label.to_string(),
        }
    }

    /// The suffix: the override, else the `suffix` attribute.
    pub fn resolved_suffix(&self, attrs: &AttrSet) -> String {
        self.suffix
            .clone()
            .unwrap_or_else(|| attrs.get("suffix").to_string())
    }

    /// Whether the name or key marks this field as a separator.
    pub fn is_separator(&self) -> bool {
        starts_with_ignore_case(&self.name, "separator") || starts_with_ignore_case(&self.key, "separator")
    }

    /// Whether this field carries a status message instead of data.
    pub fn is_status_carrier(&self) -> bool {
        [self.name.as_str(), self.key.as_str()]
            .iter()
            .any(|s| s.eq_ignore_ascii_case("status") || s.eq_ignore_ascii_case("msg"))
    }
}

fn starts_with_ignore_case(s: &str, prefix: &str) -> bool {
    s.get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

/// A descriptor together with the field's current value.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    /// The static description.
    pub descriptor: FieldDescriptor,
    /// The current value.
    pub value: FieldValue,
}

impl Field {
    /// Pairs a descriptor with a value.
    pub const fn new(descriptor: FieldDescriptor, value: FieldValue) -> Self {
        Self { descriptor, value }
    }
}

/// A Rust type usable as a record field.
pub trait FieldData {
    /// The semantic type of this Rust type.
    const FIELD_TYPE: FieldType;

    /// Converts the value for rendering.
    fn to_field_value(&self) -> FieldValue;
}

impl FieldData for String {
    const FIELD_TYPE: FieldType = FieldType::Text;

    fn to_field_value(&self) -> FieldValue {
        FieldValue::Text(self.clone())
    }
}

impl FieldData for &str {
    const FIELD_TYPE: FieldType = FieldType::Text;

    fn to_field_value(&self) -> FieldValue {
        FieldValue::Text((*self).to_string())
    }
}

macro_rules! impl_field_data_int {
    (lossless: $($t:ty),*) => {
        $(
            impl FieldData for $t {
                const FIELD_TYPE: FieldType = FieldType::Integer;

                fn to_field_value(&self) -> FieldValue {
                    FieldValue::Integer(i64::from(*self))
                }
            }
        )*
    };
    (wide: $($t:ty),*) => {
        $(
            impl FieldData for $t {
                const FIELD_TYPE: FieldType = FieldType::Integer;

                fn to_field_value(&self) -> FieldValue {
                    i64::try_from(*self)
                        .map_or_else(|_| FieldValue::Text(self.to_string()), FieldValue::Integer)
                }
            }
        )*
    };
}

impl_field_data_int!(lossless: i8, i16, i32, i64, u8, u16, u32);
impl_field_data_int!(wide: u64, usize, isize, i128, u128);

impl FieldData for f64 {
    const FIELD_TYPE: FieldType = FieldType::Float;

    fn to_field_value(&self) -> FieldValue {
        FieldValue::Float(*self)
    }
}

impl FieldData for f32 {
    const FIELD_TYPE: FieldType = FieldType::Float;

    fn to_field_value(&self) -> FieldValue {
        // Through the shortest decimal form, so 0.1f32 shows as 0.1.
        let widened = self.to_string().parse::<f64>().unwrap_or_else(|_| f64::from(*self));
        FieldValue::Float(widened)
    }
}

impl FieldData for bool {
    const FIELD_TYPE: FieldType = FieldType::Boolean;

    fn to_field_value(&self) -> FieldValue {
        FieldValue::Boolean(*self)
    }
}

impl FieldData for Vec<u8> {
    const FIELD_TYPE: FieldType = FieldType::Bytes;

    fn to_field_value(&self) -> FieldValue {
        FieldValue::Bytes(self.clone())
    }
}

macro_rules! impl_field_data_list {
    ($($t:ty => $ft:expr),* $(,)?) => {
        $(
            impl FieldData for Vec<$t> {
                const FIELD_TYPE: FieldType = $ft;

                fn to_field_value(&self) -> FieldValue {
                    FieldValue::List(self.iter().map(ToString::to_string).collect())
                }
            }
        )*
    };
}

impl_field_data_list!(
    String => FieldType::TextList,
    i64 => FieldType::IntegerList,
    i32 => FieldType::IntegerList,
    f64 => FieldType::FloatList,
    bool => FieldType::BooleanList,
);

impl<T: FieldData> FieldData for Option<T> {
    const FIELD_TYPE: FieldType = T::FIELD_TYPE;

    fn to_field_value(&self) -> FieldValue {
        self.as_ref().map_or_else(FieldValue::empty, FieldData::to_field_value)
    }
}

impl FieldData for NaiveDate {
    const FIELD_TYPE: FieldType = FieldType::Text;

    fn to_field_value(&self) -> FieldValue {
        FieldValue::Text(self.format("%Y-%m-%d").to_string())
    }
}

impl FieldData for NaiveTime {
    const FIELD_TYPE: FieldType = FieldType::Text;

    fn to_field_value(&self) -> FieldValue {
        FieldValue::Text(self.format("%H:%M").to_string())
    }
}

impl FieldData for NaiveDateTime {
    const FIELD_TYPE: FieldType = FieldType::Text;

    fn to_field_value(&self) -> FieldValue {
        FieldValue::Text(self.format("%Y-%m-%dT%H:%M").to_string())
    }
}
