//! Records and their optional validation capability.
//!
//! A [`Record`] lists its fields in declaration order. Structs usually get
//! the implementation from `#[derive(Record)]`; [`JsonRecord`] covers data
//! only known at runtime.

use std::collections::BTreeMap;

use formwright_core::{FormwrightError, FormwrightResult};
use serde_json::Value;

use crate::fields::{Field, FieldDescriptor, FieldType, FieldValue};

/// A value the renderers can turn into markup.
pub trait Record {
    /// The type name, source of the optional headline.
    fn record_name(&self) -> String;

    /// The fields in declaration order.
    ///
    /// Fails with [`FormwrightError::NotARecord`] when the underlying value
    /// has no fields at all.
    fn fields(&self) -> FormwrightResult<Vec<Field>>;
}

impl<T: Record + ?Sized> Record for &T {
    fn record_name(&self) -> String {
        (**self).record_name()
    }

    fn fields(&self) -> FormwrightResult<Vec<Field>> {
        (**self).fields()
    }
}

/// The outcome of business validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Validation {
    /// Messages by external key.
    pub errors: BTreeMap<String, String>,
    /// Whether the record may be processed further.
    pub valid: bool,
}

impl Validation {
    /// A valid outcome without messages.
    pub const fn ok() -> Self {
        Self {
            errors: BTreeMap::new(),
            valid: true,
        }
    }

    /// An outcome that is valid exactly when `errors` is empty.
    pub fn from_errors(errors: BTreeMap<String, String>) -> Self {
        let valid = errors.is_empty();
        Self { errors, valid }
    }
}

/// Business validation of a record.
///
/// Passed to the card and CSV renderers alongside the record. The messages
/// fit [`FormRenderer::add_errors`](crate::renderer::FormRenderer::add_errors)
/// for re-rendering the form.
pub trait Validate {
    /// Checks the record.
    fn validate(&self) -> Validation;
}

/// A record backed by a JSON value.
///
/// Field descriptors are supplied explicitly, or inferred from the value
/// with [`JsonRecord::infer`]. Descriptor names are looked up as object
/// keys; missing keys render empty.
///
/// # Examples
///
/// ```
/// use formwright_forms::fields::{FieldDescriptor, FieldType};
/// use formwright_forms::record::{JsonRecord, Record};
///
/// let value = serde_json::json!({"department": "ds", "items": 3});
/// let record = JsonRecord::new("EntryForm", &value)
///     .field(FieldDescriptor::new("department", FieldType::Text).attrs("subtype='select'"))
///     .field(FieldDescriptor::new("items", FieldType::Integer));
/// assert_eq!(record.fields().unwrap().len(), 2);
///
/// let not_an_object = serde_json::json!([1, 2]);
/// assert!(JsonRecord::new("EntryForm", &not_an_object).fields().is_err());
/// ```
#[derive(Debug, Clone)]
pub struct JsonRecord<'a> {
    name: String,
    descriptors: Vec<FieldDescriptor>,
    value: &'a Value,
}

impl<'a> JsonRecord<'a> {
    /// Wraps `value` without any descriptors.
    pub fn new(name: impl Into<String>, value: &'a Value) -> Self {
        Self {
            name: name.into(),
            descriptors: Vec::new(),
            value,
        }
    }

    /// Wraps `value` with one descriptor per object key.
    ///
    /// Fields follow the order of the keys in the JSON document. The field
    /// type follows the JSON type; arrays take the type of their
    /// first element. Non-objects get no descriptors and still fail in
    /// [`Record::fields`].
    pub fn infer(name: impl Into<String>, value: &'a Value) -> Self {
        let descriptors = value
            .as_object()
            .map(|obj| {
                obj.iter()
                    .map(|(key, v)| FieldDescriptor::new(key.clone(), infer_field_type(v)))
                    .collect()
            })
            .unwrap_or_default();
        Self {
            name: name.into(),
            descriptors,
            value,
        }
    }

    /// Adds a descriptor.
    pub fn field(mut self, descriptor: FieldDescriptor) -> Self {
        self.descriptors.push(descriptor);
        self
    }
}

impl Record for JsonRecord<'_> {
    fn record_name(&self) -> String {
        self.name.clone()
    }

    fn fields(&self) -> FormwrightResult<Vec<Field>> {
        let obj = self
            .value
            .as_object()
            .ok_or_else(|| FormwrightError::NotARecord(json_kind(self.value).to_string()))?;

        Ok(self
            .descriptors
            .iter()
            .map(|d| {
                let value = obj
                    .get(&d.name)
                    .map_or_else(FieldValue::empty, |v| json_to_field_value(d.field_type, v));
                Field::new(d.clone(), value)
            })
            .collect())
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn infer_field_type(value: &Value) -> FieldType {
    match value {
        Value::Bool(_) => FieldType::Boolean,
        Value::Number(n) if n.is_f64() => FieldType::Float,
        Value::Number(_) => FieldType::Integer,
        Value::Array(items) => match items.first().map(infer_field_type) {
            Some(FieldType::Boolean) => FieldType::BooleanList,
            Some(FieldType::Integer) => FieldType::IntegerList,
            Some(FieldType::Float) => FieldType::FloatList,
            _ => FieldType::TextList,
        },
        _ => FieldType::Text,
    }
}

fn json_scalar_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn json_to_field_value(field_type: FieldType, value: &Value) -> FieldValue {
    match value {
        Value::Null => FieldValue::empty(),
        Value::Bool(b) => FieldValue::Boolean(*b),
        Value::Number(n) => n.as_i64().map_or_else(
            || FieldValue::Float(n.as_f64().unwrap_or_default()),
            FieldValue::Integer,
        ),
        Value::String(s) if field_type == FieldType::Bytes => FieldValue::Bytes(s.as_bytes().to_vec()),
        Value::String(s) => FieldValue::Text(s.clone()),
        Value::Array(items) if field_type == FieldType::Bytes => FieldValue::Bytes(
            items
                .iter()
                .filter_map(|v| v.as_u64().and_then(|b| u8::try_from(b).ok()))
                .collect(),
        ),
        Value::Array(items) => FieldValue::List(items.iter().map(json_scalar_text).collect()),
        Value::Object(_) => FieldValue::Text(value.to_string()),
    }
}
