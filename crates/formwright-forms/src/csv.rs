//! CSV line rendering.
//!
//! Values are written raw, each followed by the separator, without quoting
//! and without option label substitution.

use std::fmt::Write;

use formwright_core::logging::render_span;
use formwright_core::FormwrightResult;

use crate::record::{Record, Validate};
use crate::renderer::{FieldPlan, FormRenderer};
use crate::widgets::WidgetKind;

impl FormRenderer {
    /// Renders `record` as one CSV line terminated by `\n`.
    ///
    /// An invalid record gets its validation messages appended to the line.
    pub fn csv_line<R: Record + ?Sized>(
        &self,
        record: &R,
        sep: &str,
        validator: Option<&dyn Validate>,
    ) -> String {
        self.try_csv_line(record, sep, validator)
            .unwrap_or_else(|err| Self::diagnostic("csv", &err))
    }

    /// Renders `record` as one CSV line, returning render errors.
    pub fn try_csv_line<R: Record + ?Sized>(
        &self,
        record: &R,
        sep: &str,
        validator: Option<&dyn Validate>,
    ) -> FormwrightResult<String> {
        let record_name = record.record_name();
        let span = render_span("csv", &record_name);
        let _guard = span.enter();

        let mut w = String::new();
        for field in &record.fields()? {
            if !field.descriptor.exported {
                continue;
            }
            let plan = FieldPlan::build(field)?;
            if plan.attrs.is_skip() || plan.is_separator() || plan.kind == WidgetKind::Fieldset {
                continue;
            }
            let _ = write!(w, "{}{sep}", field.value);
        }

        if let Some(validation) = validator.map(|v| v.validate()) {
            if !validation.valid {
                w.push_str("record content is invalid, ");
                for (field, msg) in &validation.errors {
                    let _ = write!(w, "field '{field}' has error '{msg}', ");
                }
            }
        }

        w.push('\n');
        Ok(w)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use crate::fields::{Field, FieldDescriptor, FieldType, FieldValue};
    use crate::record::{Record, Validate, Validation};
    use crate::renderer::FormRenderer;
    use formwright_core::FormwrightResult;

    struct Row(Vec<Field>);

    impl Record for Row {
        fn record_name(&self) -> String {
            "Row".to_string()
        }

        fn fields(&self) -> FormwrightResult<Vec<Field>> {
            Ok(self.0.clone())
        }
    }

    impl Validate for Row {
        fn validate(&self) -> Validation {
            let mut errors = BTreeMap::new();
            if self.0.is_empty() {
                errors.insert("all".to_string(), "empty row".to_string());
            }
            Validation::from_errors(errors)
        }
    }

    fn row() -> Row {
        Row(vec![
            Field::new(FieldDescriptor::new("name", FieldType::Text), FieldValue::Text("Ann".into())),
            Field::new(FieldDescriptor::new("separator01", FieldType::Text), FieldValue::empty()),
            Field::new(
                FieldDescriptor::new("department", FieldType::Text).attrs("subtype='select'"),
                FieldValue::Text("ds".into()),
            ),
            Field::new(FieldDescriptor::new("active", FieldType::Boolean), FieldValue::Boolean(false)),
            Field::new(
                FieldDescriptor::new("internal", FieldType::Integer).exported(false),
                FieldValue::Integer(9),
            ),
            Field::new(FieldDescriptor::new("score", FieldType::Float), FieldValue::Float(1.5)),
        ])
    }

    #[test]
    fn test_csv_line() {
        let mut r = FormRenderer::new();
        r.set_options("department", [("ds", "Data Science")]);
        let record = row();
        assert_eq!(r.csv_line(&record, ";", Some(&record)), "Ann;ds;false;1.5;\n");
    }

    #[test]
    fn test_csv_custom_separator() {
        let record = row();
        assert_eq!(FormRenderer::new().csv_line(&record, "\t", None), "Ann\tds\tfalse\t1.5\t\n");
    }

    #[test]
    fn test_csv_invalid_annotation() {
        let record = Row(vec![]);
        assert_eq!(
            FormRenderer::new().csv_line(&record, ";", Some(&record)),
            "record content is invalid, field 'all' has error 'empty row', \n"
        );
    }

    #[test]
    fn test_csv_lists_and_bytes() {
        let record = Row(vec![
            Field::new(
                FieldDescriptor::new("tags", FieldType::TextList),
                FieldValue::List(vec!["a".into(), "b".into()]),
            ),
            Field::new(FieldDescriptor::new("upload", FieldType::Bytes), FieldValue::Bytes(vec![0; 4])),
        ]);
        assert_eq!(FormRenderer::new().csv_line(&record, ",", None), "a b,4 bytes,\n");
    }

    #[test]
    fn test_csv_malformed_attributes() {
        let record = Row(vec![Field::new(
            FieldDescriptor::new("x", FieldType::Text).attrs("size='1' ,max='2'"),
            FieldValue::empty(),
        )]);
        let out = FormRenderer::new().csv_line(&record, ";", None);
        assert!(out.starts_with("formwright csv: field x:"));
        assert!(FormRenderer::new().try_csv_line(&record, ";", None).is_err());
    }
}
