//! Read-only card rendering.
//!
//! A card lists every field as a label and its value. Option keys of
//! select-backed fields are replaced by their labels, status carriers are
//! folded into one status line, and an invalid record shows its validation
//! messages instead of the values.

use std::fmt::Write;

use formwright_core::logging::render_span;
use formwright_core::FormwrightResult;

use crate::attrs::unescape_commas;
use crate::fields::FieldValue;
use crate::options::OptionList;
use crate::record::{Record, Validate};
use crate::renderer::{FieldPlan, FormRenderer, SuffixPosition, CONTAINER_CLOSE};
use crate::widgets::WidgetKind;

enum CardItem {
    Separator,
    Legend(String),
    Entry {
        label: String,
        value: String,
        suffix: String,
    },
}

impl FormRenderer {
    /// Renders `record` as a read-only card.
    ///
    /// When `validator` reports the record invalid, the card lists the
    /// validation messages instead of the values.
    pub fn card<R: Record + ?Sized>(&self, record: &R, validator: Option<&dyn Validate>) -> String {
        self.try_card(record, validator)
            .unwrap_or_else(|err| Self::diagnostic("card", &err))
    }

    /// Renders `record` as a read-only card, returning render errors.
    pub fn try_card<R: Record + ?Sized>(
        &self,
        record: &R,
        validator: Option<&dyn Validate>,
    ) -> FormwrightResult<String> {
        let record_name = record.record_name();
        let span = render_span("card", &record_name);
        let _guard = span.enter();

        let fields = record.fields()?;
        let mut items = Vec::with_capacity(fields.len());
        let mut status = String::new();

        for field in &fields {
            if !field.descriptor.exported {
                continue;
            }
            let plan = FieldPlan::build(field)?;
            if plan.attrs.is_skip() {
                continue;
            }

            if field.descriptor.is_status_carrier() {
                if let FieldValue::Text(msg) = &field.value {
                    if !status.is_empty() {
                        status.push_str(" - ");
                    }
                    status.push_str(msg);
                }
                continue;
            }

            if plan.is_separator() {
                items.push(CardItem::Separator);
                continue;
            }
            if plan.kind == WidgetKind::Fieldset {
                items.push(CardItem::Legend(plan.label));
                continue;
            }
            if self.skip_empty && field.value.is_empty() {
                continue;
            }

            let value = display_value(&field.value, self.options(plan.key()));
            items.push(CardItem::Entry {
                label: plan.label,
                value,
                suffix: plan.suffix,
            });
        }

        let mut w = self.container_open(&record_name);
        w.push_str("<ul>\n");

        let validation = validator.map(|v| v.validate());
        match validation {
            Some(v) if !v.valid => {
                w.push_str("\t<li>\n");
                let _ = writeln!(w, "\t  Record content is invalid: {status}");
                for (field, msg) in &v.errors {
                    let _ = writeln!(w, "\t  Field: {field} - {msg}");
                }
                w.push_str("\t</li>\n");
            }
            _ => {
                for item in &items {
                    self.write_item(&mut w, item);
                }
            }
        }

        w.push_str("</ul>\n");
        w.push_str(CONTAINER_CLOSE);

        let html = unescape_commas(&w);
        tracing::debug!(items = items.len(), bytes = html.len(), "rendered card");
        Ok(html)
    }

    fn write_item(&self, w: &mut String, item: &CardItem) {
        match item {
            CardItem::Separator => w.push_str("\t<div class='separator'></div>\n"),
            CardItem::Legend(label) => {
                let _ = writeln!(w, "\t<li class='card-legend' >{label}</li>");
            }
            CardItem::Entry { label, value, suffix } => {
                w.push_str("\t<li>\n");
                if self.suffix_position == SuffixPosition::BelowLabel && !suffix.is_empty() {
                    let _ = write!(
                        w,
                        "\t<div class='card-label' >{label}:\n\t\t\t\t\t<br><span class='postlabel' >({suffix})</span>\n\t\t\t\t</div>"
                    );
                } else {
                    let _ = write!(w, "\t<div class='card-label' >{label}:</div>");
                }
                let _ = writeln!(w, "  {value}  ");
                if self.suffix_position == SuffixPosition::AfterValue && !suffix.is_empty() {
                    let _ = write!(w, "<span class='postlabel' >{suffix}</span>");
                }
                w.push_str("\t</li>\n");
            }
        }
    }
}

/// The displayed value, with option keys replaced by their labels.
fn display_value(value: &FieldValue, options: Option<&OptionList>) -> String {
    let Some(options) = options else {
        return value.to_string();
    };
    let substitute = |raw: &str| options.label_for(raw).unwrap_or(raw).to_string();
    match value {
        FieldValue::List(items) => items
            .iter()
            .map(|item| substitute(item))
            .collect::<Vec<_>>()
            .join(" "),
        other => {
            let raw = other.to_string();
            if raw.is_empty() {
                raw
            } else {
                substitute(&raw)
            }
        }
    }
}
