//! HTML form rendering.

use std::fmt::Write;

use formwright_core::logging::render_span;
use formwright_core::utils::text::access_keyify;
use formwright_core::FormwrightResult;

use crate::attrs::unescape_commas;
use crate::fields::{FieldType, FieldValue};
use crate::record::Record;
use crate::renderer::{FieldPlan, FormRenderer, CONTAINER_CLOSE, GLOBAL_ERROR_KEY};
use crate::widgets::WidgetKind;

impl FormRenderer {
    /// Renders `record` as an HTML form.
    ///
    /// A malformed attribute string or a value that is not a record yields a
    /// one-line diagnostic instead of markup; see [`try_form`](Self::try_form).
    pub fn form<R: Record + ?Sized>(&self, record: &R) -> String {
        self.try_form(record)
            .unwrap_or_else(|err| Self::diagnostic("form", &err))
    }

    /// Renders `record` as an HTML form, returning render errors.
    pub fn try_form<R: Record + ?Sized>(&self, record: &R) -> FormwrightResult<String> {
        let record_name = record.record_name();
        let span = render_span("form", &record_name);
        let _guard = span.enter();

        let fields = record.fields()?;
        let mut w = self.container_open(&record_name);

        if self.form_tag {
            let upload = fields
                .iter()
                .any(|f| f.descriptor.field_type == FieldType::Bytes);
            if upload {
                let _ = writeln!(
                    w,
                    "<form  name='{}'  method='post'   enctype='multipart/form-data'>",
                    self.name
                );
            } else {
                let _ = writeln!(w, "<form name='{}'  method='{}' >", self.name, self.method);
            }
        }

        if let Some(msg) = self.error(GLOBAL_ERROR_KEY) {
            let _ = writeln!(w, "\t<p class='error-block' >{msg}</p>");
        }

        let _ = writeln!(
            w,
            "\t<input name='token'    type='hidden'   value='{}' />",
            self.form_token()
        );

        let spacer = self.vertical_spacer_html();
        let mut need_submit = false;
        let mut fieldset_open = false;
        let mut focus_pending = self.focus_first_error;

        for field in &fields {
            if !field.descriptor.exported {
                continue;
            }
            let plan = FieldPlan::build(field)?;
            if plan.attrs.is_skip() || field.descriptor.is_status_carrier() {
                continue;
            }

            let key = plan.key();
            let error = self.error(key);
            if let Some(msg) = error {
                let _ = writeln!(w, "\t<p class='error-block' >{msg}</p>");
            }

            let plain_attrs = plan.attrs.html_attrs();
            let mut html_attrs = plain_attrs.clone();
            if focus_pending && error.is_some() && !plan.attrs.contains("autofocus") {
                html_attrs.push_str(" autofocus");
                focus_pending = false;
            }

            if !plan.kind.is_structural() {
                let valign = if plan.kind == WidgetKind::Textarea {
                    "vertical-align: top;"
                } else {
                    ""
                };
                let _ = writeln!(
                    w,
                    "\t<label for='{}' style='{valign}' >{}</label>",
                    label_target(plan.kind, key, &field.value),
                    access_keyify(&plan.label, plan.attrs.get("accesskey"))
                );
            }

            let value = &field.value;
            match plan.kind {
                WidgetKind::Checkbox => {
                    need_submit = true;
                    w.push_str(&checkboxes(key, value, &html_attrs, &plain_attrs));
                }
                WidgetKind::File => {
                    need_submit = true;
                    let _ = write!(
                        w,
                        "\t<input type='file'   name='{key}'     id='{key}'     value='ignored.json' {html_attrs} />"
                    );
                }
                WidgetKind::Date | WidgetKind::Time => {
                    need_submit = true;
                    let _ = write!(
                        w,
                        "\t<input type='{}'   name='{key}'     id='{key}'     value='{}' {html_attrs} />",
                        plan.kind,
                        value.input_value()
                    );
                }
                WidgetKind::Textarea => {
                    need_submit = true;
                    let _ = write!(
                        w,
                        "\t<textarea name='{key}' id='{key}' {html_attrs} >{value}</textarea>"
                    );
                }
                WidgetKind::Select => {
                    if !plan.attrs.contains("onchange") {
                        need_submit = true;
                    }
                    w.push_str(&self.select(&plan, &html_attrs));
                }
                WidgetKind::Separator => {
                    w.push_str("\t<div class='separator'></div>");
                }
                WidgetKind::Fieldset => {
                    if fieldset_open {
                        w.push_str("</fieldset>\n");
                    }
                    let _ = write!(w, "<fieldset>\t<legend>&nbsp;{}&nbsp;</legend>", plan.label);
                    fieldset_open = true;
                }
                WidgetKind::Text | WidgetKind::Number => {
                    need_submit = true;
                    let _ = write!(
                        w,
                        "\t<input type='{}' name='{key}' id='{key}' value='{}' {html_attrs} />",
                        plan.kind,
                        value.input_value()
                    );
                }
            }

            if !plan.suffix.is_empty() {
                let _ = write!(w, "<span class='postlabel' >{}</span>", plan.suffix);
            }

            if !plan.kind.is_structural() && !plan.attrs.flag("nobreak") {
                w.push('\n');
                w.push_str(&spacer);
            }

            w.push('\n');
        }

        if fieldset_open {
            w.push_str("</fieldset>\n");
        }

        if need_submit || self.force_submit {
            let _ = writeln!(
                w,
                "\t<button  type='submit' name='btnSubmit' value='1' accesskey='s'  ><b>S</b>ubmit</button>\n{spacer}"
            );
        } else {
            w.push_str("\t<input   type='hidden' name='btnSubmit' value='1' />\n");
        }

        if self.form_tag {
            w.push_str("</form>\n");
        }
        w.push_str(CONTAINER_CLOSE);

        let html = unescape_commas(&w);
        tracing::debug!(fields = fields.len(), bytes = html.len(), "rendered form");
        Ok(html)
    }

    /// The select element, with an optional filter input.
    fn select(&self, plan: &FieldPlan<'_>, html_attrs: &str) -> String {
        let key = plan.key();
        let selected = plan.field.value.elements();
        let options = self
            .options(key)
            .map(|opts| opts.to_html(&selected))
            .unwrap_or_default();

        let mut out = String::from("\t<div class='select-arrow'>\n");
        if plan.attrs.flag("wildcardselect") {
            let _ = writeln!(
                out,
                "\t<input type='text' class='wildcardselect' id='{key}_filter' placeholder='&#x1F50D;' \
                 oninput='var f=this.value.toLowerCase();for(const o of document.getElementById(\"{key}\").options){{o.hidden=f!==\"\"&&!o.text.toLowerCase().includes(f);}}' />"
            );
        }
        let _ = writeln!(out, "\t<select name='{key}' id='{key}' {html_attrs}>");
        out.push_str(&options);
        out.push_str("\t</select>\n");
        out.push_str("\t</div>");
        out
    }
}

/// The id a field's label points at: the first checkbox of a boolean list,
/// the key otherwise.
fn label_target(kind: WidgetKind, key: &str, value: &FieldValue) -> String {
    match value {
        FieldValue::List(items) if kind == WidgetKind::Checkbox && !items.is_empty() => {
            format!("{key}_0")
        }
        _ => key.to_string(),
    }
}

/// A checkbox plus its hidden `false` fallback; boolean lists get one pair
/// per entry. `first_attrs` goes on the first checkbox only, `rest_attrs` on
/// the others.
fn checkboxes(key: &str, value: &FieldValue, first_attrs: &str, rest_attrs: &str) -> String {
    let pair = |id: &str, checked: bool, html_attrs: &str| {
        let checked = if checked { "checked" } else { "" };
        format!(
            "\t<input type='checkbox' name='{key}' id='{id}' value='true' {checked} {html_attrs} />\n\
             \t<input type='hidden' name='{key}' value='false' />"
        )
    };

    match value {
        FieldValue::List(items) => items
            .iter()
            .enumerate()
            .map(|(idx, item)| {
                let html_attrs = if idx == 0 { first_attrs } else { rest_attrs };
                pair(&format!("{key}_{idx}"), item.eq_ignore_ascii_case("true"), html_attrs)
            })
            .collect::<Vec<_>>()
            .join("\n"),
        other => pair(key, other.is_true(), first_attrs),
    }
}
