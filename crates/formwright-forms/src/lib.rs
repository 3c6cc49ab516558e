//! # formwright-forms
//!
//! Turns records into HTML forms, read-only cards and CSV lines.
//!
//! A record exposes its fields through the [`Record`] trait, usually
//! implemented by `#[derive(Record)]` from `formwright-macros`. Each field
//! carries an attribute string in a small mini-language (see [`attrs`]) that
//! selects the widget and decorates the markup.
//!
//! ## Modules
//!
//! - [`attrs`] - Attribute string parsing and validation
//! - [`fields`] - Field types, values, descriptors and the [`FieldData`] trait
//! - [`widgets`] - Widget kinds and type-to-widget mapping
//! - [`options`] - Option lists for select-backed fields
//! - [`record`] - The [`Record`] and [`Validate`] traits and [`JsonRecord`]
//! - [`renderer`] - [`FormRenderer`] configuration and shared markup
//! - [`form`], [`card`], [`csv`] - The three output modes

pub mod attrs;
pub mod card;
pub mod csv;
pub mod fields;
pub mod form;
pub mod options;
pub mod record;
pub mod renderer;
pub mod widgets;

pub use attrs::AttrSet;
pub use fields::{Field, FieldData, FieldDescriptor, FieldType, FieldValue};
pub use options::{OptionList, SelectOption};
pub use record::{JsonRecord, Record, Validate, Validation};
pub use renderer::{FormRenderer, SuffixPosition};
pub use widgets::{widget_for, WidgetKind};

// Used by code generated by `#[derive(Record)]`.
pub use formwright_core::{FormwrightError, FormwrightResult};
