//! # formwright
//!
//! Derive-driven HTML form, card and CSV rendering for plain Rust structs.
//!
//! This is the meta-crate that re-exports the sub-crates. Depend on
//! `formwright` to get everything, or on individual crates for finer-grained
//! control.
//!
//! Code generated by `#[derive(Record)]` refers to `::formwright_forms` by
//! default. When only this crate is a dependency, point the derive at the
//! re-export:
//!
//! ```
//! use formwright::prelude::*;
//!
//! #[derive(Record)]
//! #[record(crate = "formwright::forms")]
//! pub struct EntryForm {
//!     #[form(attrs = "maxlength='16',size='16'")]
//!     pub hashkey: String,
//!     pub check_this: bool,
//! }
//!
//! let html = FormRenderer::new().form(&EntryForm { hashkey: "abc".into(), check_this: false });
//! assert!(html.contains("name='hashkey'"));
//! ```

/// Error type, settings, logging setup, text helpers and form tokens.
pub use formwright_core as core;

/// `#[derive(Record)]`.
#[cfg(feature = "macros")]
pub use formwright_macros as macros;

/// Record model, attribute parser, widget mapper and renderer.
#[cfg(feature = "forms")]
pub use formwright_forms as forms;

// Third-party re-exports.
pub use chrono;
pub use serde_json;
pub use tracing;

/// The commonly used items in one import.
pub mod prelude {
    pub use formwright_core::logging::setup_logging;
    pub use formwright_core::{FormToken, FormwrightError, FormwrightResult, Settings};

    #[cfg(feature = "forms")]
    pub use formwright_forms::{
        FieldData, FieldDescriptor, FieldType, FieldValue, FormRenderer, JsonRecord, Record,
        SuffixPosition, Validate, Validation,
    };

    #[cfg(feature = "macros")]
    pub use formwright_macros::Record;
}
