//! Core error types for formwright.
//!
//! [`FormwrightError`] covers the failure classes of the renderer and the
//! token scheme: malformed field attribute strings, values that are not
//! records, expired form tokens, and configuration problems.
//!
//! Rendering failures are caller errors. The public render calls turn them
//! into an inline diagnostic string instead of propagating them; the
//! `try_*` variants hand back the typed error.

use thiserror::Error;

/// The primary error type for formwright.
#[derive(Error, Debug)]
pub enum FormwrightError {
    // ── Caller input ─────────────────────────────────────────────────

    /// A field's attribute string violates the attribute mini-language.
    #[error("field {field}: attribute string {reason}")]
    MalformedAttributes {
        /// External key of the offending field.
        field: String,
        /// What is wrong with the attribute string.
        reason: String,
    },

    /// The value handed to a renderer is not a record.
    #[error("argument must be a record - is {0}")]
    NotARecord(String),

    // ── Tokens ───────────────────────────────────────────────────────

    /// The form token was not issued within the accepted window.
    #[error("form token was not issued within the last {0} hours - please reload the form")]
    TokenExpired(i64),

    // ── Configuration ────────────────────────────────────────────────

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    // ── IO ───────────────────────────────────────────────────────────

    /// An I/O error occurred.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl FormwrightError {
    /// Creates a [`FormwrightError::MalformedAttributes`].
    pub fn malformed(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedAttributes {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Returns `true` for errors caused by the caller's input rather than
    /// by configuration or the environment.
    pub const fn is_caller_error(&self) -> bool {
        match self {
            Self::MalformedAttributes { .. } | Self::NotARecord(_) | Self::TokenExpired(_) => true,
            Self::ConfigurationError(_) | Self::IoError(_) => false,
        }
    }
}

/// A convenience type alias for `Result<T, FormwrightError>`.
pub type FormwrightResult<T> = Result<T, FormwrightError>;
