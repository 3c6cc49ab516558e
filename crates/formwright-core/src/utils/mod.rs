//! Utility functions for formwright.
//!
//! - [`text`]: label helpers (`labelize`, `access_keyify`).

pub mod text;
