//! # formwright-core
//!
//! Core types shared by the formwright crates: the error type, renderer
//! settings and their loader, tracing setup, text helpers used for labels,
//! and the hour-granular form token.
//!
//! ## Modules
//!
//! - [`error`] - Error type and result alias
//! - [`settings`] - Renderer and logging settings with defaults
//! - [`settings_loader`] - Loading settings from TOML/JSON files and the environment
//! - [`logging`] - Tracing-based logging integration
//! - [`token`] - Anti-forgery form tokens
//! - [`utils`] - Text helpers (`labelize`, `access_keyify`)

pub mod error;
pub mod logging;
pub mod settings;
pub mod settings_loader;
pub mod token;
pub mod utils;

// Re-export the most commonly used types at the crate root.
pub use error::{FormwrightError, FormwrightResult};
pub use settings::Settings;
pub use token::FormToken;
