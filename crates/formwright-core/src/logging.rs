//! Logging integration for formwright.
//!
//! Provides helpers for configuring [`tracing`]-based logging from
//! [`Settings`](crate::settings::Settings) and for creating per-render spans.

use tracing_subscriber::fmt;
use tracing_subscriber::EnvFilter;

use crate::settings::Settings;

/// Installs the global tracing subscriber described by `settings`.
///
/// `log_level` is an `EnvFilter` directive string ("info",
/// "formwright_forms=debug", ...); an unparsable one falls back to `info`.
/// Debug mode logs pretty, multi-line events with source locations. Otherwise
/// each event is one flat JSON object carrying the enclosing render span, so
/// `mode` and `record` appear next to the event fields. A subscriber that is
/// already installed is left in place.
pub fn setup_logging(settings: &Settings) {
    let builder = fmt::Subscriber::builder().with_env_filter(env_filter(&settings.log_level));

    let installed = if settings.debug {
        builder
            .with_file(true)
            .with_line_number(true)
            .pretty()
            .try_init()
    } else {
        builder
            .with_target(false)
            .json()
            .flatten_event(true)
            .with_current_span(true)
            .with_span_list(false)
            .try_init()
    };

    if installed.is_ok() {
        tracing::debug!(level = %settings.log_level, json = !settings.debug, "logging initialised");
    }
}

fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Creates a tracing span for one render call.
///
/// # Examples
///
/// ```
/// use formwright_core::logging::render_span;
///
/// let span = render_span("form", "EntryForm");
/// let _guard = span.enter();
/// tracing::debug!("rendering");
/// ```
pub fn render_span(mode: &str, record: &str) -> tracing::Span {
    tracing::debug_span!("render", mode = mode, record = record)
}
