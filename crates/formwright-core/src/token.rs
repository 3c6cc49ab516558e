//! Hour-granular anti-forgery form tokens.
//!
//! A token is the hex-encoded SHA-256 digest of a secret salt followed by the
//! current hour stamp (`DD.MM.YYYY HH`) in a fixed time zone (UTC-2). All
//! servers sharing a salt issue the same token for the same hour, whatever
//! their local zone.
//!
//! ## Validation window
//!
//! With a timeout of `n` hours, [`FormToken::validate`] accepts the tokens of
//! the current hour and of the `n + 1` previous hours. The extra hour covers
//! forms issued at 12:59 and posted at 13:00. The token of the next hour is
//! accepted as well, to tolerate clock skew between servers.
//!
//! This discourages stale re-submission of forms. It is not a per-user secret.

use chrono::{DateTime, Duration, Utc};
use sha2::{Digest, Sha256};

use crate::error::{FormwrightError, FormwrightResult};
use crate::settings::Settings;

/// Offset of the fixed token time zone from UTC, in hours.
const TOKEN_ZONE_OFFSET_HOURS: i64 = -2;

/// Upper bound for the timeout; validation hashes one stamp per hour.
pub const MAX_TIMEOUT_HOURS: i64 = 24 * 366;

/// Layout of the hashed hour stamp.
const HOUR_STAMP_FORMAT: &str = "%d.%m.%Y %H";

/// Issues and validates form tokens.
#[derive(Debug, Clone)]
pub struct FormToken {
    salt: String,
    timeout_hours: i64,
}

impl FormToken {
    /// Creates a token scheme from a salt and a timeout in hours, clamped to
    /// `0..=MAX_TIMEOUT_HOURS`.
    pub fn new(salt: impl Into<String>, timeout_hours: i64) -> Self {
        Self {
            salt: salt.into(),
            timeout_hours: timeout_hours.clamp(0, MAX_TIMEOUT_HOURS),
        }
    }

    /// Creates a token scheme from `form_salt` and `form_timeout_hours`.
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.form_salt.clone(), settings.form_timeout_hours)
    }

    /// Returns the timeout in hours.
    pub const fn timeout_hours(&self) -> i64 {
        self.timeout_hours
    }

    /// Issues the token for the current hour.
    pub fn issue(&self) -> String {
        self.issue_at(Utc::now())
    }

    /// Issues the token for the hour containing `now`.
    pub fn issue_at(&self, now: DateTime<Utc>) -> String {
        hour_token(&self.salt, now, 0)
    }

    /// Validates a token against the current time.
    pub fn validate(&self, token: &str) -> FormwrightResult<()> {
        self.validate_at(token, Utc::now())
    }

    /// Validates a token against the instant `now`.
    pub fn validate_at(&self, token: &str, now: DateTime<Utc>) -> FormwrightResult<()> {
        let lower_bound = -self.timeout_hours - 1;
        let accepted = (lower_bound..=0)
            .rev()
            .chain(std::iter::once(1))
            .any(|offset| constant_time_eq(token.as_bytes(), hour_token(&self.salt, now, offset).as_bytes()));

        if accepted {
            Ok(())
        } else {
            tracing::warn!(timeout_hours = self.timeout_hours, "rejected expired or foreign form token");
            Err(FormwrightError::TokenExpired(self.timeout_hours))
        }
    }
}

/// Hashes the salt and the hour stamp `offset_hours` away from `now`.
fn hour_token(salt: &str, now: DateTime<Utc>, offset_hours: i64) -> String {
    let zoned = now.naive_utc() + Duration::hours(TOKEN_ZONE_OFFSET_HOURS + offset_hours);
    let stamp = zoned.format(HOUR_STAMP_FORMAT).to_string();

    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(stamp.as_bytes());
    hex_encode(&hasher.finalize())
}

/// Constant-time byte comparison to prevent timing attacks.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}

/// Encodes bytes as a hex string.
fn hex_encode(bytes: &[u8]) -> String {
    use std::fmt::Write;
    bytes
        .iter()
        .fold(String::with_capacity(bytes.len() * 2), |mut s, b| {
            let _ = write!(s, "{b:02x}");
            s
        })
}
