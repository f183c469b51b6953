//! Rewrites a closed set of recognized transport failures into fixed,
//! user-facing diagnostics. Everything outside the set passes through
//! untouched, and the rewrite happens exactly once, when a
//! [`RawResponse`](crate::RawResponse) is constructed.

use crate::error::TransportError;

/// Transport error code reported when a request timed out.
pub const TIMED_OUT_CODE: i64 = -1001;

/// Transport error code reported when no network connectivity was available.
pub const NO_CONNECTIVITY_CODE: i64 = -1009;

/// Diagnostic shown for timed-out requests. Stable: downstream code matches
/// on this text for user display.
pub const TIMED_OUT_MESSAGE: &str =
    "Oooops! We couldn't capture your request in time. Please try again.";

/// Diagnostic shown when the device had no connectivity. Stable, see
/// [`TIMED_OUT_MESSAGE`].
pub const NO_CONNECTIVITY_MESSAGE: &str =
    "Oh! You are not connected to a wifi or cellular data network. Please connect and try again.";

/// The closed set of transport failures that get rewritten into fixed
/// diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    TimedOut,
    Offline,
}

impl FailureKind {
    /// Matches a raw transport error code against the recognized set.
    pub fn recognize(code: i64) -> Option<FailureKind> {
        match code {
            TIMED_OUT_CODE => Some(FailureKind::TimedOut),
            NO_CONNECTIVITY_CODE => Some(FailureKind::Offline),
            _ => None,
        }
    }

    /// The (replacement code, message) pair this failure normalizes to.
    fn diagnostic(self, config: &NormalizeConfig) -> (i64, &'static str) {
        match self {
            FailureKind::TimedOut => (TIMED_OUT_CODE, TIMED_OUT_MESSAGE),
            // Historically the offline diagnostic shipped under the
            // timed-out code. `distinct_offline_code` opts into the
            // corrected code; the default keeps compatibility.
            FailureKind::Offline => {
                let code = if config.distinct_offline_code {
                    NO_CONNECTIVITY_CODE
                } else {
                    TIMED_OUT_CODE
                };
                (code, NO_CONNECTIVITY_MESSAGE)
            }
        }
    }
}

/// Controls how recognized failures are rewritten.
#[derive(Debug, Clone, Default)]
pub struct NormalizeConfig {
    /// Report the offline diagnostic under [`NO_CONNECTIVITY_CODE`] instead
    /// of reusing [`TIMED_OUT_CODE`] as older releases did.
    pub distinct_offline_code: bool,
}

/// Total over its input: recognized failures are replaced by their fixed
/// diagnostic (the domain is carried over from the original error), anything
/// else is returned unchanged.
///
/// # Example
/// ```rust
/// use rust_exchange::{normalize, NormalizeConfig, TransportError, TIMED_OUT_MESSAGE};
///
/// let raw = TransportError::new("url-session", -1001, "timed out");
/// let normalized = normalize(raw, &NormalizeConfig::default());
/// assert_eq!(TIMED_OUT_MESSAGE, normalized.message);
/// assert_eq!("url-session", normalized.domain);
/// ```
pub fn normalize(error: TransportError, config: &NormalizeConfig) -> TransportError {
    match FailureKind::recognize(error.code) {
        Some(kind) => {
            let (code, message) = kind.diagnostic(config);
            TransportError {
                domain: error.domain,
                code,
                message: message.to_string(),
            }
        }
        None => error,
    }
}
