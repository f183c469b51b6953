use std::fmt;

use bytes::Bytes;
use serde::de::DeserializeOwned;

use crate::error::{ExchangeError, TransportError};

/// Whether response serialization succeeded, and the value or error it
/// produced. A typed response always carries exactly one of the two.
pub enum Outcome<V> {
    Success(V),
    Failure(ExchangeError),
}

impl<V> Outcome<V> {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    pub fn is_failure(&self) -> bool {
        !self.is_success()
    }

    /// The serialized value, if serialization succeeded.
    pub fn value(&self) -> Option<&V> {
        match self {
            Outcome::Success(value) => Some(value),
            Outcome::Failure(_) => None,
        }
    }

    /// The serialization error, if serialization failed.
    pub fn error(&self) -> Option<&ExchangeError> {
        match self {
            Outcome::Success(_) => None,
            Outcome::Failure(err) => Some(err),
        }
    }
}

impl<V> Outcome<V>
where
    V: DeserializeOwned,
{
    /// Serializes the raw artifacts of a completed exchange as JSON. A
    /// transport error always wins over whatever body was received.
    ///
    /// # Example
    /// ```rust
    /// use bytes::Bytes;
    /// use rust_exchange::Outcome;
    ///
    /// let body = Bytes::from_static(b"[1, 2, 3]");
    /// let outcome = Outcome::<Vec<u32>>::from_json(Some(&body), None);
    /// assert_eq!(Some(&vec![1, 2, 3]), outcome.value());
    /// ```
    pub fn from_json(data: Option<&Bytes>, error: Option<TransportError>) -> Outcome<V> {
        if let Some(err) = error {
            return Outcome::Failure(ExchangeError::Transport(err));
        }
        match data {
            Some(bytes) => match serde_json::from_slice(bytes) {
                Ok(value) => Outcome::Success(value),
                Err(err) => Outcome::Failure(ExchangeError::Deserialization(err)),
            },
            None => Outcome::Failure(ExchangeError::MissingBody),
        }
    }
}

/// Short form: `SUCCESS` or `FAILURE: <message>`.
impl<V> fmt::Display for Outcome<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Success(_) => write!(f, "SUCCESS"),
            Outcome::Failure(err) => write!(f, "FAILURE: {err}"),
        }
    }
}

/// Debug form: like the short form, but includes the serialized value.
impl<V> fmt::Debug for Outcome<V>
where
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Success(value) => write!(f, "SUCCESS: {value:?}"),
            Outcome::Failure(err) => write!(f, "FAILURE: {err}"),
        }
    }
}
